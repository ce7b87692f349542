//! crates/synotool/src/memory.rs
//!
//! In-memory [`AclTool`] that mimics the renumbering behaviour of
//! `synoacltool` and records every call it receives.
//!
//! The double models one path: the `path` argument of each call is ignored.

use std::cell::RefCell;
use std::path::Path;

use acl::{AclEntry, AclSet, ArchiveFlags};

use crate::error::{ToolError, ToolResult};
use crate::tool::AclTool;

/// A call received by [`MemoryTool`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ToolCall {
    /// `-get`
    Get,
    /// `-add` with the appended entry.
    Add(AclEntry),
    /// `-del` with the direct index.
    DeleteEntry(usize),
    /// `-replace` with the direct index and the new entry.
    Replace(usize, AclEntry),
    /// `-del` without an index.
    DeleteAll,
    /// `-get-archive`
    GetArchive,
    /// `-set-archive` with the requested flags.
    SetArchive(ArchiveFlags),
    /// `-del-archive` with the requested flags.
    DelArchive(ArchiveFlags),
    /// `-enforce-inherit`
    EnforceInherit,
}

impl ToolCall {
    /// Returns `true` for calls that change the path.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        !matches!(self, Self::Get | Self::GetArchive)
    }
}

#[derive(Debug, Default)]
struct PathState {
    direct: Vec<AclEntry>,
    inherited: Vec<(AclEntry, u32)>,
    archive: ArchiveFlags,
}

impl PathState {
    fn listing(&self) -> AclSet {
        let mut entries = self.direct.clone();
        let mut levels = vec![0; entries.len()];
        for (entry, level) in &self.inherited {
            entries.push(entry.clone());
            levels.push(*level);
        }

        // Both lists are built side by side, so the lengths always agree.
        AclSet::with_levels(entries, levels).unwrap_or_default()
    }

    fn archive(&self) -> ArchiveFlags {
        ArchiveFlags {
            has_acl: !self.direct.is_empty(),
            ..self.archive
        }
    }
}

/// Recording in-memory tool for tests.
#[derive(Debug, Default)]
pub struct MemoryTool {
    state: RefCell<PathState>,
    calls: RefCell<Vec<ToolCall>>,
}

impl MemoryTool {
    /// Creates a tool whose path has no entries and no archive flags.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `entries` as the direct entries.
    #[must_use]
    pub fn with_entries(self, entries: impl IntoIterator<Item = AclEntry>) -> Self {
        self.state.borrow_mut().direct = entries.into_iter().collect();
        self
    }

    /// Adds an entry inherited through `level` ancestors.
    #[must_use]
    pub fn with_inherited(self, entry: AclEntry, level: u32) -> Self {
        self.state.borrow_mut().inherited.push((entry, level.max(1)));
        self
    }

    /// Starts with the given archive flags. `has_ACL` is derived from the
    /// entries and ignored here.
    #[must_use]
    pub fn with_archive(self, flags: ArchiveFlags) -> Self {
        self.state.borrow_mut().archive = flags.without_has_acl();
        self
    }

    /// Returns the current direct entries.
    #[must_use]
    pub fn direct_entries(&self) -> Vec<AclEntry> {
        self.state.borrow().direct.clone()
    }

    /// Replaces the direct entries without recording a call.
    ///
    /// Simulates another actor changing the path behind the caller's back.
    pub fn set_direct_entries(&self, entries: Vec<AclEntry>) {
        self.state.borrow_mut().direct = entries;
    }

    /// Returns the current archive flags.
    #[must_use]
    pub fn archive(&self) -> ArchiveFlags {
        self.state.borrow().archive()
    }

    /// Returns every recorded call in order.
    #[must_use]
    pub fn calls(&self) -> Vec<ToolCall> {
        self.calls.borrow().clone()
    }

    /// Returns the recorded calls that change the path.
    #[must_use]
    pub fn mutations(&self) -> Vec<ToolCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.is_mutation())
            .cloned()
            .collect()
    }

    /// Forgets the recorded calls.
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: ToolCall) {
        self.calls.borrow_mut().push(call);
    }

    fn out_of_range(operation: &'static str) -> ToolError {
        ToolError::CommandFailed {
            operation,
            code: Some(255),
            stderr: "Index out of range".to_owned(),
        }
    }
}

impl AclTool for MemoryTool {
    fn get(&self, _path: &Path) -> ToolResult<AclSet> {
        self.record(ToolCall::Get);
        Ok(self.state.borrow().listing())
    }

    fn add(&self, _path: &Path, entry: &AclEntry) -> ToolResult<AclSet> {
        self.record(ToolCall::Add(entry.clone()));
        let mut state = self.state.borrow_mut();
        state.direct.push(entry.clone());
        Ok(state.listing())
    }

    fn delete_entry(&self, _path: &Path, index: usize) -> ToolResult<AclSet> {
        self.record(ToolCall::DeleteEntry(index));
        let mut state = self.state.borrow_mut();
        if index >= state.direct.len() {
            return Err(Self::out_of_range("-del"));
        }
        state.direct.remove(index);
        Ok(state.listing())
    }

    fn replace(&self, _path: &Path, index: usize, entry: &AclEntry) -> ToolResult<AclSet> {
        self.record(ToolCall::Replace(index, entry.clone()));
        let mut state = self.state.borrow_mut();
        let Some(slot) = state.direct.get_mut(index) else {
            return Err(Self::out_of_range("-replace"));
        };
        *slot = entry.clone();
        Ok(state.listing())
    }

    fn delete_all(&self, _path: &Path) -> ToolResult<()> {
        self.record(ToolCall::DeleteAll);
        self.state.borrow_mut().direct.clear();
        Ok(())
    }

    fn get_archive(&self, _path: &Path) -> ToolResult<ArchiveFlags> {
        self.record(ToolCall::GetArchive);
        Ok(self.state.borrow().archive())
    }

    fn set_archive(&self, _path: &Path, flags: ArchiveFlags) -> ToolResult<ArchiveFlags> {
        self.record(ToolCall::SetArchive(flags));
        let mut state = self.state.borrow_mut();
        state.archive = state.archive.union(&flags).without_has_acl();
        Ok(state.archive())
    }

    fn del_archive(&self, _path: &Path, flags: ArchiveFlags) -> ToolResult<ArchiveFlags> {
        self.record(ToolCall::DelArchive(flags));
        let mut state = self.state.borrow_mut();
        state.archive = state.archive.difference(&flags);
        Ok(state.archive())
    }

    fn enforce_inherit(&self, _path: &Path) -> ToolResult<()> {
        self.record(ToolCall::EnforceInherit);
        Ok(())
    }
}
