//! crates/synotool/src/reconcile.rs
//!
//! Converges the ACL and archive flags of a path to a desired state.
//!
//! Entries are matched on their (role, name, type) key. The tool addresses
//! entries by position and renumbers them after every mutation, so the index
//! of each entry is looked up again right before it is deleted or replaced.
//! Nothing is rolled back: an error leaves the operations issued so far in
//! place.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use acl::{AclEntry, AclKey, AclSet, ArchiveFlags};
use tracing::{debug, info};

use crate::RECONCILE_TARGET;
use crate::error::{ToolError, ToolResult};
use crate::tool::AclTool;

/// Operations turning one list of direct entries into another.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AclPlan {
    /// Existing entries whose key is not desired.
    pub deletes: Vec<AclEntry>,
    /// Existing entries paired with the desired entry sharing their key.
    pub modifies: Vec<(AclEntry, AclEntry)>,
    /// Desired entries whose key does not exist yet, in desired order.
    pub adds: Vec<AclEntry>,
}

impl AclPlan {
    /// Diffs the `existing` direct entries against `desired`.
    ///
    /// When several desired entries share a key the last one wins, and the
    /// entry keeps the position of that last occurrence among the adds.
    /// Existing duplicates beyond the first match of a key are deleted.
    pub fn compute<'a>(
        existing: impl IntoIterator<Item = &'a AclEntry>,
        desired: &[AclEntry],
    ) -> Self {
        let mut wanted: HashMap<AclKey, usize> = desired
            .iter()
            .enumerate()
            .map(|(index, entry)| (entry.key(), index))
            .collect();

        let mut plan = Self::default();

        for current in existing {
            match wanted.remove(&current.key()) {
                Some(index) if desired[index] != *current => {
                    plan.modifies.push((current.clone(), desired[index].clone()));
                }
                Some(_) => {}
                None => plan.deletes.push(current.clone()),
            }
        }

        plan.adds = desired
            .iter()
            .enumerate()
            .filter(|(index, entry)| wanted.get(&entry.key()) == Some(index))
            .map(|(_, entry)| entry.clone())
            .collect();

        plan
    }

    /// Returns `true` when the lists already agree.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty() && self.modifies.is_empty() && self.adds.is_empty()
    }

    /// Issues the plan against `tool`: deletes, then replacements, then adds.
    pub fn apply<T: AclTool + ?Sized>(&self, tool: &T, path: &Path) -> ToolResult<AdaptReport> {
        for entry in &self.deletes {
            let index = locate(tool, path, entry)?;
            debug!(
                target: RECONCILE_TARGET,
                path = %path.display(),
                index,
                %entry,
                "deleting ACL entry"
            );
            tool.delete_entry(path, index)?;
        }

        for (from, to) in &self.modifies {
            let index = locate(tool, path, from)?;
            debug!(
                target: RECONCILE_TARGET,
                path = %path.display(),
                index,
                %from,
                %to,
                "replacing ACL entry"
            );
            tool.replace(path, index, to)?;
        }

        for entry in &self.adds {
            debug!(
                target: RECONCILE_TARGET,
                path = %path.display(),
                %entry,
                "adding ACL entry"
            );
            tool.add(path, entry)?;
        }

        Ok(AdaptReport {
            deleted: self.deletes.len(),
            modified: self.modifies.len(),
            added: self.adds.len(),
        })
    }
}

impl fmt::Display for AclPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.deletes {
            writeln!(f, "delete  {entry}")?;
        }
        for (from, to) in &self.modifies {
            writeln!(f, "replace {from} -> {to}")?;
        }
        for entry in &self.adds {
            writeln!(f, "add     {entry}")?;
        }
        Ok(())
    }
}

/// Counts of the operations issued by a reconciliation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AdaptReport {
    /// Entries deleted.
    pub deleted: usize,
    /// Entries replaced in place.
    pub modified: usize,
    /// Entries appended.
    pub added: usize,
}

impl AdaptReport {
    /// Returns `true` when no operation was issued.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.deleted == 0 && self.modified == 0 && self.added == 0
    }
}

impl fmt::Display for AdaptReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} deleted, {} modified, {} added",
            self.deleted, self.modified, self.added
        )
    }
}

/// Finds the current direct index of `entry`, compared on every field.
fn locate<T: AclTool + ?Sized>(tool: &T, path: &Path, entry: &AclEntry) -> ToolResult<usize> {
    tool.get(path)?
        .position_of_direct(entry)
        .ok_or_else(|| ToolError::EntryNotFound {
            path: path.to_path_buf(),
            entry: entry.clone(),
        })
}

/// Makes the direct entries of `path` equal to `desired` with as few
/// operations as possible.
///
/// Inherited entries are never touched. Afterwards the direct entries equal
/// `desired` as a set, unless `desired` repeats a key or the path is changed
/// concurrently.
pub fn adapt_to<T: AclTool + ?Sized>(
    tool: &T,
    path: &Path,
    desired: &[AclEntry],
) -> ToolResult<AdaptReport> {
    let current = tool.get(path)?;
    let plan = AclPlan::compute(current.direct(), desired);

    if plan.is_empty() {
        debug!(
            target: RECONCILE_TARGET,
            path = %path.display(),
            "ACL already up to date"
        );
        return Ok(AdaptReport::default());
    }

    let report = plan.apply(tool, path)?;
    info!(
        target: RECONCILE_TARGET,
        path = %path.display(),
        deleted = report.deleted,
        modified = report.modified,
        added = report.added,
        "ACL reconciled"
    );
    Ok(report)
}

/// Removes every direct entry of `path`, then adds `desired` in order.
///
/// The path has no direct entry between the two steps.
pub fn reset<T: AclTool + ?Sized>(
    tool: &T,
    path: &Path,
    desired: &[AclEntry],
) -> ToolResult<AdaptReport> {
    let deleted = tool.get(path)?.direct_len();
    tool.delete_all(path)?;

    for entry in desired {
        debug!(
            target: RECONCILE_TARGET,
            path = %path.display(),
            %entry,
            "adding ACL entry"
        );
        tool.add(path, entry)?;
    }

    let report = AdaptReport {
        deleted,
        modified: 0,
        added: desired.len(),
    };
    info!(
        target: RECONCILE_TARGET,
        path = %path.display(),
        deleted = report.deleted,
        added = report.added,
        "ACL reset"
    );
    Ok(report)
}

/// Deletes the first direct entry targeting `role`/`name`.
pub fn delete_for_role<T: AclTool + ?Sized>(
    tool: &T,
    path: &Path,
    role: &str,
    name: &str,
) -> ToolResult<AclSet> {
    let index = tool
        .get(path)?
        .direct()
        .position(|entry| entry.is_for(role, name))
        .ok_or_else(|| ToolError::RoleNotFound {
            path: path.to_path_buf(),
            role: role.to_owned(),
            name: name.to_owned(),
        })?;

    debug!(
        target: RECONCILE_TARGET,
        path = %path.display(),
        index,
        role,
        name,
        "deleting ACL entry for role"
    );
    tool.delete_entry(path, index)
}

/// Archive flags to clear and to set.
///
/// `has_ACL` is derived by the tool from the entry list and is never part of
/// either set.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ArchivePlan {
    /// Flags set now but not desired.
    pub to_drop: ArchiveFlags,
    /// Flags desired but not set now.
    pub to_set: ArchiveFlags,
}

impl ArchivePlan {
    /// Diffs `current` against `desired`.
    #[must_use]
    pub const fn compute(current: ArchiveFlags, desired: ArchiveFlags) -> Self {
        Self {
            to_drop: current.difference(&desired).without_has_acl(),
            to_set: desired.difference(&current).without_has_acl(),
        }
    }

    /// Returns `true` when nothing needs to change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.to_drop.is_none() && self.to_set.is_none()
    }

    /// Issues at most one clear call followed by at most one set call.
    pub fn apply<T: AclTool + ?Sized>(&self, tool: &T, path: &Path) -> ToolResult<()> {
        if !self.to_drop.is_none() {
            debug!(
                target: RECONCILE_TARGET,
                path = %path.display(),
                flags = %self.to_drop,
                "clearing archive flags"
            );
            tool.del_archive(path, self.to_drop)?;
        }

        if !self.to_set.is_none() {
            debug!(
                target: RECONCILE_TARGET,
                path = %path.display(),
                flags = %self.to_set,
                "setting archive flags"
            );
            tool.set_archive(path, self.to_set)?;
        }

        Ok(())
    }
}

impl fmt::Display for ArchivePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dropped: {}, set: {}", self.to_drop, self.to_set)
    }
}

/// Makes the archive flags of `path` equal to `desired`, `has_ACL` aside.
///
/// Returns the plan that was applied.
pub fn set_archive_to<T: AclTool + ?Sized>(
    tool: &T,
    path: &Path,
    desired: ArchiveFlags,
) -> ToolResult<ArchivePlan> {
    let current = tool.get_archive(path)?;
    let plan = ArchivePlan::compute(current, desired);
    plan.apply(tool, path)?;

    info!(
        target: RECONCILE_TARGET,
        path = %path.display(),
        dropped = %plan.to_drop,
        set = %plan.to_set,
        "archive flags reconciled"
    );
    Ok(plan)
}
