//! crates/synotool/src/tool.rs
//!
//! The query and mutation surface of the ACL tool.

use std::path::Path;

use acl::{AclEntry, AclSet, ArchiveFlags};

use crate::error::ToolResult;

/// Operations offered by `synoacltool` for a single path.
///
/// Entry indices refer to positions among the direct entries of the path and
/// are renumbered by the tool after every mutation. Implementations perform
/// each call synchronously.
pub trait AclTool {
    /// Returns the ACL listing of `path`.
    ///
    /// A path the tool reports as having no ACL yields an empty set.
    fn get(&self, path: &Path) -> ToolResult<AclSet>;

    /// Appends `entry` and returns the resulting listing.
    fn add(&self, path: &Path, entry: &AclEntry) -> ToolResult<AclSet>;

    /// Removes the direct entry at `index`.
    fn delete_entry(&self, path: &Path, index: usize) -> ToolResult<AclSet>;

    /// Overwrites the direct entry at `index` with `entry`.
    fn replace(&self, path: &Path, index: usize, entry: &AclEntry) -> ToolResult<AclSet>;

    /// Removes every direct entry. Does nothing when the path has none.
    fn delete_all(&self, path: &Path) -> ToolResult<()>;

    /// Returns the archive flags of `path`.
    fn get_archive(&self, path: &Path) -> ToolResult<ArchiveFlags>;

    /// Sets the flags present in `flags` and returns the resulting flags.
    fn set_archive(&self, path: &Path, flags: ArchiveFlags) -> ToolResult<ArchiveFlags>;

    /// Clears the flags present in `flags` and returns the resulting flags.
    fn del_archive(&self, path: &Path, flags: ArchiveFlags) -> ToolResult<ArchiveFlags>;

    /// Forces children of `path` to inherit its entries.
    fn enforce_inherit(&self, path: &Path) -> ToolResult<()>;
}

impl<T: AclTool + ?Sized> AclTool for &T {
    fn get(&self, path: &Path) -> ToolResult<AclSet> {
        (**self).get(path)
    }

    fn add(&self, path: &Path, entry: &AclEntry) -> ToolResult<AclSet> {
        (**self).add(path, entry)
    }

    fn delete_entry(&self, path: &Path, index: usize) -> ToolResult<AclSet> {
        (**self).delete_entry(path, index)
    }

    fn replace(&self, path: &Path, index: usize, entry: &AclEntry) -> ToolResult<AclSet> {
        (**self).replace(path, index, entry)
    }

    fn delete_all(&self, path: &Path) -> ToolResult<()> {
        (**self).delete_all(path)
    }

    fn get_archive(&self, path: &Path) -> ToolResult<ArchiveFlags> {
        (**self).get_archive(path)
    }

    fn set_archive(&self, path: &Path, flags: ArchiveFlags) -> ToolResult<ArchiveFlags> {
        (**self).set_archive(path, flags)
    }

    fn del_archive(&self, path: &Path, flags: ArchiveFlags) -> ToolResult<ArchiveFlags> {
        (**self).del_archive(path, flags)
    }

    fn enforce_inherit(&self, path: &Path) -> ToolResult<()> {
        (**self).enforce_inherit(path)
    }
}
