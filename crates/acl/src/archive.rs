//! crates/acl/src/archive.rs
//!
//! Per-path archive flags reported by `synoacltool -get-archive`.
//!
//! The tool calls these "archive" bits although they control ACL behaviour:
//!
//! - `is_support_ACL`: ACLs are enabled for the path.
//! - `is_read_only`: the directory is read-only.
//! - `is_owner_group`: new files are owned by the directory's group.
//! - `has_ACL`: the path carries ACL entries.
//! - `is_inherit`: entries of the parent directory are inherited.

use std::fmt;
use std::str::FromStr;

use crate::error::{AclError, AclResult};

const FLAG_IS_INHERIT: &str = "is_inherit";
const FLAG_IS_READ_ONLY: &str = "is_read_only";
const FLAG_IS_OWNER_GROUP: &str = "is_owner_group";
const FLAG_HAS_ACL: &str = "has_ACL";
const FLAG_IS_SUPPORT_ACL: &str = "is_support_ACL";
const FLAG_NONE: &str = "None";

/// The archive flags of a path.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", from = "String")
)]
pub struct ArchiveFlags {
    /// Inherit the entries of the parent directory (`is_inherit`).
    pub is_inherit: bool,
    /// The directory is read-only (`is_read_only`).
    pub is_read_only: bool,
    /// Files created inside belong to the directory's group (`is_owner_group`).
    pub is_owner_group: bool,
    /// The path carries ACL entries (`has_ACL`).
    pub has_acl: bool,
    /// ACL support is enabled for the path (`is_support_ACL`).
    pub is_support_acl: bool,
}

impl ArchiveFlags {
    /// Returns `true` when no flag is set.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        !(self.is_inherit
            || self.is_read_only
            || self.is_owner_group
            || self.has_acl
            || self.is_support_acl)
    }

    /// Parses a comma separated flag list such as `is_inherit,has_ACL`.
    ///
    /// Whitespace around names and empty items are skipped. The `None`
    /// sentinel is accepted anywhere in the list and sets nothing. Names the
    /// crate does not know are skipped as well, since the tool reports them
    /// inconsistently across releases.
    pub fn parse(text: &str) -> Self {
        let mut flags = Self::default();

        for name in text.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            if !flags.set_named(name) {
                tracing::debug!(flag = name, "ignoring unknown archive flag");
            }
        }

        flags
    }

    /// Parses a flag list supplied by a user.
    ///
    /// Accepts the same syntax as [`parse`](Self::parse) but rejects names
    /// the crate does not know.
    pub fn parse_strict(text: &str) -> AclResult<Self> {
        let mut flags = Self::default();

        for name in text.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            if !flags.set_named(name) {
                return Err(AclError::UnknownArchiveFlag(name.to_owned()));
            }
        }

        Ok(flags)
    }

    /// Sets the flag called `name`. Returns `false` for unknown names.
    fn set_named(&mut self, name: &str) -> bool {
        match name {
            FLAG_IS_INHERIT => self.is_inherit = true,
            FLAG_IS_READ_ONLY => self.is_read_only = true,
            FLAG_IS_OWNER_GROUP => self.is_owner_group = true,
            FLAG_HAS_ACL => self.has_acl = true,
            FLAG_IS_SUPPORT_ACL => self.is_support_acl = true,
            FLAG_NONE => {}
            _ => return false,
        }
        true
    }

    /// Returns the flags set in `self` but not in `other`.
    #[must_use]
    pub const fn difference(&self, other: &Self) -> Self {
        Self {
            is_inherit: self.is_inherit && !other.is_inherit,
            is_read_only: self.is_read_only && !other.is_read_only,
            is_owner_group: self.is_owner_group && !other.is_owner_group,
            has_acl: self.has_acl && !other.has_acl,
            is_support_acl: self.is_support_acl && !other.is_support_acl,
        }
    }

    /// Returns the flags set in either value.
    #[must_use]
    pub const fn union(&self, other: &Self) -> Self {
        Self {
            is_inherit: self.is_inherit || other.is_inherit,
            is_read_only: self.is_read_only || other.is_read_only,
            is_owner_group: self.is_owner_group || other.is_owner_group,
            has_acl: self.has_acl || other.has_acl,
            is_support_acl: self.is_support_acl || other.is_support_acl,
        }
    }

    /// Returns a copy with `has_ACL` cleared.
    ///
    /// `has_ACL` mirrors whether the path has entries; the tool maintains it
    /// and callers never set or clear it directly.
    #[must_use]
    pub const fn without_has_acl(&self) -> Self {
        Self {
            has_acl: false,
            ..*self
        }
    }

    fn names(&self) -> impl Iterator<Item = &'static str> {
        [
            (self.is_inherit, FLAG_IS_INHERIT),
            (self.is_read_only, FLAG_IS_READ_ONLY),
            (self.is_owner_group, FLAG_IS_OWNER_GROUP),
            (self.has_acl, FLAG_HAS_ACL),
            (self.is_support_acl, FLAG_IS_SUPPORT_ACL),
        ]
        .into_iter()
        .filter_map(|(set, name)| set.then_some(name))
    }
}

impl fmt::Display for ArchiveFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str(FLAG_NONE);
        }

        for (index, name) in self.names().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

impl FromStr for ArchiveFlags {
    type Err = AclError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(text))
    }
}

impl From<ArchiveFlags> for String {
    fn from(flags: ArchiveFlags) -> Self {
        flags.to_string()
    }
}

impl From<String> for ArchiveFlags {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}
