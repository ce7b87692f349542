//! crates/acl/src/entry.rs
//!
//! A single ACL entry and its `role:name:type:permissions:inheritance` codec.

use std::fmt;
use std::str::FromStr;

use crate::error::{AclError, AclResult};
use crate::inheritance::InheritanceMode;
use crate::permissions::PermissionSet;

/// One rule binding a principal to a set of rights.
///
/// `role` and `acl_type` are kept as the tool reports them (`user`, `group`,
/// `owner`, `everyone`, ... and `allow`, `deny`). The crate only requires them
/// to be non-empty and free of `:`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AclEntry {
    /// Principal kind, e.g. `user` or `group`.
    pub role: String,
    /// Principal name, e.g. `admin`.
    pub name: String,
    /// Entry kind, e.g. `allow` or `deny`.
    pub acl_type: String,
    /// Rights covered by the entry.
    pub permissions: PermissionSet,
    /// How the entry propagates to children.
    pub inherit_mode: InheritanceMode,
}

/// Identity of an entry during reconciliation: (role, name, type).
///
/// Two entries with the same key describe the same rule; only their
/// permissions and inheritance may differ.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct AclKey {
    /// Principal kind.
    pub role: String,
    /// Principal name.
    pub name: String,
    /// Entry kind.
    pub acl_type: String,
}

impl AclEntry {
    /// Builds an entry from its parts.
    pub fn new(
        role: impl Into<String>,
        name: impl Into<String>,
        acl_type: impl Into<String>,
        permissions: PermissionSet,
        inherit_mode: InheritanceMode,
    ) -> Self {
        Self {
            role: role.into(),
            name: name.into(),
            acl_type: acl_type.into(),
            permissions,
            inherit_mode,
        }
    }

    /// Parses a `role:name:type:permissions:inheritance` line.
    ///
    /// The first four fields must be non-empty and colon free. The last field
    /// must be non-empty and contain no spaces. The permission and inheritance
    /// fields are then decoded by their own codecs.
    pub fn parse(line: &str) -> AclResult<Self> {
        let fields: Vec<&str> = line.splitn(5, ':').collect();
        let &[role, name, acl_type, permissions, inheritance] = fields.as_slice() else {
            return Err(AclError::MalformedEntry(line.to_owned()));
        };

        if fields.iter().any(|field| field.is_empty()) || inheritance.contains(' ') {
            return Err(AclError::MalformedEntry(line.to_owned()));
        }

        Ok(Self {
            role: role.to_owned(),
            name: name.to_owned(),
            acl_type: acl_type.to_owned(),
            permissions: PermissionSet::parse(permissions)?,
            inherit_mode: InheritanceMode::parse(inheritance)?,
        })
    }

    /// Returns the (role, name, type) identity of this entry.
    #[must_use]
    pub fn key(&self) -> AclKey {
        AclKey {
            role: self.role.clone(),
            name: self.name.clone(),
            acl_type: self.acl_type.clone(),
        }
    }

    /// Returns `true` when both entries share the same (role, name, type).
    #[must_use]
    pub fn same_key(&self, other: &Self) -> bool {
        self.role == other.role && self.name == other.name && self.acl_type == other.acl_type
    }

    /// Returns `true` when the entry targets the given principal.
    #[must_use]
    pub fn is_for(&self, role: &str, name: &str) -> bool {
        self.role == role && self.name == name
    }

    /// Points the entry at another principal.
    pub fn set_target(&mut self, role: impl Into<String>, name: impl Into<String>) {
        self.role = role.into();
        self.name = name.into();
    }
}

impl fmt::Display for AclEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}",
            self.role, self.name, self.acl_type, self.permissions, self.inherit_mode
        )
    }
}

impl FromStr for AclEntry {
    type Err = AclError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl fmt::Display for AclKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.role, self.name, self.acl_type)
    }
}
