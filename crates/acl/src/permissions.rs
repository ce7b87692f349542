//! crates/acl/src/permissions.rs
//!
//! The 13 access rights of a Synology ACL entry.
//!
//! Rights render as a fixed 13 character token, one position per right in the
//! order `r w x p d D a A R W c C o`. Unset rights render as `-`, so an entry
//! granting read, write and execute reads `rwx----------`.

use std::fmt;
use std::str::FromStr;

use crate::error::{AclError, AclResult};
use crate::letters::{parse_token, write_token};

const LETTERS: [char; 13] = [
    'r', 'w', 'x', 'p', 'd', 'D', 'a', 'A', 'R', 'W', 'c', 'C', 'o',
];

/// Access rights granted or denied by an ACL entry.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct PermissionSet {
    /// Read file data / list directory (`r`).
    pub read_data: bool,
    /// Write file data / create file (`w`).
    pub write_data: bool,
    /// Execute file / traverse directory (`x`).
    pub execute: bool,
    /// Append data / create subdirectory (`p`).
    pub append_data: bool,
    /// Delete the object itself (`d`).
    pub delete: bool,
    /// Delete children of a directory (`D`).
    pub delete_child: bool,
    /// Read basic attributes (`a`).
    pub read_attribute: bool,
    /// Write basic attributes (`A`).
    pub write_attribute: bool,
    /// Read extended attributes (`R`).
    pub read_xattr: bool,
    /// Write extended attributes (`W`).
    pub write_xattr: bool,
    /// Read the ACL (`c`).
    pub read_acl: bool,
    /// Write the ACL (`C`).
    pub write_acl: bool,
    /// Take ownership (`o`).
    pub get_ownership: bool,
}

impl PermissionSet {
    /// Width of the textual token.
    pub const WIDTH: usize = LETTERS.len();

    /// Returns a set with every right granted.
    #[must_use]
    pub const fn all() -> Self {
        Self::from_flags([true; 13])
    }

    /// Returns `true` when no right is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_flags().iter().all(|set| !set)
    }

    /// Parses a permission token such as `rwx----------`.
    ///
    /// Any character outside the permission alphabet and `-` is rejected. The
    /// token length is not enforced.
    pub fn parse(token: &str) -> AclResult<Self> {
        parse_token(token, &LETTERS, AclError::UnexpectedPermissionLetter).map(Self::from_flags)
    }

    const fn from_flags(flags: [bool; 13]) -> Self {
        let [
            read_data,
            write_data,
            execute,
            append_data,
            delete,
            delete_child,
            read_attribute,
            write_attribute,
            read_xattr,
            write_xattr,
            read_acl,
            write_acl,
            get_ownership,
        ] = flags;

        Self {
            read_data,
            write_data,
            execute,
            append_data,
            delete,
            delete_child,
            read_attribute,
            write_attribute,
            read_xattr,
            write_xattr,
            read_acl,
            write_acl,
            get_ownership,
        }
    }

    const fn to_flags(self) -> [bool; 13] {
        [
            self.read_data,
            self.write_data,
            self.execute,
            self.append_data,
            self.delete,
            self.delete_child,
            self.read_attribute,
            self.write_attribute,
            self.read_xattr,
            self.write_xattr,
            self.read_acl,
            self.write_acl,
            self.get_ownership,
        ]
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_token(f, &LETTERS, &self.to_flags())
    }
}

impl FromStr for PermissionSet {
    type Err = AclError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl From<PermissionSet> for String {
    fn from(permissions: PermissionSet) -> Self {
        permissions.to_string()
    }
}

impl TryFrom<String> for PermissionSet {
    type Error = AclError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::parse(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_RIGHTS: &str = "-------------";
    const RWX_RIGHTS: &str = "rwx----------";
    const ALL_RIGHTS: &str = "rwxpdDaARWcCo";

    #[test]
    fn empty_set_formats_as_dashes() {
        assert_eq!(PermissionSet::default().to_string(), NO_RIGHTS);
        assert_eq!(NO_RIGHTS.len(), PermissionSet::WIDTH);
    }

    #[test]
    fn rwx_formats_leading_letters() {
        let permissions = PermissionSet {
            read_data: true,
            write_data: true,
            execute: true,
            ..PermissionSet::default()
        };
        assert_eq!(permissions.to_string(), RWX_RIGHTS);
    }

    #[test]
    fn full_set_formats_every_letter() {
        assert_eq!(PermissionSet::all().to_string(), ALL_RIGHTS);
    }

    #[test]
    fn parse_no_rights() {
        let permissions = PermissionSet::parse(NO_RIGHTS).unwrap();
        assert!(permissions.is_empty());
        assert_eq!(permissions, PermissionSet::default());
    }

    #[test]
    fn parse_rwx_rights() {
        let permissions = PermissionSet::parse(RWX_RIGHTS).unwrap();
        assert!(permissions.read_data);
        assert!(permissions.write_data);
        assert!(permissions.execute);
        assert!(!permissions.append_data);
        assert!(!permissions.delete);
        assert!(!permissions.delete_child);
        assert!(!permissions.read_attribute);
        assert!(!permissions.write_attribute);
        assert!(!permissions.read_xattr);
        assert!(!permissions.write_xattr);
        assert!(!permissions.read_acl);
        assert!(!permissions.write_acl);
        assert!(!permissions.get_ownership);
    }

    #[test]
    fn parse_all_rights() {
        assert_eq!(PermissionSet::parse(ALL_RIGHTS).unwrap(), PermissionSet::all());
    }

    #[test]
    fn parse_distinguishes_letter_case() {
        let lower = PermissionSet::parse("----d--------").unwrap();
        assert!(lower.delete);
        assert!(!lower.delete_child);

        let upper = PermissionSet::parse("-----D-------").unwrap();
        assert!(!upper.delete);
        assert!(upper.delete_child);
    }

    #[test]
    fn parse_rejects_unknown_letter() {
        let err = PermissionSet::parse("rwz----------").unwrap_err();
        assert_eq!(err, AclError::UnexpectedPermissionLetter('z'));
    }

    #[test]
    fn parse_rejects_inheritance_letters() {
        assert!(PermissionSet::parse("f").is_err());
    }

    #[test]
    fn parse_accepts_short_token() {
        let permissions = PermissionSet::parse("rw").unwrap();
        assert_eq!(permissions.to_string(), "rw-----------");
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(PermissionSet::parse(ALL_RIGHTS).unwrap(), PermissionSet::all());
        assert_ne!(PermissionSet::default(), PermissionSet::all());
        assert_ne!(
            PermissionSet::parse(NO_RIGHTS).unwrap(),
            PermissionSet::parse(ALL_RIGHTS).unwrap()
        );
    }

    #[test]
    fn from_str_matches_parse() {
        let permissions: PermissionSet = RWX_RIGHTS.parse().unwrap();
        assert_eq!(permissions, PermissionSet::parse(RWX_RIGHTS).unwrap());
    }
}
