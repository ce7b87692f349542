#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `acl` models the textual ACL grammar spoken by Synology's `synoacltool`.
//! Every type in this crate is a plain value with a bidirectional codec:
//! [`FromStr`](std::str::FromStr) parses the tool's text and
//! [`Display`](std::fmt::Display) renders it back byte-for-byte.
//!
//! # Design
//!
//! - [`PermissionSet`] holds the 13 access rights and maps to a fixed-width
//!   13 character token such as `rwxpdDaARWcCo`.
//! - [`InheritanceMode`] holds the 4 inheritance flags and maps to a 4
//!   character token such as `fdi-`.
//! - [`AclEntry`] joins a role, principal name, ACL type, permissions and
//!   inheritance into `role:name:type:permissions:inheritance`. Its
//!   [`AclKey`] (role, name, type) identifies the entry during reconciliation.
//! - [`AclSet`] is the ordered listing of a path, where each entry carries an
//!   inheritance level. Level `0` entries are attached to the path itself.
//! - [`ArchiveFlags`] holds the per-path archive bits rendered as a
//!   comma-joined list or the `None` sentinel.
//!
//! # Invariants
//!
//! - Formatting always emits the fixed canonical order and width.
//! - Parsing never yields a partially filled value: any unexpected letter or
//!   malformed line is reported as an [`AclError`].
//! - Equality is structural and never goes through the textual form.
//!
//! # Examples
//!
//! ```
//! use acl::AclEntry;
//!
//! let entry: AclEntry = "user:boss:allow:rwxpdDaARWcCo:fdi-".parse().unwrap();
//! assert_eq!(entry.role, "user");
//! assert!(entry.permissions.get_ownership);
//! assert!(entry.inherit_mode.inherit_only);
//! assert_eq!(entry.to_string(), "user:boss:allow:rwxpdDaARWcCo:fdi-");
//! ```

mod archive;
mod entry;
mod error;
mod inheritance;
mod letters;
mod permissions;
mod set;

pub use crate::archive::ArchiveFlags;
pub use crate::entry::{AclEntry, AclKey};
pub use crate::error::{AclError, AclResult};
pub use crate::inheritance::InheritanceMode;
pub use crate::permissions::PermissionSet;
pub use crate::set::{AclSet, LeveledEntry};
