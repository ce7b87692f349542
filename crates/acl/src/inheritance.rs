//! crates/acl/src/inheritance.rs
//!
//! Inheritance flags of a Synology ACL entry, rendered as a 4 character
//! token in the order `f d i n`.

use std::fmt;
use std::str::FromStr;

use crate::error::{AclError, AclResult};
use crate::letters::{parse_token, write_token};

const LETTERS: [char; 4] = ['f', 'd', 'i', 'n'];

/// Controls how an ACL entry propagates to the children of a directory.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct InheritanceMode {
    /// Files created in the directory inherit the entry (`f`).
    pub file_inherited: bool,
    /// Subdirectories inherit the entry (`d`).
    pub directory_inherited: bool,
    /// The entry only propagates and does not apply to the directory (`i`).
    pub inherit_only: bool,
    /// Inheritance stops after one level (`n`).
    pub no_propagate: bool,
}

impl InheritanceMode {
    /// Width of the textual token.
    pub const WIDTH: usize = LETTERS.len();

    /// Parses an inheritance token such as `fd--`.
    pub fn parse(token: &str) -> AclResult<Self> {
        let [file_inherited, directory_inherited, inherit_only, no_propagate] =
            parse_token(token, &LETTERS, AclError::UnexpectedInheritanceLetter)?;

        Ok(Self {
            file_inherited,
            directory_inherited,
            inherit_only,
            no_propagate,
        })
    }

    /// Returns `true` when no flag is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.file_inherited || self.directory_inherited || self.inherit_only || self.no_propagate)
    }
}

impl fmt::Display for InheritanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = [
            self.file_inherited,
            self.directory_inherited,
            self.inherit_only,
            self.no_propagate,
        ];
        write_token(f, &LETTERS, &flags)
    }
}

impl FromStr for InheritanceMode {
    type Err = AclError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl From<InheritanceMode> for String {
    fn from(mode: InheritanceMode) -> Self {
        mode.to_string()
    }
}

impl TryFrom<String> for InheritanceMode {
    type Error = AclError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::parse(&text)
    }
}
