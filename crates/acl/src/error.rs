//! crates/acl/src/error.rs
//!
//! Error types for the ACL codecs.

use thiserror::Error;

/// Result type for ACL parsing and construction.
pub type AclResult<T> = Result<T, AclError>;

/// Errors produced while parsing or building ACL values.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum AclError {
    /// A permission token contained a character outside `rwxpdDaARWcCo-`.
    #[error("unexpected permission letter '{0}'")]
    UnexpectedPermissionLetter(char),
    /// An inheritance token contained a character outside `fdin-`.
    #[error("unexpected inheritance letter '{0}'")]
    UnexpectedInheritanceLetter(char),
    /// A line did not have the `role:name:type:permissions:inheritance` shape.
    #[error("'{0}' does not match the role:name:type:permissions:inheritance format")]
    MalformedEntry(String),
    /// A user-supplied archive flag list named an unknown flag.
    #[error("unknown archive flag '{0}'")]
    UnknownArchiveFlag(String),
    /// An ACL set was built with a level list of the wrong length.
    #[error("number of ACL entries ({entries}) and number of levels ({levels}) don't match")]
    LevelCountMismatch {
        /// Number of entries supplied.
        entries: usize,
        /// Number of levels supplied.
        levels: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_letter_message_names_the_letter() {
        let err = AclError::UnexpectedPermissionLetter('z');
        assert_eq!(err.to_string(), "unexpected permission letter 'z'");
    }

    #[test]
    fn malformed_entry_message_quotes_input() {
        let err = AclError::MalformedEntry("user:boss".to_owned());
        assert!(err.to_string().contains("'user:boss'"));
    }

    #[test]
    fn level_mismatch_reports_both_counts() {
        let err = AclError::LevelCountMismatch {
            entries: 3,
            levels: 2,
        };
        let message = err.to_string();
        assert!(message.contains('3'));
        assert!(message.contains('2'));
    }
}
