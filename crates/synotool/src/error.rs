//! crates/synotool/src/error.rs
//!
//! Error types for tool invocation and reconciliation.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use acl::{AclEntry, AclError};
use thiserror::Error;

/// Result type for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors raised while talking to `synoacltool` or reconciling a path.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool output contained an invalid ACL value.
    #[error(transparent)]
    Acl(#[from] AclError),
    /// The tool process could not be started.
    #[error("failed to run '{}': {source}", program.to_string_lossy())]
    Spawn {
        /// Program that failed to start.
        program: OsString,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The tool exited unsuccessfully.
    #[error("synoacltool {operation} failed ({}): {stderr}", exit_label(*code))]
    CommandFailed {
        /// Tool switch that failed, e.g. `-get`.
        operation: &'static str,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },
    /// The tool printed output that is not valid UTF-8.
    #[error("synoacltool {operation} produced non UTF-8 output")]
    NonUtf8Output {
        /// Tool switch whose output was rejected.
        operation: &'static str,
    },
    /// A listing line carried an index other than the running entry count.
    #[error("unexpected ACL index {found}, expected {expected}")]
    UnexpectedEntryIndex {
        /// Index the parser expected next.
        expected: usize,
        /// Index found in the listing.
        found: usize,
    },
    /// A listing line looked like an entry but could not be decoded.
    #[error("malformed ACL listing line '{0}'")]
    MalformedListingLine(String),
    /// The archive report did not consist of a single `Archive:` line.
    #[error("malformed archive report '{0}'")]
    MalformedArchiveReport(String),
    /// An entry seen earlier in the reconciliation is no longer present.
    #[error("ACL entry '{entry}' disappeared from '{}' during reconciliation", path.display())]
    EntryNotFound {
        /// Path being reconciled.
        path: PathBuf,
        /// Entry that could not be located.
        entry: AclEntry,
    },
    /// No direct entry targets the requested principal.
    #[error("no ACL entry for {role} '{name}' on '{}'", path.display())]
    RoleNotFound {
        /// Path that was searched.
        path: PathBuf,
        /// Requested role.
        role: String,
        /// Requested principal name.
        name: String,
    },
    /// Tool configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

fn exit_label(code: Option<i32>) -> String {
    code.map_or_else(|| "terminated by signal".to_owned(), |code| format!("exit code {code}"))
}
