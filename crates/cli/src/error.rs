//! crates/cli/src/error.rs
//!
//! Failures reported by the command-line front-end.

use std::io;
use std::path::PathBuf;

use acl::AclError;
use synotool::ToolError;
use thiserror::Error;

/// Result type for command execution.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that end a command with exit code 1.
#[derive(Debug, Error)]
pub enum CliError {
    /// The ACL tool or reconciliation failed.
    #[error(transparent)]
    Tool(#[from] ToolError),
    /// An entry file could not be read.
    #[error("cannot read entry file '{}': {source}", path.display())]
    EntryFile {
        /// File that failed to open or read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A line of an entry file is not a valid ACL entry.
    #[error("{}:{line}: {source}", path.display())]
    EntryLine {
        /// File containing the line.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// Parse failure.
        #[source]
        source: AclError,
    },
    /// Writing the result failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    /// Serializing the result failed.
    #[cfg(feature = "json")]
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}
