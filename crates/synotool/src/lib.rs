#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `synotool` drives Synology's `synoacltool` to inspect and converge the ACL
//! of a path. It owns the boundary to the external tool and the
//! reconciliation logic built on top of it.
//!
//! # Design
//!
//! - [`AclTool`] is the query and mutation surface of the tool. Reconciliation
//!   is written against the trait, so it runs unchanged against the real
//!   executable ([`SynoAclCommand`]) or an in-memory double.
//! - [`parse_acl_listing`] and [`parse_archive_report`] decode the text the
//!   tool prints.
//! - [`adapt_to`] issues the smallest set of deletes, replacements and adds
//!   that turns the direct entries of a path into a desired list. [`reset`]
//!   is the blunt alternative that clears the list and re-adds everything.
//! - [`set_archive_to`] converges archive flags with at most one clear call
//!   and one set call.
//!
//! # Invariants
//!
//! - Before every indexed delete or replace the listing is queried again and
//!   the entry is located by full equality. A missing entry aborts with
//!   [`ToolError::EntryNotFound`].
//! - Operations run strictly in sequence: deletes, replacements, adds.
//! - Inherited entries (level > 0) are never mutated.
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//!
//! use acl::AclEntry;
//! use synotool::{SynoAclCommand, adapt_to};
//!
//! let tool = SynoAclCommand::from_env()?;
//! let desired: Vec<AclEntry> = vec!["user:boss:allow:rwxpdDaARWcCo:fd--".parse()?];
//! let report = adapt_to(&tool, Path::new("/volume1/share"), &desired)?;
//! println!("{report}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod command;
mod error;
#[cfg(any(test, feature = "test-support"))]
mod memory;
mod output;
mod reconcile;
mod tool;

pub use crate::command::SynoAclCommand;
pub use crate::error::{ToolError, ToolResult};
#[cfg(any(test, feature = "test-support"))]
pub use crate::memory::{MemoryTool, ToolCall};
pub use crate::output::{parse_acl_listing, parse_archive_report};
pub use crate::reconcile::{
    AclPlan, AdaptReport, ArchivePlan, adapt_to, delete_for_role, reset, set_archive_to,
};
pub use crate::tool::AclTool;

/// Tracing target for external tool invocations.
pub(crate) const TOOL_TARGET: &str = "synoacl::tool";

/// Tracing target for reconciliation decisions.
pub(crate) const RECONCILE_TARGET: &str = "synoacl::reconcile";
