#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` turns the command-line verbosity into a `tracing` subscriber.
//! Library crates only emit events; the binary decides where they go.
//!
//! # Design
//!
//! - [`Verbosity`] maps the number of `-v` flags to a level: none shows
//!   warnings, `-v` adds info, `-vv` debug and `-vvv` trace.
//! - [`init_tracing`] installs a registry with an `EnvFilter` and a compact
//!   `fmt` layer writing to stderr. Directives in [`LOG_ENV`] refine the
//!   filter per target, e.g. `SYNOACL_LOG=synoacl::tool=trace`.
//!
//! # Examples
//!
//! ```
//! use logging::{Verbosity, build_filter};
//!
//! let filter = build_filter(Verbosity::from_count(2), None);
//! assert_eq!(filter.to_string(), "debug");
//! ```

mod subscriber;
mod verbosity;

pub use crate::subscriber::{LOG_ENV, build_filter, init_tracing};
pub use crate::verbosity::Verbosity;
