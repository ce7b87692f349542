//! crates/logging/src/subscriber.rs
//! Installs the process-wide tracing subscriber.

use std::env;
use std::io;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::verbosity::Verbosity;

/// Environment variable holding filter directives that override `-v`.
pub const LOG_ENV: &str = "SYNOACL_LOG";

/// Builds the event filter for `verbosity`.
///
/// Non-empty `directives` (in `EnvFilter` syntax, e.g.
/// `synoacl::tool=trace`) are applied on top of the verbosity default.
/// Invalid directives are skipped.
#[must_use]
pub fn build_filter(verbosity: Verbosity, directives: Option<&str>) -> EnvFilter {
    let baseline = verbosity.level_filter();
    let builder = EnvFilter::builder().with_default_directive(baseline.into());

    match directives.map(str::trim).filter(|text| !text.is_empty()) {
        Some(text) => builder.parse_lossy(format!("{baseline},{text}")),
        None => builder.parse_lossy(""),
    }
}

/// Installs a compact stderr subscriber filtered by `verbosity` and
/// [`LOG_ENV`].
///
/// Fails when a global subscriber is already installed; callers that may
/// initialise twice can ignore the error.
pub fn init_tracing(verbosity: Verbosity) -> Result<(), TryInitError> {
    let directives = env::var(LOG_ENV).ok();
    let filter = build_filter(verbosity, directives.as_deref());

    let layer = tracing_subscriber::fmt::layer()
        .compact()
        .without_time()
        .with_target(true)
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
}
