//! crates/logging/src/verbosity.rs
//! Maps repeated `-v` flags to a tracing level.

use std::fmt;

use tracing::level_filters::LevelFilter;

/// How much diagnostic output the user asked for.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Verbosity {
    /// Warnings and errors only.
    #[default]
    Quiet,
    /// Reconciliation summaries.
    Info,
    /// Every tool invocation and planned operation.
    Debug,
    /// Raw tool output as well.
    Trace,
}

impl Verbosity {
    /// Converts the number of `-v` flags into a verbosity.
    #[must_use]
    pub const fn from_count(count: u8) -> Self {
        match count {
            0 => Self::Quiet,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// The most verbose level emitted at this verbosity.
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.level_filter(), f)
    }
}
