#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the `synoacl` command-line front-end. It parses the
//! command line with [`clap`](https://docs.rs/clap/), installs logging, and
//! forwards each command to the [`synotool`] crate.
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with handles for
//! standard output and error and returns the process exit code. The binary
//! wires it into `main`; tests call it with in-memory buffers. [`run_with_tool`]
//! performs the same parse and dispatch against a caller-supplied
//! [`AclTool`], which lets the whole front-end run against
//! an in-memory tool.
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as exit codes.
//! - Exit code `0` means success, `1` a failed operation (message on
//!   stderr), `2` a usage error.
//! - `--tool` takes precedence over `SYNOACL_TOOL`, which takes precedence
//!   over the default `synoacltool`.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = cli::run(["synoacl", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(String::from_utf8(stdout).unwrap().starts_with("synoacl "));
//! assert!(stderr.is_empty());
//! ```

use std::ffi::OsString;
use std::io::Write;

use clap::error::ErrorKind;
use synotool::{AclTool, SynoAclCommand};

mod args;
mod command;
mod entries;
mod error;
mod execute;

pub use crate::error::{CliError, CliResult};

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for a failed operation.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for invalid command-line usage.
pub const EXIT_USAGE: i32 = 2;

/// Parser internals exposed for integration tests.
#[doc(hidden)]
pub mod test_utils {
    pub use crate::args::{Action, ParsedArgs, parse_args};
}

/// Runs the CLI using the provided argument iterator and output handles.
///
/// Returns the process exit code.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let parsed = match args::parse_args(arguments) {
        Ok(parsed) => parsed,
        Err(error) => return report_usage(&error, stdout, stderr),
    };

    // A subscriber installed earlier in the process stays in charge.
    let _ = logging::init_tracing(parsed.verbosity);

    let tool = match SynoAclCommand::resolve(parsed.tool.as_deref()) {
        Ok(tool) => tool,
        Err(error) => return report_failure(&CliError::from(error), stderr),
    };

    dispatch(&tool, parsed.action, stdout, stderr)
}

/// Parses `arguments` and executes the command against `tool`.
///
/// `--tool` and `-v` are accepted but ignored.
pub fn run_with_tool<T, I, S, Out, Err>(
    tool: &T,
    arguments: I,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    T: AclTool + ?Sized,
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match args::parse_args(arguments) {
        Ok(parsed) => dispatch(tool, parsed.action, stdout, stderr),
        Err(error) => report_usage(&error, stdout, stderr),
    }
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, i32::from(u8::MAX));
    std::process::ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}

fn dispatch<T, Out, Err>(tool: &T, action: args::Action, stdout: &mut Out, stderr: &mut Err) -> i32
where
    T: AclTool + ?Sized,
    Out: Write,
    Err: Write,
{
    match execute::execute(tool, action, stdout) {
        Ok(()) => EXIT_SUCCESS,
        Err(error) => report_failure(&error, stderr),
    }
}

fn report_failure<Err: Write>(error: &CliError, stderr: &mut Err) -> i32 {
    tracing::debug!(?error, "command failed");
    let _ = writeln!(stderr, "{}: {error}", command::PROGRAM_NAME);
    EXIT_FAILURE
}

fn report_usage<Out, Err>(error: &clap::Error, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    let rendered = error.render();
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if write!(stdout, "{rendered}").is_err() {
                return EXIT_FAILURE;
            }
            EXIT_SUCCESS
        }
        _ => {
            let _ = write!(stderr, "{rendered}");
            EXIT_USAGE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_captured(args: &[&str]) -> (i32, String, String) {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let code = run(args.iter().copied(), &mut stdout, &mut stderr);
        (
            code,
            String::from_utf8(stdout).unwrap(),
            String::from_utf8(stderr).unwrap(),
        )
    }

    #[test]
    fn help_goes_to_stdout() {
        let (code, stdout, stderr) = run_captured(&["synoacl", "--help"]);
        assert_eq!(code, EXIT_SUCCESS);
        assert!(stdout.contains("adapt"));
        assert!(stdout.contains("set-archive-to"));
        assert!(stderr.is_empty());
    }

    #[test]
    fn usage_errors_exit_with_two() {
        let (code, stdout, stderr) = run_captured(&["synoacl", "delete", "/p"]);
        assert_eq!(code, EXIT_USAGE);
        assert!(stdout.is_empty());
        assert!(stderr.contains("INDEX"));
    }

    #[test]
    fn empty_tool_override_fails() {
        let (code, _, stderr) = run_captured(&["synoacl", "--tool", "", "get", "/p"]);
        assert_eq!(code, EXIT_FAILURE);
        assert!(stderr.starts_with("synoacl: invalid configuration"));
    }

    #[test]
    fn missing_tool_program_fails() {
        let (code, _, stderr) = run_captured(&[
            "synoacl",
            "--tool",
            "/nonexistent/synoacltool",
            "get",
            "/p",
        ]);
        assert_eq!(code, EXIT_FAILURE);
        assert!(stderr.contains("failed to run '/nonexistent/synoacltool'"));
    }
}
