//! crates/synotool/src/command.rs
//!
//! [`AclTool`] backed by the `synoacltool` executable.
//!
//! Every operation spawns the tool once, waits for it to exit and parses the
//! captured standard output. Mutations are followed by a fresh query so the
//! caller always sees the listing as renumbered by the tool.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Command;

use acl::{AclEntry, AclSet, ArchiveFlags};
use tracing::{debug, trace};

use crate::TOOL_TARGET;
use crate::error::{ToolError, ToolResult};
use crate::output::{parse_acl_listing, parse_archive_report};
use crate::tool::AclTool;

/// Marker printed by `synoacltool -get` for a path without a Synology ACL.
const LINUX_MODE_MARKER: &str = "It's Linux mode";

/// Subprocess-backed ACL tool.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SynoAclCommand {
    program: OsString,
}

/// Captured result of one tool run.
struct Invocation {
    operation: &'static str,
    success: bool,
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

impl Invocation {
    fn into_stdout(self) -> ToolResult<String> {
        if self.success {
            Ok(self.stdout)
        } else {
            Err(self.into_failure())
        }
    }

    fn into_failure(self) -> ToolError {
        ToolError::CommandFailed {
            operation: self.operation,
            code: self.code,
            stderr: self.stderr.trim_end().to_owned(),
        }
    }

    fn reports_linux_mode(&self) -> bool {
        self.stdout.contains(LINUX_MODE_MARKER) || self.stderr.contains(LINUX_MODE_MARKER)
    }
}

impl SynoAclCommand {
    /// Program used when no override is configured.
    pub const DEFAULT_PROGRAM: &'static str = "synoacltool";

    /// Environment variable naming the program to run.
    pub const PROGRAM_ENV: &'static str = "SYNOACL_TOOL";

    /// Uses `program` as the tool executable.
    pub fn new(program: impl Into<OsString>) -> ToolResult<Self> {
        let program = program.into();
        if program.is_empty() {
            return Err(ToolError::InvalidConfig(
                "the tool program must not be empty".to_owned(),
            ));
        }
        Ok(Self { program })
    }

    /// Reads the program from [`PROGRAM_ENV`](Self::PROGRAM_ENV), falling back
    /// to [`DEFAULT_PROGRAM`](Self::DEFAULT_PROGRAM) when unset.
    pub fn from_env() -> ToolResult<Self> {
        match env::var_os(Self::PROGRAM_ENV) {
            Some(program) if program.is_empty() => Err(ToolError::InvalidConfig(format!(
                "{} must not be empty",
                Self::PROGRAM_ENV
            ))),
            Some(program) => Ok(Self { program }),
            None => Ok(Self::default()),
        }
    }

    /// Uses `program` when given, otherwise the environment.
    pub fn resolve(program: Option<&OsStr>) -> ToolResult<Self> {
        match program {
            Some(program) => Self::new(program),
            None => Self::from_env(),
        }
    }

    /// The executable this instance runs.
    #[must_use]
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    fn run(&self, operation: &'static str, path: &Path, extra: &[OsString]) -> ToolResult<Invocation> {
        debug!(
            target: TOOL_TARGET,
            operation,
            path = %path.display(),
            "running {} {operation}",
            self.program.to_string_lossy()
        );

        let output = Command::new(&self.program)
            .arg(operation)
            .arg(path)
            .args(extra)
            .output()
            .map_err(|source| ToolError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout =
            String::from_utf8(output.stdout).map_err(|_| ToolError::NonUtf8Output { operation })?;
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        trace!(
            target: TOOL_TARGET,
            operation,
            code = ?output.status.code(),
            stdout = %stdout,
            stderr = %stderr,
            "synoacltool finished"
        );

        Ok(Invocation {
            operation,
            success: output.status.success(),
            code: output.status.code(),
            stdout,
            stderr,
        })
    }

    fn run_checked(
        &self,
        operation: &'static str,
        path: &Path,
        extra: &[OsString],
    ) -> ToolResult<String> {
        self.run(operation, path, extra)?.into_stdout()
    }
}

impl Default for SynoAclCommand {
    fn default() -> Self {
        Self {
            program: OsString::from(Self::DEFAULT_PROGRAM),
        }
    }
}

impl AclTool for SynoAclCommand {
    fn get(&self, path: &Path) -> ToolResult<AclSet> {
        let invocation = self.run("-get", path, &[])?;
        if invocation.success {
            return parse_acl_listing(&invocation.stdout);
        }

        if invocation.reports_linux_mode() {
            debug!(
                target: TOOL_TARGET,
                path = %path.display(),
                "path has no synology ACL"
            );
            return Ok(AclSet::default());
        }

        Err(invocation.into_failure())
    }

    fn add(&self, path: &Path, entry: &AclEntry) -> ToolResult<AclSet> {
        self.run_checked("-add", path, &[entry.to_string().into()])?;
        self.get(path)
    }

    fn delete_entry(&self, path: &Path, index: usize) -> ToolResult<AclSet> {
        self.run_checked("-del", path, &[index.to_string().into()])?;
        self.get(path)
    }

    fn replace(&self, path: &Path, index: usize, entry: &AclEntry) -> ToolResult<AclSet> {
        self.run_checked(
            "-replace",
            path,
            &[index.to_string().into(), entry.to_string().into()],
        )?;
        self.get(path)
    }

    fn delete_all(&self, path: &Path) -> ToolResult<()> {
        // The tool answers "Index out of range" when asked to clear an empty list.
        if self.get(path)?.is_empty() {
            debug!(
                target: TOOL_TARGET,
                path = %path.display(),
                "no ACL entries to delete"
            );
            return Ok(());
        }

        self.run_checked("-del", path, &[])?;
        Ok(())
    }

    fn get_archive(&self, path: &Path) -> ToolResult<ArchiveFlags> {
        let stdout = self.run_checked("-get-archive", path, &[])?;
        parse_archive_report(&stdout)
    }

    fn set_archive(&self, path: &Path, flags: ArchiveFlags) -> ToolResult<ArchiveFlags> {
        self.run_checked("-set-archive", path, &[flags.to_string().into()])?;
        self.get_archive(path)
    }

    fn del_archive(&self, path: &Path, flags: ArchiveFlags) -> ToolResult<ArchiveFlags> {
        self.run_checked("-del-archive", path, &[flags.to_string().into()])?;
        self.get_archive(path)
    }

    fn enforce_inherit(&self, path: &Path) -> ToolResult<()> {
        self.run_checked("-enforce-inherit", path, &[])?;
        Ok(())
    }
}
