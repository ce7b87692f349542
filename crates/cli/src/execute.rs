//! crates/cli/src/execute.rs
//!
//! Runs a parsed [`Action`] against an [`AclTool`] and renders the result.

use std::io::Write;
use std::path::Path;

use acl::{AclEntry, AclSet, ArchiveFlags};
use synotool::{AclPlan, AclTool, adapt_to, delete_for_role, reset, set_archive_to};

use crate::args::Action;
use crate::entries::load_entries;
use crate::error::CliResult;

/// Executes `action`, writing its result to `out`.
pub(crate) fn execute<T, W>(tool: &T, action: Action, out: &mut W) -> CliResult<()>
where
    T: AclTool + ?Sized,
    W: Write + ?Sized,
{
    match action {
        Action::Get { path, all, json } => {
            let set = tool.get(&path)?;
            write_listing(out, &set, all, json)
        }
        Action::GetArchive { path, json } => {
            let flags = tool.get_archive(&path)?;
            write_archive(out, flags, json)
        }
        Action::Add { path, entry } => {
            let set = tool.add(&path, &entry)?;
            write_listing(out, &set, true, false)
        }
        Action::Replace { path, index, entry } => {
            let set = tool.replace(&path, index, &entry)?;
            write_listing(out, &set, true, false)
        }
        Action::Delete { path, index } => {
            let set = tool.delete_entry(&path, index)?;
            write_listing(out, &set, true, false)
        }
        Action::DeleteAll { path } => Ok(tool.delete_all(&path)?),
        Action::DeleteRole { path, role, name } => {
            let set = delete_for_role(tool, &path, &role, &name)?;
            write_listing(out, &set, true, false)
        }
        Action::Adapt {
            path,
            entries,
            file,
            dry_run,
        } => {
            let desired = desired_entries(entries, file.as_deref())?;
            if dry_run {
                let current = tool.get(&path)?;
                let plan = AclPlan::compute(current.direct(), &desired);
                write!(out, "{plan}")?;
                return Ok(());
            }
            let report = adapt_to(tool, &path, &desired)?;
            writeln!(out, "{report}")?;
            Ok(())
        }
        Action::Reset {
            path,
            entries,
            file,
        } => {
            let desired = desired_entries(entries, file.as_deref())?;
            let report = reset(tool, &path, &desired)?;
            writeln!(out, "{report}")?;
            Ok(())
        }
        Action::SetArchiveTo { path, flags } => {
            let plan = set_archive_to(tool, &path, flags)?;
            writeln!(out, "{plan}")?;
            Ok(())
        }
        Action::EnforceInherit { path } => Ok(tool.enforce_inherit(&path)?),
    }
}

fn desired_entries(mut inline: Vec<AclEntry>, file: Option<&Path>) -> CliResult<Vec<AclEntry>> {
    if let Some(file) = file {
        inline.extend(load_entries(file)?);
    }
    Ok(inline)
}

fn write_listing<W: Write + ?Sized>(out: &mut W, set: &AclSet, all: bool, json: bool) -> CliResult<()> {
    if json {
        return write_json_listing(out, set, all);
    }

    if all {
        write!(out, "{set}")?;
    } else {
        for (index, entry) in set.direct().enumerate() {
            writeln!(out, "[{index}] {entry}")?;
        }
    }
    Ok(())
}

fn write_archive<W: Write + ?Sized>(out: &mut W, flags: ArchiveFlags, json: bool) -> CliResult<()> {
    if json {
        return write_json(out, &flags);
    }
    writeln!(out, "{flags}")?;
    Ok(())
}

#[cfg(feature = "json")]
fn write_json_listing<W: Write + ?Sized>(out: &mut W, set: &AclSet, all: bool) -> CliResult<()> {
    if all {
        write_json(out, set)
    } else {
        write_json(out, &set.direct().collect::<Vec<_>>())
    }
}

#[cfg(not(feature = "json"))]
fn write_json_listing<W: Write + ?Sized>(out: &mut W, set: &AclSet, all: bool) -> CliResult<()> {
    write_listing(out, set, all, false)
}

#[cfg(feature = "json")]
fn write_json<W: Write + ?Sized, V: serde::Serialize + ?Sized>(out: &mut W, value: &V) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(not(feature = "json"))]
fn write_json<W: Write + ?Sized>(out: &mut W, flags: &ArchiveFlags) -> CliResult<()> {
    writeln!(out, "{flags}")?;
    Ok(())
}
