//! crates/cli/src/command.rs
//!
//! The `clap` command definition.

use std::path::PathBuf;

use acl::{AclEntry, ArchiveFlags};
use clap::{Arg, ArgAction, Command, builder::OsStringValueParser, value_parser};

/// Name used in usage and diagnostics.
pub(crate) const PROGRAM_NAME: &str = "synoacl";

/// Builds the `clap` command used for parsing.
pub(crate) fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect and reconcile Synology ACLs through synoacltool")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("tool")
                .long("tool")
                .value_name("PROGRAM")
                .help("synoacltool executable (default: $SYNOACL_TOOL or synoacltool).")
                .global(true)
                .action(ArgAction::Set)
                .value_parser(OsStringValueParser::new()),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase diagnostic output; repeat for more.")
                .global(true)
                .action(ArgAction::Count),
        )
        .subcommand(with_json_flag(
            Command::new("get")
                .about("Print the ACL entries of PATH.")
                .arg(path_arg())
                .arg(
                    Arg::new("all")
                        .long("all")
                        .help("Include inherited entries with their level.")
                        .action(ArgAction::SetTrue),
                ),
        ))
        .subcommand(with_json_flag(
            Command::new("get-archive")
                .about("Print the archive flags of PATH.")
                .arg(path_arg()),
        ))
        .subcommand(
            Command::new("add")
                .about("Append ENTRY to PATH.")
                .arg(path_arg())
                .arg(entry_arg().required(true)),
        )
        .subcommand(
            Command::new("replace")
                .about("Overwrite the direct entry at INDEX.")
                .arg(path_arg())
                .arg(index_arg())
                .arg(entry_arg().required(true)),
        )
        .subcommand(
            Command::new("delete")
                .about("Remove the direct entry at INDEX.")
                .arg(path_arg())
                .arg(index_arg()),
        )
        .subcommand(
            Command::new("delete-all")
                .about("Remove every direct entry of PATH.")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("delete-role")
                .about("Remove the first direct entry for ROLE and NAME.")
                .arg(path_arg())
                .arg(Arg::new("role").value_name("ROLE").required(true))
                .arg(Arg::new("name").value_name("NAME").required(true)),
        )
        .subcommand(
            Command::new("adapt")
                .about("Converge PATH to the given entries with minimal changes.")
                .arg(path_arg())
                .arg(entry_arg().action(ArgAction::Append).num_args(0..))
                .arg(file_arg())
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .short('n')
                        .help("Print the planned operations without applying them.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("reset")
                .about("Remove every direct entry, then add the given entries.")
                .arg(path_arg())
                .arg(entry_arg().action(ArgAction::Append).num_args(0..))
                .arg(file_arg()),
        )
        .subcommand(
            Command::new("set-archive-to")
                .about("Converge the archive flags of PATH to FLAGS.")
                .arg(path_arg())
                .arg(
                    Arg::new("flags")
                        .value_name("FLAGS")
                        .help("Comma separated flag names, or None.")
                        .required(true)
                        .value_parser(ArchiveFlags::parse_strict),
                ),
        )
        .subcommand(
            Command::new("enforce-inherit")
                .about("Make the children of PATH inherit its entries.")
                .arg(path_arg()),
        )
}

fn path_arg() -> Arg {
    Arg::new("path")
        .value_name("PATH")
        .required(true)
        .value_parser(value_parser!(PathBuf))
}

fn index_arg() -> Arg {
    Arg::new("index")
        .value_name("INDEX")
        .help("Position among the direct entries, starting at 0.")
        .required(true)
        .value_parser(value_parser!(usize))
}

fn entry_arg() -> Arg {
    Arg::new("entry")
        .value_name("ENTRY")
        .help("ACL entry as role:name:type:permissions:inheritance.")
        .value_parser(AclEntry::parse)
}

fn file_arg() -> Arg {
    Arg::new("file")
        .long("file")
        .short('f')
        .value_name("FILE")
        .help("Read entries from FILE, one per line.")
        .action(ArgAction::Set)
        .value_parser(value_parser!(PathBuf))
}

#[cfg(feature = "json")]
fn with_json_flag(command: Command) -> Command {
    command.arg(
        Arg::new("json")
            .long("json")
            .help("Print JSON instead of text.")
            .action(ArgAction::SetTrue),
    )
}

#[cfg(not(feature = "json"))]
fn with_json_flag(command: Command) -> Command {
    command
}
