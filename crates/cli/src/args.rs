//! crates/cli/src/args.rs
//!
//! Turns `clap` matches into a [`ParsedArgs`] value.

use std::ffi::OsString;
use std::path::PathBuf;

use acl::{AclEntry, ArchiveFlags};
use clap::ArgMatches;
use logging::Verbosity;

use crate::command::{PROGRAM_NAME, clap_command};

/// The operation requested on the command line.
///
/// **Warning**: exposed through `cli::test_utils` for integration tests only.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    /// `get PATH [--all] [--json]`
    Get {
        /// Queried path.
        path: PathBuf,
        /// Include inherited entries.
        all: bool,
        /// Emit JSON.
        json: bool,
    },
    /// `get-archive PATH [--json]`
    GetArchive {
        /// Queried path.
        path: PathBuf,
        /// Emit JSON.
        json: bool,
    },
    /// `add PATH ENTRY`
    Add {
        /// Target path.
        path: PathBuf,
        /// Appended entry.
        entry: AclEntry,
    },
    /// `replace PATH INDEX ENTRY`
    Replace {
        /// Target path.
        path: PathBuf,
        /// Direct index.
        index: usize,
        /// New entry.
        entry: AclEntry,
    },
    /// `delete PATH INDEX`
    Delete {
        /// Target path.
        path: PathBuf,
        /// Direct index.
        index: usize,
    },
    /// `delete-all PATH`
    DeleteAll {
        /// Target path.
        path: PathBuf,
    },
    /// `delete-role PATH ROLE NAME`
    DeleteRole {
        /// Target path.
        path: PathBuf,
        /// Principal kind.
        role: String,
        /// Principal name.
        name: String,
    },
    /// `adapt PATH [ENTRY...] [--file FILE] [--dry-run]`
    Adapt {
        /// Target path.
        path: PathBuf,
        /// Entries given inline.
        entries: Vec<AclEntry>,
        /// Entry file, read after the inline entries.
        file: Option<PathBuf>,
        /// Only print the plan.
        dry_run: bool,
    },
    /// `reset PATH [ENTRY...] [--file FILE]`
    Reset {
        /// Target path.
        path: PathBuf,
        /// Entries given inline.
        entries: Vec<AclEntry>,
        /// Entry file, read after the inline entries.
        file: Option<PathBuf>,
    },
    /// `set-archive-to PATH FLAGS`
    SetArchiveTo {
        /// Target path.
        path: PathBuf,
        /// Desired flags.
        flags: ArchiveFlags,
    },
    /// `enforce-inherit PATH`
    EnforceInherit {
        /// Target path.
        path: PathBuf,
    },
}

/// Parsed command line.
///
/// **Warning**: exposed through `cli::test_utils` for integration tests only.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedArgs {
    /// `--tool` override.
    pub tool: Option<OsString>,
    /// Verbosity from the `-v` count.
    pub verbosity: Verbosity,
    /// Requested operation.
    pub action: Action,
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
pub fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;
    let Some((name, mut sub)) = matches.remove_subcommand() else {
        return Err(clap_command().error(
            clap::error::ErrorKind::MissingSubcommand,
            "a command is required",
        ));
    };

    let tool = sub.remove_one::<OsString>("tool");
    let verbosity = Verbosity::from_count(sub.get_count("verbose"));
    let path = sub.remove_one::<PathBuf>("path").unwrap_or_default();

    let action = match name.as_str() {
        "get" => Action::Get {
            path,
            all: sub.get_flag("all"),
            json: json_flag(&sub),
        },
        "get-archive" => Action::GetArchive {
            path,
            json: json_flag(&sub),
        },
        "add" => Action::Add {
            path,
            entry: required_entry(&mut sub)?,
        },
        "replace" => Action::Replace {
            path,
            index: sub.remove_one::<usize>("index").unwrap_or_default(),
            entry: required_entry(&mut sub)?,
        },
        "delete" => Action::Delete {
            path,
            index: sub.remove_one::<usize>("index").unwrap_or_default(),
        },
        "delete-all" => Action::DeleteAll { path },
        "delete-role" => Action::DeleteRole {
            path,
            role: sub.remove_one::<String>("role").unwrap_or_default(),
            name: sub.remove_one::<String>("name").unwrap_or_default(),
        },
        "adapt" => Action::Adapt {
            path,
            entries: inline_entries(&mut sub),
            file: sub.remove_one::<PathBuf>("file"),
            dry_run: sub.get_flag("dry-run"),
        },
        "reset" => Action::Reset {
            path,
            entries: inline_entries(&mut sub),
            file: sub.remove_one::<PathBuf>("file"),
        },
        "set-archive-to" => Action::SetArchiveTo {
            path,
            flags: sub.remove_one::<ArchiveFlags>("flags").unwrap_or_default(),
        },
        "enforce-inherit" => Action::EnforceInherit { path },
        other => {
            return Err(clap_command().error(
                clap::error::ErrorKind::InvalidSubcommand,
                format!("unrecognized command '{other}'"),
            ));
        }
    };

    Ok(ParsedArgs {
        tool,
        verbosity,
        action,
    })
}

fn inline_entries(matches: &mut ArgMatches) -> Vec<AclEntry> {
    matches
        .remove_many::<AclEntry>("entry")
        .map(Iterator::collect)
        .unwrap_or_default()
}

fn required_entry(matches: &mut ArgMatches) -> Result<AclEntry, clap::Error> {
    matches.remove_one::<AclEntry>("entry").ok_or_else(|| {
        clap_command().error(
            clap::error::ErrorKind::MissingRequiredArgument,
            "an ENTRY argument is required",
        )
    })
}

#[cfg(feature = "json")]
fn json_flag(matches: &ArgMatches) -> bool {
    matches.get_flag("json")
}

#[cfg(not(feature = "json"))]
fn json_flag(_matches: &ArgMatches) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn get_defaults_to_direct_text_listing() {
        let parsed = parse_args(["synoacl", "get", "/volume1/share"]).unwrap();
        assert_eq!(parsed.tool, None);
        assert_eq!(parsed.verbosity, Verbosity::Quiet);
        assert_eq!(
            parsed.action,
            Action::Get {
                path: PathBuf::from("/volume1/share"),
                all: false,
                json: false
            }
        );
    }

    #[test]
    fn global_options_work_after_command() {
        let parsed = parse_args([
            "synoacl",
            "get-archive",
            "/volume1/share",
            "--tool",
            "/opt/fake",
            "-vv",
        ])
        .unwrap();
        assert_eq!(parsed.tool, Some(OsString::from("/opt/fake")));
        assert_eq!(parsed.verbosity, Verbosity::Debug);
    }

    #[test]
    fn global_options_work_before_command() {
        let parsed = parse_args(["synoacl", "-v", "--tool", "fake", "delete-all", "/p"]).unwrap();
        assert_eq!(parsed.tool, Some(OsString::from("fake")));
        assert_eq!(parsed.verbosity, Verbosity::Info);
        assert_eq!(
            parsed.action,
            Action::DeleteAll {
                path: PathBuf::from("/p")
            }
        );
    }

    #[test]
    fn replace_parses_index_and_entry() {
        let parsed = parse_args([
            "synoacl",
            "replace",
            "/p",
            "2",
            "user:boss:allow:rwx----------:fd--",
        ])
        .unwrap();
        let Action::Replace { index, entry, .. } = parsed.action else {
            panic!("unexpected action");
        };
        assert_eq!(index, 2);
        assert_eq!(entry.to_string(), "user:boss:allow:rwx----------:fd--");
    }

    #[test]
    fn adapt_collects_entries_and_options() {
        let parsed = parse_args([
            "synoacl",
            "adapt",
            "/p",
            "user:a:allow:r------------:----",
            "group:b:deny:-w-----------:----",
            "--file",
            "acl.txt",
            "--dry-run",
        ])
        .unwrap();
        let Action::Adapt {
            entries,
            file,
            dry_run,
            ..
        } = parsed.action
        else {
            panic!("unexpected action");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(file, Some(PathBuf::from("acl.txt")));
        assert!(dry_run);
    }

    #[test]
    fn adapt_without_entries_means_empty_list() {
        let parsed = parse_args(["synoacl", "adapt", "/p"]).unwrap();
        assert_eq!(
            parsed.action,
            Action::Adapt {
                path: PathBuf::from("/p"),
                entries: Vec::new(),
                file: None,
                dry_run: false
            }
        );
    }

    #[test]
    fn set_archive_to_parses_flags() {
        let parsed = parse_args(["synoacl", "set-archive-to", "/p", "is_inherit,is_support_ACL"])
            .unwrap();
        let Action::SetArchiveTo { flags, .. } = parsed.action else {
            panic!("unexpected action");
        };
        assert!(flags.is_inherit);
        assert!(flags.is_support_acl);
    }

    #[test]
    fn misspelled_archive_flag_is_a_usage_error() {
        let err = parse_args(["synoacl", "set-archive-to", "/p", "is_inherit,is_suport_ACL"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn invalid_entry_is_a_usage_error() {
        let err = parse_args(["synoacl", "add", "/p", "user:boss"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn invalid_index_is_a_usage_error() {
        let err = parse_args(["synoacl", "delete", "/p", "first"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn missing_command_shows_help() {
        let err = parse_args(["synoacl"]).unwrap_err();
        assert_eq!(
            err.kind(),
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
    }

    #[test]
    fn unknown_command_is_rejected() {
        let err = parse_args(["synoacl", "chmod", "/p"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_flag_is_recognised() {
        let parsed = parse_args(["synoacl", "get", "/p", "--all", "--json"]).unwrap();
        assert_eq!(
            parsed.action,
            Action::Get {
                path: PathBuf::from("/p"),
                all: true,
                json: true
            }
        );
    }
}
