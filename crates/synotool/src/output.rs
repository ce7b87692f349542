//! crates/synotool/src/output.rs
//!
//! Parsers for the text printed by `synoacltool`.
//!
//! `-get` prints a few header lines followed by one line per entry:
//!
//! ```text
//! ACL version: 1
//! Archive: is_inherit,is_support_ACL
//! Owner: [admin(user)]
//! ---------------------
//! 	 [0] user:admin:allow:rwxpdDaARWc--:fd-- (level:0)
//! 	 [1] group:users:allow:r-x---a-R-c--:fd-- (level:1)
//! ```
//!
//! `-get-archive` prints a single `Archive: <flags>` line.

use acl::{AclEntry, AclSet, ArchiveFlags};

use crate::error::{ToolError, ToolResult};

const LEVEL_OPEN: &str = "(level:";
const ARCHIVE_PREFIX: &str = "Archive: ";

/// Parses the output of `synoacltool -get` into an [`AclSet`].
///
/// Lines that do not start with a tab followed by a bracketed index are
/// headers and are skipped. Entry indices must count up from zero.
pub fn parse_acl_listing(output: &str) -> ToolResult<AclSet> {
    let mut entries = Vec::new();
    let mut levels = Vec::new();

    for line in output.lines() {
        let Some((index, entry, level)) = split_entry_line(line)? else {
            continue;
        };

        if index != entries.len() {
            return Err(ToolError::UnexpectedEntryIndex {
                expected: entries.len(),
                found: index,
            });
        }

        entries.push(AclEntry::parse(entry)?);
        levels.push(level);
    }

    Ok(AclSet::with_levels(entries, levels)?)
}

/// Splits `\t *[N] +ENTRY +(level:L)` into its parts.
///
/// Returns `Ok(None)` for lines that are not entry lines at all.
fn split_entry_line(line: &str) -> ToolResult<Option<(usize, &str, u32)>> {
    let Some(rest) = line
        .strip_prefix('\t')
        .map(|rest| rest.trim_start_matches(' '))
        .and_then(|rest| rest.strip_prefix('['))
    else {
        return Ok(None);
    };

    let malformed = || ToolError::MalformedListingLine(line.to_owned());

    let (index, rest) = rest.split_once(']').ok_or_else(malformed)?;
    let index = parse_number::<usize>(index).ok_or_else(malformed)?;

    let body = rest.strip_prefix(' ').ok_or_else(malformed)?;
    let (entry, level) = body.rsplit_once(LEVEL_OPEN).ok_or_else(malformed)?;
    let level = level
        .strip_suffix(')')
        .and_then(parse_number::<u32>)
        .ok_or_else(malformed)?;

    let entry = entry.strip_suffix(' ').ok_or_else(malformed)?;
    let entry = entry.trim_matches(' ');
    if entry.is_empty() {
        return Err(malformed());
    }

    Ok(Some((index, entry, level)))
}

fn parse_number<T: std::str::FromStr>(digits: &str) -> Option<T> {
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Parses the output of `synoacltool -get-archive`.
///
/// The output must be exactly one `Archive: <flags>` line terminated by a
/// newline, with a non-empty flag list.
pub fn parse_archive_report(output: &str) -> ToolResult<ArchiveFlags> {
    let malformed = || ToolError::MalformedArchiveReport(output.to_owned());

    let mut segments = output.split('\n');
    let (Some(line), Some(""), None) = (segments.next(), segments.next(), segments.next()) else {
        return Err(malformed());
    };

    let flags = line
        .strip_prefix(ARCHIVE_PREFIX)
        .filter(|flags| !flags.is_empty())
        .ok_or_else(malformed)?;
    Ok(ArchiveFlags::parse(flags))
}

#[cfg(test)]
mod tests {
    use super::*;
    use acl::AclError;

    const LISTING: &str = "ACL version: 1\n\
        Archive: is_inherit,is_support_ACL\n\
        Owner: [admin(user)]\n\
        ---------------------\n\
        \t [0] user:admin:allow:rwxpdDaARWc--:fd-- (level:0)\n\
        \t [1] group:domain users:deny:r------------:---- (level:0)\n\
        \t [2] group:administrators:allow:rwxpdDaARWc--:fd-- (level:1)\n\n";

    #[test]
    fn listing_yields_entries_and_levels() {
        let set = parse_acl_listing(LISTING).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.direct_len(), 2);

        let levels: Vec<u32> = set.all().iter().map(|leveled| leveled.level).collect();
        assert_eq!(levels, vec![0, 0, 1]);

        let names: Vec<&str> = set.all().iter().map(|leveled| leveled.entry.name.as_str()).collect();
        assert_eq!(names, vec!["admin", "domain users", "administrators"]);
    }

    #[test]
    fn empty_listing_has_no_entries() {
        let set = parse_acl_listing("ACL version: 1\nArchive: None\n").unwrap();
        assert!(set.is_empty());
        assert!(parse_acl_listing("").unwrap().is_empty());
    }

    #[test]
    fn listing_accepts_wide_padding() {
        let set = parse_acl_listing("\t   [0]   user:boss:allow:rwx----------:fd--   (level:0)\n")
            .unwrap();
        assert_eq!(set.direct_len(), 1);
        assert_eq!(set.all()[0].entry.to_string(), "user:boss:allow:rwx----------:fd--");
    }

    #[test]
    fn listing_index_must_count_entries() {
        let output = "\t [0] user:a:allow:r------------:---- (level:0)\n\
                      \t [2] user:b:allow:r------------:---- (level:0)\n";
        let err = parse_acl_listing(output).unwrap_err();
        assert!(matches!(
            err,
            ToolError::UnexpectedEntryIndex {
                expected: 1,
                found: 2
            }
        ));
    }

    #[test]
    fn listing_rejects_bad_entry() {
        let err = parse_acl_listing("\t [0] user:a:allow:rwq----------:---- (level:0)\n")
            .unwrap_err();
        assert!(matches!(
            err,
            ToolError::Acl(AclError::UnexpectedPermissionLetter('q'))
        ));
    }

    #[test]
    fn listing_rejects_truncated_line() {
        for line in [
            "\t [0] user:a:allow:r------------:----",
            "\t [0]user:a:allow:r------------:---- (level:0)",
            "\t [x] user:a:allow:r------------:---- (level:0)",
            "\t [0] user:a:allow:r------------:---- (level:-1)",
            "\t [0] (level:0)",
            "\t [99999999999999999999999] user:a:allow:r------------:---- (level:0)",
        ] {
            let err = parse_acl_listing(line).unwrap_err();
            assert!(
                matches!(err, ToolError::MalformedListingLine(_)),
                "input: {line:?}"
            );
        }
    }

    #[test]
    fn archive_report_parses_flags() {
        let flags = parse_archive_report("Archive: is_inherit,has_ACL,is_support_ACL\n").unwrap();
        assert!(flags.is_inherit);
        assert!(flags.has_acl);
        assert!(flags.is_support_acl);
        assert!(!flags.is_read_only);
    }

    #[test]
    fn archive_report_accepts_none() {
        assert!(parse_archive_report("Archive: None\n").unwrap().is_none());
    }

    #[test]
    fn archive_report_requires_single_terminated_line() {
        for output in [
            "",
            "Archive: None",
            "Archive: None\n\n",
            "Archive: None\nExtra\n",
            "Archive: \n",
            "Flags: None\n",
        ] {
            assert!(
                matches!(
                    parse_archive_report(output),
                    Err(ToolError::MalformedArchiveReport(_))
                ),
                "input: {output:?}"
            );
        }
    }
}
