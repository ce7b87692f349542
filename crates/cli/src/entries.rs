//! crates/cli/src/entries.rs
//!
//! Reads desired ACL entries from a text file.
//!
//! One entry per line in `role:name:type:permissions:inheritance` form. Blank
//! lines and lines starting with `#` are skipped; surrounding whitespace is
//! trimmed.

use std::fs;
use std::path::Path;

use acl::AclEntry;

use crate::error::{CliError, CliResult};

/// Parses entry file contents. `path` is only used for error messages.
pub(crate) fn parse_entries(path: &Path, text: &str) -> CliResult<Vec<AclEntry>> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, text)| {
            AclEntry::parse(text).map_err(|source| CliError::EntryLine {
                path: path.to_path_buf(),
                line,
                source,
            })
        })
        .collect()
}

/// Reads and parses the entry file at `path`.
pub(crate) fn load_entries(path: &Path) -> CliResult<Vec<AclEntry>> {
    let text = fs::read_to_string(path).map_err(|source| CliError::EntryFile {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse_entries(path, &text)?;
    tracing::debug!(
        path = %path.display(),
        count = entries.len(),
        "loaded ACL entries"
    );
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use acl::AclError;
    use std::io::Write;

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let text = "# share defaults\n\n  user:boss:allow:rwxpdDaARWcCo:fd--  \n\
                    group:staff:allow:r-x---a-R-c--:fd--\n";
        let entries = parse_entries(Path::new("acl.txt"), text).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "boss");
        assert_eq!(entries[1].role, "group");
    }

    #[test]
    fn bad_line_reports_its_number() {
        let text = "user:boss:allow:rwx----------:fd--\n\nuser:eve:allow:rwz----------:----\n";
        let err = parse_entries(Path::new("acl.txt"), text).unwrap_err();
        match err {
            CliError::EntryLine { line, source, .. } => {
                assert_eq!(line, 3);
                assert_eq!(source, AclError::UnexpectedPermissionLetter('z'));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "user:boss:allow:rwx----------:fd--").unwrap();
        let entries = load_entries(file.path()).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_entries(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, CliError::EntryFile { .. }));
    }
}
