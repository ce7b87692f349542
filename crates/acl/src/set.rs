//! crates/acl/src/set.rs
//!
//! The ordered ACL listing of a path.

use std::fmt;

use crate::entry::AclEntry;
use crate::error::{AclError, AclResult};

/// An entry together with its inheritance level.
///
/// Level `0` marks an entry attached to the path itself. Higher levels count
/// the ancestor directories the entry was inherited through.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeveledEntry {
    /// The ACL entry.
    pub entry: AclEntry,
    /// Inheritance level of the entry.
    pub level: u32,
}

impl LeveledEntry {
    /// Returns `true` for entries attached directly to the path.
    #[must_use]
    pub const fn is_direct(&self) -> bool {
        self.level == 0
    }
}

/// The ACL entries reported for a path, in listing order.
///
/// Duplicate entries are kept as reported. Inherited entries (level > 0) are
/// read-only context and are skipped by [`direct`](Self::direct).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct AclSet {
    entries: Vec<LeveledEntry>,
}

impl AclSet {
    /// Builds a set where every entry is direct.
    #[must_use]
    pub fn new(entries: Vec<AclEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| LeveledEntry { entry, level: 0 })
            .collect();
        Self { entries }
    }

    /// Builds a set from entries and a parallel list of levels.
    ///
    /// Both lists must have the same length.
    pub fn with_levels(entries: Vec<AclEntry>, levels: Vec<u32>) -> AclResult<Self> {
        if entries.len() != levels.len() {
            return Err(AclError::LevelCountMismatch {
                entries: entries.len(),
                levels: levels.len(),
            });
        }

        let entries = entries
            .into_iter()
            .zip(levels)
            .map(|(entry, level)| LeveledEntry { entry, level })
            .collect();
        Ok(Self { entries })
    }

    /// Returns the direct (level `0`) entries in listing order.
    pub fn direct(&self) -> impl Iterator<Item = &AclEntry> + '_ {
        self.entries
            .iter()
            .filter(|leveled| leveled.is_direct())
            .map(|leveled| &leveled.entry)
    }

    /// Returns every entry with its level in listing order.
    #[must_use]
    pub fn all(&self) -> &[LeveledEntry] {
        &self.entries
    }

    /// Consumes the set and returns the direct entries.
    #[must_use]
    pub fn into_direct(self) -> Vec<AclEntry> {
        self.entries
            .into_iter()
            .filter(LeveledEntry::is_direct)
            .map(|leveled| leveled.entry)
            .collect()
    }

    /// Returns the index of `entry` among the direct entries.
    ///
    /// The comparison covers every field, not only the identity key. The
    /// first match wins when the listing holds duplicates.
    #[must_use]
    pub fn position_of_direct(&self, entry: &AclEntry) -> Option<usize> {
        self.direct().position(|candidate| candidate == entry)
    }

    /// Number of direct entries.
    #[must_use]
    pub fn direct_len(&self) -> usize {
        self.direct().count()
    }

    /// Number of entries, inherited ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the listing holds no entry at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for AclSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, leveled) in self.entries.iter().enumerate() {
            writeln!(f, "[{index}] {} (level: {})", leveled.entry, leveled.level)?;
        }
        Ok(())
    }
}

impl FromIterator<AclEntry> for AclSet {
    fn from_iter<I: IntoIterator<Item = AclEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
