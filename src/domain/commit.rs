use std::fmt;

use serde::Serialize;

/// Number of leading hex characters every hash is truncated to before comparison.
///
/// Histories and the release marker must share this length, otherwise equality
/// between them is meaningless.
pub const SHORT_HASH_LEN: usize = 9;

/// A commit hash truncated to [`SHORT_HASH_LEN`] characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ShortHash(String);

impl ShortHash {
    /// Truncate a full (or already short) hash to the shared prefix length
    pub fn new(hash: impl AsRef<str>) -> Self {
        let hash = hash.as_ref().trim();
        let short: String = hash.chars().take(SHORT_HASH_LEN).collect();
        ShortHash(short)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ShortHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of a branch history as it was retrieved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    pub hash: ShortHash,
    pub subject: String,
    /// Zero-based position in the history as originally retrieved (most recent first)
    pub original_index: usize,
}

/// Linear commit history of one branch, most recent first.
///
/// Indices are assigned once by [`BranchHistory::from_entries`] and stay dense
/// and unique for the lifetime of the value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BranchHistory {
    records: Vec<CommitRecord>,
}

impl BranchHistory {
    /// Build a history from `(hash, subject)` pairs ordered most recent first
    pub fn from_entries<I, H, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (H, S)>,
        H: AsRef<str>,
        S: Into<String>,
    {
        let records = entries
            .into_iter()
            .enumerate()
            .map(|(original_index, (hash, subject))| CommitRecord {
                hash: ShortHash::new(hash),
                subject: subject.into(),
                original_index,
            })
            .collect();

        BranchHistory { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CommitRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CommitRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[CommitRecord] {
        &self.records
    }

    /// At most the `n` most recent records
    pub fn head(&self, n: usize) -> &[CommitRecord] {
        &self.records[..n.min(self.records.len())]
    }

    /// Records from `boundary` to the oldest entry (the released part)
    pub fn released_from(&self, boundary: usize) -> &[CommitRecord] {
        &self.records[boundary.min(self.records.len())..]
    }

    /// Records strictly newer than `boundary` (waiting for the next deploy)
    pub fn pending_before(&self, boundary: usize) -> &[CommitRecord] {
        self.head(boundary)
    }
}

impl<'a> IntoIterator for &'a BranchHistory {
    type Item = &'a CommitRecord;
    type IntoIter = std::slice::Iter<'a, CommitRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// A mainline commit whose subject has not shipped yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnreleasedCommit {
    pub hash: ShortHash,
    pub subject: String,
}
