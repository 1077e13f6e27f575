use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::{BranchHistory, UnreleasedCommit};

/// Subjects of every release-branch commit at or after `boundary`
pub fn released_subjects(release_history: &BranchHistory, boundary: usize) -> HashSet<&str> {
    release_history
        .released_from(boundary)
        .iter()
        .map(|record| record.subject.as_str())
        .collect()
}

/// Compute the mainline commits whose subject has not shipped.
///
/// Membership is decided by subject text, not hash: rebases, squashes and
/// cherry-picks rewrite hashes but keep the subject line. Two mainline commits
/// sharing a subject are therefore included or excluded together.
///
/// The result keeps mainline order (most recent first).
pub fn compute(
    release_history: &BranchHistory,
    boundary: usize,
    mainline_history: &BranchHistory,
) -> Vec<UnreleasedCommit> {
    let released = released_subjects(release_history, boundary);

    let unreleased: Vec<UnreleasedCommit> = mainline_history
        .iter()
        .filter(|record| !released.contains(record.subject.as_str()))
        .filter_map(|record| mainline_history.get(record.original_index))
        .map(|record| UnreleasedCommit {
            hash: record.hash.clone(),
            subject: record.subject.clone(),
        })
        .collect();

    debug!(
        released = released.len(),
        mainline = mainline_history.len(),
        unreleased = unreleased.len(),
        "computed unreleased change set"
    );

    unreleased
}

/// Mainline subjects that occur more than once, in order of first appearance
pub fn duplicate_subjects(mainline_history: &BranchHistory) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in mainline_history {
        *counts.entry(record.subject.as_str()).or_insert(0) += 1;
    }

    let mut seen = HashSet::new();
    mainline_history
        .iter()
        .map(|record| record.subject.as_str())
        .filter(|subject| counts[subject] > 1 && seen.insert(*subject))
        .map(|subject| (subject.to_string(), counts[subject]))
        .collect()
}
