use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::UnreleasedCommit;

/// Issue-tracker key taken from the leading colon-delimited token of a subject
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    /// Parse the ticket id out of a commit subject.
    ///
    /// Returns the text before the first `:`, or `None` when the subject has no colon.
    pub fn from_subject(subject: &str) -> Option<Self> {
        subject
            .split_once(':')
            .map(|(ticket, _)| TicketId(ticket.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Collect the distinct ticket ids referenced by unreleased commits, sorted lexicographically
pub fn extract(unreleased: &[UnreleasedCommit]) -> Vec<TicketId> {
    let tickets: BTreeSet<TicketId> = unreleased
        .iter()
        .filter_map(|commit| TicketId::from_subject(&commit.subject))
        .collect();

    tickets.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ShortHash;

    fn unreleased(subjects: &[&str]) -> Vec<UnreleasedCommit> {
        subjects
            .iter()
            .enumerate()
            .map(|(i, subject)| UnreleasedCommit {
                hash: ShortHash::new(format!("m{}", i)),
                subject: subject.to_string(),
            })
            .collect()
    }

    fn ids(tickets: &[TicketId]) -> Vec<&str> {
        tickets.iter().map(TicketId::as_str).collect()
    }

    #[test]
    fn test_from_subject_splits_on_first_colon() {
        let ticket = TicketId::from_subject("WR-12: fix: retry payouts");
        assert_eq!(ticket.map(|t| t.to_string()), Some("WR-12".to_string()));
    }

    #[test]
    fn test_subject_without_colon_has_no_ticket() {
        assert_eq!(TicketId::from_subject("merge"), None);
    }

    #[test]
    fn test_leading_colon_yields_empty_id() {
        let ticket = TicketId::from_subject(": odd subject");
        assert_eq!(ticket.map(|t| t.to_string()), Some(String::new()));
    }

    #[test]
    fn test_extract_skips_subjects_without_colon() {
        let tickets = extract(&unreleased(&["WR-2: new flow", "merge"]));
        assert_eq!(ids(&tickets), vec!["WR-2"]);
    }

    #[test]
    fn test_extract_deduplicates() {
        let tickets = extract(&unreleased(&["WR-2: part one", "WR-2: part two", "WR-3: other"]));
        assert_eq!(ids(&tickets), vec!["WR-2", "WR-3"]);
    }

    #[test]
    fn test_extract_sorts_lexicographically_not_numerically() {
        let tickets = extract(&unreleased(&["WR-9: a", "WR-10: b", "ABC-1: c", "WR-2: d"]));
        assert_eq!(ids(&tickets), vec!["ABC-1", "WR-10", "WR-2", "WR-9"]);
    }

    #[test]
    fn test_extract_empty_input() {
        assert!(extract(&[]).is_empty());
    }
}
