//! Version control access layer
//!
//! The release computation never talks to git directly. It consumes a
//! [VersionControlGateway], which returns linear branch histories as
//! `(short hash, subject)` records, most recent first.
//!
//! # Implementations
//!
//! - [repository::Git2Gateway]: reads history through `libgit2` (default)
//! - [system::SystemGitGateway]: runs the `git` binary and parses its log output
//! - [mock::MockGateway]: in-memory histories for tests
//!
//! ```rust
//! # use release_scope::git::VersionControlGateway;
//! # use release_scope::domain::BranchRef;
//! # fn example<G: VersionControlGateway>(gateway: &G) -> release_scope::Result<()> {
//! let history = gateway.history(&BranchRef::new("master", "origin"))?;
//! for record in &history {
//!     println!("{} {}", record.hash, record.subject);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;
pub mod system;

pub use mock::MockGateway;
pub use repository::Git2Gateway;
pub use system::SystemGitGateway;

use crate::domain::{BranchHistory, BranchRef};
use crate::error::Result;

/// Read-only view of a repository's branches.
///
/// ## Error Handling
///
/// Every failure (unknown branch, not a repository, unreachable remote) is
/// reported as [crate::error::ReleaseScopeError::HistoryRetrieval] and is fatal
/// for the run.
pub trait VersionControlGateway {
    /// Linear history of `branch`, most recent first, hashes truncated to
    /// [crate::domain::SHORT_HASH_LEN] characters.
    fn history(&self, branch: &BranchRef) -> Result<BranchHistory>;

    /// Name of the branch currently checked out (`HEAD` when detached)
    fn current_branch(&self) -> Result<String>;

    /// Refresh remote-tracking branches of `remote`
    fn fetch(&self, remote: &str) -> Result<()>;
}

/// Parse log output with one `hash<whitespace>subject` entry per line.
///
/// Blank lines are skipped. A line holding only a hash gets an empty subject.
pub fn parse_log_output(output: &str) -> BranchHistory {
    let entries = output
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let line = line.trim_start();
            match line.split_once(char::is_whitespace) {
                Some((hash, subject)) => (hash, subject),
                None => (line, ""),
            }
        });

    BranchHistory::from_entries(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_output_lines() {
        let history = parse_log_output("abc123def WR-9: fix\n0123456789abcdef merge\n");
        assert_eq!(history.len(), 2);

        let first = history.get(0).unwrap();
        assert_eq!(first.hash.as_str(), "abc123def");
        assert_eq!(first.subject, "WR-9: fix");
        assert_eq!(first.original_index, 0);

        let second = history.get(1).unwrap();
        assert_eq!(second.hash.as_str(), "012345678");
        assert_eq!(second.subject, "merge");
        assert_eq!(second.original_index, 1);
    }

    #[test]
    fn test_parse_log_output_skips_blank_lines() {
        let history = parse_log_output("\nh1 one\n\n  \nh2 two\n");
        let subjects: Vec<&str> = history.iter().map(|r| r.subject.as_str()).collect();
        assert_eq!(subjects, vec!["one", "two"]);
    }

    #[test]
    fn test_parse_log_output_keeps_inner_whitespace() {
        let history = parse_log_output("h1\tWR-3:  spaced   out\r\n");
        assert_eq!(history.get(0).unwrap().subject, "WR-3:  spaced   out");
    }

    #[test]
    fn test_parse_log_output_hash_only() {
        let history = parse_log_output("h1\n");
        assert_eq!(history.get(0).unwrap().subject, "");
    }
}
