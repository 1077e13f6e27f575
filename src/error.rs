use thiserror::Error;

use crate::domain::{CommitRecord, ShortHash};

/// Unified error type for release-scope operations
#[derive(Error, Debug)]
pub enum ReleaseScopeError {
    #[error(
        "Release marker {marker} was not found in release branch history, first {}:\n{}",
        .recent.len(),
        list_entries(.recent)
    )]
    BoundaryNotFound {
        marker: ShortHash,
        recent: Vec<CommitRecord>,
    },

    #[error("Release marker unavailable from {url}: {reason}")]
    RemoteMarkerUnavailable { url: String, reason: String },

    #[error("History retrieval failed for '{branch}': {reason}")]
    HistoryRetrieval { branch: String, reason: String },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-scope
pub type Result<T> = std::result::Result<T, ReleaseScopeError>;

fn list_entries(records: &[CommitRecord]) -> String {
    records
        .iter()
        .map(|record| format!("  {} {}", record.hash, record.subject))
        .collect::<Vec<_>>()
        .join("\n")
}

impl ReleaseScopeError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseScopeError::Config(msg.into())
    }

    /// Create a history retrieval error for a branch (or other git query)
    pub fn history(branch: impl Into<String>, reason: impl ToString) -> Self {
        ReleaseScopeError::HistoryRetrieval {
            branch: branch.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a marker error for the given source URL
    pub fn marker(url: impl Into<String>, reason: impl ToString) -> Self {
        ReleaseScopeError::RemoteMarkerUnavailable {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}
