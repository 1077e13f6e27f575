//! Release boundary resolution.
//!
//! The boundary is the position of the deployed commit inside the release
//! branch history. Everything before it is pending, everything at or after it
//! has shipped.

use std::fmt;

use tracing::debug;

use crate::domain::{BranchHistory, ShortHash};
use crate::error::{ReleaseScopeError, Result};

/// Number of release-branch entries carried by a `BoundaryNotFound` error
pub const BOUNDARY_DIAGNOSTIC_ENTRIES: usize = 30;

/// Find the first position of `marker` in `release_history`, scanning from the most recent commit.
///
/// # Errors
/// * `BoundaryNotFound` - no record carries the marker hash; the error holds the
///   first [`BOUNDARY_DIAGNOSTIC_ENTRIES`] records of the history
pub fn locate(release_history: &BranchHistory, marker: &ShortHash) -> Result<usize> {
    match release_history
        .iter()
        .position(|record| &record.hash == marker)
    {
        Some(index) => {
            debug!(%marker, index, "located release boundary");
            Ok(index)
        }
        None => Err(ReleaseScopeError::BoundaryNotFound {
            marker: marker.clone(),
            recent: release_history.head(BOUNDARY_DIAGNOSTIC_ENTRIES).to_vec(),
        }),
    }
}

/// Non-fatal findings about the boundary and the computed change set.
/// These are reported alongside the result but never stop a run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundaryWarning {
    /// The release branch already holds commits newer than the deployed marker
    PendingReleaseCommits { marker: String, count: usize },
    /// Every mainline subject is already part of the release
    NoUnreleasedChanges { mainline: String },
    /// Several mainline commits share one subject, so they are matched together
    DuplicateSubject { subject: String, occurrences: usize },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::PendingReleaseCommits { marker, count } => {
                let noun = if *count == 1 { "commit" } else { "commits" };
                write!(
                    f,
                    "Release branch has {} {} newer than deployed marker {}",
                    count, noun, marker
                )
            }
            BoundaryWarning::NoUnreleasedChanges { mainline } => {
                write!(f, "No unreleased changes on '{}'", mainline)
            }
            BoundaryWarning::DuplicateSubject {
                subject,
                occurrences,
            } => {
                write!(
                    f,
                    "Subject '{}' appears {} times on mainline; matched by text, not per commit",
                    subject, occurrences
                )
            }
        }
    }
}
