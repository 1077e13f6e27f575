//! Main workflow orchestration logic
//!
//! Wires the injected collaborators to the release computation. Argument
//! parsing stays in main.rs; nothing here prints.

use serde::Serialize;
use tracing::{debug, info};

use crate::analyzer;
use crate::boundary::{self, BoundaryWarning};
use crate::config::GitConfig;
use crate::domain::{ticket, BranchRef, CommitRecord, ShortHash, TicketId, UnreleasedCommit};
use crate::error::Result;
use crate::git::VersionControlGateway;
use crate::marker::ReleaseMarkerSource;

/// Arguments for the scope workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeWorkflowArgs {
    /// Release branch; the current branch when `None`
    pub release_branch: Option<String>,

    /// Mainline branch; the configured default when `None`
    pub mainline_branch: Option<String>,

    /// Refresh the remote before reading histories
    pub fetch: bool,
}

/// Everything a reporter needs about one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseScope {
    /// Revision read for the release branch, e.g. `origin/release`
    pub release_branch: String,

    /// Revision read for the mainline branch
    pub mainline_branch: String,

    /// Deployed commit
    pub marker: ShortHash,

    /// Index of the marker in the release branch history
    pub boundary: usize,

    /// Release-branch commits newer than the marker
    pub pending: Vec<CommitRecord>,

    /// Mainline commits whose subject has not shipped
    pub unreleased: Vec<UnreleasedCommit>,

    /// Distinct ticket ids referenced by `unreleased`, sorted
    pub tickets: Vec<TicketId>,

    /// Non-fatal findings, shown before the report
    pub warnings: Vec<BoundaryWarning>,
}

/// Resolve what on mainline has not been released yet.
///
/// Steps:
/// 1. Resolve branch names (current branch, configured mainline)
/// 2. Optionally fetch the configured remote
/// 3. Read both histories and the deployed marker
/// 4. Locate the boundary, compute the unreleased set, extract tickets
///
/// Any collaborator failure aborts the run; no partial result is returned.
pub fn run_release_scope<G, M>(
    args: &ScopeWorkflowArgs,
    git: &GitConfig,
    gateway: &G,
    marker_source: &M,
) -> Result<ReleaseScope>
where
    G: VersionControlGateway + ?Sized,
    M: ReleaseMarkerSource + ?Sized,
{
    let release_name = match &args.release_branch {
        Some(branch) => branch.clone(),
        None => gateway.current_branch()?,
    };
    let mainline_name = args
        .mainline_branch
        .clone()
        .unwrap_or_else(|| git.mainline_branch.clone());

    let release_branch = BranchRef::new(release_name, &git.remote);
    let mainline_branch = BranchRef::new(mainline_name, &git.remote);

    if args.fetch {
        if let Some(remote) = &release_branch.remote {
            gateway.fetch(remote)?;
        }
    }

    info!(release = %release_branch, mainline = %mainline_branch, "reading branch histories");
    let release_history = gateway.history(&release_branch)?;
    let mainline_history = gateway.history(&mainline_branch)?;
    let marker = marker_source.fetch_marker()?;

    let boundary = boundary::locate(&release_history, &marker)?;
    let unreleased = analyzer::compute(&release_history, boundary, &mainline_history);
    let tickets = ticket::extract(&unreleased);

    let mut warnings = Vec::new();
    if boundary > 0 {
        warnings.push(BoundaryWarning::PendingReleaseCommits {
            marker: marker.to_string(),
            count: boundary,
        });
    }
    if unreleased.is_empty() {
        warnings.push(BoundaryWarning::NoUnreleasedChanges {
            mainline: mainline_branch.revision(),
        });
    }
    for (subject, occurrences) in analyzer::duplicate_subjects(&mainline_history) {
        warnings.push(BoundaryWarning::DuplicateSubject {
            subject,
            occurrences,
        });
    }
    for warning in &warnings {
        debug!(%warning, "boundary warning");
    }

    Ok(ReleaseScope {
        release_branch: release_branch.revision(),
        mainline_branch: mainline_branch.revision(),
        marker,
        boundary,
        pending: release_history.pending_before(boundary).to_vec(),
        unreleased,
        tickets,
        warnings,
    })
}
