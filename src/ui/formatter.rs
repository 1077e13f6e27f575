//! Pure formatting functions for UI output.
//!
//! Everything here builds strings; printing is left to the reporters in the
//! parent module, except for the small `display_*` helpers.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::cli::ReleaseScope;
use crate::domain::{CommitRecord, TicketId, UnreleasedCommit};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Link to a ticket in the tracker: `<base_url>/browse/<ticket>`
pub fn ticket_url(base_url: &str, ticket: &TicketId) -> String {
    format!("{}/browse/{}", base_url.trim_end_matches('/'), ticket)
}

/// Links for every ticket, in the given order
pub fn ticket_urls(base_url: &str, tickets: &[TicketId]) -> Vec<String> {
    tickets.iter().map(|ticket| ticket_url(base_url, ticket)).collect()
}

/// One `hash subject` line
pub fn commit_line(commit: &UnreleasedCommit) -> String {
    format!("{} {}", commit.hash, commit.subject)
}

fn pending_line(record: &CommitRecord) -> String {
    format!("{} {}", record.hash, record.subject)
}

/// Render the full human-readable report.
///
/// Sections:
/// - boundary summary (marker, index, pending release commits)
/// - unreleased changes, one `hash subject` line each
/// - ticket links
pub fn render_report(scope: &ReleaseScope, tracker_url: &str) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "Release marker {} is at index {} of {}",
        style(&scope.marker).cyan(),
        scope.boundary,
        scope.release_branch
    ));
    if !scope.pending.is_empty() {
        lines.push(
            style(format!("Pending on {} (not yet deployed):", scope.release_branch))
                .dim()
                .to_string(),
        );
        lines.extend(scope.pending.iter().map(pending_line));
    }

    lines.push(String::new());
    lines.push(
        style(format!("Unreleased changes on {}:", scope.mainline_branch))
            .bold()
            .to_string(),
    );
    if scope.unreleased.is_empty() {
        lines.push("(none)".to_string());
    } else {
        lines.extend(scope.unreleased.iter().map(commit_line));
    }

    lines.push(String::new());
    lines.push(style("Tickets:").bold().to_string());
    if scope.tickets.is_empty() {
        lines.push("(none)".to_string());
    } else {
        lines.extend(ticket_urls(tracker_url, &scope.tickets));
    }

    lines.join("\n")
}
