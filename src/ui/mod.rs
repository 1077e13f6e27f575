//! User interface module - reporters and formatting.
//!
//! - `formatter` - Pure formatting functions
//! - This module - [Reporter] implementations invoked once per run with the
//!   final [ReleaseScope]

use std::io::{self, Write};

use serde::Serialize;

use crate::cli::ReleaseScope;
use crate::error::Result;

pub mod formatter;

pub use formatter::{
    commit_line, display_boundary_warning, display_error, render_report, ticket_url, ticket_urls,
};

/// Receives the computed scope exactly once, after a successful run
pub trait Reporter {
    fn report(&self, scope: &ReleaseScope) -> Result<()>;
}

/// Human-readable output: report on stdout, warnings on stderr
pub struct ConsoleReporter {
    tracker_url: String,
}

impl ConsoleReporter {
    pub fn new(tracker_url: impl Into<String>) -> Self {
        ConsoleReporter {
            tracker_url: tracker_url.into(),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, scope: &ReleaseScope) -> Result<()> {
        for warning in &scope.warnings {
            display_boundary_warning(warning);
        }

        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", render_report(scope, &self.tracker_url))?;
        Ok(())
    }
}

/// Machine-readable output: one JSON document on stdout
pub struct JsonReporter {
    tracker_url: String,
}

impl JsonReporter {
    pub fn new(tracker_url: impl Into<String>) -> Self {
        JsonReporter {
            tracker_url: tracker_url.into(),
        }
    }

    /// Build the JSON document without printing it
    pub fn render(&self, scope: &ReleaseScope) -> Result<String> {
        let document = JsonReport {
            scope,
            ticket_urls: ticket_urls(&self.tracker_url, &scope.tickets),
        };

        let rendered = serde_json::to_string_pretty(&document).map_err(io::Error::from)?;
        Ok(rendered)
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    scope: &'a ReleaseScope,
    ticket_urls: Vec<String>,
}

impl Reporter for JsonReporter {
    fn report(&self, scope: &ReleaseScope) -> Result<()> {
        let rendered = self.render(scope)?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", rendered)?;
        Ok(())
    }
}
