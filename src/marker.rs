//! Sources for the commit currently deployed to production

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::ShortHash;
use crate::error::{ReleaseScopeError, Result};

/// Provides the hash of the commit that is live right now
pub trait ReleaseMarkerSource {
    fn fetch_marker(&self) -> Result<ShortHash>;
}

/// Payload published by the deployed application
#[derive(Debug, Deserialize)]
struct DeployedVersion {
    commit: Option<String>,
}

/// Marker read from a JSON document shaped `{ "commit": "<full hash>" }`
pub struct HttpMarkerSource {
    url: String,
    agent: ureq::Agent,
}

impl HttpMarkerSource {
    pub fn new(url: impl Into<String>) -> Self {
        HttpMarkerSource {
            url: url.into(),
            agent: ureq::Agent::new_with_defaults(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ReleaseMarkerSource for HttpMarkerSource {
    fn fetch_marker(&self) -> Result<ShortHash> {
        info!(url = %self.url, "fetching deployed release marker");

        let mut body = self
            .agent
            .get(&self.url)
            .header("User-Agent", concat!("release-scope/", env!("CARGO_PKG_VERSION")))
            .call()
            .map_err(|e| ReleaseScopeError::marker(&self.url, e))?
            .into_body();

        let text = body
            .read_to_string()
            .map_err(|e| ReleaseScopeError::marker(&self.url, format!("failed to read response body: {}", e)))?;

        parse_marker(&self.url, &text)
    }
}

/// Extract the marker from a deployed-version JSON document
pub fn parse_marker(url: &str, body: &str) -> Result<ShortHash> {
    let version: DeployedVersion = serde_json::from_str(body)
        .map_err(|e| ReleaseScopeError::marker(url, format!("invalid JSON: {}", e)))?;

    let marker = version
        .commit
        .map(ShortHash::new)
        .filter(|hash| !hash.is_empty())
        .ok_or_else(|| ReleaseScopeError::marker(url, "response has no 'commit' value"))?;

    debug!(%marker, "parsed release marker");
    Ok(marker)
}

/// Marker given up front, e.g. on the command line
pub struct StaticMarkerSource {
    marker: ShortHash,
}

impl StaticMarkerSource {
    pub fn new(hash: impl AsRef<str>) -> Self {
        StaticMarkerSource {
            marker: ShortHash::new(hash),
        }
    }
}

impl ReleaseMarkerSource for StaticMarkerSource {
    fn fetch_marker(&self) -> Result<ShortHash> {
        Ok(self.marker.clone())
    }
}
