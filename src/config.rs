use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseScopeError, Result};

const CONFIG_FILE_NAME: &str = "releasescope.toml";

/// Represents the complete configuration for release-scope.
///
/// Contains the marker endpoint, ticket tracker location and git access settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub marker: MarkerConfig,

    #[serde(default)]
    pub tracker: TrackerConfig,

    #[serde(default)]
    pub git: GitConfig,
}

fn default_marker_url() -> String {
    "https://www.worldremit.com/public-assets/utils/cms_version.json".to_string()
}

fn default_tracker_url() -> String {
    "https://worldremit.atlassian.net".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_mainline_branch() -> String {
    "master".to_string()
}

fn default_fetch() -> bool {
    true
}

/// Where the currently deployed commit is published.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MarkerConfig {
    #[serde(default = "default_marker_url")]
    pub url: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        MarkerConfig {
            url: default_marker_url(),
        }
    }
}

/// Issue tracker used to build ticket links (`<base_url>/browse/<ticket>`).
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TrackerConfig {
    #[serde(default = "default_tracker_url")]
    pub base_url: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            base_url: default_tracker_url(),
        }
    }
}

/// Which git implementation reads branch histories.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GitBackend {
    /// libgit2 through the `git2` crate
    #[default]
    Git2,
    /// The `git` executable on PATH
    System,
}

/// Git access settings.
///
/// An empty `remote` reads local branches instead of remote-tracking ones.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_mainline_branch")]
    pub mainline_branch: String,

    #[serde(default = "default_fetch")]
    pub fetch: bool,

    #[serde(default)]
    pub backend: GitBackend,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            remote: default_remote(),
            mainline_branch: default_mainline_branch(),
            fetch: default_fetch(),
            backend: GitBackend::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasescope.toml` in current directory
/// 3. `.releasescope.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Errors
/// * `Io` - a custom path was given but cannot be read
/// * `Config` - a file was found but is not valid TOML for [Config]
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parse configuration text, filling every missing key with its default.
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| ReleaseScopeError::config(e.to_string()))
}
