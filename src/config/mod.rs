//! Persistent registry of repos and the active-repo selection.
//!
//! The registry lives in a single JSON file (`~/.wwconfig`) that is read
//! once at startup and overwritten wholesale at shutdown:
//!
//! ```json
//! {
//!     "_version": 1,
//!     "active_repo": "foo",
//!     "repos": {
//!         "foo": {
//!             "base": "/home/dev/.ww/foo",
//!             "repo": "/home/dev/src/foo"
//!         }
//!     }
//! }
//! ```
//!
//! Keys are emitted in sorted order with four-space indentation, so saving
//! an unchanged registry produces byte-identical output.
//!
//! Loading never fails. A missing, unreadable, malformed, or
//! version-mismatched file yields an empty registry; there is no migration.

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{Result, WwError};

/// Schema version written to and expected from the config file
pub const CONFIG_VERSION: u32 = 1;

/// Where a registered repo and its worktrees live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoInfo {
    /// Directory holding one subdirectory per managed worktree
    #[serde(rename = "base")]
    pub base_path: PathBuf,

    /// Absolute path of the repository's primary working copy
    #[serde(rename = "repo")]
    pub repo_path: PathBuf,
}

/// The whole registry.
///
/// Field order matches the sorted key order of the serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "_version", default)]
    pub version: u32,

    /// Repo used when a command is given no `--repo`
    #[serde(default)]
    pub active_repo: Option<String>,

    #[serde(default)]
    pub repos: BTreeMap<String, RepoInfo>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            active_repo: None,
            repos: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Loads the registry from `path`, falling back to defaults on any problem.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(
                    event = "ww.config.read_skipped",
                    path = %path.display(),
                    error = %e,
                    "Config not readable, using defaults"
                );
                return Self::default();
            }
        };

        let config = match serde_json::from_str::<Config>(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    event = "ww.config.parse_failed",
                    path = %path.display(),
                    error = %e,
                    "Config is not valid, using defaults"
                );
                return Self::default();
            }
        };

        if config.version != CONFIG_VERSION {
            tracing::warn!(
                event = "ww.config.version_mismatch",
                path = %path.display(),
                found = config.version,
                expected = CONFIG_VERSION,
                "Config version mismatch, discarding registry"
            );
            return Self::default();
        }

        config
    }

    /// Renders the registry exactly as it is written to disk
    ///
    /// # Errors
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;

        let mut json = String::from_utf8(buffer).map_err(|e| WwError::Internal {
            message: format!("Config serialized to invalid UTF-8: {}", e),
        })?;
        json.push('\n');
        Ok(json)
    }

    /// Overwrites `path` with the registry
    ///
    /// # Errors
    /// Returns an error if serialization fails or the file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json)
            .map_err(|e| WwError::io(format!("Failed to write config {}", path.display()), e))?;

        tracing::debug!(
            event = "ww.config.saved",
            path = %path.display(),
            repos = self.repos.len()
        );
        Ok(())
    }

    /// Picks the repo a worktree command targets.
    ///
    /// An explicit name wins; otherwise the active repo is used. A stale
    /// active repo is reported rather than silently ignored.
    ///
    /// # Errors
    /// - `NoRepoSpecified` if there is neither an explicit nor an active repo
    /// - `RepoNotFound` if the chosen name is not registered
    pub fn resolve_repo(&self, explicit: Option<&str>) -> Result<(String, RepoInfo)> {
        let name = match explicit {
            Some(name) => name,
            None => self
                .active_repo
                .as_deref()
                .filter(|name| !name.is_empty())
                .ok_or(WwError::NoRepoSpecified)?,
        };

        let info = self.repos.get(name).ok_or_else(|| WwError::RepoNotFound {
            name: name.to_string(),
        })?;

        Ok((name.to_string(), info.clone()))
    }

    #[must_use]
    pub fn is_active(&self, name: &str) -> bool {
        self.active_repo.as_deref() == Some(name)
    }
}
