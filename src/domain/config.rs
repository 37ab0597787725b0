use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for the `srq` command line tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Path of the snapshot file holding the service requests.
    ///
    /// The format follows the extension: `.json`, `.yaml` or `.yml`.
    snapshot: PathBuf,

    /// How many requests the urgent listing shows when no count is given.
    top: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot: default_snapshot(),
            top: default_top(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the configured snapshot path.
    #[must_use]
    pub fn snapshot(&self) -> &Path {
        &self.snapshot
    }

    /// Overrides the snapshot path.
    pub fn set_snapshot(&mut self, snapshot: PathBuf) {
        self.snapshot = snapshot;
    }

    /// Returns the default length of the urgent listing.
    #[must_use]
    pub const fn top(&self) -> usize {
        self.top
    }
}

fn default_snapshot() -> PathBuf {
    PathBuf::from("requests.json")
}

const fn default_top() -> usize {
    5
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_snapshot")]
        snapshot: PathBuf,

        #[serde(default = "default_top")]
        top: usize,
    },
}

impl From<Versions> for super::Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 { snapshot, top } => Self { snapshot, top },
        }
    }
}

impl From<super::Config> for Versions {
    fn from(config: super::Config) -> Self {
        Self::V1 {
            snapshot: config.snapshot,
            top: config.top,
        }
    }
}
