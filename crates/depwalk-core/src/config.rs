use serde::{Deserialize, Serialize};
use std::path::Path;

use depwalk_util::errors::DepwalkError;

use crate::comparer::{VersionComparer, VersionComparison};

/// File name searched for by [`WalkerConfig::discover`].
pub const CONFIG_FILE: &str = "depwalk.toml";

/// Walker settings loaded from `depwalk.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkerConfig {
    #[serde(default)]
    pub versioning: VersioningConfig,

    #[serde(default)]
    pub install: InstallConfig,

    #[serde(default)]
    pub uninstall: UninstallConfig,
}

/// `[versioning]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersioningConfig {
    #[serde(default = "default_comparison")]
    pub comparison: VersionComparison,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            comparison: default_comparison(),
        }
    }
}

fn default_comparison() -> VersionComparison {
    VersionComparison::IgnoreMetadata
}

/// `[install]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallConfig {
    #[serde(default, rename = "ignore-dependencies")]
    pub ignore_dependencies: bool,
    #[serde(default = "default_allow_prerelease", rename = "allow-prerelease")]
    pub allow_prerelease: bool,
    #[serde(default)]
    pub upgrade: bool,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            ignore_dependencies: false,
            allow_prerelease: true,
            upgrade: false,
        }
    }
}

fn default_allow_prerelease() -> bool {
    true
}

/// `[uninstall]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UninstallConfig {
    #[serde(default)]
    pub force: bool,
    #[serde(default, rename = "remove-dependencies")]
    pub remove_dependencies: bool,
}

impl WalkerConfig {
    /// Load and parse a config file.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = depwalk_util::fs::read_text(path, "config")?;
        toml::from_str(&content).map_err(|e| {
            DepwalkError::Config {
                message: format!("Failed to parse config: {e}"),
            }
            .into()
        })
    }

    /// Look for `depwalk.toml` in `start` and its ancestors, or return
    /// defaults if there is none.
    pub fn discover(start: &Path) -> miette::Result<Self> {
        match depwalk_util::fs::find_ancestor_with(start, CONFIG_FILE) {
            Some(dir) => {
                tracing::debug!("Using walker config from {}", dir.display());
                Self::from_path(&dir.join(CONFIG_FILE))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn comparer(&self) -> VersionComparer {
        VersionComparer::new(self.versioning.comparison)
    }
}
