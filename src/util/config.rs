//! Configuration file support for genlib.
//!
//! Two configuration file locations are consulted:
//! - Project: `genlib.toml` in the working directory
//! - Global: `config.toml` in the platform configuration directory
//!
//! Project config takes precedence over global config. Environment
//! variables (`GOPATH`, `GOROOT`) take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the project-local configuration file.
pub const PROJECT_CONFIG_FILE: &str = "genlib.toml";

/// genlib configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source root settings
    pub paths: PathsConfig,
}

/// Where Go sources live.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// GOPATH; packages are looked up under `<gopath>/src`
    pub gopath: Option<PathBuf>,

    /// GOROOT; standard library packages are looked up under `<goroot>/src`
    pub goroot: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Load the global config, then the project config found in `cwd`.
    pub fn load_layered(global: Option<&Path>, cwd: &Path) -> Self {
        let global = global.map(Self::load_or_default).unwrap_or_default();
        let project = Self::load_or_default(&cwd.join(PROJECT_CONFIG_FILE));
        global.merge(project)
    }

    /// Merge `other` on top of `self`; values set in `other` win.
    pub fn merge(self, other: Config) -> Self {
        Config {
            paths: PathsConfig {
                gopath: other.paths.gopath.or(self.paths.gopath),
                goroot: other.paths.goroot.or(self.paths.goroot),
            },
        }
    }
}
