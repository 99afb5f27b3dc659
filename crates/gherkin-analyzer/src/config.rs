//! Tool configuration, read from `gherkin-analyzer.toml`.
//!
//! ```toml
//! features = "features"
//! steps = "tests/steps"
//!
//! [dialects]
//! js = false
//! ```
//!
//! Command-line flags override file values; a missing file means defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "gherkin-analyzer.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root of the feature tree.
    pub features: Option<PathBuf>,
    /// Root the step-definition dialects scan.
    pub steps: Option<PathBuf>,
    pub dialects: DialectToggles,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DialectToggles {
    pub rust: bool,
    pub js: bool,
}

impl Default for DialectToggles {
    fn default() -> Self {
        Self {
            rust: true,
            js: true,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `gherkin-analyzer.toml` from `dir` when present, else defaults.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }
}

#[cfg(test)]
#[path = "../tests/src/config_tests.rs"]
mod tests;
