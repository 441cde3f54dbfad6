//! Deployer configuration loaded from TOML.
//!
//! ```toml
//! dependencies = "extensions-only"
//!
//! [logging]
//! level = "info"
//! format = "compact"
//! directives = ["plugdeck_deploy=debug"]
//! ```

use std::path::{Path, PathBuf};

use plugdeck_telemetry::{LogConfig, TelemetryResult};
use serde::{Deserialize, Serialize};

use crate::error::{DeployError, DeployResult};
use crate::resolver::DependencyPolicy;

/// Maximum allowed config file size (1 MB).
pub const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

const INLINE_SOURCE: &str = "<inline>";

/// Configuration for a [`PluginDeployer`](crate::deployer::PluginDeployer)
/// and the process hosting it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DeployerConfig {
    /// Which entries have their dependency mapping collected.
    pub dependencies: DependencyPolicy,
    /// Subscriber settings for binaries embedding the deployer.
    pub logging: LogConfig,
}

impl DeployerConfig {
    /// Parse a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::ConfigParse`] for invalid TOML or unknown keys.
    pub fn from_toml_str(content: &str) -> DeployResult<Self> {
        parse(content, Path::new(INLINE_SOURCE))
    }

    /// Load a config file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::ConfigRead`] if the file cannot be read,
    /// [`DeployError::ConfigTooLarge`] if it exceeds
    /// [`MAX_CONFIG_FILE_SIZE`], or [`DeployError::ConfigParse`] if its
    /// contents are invalid.
    pub fn load_file(path: &Path) -> DeployResult<Self> {
        let metadata = std::fs::metadata(path).map_err(|e| read_err(path, e))?;
        check_size(path, metadata.len())?;

        let content = std::fs::read_to_string(path).map_err(|e| read_err(path, e))?;
        // The file may have grown between stat and read.
        check_size(path, content.len() as u64)?;

        parse(&content, path)
    }

    /// Install the global subscriber described by the `[logging]` table.
    ///
    /// Call once, early in the embedding binary.
    ///
    /// # Errors
    ///
    /// Returns a [`TelemetryError`](plugdeck_telemetry::TelemetryError) if
    /// the level or a directive is invalid, or a subscriber is already
    /// installed.
    pub fn init_logging(&self) -> TelemetryResult<()> {
        plugdeck_telemetry::setup_logging(&self.logging)
    }
}

fn parse(content: &str, path: &Path) -> DeployResult<DeployerConfig> {
    toml::from_str(content).map_err(|source| DeployError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

fn check_size(path: &Path, size: u64) -> DeployResult<()> {
    if size > MAX_CONFIG_FILE_SIZE {
        return Err(DeployError::ConfigTooLarge {
            path: path.to_path_buf(),
            size,
            limit: MAX_CONFIG_FILE_SIZE,
        });
    }
    Ok(())
}

fn read_err(path: &Path, source: std::io::Error) -> DeployError {
    DeployError::ConfigRead {
        path: PathBuf::from(path),
        source,
    }
}
