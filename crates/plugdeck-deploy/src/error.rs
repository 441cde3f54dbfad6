//! Deployment error types.

use std::path::PathBuf;

/// Errors raised while deploying, resolving, or removing plugins.
///
/// None of these escape the coordinator's public batch, dependency, or
/// undeploy operations; they are logged at the entry boundary instead.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// The plugin ID is invalid.
    #[error("invalid plugin id: {0}")]
    InvalidId(String),

    /// A package descriptor could not be read or interpreted.
    #[error("manifest parse error in {path}: {message}")]
    ManifestParseError {
        /// Path to the package.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// The localization provider rejected merged translations.
    #[error("localization error: {0}")]
    Localization(String),

    /// A deployed location could not be removed.
    #[error("failed to remove {path}: {message}")]
    Storage {
        /// The location that could not be removed.
        path: PathBuf,
        /// Failure reason.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys.
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        /// Path to the config file, or `<inline>` for string input.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// The config file exceeds the size limit.
    #[error("config file {path} is {size} bytes, exceeding the {limit} byte limit")]
    ConfigTooLarge {
        /// Path to the config file.
        path: PathBuf,
        /// Actual size in bytes.
        size: u64,
        /// Maximum allowed size in bytes.
        limit: u64,
    },
}

/// Result type for deployment operations.
pub type DeployResult<T> = Result<T, DeployError>;
