//! Plugin identity, deployment targets, and deployed records.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DeployError, DeployResult};
use crate::manifest::{Contributions, PluginMetadata};

/// Unique plugin identifier, independent of how many locations deployed it.
///
/// IDs are opaque strings such as `"acme.tools"` or `"vscode.git"`. The only
/// requirement is that they are non-empty; readers decide their format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PluginId(String);

/// Deserialize with validation so malformed IDs never reach a registry.
impl<'de> Deserialize<'de> for PluginId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

impl PluginId {
    /// Create a new `PluginId`, validating the format.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::InvalidId`] if the ID is empty.
    pub fn new(id: impl Into<String>) -> DeployResult<Self> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Create a `PluginId` without validation (for tests and internal use).
    #[must_use]
    pub fn from_static(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether a string is a valid plugin ID without constructing one.
    #[must_use]
    pub fn is_valid_id(id: &str) -> bool {
        Self::validate(id).is_ok()
    }

    fn validate(id: &str) -> DeployResult<()> {
        if id.is_empty() {
            return Err(DeployError::InvalidId("plugin id must not be empty".into()));
        }
        Ok(())
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PluginId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Whether an entry is a privileged system plugin or an ordinary extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Bundled with the host.
    System,
    /// Installed by the user or a deployer.
    #[default]
    Extension,
}

/// One of the two independent deployment destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Plugins executed in the UI host.
    Frontend,
    /// Plugins executed in the server-side host.
    Backend,
}

impl Target {
    /// Lowercase name used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate installation unit supplied by an upstream driver.
///
/// The coordinator only reads entries. `root_path` is the install-relative
/// base that gets removed on undeploy; `path` is where the package
/// descriptor lives and may point below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentEntry {
    id: String,
    path: PathBuf,
    root_path: PathBuf,
    classification: Classification,
}

impl DeploymentEntry {
    /// Create an entry classified as [`Classification::Extension`].
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>, root_path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            root_path: root_path.into(),
            classification: Classification::Extension,
        }
    }

    /// Set the classification.
    #[must_use]
    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = classification;
        self
    }

    /// Driver-side identifier of the entry, used in logs.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Location of the package descriptor.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Install root that contributed this entry.
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// The entry's classification.
    #[must_use]
    pub fn classification(&self) -> Classification {
        self.classification
    }
}

/// The durable record stored once a plugin deploys to a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployedPlugin {
    /// Identity and entry points read from the package.
    pub metadata: PluginMetadata,
    /// Classification of the entry that deployed it.
    #[serde(rename = "type")]
    pub classification: Classification,
    /// Contribution points declared by the package, if any.
    #[serde(default, rename = "contributes", skip_serializing_if = "Option::is_none")]
    pub contributions: Option<Contributions>,
}

impl DeployedPlugin {
    /// The plugin's ID.
    #[must_use]
    pub fn id(&self) -> &PluginId {
        &self.metadata.id
    }
}
