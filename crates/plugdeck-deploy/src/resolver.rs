//! Dependency resolution for deployment entries.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collab::ManifestReader;
use crate::error::DeployResult;
use crate::manifest::PluginDependencies;
use crate::plugin::{Classification, DeploymentEntry};

/// Which entries get their dependency mapping collected.
///
/// Dependency mappings drive the upstream deployer's transitive installs.
/// The default collects them for ordinary extensions only, so bundled
/// system plugins never pull in further packages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyPolicy {
    /// Only [`Classification::Extension`] entries.
    #[default]
    ExtensionsOnly,
    /// Only [`Classification::System`] entries.
    SystemOnly,
    /// Every entry.
    All,
}

impl DependencyPolicy {
    /// Whether entries of `classification` get a dependency mapping.
    #[must_use]
    pub fn includes(self, classification: Classification) -> bool {
        match self {
            Self::ExtensionsOnly => classification == Classification::Extension,
            Self::SystemOnly => classification == Classification::System,
            Self::All => true,
        }
    }
}

/// Reads package metadata and dependency mappings for entries.
pub struct DependencyResolver {
    reader: Arc<dyn ManifestReader>,
    policy: DependencyPolicy,
}

impl DependencyResolver {
    /// Create a resolver over `reader`.
    #[must_use]
    pub fn new(reader: Arc<dyn ManifestReader>, policy: DependencyPolicy) -> Self {
        Self { reader, policy }
    }

    /// The active dependency policy.
    #[must_use]
    pub fn policy(&self) -> DependencyPolicy {
        self.policy
    }

    /// Resolve metadata and, per policy, the dependency mapping of `entry`.
    ///
    /// Returns `Ok(None)` when no package exists at the entry's path.
    ///
    /// # Errors
    ///
    /// Propagates any reader failure. Callers at the entry boundary are
    /// expected to log it and carry on.
    pub async fn resolve(&self, entry: &DeploymentEntry) -> DeployResult<Option<PluginDependencies>> {
        let Some(manifest) = self.reader.read_package(entry.path()).await? else {
            debug!(
                entry_id = entry.id(),
                path = %entry.path().display(),
                "No package found, skipping dependency resolution"
            );
            return Ok(None);
        };

        let metadata = self.reader.read_metadata(&manifest)?;
        let mapping = if self.policy.includes(entry.classification()) {
            Some(self.reader.read_dependencies(&manifest)?)
        } else {
            debug!(
                plugin_id = %metadata.id,
                classification = ?entry.classification(),
                policy = ?self.policy,
                "Dependency mapping not collected"
            );
            None
        };

        Ok(Some(PluginDependencies { metadata, mapping }))
    }
}

impl std::fmt::Debug for DependencyResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyResolver")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
