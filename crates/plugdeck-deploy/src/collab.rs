//! Collaborator traits injected into the deployer.
//!
//! The deployer owns no parsing, translation storage, or filesystem logic.
//! Each of those lives behind one of these traits and is handed to
//! [`PluginDeployer::new`](crate::deployer::PluginDeployer::new).

use std::path::Path;

use async_trait::async_trait;

use crate::error::DeployResult;
use crate::localization::GlobalLocalization;
use crate::manifest::{Contributions, DependencyMapping, PackageManifest, PluginMetadata};

/// Reads package descriptors from disk.
#[async_trait]
pub trait ManifestReader: Send + Sync {
    /// Locate and read the package at `path`.
    ///
    /// `Ok(None)` means there is no package there; the entry is skipped
    /// silently.
    async fn read_package(&self, path: &Path) -> DeployResult<Option<PackageManifest>>;

    /// Extract identity and entry points.
    fn read_metadata(&self, manifest: &PackageManifest) -> DeployResult<PluginMetadata>;

    /// Extract declared contribution points, if any.
    fn read_contribution(&self, manifest: &PackageManifest) -> DeployResult<Option<Contributions>>;

    /// Extract the mapping of plugin dependencies.
    fn read_dependencies(&self, manifest: &PackageManifest) -> DeployResult<DependencyMapping>;
}

/// Receives merged translations from deployed plugins.
#[async_trait]
pub trait LocalizationProvider: Send + Sync {
    /// Register language packs with the host's translation namespace.
    async fn add_localizations(&self, localizations: Vec<GlobalLocalization>) -> DeployResult<()>;
}

/// Removes deployed artifacts.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Remove the file or directory tree at `path`.
    async fn remove(&self, path: &Path) -> DeployResult<()>;
}
