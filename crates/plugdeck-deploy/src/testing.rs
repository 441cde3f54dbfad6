//! Mock collaborators shared by the unit tests.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::collab::{LocalizationProvider, ManifestReader, Storage};
use crate::error::{DeployError, DeployResult};
use crate::localization::GlobalLocalization;
use crate::manifest::{
    Contributions, DependencyMapping, Localization, PackageManifest, PluginMetadata,
};
use crate::plugin::{PluginId, Target};

/// A package served by [`MockReader`].
#[derive(Debug, Clone)]
pub(crate) struct MockPackage {
    metadata: PluginMetadata,
    contributions: Option<Contributions>,
    dependencies: DependencyMapping,
    broken_metadata: bool,
    broken_read: bool,
}

impl MockPackage {
    pub(crate) fn new(id: &str, version: &str) -> Self {
        let name = id.rsplit('.').next().unwrap_or(id);
        Self {
            metadata: PluginMetadata::new(PluginId::from_static(id), name, version),
            contributions: None,
            dependencies: DependencyMapping::new(),
            broken_metadata: false,
            broken_read: false,
        }
    }

    pub(crate) fn with_entry_point(mut self, target: Target, entry_point: &str) -> Self {
        self.metadata = self.metadata.with_entry_point(target, entry_point);
        self
    }

    pub(crate) fn with_localizations(mut self, localizations: Vec<Localization>) -> Self {
        self.contributions = Some(Contributions {
            localizations,
            ..Contributions::default()
        });
        self
    }

    pub(crate) fn with_dependency(mut self, id: &str, requirement: &str) -> Self {
        self.dependencies
            .insert(PluginId::from_static(id), requirement.to_string());
        self
    }

    pub(crate) fn broken_metadata(mut self) -> Self {
        self.broken_metadata = true;
        self
    }

    pub(crate) fn broken_read(mut self) -> Self {
        self.broken_read = true;
        self
    }
}

/// Manifest reader backed by a fixed path → package map.
#[derive(Debug, Default)]
pub(crate) struct MockReader {
    packages: HashMap<PathBuf, MockPackage>,
}

impl MockReader {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_package(mut self, path: impl Into<PathBuf>, package: MockPackage) -> Self {
        self.packages.insert(path.into(), package);
        self
    }

    fn package(&self, manifest: &PackageManifest) -> DeployResult<&MockPackage> {
        self.packages
            .get(manifest.path())
            .ok_or_else(|| parse_err(manifest.path(), "unknown package"))
    }
}

fn parse_err(path: &Path, message: &str) -> DeployError {
    DeployError::ManifestParseError {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

#[async_trait]
impl ManifestReader for MockReader {
    async fn read_package(&self, path: &Path) -> DeployResult<Option<PackageManifest>> {
        match self.packages.get(path) {
            None => Ok(None),
            Some(package) if package.broken_read => Err(parse_err(path, "unreadable package.json")),
            Some(package) => Ok(Some(PackageManifest::new(
                path,
                serde_json::json!({
                    "name": package.metadata.name,
                    "version": package.metadata.version,
                }),
            ))),
        }
    }

    fn read_metadata(&self, manifest: &PackageManifest) -> DeployResult<PluginMetadata> {
        let package = self.package(manifest)?;
        if package.broken_metadata {
            return Err(parse_err(manifest.path(), "missing publisher"));
        }
        Ok(package.metadata.clone())
    }

    fn read_contribution(&self, manifest: &PackageManifest) -> DeployResult<Option<Contributions>> {
        Ok(self.package(manifest)?.contributions.clone())
    }

    fn read_dependencies(&self, manifest: &PackageManifest) -> DeployResult<DependencyMapping> {
        Ok(self.package(manifest)?.dependencies.clone())
    }
}

/// Localization provider that records every call.
#[derive(Debug, Default)]
pub(crate) struct RecordingLocalizations {
    calls: Mutex<Vec<Vec<GlobalLocalization>>>,
    fail: bool,
    delay: Option<Duration>,
}

impl RecordingLocalizations {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Provider that takes `delay` to accept each call.
    pub(crate) fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<Vec<GlobalLocalization>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LocalizationProvider for RecordingLocalizations {
    async fn add_localizations(&self, localizations: Vec<GlobalLocalization>) -> DeployResult<()> {
        self.calls.lock().unwrap().push(localizations);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(DeployError::Localization("translation store offline".into()));
        }
        Ok(())
    }
}

/// Storage that records removal requests and fails for chosen paths.
#[derive(Debug, Default)]
pub(crate) struct RecordingStorage {
    removed: Mutex<Vec<PathBuf>>,
    failing: HashSet<PathBuf>,
}

impl RecordingStorage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_on(mut self, path: impl Into<PathBuf>) -> Self {
        self.failing.insert(path.into());
        self
    }

    pub(crate) fn removed(&self) -> Vec<PathBuf> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn remove(&self, path: &Path) -> DeployResult<()> {
        self.removed.lock().unwrap().push(path.to_path_buf());
        if self.failing.contains(path) {
            return Err(DeployError::Storage {
                path: path.to_path_buf(),
                message: "permission denied".into(),
            });
        }
        Ok(())
    }
}
