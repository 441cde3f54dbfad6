//! Deployment coordinator.
//!
//! [`PluginDeployer`] drives batches of [`DeploymentEntry`] values into the
//! frontend and backend registries, tracks where each plugin was deployed
//! from, and tears everything down again on [`undeploy`](PluginDeployer::undeploy).
//!
//! Failures of a single entry never abort a batch: they are logged and the
//! entry is counted as failed in the returned [`BatchReport`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::collab::{LocalizationProvider, ManifestReader, Storage};
use crate::config::DeployerConfig;
use crate::error::DeployResult;
use crate::localization::merge_localizations;
use crate::locations::LocationTracker;
use crate::manifest::PluginDependencies;
use crate::plugin::{DeployedPlugin, DeploymentEntry, PluginId, Target};
use crate::registry::DeploymentRegistry;
use crate::resolver::{DependencyPolicy, DependencyResolver};

/// What happened to a single entry of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// A new record was inserted.
    Deployed(PluginId),
    /// The target already held the ID; only the root path was tracked.
    AlreadyDeployed(PluginId),
    /// No package was found at the entry's path.
    Skipped,
    /// Reading or registering the package failed.
    Failed,
}

/// Per-outcome counts for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Entries that produced a new record.
    pub deployed: usize,
    /// Entries whose ID was already deployed to the target.
    pub already_deployed: usize,
    /// Entries without a package.
    pub skipped: usize,
    /// Entries that failed.
    pub failed: usize,
}

impl BatchReport {
    fn record(&mut self, outcome: &DeployOutcome) {
        let counter = match outcome {
            DeployOutcome::Deployed(_) => &mut self.deployed,
            DeployOutcome::AlreadyDeployed(_) => &mut self.already_deployed,
            DeployOutcome::Skipped => &mut self.skipped,
            DeployOutcome::Failed => &mut self.failed,
        };
        *counter = counter.saturating_add(1);
    }

    /// Number of entries processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.deployed
            .saturating_add(self.already_deployed)
            .saturating_add(self.skipped)
            .saturating_add(self.failed)
    }
}

/// Opens a registry's readiness gate when dropped.
struct OpenGateOnDrop<'a>(&'a DeploymentRegistry);

impl Drop for OpenGateOnDrop<'_> {
    fn drop(&mut self) {
        if self.0.open_gate() {
            debug!(deploy_target = %self.0.target(), "Deployment registry ready");
        }
    }
}

/// Coordinates plugin deployment for both targets.
///
/// Shared as `Arc<PluginDeployer>`; every operation takes `&self`.
pub struct PluginDeployer {
    reader: Arc<dyn ManifestReader>,
    localizations: Arc<dyn LocalizationProvider>,
    storage: Arc<dyn Storage>,
    resolver: DependencyResolver,
    locations: LocationTracker,
    frontend: DeploymentRegistry,
    backend: DeploymentRegistry,
}

impl PluginDeployer {
    /// Create a deployer with the default [`DependencyPolicy`].
    #[must_use]
    pub fn new(
        reader: Arc<dyn ManifestReader>,
        localizations: Arc<dyn LocalizationProvider>,
        storage: Arc<dyn Storage>,
    ) -> Self {
        Self::with_config(reader, localizations, storage, &DeployerConfig::default())
    }

    /// Create a deployer using `config`.
    #[must_use]
    pub fn with_config(
        reader: Arc<dyn ManifestReader>,
        localizations: Arc<dyn LocalizationProvider>,
        storage: Arc<dyn Storage>,
        config: &DeployerConfig,
    ) -> Self {
        Self {
            resolver: DependencyResolver::new(Arc::clone(&reader), config.dependencies),
            reader,
            localizations,
            storage,
            locations: LocationTracker::new(),
            frontend: DeploymentRegistry::new(Target::Frontend),
            backend: DeploymentRegistry::new(Target::Backend),
        }
    }

    /// The active dependency policy.
    #[must_use]
    pub fn dependency_policy(&self) -> DependencyPolicy {
        self.resolver.policy()
    }

    /// The registry for `target`.
    #[must_use]
    pub fn registry(&self, target: Target) -> &DeploymentRegistry {
        match target {
            Target::Frontend => &self.frontend,
            Target::Backend => &self.backend,
        }
    }

    /// Root paths recorded per plugin.
    #[must_use]
    pub fn locations(&self) -> &LocationTracker {
        &self.locations
    }

    /// Deploy `entries` to `target`, one at a time and in order.
    ///
    /// The target's readiness gate opens once the batch has been processed,
    /// whatever the individual outcomes were. It also opens when the batch
    /// future is dropped early or a collaborator panics.
    pub async fn deploy_batch(&self, entries: &[DeploymentEntry], target: Target) -> BatchReport {
        // Opens the gate even if the batch is dropped or a collaborator panics.
        let _gate = OpenGateOnDrop(self.registry(target));

        let mut report = BatchReport::default();
        for entry in entries {
            let outcome = self.deploy_entry(entry, target).await;
            report.record(&outcome);
        }

        info!(
            deploy_target = %target,
            deployed = report.deployed,
            already_deployed = report.already_deployed,
            skipped = report.skipped,
            failed = report.failed,
            "Deployment batch complete"
        );
        report
    }

    /// Deploy `entries` to the frontend.
    pub async fn deploy_frontend_plugins(&self, entries: &[DeploymentEntry]) -> BatchReport {
        self.deploy_batch(entries, Target::Frontend).await
    }

    /// Deploy `entries` to the backend.
    pub async fn deploy_backend_plugins(&self, entries: &[DeploymentEntry]) -> BatchReport {
        self.deploy_batch(entries, Target::Backend).await
    }

    async fn deploy_entry(&self, entry: &DeploymentEntry, target: Target) -> DeployOutcome {
        match self.deploy_one(entry, target).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(
                    deploy_target = %target,
                    entry_id = entry.id(),
                    path = %entry.path().display(),
                    error = %e,
                    "Failed to deploy plugin"
                );
                DeployOutcome::Failed
            },
        }
    }

    async fn deploy_one(&self, entry: &DeploymentEntry, target: Target) -> DeployResult<DeployOutcome> {
        let Some(manifest) = self.reader.read_package(entry.path()).await? else {
            debug!(
                entry_id = entry.id(),
                path = %entry.path().display(),
                "No package found, skipping"
            );
            return Ok(DeployOutcome::Skipped);
        };

        let metadata = self.reader.read_metadata(&manifest)?;
        let id = metadata.id.clone();
        self.locations.track(id.clone(), entry.root_path()).await;

        let registry = self.registry(target);
        if registry.contains(&id).await {
            debug!(deploy_target = %target, plugin_id = %id, "Plugin already deployed");
            return Ok(DeployOutcome::AlreadyDeployed(id));
        }

        let contributions = self.reader.read_contribution(&manifest)?;
        let merged = contributions
            .as_ref()
            .filter(|c| c.has_localizations())
            .map(|c| merge_localizations(&c.localizations));

        let entry_point = metadata
            .entry_point
            .for_target(target)
            .map_or_else(|| manifest.path().display().to_string(), str::to_string);
        let name = metadata.name.clone();
        let version = metadata.version.clone();

        let record = DeployedPlugin {
            metadata,
            classification: entry.classification(),
            contributions,
        };
        if !registry.put(id.clone(), record).await {
            return Ok(DeployOutcome::AlreadyDeployed(id));
        }

        // Translations are only forwarded by the entry that owns the record.
        if let Some(merged) = merged
            && let Err(e) = self.localizations.add_localizations(merged).await
        {
            registry.remove(&id).await;
            return Err(e);
        }

        info!(
            deploy_target = %target,
            plugin_id = %id,
            plugin = %format_args!("{name}@{version}"),
            entry_point = %entry_point,
            "Deployed plugin"
        );
        Ok(DeployOutcome::Deployed(id))
    }

    /// Remove `id` from both targets and delete every location it was
    /// deployed from.
    ///
    /// Both registries and the location tracker are updated in a single
    /// critical section; storage removal happens afterwards.
    ///
    /// Returns `false` when no location was recorded for `id`. A location
    /// that cannot be removed is logged and the remaining ones are still
    /// attempted.
    pub async fn undeploy(&self, id: &PluginId) -> bool {
        let roots = {
            // Lock order: backend, frontend, locations.
            let mut backend = self.backend.lock().await;
            let mut frontend = self.frontend.lock().await;
            let mut locations = self.locations.lock().await;
            backend.remove(id);
            frontend.remove(id);
            locations.remove(id).unwrap_or_default()
        };
        if roots.is_empty() {
            debug!(plugin_id = %id, "No deployed locations, nothing to undeploy");
            return false;
        }

        for root in &roots {
            if let Err(e) = self.storage.remove(root).await {
                warn!(
                    plugin_id = %id,
                    path = %root.display(),
                    error = %e,
                    "Failed to remove deployed location"
                );
            }
        }

        info!(plugin_id = %id, locations = roots.len(), "Undeployed plugin");
        true
    }

    /// Metadata and, per the dependency policy, dependency mapping of
    /// `entry`.
    ///
    /// Returns `None` when there is no package or reading it failed; the
    /// failure is logged.
    pub async fn get_dependencies(&self, entry: &DeploymentEntry) -> Option<PluginDependencies> {
        match self.resolver.resolve(entry).await {
            Ok(dependencies) => dependencies,
            Err(e) => {
                warn!(
                    entry_id = entry.id(),
                    path = %entry.path().display(),
                    error = %e,
                    "Failed to resolve plugin dependencies"
                );
                None
            },
        }
    }

    /// Find a deployed plugin, looking at the backend first.
    pub async fn get_deployed_plugin(&self, id: &PluginId) -> Option<DeployedPlugin> {
        match self.backend.get(id).await {
            Some(plugin) => Some(plugin),
            None => self.frontend.get(id).await,
        }
    }

    /// IDs deployed to `target`, once its first batch has completed.
    pub async fn deployed_plugin_ids(&self, target: Target) -> Vec<PluginId> {
        self.registry(target).list_ids().await
    }

    /// IDs deployed to the frontend.
    pub async fn deployed_frontend_plugin_ids(&self) -> Vec<PluginId> {
        self.deployed_plugin_ids(Target::Frontend).await
    }

    /// IDs deployed to the backend.
    pub async fn deployed_backend_plugin_ids(&self) -> Vec<PluginId> {
        self.deployed_plugin_ids(Target::Backend).await
    }
}

impl std::fmt::Debug for PluginDeployer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginDeployer")
            .field("resolver", &self.resolver)
            .field("locations", &self.locations)
            .field("frontend", &self.frontend)
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}
