//! Deployment registry.
//!
//! Holds the plugins deployed to one [`Target`]. Listing waits on the
//! target's readiness gate so that consumers never observe the empty state
//! that precedes the first deployment pass.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tokio::sync::{RwLock, RwLockWriteGuard};
use tracing::debug;

use crate::gate::ReadinessGate;
use crate::plugin::{DeployedPlugin, PluginId, Target};

/// Registry of plugins deployed to a single target.
///
/// Each ID maps to at most one record. Records are never replaced: a second
/// [`put`](Self::put) for the same ID is rejected.
#[derive(Debug)]
pub struct DeploymentRegistry {
    target: Target,
    plugins: RwLock<HashMap<PluginId, DeployedPlugin>>,
    gate: ReadinessGate,
}

impl DeploymentRegistry {
    /// Create an empty registry with a closed gate.
    #[must_use]
    pub fn new(target: Target) -> Self {
        Self {
            target,
            plugins: RwLock::new(HashMap::new()),
            gate: ReadinessGate::new(),
        }
    }

    /// The target this registry serves.
    #[must_use]
    pub fn target(&self) -> Target {
        self.target
    }

    /// Insert `record` unless `id` is already present. Returns whether an
    /// insertion happened.
    pub async fn put(&self, id: PluginId, record: DeployedPlugin) -> bool {
        let mut plugins = self.plugins.write().await;
        match plugins.entry(id) {
            Entry::Occupied(existing) => {
                debug!(
                    deploy_target = %self.target,
                    plugin_id = %existing.key(),
                    "Plugin already deployed, keeping existing record"
                );
                false
            },
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            },
        }
    }

    /// Get a copy of the record for `id`.
    pub async fn get(&self, id: &PluginId) -> Option<DeployedPlugin> {
        self.plugins.read().await.get(id).cloned()
    }

    /// Whether `id` is deployed.
    pub async fn contains(&self, id: &PluginId) -> bool {
        self.plugins.read().await.contains_key(id)
    }

    /// Remove `id`. Returns `true` if it was present.
    pub async fn remove(&self, id: &PluginId) -> bool {
        self.plugins.write().await.remove(id).is_some()
    }

    /// Exclusive access to the record map, for mutations that must span
    /// several structures without a suspension point in between.
    pub(crate) async fn lock(&self) -> RwLockWriteGuard<'_, HashMap<PluginId, DeployedPlugin>> {
        self.plugins.write().await
    }

    /// IDs deployed at call time, sorted.
    ///
    /// Waits for the first deployment pass of this target to complete.
    pub async fn list_ids(&self) -> Vec<PluginId> {
        self.gate.wait().await;
        let mut ids: Vec<PluginId> = self.plugins.read().await.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    /// Open the readiness gate. Returns `true` only for the opening call.
    pub fn open_gate(&self) -> bool {
        self.gate.open()
    }

    /// Whether the first deployment pass has completed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.gate.is_open()
    }

    /// Number of deployed plugins.
    pub async fn len(&self) -> usize {
        self.plugins.read().await.len()
    }

    /// Whether no plugin is deployed.
    pub async fn is_empty(&self) -> bool {
        self.plugins.read().await.is_empty()
    }
}
