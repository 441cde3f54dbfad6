//! Tracking of the install roots that contributed each plugin.
//!
//! A plugin can be deployed from several roots (a bundled directory and a
//! user directory, for example). Undeploy removes every one of them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tokio::sync::{RwLock, RwLockWriteGuard};

use crate::plugin::PluginId;

/// Maps each plugin to the root paths that deployed it.
///
/// Roots are kept in first-seen order without duplicates. A plugin is known
/// exactly when it has at least one root.
#[derive(Debug, Default)]
pub struct LocationTracker {
    locations: RwLock<HashMap<PluginId, Vec<PathBuf>>>,
}

impl LocationTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `root` deployed `id`. Returns `false` if it was already
    /// recorded.
    pub async fn track(&self, id: PluginId, root: &Path) -> bool {
        let mut locations = self.locations.write().await;
        let roots = locations.entry(id).or_default();
        if roots.iter().any(|known| known == root) {
            return false;
        }
        roots.push(root.to_path_buf());
        true
    }

    /// Roots recorded for `id`, empty if unknown.
    pub async fn locations_of(&self, id: &PluginId) -> Vec<PathBuf> {
        let locations = self.locations.read().await;
        locations.get(id).cloned().unwrap_or_default()
    }

    /// Remove and return every root recorded for `id`.
    pub async fn clear(&self, id: &PluginId) -> Vec<PathBuf> {
        let mut locations = self.locations.write().await;
        locations.remove(id).unwrap_or_default()
    }

    /// Exclusive access to the location map.
    pub(crate) async fn lock(&self) -> RwLockWriteGuard<'_, HashMap<PluginId, Vec<PathBuf>>> {
        self.locations.write().await
    }

    /// Whether any root is recorded for `id`.
    pub async fn is_known(&self, id: &PluginId) -> bool {
        let locations = self.locations.read().await;
        locations.get(id).is_some_and(|roots| !roots.is_empty())
    }

    /// Number of known plugins.
    pub async fn len(&self) -> usize {
        self.locations.read().await.len()
    }

    /// Whether no plugin is known.
    pub async fn is_empty(&self) -> bool {
        self.locations.read().await.is_empty()
    }
}
