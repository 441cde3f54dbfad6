//! Host filesystem storage for deployed artifacts.

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::collab::Storage;
use crate::error::{DeployError, DeployResult};

/// [`Storage`] backed by the host filesystem.
///
/// Directories are removed recursively and files (including symlinks) are
/// unlinked. A path that no longer exists counts as removed.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostStorage;

impl HostStorage {
    /// Create a host storage handle.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn storage_err(path: &Path, e: &std::io::Error) -> DeployError {
    DeployError::Storage {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

#[async_trait]
impl Storage for HostStorage {
    async fn remove(&self, path: &Path) -> DeployResult<()> {
        let meta = match tokio::fs::symlink_metadata(path).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Location already gone");
                return Ok(());
            },
            Err(e) => return Err(storage_err(path, &e)),
        };

        let result = if meta.is_dir() {
            tokio::fs::remove_dir_all(path).await
        } else {
            tokio::fs::remove_file(path).await
        };

        match result {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_err(path, &e)),
        }
    }
}
