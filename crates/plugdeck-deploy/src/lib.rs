//! Plugin deployment coordinator for the plugdeck host.
//!
//! Takes batches of discovered plugin locations and turns them into deployed
//! plugins for the two sides of the host:
//!
//! - [`DeploymentEntry`]: A discovered plugin location with its classification
//! - [`PluginDeployer`]: Deploys batches per [`Target`], resolves dependencies, undeploys
//! - [`DeploymentRegistry`]: Per-target records, listable once the first batch completes
//! - [`LocationTracker`]: Every root path each plugin was deployed from
//! - [`merge_localizations`]: Flattens contributed translations into global language packs
//! - [`ManifestReader`] / [`LocalizationProvider`] / [`Storage`]: Injected collaborators
//! - [`DeployerConfig`]: TOML configuration, including the [`DependencyPolicy`]
//!
//! # Failure Isolation
//!
//! A broken package never takes a batch down with it. Entry-level failures
//! are logged and counted in the [`BatchReport`]; the target's readiness gate
//! opens regardless, so consumers waiting on the listing are released.
//!
//! # Translation Keys
//!
//! Contributed strings are registered as `{plugin_id}/{scope}/{key}`, using
//! only the last `/`-separated segment of the scope.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod collab;
pub mod config;
pub mod deployer;
pub mod error;
pub mod gate;
pub mod localization;
pub mod locations;
pub mod manifest;
pub mod plugin;
pub mod registry;
pub mod resolver;
pub mod storage;

#[cfg(test)]
mod testing;

pub use collab::{LocalizationProvider, ManifestReader, Storage};
pub use config::{DeployerConfig, MAX_CONFIG_FILE_SIZE};
pub use deployer::{BatchReport, DeployOutcome, PluginDeployer};
pub use error::{DeployError, DeployResult};
pub use gate::ReadinessGate;
pub use localization::{GlobalLocalization, merge_localizations, translation_key};
pub use locations::LocationTracker;
pub use manifest::{
    Contributions, DependencyMapping, Localization, PackageManifest, PluginDependencies,
    PluginEntryPoint, PluginMetadata, Translation,
};
pub use plugin::{Classification, DeployedPlugin, DeploymentEntry, PluginId, Target};
pub use registry::DeploymentRegistry;
pub use resolver::{DependencyPolicy, DependencyResolver};
pub use storage::HostStorage;
