//! Package manifest data as seen by the deployer.
//!
//! The deployer never parses package descriptors itself. A
//! [`ManifestReader`](crate::collab::ManifestReader) turns the raw
//! [`PackageManifest`] into the typed values defined here.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::plugin::{PluginId, Target};

/// A package descriptor located by the manifest reader.
///
/// Holds the raw JSON so readers can extract metadata, contributions and
/// dependencies lazily, in separate fallible steps.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    path: PathBuf,
    raw: serde_json::Value,
}

impl PackageManifest {
    /// Wrap a raw descriptor read from `path`.
    pub fn new(path: impl Into<PathBuf>, raw: serde_json::Value) -> Self {
        Self {
            path: path.into(),
            raw,
        }
    }

    /// Path the descriptor was read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The raw descriptor.
    #[must_use]
    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }
}

/// Entry points a plugin declares per target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginEntryPoint {
    /// Script loaded by the frontend host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend: Option<String>,
    /// Script loaded by the backend host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
}

impl PluginEntryPoint {
    /// The entry point for `target`, if declared.
    #[must_use]
    pub fn for_target(&self, target: Target) -> Option<&str> {
        match target {
            Target::Frontend => self.frontend.as_deref(),
            Target::Backend => self.backend.as_deref(),
        }
    }
}

/// Identity and entry points parsed from a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginMetadata {
    /// Unique plugin ID (usually `publisher.name`).
    pub id: PluginId,
    /// Package name.
    pub name: String,
    /// Package version.
    pub version: String,
    /// Human-readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Publisher, when the package declares one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Per-target entry points.
    #[serde(default)]
    pub entry_point: PluginEntryPoint,
}

impl PluginMetadata {
    /// Create metadata with no display name, publisher, or entry points.
    pub fn new(id: PluginId, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            version: version.into(),
            display_name: None,
            publisher: None,
            entry_point: PluginEntryPoint::default(),
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Set the publisher.
    #[must_use]
    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    /// Declare the entry point for `target`.
    #[must_use]
    pub fn with_entry_point(mut self, target: Target, entry_point: impl Into<String>) -> Self {
        let slot = match target {
            Target::Frontend => &mut self.entry_point.frontend,
            Target::Backend => &mut self.entry_point.backend,
        };
        *slot = Some(entry_point.into());
        self
    }
}

/// Translations bundled by a plugin for one scope tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// ID of the plugin the translated strings belong to.
    pub id: String,
    /// Path of the translation file inside the package.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// `scope -> key -> translated string`.
    #[serde(default)]
    pub contents: BTreeMap<String, BTreeMap<String, String>>,
}

/// A language contributed by a plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Localization {
    /// BCP 47 language ID (e.g. `de`, `zh-cn`).
    pub language_id: String,
    /// English name of the language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_name: Option<String>,
    /// Name of the language in the language itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localized_language_name: Option<String>,
    /// Translation units, possibly for several plugins.
    #[serde(default)]
    pub translations: Vec<Translation>,
}

/// Contribution points declared by a package.
///
/// Only localizations are interpreted by the deployer. Every other
/// contribution point is kept verbatim for consumers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contributions {
    /// Bundled language packs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub localizations: Vec<Localization>,
    /// All other contribution points.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Contributions {
    /// Whether any localization is declared.
    #[must_use]
    pub fn has_localizations(&self) -> bool {
        !self.localizations.is_empty()
    }
}

/// Dependencies a plugin declares on other plugins, keyed by plugin ID.
///
/// Values are whatever the reader extracted for the dependency, typically a
/// version requirement or a deployable reference.
pub type DependencyMapping = BTreeMap<PluginId, String>;

/// Result of dependency resolution for one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDependencies {
    /// Metadata of the resolved package.
    pub metadata: PluginMetadata,
    /// Dependency mapping, present only when the dependency policy covers
    /// the entry's classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<DependencyMapping>,
}
