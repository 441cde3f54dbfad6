//! Flattening of plugin translations into the host's global namespace.
//!
//! Every translated string lands under `"{plugin_id}/{scope}/{key}"`, where
//! `scope` is reduced to its last `/`-separated segment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::manifest::Localization;

/// A language pack in the host's global translation namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalLocalization {
    /// BCP 47 language ID.
    pub language_id: String,
    /// English name of the language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_name: Option<String>,
    /// Name of the language in the language itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localized_language_name: Option<String>,
    /// Always `true` for localizations contributed by plugins.
    pub language_pack: bool,
    /// Flat `plugin/scope/key -> string` map.
    pub translations: BTreeMap<String, String>,
}

/// Build the global key for one translated string.
///
/// ```
/// use plugdeck_deploy::localization::translation_key;
///
/// assert_eq!(
///     translation_key("acme.tools", "vendor/pkg/messages", "hello"),
///     "acme.tools/messages/hello"
/// );
/// ```
#[must_use]
pub fn translation_key(plugin_id: &str, scope: &str, key: &str) -> String {
    let scope = scope.rsplit_once('/').map_or(scope, |(_, base)| base);
    format!("{plugin_id}/{scope}/{key}")
}

/// Merge contributed localizations into global language packs.
///
/// Produces one output per input, in input order. Scopes whose last segment
/// collide overwrite each other; the later one wins, with translation units
/// visited in declaration order and scopes in lexicographic order.
#[must_use]
pub fn merge_localizations(localizations: &[Localization]) -> Vec<GlobalLocalization> {
    localizations
        .iter()
        .map(|localization| {
            let mut translations = BTreeMap::new();
            for translation in &localization.translations {
                for (scope, entries) in &translation.contents {
                    for (key, value) in entries {
                        translations
                            .insert(translation_key(&translation.id, scope, key), value.clone());
                    }
                }
            }
            GlobalLocalization {
                language_id: localization.language_id.clone(),
                language_name: localization.language_name.clone(),
                localized_language_name: localization.localized_language_name.clone(),
                language_pack: true,
                translations,
            }
        })
        .collect()
}
