//! Translation overlays.
//!
//! A translation document mirrors the manifest's shape for one language, but
//! every leaf is optional and entities are keyed by id:
//!
//! ```yaml
//! title: プラグイン
//! extensions:
//!   marker:
//!     title: マーカー
//!     schema:
//!       default:
//!         title: 基本
//!         fields:
//!           mode:
//!             title: モード
//!             choices:
//!               a: エー
//! schema:
//!   default:
//!     title: 設定
//! ```
//!
//! Merging sets the language's entry on each targeted localized string and
//! leaves every other language untouched. Patches that point at missing
//! extensions, groups, fields or choices are skipped.

use std::collections::BTreeMap;

use plugin_manifest_core::{I18nString, Schema};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ManifestError, Result};
use crate::manifest::Manifest;

/// Translation documents keyed by language tag.
pub type TranslationMap = BTreeMap<String, TranslationRoot>;

/// Group patches keyed by group id.
pub type TranslationSchema = BTreeMap<String, TranslationGroup>;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TranslationRoot {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub extensions: BTreeMap<String, TranslationExtension>,
    #[serde(default)]
    pub schema: TranslationSchema,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TranslationExtension {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub schema: TranslationSchema,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TranslationGroup {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, TranslationField>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TranslationField {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Choice labels keyed by choice key.
    #[serde(default)]
    pub choices: BTreeMap<String, String>,
}

/// Decodes one language's translation document.
///
/// # Errors
///
/// Returns [`ManifestError::Translation`] if the document cannot be decoded.
pub fn parse_translation(source: &[u8]) -> Result<TranslationRoot> {
    serde_yaml::from_slice(source).map_err(ManifestError::Translation)
}

/// Applies every language's patch to `manifest`.
///
/// Applying the same map twice leaves the manifest as applying it once.
///
/// # Examples
///
/// ```
/// use plugin_manifest::{TranslationMap, merge_translations, parse, parse_translation};
///
/// let mut manifest = parse(b"{id: aaa, version: 1.1.1, title: Plugin}").unwrap();
///
/// let mut translations = TranslationMap::new();
/// let ja = parse_translation("title: プラグイン".as_bytes()).unwrap();
/// translations.insert("ja".to_string(), ja);
/// merge_translations(&mut manifest, &translations);
///
/// let name = manifest.plugin().name();
/// assert_eq!(name.get("ja"), Some("プラグイン"));
/// assert_eq!(name.get("en"), Some("Plugin"));
/// ```
pub fn merge_translations(manifest: &mut Manifest, translations: &TranslationMap) {
    for (lang, patch) in translations {
        merge(manifest, lang, patch);
    }
    info!(
        plugin = %manifest.plugin.id(),
        languages = translations.len(),
        "merged plugin translations"
    );
}

fn merge(manifest: &mut Manifest, lang: &str, patch: &TranslationRoot) {
    let plugin = &mut manifest.plugin;
    if let Some(name) = overlay(plugin.name(), lang, patch.title.as_deref()) {
        plugin.rename(name);
    }
    if let Some(desc) = overlay(plugin.description(), lang, patch.description.as_deref()) {
        plugin.set_description(desc);
    }

    for (ext_id, ext_patch) in &patch.extensions {
        let Some(ext) = plugin.extension_mut(ext_id) else {
            debug!(lang, extension = %ext_id, "translation targets missing extension");
            continue;
        };
        if let Some(name) = overlay(ext.name(), lang, ext_patch.title.as_deref()) {
            ext.rename(name);
        }
        if let Some(desc) = overlay(ext.description(), lang, ext_patch.description.as_deref()) {
            ext.set_description(desc);
        }

        if ext_patch.schema.is_empty() {
            continue;
        }
        let Some(schema_id) = ext.schema().cloned() else {
            continue;
        };
        if let Some(schema) = manifest
            .extension_schemas
            .iter_mut()
            .find(|s| s.id() == &schema_id)
        {
            merge_schema(schema, lang, &ext_patch.schema);
        }
    }

    if !patch.schema.is_empty() {
        match manifest.schema.as_mut() {
            Some(schema) => merge_schema(schema, lang, &patch.schema),
            None => debug!(lang, "translation targets missing plugin schema"),
        }
    }
}

fn merge_schema(schema: &mut Schema, lang: &str, patch: &TranslationSchema) {
    for (group_id, group_patch) in patch {
        let Some(group) = schema.group_mut(group_id) else {
            debug!(lang, group = %group_id, "translation targets missing group");
            continue;
        };
        if let Some(title) = overlay(group.title(), lang, group_patch.title.as_deref()) {
            group.set_title(title);
        }
        let desc = group_patch.description.as_deref();
        if let Some(desc) = overlay(group.description(), lang, desc) {
            group.set_description(desc);
        }

        for (field_id, field_patch) in &group_patch.fields {
            let Some(field) = group.field_mut(field_id) else {
                debug!(
                    lang,
                    group = %group_id,
                    field = %field_id,
                    "translation targets missing field"
                );
                continue;
            };
            if let Some(title) = overlay(field.title(), lang, field_patch.title.as_deref()) {
                field.set_title(title);
            }
            let desc = field_patch.description.as_deref();
            if let Some(desc) = overlay(field.description(), lang, desc) {
                field.set_description(desc);
            }
            for (key, label) in &field_patch.choices {
                let Some(choice) = field.choice_mut(key) else {
                    debug!(
                        lang,
                        field = %field_id,
                        choice = %key,
                        "translation targets missing choice"
                    );
                    continue;
                };
                if let Some(title) = overlay(choice.title(), lang, Some(label.as_str())) {
                    choice.set_title(title);
                }
            }
        }
    }
}

/// Copy of `current` with `lang` set to `value`, or `None` when the patch
/// leaves the string alone.
fn overlay(current: &I18nString, lang: &str, value: Option<&str>) -> Option<I18nString> {
    let value = value.filter(|v| !v.is_empty())?;
    let mut next = current.clone();
    next.set(lang, value);
    Some(next)
}
