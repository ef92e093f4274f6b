//! The plugin aggregate.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{BuildError, Result};
use crate::extension::Extension;
use crate::i18n::I18nString;
use crate::id::{PluginId, PropertySchemaId};

/// A named, versioned bundle of extensions plus an optional top-level schema.
///
/// # Examples
///
/// ```
/// use plugin_manifest_core::*;
///
/// let id = PluginId::new("aaa", "1.1.1").unwrap();
/// let marker = Extension::builder()
///     .id("marker")
///     .extension_type(ExtensionType::Primitive)
///     .schema(PropertySchemaId::new(id.clone(), "marker").unwrap())
///     .must_build();
///
/// let plugin = Plugin::builder()
///     .id(id)
///     .name(I18nString::from_default("My plugin"))
///     .extensions(vec![marker])
///     .build()
///     .unwrap();
///
/// assert_eq!(plugin.id().to_string(), "aaa#1.1.1");
/// assert!(plugin.extension("marker").is_some());
/// assert_eq!(plugin.property_schemas().len(), 1);
///
/// assert!(Plugin::builder().build().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugin {
    id: PluginId,
    name: I18nString,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    description: I18nString,
    #[serde(skip_serializing_if = "Option::is_none")]
    repository_url: Option<String>,
    extensions: Vec<Extension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    schema: Option<PropertySchemaId>,
}

impl Plugin {
    pub fn builder() -> PluginBuilder {
        PluginBuilder::default()
    }

    pub fn id(&self) -> &PluginId {
        &self.id
    }

    pub fn name(&self) -> &I18nString {
        &self.name
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn description(&self) -> &I18nString {
        &self.description
    }

    pub fn repository_url(&self) -> Option<&str> {
        self.repository_url.as_deref()
    }

    /// Extensions in declaration order.
    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    pub fn extension(&self, id: &str) -> Option<&Extension> {
        self.extensions.iter().find(|e| e.id() == id)
    }

    pub fn extension_mut(&mut self, id: &str) -> Option<&mut Extension> {
        self.extensions.iter_mut().find(|e| e.id() == id)
    }

    /// The plugin's own (top-level) property schema.
    pub fn schema(&self) -> Option<&PropertySchemaId> {
        self.schema.as_ref()
    }

    /// Ids of every property schema this plugin references: its own schema
    /// first, then each extension's schema in extension order.
    pub fn property_schemas(&self) -> Vec<&PropertySchemaId> {
        self.schema
            .iter()
            .chain(self.extensions.iter().filter_map(Extension::schema))
            .collect()
    }

    /// Replaces the localized name. Used by the translation overlay.
    pub fn rename(&mut self, name: I18nString) {
        self.name = name;
    }

    /// Replaces the localized description. Used by the translation overlay.
    pub fn set_description(&mut self, description: I18nString) {
        self.description = description;
    }
}

/// Accumulates [`Plugin`] parts; invariants are checked in
/// [`build`](PluginBuilder::build).
#[derive(Debug, Clone, Default)]
pub struct PluginBuilder {
    id: Option<PluginId>,
    name: I18nString,
    author: Option<String>,
    description: I18nString,
    repository_url: Option<String>,
    extensions: Vec<Extension>,
    schema: Option<PropertySchemaId>,
}

impl PluginBuilder {
    pub fn id(mut self, id: PluginId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: I18nString) -> Self {
        self.name = name;
        self
    }

    pub fn author(mut self, author: Option<String>) -> Self {
        self.author = author.filter(|s| !s.is_empty());
        self
    }

    pub fn description(mut self, description: I18nString) -> Self {
        self.description = description;
        self
    }

    pub fn repository_url(mut self, url: Option<String>) -> Self {
        self.repository_url = url.filter(|s| !s.is_empty());
        self
    }

    pub fn extensions(mut self, extensions: Vec<Extension>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn schema(mut self, schema: Option<PropertySchemaId>) -> Self {
        self.schema = schema;
        self
    }

    /// Validates and builds the plugin.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingId`] without an id and
    /// [`BuildError::DuplicateExtension`] when two extensions share an id.
    pub fn build(self) -> Result<Plugin> {
        let id = self.id.ok_or(BuildError::MissingId("plugin"))?;

        let mut seen = HashSet::new();
        for ext in &self.extensions {
            if !seen.insert(ext.id().as_str()) {
                return Err(BuildError::DuplicateExtension(ext.id().to_string()));
            }
        }

        Ok(Plugin {
            id,
            name: self.name,
            author: self.author,
            description: self.description,
            repository_url: self.repository_url,
            extensions: self.extensions,
            schema: self.schema,
        })
    }

    /// Builds a plugin from data known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if [`build`](PluginBuilder::build) fails.
    pub fn must_build(self) -> Plugin {
        match self.build() {
            Ok(plugin) => plugin,
            Err(err) => panic!("invalid plugin: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ext(id: &str) -> Extension {
        Extension::builder().id(id).must_build()
    }

    #[test]
    fn test_plugin_requires_id() {
        assert_eq!(
            Plugin::builder().build().unwrap_err(),
            BuildError::MissingId("plugin")
        );
    }

    #[test]
    fn test_plugin_preserves_extension_order() {
        let plugin = Plugin::builder()
            .id(PluginId::official())
            .extensions(vec![ext("b"), ext("a"), ext("c")])
            .build()
            .unwrap();
        let ids: Vec<&str> = plugin.extensions().iter().map(|e| e.id().as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_plugin_rejects_duplicate_extensions() {
        let err = Plugin::builder()
            .id(PluginId::official())
            .extensions(vec![ext("a"), ext("a")])
            .build()
            .unwrap_err();
        assert_eq!(err, BuildError::DuplicateExtension("a".into()));
    }

    #[test]
    fn test_property_schemas_lists_plugin_schema_first() {
        let id = PluginId::official();
        let schema = |s: &str| PropertySchemaId::new(id.clone(), s).unwrap();
        let plugin = Plugin::builder()
            .id(id.clone())
            .schema(Some(schema("@")))
            .extensions(vec![
                Extension::builder().id("x").schema(schema("x")).must_build(),
                ext("no-schema"),
            ])
            .must_build();
        let ids: Vec<String> = plugin
            .property_schemas()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(ids, vec!["reearth/@", "reearth/x"]);
    }

    #[test]
    fn test_empty_author_is_absent() {
        let plugin = Plugin::builder()
            .id(PluginId::official())
            .author(Some(String::new()))
            .repository_url(Some("https://example.com".into()))
            .must_build();
        assert_eq!(plugin.author(), None);
        assert_eq!(plugin.repository_url(), Some("https://example.com"));
    }
}
