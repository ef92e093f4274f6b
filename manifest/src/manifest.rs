//! The compiled manifest bundle and its entry points.

use plugin_manifest_core::{Plugin, PropertySchemaId, Schema, SchemaMap};
use serde::Serialize;

use crate::convert;
use crate::error::Result;
use crate::root::Root;

/// One compiled plugin plus every property schema it declares.
///
/// # Examples
///
/// ```
/// let yaml = br#"
/// id: aaa
/// version: 1.1.1
/// title: bbb
/// extensions:
///   - id: hoge
///     type: primitive
///     visualizer: cesium
/// "#;
///
/// let manifest = plugin_manifest::parse(yaml).unwrap();
/// assert_eq!(manifest.plugin().id().to_string(), "aaa#1.1.1");
/// assert_eq!(manifest.plugin().name().string(), "bbb");
/// assert_eq!(
///     manifest.extension_schema("hoge").unwrap().id().to_string(),
///     "aaa#1.1.1/hoge"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub(crate) plugin: Plugin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) schema: Option<Schema>,
    pub(crate) extension_schemas: Vec<Schema>,
}

impl Manifest {
    pub fn plugin(&self) -> &Plugin {
        &self.plugin
    }

    /// The plugin's own property schema.
    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    /// Extension schemas in extension declaration order.
    pub fn extension_schemas(&self) -> &[Schema] {
        &self.extension_schemas
    }

    /// Schema of the extension with id `ext`.
    pub fn extension_schema(&self, ext: &str) -> Option<&Schema> {
        let id = self.plugin.extension(ext)?.schema()?;
        self.extension_schemas.iter().find(|s| s.id() == id)
    }

    /// All schemas: the plugin's own first, then extension schemas in order.
    pub fn property_schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schema.iter().chain(self.extension_schemas.iter())
    }

    pub fn property_schema(&self, id: &PropertySchemaId) -> Option<&Schema> {
        self.property_schemas().find(|s| s.id() == id)
    }

    /// Every schema keyed by id.
    pub fn schema_map(&self) -> SchemaMap {
        self.property_schemas().cloned().collect()
    }

    /// Splits the bundle into the plugin and the list of all its schemas.
    pub fn into_parts(self) -> (Plugin, Vec<Schema>) {
        let schemas = self.schema.into_iter().chain(self.extension_schemas).collect();
        (self.plugin, schemas)
    }
}

/// Decodes a YAML (or JSON) manifest document.
///
/// # Errors
///
/// Returns [`ManifestError::Parse`](crate::ManifestError::Parse) if the
/// document cannot be decoded.
pub fn parse_root(source: &[u8]) -> Result<Root> {
    Ok(serde_yaml::from_slice(source)?)
}

/// Compiles a third-party manifest.
///
/// # Errors
///
/// Returns [`ManifestError::Parse`](crate::ManifestError::Parse) for an
/// undecodable document,
/// [`ManifestError::InvalidManifest`](crate::ManifestError::InvalidManifest)
/// for a structurally invalid one and
/// [`ManifestError::SystemManifest`](crate::ManifestError::SystemManifest) if
/// the document resolves to the official plugin id.
pub fn parse(source: &[u8]) -> Result<Manifest> {
    compile(&parse_root(source)?)
}

/// Compiles the bundled system plugin's manifest. Never use on uploaded
/// documents.
pub fn parse_system(source: &[u8]) -> Result<Manifest> {
    compile_system(&parse_root(source)?)
}

/// Compiles an already decoded document; see [`parse`].
pub fn compile(root: &Root) -> Result<Manifest> {
    convert::manifest(root, false)
}

/// Compiles an already decoded system document; see [`parse_system`].
pub fn compile_system(root: &Root) -> Result<Manifest> {
    convert::manifest(root, true)
}
