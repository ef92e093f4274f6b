//! Plugin manifest compiler.
//!
//! Turns a declarative plugin manifest (YAML or JSON) into the validated
//! [`plugin_manifest_core`] model and applies per-language translation
//! overlays to the result.
//!
//! - [`parse`] / [`compile`] compile third-party manifests and reject any
//!   document that resolves to the official plugin id.
//! - [`parse_system`] / [`compile_system`] compile the bundled system plugin.
//! - [`parse_translation`] / [`merge_translations`] overlay localized strings.
//!
//! Compilation is all-or-nothing: any error rejects the whole document.
//! Tolerated authoring looseness is logged through `tracing` at debug level
//! and never returned.
//!
//! # Example
//!
//! ```
//! use plugin_manifest::{ManifestError, parse};
//! use plugin_manifest_core::{ExtensionType, Value};
//!
//! let manifest = parse(br#"
//! id: aaa
//! version: 1.1.1
//! extensions:
//!   - id: hoge
//!     type: primitive
//!     visualizer: cesium
//!     schema:
//!       groups:
//!         - id: default
//!           fields:
//!             - id: visible
//!               type: bool
//!               defaultValue: true
//! "#).unwrap();
//!
//! let ext = manifest.plugin().extension("hoge").unwrap();
//! assert_eq!(ext.extension_type(), ExtensionType::Primitive);
//! let field = manifest.extension_schema("hoge").unwrap().field("visible").unwrap();
//! assert_eq!(field.default_value(), Some(&Value::Bool(true)));
//!
//! let err = parse(b"{id: aaa, version: 1.1.1, extensions: [{id: x, type: infobox}]}");
//! assert!(matches!(err, Err(ManifestError::InvalidManifest(_))));
//! ```

mod convert;
mod error;
mod manifest;
mod root;
mod translation;

pub use convert::PLUGIN_SCHEMA_ID;
pub use error::{ManifestError, Result};
pub use manifest::{Manifest, compile, compile_system, parse, parse_root, parse_system};
pub use root::{
    ChoiceSpec, ConditionSpec, ExtendableSpec, ExtensionSpec, FieldSpec, GroupSpec, LinkableSpec,
    LocationSpec, PointerSpec, PropertySchemaSpec, Root, WidgetLayoutSpec,
};
pub use translation::{
    TranslationExtension, TranslationField, TranslationGroup, TranslationMap, TranslationRoot,
    TranslationSchema, merge_translations, parse_translation,
};
