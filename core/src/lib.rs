//! Plugin and property-schema model.
//!
//! This crate defines the in-memory object graph a compiled plugin manifest
//! turns into:
//!
//! - [`Plugin`] — aggregate root: id, localized metadata, ordered
//!   [`Extension`]s and an optional top-level schema reference.
//! - [`Extension`] — one capability (primitive, widget, block, visualizer,
//!   infobox, cluster) with its own property schema and optional
//!   [`WidgetLayout`].
//! - [`Schema`] → [`SchemaGroup`] → [`SchemaField`] — typed, declarative
//!   description of configurable values, with [`Condition`]s, choices and
//!   [`LinkableFields`].
//! - [`PluginId`] / [`PropertySchemaId`] — namespaced identifiers.
//! - [`Value`] / [`ValueType`] — typed values with lenient coercion.
//!
//! Every entity is created through a builder whose `build()` checks the
//! entity's invariants in one place; `must_build()` is reserved for data known
//! to be valid. After construction the graph is read-only apart from the
//! localized-string setters used by the translation overlay.
//!
//! # Example
//!
//! ```
//! use plugin_manifest_core::*;
//!
//! let plugin_id = PluginId::new("aaa", "1.1.1").unwrap();
//! let schema_id = PropertySchemaId::new(plugin_id.clone(), "hoge").unwrap();
//!
//! let field = SchemaField::builder()
//!     .id("visible")
//!     .value_type(ValueType::Bool)
//!     .default_value(ValueType::Bool.parse("true"))
//!     .must_build();
//! let schema = Schema::builder()
//!     .id(schema_id.clone())
//!     .group(SchemaGroup::builder().id("default").field(field).must_build())
//!     .must_build();
//!
//! let plugin = Plugin::builder()
//!     .id(plugin_id)
//!     .extensions(vec![Extension::builder()
//!         .id("hoge")
//!         .visualizer(Some(Visualizer::Cesium))
//!         .schema(schema_id)
//!         .must_build()])
//!     .must_build();
//!
//! let ext = plugin.extension("hoge").unwrap();
//! assert_eq!(ext.schema(), Some(schema.id()));
//! assert_eq!(
//!     schema.field("visible").unwrap().default_value(),
//!     Some(&Value::Bool(true))
//! );
//! ```

#[macro_use]
mod macros;

mod error;
mod extension;
mod field;
mod group;
mod i18n;
mod id;
mod plugin;
mod schema;
mod value;
mod widget;

pub use error::BuildError;
pub use extension::{Extension, ExtensionBuilder, ExtensionType, Visualizer};
pub use field::{Condition, SchemaField, SchemaFieldBuilder, SchemaFieldChoice, SchemaFieldUi};
pub use group::{SchemaGroup, SchemaGroupBuilder};
pub use i18n::{DEFAULT_LANG, I18nString};
pub use id::{
    ExtensionId, OFFICIAL_PLUGIN_NAME, PluginId, PropertySchemaId, SCHEMA_SEPARATOR,
    SchemaFieldId, SchemaGroupId, VERSION_SEPARATOR,
};
pub use plugin::{Plugin, PluginBuilder};
pub use schema::{LinkableFields, Schema, SchemaBuilder, SchemaFieldPointer, SchemaMap};
pub use value::{LatLng, LatLngHeight, Value, ValueType};
pub use widget::{WidgetArea, WidgetLayout, WidgetLocation, WidgetSection, WidgetZone};
