//! Property schemas and keyed schema collections.
//!
//! A [`Schema`] describes every configurable value of a plugin or extension:
//! an ordered list of [`SchemaGroup`]s, each holding ordered
//! [`SchemaField`]s. Linkable fields point at the well-known lat/lng and URL
//! fields that other platform features bind to.
//!
//! # Examples
//!
//! ```
//! use plugin_manifest_core::*;
//!
//! let id = PropertySchemaId::new(PluginId::new("aaa", "1.1.1").unwrap(), "marker").unwrap();
//! let location = SchemaField::builder()
//!     .id("location")
//!     .value_type(ValueType::LatLng)
//!     .must_build();
//! let group = SchemaGroup::builder().id("default").field(location).must_build();
//!
//! let schema = Schema::builder()
//!     .id(id)
//!     .group(group)
//!     .linkable_fields(LinkableFields {
//!         latlng: Some(SchemaFieldPointer::new(Some("default".into()), "location")),
//!         url: None,
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.id().to_string(), "aaa#1.1.1/marker");
//! assert!(schema.field("location").is_some());
//! assert_eq!(schema.group_by_field("location").unwrap().id(), "default");
//! ```

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::{BuildError, Result};
use crate::field::SchemaField;
use crate::group::SchemaGroup;
use crate::id::{PropertySchemaId, SchemaFieldId, SchemaGroupId};
use crate::value::ValueType;

/// Structural pointer to a field, optionally qualified by its group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaFieldPointer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<SchemaGroupId>,
    pub field: SchemaFieldId,
}

impl SchemaFieldPointer {
    pub fn new(group: Option<SchemaGroupId>, field: impl Into<SchemaFieldId>) -> Self {
        Self {
            group,
            field: field.into(),
        }
    }
}

/// Pointers to the fields that carry a schema's position and link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkableFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latlng: Option<SchemaFieldPointer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<SchemaFieldPointer>,
}

impl LinkableFields {
    pub fn is_empty(&self) -> bool {
        self.latlng.is_none() && self.url.is_none()
    }

    fn validate(&self, groups: &[SchemaGroup]) -> Result<()> {
        let checks = [
            ("latlng", &self.latlng, ValueType::LatLng),
            ("url", &self.url, ValueType::Url),
        ];
        for (name, pointer, expected) in checks {
            let Some(pointer) = pointer else {
                continue;
            };
            let resolved = resolve_pointer(groups, pointer);
            if resolved.map(SchemaField::value_type) != Some(expected) {
                return Err(BuildError::InvalidLinkableField(name));
            }
        }
        Ok(())
    }
}

fn resolve_pointer<'a>(
    groups: &'a [SchemaGroup],
    pointer: &SchemaFieldPointer,
) -> Option<&'a SchemaField> {
    let field = pointer.field.as_str();
    match &pointer.group {
        Some(group) => groups
            .iter()
            .find(|g| g.id() == group)
            .and_then(|g| g.field(field)),
        None => groups.iter().find_map(|g| g.field(field)),
    }
}

/// A versioned property schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    id: PropertySchemaId,
    version: u32,
    groups: Vec<SchemaGroup>,
    #[serde(skip_serializing_if = "LinkableFields::is_empty")]
    linkable_fields: LinkableFields,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn id(&self) -> &PropertySchemaId {
        &self.id
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn groups(&self) -> &[SchemaGroup] {
        &self.groups
    }

    pub fn group(&self, id: &str) -> Option<&SchemaGroup> {
        self.groups.iter().find(|g| g.id() == id)
    }

    pub fn group_mut(&mut self, id: &str) -> Option<&mut SchemaGroup> {
        self.groups.iter_mut().find(|g| g.id() == id)
    }

    /// Group containing the first field named `field`.
    pub fn group_by_field(&self, field: &str) -> Option<&SchemaGroup> {
        self.groups.iter().find(|g| g.has_field(field))
    }

    /// First field named `field` in any group.
    pub fn field(&self, field: &str) -> Option<&SchemaField> {
        self.groups.iter().find_map(|g| g.field(field))
    }

    pub fn linkable_fields(&self) -> &LinkableFields {
        &self.linkable_fields
    }

    /// Resolves a pointer against this schema's groups.
    pub fn field_by_pointer(&self, pointer: &SchemaFieldPointer) -> Option<&SchemaField> {
        resolve_pointer(&self.groups, pointer)
    }
}

/// Accumulates [`Schema`] parts; invariants are checked in
/// [`build`](SchemaBuilder::build).
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    id: Option<PropertySchemaId>,
    version: u32,
    groups: Vec<SchemaGroup>,
    linkable_fields: LinkableFields,
}

impl SchemaBuilder {
    pub fn id(mut self, id: PropertySchemaId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn groups(mut self, groups: Vec<SchemaGroup>) -> Self {
        self.groups = groups;
        self
    }

    pub fn group(mut self, group: SchemaGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn linkable_fields(mut self, linkable: LinkableFields) -> Self {
        self.linkable_fields = linkable;
        self
    }

    /// Validates and builds the schema.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingId`] without an id,
    /// [`BuildError::DuplicateGroup`] when two groups share an id, and
    /// [`BuildError::InvalidLinkableField`] when a linkable pointer does not
    /// resolve to a field of the matching type.
    pub fn build(self) -> Result<Schema> {
        let id = self.id.ok_or(BuildError::MissingId("property schema"))?;

        let mut seen = HashSet::new();
        for group in &self.groups {
            if !seen.insert(group.id().as_str()) {
                return Err(BuildError::DuplicateGroup(group.id().to_string()));
            }
        }
        self.linkable_fields.validate(&self.groups)?;

        Ok(Schema {
            id,
            version: self.version,
            groups: self.groups,
            linkable_fields: self.linkable_fields,
        })
    }

    /// Builds a schema from data known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if [`build`](SchemaBuilder::build) fails.
    pub fn must_build(self) -> Schema {
        match self.build() {
            Ok(schema) => schema,
            Err(err) => panic!("invalid property schema: {err}"),
        }
    }
}

/// Schemas keyed by id.
///
/// Materializing back into a list sorts by id string, descending, so
/// iteration order never depends on hashing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaMap(HashMap<PropertySchemaId, Schema>);

impl SchemaMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `schema`, returning any schema previously stored under its id.
    pub fn insert(&mut self, schema: Schema) -> Option<Schema> {
        self.0.insert(schema.id().clone(), schema)
    }

    pub fn get(&self, id: &PropertySchemaId) -> Option<&Schema> {
        self.0.get(id)
    }

    pub fn get_mut(&mut self, id: &PropertySchemaId) -> Option<&mut Schema> {
        self.0.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All schemas sorted by id string, descending.
    pub fn list(&self) -> Vec<&Schema> {
        let mut schemas: Vec<(String, &Schema)> = self
            .0
            .values()
            .map(|s| (s.id().to_string(), s))
            .collect();
        schemas.sort_by(|a, b| b.0.cmp(&a.0));
        schemas.into_iter().map(|(_, s)| s).collect()
    }

    /// Consumes the map into a list sorted by id string, descending.
    pub fn into_list(self) -> Vec<Schema> {
        let mut schemas: Vec<Schema> = self.0.into_values().collect();
        schemas.sort_by_cached_key(|s| std::cmp::Reverse(s.id().to_string()));
        schemas
    }
}

impl FromIterator<Schema> for SchemaMap {
    fn from_iter<T: IntoIterator<Item = Schema>>(iter: T) -> Self {
        let mut map = Self::new();
        for schema in iter {
            map.insert(schema);
        }
        map
    }
}
