//! Schema groups: ordered collections of fields.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{BuildError, Result};
use crate::field::{Condition, SchemaField};
use crate::i18n::I18nString;
use crate::id::{SchemaFieldId, SchemaGroupId};

/// A titled group of fields, optionally repeated as a list.
///
/// Fields keep declaration order and are unique by id. A list group may name
/// a representative field that editors show as the label of each item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaGroup {
    id: SchemaGroupId,
    title: I18nString,
    description: I18nString,
    fields: Vec<SchemaField>,
    is_list: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    representative_field: Option<SchemaFieldId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    available_if: Option<Condition>,
}

impl SchemaGroup {
    pub fn builder() -> SchemaGroupBuilder {
        SchemaGroupBuilder::default()
    }

    pub fn id(&self) -> &SchemaGroupId {
        &self.id
    }

    pub fn title(&self) -> &I18nString {
        &self.title
    }

    pub fn description(&self) -> &I18nString {
        &self.description
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.id() == id)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut SchemaField> {
        self.fields.iter_mut().find(|f| f.id() == id)
    }

    pub fn has_field(&self, id: &str) -> bool {
        self.field(id).is_some()
    }

    pub fn is_list(&self) -> bool {
        self.is_list
    }

    pub fn representative_field_id(&self) -> Option<&SchemaFieldId> {
        self.representative_field.as_ref()
    }

    pub fn representative_field(&self) -> Option<&SchemaField> {
        self.representative_field
            .as_ref()
            .and_then(|id| self.field(id.as_str()))
    }

    pub fn is_available_if(&self) -> Option<&Condition> {
        self.available_if.as_ref()
    }

    /// Replaces the localized title. Used by the translation overlay.
    pub fn set_title(&mut self, title: I18nString) {
        self.title = title;
    }

    /// Replaces the localized description. Used by the translation overlay.
    pub fn set_description(&mut self, description: I18nString) {
        self.description = description;
    }
}

/// Accumulates [`SchemaGroup`] parts; invariants are checked in
/// [`build`](SchemaGroupBuilder::build).
#[derive(Debug, Clone, Default)]
pub struct SchemaGroupBuilder {
    id: Option<SchemaGroupId>,
    title: I18nString,
    description: I18nString,
    fields: Vec<SchemaField>,
    is_list: bool,
    representative_field: Option<SchemaFieldId>,
    available_if: Option<Condition>,
}

impl SchemaGroupBuilder {
    pub fn id(mut self, id: impl Into<SchemaGroupId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: I18nString) -> Self {
        self.title = title;
        self
    }

    pub fn description(mut self, description: I18nString) -> Self {
        self.description = description;
        self
    }

    pub fn fields(mut self, fields: Vec<SchemaField>) -> Self {
        self.fields = fields;
        self
    }

    pub fn field(mut self, field: SchemaField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn is_list(mut self, is_list: bool) -> Self {
        self.is_list = is_list;
        self
    }

    pub fn representative_field(mut self, id: Option<SchemaFieldId>) -> Self {
        self.representative_field = id.filter(|id| !id.is_empty());
        self
    }

    pub fn available_if(mut self, condition: Option<Condition>) -> Self {
        self.available_if = condition;
        self
    }

    /// Validates and builds the group.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingId`] without an id,
    /// [`BuildError::DuplicateField`] when two fields share an id, and
    /// [`BuildError::InvalidRepresentativeField`] when the representative field
    /// is not one of the group's fields.
    pub fn build(self) -> Result<SchemaGroup> {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .ok_or(BuildError::MissingId("group"))?;

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.id().as_str()) {
                return Err(BuildError::DuplicateField(field.id().to_string()));
            }
        }

        if let Some(rep) = &self.representative_field {
            if !seen.contains(rep.as_str()) {
                return Err(BuildError::InvalidRepresentativeField(rep.to_string()));
            }
        }

        Ok(SchemaGroup {
            id,
            title: self.title,
            description: self.description,
            fields: self.fields,
            is_list: self.is_list,
            representative_field: self.representative_field,
            available_if: self.available_if,
        })
    }

    /// Builds a group from data known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if [`build`](SchemaGroupBuilder::build) fails.
    pub fn must_build(self) -> SchemaGroup {
        match self.build() {
            Ok(group) => group,
            Err(err) => panic!("invalid schema group: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueType;

    fn field(id: &str) -> SchemaField {
        SchemaField::builder()
            .id(id)
            .value_type(ValueType::String)
            .must_build()
    }

    #[test]
    fn test_group_preserves_field_order() {
        let group = SchemaGroup::builder()
            .id("default")
            .fields(vec![field("c"), field("a"), field("b")])
            .build()
            .unwrap();
        let ids: Vec<&str> = group.fields().iter().map(|f| f.id().as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert!(group.has_field("a"));
        assert!(!group.has_field("z"));
    }

    #[test]
    fn test_group_rejects_duplicate_fields() {
        let err = SchemaGroup::builder()
            .id("default")
            .fields(vec![field("a"), field("a")])
            .build()
            .unwrap_err();
        assert_eq!(err, BuildError::DuplicateField("a".into()));
    }

    #[test]
    fn test_representative_field_must_exist() {
        let err = SchemaGroup::builder()
            .id("items")
            .is_list(true)
            .field(field("title"))
            .representative_field(Some("name".into()))
            .build()
            .unwrap_err();
        assert_eq!(err, BuildError::InvalidRepresentativeField("name".into()));

        let group = SchemaGroup::builder()
            .id("items")
            .is_list(true)
            .field(field("title"))
            .representative_field(Some("title".into()))
            .build()
            .unwrap();
        assert_eq!(group.representative_field().unwrap().id(), "title");
    }

    #[test]
    fn test_group_requires_id() {
        assert_eq!(
            SchemaGroup::builder().build().unwrap_err(),
            BuildError::MissingId("group")
        );
    }
}
