//! Schema fields, choices, UI hints and availability conditions.

use serde::Serialize;

use crate::error::{BuildError, Result};
use crate::i18n::I18nString;
use crate::id::SchemaFieldId;
use crate::value::{Value, ValueType};

/// Rule that activates a field or group only while a sibling field holds
/// `value`.
///
/// The value is coerced independently of the referenced field's type; a
/// condition whose value failed to coerce is kept with an empty value and is
/// never satisfied.
///
/// # Examples
///
/// ```
/// use plugin_manifest_core::{Condition, Value};
///
/// let cond = Condition::new("enabled", Some(Value::Bool(true)));
/// assert!(cond.is_satisfied_by(&Value::Bool(true)));
/// assert!(!cond.is_satisfied_by(&Value::Bool(false)));
///
/// let empty = Condition::new("enabled", None);
/// assert!(!empty.is_satisfied_by(&Value::Bool(true)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    field: SchemaFieldId,
    value: Option<Value>,
}

impl Condition {
    pub fn new(field: impl Into<SchemaFieldId>, value: Option<Value>) -> Self {
        Self {
            field: field.into(),
            value,
        }
    }

    pub fn field(&self) -> &SchemaFieldId {
        &self.field
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn is_satisfied_by(&self, current: &Value) -> bool {
        self.value.as_ref() == Some(current)
    }
}

/// One entry of an enumerated string field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaFieldChoice {
    key: String,
    title: I18nString,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
}

impl SchemaFieldChoice {
    pub fn new(key: impl Into<String>, title: I18nString, icon: Option<String>) -> Self {
        Self {
            key: key.into(),
            title,
            icon,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> &I18nString {
        &self.title
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Replaces the localized label. Used by the translation overlay.
    pub fn set_title(&mut self, title: I18nString) {
        self.title = title;
    }
}

keyword_enum!(
    /// Editor hint for rendering a field.
    SchemaFieldUi, "field ui", {
        Layer => "layer",
        Multiline => "multiline",
        Selection => "selection",
        Color => "color",
        Range => "range",
        Slider => "slider",
        Image => "image",
        Video => "video",
        File => "file",
        CameraPose => "camera_pose",
        Datetime => "datetime",
    }
);

/// A typed, configurable value slot inside a [`SchemaGroup`](crate::SchemaGroup).
///
/// Built through [`SchemaField::builder`]; the type is fixed once built and
/// the default value, if any, is guaranteed to match it.
///
/// # Examples
///
/// ```
/// use plugin_manifest_core::{I18nString, SchemaField, Value, ValueType};
///
/// let field = SchemaField::builder()
///     .id("size")
///     .value_type(ValueType::Number)
///     .title(I18nString::from_default("Size"))
///     .default_value(Some(Value::Number(10.0)))
///     .min(Some(0.0))
///     .build()
///     .unwrap();
///
/// assert_eq!(field.id(), "size");
/// assert_eq!(field.min(), Some(0.0));
/// assert_eq!(field.default_value(), Some(&Value::Number(10.0)));
///
/// // A default of the wrong kind is rejected.
/// assert!(SchemaField::builder()
///     .id("size")
///     .value_type(ValueType::Number)
///     .default_value(Some(Value::Bool(true)))
///     .build()
///     .is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    id: SchemaFieldId,
    #[serde(rename = "type")]
    value_type: ValueType,
    title: I18nString,
    description: I18nString,
    #[serde(skip_serializing_if = "Option::is_none")]
    prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    choices: Vec<SchemaFieldChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ui: Option<SchemaFieldUi>,
    #[serde(skip_serializing_if = "Option::is_none")]
    available_if: Option<Condition>,
}

impl SchemaField {
    pub fn builder() -> SchemaFieldBuilder {
        SchemaFieldBuilder::default()
    }

    pub fn id(&self) -> &SchemaFieldId {
        &self.id
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn title(&self) -> &I18nString {
        &self.title
    }

    pub fn description(&self) -> &I18nString {
        &self.description
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    /// Advisory lower bound; only set on `number` fields.
    pub fn min(&self) -> Option<f64> {
        self.min
    }

    /// Advisory upper bound; only set on `number` fields.
    pub fn max(&self) -> Option<f64> {
        self.max
    }

    pub fn choices(&self) -> &[SchemaFieldChoice] {
        &self.choices
    }

    pub fn choice(&self, key: &str) -> Option<&SchemaFieldChoice> {
        self.choices.iter().find(|c| c.key == key)
    }

    pub fn choice_mut(&mut self, key: &str) -> Option<&mut SchemaFieldChoice> {
        self.choices.iter_mut().find(|c| c.key == key)
    }

    pub fn ui(&self) -> Option<SchemaFieldUi> {
        self.ui
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

/// Accumulates [`SchemaField`] parts; invariants are checked in
/// [`build`](SchemaFieldBuilder::build).
#[derive(Debug, Clone, Default)]
pub struct SchemaFieldBuilder {
    id: Option<SchemaFieldId>,
    value_type: Option<ValueType>,
    title: I18nString,
    description: I18nString,
    prefix: Option<String>,
    suffix: Option<String>,
    default_value: Option<Value>,
    min: Option<f64>,
    max: Option<f64>,
    choices: Vec<SchemaFieldChoice>,
    ui: Option<SchemaFieldUi>,
    available_if: Option<Condition>,
}

impl SchemaFieldBuilder {
    pub fn id(mut self, id: impl Into<SchemaFieldId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
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

    pub fn prefix(mut self, prefix: Option<String>) -> Self {
        self.prefix = prefix.filter(|s| !s.is_empty());
        self
    }

    pub fn suffix(mut self, suffix: Option<String>) -> Self {
        self.suffix = suffix.filter(|s| !s.is_empty());
        self
    }

    pub fn default_value(mut self, value: Option<Value>) -> Self {
        self.default_value = value;
        self
    }

    pub fn min(mut self, min: Option<f64>) -> Self {
        self.min = min;
        self
    }

    pub fn max(mut self, max: Option<f64>) -> Self {
        self.max = max;
        self
    }

    pub fn choices(mut self, choices: Vec<SchemaFieldChoice>) -> Self {
        self.choices = choices;
        self
    }

    pub fn ui(mut self, ui: Option<SchemaFieldUi>) -> Self {
        self.ui = ui;
        self
    }

    pub fn available_if(mut self, condition: Option<Condition>) -> Self {
        self.available_if = condition;
        self
    }

    /// Validates and builds the field.
    ///
    /// Bounds are dropped unless the type is `number`, and choices are dropped
    /// unless the type is `string`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingId`] without an id,
    /// [`BuildError::MissingValueType`] without a type, and
    /// [`BuildError::InvalidDefaultValue`] when the default value's kind differs
    /// from the field type.
    pub fn build(self) -> Result<SchemaField> {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .ok_or(BuildError::MissingId("field"))?;
        let value_type = self.value_type.ok_or(BuildError::MissingValueType)?;
        if let Some(dv) = &self.default_value {
            if dv.value_type() != value_type {
                return Err(BuildError::InvalidDefaultValue(id.to_string()));
            }
        }

        let numeric = value_type == ValueType::Number;
        let enumerable = value_type == ValueType::String;

        Ok(SchemaField {
            id,
            value_type,
            title: self.title,
            description: self.description,
            prefix: self.prefix,
            suffix: self.suffix,
            default_value: self.default_value,
            min: self.min.filter(|_| numeric),
            max: self.max.filter(|_| numeric),
            choices: if enumerable { self.choices } else { Vec::new() },
            ui: self.ui,
            available_if: self.available_if,
        })
    }

    /// Builds a field from data known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if [`build`](SchemaFieldBuilder::build) fails. Never use on
    /// externally sourced input.
    pub fn must_build(self) -> SchemaField {
        match self.build() {
            Ok(field) => field,
            Err(err) => panic!("invalid schema field: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_requires_id_and_type() {
        assert_eq!(
            SchemaField::builder()
                .value_type(ValueType::Bool)
                .build()
                .unwrap_err(),
            BuildError::MissingId("field")
        );
        assert_eq!(
            SchemaField::builder().id("a").build().unwrap_err(),
            BuildError::MissingValueType
        );
    }

    #[test]
    fn test_bool_default_value() {
        let field = SchemaField::builder()
            .id("visible")
            .value_type(ValueType::Bool)
            .default_value(Some(Value::Bool(true)))
            .build()
            .unwrap();
        assert_eq!(field.default_value(), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_bounds_kept_only_for_numbers() {
        let field = SchemaField::builder()
            .id("name")
            .value_type(ValueType::String)
            .min(Some(1.0))
            .max(Some(2.0))
            .build()
            .unwrap();
        assert_eq!(field.min(), None);
        assert_eq!(field.max(), None);
    }

    #[test]
    fn test_choices_kept_only_for_strings() {
        let choice = SchemaFieldChoice::new("a", I18nString::from_default("A"), None);
        let string_field = SchemaField::builder()
            .id("mode")
            .value_type(ValueType::String)
            .choices(vec![choice.clone()])
            .build()
            .unwrap();
        assert_eq!(string_field.choice("a").unwrap().title().string(), "A");

        let number_field = SchemaField::builder()
            .id("mode")
            .value_type(ValueType::Number)
            .choices(vec![choice])
            .build()
            .unwrap();
        assert!(number_field.choices().is_empty());
    }

    #[test]
    fn test_ui_keywords() {
        assert_eq!(
            "camera_pose".parse::<SchemaFieldUi>().unwrap(),
            SchemaFieldUi::CameraPose
        );
        assert!("slider2".parse::<SchemaFieldUi>().is_err());
    }

    #[test]
    fn test_ui_serializes_as_keyword() {
        for &ui in SchemaFieldUi::ALL {
            assert_eq!(ui.as_str().parse::<SchemaFieldUi>().unwrap(), ui);
            assert_eq!(serde_json::to_value(ui).unwrap(), ui.as_str());
        }
        assert_eq!(
            serde_json::to_value(SchemaFieldUi::CameraPose).unwrap(),
            "camera_pose"
        );
    }

    #[test]
    #[should_panic(expected = "invalid schema field")]
    fn test_must_build_panics_on_invalid_field() {
        SchemaField::builder().id("x").must_build();
    }
}
