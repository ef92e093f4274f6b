//! Raw manifest document structures.
//!
//! These mirror the document exactly as written and carry no invariants;
//! they exist only until [`compile`](crate::compile) turns them into the
//! model. Every optional key is an `Option` so "absent" stays distinct from a
//! zero value.
//!
//! # Example YAML
//!
//! ```yaml
//! id: aaa
//! version: 1.1.1
//! title: bbb
//! schema:
//!   groups:
//!     - id: default
//!       fields:
//!         - id: apiKey
//!           type: string
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
//! ```

use serde::{Deserialize, Serialize};

/// Top-level manifest document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Root {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub version: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub repository: Option<String>,
    #[serde(default)]
    pub system: bool,
    pub schema: Option<PropertySchemaSpec>,
    #[serde(default)]
    pub extensions: Vec<ExtensionSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionSpec {
    #[serde(default)]
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    #[serde(rename = "type")]
    pub extension_type: Option<String>,
    pub visualizer: Option<String>,
    #[serde(default)]
    pub single_only: bool,
    pub widget_layout: Option<WidgetLayoutSpec>,
    pub schema: Option<PropertySchemaSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetLayoutSpec {
    pub extendable: Option<ExtendableSpec>,
    #[serde(default)]
    pub extended: bool,
    #[serde(default)]
    pub floating: bool,
    pub default_location: Option<LocationSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ExtendableSpec {
    #[serde(default)]
    pub horizontally: bool,
    #[serde(default)]
    pub vertically: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LocationSpec {
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub area: String,
}

/// A property schema block, attached to the plugin or to an extension.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PropertySchemaSpec {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub groups: Vec<GroupSpec>,
    pub linkable: Option<LinkableSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LinkableSpec {
    pub latlng: Option<PointerSpec>,
    pub url: Option<PointerSpec>,
}

/// Raw `{group, field}` pair. Both empty means "unset".
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PointerSpec {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub field: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSpec {
    #[serde(default)]
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub list: bool,
    pub representative_field: Option<String>,
    pub available_if: Option<ConditionSpec>,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub value_type: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub default_value: Option<serde_json::Value>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub ui: Option<String>,
    pub choices: Option<Vec<ChoiceSpec>>,
    pub available_if: Option<ConditionSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ChoiceSpec {
    #[serde(default)]
    pub key: String,
    pub label: Option<String>,
    pub icon: Option<String>,
}

/// Raw `{field, type, value}` condition triple.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ConditionSpec {
    #[serde(default)]
    pub field: String,
    #[serde(rename = "type", default)]
    pub value_type: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_document() {
        let yaml = r#"
id: aaa
version: 1.1.1
title: bbb
system: false
extensions:
  - id: widget
    type: widget
    singleOnly: true
    widgetLayout:
      extendable:
        horizontally: true
      floating: true
      defaultLocation:
        zone: inner
        section: left
        area: top
    schema:
      groups:
        - id: default
          list: true
          representativeField: name
          fields:
            - id: name
              type: string
              defaultValue: foo
              choices:
                - key: a
                  label: A
              availableIf:
                field: enabled
                type: bool
                value: true
"#;
        let root: Root = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(root.id, "aaa");
        assert_eq!(root.version, "1.1.1");
        let ext = &root.extensions[0];
        assert!(ext.single_only);
        let layout = ext.widget_layout.as_ref().unwrap();
        assert!(layout.extendable.as_ref().unwrap().horizontally);
        assert!(!layout.extendable.as_ref().unwrap().vertically);
        assert_eq!(layout.default_location.as_ref().unwrap().section, "left");
        let group = &ext.schema.as_ref().unwrap().groups[0];
        assert!(group.list);
        let field = &group.fields[0];
        assert_eq!(field.value_type, "string");
        assert_eq!(field.default_value, Some(serde_json::json!("foo")));
        let cond = field.available_if.as_ref().unwrap();
        assert_eq!(cond.value, serde_json::json!(true));
    }

    #[test]
    fn test_missing_keys_are_absent() {
        let root: Root = serde_yaml::from_str("id: aaa\n").unwrap();
        assert!(root.title.is_none());
        assert!(root.schema.is_none());
        assert!(root.extensions.is_empty());
        assert!(!root.system);
    }
}
