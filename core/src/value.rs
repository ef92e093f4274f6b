//! Typed property values.
//!
//! [`ValueType`] names a value kind as written in a manifest (`bool`,
//! `number`, `string`, `ref`, `url`, `latlng`, `latlngheight`). [`Value`] is a
//! payload tagged with its kind, so a value can never disagree with its type.
//!
//! Coercion from untyped input ([`ValueType::value_from`]) never fails hard:
//! anything that does not fit the kind yields `None`, letting a loosely written
//! document degrade to "no value" instead of aborting.
//!
//! # Examples
//!
//! ```
//! use plugin_manifest_core::{Value, ValueType};
//! use serde_json::json;
//!
//! let ty: ValueType = "number".parse().unwrap();
//! assert_eq!(ty.value_from(&json!("1.5")), Some(Value::Number(1.5)));
//! assert_eq!(ty.value_from(&json!({"a": 1})), None);
//!
//! let v = ValueType::Bool.parse("true").unwrap();
//! assert_eq!(v, Value::Bool(true));
//! assert_eq!(v.value_type(), ValueType::Bool);
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

keyword_enum!(
    /// Kind of a property value.
    ValueType, "value type", {
        Bool => "bool",
        Number => "number",
        String => "string",
        /// Reference to another resource by id.
        Ref => "ref",
        Url => "url",
        LatLng => "latlng",
        LatLngHeight => "latlngheight",
    }
);

impl ValueType {
    /// Coerces untyped input into a value of this kind.
    ///
    /// Strings are accepted for every kind (`"true"`, `"1.5"`,
    /// `"{\"lat\":1,\"lng\":2}"`), numbers and booleans stringify for
    /// `string`, and `null` is always `None`.
    pub fn value_from(self, raw: &serde_json::Value) -> Option<Value> {
        use serde_json::Value as Raw;

        match (self, raw) {
            (_, Raw::Null) => None,
            (ValueType::Bool, Raw::Bool(b)) => Some(Value::Bool(*b)),
            (ValueType::Bool, Raw::String(s)) => match s.trim() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            (ValueType::Number, Raw::Number(n)) => n.as_f64().map(Value::Number),
            (ValueType::Number, Raw::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Value::Number),
            (ValueType::String, Raw::String(s)) => Some(Value::String(s.clone())),
            (ValueType::String, Raw::Number(n)) => Some(Value::String(n.to_string())),
            (ValueType::String, Raw::Bool(b)) => Some(Value::String(b.to_string())),
            (ValueType::Ref, Raw::String(s)) if !s.is_empty() => Some(Value::Ref(s.clone())),
            (ValueType::Url, Raw::String(s)) => Url::parse(s.trim()).ok().map(Value::Url),
            (ValueType::LatLng, Raw::String(s)) => serde_json::from_str::<LatLng>(s)
                .ok()
                .filter(LatLng::is_finite)
                .map(Value::LatLng),
            (ValueType::LatLng, Raw::Object(_)) => LatLng::deserialize(raw)
                .ok()
                .filter(LatLng::is_finite)
                .map(Value::LatLng),
            (ValueType::LatLngHeight, Raw::String(s)) => {
                serde_json::from_str::<LatLngHeight>(s)
                    .ok()
                    .filter(LatLngHeight::is_finite)
                    .map(Value::LatLngHeight)
            }
            (ValueType::LatLngHeight, Raw::Object(_)) => LatLngHeight::deserialize(raw)
                .ok()
                .filter(LatLngHeight::is_finite)
                .map(Value::LatLngHeight),
            _ => None,
        }
    }

    /// Parses a textual value of this kind.
    pub fn parse(self, s: &str) -> Option<Value> {
        self.value_from(&serde_json::Value::String(s.to_string()))
    }

    /// Zero value of this kind. `ref` and `url` have none.
    pub fn zero_value(self) -> Option<Value> {
        match self {
            ValueType::Bool => Some(Value::Bool(false)),
            ValueType::Number => Some(Value::Number(0.0)),
            ValueType::String => Some(Value::String(String::new())),
            ValueType::Ref | ValueType::Url => None,
            ValueType::LatLng => Some(Value::LatLng(LatLng::default())),
            ValueType::LatLngHeight => Some(Value::LatLngHeight(LatLngHeight::default())),
        }
    }
}

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Geographic position in degrees with a height in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLngHeight {
    pub lat: f64,
    pub lng: f64,
    pub height: f64,
}

impl LatLngHeight {
    fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite() && self.height.is_finite()
    }
}

/// A property value tagged with its kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    Bool(bool),
    Number(f64),
    String(String),
    Ref(String),
    Url(Url),
    #[serde(rename = "latlng")]
    LatLng(LatLng),
    #[serde(rename = "latlngheight")]
    LatLngHeight(LatLngHeight),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Bool,
            Value::Number(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::Ref(_) => ValueType::Ref,
            Value::Url(_) => ValueType::Url,
            Value::LatLng(_) => ValueType::LatLng,
            Value::LatLngHeight(_) => ValueType::LatLngHeight,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// String payload of `string` and `ref` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Ref(s) => Some(s),
            _ => None,
        }
    }
}
