//! Localized strings keyed by language tag.

use std::collections::BTreeMap;

use serde::Serialize;

/// Language used when a manifest writes a plain string.
pub const DEFAULT_LANG: &str = "en";

/// A string with one entry per BCP-47 language tag.
///
/// Lookups fall back to [`DEFAULT_LANG`] and then to any entry, so a partially
/// translated string still renders.
///
/// # Examples
///
/// ```
/// use plugin_manifest_core::I18nString;
///
/// let mut title = I18nString::from_default("Marker");
/// title.set("ja", "マーカー");
///
/// assert_eq!(title.string(), "Marker");
/// assert_eq!(title.translated("ja"), "マーカー");
/// assert_eq!(title.translated("de"), "Marker");
/// assert!(I18nString::from_default("").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct I18nString(BTreeMap<String, String>);

impl I18nString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps `value` under [`DEFAULT_LANG`]; an empty value yields an empty map.
    pub fn from_default(value: &str) -> Self {
        let mut s = Self::new();
        if !value.is_empty() {
            s.set(DEFAULT_LANG, value);
        }
        s
    }

    /// Wraps an optional plain string, see [`I18nString::from_default`].
    pub fn from_option(value: Option<&str>) -> Self {
        value.map(Self::from_default).unwrap_or_default()
    }

    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0.get(lang).map(String::as_str)
    }

    pub fn set(&mut self, lang: &str, value: &str) {
        self.0.insert(lang.to_string(), value.to_string());
    }

    /// Value in the default language, or any available value.
    pub fn string(&self) -> &str {
        self.translated(DEFAULT_LANG)
    }

    /// Value for `lang`, falling back to the default language and then to
    /// the first entry. Empty when the map is empty.
    pub fn translated(&self, lang: &str) -> &str {
        self.get(lang)
            .or_else(|| self.get(DEFAULT_LANG))
            .or_else(|| self.0.values().next().map(String::as_str))
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates `(lang, value)` pairs in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for I18nString {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
