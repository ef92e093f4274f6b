//! Namespaced identifiers.
//!
//! A plugin is identified by its name and semantic version, written
//! `name#version`. The platform's bundled plugin is the single exception: it
//! uses the reserved [`OFFICIAL_PLUGIN_NAME`] and carries no version.
//!
//! Property schemas are keyed by the owning plugin plus a local identifier,
//! written `<pluginID>/<identifier>`. Extension, group and field ids are opaque
//! strings that only need to be unique within their parent.
//!
//! # Examples
//!
//! ```
//! use plugin_manifest_core::{PluginId, PropertySchemaId};
//!
//! let plugin = PluginId::new("aaa", "1.1.1").unwrap();
//! assert_eq!(plugin.to_string(), "aaa#1.1.1");
//!
//! let schema = PropertySchemaId::new(plugin, "hoge").unwrap();
//! assert_eq!(schema.to_string(), "aaa#1.1.1/hoge");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::{BuildError, Result};

/// Name of the platform's bundled plugin.
pub const OFFICIAL_PLUGIN_NAME: &str = "reearth";

/// Separator between plugin name and version.
pub const VERSION_SEPARATOR: char = '#';

/// Separator between plugin id and schema identifier.
pub const SCHEMA_SEPARATOR: char = '/';

const MAX_NAME_LEN: usize = 100;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("plugin name pattern is valid"));

/// Identity of a plugin.
///
/// Equality, ordering and hashing go through `(name, version)`.
///
/// # Examples
///
/// ```
/// use plugin_manifest_core::PluginId;
///
/// let official = PluginId::official();
/// assert!(official.is_official());
/// assert_eq!(official.to_string(), "reearth");
///
/// // The reserved name never parses a version.
/// assert_eq!(PluginId::new("reearth", "not-a-version").unwrap(), official);
///
/// let third_party: PluginId = "aaa#1.1.1".parse().unwrap();
/// assert_eq!(third_party.name(), "aaa");
/// assert_eq!(third_party.version().unwrap().to_string(), "1.1.1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PluginId {
    name: String,
    version: Option<semver::Version>,
}

impl PluginId {
    /// Returns the unversioned identity of the bundled plugin.
    pub fn official() -> Self {
        Self {
            name: OFFICIAL_PLUGIN_NAME.to_string(),
            version: None,
        }
    }

    /// Builds a versioned plugin id.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidPluginId`] if `name` is empty or contains
    /// characters outside `[A-Za-z0-9._-]`, or if `version` is not a semantic
    /// version. The reserved official name skips both checks.
    pub fn new(name: &str, version: &str) -> Result<Self> {
        if name == OFFICIAL_PLUGIN_NAME {
            return Ok(Self::official());
        }
        if name.len() > MAX_NAME_LEN || !NAME_RE.is_match(name) {
            return Err(BuildError::InvalidPluginId(format!(
                "{name}{VERSION_SEPARATOR}{version}"
            )));
        }
        let parsed = semver::Version::parse(version).map_err(|err| {
            BuildError::InvalidPluginId(format!("{name}{VERSION_SEPARATOR}{version}: {err}"))
        })?;
        Ok(Self {
            name: name.to_string(),
            version: Some(parsed),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version of a third-party plugin; `None` for the official plugin.
    pub fn version(&self) -> Option<&semver::Version> {
        self.version.as_ref()
    }

    pub fn is_official(&self) -> bool {
        self.version.is_none() && self.name == OFFICIAL_PLUGIN_NAME
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}{VERSION_SEPARATOR}{version}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Parses `name#version`, or the bare official name.
///
/// The official name keeps no version, so `reearth#1.0.0` parses to
/// [`PluginId::official`] and displays as `reearth`.
impl FromStr for PluginId {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self> {
        if s == OFFICIAL_PLUGIN_NAME {
            return Ok(Self::official());
        }
        match s.split_once(VERSION_SEPARATOR) {
            Some((name, version)) => Self::new(name, version),
            None => Err(BuildError::InvalidPluginId(s.to_string())),
        }
    }
}

impl Serialize for PluginId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Globally unique id of a property schema: `<pluginID>/<identifier>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertySchemaId {
    plugin: PluginId,
    id: String,
}

impl PropertySchemaId {
    /// Namespaces `id` under `plugin`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidSchemaId`] if `id` is empty.
    pub fn new(plugin: PluginId, id: &str) -> Result<Self> {
        if id.is_empty() {
            return Err(BuildError::InvalidSchemaId(format!(
                "{plugin}{SCHEMA_SEPARATOR}"
            )));
        }
        Ok(Self {
            plugin,
            id: id.to_string(),
        })
    }

    pub fn plugin(&self) -> &PluginId {
        &self.plugin
    }

    /// Identifier local to the plugin (`@` for the plugin's own schema,
    /// otherwise the extension id).
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for PropertySchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SCHEMA_SEPARATOR}{}", self.plugin, self.id)
    }
}

impl FromStr for PropertySchemaId {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self> {
        let (plugin, id) = s
            .split_once(SCHEMA_SEPARATOR)
            .ok_or_else(|| BuildError::InvalidSchemaId(s.to_string()))?;
        let plugin = plugin
            .parse()
            .map_err(|_| BuildError::InvalidSchemaId(s.to_string()))?;
        Self::new(plugin, id)
    }
}

impl Serialize for PropertySchemaId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(
    /// Id of an extension, unique within its plugin.
    ExtensionId
);
string_id!(
    /// Id of a schema group, unique within its schema.
    SchemaGroupId
);
string_id!(
    /// Id of a schema field, unique within its group.
    SchemaFieldId
);
