//! Builder and identifier errors.
//!
//! Every invariant enforced by an entity builder maps to one variant of
//! [`BuildError`]. The `Display` impl is terse on purpose: callers that compile
//! whole documents prefix it with the path of the offending node.

use thiserror::Error;

/// Errors raised while constructing identifiers and model entities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// Plugin name or version did not form a valid plugin id.
    #[error("invalid plugin id: {0}")]
    InvalidPluginId(String),
    /// Property schema id was empty or malformed.
    #[error("invalid property schema id: {0}")]
    InvalidSchemaId(String),
    /// A builder was finished without an id.
    #[error("{0} id is required")]
    MissingId(&'static str),
    /// A keyword did not name any known variant (value type, extension type, ...).
    #[error("invalid {kind}: {value}")]
    UnknownKeyword {
        /// What kind of keyword was being resolved.
        kind: &'static str,
        /// The offending keyword as written.
        value: String,
    },
    /// A schema field was built without a value type.
    #[error("value type is required")]
    MissingValueType,
    /// A field's default value does not type-check against the field type.
    #[error("invalid default value for field: {0}")]
    InvalidDefaultValue(String),
    /// A group's representative field is not one of its fields.
    #[error("invalid representative field: {0}")]
    InvalidRepresentativeField(String),
    /// Two groups in one schema share an id.
    #[error("duplicated group: {0}")]
    DuplicateGroup(String),
    /// Two fields in one group share an id.
    #[error("duplicated field: {0}")]
    DuplicateField(String),
    /// Two extensions in one plugin share an id.
    #[error("duplicated extension: {0}")]
    DuplicateExtension(String),
    /// A linkable pointer does not resolve to a field of the expected type.
    #[error("invalid linkable field: {0}")]
    InvalidLinkableField(&'static str),
    /// A system-only extension type was built without the system capability.
    #[error("extension type {0} is only available to system plugins")]
    SystemExtension(String),
}

impl BuildError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownKeyword {
            kind,
            value: value.to_string(),
        }
    }
}

/// Convenience alias for results with [`BuildError`].
pub type Result<T> = std::result::Result<T, BuildError>;
