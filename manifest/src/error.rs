//! Error types for manifest compilation.
//!
//! Three kinds of failure are distinguished: the document could not be decoded
//! at all, the document decoded but violates the manifest's structure, or a
//! restricted entry point was handed the system plugin's manifest.

use std::fmt::Display;

use plugin_manifest_core::BuildError;
use thiserror::Error;

/// Errors that can occur while compiling a manifest or translation.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest document is not valid YAML/JSON or does not match the
    /// expected shape.
    #[error("failed to parse plugin manifest: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The manifest decoded but is structurally invalid. The message is
    /// qualified with the path of the offending node, e.g.
    /// `ext (hoge): visualizer missing`.
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    /// A restricted entry point was given a manifest of the system plugin.
    #[error("cannot build system manifest")]
    SystemManifest,

    /// A translation document could not be decoded.
    #[error("failed to parse plugin translation: {0}")]
    Translation(serde_yaml::Error),
}

impl From<BuildError> for ManifestError {
    fn from(err: BuildError) -> Self {
        ManifestError::InvalidManifest(err.to_string())
    }
}

/// Convenience alias for results with [`ManifestError`].
pub type Result<T> = std::result::Result<T, ManifestError>;

/// Prefixes validation errors with the path of the node being compiled.
pub(crate) trait WithPath<T> {
    fn at<P: Display>(self, path: impl FnOnce() -> P) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, BuildError> {
    fn at<P: Display>(self, path: impl FnOnce() -> P) -> Result<T> {
        self.map_err(|err| ManifestError::InvalidManifest(format!("{}: {err}", path())))
    }
}

impl<T> WithPath<T> for Result<T> {
    fn at<P: Display>(self, path: impl FnOnce() -> P) -> Result<T> {
        self.map_err(|err| match err {
            ManifestError::InvalidManifest(msg) => {
                ManifestError::InvalidManifest(format!("{}: {msg}", path()))
            }
            other => other,
        })
    }
}

pub(crate) fn invalid(msg: impl Into<String>) -> ManifestError {
    ManifestError::InvalidManifest(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_nest_outermost_first() {
        let inner: std::result::Result<(), BuildError> = Err(BuildError::MissingValueType);
        let err = inner
            .at(|| "field (a)")
            .at(|| "item (default)")
            .at(|| "ext (hoge)")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid manifest: ext (hoge): item (default): field (a): value type is required"
        );
    }

    #[test]
    fn test_paths_leave_other_errors_alone() {
        let inner: Result<()> = Err(ManifestError::SystemManifest);
        assert!(matches!(
            inner.at(|| "ext (x)"),
            Err(ManifestError::SystemManifest)
        ));
    }
}
