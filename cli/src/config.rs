//! Bundle configuration.
//!
//! Lists the manifests that make up a plugin bundle, which of them is the
//! bundled system plugin, and the translation overlays of each.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! plugins:
//!   - manifest: reearth.yml
//!     system: true
//!     translations:
//!       ja: reearth_ja.yml
//!   - manifest: third_party/plugin.yml
//! ```
//!
//! Relative paths are resolved against the directory holding the config file.

use std::collections::BTreeMap;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config '{}': {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// One manifest in the bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginEntry {
    /// Manifest file, YAML or JSON.
    pub manifest: PathBuf,
    /// Compile through the unrestricted entry point.
    #[serde(default)]
    pub system: bool,
    /// Translation documents keyed by language tag.
    #[serde(default)]
    pub translations: BTreeMap<String, PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Configuration format version (e.g., `"1.0"`).
    pub version: String,
    #[serde(default)]
    pub plugins: Vec<PluginEntry>,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl BundleConfig {
    /// Loads configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: BundleConfig =
            serde_yaml::from_reader(BufReader::new(file)).map_err(|source| {
                ConfigError::Yaml {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(config)
    }

    /// Resolves `path` against the config file's directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_and_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.yml");
        std::fs::write(
            &path,
            r#"version: "1.0"
plugins:
  - manifest: reearth.yml
    system: true
    translations:
      ja: i18n/reearth_ja.yml
  - manifest: /abs/plugin.yml
"#,
        )
        .unwrap();

        let config = BundleConfig::load(&path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.plugins.len(), 2);

        let system = &config.plugins[0];
        assert!(system.system);
        assert_eq!(
            config.resolve(&system.manifest),
            dir.path().join("reearth.yml")
        );
        assert_eq!(
            config.resolve(&system.translations["ja"]),
            dir.path().join("i18n/reearth_ja.yml")
        );

        let third_party = &config.plugins[1];
        assert!(!third_party.system);
        assert!(third_party.translations.is_empty());
        assert_eq!(
            config.resolve(&third_party.manifest),
            PathBuf::from("/abs/plugin.yml")
        );
    }

    #[test]
    fn test_load_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.yml");
        let err = BundleConfig::load(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("missing.yml"));

        let bad = dir.path().join("bad.yml");
        std::fs::write(&bad, "plugins: 3\n").unwrap();
        assert!(matches!(
            BundleConfig::load(&bad).unwrap_err(),
            ConfigError::Yaml { .. }
        ));
    }
}
