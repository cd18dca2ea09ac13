//! Configuration system
//!
//! Serializable configuration types implement [`Config`] to round-trip
//! through a file, with the on-disk format picked by extension (TOML for
//! hand-edited options, RON for tooling dumps).

use std::path::Path;

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from a file, picking the format by extension
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;

        match extension(path) {
            Some("toml") => {
                toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to a file, picking the format by extension
    fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = match extension(path) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        volume: f32,
    }

    impl Default for Sample {
        fn default() -> Self {
            Self {
                name: "default".to_string(),
                volume: 0.5,
            }
        }
    }

    impl Config for Sample {}

    #[test]
    fn test_toml_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sample.toml");

        let original = Sample {
            name: "custom".to_string(),
            volume: 0.8,
        };
        original.save_to_file(&path).unwrap();

        let loaded = Sample::load_from_file(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_ron_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sample.ron");

        let original = Sample::default();
        original.save_to_file(&path).unwrap();

        let loaded = Sample::load_from_file(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sample.xml");

        let result = Sample::default().save_to_file(&path);
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = Sample::load_from_file(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_garbage_contents_are_a_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sample.toml");
        std::fs::write(&path, "volume = ").unwrap();

        let result = Sample::load_from_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
