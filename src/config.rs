//! Configuration file parser for ~/.config/toolshelf/config.toml.
//!
//! The config file is optional; a missing file yields `Config::default()`.
//! Unknown keys are ignored, with a warning logged for each so typos show up
//! under `RUST_LOG=warn`.
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::ToolSort;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration
// ============================================================================

const KNOWN_KEYS: [&str; 5] = [
    "theme",
    "default_sort",
    "catalog_path",
    "show_featured",
    "keybindings",
];

/// Top-level application configuration.
///
/// Every field has a default, so any subset of keys can be given.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme variant name ("dark" or "light").
    pub theme: String,

    /// Initial tool sort key: "name", "rating" or "updated".
    pub default_sort: String,

    /// Catalog file to load instead of the built-in catalog.
    /// `--catalog` on the command line takes precedence.
    pub catalog_path: Option<PathBuf>,

    /// Show the featured strips above the tool and article lists.
    pub show_featured: bool,

    /// Keybinding overrides. Keys are action names, values are key strings.
    pub keybindings: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            default_sort: ToolSort::default().to_string(),
            catalog_path: None,
            show_featured: true,
            keybindings: HashMap::new(),
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing or empty file → `Ok(Config::default())`
    /// - Invalid TOML or wrong value type → `Err(ConfigError::Parse)`
    /// - Unknown keys → accepted, logged as a warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::from_toml_str(&content)
            .inspect(|config| {
                tracing::info!(
                    path = %path.display(),
                    theme = %config.theme,
                    sort = %config.default_sort,
                    "Loaded configuration"
                );
            })
    }

    /// Parse config text. Blank input gives the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        Ok(toml::from_str(content)?)
    }

    /// Initial tool sort key. An unrecognized value falls back to the
    /// default with a warning rather than refusing to start.
    pub fn sort_key(&self) -> ToolSort {
        self.default_sort.parse().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Invalid default_sort in config, using default");
            ToolSort::default()
        })
    }
}

/// Default config location: `~/.config/toolshelf/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("toolshelf")
            .join("config.toml"),
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(test: &str, content: &str) -> (PathBuf, PathBuf) {
        let dir = std::env::temp_dir().join(format!("toolshelf_config_test_{}", test));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.default_sort, "rating");
        assert_eq!(config.sort_key(), ToolSort::Rating);
        assert!(config.catalog_path.is_none());
        assert!(config.show_featured);
        assert!(config.keybindings.is_empty());
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/toolshelf_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_whitespace_only_file_returns_default() {
        let (dir, path) = write_config("whitespace", "   \n  \n  ");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.theme, "dark");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let config = Config::from_toml_str("theme = \"light\"\n").unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(config.sort_key(), ToolSort::Rating);
        assert!(config.show_featured);
    }

    #[test]
    fn test_full_config() {
        let content = r#"
theme = "light"
default_sort = "updated"
catalog_path = "/srv/toolshelf/catalog.toml"
show_featured = false

[keybindings]
quit = "Ctrl+q"
cycle_sort = "S"
"#;
        let (dir, path) = write_config("full", content);

        let config = Config::load(&path).unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(config.sort_key(), ToolSort::LastUpdated);
        assert_eq!(
            config.catalog_path.as_deref(),
            Some(Path::new("/srv/toolshelf/catalog.toml"))
        );
        assert!(!config.show_featured);
        assert_eq!(
            config.keybindings.get("quit").map(String::as_str),
            Some("Ctrl+q")
        );
        assert_eq!(
            config.keybindings.get("cycle_sort").map(String::as_str),
            Some("S")
        );

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_sort_falls_back() {
        let config = Config::from_toml_str("default_sort = \"popularity\"\n").unwrap();
        assert_eq!(config.sort_key(), ToolSort::Rating);
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let err = Config::from_toml_str("this is not [valid toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let content = r#"
theme = "dark"
refresh_interval_minutes = 30
"#;
        let config = Config::from_toml_str(content).unwrap();
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_wrong_type_returns_error() {
        assert!(Config::from_toml_str("theme = 42\n").is_err());
        assert!(Config::from_toml_str("show_featured = \"yes\"\n").is_err());
    }

    #[test]
    fn test_too_large_file_rejected() {
        let (dir, path) = write_config("too_large", &"a".repeat(1_048_577));

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_default_config_path() {
        if std::env::var_os("HOME").is_some() {
            let path = default_config_path().unwrap();
            assert!(path.ends_with(".config/toolshelf/config.toml"));
        }
    }
}
