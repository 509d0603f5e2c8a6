//! Configuration file support
//!
//! Loads settings from ~/.sidenote.toml (or %USERPROFILE%\.sidenote.toml on Windows)
//!
//! Example:
//! ```toml
//! # sidenote configuration
//! output_suffix = ".htm"
//! language = "python"
//!
//! [extensions]
//! pyi = "Python"
//! hpp = "C"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::language::DEFAULT_OUTPUT_SUFFIX;

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Suffix that replaces a source file's extension
    pub output_suffix: String,
    /// Language forced for every file, by name
    pub language: Option<String>,
    /// Extra extension to language name mappings
    pub extensions: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            language: None,
            extensions: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".sidenote.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".sidenote.toml"))
        }
    }

    /// Load configuration from file
    ///
    /// A missing file gives the defaults; an unreadable one is logged and
    /// also gives the defaults.
    pub fn load() -> Self {
        let Some(path) = Self::config_path().filter(|p| p.is_file()) else {
            return Config::default();
        };

        match Self::load_from(&path) {
            Ok(config) => {
                log::debug!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("ignoring {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        config.extensions = config
            .extensions
            .into_iter()
            .map(|(ext, lang)| (ext.trim_start_matches('.').to_lowercase(), lang))
            .collect();
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SidenoteError;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Comment
output_suffix = ".htm"
language = "python"

[extensions]
".PYI" = "Python"
hpp = "C"
        "#;

        let config = Config::from_toml_str(contents).unwrap();
        assert_eq!(config.output_suffix, ".htm");
        assert_eq!(config.language.as_deref(), Some("python"));
        assert_eq!(config.extensions.get("pyi").map(String::as_str), Some("Python"));
        assert_eq!(config.extensions.get("hpp").map(String::as_str), Some("C"));
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.output_suffix, ".html");
    }

    #[test]
    fn test_load_from_missing_file() {
        assert!(matches!(
            Config::load_from(Path::new("/nonexistent/.sidenote.toml")),
            Err(SidenoteError::Io(_))
        ));
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            Config::from_toml_str("output_suffix = 3"),
            Err(SidenoteError::Config(_))
        ));
    }
}
