//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ProviderError;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Default behavior values.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// API key configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// Gemini API key.
    pub gemini: Option<String>,
}

/// Default behavior values from the config file.
#[derive(Debug, Deserialize)]
pub struct DefaultsConfig {
    /// Default model family token (`"gemini"` or `"imagen"`).
    pub model_family: String,
    /// Directory where generated images are stored.
    pub output_dir: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { model_family: "gemini".to_string(), output_dir: "images".to_string() }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, ProviderError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ProviderError::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        toml::from_str(&contents).map_err(|e| {
            ProviderError::Config(format!("Failed to parse config {}: {e}", path.display()))
        })
    }

    /// Get the Gemini API key, preferring the environment variable.
    #[must_use]
    pub fn gemini_key(&self) -> Option<String> {
        std::env::var("GEMINI_API_KEY").ok().or_else(|| self.keys.gemini.clone())
    }

    /// Get the default model family token, preferring the `GOOGLE_MODEL`
    /// environment variable.
    #[must_use]
    pub fn default_family(&self) -> String {
        std::env::var("GOOGLE_MODEL").ok().unwrap_or_else(|| self.defaults.model_family.clone())
    }

    /// Get the output directory, preferring the `PIXGEN_OUTPUT_DIR`
    /// environment variable.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        std::env::var("PIXGEN_OUTPUT_DIR")
            .map_or_else(|_| PathBuf::from(&self.defaults.output_dir), PathBuf::from)
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path
/// 2. `PIXGEN_CONFIG` environment variable
/// 3. `~/.config/pixgen/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("PIXGEN_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/pixgen/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/pixgen/config.toml")
    } else {
        PathBuf::from("pixgen.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.keys.gemini.is_none());
        assert_eq!(config.defaults.model_family, "gemini");
        assert_eq!(config.defaults.output_dir, "images");
    }

    #[test]
    fn load_nonexistent_returns_defaults() {
        let config = Config::load(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(config.defaults.model_family, "gemini");
    }

    #[test]
    fn load_valid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[keys]
gemini = "test-gemini-key"

[defaults]
model_family = "imagen"
output_dir = "/tmp/pics"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.keys.gemini.as_deref(), Some("test-gemini-key"));
        assert_eq!(config.defaults.model_family, "imagen");
        assert_eq!(config.defaults.output_dir, "/tmp/pics");
    }

    #[test]
    fn load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn discover_explicit_path() {
        let path = discover_config_path(Some("/tmp/my-config.toml"));
        assert_eq!(path, PathBuf::from("/tmp/my-config.toml"));
    }
}
