//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::adapters::live::openai::OPENAI_BASE_URL;
use crate::labels::Locale;
use crate::params::{AspectClass, ImageSize};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Provider endpoint configuration.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Initial form values.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// API key configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// `OpenAI` API key.
    pub openai: Option<String>,
}

/// Provider endpoint configuration.
#[derive(Debug, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the images API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self { base_url: default_base_url() }
    }
}

fn default_base_url() -> String {
    OPENAI_BASE_URL.to_string()
}

/// Initial form values from the config file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Initially selected aspect class.
    pub aspect: AspectClass,
    /// Initially selected size; must belong to `aspect`.
    pub size: Option<ImageSize>,
    /// Language for labels and messages.
    pub locale: Locale,
    /// Directory download files are written to.
    pub output_dir: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            aspect: AspectClass::Square,
            size: None,
            locale: Locale::En,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Get the `OpenAI` API key, preferring the environment variable.
    #[must_use]
    pub fn openai_key(&self) -> Option<String> {
        std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.keys.openai.clone())
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `DALLE_FORM_CONFIG` environment variable
/// 3. `~/.config/dalle-form/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("DALLE_FORM_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/dalle-form/config.toml")
    } else {
        PathBuf::from("dalle-form.toml")
    }
}
