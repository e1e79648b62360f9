//! Resolver configuration loaded from TOML.

use crate::error::{VocaliasError, VocaliasResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable overriding the plugin directory
pub const PLUGIN_DIR_ENV: &str = "VOCALIAS_PLUGIN_DIR";

/// Resolver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Base crossfade length in milliseconds, scaled by the duration estimator
    pub base_transition_ms: f64,
    /// Allow a plain `vowel consonant` transition when the consonant-vowel
    /// sample behind it is missing
    pub consonant_vowel_fallback: bool,
    /// Lyrics that denote silence or continuation and bypass resolution
    pub rest_tokens: Vec<String>,
    /// File name of the plugin's base dictionary
    pub dictionary_file_name: String,
    /// Directory holding the plugin dictionary; platform default when unset
    pub plugin_dir: Option<PathBuf>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_transition_ms: 100.0,
            consonant_vowel_fallback: false,
            rest_tokens: vec!["-".to_string(), "R".to_string()],
            dictionary_file_name: "vocalias_dictionary.toml".to_string(),
            plugin_dir: None,
        }
    }
}

impl ResolverConfig {
    /// Parse and validate a configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns a configuration error for malformed TOML or invalid values
    pub fn from_toml_str(text: &str) -> VocaliasResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    ///
    /// # Errors
    ///
    /// Returns a file error if the file cannot be read, otherwise see
    /// [`ResolverConfig::from_toml_str`]
    pub fn load(path: &Path) -> VocaliasResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            VocaliasError::file(format!("Failed to read config {}: {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&text)?;
        info!("Loaded resolver configuration from {}", path.display());
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a non-positive base duration, an
    /// empty rest token list or an empty dictionary file name
    pub fn validate(&self) -> VocaliasResult<()> {
        if !self.base_transition_ms.is_finite() || self.base_transition_ms <= 0.0 {
            return Err(VocaliasError::configuration(format!(
                "base_transition_ms must be a positive number, got {}",
                self.base_transition_ms
            )));
        }

        if self.rest_tokens.is_empty() || self.rest_tokens.iter().any(String::is_empty) {
            return Err(VocaliasError::configuration(
                "rest_tokens must contain at least one non-empty token".to_string(),
            ));
        }

        if self.dictionary_file_name.trim().is_empty() {
            return Err(VocaliasError::configuration(
                "dictionary_file_name must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Check whether `token` is a rest marker
    #[must_use]
    pub fn is_rest(&self, token: &str) -> bool {
        self.rest_tokens.iter().any(|rest| rest == token)
    }

    /// Platform plugin directory, overridable with `VOCALIAS_PLUGIN_DIR`
    #[must_use]
    pub fn default_plugin_dir() -> Option<PathBuf> {
        if let Ok(custom) = std::env::var(PLUGIN_DIR_ENV) {
            return Some(PathBuf::from(custom));
        }
        ProjectDirs::from("org", "Vocalias", "vocalias").map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Configured plugin directory, falling back to the platform default
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no directory is configured and the
    /// platform offers none
    pub fn plugin_dir(&self) -> VocaliasResult<PathBuf> {
        if let Some(dir) = &self.plugin_dir {
            return Ok(dir.clone());
        }
        let dir = Self::default_plugin_dir().ok_or_else(|| {
            VocaliasError::configuration("Failed to determine plugin directory".to_string())
        })?;
        debug!("Using default plugin directory {}", dir.display());
        Ok(dir)
    }

    /// Full path of the plugin base dictionary
    ///
    /// # Errors
    ///
    /// See [`ResolverConfig::plugin_dir`]
    pub fn dictionary_path(&self) -> VocaliasResult<PathBuf> {
        Ok(self.plugin_dir()?.join(&self.dictionary_file_name))
    }
}
