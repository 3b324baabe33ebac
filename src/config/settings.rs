//! Configuration settings for datesift.

use crate::error::{ConfigError, Result};
use crate::locales::Locale;
use crate::mode::{Correction, Strictness};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parser: ParserConfig,
    pub filter: FilterConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations or use defaults.
    pub fn load() -> Result<Self> {
        let config_paths = [
            // Current directory
            PathBuf::from("datesift.toml"),
            // User config directory
            dirs::config_dir()
                .map(|p| p.join("datesift/config.toml"))
                .unwrap_or_default(),
            // Home directory
            dirs::home_dir()
                .map(|p| p.join(".datesift.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.is_file() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        // Filter patterns must compile; they are compiled again when a mode
        // is built, but a bad pattern should fail at load time.
        let sections = [
            ("filter.unlikely_patterns", &self.filter.unlikely_patterns),
            ("filter.unlikely_suffixes", &self.filter.unlikely_suffixes),
            ("filter.unlikely_prefixes", &self.filter.unlikely_prefixes),
        ];
        for (name, patterns) in sections {
            for pattern in patterns {
                Regex::new(pattern).map_err(|source| ConfigError::Pattern {
                    name: name.to_string(),
                    source,
                })?;
            }
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::MissingField("logging.level".to_string()).into());
        }

        Ok(())
    }
}

/// Parser configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Language pack: "en", "ja", "zh", "de" or "fr"
    pub locale: Locale,
    /// "casual" adds weekday names, relative days and casual times
    pub strictness: Strictness,
    /// Resolution of open-ended dates: "none", "forward" or "backward"
    pub correction: Correction,
}

/// Unlikely-format filter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Regexes matched against a candidate's own text
    pub unlikely_patterns: Vec<String>,
    /// Regexes matched against the text right after a candidate
    pub unlikely_suffixes: Vec<String>,
    /// Regexes matched against the text right before a candidate
    pub unlikely_prefixes: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            unlikely_patterns: vec![r"^\d{1,2}(?:st|nd|rd|th)?$".to_string()],
            unlikely_suffixes: vec![
                r"(?i)^\s*(?:%|percent\b|dollars?\b|euros?\b|yen\b|km\b|kg\b|people\b|persons?\b|items?\b|units?\b|times\b)"
                    .to_string(),
                r"^\s*(?:円|元|人|個|个|件|回|名)".to_string(),
            ],
            unlikely_prefixes: vec![r"[$€£¥#№]\s*$".to_string()],
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is not set
    pub level: String,
    /// Emit JSON lines instead of human-readable logs
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}
