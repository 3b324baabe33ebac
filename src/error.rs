//! Error types for datesift.

use thiserror::Error;

/// Main error type for datesift operations.
#[derive(Error, Debug)]
pub enum DateSiftError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid moment: {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}")]
    InvalidMoment {
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
    },

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-related errors, raised once while a mode is being assembled.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid pattern for {name}: {source}")]
    Pattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Mode configuration has no matchers")]
    EmptyMode,

    #[error("Stage {stage} needs one of {tags} but no matcher produces them")]
    UnproducedTag { stage: String, tags: String },
}

/// Result type alias for datesift operations.
pub type Result<T> = std::result::Result<T, DateSiftError>;
