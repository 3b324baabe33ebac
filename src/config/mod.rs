//! Configuration management.

mod settings;

pub use settings::{Config, FilterConfig, LoggingConfig, ParserConfig};
