//! CLI command handlers.

use std::io::Read;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use datesift::{Config, Correction, DateExtractor, Locale, ModeConfiguration, Strictness};

use super::output;

/// Command-line overrides for the `[parser]` config section.
#[derive(Debug, Clone, Default)]
pub struct ParserOverrides {
    pub locale: Option<Locale>,
    pub strict: bool,
    pub correction: Option<Correction>,
}

impl ParserOverrides {
    fn apply(&self, config: &mut Config) {
        if let Some(locale) = self.locale {
            config.parser.locale = locale;
        }
        if self.strict {
            config.parser.strictness = Strictness::Strict;
        }
        if let Some(correction) = self.correction {
            config.parser.correction = correction;
        }
    }
}

/// Run the parse command.
pub fn run_parse(
    mut config: Config,
    overrides: ParserOverrides,
    text: Option<String>,
    reference: Option<String>,
    json_output: bool,
) -> Result<()> {
    overrides.apply(&mut config);

    let text = match text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read text from stdin")?;
            buffer
        }
    };
    let reference = match reference {
        Some(value) => parse_reference(&value)?,
        None => Local::now().naive_local(),
    };

    let extractor = DateExtractor::from_config(&config)?;
    tracing::debug!(mode = ?extractor.mode(), %reference, "Parsing input");
    let results = extractor.parse(&text, reference)?;

    output::print_results(&results, reference, json_output)
}

/// Run the stages command: show the matchers and refinement stages of a mode.
pub fn run_stages(mut config: Config, overrides: ParserOverrides, json_output: bool) -> Result<()> {
    overrides.apply(&mut config);
    let mode = ModeConfiguration::from_settings(&config.parser, &config.filter)?;
    output::print_mode(&config, &mode, json_output)
}

/// Parse a `--reference` value: a date, or a date with a time.
pub fn parse_reference(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(moment) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(moment);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(moment) = date.and_hms_opt(12, 0, 0) {
            return Ok(moment);
        }
    }
    bail!("Invalid reference moment '{}': expected YYYY-MM-DD[THH:MM[:SS]]", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference_formats() {
        let full = parse_reference("2026-01-20T08:30:00").unwrap();
        assert_eq!(full.to_string(), "2026-01-20 08:30:00");

        let spaced = parse_reference("2026-01-20 08:30").unwrap();
        assert_eq!(spaced, full);

        let date_only = parse_reference("2026-01-20").unwrap();
        assert_eq!(date_only.to_string(), "2026-01-20 12:00:00");
    }

    #[test]
    fn test_parse_reference_rejects_garbage() {
        assert!(parse_reference("next tuesday").is_err());
        assert!(parse_reference("2026-13-01").is_err());
    }

    #[test]
    fn test_overrides_apply() {
        let mut config = Config::default();
        let overrides = ParserOverrides {
            locale: Some(Locale::Ja),
            strict: true,
            correction: Some(Correction::Forward),
        };
        overrides.apply(&mut config);
        assert_eq!(config.parser.locale, Locale::Ja);
        assert_eq!(config.parser.strictness, Strictness::Strict);
        assert_eq!(config.parser.correction, Correction::Forward);
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let mut config = Config::default();
        config.parser.correction = Correction::Backward;
        ParserOverrides::default().apply(&mut config);
        assert_eq!(config.parser.correction, Correction::Backward);
        assert_eq!(config.parser.strictness, Strictness::Casual);
    }
}
