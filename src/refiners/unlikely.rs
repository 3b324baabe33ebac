//! Filter for matches that are more plausibly something other than a date.

use regex::Regex;
use tracing::debug;

use super::Refiner;
use crate::candidate::Candidate;
use crate::error::{ConfigError, Result};

/// Drops candidates whose text or surroundings look like a quantity.
///
/// A candidate is rejected when its own text matches one of `shapes`
/// ("12"), when the text right after it matches one of `suffixes`
/// ("2024 people", "15%"), or when the text right before it matches one of
/// `prefixes` ("$2024").
pub struct UnlikelyFormatFilter {
    shapes: Vec<Regex>,
    suffixes: Vec<Regex>,
    prefixes: Vec<Regex>,
}

fn compile_all(kind: &str, patterns: &[String]) -> std::result::Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .enumerate()
        .map(|(i, pattern)| {
            Regex::new(pattern).map_err(|source| ConfigError::Pattern {
                name: format!("filter.{}[{}]", kind, i),
                source,
            })
        })
        .collect()
}

impl UnlikelyFormatFilter {
    pub fn new(
        shapes: &[String],
        suffixes: &[String],
        prefixes: &[String],
    ) -> std::result::Result<Self, ConfigError> {
        Ok(Self {
            shapes: compile_all("unlikely_patterns", shapes)?,
            suffixes: compile_all("unlikely_suffixes", suffixes)?,
            prefixes: compile_all("unlikely_prefixes", prefixes)?,
        })
    }

    fn is_unlikely(&self, text: &str, candidate: &Candidate) -> bool {
        let before = text.get(..candidate.span.start).unwrap_or_default();
        let after = text.get(candidate.span.end()..).unwrap_or_default();

        self.shapes.iter().any(|re| re.is_match(&candidate.text))
            || self.suffixes.iter().any(|re| re.is_match(after))
            || self.prefixes.iter().any(|re| re.is_match(before))
    }
}

impl Refiner for UnlikelyFormatFilter {
    fn name(&self) -> &'static str {
        "unlikely_format"
    }

    fn refine(&self, text: &str, candidates: Vec<Candidate>) -> Result<Vec<Candidate>> {
        Ok(candidates
            .into_iter()
            .filter(|candidate| {
                let unlikely = self.is_unlikely(text, candidate);
                if unlikely {
                    debug!(text = %candidate.text, "Dropping unlikely date");
                }
                !unlikely
            })
            .collect())
    }
}
