//! Extraction engine.
//!
//! Runs every matcher of a mode over the whole text, then folds the candidate
//! list through the mode's refinement stages in order.

pub mod matcher;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, trace};

use crate::candidate::{Candidate, ParsedResult};
use crate::config::Config;
use crate::error::{DateSiftError, Result};
use crate::mode::ModeConfiguration;
use crate::refiners::sort_by_offset;

/// Extract every date/time expression in `text`, resolved against
/// `reference`.
///
/// No matches is an empty list, not an error. Candidates whose fields do
/// not form a real calendar moment are dropped. The only error is
/// [`DateSiftError::InvariantViolation`], raised when a stage breaks the
/// certainty rules of the component store.
pub fn parse(
    text: &str,
    reference: NaiveDateTime,
    mode: &ModeConfiguration,
) -> Result<Vec<ParsedResult>> {
    let mut candidates = collect_candidates(text, reference, mode);

    for refiner in mode.refiners() {
        let before = candidates.len();
        candidates = refiner.refine(text, candidates)?;
        trace!(
            stage = refiner.name(),
            before,
            after = candidates.len(),
            "Refinement stage finished"
        );
    }

    sort_by_offset(&mut candidates);

    let mut results = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let text = candidate.text.clone();
        match candidate.into_result() {
            Ok(result) => results.push(result),
            Err(err @ DateSiftError::InvalidMoment { .. }) => {
                debug!(%text, error = %err, "Dropping candidate with invalid moment");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(results)
}

/// Run all matchers, stamping each candidate with its matcher's position.
fn collect_candidates(
    text: &str,
    reference: NaiveDateTime,
    mode: &ModeConfiguration,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for (priority, matcher) in mode.matchers().iter().enumerate() {
        let found = matcher.find(text, reference);
        if !found.is_empty() {
            trace!(matcher = matcher.name(), count = found.len(), "Matcher found candidates");
        }
        candidates.extend(found.into_iter().map(|mut candidate| {
            candidate.priority = priority;
            candidate
        }));
    }
    candidates
}

/// A mode bundled with convenience entry points.
#[derive(Debug)]
pub struct DateExtractor {
    mode: ModeConfiguration,
}

impl DateExtractor {
    pub fn new(mode: ModeConfiguration) -> Self {
        Self { mode }
    }

    /// Build from a loaded [`Config`].
    pub fn from_config(config: &Config) -> Result<Self> {
        let mode = ModeConfiguration::from_settings(&config.parser, &config.filter)?;
        Ok(Self::new(mode))
    }

    pub fn mode(&self) -> &ModeConfiguration {
        &self.mode
    }

    pub fn parse(&self, text: &str, reference: NaiveDateTime) -> Result<Vec<ParsedResult>> {
        parse(text, reference, &self.mode)
    }

    /// Parse against the local wall-clock time.
    pub fn parse_now(&self, text: &str) -> Result<Vec<ParsedResult>> {
        self.parse(text, Local::now().naive_local())
    }
}
