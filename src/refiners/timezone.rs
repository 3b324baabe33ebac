//! Timezone attachment.
//!
//! Both stages look only at the text right after a candidate. When a timezone
//! token is found there, its offset (minutes east of UTC) is assigned as a
//! certain field on the start and end stores and the span grows to cover the
//! token. No other field is touched.

use std::collections::HashMap;

use regex::Regex;
use tracing::debug;

use super::Refiner;
use crate::candidate::{Candidate, Span, Tag};
use crate::components::TemporalField;
use crate::error::{ConfigError, Result};

/// Largest offset accepted from text, in hours.
const MAX_OFFSET_HOURS: i32 = 14;

fn default_abbreviations() -> HashMap<String, i32> {
    [
        ("UTC", 0),
        ("GMT", 0),
        ("Z", 0),
        ("WET", 0),
        ("BST", 60),
        ("CET", 60),
        ("CEST", 120),
        ("MEZ", 60),
        ("MESZ", 120),
        ("EET", 120),
        ("EEST", 180),
        ("MSK", 180),
        ("IST", 330),
        ("ICT", 420),
        ("CST", -360),
        ("CDT", -300),
        ("EST", -300),
        ("EDT", -240),
        ("MST", -420),
        ("MDT", -360),
        ("PST", -480),
        ("PDT", -420),
        ("AKST", -540),
        ("AKDT", -480),
        ("HST", -600),
        ("JST", 540),
        ("KST", 540),
        ("HKT", 480),
        ("SGT", 480),
        ("AEST", 600),
        ("AEDT", 660),
        ("NZST", 720),
        ("NZDT", 780),
    ]
    .into_iter()
    .map(|(abbr, minutes)| (abbr.to_string(), minutes))
    .collect()
}

/// Text following the candidate's span.
fn tail<'t>(text: &'t str, candidate: &Candidate) -> &'t str {
    text.get(candidate.span.end()..).unwrap_or_default()
}

/// Record `offset` on both stores and widen the span by `consumed` bytes.
fn attach(text: &str, candidate: &mut Candidate, offset: i32, consumed: usize) {
    candidate.start.assign(TemporalField::TimezoneOffset, offset);
    if let Some(end) = candidate.end.as_mut() {
        end.assign(TemporalField::TimezoneOffset, offset);
    }
    let span = Span::new(candidate.span.start, candidate.span.len + consumed);
    candidate.set_span(text, span);
    candidate.tags.insert(Tag::TimezoneAttached);
}

fn next_is(rest: &str, pred: impl Fn(char) -> bool) -> bool {
    rest.chars().next().is_some_and(pred)
}

// ============================================================================
// Abbreviations
// ============================================================================

/// Attaches "JST", "PST", "CEST" and similar abbreviations.
///
/// Only candidates with a stated hour qualify; "May 5 EST" says nothing
/// about a time of day and is left alone.
pub struct TimezoneAbbrRefiner {
    pattern: Regex,
    abbreviations: HashMap<String, i32>,
}

impl TimezoneAbbrRefiner {
    pub fn new() -> std::result::Result<Self, ConfigError> {
        Self::with_abbreviations(default_abbreviations())
    }

    pub fn with_abbreviations(
        abbreviations: HashMap<String, i32>,
    ) -> std::result::Result<Self, ConfigError> {
        let pattern = Regex::new(r"^\s*\(?([A-Z]{1,5})\)?").map_err(|source| ConfigError::Pattern {
            name: "timezone_abbreviation".to_string(),
            source,
        })?;
        Ok(Self {
            pattern,
            abbreviations,
        })
    }

    /// Offset and consumed length for the abbreviation after the candidate.
    fn lookup(&self, rest: &str) -> Option<(i32, usize)> {
        let caps = self.pattern.captures(rest)?;
        let whole = caps.get(0)?;
        if next_is(&rest[whole.end()..], |c| c.is_ascii_alphanumeric()) {
            return None;
        }
        let offset = *self.abbreviations.get(caps.get(1)?.as_str())?;
        Some((offset, whole.end()))
    }
}

impl Refiner for TimezoneAbbrRefiner {
    fn name(&self) -> &'static str {
        "timezone_abbreviation"
    }

    fn refine(&self, text: &str, candidates: Vec<Candidate>) -> Result<Vec<Candidate>> {
        Ok(candidates
            .into_iter()
            .map(|mut candidate| {
                if !candidate.start.is_certain(TemporalField::Hour)
                    || candidate.start.is_certain(TemporalField::TimezoneOffset)
                {
                    return candidate;
                }
                if let Some((offset, consumed)) = self.lookup(tail(text, &candidate)) {
                    attach(text, &mut candidate, offset, consumed);
                    debug!(text = %candidate.text, offset, "Attached timezone abbreviation");
                }
                candidate
            })
            .collect())
    }
}

// ============================================================================
// Numeric offsets
// ============================================================================

/// Attaches numeric offsets: "+09:00", "-0500", "UTC+9", "GMT-03:30".
///
/// A bare signed number only counts after a stated hour; with a GMT/UTC
/// prefix the offset is accepted after any candidate.
pub struct TimezoneOffsetRefiner {
    pattern: Regex,
}

impl TimezoneOffsetRefiner {
    pub fn new() -> std::result::Result<Self, ConfigError> {
        let pattern = Regex::new(
            r"^\s*(?P<prefix>GMT|UTC)?\s*(?P<sign>[+-])(?P<hour>\d{1,2})(?::?(?P<minute>\d{2}))?",
        )
        .map_err(|source| ConfigError::Pattern {
            name: "timezone_offset".to_string(),
            source,
        })?;
        Ok(Self { pattern })
    }

    fn lookup(&self, rest: &str, timed: bool) -> Option<(i32, usize)> {
        let caps = self.pattern.captures(rest)?;
        let whole = caps.get(0)?;
        if next_is(&rest[whole.end()..], |c| c.is_ascii_digit()) {
            return None;
        }
        if caps.name("prefix").is_none() && !timed {
            return None;
        }

        let hours: i32 = caps.name("hour")?.as_str().parse().ok()?;
        let minutes: i32 = match caps.name("minute") {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };
        if hours > MAX_OFFSET_HOURS || minutes >= 60 {
            return None;
        }

        let sign = if caps.name("sign")?.as_str() == "-" { -1 } else { 1 };
        Some((sign * (hours * 60 + minutes), whole.end()))
    }
}

impl Refiner for TimezoneOffsetRefiner {
    fn name(&self) -> &'static str {
        "timezone_offset"
    }

    fn refine(&self, text: &str, candidates: Vec<Candidate>) -> Result<Vec<Candidate>> {
        Ok(candidates
            .into_iter()
            .map(|mut candidate| {
                let timed = candidate.start.is_certain(TemporalField::Hour);
                if let Some((offset, consumed)) = self.lookup(tail(text, &candidate), timed) {
                    attach(text, &mut candidate, offset, consumed);
                    debug!(text = %candidate.text, offset, "Attached timezone offset");
                }
                candidate
            })
            .collect())
    }
}
