//! Candidate results and the resolved output handed back to callers.

use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::components::{ComponentStore, TemporalField};
use crate::error::Result;

// ============================================================================
// Span
// ============================================================================

/// A byte range in the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    pub fn from_range(start: usize, end: usize) -> Self {
        Self {
            start,
            len: end.saturating_sub(start),
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn intersects(&self, other: &Span) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end() <= self.end()
    }

    /// Smallest span covering both.
    pub fn cover(&self, other: &Span) -> Span {
        Span::from_range(self.start.min(other.start), self.end().max(other.end()))
    }
}

// ============================================================================
// Provenance Tags
// ============================================================================

/// Marks which matcher produced a candidate or which stage touched it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    // Matchers
    IsoDate,
    SlashDate,
    MonthNameDay,
    MonthName,
    PlainYear,
    ThisYear,
    RelativeYear,
    ThisMonth,
    RelativeMonth,
    CasualDate,
    Weekday,
    Time,
    CasualTime,

    // Refiners
    RangeMerged,
    DateTimeMerged,
    BackwardCorrected,
    ForwardCorrected,
    TimezoneAttached,
    DefaultEnd,
}

// ============================================================================
// Candidate
// ============================================================================

/// One matched span and the temporal components read from it.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub span: Span,
    pub text: String,
    pub reference: NaiveDateTime,
    pub start: ComponentStore,
    pub end: Option<ComponentStore>,
    pub tags: BTreeSet<Tag>,
    /// Registration index of the producing matcher; lower wins ties.
    pub priority: usize,
}

impl Candidate {
    pub fn new(
        text: &str,
        span: Span,
        reference: NaiveDateTime,
        start: ComponentStore,
    ) -> Self {
        Self {
            span,
            text: text.get(span.start..span.end()).unwrap_or_default().to_string(),
            reference,
            start,
            end: None,
            tags: BTreeSet::new(),
            priority: 0,
        }
    }

    pub fn with_end(mut self, end: ComponentStore) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_tags(mut self, tags: &[Tag]) -> Self {
        self.tags.extend(tags.iter().copied());
        self
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    /// Re-slice `text` after the span changed.
    pub fn set_span(&mut self, source: &str, span: Span) {
        self.span = span;
        self.text = source
            .get(span.start..span.end())
            .unwrap_or_default()
            .to_string();
    }

    pub fn resolve_start(&self) -> Result<NaiveDateTime> {
        self.start.resolve(self.reference)
    }

    pub fn resolve_end(&self) -> Result<Option<NaiveDateTime>> {
        self.end
            .as_ref()
            .map(|end| end.resolve(self.reference))
            .transpose()
    }

    /// Convert into the caller-facing shape.
    pub fn into_result(self) -> Result<ParsedResult> {
        let start = ResolvedMoment::from_store(&self.start, self.reference)?;
        let end = self
            .end
            .as_ref()
            .map(|end| ResolvedMoment::from_store(end, self.reference))
            .transpose()?;

        Ok(ParsedResult {
            index: self.span.start,
            length: self.span.len,
            text: self.text,
            start,
            end,
            tags: self.tags.into_iter().collect(),
        })
    }
}

// ============================================================================
// Output
// ============================================================================

/// A fully resolved date/time with the certainty of each field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMoment {
    pub datetime: NaiveDateTime,
    /// Minutes east of UTC, when a timezone was stated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone_offset: Option<i32>,
    pub certain: Vec<TemporalField>,
    pub implied: Vec<TemporalField>,
}

impl ResolvedMoment {
    fn from_store(store: &ComponentStore, reference: NaiveDateTime) -> Result<Self> {
        Ok(Self {
            datetime: store.resolve(reference)?,
            timezone_offset: store.get(TemporalField::TimezoneOffset),
            certain: store.certain_fields().collect(),
            implied: store.implied_fields().collect(),
        })
    }

    pub fn is_certain(&self, field: TemporalField) -> bool {
        self.certain.contains(&field)
    }

    /// The moment as an offset-aware timestamp, if a timezone was stated.
    pub fn with_offset(&self) -> Option<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(self.timezone_offset? * 60)?;
        offset.from_local_datetime(&self.datetime).single()
    }
}

/// One extracted date/time expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResult {
    /// Byte offset of the match in the input.
    pub index: usize,
    /// Byte length of the match.
    pub length: usize,
    pub text: String,
    pub start: ResolvedMoment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<ResolvedMoment>,
    pub tags: Vec<Tag>,
}

impl std::fmt::Display for ParsedResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.end {
            Some(end) => write!(
                f,
                "\"{}\" @{}: {} -> {}",
                self.text, self.index, self.start.datetime, end.datetime
            ),
            None => write!(f, "\"{}\" @{}: {}", self.text, self.index, self.start.datetime),
        }
    }
}
