//! datesift: natural-language date/time extraction
//!
//! Finds dates, times and date ranges in free text ("next Friday at 3pm",
//! "2025年", "vom 3. bis 5. März") and resolves them against a reference
//! moment. Every resolved field records whether the text stated it or it
//! was filled in from context.

pub mod calendar;
pub mod candidate;
pub mod components;
pub mod config;
pub mod error;
pub mod extraction;
pub mod locales;
pub mod mode;
pub mod refiners;

pub use candidate::{Candidate, ParsedResult, ResolvedMoment, Span, Tag};
pub use components::{ComponentStore, FieldValue, TemporalField};
pub use config::{Config, FilterConfig, LoggingConfig, ParserConfig};
pub use error::{ConfigError, DateSiftError, Result};
pub use extraction::matcher::{Matcher, MatcherDef, PatternMatcher};
pub use extraction::{parse, DateExtractor};
pub use locales::Locale;
pub use mode::{Correction, ModeConfiguration, Strictness};
pub use refiners::{
    CorrectionDirection, DateCorrectionRefiner, DateRangeMergeRefiner, DateTimeMergeRefiner,
    DefaultEndRefiner, EndRule, OverlapRemovalRefiner, RangeConnector, Refiner,
    TimezoneAbbrRefiner, TimezoneOffsetRefiner, UnlikelyFormatFilter, YearRemovalRefiner,
};
