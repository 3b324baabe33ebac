//! Mode configuration: the ordered matchers and refinement stages for one
//! language and strictness setting.
//!
//! A mode is assembled once, validated, and then shared by reference across
//! any number of `parse` calls. Nothing in it is mutated after construction.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::candidate::Tag;
use crate::config::{FilterConfig, ParserConfig};
use crate::error::ConfigError;
use crate::extraction::matcher::{Matcher, PatternMatcher};
use crate::locales::Locale;
use crate::refiners::{
    CorrectionDirection, DateCorrectionRefiner, DateRangeMergeRefiner, DateTimeMergeRefiner,
    DefaultEndRefiner, OverlapRemovalRefiner, RangeConnector, Refiner, TimezoneAbbrRefiner,
    TimezoneOffsetRefiner, UnlikelyFormatFilter, YearRemovalRefiner,
};

// ============================================================================
// Settings enums
// ============================================================================

/// Whether casual matchers (weekday names, "tomorrow", "tonight") are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    #[default]
    Casual,
    Strict,
}

impl FromStr for Strictness {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "casual" => Ok(Strictness::Casual),
            "strict" => Ok(Strictness::Strict),
            other => Err(ConfigError::Invalid(format!("unknown strictness '{}'", other))),
        }
    }
}

/// Which way open-ended dates ("December 5", "Monday") are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Correction {
    /// Leave them where the matcher put them.
    #[default]
    None,
    /// Prefer the upcoming occurrence.
    Forward,
    /// Prefer the most recent occurrence.
    Backward,
}

impl Correction {
    fn direction(self) -> Option<CorrectionDirection> {
        match self {
            Correction::None => None,
            Correction::Forward => Some(CorrectionDirection::Forward),
            Correction::Backward => Some(CorrectionDirection::Backward),
        }
    }
}

impl FromStr for Correction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Correction::None),
            "forward" => Ok(Correction::Forward),
            "backward" => Ok(Correction::Backward),
            other => Err(ConfigError::Invalid(format!("unknown correction '{}'", other))),
        }
    }
}

// ============================================================================
// Mode Configuration
// ============================================================================

/// Ordered matchers and refinement stages.
///
/// A matcher's position in the list is its priority: when two candidates of
/// equal length overlap, the one from the earlier matcher wins.
pub struct ModeConfiguration {
    matchers: Vec<Box<dyn Matcher>>,
    refiners: Vec<Box<dyn Refiner>>,
}

impl ModeConfiguration {
    /// Validate and build a mode.
    ///
    /// Fails if there are no matchers, or if a stage declares tags it acts on
    /// and no matcher produces any of them.
    pub fn new(
        matchers: Vec<Box<dyn Matcher>>,
        refiners: Vec<Box<dyn Refiner>>,
    ) -> Result<Self, ConfigError> {
        if matchers.is_empty() {
            return Err(ConfigError::EmptyMode);
        }

        let produced: BTreeSet<Tag> = matchers
            .iter()
            .flat_map(|m| m.produces().iter().copied())
            .collect();

        for refiner in &refiners {
            let required = refiner.required_tags();
            if !required.is_empty() && !required.iter().any(|tag| produced.contains(tag)) {
                return Err(ConfigError::UnproducedTag {
                    stage: refiner.name().to_string(),
                    tags: format!("{:?}", required),
                });
            }
        }

        Ok(Self { matchers, refiners })
    }

    /// The standard chain for a bundled locale.
    pub fn for_locale(
        locale: Locale,
        strictness: Strictness,
        correction: Correction,
        filter: &FilterConfig,
    ) -> Result<Self, ConfigError> {
        let pack = locale.pack();

        let defs = match strictness {
            Strictness::Casual => pack.casual.iter().chain(pack.base.iter()).collect::<Vec<_>>(),
            Strictness::Strict => pack.base.iter().collect(),
        };
        let matchers = defs
            .into_iter()
            .map(|def| PatternMatcher::compile(def).map(|m| Box::new(m) as Box<dyn Matcher>))
            .collect::<Result<Vec<_>, _>>()?;

        let connectors = pack
            .range_connectors
            .iter()
            .map(|(connector, trigger)| RangeConnector::new(connector, *trigger))
            .collect::<Result<Vec<_>, _>>()?;

        let mut refiners: Vec<Box<dyn Refiner>> = vec![
            Box::new(UnlikelyFormatFilter::new(
                &filter.unlikely_patterns,
                &filter.unlikely_suffixes,
                &filter.unlikely_prefixes,
            )?),
            Box::new(YearRemovalRefiner),
            Box::new(OverlapRemovalRefiner),
            Box::new(DateTimeMergeRefiner::new(pack.datetime_joiner)?),
            Box::new(TimezoneAbbrRefiner::new()?),
            Box::new(TimezoneOffsetRefiner::new()?),
            Box::new(DateRangeMergeRefiner::new(connectors, pack.end_rules.clone())),
        ];
        if let Some(direction) = correction.direction() {
            refiners.push(Box::new(DateCorrectionRefiner::new(direction)));
        }
        refiners.push(Box::new(DefaultEndRefiner::new(pack.end_rules)));

        debug!(
            %locale,
            ?strictness,
            ?correction,
            matchers = matchers.len(),
            stages = refiners.len(),
            "Assembled mode configuration"
        );
        Self::new(matchers, refiners)
    }

    /// Build from the `[parser]` and `[filter]` config sections.
    pub fn from_settings(parser: &ParserConfig, filter: &FilterConfig) -> Result<Self, ConfigError> {
        Self::for_locale(parser.locale, parser.strictness, parser.correction, filter)
    }

    pub fn matchers(&self) -> &[Box<dyn Matcher>] {
        &self.matchers
    }

    pub fn refiners(&self) -> &[Box<dyn Refiner>] {
        &self.refiners
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.refiners.iter().map(|r| r.name()).collect()
    }
}

impl fmt::Debug for ModeConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeConfiguration")
            .field(
                "matchers",
                &self.matchers.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .field("refiners", &self.stage_names())
            .finish()
    }
}
