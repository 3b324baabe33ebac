//! Default end assignment for single-date candidates.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{skip_invalid, Refiner};
use crate::calendar::{self, components_of};
use crate::candidate::{Candidate, Tag};
use crate::components::{ComponentStore, TemporalField};
use crate::error::Result;

/// How to derive an end from a candidate's start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndRule {
    /// End on the same day as the start.
    SameDay,
    /// End on the last day of the start's month.
    MonthEnd,
    /// End on December 31st of the start's year.
    YearEnd,
    /// End on the reference day ("this year so far").
    UntilReference,
}

/// Build the end store for `candidate` under `rule`.
///
/// Only implied fields are written; certain fields of the start carry over
/// unchanged.
pub fn period_end(candidate: &Candidate, rule: EndRule) -> Result<ComponentStore> {
    let mut end = candidate.start.clone();
    let start = candidate.start.resolve(candidate.reference)?;
    let parts = components_of(start);

    match rule {
        EndRule::SameDay => {}
        EndRule::MonthEnd => {
            imply_unless_certain(&mut end, TemporalField::Day, last_day(parts.year, parts.month)?)?;
        }
        EndRule::YearEnd => {
            imply_unless_certain(&mut end, TemporalField::Month, 12)?;
            let month = end.get(TemporalField::Month).unwrap_or(12);
            imply_unless_certain(&mut end, TemporalField::Day, last_day(parts.year, month)?)?;
        }
        EndRule::UntilReference => {
            let now = components_of(candidate.reference);
            imply_unless_certain(&mut end, TemporalField::Year, now.year)?;
            imply_unless_certain(&mut end, TemporalField::Month, now.month)?;
            imply_unless_certain(&mut end, TemporalField::Day, now.day)?;
        }
    }

    end.resolve(candidate.reference)?;
    Ok(end)
}

fn imply_unless_certain(store: &mut ComponentStore, field: TemporalField, value: i32) -> Result<()> {
    if !store.is_certain(field) {
        store.imply(field, value)?;
    }
    Ok(())
}

fn last_day(year: i32, month: i32) -> Result<i32> {
    calendar::days_in_month(year, month).ok_or(crate::error::DateSiftError::InvalidMoment {
        year,
        month,
        day: 1,
        hour: 0,
        minute: 0,
        second: 0,
    })
}

/// Gives end-less candidates an end chosen by their provenance tags.
///
/// Rules are checked in order and the first tag the candidate carries wins.
/// Candidates matching no rule stay end-less.
#[derive(Debug, Clone)]
pub struct DefaultEndRefiner {
    rules: Vec<(Tag, EndRule)>,
}

impl DefaultEndRefiner {
    pub fn new(rules: Vec<(Tag, EndRule)>) -> Self {
        Self { rules }
    }

    pub fn rule_for(&self, candidate: &Candidate) -> Option<EndRule> {
        self.rules
            .iter()
            .find(|(tag, _)| candidate.has_tag(*tag))
            .map(|(_, rule)| *rule)
    }
}

impl Refiner for DefaultEndRefiner {
    fn name(&self) -> &'static str {
        "default_end"
    }

    fn refine(&self, _text: &str, candidates: Vec<Candidate>) -> Result<Vec<Candidate>> {
        candidates
            .into_iter()
            .map(|mut candidate| {
                if candidate.end.is_some() {
                    return Ok(candidate);
                }
                let Some(rule) = self.rule_for(&candidate) else {
                    return Ok(candidate);
                };
                match skip_invalid(period_end(&candidate, rule))? {
                    Some(end) => {
                        candidate.end = Some(end);
                        candidate.tags.insert(Tag::DefaultEnd);
                    }
                    None => debug!(text = %candidate.text, ?rule, "Could not derive default end"),
                }
                Ok(candidate)
            })
            .collect()
    }

    fn required_tags(&self) -> Vec<Tag> {
        self.rules.iter().map(|(tag, _)| *tag).collect()
    }
}
