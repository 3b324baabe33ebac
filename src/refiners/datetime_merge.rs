//! Joins a date-only candidate with an adjacent time-only one.

use regex::Regex;
use tracing::debug;

use super::{gap_between, skip_invalid, sort_by_offset, Refiner};
use crate::calendar::shift_days;
use crate::candidate::{Candidate, Tag};
use crate::components::{ComponentStore, FieldValue, TemporalField};
use crate::error::{ConfigError, Result};

const CLOCK_FIELDS: [TemporalField; 5] = [
    TemporalField::Hour,
    TemporalField::Minute,
    TemporalField::Second,
    TemporalField::Meridiem,
    TemporalField::TimezoneOffset,
];

/// Merges "January 5" + "3pm" into one candidate when only whitespace or a
/// short joiner ("at", ",", "の") separates them.
pub struct DateTimeMergeRefiner {
    joiner: Regex,
}

impl DateTimeMergeRefiner {
    pub fn new(joiner: &str) -> std::result::Result<Self, ConfigError> {
        let joiner = Regex::new(joiner).map_err(|source| ConfigError::Pattern {
            name: "datetime_joiner".to_string(),
            source,
        })?;
        Ok(Self { joiner })
    }

    fn should_merge(&self, text: &str, first: &Candidate, second: &Candidate) -> bool {
        let shapes_fit = (first.start.is_date_only() && second.start.is_time_only())
            || (first.start.is_time_only() && second.start.is_date_only());
        if !shapes_fit {
            return false;
        }
        gap_between(text, first, second).is_some_and(|gap| self.joiner.is_match(gap))
    }

    fn merge(&self, text: &str, first: Candidate, second: Candidate) -> Result<Option<Candidate>> {
        let (date, time) = if first.start.is_date_only() {
            (&first, &second)
        } else {
            (&second, &first)
        };

        if conflicts(&date.start, &time.start) {
            return Ok(None);
        }

        let start = layer(&date.start, &time.start)?;
        let end = match (&date.end, &time.end) {
            (None, None) => None,
            (Some(date_end), None) => Some(layer(date_end, &time.start)?),
            (Some(date_end), Some(time_end)) => Some(layer(date_end, time_end)?),
            (None, Some(time_end)) => {
                let mut end = borrow_date(time_end, &date.start)?;
                let reference = date.reference;
                let (Some(start_at), Some(end_at)) = (
                    skip_invalid(start.resolve(reference))?,
                    skip_invalid(end.resolve(reference))?,
                ) else {
                    return Ok(None);
                };
                // "Jan 5 11pm-2am" ends on the following day.
                if end_at < start_at {
                    end.imply_date(shift_days(end_at, 1))?;
                }
                Some(end)
            }
        };

        let span = first.span.cover(&second.span);
        let priority = first.priority.min(second.priority);
        let mut tags = first.tags.clone();
        tags.extend(second.tags.iter().copied());
        tags.insert(Tag::DateTimeMerged);

        let mut merged = first;
        merged.set_span(text, span);
        merged.start = start;
        merged.end = end;
        merged.priority = priority;
        merged.tags = tags;

        debug!(text = %merged.text, "Merged date and time");
        Ok(Some(merged))
    }
}

/// True if both stores state a different value for the same field.
fn conflicts(date: &ComponentStore, time: &ComponentStore) -> bool {
    TemporalField::ALL.iter().any(|field| {
        matches!(
            (date.value(*field), time.value(*field)),
            (FieldValue::Certain(a), FieldValue::Certain(b)) if a != b
        )
    })
}

/// Date store with the time store's clock fields laid on top. Date fields
/// the time store only implies fill gaps in the date store.
fn layer(date: &ComponentStore, time: &ComponentStore) -> Result<ComponentStore> {
    let mut merged = date.clone();
    for field in CLOCK_FIELDS {
        match time.value(field) {
            FieldValue::Certain(value) => {
                merged.assign(field, value);
            }
            FieldValue::Implied(value) if !merged.is_certain(field) => {
                merged.imply(field, value)?;
            }
            _ => {}
        }
    }
    for field in TemporalField::DATE {
        if let FieldValue::Implied(value) = time.value(field) {
            merged.imply_default(field, value);
        }
    }
    Ok(merged)
}

/// Time-range end with the date of `date` implied into it.
fn borrow_date(time_end: &ComponentStore, date: &ComponentStore) -> Result<ComponentStore> {
    let mut end = time_end.clone();
    for field in TemporalField::DATE {
        if end.is_certain(field) {
            continue;
        }
        if let Some(value) = date.get(field) {
            end.imply(field, value)?;
        }
    }
    Ok(end)
}

impl Refiner for DateTimeMergeRefiner {
    fn name(&self) -> &'static str {
        "date_time_merge"
    }

    fn refine(&self, text: &str, mut candidates: Vec<Candidate>) -> Result<Vec<Candidate>> {
        sort_by_offset(&mut candidates);

        let mut merged: Vec<Candidate> = Vec::with_capacity(candidates.len());
        let mut pending: Option<Candidate> = None;

        for next in candidates {
            let Some(current) = pending.take() else {
                pending = Some(next);
                continue;
            };

            if self.should_merge(text, &current, &next) {
                let fallback = (current.clone(), next.clone());
                match self.merge(text, current, next)? {
                    Some(joined) => pending = Some(joined),
                    None => {
                        merged.push(fallback.0);
                        pending = Some(fallback.1);
                    }
                }
            } else {
                merged.push(current);
                pending = Some(next);
            }
        }

        merged.extend(pending);
        Ok(merged)
    }
}
