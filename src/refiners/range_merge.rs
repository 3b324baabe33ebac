//! Date range merging: "from 2020 to 2022", "between Jan 5 and Jan 10".

use regex::Regex;
use tracing::debug;

use super::default_end::{period_end, EndRule};
use super::{gap_between, skip_invalid, sort_by_offset, Refiner};
use crate::calendar::{components_of, shift_days};
use crate::candidate::{Candidate, Span, Tag};
use crate::components::{ComponentStore, TemporalField};
use crate::error::{ConfigError, Result};

/// A connector between two dates, optionally gated on a word before the first.
#[derive(Debug, Clone)]
pub struct RangeConnector {
    /// Must match the whole text between the two candidates.
    pub connector: Regex,
    /// When set, must match the text right before the first candidate.
    pub trigger: Option<Regex>,
}

impl RangeConnector {
    pub fn new(connector: &str, trigger: Option<&str>) -> std::result::Result<Self, ConfigError> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|source| ConfigError::Pattern {
                name: "range_connector".to_string(),
                source,
            })
        };
        Ok(Self {
            connector: compile(connector)?,
            trigger: trigger.map(compile).transpose()?,
        })
    }

    /// Where the merged span starts if this connector joins the pair: at the
    /// trigger word when there is one ("between ..."), otherwise at the end of
    /// `before`, which is where the first candidate starts.
    fn join_start(&self, gap: &str, before: &str) -> Option<usize> {
        if !self.connector.is_match(gap) {
            return None;
        }
        match &self.trigger {
            Some(trigger) => trigger.find(before).map(|m| m.start()),
            None => Some(before.len()),
        }
    }
}

/// Merges two adjacent candidates joined by a range connector into one
/// candidate spanning both.
pub struct DateRangeMergeRefiner {
    connectors: Vec<RangeConnector>,
    /// Period rules used to widen the end ("to 2022" ends on Dec 31).
    end_rules: Vec<(Tag, EndRule)>,
}

impl DateRangeMergeRefiner {
    pub fn new(connectors: Vec<RangeConnector>, end_rules: Vec<(Tag, EndRule)>) -> Self {
        Self {
            connectors,
            end_rules,
        }
    }

    /// Start offset of the merged span, or `None` if the pair is not a range.
    fn merge_start(&self, text: &str, first: &Candidate, second: &Candidate) -> Option<usize> {
        if first.end.is_some() {
            return None;
        }
        let gap = gap_between(text, first, second)?;
        let before = text.get(..first.span.start).unwrap_or_default();
        self.connectors.iter().find_map(|c| c.join_start(gap, before))
    }

    /// The end store `candidate` contributes when it closes a range.
    fn end_of(&self, candidate: &Candidate) -> Result<ComponentStore> {
        if let Some(end) = &candidate.end {
            return Ok(end.clone());
        }
        let rule = self
            .end_rules
            .iter()
            .find(|(tag, rule)| candidate.has_tag(*tag) && *rule != EndRule::SameDay)
            .map(|(_, rule)| *rule);
        match rule {
            Some(rule) => period_end(candidate, rule),
            None => Ok(candidate.start.clone()),
        }
    }

    fn merge(
        &self,
        text: &str,
        span_start: usize,
        first: Candidate,
        second: Candidate,
    ) -> Result<Option<Candidate>> {
        let Some(mut end) = skip_invalid(self.end_of(&second))? else {
            return Ok(None);
        };
        let mut start = first.start.clone();

        // "Jan 5 3pm to 5pm": the end borrows the start's date.
        let end_has_date = TemporalField::DATE.iter().any(|f| end.is_certain(*f))
            || end.is_certain(TemporalField::Weekday);
        if !end_has_date {
            for field in TemporalField::DATE {
                if let Some(value) = start.get(field) {
                    end.imply(field, value)?;
                }
            }
        }
        share_offset(&mut start, &mut end);

        let reference = first.reference;
        let (Some(start_at), Some(end_at)) = (
            skip_invalid(start.resolve(reference))?,
            skip_invalid(end.resolve(reference))?,
        ) else {
            return Ok(None);
        };

        if end_at < start_at {
            if end.is_certain(TemporalField::Month) && !end.is_certain(TemporalField::Year) {
                let year = components_of(end_at).year + 1;
                end.imply(TemporalField::Year, year)?;
            } else if !TemporalField::DATE.iter().any(|f| end.is_certain(*f)) {
                let days = if end.is_weekday_only() { 7 } else { 1 };
                end.imply_date(shift_days(end_at, days))?;
            } else {
                // "from 2022 to 2020": the second date opens the range and the
                // first, widened to its own period, closes it.
                let Some(mut reversed_end) = skip_invalid(self.end_of(&first))? else {
                    return Ok(None);
                };
                start = second.start.clone();
                share_offset(&mut start, &mut reversed_end);
                end = reversed_end;
            }
            if skip_invalid(end.resolve(reference))?.is_none() {
                return Ok(None);
            }
        }

        let span = first
            .span
            .cover(&second.span)
            .cover(&Span::from_range(span_start, first.span.start));
        let mut merged = first;
        merged.set_span(text, span);
        merged.start = start;
        merged.end = Some(end);
        merged.priority = merged.priority.min(second.priority);
        merged.tags.extend(second.tags);
        merged.tags.insert(Tag::RangeMerged);

        debug!(text = %merged.text, "Merged date range");
        Ok(Some(merged))
    }
}

/// "3pm to 5pm EST": an offset stated on one side covers the whole range.
fn share_offset(start: &mut ComponentStore, end: &mut ComponentStore) {
    let field = TemporalField::TimezoneOffset;
    match (start.is_certain(field), end.is_certain(field)) {
        (true, false) => {
            if let Some(offset) = start.get(field) {
                end.assign(field, offset);
            }
        }
        (false, true) => {
            if let Some(offset) = end.get(field) {
                start.assign(field, offset);
            }
        }
        _ => {}
    }
}

impl Refiner for DateRangeMergeRefiner {
    fn name(&self) -> &'static str {
        "date_range_merge"
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

            if let Some(span_start) = self.merge_start(text, &current, &next) {
                let fallback = (current.clone(), next.clone());
                match self.merge(text, span_start, current, next)? {
                    Some(range) => pending = Some(range),
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
