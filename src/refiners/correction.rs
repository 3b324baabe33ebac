//! Forward/backward date correction.
//!
//! Expressions like "December 5" or "Monday" leave the year or the week open.
//! In backward mode such a candidate that lands after the reference moment is
//! moved to its most recent past occurrence; forward mode mirrors this for
//! candidates that land before the reference moment. Only implied fields are
//! ever changed.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{skip_invalid, Refiner};
use crate::calendar::{components_of, shift_days};
use crate::candidate::{Candidate, Tag};
use crate::components::{ComponentStore, TemporalField};
use crate::error::Result;

/// Upper bound on year steps for a month-certain, year-implied candidate.
pub const MAX_YEAR_CORRECTION_STEPS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionDirection {
    /// Move open-ended dates into the past.
    Backward,
    /// Move open-ended dates into the future.
    Forward,
}

impl CorrectionDirection {
    fn year_step(self) -> i32 {
        match self {
            CorrectionDirection::Backward => -1,
            CorrectionDirection::Forward => 1,
        }
    }

    fn tag(self) -> Tag {
        match self {
            CorrectionDirection::Backward => Tag::BackwardCorrected,
            CorrectionDirection::Forward => Tag::ForwardCorrected,
        }
    }

    /// Whether `moment` sits on the wrong side of `reference`.
    ///
    /// Without a stated hour only the calendar day is compared, so "today"
    /// never counts as after "now".
    fn is_misplaced(self, store: &ComponentStore, moment: NaiveDateTime, reference: NaiveDateTime) -> bool {
        let timed = store.is_certain(TemporalField::Hour);
        match (self, timed) {
            (CorrectionDirection::Backward, true) => moment > reference,
            (CorrectionDirection::Backward, false) => moment.date() > reference.date(),
            (CorrectionDirection::Forward, true) => moment < reference,
            (CorrectionDirection::Forward, false) => moment.date() < reference.date(),
        }
    }

    /// Nearest occurrence of `weekday` on this side of `reference`.
    ///
    /// Backward: if the reference weekday is before the target, step into the
    /// previous week (`target - 7`); otherwise go back `ref - target` days.
    /// Either way this is `(ref - target) mod 7` days back, 0 to 6.
    pub fn nearest_weekday(self, reference: NaiveDateTime, weekday: i32) -> NaiveDateTime {
        let current = components_of(reference).weekday;
        let days = match self {
            CorrectionDirection::Backward => -((current - weekday).rem_euclid(7)),
            CorrectionDirection::Forward => (weekday - current).rem_euclid(7),
        };
        shift_days(reference, i64::from(days))
    }
}

/// Applies [`CorrectionDirection`] to every candidate whose year or week was
/// left open by the text.
#[derive(Debug, Clone, Copy)]
pub struct DateCorrectionRefiner {
    direction: CorrectionDirection,
}

impl DateCorrectionRefiner {
    pub fn new(direction: CorrectionDirection) -> Self {
        Self { direction }
    }

    pub fn backward() -> Self {
        Self::new(CorrectionDirection::Backward)
    }

    pub fn forward() -> Self {
        Self::new(CorrectionDirection::Forward)
    }

    fn correct(&self, candidate: &mut Candidate) -> Result<bool> {
        if candidate.start.is_certain(TemporalField::Month)
            && !candidate.start.is_certain(TemporalField::Year)
        {
            return self.correct_year(candidate);
        }
        if candidate.start.is_weekday_only() {
            return self.correct_weekday(candidate);
        }
        Ok(false)
    }

    fn correct_year(&self, candidate: &mut Candidate) -> Result<bool> {
        let reference = candidate.reference;
        let step = self.direction.year_step();
        let mut adjusted = false;

        for _ in 0..MAX_YEAR_CORRECTION_STEPS {
            if let Some(at) = skip_invalid(candidate.start.resolve(reference))? {
                if !self.direction.is_misplaced(&candidate.start, at, reference) {
                    break;
                }
            }

            let year = candidate
                .start
                .get(TemporalField::Year)
                .unwrap_or(components_of(reference).year);
            candidate.start.imply(TemporalField::Year, year + step)?;

            if let Some(end) = candidate.end.as_mut() {
                if !end.is_certain(TemporalField::Year) {
                    let end_year = end
                        .get(TemporalField::Year)
                        .unwrap_or(components_of(reference).year);
                    end.imply(TemporalField::Year, end_year + step)?;
                }
            }
            adjusted = true;
        }

        Ok(adjusted)
    }

    fn correct_weekday(&self, candidate: &mut Candidate) -> Result<bool> {
        let reference = candidate.reference;
        let Some(at) = skip_invalid(candidate.start.resolve(reference))? else {
            return Ok(false);
        };
        if !self.direction.is_misplaced(&candidate.start, at, reference) {
            return Ok(false);
        }
        let Some(weekday) = candidate.start.get(TemporalField::Weekday) else {
            return Ok(false);
        };

        let corrected = self.direction.nearest_weekday(reference, weekday);
        candidate.start.imply_date(corrected)?;

        if let Some(end) = candidate.end.as_mut() {
            if let (true, Some(end_weekday)) = (end.is_weekday_only(), end.get(TemporalField::Weekday)) {
                let mut end_date = self.direction.nearest_weekday(reference, end_weekday);
                // "Monday to Friday" must not end before it starts.
                if end_date.date() < corrected.date() {
                    let gap = (end_weekday - weekday).rem_euclid(7);
                    end_date = shift_days(corrected, i64::from(gap));
                }
                end.imply_date(end_date)?;
            }
        }

        Ok(true)
    }
}

impl Refiner for DateCorrectionRefiner {
    fn name(&self) -> &'static str {
        match self.direction {
            CorrectionDirection::Backward => "backward_correction",
            CorrectionDirection::Forward => "forward_correction",
        }
    }

    fn refine(&self, _text: &str, candidates: Vec<Candidate>) -> Result<Vec<Candidate>> {
        candidates
            .into_iter()
            .map(|mut candidate| {
                if self.correct(&mut candidate)? {
                    debug!(
                        text = %candidate.text,
                        direction = ?self.direction,
                        "Corrected open-ended date"
                    );
                    candidate.tags.insert(self.direction.tag());
                }
                Ok(candidate)
            })
            .collect()
    }
}
