//! Refinement chain stages.
//!
//! Each stage takes the full candidate list produced by the previous stage and
//! returns a new list. Stages run one after another in the order the mode
//! configuration lists them; none of them sees candidates an earlier stage
//! dropped.
//!
//! ```text
//! matchers ─► unlikely filter ─► year removal ─► overlap removal
//!          ─► date/time merge ─► timezone (abbr, offset) ─► date range merge
//!          ─► forward/backward correction ─► default end ─► sorted output
//! ```

mod correction;
mod datetime_merge;
mod default_end;
mod overlap;
mod range_merge;
mod timezone;
mod unlikely;
mod year_removal;

pub use correction::{CorrectionDirection, DateCorrectionRefiner, MAX_YEAR_CORRECTION_STEPS};
pub use datetime_merge::DateTimeMergeRefiner;
pub use default_end::{period_end, DefaultEndRefiner, EndRule};
pub use overlap::OverlapRemovalRefiner;
pub use range_merge::{DateRangeMergeRefiner, RangeConnector};
pub use timezone::{TimezoneAbbrRefiner, TimezoneOffsetRefiner};
pub use unlikely::UnlikelyFormatFilter;
pub use year_removal::YearRemovalRefiner;

use crate::candidate::{Candidate, Tag};
use crate::error::{DateSiftError, Result};

/// One transform in the refinement chain.
pub trait Refiner: Send + Sync {
    /// Name used in logs and configuration errors.
    fn name(&self) -> &'static str;

    /// Refine the candidate list.
    fn refine(&self, text: &str, candidates: Vec<Candidate>) -> Result<Vec<Candidate>>;

    /// Tags this stage acts on. A non-empty list means the stage does nothing
    /// unless some matcher produces at least one of them.
    fn required_tags(&self) -> Vec<Tag> {
        Vec::new()
    }
}

/// Sort by span start, keeping discovery order for equal starts.
pub(crate) fn sort_by_offset(candidates: &mut [Candidate]) {
    candidates.sort_by_key(|c| c.span.start);
}

/// Treat an impossible date as "no result" and pass other errors through.
pub(crate) fn skip_invalid<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(DateSiftError::InvalidMoment { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Text strictly between two spans, or `None` if they overlap or the range
/// does not fall on character boundaries.
pub(crate) fn gap_between<'t>(text: &'t str, first: &Candidate, second: &Candidate) -> Option<&'t str> {
    let from = first.span.end();
    let to = second.span.start;
    if from > to {
        return None;
    }
    text.get(from..to)
}
