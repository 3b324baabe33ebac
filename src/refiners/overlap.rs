//! Overlap removal.

use tracing::debug;

use super::{sort_by_offset, Refiner};
use crate::candidate::Candidate;
use crate::error::Result;

/// Keeps one candidate per cluster of intersecting spans.
///
/// Longer spans win; on equal length the candidate whose matcher was
/// registered first wins. Losers are dropped, never merged.
#[derive(Debug, Default, Clone, Copy)]
pub struct OverlapRemovalRefiner;

impl Refiner for OverlapRemovalRefiner {
    fn name(&self) -> &'static str {
        "overlap_removal"
    }

    fn refine(&self, _text: &str, mut candidates: Vec<Candidate>) -> Result<Vec<Candidate>> {
        if candidates.len() < 2 {
            return Ok(candidates);
        }

        candidates.sort_by(|a, b| {
            b.span
                .len
                .cmp(&a.span.len)
                .then(a.priority.cmp(&b.priority))
                .then(a.span.start.cmp(&b.span.start))
        });

        let mut kept: Vec<Candidate> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if kept.iter().any(|k| k.span.intersects(&candidate.span)) {
                debug!(text = %candidate.text, offset = candidate.span.start, "Dropping overlapped candidate");
                continue;
            }
            kept.push(candidate);
        }

        sort_by_offset(&mut kept);
        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Tag;
    use crate::components::{ComponentStore, TemporalField};
    use crate::refiners::test_support::candidate;

    fn year(value: i32) -> ComponentStore {
        ComponentStore::new().with(TemporalField::Year, value)
    }

    #[test]
    fn test_longest_span_wins() {
        let text = "due March 2024 please";
        let candidates = vec![
            candidate(text, "2024", year(2024), &[Tag::PlainYear], 0),
            candidate(text, "March 2024", year(2024), &[Tag::MonthName], 1),
        ];
        let out = OverlapRemovalRefiner.refine(text, candidates).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "March 2024");
    }

    #[test]
    fn test_tie_goes_to_earlier_matcher() {
        let text = "on 12:30 sharp";
        let candidates = vec![
            candidate(text, "12:30", year(1), &[Tag::Time], 3),
            candidate(text, "12:30", year(2), &[Tag::CasualTime], 1),
        ];
        let out = OverlapRemovalRefiner.refine(text, candidates).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].priority, 1);
        assert!(out[0].has_tag(Tag::CasualTime));
    }

    #[test]
    fn test_disjoint_candidates_sorted_by_offset() {
        let text = "2022 then 2020";
        let candidates = vec![
            candidate(text, "2020", year(2020), &[Tag::PlainYear], 0),
            candidate(text, "2022", year(2022), &[Tag::PlainYear], 0),
        ];
        let out = OverlapRemovalRefiner.refine(text, candidates).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].text, "2022");
        assert_eq!(out[1].text, "2020");
    }

    #[test]
    fn test_idempotent() {
        let text = "March 2024 and 2025-01-05";
        let candidates = vec![
            candidate(text, "2024", year(2024), &[Tag::PlainYear], 2),
            candidate(text, "March 2024", year(2024), &[Tag::MonthName], 1),
            candidate(text, "2025", year(2025), &[Tag::PlainYear], 2),
            candidate(text, "2025-01-05", year(2025), &[Tag::IsoDate], 0),
        ];
        let once = OverlapRemovalRefiner.refine(text, candidates).unwrap();
        let twice = OverlapRemovalRefiner.refine(text, once.clone()).unwrap();
        let spans = |list: &[Candidate]| list.iter().map(|c| c.span).collect::<Vec<_>>();
        assert_eq!(spans(&once), spans(&twice));
        assert_eq!(once.len(), 2);
    }
}
