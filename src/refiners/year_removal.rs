//! Drops plain-year candidates that sit inside a longer match.

use tracing::debug;

use super::Refiner;
use crate::candidate::{Candidate, Tag};
use crate::error::Result;

/// Removes a bare year ("2024") when another candidate's span already covers
/// it ("March 2024").
#[derive(Debug, Default, Clone, Copy)]
pub struct YearRemovalRefiner;

impl Refiner for YearRemovalRefiner {
    fn name(&self) -> &'static str {
        "year_removal"
    }

    fn refine(&self, _text: &str, candidates: Vec<Candidate>) -> Result<Vec<Candidate>> {
        let redundant: Vec<bool> = candidates
            .iter()
            .map(|year| {
                year.has_tag(Tag::PlainYear)
                    && candidates.iter().any(|other| {
                        other.span.len > year.span.len && other.span.contains(&year.span)
                    })
            })
            .collect();

        Ok(candidates
            .into_iter()
            .zip(redundant)
            .filter_map(|(candidate, drop)| {
                if drop {
                    debug!(text = %candidate.text, "Dropping contained plain year");
                    None
                } else {
                    Some(candidate)
                }
            })
            .collect())
    }

    fn required_tags(&self) -> Vec<Tag> {
        vec![Tag::PlainYear]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ComponentStore, TemporalField};
    use crate::refiners::test_support::candidate;

    #[test]
    fn test_contained_year_removed() {
        let text = "in March 2024";
        let store = ComponentStore::new().with(TemporalField::Year, 2024);
        let candidates = vec![
            candidate(text, "2024", store.clone(), &[Tag::PlainYear], 0),
            candidate(text, "March 2024", store, &[Tag::MonthName], 1),
        ];
        let out = YearRemovalRefiner.refine(text, candidates).unwrap();
        assert_eq!(out.len(), 1);
        assert!(out[0].has_tag(Tag::MonthName));
    }

    #[test]
    fn test_standalone_year_kept() {
        let text = "from 2020 to 2022";
        let candidates = vec![
            candidate(
                text,
                "2020",
                ComponentStore::new().with(TemporalField::Year, 2020),
                &[Tag::PlainYear],
                0,
            ),
            candidate(
                text,
                "2022",
                ComponentStore::new().with(TemporalField::Year, 2022),
                &[Tag::PlainYear],
                0,
            ),
        ];
        let out = YearRemovalRefiner.refine(text, candidates).unwrap();
        assert_eq!(out.len(), 2);
    }
}
