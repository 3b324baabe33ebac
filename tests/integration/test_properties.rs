//! Properties that hold across inputs rather than for one fixed example.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use datesift::{
    parse, Candidate, ComponentStore, Correction, FilterConfig, Locale, Matcher,
    ModeConfiguration, OverlapRemovalRefiner, ParsedResult, Refiner, Span, Strictness, Tag,
    TemporalField,
};

fn reference() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 20)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn mode(correction: Correction) -> ModeConfiguration {
    ModeConfiguration::for_locale(
        Locale::En,
        Strictness::Casual,
        correction,
        &FilterConfig::default(),
    )
    .unwrap()
}

const SAMPLES: &[&str] = &[
    "tomorrow at 3pm",
    "March 2024",
    "from 2020 to 2022",
    "2025-12-01T10:30:00",
    "between January 5 and January 10",
    "Dec 20 - Jan 5",
];

fn certain_fields(result: &ParsedResult) -> BTreeSet<TemporalField> {
    let mut fields: BTreeSet<TemporalField> = result.start.certain.iter().copied().collect();
    if let Some(end) = &result.end {
        fields.extend(end.certain.iter().copied());
    }
    fields
}

#[test]
fn test_overlap_removal_is_idempotent() {
    let text = "on March 5 2025 at noon";
    let store = || ComponentStore::new().with(TemporalField::Month, 3);
    let candidates = vec![
        Candidate::new(text, Span::new(3, 12), reference(), store()).with_tags(&[Tag::MonthNameDay]),
        Candidate::new(text, Span::new(3, 5), reference(), store()).with_tags(&[Tag::MonthName]),
        Candidate::new(text, Span::new(11, 4), reference(), store()).with_tags(&[Tag::PlainYear]),
        Candidate::new(text, Span::new(19, 4), reference(), store()).with_tags(&[Tag::CasualTime]),
    ];

    let once = OverlapRemovalRefiner.refine(text, candidates).unwrap();
    let twice = OverlapRemovalRefiner.refine(text, once.clone()).unwrap();

    let spans = |list: &[Candidate]| list.iter().map(|c| c.span).collect::<Vec<_>>();
    assert_eq!(spans(&once), spans(&twice));
    assert_eq!(spans(&once), vec![Span::new(3, 12), Span::new(19, 4)]);
}

#[test]
fn test_refinement_never_loses_certainty() {
    let mode = mode(Correction::Backward);
    for text in SAMPLES {
        let results = parse(text, reference(), &mode).unwrap();
        assert!(!results.is_empty(), "no result for {:?}", text);

        let raw: Vec<Candidate> = mode
            .matchers()
            .iter()
            .flat_map(|m| m.find(text, reference()))
            .collect();

        for result in &results {
            let covered = Span::new(result.index, result.length);
            let certain = certain_fields(result);
            for candidate in raw.iter().filter(|c| covered.contains(&c.span)) {
                for field in candidate.start.certain_fields() {
                    assert!(
                        certain.contains(&field),
                        "{:?} lost certainty of {:?} from {:?}",
                        text,
                        field,
                        candidate.text
                    );
                }
            }
        }
    }
}

#[test]
fn test_certain_and_implied_are_disjoint() {
    let mode = mode(Correction::Forward);
    for text in SAMPLES {
        for result in parse(text, reference(), &mode).unwrap() {
            let moments = std::iter::once(&result.start).chain(result.end.as_ref());
            for moment in moments {
                for field in &moment.implied {
                    assert!(!moment.certain.contains(field), "{:?}: {:?}", text, field);
                }
            }
            if let Some(end) = &result.end {
                assert!(end.datetime >= result.start.datetime, "{:?} ends before it starts", text);
            }
        }
    }
}

#[test]
fn test_surrounding_text_does_not_change_result() {
    let mode = mode(Correction::None);
    for text in SAMPLES {
        let alone = parse(text, reference(), &mode).unwrap();
        let prefix = "Meeting notes: ";
        let embedded_text = format!("{}{}, please confirm.", prefix, text);
        let embedded = parse(&embedded_text, reference(), &mode).unwrap();

        assert_eq!(alone.len(), embedded.len(), "{:?}", text);
        for (a, b) in alone.iter().zip(&embedded) {
            assert_eq!(a.text, b.text);
            assert_eq!(a.index + prefix.len(), b.index);
            assert_eq!(a.start, b.start);
            assert_eq!(a.end, b.end);
            assert_eq!(&embedded_text[b.index..b.index + b.length], b.text);
        }
    }
}

#[test]
fn test_matched_text_reparses_to_same_result() {
    let mode = mode(Correction::None);
    for text in SAMPLES {
        for result in parse(text, reference(), &mode).unwrap() {
            let again = parse(&result.text, reference(), &mode).unwrap();
            assert_eq!(again.len(), 1, "{:?} split into {:?}", result.text, again);
            assert_eq!(again[0].text, result.text);
            assert_eq!(again[0].start, result.start, "{:?}", result.text);
            assert_eq!(again[0].end, result.end, "{:?}", result.text);
        }
    }
}

#[test]
fn test_corrected_weekday_within_a_week() {
    let names = [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ];
    let backward = mode(Correction::Backward);
    let forward = mode(Correction::Forward);

    for offset in 0..14 {
        let reference = reference() + Duration::days(offset);
        let today = reference.date();
        for name in names {
            let past = parse(name, reference, &backward).unwrap();
            let past = past[0].start.datetime.date();
            assert!(past <= today && today - past < Duration::days(7), "{} from {}", name, today);

            let next = parse(name, reference, &forward).unwrap();
            let next = next[0].start.datetime.date();
            assert!(next >= today && next - today < Duration::days(7), "{} from {}", name, today);
        }
    }
}
