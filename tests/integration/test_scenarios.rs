//! End-to-end extraction scenarios.

use chrono::{NaiveDate, NaiveDateTime};

use datesift::{
    parse, Correction, FilterConfig, Locale, ModeConfiguration, ParsedResult, Strictness, Tag,
    TemporalField,
};

/// Tuesday.
fn reference() -> NaiveDateTime {
    at(2026, 1, 20, 12, 0)
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn mode(locale: Locale, correction: Correction) -> ModeConfiguration {
    ModeConfiguration::for_locale(locale, Strictness::Casual, correction, &FilterConfig::default())
        .unwrap()
}

fn parse_in(locale: Locale, text: &str) -> Vec<ParsedResult> {
    parse(text, reference(), &mode(locale, Correction::None)).unwrap()
}

fn single(results: &[ParsedResult]) -> &ParsedResult {
    assert_eq!(results.len(), 1, "expected one result, got {:?}", results);
    &results[0]
}

#[test]
fn test_japanese_year_spans_whole_year() {
    let results = parse_in(Locale::Ja, "2025年のスターバックス支出");
    let result = single(&results);

    assert_eq!(result.text, "2025年");
    assert_eq!(result.index, 0);
    assert_eq!(result.start.datetime, at(2025, 1, 1, 12, 0));
    assert!(result.start.is_certain(TemporalField::Year));
    assert!(result.start.implied.contains(&TemporalField::Month));

    let end = result.end.as_ref().unwrap();
    assert_eq!(end.datetime, at(2025, 12, 31, 12, 0));
    assert!(result.tags.contains(&Tag::PlainYear));
    assert!(result.tags.contains(&Tag::DefaultEnd));
}

#[test]
fn test_japanese_this_year_ends_at_reference() {
    let results = parse_in(Locale::Ja, "今年のスターバックス支出");
    let result = single(&results);

    assert_eq!(result.text, "今年");
    assert_eq!(result.start.datetime, at(2026, 1, 1, 12, 0));
    assert_eq!(result.end.as_ref().unwrap().datetime, reference());
    assert!(result.tags.contains(&Tag::ThisYear));
}

#[test]
fn test_year_range_ends_on_december_31st() {
    let results = parse_in(Locale::En, "Revenue grew from 2020 to 2022.");
    let result = single(&results);

    assert_eq!(result.text, "2020 to 2022");
    assert_eq!(result.start.datetime, at(2020, 1, 1, 12, 0));
    assert_eq!(result.end.as_ref().unwrap().datetime, at(2022, 12, 31, 12, 0));
    assert!(result.tags.contains(&Tag::RangeMerged));
}

#[test]
fn test_reversed_year_range() {
    let results = parse_in(Locale::En, "from 2022 to 2020");
    let result = single(&results);

    assert_eq!(result.text, "2022 to 2020");
    assert_eq!(result.start.datetime, at(2020, 1, 1, 12, 0));
    assert_eq!(result.end.as_ref().unwrap().datetime, at(2022, 12, 31, 12, 0));
}

#[test]
fn test_time_range_with_timezone_on_both_sides() {
    let results = parse_in(Locale::En, "call 3pm EST to 5pm EST");
    let result = single(&results);

    assert_eq!(result.text, "3pm EST to 5pm EST");
    assert_eq!(result.start.datetime, at(2026, 1, 20, 15, 0));
    assert_eq!(result.start.timezone_offset, Some(-300));
    let end = result.end.as_ref().unwrap();
    assert_eq!(end.datetime, at(2026, 1, 20, 17, 0));
    assert_eq!(end.timezone_offset, Some(-300));
}

#[test]
fn test_time_range_with_trailing_timezone() {
    let results = parse_in(Locale::En, "3pm to 5pm EST");
    let result = single(&results);

    assert_eq!(result.text, "3pm to 5pm EST");
    assert_eq!(result.start.timezone_offset, Some(-300));
    assert_eq!(result.end.as_ref().unwrap().timezone_offset, Some(-300));
}

#[test]
fn test_german_day_range_shares_month() {
    let results = parse_in(Locale::De, "vom 3. bis 5. März");
    let result = single(&results);

    assert_eq!(result.text, "3. bis 5. März");
    assert_eq!(result.start.datetime, at(2026, 3, 3, 12, 0));
    assert_eq!(result.end.as_ref().unwrap().datetime, at(2026, 3, 5, 12, 0));
}

#[test]
fn test_chinese_range_to_this_year() {
    let results = parse_in(Locale::Zh, "从2024年到今年");
    let result = single(&results);

    assert_eq!(result.text, "2024年到今年");
    assert_eq!(result.start.datetime, at(2024, 1, 1, 12, 0));
    assert_eq!(result.end.as_ref().unwrap().datetime, reference());
}

#[test]
fn test_and_connector_needs_between() {
    let ranged = parse_in(Locale::En, "between January 5 and January 10");
    let result = single(&ranged);
    assert_eq!(result.text, "between January 5 and January 10");
    assert_eq!(result.index, 0);
    assert_eq!(result.start.datetime, at(2026, 1, 5, 12, 0));
    assert_eq!(result.end.as_ref().unwrap().datetime, at(2026, 1, 10, 12, 0));

    let separate = parse_in(Locale::En, "January 5 and January 10");
    assert_eq!(separate.len(), 2);
    assert!(separate.iter().all(|r| !r.tags.contains(&Tag::RangeMerged)));
}

#[test]
fn test_casual_date_with_time() {
    let results = parse_in(Locale::En, "Let's meet tomorrow at 3pm.");
    let result = single(&results);

    assert_eq!(result.text, "tomorrow at 3pm");
    assert_eq!(result.start.datetime, at(2026, 1, 21, 15, 0));
    assert!(result.start.is_certain(TemporalField::Day));
    assert!(result.start.is_certain(TemporalField::Hour));
    assert!(!result.start.is_certain(TemporalField::Minute));
}

#[test]
fn test_timezone_abbreviation_extends_match() {
    let results = parse_in(Locale::En, "tomorrow at 3pm JST works");
    let result = single(&results);

    assert_eq!(result.text, "tomorrow at 3pm JST");
    assert_eq!(result.start.timezone_offset, Some(540));
    assert!(result.tags.contains(&Tag::TimezoneAttached));
    let aware = result.start.with_offset().unwrap();
    assert_eq!(aware.offset().local_minus_utc(), 9 * 3600);
}

#[test]
fn test_weekday_backward_correction() {
    // Thursday.
    let thursday = at(2026, 1, 22, 12, 0);
    let backward = mode(Locale::En, Correction::Backward);
    let none = mode(Locale::En, Correction::None);

    let uncorrected = parse("Friday", thursday, &none).unwrap();
    assert_eq!(uncorrected[0].start.datetime.date(), at(2026, 1, 23, 0, 0).date());

    let corrected = parse("Friday", thursday, &backward).unwrap();
    let result = single(&corrected);
    assert_eq!(result.start.datetime.date(), at(2026, 1, 16, 0, 0).date());
    assert!(result.start.is_certain(TemporalField::Weekday));
    assert!(result.tags.contains(&Tag::BackwardCorrected));

    // Already in the past: left alone.
    let monday = parse("Monday", thursday, &backward).unwrap();
    assert_eq!(monday[0].start.datetime.date(), at(2026, 1, 19, 0, 0).date());
    assert!(!monday[0].tags.contains(&Tag::BackwardCorrected));
}

#[test]
fn test_month_day_forward_correction() {
    let forward = mode(Locale::En, Correction::Forward);
    let results = parse("due January 3", reference(), &forward).unwrap();
    let result = single(&results);
    assert_eq!(result.start.datetime.date(), at(2027, 1, 3, 0, 0).date());
    assert!(result.tags.contains(&Tag::ForwardCorrected));
}

#[test]
fn test_german_numeric_date() {
    let results = parse_in(Locale::De, "Termin am 24.12.2025 um 18 Uhr");
    let result = single(&results);
    assert_eq!(result.start.datetime, at(2025, 12, 24, 18, 0));
    assert!(result.tags.contains(&Tag::DateTimeMerged));
}

#[test]
fn test_french_day_month() {
    let results = parse_in(Locale::Fr, "le 14 juillet 2025");
    let result = single(&results);
    assert_eq!(result.text, "14 juillet 2025");
    assert_eq!(result.start.datetime, at(2025, 7, 14, 12, 0));
}

#[test]
fn test_quantity_is_not_a_year() {
    let results = parse_in(Locale::En, "We hired 2024 people last quarter");
    assert!(results.is_empty());
}

#[test]
fn test_strict_mode_ignores_casual_words() {
    let strict = ModeConfiguration::for_locale(
        Locale::En,
        Strictness::Strict,
        Correction::None,
        &FilterConfig::default(),
    )
    .unwrap();
    let results = parse("see you tomorrow on 2026-02-01", reference(), &strict).unwrap();
    let result = single(&results);
    assert_eq!(result.text, "2026-02-01");
}

#[test]
fn test_results_serialize_to_json() {
    let results = parse_in(Locale::En, "on 2026-02-01");
    let value = serde_json::to_value(&results).unwrap();
    assert_eq!(value[0]["text"], "2026-02-01");
    assert_eq!(value[0]["index"], 3);
    assert_eq!(value[0]["start"]["datetime"], "2026-02-01T12:00:00");
    assert!(value[0]["start"].get("timezone_offset").is_none());
}
