//! English.

use chrono::NaiveDateTime;
use regex::Captures;

use super::{
    casual_time_store, clock_matcher, date_store, expand_year, iso_matcher, lookup, month_store,
    relative_day_store, relative_month_store, relative_year_store, standard_end_rules, time_store,
    weekday_store, year_store, LocalePack, WeekdayAnchor, AM, PM,
};
use crate::candidate::Tag;
use crate::extraction::matcher::{capture_int, capture_lower, Extracted, MatcherDef};

const MONTHS: &str = r"january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec";

const MONTH_TABLE: &[(&str, i32)] = &[
    ("january", 1),
    ("jan", 1),
    ("february", 2),
    ("feb", 2),
    ("march", 3),
    ("mar", 3),
    ("april", 4),
    ("apr", 4),
    ("may", 5),
    ("june", 6),
    ("jun", 6),
    ("july", 7),
    ("jul", 7),
    ("august", 8),
    ("aug", 8),
    ("september", 9),
    ("sept", 9),
    ("sep", 9),
    ("october", 10),
    ("oct", 10),
    ("november", 11),
    ("nov", 11),
    ("december", 12),
    ("dec", 12),
];

const WEEKDAY_TABLE: &[(&str, i32)] = &[
    ("sunday", 0),
    ("monday", 1),
    ("tuesday", 2),
    ("wednesday", 3),
    ("thursday", 4),
    ("friday", 5),
    ("saturday", 6),
];

const CASUAL_DAYS: &[(&str, i64)] = &[
    ("the day after tomorrow", 2),
    ("the day before yesterday", -2),
    ("today", 0),
    ("tomorrow", 1),
    ("tmr", 1),
    ("yesterday", -1),
];

const CASUAL_TIMES: &[(&str, i32)] = &[
    ("morning", 6),
    ("noon", 12),
    ("midday", 12),
    ("afternoon", 15),
    ("evening", 20),
    ("tonight", 22),
    ("midnight", 0),
];

pub fn pack() -> LocalePack {
    LocalePack {
        base: vec![
            iso_matcher(),
            MatcherDef::new(
                "en_month_name_day",
                format!(r"(?i)\b(?P<m>({MONTHS})\b\.?\s*(\d{{1,2}})(?:st|nd|rd|th)?\b(?:,?\s*(\d{{4}})\b)?)"),
                &[Tag::MonthNameDay],
                extract_month_day,
            ),
            MatcherDef::new(
                "en_day_month_name",
                format!(r"(?i)\b(?P<m>(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?({MONTHS})\b\.?(?:,?\s*(\d{{4}})\b)?)"),
                &[Tag::MonthNameDay],
                extract_day_month,
            ),
            MatcherDef::new(
                "en_month_name",
                format!(r"(?i)\b(?P<m>({MONTHS})\b\.?(?:,?\s*(\d{{4}})\b)?)"),
                &[Tag::MonthName],
                extract_month,
            ),
            MatcherDef::new(
                "en_slash_date",
                r"(?:^|[^\d/])(?P<m>(\d{1,2})/(\d{1,2})(?:/(\d{4}|\d{2}))?)",
                &[Tag::SlashDate],
                extract_slash,
            ),
            MatcherDef::new(
                "en_year",
                r"\b(?P<m>(1[89]\d{2}|2[01]\d{2}))\b",
                &[Tag::PlainYear],
                extract_year,
            ),
            MatcherDef::new("en_this_year", r"(?i)\b(?P<m>this\s+year)\b", &[Tag::ThisYear], extract_this_year),
            MatcherDef::new(
                "en_relative_year",
                r"(?i)\b(?P<m>(last|previous|past|next|coming)\s+year)\b",
                &[Tag::RelativeYear],
                extract_relative_year,
            ),
            MatcherDef::new("en_this_month", r"(?i)\b(?P<m>this\s+month)\b", &[Tag::ThisMonth], extract_this_month),
            MatcherDef::new(
                "en_relative_month",
                r"(?i)\b(?P<m>(last|previous|past|next|coming)\s+month)\b",
                &[Tag::RelativeMonth],
                extract_relative_month,
            ),
            MatcherDef::new(
                "en_time_meridiem",
                r"(?i)\b(?P<m>(\d{1,2})(?::(\d{2}))?(?::(\d{2}))?\s*(a\.m\.|p\.m\.|am\b|pm\b))",
                &[Tag::Time],
                extract_time,
            ),
            clock_matcher(),
        ],
        casual: vec![
            MatcherDef::new(
                "en_casual_date",
                r"(?i)\b(?P<m>the\s+day\s+after\s+tomorrow|the\s+day\s+before\s+yesterday|today|tomorrow|tmr|yesterday)\b",
                &[Tag::CasualDate],
                extract_casual_date,
            ),
            MatcherDef::new(
                "en_casual_time",
                r"(?i)\b(?P<m>(?:this\s+|in\s+the\s+|at\s+)?(morning|noon|midday|afternoon|evening|midnight)|tonight)\b",
                &[Tag::CasualTime],
                extract_casual_time,
            ),
            MatcherDef::new(
                "en_weekday",
                r"(?i)\b(?P<m>(?:(last|past|next|coming|this)\s+)?(sunday|monday|tuesday|wednesday|thursday|friday|saturday))\b",
                &[Tag::Weekday],
                extract_weekday,
            ),
        ],
        range_connectors: vec![
            (r"(?i)^\s*(?:to|until|till|through|thru|-|–|~)\s*$", None),
            (r"(?i)^\s*and\s*$", Some(r"(?i)\bbetween\s*$")),
        ],
        datetime_joiner: r"(?i)^\s*(?:,|at|on|of|@)?\s*$",
        end_rules: standard_end_rules(),
    }
}

fn month_of(caps: &Captures<'_>, group: usize) -> Option<i32> {
    lookup(MONTH_TABLE, capture_lower(caps, group)?.as_str())
}

fn extract_month_day(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let month = month_of(caps, 2)?;
    let store = date_store(capture_int(caps, 4), month, capture_int(caps, 3)?, reference)?;
    Some(Extracted::single(store))
}

fn extract_day_month(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let month = month_of(caps, 3)?;
    let store = date_store(capture_int(caps, 4), month, capture_int(caps, 2)?, reference)?;
    Some(Extracted::single(store))
}

fn extract_month(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let word = caps.get(2)?.as_str();
    let year = capture_int(caps, 3);
    // "may" on its own is almost always the verb.
    if year.is_none() && word == "may" {
        return None;
    }
    let month = month_of(caps, 2)?;
    Some(Extracted::single(month_store(year, month, reference)?))
}

fn extract_slash(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let year = capture_int(caps, 4).map(expand_year);
    let store = date_store(year, capture_int(caps, 2)?, capture_int(caps, 3)?, reference)?;
    Some(Extracted::single(store))
}

fn extract_year(caps: &Captures<'_>, _reference: NaiveDateTime) -> Option<Extracted> {
    Some(Extracted::single(year_store(capture_int(caps, 2)?)))
}

fn extract_this_year(_caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    Some(Extracted::single(relative_year_store(reference, 0)))
}

fn direction(word: &str) -> i32 {
    match word {
        "next" | "coming" => 1,
        _ => -1,
    }
}

fn extract_relative_year(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let delta = direction(&capture_lower(caps, 2)?);
    Some(Extracted::single(relative_year_store(reference, delta)))
}

fn extract_this_month(_caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    Some(Extracted::single(relative_month_store(reference, 0)))
}

fn extract_relative_month(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let delta = direction(&capture_lower(caps, 2)?);
    Some(Extracted::single(relative_month_store(reference, delta)))
}

fn extract_time(caps: &Captures<'_>, _reference: NaiveDateTime) -> Option<Extracted> {
    let meridiem = if capture_lower(caps, 5)?.starts_with('a') { AM } else { PM };
    let store = time_store(
        capture_int(caps, 2)?,
        capture_int(caps, 3),
        capture_int(caps, 4),
        Some(meridiem),
    )?;
    Some(Extracted::single(store))
}

fn extract_casual_date(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let phrase = capture_lower(caps, 1)?;
    let normalized = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
    let days = lookup(CASUAL_DAYS, &normalized)?;
    Some(Extracted::single(relative_day_store(reference, days)))
}

fn extract_casual_time(caps: &Captures<'_>, _reference: NaiveDateTime) -> Option<Extracted> {
    let word = capture_lower(caps, 2).or_else(|| capture_lower(caps, 1))?;
    Some(Extracted::single(casual_time_store(lookup(CASUAL_TIMES, &word)?)))
}

fn extract_weekday(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let weekday = lookup(WEEKDAY_TABLE, &capture_lower(caps, 3)?)?;
    let anchor = match capture_lower(caps, 2).as_deref() {
        None => WeekdayAnchor::Closest,
        Some("last" | "past") => WeekdayAnchor::Past,
        Some("next" | "coming") => WeekdayAnchor::Next,
        Some(_) => WeekdayAnchor::ThisWeek,
    };
    Some(Extracted::single(weekday_store(weekday, anchor, reference)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::TemporalField;
    use crate::extraction::matcher::{Matcher, PatternMatcher};
    use chrono::NaiveDate;

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 20)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn matcher(name: &str) -> PatternMatcher {
        let pack = pack();
        let def = pack
            .base
            .iter()
            .chain(pack.casual.iter())
            .find(|def| def.name == name)
            .unwrap();
        PatternMatcher::compile(def).unwrap()
    }

    #[test]
    fn test_month_name_day_with_year() {
        let found = matcher("en_month_name_day").find("due March 5th, 2024 ok", reference());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "March 5th, 2024");
        assert_eq!(found[0].start.get(TemporalField::Year), Some(2024));
        assert!(found[0].start.is_certain(TemporalField::Day));
    }

    #[test]
    fn test_month_day_without_year_implies_year() {
        let found = matcher("en_month_name_day").find("on Jan 5", reference());
        assert_eq!(found[0].text, "Jan 5");
        assert!(found[0].start.is_implied(TemporalField::Year));
    }

    #[test]
    fn test_day_month_name() {
        let found = matcher("en_day_month_name").find("the 5th of March", reference());
        assert_eq!(found[0].text, "5th of March");
        assert_eq!(found[0].start.get(TemporalField::Month), Some(3));
    }

    #[test]
    fn test_lowercase_may_alone_is_skipped() {
        assert!(matcher("en_month_name").find("we may go", reference()).is_empty());
        assert_eq!(matcher("en_month_name").find("in May", reference()).len(), 1);
    }

    #[test]
    fn test_slash_date_us_order() {
        let found = matcher("en_slash_date").find("on 3/4/25", reference());
        assert_eq!(found[0].start.get(TemporalField::Month), Some(3));
        assert_eq!(found[0].start.get(TemporalField::Day), Some(4));
        assert_eq!(found[0].start.get(TemporalField::Year), Some(2025));
    }

    #[test]
    fn test_meridiem_time() {
        let found = matcher("en_time_meridiem").find("at 3:30 p.m. sharp", reference());
        assert_eq!(found[0].text, "3:30 p.m.");
        assert_eq!(found[0].start.get(TemporalField::Hour), Some(15));
        assert!(matcher("en_time_meridiem").find("3 amazing", reference()).is_empty());
    }

    #[test]
    fn test_weekday_modifiers() {
        let found = matcher("en_weekday").find("last Tuesday", reference());
        assert_eq!(found[0].text, "last Tuesday");
        assert_eq!(
            found[0].resolve_start().unwrap().date(),
            NaiveDate::from_ymd_opt(2026, 1, 13).unwrap()
        );
    }

    #[test]
    fn test_casual_words() {
        let found = matcher("en_casual_date").find("see you tomorrow", reference());
        assert_eq!(found[0].start.get(TemporalField::Day), Some(21));
        let found = matcher("en_casual_time").find("this evening", reference());
        assert_eq!(found[0].text, "this evening");
        assert_eq!(found[0].start.get(TemporalField::Hour), Some(20));
    }
}
