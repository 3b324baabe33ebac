//! German.

use chrono::NaiveDateTime;
use regex::Captures;

use super::{
    casual_time_store, clock_matcher, date_store, expand_year, iso_matcher, lookup, month_store,
    relative_day_store, relative_month_store, relative_year_store, standard_end_rules, time_store,
    weekday_store, year_store, LocalePack, WeekdayAnchor,
};
use crate::candidate::Tag;
use crate::extraction::matcher::{capture_int, capture_lower, Extracted, MatcherDef};

const MONTHS: &str = r"januar|jänner|februar|märz|april|mai|juni|juli|august|september|oktober|november|dezember|jan|feb|mär|apr|jun|jul|aug|sept|sep|okt|nov|dez";

const MONTH_TABLE: &[(&str, i32)] = &[
    ("januar", 1),
    ("jänner", 1),
    ("jan", 1),
    ("februar", 2),
    ("feb", 2),
    ("märz", 3),
    ("mär", 3),
    ("april", 4),
    ("apr", 4),
    ("mai", 5),
    ("juni", 6),
    ("jun", 6),
    ("juli", 7),
    ("jul", 7),
    ("august", 8),
    ("aug", 8),
    ("september", 9),
    ("sept", 9),
    ("sep", 9),
    ("oktober", 10),
    ("okt", 10),
    ("november", 11),
    ("nov", 11),
    ("dezember", 12),
    ("dez", 12),
];

const WEEKDAY_TABLE: &[(&str, i32)] = &[
    ("sonntag", 0),
    ("montag", 1),
    ("dienstag", 2),
    ("mittwoch", 3),
    ("donnerstag", 4),
    ("freitag", 5),
    ("samstag", 6),
    ("sonnabend", 6),
];

const CASUAL_DAYS: &[(&str, i64)] = &[
    ("heute", 0),
    ("morgen", 1),
    ("gestern", -1),
    ("übermorgen", 2),
    ("vorgestern", -2),
];

const CASUAL_TIMES: &[(&str, i32)] = &[
    ("morgens", 8),
    ("vormittags", 10),
    ("mittags", 12),
    ("nachmittags", 15),
    ("abends", 20),
    ("nachts", 23),
    ("mitternacht", 0),
];

pub fn pack() -> LocalePack {
    LocalePack {
        base: vec![
            iso_matcher(),
            MatcherDef::new(
                "de_numeric_date",
                r"(?:^|[^\d.])(?P<m>(\d{1,2})\.\s?(\d{1,2})\.(?:\s?(\d{4}|\d{2}))?)",
                &[Tag::SlashDate],
                extract_numeric,
            ),
            MatcherDef::new(
                "de_day_range",
                format!(r"(?i)\b(?P<m>(\d{{1,2}})\.\s*(?:bis(?:\s+zum)?|-|–)\s*(\d{{1,2}})\.?\s*({MONTHS})\b\.?(?:\s*(\d{{4}})\b)?)"),
                &[Tag::MonthNameDay],
                extract_day_range,
            ),
            MatcherDef::new(
                "de_day_month_name",
                format!(r"(?i)\b(?P<m>(\d{{1,2}})\.?\s*({MONTHS})\b\.?(?:\s*(\d{{4}})\b)?)"),
                &[Tag::MonthNameDay],
                extract_day_month,
            ),
            MatcherDef::new(
                "de_month_name",
                format!(r"(?i)\b(?P<m>({MONTHS})\b\.?(?:\s*(\d{{4}})\b)?)"),
                &[Tag::MonthName],
                extract_month,
            ),
            MatcherDef::new(
                "de_year",
                r"\b(?P<m>(1[89]\d{2}|2[01]\d{2}))\b",
                &[Tag::PlainYear],
                extract_year,
            ),
            MatcherDef::new(
                "de_this_year",
                r"(?i)\b(?P<m>heuer|(?:dieses|diesem)\s+jahr(?:es)?)\b",
                &[Tag::ThisYear],
                extract_this_year,
            ),
            MatcherDef::new(
                "de_relative_year",
                r"(?i)\b(?P<m>(letzte[snm]?|vorige[snm]?|vergangene[snm]?|nächste[snm]?|kommende[snm]?)\s+jahr(?:es)?)\b",
                &[Tag::RelativeYear],
                extract_relative_year,
            ),
            MatcherDef::new(
                "de_this_month",
                r"(?i)\b(?P<m>(?:diesen|diesem|dieses)\s+monat(?:s)?)\b",
                &[Tag::ThisMonth],
                extract_this_month,
            ),
            MatcherDef::new(
                "de_relative_month",
                r"(?i)\b(?P<m>(letzte[snm]?|vorige[snm]?|vergangene[snm]?|nächste[snm]?|kommende[snm]?)\s+monat(?:s)?)\b",
                &[Tag::RelativeMonth],
                extract_relative_month,
            ),
            MatcherDef::new(
                "de_time_uhr",
                r"(?i)\b(?P<m>(\d{1,2})(?:[:.](\d{2}))?\s*uhr)\b",
                &[Tag::Time],
                extract_time,
            ),
            clock_matcher(),
        ],
        casual: vec![
            MatcherDef::new(
                "de_casual_date",
                r"(?i)\b(?P<m>übermorgen|vorgestern|heute|morgen|gestern)\b",
                &[Tag::CasualDate],
                extract_casual_date,
            ),
            MatcherDef::new(
                "de_casual_time",
                r"(?i)\b(?P<m>morgens|vormittags|mittags|nachmittags|abends|nachts|mitternacht)\b",
                &[Tag::CasualTime],
                extract_casual_time,
            ),
            MatcherDef::new(
                "de_weekday",
                r"(?i)\b(?P<m>(?:(letzte[snm]?|vorige[snm]?|vergangene[snm]?|nächste[snm]?|kommende[snm]?|diese[snm]?)\s+)?(sonntag|montag|dienstag|mittwoch|donnerstag|freitag|samstag|sonnabend))\b",
                &[Tag::Weekday],
                extract_weekday,
            ),
        ],
        range_connectors: vec![
            (r"(?i)^\s*(?:bis(?:\s+(?:zum|zur))?|-|–)\s*$", None),
            (r"(?i)^\s*und(?:\s+(?:den|dem))?\s*$", Some(r"(?i)\bzwischen(?:\s+(?:den|dem))?\s*$")),
        ],
        datetime_joiner: r"(?i)^\s*(?:,|um|am|gegen)?\s*$",
        end_rules: standard_end_rules(),
    }
}

fn month_of(caps: &Captures<'_>, group: usize) -> Option<i32> {
    lookup(MONTH_TABLE, capture_lower(caps, group)?.as_str())
}

/// -1, 0 or 1 for "letzten", "diesen", "nächsten".
fn direction(word: &str) -> i32 {
    if word.starts_with("nächst") || word.starts_with("kommend") {
        1
    } else if word.starts_with("dies") {
        0
    } else {
        -1
    }
}

fn extract_numeric(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let year = capture_int(caps, 4).map(expand_year);
    let store = date_store(year, capture_int(caps, 3)?, capture_int(caps, 2)?, reference)?;
    Some(Extracted::single(store))
}

fn extract_day_month(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let month = month_of(caps, 3)?;
    let store = date_store(capture_int(caps, 4), month, capture_int(caps, 2)?, reference)?;
    Some(Extracted::single(store))
}

/// "3. bis 5. März": the month and year are written once, after the end day.
fn extract_day_range(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let month = month_of(caps, 4)?;
    let (first, last) = (capture_int(caps, 2)?, capture_int(caps, 3)?);
    if last < first {
        return None;
    }
    let year = capture_int(caps, 5);
    let start = date_store(year, month, first, reference)?;
    let end = date_store(year, month, last, reference)?;
    Some(Extracted::range(start, end))
}

fn extract_month(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let month = month_of(caps, 2)?;
    let store = month_store(capture_int(caps, 3), month, reference)?;
    Some(Extracted::single(store))
}

fn extract_year(caps: &Captures<'_>, _reference: NaiveDateTime) -> Option<Extracted> {
    Some(Extracted::single(year_store(capture_int(caps, 2)?)))
}

fn extract_this_year(_caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    Some(Extracted::single(relative_year_store(reference, 0)))
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
    let store = time_store(capture_int(caps, 2)?, capture_int(caps, 3), None, None)?;
    Some(Extracted::single(store))
}

fn extract_casual_date(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let days = lookup(CASUAL_DAYS, &capture_lower(caps, 1)?)?;
    Some(Extracted::single(relative_day_store(reference, days)))
}

fn extract_casual_time(caps: &Captures<'_>, _reference: NaiveDateTime) -> Option<Extracted> {
    let hour = lookup(CASUAL_TIMES, &capture_lower(caps, 1)?)?;
    Some(Extracted::single(casual_time_store(hour)))
}

fn extract_weekday(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let weekday = lookup(WEEKDAY_TABLE, &capture_lower(caps, 3)?)?;
    let anchor = match capture_lower(caps, 2).map(|word| direction(&word)) {
        None => WeekdayAnchor::Closest,
        Some(1) => WeekdayAnchor::Next,
        Some(0) => WeekdayAnchor::ThisWeek,
        Some(_) => WeekdayAnchor::Past,
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
    fn test_numeric_date_day_first() {
        let found = matcher("de_numeric_date").find("am 24.12.2025 frei", reference());
        assert_eq!(found[0].text, "24.12.2025");
        assert_eq!(found[0].start.get(TemporalField::Month), Some(12));
        assert_eq!(found[0].start.get(TemporalField::Day), Some(24));
    }

    #[test]
    fn test_umlaut_month() {
        let found = matcher("de_day_month_name").find("5. März 2024", reference());
        assert_eq!(found[0].text, "5. März 2024");
        assert_eq!(found[0].start.get(TemporalField::Month), Some(3));
    }

    #[test]
    fn test_day_range_shares_month() {
        let found = matcher("de_day_range").find("vom 3. bis 5. März", reference());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "3. bis 5. März");
        assert_eq!(
            found[0].resolve_start().unwrap().date(),
            NaiveDate::from_ymd_opt(2026, 3, 3).unwrap()
        );
        assert_eq!(
            found[0].resolve_end().unwrap().unwrap().date(),
            NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()
        );
        assert!(found[0].end.as_ref().unwrap().is_certain(TemporalField::Day));
    }

    #[test]
    fn test_day_range_rejects_reversed_days() {
        assert!(matcher("de_day_range").find("5. bis 3. März", reference()).is_empty());
    }

    #[test]
    fn test_uhr_time() {
        let found = matcher("de_time_uhr").find("um 15.30 Uhr", reference());
        assert_eq!(found[0].start.get(TemporalField::Hour), Some(15));
        assert_eq!(found[0].start.get(TemporalField::Minute), Some(30));
    }

    #[test]
    fn test_next_weekday() {
        let found = matcher("de_weekday").find("nächsten Montag", reference());
        assert_eq!(
            found[0].resolve_start().unwrap().date(),
            NaiveDate::from_ymd_opt(2026, 1, 26).unwrap()
        );
    }

    #[test]
    fn test_uebermorgen_wins_over_morgen() {
        let found = matcher("de_casual_date").find("übermorgen", reference());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start.get(TemporalField::Day), Some(22));
    }
}
