//! Japanese.
//!
//! Patterns avoid `\b`: kanji, kana and digits are all word characters, so
//! "2025年" has no boundary inside it. A non-digit prefix group stands in.

use chrono::NaiveDateTime;
use regex::Captures;

use super::{
    casual_time_store, clock_matcher, date_store, iso_matcher, lookup, month_store,
    relative_day_store, relative_month_store, relative_year_store, standard_end_rules, time_store,
    weekday_store, year_store, LocalePack, WeekdayAnchor, AM, PM,
};
use crate::candidate::Tag;
use crate::extraction::matcher::{capture_int, Extracted, MatcherDef};

const YEAR: &str = r"[0-9０-９]{4}|[〇一二三四五六七八九]{4}";
const SMALL: &str = r"[0-9０-９]{1,2}|[一二三四五六七八九十]{1,3}";
const GUARD: &str = r"(?:^|[^0-9０-９〇一二三四五六七八九十])";

const WEEKDAYS: &[(&str, i32)] = &[
    ("日", 0),
    ("月", 1),
    ("火", 2),
    ("水", 3),
    ("木", 4),
    ("金", 5),
    ("土", 6),
];

const CASUAL_DAYS: &[(&str, i64)] = &[
    ("今日", 0),
    ("本日", 0),
    ("きょう", 0),
    ("明日", 1),
    ("あした", 1),
    ("あす", 1),
    ("昨日", -1),
    ("きのう", -1),
    ("明後日", 2),
    ("あさって", 2),
    ("一昨日", -2),
    ("おととい", -2),
];

const CASUAL_TIMES: &[(&str, i32)] = &[
    ("今朝", 6),
    ("正午", 12),
    ("夕方", 17),
    ("今夜", 22),
    ("今晩", 22),
    ("深夜", 0),
];

const RELATIVE_YEARS: &[(&str, i32)] = &[
    ("去年", -1),
    ("昨年", -1),
    ("一昨年", -2),
    ("おととし", -2),
    ("来年", 1),
    ("明年", 1),
    ("再来年", 2),
];

const RELATIVE_MONTHS: &[(&str, i32)] = &[
    ("先月", -1),
    ("前月", -1),
    ("先々月", -2),
    ("来月", 1),
    ("翌月", 1),
    ("再来月", 2),
];

pub fn pack() -> LocalePack {
    LocalePack {
        base: vec![
            iso_matcher(),
            MatcherDef::new(
                "ja_full_date",
                format!(r"{GUARD}(?P<m>(?:({YEAR})\s*年\s*)?({SMALL})\s*月\s*({SMALL})\s*日)"),
                &[Tag::MonthNameDay],
                extract_full_date,
            ),
            MatcherDef::new(
                "ja_year_month",
                format!(r"{GUARD}(?P<m>(?:({YEAR})\s*年\s*)?({SMALL})\s*月)"),
                &[Tag::MonthName],
                extract_year_month,
            ),
            MatcherDef::new(
                "ja_year",
                format!(r"{GUARD}(?P<m>({YEAR})\s*年)"),
                &[Tag::PlainYear],
                extract_year,
            ),
            MatcherDef::new("ja_this_year", r"(?P<m>今年|本年)", &[Tag::ThisYear], extract_this_year),
            MatcherDef::new(
                "ja_relative_year",
                r"(?P<m>一昨年|おととし|去年|昨年|再来年|来年|明年)",
                &[Tag::RelativeYear],
                extract_relative_year,
            ),
            MatcherDef::new("ja_this_month", r"(?P<m>今月|本月)", &[Tag::ThisMonth], extract_this_month),
            MatcherDef::new(
                "ja_relative_month",
                r"(?P<m>先々月|先月|前月|再来月|来月|翌月)",
                &[Tag::RelativeMonth],
                extract_relative_month,
            ),
            MatcherDef::new(
                "ja_time",
                format!(r"{GUARD}(?P<m>(午前|午後)?\s*({SMALL})\s*時\s*(?:({SMALL})\s*分|(半))?(?:\s*({SMALL})\s*秒)?)"),
                &[Tag::Time],
                extract_time,
            ),
            clock_matcher(),
        ],
        casual: vec![
            MatcherDef::new(
                "ja_casual_date",
                r"(?P<m>明後日|あさって|一昨日|おととい|今日|本日|きょう|明日|あした|あす|昨日|きのう)",
                &[Tag::CasualDate],
                extract_casual_date,
            ),
            MatcherDef::new(
                "ja_casual_time",
                r"(?P<m>今朝|正午|夕方|今夜|今晩|深夜)",
                &[Tag::CasualTime],
                extract_casual_time,
            ),
            MatcherDef::new(
                "ja_weekday",
                r"(?P<m>(先週|今週|来週)?\s*の?\s*(日|月|火|水|木|金|土)曜日?)",
                &[Tag::Weekday],
                extract_weekday,
            ),
        ],
        range_connectors: vec![(r"^\s*(?:から|より|～|〜|~|-|－|ー)\s*$", None)],
        datetime_joiner: r"^\s*(?:の)?\s*$",
        end_rules: standard_end_rules(),
    }
}

fn extract_full_date(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let store = date_store(
        capture_int(caps, 2),
        capture_int(caps, 3)?,
        capture_int(caps, 4)?,
        reference,
    )?;
    Some(Extracted::single(store))
}

fn extract_year_month(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let store = month_store(capture_int(caps, 2), capture_int(caps, 3)?, reference)?;
    Some(Extracted::single(store))
}

fn extract_year(caps: &Captures<'_>, _reference: NaiveDateTime) -> Option<Extracted> {
    Some(Extracted::single(year_store(capture_int(caps, 2)?)))
}

fn extract_this_year(_caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    Some(Extracted::single(relative_year_store(reference, 0)))
}

fn extract_relative_year(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let delta = lookup(RELATIVE_YEARS, caps.get(1)?.as_str())?;
    Some(Extracted::single(relative_year_store(reference, delta)))
}

fn extract_this_month(_caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    Some(Extracted::single(relative_month_store(reference, 0)))
}

fn extract_relative_month(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let delta = lookup(RELATIVE_MONTHS, caps.get(1)?.as_str())?;
    Some(Extracted::single(relative_month_store(reference, delta)))
}

fn extract_time(caps: &Captures<'_>, _reference: NaiveDateTime) -> Option<Extracted> {
    let meridiem = caps.get(2).map(|m| if m.as_str() == "午前" { AM } else { PM });
    let minute = if caps.get(5).is_some() {
        Some(30)
    } else {
        capture_int(caps, 4)
    };
    let store = time_store(capture_int(caps, 3)?, minute, capture_int(caps, 6), meridiem)?;
    Some(Extracted::single(store))
}

fn extract_casual_date(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let days = lookup(CASUAL_DAYS, caps.get(1)?.as_str())?;
    Some(Extracted::single(relative_day_store(reference, days)))
}

fn extract_casual_time(caps: &Captures<'_>, _reference: NaiveDateTime) -> Option<Extracted> {
    let hour = lookup(CASUAL_TIMES, caps.get(1)?.as_str())?;
    Some(Extracted::single(casual_time_store(hour)))
}

fn extract_weekday(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let weekday = lookup(WEEKDAYS, caps.get(3)?.as_str())?;
    let anchor = match caps.get(2).map(|m| m.as_str()) {
        None => WeekdayAnchor::Closest,
        Some("先週") => WeekdayAnchor::PreviousWeek,
        Some("来週") => WeekdayAnchor::FollowingWeek,
        Some(_) => WeekdayAnchor::ThisWeek,
    };
    Some(Extracted::single(weekday_store(weekday, anchor, reference)))
}
