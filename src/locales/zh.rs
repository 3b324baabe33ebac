//! Chinese (simplified and traditional forms).

use chrono::NaiveDateTime;
use regex::Captures;

use super::{
    casual_time_store, clock_matcher, date_store, iso_matcher, lookup, month_store,
    relative_day_store, relative_month_store, relative_year_store, standard_end_rules, time_store,
    weekday_store, year_store, LocalePack, WeekdayAnchor, AM, PM,
};
use crate::candidate::Tag;
use crate::extraction::matcher::{capture_int, Extracted, MatcherDef};

const YEAR: &str = r"[0-9０-９]{4}|[〇零一二三四五六七八九]{4}";
const SMALL: &str = r"[0-9０-９]{1,2}|[一二两兩三四五六七八九十]{1,3}";
const GUARD: &str = r"(?:^|[^0-9０-９〇零一二两兩三四五六七八九十])";

const WEEKDAYS: &[(&str, i32)] = &[
    ("日", 0),
    ("天", 0),
    ("一", 1),
    ("二", 2),
    ("三", 3),
    ("四", 4),
    ("五", 5),
    ("六", 6),
];

const CASUAL_DAYS: &[(&str, i64)] = &[
    ("今天", 0),
    ("今日", 0),
    ("明天", 1),
    ("明日", 1),
    ("昨天", -1),
    ("昨日", -1),
    ("后天", 2),
    ("後天", 2),
    ("前天", -2),
];

const CASUAL_TIMES: &[(&str, i32)] = &[
    ("早上", 8),
    ("中午", 12),
    ("傍晚", 18),
    ("今晚", 22),
    ("半夜", 0),
];

const RELATIVE_YEARS: &[(&str, i32)] = &[
    ("去年", -1),
    ("前年", -2),
    ("明年", 1),
    ("后年", 2),
    ("後年", 2),
];

const RELATIVE_MONTHS: &[(&str, i32)] = &[
    ("上个月", -1),
    ("上個月", -1),
    ("上月", -1),
    ("下个月", 1),
    ("下個月", 1),
    ("下月", 1),
];

pub fn pack() -> LocalePack {
    LocalePack {
        base: vec![
            iso_matcher(),
            MatcherDef::new(
                "zh_full_date",
                format!(r"{GUARD}(?P<m>(?:({YEAR})\s*年\s*)?({SMALL})\s*月\s*({SMALL})\s*(?:日|号|號))"),
                &[Tag::MonthNameDay],
                extract_full_date,
            ),
            MatcherDef::new(
                "zh_year_month",
                format!(r"{GUARD}(?P<m>(?:({YEAR})\s*年\s*)?({SMALL})\s*(?:月份|月))"),
                &[Tag::MonthName],
                extract_year_month,
            ),
            MatcherDef::new(
                "zh_year",
                format!(r"{GUARD}(?P<m>({YEAR})\s*年)"),
                &[Tag::PlainYear],
                extract_year,
            ),
            MatcherDef::new("zh_this_year", r"(?P<m>今年|本年)", &[Tag::ThisYear], extract_this_year),
            MatcherDef::new(
                "zh_relative_year",
                r"(?P<m>去年|前年|明年|后年|後年)",
                &[Tag::RelativeYear],
                extract_relative_year,
            ),
            MatcherDef::new(
                "zh_this_month",
                r"(?P<m>本月|这个月|這個月)",
                &[Tag::ThisMonth],
                extract_this_month,
            ),
            MatcherDef::new(
                "zh_relative_month",
                r"(?P<m>上个月|上個月|下个月|下個月|上月|下月)",
                &[Tag::RelativeMonth],
                extract_relative_month,
            ),
            MatcherDef::new(
                "zh_time",
                format!(r"{GUARD}(?P<m>(上午|早上|凌晨|中午|下午|晚上)?\s*({SMALL})\s*(?:点|點|时|時)\s*(?:({SMALL})\s*分|(半))?)"),
                &[Tag::Time],
                extract_time,
            ),
            clock_matcher(),
        ],
        casual: vec![
            MatcherDef::new(
                "zh_casual_date",
                r"(?P<m>今天|今日|明天|明日|昨天|昨日|后天|後天|前天)",
                &[Tag::CasualDate],
                extract_casual_date,
            ),
            MatcherDef::new(
                "zh_casual_time",
                r"(?P<m>早上|中午|傍晚|今晚|半夜)",
                &[Tag::CasualTime],
                extract_casual_time,
            ),
            MatcherDef::new(
                "zh_weekday",
                r"(?P<m>(上|下|这|這|本)?\s*(?:个|個)?\s*(?:星期|礼拜|禮拜|周|週)([一二三四五六日天]))",
                &[Tag::Weekday],
                extract_weekday,
            ),
        ],
        range_connectors: vec![
            (r"^\s*(?:到|至|-|－|~|～)\s*$", None),
            (r"^\s*(?:和|与|與|跟)\s*$", Some(r"(?:在|介于|介於)\s*$")),
        ],
        datetime_joiner: r"^\s*(?:的)?\s*$",
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
    let meridiem = caps.get(2).map(|m| match m.as_str() {
        "上午" | "早上" | "凌晨" => AM,
        _ => PM,
    });
    let minute = if caps.get(5).is_some() {
        Some(30)
    } else {
        capture_int(caps, 4)
    };
    let store = time_store(capture_int(caps, 3)?, minute, None, meridiem)?;
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
        Some("上") => WeekdayAnchor::PreviousWeek,
        Some("下") => WeekdayAnchor::FollowingWeek,
        Some(_) => WeekdayAnchor::ThisWeek,
    };
    Some(Extracted::single(weekday_store(weekday, anchor, reference)))
}
