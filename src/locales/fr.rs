//! French.

use chrono::NaiveDateTime;
use regex::Captures;

use super::{
    casual_time_store, clock_matcher, date_store, expand_year, iso_matcher, lookup, month_store,
    relative_day_store, relative_month_store, relative_year_store, standard_end_rules, time_store,
    weekday_store, year_store, LocalePack, WeekdayAnchor,
};
use crate::candidate::Tag;
use crate::extraction::matcher::{capture_int, capture_lower, Extracted, MatcherDef};

const MONTHS: &str = r"janvier|février|fevrier|mars|avril|mai|juin|juillet|août|aout|septembre|octobre|novembre|décembre|decembre|janv|févr|fevr|avr|juil|sept|oct|nov|déc|dec";

const MONTH_TABLE: &[(&str, i32)] = &[
    ("janvier", 1),
    ("janv", 1),
    ("février", 2),
    ("fevrier", 2),
    ("févr", 2),
    ("fevr", 2),
    ("mars", 3),
    ("avril", 4),
    ("avr", 4),
    ("mai", 5),
    ("juin", 6),
    ("juillet", 7),
    ("juil", 7),
    ("août", 8),
    ("aout", 8),
    ("septembre", 9),
    ("sept", 9),
    ("octobre", 10),
    ("oct", 10),
    ("novembre", 11),
    ("nov", 11),
    ("décembre", 12),
    ("decembre", 12),
    ("déc", 12),
    ("dec", 12),
];

const WEEKDAY_TABLE: &[(&str, i32)] = &[
    ("dimanche", 0),
    ("lundi", 1),
    ("mardi", 2),
    ("mercredi", 3),
    ("jeudi", 4),
    ("vendredi", 5),
    ("samedi", 6),
];

const CASUAL_DAYS: &[(&str, i64)] = &[
    ("aujourd'hui", 0),
    ("aujourd’hui", 0),
    ("demain", 1),
    ("hier", -1),
    ("après-demain", 2),
    ("avant-hier", -2),
];

const CASUAL_TIMES: &[(&str, i32)] = &[
    ("matin", 8),
    ("midi", 12),
    ("après-midi", 15),
    ("soir", 20),
    ("minuit", 0),
];

pub fn pack() -> LocalePack {
    LocalePack {
        base: vec![
            iso_matcher(),
            MatcherDef::new(
                "fr_slash_date",
                r"(?:^|[^\d/])(?P<m>(\d{1,2})/(\d{1,2})(?:/(\d{4}|\d{2}))?)",
                &[Tag::SlashDate],
                extract_slash,
            ),
            MatcherDef::new(
                "fr_day_month_name",
                format!(r"(?i)\b(?P<m>(\d{{1,2}})(?:er)?\s+({MONTHS})\b\.?(?:\s+(\d{{4}})\b)?)"),
                &[Tag::MonthNameDay],
                extract_day_month,
            ),
            MatcherDef::new(
                "fr_month_name",
                format!(r"(?i)\b(?P<m>({MONTHS})\b\.?(?:\s+(\d{{4}})\b)?)"),
                &[Tag::MonthName],
                extract_month,
            ),
            MatcherDef::new(
                "fr_year",
                r"\b(?P<m>(1[89]\d{2}|2[01]\d{2}))\b",
                &[Tag::PlainYear],
                extract_year,
            ),
            MatcherDef::new(
                "fr_this_year",
                r"(?i)\b(?P<m>cette\s+année)\b",
                &[Tag::ThisYear],
                extract_this_year,
            ),
            MatcherDef::new(
                "fr_relative_year",
                r"(?i)\b(?P<m>l['’](?:année|an)\s+(dernière|dernier|passée|passé|prochaine|prochain))\b",
                &[Tag::RelativeYear],
                extract_relative_year,
            ),
            MatcherDef::new(
                "fr_this_month",
                r"(?i)\b(?P<m>ce\s+mois(?:-ci)?)\b",
                &[Tag::ThisMonth],
                extract_this_month,
            ),
            MatcherDef::new(
                "fr_relative_month",
                r"(?i)\b(?P<m>le\s+mois\s+(dernier|passé|prochain))\b",
                &[Tag::RelativeMonth],
                extract_relative_month,
            ),
            MatcherDef::new(
                "fr_time",
                r"(?i)\b(?P<m>(\d{1,2})\s*(?:h|heures?)(?:\s*(\d{2}))?)\b",
                &[Tag::Time],
                extract_time,
            ),
            clock_matcher(),
        ],
        casual: vec![
            MatcherDef::new(
                "fr_casual_date",
                r"(?i)\b(?P<m>aujourd['’]hui|après-demain|avant-hier|demain|hier)\b",
                &[Tag::CasualDate],
                extract_casual_date,
            ),
            MatcherDef::new(
                "fr_casual_time",
                r"(?i)\b(?P<m>(?:ce|cet|à)\s+(matin|après-midi|soir|midi|minuit)|(après-midi|midi|minuit))\b",
                &[Tag::CasualTime],
                extract_casual_time,
            ),
            MatcherDef::new(
                "fr_weekday",
                r"(?i)\b(?P<m>(?:(ce)\s+)?(dimanche|lundi|mardi|mercredi|jeudi|vendredi|samedi)(?:\s+(dernier|prochain))?)\b",
                &[Tag::Weekday],
                extract_weekday,
            ),
        ],
        range_connectors: vec![
            (r"(?i)^\s*(?:au|à|a|-|–|jusqu['’]au)\s*$", None),
            (r"(?i)^\s*et(?:\s+le)?\s*$", Some(r"(?i)\bentre(?:\s+le)?\s*$")),
        ],
        datetime_joiner: r"(?i)^\s*(?:,|à|a|vers)?\s*$",
        end_rules: standard_end_rules(),
    }
}

fn month_of(caps: &Captures<'_>, group: usize) -> Option<i32> {
    lookup(MONTH_TABLE, capture_lower(caps, group)?.as_str())
}

fn is_future(word: &str) -> bool {
    word.starts_with("prochain")
}

fn extract_slash(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let year = capture_int(caps, 4).map(expand_year);
    let store = date_store(year, capture_int(caps, 3)?, capture_int(caps, 2)?, reference)?;
    Some(Extracted::single(store))
}

fn extract_day_month(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let month = month_of(caps, 3)?;
    let store = date_store(capture_int(caps, 4), month, capture_int(caps, 2)?, reference)?;
    Some(Extracted::single(store))
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
    let delta = if is_future(&capture_lower(caps, 2)?) { 1 } else { -1 };
    Some(Extracted::single(relative_year_store(reference, delta)))
}

fn extract_this_month(_caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    Some(Extracted::single(relative_month_store(reference, 0)))
}

fn extract_relative_month(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let delta = if is_future(&capture_lower(caps, 2)?) { 1 } else { -1 };
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
    let word = capture_lower(caps, 2).or_else(|| capture_lower(caps, 3))?;
    Some(Extracted::single(casual_time_store(lookup(CASUAL_TIMES, &word)?)))
}

fn extract_weekday(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let weekday = lookup(WEEKDAY_TABLE, &capture_lower(caps, 3)?)?;
    let anchor = match (caps.get(2), capture_lower(caps, 4)) {
        (_, Some(word)) if is_future(&word) => WeekdayAnchor::Next,
        (_, Some(_)) => WeekdayAnchor::Past,
        (Some(_), None) => WeekdayAnchor::ThisWeek,
        (None, None) => WeekdayAnchor::Closest,
    };
    Some(Extracted::single(weekday_store(weekday, anchor, reference)))
}
