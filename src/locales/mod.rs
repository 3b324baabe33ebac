//! Locale packs.
//!
//! A pack is plain data: matcher definitions (regex plus extraction function),
//! range connectors, the date/time joiner and default-end rules. The mode
//! configuration compiles a pack once at setup.
//!
//! The helpers below build component stores the same way for every locale so
//! that "2025年", "2025" and "in 2025" all produce identical candidates.

pub mod de;
pub mod en;
pub mod fr;
pub mod ja;
pub mod numerals;
pub mod zh;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use regex::Captures;
use serde::{Deserialize, Serialize};

use crate::calendar::{components_of, days_in_month, shift_days};
use crate::candidate::Tag;
use crate::components::{ComponentStore, TemporalField};
use crate::error::ConfigError;
use crate::extraction::matcher::{capture_int, Extracted, MatcherDef};
use crate::refiners::EndRule;

// ============================================================================
// Locale
// ============================================================================

/// Languages with a bundled pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ja,
    Zh,
    De,
    Fr,
}

impl Locale {
    pub const ALL: [Locale; 5] = [Locale::En, Locale::Ja, Locale::Zh, Locale::De, Locale::Fr];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ja => "ja",
            Locale::Zh => "zh",
            Locale::De => "de",
            Locale::Fr => "fr",
        }
    }

    pub fn pack(self) -> LocalePack {
        match self {
            Locale::En => en::pack(),
            Locale::Ja => ja::pack(),
            Locale::Zh => zh::pack(),
            Locale::De => de::pack(),
            Locale::Fr => fr::pack(),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::ALL
            .into_iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::Invalid(format!("unknown locale '{}'", s)))
    }
}

// ============================================================================
// Locale Pack
// ============================================================================

/// Uncompiled matcher and refiner data for one language.
pub struct LocalePack {
    /// Matchers active in every mode.
    pub base: Vec<MatcherDef>,
    /// Weekday names, relative-day words and casual times. Placed ahead of
    /// `base` in casual mode.
    pub casual: Vec<MatcherDef>,
    /// `(connector, trigger)` pattern pairs for range merging.
    pub range_connectors: Vec<(&'static str, Option<&'static str>)>,
    /// Pattern for the text allowed between a date and a time.
    pub datetime_joiner: &'static str,
    pub end_rules: Vec<(Tag, EndRule)>,
}

/// Default-end rules shared by every pack. First matching tag wins.
pub(crate) fn standard_end_rules() -> Vec<(Tag, EndRule)> {
    vec![
        (Tag::ThisYear, EndRule::UntilReference),
        (Tag::ThisMonth, EndRule::UntilReference),
        (Tag::PlainYear, EndRule::YearEnd),
        (Tag::RelativeYear, EndRule::YearEnd),
        (Tag::MonthName, EndRule::MonthEnd),
        (Tag::RelativeMonth, EndRule::MonthEnd),
        (Tag::IsoDate, EndRule::SameDay),
        (Tag::SlashDate, EndRule::SameDay),
        (Tag::MonthNameDay, EndRule::SameDay),
        (Tag::CasualDate, EndRule::SameDay),
        (Tag::Weekday, EndRule::SameDay),
    ]
}

// ============================================================================
// Shared matchers
// ============================================================================

/// `2024-01-05`, `2024/1/5`, `2024-01-05T10:30:00`.
pub(crate) fn iso_matcher() -> MatcherDef {
    MatcherDef::new(
        "iso_date",
        r"(?:^|[^0-9])(?P<m>([0-9]{4})[-/.]([0-9]{1,2})[-/.]([0-9]{1,2})(?:[T ]([0-9]{1,2}):([0-9]{2})(?::([0-9]{2}))?)?)",
        &[Tag::IsoDate],
        extract_iso,
    )
}

fn extract_iso(caps: &Captures<'_>, reference: NaiveDateTime) -> Option<Extracted> {
    let year = capture_int(caps, 2)?;
    let month = capture_int(caps, 3)?;
    let day = capture_int(caps, 4)?;
    let mut store = date_store(Some(year), month, day, reference)?;
    if let Some(hour) = capture_int(caps, 5) {
        let time = time_store(hour, capture_int(caps, 6), capture_int(caps, 7), None)?;
        for field in TemporalField::TIME {
            if let Some(value) = time.get(field) {
                if time.is_certain(field) {
                    store.assign(field, value);
                } else {
                    store.imply(field, value).ok()?;
                }
            }
        }
    }
    Some(Extracted::single(store))
}

/// `14:30`, `9:05:10`.
pub(crate) fn clock_matcher() -> MatcherDef {
    MatcherDef::new(
        "clock_24h",
        r"(?:^|[^0-9:０-９])(?P<m>([0-9０-９]{1,2})[:：]([0-9０-９]{2})(?:[:：]([0-9０-９]{2}))?)",
        &[Tag::Time],
        extract_clock,
    )
}

fn extract_clock(caps: &Captures<'_>, _reference: NaiveDateTime) -> Option<Extracted> {
    let store = time_store(
        capture_int(caps, 2)?,
        capture_int(caps, 3),
        capture_int(caps, 4),
        None,
    )?;
    Some(Extracted::single(store))
}

// ============================================================================
// Store builders
// ============================================================================

/// Fill the clock with noon unless something else is there.
fn imply_noon(store: &mut ComponentStore) {
    store
        .imply_default(TemporalField::Hour, 12)
        .imply_default(TemporalField::Minute, 0)
        .imply_default(TemporalField::Second, 0);
}

/// Two-digit years: `< 50` means 20xx, otherwise 19xx.
pub(crate) fn expand_year(year: i32) -> i32 {
    match year {
        0..=49 => 2000 + year,
        50..=99 => 1900 + year,
        _ => year,
    }
}

/// A day-granularity store. Without a year, the reference year is implied
/// and the day is checked against a leap year so "February 29" survives
/// until correction has had a chance to pick a year.
pub(crate) fn date_store(
    year: Option<i32>,
    month: i32,
    day: i32,
    reference: NaiveDateTime,
) -> Option<ComponentStore> {
    let longest = days_in_month(year.unwrap_or(2024), month)?;
    if !(1..=longest).contains(&day) {
        return None;
    }

    let mut store = ComponentStore::new()
        .with(TemporalField::Month, month)
        .with(TemporalField::Day, day);
    match year {
        Some(year) => store.assign(TemporalField::Year, year),
        None => store.imply_default(TemporalField::Year, components_of(reference).year),
    };
    imply_noon(&mut store);
    Some(store)
}

/// A month-granularity store ("March", "2025年3月").
pub(crate) fn month_store(
    year: Option<i32>,
    month: i32,
    reference: NaiveDateTime,
) -> Option<ComponentStore> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let mut store = ComponentStore::new()
        .with(TemporalField::Month, month)
        .implying(TemporalField::Day, 1);
    match year {
        Some(year) => store.assign(TemporalField::Year, year),
        None => store.imply_default(TemporalField::Year, components_of(reference).year),
    };
    imply_noon(&mut store);
    Some(store)
}

/// A year-granularity store starting on January 1st.
pub(crate) fn year_store(year: i32) -> ComponentStore {
    let mut store = ComponentStore::new()
        .with(TemporalField::Year, year)
        .implying(TemporalField::Month, 1)
        .implying(TemporalField::Day, 1);
    imply_noon(&mut store);
    store
}

/// The year `delta` years from the reference ("this year" is 0).
pub(crate) fn relative_year_store(reference: NaiveDateTime, delta: i32) -> ComponentStore {
    year_store(components_of(reference).year + delta)
}

/// The month `delta` months from the reference ("this month" is 0).
pub(crate) fn relative_month_store(reference: NaiveDateTime, delta: i32) -> ComponentStore {
    let now = components_of(reference);
    let index = now.year * 12 + (now.month - 1) + delta;
    let mut store = ComponentStore::new()
        .with(TemporalField::Year, index.div_euclid(12))
        .with(TemporalField::Month, index.rem_euclid(12) + 1)
        .implying(TemporalField::Day, 1);
    imply_noon(&mut store);
    store
}

/// A day relative to the reference ("tomorrow" is 1). The date is stated by
/// the word, so it is certain.
pub(crate) fn relative_day_store(reference: NaiveDateTime, days: i64) -> ComponentStore {
    let target = components_of(shift_days(reference, days));
    let mut store = ComponentStore::new()
        .with(TemporalField::Year, target.year)
        .with(TemporalField::Month, target.month)
        .with(TemporalField::Day, target.day);
    imply_noon(&mut store);
    store
}

/// Meridiem values stored in [`TemporalField::Meridiem`].
pub(crate) const AM: i32 = 0;
pub(crate) const PM: i32 = 1;

/// A time-of-day store. With a meridiem the hour is on a 12-hour clock.
pub(crate) fn time_store(
    hour: i32,
    minute: Option<i32>,
    second: Option<i32>,
    meridiem: Option<i32>,
) -> Option<ComponentStore> {
    let hour = match meridiem {
        Some(AM) if (0..=12).contains(&hour) => hour % 12,
        Some(PM) if (0..=12).contains(&hour) => hour % 12 + 12,
        Some(_) => return None,
        None if (0..=23).contains(&hour) => hour,
        None => return None,
    };
    if minute.is_some_and(|m| !(0..60).contains(&m)) || second.is_some_and(|s| !(0..60).contains(&s)) {
        return None;
    }

    let mut store = ComponentStore::new().with(TemporalField::Hour, hour);
    match minute {
        Some(minute) => store.assign(TemporalField::Minute, minute),
        None => store.imply_default(TemporalField::Minute, 0),
    };
    match second {
        Some(second) => store.assign(TemporalField::Second, second),
        None => store.imply_default(TemporalField::Second, 0),
    };
    let half = if hour >= 12 { PM } else { AM };
    match meridiem {
        Some(_) => store.assign(TemporalField::Meridiem, half),
        None => store.imply_default(TemporalField::Meridiem, half),
    };
    Some(store)
}

/// Which occurrence of a weekday an expression points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekdayAnchor {
    /// Nearest occurrence, at most three days away.
    Closest,
    /// Strictly before the reference ("last Monday").
    Past,
    /// Strictly after the reference ("next Monday").
    Next,
    /// In the reference's Sunday-based week ("this Monday", "今週月曜").
    ThisWeek,
    /// In the week before ("先週月曜", "上周一").
    PreviousWeek,
    /// In the week after ("来週月曜", "下周一").
    FollowingWeek,
}

impl WeekdayAnchor {
    fn days_from(self, current: i32, target: i32) -> i32 {
        match self {
            WeekdayAnchor::Closest => {
                let ahead = (target - current).rem_euclid(7);
                if ahead > 3 {
                    ahead - 7
                } else {
                    ahead
                }
            }
            WeekdayAnchor::Past => match (current - target).rem_euclid(7) {
                0 => -7,
                back => -back,
            },
            WeekdayAnchor::Next => match (target - current).rem_euclid(7) {
                0 => 7,
                ahead => ahead,
            },
            WeekdayAnchor::ThisWeek => target - current,
            WeekdayAnchor::PreviousWeek => target - current - 7,
            WeekdayAnchor::FollowingWeek => target - current + 7,
        }
    }
}

/// A store with only the weekday stated and the date implied per `anchor`.
pub(crate) fn weekday_store(
    weekday: i32,
    anchor: WeekdayAnchor,
    reference: NaiveDateTime,
) -> ComponentStore {
    let current = components_of(reference).weekday;
    let target = components_of(shift_days(
        reference,
        i64::from(anchor.days_from(current, weekday)),
    ));
    let mut store = ComponentStore::new()
        .with(TemporalField::Weekday, weekday)
        .implying(TemporalField::Year, target.year)
        .implying(TemporalField::Month, target.month)
        .implying(TemporalField::Day, target.day);
    imply_noon(&mut store);
    store
}

/// A casual time of day ("tonight", "正午"): hour stated, minutes implied.
pub(crate) fn casual_time_store(hour: i32) -> ComponentStore {
    ComponentStore::new()
        .with(TemporalField::Hour, hour)
        .implying(TemporalField::Minute, 0)
        .implying(TemporalField::Second, 0)
        .implying(TemporalField::Meridiem, if hour >= 12 { PM } else { AM })
}

/// Look up `key` in a word table.
pub(crate) fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table
        .iter()
        .find(|(word, _)| *word == key)
        .map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::weekday_index;
    use chrono::NaiveDate;

    fn reference() -> NaiveDateTime {
        // Tuesday
        NaiveDate::from_ymd_opt(2026, 1, 20)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("JA".parse::<Locale>().unwrap(), Locale::Ja);
        assert!("xx".parse::<Locale>().is_err());
    }

    #[test]
    fn test_every_pack_compiles() {
        use crate::extraction::matcher::PatternMatcher;
        use crate::refiners::{DateTimeMergeRefiner, RangeConnector};

        for locale in Locale::ALL {
            let pack = locale.pack();
            for def in pack.base.iter().chain(pack.casual.iter()) {
                assert!(PatternMatcher::compile(def).is_ok(), "{} {}", locale, def.name);
            }
            for (connector, trigger) in &pack.range_connectors {
                assert!(RangeConnector::new(connector, *trigger).is_ok());
            }
            assert!(DateTimeMergeRefiner::new(pack.datetime_joiner).is_ok());
        }
    }

    #[test]
    fn test_date_store_rejects_impossible_day() {
        assert!(date_store(Some(2025), 2, 29, reference()).is_none());
        assert!(date_store(None, 2, 29, reference()).is_some());
        assert!(date_store(Some(2025), 13, 1, reference()).is_none());
    }

    #[test]
    fn test_time_store_meridiem() {
        let pm = time_store(3, None, None, Some(PM)).unwrap();
        assert_eq!(pm.get(TemporalField::Hour), Some(15));
        assert!(pm.is_certain(TemporalField::Meridiem));

        let midnight = time_store(12, Some(0), None, Some(AM)).unwrap();
        assert_eq!(midnight.get(TemporalField::Hour), Some(0));

        let plain = time_store(18, Some(30), None, None).unwrap();
        assert!(plain.is_implied(TemporalField::Meridiem));
        assert!(time_store(13, None, None, Some(PM)).is_none());
        assert!(time_store(9, Some(75), None, None).is_none());
    }

    #[test]
    fn test_relative_month_wraps_year() {
        let store = relative_month_store(reference(), -1);
        assert_eq!(store.get(TemporalField::Year), Some(2025));
        assert_eq!(store.get(TemporalField::Month), Some(12));
    }

    #[test]
    fn test_weekday_anchors() {
        let reference = reference();
        let resolve = |weekday, anchor| {
            weekday_store(weekday, anchor, reference)
                .resolve(reference)
                .unwrap()
                .date()
        };
        let date = |d| NaiveDate::from_ymd_opt(2026, 1, d).unwrap();

        // Reference is Tuesday the 20th.
        assert_eq!(resolve(1, WeekdayAnchor::Closest), date(19));
        assert_eq!(resolve(5, WeekdayAnchor::Closest), date(23));
        assert_eq!(resolve(2, WeekdayAnchor::Past), date(13));
        assert_eq!(resolve(2, WeekdayAnchor::Next), date(27));
        assert_eq!(resolve(1, WeekdayAnchor::PreviousWeek), date(12));
        assert_eq!(resolve(1, WeekdayAnchor::FollowingWeek), date(26));
        assert_eq!(weekday_index(resolve(6, WeekdayAnchor::ThisWeek)), 6);
    }

    #[test]
    fn test_expand_year() {
        assert_eq!(expand_year(24), 2024);
        assert_eq!(expand_year(99), 1999);
        assert_eq!(expand_year(2024), 2024);
    }
}
