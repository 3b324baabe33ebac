//! Calendar arithmetic over chrono.
//!
//! Thin, stateless helpers used by the component store and the refinement
//! stages. Weekdays are indexed from Sunday (0) to Saturday (6).

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

/// Broken-down fields of a moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MomentFields {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
    pub weekday: i32,
}

/// Break a moment into its calendar fields.
pub fn components_of(moment: NaiveDateTime) -> MomentFields {
    MomentFields {
        year: moment.year(),
        month: moment.month() as i32,
        day: moment.day() as i32,
        hour: moment.hour() as i32,
        minute: moment.minute() as i32,
        second: moment.second() as i32,
        weekday: weekday_index(moment.date()),
    }
}

/// Move a moment by a signed number of days.
pub fn shift_days(moment: NaiveDateTime, days: i64) -> NaiveDateTime {
    moment + Duration::days(days)
}

/// Weekday of a date, 0 = Sunday.
pub fn weekday_index(date: NaiveDate) -> i32 {
    date.weekday().num_days_from_sunday() as i32
}

/// Number of days in the given month, or `None` for an out-of-range month.
pub fn days_in_month(year: i32, month: i32) -> Option<i32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let first = NaiveDate::from_ymd_opt(year, month as u32, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month as u32 + 1, 1)?
    };
    Some((next - first).num_days() as i32)
}

/// Build a moment from fields, `None` if the combination is not a real date/time.
pub fn moment_from(
    year: i32,
    month: i32,
    day: i32,
    hour: i32,
    minute: i32,
    second: i32,
) -> Option<NaiveDateTime> {
    let date = NaiveDate::from_ymd_opt(
        year,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )?;
    date.and_hms_opt(
        u32::try_from(hour).ok()?,
        u32::try_from(minute).ok()?,
        u32::try_from(second).ok()?,
    )
}
