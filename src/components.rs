//! Temporal component store.
//!
//! A store records, per [`TemporalField`], whether the value was stated in the
//! text (`Certain`), filled in by inference (`Implied`), or left open (`Unset`).
//! Unset fields fall back to the reference moment when the store is resolved.
//!
//! Certainty only ever moves upward: `assign` may upgrade an implied field, but
//! `imply` refuses to touch a certain one and there is no way to demote a field.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::calendar::{self, components_of};
use crate::error::{DateSiftError, Result};

// ============================================================================
// Fields
// ============================================================================

/// A calendar field tracked by a [`ComponentStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    /// 0 = AM, 1 = PM.
    Meridiem,
    /// 0 = Sunday .. 6 = Saturday.
    Weekday,
    /// Offset from UTC in minutes.
    TimezoneOffset,
}

impl TemporalField {
    pub const ALL: [TemporalField; 9] = [
        TemporalField::Year,
        TemporalField::Month,
        TemporalField::Day,
        TemporalField::Hour,
        TemporalField::Minute,
        TemporalField::Second,
        TemporalField::Meridiem,
        TemporalField::Weekday,
        TemporalField::TimezoneOffset,
    ];

    pub const DATE: [TemporalField; 3] =
        [TemporalField::Year, TemporalField::Month, TemporalField::Day];

    pub const TIME: [TemporalField; 4] = [
        TemporalField::Hour,
        TemporalField::Minute,
        TemporalField::Second,
        TemporalField::Meridiem,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// The state of one field in a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldValue {
    #[default]
    Unset,
    Implied(i32),
    Certain(i32),
}

impl FieldValue {
    pub fn get(self) -> Option<i32> {
        match self {
            FieldValue::Unset => None,
            FieldValue::Implied(v) | FieldValue::Certain(v) => Some(v),
        }
    }

    pub fn is_certain(self) -> bool {
        matches!(self, FieldValue::Certain(_))
    }

    pub fn is_implied(self) -> bool {
        matches!(self, FieldValue::Implied(_))
    }
}

// ============================================================================
// Component Store
// ============================================================================

/// Per-candidate set of field values with their certainty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentStore {
    fields: [FieldValue; 9],
}

impl ComponentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field as certain. Always allowed.
    pub fn assign(&mut self, field: TemporalField, value: i32) -> &mut Self {
        self.fields[field.index()] = FieldValue::Certain(value);
        self
    }

    /// Set a field as implied. Fails if the field is already certain.
    pub fn imply(&mut self, field: TemporalField, value: i32) -> Result<&mut Self> {
        let slot = &mut self.fields[field.index()];
        if let FieldValue::Certain(current) = *slot {
            return Err(DateSiftError::InvariantViolation(format!(
                "attempted to imply {:?}={} over certain value {}",
                field, value, current
            )));
        }
        *slot = FieldValue::Implied(value);
        Ok(self)
    }

    /// Set an implied value only if the field is unset.
    pub fn imply_default(&mut self, field: TemporalField, value: i32) -> &mut Self {
        let slot = &mut self.fields[field.index()];
        if *slot == FieldValue::Unset {
            *slot = FieldValue::Implied(value);
        }
        self
    }

    /// Builder form of [`assign`](Self::assign).
    pub fn with(mut self, field: TemporalField, value: i32) -> Self {
        self.assign(field, value);
        self
    }

    /// Builder form of [`imply_default`](Self::imply_default).
    pub fn implying(mut self, field: TemporalField, value: i32) -> Self {
        self.imply_default(field, value);
        self
    }

    pub fn value(&self, field: TemporalField) -> FieldValue {
        self.fields[field.index()]
    }

    pub fn get(&self, field: TemporalField) -> Option<i32> {
        self.value(field).get()
    }

    pub fn is_certain(&self, field: TemporalField) -> bool {
        self.value(field).is_certain()
    }

    pub fn is_implied(&self, field: TemporalField) -> bool {
        self.value(field).is_implied()
    }

    pub fn certain_fields(&self) -> impl Iterator<Item = TemporalField> + '_ {
        TemporalField::ALL
            .into_iter()
            .filter(move |f| self.is_certain(*f))
    }

    pub fn implied_fields(&self) -> impl Iterator<Item = TemporalField> + '_ {
        TemporalField::ALL
            .into_iter()
            .filter(move |f| self.is_implied(*f))
    }

    /// A date field or weekday is certain and the hour is not.
    pub fn is_date_only(&self) -> bool {
        (TemporalField::DATE.iter().any(|f| self.is_certain(*f))
            || self.is_certain(TemporalField::Weekday))
            && !self.is_certain(TemporalField::Hour)
    }

    /// The hour is certain and no date field (or weekday) is.
    pub fn is_time_only(&self) -> bool {
        self.is_certain(TemporalField::Hour)
            && !TemporalField::DATE.iter().any(|f| self.is_certain(*f))
            && !self.is_certain(TemporalField::Weekday)
    }

    /// Only the weekday was stated; the date itself is implied.
    pub fn is_weekday_only(&self) -> bool {
        self.is_certain(TemporalField::Weekday)
            && !TemporalField::DATE.iter().any(|f| self.is_certain(*f))
    }

    /// Overwrite this store's year/month/day with implied values from `date`.
    pub fn imply_date(&mut self, date: NaiveDateTime) -> Result<()> {
        let parts = components_of(date);
        self.imply(TemporalField::Year, parts.year)?;
        self.imply(TemporalField::Month, parts.month)?;
        self.imply(TemporalField::Day, parts.day)?;
        Ok(())
    }

    /// Produce a concrete moment, falling back to `reference` for unset fields.
    pub fn resolve(&self, reference: NaiveDateTime) -> Result<NaiveDateTime> {
        let r = components_of(reference);
        let pick = |field: TemporalField, fallback: i32| self.get(field).unwrap_or(fallback);

        let year = pick(TemporalField::Year, r.year);
        let month = pick(TemporalField::Month, r.month);
        let day = pick(TemporalField::Day, r.day);
        let hour = pick(TemporalField::Hour, r.hour);
        let minute = pick(TemporalField::Minute, r.minute);
        let second = pick(TemporalField::Second, r.second);

        calendar::moment_from(year, month, day, hour, minute, second).ok_or(
            DateSiftError::InvalidMoment {
                year,
                month,
                day,
                hour,
                minute,
                second,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 20)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_unset_fields_fall_back_to_reference() {
        let store = ComponentStore::new().with(TemporalField::Day, 5);
        let moment = store.resolve(reference()).unwrap();
        assert_eq!(
            moment,
            NaiveDate::from_ymd_opt(2026, 1, 5)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_imply_over_certain_is_violation() {
        let mut store = ComponentStore::new();
        store.assign(TemporalField::Year, 2024);
        let err = store.imply(TemporalField::Year, 2025).unwrap_err();
        assert!(matches!(err, DateSiftError::InvariantViolation(_)));
        assert_eq!(store.value(TemporalField::Year), FieldValue::Certain(2024));
    }

    #[test]
    fn test_imply_overwrites_implied() {
        let mut store = ComponentStore::new();
        store.imply(TemporalField::Year, 2024).unwrap();
        store.imply(TemporalField::Year, 2023).unwrap();
        assert_eq!(store.value(TemporalField::Year), FieldValue::Implied(2023));
    }

    #[test]
    fn test_assign_upgrades_implied() {
        let mut store = ComponentStore::new().implying(TemporalField::Month, 3);
        store.assign(TemporalField::Month, 4);
        assert!(store.is_certain(TemporalField::Month));
        assert_eq!(store.get(TemporalField::Month), Some(4));
    }

    #[test]
    fn test_imply_default_keeps_existing() {
        let store = ComponentStore::new()
            .with(TemporalField::Day, 9)
            .implying(TemporalField::Day, 1)
            .implying(TemporalField::Month, 2);
        assert_eq!(store.value(TemporalField::Day), FieldValue::Certain(9));
        assert_eq!(store.value(TemporalField::Month), FieldValue::Implied(2));
    }

    #[test]
    fn test_resolve_invalid_day_is_error() {
        let store = ComponentStore::new()
            .with(TemporalField::Month, 2)
            .with(TemporalField::Day, 30);
        let err = store.resolve(reference()).unwrap_err();
        assert!(matches!(err, DateSiftError::InvalidMoment { day: 30, .. }));
    }

    #[test]
    fn test_clone_is_deep() {
        let original = ComponentStore::new().with(TemporalField::Year, 2020);
        let mut copy = original.clone();
        copy.assign(TemporalField::Year, 2021);
        assert_eq!(original.get(TemporalField::Year), Some(2020));
    }

    #[test]
    fn test_shape_predicates() {
        let date = ComponentStore::new().with(TemporalField::Month, 1);
        assert!(date.is_date_only());
        assert!(!date.is_time_only());

        let time = ComponentStore::new()
            .with(TemporalField::Hour, 15)
            .implying(TemporalField::Day, 20);
        assert!(time.is_time_only());

        let weekday = ComponentStore::new()
            .with(TemporalField::Weekday, 1)
            .implying(TemporalField::Day, 19);
        assert!(weekday.is_weekday_only());
    }
}
