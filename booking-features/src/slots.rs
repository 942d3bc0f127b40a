use chrono::{Datelike, Days, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Weekday numbering used throughout: Sunday = 0 ... Saturday = 6

pub type Weekday = i64;

const EVENING_SLOTS: [&str; 4] = ["19:00", "20:00", "21:00", "22:00"];

const SATURDAY_SLOTS: [&str; 14] = [
    "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00",
    "16:00", "17:00", "18:00", "19:00", "20:00", "21:00", "22:00",
];

const DAY_NAMES: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

/// Which slot table a calendar day uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotCategory {
    Tuesday,
    Wednesday,
    Saturday,
    None,
}

impl SlotCategory {
    /// Out-of-range weekdays land in `None` like any closed day.
    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            2 => SlotCategory::Tuesday,
            3 => SlotCategory::Wednesday,
            6 => SlotCategory::Saturday,
            _ => SlotCategory::None,
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_weekday(weekday_of(date))
    }

    pub fn time_slots(self) -> &'static [&'static str] {
        match self {
            SlotCategory::Tuesday | SlotCategory::Wednesday => &EVENING_SLOTS,
            SlotCategory::Saturday => &SATURDAY_SLOTS,
            SlotCategory::None => &[],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SlotCategory::Tuesday => "tuesday",
            SlotCategory::Wednesday => "wednesday",
            SlotCategory::Saturday => "saturday",
            SlotCategory::None => "none",
        }
    }

    pub fn is_bookable(self) -> bool {
        !matches!(self, SlotCategory::None)
    }
}

/// Sunday = 0 ... Saturday = 6
pub fn weekday_of(date: NaiveDate) -> Weekday {
    date.weekday().num_days_from_sunday() as Weekday
}

/// Ordered `HH:MM` slots offered on `weekday`; empty when the shop is closed.
pub fn get_time_slots_for_day(weekday: Weekday) -> &'static [&'static str] {
    SlotCategory::from_weekday(weekday).time_slots()
}

/// English name of the weekday, empty for anything outside 0..=6.
pub fn get_day_name(weekday: Weekday) -> &'static str {
    usize::try_from(weekday)
        .ok()
        .and_then(|i| DAY_NAMES.get(i))
        .copied()
        .unwrap_or("")
}

/// `true` only if `time` is one of the slots offered on `date`.
///
/// Exact string match: `"9:00"` is not `"09:00"`.
pub fn validate_selection(date: NaiveDate, time: &str) -> bool {
    get_time_slots_for_day(weekday_of(date))
        .iter()
        .any(|slot| *slot == time)
}

/// The next `count` dates (starting at `from`, inclusive) that have slots.
pub fn next_bookable_dates(from: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(count);
    let mut day = from;
    while dates.len() < count {
        if SlotCategory::from_date(day).is_bookable() {
            dates.push(day);
        }
        match day.checked_add_days(Days::new(1)) {
            Some(next) => day = next,
            None => break,
        }
    }
    dates
}

// =====================
// Selection state
// =====================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("select a date first")]
    NoDateSelected,
    #[error("{time} is not available on {day}")]
    TimeNotAvailable { time: String, day: &'static str },
}

/// Date + time picked in the consultation form.
///
/// Picking another date always drops the time, even when the old time would
/// still be offered on the new date. The caller has to pick again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSelection {
    date: Option<NaiveDate>,
    time: Option<String>,
}

impl BookingSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        if let Some(previous) = self.time.take() {
            debug!("date changed to {date}, dropping selected time {previous}");
        }
        self.date = Some(date);
    }

    pub fn select_time(&mut self, time: &str) -> Result<(), SelectionError> {
        let date = self.date.ok_or(SelectionError::NoDateSelected)?;
        if !validate_selection(date, time) {
            return Err(SelectionError::TimeNotAvailable {
                time: time.to_string(),
                day: get_day_name(weekday_of(date)),
            });
        }
        self.time = Some(time.to_string());
        Ok(())
    }

    pub fn clear_time(&mut self) {
        self.time = None;
    }

    /// Slots for the selected date (nothing selected -> nothing offered).
    pub fn available_times(&self) -> &'static [&'static str] {
        self.date
            .map(|d| get_time_slots_for_day(weekday_of(d)))
            .unwrap_or(&[])
    }

    pub fn is_complete(&self) -> bool {
        match (self.date, self.time.as_deref()) {
            (Some(date), Some(time)) => validate_selection(date, time),
            _ => false,
        }
    }
}

#[cfg(test)]
mod slot_resolver {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekday_numbering_starts_on_sunday() {
        // 2026-03-15 is a Sunday
        assert_eq!(weekday_of(ymd(2026, 3, 15)), 0);
        assert_eq!(weekday_of(ymd(2026, 3, 17)), 2);
        assert_eq!(weekday_of(ymd(2026, 3, 21)), 6);
    }

    #[test]
    fn categories() {
        assert_eq!(SlotCategory::from_weekday(0), SlotCategory::None);
        assert_eq!(SlotCategory::from_weekday(2), SlotCategory::Tuesday);
        assert_eq!(SlotCategory::from_weekday(3), SlotCategory::Wednesday);
        assert_eq!(SlotCategory::from_weekday(6), SlotCategory::Saturday);
        assert_eq!(SlotCategory::from_weekday(7), SlotCategory::None);
        assert_eq!(SlotCategory::from_weekday(-1), SlotCategory::None);
        assert_eq!(SlotCategory::Saturday.as_str(), "saturday");
    }

    #[test]
    fn day_names() {
        assert_eq!(get_day_name(0), "Sunday");
        assert_eq!(get_day_name(3), "Wednesday");
        assert_eq!(get_day_name(6), "Saturday");
        assert_eq!(get_day_name(7), "");
        assert_eq!(get_day_name(-3), "");
    }

    #[test]
    fn next_bookable_skips_closed_days() {
        // Sunday 2026-03-15 -> Tue 17, Wed 18, Sat 21, Tue 24
        let dates = next_bookable_dates(ymd(2026, 3, 15), 4);
        assert_eq!(
            dates,
            vec![ymd(2026, 3, 17), ymd(2026, 3, 18), ymd(2026, 3, 21), ymd(2026, 3, 24)]
        );
        assert!(next_bookable_dates(ymd(2026, 3, 15), 0).is_empty());
    }

    #[test]
    fn select_time_requires_a_date() {
        let mut selection = BookingSelection::new();
        assert_eq!(selection.select_time("19:00"), Err(SelectionError::NoDateSelected));
        assert!(selection.available_times().is_empty());
    }

    #[test]
    fn select_time_rejects_unoffered_slot() {
        let mut selection = BookingSelection::new();
        selection.select_date(ymd(2026, 3, 17)); // Tuesday
        let err = selection.select_time("09:00").unwrap_err();
        assert_eq!(err.to_string(), "09:00 is not available on Tuesday");
        assert_eq!(selection.time(), None);
    }
}
