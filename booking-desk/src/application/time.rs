use chrono::{Local, NaiveDate};

pub use booking_features::reservation::min_booking_date;

/// Today in the desk's local time zone.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// `2026-03-14` -> `Saturday, March 14, 2026`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// `YYYY-MM-DD`, surrounding whitespace allowed.
pub fn parse_booking_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}
