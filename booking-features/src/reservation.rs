use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::phone::{normalize_phone_number, validate_phone_number};
use crate::slots::{get_day_name, validate_selection, weekday_of};

/// Consultations only happen in this city for now.
pub const AVAILABLE_CITY: &str = "Jakarta";

// =====================
// Status
// =====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 4] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::Completed,
        ReservationStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "Pending",
            ReservationStatus::Confirmed => "Confirmed",
            ReservationStatus::Completed => "Completed",
            ReservationStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown reservation status: {0:?}")]
pub struct ParseStatusError(pub String);

impl FromStr for ReservationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ReservationStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

// =====================
// Form
// =====================

/// Raw consultation request as typed into the form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub preferred_date: String,
    pub preferred_time: String,
    #[serde(default)]
    pub fragrance_preferences: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A form that passed validation. Phone is canonical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub preferred_date: NaiveDate,
    pub preferred_time: String,
    pub city: String,
    pub fragrance_preferences: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("Please enter your full name")]
    FullName,
    #[error("Please enter a valid email")]
    Email,
    #[error("Please enter a valid phone number (+62 8xx xxxx xxxx)")]
    Phone,
    #[error("Please select a date")]
    DateMissing,
    #[error("Invalid date: {0}")]
    DateInvalid(String),
    #[error("Consultations can be booked from {0} onwards")]
    DateTooEarly(NaiveDate),
    #[error("Please select a time")]
    TimeMissing,
    #[error("{time} is not available on {day}")]
    TimeNotAvailable { time: String, day: &'static str },
    #[error("{0} must be at most 500 characters")]
    TooLong(&'static str),
}

/// Every problem found in one pass over the form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct FormErrors(pub Vec<FieldError>);

const MAX_NAME: usize = 100;
const MAX_EMAIL: usize = 255;
const MAX_FREE_TEXT: usize = 500;

fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

fn optional_text(
    value: &Option<String>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let text = value.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
    if text.chars().count() > MAX_FREE_TEXT {
        errors.push(FieldError::TooLong(field));
    }
    Some(text.to_string())
}

/// Earliest date a consultation can be booked for.
pub fn min_booking_date(today: NaiveDate) -> NaiveDate {
    today.checked_add_days(Days::new(1)).unwrap_or(today)
}

impl ReservationForm {
    /// Checks every field against `today` and returns the storable reservation.
    pub fn validate(&self, today: NaiveDate) -> Result<NewReservation, FormErrors> {
        let mut errors = Vec::new();

        let full_name = self.full_name.trim();
        if !(2..=MAX_NAME).contains(&full_name.chars().count()) {
            errors.push(FieldError::FullName);
        }

        let email = self.email.trim();
        if email.len() > MAX_EMAIL || !looks_like_email(email) {
            errors.push(FieldError::Email);
        }

        if !validate_phone_number(self.phone.trim()) {
            errors.push(FieldError::Phone);
        }

        let date_text = self.preferred_date.trim();
        let date = if date_text.is_empty() {
            errors.push(FieldError::DateMissing);
            None
        } else {
            match NaiveDate::parse_from_str(date_text, "%Y-%m-%d") {
                Ok(date) if date < min_booking_date(today) => {
                    errors.push(FieldError::DateTooEarly(min_booking_date(today)));
                    Some(date)
                }
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push(FieldError::DateInvalid(date_text.to_string()));
                    None
                }
            }
        };

        let time = self.preferred_time.trim();
        if time.is_empty() {
            errors.push(FieldError::TimeMissing);
        } else if let Some(date) = date {
            if !validate_selection(date, time) {
                errors.push(FieldError::TimeNotAvailable {
                    time: time.to_string(),
                    day: get_day_name(weekday_of(date)),
                });
            }
        }

        let fragrance_preferences =
            optional_text(&self.fragrance_preferences, "Fragrance preferences", &mut errors);
        let notes = optional_text(&self.notes, "Notes", &mut errors);

        match date {
            Some(preferred_date) if errors.is_empty() => Ok(NewReservation {
                full_name: full_name.to_string(),
                email: email.to_string(),
                phone: normalize_phone_number(self.phone.trim()),
                preferred_date,
                preferred_time: time.to_string(),
                city: AVAILABLE_CITY.to_string(),
                fragrance_preferences,
                notes,
            }),
            _ => Err(FormErrors(errors)),
        }
    }
}

#[cfg(test)]
mod reservation_tests {
    use super::*;

    fn today() -> NaiveDate {
        // Thursday
        NaiveDate::from_ymd_opt(2026, 3, 12).unwrap()
    }

    fn valid_form() -> ReservationForm {
        ReservationForm {
            full_name: "  Sekar Ayu ".to_string(),
            email: "sekar@example.com".to_string(),
            phone: "+62 812 3456 7890".to_string(),
            preferred_date: "2026-03-14".to_string(), // Saturday
            preferred_time: "09:00".to_string(),
            fragrance_preferences: Some("woody, vanilla".to_string()),
            notes: Some("   ".to_string()),
        }
    }

    #[test]
    fn status_round_trips_through_strings() {
        assert_eq!("pending".parse(), Ok(ReservationStatus::Pending));
        assert_eq!(" Cancelled ".parse(), Ok(ReservationStatus::Cancelled));
        assert!("archived".parse::<ReservationStatus>().is_err());
        assert_eq!(ReservationStatus::Confirmed.to_string(), "confirmed");
        assert_eq!(ReservationStatus::Completed.label(), "Completed");
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&ReservationStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
    }

    #[test]
    fn valid_form_is_normalized() {
        let reservation = valid_form().validate(today()).unwrap();
        assert_eq!(reservation.full_name, "Sekar Ayu");
        assert_eq!(reservation.phone, "6281234567890");
        assert_eq!(reservation.city, AVAILABLE_CITY);
        assert_eq!(reservation.fragrance_preferences.as_deref(), Some("woody, vanilla"));
        assert_eq!(reservation.notes, None);
    }

    #[test]
    fn every_bad_field_is_reported() {
        let form = ReservationForm {
            full_name: "A".to_string(),
            email: "not-an-email".to_string(),
            phone: "123".to_string(),
            preferred_date: String::new(),
            preferred_time: String::new(),
            fragrance_preferences: None,
            notes: Some("x".repeat(501)),
        };
        let FormErrors(errors) = form.validate(today()).unwrap_err();
        assert_eq!(
            errors,
            vec![
                FieldError::FullName,
                FieldError::Email,
                FieldError::Phone,
                FieldError::DateMissing,
                FieldError::TimeMissing,
                FieldError::TooLong("Notes"),
            ]
        );
    }

    #[test]
    fn time_must_be_offered_on_that_day() {
        let mut form = valid_form();
        form.preferred_time = "08:00".to_string();
        let FormErrors(errors) = form.validate(today()).unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::TimeNotAvailable { time: "08:00".to_string(), day: "Saturday" }]
        );
    }

    #[test]
    fn date_must_be_after_today() {
        let mut form = valid_form();
        form.preferred_date = "2026-03-12".to_string();
        form.preferred_time = "19:00".to_string();
        let FormErrors(errors) = form.validate(today()).unwrap_err();
        // today is a Thursday: too early, and no slots either
        assert_eq!(errors[0], FieldError::DateTooEarly(NaiveDate::from_ymd_opt(2026, 3, 13).unwrap()));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn malformed_date() {
        let mut form = valid_form();
        form.preferred_date = "14/03/2026".to_string();
        let FormErrors(errors) = form.validate(today()).unwrap_err();
        assert_eq!(errors, vec![FieldError::DateInvalid("14/03/2026".to_string())]);
    }

    #[test]
    fn email_shapes() {
        assert!(looks_like_email("a@b.co"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.co"));
        assert!(!looks_like_email("a b@c.co"));
        assert!(!looks_like_email("a@@b.co"));
    }
}
