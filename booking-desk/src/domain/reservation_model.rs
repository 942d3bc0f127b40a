use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use booking_features::{HasStatus, ReservationStatus};

use crate::error::AppError;

pub type ReservationId = i64;
pub type UserId = String;

/// A stored consultation booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: ReservationId,
    pub user_id: UserId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub preferred_date: NaiveDate,
    pub preferred_time: String,
    pub city: String,
    pub fragrance_preferences: Option<String>,
    pub notes: Option<String>,
    pub status: ReservationStatus,
    pub admin_notes: Option<String>,
    pub created_at: String,
}

impl HasStatus for Reservation {
    fn status(&self) -> ReservationStatus {
        self.status
    }
}

// =====================
// DB row
// =====================

// status is kept as text in the table
#[derive(FromRow)]
pub(crate) struct ReservationRow {
    id: i64,
    user_id: String,
    full_name: String,
    email: String,
    phone: String,
    preferred_date: NaiveDate,
    preferred_time: String,
    city: String,
    fragrance_preferences: Option<String>,
    notes: Option<String>,
    status: String,
    admin_notes: Option<String>,
    created_at: String,
}

pub(crate) const RESERVATION_COLUMNS: &str = "id, user_id, full_name, email, phone, \
    preferred_date, preferred_time, city, fragrance_preferences, notes, status, \
    admin_notes, created_at";

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|e| AppError::CorruptRecord(format!("reservation {}: {e}", row.id)))?;

        Ok(Reservation {
            id: row.id,
            user_id: row.user_id,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            preferred_date: row.preferred_date,
            preferred_time: row.preferred_time,
            city: row.city,
            fragrance_preferences: row.fragrance_preferences,
            notes: row.notes,
            status,
            admin_notes: row.admin_notes,
            created_at: row.created_at,
        })
    }
}
