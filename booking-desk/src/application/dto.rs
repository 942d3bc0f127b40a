use chrono::NaiveDate;
use serde::Serialize;

use booking_features::{
    phone::to_display_format,
    slots::{get_day_name, weekday_of},
    ReservationStatus,
};

use crate::application::time::format_long_date;
use crate::domain::{
    profile_model::{Profile, UserRole},
    reservation_model::{Reservation, ReservationId},
};

/// One reservation card as shown on the dashboard and on "my reservations".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationView {
    pub id: ReservationId,
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub phone_display: String,
    pub preferred_date: NaiveDate,
    pub preferred_date_long: String,
    pub day_name: &'static str,
    pub preferred_time: String,
    pub city: String,
    pub fragrance_preferences: Option<String>,
    pub notes: Option<String>,
    pub status: ReservationStatus,
    pub status_label: &'static str,
    pub admin_notes: Option<String>,
    pub created_at: String,
}

impl From<Reservation> for ReservationView {
    fn from(r: Reservation) -> Self {
        Self {
            phone_display: to_display_format(&r.phone),
            preferred_date_long: format_long_date(r.preferred_date),
            day_name: get_day_name(weekday_of(r.preferred_date)),
            status_label: r.status.label(),
            id: r.id,
            user_id: r.user_id,
            full_name: r.full_name,
            email: r.email,
            phone: r.phone,
            preferred_date: r.preferred_date,
            preferred_time: r.preferred_time,
            city: r.city,
            fragrance_preferences: r.fragrance_preferences,
            notes: r.notes,
            status: r.status,
            admin_notes: r.admin_notes,
            created_at: r.created_at,
        }
    }
}

/// Header counters of the admin dashboard.
///
/// Reservation counts are over the currently fetched (filtered) records.
/// `users` counts every account, admins included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub users: usize,
    pub admins: usize,
}

impl DashboardStats {
    pub fn count(&mut self, status: ReservationStatus) {
        self.total += 1;
        match status {
            ReservationStatus::Pending => self.pending += 1,
            ReservationStatus::Confirmed => self.confirmed += 1,
            ReservationStatus::Completed => self.completed += 1,
            ReservationStatus::Cancelled => self.cancelled += 1,
        }
    }
}

/// Row of the user management tab.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub phone_display: String,
    pub role: UserRole,
    pub reservation_count: usize,
}

impl UserSummary {
    pub fn new(profile: Profile, reservation_count: usize) -> Self {
        let phone = profile.phone.unwrap_or_default();
        Self {
            phone_display: to_display_format(&phone),
            id: profile.id,
            email: profile.email,
            full_name: profile.full_name.unwrap_or_default(),
            phone,
            role: profile.role,
            reservation_count,
        }
    }

    /// Case-insensitive substring match on email, name or phone.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        [&self.email, &self.full_name, &self.phone, &self.phone_display]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}
