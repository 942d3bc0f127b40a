use std::collections::HashMap;

use chrono::NaiveDate;
use log::{info, warn};

use booking_features::{ReservationForm, ReservationStatus, StatusFilterSet};

use crate::application::dto::{DashboardStats, ReservationView, UserSummary};
use crate::domain::{
    profile_model::{Profile, RoleFilter, UserRole},
    reservation_model::ReservationId,
};
use crate::error::AppError;
use crate::AppServices;

// --- Booking ---

/// Validates the consultation form and stores it as `pending`.
pub async fn submit_reservation(
    services: &AppServices,
    user_id: &str,
    form: &ReservationForm,
    today: NaiveDate,
) -> Result<ReservationId, AppError> {
    let reservation = form.validate(today).map_err(|errors| {
        warn!("rejected reservation from {user_id}: {errors}");
        AppError::from(errors)
    })?;
    services.reservation.insert(user_id, &reservation).await
}

pub async fn my_reservations(services: &AppServices, user_id: &str) -> Result<Vec<ReservationView>, AppError> {
    let reservations = services.reservation.list_for_user(user_id).await?;
    Ok(reservations.into_iter().map(ReservationView::from).collect())
}

// --- Dashboard ---

/// Reservations whose status is ticked in `filter`, optionally for one user.
pub async fn dashboard_reservations(
    services: &AppServices,
    filter: &StatusFilterSet,
    user_id: Option<&str>,
) -> Result<Vec<ReservationView>, AppError> {
    let reservations = services.reservation.list_by_status(filter, user_id).await?;
    Ok(reservations.into_iter().map(ReservationView::from).collect())
}

/// Counters over the filtered reservations plus the account totals.
pub async fn dashboard_stats(services: &AppServices, filter: &StatusFilterSet) -> Result<DashboardStats, AppError> {
    let mut stats = DashboardStats::default();

    // 1. reservations (same rows the dashboard shows)
    for reservation in services.reservation.list_by_status(filter, None).await? {
        stats.count(reservation.status);
    }

    // 2. accounts
    for profile in services.profile.list().await? {
        stats.users += 1;
        if profile.role == UserRole::Admin {
            stats.admins += 1;
        }
    }

    Ok(stats)
}

pub async fn change_reservation_status(
    services: &AppServices,
    id: ReservationId,
    status: ReservationStatus,
) -> Result<(), AppError> {
    services.reservation.update_status(id, status).await
}

pub async fn save_admin_notes(services: &AppServices, id: ReservationId, notes: &str) -> Result<(), AppError> {
    services.reservation.update_admin_notes(id, notes).await
}

pub async fn remove_reservation(services: &AppServices, id: ReservationId) -> Result<(), AppError> {
    if services.reservation.delete(id).await? == 0 {
        return Err(AppError::not_found("reservation", id));
    }
    info!("reservation {id} deleted");
    Ok(())
}

// --- Accounts ---

/// Saves name and phone, then returns the stored profile.
pub async fn update_profile_contact(
    services: &AppServices,
    user_id: &str,
    full_name: Option<&str>,
    phone: Option<&str>,
) -> Result<Profile, AppError> {
    services.profile.update_contact(user_id, full_name, phone).await?;
    services
        .profile
        .find(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("profile", user_id))
}

/// User management tab: text search, role filter and booking counts.
pub async fn search_users(
    services: &AppServices,
    query: &str,
    role: RoleFilter,
) -> Result<Vec<UserSummary>, AppError> {
    // 1. bookings per user
    let mut counts: HashMap<String, usize> = HashMap::new();
    for user_id in services.reservation.booked_user_ids().await? {
        *counts.entry(user_id).or_default() += 1;
    }

    // 2. profiles, filtered
    let profiles = services.profile.list().await?;
    Ok(profiles
        .into_iter()
        .filter(|p| role.allows(p.role))
        .map(|p| {
            let count = counts.get(&p.id).copied().unwrap_or(0);
            UserSummary::new(p, count)
        })
        .filter(|u| u.matches_query(query))
        .collect())
}
