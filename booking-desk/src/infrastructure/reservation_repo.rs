use log::{debug, info};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use booking_features::{phone::mask_phone, NewReservation, ReservationStatus, StatusFilterSet};

use crate::domain::reservation_model::*;
use crate::error::AppError;

pub struct ReservationRepository {
    pool: SqlitePool,
}

impl ReservationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // =================================================================
    // 1. Insert
    // =================================================================

    /// Stores a validated booking as `pending`.
    pub async fn insert(&self, user_id: &str, reservation: &NewReservation) -> Result<ReservationId, AppError> {
        let id = sqlx::query(
            "INSERT INTO reservations (
                user_id,
                full_name,
                email,
                phone,
                preferred_date,
                preferred_time,
                city,
                fragrance_preferences,
                notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(user_id)
        .bind(&reservation.full_name)
        .bind(&reservation.email)
        .bind(&reservation.phone)
        .bind(reservation.preferred_date)
        .bind(&reservation.preferred_time)
        .bind(&reservation.city)
        .bind(&reservation.fragrance_preferences)
        .bind(&reservation.notes)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        info!(
            "reservation {id} stored for {user_id} on {} {} (phone {})",
            reservation.preferred_date,
            reservation.preferred_time,
            mask_phone(&reservation.phone)
        );
        Ok(id)
    }

    // =================================================================
    // 2. Queries
    // =================================================================

    /// Newest first. An empty filter returns nothing without touching the DB.
    pub async fn list_by_status(
        &self,
        filter: &StatusFilterSet,
        user_id: Option<&str>,
    ) -> Result<Vec<Reservation>, AppError> {
        if filter.is_empty() {
            debug!("status filter is empty, no reservations requested");
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE status IN ("
        ));
        let mut statuses = query.separated(", ");
        for status in filter.sorted_statuses() {
            statuses.push_bind(status.as_str());
        }
        statuses.push_unseparated(")");

        if let Some(user_id) = user_id {
            query.push(" AND user_id = ").push_bind(user_id);
        }
        query.push(" ORDER BY created_at DESC, id DESC");

        let rows: Vec<ReservationRow> = query.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(Reservation::try_from).collect()
    }

    /// Every booking of one user, newest first.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Reservation>, AppError> {
        let rows: Vec<ReservationRow> = sqlx::query_as(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations
             WHERE user_id = ?1
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    pub async fn find(&self, id: ReservationId) -> Result<Option<Reservation>, AppError> {
        let row: Option<ReservationRow> = sqlx::query_as(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Reservation::try_from).transpose()
    }

    pub async fn count_for_user(&self, user_id: &str) -> Result<i64, AppError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM reservations WHERE user_id = ?1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// One entry per reservation (so a user appears once per booking).
    pub async fn booked_user_ids(&self) -> Result<Vec<UserId>, AppError> {
        let ids = sqlx::query_scalar("SELECT user_id FROM reservations")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    // =================================================================
    // 3. Updates / delete
    // =================================================================

    pub async fn update_status(&self, id: ReservationId, status: ReservationStatus) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE reservations SET status = ?1 WHERE id = ?2")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("reservation", id));
        }
        info!("reservation {id} -> {status}");
        Ok(())
    }

    /// Blank notes clear the column.
    pub async fn update_admin_notes(&self, id: ReservationId, notes: &str) -> Result<(), AppError> {
        let notes = Some(notes.trim()).filter(|n| !n.is_empty());
        let result = sqlx::query("UPDATE reservations SET admin_notes = ?1 WHERE id = ?2")
            .bind(notes)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("reservation", id));
        }
        Ok(())
    }

    pub async fn delete(&self, id: ReservationId) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
