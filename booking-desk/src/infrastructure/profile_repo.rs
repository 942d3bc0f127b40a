use log::info;
use sqlx::SqlitePool;

use booking_features::phone::{mask_phone, normalize_phone_number, validate_phone_number};

use crate::domain::profile_model::*;
use crate::error::AppError;

pub struct ProfileRepository {
    pool: SqlitePool,
}

const PROFILE_SELECT: &str = "SELECT p.id, p.email, p.full_name, p.phone, r.role
    FROM profiles p
    LEFT JOIN user_roles r ON r.user_id = p.id";

/// Canonical phone, `None` for a blank field.
fn canonical_phone(phone: Option<&str>) -> Result<Option<String>, AppError> {
    match phone.map(str::trim).filter(|p| !p.is_empty()) {
        None => Ok(None),
        Some(p) if validate_phone_number(p) => Ok(Some(normalize_phone_number(p))),
        Some(p) => Err(AppError::InvalidPhone(mask_phone(p))),
    }
}

impl ProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates or refreshes a profile together with its role.
    pub async fn upsert(&self, profile: &Profile) -> Result<(), AppError> {
        let phone = canonical_phone(profile.phone.as_deref())?;

        // 1. one transaction for both tables
        let mut tx = self.pool.begin().await?;

        // 2. profiles
        sqlx::query(
            "INSERT INTO profiles (id, email, full_name, phone) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (id) DO UPDATE SET
                email = excluded.email,
                full_name = excluded.full_name,
                phone = excluded.phone",
        )
        .bind(&profile.id)
        .bind(&profile.email)
        .bind(&profile.full_name)
        .bind(&phone)
        .execute(&mut *tx)
        .await?;

        // 3. user_roles
        sqlx::query(
            "INSERT INTO user_roles (user_id, role) VALUES (?1, ?2)
             ON CONFLICT (user_id) DO UPDATE SET role = excluded.role",
        )
        .bind(&profile.id)
        .bind(profile.role.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn find(&self, id: &str) -> Result<Option<Profile>, AppError> {
        let row: Option<ProfileRow> = sqlx::query_as(&format!("{PROFILE_SELECT} WHERE p.id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Profile::try_from).transpose()
    }

    /// Newest accounts first.
    pub async fn list(&self) -> Result<Vec<Profile>, AppError> {
        let rows: Vec<ProfileRow> =
            sqlx::query_as(&format!("{PROFILE_SELECT} ORDER BY p.created_at DESC, p.id"))
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(Profile::try_from).collect()
    }

    /// Name and phone from the profile page. A blank phone clears it.
    pub async fn update_contact(
        &self,
        id: &str,
        full_name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<(), AppError> {
        let phone = canonical_phone(phone)?;
        let full_name = full_name.map(str::trim).filter(|n| !n.is_empty());

        let result = sqlx::query("UPDATE profiles SET full_name = ?1, phone = ?2 WHERE id = ?3")
            .bind(full_name)
            .bind(&phone)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("profile", id));
        }
        info!(
            "profile {id} contact updated (phone {})",
            phone.as_deref().map(mask_phone).unwrap_or_else(|| "<none>".to_string())
        );
        Ok(())
    }

    pub async fn set_role(&self, id: &str, role: UserRole) -> Result<(), AppError> {
        if self.find(id).await?.is_none() {
            return Err(AppError::not_found("profile", id));
        }
        sqlx::query(
            "INSERT INTO user_roles (user_id, role) VALUES (?1, ?2)
             ON CONFLICT (user_id) DO UPDATE SET role = excluded.role",
        )
        .bind(id)
        .bind(role.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
