#[cfg(test)]
mod profile_repo_tests {
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    use booking_desk::domain::profile_model::{Profile, UserRole};
    use booking_desk::error::AppError;
    use booking_desk::infrastructure::profile_repo::*;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create memory pool");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to create schema");

        pool
    }

    fn profile(id: &str, phone: Option<&str>, role: UserRole) -> Profile {
        Profile {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            full_name: Some(format!("User {id}")),
            phone: phone.map(str::to_string),
            role,
        }
    }

    #[tokio::test]
    async fn test00_upsert_stores_canonical_phone() {
        let repo = ProfileRepository::new(setup_test_db().await);

        repo.upsert(&profile("p1", Some("+62 812 3456 7890"), UserRole::User)).await.unwrap();
        let stored = repo.find("p1").await.unwrap().unwrap();
        assert_eq!(stored.phone.as_deref(), Some("6281234567890"));
        assert_eq!(stored.role, UserRole::User);

        // second upsert updates in place
        repo.upsert(&profile("p1", None, UserRole::Admin)).await.unwrap();
        let stored = repo.find("p1").await.unwrap().unwrap();
        assert_eq!(stored.phone, None);
        assert_eq!(stored.role, UserRole::Admin);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test01_invalid_phone_is_rejected() {
        let repo = ProfileRepository::new(setup_test_db().await);

        let err = repo.upsert(&profile("p1", Some("0812"), UserRole::User)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidPhone(_)));
        assert!(repo.find("p1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test02_update_contact() {
        let repo = ProfileRepository::new(setup_test_db().await);
        repo.upsert(&profile("p1", None, UserRole::User)).await.unwrap();

        repo.update_contact("p1", Some(" Dewi Lestari "), Some("0812-3456-7890")).await.unwrap();
        let stored = repo.find("p1").await.unwrap().unwrap();
        assert_eq!(stored.full_name.as_deref(), Some("Dewi Lestari"));
        assert_eq!(stored.phone.as_deref(), Some("6281234567890"));

        let err = repo.update_contact("ghost", None, None).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { entity: "profile", .. }));
    }

    #[tokio::test]
    async fn test03_missing_role_row_means_user() {
        let pool = setup_test_db().await;
        sqlx::query("INSERT INTO profiles (id, email) VALUES ('p9', 'p9@example.com')")
            .execute(&pool)
            .await
            .unwrap();
        let repo = ProfileRepository::new(pool);

        let stored = repo.find("p9").await.unwrap().unwrap();
        assert_eq!(stored.role, UserRole::User);
        assert_eq!(stored.full_name, None);

        repo.set_role("p9", UserRole::Admin).await.unwrap();
        assert_eq!(repo.find("p9").await.unwrap().unwrap().role, UserRole::Admin);

        let err = repo.set_role("ghost", UserRole::Admin).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
