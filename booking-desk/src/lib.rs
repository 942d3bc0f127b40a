//! Reservation desk for bespoke fragrance consultations.
//!
//! SQLite-backed repositories plus the commands the booking form,
//! the customer page and the admin dashboard call.

use std::str::FromStr;

use log::info;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

use config::Config;
use error::AppError;
use infrastructure::profile_repo::ProfileRepository;
use infrastructure::reservation_repo::ReservationRepository;

/// Every repository the commands need.
pub struct AppServices {
    pub reservation: ReservationRepository,
    pub profile: ProfileRepository,
}

impl AppServices {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            reservation: ReservationRepository::new(pool.clone()),
            profile: ProfileRepository::new(pool),
        }
    }
}

/// Opens (creating if needed) the database and brings the schema up to date.
pub async fn connect(config: &Config) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    info!("database ready at {}", config.database_url);
    Ok(pool)
}
