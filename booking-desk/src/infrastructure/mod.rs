pub mod profile_repo;
pub mod reservation_repo;
