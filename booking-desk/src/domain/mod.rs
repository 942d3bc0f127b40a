pub mod profile_model;
pub mod reservation_model;
