//! Booking rules for the bespoke consultation desk.
//!
//! Everything in this crate is pure: no I/O, no shared state.

pub mod phone;
pub mod reservation;
pub mod slots;
pub mod status_filter;

pub use reservation::{FieldError, FormErrors, NewReservation, ReservationForm, ReservationStatus};
pub use slots::{BookingSelection, SlotCategory};
pub use status_filter::{HasStatus, StatusFilterSet};
