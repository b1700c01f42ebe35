//! Reservation aggregate: lifecycle state machine and derived totals.
//!
//! The reservation is the aggregate root of the financial engine. Its
//! `total_amount`, `paid_amount` and `balance_due` are derived figures,
//! always recomputed from the authoritative child records rather than
//! maintained incrementally.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::ReservationError;
pub use service::ReservationService;
pub use types::{
    CreateReservationInput, Reservation, ReservationStatus, ReservationTotals,
};
