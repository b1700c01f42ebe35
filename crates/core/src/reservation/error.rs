//! Reservation error types.

use thiserror::Error;
use uuid::Uuid;

use super::types::ReservationStatus;

/// Reservation-related errors.
#[derive(Debug, Error)]
pub enum ReservationError {
    /// Reservation not found.
    #[error("Reservation not found: {0}")]
    NotFound(Uuid),

    /// Client not found.
    #[error("Client not found: {0}")]
    ClientNotFound(Uuid),

    /// Employee not found.
    #[error("Employee not found: {0}")]
    EmployeeNotFound(Uuid),

    /// Trip end date precedes trip start date.
    #[error("Trip end date must not precede the start date")]
    InvalidTripWindow,

    /// Passenger count must be at least one.
    #[error("Passenger count must be at least 1")]
    NoPassengers,

    /// Only pending reservations can be confirmed.
    #[error("Only pending reservations can be confirmed (current status: {0})")]
    NotPending(ReservationStatus),

    /// Only confirmed reservations can be completed.
    #[error("Only confirmed reservations can be completed (current status: {0})")]
    NotConfirmed(ReservationStatus),

    /// Reservation is in a terminal state and cannot be modified.
    #[error("Reservation is {0} and cannot be modified")]
    TerminalState(ReservationStatus),

    /// Cancellation requires a reason.
    #[error("Cancellation requires a reason")]
    MissingCancellationReason,
}
