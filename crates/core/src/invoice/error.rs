//! Invoice error types.

use thiserror::Error;
use uuid::Uuid;

use super::types::InvoiceStatus;
use crate::reservation::ReservationStatus;

/// Invoice-related errors.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// Invoice not found.
    #[error("Invoice not found: {0}")]
    NotFound(Uuid),

    /// Reservation not found.
    #[error("Reservation not found: {0}")]
    ReservationNotFound(Uuid),

    /// Only confirmed reservations can be invoiced.
    #[error("Only confirmed reservations can be invoiced (current status: {0})")]
    ReservationNotConfirmed(ReservationStatus),

    /// The reservation already has an invoice.
    #[error("Reservation is already invoiced")]
    AlreadyInvoiced,

    /// Cancelled invoices cannot change status again.
    #[error("Invoice is cancelled and cannot change status")]
    Cancelled,

    /// Illegal manual status change.
    #[error("Invoice status cannot change from {from} to {to}")]
    InvalidStatusChange {
        /// Current status.
        from: InvoiceStatus,
        /// Requested status.
        to: InvoiceStatus,
    },
}
