//! Payment error types.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Payment-related errors.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Payment not found.
    #[error("Payment not found: {0}")]
    NotFound(Uuid),

    /// Invoice not found.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(Uuid),

    /// Payment method not found.
    #[error("Payment method not found: {0}")]
    MethodNotFound(Uuid),

    /// Payment method is inactive.
    #[error("Payment method is inactive")]
    MethodInactive,

    /// The invoice is cancelled and accepts no payments.
    #[error("Invoice is cancelled and accepts no payments")]
    InvoiceCancelled,

    /// Transaction reference already used by another payment.
    #[error("Transaction reference is already used by another payment")]
    DuplicateReference,

    /// Payment amount must be positive.
    #[error("Payment amount must be positive")]
    NonPositiveAmount,

    /// Amount exceeds the invoice's current pending balance.
    #[error("Payment of {requested} exceeds the invoice's pending balance of {balance}")]
    ExceedsBalance {
        /// Amount requested.
        requested: Decimal,
        /// Current pending balance.
        balance: Decimal,
    },

    /// Approved payments are immutable history; only pending ones can be
    /// deleted.
    #[error("Only pending payments can be deleted")]
    NotPending,
}
