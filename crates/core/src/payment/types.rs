//! Payment domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Recorded, awaiting approval.
    Pending,
    /// Approved; counts towards the invoice's paid total.
    Approved,
    /// Rejected; does not count towards the paid total.
    Rejected,
}

impl PaymentStatus {
    /// Returns true if the payment counts towards the invoice's paid total.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// A payment recorded against an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Payment ID.
    pub id: Uuid,
    /// The invoice this payment settles.
    pub invoice_id: Uuid,
    /// Payment amount.
    pub amount: Decimal,
    /// Payment method used.
    pub payment_method_id: Uuid,
    /// External transaction reference (unique if present).
    pub reference: Option<String>,
    /// Lifecycle status.
    pub status: PaymentStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for recording a new payment.
#[derive(Debug, Clone)]
pub struct RecordPaymentInput {
    /// The invoice to pay.
    pub invoice_id: Uuid,
    /// Payment amount.
    pub amount: Decimal,
    /// Payment method.
    pub payment_method_id: Uuid,
    /// Optional external transaction reference.
    pub reference: Option<String>,
    /// Record pre-approved (walk-in cash) instead of pending.
    pub approved: bool,
}
