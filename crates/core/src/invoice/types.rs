//! Invoice domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Issued, not yet fully covered by approved payments.
    Pending,
    /// Fully covered by approved payments.
    Paid,
    /// Voided by manual override (terminal).
    Cancelled,
    /// Past due; set by manual override, cleared when payments cover the total.
    Overdue,
}

impl InvoiceStatus {
    /// Returns true if payments may still be recorded against the invoice.
    #[must_use]
    pub fn accepts_payments(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Paid => write!(f, "paid"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Overdue => write!(f, "overdue"),
        }
    }
}

/// An invoice derived from exactly one reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice ID.
    pub id: Uuid,
    /// The reservation this invoice bills.
    pub reservation_id: Uuid,
    /// Unique, sequential, human-readable number (`INV-00000042`).
    pub invoice_number: String,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Total copied from the reservation at generation time.
    pub total_amount: Decimal,
    /// Sum of approved payments (derived).
    pub paid_amount: Decimal,
    /// Lifecycle status.
    pub status: InvoiceStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
