//! Reservation domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reservation lifecycle status.
///
/// Transitions: `Pending -> Confirmed -> Completed`;
/// `Pending | Confirmed -> Cancelled`. `Cancelled` and `Completed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Reservation is being assembled; items may be attached or removed.
    Pending,
    /// Reservation has been confirmed and can be invoiced.
    Confirmed,
    /// Reservation was cancelled (terminal non-success state).
    Cancelled,
    /// Trip completed (terminal success state).
    Completed,
}

impl ReservationStatus {
    /// Returns true if no further transitions are allowed.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Returns true if line items may be attached or detached.
    #[must_use]
    pub fn allows_item_mutation(&self) -> bool {
        !self.is_terminal()
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// A reservation record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    /// Reservation ID.
    pub id: Uuid,
    /// Client taking the trip.
    pub client_id: Uuid,
    /// Employee who sold the trip.
    pub employee_id: Uuid,
    /// Trip start date.
    pub trip_start: NaiveDate,
    /// Trip end date (inclusive).
    pub trip_end: NaiveDate,
    /// Number of passengers travelling.
    pub passenger_count: i32,
    /// Sum of subtotals of all currently attached line items (derived).
    pub total_amount: Decimal,
    /// Sum of approved payments pushed back from the invoice (derived).
    pub paid_amount: Decimal,
    /// `total_amount - paid_amount` (derived).
    pub balance_due: Decimal,
    /// Lifecycle status.
    pub status: ReservationStatus,
    /// Reason recorded when the reservation was cancelled.
    pub cancellation_reason: Option<String>,
    /// Free-text observations.
    pub observations: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Derived reservation totals, recomputed after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationTotals {
    /// Sum of attached line-item subtotals.
    pub total_amount: Decimal,
    /// Sum of approved payments.
    pub paid_amount: Decimal,
    /// `total_amount - paid_amount`.
    pub balance_due: Decimal,
}

impl ReservationTotals {
    /// Zero totals for a freshly created reservation.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            total_amount: Decimal::ZERO,
            paid_amount: Decimal::ZERO,
            balance_due: Decimal::ZERO,
        }
    }
}

/// Input for creating a new reservation.
#[derive(Debug, Clone)]
pub struct CreateReservationInput {
    /// Client taking the trip.
    pub client_id: Uuid,
    /// Employee who sold the trip.
    pub employee_id: Uuid,
    /// Trip start date.
    pub trip_start: NaiveDate,
    /// Trip end date (inclusive).
    pub trip_end: NaiveDate,
    /// Number of passengers.
    pub passenger_count: i32,
    /// Whether the reservation starts out confirmed.
    pub confirmed: bool,
    /// Free-text observations.
    pub observations: Option<String>,
}
