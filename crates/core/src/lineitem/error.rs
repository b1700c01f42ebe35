//! Line-item error types.

use thiserror::Error;
use uuid::Uuid;

use super::types::LineItemKind;

/// Line-item attachment and detachment errors.
#[derive(Debug, Error)]
pub enum LineItemError {
    /// Line item not found.
    #[error("Line item not found: {0}")]
    NotFound(Uuid),

    /// Target catalog resource not found.
    #[error("{kind} not found: {id}")]
    ResourceNotFound {
        /// Resource kind.
        kind: LineItemKind,
        /// Resource ID.
        id: Uuid,
    },

    /// Target resource is inactive or unavailable.
    #[error("{0} is not available for booking")]
    ResourceInactive(LineItemKind),

    /// Requested quantity exceeds remaining capacity.
    #[error("Requested {requested} {kind} seats/slots but only {available} remain")]
    InsufficientCapacity {
        /// Resource kind.
        kind: LineItemKind,
        /// Quantity requested.
        requested: i32,
        /// Quantity remaining.
        available: i32,
    },

    /// Item dates fall outside the reservation's trip window.
    #[error("{0} dates fall outside the reservation's trip window")]
    OutsideTripWindow(LineItemKind),

    /// Check-out must come after check-in.
    #[error("Check-out date must be after the check-in date")]
    InvalidStayDates,

    /// Quantity must be at least one.
    #[error("{0} quantity must be at least 1")]
    NonPositiveQuantity(LineItemKind),

    /// Extras amount cannot be negative.
    #[error("Extras amount cannot be negative")]
    NegativeExtras,

    /// The same resource is already attached to this reservation.
    #[error("{0} is already attached to this reservation")]
    AlreadyAttached(LineItemKind),

    /// The item's real-world window has begun; it is immutable.
    #[error("{0} can no longer be removed: its travel window has already started")]
    WindowStarted(LineItemKind),
}
