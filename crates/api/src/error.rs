//! Maps repository errors into the shared HTTP error taxonomy.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use viatour_core::invoice::InvoiceError;
use viatour_core::lineitem::LineItemError;
use viatour_core::payment::PaymentError;
use viatour_core::reservation::ReservationError;
use viatour_db::repositories::catalog::CatalogError;
use viatour_db::repositories::invoice::InvoiceRepoError;
use viatour_db::repositories::line_item::LineItemRepoError;
use viatour_db::repositories::payment::PaymentRepoError;
use viatour_db::repositories::reservation::ReservationRepoError;
use viatour_shared::error::AppError;

/// API-boundary error; everything a handler can fail with converts into it.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(json!({
            "error": self.0.error_code(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

fn database(e: &dyn std::fmt::Display) -> AppError {
    error!(error = %e, "database failure");
    AppError::Database("internal database error".into())
}

fn map_reservation(e: ReservationError) -> AppError {
    match e {
        ReservationError::NotFound(_)
        | ReservationError::ClientNotFound(_)
        | ReservationError::EmployeeNotFound(_) => AppError::NotFound(e.to_string()),
        ReservationError::InvalidTripWindow | ReservationError::NoPassengers => {
            AppError::InvalidRange(e.to_string())
        }
        ReservationError::MissingCancellationReason => AppError::Validation(e.to_string()),
        ReservationError::NotPending(_)
        | ReservationError::NotConfirmed(_)
        | ReservationError::TerminalState(_) => AppError::InvalidState(e.to_string()),
    }
}

fn map_line_item(e: LineItemError) -> AppError {
    match e {
        LineItemError::NotFound(_) | LineItemError::ResourceNotFound { .. } => {
            AppError::NotFound(e.to_string())
        }
        LineItemError::AlreadyAttached(_) => AppError::Conflict(e.to_string()),
        LineItemError::OutsideTripWindow(_)
        | LineItemError::InvalidStayDates
        | LineItemError::NonPositiveQuantity(_)
        | LineItemError::NegativeExtras => AppError::InvalidRange(e.to_string()),
        LineItemError::InsufficientCapacity { .. }
        | LineItemError::ResourceInactive(_)
        | LineItemError::WindowStarted(_) => AppError::InvalidState(e.to_string()),
    }
}

fn map_invoice(e: InvoiceError) -> AppError {
    match e {
        InvoiceError::NotFound(_) | InvoiceError::ReservationNotFound(_) => {
            AppError::NotFound(e.to_string())
        }
        InvoiceError::AlreadyInvoiced => AppError::Conflict(e.to_string()),
        InvoiceError::ReservationNotConfirmed(_)
        | InvoiceError::Cancelled
        | InvoiceError::InvalidStatusChange { .. } => AppError::InvalidState(e.to_string()),
    }
}

fn map_payment(e: PaymentError) -> AppError {
    match e {
        PaymentError::NotFound(_)
        | PaymentError::InvoiceNotFound(_)
        | PaymentError::MethodNotFound(_) => AppError::NotFound(e.to_string()),
        PaymentError::DuplicateReference => AppError::Conflict(e.to_string()),
        PaymentError::NonPositiveAmount | PaymentError::ExceedsBalance { .. } => {
            AppError::InvalidRange(e.to_string())
        }
        PaymentError::MethodInactive
        | PaymentError::InvoiceCancelled
        | PaymentError::NotPending => AppError::InvalidState(e.to_string()),
    }
}

impl From<ReservationRepoError> for ApiError {
    fn from(e: ReservationRepoError) -> Self {
        Self(match e {
            ReservationRepoError::Domain(e) => map_reservation(e),
            ReservationRepoError::Item(e) => return e.into(),
            ReservationRepoError::ConcurrentModification(_) => AppError::Conflict(e.to_string()),
            ReservationRepoError::Database(e) => database(&e),
        })
    }
}

impl From<LineItemRepoError> for ApiError {
    fn from(e: LineItemRepoError) -> Self {
        Self(match e {
            LineItemRepoError::Domain(e) => map_line_item(e),
            LineItemRepoError::Reservation(e) => map_reservation(e),
            LineItemRepoError::ConcurrentModification(_) => AppError::Conflict(e.to_string()),
            LineItemRepoError::Database(e) => database(&e),
        })
    }
}

impl From<InvoiceRepoError> for ApiError {
    fn from(e: InvoiceRepoError) -> Self {
        Self(match e {
            InvoiceRepoError::Domain(e) => map_invoice(e),
            InvoiceRepoError::Database(e) => database(&e),
        })
    }
}

impl From<PaymentRepoError> for ApiError {
    fn from(e: PaymentRepoError) -> Self {
        Self(match e {
            PaymentRepoError::Domain(e) => map_payment(e),
            PaymentRepoError::ConcurrentModification(_) => AppError::Conflict(e.to_string()),
            PaymentRepoError::Database(e) => database(&e),
        })
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        Self(match e {
            CatalogError::NotFound { .. } => AppError::NotFound(e.to_string()),
            CatalogError::Database(e) => database(&e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_capacity_exhaustion_maps_to_invalid_state() {
        let e: ApiError = LineItemRepoError::Domain(LineItemError::InsufficientCapacity {
            kind: viatour_core::lineitem::LineItemKind::Package,
            requested: 5,
            available: 2,
        })
        .into();
        assert_eq!(e.0.status_code(), 422);
        assert_eq!(e.0.error_code(), "INVALID_STATE");
    }

    #[test]
    fn test_duplicate_attachment_maps_to_conflict() {
        let e: ApiError = LineItemRepoError::Domain(LineItemError::AlreadyAttached(
            viatour_core::lineitem::LineItemKind::Flight,
        ))
        .into();
        assert_eq!(e.0.status_code(), 409);
        assert_eq!(e.0.error_code(), "CONFLICT");
    }

    #[test]
    fn test_missing_reservation_maps_to_not_found() {
        let e: ApiError =
            ReservationRepoError::Domain(ReservationError::NotFound(Uuid::new_v4())).into();
        assert_eq!(e.0.status_code(), 404);
    }

    #[test]
    fn test_terminal_state_maps_to_unprocessable() {
        let e: ApiError = ReservationRepoError::Domain(ReservationError::TerminalState(
            viatour_core::reservation::ReservationStatus::Cancelled,
        ))
        .into();
        assert_eq!(e.0.status_code(), 422);
    }

    #[test]
    fn test_concurrent_modification_maps_to_conflict() {
        let e: ApiError = PaymentRepoError::ConcurrentModification(Uuid::new_v4()).into();
        assert_eq!(e.0.status_code(), 409);
    }

    #[test]
    fn test_nested_item_error_flattens() {
        let e: ApiError = ReservationRepoError::Item(LineItemRepoError::Domain(
            LineItemError::InvalidStayDates,
        ))
        .into();
        assert_eq!(e.0.status_code(), 422);
        assert_eq!(e.0.error_code(), "INVALID_RANGE");
    }
}
