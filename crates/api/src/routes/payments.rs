//! Payment routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use viatour_core::payment::{Payment, PaymentStatus, RecordPaymentInput};
use viatour_db::PaymentRepository;

/// Creates the payment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/invoices/{id}/payments",
            get(list_for_invoice).post(record),
        )
        .route("/payments/{id}", get(get_one).delete(remove))
        .route("/payments/{id}/status", put(change_status))
        .route("/payments/{id}/amount", put(update_amount))
}

/// Request body for recording a payment.
#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    /// Payment amount.
    pub amount: Decimal,
    /// Payment method.
    pub payment_method_id: Uuid,
    /// Optional external transaction reference.
    pub reference: Option<String>,
    /// Record pre-approved (walk-in cash) instead of pending.
    #[serde(default)]
    pub approved: bool,
}

/// Request body for changing a payment's status.
#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    /// Requested status.
    pub status: PaymentStatus,
}

/// Request body for amending a payment's amount.
#[derive(Debug, Deserialize)]
pub struct UpdateAmountRequest {
    /// New amount.
    pub amount: Decimal,
}

async fn record(
    State(state): State<AppState>,
    Path(invoice_id): Path<Uuid>,
    Json(body): Json<RecordPaymentRequest>,
) -> ApiResult<(StatusCode, Json<Payment>)> {
    let repo = PaymentRepository::new(state.conn());
    let input = RecordPaymentInput {
        invoice_id,
        amount: body.amount,
        payment_method_id: body.payment_method_id,
        reference: body.reference,
        approved: body.approved,
    };
    let payment = repo.record(input).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

async fn list_for_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Payment>>> {
    let repo = PaymentRepository::new(state.conn());
    Ok(Json(repo.list_for_invoice(invoice_id).await?))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Payment>> {
    let repo = PaymentRepository::new(state.conn());
    Ok(Json(repo.get(id).await?))
}

async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ChangeStatusRequest>,
) -> ApiResult<Json<Payment>> {
    let repo = PaymentRepository::new(state.conn());
    Ok(Json(repo.change_status(id, body.status).await?))
}

async fn update_amount(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateAmountRequest>,
) -> ApiResult<Json<Payment>> {
    let repo = PaymentRepository::new(state.conn());
    Ok(Json(repo.update_amount(id, body.amount).await?))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = PaymentRepository::new(state.conn());
    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
