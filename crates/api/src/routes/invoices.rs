//! Invoice routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::routes::PageQuery;
use viatour_core::invoice::{Invoice, InvoiceStatus};
use viatour_db::InvoiceRepository;
use viatour_shared::types::PageResponse;

/// Creates the invoice routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reservations/{id}/invoice",
            get(get_by_reservation).post(generate),
        )
        .route("/invoices", get(list))
        .route("/invoices/{id}", get(get_one))
        .route("/invoices/{id}/status", put(change_status))
}

/// Request body for a manual invoice status override.
#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    /// Requested status.
    pub status: InvoiceStatus,
}

async fn generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<Invoice>)> {
    let repo = InvoiceRepository::new(state.conn());
    let invoice = repo.generate(id).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

async fn get_by_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Invoice>> {
    let repo = InvoiceRepository::new(state.conn());
    Ok(Json(repo.get_by_reservation(id).await?))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Invoice>> {
    let repo = InvoiceRepository::new(state.conn());
    Ok(Json(repo.get(id).await?))
}

async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Json<PageResponse<Invoice>>> {
    let repo = InvoiceRepository::new(state.conn());
    Ok(Json(repo.list(page.request()).await?))
}

async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ChangeStatusRequest>,
) -> ApiResult<Json<Invoice>> {
    let repo = InvoiceRepository::new(state.conn());
    Ok(Json(repo.change_status(id, body.status).await?))
}
