//! Catalog browsing routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::routes::PageQuery;
use crate::AppState;
use viatour_db::CatalogRepository;
use viatour_db::entities::{clients, flights, hotels, packages, payment_methods, services};
use viatour_shared::types::PageResponse;

/// Creates the catalog routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hotels", get(list_hotels))
        .route("/hotels/{id}", get(get_hotel))
        .route("/flights", get(list_flights))
        .route("/flights/{id}", get(get_flight))
        .route("/packages", get(list_packages))
        .route("/packages/{id}", get(get_package))
        .route("/services", get(list_services))
        .route("/services/{id}", get(get_service))
        .route("/payment-methods", get(list_payment_methods))
        .route("/clients", get(list_clients))
}

async fn list_hotels(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Json<PageResponse<hotels::Model>>> {
    let repo = CatalogRepository::new(state.conn());
    Ok(Json(repo.list_hotels(page.request()).await?))
}

async fn get_hotel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<hotels::Model>> {
    let repo = CatalogRepository::new(state.conn());
    Ok(Json(repo.get_hotel(id).await?))
}

async fn list_flights(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Json<PageResponse<flights::Model>>> {
    let repo = CatalogRepository::new(state.conn());
    Ok(Json(repo.list_flights(page.request()).await?))
}

async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<flights::Model>> {
    let repo = CatalogRepository::new(state.conn());
    Ok(Json(repo.get_flight(id).await?))
}

async fn list_packages(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Json<PageResponse<packages::Model>>> {
    let repo = CatalogRepository::new(state.conn());
    Ok(Json(repo.list_packages(page.request()).await?))
}

async fn get_package(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<packages::Model>> {
    let repo = CatalogRepository::new(state.conn());
    Ok(Json(repo.get_package(id).await?))
}

async fn list_services(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Json<PageResponse<services::Model>>> {
    let repo = CatalogRepository::new(state.conn());
    Ok(Json(repo.list_services(page.request()).await?))
}

async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<services::Model>> {
    let repo = CatalogRepository::new(state.conn());
    Ok(Json(repo.get_service(id).await?))
}

async fn list_payment_methods(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<payment_methods::Model>>> {
    let repo = CatalogRepository::new(state.conn());
    Ok(Json(repo.list_payment_methods().await?))
}

async fn list_clients(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Json<PageResponse<clients::Model>>> {
    let repo = CatalogRepository::new(state.conn());
    Ok(Json(repo.list_clients(page.request()).await?))
}
