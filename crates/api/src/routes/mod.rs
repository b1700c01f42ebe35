//! API route definitions.

use axum::Router;
use serde::Deserialize;

use crate::AppState;
use viatour_shared::types::PageRequest;

pub mod catalog;
pub mod health;
pub mod invoices;
pub mod payments;
pub mod reservations;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(catalog::routes())
        .merge(reservations::routes())
        .merge(invoices::routes())
        .merge(payments::routes())
}

/// Pagination query parameters shared by list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

impl PageQuery {
    pub(crate) fn request(&self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page),
        }
    }
}
