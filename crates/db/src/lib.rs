//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//!
//! Every client-facing mutation runs as one database transaction: the line
//! item write, the capacity write and the total recomputation commit or roll
//! back together.

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    CatalogRepository, InvoiceRepository, LineItemRepository, PaymentRepository,
    ReservationRepository,
};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
