//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration.

pub use sea_orm_migration::prelude::*;

mod m20260301_000001_catalog;
mod m20260301_000002_reservations;
mod m20260301_000003_billing;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_catalog::Migration),
            Box::new(m20260301_000002_reservations::Migration),
            Box::new(m20260301_000003_billing::Migration),
        ]
    }
}
