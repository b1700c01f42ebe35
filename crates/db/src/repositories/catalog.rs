//! Catalog repository: read-only access to the bookable resources.
//!
//! Attachment flows read the catalog inside their own transactions; this
//! repository only serves the browsing endpoints.

use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use viatour_shared::types::{PageRequest, PageResponse};

use crate::entities::{clients, flights, hotels, packages, payment_methods, services};

/// Error types for catalog lookups.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Resource not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Resource kind.
        kind: &'static str,
        /// Resource ID.
        id: Uuid,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Catalog repository for browsing bookable resources.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    db: DatabaseConnection,
}

impl CatalogRepository {
    /// Creates a new catalog repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists hotels, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_hotels(
        &self,
        page: PageRequest,
    ) -> Result<PageResponse<hotels::Model>, CatalogError> {
        let query = hotels::Entity::find().order_by_asc(hotels::Column::Name);
        let total = query.clone().count(&self.db).await?;
        let data = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;
        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Gets a hotel by ID.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the hotel does not exist.
    pub async fn get_hotel(&self, id: Uuid) -> Result<hotels::Model, CatalogError> {
        hotels::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound { kind: "Hotel", id })
    }

    /// Lists flights ordered by departure date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_flights(
        &self,
        page: PageRequest,
    ) -> Result<PageResponse<flights::Model>, CatalogError> {
        let query = flights::Entity::find().order_by_asc(flights::Column::DepartureDate);
        let total = query.clone().count(&self.db).await?;
        let data = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;
        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Gets a flight by ID.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the flight does not exist.
    pub async fn get_flight(&self, id: Uuid) -> Result<flights::Model, CatalogError> {
        flights::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound { kind: "Flight", id })
    }

    /// Lists packages ordered by start date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_packages(
        &self,
        page: PageRequest,
    ) -> Result<PageResponse<packages::Model>, CatalogError> {
        let query = packages::Entity::find().order_by_asc(packages::Column::StartDate);
        let total = query.clone().count(&self.db).await?;
        let data = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;
        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Gets a package by ID.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the package does not exist.
    pub async fn get_package(&self, id: Uuid) -> Result<packages::Model, CatalogError> {
        packages::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound {
                kind: "Package",
                id,
            })
    }

    /// Lists services alphabetically.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_services(
        &self,
        page: PageRequest,
    ) -> Result<PageResponse<services::Model>, CatalogError> {
        let query = services::Entity::find().order_by_asc(services::Column::Name);
        let total = query.clone().count(&self.db).await?;
        let data = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;
        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Gets a service by ID.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the service does not exist.
    pub async fn get_service(&self, id: Uuid) -> Result<services::Model, CatalogError> {
        services::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound {
                kind: "Service",
                id,
            })
    }

    /// Lists active payment methods.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_payment_methods(&self) -> Result<Vec<payment_methods::Model>, CatalogError> {
        let methods = payment_methods::Entity::find()
            .filter(payment_methods::Column::IsActive.eq(true))
            .order_by_asc(payment_methods::Column::Name)
            .all(&self.db)
            .await?;
        Ok(methods)
    }

    /// Lists clients alphabetically.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_clients(
        &self,
        page: PageRequest,
    ) -> Result<PageResponse<clients::Model>, CatalogError> {
        let query = clients::Entity::find().order_by_asc(clients::Column::FullName);
        let total = query.clone().count(&self.db).await?;
        let data = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;
        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }
}
