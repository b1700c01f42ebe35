//! Invoice repository: generation and manual status overrides.
//!
//! A reservation is invoiced exactly once. The sequential invoice number is
//! minted inside the generation transaction; the unique indexes on
//! `reservation_id`, `sequence` and `invoice_number` back the rule at the
//! database level.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use viatour_core::invoice::{Invoice, InvoiceError, InvoiceService, InvoiceStatus};
use viatour_shared::types::{PageRequest, PageResponse};

use crate::entities::{invoices, reservations, sea_orm_active_enums};

/// Error types for invoice operations.
#[derive(Debug, thiserror::Error)]
pub enum InvoiceRepoError {
    /// Invoice rule violation.
    #[error(transparent)]
    Domain(#[from] InvoiceError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Invoice repository.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    db: DatabaseConnection,
}

impl InvoiceRepository {
    /// Creates a new invoice repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Generates the invoice for a confirmed reservation.
    ///
    /// The total is copied from the reservation's current `total_amount`; the
    /// invoice number is the next value of the global sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation is missing or not confirmed, or if
    /// it already has an invoice.
    pub async fn generate(&self, reservation_id: Uuid) -> Result<Invoice, InvoiceRepoError> {
        let txn = self.db.begin().await?;

        let resv = reservations::Entity::find_by_id(reservation_id)
            .one(&txn)
            .await?
            .ok_or(InvoiceError::ReservationNotFound(reservation_id))?;

        let already_invoiced = invoices::Entity::find()
            .filter(invoices::Column::ReservationId.eq(reservation_id))
            .one(&txn)
            .await?
            .is_some();
        InvoiceService::validate_generate(resv.status.clone().into(), already_invoiced)?;

        let sequence = next_sequence(&txn).await?;
        let now = Utc::now();
        let model = invoices::ActiveModel {
            id: Set(Uuid::new_v4()),
            reservation_id: Set(reservation_id),
            invoice_number: Set(InvoiceService::format_invoice_number(sequence)),
            sequence: Set(sequence),
            issue_date: Set(now.date_naive()),
            total_amount: Set(resv.total_amount),
            paid_amount: Set(rust_decimal::Decimal::ZERO),
            status: Set(sea_orm_active_enums::InvoiceStatus::Pending),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let inserted = model.insert(&txn).await?;

        txn.commit().await?;
        Ok(inserted.into())
    }

    /// Gets an invoice by ID.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::NotFound` if the invoice does not exist.
    pub async fn get(&self, id: Uuid) -> Result<Invoice, InvoiceRepoError> {
        let model = invoices::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(InvoiceError::NotFound(id))?;
        Ok(model.into())
    }

    /// Gets the invoice of a reservation.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::ReservationNotFound` if no invoice exists for
    /// the reservation.
    pub async fn get_by_reservation(
        &self,
        reservation_id: Uuid,
    ) -> Result<Invoice, InvoiceRepoError> {
        let model = invoices::Entity::find()
            .filter(invoices::Column::ReservationId.eq(reservation_id))
            .one(&self.db)
            .await?
            .ok_or(InvoiceError::ReservationNotFound(reservation_id))?;
        Ok(model.into())
    }

    /// Lists invoices, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, page: PageRequest) -> Result<PageResponse<Invoice>, InvoiceRepoError> {
        let query = invoices::Entity::find();
        let total = query.clone().count(&self.db).await?;
        let data = query
            .order_by_desc(invoices::Column::Sequence)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?
            .into_iter()
            .map(Invoice::from)
            .collect();
        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Applies a manual status override.
    ///
    /// Exists for operational correction (marking overdue, voiding); the next
    /// payment mutation re-derives the status from the approved total, except
    /// that cancelled invoices stay cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if the invoice is missing or cancelled.
    pub async fn change_status(
        &self,
        id: Uuid,
        requested: InvoiceStatus,
    ) -> Result<Invoice, InvoiceRepoError> {
        let txn = self.db.begin().await?;

        let invoice = invoices::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(InvoiceError::NotFound(id))?;
        let current: InvoiceStatus = invoice.status.clone().into();
        InvoiceService::validate_manual_status(current, requested)?;

        tracing::warn!(
            invoice_id = %id,
            invoice_number = %invoice.invoice_number,
            from = %current,
            to = %requested,
            "manual invoice status override"
        );

        let db_status: sea_orm_active_enums::InvoiceStatus = requested.into();
        invoices::Entity::update_many()
            .col_expr(invoices::Column::Status, Expr::value(db_status))
            .col_expr(invoices::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(invoices::Column::Id.eq(id))
            .exec(&txn)
            .await?;

        let updated = invoices::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(InvoiceError::NotFound(id))?;
        txn.commit().await?;

        Ok(updated.into())
    }
}

/// Next value of the global invoice sequence, 1 for the first invoice.
async fn next_sequence<C: sea_orm::ConnectionTrait>(conn: &C) -> Result<i64, DbErr> {
    let latest = invoices::Entity::find()
        .order_by_desc(invoices::Column::Sequence)
        .limit(1)
        .one(conn)
        .await?;
    Ok(latest.map_or(0, |m| m.sequence) + 1)
}
