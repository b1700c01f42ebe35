//! Payment repository: recording, amendment and reconciliation.
//!
//! Every mutation ends with a reconcile pass inside the same transaction:
//! the invoice's paid total is recomputed from the full set of approved
//! payments, its status re-derived, and the reservation's derived totals
//! folded again. Nothing is patched incrementally, so an approval, a
//! rejection of a previously approved payment, an amended amount and a
//! deletion all converge to the same state.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use viatour_core::payment::{
    Payment, PaymentError, PaymentService, PaymentStatus, RecordPaymentInput,
};

use crate::entities::{invoices, payment_methods, payments, reservations, sea_orm_active_enums};
use crate::repositories::reservation;

/// Error types for payment operations.
#[derive(Debug, thiserror::Error)]
pub enum PaymentRepoError {
    /// Payment rule violation.
    #[error(transparent)]
    Domain(#[from] PaymentError),

    /// Concurrent modification detected.
    #[error("Concurrent modification detected for reservation {0}, please retry")]
    ConcurrentModification(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Payment repository.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    db: DatabaseConnection,
}

impl PaymentRepository {
    /// Creates a new payment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a payment against an invoice.
    ///
    /// All validations run before any write; the amount is checked against
    /// the invoice's current pending balance (total minus already-approved
    /// payments). With `approved` set, the payment lands approved
    /// immediately, the walk-in cash case.
    ///
    /// # Errors
    ///
    /// Returns an error if the invoice or method is missing, the method is
    /// inactive, the invoice is cancelled, the reference is already used, or
    /// the amount is non-positive or exceeds the pending balance.
    pub async fn record(&self, input: RecordPaymentInput) -> Result<Payment, PaymentRepoError> {
        let txn = self.db.begin().await?;

        let invoice = invoices::Entity::find_by_id(input.invoice_id)
            .one(&txn)
            .await?
            .ok_or(PaymentError::InvoiceNotFound(input.invoice_id))?;
        let method = payment_methods::Entity::find_by_id(input.payment_method_id)
            .one(&txn)
            .await?
            .ok_or(PaymentError::MethodNotFound(input.payment_method_id))?;

        let duplicate_reference = match &input.reference {
            Some(reference) => payments::Entity::find()
                .filter(payments::Column::Reference.eq(reference.clone()))
                .one(&txn)
                .await?
                .is_some(),
            None => false,
        };

        let existing = load_payments(&txn, invoice.id).await?;
        let approved = PaymentService::approved_total(&existing);
        let pending_balance = PaymentService::pending_balance(invoice.total_amount, approved);

        PaymentService::validate_record(
            input.amount,
            method.is_active,
            invoice.status.clone().into(),
            pending_balance,
            duplicate_reference,
        )?;

        let status = if input.approved {
            sea_orm_active_enums::PaymentStatus::Approved
        } else {
            sea_orm_active_enums::PaymentStatus::Pending
        };
        let now = Utc::now();
        let model = payments::ActiveModel {
            id: Set(Uuid::new_v4()),
            invoice_id: Set(input.invoice_id),
            amount: Set(input.amount),
            payment_method_id: Set(input.payment_method_id),
            reference: Set(input.reference.clone()),
            status: Set(status),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let inserted = model.insert(&txn).await?;

        reconcile_in_txn(&txn, invoice.id)
            .await?
            .ok_or(PaymentRepoError::ConcurrentModification(invoice.reservation_id))?;

        txn.commit().await?;
        Ok(inserted.into())
    }

    /// Changes a payment's status.
    ///
    /// An approval re-validates the amount against the room the other
    /// approved payments leave; rejections and resets are unconditional.
    /// Either way the invoice and reservation are reconciled afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment is missing, the approval would exceed
    /// the invoice total, or the invoice is cancelled.
    pub async fn change_status(
        &self,
        id: Uuid,
        new_status: PaymentStatus,
    ) -> Result<Payment, PaymentRepoError> {
        let txn = self.db.begin().await?;

        let payment = payments::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(PaymentError::NotFound(id))?;
        let invoice = invoices::Entity::find_by_id(payment.invoice_id)
            .one(&txn)
            .await?
            .ok_or(PaymentError::InvoiceNotFound(payment.invoice_id))?;

        if new_status == PaymentStatus::Approved {
            let invoice_status: viatour_core::invoice::InvoiceStatus =
                invoice.status.clone().into();
            if !invoice_status.accepts_payments() {
                return Err(PaymentError::InvoiceCancelled.into());
            }
            let room = room_excluding(&txn, &invoice, payment.id).await?;
            PaymentService::validate_approved_amount(payment.amount, room)?;
        }

        let db_status: sea_orm_active_enums::PaymentStatus = new_status.into();
        payments::Entity::update_many()
            .col_expr(payments::Column::Status, Expr::value(db_status))
            .col_expr(payments::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(payments::Column::Id.eq(id))
            .exec(&txn)
            .await?;

        reconcile_in_txn(&txn, invoice.id)
            .await?
            .ok_or(PaymentRepoError::ConcurrentModification(invoice.reservation_id))?;

        let updated = payments::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(PaymentError::NotFound(id))?;
        txn.commit().await?;

        Ok(updated.into())
    }

    /// Amends a payment's amount.
    ///
    /// The new amount is validated against the room the other approved
    /// payments leave, so amending an approved payment can never push the
    /// approved total past the invoice total.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment is missing or the amount is
    /// non-positive or exceeds the remaining room.
    pub async fn update_amount(
        &self,
        id: Uuid,
        amount: rust_decimal::Decimal,
    ) -> Result<Payment, PaymentRepoError> {
        let txn = self.db.begin().await?;

        let payment = payments::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(PaymentError::NotFound(id))?;
        let invoice = invoices::Entity::find_by_id(payment.invoice_id)
            .one(&txn)
            .await?
            .ok_or(PaymentError::InvoiceNotFound(payment.invoice_id))?;

        let room = room_excluding(&txn, &invoice, payment.id).await?;
        PaymentService::validate_approved_amount(amount, room)?;

        payments::Entity::update_many()
            .col_expr(payments::Column::Amount, Expr::value(amount))
            .col_expr(payments::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(payments::Column::Id.eq(id))
            .exec(&txn)
            .await?;

        reconcile_in_txn(&txn, invoice.id)
            .await?
            .ok_or(PaymentRepoError::ConcurrentModification(invoice.reservation_id))?;

        let updated = payments::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(PaymentError::NotFound(id))?;
        txn.commit().await?;

        Ok(updated.into())
    }

    /// Deletes a pending payment. Approved and rejected payments are
    /// immutable history.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment is missing or not pending.
    pub async fn delete(&self, id: Uuid) -> Result<(), PaymentRepoError> {
        let txn = self.db.begin().await?;

        let payment = payments::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(PaymentError::NotFound(id))?;
        PaymentService::validate_delete(payment.status.clone().into())?;

        let invoice_id = payment.invoice_id;
        payments::Entity::delete_by_id(id).exec(&txn).await?;

        let reservation_id = invoices::Entity::find_by_id(invoice_id)
            .one(&txn)
            .await?
            .map(|i| i.reservation_id);
        if let Some(reservation_id) = reservation_id {
            reconcile_in_txn(&txn, invoice_id)
                .await?
                .ok_or(PaymentRepoError::ConcurrentModification(reservation_id))?;
        }

        txn.commit().await?;
        Ok(())
    }

    /// Gets a payment by ID.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::NotFound` if the payment does not exist.
    pub async fn get(&self, id: Uuid) -> Result<Payment, PaymentRepoError> {
        let model = payments::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(PaymentError::NotFound(id))?;
        Ok(model.into())
    }

    /// Lists the payments of an invoice, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_invoice(
        &self,
        invoice_id: Uuid,
    ) -> Result<Vec<Payment>, PaymentRepoError> {
        let list = payments::Entity::find()
            .filter(payments::Column::InvoiceId.eq(invoice_id))
            .order_by_asc(payments::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        Ok(list)
    }
}

/// Loads the full payment set of an invoice as domain values.
async fn load_payments<C: ConnectionTrait>(
    conn: &C,
    invoice_id: Uuid,
) -> Result<Vec<Payment>, DbErr> {
    let list = payments::Entity::find()
        .filter(payments::Column::InvoiceId.eq(invoice_id))
        .all(conn)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(list)
}

/// Room left for one payment: the invoice total minus every *other* approved
/// payment.
async fn room_excluding<C: ConnectionTrait>(
    conn: &C,
    invoice: &invoices::Model,
    payment_id: Uuid,
) -> Result<rust_decimal::Decimal, DbErr> {
    let others: Vec<Payment> = load_payments(conn, invoice.id)
        .await?
        .into_iter()
        .filter(|p| p.id != payment_id)
        .collect();
    Ok(invoice.total_amount - PaymentService::approved_total(&others))
}

/// Recomputes the invoice's paid total and status from its payments and folds
/// the reservation's derived totals, all on the open transaction.
///
/// Returns `None` when the reservation's version-guarded update misses.
async fn reconcile_in_txn<C: ConnectionTrait>(
    conn: &C,
    invoice_id: Uuid,
) -> Result<Option<()>, DbErr> {
    let invoice = invoices::Entity::find_by_id(invoice_id)
        .one(conn)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("invoice {invoice_id}")))?;

    let all = load_payments(conn, invoice_id).await?;
    let result =
        PaymentService::reconcile(invoice.status.clone().into(), invoice.total_amount, &all);

    let db_status: sea_orm_active_enums::InvoiceStatus = result.invoice_status.into();
    invoices::Entity::update_many()
        .col_expr(invoices::Column::PaidAmount, Expr::value(result.paid_amount))
        .col_expr(invoices::Column::Status, Expr::value(db_status))
        .col_expr(invoices::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(invoices::Column::Id.eq(invoice_id))
        .exec(conn)
        .await?;

    let resv = reservations::Entity::find_by_id(invoice.reservation_id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            DbErr::RecordNotFound(format!("reservation for invoice {invoice_id}"))
        })?;
    let totals = reservation::recompute_reservation(conn, &resv).await?;

    Ok(totals.map(|_| ()))
}
