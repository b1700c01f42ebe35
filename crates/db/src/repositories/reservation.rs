//! Reservation repository: aggregate lifecycle and derived totals.
//!
//! The reservation row's `total_amount`, `paid_amount` and `balance_due` are
//! never patched incrementally. After every mutation the totals are folded
//! again from the full set of attached items and approved payments, inside
//! the same transaction, behind a version-guarded update.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use viatour_core::lineitem::{
    FlightSeatsInput, HotelStayInput, LineItem, PackageBookingInput, ServiceOrderInput,
};
use viatour_core::payment::{Payment, PaymentService};
use viatour_core::reservation::{
    CreateReservationInput, Reservation, ReservationError, ReservationService, ReservationStatus,
    ReservationTotals,
};
use viatour_shared::types::{PageRequest, PageResponse};

use crate::entities::{
    clients, employees, invoices, payments, reservations, sea_orm_active_enums,
};
use crate::repositories::line_item::{
    self, LineItemRepoError, attach_flight_in_txn, attach_hotel_in_txn, attach_package_in_txn,
    attach_service_in_txn,
};

/// Error types for reservation operations.
#[derive(Debug, thiserror::Error)]
pub enum ReservationRepoError {
    /// Reservation rule violation.
    #[error(transparent)]
    Domain(#[from] ReservationError),

    /// Attachment failure while assembling a full reservation.
    #[error(transparent)]
    Item(#[from] LineItemRepoError),

    /// Concurrent modification detected.
    #[error("Concurrent modification detected for reservation {0}, please retry")]
    ConcurrentModification(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a reservation together with its initial line items.
#[derive(Debug, Clone)]
pub struct CreateFullReservationInput {
    /// Reservation header.
    pub reservation: CreateReservationInput,
    /// Hotel stays to attach.
    pub hotels: Vec<HotelStayInput>,
    /// Flight bookings to attach.
    pub flights: Vec<FlightSeatsInput>,
    /// Package bookings to attach.
    pub packages: Vec<PackageBookingInput>,
    /// Service orders to attach.
    pub services: Vec<ServiceOrderInput>,
}

/// A reservation with its attached line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationWithItems {
    /// Reservation header.
    pub reservation: Reservation,
    /// Attached line items.
    pub items: Vec<LineItem>,
}

/// Reservation repository for lifecycle operations.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    db: DatabaseConnection,
}

impl ReservationRepository {
    /// Creates a new reservation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an empty reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the trip window or passenger count is invalid or
    /// the client or employee does not exist.
    pub async fn create(
        &self,
        input: CreateReservationInput,
    ) -> Result<Reservation, ReservationRepoError> {
        ReservationService::validate_new(input.trip_start, input.trip_end, input.passenger_count)?;

        let txn = self.db.begin().await?;
        let model = insert_reservation(&txn, &input).await?;
        txn.commit().await?;

        Ok(model.into())
    }

    /// Creates a reservation and attaches its initial line items in one
    /// transaction. If any attachment fails, nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the header is invalid or any attachment is
    /// rejected; the whole operation rolls back in that case.
    pub async fn create_full(
        &self,
        input: CreateFullReservationInput,
    ) -> Result<ReservationWithItems, ReservationRepoError> {
        let header = &input.reservation;
        ReservationService::validate_new(header.trip_start, header.trip_end, header.passenger_count)?;

        let txn = self.db.begin().await?;
        let resv = insert_reservation(&txn, header).await?;

        for hotel in &input.hotels {
            attach_hotel_in_txn(&txn, &resv, hotel).await?;
        }
        for flight in &input.flights {
            attach_flight_in_txn(&txn, &resv, flight).await?;
        }
        for package in &input.packages {
            attach_package_in_txn(&txn, &resv, package).await?;
        }
        for service in &input.services {
            attach_service_in_txn(&txn, &resv, service).await?;
        }

        recompute_reservation(&txn, &resv)
            .await?
            .ok_or(ReservationRepoError::ConcurrentModification(resv.id))?;

        let items = line_item::load_items(&txn, resv.id).await?;
        let refreshed = reservations::Entity::find_by_id(resv.id)
            .one(&txn)
            .await?
            .ok_or(ReservationError::NotFound(resv.id))?;
        txn.commit().await?;

        Ok(ReservationWithItems {
            reservation: refreshed.into(),
            items,
        })
    }

    /// Gets a reservation with its line items.
    ///
    /// # Errors
    ///
    /// Returns `ReservationError::NotFound` if the reservation does not
    /// exist.
    pub async fn get(&self, id: Uuid) -> Result<ReservationWithItems, ReservationRepoError> {
        let model = reservations::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ReservationError::NotFound(id))?;
        let items = line_item::load_items(&self.db, id).await?;

        Ok(ReservationWithItems {
            reservation: model.into(),
            items,
        })
    }

    /// Lists reservations, newest first, optionally filtered by status or
    /// client.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        status: Option<ReservationStatus>,
        client_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<PageResponse<Reservation>, ReservationRepoError> {
        let mut query = reservations::Entity::find();

        if let Some(status) = status {
            let db_status: sea_orm_active_enums::ReservationStatus = status.into();
            query = query.filter(reservations::Column::Status.eq(db_status));
        }
        if let Some(client_id) = client_id {
            query = query.filter(reservations::Column::ClientId.eq(client_id));
        }

        let total = query.clone().count(&self.db).await?;
        let data = query
            .order_by_desc(reservations::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?
            .into_iter()
            .map(Reservation::from)
            .collect();

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Confirms a pending reservation.
    ///
    /// # Errors
    ///
    /// Returns an error unless the reservation exists and is pending.
    pub async fn confirm(&self, id: Uuid) -> Result<Reservation, ReservationRepoError> {
        self.transition(
            id,
            ReservationService::validate_confirm,
            sea_orm_active_enums::ReservationStatus::Confirmed,
        )
        .await
    }

    /// Completes a confirmed reservation.
    ///
    /// # Errors
    ///
    /// Returns an error unless the reservation exists and is confirmed.
    pub async fn complete(&self, id: Uuid) -> Result<Reservation, ReservationRepoError> {
        self.transition(
            id,
            ReservationService::validate_complete,
            sea_orm_active_enums::ReservationStatus::Completed,
        )
        .await
    }

    /// Cancels a reservation, recording the reason and returning every seat
    /// and slot its items had consumed.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation is already terminal or the reason
    /// is blank.
    pub async fn cancel(
        &self,
        id: Uuid,
        reason: &str,
    ) -> Result<Reservation, ReservationRepoError> {
        let txn = self.db.begin().await?;

        let resv = reservations::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ReservationError::NotFound(id))?;
        ReservationService::validate_cancel(resv.status.clone().into(), reason)?;

        // Items stay on the record; only their capacity goes back to the pool.
        let items = line_item::load_items(&txn, id).await?;
        for item in &items {
            match item {
                LineItem::Flight(i) => {
                    line_item::restore_flight_seats(&txn, i.flight_id, i.passengers).await?;
                }
                LineItem::Package(i) => {
                    line_item::restore_package_slots(&txn, i.package_id, i.persons).await?;
                }
                LineItem::Hotel(_) | LineItem::Service(_) => {}
            }
        }

        let rows = reservations::Entity::update_many()
            .col_expr(
                reservations::Column::Status,
                Expr::value(sea_orm_active_enums::ReservationStatus::Cancelled),
            )
            .col_expr(
                reservations::Column::CancellationReason,
                Expr::value(reason.to_owned()),
            )
            .col_expr(
                reservations::Column::Version,
                Expr::col(reservations::Column::Version).add(1),
            )
            .col_expr(reservations::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(reservations::Column::Id.eq(id))
            .filter(reservations::Column::Version.eq(resv.version))
            .exec(&txn)
            .await?
            .rows_affected;
        if rows == 0 {
            return Err(ReservationRepoError::ConcurrentModification(id));
        }

        let updated = reservations::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ReservationError::NotFound(id))?;
        txn.commit().await?;

        Ok(updated.into())
    }

    async fn transition<V>(
        &self,
        id: Uuid,
        validate: V,
        new_status: sea_orm_active_enums::ReservationStatus,
    ) -> Result<Reservation, ReservationRepoError>
    where
        V: FnOnce(ReservationStatus) -> Result<(), ReservationError>,
    {
        let txn = self.db.begin().await?;

        let resv = reservations::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ReservationError::NotFound(id))?;
        validate(resv.status.clone().into())?;

        // A concurrent writer bumps the version and the guarded update
        // misses.
        let rows = reservations::Entity::update_many()
            .col_expr(reservations::Column::Status, Expr::value(new_status))
            .col_expr(
                reservations::Column::Version,
                Expr::col(reservations::Column::Version).add(1),
            )
            .col_expr(reservations::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(reservations::Column::Id.eq(id))
            .filter(reservations::Column::Version.eq(resv.version))
            .exec(&txn)
            .await?
            .rows_affected;
        if rows == 0 {
            return Err(ReservationRepoError::ConcurrentModification(id));
        }

        let updated = reservations::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ReservationError::NotFound(id))?;
        txn.commit().await?;

        Ok(updated.into())
    }
}

/// Validates collaborators and inserts the reservation header.
async fn insert_reservation<C: ConnectionTrait>(
    conn: &C,
    input: &CreateReservationInput,
) -> Result<reservations::Model, ReservationRepoError> {
    clients::Entity::find_by_id(input.client_id)
        .one(conn)
        .await?
        .ok_or(ReservationError::ClientNotFound(input.client_id))?;
    employees::Entity::find_by_id(input.employee_id)
        .one(conn)
        .await?
        .ok_or(ReservationError::EmployeeNotFound(input.employee_id))?;

    let status = if input.confirmed {
        sea_orm_active_enums::ReservationStatus::Confirmed
    } else {
        sea_orm_active_enums::ReservationStatus::Pending
    };

    let now = Utc::now();
    let model = reservations::ActiveModel {
        id: Set(Uuid::new_v4()),
        client_id: Set(input.client_id),
        employee_id: Set(input.employee_id),
        trip_start: Set(input.trip_start),
        trip_end: Set(input.trip_end),
        passenger_count: Set(input.passenger_count),
        total_amount: Set(Decimal::ZERO),
        paid_amount: Set(Decimal::ZERO),
        balance_due: Set(Decimal::ZERO),
        status: Set(status),
        cancellation_reason: Set(None),
        observations: Set(input.observations.clone()),
        version: Set(1),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    Ok(model.insert(conn).await?)
}

/// Recomputes the reservation's derived totals from its authoritative
/// children and writes them behind a version guard.
///
/// Returns `None` when the guarded update misses, meaning a concurrent
/// writer changed the row since it was loaded.
pub(crate) async fn recompute_reservation<C: ConnectionTrait>(
    conn: &C,
    reservation: &reservations::Model,
) -> Result<Option<ReservationTotals>, DbErr> {
    let items = line_item::load_items(conn, reservation.id).await?;
    let subtotals: Vec<Decimal> = items.iter().map(LineItem::subtotal).collect();
    let paid = approved_paid_total(conn, reservation.id).await?;
    let totals = ReservationService::recompute_totals(&subtotals, paid);

    let rows = reservations::Entity::update_many()
        .col_expr(
            reservations::Column::TotalAmount,
            Expr::value(totals.total_amount),
        )
        .col_expr(
            reservations::Column::PaidAmount,
            Expr::value(totals.paid_amount),
        )
        .col_expr(
            reservations::Column::BalanceDue,
            Expr::value(totals.balance_due),
        )
        .col_expr(
            reservations::Column::Version,
            Expr::col(reservations::Column::Version).add(1),
        )
        .col_expr(reservations::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(reservations::Column::Id.eq(reservation.id))
        .filter(reservations::Column::Version.eq(reservation.version))
        .exec(conn)
        .await?
        .rows_affected;

    Ok((rows == 1).then_some(totals))
}

/// Sum of approved payments against the reservation's invoice, zero when no
/// invoice exists yet.
async fn approved_paid_total<C: ConnectionTrait>(
    conn: &C,
    reservation_id: Uuid,
) -> Result<Decimal, DbErr> {
    let Some(invoice) = invoices::Entity::find()
        .filter(invoices::Column::ReservationId.eq(reservation_id))
        .one(conn)
        .await?
    else {
        return Ok(Decimal::ZERO);
    };

    let all: Vec<Payment> = payments::Entity::find()
        .filter(payments::Column::InvoiceId.eq(invoice.id))
        .all(conn)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(PaymentService::approved_total(&all))
}
