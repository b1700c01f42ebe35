//! Line-item repository: attach and detach operations.
//!
//! Every attach runs as one transaction: the status guard, the catalog
//! lookup, the capacity decrement and the total recomputation commit or roll
//! back together. Capacity counters are guarded by version columns; a lost
//! race surfaces as `ConcurrentModification` instead of overselling.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use viatour_core::lineitem::{
    FlightInfo, FlightSeatsInput, HotelInfo, HotelStayInput, LineItem, LineItemError, LineItemKind,
    LineItemService, PackageBookingInput, PackageInfo, ServiceInfo, ServiceOrderInput, TripWindow,
};
use viatour_core::reservation::{ReservationError, ReservationService};

use crate::entities::{
    flight_items, flights, hotel_items, hotels, package_items, packages, reservations,
    service_items, services,
};
use crate::repositories::reservation;

/// Error types for line-item operations.
#[derive(Debug, thiserror::Error)]
pub enum LineItemRepoError {
    /// Attachment or detachment rule violation.
    #[error(transparent)]
    Domain(#[from] LineItemError),

    /// Owning reservation rule violation.
    #[error(transparent)]
    Reservation(#[from] ReservationError),

    /// Concurrent modification detected.
    #[error("Concurrent modification detected for {0}, please retry")]
    ConcurrentModification(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Line-item repository for attach/detach operations.
#[derive(Debug, Clone)]
pub struct LineItemRepository {
    db: DatabaseConnection,
}

impl LineItemRepository {
    /// Creates a new line-item repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attaches a hotel stay to a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation is missing or terminal, the hotel
    /// is missing or inactive, the stay dates are invalid, or the write
    /// conflicts with a concurrent mutation.
    pub async fn attach_hotel(
        &self,
        reservation_id: Uuid,
        input: HotelStayInput,
    ) -> Result<hotel_items::Model, LineItemRepoError> {
        let txn = self.db.begin().await?;

        let resv = reservations::Entity::find_by_id(reservation_id)
            .one(&txn)
            .await?
            .ok_or(ReservationError::NotFound(reservation_id))?;
        ReservationService::validate_can_modify(resv.status.clone().into())?;

        let item = attach_hotel_in_txn(&txn, &resv, &input).await?;

        reservation::recompute_reservation(&txn, &resv)
            .await?
            .ok_or(LineItemRepoError::ConcurrentModification(resv.id))?;

        txn.commit().await?;
        Ok(item)
    }

    /// Attaches flight seats to a reservation, consuming shared capacity.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation is missing or terminal, the flight
    /// is missing, inactive or lacks seats, or the capacity decrement loses a
    /// race with a concurrent booking.
    pub async fn attach_flight(
        &self,
        reservation_id: Uuid,
        input: FlightSeatsInput,
    ) -> Result<flight_items::Model, LineItemRepoError> {
        let txn = self.db.begin().await?;

        let resv = reservations::Entity::find_by_id(reservation_id)
            .one(&txn)
            .await?
            .ok_or(ReservationError::NotFound(reservation_id))?;
        ReservationService::validate_can_modify(resv.status.clone().into())?;

        let item = attach_flight_in_txn(&txn, &resv, &input).await?;

        reservation::recompute_reservation(&txn, &resv)
            .await?
            .ok_or(LineItemRepoError::ConcurrentModification(resv.id))?;

        txn.commit().await?;
        Ok(item)
    }

    /// Attaches a package booking to a reservation, consuming shared capacity.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation is missing or terminal, the
    /// package is missing, inactive or lacks slots, or the capacity decrement
    /// loses a race with a concurrent booking.
    pub async fn attach_package(
        &self,
        reservation_id: Uuid,
        input: PackageBookingInput,
    ) -> Result<package_items::Model, LineItemRepoError> {
        let txn = self.db.begin().await?;

        let resv = reservations::Entity::find_by_id(reservation_id)
            .one(&txn)
            .await?
            .ok_or(ReservationError::NotFound(reservation_id))?;
        ReservationService::validate_can_modify(resv.status.clone().into())?;

        let item = attach_package_in_txn(&txn, &resv, &input).await?;

        reservation::recompute_reservation(&txn, &resv)
            .await?
            .ok_or(LineItemRepoError::ConcurrentModification(resv.id))?;

        txn.commit().await?;
        Ok(item)
    }

    /// Attaches an ad-hoc service order to a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation is missing or terminal, the
    /// service is missing or inactive, or the quantity or date is invalid.
    pub async fn attach_service(
        &self,
        reservation_id: Uuid,
        input: ServiceOrderInput,
    ) -> Result<service_items::Model, LineItemRepoError> {
        let txn = self.db.begin().await?;

        let resv = reservations::Entity::find_by_id(reservation_id)
            .one(&txn)
            .await?
            .ok_or(ReservationError::NotFound(reservation_id))?;
        ReservationService::validate_can_modify(resv.status.clone().into())?;

        let item = attach_service_in_txn(&txn, &resv, &input).await?;

        reservation::recompute_reservation(&txn, &resv)
            .await?
            .ok_or(LineItemRepoError::ConcurrentModification(resv.id))?;

        txn.commit().await?;
        Ok(item)
    }

    /// Detaches a line item, restoring any capacity it consumed.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation is terminal, the item is missing
    /// or its travel window has already started, or the write conflicts with
    /// a concurrent mutation.
    pub async fn detach(
        &self,
        reservation_id: Uuid,
        item_id: Uuid,
    ) -> Result<(), LineItemRepoError> {
        let txn = self.db.begin().await?;

        let resv = reservations::Entity::find_by_id(reservation_id)
            .one(&txn)
            .await?
            .ok_or(ReservationError::NotFound(reservation_id))?;
        ReservationService::validate_can_modify(resv.status.clone().into())?;

        let item = find_item(&txn, reservation_id, item_id)
            .await?
            .ok_or(LineItemError::NotFound(item_id))?;
        LineItemService::validate_detach(&item, Utc::now().date_naive())?;

        match &item {
            LineItem::Hotel(i) => {
                hotel_items::Entity::delete_by_id(i.id).exec(&txn).await?;
            }
            LineItem::Flight(i) => {
                flight_items::Entity::delete_by_id(i.id).exec(&txn).await?;
                restore_flight_seats(&txn, i.flight_id, i.passengers).await?;
            }
            LineItem::Package(i) => {
                package_items::Entity::delete_by_id(i.id).exec(&txn).await?;
                restore_package_slots(&txn, i.package_id, i.persons).await?;
            }
            LineItem::Service(i) => {
                service_items::Entity::delete_by_id(i.id).exec(&txn).await?;
            }
        }

        reservation::recompute_reservation(&txn, &resv)
            .await?
            .ok_or(LineItemRepoError::ConcurrentModification(resv.id))?;

        txn.commit().await?;
        Ok(())
    }

    /// Lists all line items attached to a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_reservation(
        &self,
        reservation_id: Uuid,
    ) -> Result<Vec<LineItem>, LineItemRepoError> {
        let items = load_items(&self.db, reservation_id).await?;
        Ok(items)
    }
}

fn trip_window(resv: &reservations::Model) -> TripWindow {
    TripWindow {
        start: resv.trip_start,
        end: resv.trip_end,
    }
}

/// Validates, prices and inserts a hotel stay inside an open transaction.
pub(crate) async fn attach_hotel_in_txn<C: ConnectionTrait>(
    conn: &C,
    resv: &reservations::Model,
    input: &HotelStayInput,
) -> Result<hotel_items::Model, LineItemRepoError> {
    let hotel = hotels::Entity::find_by_id(input.hotel_id)
        .one(conn)
        .await?
        .ok_or(LineItemError::ResourceNotFound {
            kind: LineItemKind::Hotel,
            id: input.hotel_id,
        })?;

    let already_attached = hotel_items::Entity::find()
        .filter(hotel_items::Column::ReservationId.eq(resv.id))
        .filter(hotel_items::Column::HotelId.eq(input.hotel_id))
        .one(conn)
        .await?
        .is_some();

    let info = HotelInfo {
        nightly_rate: hotel.nightly_rate,
        is_active: hotel.is_active,
    };
    let item =
        LineItemService::build_hotel_stay(resv.id, trip_window(resv), input, &info, already_attached)?;

    let model = hotel_items::ActiveModel {
        id: Set(item.id),
        reservation_id: Set(item.reservation_id),
        hotel_id: Set(item.hotel_id),
        check_in: Set(item.check_in),
        check_out: Set(item.check_out),
        rooms: Set(item.rooms),
        nightly_rate: Set(item.nightly_rate),
        subtotal: Set(item.subtotal),
        observations: Set(item.observations),
        created_at: Set(Utc::now().into()),
    };
    Ok(model.insert(conn).await?)
}

/// Validates, prices, decrements seats and inserts a flight booking inside an
/// open transaction.
pub(crate) async fn attach_flight_in_txn<C: ConnectionTrait>(
    conn: &C,
    resv: &reservations::Model,
    input: &FlightSeatsInput,
) -> Result<flight_items::Model, LineItemRepoError> {
    let flight = flights::Entity::find_by_id(input.flight_id)
        .one(conn)
        .await?
        .ok_or(LineItemError::ResourceNotFound {
            kind: LineItemKind::Flight,
            id: input.flight_id,
        })?;

    let already_attached = flight_items::Entity::find()
        .filter(flight_items::Column::ReservationId.eq(resv.id))
        .filter(flight_items::Column::FlightId.eq(input.flight_id))
        .one(conn)
        .await?
        .is_some();

    let info = FlightInfo {
        base_seat_price: flight.base_seat_price,
        seats_available: flight.seats_available,
        departure_date: flight.departure_date,
        is_active: flight.is_active,
    };
    let item = LineItemService::build_flight_seats(
        resv.id,
        trip_window(resv),
        input,
        &info,
        already_attached,
    )?;

    // Conditional decrement: the version and the remaining-seats check both
    // guard the same race, a concurrent booking between our read and write.
    let rows = flights::Entity::update_many()
        .col_expr(
            flights::Column::SeatsAvailable,
            Expr::col(flights::Column::SeatsAvailable).sub(item.passengers),
        )
        .col_expr(
            flights::Column::Version,
            Expr::col(flights::Column::Version).add(1),
        )
        .col_expr(flights::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(flights::Column::Id.eq(flight.id))
        .filter(flights::Column::Version.eq(flight.version))
        .filter(flights::Column::SeatsAvailable.gte(item.passengers))
        .exec(conn)
        .await?
        .rows_affected;
    if rows == 0 {
        return Err(LineItemRepoError::ConcurrentModification(flight.id));
    }

    let model = flight_items::ActiveModel {
        id: Set(item.id),
        reservation_id: Set(item.reservation_id),
        flight_id: Set(item.flight_id),
        passengers: Set(item.passengers),
        cabin_class: Set(item.cabin_class.into()),
        seat_price: Set(item.seat_price),
        extras: Set(item.extras),
        subtotal: Set(item.subtotal),
        departure_date: Set(item.departure_date),
        observations: Set(item.observations),
        created_at: Set(Utc::now().into()),
    };
    Ok(model.insert(conn).await?)
}

/// Validates, prices, decrements slots and inserts a package booking inside
/// an open transaction.
pub(crate) async fn attach_package_in_txn<C: ConnectionTrait>(
    conn: &C,
    resv: &reservations::Model,
    input: &PackageBookingInput,
) -> Result<package_items::Model, LineItemRepoError> {
    let package = packages::Entity::find_by_id(input.package_id)
        .one(conn)
        .await?
        .ok_or(LineItemError::ResourceNotFound {
            kind: LineItemKind::Package,
            id: input.package_id,
        })?;

    let already_attached = package_items::Entity::find()
        .filter(package_items::Column::ReservationId.eq(resv.id))
        .filter(package_items::Column::PackageId.eq(input.package_id))
        .one(conn)
        .await?
        .is_some();

    let info = PackageInfo {
        price_per_person: package.price_per_person,
        slots_available: package.slots_available,
        start_date: package.start_date,
        end_date: package.end_date,
        is_active: package.is_active,
    };
    let item = LineItemService::build_package_booking(
        resv.id,
        trip_window(resv),
        input,
        &info,
        already_attached,
    )?;

    let rows = packages::Entity::update_many()
        .col_expr(
            packages::Column::SlotsAvailable,
            Expr::col(packages::Column::SlotsAvailable).sub(item.persons),
        )
        .col_expr(
            packages::Column::Version,
            Expr::col(packages::Column::Version).add(1),
        )
        .col_expr(packages::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(packages::Column::Id.eq(package.id))
        .filter(packages::Column::Version.eq(package.version))
        .filter(packages::Column::SlotsAvailable.gte(item.persons))
        .exec(conn)
        .await?
        .rows_affected;
    if rows == 0 {
        return Err(LineItemRepoError::ConcurrentModification(package.id));
    }

    let model = package_items::ActiveModel {
        id: Set(item.id),
        reservation_id: Set(item.reservation_id),
        package_id: Set(item.package_id),
        persons: Set(item.persons),
        price_per_person: Set(item.price_per_person),
        subtotal: Set(item.subtotal),
        start_date: Set(item.start_date),
        observations: Set(item.observations),
        created_at: Set(Utc::now().into()),
    };
    Ok(model.insert(conn).await?)
}

/// Validates, prices and inserts a service order inside an open transaction.
pub(crate) async fn attach_service_in_txn<C: ConnectionTrait>(
    conn: &C,
    resv: &reservations::Model,
    input: &ServiceOrderInput,
) -> Result<service_items::Model, LineItemRepoError> {
    let service = services::Entity::find_by_id(input.service_id)
        .one(conn)
        .await?
        .ok_or(LineItemError::ResourceNotFound {
            kind: LineItemKind::Service,
            id: input.service_id,
        })?;

    let info = ServiceInfo {
        unit_price: service.unit_price,
        is_active: service.is_active,
    };
    let item = LineItemService::build_service_order(resv.id, trip_window(resv), input, &info)?;

    let model = service_items::ActiveModel {
        id: Set(item.id),
        reservation_id: Set(item.reservation_id),
        service_id: Set(item.service_id),
        quantity: Set(item.quantity),
        unit_price: Set(item.unit_price),
        subtotal: Set(item.subtotal),
        service_date: Set(item.service_date),
        observations: Set(item.observations),
        created_at: Set(Utc::now().into()),
    };
    Ok(model.insert(conn).await?)
}

/// Loads every line item attached to a reservation across the four tables.
pub(crate) async fn load_items<C: ConnectionTrait>(
    conn: &C,
    reservation_id: Uuid,
) -> Result<Vec<LineItem>, DbErr> {
    let mut items = Vec::new();

    for m in hotel_items::Entity::find()
        .filter(hotel_items::Column::ReservationId.eq(reservation_id))
        .all(conn)
        .await?
    {
        items.push(LineItem::Hotel(m.into()));
    }
    for m in flight_items::Entity::find()
        .filter(flight_items::Column::ReservationId.eq(reservation_id))
        .all(conn)
        .await?
    {
        items.push(LineItem::Flight(m.into()));
    }
    for m in package_items::Entity::find()
        .filter(package_items::Column::ReservationId.eq(reservation_id))
        .all(conn)
        .await?
    {
        items.push(LineItem::Package(m.into()));
    }
    for m in service_items::Entity::find()
        .filter(service_items::Column::ReservationId.eq(reservation_id))
        .all(conn)
        .await?
    {
        items.push(LineItem::Service(m.into()));
    }

    Ok(items)
}

/// Finds a single line item by ID, checking each of the four tables.
async fn find_item<C: ConnectionTrait>(
    conn: &C,
    reservation_id: Uuid,
    item_id: Uuid,
) -> Result<Option<LineItem>, DbErr> {
    if let Some(m) = hotel_items::Entity::find_by_id(item_id)
        .filter(hotel_items::Column::ReservationId.eq(reservation_id))
        .one(conn)
        .await?
    {
        return Ok(Some(LineItem::Hotel(m.into())));
    }
    if let Some(m) = flight_items::Entity::find_by_id(item_id)
        .filter(flight_items::Column::ReservationId.eq(reservation_id))
        .one(conn)
        .await?
    {
        return Ok(Some(LineItem::Flight(m.into())));
    }
    if let Some(m) = package_items::Entity::find_by_id(item_id)
        .filter(package_items::Column::ReservationId.eq(reservation_id))
        .one(conn)
        .await?
    {
        return Ok(Some(LineItem::Package(m.into())));
    }
    if let Some(m) = service_items::Entity::find_by_id(item_id)
        .filter(service_items::Column::ReservationId.eq(reservation_id))
        .one(conn)
        .await?
    {
        return Ok(Some(LineItem::Service(m.into())));
    }
    Ok(None)
}

/// Returns seats to a flight after a detachment or cancellation.
pub(crate) async fn restore_flight_seats<C: ConnectionTrait>(
    conn: &C,
    flight_id: Uuid,
    seats: i32,
) -> Result<(), DbErr> {
    flights::Entity::update_many()
        .col_expr(
            flights::Column::SeatsAvailable,
            Expr::col(flights::Column::SeatsAvailable).add(seats),
        )
        .col_expr(
            flights::Column::Version,
            Expr::col(flights::Column::Version).add(1),
        )
        .col_expr(flights::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(flights::Column::Id.eq(flight_id))
        .exec(conn)
        .await?;
    Ok(())
}

/// Returns slots to a package after a detachment or cancellation.
pub(crate) async fn restore_package_slots<C: ConnectionTrait>(
    conn: &C,
    package_id: Uuid,
    slots: i32,
) -> Result<(), DbErr> {
    packages::Entity::update_many()
        .col_expr(
            packages::Column::SlotsAvailable,
            Expr::col(packages::Column::SlotsAvailable).add(slots),
        )
        .col_expr(
            packages::Column::Version,
            Expr::col(packages::Column::Version).add(1),
        )
        .col_expr(packages::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(packages::Column::Id.eq(package_id))
        .exec(conn)
        .await?;
    Ok(())
}
