//! Reservation lifecycle and line-item routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::routes::PageQuery;
use viatour_core::lineitem::{
    CabinClass, FlightSeatsInput, HotelStayInput, PackageBookingInput, ServiceOrderInput,
};
use viatour_core::reservation::{CreateReservationInput, Reservation, ReservationStatus};
use viatour_db::entities::{flight_items, hotel_items, package_items, service_items};
use viatour_db::repositories::reservation::{CreateFullReservationInput, ReservationWithItems};
use viatour_db::{LineItemRepository, ReservationRepository};
use viatour_shared::types::PageResponse;

/// Creates the reservation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reservations", get(list).post(create))
        .route("/reservations/full", post(create_full))
        .route("/reservations/{id}", get(get_one))
        .route("/reservations/{id}/confirm", post(confirm))
        .route("/reservations/{id}/complete", post(complete))
        .route("/reservations/{id}/cancel", post(cancel))
        .route("/reservations/{id}/items/hotel", post(attach_hotel))
        .route("/reservations/{id}/items/flight", post(attach_flight))
        .route("/reservations/{id}/items/package", post(attach_package))
        .route("/reservations/{id}/items/service", post(attach_service))
        .route("/reservations/{id}/items/{item_id}", delete(detach))
}

// ============================================================================
// Request types
// ============================================================================

/// Request body for creating a reservation.
#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    /// Client taking the trip.
    pub client_id: Uuid,
    /// Employee who sold the trip.
    pub employee_id: Uuid,
    /// Trip start date.
    pub trip_start: NaiveDate,
    /// Trip end date (inclusive).
    pub trip_end: NaiveDate,
    /// Number of passengers.
    pub passenger_count: i32,
    /// Whether the reservation starts out confirmed.
    #[serde(default)]
    pub confirmed: bool,
    /// Free-text observations.
    pub observations: Option<String>,
}

impl From<CreateReservationRequest> for CreateReservationInput {
    fn from(r: CreateReservationRequest) -> Self {
        Self {
            client_id: r.client_id,
            employee_id: r.employee_id,
            trip_start: r.trip_start,
            trip_end: r.trip_end,
            passenger_count: r.passenger_count,
            confirmed: r.confirmed,
            observations: r.observations,
        }
    }
}

/// Request body for attaching a hotel stay.
#[derive(Debug, Deserialize)]
pub struct HotelStayRequest {
    /// Hotel to book.
    pub hotel_id: Uuid,
    /// Check-in date.
    pub check_in: NaiveDate,
    /// Check-out date (exclusive).
    pub check_out: NaiveDate,
    /// Number of rooms.
    pub rooms: i32,
    /// Free-text observations.
    pub observations: Option<String>,
}

impl From<HotelStayRequest> for HotelStayInput {
    fn from(r: HotelStayRequest) -> Self {
        Self {
            hotel_id: r.hotel_id,
            check_in: r.check_in,
            check_out: r.check_out,
            rooms: r.rooms,
            observations: r.observations,
        }
    }
}

/// Request body for attaching flight seats.
#[derive(Debug, Deserialize)]
pub struct FlightSeatsRequest {
    /// Flight to book.
    pub flight_id: Uuid,
    /// Number of passengers.
    pub passengers: i32,
    /// Cabin class.
    pub cabin_class: CabinClass,
    /// Extras amount on top of the seats.
    #[serde(default)]
    pub extras: Decimal,
    /// Free-text observations.
    pub observations: Option<String>,
}

impl From<FlightSeatsRequest> for FlightSeatsInput {
    fn from(r: FlightSeatsRequest) -> Self {
        Self {
            flight_id: r.flight_id,
            passengers: r.passengers,
            cabin_class: r.cabin_class,
            extras: r.extras,
            observations: r.observations,
        }
    }
}

/// Request body for attaching a package booking.
#[derive(Debug, Deserialize)]
pub struct PackageBookingRequest {
    /// Package to book.
    pub package_id: Uuid,
    /// Number of persons.
    pub persons: i32,
    /// Free-text observations.
    pub observations: Option<String>,
}

impl From<PackageBookingRequest> for PackageBookingInput {
    fn from(r: PackageBookingRequest) -> Self {
        Self {
            package_id: r.package_id,
            persons: r.persons,
            observations: r.observations,
        }
    }
}

/// Request body for attaching a service order.
#[derive(Debug, Deserialize)]
pub struct ServiceOrderRequest {
    /// Service to book.
    pub service_id: Uuid,
    /// Number of units.
    pub quantity: i32,
    /// Date the service is rendered.
    pub service_date: NaiveDate,
    /// Free-text observations.
    pub observations: Option<String>,
}

impl From<ServiceOrderRequest> for ServiceOrderInput {
    fn from(r: ServiceOrderRequest) -> Self {
        Self {
            service_id: r.service_id,
            quantity: r.quantity,
            service_date: r.service_date,
            observations: r.observations,
        }
    }
}

/// Request body for creating a reservation with its initial items.
#[derive(Debug, Deserialize)]
pub struct CreateFullReservationRequest {
    /// Reservation header.
    pub reservation: CreateReservationRequest,
    /// Hotel stays to attach.
    #[serde(default)]
    pub hotels: Vec<HotelStayRequest>,
    /// Flight bookings to attach.
    #[serde(default)]
    pub flights: Vec<FlightSeatsRequest>,
    /// Package bookings to attach.
    #[serde(default)]
    pub packages: Vec<PackageBookingRequest>,
    /// Service orders to attach.
    #[serde(default)]
    pub services: Vec<ServiceOrderRequest>,
}

/// Request body for cancelling a reservation.
#[derive(Debug, Deserialize)]
pub struct CancelRequest {
    /// Cancellation reason.
    pub reason: String,
}

/// Query parameters for listing reservations.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Filter by status.
    pub status: Option<ReservationStatus>,
    /// Filter by client.
    pub client_id: Option<Uuid>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

// ============================================================================
// Handlers
// ============================================================================

async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateReservationRequest>,
) -> ApiResult<(StatusCode, Json<Reservation>)> {
    let repo = ReservationRepository::new(state.conn());
    let created = repo.create(body.into()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn create_full(
    State(state): State<AppState>,
    Json(body): Json<CreateFullReservationRequest>,
) -> ApiResult<(StatusCode, Json<ReservationWithItems>)> {
    let repo = ReservationRepository::new(state.conn());
    let input = CreateFullReservationInput {
        reservation: body.reservation.into(),
        hotels: body.hotels.into_iter().map(Into::into).collect(),
        flights: body.flights.into_iter().map(Into::into).collect(),
        packages: body.packages.into_iter().map(Into::into).collect(),
        services: body.services.into_iter().map(Into::into).collect(),
    };
    let created = repo.create_full(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ReservationWithItems>> {
    let repo = ReservationRepository::new(state.conn());
    Ok(Json(repo.get(id).await?))
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<PageResponse<Reservation>>> {
    let repo = ReservationRepository::new(state.conn());
    let page = PageQuery {
        page: query.page,
        per_page: query.per_page,
    }
    .request();
    Ok(Json(repo.list(query.status, query.client_id, page).await?))
}

async fn confirm(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Reservation>> {
    let repo = ReservationRepository::new(state.conn());
    Ok(Json(repo.confirm(id).await?))
}

async fn complete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Reservation>> {
    let repo = ReservationRepository::new(state.conn());
    Ok(Json(repo.complete(id).await?))
}

async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<CancelRequest>,
) -> ApiResult<Json<Reservation>> {
    let repo = ReservationRepository::new(state.conn());
    Ok(Json(repo.cancel(id, &body.reason).await?))
}

async fn attach_hotel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<HotelStayRequest>,
) -> ApiResult<(StatusCode, Json<hotel_items::Model>)> {
    let repo = LineItemRepository::new(state.conn());
    let item = repo.attach_hotel(id, body.into()).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn attach_flight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<FlightSeatsRequest>,
) -> ApiResult<(StatusCode, Json<flight_items::Model>)> {
    let repo = LineItemRepository::new(state.conn());
    let item = repo.attach_flight(id, body.into()).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn attach_package(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<PackageBookingRequest>,
) -> ApiResult<(StatusCode, Json<package_items::Model>)> {
    let repo = LineItemRepository::new(state.conn());
    let item = repo.attach_package(id, body.into()).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn attach_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ServiceOrderRequest>,
) -> ApiResult<(StatusCode, Json<service_items::Model>)> {
    let repo = LineItemRepository::new(state.conn());
    let item = repo.attach_service(id, body.into()).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn detach(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    let repo = LineItemRepository::new(state.conn());
    repo.detach(id, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
