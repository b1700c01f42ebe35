//! Line-item domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The four kinds of bookable resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineItemKind {
    /// Hotel stay.
    Hotel,
    /// Flight segment.
    Flight,
    /// Tour package.
    Package,
    /// Ad-hoc service (transfer, excursion, insurance...).
    Service,
}

impl std::fmt::Display for LineItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hotel => write!(f, "hotel"),
            Self::Flight => write!(f, "flight"),
            Self::Package => write!(f, "package"),
            Self::Service => write!(f, "service"),
        }
    }
}

/// Flight cabin class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CabinClass {
    /// Economy cabin, priced at the flight's base seat price.
    Economy,
    /// Business cabin.
    Business,
    /// First class cabin.
    First,
}

impl CabinClass {
    /// Multiplier applied to the flight's base seat price.
    #[must_use]
    pub fn price_multiplier(&self) -> Decimal {
        match self {
            Self::Economy => Decimal::ONE,
            Self::Business => Decimal::new(175, 2),
            Self::First => Decimal::new(250, 2),
        }
    }
}

/// The reservation's trip window, against which item dates are validated.
#[derive(Debug, Clone, Copy)]
pub struct TripWindow {
    /// First day of the trip.
    pub start: NaiveDate,
    /// Last day of the trip (inclusive).
    pub end: NaiveDate,
}

impl TripWindow {
    /// Returns true if the given date falls inside the trip window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns true if the given range falls entirely inside the trip window.
    #[must_use]
    pub fn contains_range(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.contains(from) && self.contains(to)
    }
}

// ============================================================================
// Catalog resource snapshots (provided by the read-only catalog lookup)
// ============================================================================

/// Hotel catalog information needed for attachment.
#[derive(Debug, Clone)]
pub struct HotelInfo {
    /// Current nightly rate per room.
    pub nightly_rate: Decimal,
    /// Whether the hotel is bookable.
    pub is_active: bool,
}

/// Flight catalog information needed for attachment.
#[derive(Debug, Clone)]
pub struct FlightInfo {
    /// Base (economy) per-seat price.
    pub base_seat_price: Decimal,
    /// Remaining seats.
    pub seats_available: i32,
    /// Departure date.
    pub departure_date: NaiveDate,
    /// Whether the flight is bookable.
    pub is_active: bool,
}

/// Package catalog information needed for attachment.
#[derive(Debug, Clone)]
pub struct PackageInfo {
    /// Current price per person.
    pub price_per_person: Decimal,
    /// Remaining slots.
    pub slots_available: i32,
    /// Package start date.
    pub start_date: NaiveDate,
    /// Package end date (inclusive).
    pub end_date: NaiveDate,
    /// Whether the package is bookable.
    pub is_active: bool,
}

/// Service catalog information needed for attachment.
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    /// Current unit price.
    pub unit_price: Decimal,
    /// Whether the service is bookable.
    pub is_active: bool,
}

// ============================================================================
// Attachment inputs
// ============================================================================

/// Input for attaching a hotel stay.
#[derive(Debug, Clone)]
pub struct HotelStayInput {
    /// Hotel to book.
    pub hotel_id: Uuid,
    /// Check-in date.
    pub check_in: NaiveDate,
    /// Check-out date (exclusive; stays are priced per night).
    pub check_out: NaiveDate,
    /// Number of rooms.
    pub rooms: i32,
    /// Free-text observations.
    pub observations: Option<String>,
}

/// Input for attaching flight seats.
#[derive(Debug, Clone)]
pub struct FlightSeatsInput {
    /// Flight to book.
    pub flight_id: Uuid,
    /// Number of passengers (seats consumed).
    pub passengers: i32,
    /// Cabin class determining the per-seat price.
    pub cabin_class: CabinClass,
    /// Extras (baggage, seat selection) added on top of the seats.
    pub extras: Decimal,
    /// Free-text observations.
    pub observations: Option<String>,
}

/// Input for attaching a package booking.
#[derive(Debug, Clone)]
pub struct PackageBookingInput {
    /// Package to book.
    pub package_id: Uuid,
    /// Number of persons (slots consumed).
    pub persons: i32,
    /// Free-text observations.
    pub observations: Option<String>,
}

/// Input for attaching an ad-hoc service.
#[derive(Debug, Clone)]
pub struct ServiceOrderInput {
    /// Service to book.
    pub service_id: Uuid,
    /// Number of units.
    pub quantity: i32,
    /// Date the service is rendered.
    pub service_date: NaiveDate,
    /// Free-text observations.
    pub observations: Option<String>,
}

// ============================================================================
// Line items
// ============================================================================

/// A booked hotel stay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelItem {
    /// Line item ID.
    pub id: Uuid,
    /// Owning reservation.
    pub reservation_id: Uuid,
    /// Booked hotel.
    pub hotel_id: Uuid,
    /// Check-in date.
    pub check_in: NaiveDate,
    /// Check-out date.
    pub check_out: NaiveDate,
    /// Number of rooms.
    pub rooms: i32,
    /// Nightly rate snapshot taken at attachment time.
    pub nightly_rate: Decimal,
    /// `nights * nightly_rate * rooms`.
    pub subtotal: Decimal,
    /// Free-text observations.
    pub observations: Option<String>,
}

impl HotelItem {
    /// Number of nights of the stay.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

/// Booked seats on a flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightItem {
    /// Line item ID.
    pub id: Uuid,
    /// Owning reservation.
    pub reservation_id: Uuid,
    /// Booked flight.
    pub flight_id: Uuid,
    /// Number of passengers (seats consumed).
    pub passengers: i32,
    /// Cabin class.
    pub cabin_class: CabinClass,
    /// Per-seat price snapshot (base price with the class multiplier applied).
    pub seat_price: Decimal,
    /// Extras amount.
    pub extras: Decimal,
    /// `passengers * seat_price + extras`.
    pub subtotal: Decimal,
    /// Departure date snapshot, used for the immutability window.
    pub departure_date: NaiveDate,
    /// Free-text observations.
    pub observations: Option<String>,
}

/// A booked tour package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageItem {
    /// Line item ID.
    pub id: Uuid,
    /// Owning reservation.
    pub reservation_id: Uuid,
    /// Booked package.
    pub package_id: Uuid,
    /// Number of persons (slots consumed).
    pub persons: i32,
    /// Price-per-person snapshot taken at attachment time.
    pub price_per_person: Decimal,
    /// `persons * price_per_person`.
    pub subtotal: Decimal,
    /// Package start date snapshot, used for the immutability window.
    pub start_date: NaiveDate,
    /// Free-text observations.
    pub observations: Option<String>,
}

/// A booked ad-hoc service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceItem {
    /// Line item ID.
    pub id: Uuid,
    /// Owning reservation.
    pub reservation_id: Uuid,
    /// Booked service.
    pub service_id: Uuid,
    /// Number of units.
    pub quantity: i32,
    /// Unit price snapshot taken at attachment time.
    pub unit_price: Decimal,
    /// `quantity * unit_price`.
    pub subtotal: Decimal,
    /// Date the service is rendered, used for the immutability window.
    pub service_date: NaiveDate,
    /// Free-text observations.
    pub observations: Option<String>,
}

/// A line item attached to a reservation: one of four variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LineItem {
    /// Hotel stay.
    Hotel(HotelItem),
    /// Flight seats.
    Flight(FlightItem),
    /// Package booking.
    Package(PackageItem),
    /// Ad-hoc service.
    Service(ServiceItem),
}

impl LineItem {
    /// Line item ID.
    #[must_use]
    pub fn id(&self) -> Uuid {
        match self {
            Self::Hotel(i) => i.id,
            Self::Flight(i) => i.id,
            Self::Package(i) => i.id,
            Self::Service(i) => i.id,
        }
    }

    /// Owning reservation ID.
    #[must_use]
    pub fn reservation_id(&self) -> Uuid {
        match self {
            Self::Hotel(i) => i.reservation_id,
            Self::Flight(i) => i.reservation_id,
            Self::Package(i) => i.reservation_id,
            Self::Service(i) => i.reservation_id,
        }
    }

    /// The catalog resource this item points at.
    #[must_use]
    pub fn resource_id(&self) -> Uuid {
        match self {
            Self::Hotel(i) => i.hotel_id,
            Self::Flight(i) => i.flight_id,
            Self::Package(i) => i.package_id,
            Self::Service(i) => i.service_id,
        }
    }

    /// The item's computed subtotal.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        match self {
            Self::Hotel(i) => i.subtotal,
            Self::Flight(i) => i.subtotal,
            Self::Package(i) => i.subtotal,
            Self::Service(i) => i.subtotal,
        }
    }

    /// How much shared capacity this item consumes (flight seats, package
    /// slots). Hotels and services have no hard cap.
    #[must_use]
    pub fn capacity_delta(&self) -> i32 {
        match self {
            Self::Flight(i) => i.passengers,
            Self::Package(i) => i.persons,
            Self::Hotel(_) | Self::Service(_) => 0,
        }
    }

    /// The day the item's real-world window begins. Once this date has
    /// passed, the item is immutable and cannot be detached.
    #[must_use]
    pub fn window_start(&self) -> NaiveDate {
        match self {
            Self::Hotel(i) => i.check_in,
            Self::Flight(i) => i.departure_date,
            Self::Package(i) => i.start_date,
            Self::Service(i) => i.service_date,
        }
    }

    /// Which of the four variants this is.
    #[must_use]
    pub fn kind(&self) -> LineItemKind {
        match self {
            Self::Hotel(_) => LineItemKind::Hotel,
            Self::Flight(_) => LineItemKind::Flight,
            Self::Package(_) => LineItemKind::Package,
            Self::Service(_) => LineItemKind::Service,
        }
    }
}
