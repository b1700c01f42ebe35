//! Heterogeneous line items: hotel stays, flight seats, package bookings and
//! ad-hoc services.
//!
//! The four variants share structure (price snapshot, subtotal, owning
//! reservation) but differ in pricing math and capacity consumption, so they
//! are modelled as one sum type rather than four parallel services.

pub mod error;
pub mod pricing;
pub mod service;
pub mod types;

#[cfg(test)]
mod pricing_props;

pub use error::LineItemError;
pub use service::LineItemService;
pub use types::{
    CabinClass, FlightInfo, FlightSeatsInput, FlightItem, HotelInfo, HotelItem, HotelStayInput,
    LineItem, LineItemKind, PackageBookingInput, PackageInfo, PackageItem, ServiceInfo,
    ServiceItem, ServiceOrderInput, TripWindow,
};
