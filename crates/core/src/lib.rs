//! Core business logic for Viatour.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `reservation` - Reservation lifecycle and authoritative total recomputation
//! - `lineitem` - Heterogeneous line items (hotel, flight, package, service) and pricing
//! - `invoice` - Invoice generation rules and status derivation
//! - `payment` - Payment reconciliation against invoices

pub mod invoice;
pub mod lineitem;
pub mod payment;
pub mod reservation;
