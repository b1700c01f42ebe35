//! `SeaORM` entity definitions.

pub mod clients;
pub mod employees;
pub mod flight_items;
pub mod flights;
pub mod hotel_items;
pub mod hotels;
pub mod invoices;
pub mod package_items;
pub mod packages;
pub mod payment_methods;
pub mod payments;
pub mod reservations;
pub mod sea_orm_active_enums;
pub mod service_items;
pub mod services;
