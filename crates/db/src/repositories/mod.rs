//! Repository modules for database access.

pub mod catalog;
pub mod invoice;
pub mod line_item;
pub mod payment;
pub mod reservation;

pub use catalog::{CatalogError, CatalogRepository};
pub use invoice::{InvoiceRepoError, InvoiceRepository};
pub use line_item::{LineItemRepoError, LineItemRepository};
pub use payment::{PaymentRepoError, PaymentRepository};
pub use reservation::{
    CreateFullReservationInput, ReservationRepoError, ReservationRepository, ReservationWithItems,
};
