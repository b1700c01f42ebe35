//! Invoice generation and status derivation.
//!
//! An invoice is generated exactly once from a confirmed reservation; its
//! status is (manual overrides aside) a pure function of the approved
//! payments recorded against it.

pub mod error;
pub mod service;
pub mod types;

pub use error::InvoiceError;
pub use service::InvoiceService;
pub use types::{Invoice, InvoiceStatus};
