//! Payment recording and reconciliation against invoices.
//!
//! The paid total of an invoice is always recomputed from the full set of
//! currently approved payments; no running counter exists anywhere. That
//! recompute-from-source approach is the correctness anchor of the whole
//! financial engine.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod reconcile_props;

pub use error::PaymentError;
pub use service::{PaymentService, Reconciliation};
pub use types::{Payment, PaymentStatus, RecordPaymentInput};
