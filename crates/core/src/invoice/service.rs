//! Invoice service: generation rules, numbering and status derivation.

use rust_decimal::Decimal;

use super::error::InvoiceError;
use super::types::InvoiceStatus;
use crate::reservation::ReservationStatus;

/// Invoice service for business logic.
pub struct InvoiceService;

impl InvoiceService {
    /// Validate invoice generation against a reservation.
    ///
    /// A reservation is invoiced exactly once; a second attempt is rejected
    /// rather than silently returning the existing invoice.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::ReservationNotConfirmed` unless the reservation
    /// is `Confirmed`, or `InvoiceError::AlreadyInvoiced` if an invoice
    /// already exists.
    pub fn validate_generate(
        reservation_status: ReservationStatus,
        already_invoiced: bool,
    ) -> Result<(), InvoiceError> {
        if reservation_status != ReservationStatus::Confirmed {
            return Err(InvoiceError::ReservationNotConfirmed(reservation_status));
        }
        if already_invoiced {
            return Err(InvoiceError::AlreadyInvoiced);
        }
        Ok(())
    }

    /// Format a sequential invoice number: `INV-00000042`.
    #[must_use]
    pub fn format_invoice_number(sequence: i64) -> String {
        format!("INV-{sequence:08}")
    }

    /// Derive the invoice status from the sum of approved payments.
    ///
    /// This is the reconciliation anchor: a pure function of the approved
    /// total versus the invoice total. Cancelled invoices are never
    /// resurrected; an Overdue invoice stays Overdue until payments cover
    /// the total.
    #[must_use]
    pub fn status_for(
        current: InvoiceStatus,
        total_amount: Decimal,
        approved_total: Decimal,
    ) -> InvoiceStatus {
        match current {
            InvoiceStatus::Cancelled => InvoiceStatus::Cancelled,
            InvoiceStatus::Overdue if approved_total < total_amount => InvoiceStatus::Overdue,
            _ => {
                if approved_total >= total_amount {
                    InvoiceStatus::Paid
                } else {
                    InvoiceStatus::Pending
                }
            }
        }
    }

    /// Validate a manual status override.
    ///
    /// The override exists for operational correction (marking overdue,
    /// voiding); callers log it for audit. Cancelled invoices stay cancelled,
    /// and `Paid` can never be set by hand: it is derived from the approved
    /// payments by reconciliation.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::Cancelled` when the invoice is cancelled, or
    /// `InvoiceError::InvalidStatusChange` when `Paid` is requested manually.
    pub fn validate_manual_status(
        current: InvoiceStatus,
        requested: InvoiceStatus,
    ) -> Result<(), InvoiceError> {
        if current == InvoiceStatus::Cancelled && requested != InvoiceStatus::Cancelled {
            return Err(InvoiceError::Cancelled);
        }
        if requested == InvoiceStatus::Paid && current != InvoiceStatus::Paid {
            return Err(InvoiceError::InvalidStatusChange {
                from: current,
                to: requested,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_generate_from_confirmed() {
        assert!(InvoiceService::validate_generate(ReservationStatus::Confirmed, false).is_ok());
    }

    #[rstest]
    #[case(ReservationStatus::Pending)]
    #[case(ReservationStatus::Cancelled)]
    #[case(ReservationStatus::Completed)]
    fn test_generate_rejected_outside_confirmed(#[case] status: ReservationStatus) {
        assert!(matches!(
            InvoiceService::validate_generate(status, false),
            Err(InvoiceError::ReservationNotConfirmed(_))
        ));
    }

    #[test]
    fn test_regeneration_rejected() {
        assert!(matches!(
            InvoiceService::validate_generate(ReservationStatus::Confirmed, true),
            Err(InvoiceError::AlreadyInvoiced)
        ));
    }

    #[test]
    fn test_invoice_number_format() {
        assert_eq!(InvoiceService::format_invoice_number(42), "INV-00000042");
        assert_eq!(InvoiceService::format_invoice_number(1), "INV-00000001");
        assert_eq!(
            InvoiceService::format_invoice_number(123_456_789),
            "INV-123456789"
        );
    }

    #[test]
    fn test_status_paid_when_fully_covered() {
        // $450 approved against a $450 invoice -> Paid.
        let status = InvoiceService::status_for(InvoiceStatus::Pending, dec!(450), dec!(450));
        assert_eq!(status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_status_pending_when_partially_covered() {
        let status = InvoiceService::status_for(InvoiceStatus::Pending, dec!(450), dec!(200));
        assert_eq!(status, InvoiceStatus::Pending);
    }

    #[test]
    fn test_status_paid_reverts_to_pending_when_payment_rejected() {
        // A rejection shrinks the approved total below the invoice total.
        let status = InvoiceService::status_for(InvoiceStatus::Paid, dec!(450), dec!(200));
        assert_eq!(status, InvoiceStatus::Pending);
    }

    #[test]
    fn test_status_overdue_sticks_until_covered() {
        let status = InvoiceService::status_for(InvoiceStatus::Overdue, dec!(450), dec!(200));
        assert_eq!(status, InvoiceStatus::Overdue);

        let status = InvoiceService::status_for(InvoiceStatus::Overdue, dec!(450), dec!(450));
        assert_eq!(status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_status_cancelled_never_resurrected() {
        let status = InvoiceService::status_for(InvoiceStatus::Cancelled, dec!(450), dec!(450));
        assert_eq!(status, InvoiceStatus::Cancelled);
    }

    #[test]
    fn test_status_for_is_idempotent() {
        let first = InvoiceService::status_for(InvoiceStatus::Pending, dec!(450), dec!(450));
        let second = InvoiceService::status_for(first, dec!(450), dec!(450));
        assert_eq!(first, second);
    }

    #[test]
    fn test_manual_status_from_cancelled_rejected() {
        assert!(matches!(
            InvoiceService::validate_manual_status(InvoiceStatus::Cancelled, InvoiceStatus::Pending),
            Err(InvoiceError::Cancelled)
        ));
    }

    #[test]
    fn test_manual_status_to_overdue_ok() {
        assert!(
            InvoiceService::validate_manual_status(InvoiceStatus::Pending, InvoiceStatus::Overdue)
                .is_ok()
        );
    }

    #[rstest]
    #[case(InvoiceStatus::Pending)]
    #[case(InvoiceStatus::Overdue)]
    fn test_manual_status_to_paid_rejected(#[case] current: InvoiceStatus) {
        assert!(matches!(
            InvoiceService::validate_manual_status(current, InvoiceStatus::Paid),
            Err(InvoiceError::InvalidStatusChange {
                to: InvoiceStatus::Paid,
                ..
            })
        ));
    }
}
