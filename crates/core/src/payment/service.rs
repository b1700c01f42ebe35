//! Payment reconciliation engine.

use rust_decimal::Decimal;

use super::error::PaymentError;
use super::types::{Payment, PaymentStatus};
use crate::invoice::{InvoiceService, InvoiceStatus};

/// Result of reconciling an invoice against its payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    /// Sum of currently approved payments.
    pub paid_amount: Decimal,
    /// Invoice status derived from that sum.
    pub invoice_status: InvoiceStatus,
}

/// Payment service for business logic.
///
/// Pure functions only; repositories run these inside the same database
/// transaction as the writes they validate.
pub struct PaymentService;

impl PaymentService {
    /// Sum of the currently approved payments.
    #[must_use]
    pub fn approved_total(payments: &[Payment]) -> Decimal {
        payments
            .iter()
            .filter(|p| p.status.is_approved())
            .map(|p| p.amount)
            .sum()
    }

    /// The invoice's current pending balance: total minus approved payments.
    #[must_use]
    pub fn pending_balance(invoice_total: Decimal, approved_total: Decimal) -> Decimal {
        invoice_total - approved_total
    }

    /// Validate recording a new payment.
    ///
    /// All checks run before any write: amount positive, method active,
    /// invoice accepting payments, reference unused, and the amount within
    /// the *current* pending balance (total minus already-approved payments,
    /// so amendments are taken into account).
    ///
    /// # Errors
    ///
    /// Returns the corresponding `PaymentError` for each violated
    /// precondition.
    pub fn validate_record(
        amount: Decimal,
        method_active: bool,
        invoice_status: InvoiceStatus,
        pending_balance: Decimal,
        duplicate_reference: bool,
    ) -> Result<(), PaymentError> {
        if amount <= Decimal::ZERO {
            return Err(PaymentError::NonPositiveAmount);
        }
        if !method_active {
            return Err(PaymentError::MethodInactive);
        }
        if !invoice_status.accepts_payments() {
            return Err(PaymentError::InvoiceCancelled);
        }
        if duplicate_reference {
            return Err(PaymentError::DuplicateReference);
        }
        if amount > pending_balance {
            return Err(PaymentError::ExceedsBalance {
                requested: amount,
                balance: pending_balance,
            });
        }
        Ok(())
    }

    /// Validate approving a payment (or re-validating an amended amount on an
    /// approved payment).
    ///
    /// `balance_excluding_self` is the pending balance with this payment's own
    /// contribution removed, so an approved payment amending its amount is
    /// checked against the room it would leave.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::NonPositiveAmount` or
    /// `PaymentError::ExceedsBalance`.
    pub fn validate_approved_amount(
        amount: Decimal,
        balance_excluding_self: Decimal,
    ) -> Result<(), PaymentError> {
        if amount <= Decimal::ZERO {
            return Err(PaymentError::NonPositiveAmount);
        }
        if amount > balance_excluding_self {
            return Err(PaymentError::ExceedsBalance {
                requested: amount,
                balance: balance_excluding_self,
            });
        }
        Ok(())
    }

    /// Validate deleting a payment: approved payments are immutable history.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::NotPending` unless the payment is pending.
    pub fn validate_delete(status: PaymentStatus) -> Result<(), PaymentError> {
        if status != PaymentStatus::Pending {
            return Err(PaymentError::NotPending);
        }
        Ok(())
    }

    /// Reconcile an invoice against the complete set of its payments.
    ///
    /// Recomputes the paid total from the currently approved payments and
    /// derives the invoice status from it. Repeatable: running it twice with
    /// no intervening payment change yields the same result.
    #[must_use]
    pub fn reconcile(
        invoice_status: InvoiceStatus,
        invoice_total: Decimal,
        payments: &[Payment],
    ) -> Reconciliation {
        let paid_amount = Self::approved_total(payments);

        Reconciliation {
            paid_amount,
            invoice_status: InvoiceService::status_for(invoice_status, invoice_total, paid_amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn payment(amount: Decimal, status: PaymentStatus) -> Payment {
        let now = Utc::now();
        Payment {
            id: Uuid::new_v4(),
            invoice_id: Uuid::new_v4(),
            amount,
            payment_method_id: Uuid::new_v4(),
            reference: None,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_approved_total_ignores_pending_and_rejected() {
        let payments = vec![
            payment(dec!(100), PaymentStatus::Approved),
            payment(dec!(50), PaymentStatus::Pending),
            payment(dec!(25), PaymentStatus::Rejected),
            payment(dec!(75), PaymentStatus::Approved),
        ];
        assert_eq!(PaymentService::approved_total(&payments), dec!(175));
    }

    #[test]
    fn test_record_full_amount_ok() {
        // $450 against a $450 pending balance is accepted.
        let result = PaymentService::validate_record(
            dec!(450),
            true,
            InvoiceStatus::Pending,
            dec!(450),
            false,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_record_exceeding_balance_rejected() {
        // $500 against a $450 pending balance fails without mutating anything.
        let result = PaymentService::validate_record(
            dec!(500),
            true,
            InvoiceStatus::Pending,
            dec!(450),
            false,
        );
        assert!(matches!(
            result,
            Err(PaymentError::ExceedsBalance {
                requested,
                balance
            }) if requested == dec!(500) && balance == dec!(450)
        ));
    }

    #[test]
    fn test_record_inactive_method_rejected() {
        let result = PaymentService::validate_record(
            dec!(100),
            false,
            InvoiceStatus::Pending,
            dec!(450),
            false,
        );
        assert!(matches!(result, Err(PaymentError::MethodInactive)));
    }

    #[test]
    fn test_record_against_cancelled_invoice_rejected() {
        let result = PaymentService::validate_record(
            dec!(100),
            true,
            InvoiceStatus::Cancelled,
            dec!(450),
            false,
        );
        assert!(matches!(result, Err(PaymentError::InvoiceCancelled)));
    }

    #[test]
    fn test_record_duplicate_reference_rejected() {
        let result = PaymentService::validate_record(
            dec!(100),
            true,
            InvoiceStatus::Pending,
            dec!(450),
            true,
        );
        assert!(matches!(result, Err(PaymentError::DuplicateReference)));
    }

    #[test]
    fn test_record_non_positive_amount_rejected() {
        let result = PaymentService::validate_record(
            Decimal::ZERO,
            true,
            InvoiceStatus::Pending,
            dec!(450),
            false,
        );
        assert!(matches!(result, Err(PaymentError::NonPositiveAmount)));
    }

    #[test]
    fn test_reconcile_fully_covered_invoice_is_paid() {
        let payments = vec![payment(dec!(450), PaymentStatus::Approved)];
        let result = PaymentService::reconcile(InvoiceStatus::Pending, dec!(450), &payments);

        assert_eq!(result.paid_amount, dec!(450));
        assert_eq!(result.invoice_status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_reconcile_partial_coverage_stays_pending() {
        let payments = vec![
            payment(dec!(200), PaymentStatus::Approved),
            payment(dec!(250), PaymentStatus::Pending),
        ];
        let result = PaymentService::reconcile(InvoiceStatus::Pending, dec!(450), &payments);

        assert_eq!(result.paid_amount, dec!(200));
        assert_eq!(result.invoice_status, InvoiceStatus::Pending);
    }

    #[test]
    fn test_reconcile_after_rejection_reverts_to_pending() {
        // Previously approved payment got rejected; the recompute drops it.
        let payments = vec![payment(dec!(450), PaymentStatus::Rejected)];
        let result = PaymentService::reconcile(InvoiceStatus::Paid, dec!(450), &payments);

        assert_eq!(result.paid_amount, Decimal::ZERO);
        assert_eq!(result.invoice_status, InvoiceStatus::Pending);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let payments = vec![
            payment(dec!(200), PaymentStatus::Approved),
            payment(dec!(250), PaymentStatus::Approved),
        ];
        let first = PaymentService::reconcile(InvoiceStatus::Pending, dec!(450), &payments);
        let second = PaymentService::reconcile(first.invoice_status, dec!(450), &payments);

        assert_eq!(first.paid_amount, second.paid_amount);
        assert_eq!(first.invoice_status, second.invoice_status);
    }

    #[test]
    fn test_amount_update_checked_against_balance_excluding_self() {
        // Invoice total $450, this payment was $200 approved, another $100
        // approved exists: room for this payment is 450 - 100 = 350.
        assert!(PaymentService::validate_approved_amount(dec!(350), dec!(350)).is_ok());
        assert!(matches!(
            PaymentService::validate_approved_amount(dec!(351), dec!(350)),
            Err(PaymentError::ExceedsBalance { .. })
        ));
    }

    #[test]
    fn test_delete_only_pending() {
        assert!(PaymentService::validate_delete(PaymentStatus::Pending).is_ok());
        assert!(matches!(
            PaymentService::validate_delete(PaymentStatus::Approved),
            Err(PaymentError::NotPending)
        ));
        assert!(matches!(
            PaymentService::validate_delete(PaymentStatus::Rejected),
            Err(PaymentError::NotPending)
        ));
    }
}
