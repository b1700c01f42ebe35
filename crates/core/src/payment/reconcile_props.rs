//! Property tests for payment reconciliation.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::service::PaymentService;
use super::types::{Payment, PaymentStatus};
use crate::invoice::InvoiceStatus;

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn status_strategy() -> impl Strategy<Value = PaymentStatus> {
    prop_oneof![
        Just(PaymentStatus::Pending),
        Just(PaymentStatus::Approved),
        Just(PaymentStatus::Rejected),
    ]
}

fn payment_strategy() -> impl Strategy<Value = Payment> {
    (amount_strategy(), status_strategy()).prop_map(|(amount, status)| {
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
    })
}

fn payments_strategy() -> impl Strategy<Value = Vec<Payment>> {
    prop::collection::vec(payment_strategy(), 0..10)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Reconciliation is idempotent: running it twice with no intervening
    /// payment change yields the same paid total and invoice status.
    #[test]
    fn prop_reconcile_idempotent(
        total in amount_strategy(),
        payments in payments_strategy(),
    ) {
        let first = PaymentService::reconcile(InvoiceStatus::Pending, total, &payments);
        let second = PaymentService::reconcile(first.invoice_status, total, &payments);
        prop_assert_eq!(first, second);
    }

    /// The paid total only ever counts approved payments.
    #[test]
    fn prop_paid_total_counts_only_approved(
        total in amount_strategy(),
        payments in payments_strategy(),
    ) {
        let result = PaymentService::reconcile(InvoiceStatus::Pending, total, &payments);
        let expected: Decimal = payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Approved)
            .map(|p| p.amount)
            .sum();
        prop_assert_eq!(result.paid_amount, expected);
    }

    /// Paid exactly when the approved total covers the invoice total.
    #[test]
    fn prop_paid_iff_covered(
        total in amount_strategy(),
        payments in payments_strategy(),
    ) {
        let result = PaymentService::reconcile(InvoiceStatus::Pending, total, &payments);
        if result.paid_amount >= total {
            prop_assert_eq!(result.invoice_status, InvoiceStatus::Paid);
        } else {
            prop_assert_eq!(result.invoice_status, InvoiceStatus::Pending);
        }
    }

    /// Recording validation never accepts an amount above the pending
    /// balance, so the approved sum cannot exceed the invoice total at the
    /// moment each payment is approved.
    #[test]
    fn prop_record_bounded_by_balance(
        amount in amount_strategy(),
        balance in amount_strategy(),
    ) {
        let result = PaymentService::validate_record(
            amount,
            true,
            InvoiceStatus::Pending,
            balance,
            false,
        );
        prop_assert_eq!(result.is_ok(), amount <= balance);
    }

    /// A cancelled invoice stays cancelled no matter what payments say.
    #[test]
    fn prop_cancelled_invoice_stays_cancelled(
        total in amount_strategy(),
        payments in payments_strategy(),
    ) {
        let result = PaymentService::reconcile(InvoiceStatus::Cancelled, total, &payments);
        prop_assert_eq!(result.invoice_status, InvoiceStatus::Cancelled);
    }
}
