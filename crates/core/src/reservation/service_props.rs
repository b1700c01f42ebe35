//! Property tests for reservation total recomputation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::ReservationService;

/// Strategy for generating money-like amounts (two decimal places).
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn subtotals_strategy() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(amount_strategy(), 0..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Recomputation is idempotent: feeding the same child records twice
    /// yields identical totals.
    #[test]
    fn prop_recompute_idempotent(
        subtotals in subtotals_strategy(),
        paid in amount_strategy(),
    ) {
        let first = ReservationService::recompute_totals(&subtotals, paid);
        let second = ReservationService::recompute_totals(&subtotals, paid);
        prop_assert_eq!(first, second);
    }

    /// The balance invariant holds after every recomputation:
    /// `balance_due == total_amount - paid_amount`.
    #[test]
    fn prop_balance_invariant(
        subtotals in subtotals_strategy(),
        paid in amount_strategy(),
    ) {
        let totals = ReservationService::recompute_totals(&subtotals, paid);
        prop_assert_eq!(totals.balance_due, totals.total_amount - totals.paid_amount);
    }

    /// The total is exactly the sum of the attached subtotals, regardless of
    /// how the reservation got there.
    #[test]
    fn prop_total_is_sum_of_subtotals(
        subtotals in subtotals_strategy(),
        paid in amount_strategy(),
    ) {
        let totals = ReservationService::recompute_totals(&subtotals, paid);
        let expected: Decimal = subtotals.iter().copied().sum();
        prop_assert_eq!(totals.total_amount, expected);
    }

    /// Order of line items never affects the recomputed total.
    #[test]
    fn prop_recompute_order_independent(
        mut subtotals in subtotals_strategy(),
        paid in amount_strategy(),
    ) {
        let forward = ReservationService::recompute_totals(&subtotals, paid);
        subtotals.reverse();
        let backward = ReservationService::recompute_totals(&subtotals, paid);
        prop_assert_eq!(forward, backward);
    }
}
