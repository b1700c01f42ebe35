//! Property tests for line-item pricing.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::pricing;
use super::types::CabinClass;

fn price_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn cabin_strategy() -> impl Strategy<Value = CabinClass> {
    prop_oneof![
        Just(CabinClass::Economy),
        Just(CabinClass::Business),
        Just(CabinClass::First),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Pricing is deterministic: the same inputs always produce the same
    /// subtotal, which is what makes price snapshots meaningful.
    #[test]
    fn prop_hotel_pricing_deterministic(
        nights in 1i64..30,
        rate in price_strategy(),
        rooms in 1i32..6,
    ) {
        let a = pricing::hotel_subtotal(nights, rate, rooms);
        let b = pricing::hotel_subtotal(nights, rate, rooms);
        prop_assert_eq!(a, b);
    }

    /// Hotel subtotal scales linearly with the room count.
    #[test]
    fn prop_hotel_scales_with_rooms(
        nights in 1i64..30,
        rate in price_strategy(),
        rooms in 1i32..6,
    ) {
        let one = pricing::hotel_subtotal(nights, rate, 1);
        let many = pricing::hotel_subtotal(nights, rate, rooms);
        prop_assert_eq!(many, one * Decimal::from(rooms));
    }

    /// Seat prices never drop below the base economy price.
    #[test]
    fn prop_seat_price_at_least_base(
        base in price_strategy(),
        cabin in cabin_strategy(),
    ) {
        let price = pricing::seat_price(base, cabin);
        prop_assert!(price >= base.round_dp(2) || cabin == CabinClass::Economy);
        if cabin == CabinClass::Economy {
            prop_assert_eq!(price, base.round_dp(2));
        }
    }

    /// Flight subtotal with zero extras is exactly seats x price.
    #[test]
    fn prop_flight_subtotal_no_extras(
        passengers in 1i32..10,
        price in price_strategy(),
    ) {
        let subtotal = pricing::flight_subtotal(passengers, price, Decimal::ZERO);
        prop_assert_eq!(subtotal, Decimal::from(passengers) * price);
    }

    /// Subtotals of positive quantities and prices are strictly positive,
    /// so a recomputed reservation total can only be zero when no items
    /// remain attached.
    #[test]
    fn prop_subtotals_positive(
        quantity in 1i32..20,
        price in price_strategy(),
    ) {
        prop_assert!(pricing::package_subtotal(quantity, price) > Decimal::ZERO);
        prop_assert!(pricing::service_subtotal(quantity, price) > Decimal::ZERO);
    }
}
