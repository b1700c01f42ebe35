//! Deterministic subtotal calculations per line-item variant.
//!
//! All prices are snapshots taken at attachment time; these functions never
//! consult the catalog again.

use rust_decimal::Decimal;

use super::types::CabinClass;

/// Hotel stay subtotal: `nights * nightly_rate * rooms`.
#[must_use]
pub fn hotel_subtotal(nights: i64, nightly_rate: Decimal, rooms: i32) -> Decimal {
    Decimal::from(nights) * nightly_rate * Decimal::from(rooms)
}

/// Per-seat price for a cabin class: the flight's base price with the class
/// multiplier applied, rounded to cents.
#[must_use]
pub fn seat_price(base_seat_price: Decimal, cabin_class: CabinClass) -> Decimal {
    (base_seat_price * cabin_class.price_multiplier()).round_dp(2)
}

/// Flight subtotal: `passengers * seat_price + extras`.
#[must_use]
pub fn flight_subtotal(passengers: i32, seat_price: Decimal, extras: Decimal) -> Decimal {
    Decimal::from(passengers) * seat_price + extras
}

/// Package subtotal: `persons * price_per_person`.
#[must_use]
pub fn package_subtotal(persons: i32, price_per_person: Decimal) -> Decimal {
    Decimal::from(persons) * price_per_person
}

/// Service subtotal: `quantity * unit_price`.
#[must_use]
pub fn service_subtotal(quantity: i32, unit_price: Decimal) -> Decimal {
    Decimal::from(quantity) * unit_price
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_hotel_subtotal_two_nights_one_room() {
        // 2 nights x $100 x 1 room = $200
        assert_eq!(hotel_subtotal(2, dec!(100), 1), dec!(200));
    }

    #[test]
    fn test_hotel_subtotal_multiple_rooms() {
        assert_eq!(hotel_subtotal(3, dec!(89.90), 2), dec!(539.40));
    }

    #[test]
    fn test_seat_price_economy_is_base() {
        assert_eq!(seat_price(dec!(150), CabinClass::Economy), dec!(150));
    }

    #[test]
    fn test_seat_price_business() {
        assert_eq!(seat_price(dec!(200), CabinClass::Business), dec!(350));
    }

    #[test]
    fn test_seat_price_first() {
        assert_eq!(seat_price(dec!(200), CabinClass::First), dec!(500));
    }

    #[test]
    fn test_seat_price_rounds_to_cents() {
        // 99.99 * 1.75 = 174.9825 -> 174.98
        assert_eq!(seat_price(dec!(99.99), CabinClass::Business), dec!(174.98));
    }

    #[test]
    fn test_flight_subtotal_three_economy_seats() {
        // 3 passengers x $150 = $450
        assert_eq!(flight_subtotal(3, dec!(150), Decimal::ZERO), dec!(450));
    }

    #[test]
    fn test_flight_subtotal_with_extras() {
        assert_eq!(flight_subtotal(2, dec!(175), dec!(60)), dec!(410));
    }

    #[test]
    fn test_package_subtotal() {
        assert_eq!(package_subtotal(4, dec!(1250)), dec!(5000));
    }

    #[test]
    fn test_service_subtotal() {
        assert_eq!(service_subtotal(5, dec!(19.99)), dec!(99.95));
    }
}
