//! Line-item attachment validation and construction.
//!
//! Builders validate a candidate attachment against its catalog resource and
//! the owning reservation's trip window, snapshot the current price and
//! compute the subtotal. Whether the same resource is already attached is
//! resolved by the caller (the repository) and passed in, keeping this logic
//! free of database dependencies.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::LineItemError;
use super::pricing;
use super::types::{
    FlightInfo, FlightItem, FlightSeatsInput, HotelInfo, HotelItem, HotelStayInput, LineItem,
    LineItemKind, PackageBookingInput, PackageInfo, PackageItem, ServiceInfo, ServiceItem,
    ServiceOrderInput, TripWindow,
};

/// Line-item service: pure attachment and detachment rules.
pub struct LineItemService;

impl LineItemService {
    /// Validate and build a hotel stay attachment.
    ///
    /// Hotels have no hard capacity cap, but a reservation may hold at most
    /// one stay per hotel.
    ///
    /// # Errors
    ///
    /// Returns `LineItemError` if the hotel is inactive, the stay dates are
    /// invalid or outside the trip window, the room count is non-positive, or
    /// the hotel is already attached.
    pub fn build_hotel_stay(
        reservation_id: Uuid,
        trip: TripWindow,
        input: &HotelStayInput,
        hotel: &HotelInfo,
        already_attached: bool,
    ) -> Result<HotelItem, LineItemError> {
        if !hotel.is_active {
            return Err(LineItemError::ResourceInactive(LineItemKind::Hotel));
        }
        if input.rooms < 1 {
            return Err(LineItemError::NonPositiveQuantity(LineItemKind::Hotel));
        }
        if input.check_out <= input.check_in {
            return Err(LineItemError::InvalidStayDates);
        }
        if !trip.contains_range(input.check_in, input.check_out) {
            return Err(LineItemError::OutsideTripWindow(LineItemKind::Hotel));
        }
        if already_attached {
            return Err(LineItemError::AlreadyAttached(LineItemKind::Hotel));
        }

        let nights = (input.check_out - input.check_in).num_days();
        let subtotal = pricing::hotel_subtotal(nights, hotel.nightly_rate, input.rooms);

        Ok(HotelItem {
            id: Uuid::new_v4(),
            reservation_id,
            hotel_id: input.hotel_id,
            check_in: input.check_in,
            check_out: input.check_out,
            rooms: input.rooms,
            nightly_rate: hotel.nightly_rate,
            subtotal,
            observations: input.observations.clone(),
        })
    }

    /// Validate and build a flight seats attachment.
    ///
    /// Consumes `passengers` seats of the flight's shared capacity; the
    /// per-seat price is resolved from the base price and cabin class and
    /// snapshotted on the item.
    ///
    /// # Errors
    ///
    /// Returns `LineItemError` if the flight is inactive, the passenger count
    /// is non-positive or exceeds the remaining seats, the extras amount is
    /// negative, the departure falls outside the trip window, or the flight
    /// is already attached.
    pub fn build_flight_seats(
        reservation_id: Uuid,
        trip: TripWindow,
        input: &FlightSeatsInput,
        flight: &FlightInfo,
        already_attached: bool,
    ) -> Result<FlightItem, LineItemError> {
        if !flight.is_active {
            return Err(LineItemError::ResourceInactive(LineItemKind::Flight));
        }
        if input.passengers < 1 {
            return Err(LineItemError::NonPositiveQuantity(LineItemKind::Flight));
        }
        if input.extras < Decimal::ZERO {
            return Err(LineItemError::NegativeExtras);
        }
        if !trip.contains(flight.departure_date) {
            return Err(LineItemError::OutsideTripWindow(LineItemKind::Flight));
        }
        if input.passengers > flight.seats_available {
            return Err(LineItemError::InsufficientCapacity {
                kind: LineItemKind::Flight,
                requested: input.passengers,
                available: flight.seats_available,
            });
        }
        if already_attached {
            return Err(LineItemError::AlreadyAttached(LineItemKind::Flight));
        }

        let seat_price = pricing::seat_price(flight.base_seat_price, input.cabin_class);
        let subtotal = pricing::flight_subtotal(input.passengers, seat_price, input.extras);

        Ok(FlightItem {
            id: Uuid::new_v4(),
            reservation_id,
            flight_id: input.flight_id,
            passengers: input.passengers,
            cabin_class: input.cabin_class,
            seat_price,
            extras: input.extras,
            subtotal,
            departure_date: flight.departure_date,
            observations: input.observations.clone(),
        })
    }

    /// Validate and build a package booking attachment.
    ///
    /// Consumes `persons` slots of the package's shared capacity.
    ///
    /// # Errors
    ///
    /// Returns `LineItemError` if the package is inactive, the person count is
    /// non-positive or exceeds the remaining slots, the package dates fall
    /// outside the trip window, or the package is already attached.
    pub fn build_package_booking(
        reservation_id: Uuid,
        trip: TripWindow,
        input: &PackageBookingInput,
        package: &PackageInfo,
        already_attached: bool,
    ) -> Result<PackageItem, LineItemError> {
        if !package.is_active {
            return Err(LineItemError::ResourceInactive(LineItemKind::Package));
        }
        if input.persons < 1 {
            return Err(LineItemError::NonPositiveQuantity(LineItemKind::Package));
        }
        if !trip.contains_range(package.start_date, package.end_date) {
            return Err(LineItemError::OutsideTripWindow(LineItemKind::Package));
        }
        if input.persons > package.slots_available {
            return Err(LineItemError::InsufficientCapacity {
                kind: LineItemKind::Package,
                requested: input.persons,
                available: package.slots_available,
            });
        }
        if already_attached {
            return Err(LineItemError::AlreadyAttached(LineItemKind::Package));
        }

        let subtotal = pricing::package_subtotal(input.persons, package.price_per_person);

        Ok(PackageItem {
            id: Uuid::new_v4(),
            reservation_id,
            package_id: input.package_id,
            persons: input.persons,
            price_per_person: package.price_per_person,
            subtotal,
            start_date: package.start_date,
            observations: input.observations.clone(),
        })
    }

    /// Validate and build an ad-hoc service attachment.
    ///
    /// Services have no capacity cap and the same service may be attached
    /// more than once to a reservation.
    ///
    /// # Errors
    ///
    /// Returns `LineItemError` if the service is inactive, the quantity is
    /// non-positive, or the service date falls outside the trip window.
    pub fn build_service_order(
        reservation_id: Uuid,
        trip: TripWindow,
        input: &ServiceOrderInput,
        service: &ServiceInfo,
    ) -> Result<ServiceItem, LineItemError> {
        if !service.is_active {
            return Err(LineItemError::ResourceInactive(LineItemKind::Service));
        }
        if input.quantity < 1 {
            return Err(LineItemError::NonPositiveQuantity(LineItemKind::Service));
        }
        if !trip.contains(input.service_date) {
            return Err(LineItemError::OutsideTripWindow(LineItemKind::Service));
        }

        let subtotal = pricing::service_subtotal(input.quantity, service.unit_price);

        Ok(ServiceItem {
            id: Uuid::new_v4(),
            reservation_id,
            service_id: input.service_id,
            quantity: input.quantity,
            unit_price: service.unit_price,
            subtotal,
            service_date: input.service_date,
            observations: input.observations.clone(),
        })
    }

    /// Validate that a line item may still be detached.
    ///
    /// # Errors
    ///
    /// Returns `LineItemError::WindowStarted` once the item's real-world
    /// window has begun (check-in passed, flight departed, package started,
    /// service rendered).
    pub fn validate_detach(item: &LineItem, today: NaiveDate) -> Result<(), LineItemError> {
        if item.window_start() <= today {
            return Err(LineItemError::WindowStarted(item.kind()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn trip() -> TripWindow {
        TripWindow {
            start: date(2026, 9, 1),
            end: date(2026, 9, 15),
        }
    }

    fn hotel_input() -> HotelStayInput {
        HotelStayInput {
            hotel_id: Uuid::new_v4(),
            check_in: date(2026, 9, 2),
            check_out: date(2026, 9, 4),
            rooms: 1,
            observations: None,
        }
    }

    fn hotel_info() -> HotelInfo {
        HotelInfo {
            nightly_rate: dec!(100),
            is_active: true,
        }
    }

    fn flight_input(passengers: i32) -> FlightSeatsInput {
        FlightSeatsInput {
            flight_id: Uuid::new_v4(),
            passengers,
            cabin_class: CabinClass::Economy,
            extras: Decimal::ZERO,
            observations: None,
        }
    }

    fn flight_info(seats: i32) -> FlightInfo {
        FlightInfo {
            base_seat_price: dec!(150),
            seats_available: seats,
            departure_date: date(2026, 9, 3),
            is_active: true,
        }
    }

    fn package_info(slots: i32) -> PackageInfo {
        PackageInfo {
            price_per_person: dec!(500),
            slots_available: slots,
            start_date: date(2026, 9, 5),
            end_date: date(2026, 9, 10),
            is_active: true,
        }
    }

    use super::super::types::CabinClass;

    #[test]
    fn test_hotel_stay_two_nights() {
        // 2 nights x $100 x 1 room -> $200
        let item = LineItemService::build_hotel_stay(
            Uuid::new_v4(),
            trip(),
            &hotel_input(),
            &hotel_info(),
            false,
        )
        .unwrap();

        assert_eq!(item.nights(), 2);
        assert_eq!(item.nightly_rate, dec!(100));
        assert_eq!(item.subtotal, dec!(200));
    }

    #[test]
    fn test_hotel_stay_snapshot_is_catalog_price() {
        let info = HotelInfo {
            nightly_rate: dec!(123.45),
            is_active: true,
        };
        let item =
            LineItemService::build_hotel_stay(Uuid::new_v4(), trip(), &hotel_input(), &info, false)
                .unwrap();
        assert_eq!(item.nightly_rate, dec!(123.45));
    }

    #[test]
    fn test_hotel_stay_inactive() {
        let info = HotelInfo {
            nightly_rate: dec!(100),
            is_active: false,
        };
        let result =
            LineItemService::build_hotel_stay(Uuid::new_v4(), trip(), &hotel_input(), &info, false);
        assert!(matches!(
            result,
            Err(LineItemError::ResourceInactive(LineItemKind::Hotel))
        ));
    }

    #[test]
    fn test_hotel_stay_duplicate_rejected() {
        let result = LineItemService::build_hotel_stay(
            Uuid::new_v4(),
            trip(),
            &hotel_input(),
            &hotel_info(),
            true,
        );
        assert!(matches!(
            result,
            Err(LineItemError::AlreadyAttached(LineItemKind::Hotel))
        ));
    }

    #[test]
    fn test_hotel_stay_outside_trip_window() {
        let mut input = hotel_input();
        input.check_in = date(2026, 8, 28);
        input.check_out = date(2026, 9, 2);
        let result = LineItemService::build_hotel_stay(
            Uuid::new_v4(),
            trip(),
            &input,
            &hotel_info(),
            false,
        );
        assert!(matches!(
            result,
            Err(LineItemError::OutsideTripWindow(LineItemKind::Hotel))
        ));
    }

    #[test]
    fn test_hotel_stay_inverted_dates() {
        let mut input = hotel_input();
        input.check_out = input.check_in;
        let result = LineItemService::build_hotel_stay(
            Uuid::new_v4(),
            trip(),
            &input,
            &hotel_info(),
            false,
        );
        assert!(matches!(result, Err(LineItemError::InvalidStayDates)));
    }

    #[test]
    fn test_flight_three_economy_seats() {
        // 3 seats x $150 -> $450 with 10 seats available
        let item = LineItemService::build_flight_seats(
            Uuid::new_v4(),
            trip(),
            &flight_input(3),
            &flight_info(10),
            false,
        )
        .unwrap();

        assert_eq!(item.seat_price, dec!(150));
        assert_eq!(item.subtotal, dec!(450));
        assert_eq!(item.passengers, 3);
    }

    #[test]
    fn test_flight_business_price_resolved_and_snapshotted() {
        let mut input = flight_input(2);
        input.cabin_class = CabinClass::Business;
        let item = LineItemService::build_flight_seats(
            Uuid::new_v4(),
            trip(),
            &input,
            &flight_info(10),
            false,
        )
        .unwrap();

        assert_eq!(item.seat_price, dec!(262.50));
        assert_eq!(item.subtotal, dec!(525));
    }

    #[test]
    fn test_flight_over_capacity() {
        let result = LineItemService::build_flight_seats(
            Uuid::new_v4(),
            trip(),
            &flight_input(11),
            &flight_info(10),
            false,
        );
        assert!(matches!(
            result,
            Err(LineItemError::InsufficientCapacity {
                kind: LineItemKind::Flight,
                requested: 11,
                available: 10
            })
        ));
    }

    #[test]
    fn test_flight_departure_outside_window() {
        let mut info = flight_info(10);
        info.departure_date = date(2026, 9, 20);
        let result = LineItemService::build_flight_seats(
            Uuid::new_v4(),
            trip(),
            &flight_input(1),
            &info,
            false,
        );
        assert!(matches!(
            result,
            Err(LineItemError::OutsideTripWindow(LineItemKind::Flight))
        ));
    }

    #[test]
    fn test_flight_negative_extras() {
        let mut input = flight_input(1);
        input.extras = dec!(-5);
        let result = LineItemService::build_flight_seats(
            Uuid::new_v4(),
            trip(),
            &input,
            &flight_info(10),
            false,
        );
        assert!(matches!(result, Err(LineItemError::NegativeExtras)));
    }

    #[test]
    fn test_package_over_capacity_five_persons_three_slots() {
        let input = PackageBookingInput {
            package_id: Uuid::new_v4(),
            persons: 5,
            observations: None,
        };
        let result = LineItemService::build_package_booking(
            Uuid::new_v4(),
            trip(),
            &input,
            &package_info(3),
            false,
        );
        assert!(matches!(
            result,
            Err(LineItemError::InsufficientCapacity {
                kind: LineItemKind::Package,
                requested: 5,
                available: 3
            })
        ));
    }

    #[test]
    fn test_package_booking_ok() {
        let input = PackageBookingInput {
            package_id: Uuid::new_v4(),
            persons: 2,
            observations: None,
        };
        let item = LineItemService::build_package_booking(
            Uuid::new_v4(),
            trip(),
            &input,
            &package_info(3),
            false,
        )
        .unwrap();
        assert_eq!(item.subtotal, dec!(1000));
        assert_eq!(item.persons, 2);
    }

    #[test]
    fn test_service_repeats_allowed() {
        // No duplicate flag on the service builder: repeats are permitted.
        let input = ServiceOrderInput {
            service_id: Uuid::new_v4(),
            quantity: 2,
            service_date: date(2026, 9, 6),
            observations: None,
        };
        let info = ServiceInfo {
            unit_price: dec!(35),
            is_active: true,
        };
        let first =
            LineItemService::build_service_order(Uuid::new_v4(), trip(), &input, &info).unwrap();
        let second =
            LineItemService::build_service_order(Uuid::new_v4(), trip(), &input, &info).unwrap();
        assert_eq!(first.subtotal, dec!(70));
        assert_eq!(second.subtotal, dec!(70));
    }

    #[test]
    fn test_detach_before_window_ok() {
        let item = LineItem::Hotel(
            LineItemService::build_hotel_stay(
                Uuid::new_v4(),
                trip(),
                &hotel_input(),
                &hotel_info(),
                false,
            )
            .unwrap(),
        );
        assert!(LineItemService::validate_detach(&item, date(2026, 9, 1)).is_ok());
    }

    #[test]
    fn test_detach_after_check_in_rejected() {
        let item = LineItem::Hotel(
            LineItemService::build_hotel_stay(
                Uuid::new_v4(),
                trip(),
                &hotel_input(),
                &hotel_info(),
                false,
            )
            .unwrap(),
        );
        // Check-in is 2026-09-02; on that day the stay is already immutable.
        assert!(matches!(
            LineItemService::validate_detach(&item, date(2026, 9, 2)),
            Err(LineItemError::WindowStarted(LineItemKind::Hotel))
        ));
    }

    #[test]
    fn test_capacity_delta_per_variant() {
        let flight = LineItem::Flight(
            LineItemService::build_flight_seats(
                Uuid::new_v4(),
                trip(),
                &flight_input(4),
                &flight_info(10),
                false,
            )
            .unwrap(),
        );
        assert_eq!(flight.capacity_delta(), 4);

        let hotel = LineItem::Hotel(
            LineItemService::build_hotel_stay(
                Uuid::new_v4(),
                trip(),
                &hotel_input(),
                &hotel_info(),
                false,
            )
            .unwrap(),
        );
        assert_eq!(hotel.capacity_delta(), 0);
    }
}
