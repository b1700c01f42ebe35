//! Reservations migration.
//!
//! Creates the reservation aggregate: the reservations table with its derived
//! total columns and the four line-item tables that feed them.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(RESERVATIONS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS service_items, package_items, flight_items, hotel_items, reservations CASCADE;
             DROP TYPE IF EXISTS reservation_status, cabin_class;",
        )
        .await?;
        Ok(())
    }
}

const RESERVATIONS_SQL: &str = r"
CREATE TYPE reservation_status AS ENUM ('pending', 'confirmed', 'cancelled', 'completed');
CREATE TYPE cabin_class AS ENUM ('economy', 'business', 'first');

CREATE TABLE reservations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    client_id UUID NOT NULL REFERENCES clients(id),
    employee_id UUID NOT NULL REFERENCES employees(id),
    trip_start DATE NOT NULL,
    trip_end DATE NOT NULL,
    passenger_count INTEGER NOT NULL,
    total_amount DECIMAL(15, 2) NOT NULL DEFAULT 0,
    paid_amount DECIMAL(15, 2) NOT NULL DEFAULT 0,
    balance_due DECIMAL(15, 2) NOT NULL DEFAULT 0,
    status reservation_status NOT NULL DEFAULT 'pending',
    cancellation_reason TEXT,
    observations TEXT,
    version BIGINT NOT NULL DEFAULT 1,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_reservations_window CHECK (trip_start <= trip_end),
    CONSTRAINT chk_reservations_passengers CHECK (passenger_count > 0)
);

CREATE TABLE hotel_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    reservation_id UUID NOT NULL REFERENCES reservations(id) ON DELETE CASCADE,
    hotel_id UUID NOT NULL REFERENCES hotels(id),
    check_in DATE NOT NULL,
    check_out DATE NOT NULL,
    rooms INTEGER NOT NULL,
    nightly_rate DECIMAL(15, 2) NOT NULL,
    subtotal DECIMAL(15, 2) NOT NULL,
    observations TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_hotel_items_dates CHECK (check_in < check_out),
    CONSTRAINT chk_hotel_items_rooms CHECK (rooms > 0)
);

-- One stay per hotel per reservation; extend the existing stay instead of
-- attaching a duplicate.
CREATE UNIQUE INDEX uq_hotel_items_reservation_hotel ON hotel_items(reservation_id, hotel_id);

CREATE TABLE flight_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    reservation_id UUID NOT NULL REFERENCES reservations(id) ON DELETE CASCADE,
    flight_id UUID NOT NULL REFERENCES flights(id),
    passengers INTEGER NOT NULL,
    cabin_class cabin_class NOT NULL DEFAULT 'economy',
    seat_price DECIMAL(15, 2) NOT NULL,
    extras DECIMAL(15, 2) NOT NULL DEFAULT 0,
    subtotal DECIMAL(15, 2) NOT NULL,
    departure_date DATE NOT NULL,
    observations TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_flight_items_passengers CHECK (passengers > 0),
    CONSTRAINT chk_flight_items_extras CHECK (extras >= 0)
);

-- One booking per flight per reservation; top up passengers on the existing
-- item instead of attaching a duplicate.
CREATE UNIQUE INDEX uq_flight_items_reservation_flight ON flight_items(reservation_id, flight_id);

CREATE TABLE package_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    reservation_id UUID NOT NULL REFERENCES reservations(id) ON DELETE CASCADE,
    package_id UUID NOT NULL REFERENCES packages(id),
    persons INTEGER NOT NULL,
    price_per_person DECIMAL(15, 2) NOT NULL,
    subtotal DECIMAL(15, 2) NOT NULL,
    start_date DATE NOT NULL,
    observations TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_package_items_persons CHECK (persons > 0)
);

CREATE UNIQUE INDEX uq_package_items_reservation_package ON package_items(reservation_id, package_id);

CREATE TABLE service_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    reservation_id UUID NOT NULL REFERENCES reservations(id) ON DELETE CASCADE,
    service_id UUID NOT NULL REFERENCES services(id),
    quantity INTEGER NOT NULL,
    unit_price DECIMAL(15, 2) NOT NULL,
    subtotal DECIMAL(15, 2) NOT NULL,
    service_date DATE NOT NULL,
    observations TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_service_items_quantity CHECK (quantity > 0)
);

CREATE INDEX idx_reservations_client ON reservations(client_id, created_at DESC);
CREATE INDEX idx_reservations_status ON reservations(status);
CREATE INDEX idx_hotel_items_reservation ON hotel_items(reservation_id);
CREATE INDEX idx_flight_items_reservation ON flight_items(reservation_id);
CREATE INDEX idx_package_items_reservation ON package_items(reservation_id);
CREATE INDEX idx_service_items_reservation ON service_items(reservation_id);
";
