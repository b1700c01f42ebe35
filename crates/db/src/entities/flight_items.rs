//! `SeaORM` Entity for flight_items table.
//!
//! `seat_price` is the class-adjusted per-seat snapshot; `departure_date` is
//! copied from the flight at attachment time for the immutability window.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::CabinClass;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "flight_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub flight_id: Uuid,
    pub passengers: i32,
    pub cabin_class: CabinClass,
    pub seat_price: Decimal,
    pub extras: Decimal,
    pub subtotal: Decimal,
    pub departure_date: Date,
    pub observations: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::reservations::Entity",
        from = "Column::ReservationId",
        to = "super::reservations::Column::Id"
    )]
    Reservations,
    #[sea_orm(
        belongs_to = "super::flights::Entity",
        from = "Column::FlightId",
        to = "super::flights::Column::Id"
    )]
    Flights,
}

impl Related<super::reservations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl Related<super::flights::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Flights.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for viatour_core::lineitem::FlightItem {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            reservation_id: m.reservation_id,
            flight_id: m.flight_id,
            passengers: m.passengers,
            cabin_class: m.cabin_class.into(),
            seat_price: m.seat_price,
            extras: m.extras,
            subtotal: m.subtotal,
            departure_date: m.departure_date,
            observations: m.observations,
        }
    }
}
