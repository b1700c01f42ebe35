//! `SeaORM` Entity for hotel_items table.
//!
//! `nightly_rate` is a price snapshot taken at attachment time; later catalog
//! edits never reprice an existing item.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "hotel_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub hotel_id: Uuid,
    pub check_in: Date,
    pub check_out: Date,
    pub rooms: i32,
    pub nightly_rate: Decimal,
    pub subtotal: Decimal,
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
        belongs_to = "super::hotels::Entity",
        from = "Column::HotelId",
        to = "super::hotels::Column::Id"
    )]
    Hotels,
}

impl Related<super::reservations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl Related<super::hotels::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hotels.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for viatour_core::lineitem::HotelItem {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            reservation_id: m.reservation_id,
            hotel_id: m.hotel_id,
            check_in: m.check_in,
            check_out: m.check_out,
            rooms: m.rooms,
            nightly_rate: m.nightly_rate,
            subtotal: m.subtotal,
            observations: m.observations,
        }
    }
}
