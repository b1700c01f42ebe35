//! `SeaORM` Entity for flights table.
//!
//! `seats_available` is the authoritative capacity counter; `version` guards
//! it against concurrent decrements.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "flights")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub airline: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure_date: Date,
    pub base_seat_price: Decimal,
    pub seats_total: i32,
    pub seats_available: i32,
    pub version: i64,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::flight_items::Entity")]
    FlightItems,
}

impl Related<super::flight_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FlightItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
