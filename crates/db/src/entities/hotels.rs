//! `SeaORM` Entity for hotels table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "hotels")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub country: String,
    pub stars: i16,
    pub nightly_rate: Decimal,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::hotel_items::Entity")]
    HotelItems,
}

impl Related<super::hotel_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HotelItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
