//! `SeaORM` Entity for package_items table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "package_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub package_id: Uuid,
    pub persons: i32,
    pub price_per_person: Decimal,
    pub subtotal: Decimal,
    pub start_date: Date,
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
        belongs_to = "super::packages::Entity",
        from = "Column::PackageId",
        to = "super::packages::Column::Id"
    )]
    Packages,
}

impl Related<super::reservations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl Related<super::packages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Packages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for viatour_core::lineitem::PackageItem {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            reservation_id: m.reservation_id,
            package_id: m.package_id,
            persons: m.persons,
            price_per_person: m.price_per_person,
            subtotal: m.subtotal,
            start_date: m.start_date,
            observations: m.observations,
        }
    }
}
