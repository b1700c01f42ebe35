//! `SeaORM` Entity for packages table.
//!
//! `slots_available` is the authoritative capacity counter; `version` guards
//! it against concurrent decrements.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "packages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub destination: String,
    pub price_per_person: Decimal,
    pub slots_total: i32,
    pub slots_available: i32,
    pub start_date: Date,
    pub end_date: Date,
    pub version: i64,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::package_items::Entity")]
    PackageItems,
}

impl Related<super::package_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PackageItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
