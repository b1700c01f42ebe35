//! `SeaORM` Entity for invoices table.
//!
//! One invoice per reservation, enforced by the unique `reservation_id`
//! column. `sequence` backs the human-readable invoice number and carries its
//! own unique index so two concurrent generations cannot mint the same
//! number.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::InvoiceStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub reservation_id: Uuid,
    #[sea_orm(unique)]
    pub invoice_number: String,
    #[sea_orm(unique)]
    pub sequence: i64,
    pub issue_date: Date,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub status: InvoiceStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::reservations::Entity",
        from = "Column::ReservationId",
        to = "super::reservations::Column::Id"
    )]
    Reservations,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::reservations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for viatour_core::invoice::Invoice {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            reservation_id: m.reservation_id,
            invoice_number: m.invoice_number,
            issue_date: m.issue_date,
            total_amount: m.total_amount,
            paid_amount: m.paid_amount,
            status: m.status.into(),
            created_at: m.created_at.into(),
            updated_at: m.updated_at.into(),
        }
    }
}
