//! `SeaORM` Entity for reservations table.
//!
//! `total_amount`, `paid_amount` and `balance_due` are derived columns,
//! recomputed from the attached line items and the invoice inside the same
//! transaction as every mutation. `version` guards concurrent updates.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ReservationStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    pub employee_id: Uuid,
    pub trip_start: Date,
    pub trip_end: Date,
    pub passenger_count: i32,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub balance_due: Decimal,
    pub status: ReservationStatus,
    pub cancellation_reason: Option<String>,
    pub observations: Option<String>,
    pub version: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ClientId",
        to = "super::clients::Column::Id"
    )]
    Clients,
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::EmployeeId",
        to = "super::employees::Column::Id"
    )]
    Employees,
    #[sea_orm(has_many = "super::hotel_items::Entity")]
    HotelItems,
    #[sea_orm(has_many = "super::flight_items::Entity")]
    FlightItems,
    #[sea_orm(has_many = "super::package_items::Entity")]
    PackageItems,
    #[sea_orm(has_many = "super::service_items::Entity")]
    ServiceItems,
    #[sea_orm(has_one = "super::invoices::Entity")]
    Invoices,
}

impl Related<super::clients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clients.def()
    }
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl Related<super::invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for viatour_core::reservation::Reservation {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            client_id: m.client_id,
            employee_id: m.employee_id,
            trip_start: m.trip_start,
            trip_end: m.trip_end,
            passenger_count: m.passenger_count,
            total_amount: m.total_amount,
            paid_amount: m.paid_amount,
            balance_due: m.balance_due,
            status: m.status.into(),
            cancellation_reason: m.cancellation_reason,
            observations: m.observations,
            created_at: m.created_at.into(),
            updated_at: m.updated_at.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    #[test]
    fn test_model_converts_to_domain_reservation() {
        let now = Utc::now();
        let model = Model {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            employee_id: Uuid::new_v4(),
            trip_start: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            trip_end: NaiveDate::from_ymd_opt(2026, 9, 10).unwrap(),
            passenger_count: 2,
            total_amount: dec!(1500.00),
            paid_amount: dec!(500.00),
            balance_due: dec!(1000.00),
            status: ReservationStatus::Confirmed,
            cancellation_reason: None,
            observations: Some("window seats".to_string()),
            version: 3,
            created_at: now.into(),
            updated_at: now.into(),
        };

        let resv: viatour_core::reservation::Reservation = model.clone().into();
        assert_eq!(resv.id, model.id);
        assert_eq!(resv.balance_due, dec!(1000.00));
        assert_eq!(
            resv.status,
            viatour_core::reservation::ReservationStatus::Confirmed
        );
        assert_eq!(resv.observations.as_deref(), Some("window seats"));
    }
}
