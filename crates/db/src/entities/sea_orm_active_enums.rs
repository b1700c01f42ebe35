//! Database enum types and conversions to/from the core domain enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reservation lifecycle status (database enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "reservation_status")]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl From<ReservationStatus> for viatour_core::reservation::ReservationStatus {
    fn from(value: ReservationStatus) -> Self {
        match value {
            ReservationStatus::Pending => Self::Pending,
            ReservationStatus::Confirmed => Self::Confirmed,
            ReservationStatus::Cancelled => Self::Cancelled,
            ReservationStatus::Completed => Self::Completed,
        }
    }
}

impl From<viatour_core::reservation::ReservationStatus> for ReservationStatus {
    fn from(value: viatour_core::reservation::ReservationStatus) -> Self {
        match value {
            viatour_core::reservation::ReservationStatus::Pending => Self::Pending,
            viatour_core::reservation::ReservationStatus::Confirmed => Self::Confirmed,
            viatour_core::reservation::ReservationStatus::Cancelled => Self::Cancelled,
            viatour_core::reservation::ReservationStatus::Completed => Self::Completed,
        }
    }
}

/// Invoice lifecycle status (database enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "invoice_status")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    #[sea_orm(string_value = "overdue")]
    Overdue,
}

impl From<InvoiceStatus> for viatour_core::invoice::InvoiceStatus {
    fn from(value: InvoiceStatus) -> Self {
        match value {
            InvoiceStatus::Pending => Self::Pending,
            InvoiceStatus::Paid => Self::Paid,
            InvoiceStatus::Cancelled => Self::Cancelled,
            InvoiceStatus::Overdue => Self::Overdue,
        }
    }
}

impl From<viatour_core::invoice::InvoiceStatus> for InvoiceStatus {
    fn from(value: viatour_core::invoice::InvoiceStatus) -> Self {
        match value {
            viatour_core::invoice::InvoiceStatus::Pending => Self::Pending,
            viatour_core::invoice::InvoiceStatus::Paid => Self::Paid,
            viatour_core::invoice::InvoiceStatus::Cancelled => Self::Cancelled,
            viatour_core::invoice::InvoiceStatus::Overdue => Self::Overdue,
        }
    }
}

/// Payment lifecycle status (database enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_status")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl From<PaymentStatus> for viatour_core::payment::PaymentStatus {
    fn from(value: PaymentStatus) -> Self {
        match value {
            PaymentStatus::Pending => Self::Pending,
            PaymentStatus::Approved => Self::Approved,
            PaymentStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<viatour_core::payment::PaymentStatus> for PaymentStatus {
    fn from(value: viatour_core::payment::PaymentStatus) -> Self {
        match value {
            viatour_core::payment::PaymentStatus::Pending => Self::Pending,
            viatour_core::payment::PaymentStatus::Approved => Self::Approved,
            viatour_core::payment::PaymentStatus::Rejected => Self::Rejected,
        }
    }
}

/// Flight cabin class (database enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "cabin_class")]
#[serde(rename_all = "lowercase")]
pub enum CabinClass {
    #[sea_orm(string_value = "economy")]
    Economy,
    #[sea_orm(string_value = "business")]
    Business,
    #[sea_orm(string_value = "first")]
    First,
}

impl From<CabinClass> for viatour_core::lineitem::CabinClass {
    fn from(value: CabinClass) -> Self {
        match value {
            CabinClass::Economy => Self::Economy,
            CabinClass::Business => Self::Business,
            CabinClass::First => Self::First,
        }
    }
}

impl From<viatour_core::lineitem::CabinClass> for CabinClass {
    fn from(value: viatour_core::lineitem::CabinClass) -> Self {
        match value {
            viatour_core::lineitem::CabinClass::Economy => Self::Economy,
            viatour_core::lineitem::CabinClass::Business => Self::Business,
            viatour_core::lineitem::CabinClass::First => Self::First,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ReservationStatus::Pending)]
    #[case(ReservationStatus::Confirmed)]
    #[case(ReservationStatus::Cancelled)]
    #[case(ReservationStatus::Completed)]
    fn test_reservation_status_round_trips(#[case] status: ReservationStatus) {
        let core: viatour_core::reservation::ReservationStatus = status.clone().into();
        assert_eq!(ReservationStatus::from(core), status);
    }

    #[rstest]
    #[case(InvoiceStatus::Pending)]
    #[case(InvoiceStatus::Paid)]
    #[case(InvoiceStatus::Cancelled)]
    #[case(InvoiceStatus::Overdue)]
    fn test_invoice_status_round_trips(#[case] status: InvoiceStatus) {
        let core: viatour_core::invoice::InvoiceStatus = status.clone().into();
        assert_eq!(InvoiceStatus::from(core), status);
    }

    #[rstest]
    #[case(PaymentStatus::Pending)]
    #[case(PaymentStatus::Approved)]
    #[case(PaymentStatus::Rejected)]
    fn test_payment_status_round_trips(#[case] status: PaymentStatus) {
        let core: viatour_core::payment::PaymentStatus = status.clone().into();
        assert_eq!(PaymentStatus::from(core), status);
    }

    #[rstest]
    #[case(CabinClass::Economy)]
    #[case(CabinClass::Business)]
    #[case(CabinClass::First)]
    fn test_cabin_class_round_trips(#[case] class: CabinClass) {
        let core: viatour_core::lineitem::CabinClass = class.clone().into();
        assert_eq!(CabinClass::from(core), class);
    }
}
