//! Reservation service: lifecycle guards and authoritative total recomputation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::ReservationError;
use super::types::{ReservationStatus, ReservationTotals};

/// Reservation service for business logic.
///
/// This service contains pure business logic with no database dependencies.
/// Repositories call these guards before writing and the recomputation after
/// every attach, detach or payment mutation.
pub struct ReservationService;

impl ReservationService {
    /// Validate the trip window and passenger count of a new reservation.
    ///
    /// # Errors
    ///
    /// Returns `ReservationError::InvalidTripWindow` if the end date precedes
    /// the start date, or `ReservationError::NoPassengers` if the passenger
    /// count is below one.
    pub fn validate_new(
        trip_start: NaiveDate,
        trip_end: NaiveDate,
        passenger_count: i32,
    ) -> Result<(), ReservationError> {
        if trip_end < trip_start {
            return Err(ReservationError::InvalidTripWindow);
        }
        if passenger_count < 1 {
            return Err(ReservationError::NoPassengers);
        }
        Ok(())
    }

    /// Validate that the reservation accepts item attachment/detachment or
    /// field updates.
    ///
    /// # Errors
    ///
    /// Returns `ReservationError::TerminalState` for cancelled or completed
    /// reservations.
    pub fn validate_can_modify(status: ReservationStatus) -> Result<(), ReservationError> {
        if !status.allows_item_mutation() {
            return Err(ReservationError::TerminalState(status));
        }
        Ok(())
    }

    /// Validate the `Pending -> Confirmed` transition.
    ///
    /// # Errors
    ///
    /// Returns `ReservationError::NotPending` unless the current status is
    /// `Pending`.
    pub fn validate_confirm(status: ReservationStatus) -> Result<(), ReservationError> {
        if status != ReservationStatus::Pending {
            return Err(ReservationError::NotPending(status));
        }
        Ok(())
    }

    /// Validate the `Confirmed -> Completed` transition.
    ///
    /// # Errors
    ///
    /// Returns `ReservationError::NotConfirmed` unless the current status is
    /// `Confirmed`.
    pub fn validate_complete(status: ReservationStatus) -> Result<(), ReservationError> {
        if status != ReservationStatus::Confirmed {
            return Err(ReservationError::NotConfirmed(status));
        }
        Ok(())
    }

    /// Validate cancellation: allowed from `Pending` or `Confirmed`, and a
    /// non-empty reason must be recorded.
    ///
    /// # Errors
    ///
    /// Returns `ReservationError::TerminalState` for already-terminal
    /// reservations and `ReservationError::MissingCancellationReason` when the
    /// reason is blank.
    pub fn validate_cancel(
        status: ReservationStatus,
        reason: &str,
    ) -> Result<(), ReservationError> {
        if status.is_terminal() {
            return Err(ReservationError::TerminalState(status));
        }
        if reason.trim().is_empty() {
            return Err(ReservationError::MissingCancellationReason);
        }
        Ok(())
    }

    /// Recompute the derived totals from the authoritative child records.
    ///
    /// `subtotals` is the full set of currently attached line-item subtotals
    /// and `paid_amount` the full sum of approved payments. The function is a
    /// pure fold: running it twice with the same inputs yields the same
    /// result, so repositories can call it after every mutation without drift.
    #[must_use]
    pub fn recompute_totals(subtotals: &[Decimal], paid_amount: Decimal) -> ReservationTotals {
        let total_amount: Decimal = subtotals.iter().copied().sum();

        ReservationTotals {
            total_amount,
            paid_amount,
            balance_due: total_amount - paid_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_validate_new_ok() {
        assert!(ReservationService::validate_new(date(2026, 9, 1), date(2026, 9, 10), 2).is_ok());
    }

    #[test]
    fn test_validate_new_single_day_trip() {
        assert!(ReservationService::validate_new(date(2026, 9, 1), date(2026, 9, 1), 1).is_ok());
    }

    #[test]
    fn test_validate_new_inverted_window() {
        let result = ReservationService::validate_new(date(2026, 9, 10), date(2026, 9, 1), 2);
        assert!(matches!(result, Err(ReservationError::InvalidTripWindow)));
    }

    #[test]
    fn test_validate_new_no_passengers() {
        let result = ReservationService::validate_new(date(2026, 9, 1), date(2026, 9, 10), 0);
        assert!(matches!(result, Err(ReservationError::NoPassengers)));
    }

    #[test]
    fn test_confirm_from_pending() {
        assert!(ReservationService::validate_confirm(ReservationStatus::Pending).is_ok());
    }

    #[rstest]
    #[case(ReservationStatus::Confirmed)]
    #[case(ReservationStatus::Cancelled)]
    #[case(ReservationStatus::Completed)]
    fn test_confirm_rejected_outside_pending(#[case] status: ReservationStatus) {
        assert!(matches!(
            ReservationService::validate_confirm(status),
            Err(ReservationError::NotPending(_))
        ));
    }

    #[test]
    fn test_complete_from_confirmed() {
        assert!(ReservationService::validate_complete(ReservationStatus::Confirmed).is_ok());
    }

    #[rstest]
    #[case(ReservationStatus::Pending)]
    #[case(ReservationStatus::Cancelled)]
    #[case(ReservationStatus::Completed)]
    fn test_complete_rejected_outside_confirmed(#[case] status: ReservationStatus) {
        assert!(matches!(
            ReservationService::validate_complete(status),
            Err(ReservationError::NotConfirmed(_))
        ));
    }

    #[rstest]
    #[case(ReservationStatus::Pending)]
    #[case(ReservationStatus::Confirmed)]
    fn test_cancel_with_reason(#[case] status: ReservationStatus) {
        assert!(ReservationService::validate_cancel(status, "client request").is_ok());
    }

    #[rstest]
    #[case(ReservationStatus::Cancelled)]
    #[case(ReservationStatus::Completed)]
    fn test_cancel_rejected_from_terminal(#[case] status: ReservationStatus) {
        assert!(matches!(
            ReservationService::validate_cancel(status, "too late"),
            Err(ReservationError::TerminalState(_))
        ));
    }

    #[test]
    fn test_cancel_requires_reason() {
        let result = ReservationService::validate_cancel(ReservationStatus::Pending, "   ");
        assert!(matches!(
            result,
            Err(ReservationError::MissingCancellationReason)
        ));
    }

    #[rstest]
    #[case(ReservationStatus::Cancelled)]
    #[case(ReservationStatus::Completed)]
    fn test_modify_rejected_in_terminal_state(#[case] status: ReservationStatus) {
        assert!(matches!(
            ReservationService::validate_can_modify(status),
            Err(ReservationError::TerminalState(_))
        ));
    }

    #[test]
    fn test_recompute_totals_sums_subtotals() {
        let totals =
            ReservationService::recompute_totals(&[dec!(200), dec!(450), dec!(99.50)], dec!(300));

        assert_eq!(totals.total_amount, dec!(749.50));
        assert_eq!(totals.paid_amount, dec!(300));
        assert_eq!(totals.balance_due, dec!(449.50));
    }

    #[test]
    fn test_recompute_totals_empty() {
        let totals = ReservationService::recompute_totals(&[], Decimal::ZERO);
        assert_eq!(totals, ReservationTotals::zero());
    }

    #[test]
    fn test_recompute_totals_overpaid_goes_negative() {
        // Amendments can shrink the total below what was already paid; the
        // balance then reflects the credit owed to the client.
        let totals = ReservationService::recompute_totals(&[dec!(100)], dec!(150));
        assert_eq!(totals.balance_due, dec!(-50));
    }
}
