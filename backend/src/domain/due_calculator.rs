//! Maintenance due calculation.
//!
//! Given every payment row known for the society, this service works out
//! which residents are behind on maintenance and by how long. It is a pure
//! transformation: nothing is stored, nothing is mutated, and the same
//! input evaluated on the same date always yields the same result.
//!
//! ## Rules
//!
//! - Only payments in the maintenance category are considered
//! - A payment counts only if both period dates are present and the period
//!   is not inverted; anything else is skipped silently
//! - The latest covered `period_end` decides how far a resident is behind
//! - A period ending today (or later) means the resident is not overdue
//! - Residents without any qualifying payment are left out entirely rather
//!   than reported as zero days overdue

use chrono::{Local, NaiveDate};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::domain::duration::{format_duration, DAYS_PER_MONTH};
use crate::domain::models::{DueCalculationResult, MaintenanceDue, PaymentPeriod, Resident};

/// Stateless service computing maintenance dues
#[derive(Debug, Clone, Default)]
pub struct DueCalculatorService;

impl DueCalculatorService {
    pub fn new() -> Self {
        Self
    }

    /// Compute the due status of a single resident from their payments.
    ///
    /// Returns `None` when the resident has no valid maintenance payment or
    /// their latest covered period reaches `today`.
    pub fn calculate_user_due(
        &self,
        resident: &Resident,
        payments: &[PaymentPeriod],
        today: NaiveDate,
    ) -> Option<MaintenanceDue> {
        self.due_from_payments(resident, payments.iter(), today)
    }

    fn due_from_payments<'a>(
        &self,
        resident: &Resident,
        payments: impl Iterator<Item = &'a PaymentPeriod>,
        today: NaiveDate,
    ) -> Option<MaintenanceDue> {
        let maintenance: Vec<&PaymentPeriod> = payments.filter(|p| p.is_maintenance()).collect();
        if maintenance.is_empty() {
            debug!("Resident {} has no maintenance payments, skipping", resident.user_id);
            return None;
        }

        let latest_end = maintenance
            .iter()
            .filter_map(|p| p.valid_period().map(|(_, end)| end))
            .max();

        let Some(last_paid_end) = latest_end else {
            debug!("Resident {} has no valid maintenance periods, skipping", resident.user_id);
            return None;
        };

        let overdue_days = (today - last_paid_end).num_days();
        if overdue_days <= 0 {
            debug!(
                "Resident {} is covered until {}, not overdue",
                resident.user_id, last_paid_end
            );
            return None;
        }

        debug!(
            "Resident {} overdue by {} days (last paid period ended {})",
            resident.user_id, overdue_days, last_paid_end
        );

        Some(MaintenanceDue {
            user_id: resident.user_id.clone(),
            user_name: resident.user_name.clone(),
            house_number: resident.house_number.clone(),
            last_paid_period_end: Some(last_paid_end),
            overdue_days,
            overdue_months: overdue_days / DAYS_PER_MONTH,
            formatted_duration: format_duration(overdue_days),
        })
    }

    /// Compute dues for every resident present in `payments`.
    ///
    /// Residents appear in the order they were first seen in the input. The
    /// first row of a resident supplies their display name and house number.
    pub fn calculate_dues(&self, payments: &[PaymentPeriod], today: NaiveDate) -> DueCalculationResult {
        let groups = Self::group_by_resident(payments);

        let users_with_due: Vec<MaintenanceDue> = groups
            .iter()
            .filter_map(|(resident, resident_payments)| {
                self.due_from_payments(resident, resident_payments.iter().copied(), today)
            })
            .collect();

        let total_overdue_users = users_with_due.len();
        let average_overdue_days = Self::average_days(&users_with_due);

        info!(
            "Calculated dues as of {}: {} payments, {} residents, {} overdue (average {} days)",
            today,
            payments.len(),
            groups.len(),
            total_overdue_users,
            average_overdue_days
        );

        DueCalculationResult {
            users_with_due,
            total_overdue_users,
            average_overdue_days,
        }
    }

    /// Compute dues against the local calendar date
    pub fn calculate_dues_as_of_today(&self, payments: &[PaymentPeriod]) -> DueCalculationResult {
        self.calculate_dues(payments, Self::today())
    }

    /// Current local calendar date
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Group payments by user id, keeping first-seen order
    fn group_by_resident(payments: &[PaymentPeriod]) -> Vec<(Resident, Vec<&PaymentPeriod>)> {
        let mut index_by_user: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<(Resident, Vec<&PaymentPeriod>)> = Vec::new();

        for payment in payments {
            match index_by_user.get(payment.user_id.as_str()) {
                Some(&index) => groups[index].1.push(payment),
                None => {
                    index_by_user.insert(payment.user_id.as_str(), groups.len());
                    groups.push((Resident::from(payment), vec![payment]));
                }
            }
        }

        groups
    }

    /// Mean overdue days rounded half-up, 0 for an empty list
    fn average_days(dues: &[MaintenanceDue]) -> i64 {
        if dues.is_empty() {
            return 0;
        }
        let total: i64 = dues.iter().map(|d| d.overdue_days).sum();
        let count = dues.len() as i64;
        (total * 2 + count) / (count * 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::MAINTENANCE_CATEGORY_ID;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn days_ago(days: i64) -> NaiveDate {
        today() - Duration::days(days)
    }

    fn create_payment(
        user_id: &str,
        category_id: i32,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> PaymentPeriod {
        PaymentPeriod {
            user_id: user_id.to_string(),
            user_name: format!("Resident {}", user_id),
            house_number: format!("H-{}", user_id),
            category_id,
            period_start: start,
            period_end: end,
            payment_date: None,
        }
    }

    /// Maintenance payment covering the 30 days up to `end_days_ago`
    fn maintenance_ending(user_id: &str, end_days_ago: i64) -> PaymentPeriod {
        create_payment(
            user_id,
            MAINTENANCE_CATEGORY_ID,
            Some(days_ago(end_days_ago + 30)),
            Some(days_ago(end_days_ago)),
        )
    }

    fn resident(user_id: &str) -> Resident {
        Resident {
            user_id: user_id.to_string(),
            user_name: format!("Resident {}", user_id),
            house_number: format!("H-{}", user_id),
        }
    }

    #[test]
    fn test_non_maintenance_payments_never_flag_a_resident() {
        let service = DueCalculatorService::new();
        let payments = vec![
            create_payment("z", 2, Some(days_ago(400)), Some(days_ago(370))),
            create_payment("z", 3, Some(days_ago(200)), Some(days_ago(170))),
        ];

        assert_eq!(service.calculate_user_due(&resident("z"), &payments, today()), None);

        let result = service.calculate_dues(&payments, today());
        assert!(result.users_with_due.is_empty());
    }

    #[test]
    fn test_period_ending_today_is_not_overdue() {
        let service = DueCalculatorService::new();
        let payments = vec![maintenance_ending("x", 0)];

        assert_eq!(service.calculate_user_due(&resident("x"), &payments, today()), None);
    }

    #[test]
    fn test_period_ending_yesterday_is_one_day_overdue() {
        let service = DueCalculatorService::new();
        let payments = vec![maintenance_ending("x", 1)];

        let due = service.calculate_user_due(&resident("x"), &payments, today()).unwrap();
        assert_eq!(due.overdue_days, 1);
        assert_eq!(due.overdue_months, 0);
        assert_eq!(due.formatted_duration, "1 day");
    }

    #[test]
    fn test_period_ending_in_future_is_not_overdue() {
        let service = DueCalculatorService::new();
        let payments = vec![create_payment(
            "x",
            MAINTENANCE_CATEGORY_ID,
            Some(days_ago(10)),
            Some(today() + Duration::days(20)),
        )];

        assert_eq!(service.calculate_user_due(&resident("x"), &payments, today()), None);
    }

    #[test]
    fn test_forty_five_days_overdue() {
        let service = DueCalculatorService::new();
        let payments = vec![maintenance_ending("x", 45)];

        let due = service.calculate_user_due(&resident("x"), &payments, today()).unwrap();
        assert_eq!(due.overdue_days, 45);
        assert_eq!(due.overdue_months, 1);
        assert_eq!(due.formatted_duration, "1 month, 15 days");
        assert_eq!(due.last_paid_period_end, Some(days_ago(45)));
        assert_eq!(due.user_name, "Resident x");
        assert_eq!(due.house_number, "H-x");
    }

    #[test]
    fn test_latest_period_end_wins_regardless_of_order() {
        let service = DueCalculatorService::new();
        let mut older = maintenance_ending("y", 100);
        older.payment_date = Some(days_ago(5)); // paid recently but covers an old period
        let mut newer = maintenance_ending("y", 10);
        newer.payment_date = Some(days_ago(50));

        for payments in [vec![older.clone(), newer.clone()], vec![newer.clone(), older.clone()]] {
            let due = service.calculate_user_due(&resident("y"), &payments, today()).unwrap();
            assert_eq!(due.overdue_days, 10);
            assert_eq!(due.last_paid_period_end, Some(days_ago(10)));
        }
    }

    #[test]
    fn test_invalid_periods_are_ignored() {
        let service = DueCalculatorService::new();
        let payments = vec![
            maintenance_ending("w", 60),
            // Inverted period with a later end must not be picked
            create_payment("w", MAINTENANCE_CATEGORY_ID, Some(days_ago(1)), Some(days_ago(5))),
            // Missing start
            create_payment("w", MAINTENANCE_CATEGORY_ID, None, Some(days_ago(2))),
        ];

        let due = service.calculate_user_due(&resident("w"), &payments, today()).unwrap();
        assert_eq!(due.overdue_days, 60);
    }

    #[test]
    fn test_missing_period_start_excludes_resident() {
        let service = DueCalculatorService::new();
        let payments = vec![create_payment("w", MAINTENANCE_CATEGORY_ID, None, Some(days_ago(40)))];

        let result = service.calculate_dues(&payments, today());
        assert!(result.users_with_due.is_empty());
        assert_eq!(result.total_overdue_users, 0);
    }

    #[test]
    fn test_non_maintenance_records_do_not_count_for_mixed_resident() {
        let service = DueCalculatorService::new();
        let payments = vec![
            maintenance_ending("m", 90),
            // A recent parking payment must not reset the maintenance due
            create_payment("m", 2, Some(days_ago(30)), Some(days_ago(0))),
        ];

        let due = service.calculate_user_due(&resident("m"), &payments, today()).unwrap();
        assert_eq!(due.overdue_days, 90);
        assert_eq!(due.formatted_duration, "3 months");
    }

    #[test]
    fn test_aggregate_statistics() {
        let service = DueCalculatorService::new();
        let payments = vec![
            maintenance_ending("a", 10),
            maintenance_ending("b", 20),
            maintenance_ending("c", 30),
        ];

        let result = service.calculate_dues(&payments, today());
        assert_eq!(result.total_overdue_users, 3);
        assert_eq!(result.users_with_due.len(), 3);
        assert_eq!(result.average_overdue_days, 20);
    }

    #[test]
    fn test_average_rounds_half_up() {
        let service = DueCalculatorService::new();
        let payments = vec![maintenance_ending("a", 1), maintenance_ending("b", 2)];

        let result = service.calculate_dues(&payments, today());
        // mean 1.5 rounds to 2
        assert_eq!(result.average_overdue_days, 2);

        let payments = vec![
            maintenance_ending("a", 1),
            maintenance_ending("b", 1),
            maintenance_ending("c", 2),
        ];
        // mean 1.33 rounds to 1
        assert_eq!(service.calculate_dues(&payments, today()).average_overdue_days, 1);
    }

    #[test]
    fn test_empty_input() {
        let service = DueCalculatorService::new();
        let result = service.calculate_dues(&[], today());

        assert!(result.users_with_due.is_empty());
        assert_eq!(result.total_overdue_users, 0);
        assert_eq!(result.average_overdue_days, 0);
    }

    #[test]
    fn test_paid_up_residents_are_omitted_and_not_averaged() {
        let service = DueCalculatorService::new();
        let payments = vec![
            maintenance_ending("late", 40),
            maintenance_ending("current", 0),
        ];

        let result = service.calculate_dues(&payments, today());
        assert_eq!(result.total_overdue_users, 1);
        assert_eq!(result.users_with_due[0].user_id, "late");
        assert_eq!(result.average_overdue_days, 40);
    }

    #[test]
    fn test_first_seen_identity_is_kept() {
        let service = DueCalculatorService::new();
        let mut first = maintenance_ending("u", 50);
        first.user_name = "Original Name".to_string();
        first.house_number = "B-7".to_string();
        let mut second = maintenance_ending("u", 20);
        second.user_name = "Renamed".to_string();
        second.house_number = "B-8".to_string();

        let result = service.calculate_dues(&[first, second], today());
        let due = &result.users_with_due[0];
        assert_eq!(due.user_name, "Original Name");
        assert_eq!(due.house_number, "B-7");
        assert_eq!(due.overdue_days, 20);
    }

    #[test]
    fn test_output_follows_first_seen_order() {
        let service = DueCalculatorService::new();
        let payments = vec![
            maintenance_ending("b", 5),
            maintenance_ending("a", 50),
            maintenance_ending("b", 15),
            maintenance_ending("c", 25),
        ];

        let result = service.calculate_dues(&payments, today());
        let ids: Vec<&str> = result.users_with_due.iter().map(|d| d.user_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let service = DueCalculatorService::new();
        let payments = vec![maintenance_ending("a", 10), maintenance_ending("a", 70)];
        let snapshot = payments.clone();

        service.calculate_dues(&payments, today());
        assert_eq!(payments, snapshot);
    }

    #[test]
    fn test_month_boundaries_use_calendar_days() {
        let service = DueCalculatorService::new();
        let end = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let payments = vec![create_payment(
            "leap",
            MAINTENANCE_CATEGORY_ID,
            NaiveDate::from_ymd_opt(2024, 2, 1),
            Some(end),
        )];

        let as_of = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let due = service.calculate_user_due(&resident("leap"), &payments, as_of).unwrap();
        assert_eq!(due.overdue_days, 2); // Feb 29 exists in 2024
    }

    #[test]
    fn test_calculate_dues_as_of_today_uses_local_date() {
        let service = DueCalculatorService::new();
        let end = DueCalculatorService::today() - Duration::days(10);
        let payments = vec![create_payment(
            "now",
            MAINTENANCE_CATEGORY_ID,
            Some(end - Duration::days(29)),
            Some(end),
        )];

        let result = service.calculate_dues_as_of_today(&payments);
        assert_eq!(result.total_overdue_users, 1);
        assert_eq!(result.users_with_due[0].overdue_days, 10);
    }
}
