//! Domain models produced by the due calculator.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceDue {
    pub user_id: String,
    pub user_name: String,
    pub house_number: String,
    pub last_paid_period_end: Option<NaiveDate>,
    pub overdue_days: i64,
    pub overdue_months: i64,
    pub formatted_duration: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DueCalculationResult {
    pub users_with_due: Vec<MaintenanceDue>,
    pub total_overdue_users: usize,
    pub average_overdue_days: i64,
}
