use serde::{Deserialize, Serialize};
use std::fmt;

/// A single payment row as supplied by the data-access layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPeriod {
    /// Identifier of the resident who made the payment
    pub user_id: String,
    /// Display name of the resident
    pub user_name: String,
    /// House number of the resident
    pub house_number: String,
    /// Payment category (1 = maintenance)
    pub category_id: i32,
    /// Start of the covered period (YYYY-MM-DD or RFC 3339)
    #[serde(default)]
    pub period_start: Option<String>,
    /// End of the covered period (YYYY-MM-DD or RFC 3339)
    #[serde(default)]
    pub period_end: Option<String>,
    /// When the payment was made
    #[serde(default)]
    pub payment_date: Option<String>,
}

/// Arrears status of one resident
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceDue {
    pub user_id: String,
    pub user_name: String,
    pub house_number: String,
    /// ISO date (YYYY-MM-DD) of the latest covered maintenance period
    pub last_paid_period_end: Option<String>,
    pub overdue_days: i64,
    /// Coarse 30-day buckets, not calendar months
    pub overdue_months: i64,
    pub formatted_duration: String,
}

/// Aggregate result of a due calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DueCalculationResponse {
    pub users_with_due: Vec<MaintenanceDue>,
    pub total_overdue_users: usize,
    pub average_overdue_days: i64,
    /// Date the calculation was evaluated against (YYYY-MM-DD)
    pub as_of: String,
}

/// Request to calculate dues over an explicit list of payments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateDuesRequest {
    pub payments: Vec<PaymentPeriod>,
    /// Optional evaluation date (YYYY-MM-DD) - uses today if not provided
    #[serde(default)]
    pub as_of: Option<String>,
}

/// Severity tier of an overdue resident, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueSeverity {
    Recent,
    Warning,
    Critical,
}

impl fmt::Display for DueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueSeverity::Recent => write!(f, "recent"),
            DueSeverity::Warning => write!(f, "warning"),
            DueSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Column used to order the due table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueSortField {
    #[default]
    OverdueDays,
    ResidentName,
    HouseNumber,
    LastPaidPeriodEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// A due record formatted for table display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedDue {
    pub user_id: String,
    pub resident_name: String,
    pub house_number: String,
    /// Formatted last paid date, or "No payments"
    pub last_paid_display: String,
    pub overdue_duration: String,
    pub severity: DueSeverity,
    pub raw_overdue_days: i64,
    pub raw_overdue_months: i64,
    pub raw_last_paid_period_end: Option<String>,
}

/// Response containing formatted due table data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DueTableResponse {
    pub rows: Vec<FormattedDue>,
    /// Number of rows after filtering
    pub row_count: usize,
    /// Overdue residents before filtering
    pub total_overdue_users: usize,
    pub average_overdue_days: i64,
    pub as_of: String,
}

/// Response containing exported due data as CSV
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDuesResponse {
    pub csv_content: String,
    pub filename: String,
    pub resident_count: usize,
    /// Where the server also wrote the file, when an export directory is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_path: Option<String>,
}

/// Result of uploading payment rows to the server's payment store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentUploadResponse {
    /// Rows accepted by this request
    pub accepted_count: usize,
    /// Rows held by the store afterwards
    pub stored_count: usize,
}
