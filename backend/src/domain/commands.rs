//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping
//! query strings and the public DTOs defined in the `shared` crate to these
//! internal types.

pub mod dues {
    use crate::domain::models::{DueCalculationResult, PaymentPeriod};
    use chrono::NaiveDate;
    use shared::{DueSeverity, DueSortField, SortDirection};

    /// Filter and sort options for the due table.
    #[derive(Debug, Clone, Default)]
    pub struct DueTableQuery {
        pub search: Option<String>,
        pub min_severity: Option<DueSeverity>,
        pub sort_by: DueSortField,
        pub direction: SortDirection,
    }

    /// Input for calculating dues over an explicit payment list.
    #[derive(Debug, Clone)]
    pub struct CalculateDuesCommand {
        pub payments: Vec<PaymentPeriod>,
        pub as_of: NaiveDate,
    }

    /// Result of a due calculation together with its evaluation date.
    #[derive(Debug, Clone)]
    pub struct DueReport {
        pub result: DueCalculationResult,
        pub as_of: NaiveDate,
    }
}
