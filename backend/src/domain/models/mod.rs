pub mod due;
pub mod payment;

pub use due::{DueCalculationResult, MaintenanceDue};
pub use payment::{PaymentPeriod, Resident, MAINTENANCE_CATEGORY_ID};
