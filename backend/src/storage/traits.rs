//! # Storage Traits
//!
//! Storage abstraction that lets the domain layer read payment rows without
//! knowing where they come from.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::PaymentPeriod;

/// Trait defining the interface for payment storage operations
///
/// Implementations hand back every payment row they know of, in whatever
/// order they hold them. Rows whose dates could not be read are returned
/// with those dates set to `None` rather than dropped or failing the call.
#[async_trait]
pub trait PaymentStorage: Send + Sync {
    /// List every payment period across all residents
    async fn list_payment_periods(&self) -> Result<Vec<PaymentPeriod>>;
}
