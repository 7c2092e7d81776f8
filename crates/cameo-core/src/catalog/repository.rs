//! Fraud case persistence boundary.

use async_trait::async_trait;

use crate::error::Result;

use super::model::{CasePatch, FraudCase};

/// Store for flagged transaction cases.
///
/// Unlike the catalogs, cases are written back: resolving a case updates
/// its status in place.
#[async_trait]
pub trait CaseRepository: Send + Sync {
    /// Finds a case by account holder name, ignoring case and surrounding
    /// whitespace. Absence is `Ok(None)`, not an error.
    async fn find_by_name(&self, name: &str) -> Result<Option<FraudCase>>;

    /// Applies a resolution to the named case and persists it.
    ///
    /// Fails with a not-found error when no such case exists.
    async fn update_case(&self, name: &str, patch: CasePatch) -> Result<FraudCase>;

    /// Every stored case, in stored order.
    async fn list_all(&self) -> Result<Vec<FraudCase>>;
}
