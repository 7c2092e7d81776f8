//! Archive persistence boundary.

use async_trait::async_trait;

use crate::error::Result;
use crate::state::StateSnapshot;

use super::model::ArchiveRecord;

/// Append-only store for finished conversation records.
///
/// Implementations own id assignment and timestamping; callers hand over a
/// payload and get back the id the record was stored under.
#[async_trait]
pub trait ArchiveRepository: Send + Sync {
    /// Appends a record, preserving everything already stored.
    async fn append(&self, summary: &str, payload: StateSnapshot) -> Result<u64>;

    /// All records in stored order. An archive that does not exist yet
    /// reads as empty, not as an error.
    async fn list_all(&self) -> Result<Vec<ArchiveRecord>>;

    /// The most recent record, if any.
    async fn latest(&self) -> Result<Option<ArchiveRecord>> {
        Ok(self.list_all().await?.into_iter().last())
    }
}
