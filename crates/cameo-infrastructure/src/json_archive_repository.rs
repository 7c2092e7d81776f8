//! JSON-file-backed archive repository.
//!
//! One archive is one JSON array on disk. Appending replays the whole
//! document: load, push one record, rewrite atomically. Ids are assigned
//! here, one past the highest stored id.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use cameo_core::archive::{ArchiveRecord, ArchiveRepository};
use cameo_core::error::Result;
use cameo_core::state::StateSnapshot;

use crate::storage::AtomicJsonFile;

pub struct JsonArchiveRepository {
    file: AtomicJsonFile<Vec<ArchiveRecord>>,
}

impl JsonArchiveRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
        }
    }
}

#[async_trait]
impl ArchiveRepository for JsonArchiveRepository {
    async fn append(&self, summary: &str, payload: StateSnapshot) -> Result<u64> {
        let id = self.file.update(Vec::new(), |records| {
            let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
            records.push(ArchiveRecord::new(id, summary, payload));
            Ok(id)
        })?;
        debug!(path = %self.file.path().display(), id, "archived record");
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<ArchiveRecord>> {
        Ok(self.file.load()?.unwrap_or_default())
    }
}
