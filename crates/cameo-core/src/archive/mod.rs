//! Append-only conversation archives.

pub mod model;
pub mod repository;

pub use model::ArchiveRecord;
pub use repository::ArchiveRepository;
