pub mod catalog_loader;
pub mod config_service;
pub mod json_archive_repository;
pub mod json_case_repository;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::json_archive_repository::JsonArchiveRepository;
pub use crate::json_case_repository::JsonCaseRepository;
pub use crate::paths::CameoPaths;
