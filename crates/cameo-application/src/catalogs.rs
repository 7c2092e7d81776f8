//! Loaded reference data, resolved once at service start.

use std::sync::Arc;

use cameo_core::catalog::preset::{
    default_faq_sheet, default_grocery_catalog, default_storefront_catalog, default_topic_list,
};
use cameo_core::catalog::{FaqSheet, ProductCatalog, TopicList};
use cameo_core::config::RootConfig;
use cameo_infrastructure::catalog_loader::{candidate_paths, resolve_catalog};

/// Every catalog a persona might consult, loaded and shared.
///
/// Loading is total: a missing or malformed file falls back to the
/// built-in dataset, so holding a `CatalogSet` means every persona can
/// open.
#[derive(Clone)]
pub struct CatalogSet {
    pub faq: Arc<FaqSheet>,
    pub groceries: Arc<ProductCatalog>,
    pub storefront: Arc<ProductCatalog>,
    pub topics: Arc<TopicList>,
}

impl CatalogSet {
    pub fn load(config: &RootConfig) -> Self {
        Self {
            faq: Arc::new(resolve_catalog(
                &candidate_paths(config, &config.catalogs.faq),
                default_faq_sheet(),
                "faq",
            )),
            groceries: Arc::new(resolve_catalog(
                &candidate_paths(config, &config.catalogs.groceries),
                default_grocery_catalog(),
                "groceries",
            )),
            storefront: Arc::new(resolve_catalog(
                &candidate_paths(config, &config.catalogs.storefront),
                default_storefront_catalog(),
                "storefront",
            )),
            topics: Arc::new(resolve_catalog(
                &candidate_paths(config, &config.catalogs.topics),
                default_topic_list(),
                "topics",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_without_files_uses_builtins() {
        let mut config = RootConfig::default();
        // Point everything at an empty directory so no real file shadows
        // the builtins.
        let dir = TempDir::new().unwrap();
        config.catalog_dir = Some(dir.path().to_path_buf());
        config.data_dir = Some(dir.path().to_path_buf());

        let catalogs = CatalogSet::load(&config);
        assert_eq!(catalogs.faq.company, default_faq_sheet().company);
        assert!(!catalogs.groceries.items.is_empty());
        assert_eq!(catalogs.topics.topics.len(), 3);
    }

    #[test]
    fn test_catalog_dir_file_replaces_builtin() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("topics.json"),
            r#"{"topics": [{"id": "algebra", "title": "Algebra",
                "summary": "Solving for x.", "sample_question": "Solve 2x = 10."}]}"#,
        )
        .unwrap();

        let mut config = RootConfig::default();
        config.catalog_dir = Some(dir.path().to_path_buf());
        config.data_dir = Some(dir.path().to_path_buf());

        let catalogs = CatalogSet::load(&config);
        assert_eq!(catalogs.topics.topics.len(), 1);
        assert!(catalogs.topics.find_by_id("algebra").is_some());
    }
}
