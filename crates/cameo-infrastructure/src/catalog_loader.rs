//! Catalog file resolution.
//!
//! Every persona's reference data goes through the same funnel: try an
//! ordered list of candidate paths, take the first file that exists and
//! parses, and otherwise fall back to the built-in dataset. Loading never
//! fails; a bad file costs a warning, not the session.

use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use cameo_core::config::RootConfig;

use crate::paths::CameoPaths;

/// Resolves one catalog from its candidate paths.
///
/// Candidates are tried in order; the first existing, readable, parseable
/// file wins. Unreadable or malformed candidates are skipped with a
/// warning so a typo in one path cannot shadow a good file further down
/// the list.
pub fn resolve_catalog<T: DeserializeOwned>(
    candidates: &[PathBuf],
    fallback: T,
    label: &str,
) -> T {
    for candidate in candidates {
        if !candidate.exists() {
            continue;
        }
        let content = match fs::read_to_string(candidate) {
            Ok(content) => content,
            Err(e) => {
                warn!(catalog = label, path = %candidate.display(), error = %e, "skipping unreadable catalog file");
                continue;
            }
        };
        match serde_json::from_str(&content) {
            Ok(parsed) => {
                debug!(catalog = label, path = %candidate.display(), "catalog loaded");
                return parsed;
            }
            Err(e) => {
                warn!(catalog = label, path = %candidate.display(), error = %e, "skipping malformed catalog file");
            }
        }
    }
    debug!(catalog = label, "using built-in dataset");
    fallback
}

/// The candidate list for a catalog file name.
///
/// Order: configured catalog directory, then `./data` in the working
/// directory, then the platform data directory.
pub fn candidate_paths(config: &RootConfig, file_name: &str) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(dir) = &config.catalog_dir {
        candidates.push(dir.join(file_name));
    }
    candidates.push(PathBuf::from("data").join(file_name));
    if let Ok(dir) = CameoPaths::catalogs_dir(config) {
        candidates.push(dir.join(file_name));
    }
    candidates
}
