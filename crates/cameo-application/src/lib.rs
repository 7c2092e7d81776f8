//! Application layer for Cameo.
//!
//! Composes the domain, infrastructure and interaction crates into
//! runnable sessions: catalog loading, persona wiring, and the
//! conversation loop a front end drives.

pub mod catalogs;
pub mod session_service;

pub use catalogs::CatalogSet;
pub use session_service::{OpenSession, SessionService};
