//! Persona presets and handoff rules.

pub mod model;
pub mod preset;

pub use model::{allowed_handoffs, validate_handoff, CatalogKind, Handoff, Persona, PersonaKind};
pub use preset::{default_presets, preset_for};
