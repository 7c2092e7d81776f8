//! Schema-validated session state.

pub mod schema;
pub mod store;

pub use schema::{FieldKind, FieldSpec, StateSchema};
pub use store::{FieldValue, SessionState, StateSnapshot};
