//! Field schemas for session state.
//!
//! Every persona owns a fixed, enumerated set of fields it is allowed to
//! capture during a conversation. The schema is the contract the dialogue
//! driver's tool calls are checked against: a field outside the schema is
//! rejected before anything mutates.

use serde::{Deserialize, Serialize};

/// Whether a field holds one value or accumulates many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// A single value; setting again overwrites.
    Scalar,
    /// An ordered list; setting again appends.
    List,
}

/// One named slot in a persona's state schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name as it appears in tool arguments and archived payloads.
    pub name: &'static str,
    /// Scalar or list semantics.
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Declares a scalar field.
    pub const fn scalar(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Scalar,
        }
    }

    /// Declares a list field.
    pub const fn list(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::List,
        }
    }
}

/// The fixed field set for one conversational domain.
///
/// Schemas are defined once per persona preset and never change at runtime.
/// Field order is meaningful: snapshots and summaries iterate in declaration
/// order so archived records read the way the schema was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateSchema {
    domain: &'static str,
    fields: &'static [FieldSpec],
}

impl StateSchema {
    /// Creates a schema over a static field list.
    pub const fn new(domain: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self { domain, fields }
    }

    /// The domain label used in error messages ("lead", "checkin", ...).
    pub fn domain(&self) -> &'static str {
        self.domain
    }

    /// All fields in declaration order.
    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Looks up a field by exact name.
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    /// True when the schema has no fields at all (chat-history-only personas).
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
