//! In-memory session state keyed by a persona's schema.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CameoError, Result};

use super::schema::{FieldKind, StateSchema};

/// A captured field value.
///
/// Serialized untagged so archived payloads read as plain JSON: scalars as
/// strings, lists as string arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Items(Vec<String>),
}

impl FieldValue {
    /// The scalar text, if this is a scalar.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Items(_) => None,
        }
    }

    /// The list items, if this is a list.
    pub fn as_items(&self) -> Option<&[String]> {
        match self {
            Self::Text(_) => None,
            Self::Items(items) => Some(items),
        }
    }
}

/// A point-in-time copy of everything captured so far.
///
/// Keys are field names; ordering is stable (BTreeMap) so serialized
/// payloads are deterministic.
pub type StateSnapshot = BTreeMap<String, FieldValue>;

/// Mutable per-session state, validated against a fixed schema.
///
/// Scalars overwrite on repeated set; lists append. A name outside the
/// schema is rejected without touching any stored value.
#[derive(Debug, Clone)]
pub struct SessionState {
    schema: StateSchema,
    values: BTreeMap<&'static str, FieldValue>,
}

impl SessionState {
    /// Creates an empty state for the given schema.
    pub fn new(schema: StateSchema) -> Self {
        Self {
            schema,
            values: BTreeMap::new(),
        }
    }

    /// The schema this state is validated against.
    pub fn schema(&self) -> &StateSchema {
        &self.schema
    }

    /// Sets a field, returning the stored value for the field afterwards.
    ///
    /// Scalar fields replace the previous value. List fields append, so the
    /// returned value carries every item captured so far. Unknown field
    /// names yield [`CameoError::UnknownField`] and leave the state as it
    /// was.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<&FieldValue> {
        let spec = self
            .schema
            .field(name)
            .ok_or_else(|| CameoError::unknown_field(self.schema.domain(), name))?;

        let value = value.into();
        let entry = match spec.kind {
            FieldKind::Scalar => self
                .values
                .entry(spec.name)
                .and_modify(|existing| *existing = FieldValue::Text(value.clone()))
                .or_insert(FieldValue::Text(value)),
            FieldKind::List => {
                let entry = self
                    .values
                    .entry(spec.name)
                    .or_insert_with(|| FieldValue::Items(Vec::new()));
                if let FieldValue::Items(items) = entry {
                    items.push(value);
                }
                entry
            }
        };
        Ok(entry)
    }

    /// The current value of a field, if it has been set.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// True when nothing has been captured.
    ///
    /// A list field that was created but holds no items counts as empty.
    pub fn is_empty(&self) -> bool {
        self.values.values().all(|value| match value {
            FieldValue::Text(_) => false,
            FieldValue::Items(items) => items.is_empty(),
        })
    }

    /// Copies every captured field into an owned snapshot.
    ///
    /// Unset scalars and empty lists are skipped, so the snapshot holds
    /// exactly what the conversation produced.
    pub fn snapshot(&self) -> StateSnapshot {
        self.values
            .iter()
            .filter(|(_, value)| match value {
                FieldValue::Text(_) => true,
                FieldValue::Items(items) => !items.is_empty(),
            })
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect()
    }

    /// Drops every captured value, keeping the schema.
    pub fn reset(&mut self) {
        self.values.clear();
    }

    /// One-line summary in schema declaration order, for archive records
    /// and end-of-call readbacks.
    ///
    /// Example: `name: Dana, company: Acme, goals: [ship v2, hire SRE]`.
    pub fn summary_line(&self) -> String {
        let mut parts = Vec::new();
        for spec in self.schema.fields() {
            match self.values.get(spec.name) {
                Some(FieldValue::Text(text)) => {
                    parts.push(format!("{}: {}", spec.name, text));
                }
                Some(FieldValue::Items(items)) if !items.is_empty() => {
                    parts.push(format!("{}: [{}]", spec.name, items.join(", ")));
                }
                _ => {}
            }
        }
        parts.join(", ")
    }
}
