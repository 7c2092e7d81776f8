//! Persona domain model.
//!
//! A persona bundles everything one demo agent needs: the instruction
//! prompt, the voice it speaks with, the state schema it may capture, and
//! where (if anywhere) finished sessions are archived.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::{CameoError, Result};
use crate::state::FieldSpec;

/// The closed set of shipped personas.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PersonaKind {
    /// Survival-game narrator; chat history only, no tools.
    GameMaster,
    /// Daily check-in companion capturing mood, energy, stress, goals.
    WellnessGuide,
    /// Tutoring front desk; routes students to a subject tutor.
    TutorRouter,
    /// Single-topic tutor the router hands off to.
    SubjectTutor,
    /// Company rep qualifying inbound leads against an FAQ sheet.
    SalesRep,
    /// Bank-style reviewer walking callers through flagged transactions.
    CaseVerifier,
    /// Grocery order taker over a shelf catalog.
    GroceryClerk,
    /// Boutique storefront order taker.
    StoreAssistant,
    /// Improv scene partner logging highlights.
    ImprovHost,
}

/// Which reference catalog a persona consults, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Faq,
    Groceries,
    Storefront,
    Cases,
    Topics,
}

/// A complete persona preset.
///
/// Presets are static; nothing about a persona changes at runtime. The
/// `instructions` text is a minijinja template rendered with per-session
/// context (recall line, company name) before it reaches the driver.
#[derive(Debug, Clone, Copy)]
pub struct Persona {
    pub kind: PersonaKind,
    /// Display name used in greetings and logs.
    pub name: &'static str,
    /// Hosted TTS voice id.
    pub voice: &'static str,
    /// One-line description for persona listings.
    pub tagline: &'static str,
    /// Instruction prompt template (minijinja).
    pub instructions: &'static str,
    /// Domain label for the state schema ("lead", "checkin", ...).
    pub domain: &'static str,
    /// Fields this persona may capture. Empty for history-only personas.
    pub fields: &'static [FieldSpec],
    /// Catalog the persona's tools read from.
    pub catalog: Option<CatalogKind>,
    /// Archive file name, for personas that persist finished sessions.
    pub archive_file: Option<&'static str>,
}

impl Persona {
    /// True when finished sessions should be written to an archive.
    pub fn archives(&self) -> bool {
        self.archive_file.is_some()
    }
}

/// An agent-to-agent transfer request.
///
/// Handoffs are explicit values checked against a transition table; a
/// persona cannot transfer to an arbitrary peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handoff {
    pub to: PersonaKind,
    /// Context carried across the transfer, e.g. the chosen topic id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

impl Handoff {
    pub fn new(to: PersonaKind) -> Self {
        Self { to, topic: None }
    }

    pub fn with_topic(to: PersonaKind, topic: impl Into<String>) -> Self {
        Self {
            to,
            topic: Some(topic.into()),
        }
    }
}

/// Outgoing transitions allowed from a persona.
///
/// Only the tutoring pair transfers today; every other persona ends its
/// session without a handoff.
pub fn allowed_handoffs(from: PersonaKind) -> &'static [PersonaKind] {
    match from {
        PersonaKind::TutorRouter => &[PersonaKind::SubjectTutor],
        PersonaKind::SubjectTutor => &[PersonaKind::TutorRouter],
        _ => &[],
    }
}

/// Checks a handoff against the transition table.
pub fn validate_handoff(from: PersonaKind, handoff: &Handoff) -> Result<()> {
    if allowed_handoffs(from).contains(&handoff.to) {
        Ok(())
    } else {
        Err(CameoError::HandoffRejected {
            from: from.to_string(),
            to: handoff.to.to_string(),
        })
    }
}
