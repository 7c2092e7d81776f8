//! A single live conversation.

use chrono::Utc;
use uuid::Uuid;

use crate::persona::{preset_for, Persona, PersonaKind};
use crate::state::{SessionState, StateSchema};

/// Who produced a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Agent,
    Tool,
}

/// One utterance or tool result in the transcript.
#[derive(Debug, Clone)]
pub struct TurnRecord {
    pub role: TurnRole,
    pub content: String,
    pub timestamp: String,
}

/// One running session: identity, captured state, and transcript.
///
/// Sessions live in memory only; what survives them is the archive record
/// written at close. Each session is exclusively owned by its runtime, so
/// state mutation needs no locking.
#[derive(Debug)]
pub struct Session {
    pub id: String,
    pub persona: PersonaKind,
    pub created_at: String,
    pub updated_at: String,
    pub state: SessionState,
    pub transcript: Vec<TurnRecord>,
}

impl Session {
    /// Opens a fresh session for a persona, with every field unset.
    pub fn new(kind: PersonaKind) -> Self {
        let persona = preset_for(kind);
        let now = Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            persona: kind,
            created_at: now.clone(),
            updated_at: now,
            state: SessionState::new(StateSchema::new(persona.domain, persona.fields)),
            transcript: Vec::new(),
        }
    }

    /// The preset backing this session.
    pub fn preset(&self) -> &'static Persona {
        preset_for(self.persona)
    }

    /// Appends a transcript turn and bumps the update time.
    pub fn record_turn(&mut self, role: TurnRole, content: impl Into<String>) {
        let now = Utc::now().to_rfc3339();
        self.transcript.push(TurnRecord {
            role,
            content: content.into(),
            timestamp: now.clone(),
        });
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new(PersonaKind::WellnessGuide);
        assert!(session.state.is_empty());
        assert!(session.transcript.is_empty());
        assert_eq!(session.preset().kind, PersonaKind::WellnessGuide);
    }

    #[test]
    fn test_sessions_get_unique_ids() {
        let a = Session::new(PersonaKind::GameMaster);
        let b = Session::new(PersonaKind::GameMaster);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_record_turn_updates_timestamp() {
        let mut session = Session::new(PersonaKind::SalesRep);
        session.record_turn(TurnRole::User, "hello");
        assert_eq!(session.transcript.len(), 1);
        assert!(session.updated_at >= session.created_at);
    }

    #[test]
    fn test_state_follows_persona_schema() {
        let mut session = Session::new(PersonaKind::SalesRep);
        assert!(session.state.set("company", "Acme").is_ok());
        assert!(session.state.set("mood", "good").is_err());
    }
}
