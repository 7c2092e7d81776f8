//! The per-session runtime: owns the session, routes tool calls, and
//! settles the archive at close.
//!
//! A tool failure must never kill a live conversation. `dispatch` maps
//! every error onto a spoken fallback: honest about what happened (a
//! failed save is reported as a failed save, never as success) but
//! always speakable. Only the logs carry the underlying error.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use cameo_core::archive::ArchiveRepository;
use cameo_core::error::CameoError;
use cameo_core::fraud::VerificationFlow;
use cameo_core::persona::{validate_handoff, Persona};
use cameo_core::session::{Session, TurnRole};

use crate::tool::{ToolCall, ToolContext, ToolReply, ToolSpec, Toolset};
use crate::usage::UsageCollector;

/// What happened when a session closed.
#[derive(Debug, Clone)]
pub struct CloseReport {
    /// Archive record id, when closing wrote one.
    pub archived: Option<u64>,
    /// Why the close-time archive failed, when it did.
    pub save_error: Option<String>,
    /// Rendered usage line for the session.
    pub usage: String,
}

/// Drives one conversation for one persona.
pub struct SessionRuntime {
    session: Session,
    flow: VerificationFlow,
    toolset: Option<Arc<dyn Toolset>>,
    archive: Option<Arc<dyn ArchiveRepository>>,
    usage: UsageCollector,
}

impl SessionRuntime {
    pub fn new(
        session: Session,
        toolset: Option<Arc<dyn Toolset>>,
        archive: Option<Arc<dyn ArchiveRepository>>,
    ) -> Self {
        Self {
            session,
            flow: VerificationFlow::new(),
            toolset,
            archive,
            usage: UsageCollector::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn persona(&self) -> &'static Persona {
        self.session.preset()
    }

    pub fn usage(&self) -> &UsageCollector {
        &self.usage
    }

    /// The tool surface to advertise to the driver.
    pub fn specs(&self) -> &'static [ToolSpec] {
        self.toolset.as_ref().map(|t| t.specs()).unwrap_or(&[])
    }

    pub fn record_user_turn(&mut self, text: &str) {
        self.usage.record_user_turn();
        self.session.record_turn(TurnRole::User, text);
    }

    pub fn record_agent_turn(&mut self, text: &str) {
        self.usage.record_agent_turn();
        self.session.record_turn(TurnRole::Agent, text);
    }

    /// Executes one tool call, absorbing failures into spoken replies.
    ///
    /// Handoffs are checked against the persona transition table here, so
    /// a toolset bug cannot teleport the caller somewhere unreachable.
    pub async fn dispatch(&mut self, call: &ToolCall) -> ToolReply {
        self.usage.record_tool_call(&call.name);
        debug!(tool = %call.name, persona = %self.session.persona, "tool call");

        let Some(toolset) = self.toolset.clone() else {
            return ToolReply::say(
                "I don't have any tools on this line; let's just keep talking.",
            );
        };

        let mut ctx = ToolContext {
            session: &mut self.session,
            flow: &mut self.flow,
        };
        let reply = match toolset.handle(&mut ctx, call).await {
            Ok(reply) => reply,
            Err(err) => fallback_reply(&call.name, err),
        };

        let reply = match &reply.handoff {
            Some(handoff) => match validate_handoff(self.session.persona, handoff) {
                Ok(()) => reply,
                Err(err) => {
                    warn!(%err, "toolset proposed a handoff outside the transition table");
                    ToolReply::say("I can't transfer you from here, but I'm happy to keep going.")
                }
            },
            None => reply,
        };

        self.session.record_turn(TurnRole::Tool, &reply.text);
        reply
    }

    /// Ends the session, archiving captured state when the persona keeps
    /// an archive and the conversation produced anything.
    ///
    /// State is cleared after a successful write, so closing twice (or
    /// closing after an explicit in-call save) never duplicates a record.
    pub async fn close(&mut self) -> CloseReport {
        let mut archived = None;
        let mut save_error = None;

        if self.persona().archives() && !self.session.state.is_empty() {
            if let Some(archive) = &self.archive {
                match archive
                    .append(&self.session.state.summary_line(), self.session.state.snapshot())
                    .await
                {
                    Ok(id) => {
                        archived = Some(id);
                        self.session.state.reset();
                    }
                    Err(err) => {
                        error!(%err, "close-time archive write failed");
                        save_error = Some(err.to_string());
                    }
                }
            }
        }

        let usage = self.usage.to_string();
        info!(
            session = %self.session.id,
            persona = %self.session.persona,
            %usage,
            "session closed"
        );
        CloseReport {
            archived,
            save_error,
            usage,
        }
    }
}

/// Maps a tool error onto something the agent can say out loud.
fn fallback_reply(tool: &str, err: CameoError) -> ToolReply {
    let text = match &err {
        CameoError::UnknownField { field, .. } => {
            warn!(tool, %err, "tool call rejected");
            format!("I couldn't note that down; '{field}' isn't something I track here.")
        }
        CameoError::NotFound { .. } => {
            warn!(tool, %err, "tool call missed");
            "I couldn't find that in my records.".to_string()
        }
        // Flow guards produce speakable messages already.
        CameoError::FlowViolation(message) => {
            warn!(tool, %err, "verification flow guard tripped");
            message.clone()
        }
        CameoError::InvalidArgument { .. } => {
            warn!(tool, %err, "tool call malformed");
            "I didn't catch the details I need for that; could you say it again?".to_string()
        }
        _ if err.is_storage() => {
            error!(tool, %err, "storage failure during tool call");
            "I couldn't save that just now; your details were not stored.".to_string()
        }
        _ => {
            error!(tool, %err, "tool call failed");
            "Something went wrong on my end with that one.".to_string()
        }
    };
    ToolReply::say(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cameo_core::archive::ArchiveRecord;
    use cameo_core::catalog::preset::default_topic_list;
    use cameo_core::error::Result;
    use cameo_core::persona::{Handoff, PersonaKind};
    use cameo_core::state::StateSnapshot;
    use cameo_infrastructure::JsonArchiveRepository;
    use serde_json::json;
    use tempfile::TempDir;

    use crate::toolsets::{TutorRole, TutorToolset, WellnessToolset};

    struct FailingArchive;

    #[async_trait]
    impl ArchiveRepository for FailingArchive {
        async fn append(&self, _summary: &str, _payload: StateSnapshot) -> Result<u64> {
            Err(CameoError::storage_write("disk full"))
        }

        async fn list_all(&self) -> Result<Vec<ArchiveRecord>> {
            Ok(Vec::new())
        }
    }

    struct RogueToolset;

    #[async_trait]
    impl Toolset for RogueToolset {
        fn specs(&self) -> &'static [ToolSpec] {
            &[]
        }

        async fn handle(&self, _ctx: &mut ToolContext<'_>, _call: &ToolCall) -> Result<ToolReply> {
            Ok(ToolReply::with_handoff(
                "Transferring you to improv!",
                Handoff::new(PersonaKind::ImprovHost),
            ))
        }
    }

    fn wellness_runtime(dir: &TempDir) -> SessionRuntime {
        let archive: Arc<dyn ArchiveRepository> = Arc::new(JsonArchiveRepository::new(
            dir.path().join("checkins.json"),
        ));
        SessionRuntime::new(
            Session::new(PersonaKind::WellnessGuide),
            Some(Arc::new(WellnessToolset::new(archive.clone()))),
            Some(archive),
        )
    }

    #[tokio::test]
    async fn test_dispatch_without_toolset_declines() {
        let mut runtime =
            SessionRuntime::new(Session::new(PersonaKind::GameMaster), None, None);
        let reply = runtime.dispatch(&ToolCall::new("anything", json!({}))).await;
        assert!(reply.text.contains("keep talking"));
        assert_eq!(runtime.usage().total_tool_calls(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_turns_unknown_field_into_speech() {
        let dir = TempDir::new().unwrap();
        let mut runtime = wellness_runtime(&dir);

        let reply = runtime
            .dispatch(&ToolCall::new(
                "update_checkin",
                json!({"field": "shoe_size", "value": "44"}),
            ))
            .await;

        assert!(reply.text.contains("shoe_size"));
        assert!(runtime.session().state.is_empty());
        // The fallback still lands in the transcript as a tool turn.
        assert_eq!(runtime.session().transcript.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_save_is_reported_not_swallowed() {
        let archive: Arc<dyn ArchiveRepository> = Arc::new(FailingArchive);
        let mut runtime = SessionRuntime::new(
            Session::new(PersonaKind::WellnessGuide),
            Some(Arc::new(WellnessToolset::new(archive.clone()))),
            Some(archive),
        );

        runtime
            .dispatch(&ToolCall::new(
                "update_checkin",
                json!({"field": "mood", "value": "good"}),
            ))
            .await;
        let reply = runtime.dispatch(&ToolCall::new("save_checkin", json!({}))).await;

        assert!(reply.text.contains("were not stored"));
        // Failed save keeps the captured state for a retry.
        assert!(!runtime.session().state.is_empty());
    }

    #[tokio::test]
    async fn test_close_archives_once_and_only_once() {
        let dir = TempDir::new().unwrap();
        let mut runtime = wellness_runtime(&dir);

        runtime
            .dispatch(&ToolCall::new(
                "update_checkin",
                json!({"field": "mood", "value": "steady"}),
            ))
            .await;

        let first = runtime.close().await;
        assert_eq!(first.archived, Some(1));
        assert!(first.save_error.is_none());

        let second = runtime.close().await;
        assert_eq!(second.archived, None);
    }

    #[tokio::test]
    async fn test_explicit_save_then_close_writes_one_record() {
        let dir = TempDir::new().unwrap();
        let mut runtime = wellness_runtime(&dir);

        runtime
            .dispatch(&ToolCall::new(
                "update_checkin",
                json!({"field": "mood", "value": "bright"}),
            ))
            .await;
        runtime.dispatch(&ToolCall::new("save_checkin", json!({}))).await;
        let report = runtime.close().await;
        assert_eq!(report.archived, None);

        let archive = JsonArchiveRepository::new(dir.path().join("checkins.json"));
        assert_eq!(archive.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_session_archives_nothing() {
        let dir = TempDir::new().unwrap();
        let mut runtime = wellness_runtime(&dir);
        let report = runtime.close().await;
        assert_eq!(report.archived, None);
        assert!(!dir.path().join("checkins.json").exists());
    }

    #[tokio::test]
    async fn test_rogue_handoff_is_stripped() {
        let mut runtime = SessionRuntime::new(
            Session::new(PersonaKind::WellnessGuide),
            Some(Arc::new(RogueToolset)),
            None,
        );
        let reply = runtime.dispatch(&ToolCall::new("x", json!({}))).await;
        assert!(reply.handoff.is_none());
        assert!(reply.text.contains("can't transfer"));
    }

    #[tokio::test]
    async fn test_sanctioned_handoff_passes_through() {
        let mut runtime = SessionRuntime::new(
            Session::new(PersonaKind::TutorRouter),
            Some(Arc::new(TutorToolset::new(
                Arc::new(default_topic_list()),
                TutorRole::Router,
            ))),
            None,
        );
        let reply = runtime
            .dispatch(&ToolCall::new("pick_topic", json!({"topic": "fractions"})))
            .await;
        assert_eq!(
            reply.handoff.map(|h| h.to),
            Some(PersonaKind::SubjectTutor)
        );
    }

    #[tokio::test]
    async fn test_turns_are_transcribed_and_counted() {
        let mut runtime =
            SessionRuntime::new(Session::new(PersonaKind::GameMaster), None, None);
        runtime.record_user_turn("I check the door.");
        runtime.record_agent_turn("It is sealed. 3:42 left. What do you do?");

        assert_eq!(runtime.session().transcript.len(), 2);
        assert_eq!(runtime.usage().user_turns(), 1);
        assert_eq!(runtime.usage().agent_turns(), 1);

        let report = runtime.close().await;
        assert!(report.usage.contains("user_turns=1"));
    }
}
