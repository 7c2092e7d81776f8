//! Check-in tools for the wellness guide.

use std::sync::Arc;

use async_trait::async_trait;

use cameo_core::archive::ArchiveRepository;
use cameo_core::error::Result;
use cameo_core::state::FieldValue;

use crate::tool::{
    required_str, unknown_tool, ParamSpec, ToolCall, ToolContext, ToolReply, ToolSpec, Toolset,
};

const SPECS: &[ToolSpec] = &[
    ToolSpec {
        name: "update_checkin",
        description: "Record one check-in field (mood, energy, or stress).",
        params: &[
            ParamSpec::required("field", "Which field: mood, energy, or stress."),
            ParamSpec::required("value", "The caller's answer in their own words."),
        ],
    },
    ToolSpec {
        name: "add_goal",
        description: "Add one goal for today.",
        params: &[ParamSpec::required("goal", "The goal, short and concrete.")],
    },
    ToolSpec {
        name: "recall_last",
        description: "Fetch the caller's most recent saved check-in.",
        params: &[],
    },
    ToolSpec {
        name: "save_checkin",
        description: "Save today's check-in. Call once, at the end.",
        params: &[],
    },
];

pub struct WellnessToolset {
    archive: Arc<dyn ArchiveRepository>,
}

impl WellnessToolset {
    pub fn new(archive: Arc<dyn ArchiveRepository>) -> Self {
        Self { archive }
    }
}

#[async_trait]
impl Toolset for WellnessToolset {
    fn specs(&self) -> &'static [ToolSpec] {
        SPECS
    }

    async fn handle(&self, ctx: &mut ToolContext<'_>, call: &ToolCall) -> Result<ToolReply> {
        match call.name.as_str() {
            "update_checkin" => {
                let field = required_str(call, "field")?;
                let value = required_str(call, "value")?;
                ctx.session.state.set(field, value)?;
                Ok(ToolReply::say(format!("Noted, {field} is {value}.")))
            }
            "add_goal" => {
                let goal = required_str(call, "goal")?;
                let stored = ctx.session.state.set("goals", goal)?;
                let count = match stored {
                    FieldValue::Items(items) => items.len(),
                    FieldValue::Text(_) => 1,
                };
                Ok(ToolReply::say(format!(
                    "Added. That makes {count} goal{} for today.",
                    if count == 1 { "" } else { "s" }
                )))
            }
            "recall_last" => match self.archive.latest().await? {
                Some(record) => Ok(ToolReply::say(format!(
                    "Last time you said: {}.",
                    record.summary
                ))),
                None => Ok(ToolReply::say(
                    "This looks like your first check-in with me.",
                )),
            },
            "save_checkin" => {
                if ctx.session.state.is_empty() {
                    return Ok(ToolReply::say(
                        "There's nothing to save yet. Let's finish the check-in first.",
                    ));
                }
                let summary = ctx.session.state.summary_line();
                let id = self
                    .archive
                    .append(&summary, ctx.session.state.snapshot())
                    .await?;
                ctx.session.state.reset();
                Ok(ToolReply::say(format!(
                    "Saved today's check-in (entry {id}). Well done showing up."
                )))
            }
            _ => Err(unknown_tool("wellness", call)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cameo_core::fraud::VerificationFlow;
    use cameo_core::persona::PersonaKind;
    use cameo_core::session::Session;
    use cameo_infrastructure::JsonArchiveRepository;
    use serde_json::json;
    use tempfile::TempDir;

    fn toolset(dir: &TempDir) -> WellnessToolset {
        WellnessToolset::new(Arc::new(JsonArchiveRepository::new(
            dir.path().join("checkins.json"),
        )))
    }

    async fn call(
        toolset: &WellnessToolset,
        session: &mut Session,
        name: &str,
        args: serde_json::Value,
    ) -> Result<ToolReply> {
        let mut flow = VerificationFlow::new();
        let mut ctx = ToolContext {
            session,
            flow: &mut flow,
        };
        toolset.handle(&mut ctx, &ToolCall::new(name, args)).await
    }

    #[tokio::test]
    async fn test_update_and_goals_capture_state() {
        let dir = TempDir::new().unwrap();
        let toolset = toolset(&dir);
        let mut session = Session::new(PersonaKind::WellnessGuide);

        call(&toolset, &mut session, "update_checkin", json!({"field": "mood", "value": "steady"}))
            .await
            .unwrap();
        call(&toolset, &mut session, "add_goal", json!({"goal": "walk at lunch"}))
            .await
            .unwrap();
        let reply = call(&toolset, &mut session, "add_goal", json!({"goal": "sleep by 11"}))
            .await
            .unwrap();

        assert!(reply.text.contains("2 goals"));
        assert_eq!(
            session.state.get("mood").unwrap().as_text(),
            Some("steady")
        );
        assert_eq!(
            session.state.get("goals").unwrap().as_items().unwrap().len(),
            2
        );
    }

    #[tokio::test]
    async fn test_unknown_field_does_not_mutate() {
        let dir = TempDir::new().unwrap();
        let toolset = toolset(&dir);
        let mut session = Session::new(PersonaKind::WellnessGuide);

        let err = call(
            &toolset,
            &mut session,
            "update_checkin",
            json!({"field": "favorite_color", "value": "blue"}),
        )
        .await
        .unwrap_err();

        assert!(err.is_unknown_field());
        assert!(session.state.is_empty());
    }

    #[tokio::test]
    async fn test_save_resets_state_and_archives_once() {
        let dir = TempDir::new().unwrap();
        let toolset = toolset(&dir);
        let mut session = Session::new(PersonaKind::WellnessGuide);

        call(&toolset, &mut session, "update_checkin", json!({"field": "energy", "value": "low"}))
            .await
            .unwrap();
        let reply = call(&toolset, &mut session, "save_checkin", json!({}))
            .await
            .unwrap();

        assert!(reply.text.contains("Saved"));
        assert!(session.state.is_empty());

        let records = toolset.archive.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].summary, "energy: low");
    }

    #[tokio::test]
    async fn test_save_with_nothing_captured_declines() {
        let dir = TempDir::new().unwrap();
        let toolset = toolset(&dir);
        let mut session = Session::new(PersonaKind::WellnessGuide);

        let reply = call(&toolset, &mut session, "save_checkin", json!({}))
            .await
            .unwrap();
        assert!(reply.text.contains("nothing to save"));
        assert!(toolset.archive.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recall_reads_previous_save() {
        let dir = TempDir::new().unwrap();
        let toolset = toolset(&dir);
        let mut session = Session::new(PersonaKind::WellnessGuide);

        let first = call(&toolset, &mut session, "recall_last", json!({}))
            .await
            .unwrap();
        assert!(first.text.contains("first check-in"));

        call(&toolset, &mut session, "update_checkin", json!({"field": "mood", "value": "bright"}))
            .await
            .unwrap();
        call(&toolset, &mut session, "save_checkin", json!({})).await.unwrap();

        let second = call(&toolset, &mut session, "recall_last", json!({}))
            .await
            .unwrap();
        assert!(second.text.contains("mood: bright"));
    }

    #[tokio::test]
    async fn test_unknown_tool_name_is_invalid_argument() {
        let dir = TempDir::new().unwrap();
        let toolset = toolset(&dir);
        let mut session = Session::new(PersonaKind::WellnessGuide);

        let err = call(&toolset, &mut session, "dance", json!({})).await.unwrap_err();
        assert!(err.to_string().contains("dance"));
    }
}
