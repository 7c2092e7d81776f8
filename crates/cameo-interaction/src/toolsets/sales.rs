//! Lead capture and FAQ tools for the sales rep.

use std::sync::Arc;

use async_trait::async_trait;

use cameo_core::archive::ArchiveRepository;
use cameo_core::catalog::{FaqHit, FaqSheet};
use cameo_core::error::Result;

use crate::tool::{
    optional_str, required_str, unknown_tool, ParamSpec, ToolCall, ToolContext, ToolReply,
    ToolSpec, Toolset,
};

const SPECS: &[ToolSpec] = &[
    ToolSpec {
        name: "update_lead",
        description: "Record one lead detail as the caller shares it.",
        params: &[
            ParamSpec::required(
                "field",
                "One of: name, company, email, role, use_case, team_size, timeline.",
            ),
            ParamSpec::required("value", "The detail, verbatim."),
        ],
    },
    ToolSpec {
        name: "lookup_faq",
        description: "Answer a product question from the FAQ sheet.",
        params: &[ParamSpec::required("query", "The caller's question.")],
    },
    ToolSpec {
        name: "save_lead",
        description: "Save the captured lead. Call once, when the call winds down.",
        params: &[ParamSpec::optional(
            "summary",
            "Optional one-line summary to store instead of the field list.",
        )],
    },
];

pub struct SalesToolset {
    faq: Arc<FaqSheet>,
    archive: Arc<dyn ArchiveRepository>,
}

impl SalesToolset {
    pub fn new(faq: Arc<FaqSheet>, archive: Arc<dyn ArchiveRepository>) -> Self {
        Self { faq, archive }
    }
}

#[async_trait]
impl Toolset for SalesToolset {
    fn specs(&self) -> &'static [ToolSpec] {
        SPECS
    }

    async fn handle(&self, ctx: &mut ToolContext<'_>, call: &ToolCall) -> Result<ToolReply> {
        match call.name.as_str() {
            "update_lead" => {
                let field = required_str(call, "field")?;
                let value = required_str(call, "value")?;
                ctx.session.state.set(field, value)?;
                Ok(ToolReply::say(format!("Got it, {field} noted.")))
            }
            "lookup_faq" => {
                let query = required_str(call, "query")?;
                let reply = match self.faq.find_by_keyword(query) {
                    FaqHit::Entry(entry) => entry.answer.clone(),
                    FaqHit::Overview {
                        description,
                        pricing,
                    } => format!("{description} {pricing}"),
                };
                Ok(ToolReply::say(reply))
            }
            "save_lead" => {
                if ctx.session.state.is_empty() {
                    return Ok(ToolReply::say(
                        "I haven't captured any details yet, so there's nothing to save.",
                    ));
                }
                let summary = optional_str(call, "summary")
                    .map(str::to_string)
                    .unwrap_or_else(|| ctx.session.state.summary_line());
                let id = self
                    .archive
                    .append(&summary, ctx.session.state.snapshot())
                    .await?;
                ctx.session.state.reset();
                Ok(ToolReply::say(format!(
                    "Lead saved (record {id}). Someone will follow up shortly."
                )))
            }
            _ => Err(unknown_tool("sales", call)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cameo_core::catalog::preset::default_faq_sheet;
    use cameo_core::fraud::VerificationFlow;
    use cameo_core::persona::PersonaKind;
    use cameo_core::session::Session;
    use cameo_infrastructure::JsonArchiveRepository;
    use serde_json::json;
    use tempfile::TempDir;

    fn toolset(dir: &TempDir) -> SalesToolset {
        SalesToolset::new(
            Arc::new(default_faq_sheet()),
            Arc::new(JsonArchiveRepository::new(dir.path().join("leads.json"))),
        )
    }

    async fn call(
        toolset: &SalesToolset,
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
    async fn test_lead_fields_overwrite_on_correction() {
        let dir = TempDir::new().unwrap();
        let toolset = toolset(&dir);
        let mut session = Session::new(PersonaKind::SalesRep);

        call(&toolset, &mut session, "update_lead", json!({"field": "email", "value": "dana@acme.io"}))
            .await
            .unwrap();
        call(&toolset, &mut session, "update_lead", json!({"field": "email", "value": "dana@acme.com"}))
            .await
            .unwrap();

        assert_eq!(
            session.state.get("email").unwrap().as_text(),
            Some("dana@acme.com")
        );
    }

    #[tokio::test]
    async fn test_faq_entry_and_overview_fallback() {
        let dir = TempDir::new().unwrap();
        let toolset = toolset(&dir);
        let mut session = Session::new(PersonaKind::SalesRep);

        let entry = call(&toolset, &mut session, "lookup_faq", json!({"query": "is there a free trial"}))
            .await
            .unwrap();
        assert!(entry.text.contains("14 day trial"));

        // No FAQ entry mentions pricing directly; the overview answers.
        let overview = call(&toolset, &mut session, "lookup_faq", json!({"query": "pricing"}))
            .await
            .unwrap();
        assert!(overview.text.contains("$49"));
    }

    #[tokio::test]
    async fn test_save_lead_uses_summary_override() {
        let dir = TempDir::new().unwrap();
        let toolset = toolset(&dir);
        let mut session = Session::new(PersonaKind::SalesRep);

        call(&toolset, &mut session, "update_lead", json!({"field": "name", "value": "Dana"}))
            .await
            .unwrap();
        call(
            &toolset,
            &mut session,
            "save_lead",
            json!({"summary": "Dana from Acme, wants weekly digests"}),
        )
        .await
        .unwrap();

        let records = toolset.archive.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].summary, "Dana from Acme, wants weekly digests");
        assert!(session.state.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_lead_field_rejected() {
        let dir = TempDir::new().unwrap();
        let toolset = toolset(&dir);
        let mut session = Session::new(PersonaKind::SalesRep);

        let err = call(
            &toolset,
            &mut session,
            "update_lead",
            json!({"field": "budget", "value": "$10k"}),
        )
        .await
        .unwrap_err();
        assert!(err.is_unknown_field());
    }
}
