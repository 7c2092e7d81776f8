//! Session orchestration.
//!
//! `SessionService` wires configuration, catalogs and repositories into
//! runnable sessions: it opens a runtime for a persona, renders its
//! instructions with session context, and drives the event loop against
//! a dialogue driver, following handoffs until the conversation ends.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use cameo_core::archive::ArchiveRepository;
use cameo_core::catalog::preset::default_fraud_cases;
use cameo_core::catalog::CaseRepository;
use cameo_core::config::RootConfig;
use cameo_core::persona::{preset_for, CatalogKind, Handoff, Persona, PersonaKind};
use cameo_core::session::Session;
use cameo_core::state::SessionState;
use cameo_infrastructure::catalog_loader::{candidate_paths, resolve_catalog};
use cameo_infrastructure::{CameoPaths, JsonArchiveRepository, JsonCaseRepository};
use cameo_interaction::driver::{DialogueDriver, DriverEvent};
use cameo_interaction::instructions::{render_instructions, PromptContext};
use cameo_interaction::runtime::{CloseReport, SessionRuntime};
use cameo_interaction::tool::Toolset;
use cameo_interaction::toolsets::{
    FraudToolset, ImprovToolset, OrdersToolset, SalesToolset, TutorRole, TutorToolset,
    WellnessToolset,
};

use crate::catalogs::CatalogSet;

/// A runtime paired with the instructions to configure its driver with.
pub struct OpenSession {
    pub runtime: SessionRuntime,
    pub instructions: String,
}

/// Builds and drives persona sessions.
pub struct SessionService {
    config: RootConfig,
    catalogs: CatalogSet,
    cases: Arc<dyn CaseRepository>,
}

impl SessionService {
    /// Wires the service from a loaded configuration.
    ///
    /// Catalogs resolve immediately; the fraud case working copy lives in
    /// the data directory, seeded from the cases catalog on first write.
    pub fn new(config: RootConfig) -> Result<Self> {
        let catalogs = CatalogSet::load(&config);
        let case_seed = resolve_catalog(
            &candidate_paths(&config, &config.catalogs.cases),
            default_fraud_cases(),
            "cases",
        );
        let cases_file =
            CameoPaths::cases_file(&config).context("resolving the case file path")?;
        let cases: Arc<dyn CaseRepository> =
            Arc::new(JsonCaseRepository::new(cases_file, case_seed));
        Ok(Self {
            config,
            catalogs,
            cases,
        })
    }

    pub fn config(&self) -> &RootConfig {
        &self.config
    }

    pub fn catalogs(&self) -> &CatalogSet {
        &self.catalogs
    }

    pub fn cases(&self) -> &Arc<dyn CaseRepository> {
        &self.cases
    }

    /// Opens a fresh session for a persona.
    pub async fn open(&self, kind: PersonaKind) -> Result<OpenSession> {
        self.open_session(kind, None, None).await
    }

    /// Archive records for a persona, newest last.
    pub async fn archive_records(
        &self,
        kind: PersonaKind,
    ) -> Result<Vec<cameo_core::archive::ArchiveRecord>> {
        match self.archive_for(preset_for(kind))? {
            Some(archive) => Ok(archive.list_all().await?),
            None => Ok(Vec::new()),
        }
    }

    /// Runs one conversation to completion, following handoffs.
    ///
    /// The driver is reconfigured after each handoff with the next
    /// persona's instructions and tool surface. Returns the close report
    /// of the final persona leg.
    pub async fn run(
        &self,
        kind: PersonaKind,
        driver: &mut dyn DialogueDriver,
    ) -> Result<CloseReport> {
        let mut open = self.open(kind).await?;
        loop {
            driver
                .configure(&open.instructions, open.runtime.specs())
                .await?;

            let mut pending_handoff: Option<Handoff> = None;
            while let Some(event) = driver.next_event().await? {
                match event {
                    DriverEvent::UserTurn(text) => open.runtime.record_user_turn(&text),
                    DriverEvent::AgentTurn(text) => open.runtime.record_agent_turn(&text),
                    DriverEvent::ToolInvocation(call) => {
                        let reply = open.runtime.dispatch(&call).await;
                        driver.deliver(&reply.text).await?;
                        if reply.session_done {
                            return Ok(open.runtime.close().await);
                        }
                        if let Some(handoff) = reply.handoff {
                            pending_handoff = Some(handoff);
                            break;
                        }
                    }
                    DriverEvent::Closed => {
                        return Ok(open.runtime.close().await);
                    }
                }
            }

            match pending_handoff {
                Some(handoff) => {
                    open = self.transfer(open, handoff).await?;
                }
                // Driver exhausted without an explicit close.
                None => return Ok(open.runtime.close().await),
            }
        }
    }

    /// Moves a conversation to the handoff target.
    ///
    /// Captured state carries over when the two personas share a state
    /// domain (the tutoring pair); otherwise the next leg starts clean.
    async fn transfer(&self, open: OpenSession, handoff: Handoff) -> Result<OpenSession> {
        let from = open.runtime.persona();
        let to = preset_for(handoff.to);
        let carried =
            (from.domain == to.domain).then(|| open.runtime.session().state.clone());
        info!(from = %from.kind, to = %to.kind, "persona handoff");
        self.open_session(handoff.to, handoff.topic, carried).await
    }

    async fn open_session(
        &self,
        kind: PersonaKind,
        topic: Option<String>,
        carried: Option<SessionState>,
    ) -> Result<OpenSession> {
        let persona = preset_for(kind);
        let archive = self.archive_for(persona)?;

        let mut session = Session::new(kind);
        if let Some(state) = carried {
            session.state = state;
        }

        let context = self.prompt_context(persona, archive.as_deref(), topic).await;
        let instructions = render_instructions(persona, &context);
        let toolset = self.toolset_for(kind, archive.clone());

        Ok(OpenSession {
            runtime: SessionRuntime::new(session, toolset, archive),
            instructions,
        })
    }

    fn archive_for(&self, persona: &Persona) -> Result<Option<Arc<dyn ArchiveRepository>>> {
        let Some(file_name) = persona.archive_file else {
            return Ok(None);
        };
        let path = CameoPaths::archive_file(&self.config, file_name)
            .context("resolving the archive path")?;
        Ok(Some(Arc::new(JsonArchiveRepository::new(path))))
    }

    fn toolset_for(
        &self,
        kind: PersonaKind,
        archive: Option<Arc<dyn ArchiveRepository>>,
    ) -> Option<Arc<dyn Toolset>> {
        match kind {
            PersonaKind::GameMaster => None,
            PersonaKind::WellnessGuide => Some(Arc::new(WellnessToolset::new(archive?))),
            PersonaKind::TutorRouter => Some(Arc::new(TutorToolset::new(
                self.catalogs.topics.clone(),
                TutorRole::Router,
            ))),
            PersonaKind::SubjectTutor => Some(Arc::new(TutorToolset::new(
                self.catalogs.topics.clone(),
                TutorRole::Subject,
            ))),
            PersonaKind::SalesRep => Some(Arc::new(SalesToolset::new(
                self.catalogs.faq.clone(),
                archive?,
            ))),
            PersonaKind::CaseVerifier => Some(Arc::new(FraudToolset::new(self.cases.clone()))),
            PersonaKind::GroceryClerk => Some(Arc::new(OrdersToolset::new(
                self.catalogs.groceries.clone(),
                archive?,
                "Hillside Market",
            ))),
            PersonaKind::StoreAssistant => Some(Arc::new(OrdersToolset::new(
                self.catalogs.storefront.clone(),
                archive?,
                "Fern & Brass",
            ))),
            PersonaKind::ImprovHost => Some(Arc::new(ImprovToolset::new())),
        }
    }

    /// Context for instruction rendering: recall line from the newest
    /// archive record, company identity for FAQ personas, handoff topic.
    async fn prompt_context(
        &self,
        persona: &Persona,
        archive: Option<&dyn ArchiveRepository>,
        topic: Option<String>,
    ) -> PromptContext {
        let mut context = PromptContext::default().with_topic(topic);
        if persona.catalog == Some(CatalogKind::Faq) {
            context = context.with_company(
                self.catalogs.faq.company.clone(),
                self.catalogs.faq.tagline.clone(),
            );
        }
        if let Some(archive) = archive {
            match archive.latest().await {
                Ok(Some(record)) => context.recall = Some(record.summary),
                Ok(None) => {}
                Err(err) => {
                    warn!(persona = %persona.kind, %err, "could not read archive for recall");
                }
            }
        }
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cameo_core::catalog::CaseStatus;
    use cameo_interaction::driver::ScriptedDriver;
    use cameo_interaction::tool::ToolCall;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn service(dir: &TempDir) -> SessionService {
        let mut config = RootConfig::default();
        config.data_dir = Some(dir.path().to_path_buf());
        // Keep catalog resolution inside the sandbox too.
        config.catalog_dir = Some(dir.path().join("catalogs"));
        SessionService::new(config).unwrap()
    }

    fn tool(name: &str, args: serde_json::Value) -> DriverEvent {
        DriverEvent::ToolInvocation(ToolCall::new(name, args))
    }

    #[tokio::test]
    async fn test_wellness_run_archives_at_close_and_recalls_next_time() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);

        let mut driver = ScriptedDriver::new([
            DriverEvent::UserTurn("hi, checking in".to_string()),
            tool("update_checkin", json!({"field": "mood", "value": "good"})),
            tool("add_goal", json!({"goal": "walk at lunch"})),
            DriverEvent::Closed,
        ]);
        let report = service
            .run(PersonaKind::WellnessGuide, &mut driver)
            .await
            .unwrap();

        assert_eq!(report.archived, Some(1));
        assert!(report.save_error.is_none());
        assert!(dir.path().join("archives/checkins.json").exists());

        // The next session opens with a recall line rendered in.
        let mut second = ScriptedDriver::new([DriverEvent::Closed]);
        service
            .run(PersonaKind::WellnessGuide, &mut second)
            .await
            .unwrap();
        let instructions = second.instructions.unwrap();
        assert!(instructions.contains("mood: good"));
        assert!(instructions.contains("walk at lunch"));
    }

    #[tokio::test]
    async fn test_tutor_handoff_reconfigures_and_carries_state() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);

        let mut driver = ScriptedDriver::new([
            tool("set_student_name", json!({"name": "Priya"})),
            tool("pick_topic", json!({"topic": "fractions"})),
            // These land on the subject tutor after the transfer.
            tool("topic_summary", json!({})),
            tool("log_practice", json!({"question": "Which is larger, 3/4 or 2/3?"})),
            DriverEvent::Closed,
        ]);
        let report = service
            .run(PersonaKind::TutorRouter, &mut driver)
            .await
            .unwrap();

        // Tutors keep no archive.
        assert_eq!(report.archived, None);

        // The driver was reconfigured for the subject tutor.
        let instructions = driver.instructions.unwrap();
        assert!(instructions.contains("Today's topic: Fractions."));
        assert!(driver.advertised_tools.contains(&"log_practice".to_string()));
        assert!(!driver.advertised_tools.contains(&"pick_topic".to_string()));

        // The topic picked at the desk was readable after the transfer.
        assert!(driver
            .delivered
            .iter()
            .any(|text| text.contains("simplifying fractions")));
    }

    #[tokio::test]
    async fn test_sales_instructions_carry_company_identity() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);

        let mut driver = ScriptedDriver::new([
            tool("lookup_faq", json!({"query": "is there a free trial"})),
            tool("update_lead", json!({"field": "name", "value": "Dana"})),
            DriverEvent::Closed,
        ]);
        let report = service.run(PersonaKind::SalesRep, &mut driver).await.unwrap();

        assert!(driver.instructions.unwrap().contains("Brightpath Labs"));
        assert!(driver.delivered.iter().any(|text| text.contains("14 day")));
        // The unsaved lead was archived at close.
        assert_eq!(report.archived, Some(1));
    }

    #[tokio::test]
    async fn test_failed_verification_ends_the_run() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);

        let mut driver = ScriptedDriver::new([
            tool("load_case", json!({"name": "Riley Chen"})),
            tool("security_question", json!({})),
            tool("verify_identity", json!({"answer": "Oak"})),
            // Never reached; the wrong answer closes the session.
            tool("confirm_safe", json!({})),
        ]);
        let report = service
            .run(PersonaKind::CaseVerifier, &mut driver)
            .await
            .unwrap();

        assert_eq!(report.archived, None);
        let last = driver.delivered.last().unwrap();
        assert!(last.contains("can't continue"));
        // The case working copy was never written.
        let stored = service.cases().find_by_name("Riley Chen").await.unwrap().unwrap();
        assert_eq!(stored.status, CaseStatus::Pending);
    }

    #[tokio::test]
    async fn test_catalog_dir_override_reaches_instructions() {
        let dir = TempDir::new().unwrap();
        let catalog_dir = dir.path().join("catalogs");
        fs::create_dir_all(&catalog_dir).unwrap();
        fs::write(
            catalog_dir.join("faq.json"),
            r#"{"company": "FileCo", "tagline": "files first",
                "description": "d", "pricing": "p", "faq": []}"#,
        )
        .unwrap();
        let service = service(&dir);

        let open = service.open(PersonaKind::SalesRep).await.unwrap();
        assert!(open.instructions.contains("FileCo"));
        assert!(open.instructions.contains("files first"));
    }

    #[tokio::test]
    async fn test_game_master_runs_without_tools() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);

        let mut driver = ScriptedDriver::new([
            DriverEvent::UserTurn("I grab the fire axe.".to_string()),
            DriverEvent::AgentTurn("The case is bolted shut. 3:41 left. What do you do?".to_string()),
            DriverEvent::Closed,
        ]);
        let report = service.run(PersonaKind::GameMaster, &mut driver).await.unwrap();

        assert!(driver.advertised_tools.is_empty());
        assert_eq!(report.archived, None);
        assert!(report.usage.contains("user_turns=1"));
        assert!(report.usage.contains("agent_turns=1"));
    }
}
