//! Tools for the tutoring pair: the front-desk router and the subject
//! tutor it transfers to.
//!
//! Both roles share one toolset type over the same topic catalog; the
//! role picks which tool surface is advertised. The tutoring state
//! schema is shared too, so a transfer carries the student's name and
//! chosen topic across without re-asking.

use std::sync::Arc;

use async_trait::async_trait;

use cameo_core::catalog::{TopicList, TutorTopic};
use cameo_core::error::Result;
use cameo_core::persona::{Handoff, PersonaKind};

use crate::tool::{
    required_str, unknown_tool, ParamSpec, ToolCall, ToolContext, ToolReply, ToolSpec, Toolset,
};

const ROUTER_SPECS: &[ToolSpec] = &[
    ToolSpec {
        name: "list_topics",
        description: "Read out the topics the studio offers.",
        params: &[],
    },
    ToolSpec {
        name: "set_student_name",
        description: "Note the student's name.",
        params: &[ParamSpec::required("name", "The student's name.")],
    },
    ToolSpec {
        name: "pick_topic",
        description: "Settle on a topic and transfer the student to its tutor.",
        params: &[ParamSpec::required(
            "topic",
            "The chosen topic, by id or in the student's own words.",
        )],
    },
];

const SUBJECT_SPECS: &[ToolSpec] = &[
    ToolSpec {
        name: "topic_summary",
        description: "What today's topic covers, from the studio catalog.",
        params: &[],
    },
    ToolSpec {
        name: "suggest_question",
        description: "A ready-made practice question for today's topic.",
        params: &[],
    },
    ToolSpec {
        name: "log_practice",
        description: "Record a practice question the student worked through.",
        params: &[ParamSpec::required(
            "question",
            "The question, as asked.",
        )],
    },
    ToolSpec {
        name: "back_to_router",
        description: "Send the student back to the front desk.",
        params: &[],
    },
];

/// Which half of the tutoring pair this toolset serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorRole {
    Router,
    Subject,
}

pub struct TutorToolset {
    topics: Arc<TopicList>,
    role: TutorRole,
}

impl TutorToolset {
    pub fn new(topics: Arc<TopicList>, role: TutorRole) -> Self {
        Self { topics, role }
    }

    fn spoken_topic_menu(&self) -> String {
        let titles: Vec<&str> = self
            .topics
            .topics
            .iter()
            .map(|topic| topic.title.as_str())
            .collect();
        titles.join(", ")
    }

    /// Resolves the session's current topic against the catalog.
    ///
    /// State stores the topic title; older sessions may hold the id, so
    /// both are accepted.
    fn current_topic(&self, ctx: &ToolContext<'_>) -> Option<&TutorTopic> {
        let stored = ctx.session.state.get("topic")?.as_text()?.to_string();
        self.topics
            .find_by_id(&stored)
            .or_else(|| self.topics.find_by_keyword(&stored))
    }
}

#[async_trait]
impl Toolset for TutorToolset {
    fn specs(&self) -> &'static [ToolSpec] {
        match self.role {
            TutorRole::Router => ROUTER_SPECS,
            TutorRole::Subject => SUBJECT_SPECS,
        }
    }

    async fn handle(&self, ctx: &mut ToolContext<'_>, call: &ToolCall) -> Result<ToolReply> {
        match (self.role, call.name.as_str()) {
            (TutorRole::Router, "list_topics") => Ok(ToolReply::say(format!(
                "Right now we offer: {}. Which sounds good?",
                self.spoken_topic_menu()
            ))),
            (TutorRole::Router, "set_student_name") => {
                let name = required_str(call, "name")?;
                ctx.session.state.set("student_name", name)?;
                Ok(ToolReply::say(format!("Nice to meet you, {name}.")))
            }
            (TutorRole::Router, "pick_topic") => {
                let wanted = required_str(call, "topic")?;
                let topic = self
                    .topics
                    .find_by_id(wanted)
                    .or_else(|| self.topics.find_by_keyword(wanted));
                match topic {
                    Some(topic) => {
                        ctx.session.state.set("topic", topic.title.clone())?;
                        Ok(ToolReply::with_handoff(
                            format!(
                                "{} it is. Transferring you to your tutor now.",
                                topic.title
                            ),
                            Handoff::with_topic(PersonaKind::SubjectTutor, topic.title.clone()),
                        ))
                    }
                    // Stay at the front desk; nothing moves until a topic
                    // from the list is chosen.
                    None => Ok(ToolReply::say(format!(
                        "I don't have a tutor for that. We offer: {}.",
                        self.spoken_topic_menu()
                    ))),
                }
            }
            (TutorRole::Subject, "topic_summary") => match self.current_topic(ctx) {
                Some(topic) => Ok(ToolReply::say(format!(
                    "{}: {}",
                    topic.title, topic.summary
                ))),
                None => Ok(ToolReply::say(
                    "We haven't settled on a topic yet. The front desk can set one up; \
                     shall I send you back?",
                )),
            },
            (TutorRole::Subject, "suggest_question") => match self.current_topic(ctx) {
                Some(topic) => Ok(ToolReply::say(topic.sample_question.clone())),
                None => Ok(ToolReply::say(
                    "I need a topic before I can pose a question. The front desk can set \
                     one up.",
                )),
            },
            (TutorRole::Subject, "log_practice") => {
                let question = required_str(call, "question")?;
                ctx.session.state.set("practiced", question)?;
                Ok(ToolReply::say("Logged. Ready for the next one."))
            }
            (TutorRole::Subject, "back_to_router") => Ok(ToolReply::with_handoff(
                "No problem, sending you back to the front desk.",
                Handoff::new(PersonaKind::TutorRouter),
            )),
            _ => Err(unknown_tool("tutor", call)),
        }
    }
}
