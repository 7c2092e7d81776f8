//! The dialogue driver boundary.
//!
//! Everything on the far side of this trait is the hosted voice pipeline:
//! speech recognition, the language model, synthesis, turn detection. On
//! this side, a driver is just a source of events and a sink for replies.

use std::collections::VecDeque;

use async_trait::async_trait;

use cameo_core::error::Result;

use crate::tool::{ToolCall, ToolSpec};

/// One thing the driver produced.
#[derive(Debug, Clone)]
pub enum DriverEvent {
    /// The user said something (already transcribed).
    UserTurn(String),
    /// The model spoke freely, without calling a tool.
    AgentTurn(String),
    /// The model decided to call a tool.
    ToolInvocation(ToolCall),
    /// The conversation ended (hangup, timeout, goodbye).
    Closed,
}

/// A conversation's external half.
///
/// `configure` is called once per session before any events flow; it
/// carries the rendered instructions and the advertised tool surface.
#[async_trait]
pub trait DialogueDriver: Send {
    async fn configure(&mut self, instructions: &str, tools: &[ToolSpec]) -> Result<()>;

    /// The next event, or `None` once the driver is exhausted.
    async fn next_event(&mut self) -> Result<Option<DriverEvent>>;

    /// Delivers agent speech back to the user.
    async fn deliver(&mut self, text: &str) -> Result<()>;
}

/// Replays a fixed event sequence; the stand-in driver for tests and
/// offline runs.
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    events: VecDeque<DriverEvent>,
    /// Everything the agent delivered, in order.
    pub delivered: Vec<String>,
    /// Instructions received at configure time.
    pub instructions: Option<String>,
    /// Tool names advertised at configure time.
    pub advertised_tools: Vec<String>,
}

impl ScriptedDriver {
    pub fn new(events: impl IntoIterator<Item = DriverEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            delivered: Vec::new(),
            instructions: None,
            advertised_tools: Vec::new(),
        }
    }
}

#[async_trait]
impl DialogueDriver for ScriptedDriver {
    async fn configure(&mut self, instructions: &str, tools: &[ToolSpec]) -> Result<()> {
        self.instructions = Some(instructions.to_string());
        self.advertised_tools = tools.iter().map(|spec| spec.name.to_string()).collect();
        Ok(())
    }

    async fn next_event(&mut self) -> Result<Option<DriverEvent>> {
        Ok(self.events.pop_front())
    }

    async fn deliver(&mut self, text: &str) -> Result<()> {
        self.delivered.push(text.to_string());
        Ok(())
    }
}
