//! The tool surface exposed to dialogue drivers.
//!
//! Tools are the only way a driver mutates session state. Calls arrive
//! with named JSON arguments; replies carry spoken text plus optional
//! control effects (handoff, end of session).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use cameo_core::error::{CameoError, Result};
use cameo_core::fraud::VerificationFlow;
use cameo_core::persona::Handoff;
use cameo_core::session::Session;

/// One tool invocation from the driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    /// Named arguments as a JSON object.
    #[serde(default)]
    pub args: serde_json::Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, args: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// What a tool hands back to the conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolReply {
    /// Text for the agent to speak.
    pub text: String,
    /// Validated transfer to another persona, if the tool requested one.
    pub handoff: Option<Handoff>,
    /// True when the session should end after this reply.
    pub session_done: bool,
}

impl ToolReply {
    /// Plain spoken reply.
    pub fn say(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            handoff: None,
            session_done: false,
        }
    }

    /// Reply that transfers the caller to another persona.
    pub fn with_handoff(text: impl Into<String>, handoff: Handoff) -> Self {
        Self {
            text: text.into(),
            handoff: Some(handoff),
            session_done: false,
        }
    }

    /// Reply that ends the session.
    pub fn closing(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            handoff: None,
            session_done: true,
        }
    }
}

/// One named argument in a tool's advertised signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

impl ParamSpec {
    pub const fn required(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            required: false,
        }
    }
}

/// An advertised tool: what the driver may call and with which arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
}

/// Mutable session pieces a tool may touch.
///
/// The context borrows from the runtime for the span of one call;
/// toolsets hold their read-side collaborators (catalogs, repositories)
/// themselves.
pub struct ToolContext<'a> {
    pub session: &'a mut Session,
    pub flow: &'a mut VerificationFlow,
}

/// A persona's tool implementations.
#[async_trait]
pub trait Toolset: Send + Sync {
    /// The advertised tool surface.
    fn specs(&self) -> &'static [ToolSpec];

    /// Executes one call. Lookup misses should come back as conversational
    /// replies; errors are for genuine failures (bad arguments, storage).
    async fn handle(&self, ctx: &mut ToolContext<'_>, call: &ToolCall) -> Result<ToolReply>;
}

/// Fails with the canonical unknown-tool error.
pub fn unknown_tool(toolset: &str, call: &ToolCall) -> CameoError {
    CameoError::invalid_argument(
        toolset,
        format!("no tool named '{}' here", call.name),
    )
}

/// Extracts a required string argument.
pub fn required_str<'c>(call: &'c ToolCall, key: &str) -> Result<&'c str> {
    optional_str(call, key)
        .ok_or_else(|| CameoError::invalid_argument(&call.name, format!("missing '{key}'")))
}

/// Extracts an optional string argument. Empty strings count as absent.
pub fn optional_str<'c>(call: &'c ToolCall, key: &str) -> Option<&'c str> {
    call.args
        .get(key)
        .and_then(|value| value.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Extracts an optional positive integer, accepting numbers or numeric
/// strings (drivers are not consistent about which they send).
pub fn optional_u64(call: &ToolCall, key: &str) -> Result<Option<u64>> {
    let Some(value) = call.args.get(key) else {
        return Ok(None);
    };
    if value.is_null() {
        return Ok(None);
    }
    if let Some(n) = value.as_u64() {
        return Ok(Some(n));
    }
    if let Some(s) = value.as_str() {
        return s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| CameoError::invalid_argument(&call.name, format!("'{key}' is not a number")));
    }
    Err(CameoError::invalid_argument(
        &call.name,
        format!("'{key}' is not a number"),
    ))
}
