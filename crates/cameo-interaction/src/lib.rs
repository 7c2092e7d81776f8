//! Interaction layer for Cameo.
//!
//! This crate holds everything between a dialogue driver and the domain:
//! the tool surface the personas expose, rendered instruction prompts,
//! the per-session runtime, and the toolset behind each persona family.

pub mod driver;
pub mod instructions;
pub mod runtime;
pub mod tool;
pub mod toolsets;
pub mod usage;

pub use driver::{DialogueDriver, DriverEvent, ScriptedDriver};
pub use instructions::{render_instructions, PromptContext};
pub use runtime::{CloseReport, SessionRuntime};
pub use tool::{ToolCall, ToolContext, ToolReply, ToolSpec, Toolset};
pub use usage::UsageCollector;
