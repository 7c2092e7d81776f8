//! Line-oriented console driver, the dev stand-in for the hosted voice
//! pipeline.
//!
//! Plain lines are user turns. `/tool <name> {json}` invokes a tool the
//! way the model would; `/quit` (or closing stdin) hangs up. Instructions
//! and the advertised tool surface are printed at configure time, so a
//! reconfiguring handoff is visible mid-session.

use std::io::Write;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use cameo_core::error::Result;
use cameo_interaction::driver::{DialogueDriver, DriverEvent};
use cameo_interaction::tool::{ToolCall, ToolSpec};

pub struct ConsoleDriver {
    lines: Lines<BufReader<Stdin>>,
}

impl ConsoleDriver {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

fn parse_tool_line(rest: &str) -> std::result::Result<ToolCall, String> {
    let rest = rest.trim();
    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, json)) => (name, json.trim()),
        None => (rest, ""),
    };
    if name.is_empty() {
        return Err("usage: /tool <name> {json}".to_string());
    }
    let args = if args.is_empty() {
        serde_json::json!({})
    } else {
        serde_json::from_str(args).map_err(|e| format!("bad JSON args: {e}"))?
    };
    Ok(ToolCall::new(name, args))
}

#[async_trait]
impl DialogueDriver for ConsoleDriver {
    async fn configure(&mut self, instructions: &str, tools: &[ToolSpec]) -> Result<()> {
        println!("--- instructions ---");
        println!("{}", instructions.trim_end());
        if !tools.is_empty() {
            println!("--- tools ---");
            for spec in tools {
                let params: Vec<String> = spec
                    .params
                    .iter()
                    .map(|param| {
                        if param.required {
                            param.name.to_string()
                        } else {
                            format!("[{}]", param.name)
                        }
                    })
                    .collect();
                println!("  /tool {} {{{}}}", spec.name, params.join(", "));
            }
        }
        println!("---");
        Ok(())
    }

    async fn next_event(&mut self) -> Result<Option<DriverEvent>> {
        loop {
            print!("you> ");
            std::io::stdout().flush()?;
            let Some(line) = self.lines.next_line().await? else {
                // stdin closed, same as a hangup
                return Ok(Some(DriverEvent::Closed));
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line == "/quit" {
                return Ok(Some(DriverEvent::Closed));
            }
            if line == "/tool" || line.starts_with("/tool ") {
                match parse_tool_line(&line["/tool".len()..]) {
                    Ok(call) => return Ok(Some(DriverEvent::ToolInvocation(call))),
                    Err(message) => {
                        println!("({message})");
                        continue;
                    }
                }
            }
            return Ok(Some(DriverEvent::UserTurn(line.to_string())));
        }
    }

    async fn deliver(&mut self, text: &str) -> Result<()> {
        println!("agent> {text}");
        Ok(())
    }
}
