//! Per-session usage accounting.
//!
//! Counts what flowed through a session so the close log line can report
//! it, the same shape hosted pipelines bill on.

use std::collections::BTreeMap;
use std::fmt;

/// Counters for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageCollector {
    user_turns: u64,
    agent_turns: u64,
    tool_calls: BTreeMap<String, u64>,
}

impl UsageCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_user_turn(&mut self) {
        self.user_turns += 1;
    }

    pub fn record_agent_turn(&mut self) {
        self.agent_turns += 1;
    }

    pub fn record_tool_call(&mut self, name: &str) {
        *self.tool_calls.entry(name.to_string()).or_insert(0) += 1;
    }

    pub fn user_turns(&self) -> u64 {
        self.user_turns
    }

    pub fn agent_turns(&self) -> u64 {
        self.agent_turns
    }

    pub fn total_tool_calls(&self) -> u64 {
        self.tool_calls.values().sum()
    }
}

impl fmt::Display for UsageCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "user_turns={} agent_turns={} tool_calls={}",
            self.user_turns,
            self.agent_turns,
            self.total_tool_calls()
        )?;
        if !self.tool_calls.is_empty() {
            let breakdown: Vec<String> = self
                .tool_calls
                .iter()
                .map(|(name, count)| format!("{name}:{count}"))
                .collect();
            write!(f, " ({})", breakdown.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let mut usage = UsageCollector::new();
        usage.record_user_turn();
        usage.record_user_turn();
        usage.record_agent_turn();
        usage.record_tool_call("update_checkin");
        usage.record_tool_call("update_checkin");
        usage.record_tool_call("save_checkin");

        assert_eq!(usage.user_turns(), 2);
        assert_eq!(usage.agent_turns(), 1);
        assert_eq!(usage.total_tool_calls(), 3);
    }

    #[test]
    fn test_summary_line_is_stable() {
        let mut usage = UsageCollector::new();
        usage.record_tool_call("b_tool");
        usage.record_tool_call("a_tool");
        usage.record_user_turn();

        assert_eq!(
            usage.to_string(),
            "user_turns=1 agent_turns=0 tool_calls=2 (a_tool:1, b_tool:1)"
        );
    }
}
