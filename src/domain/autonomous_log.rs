// Autonomous AI log domain model - entries from `/autonomous-ai/log`
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::timestamp::deserialize_utc;

pub const CREATE_ROUTINE_TOOL: &str = "create_autonomous_routine";
pub const APPLIANCE_CONTROL_TOOL: &str = "autonomous_appliance_control";

#[derive(Debug, Clone, Deserialize)]
pub struct AutonomousLogEntry {
    #[serde(deserialize_with = "deserialize_utc")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default)]
    pub outcome: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

/// The `{success, log}` wrapper the backend puts around the log list
#[derive(Debug, Clone, Deserialize)]
pub struct AutonomousLogEnvelope {
    pub success: bool,
    /// Entries are decoded one by one so a bad row does not hide the rest
    #[serde(default)]
    pub log: Option<Vec<Value>>,
}
