//! Input parsing for Claude Code hook JSON format
//!
//! When the hook runtime passes no positional argument, the candidate comes
//! from the JSON document it writes to stdin (or exports as
//! `CLAUDE_TOOL_INPUT`).

use serde::Deserialize;

/// Environment variable some hook runtimes use instead of stdin
pub const TOOL_INPUT_ENV: &str = "CLAUDE_TOOL_INPUT";

/// Main input structure from Claude Code hooks
#[derive(Debug, Deserialize)]
pub struct HookInput {
    /// Name of the tool being invoked (e.g., "Bash", "Write", "Edit")
    #[serde(default)]
    pub tool_name: Option<String>,

    /// Tool-specific input parameters
    #[serde(default)]
    pub tool_input: ToolInput,

    /// Optional session identifier
    #[serde(default)]
    pub session_id: Option<String>,
}

/// The fields of `tool_input` the gate reads; everything else is ignored
#[derive(Debug, Default, Deserialize)]
pub struct ToolInput {
    /// Bash command line
    #[serde(default)]
    pub command: Option<String>,

    /// Target of Write / Edit / MultiEdit
    #[serde(default)]
    pub file_path: Option<String>,
}

impl HookInput {
    /// Parse input from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The command line of a Bash tool call
    pub fn candidate_command(&self) -> Option<&str> {
        self.tool_input
            .command
            .as_deref()
            .filter(|c| !c.trim().is_empty())
    }

    /// The file a Write/Edit tool call touched
    pub fn candidate_path(&self) -> Option<&str> {
        self.tool_input
            .file_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
    }
}

/// Truncate a candidate for logs
pub fn summarize(candidate: &str) -> String {
    const LIMIT: usize = 200;
    if candidate.chars().count() > LIMIT {
        let head: String = candidate.chars().take(LIMIT).collect();
        format!("{}...", head)
    } else {
        candidate.to_string()
    }
}
