//! Verdicts and how they are shown to the user
//!
//! The plain-text form is what the hook prints; the JSON form is the
//! PreToolUse response Claude Code understands.

use serde::Serialize;

/// Exit code that tells the hook runtime to stop the tool call
pub const EXIT_BLOCK: i32 = 2;

/// A matched rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub rule_id: String,
    pub message: String,
}

impl Finding {
    pub fn new(rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            message: message.into(),
        }
    }
}

/// Outcome of evaluating a candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing matched
    Allow,

    /// Every matching warn rule, in rule order
    Warn(Vec<Finding>),

    /// The first matching block rule
    Block(Finding),
}

impl Verdict {
    pub fn is_allow(&self) -> bool {
        matches!(self, Verdict::Allow)
    }

    pub fn is_warn(&self) -> bool {
        matches!(self, Verdict::Warn(_))
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Verdict::Block(_))
    }

    /// Rule ids behind this verdict
    pub fn rule_ids(&self) -> Vec<&str> {
        match self {
            Verdict::Allow => Vec::new(),
            Verdict::Warn(findings) => findings.iter().map(|f| f.rule_id.as_str()).collect(),
            Verdict::Block(finding) => vec![finding.rule_id.as_str()],
        }
    }

    /// Messages behind this verdict
    pub fn messages(&self) -> Vec<&str> {
        match self {
            Verdict::Allow => Vec::new(),
            Verdict::Warn(findings) => findings.iter().map(|f| f.message.as_str()).collect(),
            Verdict::Block(finding) => vec![finding.message.as_str()],
        }
    }

    /// Process exit code for the hook runtime
    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::Block(_) => EXIT_BLOCK,
            _ => 0,
        }
    }
}

/// Human-readable lines for a verdict, empty for `Allow`
pub fn render_lines(verdict: &Verdict) -> Vec<String> {
    match verdict {
        Verdict::Allow => Vec::new(),
        Verdict::Warn(findings) => findings
            .iter()
            .map(|f| format!("⚠️  WARNING: {}", f.message))
            .collect(),
        Verdict::Block(finding) => vec![format!("🚫 BLOCKED: {}", finding.message)],
    }
}

/// Main output structure for Claude Code hooks
#[derive(Debug, Serialize)]
pub struct HookOutput {
    /// Hook-specific output containing the permission decision
    #[serde(rename = "hookSpecificOutput", skip_serializing_if = "Option::is_none")]
    pub hook_specific_output: Option<HookSpecificOutput>,

    /// Optional system message to show the user
    #[serde(rename = "systemMessage", skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,
}

/// Hook-specific output with permission decision
#[derive(Debug, Serialize)]
pub struct HookSpecificOutput {
    #[serde(rename = "hookEventName")]
    pub hook_event_name: String,

    #[serde(rename = "permissionDecision")]
    pub permission_decision: String,

    #[serde(rename = "permissionDecisionReason")]
    pub permission_decision_reason: String,
}

impl HookOutput {
    /// Empty output = allow
    pub fn allow() -> Self {
        HookOutput {
            hook_specific_output: None,
            system_message: None,
        }
    }

    pub fn deny(finding: &Finding) -> Self {
        HookOutput {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: "PreToolUse".to_string(),
                permission_decision: "deny".to_string(),
                permission_decision_reason: finding.message.clone(),
            }),
            system_message: Some(format!(
                "[policy-gate:{}] BLOCKED: {}",
                finding.rule_id, finding.message
            )),
        }
    }

    /// Allows the call but shows every warning
    pub fn warn(findings: &[Finding]) -> Self {
        let messages: Vec<String> = findings
            .iter()
            .map(|f| format!("WARNING: {}", f.message))
            .collect();
        HookOutput {
            hook_specific_output: None,
            system_message: Some(format!("[policy-gate] {}", messages.join("; "))),
        }
    }

    pub fn from_verdict(verdict: &Verdict) -> Self {
        match verdict {
            Verdict::Allow => HookOutput::allow(),
            Verdict::Warn(findings) => HookOutput::warn(findings),
            Verdict::Block(finding) => HookOutput::deny(finding),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
