//! JSONL audit logging for policy-gate
//!
//! Records every gate decision to a JSONL file for later analysis.
//! Formatter runs are not recorded.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::input::summarize;
use crate::output::Verdict;

/// Log level for audit entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Allowed,
    Blocked,
    Warn,
    Disabled,
}

/// Credentials that must not reach the log verbatim
static SECRET_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)(api[_-]?key|secret|token|password|passwd)(\s*[=:]\s*)\S+").unwrap(),
        Regex::new(r"AKIA[0-9A-Z]{16}").unwrap(),
        Regex::new(r"gh[pousr]_[A-Za-z0-9_]{36,}").unwrap(),
        Regex::new(r"(?i)(authorization:\s*bearer\s+)\S+").unwrap(),
    ]
});

/// Redact credentials in text for logging
pub fn redact_secrets(text: &str) -> String {
    let mut redacted = text.to_string();
    for pattern in SECRET_PATTERNS.iter() {
        redacted = pattern
            .replace_all(&redacted, |caps: &regex::Captures| {
                // Keep the key name and separator when the pattern captured them
                match (caps.get(1), caps.get(2)) {
                    (Some(key), Some(sep)) => format!("{}{}[REDACTED]", key.as_str(), sep.as_str()),
                    (Some(prefix), None) => format!("{}[REDACTED]", prefix.as_str()),
                    _ => "[REDACTED]".to_string(),
                }
            })
            .into_owned();
    }
    redacted
}

/// An audit log entry
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,

    pub level: LogLevel,

    /// CLI mode that produced the decision
    pub mode: String,

    /// Rule IDs that matched
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rule_ids: Vec<String>,

    /// Redacted, truncated candidate
    pub candidate: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl AuditEntry {
    pub fn new(
        mode: &str,
        candidate: &str,
        verdict: &Verdict,
        disabled: bool,
        session_id: Option<&str>,
    ) -> Self {
        let level = if disabled {
            LogLevel::Disabled
        } else {
            match verdict {
                Verdict::Allow => LogLevel::Allowed,
                Verdict::Warn(_) => LogLevel::Warn,
                Verdict::Block(_) => LogLevel::Blocked,
            }
        };

        Self {
            timestamp: Utc::now(),
            level,
            mode: mode.to_string(),
            rule_ids: verdict.rule_ids().into_iter().map(String::from).collect(),
            candidate: summarize(&redact_secrets(candidate)),
            messages: verdict.messages().into_iter().map(String::from).collect(),
            session_id: session_id.map(String::from),
        }
    }
}

/// Audit logger
#[derive(Default)]
pub struct AuditLogger {
    writer: Option<BufWriter<File>>,
}

impl AuditLogger {
    /// Open the log for appending; `None` disables logging
    pub fn new(path: Option<&Path>) -> io::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
        })
    }

    /// Log an audit entry
    pub fn log(&mut self, entry: &AuditEntry) -> io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(entry)?;
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Log a decision
    pub fn log_verdict(
        &mut self,
        mode: &str,
        candidate: &str,
        verdict: &Verdict,
        disabled: bool,
        session_id: Option<&str>,
    ) -> io::Result<()> {
        let entry = AuditEntry::new(mode, candidate, verdict, disabled, session_id);
        self.log(&entry)
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }
}
