//! Suppression-comment review for written files
//!
//! Checks every line of a file against the suppression rules, skipping lines
//! the project's allowlist approves.

use std::path::Path;

use crate::config::Config;
use crate::error::ConfigError;
use crate::output::{Finding, Verdict};
use crate::rules::allowlist::SuppressionAllowlist;
use crate::rules::{suppressions, RuleSet};

pub struct SuppressionScanner {
    rules: RuleSet,
    allowlist: SuppressionAllowlist,
    escalate: bool,
}

impl SuppressionScanner {
    pub fn new(allowlist: SuppressionAllowlist) -> Result<Self, ConfigError> {
        let mut rules = RuleSet::empty();
        rules.extend_defs(suppressions::SUPPRESSION_RULES)?;
        Ok(Self {
            rules,
            allowlist,
            escalate: false,
        })
    }

    /// Scanner configured from `[suppressions]`, using `allowlist`
    pub fn from_config(
        config: &Config,
        allowlist: SuppressionAllowlist,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(allowlist)?.with_escalation(config.suppressions.block))
    }

    /// Report unapproved suppressions as a block
    pub fn with_escalation(mut self, escalate: bool) -> Self {
        self.escalate = escalate;
        self
    }

    /// Scan a file on disk; unreadable files have nothing to report
    pub fn scan(&self, path: &Path) -> Verdict {
        match std::fs::read_to_string(path) {
            Ok(content) => self.scan_text(&path.display().to_string(), &content),
            Err(_) => Verdict::Allow,
        }
    }

    /// Scan text, labelling findings with `label:line`
    pub fn scan_text(&self, label: &str, content: &str) -> Verdict {
        let mut findings = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            if self.allowlist.matches(line).is_some() {
                continue;
            }
            // One finding per line: the first suppression rule that fires
            if let Some(rule) = self.rules.warn_rules().iter().find(|r| r.is_match(line)) {
                findings.push(Finding::new(
                    rule.id(),
                    format!(
                        "{}:{}: unapproved suppression ({}): {}",
                        label,
                        idx + 1,
                        rule.message(),
                        line.trim()
                    ),
                ));
            }
        }

        if findings.is_empty() {
            return Verdict::Allow;
        }

        if self.escalate {
            let count = findings.len();
            let first = findings.swap_remove(0);
            let message = if count > 1 {
                format!("{} (and {} more)", first.message, count - 1)
            } else {
                first.message
            };
            return Verdict::Block(Finding::new(first.rule_id, message));
        }

        Verdict::Warn(findings)
    }
}
