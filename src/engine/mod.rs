//! Policy engine for policy-gate
//!
//! [`PolicyGate`] decides whether a command may run; [`file::SuppressionScanner`]
//! reviews a freshly written file for suppression comments. Both evaluate
//! against immutable rule tables built once at startup.

pub mod file;

use std::env;

use crate::config::Config;
use crate::error::ConfigError;
use crate::output::{Finding, Verdict};
use crate::rules::{Rule, RuleSet};

/// Set to skip all command checks (decisions are still audited)
pub const DISABLED_ENV: &str = "POLICY_GATE_DISABLED";

/// Set to report blocks as warnings without stopping the command
pub const WARN_ONLY_ENV: &str = "POLICY_GATE_WARN_ONLY";

/// Evaluates candidate commands against a [`RuleSet`]
pub struct PolicyGate {
    rules: RuleSet,
    warn_only: bool,
}

impl PolicyGate {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            warn_only: false,
        }
    }

    /// Gate with the built-in rules plus any configured ones
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(RuleSet::from_config(&config.gate)?))
    }

    /// Downgrade blocks to warnings (dry-run)
    pub fn with_warn_only(mut self, warn_only: bool) -> Self {
        self.warn_only = warn_only;
        self
    }

    /// Check if the gate is disabled via environment
    pub fn is_disabled(&self) -> bool {
        env::var_os(DISABLED_ENV).is_some()
    }

    /// Check if warn-only mode is enabled
    pub fn is_warn_only(&self) -> bool {
        self.warn_only || env::var_os(WARN_ONLY_ENV).is_some()
    }

    /// Evaluate a candidate against the rules.
    ///
    /// Block rules run in order and the first match is returned alone. Warn
    /// rules only run when nothing blocked, and every match is collected.
    pub fn evaluate(&self, candidate: &str) -> Verdict {
        if candidate.trim().is_empty() {
            return Verdict::Allow;
        }

        if let Some(rule) = self
            .rules
            .block_rules()
            .iter()
            .find(|r| r.is_match(candidate))
        {
            return Verdict::Block(finding(rule));
        }

        let warnings: Vec<Finding> = self
            .rules
            .warn_rules()
            .iter()
            .filter(|r| r.is_match(candidate))
            .map(finding)
            .collect();

        if warnings.is_empty() {
            Verdict::Allow
        } else {
            Verdict::Warn(warnings)
        }
    }

    /// Main entry point: evaluate with environment overrides applied
    pub fn check(&self, candidate: &str) -> Verdict {
        if self.is_disabled() {
            return Verdict::Allow;
        }

        match self.evaluate(candidate) {
            Verdict::Block(finding) if self.is_warn_only() => Verdict::Warn(vec![finding]),
            verdict => verdict,
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

fn finding(rule: &Rule) -> Finding {
    Finding::new(rule.id(), rule.message())
}
