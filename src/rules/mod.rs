//! Policy rules for policy-gate
//!
//! A rule is a disjunction of clauses and each clause is a conjunction of
//! glob patterns. That one shape covers plain patterns, any-of alternatives
//! and "flag AND verb" combinations.

pub mod allowlist;
pub mod dangerous;
pub mod glob;
pub mod suppressions;

use serde::Deserialize;
use std::collections::HashSet;

use crate::config::{GateConfig, RuleConfig};
use crate::error::ConfigError;
use glob::GlobPattern;

/// Verdict tier a rule belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// First match stops evaluation and forbids the command
    Block,

    /// Matches accumulate; the command still runs
    Warn,
}

/// A seed rule definition, compiled into a [`Rule`] at startup
#[derive(Debug, Clone)]
pub struct RuleDef {
    /// Unique identifier for this rule
    pub id: &'static str,

    /// Tier the rule is evaluated in
    pub tier: Tier,

    /// Any-of clauses, each an all-of list of glob patterns
    pub clauses: &'static [&'static [&'static str]],

    /// Human-readable explanation shown on match
    pub message: &'static str,
}

impl RuleDef {
    /// Create a new rule definition
    pub const fn new(
        id: &'static str,
        tier: Tier,
        clauses: &'static [&'static [&'static str]],
        message: &'static str,
    ) -> Self {
        Self {
            id,
            tier,
            clauses,
            message,
        }
    }

    /// Compile the definition
    pub fn compile(&self) -> Result<Rule, ConfigError> {
        Rule::new(self.id, self.tier, self.message, self.clauses.iter().copied())
    }
}

/// A compiled, immutable rule
#[derive(Debug, Clone)]
pub struct Rule {
    id: String,
    tier: Tier,
    message: String,
    clauses: Vec<Vec<GlobPattern>>,
}

impl Rule {
    /// Compile a rule from its clauses
    pub fn new<C, P>(
        id: impl Into<String>,
        tier: Tier,
        message: impl Into<String>,
        clauses: C,
    ) -> Result<Self, ConfigError>
    where
        C: IntoIterator,
        C::Item: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let id = id.into();
        let mut compiled = Vec::new();

        for clause in clauses {
            let mut patterns = Vec::new();
            for pattern in clause {
                let pattern = pattern.as_ref();
                if pattern.trim().is_empty() {
                    return Err(ConfigError::EmptyPattern { rule_id: id });
                }
                patterns.push(GlobPattern::new(pattern)?);
            }
            if patterns.is_empty() {
                return Err(ConfigError::EmptyRule { rule_id: id });
            }
            compiled.push(patterns);
        }

        if compiled.is_empty() {
            return Err(ConfigError::EmptyRule { rule_id: id });
        }

        Ok(Self {
            id,
            tier,
            message: message.into(),
            clauses: compiled,
        })
    }

    /// Compile a user-configured rule
    pub fn from_config(config: &RuleConfig) -> Result<Self, ConfigError> {
        let mut clauses: Vec<Vec<String>> = config
            .patterns
            .iter()
            .map(|p| vec![p.clone()])
            .collect();
        if !config.all.is_empty() {
            clauses.push(config.all.clone());
        }
        Rule::new(&config.id, config.tier, &config.message, clauses)
    }

    /// Check whether the candidate triggers this rule
    pub fn is_match(&self, candidate: &str) -> bool {
        self.clauses
            .iter()
            .any(|clause| clause.iter().all(|p| p.is_match(candidate)))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Ordered rules, partitioned by tier
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    block: Vec<Rule>,
    warn: Vec<Rule>,
    ids: HashSet<String>,
}

impl RuleSet {
    /// Create an empty rule set
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in dangerous-command policy
    pub fn defaults() -> Result<Self, ConfigError> {
        let mut set = Self::empty();
        set.extend_defs(dangerous::BLOCK_RULES)?;
        set.extend_defs(dangerous::WARN_RULES)?;
        Ok(set)
    }

    /// Build from the `[gate]` configuration section
    pub fn from_config(config: &GateConfig) -> Result<Self, ConfigError> {
        let mut set = if config.replace_defaults {
            Self::empty()
        } else {
            Self::defaults()?
        };

        for rule in &config.rules {
            set.push(Rule::from_config(rule)?)?;
        }

        Ok(set)
    }

    /// Append a rule to the end of its tier
    pub fn push(&mut self, rule: Rule) -> Result<(), ConfigError> {
        if !self.ids.insert(rule.id.clone()) {
            return Err(ConfigError::DuplicateRuleId(rule.id));
        }
        match rule.tier {
            Tier::Block => self.block.push(rule),
            Tier::Warn => self.warn.push(rule),
        }
        Ok(())
    }

    /// Compile and append seed definitions in order
    pub fn extend_defs(&mut self, defs: &[RuleDef]) -> Result<(), ConfigError> {
        for def in defs {
            self.push(def.compile()?)?;
        }
        Ok(())
    }

    /// Block-tier rules in evaluation order
    pub fn block_rules(&self) -> &[Rule] {
        &self.block
    }

    /// Warn-tier rules in evaluation order
    pub fn warn_rules(&self) -> &[Rule] {
        &self.warn
    }

    pub fn len(&self) -> usize {
        self.block.len() + self.warn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
