//! Configuration loading for policy-gate
//!
//! Built-in rules and formatter bindings apply unless a config file extends
//! or replaces them. Unlike a missing file, a file that exists but does not
//! parse is an error: the gate refuses to run with a policy it cannot read.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::rules::Tier;

/// General configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    /// Enable audit logging
    pub audit_log: bool,

    /// Path to audit log file
    pub audit_path: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            audit_log: true,
            audit_path: Some("~/.claude/policy-gate/audit.jsonl".to_string()),
        }
    }
}

/// A user-defined gate rule
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub id: String,

    pub tier: Tier,

    pub message: String,

    /// Any one of these patterns triggers the rule
    #[serde(default)]
    pub patterns: Vec<String>,

    /// All of these patterns together trigger the rule
    #[serde(default)]
    pub all: Vec<String>,
}

/// Command gate configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    /// Drop the built-in rules and use only `rules`
    pub replace_defaults: bool,

    /// Rules appended after the built-in ones
    pub rules: Vec<RuleConfig>,
}

/// A user-defined formatter binding
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindingConfig {
    /// Extensions including the leading dot, e.g. ".tsx"
    pub extensions: Vec<String>,

    /// Primary command first, then fallbacks; `{file}` marks the path
    pub commands: Vec<String>,
}

/// Format-on-write configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatConfig {
    /// Formatter wall-clock limit
    pub timeout_ms: u64,

    /// Drop the built-in bindings and use only `bindings`
    pub replace_defaults: bool,

    /// Bindings that override built-in ones for the same extension
    pub bindings: Vec<BindingConfig>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            replace_defaults: false,
            bindings: Vec::new(),
        }
    }
}

/// Suppression-comment check configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct SuppressionsConfig {
    /// Approved suppression patterns, one per line
    pub allowlist_file: Option<String>,

    /// Report unapproved suppressions as BLOCK instead of WARN
    pub block: bool,
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub general: GeneralConfig,
    pub gate: GateConfig,
    pub format: FormatConfig,
    pub suppressions: SuppressionsConfig,
}

impl Config {
    /// Standard config locations, most specific first
    pub fn search_paths() -> Vec<PathBuf> {
        [
            dirs::home_dir().map(|p| p.join(".claude/policy-gate/config.toml")),
            Some(PathBuf::from("/etc/policy-gate/config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load the first config file found, or defaults when there is none
    pub fn load() -> Result<Self, ConfigError> {
        for path in Self::search_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Config::default())
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Expand ~ in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Get the audit log path (expanded)
    pub fn audit_path(&self) -> Option<PathBuf> {
        if !self.general.audit_log {
            return None;
        }
        self.general.audit_path.as_deref().map(Self::expand_path)
    }

    /// Get the suppression allowlist path (expanded)
    pub fn allowlist_path(&self) -> Option<PathBuf> {
        self.suppressions
            .allowlist_file
            .as_deref()
            .map(Self::expand_path)
    }
}

/// Example configuration showing every section
pub const EXAMPLE_CONFIG_TOML: &str = r#"
[general]
audit_log = true
audit_path = "~/.claude/policy-gate/audit.jsonl"

[gate]
replace_defaults = false

[[gate.rules]]
id = "terraform-destroy"
tier = "block"
message = "Destroying infrastructure"
patterns = ["terraform destroy", "terraform apply -destroy"]

[[gate.rules]]
id = "kubectl-delete-namespace"
tier = "warn"
message = "Deleting a Kubernetes namespace"
all = ["kubectl delete", "namespace"]

[format]
timeout_ms = 5000

[[format.bindings]]
extensions = [".py", ".pyi"]
commands = ["ruff format {file}", "black -q {file}"]

[suppressions]
allowlist_file = ".suppression-allowlist"
block = false
"#;
