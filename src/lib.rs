//! policy-gate - command policy gate and format-on-write hook for Claude Code
//!
//! This library decides whether a shell command may run, formats files after
//! they are written, and flags unapproved linter suppression comments.
//!
//! # Features
//!
//! - **Policy gate**: ordered BLOCK rules (first match wins) then WARN rules
//!   (all matches reported), written as substring-style glob patterns
//! - **Format on write**: extension-keyed formatter table with fallbacks,
//!   run best-effort with a timeout
//! - **Suppression review**: inline `noqa`/`eslint-disable`/... detection
//!   with a project allowlist
//! - **Audit logging**: JSONL log of all gate decisions
//!
//! # Example
//!
//! ```
//! use policy_gate::{PolicyGate, RuleSet, Verdict};
//!
//! let gate = PolicyGate::new(RuleSet::defaults().unwrap());
//!
//! assert!(gate.evaluate("rm -rf /home/user/project").is_block());
//! assert!(gate.evaluate("rm -rf ./build").is_warn());
//! assert_eq!(gate.evaluate("ls -la"), Verdict::Allow);
//! ```

pub mod audit;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod input;
pub mod output;
pub mod rules;

// Re-exports for convenience
pub use config::Config;
pub use dispatch::{ToolDispatcher, ToolTable};
pub use engine::file::SuppressionScanner;
pub use engine::PolicyGate;
pub use error::ConfigError;
pub use input::HookInput;
pub use output::{Finding, HookOutput, Verdict};
pub use rules::{Rule, RuleSet, Tier};
