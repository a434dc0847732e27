//! Configuration errors
//!
//! Every error the gate can raise happens while loading policy. Evaluation
//! and formatting are infallible once the tables are built.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("empty pattern in rule `{rule_id}`")]
    EmptyPattern { rule_id: String },

    #[error("malformed pattern `{pattern}`: {reason}")]
    MalformedPattern { pattern: String, reason: String },

    #[error("rule `{rule_id}` has no patterns")]
    EmptyRule { rule_id: String },

    #[error("duplicate rule id `{0}`")]
    DuplicateRuleId(String),

    #[error("extension `{0}` is bound more than once")]
    DuplicateExtension(String),

    #[error("invalid extension `{0}` (must start with '.')")]
    InvalidExtension(String),

    #[error("invalid formatter command `{0}`")]
    InvalidCommand(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
