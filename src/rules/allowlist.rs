//! Approved suppression comments
//!
//! A project lists the suppressions it has signed off on in a plain text
//! file, one glob pattern per line (`noqa: BLE001`, `type: ignore*`). Blank
//! lines and `#` comments are skipped.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::rules::glob::GlobPattern;

/// Default allowlist file name, looked up in the working directory
pub const DEFAULT_ALLOWLIST_FILE: &str = ".suppression-allowlist";

/// Compiled allowlist for efficient matching
#[derive(Debug, Clone, Default)]
pub struct SuppressionAllowlist {
    patterns: Vec<GlobPattern>,
}

impl SuppressionAllowlist {
    /// Create an empty allowlist
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load from a file; a missing file is an empty allowlist
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::empty()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Compile allowlist text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let patterns = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(GlobPattern::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// The approved pattern that covers this line, if any
    pub fn matches(&self, line: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.is_match(line))
            .map(GlobPattern::as_str)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Resolve which allowlist file to use: explicit, configured, then default
pub fn resolve_path(explicit: Option<&Path>, configured: Option<PathBuf>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or(configured)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ALLOWLIST_FILE))
}
