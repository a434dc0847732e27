//! Format-on-write dispatch
//!
//! Picks a formatter by file extension and runs it in place. Formatting is
//! best-effort: a missing tool, a failing tool and a slow tool all end the
//! same way, silently, with the write left as it was.

pub mod defaults;
pub mod runner;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::FormatConfig;
use crate::error::ConfigError;
use runner::{run_discarding, Launch};

/// Placeholder replaced by the target path
pub const FILE_PLACEHOLDER: &str = "{file}";

/// An executable plus fixed arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandTemplate {
    /// Parse a shell-quoted command line such as `clang-format -i {file}`
    pub fn parse(command: &str) -> Result<Self, ConfigError> {
        let mut words = shlex::split(command)
            .filter(|w| !w.is_empty())
            .ok_or_else(|| ConfigError::InvalidCommand(command.to_string()))?
            .into_iter();
        let program = words
            .next()
            .ok_or_else(|| ConfigError::InvalidCommand(command.to_string()))?;

        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    /// Arguments with the path substituted, or appended when no placeholder exists
    pub fn args_for(&self, path: &Path) -> Vec<String> {
        let file = path.to_string_lossy();
        if self.args.iter().any(|a| a.contains(FILE_PLACEHOLDER)) {
            self.args
                .iter()
                .map(|a| a.replace(FILE_PLACEHOLDER, &file))
                .collect()
        } else {
            let mut args = self.args.clone();
            args.push(file.into_owned());
            args
        }
    }
}

/// One extension and the commands that can format it
#[derive(Debug, Clone)]
pub struct ToolBinding {
    pub extension: String,

    /// Primary first, then fallbacks for when it is not installed
    pub commands: Vec<CommandTemplate>,
}

impl ToolBinding {
    pub fn new(extension: &str, commands: &[impl AsRef<str>]) -> Result<Self, ConfigError> {
        if extension.len() < 2 || !extension.starts_with('.') {
            return Err(ConfigError::InvalidExtension(extension.to_string()));
        }
        if commands.is_empty() {
            return Err(ConfigError::InvalidCommand(format!(
                "no commands bound to {extension}"
            )));
        }

        let commands = commands
            .iter()
            .map(|c| CommandTemplate::parse(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            extension: extension.to_string(),
            commands,
        })
    }
}

/// Extension-keyed formatter table
#[derive(Debug, Clone, Default)]
pub struct ToolTable {
    bindings: HashMap<String, ToolBinding>,
}

impl ToolTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in formatter table
    pub fn defaults() -> Result<Self, ConfigError> {
        let mut table = Self::empty();
        for (extensions, commands) in defaults::DEFAULT_BINDINGS.iter().copied() {
            for ext in extensions {
                table.register(ToolBinding::new(ext, commands)?)?;
            }
        }
        Ok(table)
    }

    /// Build from the `[format]` configuration section
    pub fn from_config(config: &FormatConfig) -> Result<Self, ConfigError> {
        let mut user = Self::empty();
        for binding in &config.bindings {
            for ext in &binding.extensions {
                user.register(ToolBinding::new(ext, &binding.commands)?)?;
            }
        }

        if config.replace_defaults {
            return Ok(user);
        }

        let mut table = Self::defaults()?;
        table.override_with(user);
        Ok(table)
    }

    /// Add a binding; a second binding for the same extension is rejected
    pub fn register(&mut self, binding: ToolBinding) -> Result<(), ConfigError> {
        if self.bindings.contains_key(&binding.extension) {
            return Err(ConfigError::DuplicateExtension(binding.extension));
        }
        self.bindings.insert(binding.extension.clone(), binding);
        Ok(())
    }

    /// Layer another table on top; its bindings replace ours
    pub fn override_with(&mut self, other: ToolTable) {
        self.bindings.extend(other.bindings);
    }

    /// Binding for the longest registered suffix of the file name
    pub fn lookup(&self, path: &Path) -> Option<&ToolBinding> {
        let name = path.file_name()?.to_str()?;
        self.bindings
            .values()
            .filter(|b| name.len() > b.extension.len() && name.ends_with(&b.extension))
            .max_by_key(|b| b.extension.len())
    }

    pub fn get(&self, extension: &str) -> Option<&ToolBinding> {
        self.bindings.get(extension)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Runs the bound formatter for a freshly written file
pub struct ToolDispatcher {
    table: ToolTable,
    timeout: Duration,
}

impl ToolDispatcher {
    pub fn new(table: ToolTable, timeout: Duration) -> Self {
        Self { table, timeout }
    }

    pub fn from_config(config: &FormatConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            ToolTable::from_config(config)?,
            Duration::from_millis(config.timeout_ms),
        ))
    }

    /// Installed commands for this file, in the order they will be tried
    pub fn candidates(&self, path: &Path) -> Vec<(PathBuf, &CommandTemplate)> {
        let Some(binding) = self.table.lookup(path) else {
            return Vec::new();
        };
        binding
            .commands
            .iter()
            .filter_map(|c| which::which(&c.program).ok().map(|exe| (exe, c)))
            .collect()
    }

    /// Format `path` in place if a formatter is bound and installed.
    ///
    /// Never fails: non-files, unbound extensions, missing tools, non-zero
    /// exits and timeouts are all no-ops from the caller's point of view.
    pub fn format(&self, path: &Path) {
        if !path.is_file() {
            return;
        }

        for (program, template) in self.candidates(path) {
            if run_discarding(&program, &template.args_for(path), self.timeout) == Launch::Started {
                return;
            }
        }
    }

    pub fn table(&self) -> &ToolTable {
        &self.table
    }
}
