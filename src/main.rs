//! policy-gate - command policy gate and format-on-write hook for Claude Code
//!
//! # Usage
//!
//! ```bash
//! # Before a Bash tool call: exit 2 blocks it
//! policy-gate policy-check "rm -rf /home/user/project"
//!
//! # After a Write/Edit tool call: always exits 0
//! policy-gate format-on-write src/main.rs
//!
//! # As a hook, the candidate is read from the JSON on stdin
//! echo '{"tool_name":"Bash","tool_input":{"command":"ls"}}' | policy-gate policy-check
//! ```

use std::env;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use thiserror::Error;

use policy_gate::{
    audit::AuditLogger,
    config::Config,
    dispatch::ToolDispatcher,
    engine::{file::SuppressionScanner, PolicyGate},
    error::ConfigError,
    input::{HookInput, TOOL_INPUT_ENV},
    output::{render_lines, HookOutput, Verdict, EXIT_BLOCK},
    rules::allowlist::{self, SuppressionAllowlist},
};

const EXIT_USAGE: i32 = 1;

/// Print version information
fn print_version() {
    println!("policy-gate {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message
fn print_help() {
    println!(
        r#"policy-gate - command policy gate and format-on-write hook for Claude Code

USAGE:
    policy-gate policy-check [OPTIONS] [COMMAND]
    policy-gate format-on-write [OPTIONS] [FILE]
    policy-gate check-suppressions [OPTIONS] [FILE]

    Without COMMAND/FILE the candidate is read from the hook JSON on stdin
    (or from ${env}).

OPTIONS:
    -h, --help              Print this help message
    -v, --version           Print version information
    -c, --config PATH       Path to config file
    -d, --dry-run           policy-check: report blocks as warnings
    -j, --json              policy-check: print a PreToolUse JSON response
    -a, --allowlist PATH    check-suppressions: approved suppressions file

EXIT CODES:
    0   allowed, warned, or formatted (format-on-write always exits 0)
    1   usage error
    2   blocked, or the configuration could not be loaded

ENVIRONMENT:
    POLICY_GATE_DISABLED=1   Disable command checks (still logs)
    POLICY_GATE_WARN_ONLY=1  Warn but don't block

USAGE AS HOOK:
    Configure in ~/.claude/settings.json:
    {{
      "hooks": {{
        "PreToolUse": [{{
          "matcher": "Bash",
          "hooks": [{{ "type": "command", "command": "policy-gate policy-check" }}]
        }}],
        "PostToolUse": [{{
          "matcher": "Write|Edit|MultiEdit",
          "hooks": [{{ "type": "command", "command": "policy-gate format-on-write" }}]
        }}]
      }}
    }}
"#,
        env = TOOL_INPUT_ENV
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    PolicyCheck,
    FormatOnWrite,
    CheckSuppressions,
}

impl Mode {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "policy-check" => Some(Mode::PolicyCheck),
            "format-on-write" => Some(Mode::FormatOnWrite),
            "check-suppressions" => Some(Mode::CheckSuppressions),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Mode::PolicyCheck => "policy-check",
            Mode::FormatOnWrite => "format-on-write",
            Mode::CheckSuppressions => "check-suppressions",
        }
    }
}

/// Parsed command line arguments
#[derive(Debug, Default)]
struct Args {
    help: bool,
    version: bool,
    mode: Option<Mode>,
    dry_run: bool,
    json: bool,
    config_path: Option<PathBuf>,
    allowlist_path: Option<PathBuf>,
    positional: Vec<String>,
}

impl Args {
    /// Options are only recognised before the first positional word; an
    /// unquoted command's own flags stay part of the command.
    fn parse(raw: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut result = Args::default();
        let mut iter = raw.into_iter();

        while let Some(arg) = iter.next() {
            if !result.positional.is_empty() {
                result.positional.push(arg);
                continue;
            }

            match arg.as_str() {
                "-h" | "--help" => result.help = true,
                "-v" | "--version" => result.version = true,
                "-d" | "--dry-run" => result.dry_run = true,
                "-j" | "--json" => result.json = true,
                "-c" | "--config" => {
                    let path = iter.next().ok_or("--config requires a path")?;
                    result.config_path = Some(PathBuf::from(path));
                }
                "-a" | "--allowlist" => {
                    let path = iter.next().ok_or("--allowlist requires a path")?;
                    result.allowlist_path = Some(PathBuf::from(path));
                }
                "--" => result.positional.extend(iter.by_ref()),
                a if a.starts_with("--config=") => {
                    result.config_path = Some(PathBuf::from(a.trim_start_matches("--config=")));
                }
                a if a.starts_with("--allowlist=") => {
                    result.allowlist_path =
                        Some(PathBuf::from(a.trim_start_matches("--allowlist=")));
                }
                a if result.mode.is_none() => match Mode::from_str(a) {
                    Some(mode) => result.mode = Some(mode),
                    None => return Err(format!("unknown command '{}'", a)),
                },
                _ => result.positional.push(arg),
            }
        }

        Ok(result)
    }

    /// The positional candidate, words re-joined when passed unquoted
    fn candidate(&self) -> Option<String> {
        if self.positional.is_empty() {
            None
        } else {
            Some(self.positional.join(" "))
        }
    }
}

/// Candidate string plus the hook session it came from
struct Candidate {
    value: Option<String>,
    session_id: Option<String>,
}

/// Hook input that was present but could not be used
#[derive(Debug, Error)]
enum InputError {
    #[error("failed to read stdin: {0}")]
    Read(#[from] io::Error),

    #[error("{0}")]
    Parse(#[from] serde_json::Error),
}

/// Positional argument first, then hook JSON from stdin, then the environment
fn resolve_candidate(
    args: &Args,
    pick: fn(&HookInput) -> Option<&str>,
) -> Result<Candidate, InputError> {
    if let Some(value) = args.candidate() {
        return Ok(Candidate {
            value: Some(value),
            session_id: None,
        });
    }

    let mut json = String::new();
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        stdin.lock().read_to_string(&mut json)?;
    }
    if json.trim().is_empty() {
        json = env::var(TOOL_INPUT_ENV).unwrap_or_default();
    }
    if json.trim().is_empty() {
        return Ok(Candidate {
            value: None,
            session_id: None,
        });
    }

    let input = HookInput::from_json(&json)?;
    Ok(Candidate {
        value: pick(&input).map(String::from),
        session_id: input.session_id.clone(),
    })
}

fn load_config(args: &Args) -> Result<Config, ConfigError> {
    match args.config_path {
        Some(ref path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Print a verdict: blocks to stderr, warnings to stdout, nothing for allow
fn emit(verdict: &Verdict) {
    let lines = render_lines(verdict);
    if verdict.is_block() {
        for line in lines {
            eprintln!("{}", line);
        }
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        for line in lines {
            let _ = writeln!(handle, "{}", line);
        }
        let _ = handle.flush();
    }
}

fn audit(
    config: &Config,
    mode: Mode,
    candidate: &str,
    verdict: &Verdict,
    disabled: bool,
    session_id: Option<&str>,
) {
    let result = AuditLogger::new(config.audit_path().as_deref()).and_then(|mut logger| {
        logger.log_verdict(mode.as_str(), candidate, verdict, disabled, session_id)
    });
    if let Err(e) = result {
        eprintln!("Warning: Failed to write audit log: {}", e);
    }
}

/// Refuse to gate with a policy we could not load
fn fail_closed(what: &str, err: impl std::fmt::Display) -> i32 {
    eprintln!("🚫 BLOCKED: policy-gate {}: {}", what, err);
    EXIT_BLOCK
}

fn run_policy_check(args: &Args) -> i32 {
    let config = match load_config(args) {
        Ok(config) => config,
        Err(e) => return fail_closed("configuration error", e),
    };
    let gate = match PolicyGate::from_config(&config) {
        Ok(gate) => gate.with_warn_only(args.dry_run),
        Err(e) => return fail_closed("configuration error", e),
    };

    // SECURITY: malformed hook input could be an evasion attempt
    let candidate = match resolve_candidate(args, HookInput::candidate_command) {
        Ok(candidate) => candidate,
        Err(e) => return fail_closed("could not parse hook input", e),
    };
    let Some(command) = candidate.value else {
        return 0;
    };

    let disabled = gate.is_disabled();
    let verdict = gate.check(&command);
    audit(
        &config,
        Mode::PolicyCheck,
        &command,
        &verdict,
        disabled,
        candidate.session_id.as_deref(),
    );

    if args.json {
        // The JSON carries the decision; the runtime reads it on exit 0
        println!("{}", HookOutput::from_verdict(&verdict).to_json());
        return 0;
    }

    emit(&verdict);
    verdict.exit_code()
}

fn run_format_on_write(args: &Args) -> i32 {
    let dispatcher = match load_config(args).and_then(|c| ToolDispatcher::from_config(&c.format)) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            eprintln!("policy-gate: configuration error, not formatting: {}", e);
            return 0;
        }
    };

    if let Ok(Candidate {
        value: Some(path), ..
    }) = resolve_candidate(args, HookInput::candidate_path)
    {
        dispatcher.format(Path::new(&path));
    }
    0
}

fn run_check_suppressions(args: &Args) -> i32 {
    let config = match load_config(args) {
        Ok(config) => config,
        Err(e) => return fail_closed("configuration error", e),
    };

    let allowlist_path =
        allowlist::resolve_path(args.allowlist_path.as_deref(), config.allowlist_path());
    let scanner = match SuppressionAllowlist::from_file(&allowlist_path)
        .and_then(|allow| SuppressionScanner::from_config(&config, allow))
    {
        Ok(scanner) => scanner,
        Err(e) => return fail_closed("suppression allowlist error", e),
    };

    let candidate = match resolve_candidate(args, HookInput::candidate_path) {
        Ok(candidate) => candidate,
        Err(e) => return fail_closed("could not parse hook input", e),
    };
    let Some(path) = candidate.value else {
        return 0;
    };

    let verdict = scanner.scan(Path::new(&path));
    audit(
        &config,
        Mode::CheckSuppressions,
        &path,
        &verdict,
        false,
        candidate.session_id.as_deref(),
    );

    emit(&verdict);
    verdict.exit_code()
}

fn main() {
    let args = match Args::parse(env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("policy-gate: {}", msg);
            eprintln!("Run 'policy-gate --help' for usage");
            process::exit(EXIT_USAGE);
        }
    };

    if args.help {
        print_help();
        return;
    }

    if args.version {
        print_version();
        return;
    }

    let code = match args.mode {
        Some(Mode::PolicyCheck) => run_policy_check(&args),
        Some(Mode::FormatOnWrite) => run_format_on_write(&args),
        Some(Mode::CheckSuppressions) => run_check_suppressions(&args),
        None => {
            eprintln!("policy-gate: missing command");
            eprintln!("Run 'policy-gate --help' for usage");
            EXIT_USAGE
        }
    };

    process::exit(code);
}
