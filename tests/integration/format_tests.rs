//! Integration tests for format-on-write dispatch
//!
//! Formatters are stand-in shell scripts run through `sh`, so the tests do
//! not depend on any real formatter being installed.

#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use policy_gate::dispatch::{ToolBinding, ToolDispatcher, ToolTable};
use tempfile::TempDir;

/// Write a throwaway formatter script with the given body
fn formatter_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    path
}

fn sh(script: &Path) -> String {
    format!("sh '{}' {{file}}", script.display())
}

fn dispatcher(bindings: Vec<ToolBinding>, timeout: Duration) -> ToolDispatcher {
    let mut table = ToolTable::empty();
    for binding in bindings {
        table.register(binding).unwrap();
    }
    ToolDispatcher::new(table, timeout)
}

#[test]
fn test_bound_formatter_rewrites_file() {
    let dir = TempDir::new().unwrap();
    let script = formatter_script(dir.path(), "fmt.sh", r#"echo formatted > "$1""#);
    let target = dir.path().join("main.rs");
    fs::write(&target, "fn main(){}").unwrap();

    let d = dispatcher(
        vec![ToolBinding::new(".rs", &[sh(&script)]).unwrap()],
        Duration::from_secs(5),
    );
    d.format(&target);

    assert_eq!(fs::read_to_string(&target).unwrap().trim(), "formatted");
}

#[test]
fn test_fallback_used_when_primary_missing() {
    let dir = TempDir::new().unwrap();
    let script = formatter_script(dir.path(), "black.sh", r#"echo by-fallback > "$1""#);
    let target = dir.path().join("app.py");
    fs::write(&target, "x=1").unwrap();

    let d = dispatcher(
        vec![ToolBinding::new(
            ".py",
            &["/nonexistent/bin/ruff format {file}".to_string(), sh(&script)],
        )
        .unwrap()],
        Duration::from_secs(5),
    );
    d.format(&target);

    assert_eq!(fs::read_to_string(&target).unwrap().trim(), "by-fallback");
}

#[test]
fn test_unregistered_extension_is_noop() {
    let dir = TempDir::new().unwrap();
    let script = formatter_script(dir.path(), "fmt.sh", r#"echo changed > "$1""#);
    let target = dir.path().join("data.xyz");
    fs::write(&target, "original").unwrap();

    let d = dispatcher(
        vec![ToolBinding::new(".rs", &[sh(&script)]).unwrap()],
        Duration::from_secs(5),
    );
    d.format(&target);

    assert_eq!(fs::read_to_string(&target).unwrap(), "original");
}

#[test]
fn test_extension_match_is_case_sensitive() {
    let dir = TempDir::new().unwrap();
    let script = formatter_script(dir.path(), "fmt.sh", r#"echo changed > "$1""#);
    let target = dir.path().join("Main.RS");
    fs::write(&target, "original").unwrap();

    let d = dispatcher(
        vec![ToolBinding::new(".rs", &[sh(&script)]).unwrap()],
        Duration::from_secs(5),
    );
    d.format(&target);

    assert_eq!(fs::read_to_string(&target).unwrap(), "original");
}

#[test]
fn test_failing_formatter_is_swallowed() {
    let dir = TempDir::new().unwrap();
    let script = formatter_script(
        dir.path(),
        "fail.sh",
        "echo 'syntax error' >&2\nexit 3",
    );
    let target = dir.path().join("broken.go");
    fs::write(&target, "package main").unwrap();

    let d = dispatcher(
        vec![ToolBinding::new(".go", &[sh(&script)]).unwrap()],
        Duration::from_secs(5),
    );
    d.format(&target);

    assert_eq!(fs::read_to_string(&target).unwrap(), "package main");
}

#[test]
fn test_slow_formatter_times_out() {
    let dir = TempDir::new().unwrap();
    let script = formatter_script(dir.path(), "slow.sh", "sleep 10\necho late > \"$1\"");
    let target = dir.path().join("slow.lua");
    fs::write(&target, "original").unwrap();

    let d = dispatcher(
        vec![ToolBinding::new(".lua", &[sh(&script)]).unwrap()],
        Duration::from_millis(200),
    );
    let started = Instant::now();
    d.format(&target);

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(fs::read_to_string(&target).unwrap(), "original");
}

#[test]
fn test_directory_and_missing_paths_are_noops() {
    let dir = TempDir::new().unwrap();
    let script = formatter_script(dir.path(), "fmt.sh", r#"echo changed > "$1""#);
    let sub = dir.path().join("pkg.rs");
    fs::create_dir(&sub).unwrap();

    let d = dispatcher(
        vec![ToolBinding::new(".rs", &[sh(&script)]).unwrap()],
        Duration::from_secs(5),
    );
    d.format(&sub);
    d.format(&dir.path().join("missing.rs"));

    assert!(sub.is_dir());
    assert!(!dir.path().join("missing.rs").exists());
}

#[test]
fn test_candidates_skip_missing_tools() {
    let dir = TempDir::new().unwrap();
    let script = formatter_script(dir.path(), "fmt.sh", "true");

    let d = dispatcher(
        vec![ToolBinding::new(
            ".py",
            &["/nonexistent/bin/ruff format {file}".to_string(), sh(&script)],
        )
        .unwrap()],
        Duration::from_secs(5),
    );
    let candidates = d.candidates(Path::new("app.py"));
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].1.program, "sh");
}
