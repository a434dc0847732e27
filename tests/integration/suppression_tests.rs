//! Integration tests for suppression-comment review

use std::fs;

use policy_gate::rules::allowlist::{self, SuppressionAllowlist, DEFAULT_ALLOWLIST_FILE};
use policy_gate::{Config, SuppressionScanner, Verdict};
use tempfile::TempDir;

const SAMPLE_PY: &str = r#"import os  # noqa: F401
import json

def handler(event):  # pylint: disable=unused-argument
    try:
        return json.loads(event)
    except Exception:  # noqa: BLE001
        return None
"#;

#[test]
fn test_scan_file_reports_every_unapproved_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("handler.py");
    fs::write(&path, SAMPLE_PY).unwrap();

    let scanner = SuppressionScanner::new(SuppressionAllowlist::empty()).unwrap();
    let verdict = scanner.scan(&path);

    assert_eq!(verdict.rule_ids(), ["noqa", "pylint-disable", "noqa"]);
    assert_eq!(verdict.exit_code(), 0);
    assert!(verdict.messages()[1].contains("handler.py:4:"));
}

#[test]
fn test_allowlist_file_approves_suppressions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("handler.py");
    fs::write(&path, SAMPLE_PY).unwrap();
    let allow_path = dir.path().join(DEFAULT_ALLOWLIST_FILE);
    fs::write(&allow_path, "# approved\nnoqa: BLE001\npylint: disable=unused-*\n").unwrap();

    let allow = SuppressionAllowlist::from_file(&allow_path).unwrap();
    assert_eq!(allow.len(), 2);
    let verdict = SuppressionScanner::new(allow).unwrap().scan(&path);

    assert_eq!(verdict.rule_ids(), ["noqa"]);
    assert!(verdict.messages()[0].contains("F401"));
}

#[test]
fn test_escalation_from_config_blocks() {
    let config: Config = toml::from_str("[suppressions]\nblock = true\n").unwrap();
    let scanner = SuppressionScanner::from_config(&config, SuppressionAllowlist::empty()).unwrap();

    let verdict = scanner.scan_text("app.ts", "// @ts-ignore\nconst x: number = y;\n");
    match verdict {
        Verdict::Block(ref finding) => {
            assert_eq!(finding.rule_id, "ts-ignore");
            assert!(finding.message.starts_with("app.ts:1:"));
        }
        ref other => panic!("expected block, got {:?}", other),
    }
    assert_eq!(verdict.exit_code(), 2);
}

#[test]
fn test_missing_file_has_nothing_to_report() {
    let dir = TempDir::new().unwrap();
    let scanner = SuppressionScanner::new(SuppressionAllowlist::empty()).unwrap();
    assert_eq!(scanner.scan(&dir.path().join("gone.py")), Verdict::Allow);
}

#[test]
fn test_malformed_allowlist_is_an_error() {
    let dir = TempDir::new().unwrap();
    let allow_path = dir.path().join(DEFAULT_ALLOWLIST_FILE);
    fs::write(&allow_path, "noqa: [E501\n").unwrap();
    assert!(SuppressionAllowlist::from_file(&allow_path).is_err());
}

#[test]
fn test_allowlist_path_precedence() {
    let explicit = dir_path("explicit");
    let configured = dir_path("configured");

    assert_eq!(
        allowlist::resolve_path(Some(&explicit), Some(configured.clone())),
        explicit
    );
    assert_eq!(allowlist::resolve_path(None, Some(configured.clone())), configured);
    assert_eq!(
        allowlist::resolve_path(None, None),
        std::path::PathBuf::from(DEFAULT_ALLOWLIST_FILE)
    );
}

fn dir_path(name: &str) -> std::path::PathBuf {
    std::path::PathBuf::from("/srv/project").join(name)
}
