//! Integration tests for the command policy gate

use policy_gate::{Config, PolicyGate, RuleSet, Verdict};

fn gate() -> PolicyGate {
    PolicyGate::new(RuleSet::defaults().unwrap())
}

fn block_message(command: &str) -> String {
    match gate().evaluate(command) {
        Verdict::Block(finding) => finding.message,
        other => panic!("expected block for {:?}, got {:?}", command, other),
    }
}

fn warn_ids(command: &str) -> Vec<String> {
    match gate().evaluate(command) {
        Verdict::Warn(findings) => findings.into_iter().map(|f| f.rule_id).collect(),
        other => panic!("expected warn for {:?}, got {:?}", command, other),
    }
}

// ============================================================================
// Block Tier
// ============================================================================

#[test]
fn test_home_directory_deletion_blocked() {
    for command in [
        "rm -rf ~",
        "rm -rf $HOME",
        "rm -rf /home/user/project",
        "echo hi; rm -rf ~/foo",
    ] {
        assert!(
            block_message(command).contains("home directory"),
            "command: {}",
            command
        );
    }
}

#[test]
fn test_root_deletion_blocked() {
    for command in ["rm -rf /", "sudo rm -rf /var", "rm -rf /etc/nginx"] {
        let message = block_message(command);
        assert!(message.contains("root filesystem"), "command: {}", command);
        assert!(!message.contains("home directory"));
    }
}

#[test]
fn test_block_device_write_blocked() {
    assert!(gate().evaluate("cat disk.img > /dev/sda").is_block());
    assert!(gate().evaluate("dd if=/dev/zero of=/dev/nvme0n1").is_block());
}

#[test]
fn test_disk_format_blocked() {
    assert!(gate().evaluate("mkfs.ext4 /dev/sda1").is_block());
    assert!(gate().evaluate("sudo mkfs.xfs -f /dev/nvme0n1p1").is_block());
}

#[test]
fn test_fork_bomb_blocked() {
    assert!(gate().evaluate(":(){:|:&};:").is_block());
    assert!(gate().evaluate("echo run a fork bomb").is_block());
}

// ============================================================================
// Warn Tier
// ============================================================================

#[test]
fn test_recursive_delete_warns() {
    assert_eq!(warn_ids("rm -rf ./build"), ["rm-recursive"]);
    assert_eq!(gate().evaluate("rm -rf ./build").exit_code(), 0);
}

#[test]
fn test_chmod_777_warns() {
    assert_eq!(warn_ids("chmod -R 777 ./public"), ["chmod-777-recursive"]);
}

#[test]
fn test_pipe_to_shell_warns() {
    let verdict = gate().evaluate("curl http://example.com/install.sh | bash");
    assert_eq!(verdict.rule_ids(), ["pipe-to-shell"]);
    assert!(verdict.messages()[0].contains("Piping to bash"));
    assert_eq!(warn_ids("wget -qO- https://x.dev/i.sh | bash"), ["pipe-to-shell"]);
}

#[test]
fn test_force_flag_needs_destructive_verb() {
    assert_eq!(gate().evaluate("npm install --force"), Verdict::Allow);
    assert_eq!(warn_ids("git push --force origin main"), ["force-destructive"]);
    assert_eq!(warn_ids("git reset --hard HEAD~1 -f"), ["force-destructive"]);
    assert_eq!(warn_ids("docker rm -f web"), ["force-destructive"]);
}

#[test]
fn test_multiple_warnings_reported_together() {
    let ids = warn_ids("rm -rf ./node_modules && chmod -R 777 . && git push --force");
    assert_eq!(
        ids,
        ["rm-recursive", "chmod-777-recursive", "force-destructive"]
    );
}

// ============================================================================
// Allow
// ============================================================================

#[test]
fn test_safe_commands_allowed() {
    for command in ["ls -la", "git status", "cargo build --release", "rm file.txt"] {
        assert_eq!(gate().evaluate(command), Verdict::Allow, "command: {}", command);
    }
}

#[test]
fn test_evaluate_has_no_hidden_state() {
    let g = gate();
    for command in ["rm -rf ~", "rm -rf ./x", "ls"] {
        assert_eq!(g.evaluate(command), g.evaluate(command));
    }
}

// ============================================================================
// Configured Rules
// ============================================================================

#[test]
fn test_config_rules_extend_defaults() {
    let config: Config = toml::from_str(
        r#"
        [[gate.rules]]
        id = "terraform-destroy"
        tier = "block"
        message = "Destroying infrastructure"
        patterns = ["terraform destroy"]
        "#,
    )
    .unwrap();
    let gate = PolicyGate::from_config(&config).unwrap();
    assert!(gate.evaluate("terraform destroy -auto-approve").is_block());
    assert!(gate.evaluate("rm -rf /").is_block());
}

#[test]
fn test_config_with_malformed_pattern_is_rejected() {
    let config: Config = toml::from_str(
        r#"
        [[gate.rules]]
        id = "broken"
        tier = "warn"
        message = "broken"
        patterns = ["[unterminated"]
        "#,
    )
    .unwrap();
    assert!(PolicyGate::from_config(&config).is_err());
}

#[test]
fn test_config_with_duplicate_rule_id_is_rejected() {
    let config: Config = toml::from_str(
        r#"
        [[gate.rules]]
        id = "rm-root"
        tier = "block"
        message = "again"
        patterns = ["rm -rf /"]
        "#,
    )
    .unwrap();
    assert!(PolicyGate::from_config(&config).is_err());
}
