//! Dangerous command rules for shell commands
//!
//! Block rules run first and the first match wins, so the most specific
//! pattern of an overlapping pair is listed first (`rm-home` before
//! `rm-root`). Warn rules all run and their messages accumulate.

use crate::rules::{RuleDef, Tier};

/// Block tier - the command must not run
pub const BLOCK_RULES: &[RuleDef] = &[
    RuleDef::new(
        "rm-home",
        Tier::Block,
        &[&["rm -rf ~"], &["rm -rf $HOME"], &["rm -rf /home"]],
        "Attempting to delete home directory",
    ),
    // Intentionally broad: also catches `rm -rf /var`, `rm -rf /etc`, ...
    RuleDef::new(
        "rm-root",
        Tier::Block,
        &[&["rm -rf /"]],
        "Attempting to delete from the root filesystem",
    ),
    RuleDef::new(
        "block-device-write",
        Tier::Block,
        &[&["> /dev/sda"], &["dd if=", "of=/dev/"]],
        "Writing directly to a block device",
    ),
    RuleDef::new(
        "disk-format",
        Tier::Block,
        &[&["mkfs.*/dev/"]],
        "Formatting a disk device",
    ),
    RuleDef::new(
        "fork-bomb",
        Tier::Block,
        &[&[":(){:|:&};:"], &["fork bomb"]],
        "Fork bomb detected",
    ),
];

/// Warn tier - the command runs, the user sees every concern
pub const WARN_RULES: &[RuleDef] = &[
    RuleDef::new(
        "rm-recursive",
        Tier::Warn,
        &[&["rm -rf"]],
        "Recursive force delete (rm -rf), double-check the target path",
    ),
    RuleDef::new(
        "chmod-777-recursive",
        Tier::Warn,
        &[&["chmod -R 777"]],
        "Recursively setting world-writable permissions (chmod -R 777)",
    ),
    RuleDef::new(
        "pipe-to-shell",
        Tier::Warn,
        &[&["curl*| bash"], &["wget*| bash"]],
        "Piping to bash from a download, review the script first",
    ),
    // Intentionally broad: `-f` is a plain substring, so `git push origin fix-foo` warns too
    RuleDef::new(
        "force-destructive",
        Tier::Warn,
        &[
            &["--force", "git push"],
            &["-f", "git push"],
            &["--force", "git reset"],
            &["-f", "git reset"],
            &["--force", "docker rm"],
            &["-f", "docker rm"],
        ],
        "Force flag on a destructive operation (git push, git reset, docker rm)",
    ),
];
