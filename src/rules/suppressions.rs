//! Inline suppression comments
//!
//! Comments that silence a linter or type checker for one line or one file.
//! Each is reported unless the project approved it in its allowlist.

use crate::rules::{RuleDef, Tier};

pub const SUPPRESSION_RULES: &[RuleDef] = &[
    RuleDef::new("noqa", Tier::Warn, &[&["noqa"]], "ruff/flake8 `noqa`"),
    RuleDef::new(
        "type-ignore",
        Tier::Warn,
        &[&["type: ignore"], &["pyright: ignore"]],
        "type checker ignore",
    ),
    RuleDef::new(
        "pylint-disable",
        Tier::Warn,
        &[&["pylint: disable"]],
        "pylint disable",
    ),
    RuleDef::new(
        "eslint-disable",
        Tier::Warn,
        &[&["eslint-disable"]],
        "eslint disable",
    ),
    RuleDef::new(
        "ts-ignore",
        Tier::Warn,
        &[&["@ts-ignore"], &["@ts-expect-error"], &["@ts-nocheck"]],
        "TypeScript diagnostic suppression",
    ),
    RuleDef::new("biome-ignore", Tier::Warn, &[&["biome-ignore"]], "biome ignore"),
    RuleDef::new(
        "rust-allow",
        Tier::Warn,
        &[&[r"#\[allow("], &[r"#!\[allow("]],
        "Rust lint `allow` attribute",
    ),
    RuleDef::new("nolint", Tier::Warn, &[&["NOLINT"]], "clang-tidy NOLINT"),
    RuleDef::new(
        "rubocop-disable",
        Tier::Warn,
        &[&["rubocop:disable"]],
        "rubocop disable",
    ),
    RuleDef::new(
        "swiftlint-disable",
        Tier::Warn,
        &[&["swiftlint:disable"]],
        "swiftlint disable",
    ),
    RuleDef::new(
        "shellcheck-disable",
        Tier::Warn,
        &[&["shellcheck disable"]],
        "shellcheck disable",
    ),
];
