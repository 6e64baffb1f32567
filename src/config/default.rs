// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Compiled-in rule sets and configuration templates.

use std::collections::BTreeMap;

use super::schema::{Applicability, Level, LintConfig, RuleSetting};

/// Names accepted in `extends`.
pub const BASE_RULE_SETS: &[&str] = &["conventional"];

/// The governance policy used when no configuration file exists.
pub fn default_config() -> LintConfig {
    use Applicability::{Always, Never};
    use Level::Error;

    let entries: Vec<(&str, Level, Applicability, Option<toml::Value>)> = vec![
        (
            "type-enum",
            Error,
            Always,
            Some(toml::Value::from(vec![
                "feat", "fix", "docs", "test", "chore", "refactor", "perf",
            ])),
        ),
        ("header-max-length", Error, Always, Some(toml::Value::from(72))),
        ("body-empty", Error, Never, None),
        ("body-min-length", Error, Always, Some(toml::Value::from(20))),
        ("body-author-testing", Error, Always, None),
    ];

    LintConfig {
        plugins: vec!["governance".to_string()],
        rules: entries
            .into_iter()
            .map(|(name, level, applicability, value)| {
                (
                    name.to_string(),
                    RuleSetting::new(level, applicability, value),
                )
            })
            .collect(),
        ..LintConfig::default()
    }
}

/// Look up a compiled-in base rule set by name.
pub fn base_rule_set(name: &str) -> Option<BTreeMap<String, RuleSetting>> {
    match name {
        "conventional" | "config-conventional" | "@commitlint/config-conventional" => {
            Some(conventional_rules())
        }
        _ => None,
    }
}

/// The conventional-commits base rule set.
fn conventional_rules() -> BTreeMap<String, RuleSetting> {
    use Applicability::{Always, Never};
    use Level::{Error, Warning};

    let entries: Vec<(&str, Level, Applicability, Option<toml::Value>)> = vec![
        ("body-leading-blank", Warning, Always, None),
        ("body-max-line-length", Error, Always, Some(toml::Value::from(100))),
        ("footer-leading-blank", Warning, Always, None),
        ("footer-max-line-length", Error, Always, Some(toml::Value::from(100))),
        ("header-max-length", Error, Always, Some(toml::Value::from(100))),
        ("scope-case", Error, Always, Some(toml::Value::from("lower-case"))),
        (
            "subject-case",
            Error,
            Never,
            Some(toml::Value::from(vec![
                "sentence-case",
                "start-case",
                "pascal-case",
                "upper-case",
            ])),
        ),
        ("subject-empty", Error, Never, None),
        ("subject-full-stop", Error, Never, Some(toml::Value::from("."))),
        ("type-case", Error, Always, Some(toml::Value::from("lower-case"))),
        ("type-empty", Error, Never, None),
        (
            "type-enum",
            Error,
            Always,
            Some(toml::Value::from(vec![
                "build", "chore", "ci", "docs", "feat", "fix", "perf", "refactor", "revert",
                "style", "test",
            ])),
        ),
    ];

    entries
        .into_iter()
        .map(|(name, level, applicability, value)| {
            (
                name.to_string(),
                RuleSetting::new(level, applicability, value),
            )
        })
        .collect()
}

/// Generate the governance configuration file written by `cmlint init`.
pub fn example_config() -> &'static str {
    r#"# cmlint configuration

# Inherit the conventional-commits base rules, then tighten them below.
extends = ["conventional"]

# Compiled-in plugins providing extra rules.
plugins = ["governance"]

# Skip merge, revert, fixup! and squash! messages.
default_ignores = true
ignores = []

# Header decomposition. Named groups `type`, `scope` and `subject` are used
# when present; otherwise positional groups follow header_correspondence.
[parser_preset]
header_pattern = '^(?P<type>\w*)(?:\((?P<scope>[^()]*)\))?(?P<breaking>!)?: (?P<subject>.+)$'
header_correspondence = ["type", "scope", "subject"]

# Rules: name = [level, applicability, value]
# level: 0 = off, 1 = warning, 2 = error
[rules]
type-enum = [2, "always", ["feat", "fix", "docs", "test", "chore", "refactor", "perf"]]
header-max-length = [2, "always", 72]
body-empty = [2, "never"]
body-min-length = [2, "always", 20]
body-author-testing = [2, "always"]

[ci]
strict = false
fail_on_warning = false

[ui]
color = true
"#
}

/// Generate a configuration that only inherits the conventional base set.
pub fn conventional_config() -> &'static str {
    r#"# cmlint configuration (conventional)
extends = ["conventional"]
plugins = []

[rules]
"#
}
