// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Hook script templates.

use crate::error::{CmlintError, HookError, Result};
use handlebars::Handlebars;
use serde_json::json;
use std::str::FromStr;

const COMMIT_MSG_TEMPLATE: &str = r#"#!/bin/sh
# cmlint Git Hook: {{hook}}
# Generated by cmlint v{{version}}
#
# Reinstall with `cmlint hooks install --force`; remove with
# `cmlint hooks uninstall`.

if ! command -v {{binary}} >/dev/null 2>&1; then
    echo "{{hook}}: '{{binary}}' not found in PATH" >&2
    exit 1
fi

exec {{binary}} check --edit "$1"
"#;

/// Hooks cmlint knows how to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookTemplate {
    /// Validates the message git is about to record.
    CommitMsg,
}

impl HookTemplate {
    /// File name under `.git/hooks`.
    pub fn filename(&self) -> &'static str {
        match self {
            Self::CommitMsg => "commit-msg",
        }
    }

    /// Every installable hook.
    pub fn all() -> &'static [HookTemplate] {
        &[Self::CommitMsg]
    }

    fn source(&self) -> &'static str {
        match self {
            Self::CommitMsg => COMMIT_MSG_TEMPLATE,
        }
    }

    /// Render the hook script.
    pub fn generate(&self) -> Result<String> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(self.filename(), self.source())
            .map_err(|e| self.render_error(e.to_string()))?;

        let data = json!({
            "hook": self.filename(),
            "version": env!("CARGO_PKG_VERSION"),
            "binary": env!("CARGO_PKG_NAME"),
        });

        registry
            .render(self.filename(), &data)
            .map_err(|e| self.render_error(e.to_string()))
    }

    fn render_error(&self, message: String) -> CmlintError {
        CmlintError::Hook(HookError::InstallFailed {
            hook: self.filename().to_string(),
            message: format!("Failed to render hook template: {}", message),
        })
    }
}

impl FromStr for HookTemplate {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "commit-msg" | "commit_msg" | "commitmsg" => Ok(Self::CommitMsg),
            _ => Err(format!("Unknown hook: {}", s)),
        }
    }
}
