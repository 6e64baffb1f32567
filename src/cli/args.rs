// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cmlint - Commit message policy linter
///
/// Validates commit messages against a configurable rule table, from the
/// `commit-msg` hook, a file, stdin, or existing commits.
#[derive(Parser, Debug)]
#[command(name = "cmlint")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Commit message policy linter", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run (defaults to `check --edit` if not specified)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable CI mode (honours `[ci] fail_on_warning`)
    #[arg(long, global = true)]
    pub ci: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate commit messages (default command)
    Check(CheckArgs),

    /// Manage git hooks
    Hooks(HooksArgs),

    /// Print the resolved configuration
    PrintConfig,

    /// List every rule available under the current configuration
    ListRules,

    /// Initialize cmlint configuration
    Init(InitArgs),

    /// Print version information
    Version,
}

/// Arguments for the check command.
#[derive(Parser, Debug, Default, Clone)]
pub struct CheckArgs {
    /// Commit or range to check (default: HEAD)
    pub target: Option<String>,

    /// Read the message from a file (default: .git/COMMIT_EDITMSG)
    #[arg(short, long, value_name = "FILE", num_args = 0..=1)]
    pub edit: Option<Option<PathBuf>>,

    /// Read the message from stdin
    #[arg(long, conflicts_with = "edit")]
    pub stdin: bool,

    /// Check the given message text
    #[arg(short, long, conflicts_with_all = ["edit", "stdin"])]
    pub message: Option<String>,

    /// Check all commits in a range
    #[arg(long)]
    pub range: bool,

    /// Strict mode: treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

impl CheckArgs {
    /// Whether the message comes from somewhere other than git history.
    pub fn reads_message(&self) -> bool {
        self.message.is_some() || self.edit.is_some() || self.stdin
    }
}

/// Arguments for the hooks command.
#[derive(Parser, Debug, Clone)]
pub struct HooksArgs {
    /// Hook action to perform
    #[command(subcommand)]
    pub action: HooksAction,
}

/// Hook actions.
#[derive(Subcommand, Debug, Clone)]
pub enum HooksAction {
    /// Install git hooks
    Install {
        /// Specific hook to install
        #[arg(value_name = "HOOK")]
        hook: Option<String>,

        /// Back up and replace a hook not written by cmlint
        #[arg(short, long)]
        force: bool,
    },

    /// Uninstall git hooks
    Uninstall {
        /// Specific hook to uninstall
        #[arg(value_name = "HOOK")]
        hook: Option<String>,
    },

    /// Show hook status
    Status,

    /// Run a hook manually (for testing)
    Run {
        /// Hook to run
        hook: String,

        /// Arguments to pass to the hook
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,
    },
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Configuration preset
    #[arg(long, value_enum, default_value = "governance")]
    pub preset: ConfigPreset,
}

/// Configuration presets for init.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigPreset {
    /// Conventional commits plus the author/testing body policy
    Governance,
    /// Plain conventional commits
    Conventional,
}

impl Cli {
    /// Get the effective command, defaulting to `check --edit`.
    pub fn effective_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Check(CheckArgs {
            edit: Some(None),
            ..CheckArgs::default()
        }))
    }
}
