// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! cmlint - Commit message policy linter
//!
//! Validates commit messages against a configurable rule table before
//! they enter the repository history.
//!
//! # Features
//!
//! - **Rule Engine**: Conventional-commit header rules, body policy and
//!   per-rule severity (`[level, "always" | "never", value]`)
//! - **Base Rule Sets**: `extends = ["conventional"]` with local overrides
//! - **Plugins**: Compiled-in rule providers such as `governance`
//! - **Header Parsing**: Configurable header pattern and field mapping
//! - **Git Hooks**: Installs a `commit-msg` hook that runs `cmlint check`
//!
//! # Example
//!
//! ```no_run
//! use cmlint::config::LintConfig;
//! use cmlint::rules::RuleEngine;
//!
//! let engine = RuleEngine::new(LintConfig::load().unwrap()).unwrap();
//! let result = engine
//!     .validate_string("feat(core): add retry logic\n\nAuthor: Jane Doe <jane@example.com>\n\nTesting: added unit tests.")
//!     .unwrap();
//! assert!(result.is_valid());
//! ```

// Module declarations
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod hooks;
pub mod plugins;
pub mod rules;

// Re-exports for convenience
pub use config::LintConfig;
pub use error::{CmlintError, Result};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of cmlint.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
