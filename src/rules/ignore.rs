// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Messages that are never linted.

use crate::config::LintConfig;
use crate::error::{CmlintError, ConfigError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Messages git and common workflows generate.
    static ref DEFAULT_IGNORES: Vec<Regex> = [
        r"^Merge (pull request|branch|remote-tracking branch|tag) ",
        r"^Merge .+ into .+",
        r"^Merged .+ (in|into) .+",
        r"^(R|r)evert ",
        r"^(fixup|squash|amend)! ",
        r"^Automatic merge",
        r"^Auto-merged .+ into .+",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();
}

/// Decides whether a raw message should skip validation.
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    use_defaults: bool,
    custom: Vec<Regex>,
}

impl IgnoreMatcher {
    /// Compile the configured ignore patterns.
    pub fn new(config: &LintConfig) -> Result<Self> {
        let custom = config
            .ignores
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| {
                    CmlintError::Config(ConfigError::InvalidValue {
                        key: "ignores".to_string(),
                        message: format!("'{}': {}", p, e),
                    })
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            use_defaults: config.default_ignores,
            custom,
        })
    }

    /// Check whether the message is exempt from linting.
    pub fn is_ignored(&self, message: &str) -> bool {
        let message = message.trim();
        let defaults = self.use_defaults && DEFAULT_IGNORES.iter().any(|r| r.is_match(message));
        defaults || self.custom.iter().any(|r| r.is_match(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(default_ignores: bool, ignores: &[&str]) -> IgnoreMatcher {
        let config = LintConfig {
            default_ignores,
            ignores: ignores.iter().map(|s| s.to_string()).collect(),
            ..LintConfig::default()
        };
        IgnoreMatcher::new(&config).unwrap()
    }

    #[test]
    fn test_default_ignores() {
        let m = matcher(true, &[]);
        assert!(m.is_ignored("Merge branch 'main' into feature"));
        assert!(m.is_ignored("Merge pull request #42 from org/branch"));
        assert!(m.is_ignored("Revert \"feat: add x\"\n\nThis reverts commit abc."));
        assert!(m.is_ignored("fixup! feat: add x"));
        assert!(m.is_ignored("squash! fix: y"));
        assert!(!m.is_ignored("feat: merge settings"));
        assert!(!m.is_ignored("update stuff"));
    }

    #[test]
    fn test_defaults_disabled() {
        let m = matcher(false, &[]);
        assert!(!m.is_ignored("fixup! feat: add x"));
    }

    #[test]
    fn test_custom_ignores() {
        let m = matcher(false, &[r"^chore\(release\): v\d+"]);
        assert!(m.is_ignored("chore(release): v1.2.0"));
        assert!(!m.is_ignored("chore: bump deps"));
    }

    #[test]
    fn test_invalid_ignore_pattern() {
        let config = LintConfig {
            ignores: vec!["(".to_string()],
            ..LintConfig::default()
        };
        assert!(matches!(
            IgnoreMatcher::new(&config),
            Err(CmlintError::Config(ConfigError::InvalidValue { .. }))
        ));
    }
}
