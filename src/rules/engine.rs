// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine for commit validation.

use crate::commit::{CommitMessage, HeaderParser};
use crate::config::{Level, LintConfig};
use crate::error::{CmlintError, ConfigError, Result};
use crate::git;

use super::ignore::IgnoreMatcher;
use super::registry::RuleRegistry;
use super::validator::{ValidationIssue, ValidationResult};

/// Rule engine for validating commit messages.
#[derive(Debug)]
pub struct RuleEngine {
    config: LintConfig,
    registry: RuleRegistry,
    parser: HeaderParser,
    ignores: IgnoreMatcher,
}

impl RuleEngine {
    /// Create a rule engine, resolving and checking the configuration.
    ///
    /// Every rule named in the table must be defined by the built-in
    /// catalogue or an activated plugin, and every enabled rule's value
    /// must have the shape the rule expects.
    pub fn new(config: LintConfig) -> Result<Self> {
        let config = config.resolve()?;
        let registry = RuleRegistry::for_config(&config)?;

        for (name, setting) in &config.rules {
            let rule = registry.get(name).ok_or_else(|| {
                CmlintError::Config(ConfigError::UnknownRule { rule: name.clone() })
            })?;
            if setting.is_enabled() {
                rule.validate_value(setting.value.as_ref())?;
            }
        }

        let parser = HeaderParser::new(&config.parser_preset())?;
        let ignores = IgnoreMatcher::new(&config)?;

        tracing::debug!(
            "Rule engine ready: {} configured rules, {} available",
            config.rules.len(),
            registry.len()
        );

        Ok(Self {
            config,
            registry,
            parser,
            ignores,
        })
    }

    /// The resolved configuration.
    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Every rule available under the configuration.
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Validate a parsed commit message.
    pub fn validate(&self, message: &CommitMessage) -> Result<ValidationResult> {
        let mut result = ValidationResult::new(message.raw.clone());

        for (name, setting) in &self.config.rules {
            if !setting.is_enabled() {
                continue;
            }
            let Some(rule) = self.registry.get(name) else {
                continue;
            };

            let outcome = rule.check(message, setting.applicability, setting.value.as_ref())?;
            tracing::debug!("Rule {} -> {}", name, outcome.valid);
            if outcome.valid {
                continue;
            }

            let issue = ValidationIssue {
                code: name.clone(),
                message: outcome.message,
                suggestion: rule.suggestion(),
                is_error: setting.level == Level::Error,
            };
            if issue.is_error {
                result.errors.push(issue);
            } else {
                result.warnings.push(issue);
            }
        }

        Ok(result)
    }

    /// Validate a commit message string.
    pub fn validate_string(&self, message: &str) -> Result<ValidationResult> {
        if self.ignores.is_ignored(message) {
            tracing::debug!("Message matched an ignore pattern");
            return Ok(ValidationResult::ignored(message.trim().to_string()));
        }

        let parsed = self.parser.parse(message)?;
        self.validate(&parsed)
    }

    /// Validate a recorded commit.
    ///
    /// A message that cannot be parsed is reported as a rejected result
    /// rather than an error, so one bad commit does not hide the rest.
    pub fn validate_commit(&self, sha: String, message: &str) -> Result<ValidationResult> {
        let mut result = match self.validate_string(message) {
            Ok(result) => result,
            Err(CmlintError::Commit(e)) => {
                tracing::debug!("Commit {} has an unparsable message: {}", sha, e);
                ValidationResult::unparsable(message.to_string(), e.to_string())
            }
            Err(e) => return Err(e),
        };
        result.commit_sha = Some(sha);
        Ok(result)
    }

    /// Check a specific commit by reference.
    pub fn check_commit(&self, reference: &str) -> Result<ValidationResult> {
        let (sha, message) = git::get_commit(reference)?;
        self.validate_commit(sha, &message)
    }

    /// Check a range of commits.
    pub fn check_range(&self, range: &str) -> Result<Vec<ValidationResult>> {
        git::get_commit_range(range)?
            .into_iter()
            .map(|(oid, message)| self.validate_commit(oid, &message))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_config, parse_config, Applicability, RuleSetting};
    use crate::error::PluginError;

    const ACCEPTED: &str =
        "feat(core): add retry logic\n\nAuthor: Jane Doe <jane@example.com>\n\nTesting: added unit tests.";

    fn engine() -> RuleEngine {
        RuleEngine::new(default_config()).unwrap()
    }

    fn failing_rules(result: &ValidationResult) -> Vec<&str> {
        result.errors.iter().map(|e| e.code.as_str()).collect()
    }

    #[test]
    fn test_accepts_governed_message() {
        let result = engine().validate_string(ACCEPTED).unwrap();
        assert!(result.is_valid(), "{:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_rejects_header_without_type() {
        let message = ACCEPTED.replace("feat(core): add retry logic", "update stuff");
        let result = engine().validate_string(&message).unwrap();
        assert!(!result.is_valid());
        let failing = failing_rules(&result);
        assert!(failing.contains(&"type-empty"));
        assert!(failing.contains(&"subject-empty"));
    }

    #[test]
    fn test_rejects_body_without_author_testing() {
        let result = engine().validate_string("fix: handle null input\n\nFixed a bug.").unwrap();
        assert!(!result.is_valid());
        let failing = failing_rules(&result);
        assert!(failing.contains(&"body-author-testing"));
        assert!(failing.contains(&"body-min-length"));
        let issue = result
            .errors
            .iter()
            .find(|e| e.code == "body-author-testing")
            .unwrap();
        assert!(issue.suggestion.is_some());
    }

    #[test]
    fn test_rejects_empty_body() {
        let result = engine().validate_string("fix: handle null input").unwrap();
        let failing = failing_rules(&result);
        assert!(failing.contains(&"body-empty"));
        assert!(failing.contains(&"body-author-testing"));
    }

    #[test]
    fn test_header_length_boundary() {
        let body = "\n\nAuthor: Jane Doe <jane@example.com>\n\nTesting: added unit tests.";

        let exact = format!("feat: {}", "a".repeat(66));
        let result = engine().validate_string(&format!("{}{}", exact, body)).unwrap();
        assert!(result.is_valid(), "{:?}", result.errors);

        let over = format!("feat: {}", "a".repeat(67));
        let result = engine().validate_string(&format!("{}{}", over, body)).unwrap();
        assert_eq!(failing_rules(&result), vec!["header-max-length"]);
    }

    #[test]
    fn test_rejects_type_outside_enum() {
        let body = "\n\nAuthor: Jane Doe <jane@example.com>\n\nTesting: added unit tests.";
        for header in ["style: reformat", "ci: bump runner", "Feat: add x", "FIX: y"] {
            let result = engine().validate_string(&format!("{}{}", header, body)).unwrap();
            assert!(
                failing_rules(&result).contains(&"type-enum"),
                "{} not rejected by type-enum",
                header
            );
        }
    }

    #[test]
    fn test_warnings_do_not_reject() {
        // Missing blank line after the header is a warning in the base set
        let message = "feat: add x\nAuthor: Jane Doe <jane@example.com>\nTesting: ran tests.";
        let result = engine().validate_string(message).unwrap();
        assert!(result.is_valid(), "{:?}", result.errors);
        assert!(result.warnings.iter().any(|w| w.code == "body-leading-blank"));
    }

    #[test]
    fn test_off_rules_are_skipped() {
        let mut config = default_config();
        config.rules.insert(
            "body-author-testing".to_string(),
            RuleSetting::new(Level::Off, Applicability::Always, None),
        );
        let engine = RuleEngine::new(config).unwrap();
        let result = engine
            .validate_string("fix: handle null input\n\nFixed a bug in the parser.")
            .unwrap();
        assert!(result.is_valid(), "{:?}", result.errors);
    }

    #[test]
    fn test_ignored_message() {
        let result = engine().validate_string("Merge branch 'main' into dev").unwrap();
        assert!(result.ignored);
        assert!(result.is_valid());
    }

    #[test]
    fn test_empty_message_is_error() {
        assert!(engine().validate_string("\n# just a comment\n").is_err());
    }

    #[test]
    fn test_empty_commit_is_rejected_not_error() {
        let result = engine()
            .validate_commit("0123456789abcdef".to_string(), "")
            .unwrap();
        assert!(!result.is_valid());
        assert_eq!(failing_rules(&result), vec!["message-empty"]);
        assert_eq!(result.commit_sha.as_deref(), Some("0123456789abcdef"));

        let result = engine()
            .validate_commit("fedcba".to_string(), ACCEPTED)
            .unwrap();
        assert!(result.is_valid());
    }

    #[test]
    fn test_unknown_rule_is_config_error() {
        let config = parse_config(
            r#"
plugins = []

[rules]
body-author-testing = [2, "always"]
"#,
        )
        .unwrap();
        assert!(matches!(
            RuleEngine::new(config),
            Err(CmlintError::Config(ConfigError::UnknownRule { .. }))
        ));
    }

    #[test]
    fn test_unknown_plugin_is_error() {
        let config = parse_config(r#"plugins = ["wasm"]"#).unwrap();
        assert!(matches!(
            RuleEngine::new(config),
            Err(CmlintError::Plugin(PluginError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_bad_rule_value_is_config_error() {
        let config = parse_config(
            r#"
[rules]
header-max-length = [2, "always", "seventy-two"]
"#,
        )
        .unwrap();
        assert!(matches!(
            RuleEngine::new(config),
            Err(CmlintError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_custom_header_pattern() {
        let config = parse_config(
            r#"
extends = []
plugins = []

[parser_preset]
header_pattern = '^\[(\w+)\] (.+)$'
header_correspondence = ["type", "subject"]

[rules]
type-enum = [2, "always", ["feat", "fix"]]
type-empty = [2, "never"]
"#,
        )
        .unwrap();
        let engine = RuleEngine::new(config).unwrap();
        assert!(engine.validate_string("[feat] add x").unwrap().is_valid());
        assert!(!engine.validate_string("feat: add x").unwrap().is_valid());
    }
}
