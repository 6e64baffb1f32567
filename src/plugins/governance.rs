// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Governance plugin: attribution and testing notes in the commit body.

use crate::commit::CommitMessage;
use crate::config::Applicability;
use crate::error::{CmlintError, ConfigError, Result};
use crate::rules::{value_str, Rule, RuleOutcome};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A line starting `Author: Name <user@host>`.
    static ref AUTHOR_REGEX: Regex = Regex::new(r"(?m)^Author: .+ <.+@.+>").unwrap();

    /// The testing-notes marker.
    static ref TESTING_REGEX: Regex = Regex::new(r"\bTesting:").unwrap();
}

/// Rules contributed by the governance plugin.
pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![Box::new(BodyAuthorTestingRule), Box::new(BodyPatternRule)]
}

/// Requires both an author line and a `Testing:` marker in the body.
///
/// The two requirements are independent: each may sit on any line of the
/// body, but the author line itself cannot wrap.
#[derive(Debug)]
pub struct BodyAuthorTestingRule;

impl BodyAuthorTestingRule {
    /// Evaluate both predicates, returning `(has_author, has_testing)`.
    pub fn inspect(body: &str) -> (bool, bool) {
        (AUTHOR_REGEX.is_match(body), TESTING_REGEX.is_match(body))
    }
}

impl Rule for BodyAuthorTestingRule {
    fn name(&self) -> &str {
        "body-author-testing"
    }

    fn description(&self) -> &str {
        "require an 'Author: Name <email>' line and a 'Testing:' section in the body"
    }

    fn suggestion(&self) -> Option<String> {
        Some(
            "Add to the body, for example:\nAuthor: Jane Doe <jane@example.com>\nTesting: ran the unit tests"
                .to_string(),
        )
    }

    fn check(
        &self,
        message: &CommitMessage,
        when: Applicability,
        _value: Option<&toml::Value>,
    ) -> Result<RuleOutcome> {
        let (has_author, has_testing) = Self::inspect(message.body_text());

        let mut missing = Vec::new();
        if !has_author {
            missing.push("Author line");
        }
        if !has_testing {
            missing.push("Testing section");
        }

        let mut text = format!(
            "body {} include an 'Author: Name <email>' line and a 'Testing:' section",
            when.verb()
        );
        if when == Applicability::Always && !missing.is_empty() {
            text.push_str(&format!(" (missing: {})", missing.join(", ")));
        }

        Ok(RuleOutcome::from_condition(
            when,
            has_author && has_testing,
            text,
        ))
    }
}

/// The body must (not) match a configured pattern.
#[derive(Debug)]
pub struct BodyPatternRule;

impl BodyPatternRule {
    fn compile(&self, value: Option<&toml::Value>) -> Result<Regex> {
        let pattern = value_str(self.name(), value)?;
        Regex::new(pattern).map_err(|e| {
            CmlintError::Config(ConfigError::InvalidValue {
                key: self.name().to_string(),
                message: e.to_string(),
            })
        })
    }
}

impl Rule for BodyPatternRule {
    fn name(&self) -> &str {
        "body-pattern"
    }

    fn description(&self) -> &str {
        "require the body to match a regular expression"
    }

    fn validate_value(&self, value: Option<&toml::Value>) -> Result<()> {
        self.compile(value).map(|_| ())
    }

    fn check(
        &self,
        message: &CommitMessage,
        when: Applicability,
        value: Option<&toml::Value>,
    ) -> Result<RuleOutcome> {
        let pattern = self.compile(value)?;

        Ok(RuleOutcome::from_condition(
            when,
            pattern.is_match(message.body_text()),
            format!("body {} match pattern '{}'", when.verb(), pattern.as_str()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(raw: &str) -> RuleOutcome {
        let message = CommitMessage::parse(raw).unwrap();
        BodyAuthorTestingRule
            .check(&message, Applicability::Always, None)
            .unwrap()
    }

    #[test]
    fn test_author_and_testing_pass() {
        let outcome = check(
            "feat(core): add retry logic\n\nAuthor: Jane Doe <jane@example.com>\n\nTesting: added unit tests.",
        );
        assert!(outcome.valid);
    }

    #[test]
    fn test_same_line_also_passes() {
        let outcome = check("fix: x\n\nAuthor: A B <a@b.c> Testing: manual");
        assert!(outcome.valid);
    }

    #[test]
    fn test_missing_both() {
        let outcome = check("fix: a bug\n\nFixed a bug.");
        assert!(!outcome.valid);
        assert!(outcome.message.contains("Author"));
        assert!(outcome.message.contains("Testing"));
        assert!(outcome.message.contains("missing: Author line, Testing section"));
    }

    #[test]
    fn test_missing_testing_still_names_both() {
        let outcome = check("fix: a bug\n\nAuthor: Jane Doe <jane@example.com>");
        assert!(!outcome.valid);
        assert!(outcome.message.contains("'Author: Name <email>'"));
        assert!(outcome.message.contains("'Testing:'"));
        assert!(outcome.message.contains("missing: Testing section"));
    }

    #[test]
    fn test_missing_author() {
        let outcome = check("fix: a bug\n\nTesting: ran the suite");
        assert!(!outcome.valid);
        assert!(outcome.message.contains("missing: Author line"));
    }

    #[test]
    fn test_empty_body_fails() {
        let outcome = check("fix: a bug");
        assert!(!outcome.valid);
        assert_eq!(BodyAuthorTestingRule::inspect(""), (false, false));
    }

    #[test]
    fn test_malformed_author() {
        // No email
        assert!(!BodyAuthorTestingRule::inspect("Author: Jane Doe\nTesting: yes").0);
        // No at-sign
        assert!(!BodyAuthorTestingRule::inspect("Author: Jane <jane.example.com>").0);
        // Email on the next line
        assert!(!BodyAuthorTestingRule::inspect("Author: Jane\n<jane@example.com>").0);
        // No name
        assert!(!BodyAuthorTestingRule::inspect("Author: <jane@example.com>").0);
    }

    #[test]
    fn test_author_must_start_a_line() {
        assert!(!BodyAuthorTestingRule::inspect("Co-Author: Jane Doe <jane@example.com>").0);
        assert!(!BodyAuthorTestingRule::inspect("See Author: Jane Doe <jane@example.com>").0);
        assert!(BodyAuthorTestingRule::inspect("Intro.\nAuthor: Jane Doe <jane@example.com>").0);
    }

    #[test]
    fn test_never_inverts() {
        let message = CommitMessage::parse("fix: a\n\nFixed a bug.").unwrap();
        let outcome = BodyAuthorTestingRule
            .check(&message, Applicability::Never, None)
            .unwrap();
        assert!(outcome.valid);
    }

    #[test]
    fn test_body_pattern() {
        let value = toml::Value::from(r"(?m)^Signed-off-by: .+");
        let message = CommitMessage::parse("fix: a\n\nbody\nSigned-off-by: Jane").unwrap();
        let outcome = BodyPatternRule
            .check(&message, Applicability::Always, Some(&value))
            .unwrap();
        assert!(outcome.valid);

        let message = CommitMessage::parse("fix: a").unwrap();
        let outcome = BodyPatternRule
            .check(&message, Applicability::Always, Some(&value))
            .unwrap();
        assert!(!outcome.valid);
    }

    #[test]
    fn test_body_pattern_rejects_lookaround() {
        let value = toml::Value::from(r"^(?=.*\bAuthor: .+ <.+@.+>\b)(?=.*\bTesting:\b).+");
        assert!(matches!(
            BodyPatternRule.validate_value(Some(&value)),
            Err(CmlintError::Config(ConfigError::InvalidValue { .. }))
        ));
        assert!(BodyPatternRule.validate_value(None).is_err());
    }
}
