// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in validation rules.

use crate::commit::CommitMessage;
use crate::config::Applicability;
use crate::error::{CmlintError, ConfigError, Result};

use super::case::Case;

/// Outcome of evaluating one rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    /// Whether the message satisfied the rule.
    pub valid: bool,
    /// Diagnostic shown when the rule fails.
    pub message: String,
}

impl RuleOutcome {
    /// Build an outcome from a rule condition and its applicability.
    pub fn from_condition(when: Applicability, condition: bool, message: String) -> Self {
        Self {
            valid: when.holds(condition),
            message,
        }
    }

    pub fn pass() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }
}

/// A named validation rule.
pub trait Rule: std::fmt::Debug + Send + Sync {
    /// Get the rule name.
    fn name(&self) -> &str;

    /// One-line description for `list-rules`.
    fn description(&self) -> &str;

    /// Hint printed under a failure.
    fn suggestion(&self) -> Option<String> {
        None
    }

    /// Reject a configured value of the wrong shape.
    fn validate_value(&self, _value: Option<&toml::Value>) -> Result<()> {
        Ok(())
    }

    /// Check the commit message against the rule.
    fn check(
        &self,
        message: &CommitMessage,
        when: Applicability,
        value: Option<&toml::Value>,
    ) -> Result<RuleOutcome>;
}

/// Part of a commit message a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Type,
    Scope,
    Subject,
    Header,
    Body,
    Footer,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Type => "type",
            Field::Scope => "scope",
            Field::Subject => "subject",
            Field::Header => "header",
            Field::Body => "body",
            Field::Footer => "footer",
        }
    }

    /// The field's text, if present and non-empty.
    pub fn get<'a>(&self, message: &'a CommitMessage) -> Option<&'a str> {
        let value = match self {
            Field::Type => message.commit_type.as_deref(),
            Field::Scope => message.scope.as_deref(),
            Field::Subject => message.subject.as_deref(),
            Field::Header => Some(message.header.as_str()),
            Field::Body => message.body.as_deref(),
            Field::Footer => message.footer.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }
}

fn invalid_value(rule: &str, message: impl Into<String>) -> CmlintError {
    CmlintError::Config(ConfigError::InvalidValue {
        key: rule.to_string(),
        message: message.into(),
    })
}

/// Read a non-negative integer rule value.
pub fn value_usize(rule: &str, value: Option<&toml::Value>) -> Result<usize> {
    match value {
        Some(toml::Value::Integer(n)) if *n >= 0 => Ok(*n as usize),
        Some(other) => Err(invalid_value(
            rule,
            format!("expected a non-negative number, got {}", other),
        )),
        None => Err(invalid_value(rule, "a numeric value is required")),
    }
}

/// Read a string rule value.
pub fn value_str<'a>(rule: &str, value: Option<&'a toml::Value>) -> Result<&'a str> {
    match value {
        Some(toml::Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(invalid_value(rule, format!("expected a string, got {}", other))),
        None => Err(invalid_value(rule, "a string value is required")),
    }
}

/// Read a list of strings; a single string counts as a one-element list.
pub fn value_list(rule: &str, value: Option<&toml::Value>) -> Result<Vec<String>> {
    match value {
        Some(toml::Value::String(s)) => Ok(vec![s.clone()]),
        Some(toml::Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                toml::Value::String(s) => Ok(s.clone()),
                other => Err(invalid_value(
                    rule,
                    format!("list entries must be strings, got {}", other),
                )),
            })
            .collect(),
        Some(other) => Err(invalid_value(rule, format!("expected a list, got {}", other))),
        None => Err(invalid_value(rule, "a list value is required")),
    }
}

fn value_cases(rule: &str, value: Option<&toml::Value>) -> Result<Vec<Case>> {
    value_list(rule, value)?
        .iter()
        .map(|s| s.parse::<Case>().map_err(|e| invalid_value(rule, e)))
        .collect()
}

/// `<field>-enum`: the field must be one of the listed tokens.
#[derive(Debug)]
pub struct EnumRule {
    name: &'static str,
    field: Field,
}

impl Rule for EnumRule {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "restrict the field to an enumerated list of tokens"
    }

    fn validate_value(&self, value: Option<&toml::Value>) -> Result<()> {
        value_list(self.name, value).map(|_| ())
    }

    fn check(
        &self,
        message: &CommitMessage,
        when: Applicability,
        value: Option<&toml::Value>,
    ) -> Result<RuleOutcome> {
        let allowed = value_list(self.name, value)?;
        let Some(actual) = self.field.get(message) else {
            return Ok(RuleOutcome::pass());
        };

        Ok(RuleOutcome::from_condition(
            when,
            allowed.iter().any(|a| a == actual),
            format!(
                "{} {} be one of [{}]",
                self.field.as_str(),
                when.verb(),
                allowed.join(", ")
            ),
        ))
    }
}

/// `<field>-case`: the field must (not) be written in one of the cases.
#[derive(Debug)]
pub struct CaseRule {
    name: &'static str,
    field: Field,
}

impl Rule for CaseRule {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "require or forbid letter cases for the field"
    }

    fn validate_value(&self, value: Option<&toml::Value>) -> Result<()> {
        value_cases(self.name, value).map(|_| ())
    }

    fn check(
        &self,
        message: &CommitMessage,
        when: Applicability,
        value: Option<&toml::Value>,
    ) -> Result<RuleOutcome> {
        let cases = value_cases(self.name, value)?;
        let actual = match self.field.get(message) {
            Some(actual) if actual.starts_with(|c: char| c.is_ascii_alphabetic()) => actual,
            _ => return Ok(RuleOutcome::pass()),
        };

        let names: Vec<&str> = cases.iter().map(Case::as_str).collect();
        Ok(RuleOutcome::from_condition(
            when,
            cases.iter().any(|c| c.matches(actual)),
            format!(
                "{} {} be {}",
                self.field.as_str(),
                when.verb(),
                names.join(", ")
            ),
        ))
    }
}

/// `<field>-empty`: the field must (not) be empty.
#[derive(Debug)]
pub struct EmptyRule {
    name: &'static str,
    field: Field,
}

impl Rule for EmptyRule {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "require the field to be empty, or with \"never\", present"
    }

    fn check(
        &self,
        message: &CommitMessage,
        when: Applicability,
        _value: Option<&toml::Value>,
    ) -> Result<RuleOutcome> {
        Ok(RuleOutcome::from_condition(
            when,
            self.field.get(message).is_none(),
            format!("{} {} be empty", self.field.as_str(), when.verb()),
        ))
    }
}

/// `<field>-max-length`: at most N characters.
#[derive(Debug)]
pub struct MaxLengthRule {
    name: &'static str,
    field: Field,
}

impl Rule for MaxLengthRule {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "limit the field to a maximum number of characters"
    }

    fn validate_value(&self, value: Option<&toml::Value>) -> Result<()> {
        value_usize(self.name, value).map(|_| ())
    }

    fn check(
        &self,
        message: &CommitMessage,
        when: Applicability,
        value: Option<&toml::Value>,
    ) -> Result<RuleOutcome> {
        let max = value_usize(self.name, value)?;
        let Some(actual) = self.field.get(message) else {
            return Ok(RuleOutcome::pass());
        };
        let len = actual.chars().count();

        Ok(RuleOutcome::from_condition(
            when,
            len <= max,
            format!(
                "{} must not be longer than {} characters, current length is {}",
                self.field.as_str(),
                max,
                len
            ),
        ))
    }
}

/// `<field>-min-length`: at least N characters.
#[derive(Debug)]
pub struct MinLengthRule {
    name: &'static str,
    field: Field,
}

impl Rule for MinLengthRule {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "require the field to have a minimum number of characters"
    }

    fn validate_value(&self, value: Option<&toml::Value>) -> Result<()> {
        value_usize(self.name, value).map(|_| ())
    }

    fn check(
        &self,
        message: &CommitMessage,
        when: Applicability,
        value: Option<&toml::Value>,
    ) -> Result<RuleOutcome> {
        let min = value_usize(self.name, value)?;
        let Some(actual) = self.field.get(message) else {
            return Ok(RuleOutcome::pass());
        };
        let len = actual.chars().count();

        Ok(RuleOutcome::from_condition(
            when,
            len >= min,
            format!(
                "{} must have at least {} characters, current length is {}",
                self.field.as_str(),
                min,
                len
            ),
        ))
    }
}

/// `<field>-max-line-length`: every line at most N characters.
#[derive(Debug)]
pub struct MaxLineLengthRule {
    name: &'static str,
    field: Field,
}

impl Rule for MaxLineLengthRule {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "limit every line of the field to a maximum number of characters"
    }

    fn validate_value(&self, value: Option<&toml::Value>) -> Result<()> {
        value_usize(self.name, value).map(|_| ())
    }

    fn check(
        &self,
        message: &CommitMessage,
        when: Applicability,
        value: Option<&toml::Value>,
    ) -> Result<RuleOutcome> {
        let max = value_usize(self.name, value)?;
        let Some(actual) = self.field.get(message) else {
            return Ok(RuleOutcome::pass());
        };
        let longest = actual.lines().map(|l| l.chars().count()).max().unwrap_or(0);

        Ok(RuleOutcome::from_condition(
            when,
            longest <= max,
            format!(
                "{}'s lines must not be longer than {} characters",
                self.field.as_str(),
                max
            ),
        ))
    }
}

/// `<field>-full-stop`: the field must (not) end with the given string.
#[derive(Debug)]
pub struct FullStopRule {
    name: &'static str,
    field: Field,
}

impl Rule for FullStopRule {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "require or forbid a trailing full stop"
    }

    fn validate_value(&self, value: Option<&toml::Value>) -> Result<()> {
        match value {
            None => Ok(()),
            some => value_str(self.name, some).map(|_| ()),
        }
    }

    fn check(
        &self,
        message: &CommitMessage,
        when: Applicability,
        value: Option<&toml::Value>,
    ) -> Result<RuleOutcome> {
        let stop = match value {
            None => ".",
            some => value_str(self.name, some)?,
        };
        let Some(actual) = self.field.get(message) else {
            return Ok(RuleOutcome::pass());
        };

        Ok(RuleOutcome::from_condition(
            when,
            actual.ends_with(stop),
            format!(
                "{} {} end with full stop '{}'",
                self.field.as_str(),
                when.verb(),
                stop
            ),
        ))
    }
}

/// `<field>-leading-blank`: a blank line must precede the field.
#[derive(Debug)]
pub struct LeadingBlankRule {
    name: &'static str,
    field: Field,
}

impl Rule for LeadingBlankRule {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "require a blank line before the field"
    }

    fn check(
        &self,
        message: &CommitMessage,
        when: Applicability,
        _value: Option<&toml::Value>,
    ) -> Result<RuleOutcome> {
        if self.field.get(message).is_none() {
            return Ok(RuleOutcome::pass());
        }
        let blank = match self.field {
            Field::Footer => message.footer_leading_blank,
            _ => message.body_leading_blank,
        };

        Ok(RuleOutcome::from_condition(
            when,
            blank,
            format!("{} {} have a leading blank line", self.field.as_str(), when.verb()),
        ))
    }
}

/// All built-in rules.
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(EnumRule {
            name: "type-enum",
            field: Field::Type,
        }),
        Box::new(CaseRule {
            name: "type-case",
            field: Field::Type,
        }),
        Box::new(EmptyRule {
            name: "type-empty",
            field: Field::Type,
        }),
        Box::new(EnumRule {
            name: "scope-enum",
            field: Field::Scope,
        }),
        Box::new(CaseRule {
            name: "scope-case",
            field: Field::Scope,
        }),
        Box::new(EmptyRule {
            name: "scope-empty",
            field: Field::Scope,
        }),
        Box::new(EmptyRule {
            name: "subject-empty",
            field: Field::Subject,
        }),
        Box::new(CaseRule {
            name: "subject-case",
            field: Field::Subject,
        }),
        Box::new(FullStopRule {
            name: "subject-full-stop",
            field: Field::Subject,
        }),
        Box::new(MaxLengthRule {
            name: "header-max-length",
            field: Field::Header,
        }),
        Box::new(MinLengthRule {
            name: "header-min-length",
            field: Field::Header,
        }),
        Box::new(LeadingBlankRule {
            name: "body-leading-blank",
            field: Field::Body,
        }),
        Box::new(EmptyRule {
            name: "body-empty",
            field: Field::Body,
        }),
        Box::new(MinLengthRule {
            name: "body-min-length",
            field: Field::Body,
        }),
        Box::new(MaxLengthRule {
            name: "body-max-length",
            field: Field::Body,
        }),
        Box::new(MaxLineLengthRule {
            name: "body-max-line-length",
            field: Field::Body,
        }),
        Box::new(LeadingBlankRule {
            name: "footer-leading-blank",
            field: Field::Footer,
        }),
        Box::new(MaxLineLengthRule {
            name: "footer-max-line-length",
            field: Field::Footer,
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Applicability::{Always, Never};

    fn parse(raw: &str) -> CommitMessage {
        CommitMessage::parse(raw).unwrap()
    }

    fn rule(name: &str) -> Box<dyn Rule> {
        builtin_rules()
            .into_iter()
            .find(|r| r.name() == name)
            .unwrap()
    }

    fn check(
        r: &dyn Rule,
        raw: &str,
        when: Applicability,
        value: Option<&toml::Value>,
    ) -> RuleOutcome {
        r.check(&parse(raw), when, value).unwrap()
    }

    fn types() -> toml::Value {
        toml::Value::from(vec!["feat", "fix", "docs", "test", "chore", "refactor", "perf"])
    }

    #[test]
    fn test_type_enum() {
        let r = rule("type-enum");
        let value = types();
        let ok = check(r.as_ref(), "feat: add x", Always, Some(&value));
        assert!(ok.valid);

        let bad = check(r.as_ref(), "style: fmt", Always, Some(&value));
        assert!(!bad.valid);
        assert!(bad.message.contains("feat, fix"));
    }

    #[test]
    fn test_type_enum_is_case_sensitive() {
        let r = rule("type-enum");
        let value = types();
        for raw in ["Feat: add x", "FIX: a bug"] {
            let outcome = check(r.as_ref(), raw, Always, Some(&value));
            assert!(!outcome.valid, "{} accepted", raw);
        }
    }

    #[test]
    fn test_type_enum_passes_without_type() {
        let r = rule("type-enum");
        let value = types();
        let outcome = check(r.as_ref(), "update stuff", Always, Some(&value));
        assert!(outcome.valid);
    }

    #[test]
    fn test_type_empty_never() {
        let r = rule("type-empty");
        let outcome = check(r.as_ref(), "update stuff", Never, None);
        assert!(!outcome.valid);
        assert_eq!(outcome.message, "type must not be empty");
    }

    #[test]
    fn test_header_max_length_boundary() {
        let r = rule("header-max-length");
        let value = toml::Value::from(72);

        let exact = format!("feat: {}", "a".repeat(66));
        assert_eq!(exact.chars().count(), 72);
        assert!(check(r.as_ref(), &exact, Always, Some(&value)).valid);

        let over = format!("feat: {}", "a".repeat(67));
        let outcome = check(r.as_ref(), &over, Always, Some(&value));
        assert!(!outcome.valid);
        assert!(outcome.message.contains("73"));
    }

    #[test]
    fn test_body_empty_never() {
        let r = rule("body-empty");
        assert!(!check(r.as_ref(), "fix: a bug", Never, None).valid);
        assert!(check(r.as_ref(), "fix: a bug\n\nsome body", Never, None).valid);
    }

    #[test]
    fn test_body_min_length() {
        let r = rule("body-min-length");
        let value = toml::Value::from(20);
        let short = check(r.as_ref(), "fix: a\n\nFixed a bug.", Always, Some(&value));
        assert!(!short.valid);
        // Absence is left to body-empty
        assert!(check(r.as_ref(), "fix: a", Always, Some(&value)).valid);
    }

    #[test]
    fn test_subject_case_never() {
        let r = rule("subject-case");
        let value =
            toml::Value::from(vec!["sentence-case", "start-case", "pascal-case", "upper-case"]);
        assert!(check(r.as_ref(), "feat: add retry logic", Never, Some(&value)).valid);
        assert!(!check(r.as_ref(), "feat: Add retry logic", Never, Some(&value)).valid);
        // Non-letter start is skipped
        assert!(check(r.as_ref(), "feat: 2FA support", Never, Some(&value)).valid);
    }

    #[test]
    fn test_subject_full_stop() {
        let r = rule("subject-full-stop");
        let value = toml::Value::from(".");
        assert!(!check(r.as_ref(), "fix: a bug.", Never, Some(&value)).valid);
        assert!(check(r.as_ref(), "fix: a bug", Never, Some(&value)).valid);
    }

    #[test]
    fn test_leading_blank() {
        let r = rule("body-leading-blank");
        assert!(!check(r.as_ref(), "fix: a\nbody", Always, None).valid);
        assert!(check(r.as_ref(), "fix: a\n\nbody", Always, None).valid);
    }

    #[test]
    fn test_body_max_line_length() {
        let r = rule("body-max-line-length");
        let value = toml::Value::from(10);
        let raw = format!("fix: a\n\nshort\n{}", "x".repeat(11));
        assert!(!check(r.as_ref(), &raw, Always, Some(&value)).valid);
    }

    #[test]
    fn test_validate_value_shapes() {
        assert!(rule("header-max-length").validate_value(Some(&toml::Value::from("72"))).is_err());
        assert!(rule("header-max-length").validate_value(None).is_err());
        assert!(rule("type-enum").validate_value(Some(&toml::Value::from(3))).is_err());
        assert!(rule("subject-case")
            .validate_value(Some(&toml::Value::from("title-case")))
            .is_err());
        assert!(rule("subject-full-stop").validate_value(None).is_ok());
        assert!(rule("body-empty").validate_value(None).is_ok());
    }

    #[test]
    fn test_rule_names_unique() {
        let rules = builtin_rules();
        let mut names: Vec<&str> = rules.iter().map(|r| r.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), rules.len());
    }
}
