// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation result types.

use crate::cli::args::OutputFormat;
use console::{style, Style};

/// A single validation issue.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// Name of the failing rule.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    pub suggestion: Option<String>,
    /// Whether this is an error (true) or warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    /// Format the issue for terminal output.
    pub fn format(&self) -> String {
        let prefix = if self.is_error {
            style("✖").red().bold()
        } else {
            style("⚠").yellow().bold()
        };

        let code_style = if self.is_error {
            Style::new().red()
        } else {
            Style::new().yellow()
        };

        let mut output = format!(
            "{} {} {}",
            prefix,
            self.message,
            code_style.apply_to(format!("[{}]", self.code))
        );

        if let Some(ref suggestion) = self.suggestion {
            for line in suggestion.lines() {
                output.push_str(&format!("\n  {} {}", style("→").dim(), style(line).dim()));
            }
        }

        output
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "rule": self.code,
            "message": self.message,
            "suggestion": self.suggestion,
        })
    }
}

/// Result of validating a commit message.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// The checked message.
    pub message: String,
    /// Commit SHA if validating an existing commit.
    pub commit_sha: Option<String>,
    /// Whether the message matched an ignore pattern.
    pub ignored: bool,
    /// Validation errors.
    pub errors: Vec<ValidationIssue>,
    /// Validation warnings.
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a new validation result.
    pub fn new(message: String) -> Self {
        Self {
            message,
            commit_sha: None,
            ignored: false,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Result for a message that skipped validation.
    pub fn ignored(message: String) -> Self {
        Self {
            ignored: true,
            ..Self::new(message)
        }
    }

    /// Rejected result for a message that could not be parsed.
    pub fn unparsable(message: String, reason: String) -> Self {
        let mut result = Self::new(message);
        result.errors.push(ValidationIssue {
            code: "message-empty".to_string(),
            message: reason,
            suggestion: None,
            is_error: true,
        });
        result
    }

    /// Check if the validation passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the total number of issues.
    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Print the result to stdout.
    pub fn print(&self, format: Option<OutputFormat>, help_url: Option<&str>) {
        match format {
            Some(OutputFormat::Json) => println!(
                "{}",
                serde_json::to_string_pretty(&self.to_json()).unwrap_or_default()
            ),
            _ => self.print_text(help_url),
        }
    }

    /// Print in text format.
    fn print_text(&self, help_url: Option<&str>) {
        let first_line = self.message.lines().next().unwrap_or("");
        match self.commit_sha {
            Some(ref sha) => {
                let short_sha = &sha[..7.min(sha.len())];
                let status = if self.is_valid() {
                    style("✔").green().bold()
                } else {
                    style("✖").red().bold()
                };
                println!("{} {} {}", status, style(short_sha).cyan(), first_line);
            }
            None => println!("{} input: {}", style("⧗").dim(), first_line),
        }

        if self.ignored {
            println!("  {}", style("ignored").dim());
            return;
        }

        for error in &self.errors {
            println!("  {}", error.format());
        }

        for warning in &self.warnings {
            println!("  {}", warning.format());
        }

        if self.issue_count() > 0 {
            println!("  {}", self.summary());
            if let (false, Some(url)) = (self.is_valid(), help_url) {
                println!("  {} Get help: {}", style("ⓘ").dim(), url);
            }
        }
    }

    /// JSON representation.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "valid": self.is_valid(),
            "ignored": self.ignored,
            "commit": self.commit_sha,
            "input": self.message,
            "errors": self.errors.iter().map(ValidationIssue::to_json).collect::<Vec<_>>(),
            "warnings": self.warnings.iter().map(ValidationIssue::to_json).collect::<Vec<_>>(),
        })
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.ignored {
            return "Ignored".to_string();
        }
        if self.is_valid() {
            if self.warnings.is_empty() {
                "Valid".to_string()
            } else {
                format!("Valid ({} warnings)", self.warnings.len())
            }
        } else {
            format!(
                "Invalid ({} errors, {} warnings)",
                self.errors.len(),
                self.warnings.len()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(code: &str, is_error: bool) -> ValidationIssue {
        ValidationIssue {
            code: code.to_string(),
            message: format!("{} failed", code),
            suggestion: None,
            is_error,
        }
    }

    #[test]
    fn test_validation_result_valid() {
        let result = ValidationResult::new("feat: test".to_string());
        assert!(result.is_valid());
        assert_eq!(result.issue_count(), 0);
    }

    #[test]
    fn test_validation_result_with_errors() {
        let mut result = ValidationResult::new("test".to_string());
        result.errors.push(issue("type-empty", true));

        assert!(!result.is_valid());
        assert_eq!(result.issue_count(), 1);
    }

    #[test]
    fn test_validation_issue_format() {
        let issue = ValidationIssue {
            code: "body-author-testing".to_string(),
            message: "Test message".to_string(),
            suggestion: Some("Fix it".to_string()),
            is_error: true,
        };

        let formatted = issue.format();
        assert!(formatted.contains("body-author-testing"));
        assert!(formatted.contains("Test message"));
        assert!(formatted.contains("Fix it"));
    }

    #[test]
    fn test_summary() {
        let mut result = ValidationResult::new("test".to_string());
        assert!(result.summary().contains("Valid"));

        result.warnings.push(issue("body-leading-blank", false));
        assert!(result.summary().contains("1 warning"));

        result.errors.push(issue("type-enum", true));
        assert!(result.summary().contains("Invalid"));
    }

    #[test]
    fn test_ignored_result() {
        let result = ValidationResult::ignored("Merge branch 'x'".to_string());
        assert!(result.is_valid());
        assert_eq!(result.summary(), "Ignored");
    }

    #[test]
    fn test_json_shape() {
        let mut result = ValidationResult::new("update stuff".to_string());
        result.errors.push(issue("type-empty", true));
        let json = result.to_json();
        assert_eq!(json["valid"], serde_json::json!(false));
        assert_eq!(json["errors"][0]["rule"], serde_json::json!("type-empty"));
    }
}
