// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message structure and parsing.

use crate::config::ParserPreset;
use crate::error::{CmlintError, CommitError, ConfigError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Lines that open the footer: breaking-change notes and issue references.
    static ref FOOTER_REGEX: Regex = Regex::new(
        r"^(?:BREAKING[ -]CHANGE: |(?i:close[sd]?|fix(?:e[sd])?|resolve[sd]?|refs?) #\d+)"
    ).unwrap();

    /// Parser for the default preset.
    static ref DEFAULT_PARSER: HeaderParser = HeaderParser::new(&ParserPreset::default())
        .expect("default header pattern compiles");
}

/// Marker line git inserts above the diff in `commit -v`.
const SCISSORS: &str = "# ------------------------ >8 ------------------------";

/// Header fields a parser preset may populate.
const HEADER_FIELDS: &[&str] = &["type", "scope", "subject"];

/// A parsed commit message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitMessage {
    /// The message after comment stripping.
    pub raw: String,
    /// First line.
    pub header: String,
    /// Commit type (feat, fix, etc.), if the header matched.
    pub commit_type: Option<String>,
    /// Optional scope.
    pub scope: Option<String>,
    /// Subject, if the header matched.
    pub subject: Option<String>,
    /// Free text between header and footer.
    pub body: Option<String>,
    /// Breaking-change notes and issue references.
    pub footer: Option<String>,
    /// Whether this is a breaking change.
    pub is_breaking: bool,
    /// Whether the line after the header is blank.
    pub body_leading_blank: bool,
    /// Whether the line before the footer is blank.
    pub footer_leading_blank: bool,
}

impl CommitMessage {
    /// Parse a commit message with the default parser preset.
    pub fn parse(message: &str) -> Result<Self> {
        DEFAULT_PARSER.parse(message)
    }

    /// Body text, or the empty string when there is none.
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }

    /// Header length in characters.
    pub fn header_len(&self) -> usize {
        self.header.chars().count()
    }
}

/// Splits messages into header/body/footer and decomposes the header.
#[derive(Debug, Clone)]
pub struct HeaderParser {
    pattern: Regex,
    correspondence: Vec<String>,
}

impl HeaderParser {
    /// Build a parser from a preset, validating its pattern and field names.
    pub fn new(preset: &ParserPreset) -> Result<Self> {
        let pattern = Regex::new(&preset.header_pattern).map_err(|e| {
            CmlintError::Config(ConfigError::InvalidValue {
                key: "parser_preset.header_pattern".to_string(),
                message: e.to_string(),
            })
        })?;

        if let Some(field) = preset
            .header_correspondence
            .iter()
            .find(|f| !HEADER_FIELDS.contains(&f.as_str()))
        {
            return Err(CmlintError::Config(ConfigError::InvalidValue {
                key: "parser_preset.header_correspondence".to_string(),
                message: format!(
                    "unknown field '{}' (expected one of: {})",
                    field,
                    HEADER_FIELDS.join(", ")
                ),
            }));
        }

        Ok(Self {
            pattern,
            correspondence: preset.header_correspondence.clone(),
        })
    }

    /// Parse a raw commit message.
    ///
    /// A header that does not match the pattern is not an error: the
    /// type, scope and subject are left empty for the rules to report.
    pub fn parse(&self, message: &str) -> Result<CommitMessage> {
        let cleaned = strip_comments(message);
        let cleaned = cleaned.trim_start_matches(['\n', '\r']).trim_end();

        if cleaned.is_empty() {
            return Err(CmlintError::Commit(CommitError::EmptyMessage));
        }

        let lines: Vec<&str> = cleaned.lines().map(|l| l.trim_end()).collect();
        let header = lines[0].to_string();
        let rest = &lines[1..];

        let footer_start = rest.iter().position(|l| FOOTER_REGEX.is_match(l));
        let (body_lines, footer_lines) = match footer_start {
            Some(idx) => rest.split_at(idx),
            None => (rest, &rest[rest.len()..]),
        };

        let body = join_block(body_lines);
        let footer = join_block(footer_lines);

        let mut commit = CommitMessage {
            raw: cleaned.to_string(),
            header: header.clone(),
            body,
            body_leading_blank: rest.first().map(|l| l.trim().is_empty()).unwrap_or(true),
            footer_leading_blank: match footer_start {
                Some(idx) => idx > 0 && rest[idx - 1].trim().is_empty(),
                None => true,
            },
            ..CommitMessage::default()
        };

        self.decompose_header(&header, &mut commit);

        commit.is_breaking = commit.is_breaking
            || commit
                .footer
                .as_deref()
                .map(|f| f.contains("BREAKING CHANGE") || f.contains("BREAKING-CHANGE"))
                .unwrap_or(false);

        Ok(commit)
    }

    fn decompose_header(&self, header: &str, commit: &mut CommitMessage) {
        let Some(captures) = self.pattern.captures(header) else {
            tracing::debug!("Header does not match pattern: {:?}", header);
            return;
        };

        let named = self
            .pattern
            .capture_names()
            .flatten()
            .any(|n| HEADER_FIELDS.contains(&n));

        let field = |name: &str| -> Option<String> {
            let m = if named {
                captures.name(name)
            } else {
                let idx = self.correspondence.iter().position(|f| f == name)?;
                captures.get(idx + 1)
            };
            m.map(|m| m.as_str().trim().to_string())
                .filter(|s| !s.is_empty())
        };

        commit.commit_type = field("type");
        commit.scope = field("scope");
        commit.subject = field("subject");
        commit.is_breaking = captures.name("breaking").is_some();
    }
}

/// Drop git comment lines and everything below the scissors line.
fn strip_comments(message: &str) -> String {
    message
        .lines()
        .take_while(|l| l.trim_end() != SCISSORS)
        .filter(|l| !l.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}

fn join_block(lines: &[&str]) -> Option<String> {
    let text = lines.join("\n");
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
