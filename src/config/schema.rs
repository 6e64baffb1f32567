// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from cmlint.toml.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Default header pattern: `type(scope)!: subject`.
pub const DEFAULT_HEADER_PATTERN: &str =
    r"^(?P<type>\w*)(?:\((?P<scope>[^()]*)\))?(?P<breaking>!)?: (?P<subject>.+)$";

/// The main configuration structure for cmlint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Inherited rule sets, applied in order before `rules`.
    pub extends: Vec<String>,

    /// Compiled-in plugins whose rules become available.
    pub plugins: Vec<String>,

    /// Whether merge/revert/fixup/squash messages are skipped.
    pub default_ignores: bool,

    /// Additional patterns; matching messages are skipped.
    pub ignores: Vec<String>,

    /// Link printed under failing results.
    pub help_url: Option<String>,

    /// Header parsing override.
    pub parser_preset: Option<ParserPreset>,

    /// Rule table: rule name to `[level, applicability, value]`.
    pub rules: BTreeMap<String, RuleSetting>,

    /// CI-specific behaviour.
    pub ci: CiConfig,

    /// UI/UX configuration.
    pub ui: UiConfig,
}

/// An empty policy: the conventional base set and nothing else.
///
/// Fields a configuration file leaves out take these values, so a file
/// never inherits rules or plugins it does not name.
impl Default for LintConfig {
    fn default() -> Self {
        Self {
            extends: vec!["conventional".to_string()],
            plugins: Vec::new(),
            default_ignores: true,
            ignores: Vec::new(),
            help_url: None,
            parser_preset: None,
            rules: BTreeMap::new(),
            ci: CiConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl LintConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }

    /// Fold every `extends` entry into the rule table.
    ///
    /// Resolving an already resolved configuration yields the same table.
    pub fn resolve(self) -> crate::error::Result<Self> {
        super::loader::resolve_extends(self)
    }

    /// The parser preset in effect.
    pub fn parser_preset(&self) -> ParserPreset {
        self.parser_preset.clone().unwrap_or_default()
    }
}

/// Header parsing specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserPreset {
    /// Pattern applied to the header line.
    pub header_pattern: String,

    /// Field names for positional capture groups, in order.
    pub header_correspondence: Vec<String>,
}

impl Default for ParserPreset {
    fn default() -> Self {
        Self {
            header_pattern: DEFAULT_HEADER_PATTERN.to_string(),
            header_correspondence: vec![
                "type".to_string(),
                "scope".to_string(),
                "subject".to_string(),
            ],
        }
    }
}

/// Rule severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Off,
    Warning,
    Error,
}

impl Level {
    fn from_value(value: &toml::Value) -> Result<Self, String> {
        match value {
            toml::Value::Integer(0) => Ok(Level::Off),
            toml::Value::Integer(1) => Ok(Level::Warning),
            toml::Value::Integer(2) => Ok(Level::Error),
            toml::Value::String(s) => match s.as_str() {
                "off" => Ok(Level::Off),
                "warning" | "warn" => Ok(Level::Warning),
                "error" => Ok(Level::Error),
                other => Err(format!("unknown level '{}'", other)),
            },
            other => Err(format!("level must be 0, 1, 2 or a level name, got {}", other)),
        }
    }

    /// Numeric form used in the rule table.
    pub fn as_int(&self) -> i64 {
        match self {
            Level::Off => 0,
            Level::Warning => 1,
            Level::Error => 2,
        }
    }
}

/// Whether a rule's condition must hold or must not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Applicability {
    #[default]
    Always,
    Never,
}

impl Applicability {
    /// Apply the applicability to a rule condition.
    pub fn holds(&self, condition: bool) -> bool {
        match self {
            Applicability::Always => condition,
            Applicability::Never => !condition,
        }
    }

    /// "must" or "must not", for diagnostics.
    pub fn verb(&self) -> &'static str {
        match self {
            Applicability::Always => "must",
            Applicability::Never => "must not",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Applicability::Always => "always",
            Applicability::Never => "never",
        }
    }
}

impl fmt::Display for Applicability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the rule table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "toml::Value", into = "toml::Value")]
pub struct RuleSetting {
    pub level: Level,
    pub applicability: Applicability,
    pub value: Option<toml::Value>,
}

impl RuleSetting {
    /// Create a rule setting.
    pub fn new(level: Level, applicability: Applicability, value: Option<toml::Value>) -> Self {
        Self {
            level,
            applicability,
            value,
        }
    }

    /// Whether the rule is evaluated at all.
    pub fn is_enabled(&self) -> bool {
        self.level != Level::Off
    }
}

impl TryFrom<toml::Value> for RuleSetting {
    type Error = String;

    fn try_from(value: toml::Value) -> Result<Self, Self::Error> {
        let items = match value {
            toml::Value::Array(items) => items,
            // A bare level, e.g. `subject-case = 0`
            other => vec![other],
        };

        if items.is_empty() || items.len() > 3 {
            return Err(format!(
                "expected [level, applicability, value], got {} element(s)",
                items.len()
            ));
        }

        let mut items = items.into_iter();
        let level = items
            .next()
            .map(|v| Level::from_value(&v))
            .unwrap_or(Ok(Level::Off))?;

        let applicability = match items.next() {
            None => Applicability::Always,
            Some(toml::Value::String(s)) if s == "always" => Applicability::Always,
            Some(toml::Value::String(s)) if s == "never" => Applicability::Never,
            Some(other) => {
                return Err(format!(
                    "applicability must be \"always\" or \"never\", got {}",
                    other
                ))
            }
        };

        Ok(Self {
            level,
            applicability,
            value: items.next(),
        })
    }
}

impl From<RuleSetting> for toml::Value {
    fn from(setting: RuleSetting) -> Self {
        let mut items = vec![
            toml::Value::Integer(setting.level.as_int()),
            toml::Value::String(setting.applicability.as_str().to_string()),
        ];
        if let Some(value) = setting.value {
            items.push(value);
        }
        toml::Value::Array(items)
    }
}

/// CI-specific rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CiConfig {
    /// Treat warnings as errors on every run, as `--strict` does.
    pub strict: bool,

    /// Whether warnings block the commit when running with `--ci`.
    pub fail_on_warning: bool,
}

impl CiConfig {
    /// Whether warnings reject the message.
    pub fn warnings_block(&self, ci: bool) -> bool {
        self.strict || (ci && self.fail_on_warning)
    }
}

/// UI/UX configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Whether to use colors.
    pub color: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { color: true }
    }
}
