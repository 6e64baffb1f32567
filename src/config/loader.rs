// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading and `extends` resolution.

use crate::error::{CmlintError, ConfigError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::default::{base_rule_set, default_config, BASE_RULE_SETS};
use super::schema::{LintConfig, RuleSetting};

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &["cmlint.toml", ".cmlint.toml", ".config/cmlint.toml"];

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // Try parent directory
        if !current.pop() {
            break;
        }
    }

    // Also check user's home directory
    if let Some(home) = dirs::home_dir() {
        for config_name in CONFIG_FILES {
            let config_path = home.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }
    }

    // XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
        let xdg_config = config_dir.join("cmlint").join("config.toml");
        if xdg_config.exists() {
            return Some(xdg_config);
        }
    }

    None
}

/// Load configuration from the default locations.
pub fn load_config() -> Result<LintConfig> {
    match find_config_file() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found, using the governance defaults");
            resolve_extends(default_config())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<LintConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(CmlintError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        CmlintError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    resolve_extends(parse_config(&content)?)
}

/// Parse configuration from a TOML string.
///
/// The result is not resolved; call [`resolve_extends`] before use.
pub fn parse_config(content: &str) -> Result<LintConfig> {
    toml::from_str(content).map_err(|e| {
        CmlintError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })
}

/// Fold the `extends` rule sets into the configuration's rule table.
///
/// Earlier entries are overridden by later ones, and the configuration's
/// own rules override every inherited rule.
pub fn resolve_extends(config: LintConfig) -> Result<LintConfig> {
    let mut rules: BTreeMap<String, RuleSetting> = BTreeMap::new();

    for name in &config.extends {
        let base = base_rule_set(name).ok_or_else(|| {
            CmlintError::Config(ConfigError::UnknownExtends {
                name: name.clone(),
                available: BASE_RULE_SETS.join(", "),
            })
        })?;
        tracing::debug!("Extending rule set '{}' ({} rules)", name, base.len());
        rules = merge_rules(rules, base);
    }

    let rules = merge_rules(rules, config.rules);
    Ok(LintConfig { rules, ..config })
}

/// Merge two rule tables, with the overlay taking precedence per rule.
pub fn merge_rules(
    base: BTreeMap<String, RuleSetting>,
    overlay: BTreeMap<String, RuleSetting>,
) -> BTreeMap<String, RuleSetting> {
    let mut merged = base;
    merged.extend(overlay);
    merged
}
