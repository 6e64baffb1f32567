// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Name-to-implementation lookup for rules.

use crate::config::LintConfig;
use crate::error::{CmlintError, PluginError, Result};
use crate::plugins::Plugin;
use std::collections::BTreeMap;

use super::builtin::{builtin_rules, Rule};

/// Where a rule implementation comes from.
pub const BUILTIN_ORIGIN: &str = "builtin";

/// Every rule available under a configuration.
#[derive(Debug)]
pub struct RuleRegistry {
    rules: BTreeMap<String, (&'static str, Box<dyn Rule>)>,
}

impl RuleRegistry {
    /// Registry holding only the built-in catalogue.
    pub fn builtin() -> Self {
        let rules = builtin_rules()
            .into_iter()
            .map(|rule| (rule.name().to_string(), (BUILTIN_ORIGIN, rule)))
            .collect();
        Self { rules }
    }

    /// Built-in rules plus the rules of every plugin the config activates.
    pub fn for_config(config: &LintConfig) -> Result<Self> {
        let mut registry = Self::builtin();
        for name in &config.plugins {
            registry.register_plugin(Plugin::find(name)?)?;
        }
        Ok(registry)
    }

    /// Add a plugin's rules; a name clash is an error.
    pub fn register_plugin(&mut self, plugin: Plugin) -> Result<()> {
        tracing::debug!(
            "Activating plugin '{}' ({} rules)",
            plugin.name,
            plugin.rules.len()
        );

        for rule in plugin.rules {
            let rule_name = rule.name().to_string();
            if let Some((origin, _)) = self.rules.get(&rule_name) {
                // Listing the same plugin twice is harmless
                if *origin == plugin.name {
                    continue;
                }
                return Err(CmlintError::Plugin(PluginError::DuplicateRule {
                    name: plugin.name.to_string(),
                    rule: rule_name,
                }));
            }
            self.rules.insert(rule_name, (plugin.name, rule));
        }
        Ok(())
    }

    /// Look up a rule by name.
    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules.get(name).map(|(_, rule)| &**rule)
    }

    /// Iterate `(origin, rule)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Rule)> {
        self.rules
            .values()
            .map(|(origin, rule)| (*origin, &**rule))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
