// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Compiled-in rule plugins.
//!
//! A plugin is a named bundle of extra rules. Plugins are activated by
//! listing their name under `plugins` in the configuration; only the
//! plugins compiled into this binary can be named.

pub mod governance;

use crate::error::{CmlintError, PluginError, Result};
use crate::rules::Rule;

/// Names accepted in `plugins`.
pub const PLUGINS: &[&str] = &["governance"];

/// A named bundle of rules.
#[derive(Debug)]
pub struct Plugin {
    /// Plugin name.
    pub name: &'static str,
    /// Rules the plugin contributes.
    pub rules: Vec<Box<dyn Rule>>,
}

impl Plugin {
    /// Look up a compiled-in plugin by name.
    pub fn find(name: &str) -> Result<Self> {
        match name {
            "governance" => Ok(Self {
                name: "governance",
                rules: governance::rules(),
            }),
            _ => Err(CmlintError::Plugin(PluginError::NotFound {
                name: name.to_string(),
            })),
        }
    }
}
