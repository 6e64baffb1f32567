// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for cmlint.
//!
//! This module handles locating, parsing and resolving the rule
//! configuration, including `extends` inheritance from compiled-in base
//! rule sets.

pub mod default;
mod loader;
mod schema;

pub use default::default_config;
pub use loader::{
    find_config_file, find_config_file_from, load_config, merge_rules, parse_config,
    resolve_extends,
};
pub use schema::*;
