// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module for commit validation.
//!
//! This module provides the built-in rule catalogue, the registry that
//! combines it with plugin rules, and the engine that evaluates a
//! configured rule table against a commit message.

mod builtin;
pub mod case;
mod engine;
pub mod ignore;
mod registry;
mod validator;

pub use builtin::*;
pub use engine::RuleEngine;
pub use registry::{RuleRegistry, BUILTIN_ORIGIN};
pub use validator::{ValidationIssue, ValidationResult};
