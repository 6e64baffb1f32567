// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git hooks management.
//!
//! Installs a `commit-msg` hook that runs `cmlint check --edit` on the
//! message git is about to record.

mod manager;
mod templates;

pub use manager::HookManager;
pub use templates::HookTemplate;
