// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! Reads commit messages from the repository and locates the git
//! directory for hooks and `COMMIT_EDITMSG`.

mod repo;

pub use repo::{get_commit, get_commit_range, open_repo, Repository};
