// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository operations.

use crate::error::{CmlintError, GitError, Result};
use git2::{Oid, Repository as Git2Repo};
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository with the lookups cmlint needs.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Open a repository from the current directory.
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            CmlintError::Git(GitError::OpenFailed {
                message: format!("Failed to get current directory: {}", e),
            })
        })?;
        Self::open(&current_dir)
    }

    /// Open a repository from a path, searching parent directories.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                CmlintError::Git(GitError::NotARepository)
            } else {
                CmlintError::Git(GitError::OpenFailed {
                    message: e.message().to_string(),
                })
            }
        })?;

        Ok(Self { inner: repo })
    }

    /// Get a commit by reference (SHA, branch name, etc.).
    pub fn get_commit(&self, reference: &str) -> Result<git2::Commit<'_>> {
        let obj = self.inner.revparse_single(reference).map_err(|e| {
            CmlintError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        let commit = obj.peel_to_commit().map_err(|e| {
            CmlintError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        Ok(commit)
    }

    /// Get the commit message for a reference.
    pub fn get_commit_message(&self, reference: &str) -> Result<String> {
        let commit = self.get_commit(reference)?;
        Ok(message_text(&commit))
    }

    /// Get commits in a `from..to` range, newest first.
    pub fn get_commits_in_range(&self, range: &str) -> Result<Vec<(Oid, String)>> {
        let Some((from, to)) = range.split_once("..") else {
            // Single reference, get that commit only
            let commit = self.get_commit(range)?;
            return Ok(vec![(commit.id(), message_text(&commit))]);
        };

        let to = if to.is_empty() { "HEAD" } else { to };
        let mut revwalk = self.inner.revwalk().map_err(|e| {
            CmlintError::Git(GitError::CommandFailed {
                command: "revwalk".to_string(),
                message: e.message().to_string(),
            })
        })?;

        let to_commit = self.get_commit(to)?;
        revwalk.push(to_commit.id()).map_err(|e| {
            CmlintError::Git(GitError::CommandFailed {
                command: "revwalk.push".to_string(),
                message: e.message().to_string(),
            })
        })?;

        if !from.is_empty() {
            let from_commit = self.get_commit(from)?;
            revwalk.hide(from_commit.id()).map_err(|e| {
                CmlintError::Git(GitError::CommandFailed {
                    command: "revwalk.hide".to_string(),
                    message: e.message().to_string(),
                })
            })?;
        }

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result.map_err(|e| {
                CmlintError::Git(GitError::CommandFailed {
                    command: "revwalk".to_string(),
                    message: e.message().to_string(),
                })
            })?;
            let commit = self.inner.find_commit(oid).map_err(|e| {
                CmlintError::Git(GitError::InvalidReference {
                    reference: format!("{}: {}", oid, e.message()),
                })
            })?;
            commits.push((oid, message_text(&commit)));
        }

        Ok(commits)
    }

    /// Get the git directory path (.git).
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    /// Path git writes the in-progress message to.
    pub fn commit_editmsg_path(&self) -> PathBuf {
        self.git_dir().join("COMMIT_EDITMSG")
    }
}

/// Commit message text, replacing invalid UTF-8.
fn message_text(commit: &git2::Commit<'_>) -> String {
    String::from_utf8_lossy(commit.message_bytes()).into_owned()
}

/// Open the repository from the current directory.
pub fn open_repo() -> Result<Repository> {
    Repository::open_current()
}

/// Get the SHA and message of a commit.
pub fn get_commit(reference: &str) -> Result<(String, String)> {
    let repo = Repository::open_current()?;
    let commit = repo.get_commit(reference)?;
    Ok((commit.id().to_string(), message_text(&commit)))
}

/// Get commits in a range.
pub fn get_commit_range(range: &str) -> Result<Vec<(String, String)>> {
    let repo = Repository::open_current()?;
    let commits = repo.get_commits_in_range(range)?;
    Ok(commits
        .into_iter()
        .map(|(oid, msg)| (oid.to_string(), msg))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn commit(repo: &Git2Repo, message: &str) -> Oid {
        let sig = git2::Signature::now("Jane Doe", "jane@example.com").unwrap();
        let tree_id = {
            let mut index = repo.index().unwrap();
            index.write_tree().unwrap()
        };
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    fn create_test_repo() -> (TempDir, Repository, Vec<Oid>) {
        let dir = TempDir::new().unwrap();
        let oids = {
            let repo = Git2Repo::init(dir.path()).unwrap();
            vec![
                commit(&repo, "chore: initial commit"),
                commit(&repo, "feat: second"),
                commit(&repo, "fix: third"),
            ]
        };

        let wrapper = Repository::open(dir.path()).unwrap();
        (dir, wrapper, oids)
    }

    #[test]
    fn test_open_repo() {
        let (dir, _repo, _) = create_test_repo();
        assert!(Repository::open(dir.path()).is_ok());
    }

    #[test]
    fn test_not_a_repo() {
        let dir = TempDir::new().unwrap();
        let result = Repository::open(dir.path());
        assert!(matches!(
            result,
            Err(CmlintError::Git(GitError::NotARepository))
        ));
    }

    #[test]
    fn test_commit_message() {
        let (_dir, repo, _) = create_test_repo();
        assert_eq!(repo.get_commit_message("HEAD").unwrap(), "fix: third");
        assert_eq!(repo.get_commit_message("HEAD~2").unwrap(), "chore: initial commit");
    }

    #[test]
    fn test_range() {
        let (_dir, repo, oids) = create_test_repo();
        let commits = repo.get_commits_in_range("HEAD~2..HEAD").unwrap();
        let messages: Vec<&str> = commits.iter().map(|(_, m)| m.as_str()).collect();
        assert_eq!(messages, vec!["fix: third", "feat: second"]);
        assert_eq!(commits[0].0, oids[2]);
    }

    #[test]
    fn test_open_ended_range() {
        let (_dir, repo, _) = create_test_repo();
        let commits = repo.get_commits_in_range("HEAD~1..").unwrap();
        assert_eq!(commits.len(), 1);
    }

    #[test]
    fn test_range_includes_empty_message() {
        let (dir, repo, _) = create_test_repo();
        {
            let raw = Git2Repo::open(dir.path()).unwrap();
            commit(&raw, "");
        }
        let commits = repo.get_commits_in_range("HEAD~1..HEAD").unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].1, "");
    }

    #[test]
    fn test_invalid_reference() {
        let (_dir, repo, _) = create_test_repo();
        assert!(matches!(
            repo.get_commit("does-not-exist"),
            Err(CmlintError::Git(GitError::InvalidReference { .. }))
        ));
    }

    #[test]
    fn test_commit_editmsg_path() {
        let (_dir, repo, _) = create_test_repo();
        assert!(repo.commit_editmsg_path().ends_with("COMMIT_EDITMSG"));
    }
}
