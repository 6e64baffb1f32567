// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Hook manager for installing and managing git hooks.

use crate::error::{CmlintError, HookError, Result};
use crate::git;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use super::templates::HookTemplate;

/// Manager for git hooks.
pub struct HookManager {
    hooks_dir: PathBuf,
}

impl HookManager {
    /// Create a new hook manager for the current repository.
    pub fn new() -> Result<Self> {
        let repo = git::open_repo()?;
        Self::with_dir(repo.git_dir().join("hooks"))
    }

    /// Create a hook manager over an explicit hooks directory.
    pub fn with_dir(hooks_dir: impl Into<PathBuf>) -> Result<Self> {
        let hooks_dir = hooks_dir.into();

        if !hooks_dir.exists() {
            fs::create_dir_all(&hooks_dir).map_err(|e| {
                CmlintError::Hook(HookError::InstallFailed {
                    hook: "all".to_string(),
                    message: format!("Failed to create hooks directory: {}", e),
                })
            })?;
        }

        Ok(Self { hooks_dir })
    }

    /// Directory the hooks are written to.
    pub fn hooks_dir(&self) -> &Path {
        &self.hooks_dir
    }

    fn template(hook_name: &str) -> Result<HookTemplate> {
        hook_name.parse::<HookTemplate>().map_err(|_| {
            CmlintError::Hook(HookError::NotFound {
                hook: hook_name.to_string(),
            })
        })
    }

    fn backup_path(&self, template: &HookTemplate) -> PathBuf {
        self.hooks_dir
            .join(format!("{}.backup", template.filename()))
    }

    /// Install a specific hook.
    pub fn install_hook(&self, hook_name: &str, force: bool) -> Result<()> {
        let template = Self::template(hook_name)?;
        self.install_template(&template, force)
    }

    /// Install all hooks.
    pub fn install_all(&self, force: bool) -> Result<()> {
        for template in HookTemplate::all() {
            self.install_template(template, force)?;
        }
        Ok(())
    }

    /// Install a hook from a template.
    fn install_template(&self, template: &HookTemplate, force: bool) -> Result<()> {
        let hook_path = self.hooks_dir.join(template.filename());
        let foreign = hook_path.exists() && !self.is_cmlint_hook(&hook_path)?;

        if foreign {
            if !force {
                return Err(CmlintError::Hook(HookError::AlreadyExists {
                    hook: template.filename().to_string(),
                }));
            }

            tracing::debug!("Backing up existing {} hook", template.filename());
            fs::rename(&hook_path, self.backup_path(template)).map_err(|e| {
                CmlintError::Hook(HookError::InstallFailed {
                    hook: template.filename().to_string(),
                    message: format!("Failed to backup existing hook: {}", e),
                })
            })?;
        }

        let script = template.generate()?;
        fs::write(&hook_path, &script).map_err(|e| {
            CmlintError::Hook(HookError::InstallFailed {
                hook: template.filename().to_string(),
                message: format!("Failed to write hook: {}", e),
            })
        })?;

        let mut perms = fs::metadata(&hook_path)
            .map_err(|e| {
                CmlintError::Hook(HookError::InstallFailed {
                    hook: template.filename().to_string(),
                    message: format!("Failed to get permissions: {}", e),
                })
            })?
            .permissions();

        perms.set_mode(0o755);
        fs::set_permissions(&hook_path, perms).map_err(|e| {
            CmlintError::Hook(HookError::InstallFailed {
                hook: template.filename().to_string(),
                message: format!("Failed to set permissions: {}", e),
            })
        })?;

        tracing::debug!("Installed {}", hook_path.display());
        Ok(())
    }

    /// Uninstall a specific hook, restoring any backed-up hook.
    pub fn uninstall_hook(&self, hook_name: &str) -> Result<()> {
        let template = Self::template(hook_name)?;
        let hook_path = self.hooks_dir.join(template.filename());
        let backup_path = self.backup_path(&template);

        if !hook_path.exists() {
            return Ok(());
        }

        if !self.is_cmlint_hook(&hook_path)? {
            return Err(CmlintError::Hook(HookError::RemoveFailed {
                hook: hook_name.to_string(),
                message: "Hook was not installed by cmlint".to_string(),
            }));
        }

        fs::remove_file(&hook_path).map_err(|e| {
            CmlintError::Hook(HookError::RemoveFailed {
                hook: hook_name.to_string(),
                message: format!("Failed to remove hook: {}", e),
            })
        })?;

        if backup_path.exists() {
            fs::rename(&backup_path, &hook_path).map_err(|e| {
                CmlintError::Hook(HookError::RemoveFailed {
                    hook: hook_name.to_string(),
                    message: format!("Failed to restore backed-up hook: {}", e),
                })
            })?;
        }

        Ok(())
    }

    /// Uninstall all hooks.
    pub fn uninstall_all(&self) -> Result<()> {
        for template in HookTemplate::all() {
            self.uninstall_hook(template.filename())?;
        }
        Ok(())
    }

    /// Get the status of all hooks.
    pub fn status(&self) -> Result<Vec<(String, bool)>> {
        let mut status = Vec::new();

        for template in HookTemplate::all() {
            let hook_path = self.hooks_dir.join(template.filename());
            let installed = hook_path.exists() && self.is_cmlint_hook(&hook_path)?;
            status.push((template.filename().to_string(), installed));
        }

        Ok(status)
    }

    /// Run a hook manually.
    pub fn run_hook(&self, hook_name: &str, args: &[String]) -> Result<()> {
        let template = Self::template(hook_name)?;
        let hook_path = self.hooks_dir.join(template.filename());

        if !hook_path.exists() {
            return Err(CmlintError::Hook(HookError::NotFound {
                hook: hook_name.to_string(),
            }));
        }

        let output = std::process::Command::new(&hook_path)
            .args(args)
            .output()
            .map_err(|e| {
                CmlintError::Hook(HookError::ExecutionFailed {
                    hook: hook_name.to_string(),
                    message: format!("Failed to run hook: {}", e),
                })
            })?;

        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CmlintError::Hook(HookError::ExecutionFailed {
                hook: hook_name.to_string(),
                message: format!("{}{}", stdout, stderr).trim().to_string(),
            }));
        }

        Ok(())
    }

    /// Check if a hook was installed by cmlint.
    fn is_cmlint_hook(&self, path: &Path) -> Result<bool> {
        let content = fs::read_to_string(path)?;
        Ok(content.contains("cmlint Git Hook") || content.contains("Generated by cmlint"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FOREIGN_HOOK: &str = "#!/bin/sh\necho husky\n";

    fn manager() -> (TempDir, HookManager) {
        let dir = TempDir::new().unwrap();
        let manager = HookManager::with_dir(dir.path().join("hooks")).unwrap();
        (dir, manager)
    }

    #[test]
    fn test_install_and_status() {
        let (_dir, manager) = manager();
        assert_eq!(manager.status().unwrap(), vec![("commit-msg".to_string(), false)]);

        manager.install_all(false).unwrap();
        let hook = manager.hooks_dir().join("commit-msg");
        let content = fs::read_to_string(&hook).unwrap();
        assert!(content.contains("check --edit"));
        assert_eq!(
            fs::metadata(&hook).unwrap().permissions().mode() & 0o777,
            0o755
        );
        assert_eq!(manager.status().unwrap(), vec![("commit-msg".to_string(), true)]);

        // Reinstalling over our own hook needs no force
        manager.install_hook("commit-msg", false).unwrap();
    }

    #[test]
    fn test_foreign_hook_needs_force() {
        let (_dir, manager) = manager();
        let hook = manager.hooks_dir().join("commit-msg");
        fs::write(&hook, FOREIGN_HOOK).unwrap();

        assert!(matches!(
            manager.install_hook("commit-msg", false),
            Err(CmlintError::Hook(HookError::AlreadyExists { .. }))
        ));
        assert_eq!(fs::read_to_string(&hook).unwrap(), FOREIGN_HOOK);

        manager.install_hook("commit-msg", true).unwrap();
        let backup = manager.hooks_dir().join("commit-msg.backup");
        assert_eq!(fs::read_to_string(&backup).unwrap(), FOREIGN_HOOK);

        manager.uninstall_all().unwrap();
        assert_eq!(fs::read_to_string(&hook).unwrap(), FOREIGN_HOOK);
        assert!(!backup.exists());
    }

    #[test]
    fn test_uninstall_refuses_foreign_hook() {
        let (_dir, manager) = manager();
        let hook = manager.hooks_dir().join("commit-msg");
        fs::write(&hook, FOREIGN_HOOK).unwrap();

        assert!(matches!(
            manager.uninstall_hook("commit-msg"),
            Err(CmlintError::Hook(HookError::RemoveFailed { .. }))
        ));
        assert!(hook.exists());
    }

    #[test]
    fn test_unreadable_hook_is_io_error() {
        let (_dir, manager) = manager();
        // A directory in place of the hook file cannot be read
        fs::create_dir(manager.hooks_dir().join("commit-msg")).unwrap();
        assert!(matches!(
            manager.install_hook("commit-msg", false),
            Err(CmlintError::Io(_))
        ));
    }

    #[test]
    fn test_uninstall_missing_is_noop() {
        let (_dir, manager) = manager();
        assert!(manager.uninstall_all().is_ok());
    }

    #[test]
    fn test_unknown_hook() {
        let (_dir, manager) = manager();
        assert!(matches!(
            manager.install_hook("pre-push", false),
            Err(CmlintError::Hook(HookError::NotFound { .. }))
        ));
        assert!(matches!(
            manager.run_hook("commit-msg", &[]),
            Err(CmlintError::Hook(HookError::NotFound { .. }))
        ));
    }
}
