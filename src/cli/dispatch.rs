// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use crate::config::LintConfig;
use crate::error::{CmlintError, CommitError, ConfigError, Result, ResultExt, ValidationError};
use crate::rules::{RuleEngine, ValidationResult};
use console::style;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::args::{CheckArgs, Cli, Commands, ConfigPreset, HooksAction, InitArgs, OutputFormat};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    match cli.effective_command() {
        Commands::Check(args) => run_check(&cli, load_config(&cli)?, args),
        Commands::Hooks(args) => run_hooks(args.action),
        Commands::PrintConfig => run_print_config(&cli, load_config(&cli)?),
        Commands::ListRules => run_list_rules(&cli, load_config(&cli)?),
        Commands::Init(args) => run_init(args),
        Commands::Version => run_version(),
    }
}

/// Load configuration from `--config` or the default locations.
fn load_config(cli: &Cli) -> Result<LintConfig> {
    let config = if let Some(config_path) = &cli.config {
        LintConfig::load_from(config_path)?
    } else {
        LintConfig::load()?
    };
    console::set_colors_enabled(config.ui.color && console::colors_enabled());
    Ok(config)
}

/// Run the check command.
fn run_check(cli: &Cli, config: LintConfig, args: CheckArgs) -> Result<()> {
    tracing::debug!("Running check command with args: {:?}", args);

    let strict = args.strict || config.ci.warnings_block(cli.ci);
    let engine = RuleEngine::new(config)?;

    let results = if args.reads_message() {
        let message = read_message(&args)?;
        vec![engine.validate_string(&message)?]
    } else {
        let target = args.target.as_deref().unwrap_or("HEAD");
        if args.range || target.contains("..") {
            engine.check_range(target)?
        } else {
            vec![engine.check_commit(target)?]
        }
    };

    if results.is_empty() {
        tracing::warn!("No commits to check");
    }

    print_results(cli.format, &results, engine.config().help_url.as_deref());

    let errors: usize = results.iter().map(|r| r.errors.len()).sum();
    let warnings: usize = results.iter().map(|r| r.warnings.len()).sum();

    if errors > 0 || (strict && warnings > 0) {
        Err(CmlintError::Validation(ValidationError::Rejected {
            errors,
            warnings,
        }))
    } else {
        Ok(())
    }
}

/// Read the message to check from `-m`, `--edit` or stdin.
fn read_message(args: &CheckArgs) -> Result<String> {
    if let Some(message) = &args.message {
        return Ok(message.clone());
    }

    if let Some(edit) = &args.edit {
        let path = match edit {
            Some(path) => path.clone(),
            None => default_edit_path()?,
        };
        tracing::debug!("Reading commit message from {:?}", path);
        return read_message_file(&path);
    }

    let mut message = String::new();
    std::io::stdin()
        .read_to_string(&mut message)
        .map_err(|e| {
            CmlintError::Commit(CommitError::ReadFailed {
                source_name: "stdin".to_string(),
                message: e.to_string(),
            })
        })?;
    Ok(message)
}

fn default_edit_path() -> Result<PathBuf> {
    let repo = crate::git::open_repo()?;
    Ok(repo.commit_editmsg_path())
}

fn read_message_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        CmlintError::Commit(CommitError::ReadFailed {
            source_name: path.display().to_string(),
            message: e.to_string(),
        })
    })
}

fn print_results(
    format: Option<OutputFormat>,
    results: &[ValidationResult],
    help_url: Option<&str>,
) {
    match (format, results) {
        (Some(OutputFormat::Json), [single]) if single.commit_sha.is_none() => {
            single.print(format, help_url)
        }
        (Some(OutputFormat::Json), _) => {
            let all: Vec<_> = results.iter().map(ValidationResult::to_json).collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&all).unwrap_or_default()
            );
        }
        _ => {
            for result in results {
                result.print(format, help_url);
            }
            if results.len() > 1 {
                let rejected = results.iter().filter(|r| !r.is_valid()).count();
                println!(
                    "\n{} commits checked, {} rejected",
                    results.len(),
                    rejected
                );
            }
        }
    }
}

/// Run the hooks command.
fn run_hooks(action: HooksAction) -> Result<()> {
    use crate::hooks::HookManager;

    tracing::debug!("Running hooks command");

    let manager = HookManager::new()?;

    match action {
        HooksAction::Install { hook, force } => {
            if let Some(hook_name) = hook {
                manager.install_hook(&hook_name, force)?;
                println!("{} Installed {} hook", style("✓").green(), hook_name);
            } else {
                manager.install_all(force)?;
                println!("{} Installed all hooks", style("✓").green());
            }
        }
        HooksAction::Uninstall { hook } => {
            if let Some(hook_name) = hook {
                manager.uninstall_hook(&hook_name)?;
                println!("{} Uninstalled {} hook", style("✓").green(), hook_name);
            } else {
                manager.uninstall_all()?;
                println!("{} Uninstalled all hooks", style("✓").green());
            }
        }
        HooksAction::Status => {
            for (hook, installed) in manager.status()? {
                let icon = if installed {
                    style("✓").green()
                } else {
                    style("✗").red()
                };
                println!("{} {}", icon, hook);
            }
        }
        HooksAction::Run { hook, args } => {
            manager.run_hook(&hook, &args)?;
        }
    }

    Ok(())
}

/// Print the resolved configuration.
fn run_print_config(cli: &Cli, config: LintConfig) -> Result<()> {
    // Resolution also surfaces unknown rules and bad values
    let engine = RuleEngine::new(config)?;

    let output = match cli.format {
        Some(OutputFormat::Json) => serde_json::to_string_pretty(engine.config()).map_err(|e| {
            CmlintError::Config(ConfigError::ParseError {
                message: format!("Failed to serialize configuration: {}", e),
            })
        })?,
        _ => toml::to_string_pretty(engine.config()).map_err(|e| {
            CmlintError::Config(ConfigError::ParseError {
                message: format!("Failed to serialize configuration: {}", e),
            })
        })?,
    };

    println!("{}", output);
    Ok(())
}

/// List every rule the configuration can reference.
fn run_list_rules(cli: &Cli, config: LintConfig) -> Result<()> {
    let engine = RuleEngine::new(config)?;
    let rules = &engine.config().rules;

    if cli.format == Some(OutputFormat::Json) {
        let list: Vec<_> = engine
            .registry()
            .iter()
            .map(|(origin, rule)| {
                serde_json::json!({
                    "name": rule.name(),
                    "origin": origin,
                    "description": rule.description(),
                    "level": rules.get(rule.name()).map(|s| s.level.as_int()).unwrap_or(0),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&list).unwrap_or_default());
        return Ok(());
    }

    for (origin, rule) in engine.registry().iter() {
        let level = match rules.get(rule.name()) {
            Some(setting) if setting.is_enabled() => {
                format!("{} {}", setting.level.as_int(), setting.applicability)
            }
            _ => "off".to_string(),
        };
        println!(
            "{:<24} {:<12} {:<10} {}",
            style(rule.name()).bold(),
            style(origin).dim(),
            level,
            rule.description()
        );
    }

    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("cmlint {}", crate::version::version_string());
    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }
    Ok(())
}

/// Run the init command.
fn run_init(args: InitArgs) -> Result<()> {
    use crate::config::default::{conventional_config, example_config};

    tracing::debug!("Running init command with args: {:?}", args);

    let config_path = Path::new("cmlint.toml");
    if config_path.exists() && !args.force {
        return Err(CmlintError::Config(ConfigError::AlreadyExists {
            path: config_path.to_path_buf(),
        }));
    }

    let config_content = match args.preset {
        ConfigPreset::Governance => example_config(),
        ConfigPreset::Conventional => conventional_config(),
    };

    std::fs::write(config_path, config_content).context("Failed to write cmlint.toml")?;

    println!("{} Created cmlint.toml", style("✓").green());
    Ok(())
}
