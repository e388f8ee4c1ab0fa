//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{WagecastError, WagecastResult};
use crate::ui::{self, UiContext};
use std::path::PathBuf;

/// Keys accepted by `config set`
pub const VALID_KEYS: &[&str] = &[
    "general.log_format",
    "dataset.path",
    "cache.db_path",
    "estimator.provider",
    "estimator.model",
    "estimator.model_env",
    "estimator.api_key_env",
    "estimator.endpoint",
    "estimator.timeout_secs",
    "estimator.command",
    "progress.steps",
    "progress.delays_ms",
    "progress.poll_interval_ms",
];

/// Execute the config command
pub async fn execute(args: ConfigArgs, manager: &ConfigManager, config: &Config) -> WagecastResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => println!("{}", toml::to_string_pretty(config)?),
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
        Some(ConfigAction::Init { force }) => {
            init_config(&UiContext::detect(), manager, force).await?;
        }
        Some(ConfigAction::Set { key, value }) => {
            let mut updated = config.clone();
            set_value(&mut updated, &key, &value)?;
            manager.save(&updated).await?;
            ui::step_ok(&UiContext::detect(), &format!("Set {} = {}", key, value));
        }
    }

    Ok(())
}

/// Write the default config unless one exists; returns whether it was written
pub(crate) async fn init_config(
    ctx: &UiContext,
    manager: &ConfigManager,
    force: bool,
) -> WagecastResult<bool> {
    let path = manager.path();
    if path.exists() && !force {
        ui::step_warn(
            ctx,
            &format!("Config already exists at {} (use --force to overwrite)", path.display()),
        );
        return Ok(false);
    }

    manager.save(&Config::default()).await?;
    ui::step_ok(ctx, &format!("Configuration written to {}", path.display()));
    Ok(true)
}

/// Apply one dot-separated key to a config
pub fn set_value(config: &mut Config, key: &str, value: &str) -> WagecastResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "log_format"] => match value {
            "text" | "json" => config.general.log_format = value.to_string(),
            _ => return Err(invalid(key, "expected text or json")),
        },

        ["dataset", "path"] => config.dataset.path = PathBuf::from(value),

        ["cache", "db_path"] => {
            config.cache.db_path = (!value.is_empty()).then(|| PathBuf::from(value))
        }

        ["estimator", "provider"] => match value {
            "gemini" | "command" => config.estimator.provider = value.to_string(),
            _ => return Err(invalid(key, "expected gemini or command")),
        },
        ["estimator", "model"] => config.estimator.model = value.to_string(),
        ["estimator", "model_env"] => config.estimator.model_env = value.to_string(),
        ["estimator", "api_key_env"] => config.estimator.api_key_env = value.to_string(),
        ["estimator", "endpoint"] => config.estimator.endpoint = value.to_string(),
        ["estimator", "timeout_secs"] => match parse_number(key, value)? {
            0 => return Err(invalid(key, "must be at least 1 second")),
            secs => config.estimator.timeout_secs = secs,
        },
        ["estimator", "command"] => config.estimator.command = parse_list(value),

        ["progress", "steps"] => {
            config.progress.steps = parse_list(value)
                .iter()
                .map(|v| parse_number(key, v))
                .collect::<WagecastResult<_>>()?
        }
        ["progress", "delays_ms"] => {
            config.progress.delays_ms = parse_list(value)
                .iter()
                .map(|v| parse_number(key, v))
                .collect::<WagecastResult<_>>()?
        }
        ["progress", "poll_interval_ms"] => {
            config.progress.poll_interval_ms = parse_number(key, value)?
        }

        _ => {
            return Err(WagecastError::User(format!(
                "Unknown config key: {} (valid keys: {})",
                key,
                VALID_KEYS.join(", ")
            )))
        }
    }

    Ok(())
}

fn invalid(key: &str, reason: &str) -> WagecastError {
    WagecastError::User(format!("Invalid value for {}: {}", key, reason))
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> WagecastResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(key, &format!("'{}' is not a number", value)))
}

/// Comma-separated list, empty items dropped
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
