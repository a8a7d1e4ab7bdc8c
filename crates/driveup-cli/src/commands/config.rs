//! Config command - view and manage driveup configuration
//!
//! Provides the `driveup config` CLI command which:
//! 1. Shows the current configuration (YAML or JSON)
//! 2. Sets individual configuration values via dot-notation keys
//! 3. Validates the configuration file and reports errors

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use driveup_core::config::Config;
use tracing::info;

use crate::output::{OutputFormat, Printer};

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (e.g. "sync.check_interval")
        key: String,
        /// New value
        value: String,
    },
    /// Validate configuration file
    Validate,
}

impl ConfigCommand {
    /// Execute the config command
    pub async fn execute(&self, config_path: Option<PathBuf>, format: OutputFormat) -> Result<()> {
        let path = config_path.unwrap_or_else(Config::default_path);
        match self {
            ConfigCommand::Show => self.execute_show(&path, format),
            ConfigCommand::Set { key, value } => self.execute_set(&path, key, value, format),
            ConfigCommand::Validate => self.execute_validate(&path, format),
        }
    }

    /// Show current configuration
    fn execute_show(&self, path: &Path, format: OutputFormat) -> Result<()> {
        let printer = Printer::new(format);
        let config = Config::load_or_default(path);

        info!(config_path = %path.display(), "Showing configuration");

        printer.json(&serde_json::to_value(&config).context("failed to serialize configuration")?);

        printer.success(&format!("Configuration ({})", path.display()));
        let yaml = serde_yaml::to_string(&config).context("failed to serialize configuration")?;
        for line in yaml.lines() {
            printer.detail(line);
        }

        Ok(())
    }

    /// Set a configuration value using dot-notation
    fn execute_set(&self, path: &Path, key: &str, value: &str, format: OutputFormat) -> Result<()> {
        let printer = Printer::new(format);
        let mut config = Config::load_or_default(path);

        info!(key = %key, value = %value, "Setting configuration value");

        if let Err(e) = apply_config_value(&mut config, key, value) {
            printer.json(&serde_json::json!({
                "success": false,
                "key": key,
                "value": value,
                "error": e.to_string(),
            }));
            printer.error(&format!("Failed to set '{key}': {e}"));
            printer.detail("Supported keys:");
            for key in SUPPORTED_KEYS {
                printer.detail(&format!("  {key}"));
            }
            return Ok(());
        }

        let errors = config.validate();
        if !errors.is_empty() {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            printer.json(&serde_json::json!({
                "success": false,
                "key": key,
                "value": value,
                "errors": messages,
            }));
            printer.error(&format!("Invalid value for '{}': {}", key, messages.join("; ")));
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("failed to create configuration directory")?;
        }
        let yaml = serde_yaml::to_string(&config).context("failed to serialize configuration")?;
        std::fs::write(path, &yaml).context("failed to write configuration file")?;

        printer.json(&serde_json::json!({
            "success": true,
            "key": key,
            "value": value,
            "config_path": path.display().to_string(),
        }));
        printer.success(&format!("Set {key} = {value}"));
        printer.detail(&format!("Saved to {}", path.display()));

        Ok(())
    }

    /// Validate configuration file
    fn execute_validate(&self, path: &Path, format: OutputFormat) -> Result<()> {
        let printer = Printer::new(format);

        let config = match Config::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                if !path.exists() {
                    printer.json(&serde_json::json!({
                        "valid": true,
                        "config_path": path.display().to_string(),
                        "errors": ["configuration file not found; defaults apply"],
                    }));
                    printer.detail(&format!("Configuration file not found at {}", path.display()));
                    printer.detail("Using defaults. Run 'driveup config set <key> <value>' to create one.");
                    return Ok(());
                }
                printer.json(&serde_json::json!({
                    "valid": false,
                    "config_path": path.display().to_string(),
                    "errors": [format!("failed to parse configuration: {e}")],
                }));
                printer.error(&format!("Failed to parse configuration: {e}"));
                printer.detail(&format!("File: {}", path.display()));
                return Ok(());
            }
        };

        info!(config_path = %path.display(), "Validating configuration");

        let errors = config.validate();
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        printer.json(&serde_json::json!({
            "valid": errors.is_empty(),
            "config_path": path.display().to_string(),
            "errors": messages,
        }));

        if errors.is_empty() {
            printer.success("Configuration is valid");
            printer.detail(&format!("File: {}", path.display()));
        } else {
            printer.error(&format!(
                "Configuration has {} error{}:",
                errors.len(),
                if errors.len() == 1 { "" } else { "s" }
            ));
            printer.detail(&format!("File: {}", path.display()));
            for error in &errors {
                printer.detail(&format!("  {} - {}", error.field, error.message));
            }
        }

        Ok(())
    }
}

/// Keys accepted by `config set`
const SUPPORTED_KEYS: &[&str] = &[
    "sync.upload_dir",
    "sync.folder_id",
    "sync.pattern",
    "sync.check_md5",
    "sync.force_upload",
    "sync.recursive",
    "sync.daemon_mode",
    "sync.check_interval",
    "sync.concurrency",
    "retry.max_attempts",
    "retry.base_delay_ms",
    "retry.multiplier",
    "logging.level",
];

fn parse_bool(value: &str) -> Result<bool> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => anyhow::bail!("expected 'true' or 'false', got '{value}'"),
    }
}

/// Apply a dot-notation key/value pair to a Config struct
fn apply_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        // --- sync ---
        "sync.upload_dir" => {
            config.sync.upload_dir = PathBuf::from(value);
        }
        "sync.folder_id" => {
            config.sync.folder_id = value.to_string();
        }
        "sync.pattern" => {
            config.sync.pattern = value.to_string();
        }
        "sync.check_md5" => {
            config.sync.check_md5 = parse_bool(value)?;
        }
        "sync.force_upload" => {
            config.sync.force_upload = parse_bool(value)?;
        }
        "sync.recursive" => {
            config.sync.recursive = parse_bool(value)?;
        }
        "sync.daemon_mode" => {
            config.sync.daemon_mode = parse_bool(value)?;
        }
        "sync.check_interval" => {
            config.sync.check_interval = value
                .parse::<u64>()
                .context("expected a positive integer for sync.check_interval")?;
        }
        "sync.concurrency" => {
            config.sync.concurrency = value
                .parse::<usize>()
                .context("expected a positive integer for sync.concurrency")?;
        }

        // --- retry ---
        "retry.max_attempts" => {
            config.retry.max_attempts = value
                .parse::<u32>()
                .context("expected a positive integer for retry.max_attempts")?;
        }
        "retry.base_delay_ms" => {
            config.retry.base_delay_ms = value
                .parse::<u64>()
                .context("expected a positive integer for retry.base_delay_ms")?;
        }
        "retry.multiplier" => {
            config.retry.multiplier = value
                .parse::<f64>()
                .context("expected a number for retry.multiplier")?;
        }

        // --- logging ---
        "logging.level" => {
            config.logging.level = value.to_string();
        }

        _ => {
            anyhow::bail!("unknown configuration key: '{key}'");
        }
    }

    Ok(())
}
