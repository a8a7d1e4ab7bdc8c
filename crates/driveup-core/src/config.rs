//! Configuration module for driveup.
//!
//! Provides typed configuration structs that map to the YAML configuration
//! file, with loading, validation, defaults, a builder for programmatic
//! use, and an environment override layer. Configuration is parsed and
//! validated once at startup and then passed by reference into the
//! scheduler and orchestrator; nothing re-parses per cycle.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for driveup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub sync: SyncConfig,
    pub retry: RetryConfig,
    pub logging: LoggingConfig,
}

/// Synchronization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Local directory to scan for upload candidates.
    pub upload_dir: PathBuf,
    /// Target Drive folder ID; empty string targets the drive root.
    pub folder_id: String,
    /// Glob filter applied to file names.
    pub pattern: String,
    /// Compare MD5 content hashes instead of trusting name matches alone.
    pub check_md5: bool,
    /// Upload every candidate regardless of remote state.
    pub force_upload: bool,
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Run the scheduler loop instead of a single cycle.
    pub daemon_mode: bool,
    /// Seconds between scan cycles in daemon mode.
    pub check_interval: u64,
    /// Maximum candidates processed in parallel within a cycle.
    pub concurrency: usize,
}

/// Remote index retry / backoff settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts before the cycle is declared failed.
    pub max_attempts: u32,
    /// Backoff base delay in milliseconds.
    pub base_delay_ms: u64,
    /// Backoff multiplier between attempts.
    pub multiplier: f64,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/driveup/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("driveup")
            .join("config.yaml")
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("./uploads"),
            folder_id: String::new(),
            pattern: "*".to_string(),
            check_md5: true,
            force_upload: false,
            recursive: true,
            daemon_mode: false,
            check_interval: 300,
            concurrency: 4,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
            multiplier: 2.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Environment overrides
// ---------------------------------------------------------------------------

/// Environment variables recognized as overrides, mirroring the knobs
/// historically exposed by the uploader script.
const ENV_UPLOAD_DIR: &str = "UPLOAD_DIR";
const ENV_FOLDER_ID: &str = "DRIVE_FOLDER_ID";
const ENV_PATTERN: &str = "FILE_PATTERN";
const ENV_CHECK_MD5: &str = "CHECK_MD5";
const ENV_FORCE_UPLOAD: &str = "FORCE_UPLOAD";
const ENV_RECURSIVE: &str = "RECURSIVE";
const ENV_DAEMON_MODE: &str = "DAEMON_MODE";
const ENV_CHECK_INTERVAL: &str = "CHECK_INTERVAL";

fn env_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

impl Config {
    /// Applies recognized environment variables on top of the loaded file.
    ///
    /// File values lose to environment values; unset variables change
    /// nothing. Malformed numeric values are ignored rather than guessed at.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var(ENV_UPLOAD_DIR) {
            self.sync.upload_dir = PathBuf::from(dir);
        }
        if let Ok(id) = std::env::var(ENV_FOLDER_ID) {
            self.sync.folder_id = id;
        }
        if let Ok(pattern) = std::env::var(ENV_PATTERN) {
            self.sync.pattern = pattern;
        }
        if let Ok(v) = std::env::var(ENV_CHECK_MD5) {
            self.sync.check_md5 = env_bool(&v);
        }
        if let Ok(v) = std::env::var(ENV_FORCE_UPLOAD) {
            self.sync.force_upload = env_bool(&v);
        }
        if let Ok(v) = std::env::var(ENV_RECURSIVE) {
            self.sync.recursive = env_bool(&v);
        }
        if let Ok(v) = std::env::var(ENV_DAEMON_MODE) {
            self.sync.daemon_mode = env_bool(&v);
        }
        if let Ok(v) = std::env::var(ENV_CHECK_INTERVAL) {
            if let Ok(secs) = v.parse::<u64>() {
                self.sync.check_interval = secs;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"sync.check_interval"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- sync ---
        if self.sync.check_interval == 0 {
            errors.push(ValidationError {
                field: "sync.check_interval".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.sync.concurrency == 0 {
            errors.push(ValidationError {
                field: "sync.concurrency".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.sync.pattern.is_empty() {
            errors.push(ValidationError {
                field: "sync.pattern".into(),
                message: "must not be empty (use '*' to match everything)".into(),
            });
        }

        // --- retry ---
        if self.retry.max_attempts == 0 {
            errors.push(ValidationError {
                field: "retry.max_attempts".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.retry.base_delay_ms == 0 {
            errors.push(ValidationError {
                field: "retry.base_delay_ms".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.retry.multiplier < 1.0 {
            errors.push(ValidationError {
                field: "retry.multiplier".into(),
                message: "must be at least 1.0".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for programmatic configuration (used heavily in tests).
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a builder seeded with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the upload directory.
    pub fn upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.sync.upload_dir = dir.into();
        self
    }

    /// Sets the target folder ID.
    pub fn folder_id(mut self, id: impl Into<String>) -> Self {
        self.config.sync.folder_id = id.into();
        self
    }

    /// Sets the file name glob pattern.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.sync.pattern = pattern.into();
        self
    }

    /// Enables or disables MD5 verification.
    pub fn check_md5(mut self, enabled: bool) -> Self {
        self.config.sync.check_md5 = enabled;
        self
    }

    /// Enables or disables forced uploads.
    pub fn force_upload(mut self, enabled: bool) -> Self {
        self.config.sync.force_upload = enabled;
        self
    }

    /// Enables or disables recursive enumeration.
    pub fn recursive(mut self, enabled: bool) -> Self {
        self.config.sync.recursive = enabled;
        self
    }

    /// Sets the daemon check interval in seconds.
    pub fn check_interval(mut self, secs: u64) -> Self {
        self.config.sync.check_interval = secs;
        self
    }

    /// Sets the per-cycle worker pool size.
    pub fn concurrency(mut self, workers: usize) -> Self {
        self.config.sync.concurrency = workers;
        self
    }

    /// Finalizes the configuration.
    pub fn build(self) -> Config {
        self.config
    }
}
