//! Runtime configuration for the command-line boundary.
//!
//! Each setting resolves from its flag, then its environment variable, then
//! a built-in default.

use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "staffroll.sqlite3";

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite database file
    #[arg(long = "db", global = true, env = "STAFFROLL_DB", default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// Log level (trace|debug|info|warn|error); build-mode default when unset
    #[arg(long, global = true, env = "STAFFROLL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "STAFFROLL_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Effective log level.
    pub fn log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or_else(|| staffroll_core::default_log_level())
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns whether logging was started.
    pub fn init_logging(&self) -> anyhow::Result<bool> {
        let Some(log_dir) = &self.log_dir else {
            return Ok(false);
        };
        let log_dir = log_dir
            .to_str()
            .with_context(|| format!("log directory is not valid UTF-8: {}", log_dir.display()))?;
        staffroll_core::init_logging(self.log_level(), log_dir)
            .context("failed to initialize logging")?;
        Ok(true)
    }
}
