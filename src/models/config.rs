//! Configuration data model and validation

use crate::config::env::EnvManager;
use crate::types::{AppError, OutputStyle, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Hosts to probe, in report order
    #[serde(default)]
    pub hosts: Vec<String>,

    /// Echo requests sent to each host
    #[serde(default = "default_count")]
    pub count: u32,

    /// Upper bound on probes running at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Replies needed for a host to count as up; `None` means all of them
    #[serde(default)]
    pub reply_threshold: Option<u32>,

    /// Clamp the reply threshold to `count` when it is larger
    #[serde(default = "default_adjust_replies")]
    pub adjust_replies: bool,

    /// Report style
    #[serde(default)]
    pub style: OutputStyle,

    /// Per-probe timeout handed to the probe utility
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// Probe utility to execute
    #[serde(default = "default_ping_program")]
    pub ping_program: String,

    /// Suppress informational messages
    #[serde(default)]
    pub terse: bool,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hosts: Vec::new(),
            count: default_count(),
            concurrency: default_concurrency(),
            reply_threshold: None,
            adjust_replies: default_adjust_replies(),
            style: OutputStyle::default(),
            timeout_seconds: None,
            ping_program: default_ping_program(),
            terse: false,
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-probe timeout as Duration
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    /// Threshold as requested, before any adjustment
    pub fn requested_reply_threshold(&self) -> u32 {
        self.reply_threshold.unwrap_or(self.count)
    }

    /// Threshold the classifier should apply.
    ///
    /// A request above `count` is clamped to `count` unless adjustment is
    /// disabled, in which case it is kept and every host reports down.
    pub fn effective_reply_threshold(&self) -> u32 {
        let requested = self.requested_reply_threshold();
        if self.adjust_replies && requested > self.count {
            self.count
        } else {
            requested
        }
    }

    /// Number of workers the dispatcher will actually start
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.min(self.hosts.len())
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if self.hosts.is_empty() {
            return Err(AppError::config("At least one target host is required"));
        }

        if let Some(position) = self.hosts.iter().position(|h| h.trim().is_empty()) {
            return Err(AppError::config(format!("Target host #{} is empty", position + 1)));
        }

        if self.count == 0 {
            return Err(AppError::config("Probe count must be greater than 0"));
        }

        if self.count > crate::defaults::MAX_COUNT {
            return Err(AppError::config(format!(
                "Probe count cannot exceed {}",
                crate::defaults::MAX_COUNT
            )));
        }

        if self.concurrency == 0 {
            return Err(AppError::config("Concurrency must be greater than 0"));
        }

        if let Some(timeout) = self.timeout_seconds {
            if timeout == 0 {
                return Err(AppError::config("Timeout must be greater than 0"));
            }
            if timeout > crate::defaults::MAX_TIMEOUT_SECS {
                return Err(AppError::config(format!(
                    "Timeout cannot exceed {} seconds",
                    crate::defaults::MAX_TIMEOUT_SECS
                )));
            }
        }

        if self.ping_program.trim().is_empty() {
            return Err(AppError::config("Ping program cannot be empty"));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Some(count) = env_value("TRANSONIC_COUNT")? {
            self.count = count.parse()?;
        }

        if let Some(concurrency) = env_value("TRANSONIC_CONCURRENCY")? {
            self.concurrency = concurrency.parse()?;
        }

        if let Some(mode) = env_value("TRANSONIC_MODE")? {
            self.style = mode.parse()?;
        }

        if let Some(timeout) = env_value("TRANSONIC_TIMEOUT")? {
            self.timeout_seconds = if timeout.is_empty() {
                None
            } else {
                Some(timeout.parse()?)
            };
        }

        if let Some(program) = env_value("TRANSONIC_PING_PROGRAM")? {
            if !program.is_empty() {
                self.ping_program = program;
            }
        }

        if let Some(enable_color) = env_value("TRANSONIC_ENABLE_COLOR")? {
            self.enable_color = enable_color.parse()?;
        }

        Ok(())
    }
}

/// Trimmed value of `name`, checked by [`EnvManager::validate_env_var`]
fn env_value(name: &str) -> Result<Option<String>> {
    match std::env::var(name) {
        Ok(value) => {
            EnvManager::validate_env_var(name, &value)?;
            Ok(Some(value.trim().to_string()))
        }
        Err(_) => Ok(None),
    }
}

// Default value functions for serde
fn default_count() -> u32 {
    crate::defaults::DEFAULT_COUNT
}

fn default_concurrency() -> usize {
    crate::defaults::DEFAULT_CONCURRENCY
}

fn default_adjust_replies() -> bool {
    true
}

fn default_ping_program() -> String {
    crate::defaults::DEFAULT_PING_PROGRAM.to_string()
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
