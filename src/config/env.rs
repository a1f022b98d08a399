//! Environment variable handling and .env file management

use crate::{
    error::{AppError, Result},
    types::OutputStyle,
};
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load `.env` from the current directory if present
    pub fn load_env_file(debug: bool) -> Result<()> {
        Self::load_env_file_from(Path::new(".env"), debug)
    }

    /// Load a specific env file if it exists; a missing file is not an error
    pub fn load_env_file_from(path: &Path, debug: bool) -> Result<()> {
        if path.exists() {
            dotenv::from_path(path)
                .map_err(|e| AppError::config(format!("Failed to load {}: {}", path.display(), e)))?;

            if debug {
                eprintln!("Loaded configuration from {}", path.display());
            }
        } else if debug {
            eprintln!("No {} file found, using defaults and CLI arguments", path.display());
        }

        Ok(())
    }

    /// Commented-out `.env` listing every variable with its default
    pub fn create_example_env_content() -> String {
        r#"# transonic configuration
#
# Values here are defaults; command-line arguments override them.

# Echo requests sent to each host (1-100)
# TRANSONIC_COUNT=5

# Maximum probes running at once
# TRANSONIC_CONCURRENCY=100

# Report style: list, cell, ccell, updl, json
# TRANSONIC_MODE=list

# Per-reply timeout in seconds handed to ping (1-300, empty for none)
# TRANSONIC_TIMEOUT=

# Probe utility to run
# TRANSONIC_PING_PROGRAM=ping

# Enable colored output (true/false)
# TRANSONIC_ENABLE_COLOR=true
"#
        .to_string()
    }

    /// Check one `TRANSONIC_*` value; other names are accepted as-is
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "TRANSONIC_COUNT" => {
                let count: u32 = value
                    .parse()
                    .map_err(|e| AppError::config(format!("Invalid TRANSONIC_COUNT value '{}': {}", value, e)))?;
                if count == 0 || count > crate::defaults::MAX_COUNT {
                    return Err(AppError::config(format!(
                        "TRANSONIC_COUNT must be between 1 and {}, got: {}",
                        crate::defaults::MAX_COUNT,
                        count
                    )));
                }
            }
            "TRANSONIC_CONCURRENCY" => {
                let concurrency: usize = value.parse().map_err(|e| {
                    AppError::config(format!("Invalid TRANSONIC_CONCURRENCY value '{}': {}", value, e))
                })?;
                if concurrency == 0 {
                    return Err(AppError::config("TRANSONIC_CONCURRENCY must be at least 1"));
                }
            }
            "TRANSONIC_MODE" => {
                value.parse::<OutputStyle>()?;
            }
            "TRANSONIC_TIMEOUT" => {
                if !value.is_empty() {
                    let timeout: u64 = value.parse().map_err(|e| {
                        AppError::config(format!("Invalid TRANSONIC_TIMEOUT value '{}': {}", value, e))
                    })?;
                    if timeout == 0 || timeout > crate::defaults::MAX_TIMEOUT_SECS {
                        return Err(AppError::config(format!(
                            "TRANSONIC_TIMEOUT must be between 1 and {}, got: {}",
                            crate::defaults::MAX_TIMEOUT_SECS,
                            timeout
                        )));
                    }
                }
            }
            "TRANSONIC_ENABLE_COLOR" => {
                value.parse::<bool>().map_err(|e| {
                    AppError::config(format!("Invalid TRANSONIC_ENABLE_COLOR value '{}': {}", value, e))
                })?;
            }
            _ => {}
        }

        Ok(())
    }

    /// Supported variables as (name, description, example)
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("TRANSONIC_COUNT", "Echo requests per host (1-100)", "5"),
            ("TRANSONIC_CONCURRENCY", "Maximum concurrent probes", "100"),
            ("TRANSONIC_MODE", "Report style (list, cell, ccell, updl, json)", "ccell"),
            ("TRANSONIC_TIMEOUT", "Per-reply timeout in seconds (1-300)", "2"),
            ("TRANSONIC_PING_PROGRAM", "Probe utility to run", "/usr/bin/ping"),
            ("TRANSONIC_ENABLE_COLOR", "Enable colored output", "true"),
        ]
    }

    /// Environment help text shown by `--help-topic env`
    pub fn display_env_help() -> String {
        let mut help = String::new();
        help.push_str("Supported Environment Variables:\n\n");

        for (var, description, example) in Self::get_supported_env_vars() {
            help.push_str(&format!("  {:<24} {}\n", var, description));
            help.push_str(&format!("  {:<24} Example: {}\n\n", "", example));
        }

        help.push_str("Configuration Priority (highest to lowest):\n");
        help.push_str("  1. Command-line arguments\n");
        help.push_str("  2. Environment variables\n");
        help.push_str("  3. .env file values\n");
        help.push_str("  4. Default values\n\n");

        help.push_str("Example .env file:\n\n");
        help.push_str(&Self::create_example_env_content());

        help
    }
}
