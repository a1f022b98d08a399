//! Configuration checks that produce warnings instead of errors

use crate::{error::Result, models::Config};
use colored::*;
use std::fmt;

/// Concurrency above which a run is likely to hit process or socket limits
pub const HIGH_CONCURRENCY: usize = 500;

/// Validation warning levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationLevel {
    Info,
    Warning,
}

impl ValidationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::Blue,
            Self::Warning => Color::Yellow,
        }
    }
}

/// Something worth telling the user about a configuration that is still usable
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(level: ValidationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn is_warning(&self) -> bool {
        self.level == ValidationLevel::Warning
    }

    /// Format warning for display
    pub fn format(&self, use_color: bool) -> String {
        let tag = format!("[{}]", self.level.as_str());
        if use_color {
            format!("{} {}", tag.color(self.level.color()), self.message)
        } else {
            format!("{} {}", tag, self.message)
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

pub struct ConfigValidator;

impl ConfigValidator {
    /// Run the hard checks, then collect warnings
    pub fn validate_comprehensive(config: &Config) -> Result<Vec<ValidationWarning>> {
        config.validate()?;

        let mut warnings = Vec::new();
        warnings.extend(Self::validate_reply_threshold(config));
        warnings.extend(Self::validate_concurrency(config));
        warnings.extend(Self::validate_hosts(config));
        Ok(warnings)
    }

    fn validate_reply_threshold(config: &Config) -> Vec<ValidationWarning> {
        let requested = config.requested_reply_threshold();
        if requested <= config.count {
            return Vec::new();
        }

        let message = if config.adjust_replies {
            format!(
                "Reply threshold {} is larger than the probe count {}; using {}",
                requested, config.count, config.count
            )
        } else {
            format!(
                "Reply threshold {} is larger than the probe count {}; every host will be reported down",
                requested, config.count
            )
        };
        vec![ValidationWarning::new(ValidationLevel::Warning, message)]
    }

    fn validate_concurrency(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if config.concurrency > HIGH_CONCURRENCY {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Concurrency {} may exhaust process limits; consider {} or fewer",
                    config.concurrency, HIGH_CONCURRENCY
                ),
            ));
        }

        if config.concurrency > config.hosts.len() && config.verbose {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!(
                    "Only {} workers are needed for {} hosts",
                    config.effective_concurrency(),
                    config.hosts.len()
                ),
            ));
        }

        warnings
    }

    fn validate_hosts(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        let mut seen = std::collections::HashSet::new();

        for host in &config.hosts {
            if !seen.insert(host.as_str()) {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Info,
                    format!("Host '{}' is listed more than once and will be probed each time", host),
                ));
            }
            if host.starts_with('-') {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Warning,
                    format!("Host '{}' starts with '-' and may be read as an option by the probe utility", host),
                ));
            }
        }

        warnings
    }
}

/// Convenience function for comprehensive validation
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_comprehensive(config)
}
