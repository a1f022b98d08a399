//! Error type shared by every transonic module
//!
//! Only failures that stop the whole run are errors. A host whose ping output
//! cannot be parsed is reported with unknown fields instead.

use thiserror::Error;

/// Everything that can abort a transonic run
#[derive(Error, Debug)]
pub enum AppError {
    /// Inconsistent settings or an unreadable `.env`
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors (bad CLI or environment values)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The external probe utility could not be started at all
    #[error("Probe execution error: {0}")]
    ProbeExecution(String),

    /// Unknown output style or a formatter that could not render
    #[error("Format error: {0}")]
    Format(String),

    /// Writing the report failed, or ping could not be started for one host
    #[error("I/O error: {0}")]
    Io(String),

    /// A `TRANSONIC_*` value that is not a number or boolean
    #[error("Parsing error: {0}")]
    Parse(String),

    /// A worker panicked or a result went missing
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// The ping program is missing or cannot be executed
    pub fn probe_execution<S: Into<String>>(message: S) -> Self {
        Self::ProbeExecution(message.into())
    }

    pub fn format<S: Into<String>>(message: S) -> Self {
        Self::Format(message.into())
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Short tag used in log entries and console output
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Validation(_) => "VALIDATION",
            Self::ProbeExecution(_) => "PROBE",
            Self::Format(_) => "FORMAT",
            Self::Io(_) => "IO",
            Self::Parse(_) => "PARSE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Whether this error aborts a run that is already dispatching probes
    pub fn is_fatal_to_run(&self) -> bool {
        matches!(self, Self::ProbeExecution(_) | Self::Internal(_))
    }

    /// Longer explanation with a hint, shown with `--verbose`
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Config(msg) => {
                format!("Configuration problem: {}\n\nSuggestion: Check your .env file or command line arguments.", msg)
            }
            Self::Validation(msg) => {
                format!("Invalid input: {}\n\nSuggestion: Check --count, --concurrency and --replies values.", msg)
            }
            Self::ProbeExecution(msg) => {
                format!("Could not run the probe utility: {}\n\nSuggestion: Make sure ping is installed and on PATH, or pass --ping-program.", msg)
            }
            Self::Format(msg) => {
                format!("Cannot render results: {}\n\nSuggestion: Use one of the modes listed by --help.", msg)
            }
            Self::Io(msg) => {
                format!("File operation failed: {}\n\nSuggestion: Check file permissions and disk space.", msg)
            }
            Self::Parse(msg) => {
                format!("Failed to parse value: {}\n\nSuggestion: Check the format of your configuration values.", msg)
            }
            Self::Internal(msg) => {
                format!("Internal error: {}\n\nThis is likely a bug. Please report this issue with the error details.", msg)
            }
        }
    }

    /// Process exit status; usage problems share 1
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) | Self::Format(_) => 1,
            Self::ProbeExecution(_) => 2,
            Self::Io(_) => 5,
            Self::Internal(_) => 99,
        }
    }

    /// `[CATEGORY] message`, colored by severity when enabled
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Validation(_) | Self::Parse(_) | Self::Format(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::ProbeExecution(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Io(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::format(format!("JSON serialization error: {}", error))
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::parse(format!("Integer parse error: {}", error))
    }
}

impl From<std::str::ParseBoolError> for AppError {
    fn from(error: std::str::ParseBoolError) -> Self {
        Self::parse(format!("Boolean parse error: {}", error))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::internal(format!("Probe worker failed: {}", error))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::internal(error.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AppError>;

/// Prints run-ending errors on stderr
pub struct ErrorReporter {
    pub use_color: bool,
    pub verbose: bool,
}

impl ErrorReporter {
    pub fn new(use_color: bool, verbose: bool) -> Self {
        Self { use_color, verbose }
    }

    /// Render an error the way `report_error` prints it
    pub fn render(&self, error: &AppError) -> String {
        let mut out = error.format_for_console(self.use_color);
        if self.verbose {
            out.push_str("\n\n");
            out.push_str(&error.user_friendly_message());
        }
        out
    }

    pub fn report_error(&self, error: &AppError) {
        eprintln!("{}", self.render(error));
    }
}
