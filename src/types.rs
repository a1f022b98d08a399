//! Type definitions and aliases

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Report styles the formatter registry knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// One line per host with packet counts and rtt summary
    List,
    /// Hostnames on one line, down hosts highlighted
    Cell,
    /// One character per host
    CCell,
    /// Separate UP and DOWN lines plus totals
    Updl,
    /// Machine-readable JSON array
    Json,
}

impl OutputStyle {
    /// Every style, in the order they are listed to users
    pub const ALL: [OutputStyle; 5] = [
        OutputStyle::List,
        OutputStyle::Cell,
        OutputStyle::CCell,
        OutputStyle::Updl,
        OutputStyle::Json,
    ];

    /// Name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            OutputStyle::List => "list",
            OutputStyle::Cell => "cell",
            OutputStyle::CCell => "ccell",
            OutputStyle::Updl => "updl",
            OutputStyle::Json => "json",
        }
    }

    /// Comma separated list of style names, for help and error text
    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for OutputStyle {
    fn default() -> Self {
        Self::List
    }
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputStyle {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|style| style.name() == s)
            .ok_or_else(|| {
                AppError::format(format!(
                    "Unknown output style '{}' (expected one of: {})",
                    s,
                    Self::names()
                ))
            })
    }
}

/// Reachability verdict for one host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Liveness {
    Up,
    Down,
}

impl Liveness {
    pub fn is_up(&self) -> bool {
        matches!(self, Liveness::Up)
    }
}
