//! Styles that use terminal attributes
//!
//! `cell` highlights down hosts with reverse video. Without color the
//! highlight falls back to brackets so the report stays readable in logs.

use super::formatter::{FormattingOptions, ResultFormatter};
use crate::{error::Result, models::ProbeResult, stats::Classifier};
use colored::*;

/// Colors for informational text on stderr
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub info: Color,
    pub warning: Color,
    pub error: Color,
    pub muted: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            info: Color::Cyan,
            warning: Color::Yellow,
            error: Color::Red,
            muted: Color::BrightBlack,
        }
    }
}

/// Hostnames on one line with down hosts highlighted, then the totals line
#[derive(Debug, Clone)]
pub struct CellFormatter {
    options: FormattingOptions,
}

impl CellFormatter {
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }

    /// Render a down host
    pub fn highlight(&self, host: &str) -> String {
        if self.options.enable_color {
            host.reversed().to_string()
        } else {
            format!("[{}]", host)
        }
    }
}

impl ResultFormatter for CellFormatter {
    fn format(&self, results: &[ProbeResult], reply_threshold: u32) -> Result<String> {
        let classifier = Classifier::new(reply_threshold);
        let cells: Vec<String> = results
            .iter()
            .map(|r| {
                if classifier.classify(r).is_up() {
                    r.host.clone()
                } else {
                    self.highlight(&r.host)
                }
            })
            .collect();
        Ok(format!("{}\n{}", cells.join(" "), classifier.tally(results)))
    }

    fn name(&self) -> &'static str {
        "cell"
    }
}

/// Paints informational messages, warnings and errors
#[derive(Debug, Clone)]
pub struct MessagePainter {
    options: FormattingOptions,
    color_scheme: ColorScheme,
}

impl MessagePainter {
    pub fn new(options: FormattingOptions) -> Self {
        Self {
            options,
            color_scheme: ColorScheme::default(),
        }
    }

    fn colorize(&self, text: &str, color: Color) -> ColoredString {
        if self.options.enable_color {
            text.color(color)
        } else {
            text.normal()
        }
    }

    pub fn info(&self, message: &str) -> String {
        self.colorize(message, self.color_scheme.muted).to_string()
    }

    fn label(&self, text: &str, color: Color) -> ColoredString {
        if self.options.enable_color {
            text.color(color).bold()
        } else {
            text.normal()
        }
    }

    pub fn warning(&self, message: &str) -> String {
        format!("{} {}", self.label("Warning:", self.color_scheme.warning), message)
    }

    pub fn notice(&self, message: &str) -> String {
        format!("{} {}", self.colorize("Note:", self.color_scheme.info), message)
    }

    pub fn error(&self, message: &str) -> String {
        format!("{} {}", self.label("Error:", self.color_scheme.error), message)
    }
}
