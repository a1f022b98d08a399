//! Report rendering
//!
//! The report itself goes to stdout through one [`ResultFormatter`].
//! Informational lines (start banner, timing, warnings) go to stderr and are
//! dropped entirely in terse mode.

mod colored;
mod formatter;

pub use colored::{CellFormatter, ColorScheme, MessagePainter};
pub use formatter::{
    CCellFormatter, FormattingOptions, JsonFormatter, ListFormatter, ResultFormatter, UpdlFormatter,
};

use crate::{
    error::Result,
    executor::RunReport,
    models::Config,
    types::OutputStyle,
};
use std::io::{self, Write};

/// Creates the formatter for a style
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    pub fn create(style: OutputStyle, options: FormattingOptions) -> Box<dyn ResultFormatter> {
        match style {
            OutputStyle::List => Box::new(ListFormatter),
            OutputStyle::Cell => Box::new(CellFormatter::new(options)),
            OutputStyle::CCell => Box::new(CCellFormatter),
            OutputStyle::Updl => Box::new(UpdlFormatter),
            OutputStyle::Json => Box::new(JsonFormatter),
        }
    }

    /// Look a formatter up by style name; unknown names are a `Format` error
    pub fn create_by_name(name: &str, options: FormattingOptions) -> Result<Box<dyn ResultFormatter>> {
        Ok(Self::create(name.parse()?, options))
    }

    /// Formatter selected by the configuration
    pub fn from_config(config: &Config) -> Box<dyn ResultFormatter> {
        Self::create(
            config.style,
            FormattingOptions {
                enable_color: config.enable_color,
            },
        )
    }
}

/// Sends the report to stdout and informational text to stderr
pub struct OutputCoordinator {
    formatter: Box<dyn ResultFormatter>,
    painter: MessagePainter,
    terse: bool,
}

impl OutputCoordinator {
    pub fn new(formatter: Box<dyn ResultFormatter>, options: FormattingOptions, terse: bool) -> Self {
        Self {
            formatter,
            painter: MessagePainter::new(options),
            terse,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            OutputFormatterFactory::from_config(config),
            FormattingOptions {
                enable_color: config.enable_color,
            },
            config.terse,
        )
    }

    pub fn formatter(&self) -> &dyn ResultFormatter {
        self.formatter.as_ref()
    }

    pub fn is_terse(&self) -> bool {
        self.terse
    }

    /// The complete report text
    pub fn render_report(&self, report: &RunReport, reply_threshold: u32) -> Result<String> {
        self.formatter.format(&report.results, reply_threshold)
    }

    /// Render and print the report on stdout
    pub fn display_report(&self, report: &RunReport, reply_threshold: u32) -> Result<()> {
        let text = self.render_report(report, reply_threshold)?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", text)?;
        stdout.flush()?;
        Ok(())
    }

    pub fn start_message(hosts: usize, workers: usize, count: u32) -> String {
        format!(
            "Pinging {} machines with {} workers, {} probes each.",
            hosts, workers, count
        )
    }

    pub fn timing_message(report: &RunReport) -> String {
        format!(
            "Time taken: {:.2}s ({:.3}s per host)",
            report.elapsed.as_secs_f64(),
            report.per_host_seconds()
        )
    }

    /// Print an informational line unless terse
    pub fn info(&self, message: &str) {
        if !self.terse {
            eprintln!("{}", self.painter.info(message));
        }
    }

    /// Print a warning unless terse
    pub fn warning(&self, message: &str) {
        if !self.terse {
            eprintln!("{}", self.painter.warning(message));
        }
    }

    /// Print a low-severity note unless terse
    pub fn notice(&self, message: &str) {
        if !self.terse {
            eprintln!("{}", self.painter.notice(message));
        }
    }
}
