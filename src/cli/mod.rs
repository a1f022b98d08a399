//! Command-line interface

pub mod help;

pub use help::HelpSystem;

use clap::Parser;
use std::io::IsTerminal;

/// Ping many hosts in parallel and summarize which ones answered
#[derive(Parser, Debug, Clone)]
#[command(name = "transonic")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Hostnames or addresses to ping
    #[arg(value_name = "TARGET", required_unless_present = "help_topic")]
    pub targets: Vec<String>,

    /// Number of ICMP echo requests to send to each host [default: 5]
    #[arg(short, long)]
    pub count: Option<u32>,

    /// Number of hosts probed at the same time [default: 100]
    #[arg(short = 'n', long)]
    pub concurrency: Option<usize>,

    /// Replies needed for a host to count as up [default: count]
    #[arg(short, long)]
    pub replies: Option<u32>,

    /// Keep a reply threshold larger than the count instead of lowering it
    #[arg(long)]
    pub no_adjust_replies: bool,

    /// Output mode: list, cell, ccell, updl, json [default: list]
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Seconds to wait for each reply, passed to ping as -W
    #[arg(short = 'W', long, value_parser = parse_duration)]
    pub timeout: Option<u64>,

    /// Only print the report
    #[arg(short = 'q', long)]
    pub terse: bool,

    /// Probe program to run instead of ping
    #[arg(long, value_name = "PROGRAM")]
    pub ping_program: Option<String>,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Show help for a topic (modes, env, threshold, examples)
    #[arg(long, value_name = "TOPIC")]
    pub help_topic: Option<String>,
}

impl Cli {
    /// Validate CLI arguments for conflicts and ranges
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if self.help_topic.is_none() && self.targets.is_empty() {
            return Err("Must specify at least one target host".to_string());
        }

        if let Some(count) = self.count {
            if count == 0 || count > crate::defaults::MAX_COUNT {
                return Err(format!(
                    "--count must be between 1 and {}, got {}",
                    crate::defaults::MAX_COUNT,
                    count
                ));
            }
        }

        if self.concurrency == Some(0) {
            return Err("--concurrency must be at least 1".to_string());
        }

        Ok(())
    }

    /// Check if help should be displayed for a specific topic
    pub fn should_show_topic_help(&self) -> bool {
        self.help_topic.is_some()
    }

    /// Help text for the requested topic
    pub fn display_help(&self) -> String {
        let help_system = HelpSystem::new();
        let use_colors = self.use_colors();
        let topic = self.help_topic.as_deref().unwrap_or("examples");

        help_system
            .display_topic_help(topic, use_colors)
            .unwrap_or_else(|| {
                format!(
                    "Unknown help topic: '{}'\n\nAvailable topics: {}\n",
                    topic,
                    help::TOPICS.join(", ")
                )
            })
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            supports_color()
        }
    }

    /// Color preference given on the command line, if any
    pub fn color_override(&self) -> Option<bool> {
        if self.color {
            Some(true)
        } else if self.no_color {
            Some(false)
        } else {
            None
        }
    }
}

/// Parse a timeout in whole seconds
fn parse_duration(s: &str) -> Result<u64, String> {
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid duration: {}", s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid duration: {}", s))
        .and_then(|secs| {
            if secs == 0 {
                Err("Duration must be greater than 0".to_string())
            } else if secs > crate::defaults::MAX_TIMEOUT_SECS {
                Err(format!(
                    "Duration cannot exceed {} seconds",
                    crate::defaults::MAX_TIMEOUT_SECS
                ))
            } else {
                Ok(secs)
            }
        })
}

/// Check if stdout is a terminal that wants color
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    std::io::stdout().is_terminal()
}
