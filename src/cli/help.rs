//! Topic help shown with `--help-topic`

use crate::{config::env::EnvManager, types::OutputStyle};
use colored::*;

/// Topics `--help-topic` understands
pub const TOPICS: &[&str] = &["modes", "env", "threshold", "examples"];

pub struct HelpSystem;

impl HelpSystem {
    pub fn new() -> Self {
        Self
    }

    /// Help text for `topic`, or `None` for an unknown topic
    pub fn display_topic_help(&self, topic: &str, use_colors: bool) -> Option<String> {
        match topic.to_lowercase().as_str() {
            "modes" | "mode" | "output" => Some(self.format_modes_help(use_colors)),
            "env" | "environment" => Some(self.format_environment_help(use_colors)),
            "threshold" | "replies" => Some(self.format_threshold_help(use_colors)),
            "examples" => Some(self.format_examples_help(use_colors)),
            _ => None,
        }
    }

    fn header(&self, text: &str, use_colors: bool) -> String {
        if use_colors {
            text.bright_green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn format_modes_help(&self, use_colors: bool) -> String {
        let mut help = format!("{}\n\n", self.header("OUTPUT MODES:", use_colors));
        for style in OutputStyle::ALL.iter() {
            let description = match style {
                OutputStyle::List => "one line per host: <host> S<sent>/R<received>, maMD: min/avg/max/mdev",
                OutputStyle::Cell => "hostnames on one line, down hosts highlighted",
                OutputStyle::CCell => "one character per host, '.' up and '!' down",
                OutputStyle::Updl => "UP:, DOWN: and TOTALS: lines",
                OutputStyle::Json => "JSON array with one object per host",
            };
            help.push_str(&format!("  {:<6} {}\n", style.name(), description));
        }
        help.push_str("\nEvery mode except list and json ends with '<n> up, <n> down'.\n");
        help.push_str("Unknown fields are printed as '?'.\n");
        help
    }

    fn format_environment_help(&self, use_colors: bool) -> String {
        format!(
            "{}\n\n{}",
            self.header("ENVIRONMENT:", use_colors),
            EnvManager::display_env_help()
        )
    }

    fn format_threshold_help(&self, use_colors: bool) -> String {
        let mut help = format!("{}\n\n", self.header("REPLY THRESHOLD:", use_colors));
        help.push_str("  A host is up when at least --replies echo replies came back.\n");
        help.push_str("  The default threshold equals --count, so any loss marks a host down.\n");
        help.push_str("  A host whose report could not be read is always down.\n\n");
        help.push_str("  A threshold above --count is lowered to --count with a warning;\n");
        help.push_str("  pass --no-adjust-replies to keep it (every host is then down).\n");
        help
    }

    fn format_examples_help(&self, use_colors: bool) -> String {
        let examples = [
            ("Ping three hosts", "transonic gw1 gw2 10.0.0.1"),
            ("Compact overview of a subnet", "transonic -m ccell -c 2 10.0.0.{1..254}"),
            ("Up if at least 3 of 5 replies arrive", "transonic -r 3 host1 host2"),
            ("Script-friendly output", "transonic -q -m json host1 host2"),
            ("Use a specific ping binary", "transonic --ping-program /bin/busybox-ping host1"),
        ];

        let mut help = format!("{}\n\n", self.header("EXAMPLES:", use_colors));
        for (description, command) in examples {
            help.push_str(&format!("  # {}\n", description));
            if use_colors {
                help.push_str(&format!("  {}\n\n", command.bright_white()));
            } else {
                help.push_str(&format!("  {}\n\n", command));
            }
        }
        help
    }
}

impl Default for HelpSystem {
    fn default() -> Self {
        Self::new()
    }
}
