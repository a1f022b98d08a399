//! Configuration parsing from CLI arguments and environment variables

use crate::{cli::Cli, config::env::EnvManager, error::Result, models::Config};

/// Builds a [`Config`] from defaults, `.env`, the environment and the CLI,
/// in increasing order of precedence
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        let mut config = Config::default();

        self.load_env_file()?;
        config.merge_from_env()?;
        self.apply_cli_overrides(&mut config)?;
        config.validate()?;

        Ok(config)
    }

    fn load_env_file(&self) -> Result<()> {
        EnvManager::load_env_file(self.cli.debug)
    }

    /// Apply CLI argument overrides to configuration
    pub fn apply_cli_overrides(&self, config: &mut Config) -> Result<()> {
        let cli = &self.cli;

        config.hosts = cli.targets.clone();

        if let Some(count) = cli.count {
            config.count = count;
        }
        if let Some(concurrency) = cli.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(replies) = cli.replies {
            config.reply_threshold = Some(replies);
        }
        if cli.no_adjust_replies {
            config.adjust_replies = false;
        }
        if let Some(mode) = &cli.mode {
            config.style = mode.parse()?;
        }
        if let Some(timeout) = cli.timeout {
            config.timeout_seconds = Some(timeout);
        }
        if let Some(program) = &cli.ping_program {
            config.ping_program = program.clone();
        }

        // Explicit flags win; otherwise the env setting only holds on a color terminal
        config.enable_color = match cli.color_override() {
            Some(forced) => forced,
            None => config.enable_color && cli.use_colors(),
        };

        config.terse = cli.terse;
        config.verbose = cli.verbose;
        config.debug = cli.debug;

        Ok(())
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Configuration summary for debug output
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Hosts: {}", config.hosts.len()));
    summary.push(format!("Probe count: {}", config.count));
    summary.push(format!(
        "Concurrency: {} (effective {})",
        config.concurrency,
        config.effective_concurrency()
    ));
    summary.push(format!(
        "Reply threshold: {} (requested {}, adjust {})",
        config.effective_reply_threshold(),
        config.requested_reply_threshold(),
        config.adjust_replies
    ));
    summary.push(format!("Mode: {}", config.style));
    summary.push(format!(
        "Timeout: {}",
        config
            .timeout_seconds
            .map(|t| format!("{}s", t))
            .unwrap_or_else(|| "ping default".to_string())
    ));
    summary.push(format!("Ping program: {}", config.ping_program));
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("Terse: {}", config.terse));

    summary.join("\n")
}
