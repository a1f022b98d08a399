//! Main application orchestration and execution

use crate::{
    cli::Cli,
    config::{display_config_summary, load_config, validate_config},
    error::Result,
    executor::{Dispatcher, ExecutionConfig, RunReport},
    logging::{Logger, ProbeLogger},
    models::Config,
    output::OutputCoordinator,
    probe::{PingRunner, ProbeRunner},
    stats::Classifier,
};
use std::sync::Arc;
use uuid::Uuid;

/// Main application struct that coordinates all components
pub struct App {
    cli: Cli,
    runner: Option<Arc<dyn ProbeRunner>>,
}

impl App {
    pub fn new(cli: Cli) -> Self {
        Self { cli, runner: None }
    }

    /// Use `runner` instead of spawning the configured ping program
    pub fn with_runner(cli: Cli, runner: Arc<dyn ProbeRunner>) -> Self {
        Self {
            cli,
            runner: Some(runner),
        }
    }

    /// Run the application
    pub async fn run(self) -> Result<()> {
        if self.cli.should_show_topic_help() {
            println!("{}", self.cli.display_help());
            return Ok(());
        }

        let config = load_config(self.cli.clone())?;
        if config.enable_color {
            // Forced color must survive a non-terminal stdout
            colored::control::set_override(true);
        }

        let warnings = validate_config(&config)?;
        let output = OutputCoordinator::from_config(&config);

        if config.debug {
            eprintln!("{}", crate::build_info::banner());
            eprintln!("{}", display_config_summary(&config));
        }

        for warning in &warnings {
            if warning.is_warning() {
                output.warning(&warning.message);
            } else {
                output.notice(&warning.message);
            }
        }

        let runner = self
            .runner
            .unwrap_or_else(|| Arc::new(PingRunner::new(config.ping_program.clone())));

        output.info(&OutputCoordinator::start_message(
            config.hosts.len(),
            config.effective_concurrency(),
            config.count,
        ));

        let report = execute(&config, runner).await?;

        output.display_report(&report, config.effective_reply_threshold())?;
        output.info(&OutputCoordinator::timing_message(&report));

        Ok(())
    }
}

/// Dispatch every configured host and return the ordered report
pub async fn execute(config: &Config, runner: Arc<dyn ProbeRunner>) -> Result<RunReport> {
    let logger = Logger::with_config("TRANSONIC", config);
    logger.set_session_id(Uuid::new_v4().to_string()).await;

    let runner_name = runner.name().to_string();
    let dispatcher = Dispatcher::new(runner, ExecutionConfig::from(config))
        .with_logger(ProbeLogger::from_logger(logger.clone()));

    let correlation_id = logger.start_operation("probe run").await;
    logger
        .info("Starting run")
        .field("hosts", config.hosts.len())
        .field("workers", dispatcher.effective_workers(config.hosts.len()))
        .field("count", config.count)
        .field("runner", &runner_name)
        .log()
        .await;

    let outcome = dispatcher.run(&config.hosts).await;

    match &outcome {
        Ok(report) => {
            let counts = Classifier::new(config.effective_reply_threshold()).tally(&report.results);
            logger
                .info("Run finished")
                .field("up", counts.up)
                .field("down", counts.down)
                .field("elapsed_ms", report.elapsed.as_millis() as u64)
                .log()
                .await;
        }
        Err(e) => {
            logger.error("Run aborted").error_info(e).log().await;
        }
    }
    logger
        .end_operation(&correlation_id, "probe run", outcome.is_ok())
        .await;

    outcome
}
