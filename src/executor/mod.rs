//! Probe dispatch
//!
//! A fixed pool of worker tasks drains a shared job queue of `(index, host)`
//! pairs. Each worker probes one host at a time and reports back over a
//! channel; the collector puts results back into input order.

use crate::{
    error::{AppError, Result},
    logging::ProbeLogger,
    models::{metrics::duration_ms, Config, ProbeResult},
    probe::{probe_host, ProbeConfig, ProbeRunner},
    stats::Classifier,
};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::{
    collections::VecDeque,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::{
    sync::{mpsc, Mutex},
    task::JoinHandle,
};

/// Execution settings for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Settings handed to every probe
    pub probe: ProbeConfig,
    /// Requested worker limit
    pub concurrency: usize,
    /// Threshold used when logging per-host verdicts
    pub reply_threshold: u32,
    pub verbose: bool,
    pub debug: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            probe: ProbeConfig::default(),
            concurrency: crate::defaults::DEFAULT_CONCURRENCY,
            reply_threshold: crate::defaults::DEFAULT_COUNT,
            verbose: false,
            debug: false,
        }
    }
}

impl From<&Config> for ExecutionConfig {
    fn from(config: &Config) -> Self {
        Self {
            probe: ProbeConfig::from(config),
            concurrency: config.concurrency,
            reply_threshold: config.effective_reply_threshold(),
            verbose: config.verbose,
            debug: config.debug,
        }
    }
}

/// Ordered results of a run plus what it took to get them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// One result per host, in input order
    pub results: Vec<ProbeResult>,
    /// Worker tasks actually started
    pub workers: usize,
    /// Echo requests sent to each host
    pub probe_count: u32,
    #[serde(with = "duration_ms")]
    pub elapsed: Duration,
}

impl RunReport {
    pub fn host_count(&self) -> usize {
        self.results.len()
    }

    /// Average wall time per host in seconds
    pub fn per_host_seconds(&self) -> f64 {
        if self.results.is_empty() {
            0.0
        } else {
            self.elapsed.as_secs_f64() / self.results.len() as f64
        }
    }
}

type Job = (usize, String);
type Outcome = (usize, String, Result<ProbeResult>);

/// Runs one probe per host with bounded concurrency
pub struct Dispatcher {
    runner: Arc<dyn ProbeRunner>,
    config: ExecutionConfig,
    logger: Option<ProbeLogger>,
}

impl Dispatcher {
    pub fn new(runner: Arc<dyn ProbeRunner>, config: ExecutionConfig) -> Self {
        Self {
            runner,
            config,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: ProbeLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Workers started for `host_count` hosts: `min(concurrency, host_count)`
    pub fn effective_workers(&self, host_count: usize) -> usize {
        self.config.concurrency.min(host_count)
    }

    /// Probe every host and return the results in input order.
    ///
    /// An unreachable or unparseable host is data. A probe utility that
    /// cannot be started stops the whole run with that error.
    pub async fn run(&self, hosts: &[String]) -> Result<RunReport> {
        if hosts.is_empty() {
            return Err(AppError::validation("No hosts to probe"));
        }
        if self.config.concurrency == 0 {
            return Err(AppError::validation("Concurrency must be at least 1"));
        }

        let started = Instant::now();
        let workers = self.effective_workers(hosts.len());

        let queue: Arc<Mutex<VecDeque<Job>>> = Arc::new(Mutex::new(
            hosts.iter().cloned().enumerate().collect(),
        ));
        let (sender, mut receiver) = mpsc::channel::<Outcome>(hosts.len());

        let mut handles: Vec<JoinHandle<()>> = Vec::with_capacity(workers);
        for _ in 0..workers {
            let queue = queue.clone();
            let sender = sender.clone();
            let runner = self.runner.clone();
            let probe_config = self.config.probe;

            handles.push(tokio::spawn(async move {
                loop {
                    let job = queue.lock().await.pop_front();
                    let Some((index, host)) = job else { break };
                    let outcome = probe_host(runner.as_ref(), &host, &probe_config).await;
                    if sender.send((index, host, outcome)).await.is_err() {
                        break;
                    }
                }
            }));
        }
        drop(sender);

        let classifier = Classifier::new(self.config.reply_threshold);
        let mut slots: Vec<Option<ProbeResult>> = (0..hosts.len()).map(|_| None).collect();

        while let Some((index, host, outcome)) = receiver.recv().await {
            let result = match outcome {
                Ok(result) => result,
                Err(e) if e.is_fatal_to_run() => {
                    queue.lock().await.clear();
                    for handle in &handles {
                        handle.abort();
                    }
                    if let Some(logger) = &self.logger {
                        logger.log_probe_failure(&host, &e).await;
                    }
                    return Err(e);
                }
                Err(e) => {
                    if let Some(logger) = &self.logger {
                        logger.log_probe_failure(&host, &e).await;
                    }
                    ProbeResult::unknown(host, None)
                }
            };

            if let Some(logger) = &self.logger {
                logger
                    .log_probe_result(index, &result, classifier.classify(&result))
                    .await;
            }

            match slots.get_mut(index) {
                Some(slot) => *slot = Some(result),
                None => return Err(AppError::internal(format!("Result index {} out of range", index))),
            }
        }

        for joined in join_all(handles).await {
            if let Err(e) = joined {
                if e.is_panic() {
                    return Err(AppError::from(e));
                }
            }
        }

        let results = slots
            .into_iter()
            .zip(hosts)
            .map(|(slot, host)| {
                slot.ok_or_else(|| AppError::internal(format!("No result was collected for {}", host)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RunReport {
            results,
            workers,
            probe_count: self.config.probe.count,
            elapsed: started.elapsed(),
        })
    }
}
