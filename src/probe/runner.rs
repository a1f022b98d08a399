//! Invocation of the external ICMP echo utility

use crate::error::{AppError, Result};
use crate::probe::ProbeConfig;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::process::Command;

/// Captured output of one probe invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProbeOutput {
    /// Standard output, decoded lossily
    pub stdout: String,
    /// Exit code; `None` when the process died from a signal
    pub exit_status: Option<i32>,
}

impl RawProbeOutput {
    pub fn new(stdout: impl Into<String>, exit_status: Option<i32>) -> Self {
        Self {
            stdout: stdout.into(),
            exit_status,
        }
    }
}

/// Something that can probe a single host.
///
/// Implementations return `Err` only when the probe could not be run at all;
/// an unreachable host is a successful call with a non-zero exit status.
#[async_trait]
pub trait ProbeRunner: Send + Sync {
    async fn probe(&self, host: &str, config: &ProbeConfig) -> Result<RawProbeOutput>;

    /// Short name for log messages
    fn name(&self) -> &str;
}

/// Runs the system `ping` (or a compatible program) once per host
#[derive(Debug, Clone)]
pub struct PingRunner {
    program: String,
}

impl PingRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the program for `host`:
    /// `-c <count> -q [-W <seconds>] <host>`
    pub fn arguments(&self, host: &str, config: &ProbeConfig) -> Vec<String> {
        let mut args = vec!["-c".to_string(), config.count.to_string(), "-q".to_string()];
        if let Some(timeout) = config.timeout {
            args.push("-W".to_string());
            args.push(timeout.as_secs().max(1).to_string());
        }
        args.push(host.to_string());
        args
    }
}

impl Default for PingRunner {
    fn default() -> Self {
        Self::new(crate::defaults::DEFAULT_PING_PROGRAM)
    }
}

#[async_trait]
impl ProbeRunner for PingRunner {
    async fn probe(&self, host: &str, config: &ProbeConfig) -> Result<RawProbeOutput> {
        let output = Command::new(&self.program)
            .args(self.arguments(host, config))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| spawn_error(&self.program, host, &e))?;

        Ok(RawProbeOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            exit_status: output.status.code(),
        })
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// Classify a failure to run `program`.
///
/// A missing or unexecutable program stops the run. Anything else, such as
/// running out of file descriptors, only costs this host its report.
fn spawn_error(program: &str, host: &str, error: &std::io::Error) -> AppError {
    match error.kind() {
        ErrorKind::NotFound => AppError::probe_execution(format!("'{}' was not found", program)),
        ErrorKind::PermissionDenied => {
            AppError::probe_execution(format!("'{}' is not executable", program))
        }
        _ => AppError::io(format!("failed to run '{}' for {}: {}", program, host, error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_arguments_without_timeout() {
        let runner = PingRunner::default();
        let config = ProbeConfig::new(5, None);
        assert_eq!(runner.arguments("example.net", &config), vec!["-c", "5", "-q", "example.net"]);
    }

    #[test]
    fn test_arguments_with_timeout() {
        let runner = PingRunner::new("ping");
        let config = ProbeConfig::new(3, Some(Duration::from_secs(2)));
        assert_eq!(
            runner.arguments("10.0.0.1", &config),
            vec!["-c", "3", "-q", "-W", "2", "10.0.0.1"]
        );
    }

    #[tokio::test]
    async fn test_missing_program_is_probe_execution_error() {
        let runner = PingRunner::new("transonic-no-such-ping-binary");
        let err = runner
            .probe("localhost", &ProbeConfig::new(1, None))
            .await
            .unwrap_err();
        assert_eq!(err.category(), "PROBE");
        assert!(err.to_string().contains("was not found"));
    }

    #[test]
    fn test_only_missing_or_unexecutable_program_is_fatal() {
        let not_found = std::io::Error::from(ErrorKind::NotFound);
        assert!(spawn_error("ping", "a", &not_found).is_fatal_to_run());

        let denied = std::io::Error::from(ErrorKind::PermissionDenied);
        let err = spawn_error("ping", "a", &denied);
        assert!(err.is_fatal_to_run());
        assert!(err.to_string().contains("is not executable"));

        // EMFILE
        let exhausted = std::io::Error::from_raw_os_error(24);
        let err = spawn_error("ping", "db-7", &exhausted);
        assert!(!err.is_fatal_to_run());
        assert_eq!(err.category(), "IO");
        assert!(err.to_string().contains("db-7"));

        let would_block = std::io::Error::from(ErrorKind::WouldBlock);
        assert!(!spawn_error("ping", "a", &would_block).is_fatal_to_run());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_data() {
        // `false` ignores its arguments and exits 1
        let runner = PingRunner::new("false");
        let output = runner
            .probe("localhost", &ProbeConfig::new(1, None))
            .await
            .unwrap();
        assert_eq!(output.exit_status, Some(1));
        assert!(output.stdout.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stdout_is_captured() {
        // `echo` prints its arguments, which shows exactly what ping would receive
        let runner = PingRunner::new("echo");
        let output = runner
            .probe("example.net", &ProbeConfig::new(2, None))
            .await
            .unwrap();
        assert_eq!(output.exit_status, Some(0));
        assert_eq!(output.stdout.trim(), "-c 2 -q example.net");
    }
}
