//! End-to-end CLI tests
//!
//! These run the real binary against a small shell script that prints
//! ping-style summaries, so no network access or ICMP privileges are needed.

#![cfg(unix)]

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Hosts named `down*` lose every packet, `garbage*` print nothing parseable,
/// everything else answers every request.
const FAKE_PING: &str = r#"#!/bin/sh
count=1
while [ $# -gt 1 ]; do
  case "$1" in
    -c) count="$2"; shift 2 ;;
    -W) shift 2 ;;
    *) shift ;;
  esac
done
host="$1"
case "$host" in
  down*)
    echo "PING $host ($host) 56(84) bytes of data."
    echo ""
    echo "--- $host ping statistics ---"
    echo "$count packets transmitted, 0 received, 100% packet loss, time 10ms"
    exit 1 ;;
  garbage*)
    echo "ping: $host: Name or service not known"
    exit 2 ;;
  *)
    echo "PING $host ($host) 56(84) bytes of data."
    echo ""
    echo "--- $host ping statistics ---"
    echo "$count packets transmitted, $count received, 0% packet loss, time 10ms"
    echo "rtt min/avg/max/mdev = 1.5/2.5/3.5/0.5 ms"
    exit 0 ;;
esac
"#;

struct Fixture {
    dir: TempDir,
    ping: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let ping = dir.path().join("fake-ping");
        fs::write(&ping, FAKE_PING).unwrap();
        fs::set_permissions(&ping, fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir, ping }
    }

    fn write_env(&self, content: &str) {
        fs::write(self.dir.path().join(".env"), content).unwrap();
    }

    /// A command using the fake ping, run inside the fixture directory
    fn cmd(&self) -> Command {
        self.cmd_with_program(&self.ping)
    }

    fn cmd_with_program(&self, program: &Path) -> Command {
        let mut cmd = Command::cargo_bin("transonic").unwrap();
        cmd.current_dir(self.dir.path())
            .arg("--ping-program")
            .arg(program)
            .arg("--no-color");
        for var in [
            "TRANSONIC_COUNT",
            "TRANSONIC_CONCURRENCY",
            "TRANSONIC_MODE",
            "TRANSONIC_TIMEOUT",
            "TRANSONIC_PING_PROGRAM",
            "TRANSONIC_ENABLE_COLOR",
            "TRANSONIC_LOG_FORMAT",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }
}

#[test]
fn test_list_mode_is_default() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["-q", "alpha", "down1", "garbage1"])
        .assert()
        .success()
        .stdout(
            "alpha S5/R5, maMD: 1.5/2.5/3.5/0.5\n\
             down1 S5/R0, maMD: ?/?/?/?\n\
             garbage1 S?/R?, maMD: ?/?/?/?\n",
        );
}

#[test]
fn test_ccell_mode() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["-q", "-m", "ccell", "a", "b", "down-c"])
        .assert()
        .success()
        .stdout("..!\n2 up, 1 down\n");
}

#[test]
fn test_cell_mode_without_color() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["-q", "-m", "cell", "a", "down-b", "c"])
        .assert()
        .success()
        .stdout("a [down-b] c\n2 up, 1 down\n");
}

#[test]
fn test_updl_mode() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["-q", "-m", "updl", "a", "b"])
        .assert()
        .success()
        .stdout("UP: a b\nDOWN:\nTOTALS: 2 up, 0 down\n");
}

#[test]
fn test_json_mode() {
    let fx = Fixture::new();
    let output = fx
        .cmd()
        .args(["-q", "-m", "json", "-c", "3", "a", "down-b"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed[0]["host"], "a");
    assert_eq!(parsed[0]["up"], true);
    assert_eq!(parsed[0]["stats"]["transmitted"], 3);
    assert_eq!(parsed[0]["latency"]["avg_ms"], 2.5);
    assert_eq!(parsed[1]["up"], false);
    assert_eq!(parsed[1]["exit_status"], 1);
}

#[test]
fn test_order_follows_arguments_with_one_worker_or_many() {
    let fx = Fixture::new();
    let hosts: Vec<String> = (0..20)
        .map(|i| if i % 3 == 0 { format!("down{}", i) } else { format!("h{}", i) })
        .collect();
    let expected: String = hosts
        .iter()
        .map(|h| if h.starts_with("down") { '!' } else { '.' })
        .collect();

    for workers in ["1", "4", "100"] {
        fx.cmd()
            .args(["-q", "-m", "ccell", "-n", workers])
            .args(&hosts)
            .assert()
            .success()
            .stdout(predicate::str::starts_with(format!("{}\n", expected)));
    }
}

#[test]
fn test_informational_messages_on_stderr() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["-m", "ccell", "-c", "2", "a", "b"])
        .assert()
        .success()
        .stdout("..\n2 up, 0 down\n")
        .stderr(predicate::str::contains(
            "Pinging 2 machines with 2 workers, 2 probes each.",
        ))
        .stderr(predicate::str::contains("Time taken:"))
        .stderr(predicate::str::contains("per host)"));
}

#[test]
fn test_terse_suppresses_informational_messages() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["-q", "-m", "ccell", "a", "b"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_reply_threshold() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["-q", "-m", "ccell", "-r", "0", "a", "down-b"])
        .assert()
        .success()
        .stdout("..\n2 up, 0 down\n");
}

#[test]
fn test_threshold_above_count_is_adjusted_with_warning() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["-m", "ccell", "-c", "2", "-r", "5", "a"])
        .assert()
        .success()
        .stdout(".\n1 up, 0 down\n")
        .stderr(predicate::str::contains("larger than the probe count"));
}

#[test]
fn test_threshold_above_count_kept_without_adjustment() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["-q", "-m", "ccell", "-c", "2", "-r", "5", "--no-adjust-replies", "a"])
        .assert()
        .success()
        .stdout("!\n0 up, 1 down\n");
}

#[test]
fn test_unknown_mode_fails_before_probing() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["-m", "table", "a"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown output style 'table'"))
        .stderr(predicate::str::contains("Pinging").not());
}

#[test]
fn test_missing_probe_program_fails_the_run() {
    let fx = Fixture::new();
    fx.cmd_with_program(Path::new("/nonexistent/transonic-ping"))
        .args(["-q", "a", "b"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("was not found"));
}

#[test]
fn test_invalid_count_is_rejected() {
    let fx = Fixture::new();
    fx.cmd().args(["-c", "0", "a"]).assert().failure().code(1);
    fx.cmd().args(["-c", "101", "a"]).assert().failure().code(1);
}

#[test]
fn test_missing_targets_is_a_usage_error() {
    let fx = Fixture::new();
    fx.cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("TARGET"));
}

#[test]
fn test_env_file_supplies_defaults() {
    let fx = Fixture::new();
    fx.write_env("TRANSONIC_MODE=updl\nTRANSONIC_COUNT=3\n");
    fx.cmd()
        .args(["a"])
        .assert()
        .success()
        .stdout("UP: a\nDOWN:\nTOTALS: 1 up, 0 down\n")
        .stderr(predicate::str::contains("3 probes each"));
}

#[test]
fn test_invalid_env_value_is_rejected() {
    let fx = Fixture::new();
    fx.write_env("TRANSONIC_TIMEOUT=301\n");
    fx.cmd()
        .args(["-q", "a"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("TRANSONIC_TIMEOUT must be between 1 and 300"));

    fx.write_env("TRANSONIC_ENABLE_COLOR=maybe\n");
    fx.cmd()
        .args(["-q", "a"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid TRANSONIC_ENABLE_COLOR value 'maybe'"));
}

#[test]
fn test_cli_overrides_env_file() {
    let fx = Fixture::new();
    fx.write_env("TRANSONIC_MODE=updl\n");
    fx.cmd()
        .args(["-q", "-m", "ccell", "a"])
        .assert()
        .success()
        .stdout(".\n1 up, 0 down\n");
}

#[test]
fn test_debug_prints_config_summary_once() {
    let fx = Fixture::new();
    let output = fx.cmd().args(["--debug", "-m", "ccell", "a"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(output.stdout, b".\n1 up, 0 down\n");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Probe count: 5").count(), 1, "{}", stderr);
}

#[test]
fn test_help_topic() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["--help-topic", "modes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ccell"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("transonic")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
