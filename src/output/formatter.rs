//! Report styles
//!
//! Every formatter takes the ordered results and the reply threshold and
//! returns the complete report as one string, without a trailing newline.

use crate::{
    error::Result,
    models::{OrUnknown, ProbeResult},
    stats::Classifier,
};
use serde::Serialize;

/// A named way of rendering a run
pub trait ResultFormatter: Send + Sync {
    /// Render `results` (in input order) using `reply_threshold` for up/down
    fn format(&self, results: &[ProbeResult], reply_threshold: u32) -> Result<String>;

    /// Style name this formatter answers to
    fn name(&self) -> &'static str;
}

/// Configuration options for formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingOptions {
    /// Enable colored output
    pub enable_color: bool,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enable_color: crate::defaults::DEFAULT_ENABLE_COLOR,
        }
    }
}

/// `<host> S<tx>/R<rx>, maMD: <min>/<avg>/<max>/<mdev>`, one line per host
#[derive(Debug, Default, Clone, Copy)]
pub struct ListFormatter;

impl ListFormatter {
    pub fn format_line(result: &ProbeResult) -> String {
        let stats = &result.stats;
        format!(
            "{} S{}/R{}, maMD: {}",
            result.host,
            OrUnknown(&stats.transmitted),
            OrUnknown(&stats.received),
            result.latency.summary(),
        )
    }
}

impl ResultFormatter for ListFormatter {
    fn format(&self, results: &[ProbeResult], _reply_threshold: u32) -> Result<String> {
        Ok(results.iter().map(Self::format_line).collect::<Vec<_>>().join("\n"))
    }

    fn name(&self) -> &'static str {
        "list"
    }
}

/// One character per host (`.` up, `!` down) and the totals line
#[derive(Debug, Default, Clone, Copy)]
pub struct CCellFormatter;

impl ResultFormatter for CCellFormatter {
    fn format(&self, results: &[ProbeResult], reply_threshold: u32) -> Result<String> {
        let classifier = Classifier::new(reply_threshold);
        let cells: String = results
            .iter()
            .map(|r| if classifier.classify(r).is_up() { '.' } else { '!' })
            .collect();
        Ok(format!("{}\n{}", cells, classifier.tally(results)))
    }

    fn name(&self) -> &'static str {
        "ccell"
    }
}

/// Up hosts, down hosts, totals
#[derive(Debug, Default, Clone, Copy)]
pub struct UpdlFormatter;

impl UpdlFormatter {
    fn labeled(label: &str, hosts: &[&ProbeResult]) -> String {
        std::iter::once(label)
            .chain(hosts.iter().map(|r| r.host.as_str()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl ResultFormatter for UpdlFormatter {
    fn format(&self, results: &[ProbeResult], reply_threshold: u32) -> Result<String> {
        let classifier = Classifier::new(reply_threshold);
        let (up, down) = classifier.partition(results);
        Ok(format!(
            "{}\n{}\nTOTALS: {} up, {} down",
            Self::labeled("UP:", &up),
            Self::labeled("DOWN:", &down),
            up.len(),
            down.len()
        ))
    }

    fn name(&self) -> &'static str {
        "updl"
    }
}

#[derive(Serialize)]
struct JsonHost<'a> {
    host: &'a str,
    up: bool,
    stats: &'a crate::models::ProbeStats,
    latency: &'a crate::models::LatencyStats,
    exit_status: Option<i32>,
}

/// Pretty JSON array, one object per host
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormatter;

impl ResultFormatter for JsonFormatter {
    fn format(&self, results: &[ProbeResult], reply_threshold: u32) -> Result<String> {
        let classifier = Classifier::new(reply_threshold);
        let hosts: Vec<JsonHost<'_>> = results
            .iter()
            .map(|r| JsonHost {
                host: &r.host,
                up: classifier.classify(r).is_up(),
                stats: &r.stats,
                latency: &r.latency,
                exit_status: r.exit_status,
            })
            .collect();
        Ok(serde_json::to_string_pretty(&hosts)?)
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LatencyStats, ProbeStats};
    use std::time::Duration;

    fn host(name: &str, received: u32) -> ProbeResult {
        ProbeResult::new(
            name,
            ProbeStats::new(5, received, 0.0, 4004).unwrap(),
            LatencyStats::new(10.1, 12.3, 15.5, 1.2),
            Some(if received == 0 { 1 } else { 0 }),
            Duration::ZERO,
        )
    }

    #[test]
    fn test_list_line() {
        let line = ListFormatter::format_line(&host("alpha", 5));
        assert_eq!(line, "alpha S5/R5, maMD: 10.1/12.3/15.5/1.2");
    }

    #[test]
    fn test_list_keeps_trailing_zeros_from_ping() {
        let (stats, latency) =
            crate::probe::parse("5 packets transmitted, 5 received, 0% packet loss, time 4005ms\n\
                                 rtt min/avg/max/mdev = 10.812/11.000/12.000/0.500 ms\n");
        let result = ProbeResult::new("h", stats, latency, Some(0), Duration::ZERO);
        assert_eq!(
            ListFormatter::format_line(&result),
            "h S5/R5, maMD: 10.812/11.000/12.000/0.500"
        );

        let rounded = host("w", 5);
        let rounded = ProbeResult {
            latency: LatencyStats::new(15.0, 15.0, 15.0, 0.0).with_decimals(3),
            ..rounded
        };
        assert_eq!(ListFormatter::format_line(&rounded), "w S5/R5, maMD: 15.000/15.000/15.000/0.000");
    }

    #[test]
    fn test_list_unknown_fields() {
        let out = ListFormatter.format(&[ProbeResult::unknown("ghost", Some(2))], 5).unwrap();
        assert_eq!(out, "ghost S?/R?, maMD: ?/?/?/?");
    }

    #[test]
    fn test_list_keeps_order() {
        let out = ListFormatter.format(&[host("b", 5), host("a", 0)], 5).unwrap();
        let hosts: Vec<&str> = out.lines().map(|l| l.split(' ').next().unwrap()).collect();
        assert_eq!(hosts, vec!["b", "a"]);
    }

    #[test]
    fn test_ccell_third_host_down() {
        let results = vec![host("a", 5), host("b", 5), host("c", 0)];
        assert_eq!(CCellFormatter.format(&results, 5).unwrap(), "..!\n2 up, 1 down");
    }

    #[test]
    fn test_updl_without_down_hosts() {
        let results = vec![host("a", 5), host("b", 5)];
        assert_eq!(
            UpdlFormatter.format(&results, 5).unwrap(),
            "UP: a b\nDOWN:\nTOTALS: 2 up, 0 down"
        );
    }

    #[test]
    fn test_updl_threshold_applies() {
        let results = vec![host("a", 5), host("b", 3), host("c", 0)];
        assert_eq!(
            UpdlFormatter.format(&results, 3).unwrap(),
            "UP: a b\nDOWN: c\nTOTALS: 2 up, 1 down"
        );
    }

    #[test]
    fn test_json_output() {
        let results = vec![host("a", 5), ProbeResult::unknown("b", None)];
        let out = JsonFormatter.format(&results, 5).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["host"], "a");
        assert_eq!(parsed[0]["up"], true);
        assert_eq!(parsed[0]["stats"]["received"], 5);
        assert_eq!(parsed[1]["up"], false);
        assert!(parsed[1]["stats"]["received"].is_null());
        assert!(parsed[1]["exit_status"].is_null());
    }

    #[test]
    fn test_formatters_are_deterministic() {
        let results = vec![host("a", 5), host("b", 0)];
        let formatters: Vec<Box<dyn ResultFormatter>> = vec![
            Box::new(ListFormatter),
            Box::new(CCellFormatter),
            Box::new(UpdlFormatter),
            Box::new(JsonFormatter),
        ];
        for f in formatters {
            assert_eq!(f.format(&results, 5).unwrap(), f.format(&results, 5).unwrap(), "{}", f.name());
        }
    }
}
