//! Parser for the textual report printed by `ping -q`
//!
//! Two lines matter:
//!
//! ```text
//! 5 packets transmitted, 5 received, 0% packet loss, time 4006ms
//! rtt min/avg/max/mdev = 10.1/12.3/15.0/1.2 ms
//! ```
//!
//! When replies carry ICMP errors the summary grows an extra clause:
//!
//! ```text
//! 5 packets transmitted, 0 received, +5 errors, 100% packet loss, time 4004ms
//! ```
//!
//! Fields are located by the label token that accompanies them rather than
//! by column, so both layouts (and the BSD/busybox wording) parse the same
//! way. Parsing never fails: anything missing is reported as unknown.

use crate::models::{LatencyStats, ProbeStats};

/// Layout of the packet summary line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryFormat {
    /// `T packets transmitted, R received, L% packet loss, time Nms`
    Plain,
    /// Same with `+E errors,` between received and loss
    WithErrors,
}

/// Everything read from one packet summary line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacketSummary {
    pub format: SummaryFormat,
    pub transmitted: Option<u32>,
    pub received: Option<u32>,
    pub errors: Option<u32>,
    pub loss_percent: Option<f64>,
    pub total_time_ms: Option<u64>,
}

impl PacketSummary {
    /// Convert to stats, discarding the line entirely if it claims more
    /// replies than requests.
    pub fn into_stats(self) -> ProbeStats {
        let stats = ProbeStats {
            transmitted: self.transmitted,
            received: self.received,
            loss_percent: self.loss_percent,
            total_time_ms: self.total_time_ms,
        };
        if stats.is_consistent() {
            stats
        } else {
            ProbeStats::unknown()
        }
    }
}

const RTT_PREFIXES: [&str; 2] = ["rtt ", "round-trip "];

/// Parse a complete probe report. Total: malformed input yields unknown fields.
pub fn parse(raw: &str) -> (ProbeStats, LatencyStats) {
    let mut stats = ProbeStats::unknown();
    let mut latency = LatencyStats::unknown();

    for line in raw.lines() {
        if let Some(summary) = parse_packet_summary(line) {
            stats = summary.into_stats();
            continue;
        }
        if let Some(rtt) = parse_rtt_line(line) {
            latency = rtt;
        }
    }

    (stats, latency)
}

/// Recognize and parse a packet summary line.
///
/// Returns `None` when the line does not contain the `packets transmitted`
/// token pair. Individual fields that are absent or malformed come back as
/// `None` inside the summary.
pub fn parse_packet_summary(line: &str) -> Option<PacketSummary> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let anchor = tokens
        .windows(2)
        .position(|pair| pair[0] == "packets" && pair[1].trim_end_matches(',') == "transmitted")?;

    let format = if tokens.contains(&"errors,") || tokens.contains(&"errors") {
        SummaryFormat::WithErrors
    } else {
        SummaryFormat::Plain
    };

    let transmitted = anchor
        .checked_sub(1)
        .and_then(|i| tokens.get(i))
        .and_then(|t| parse_count(t));

    let received = value_before(&tokens, |t| t == "received," || t == "received")
        .and_then(|i| {
            // busybox and BSD say "R packets received,"
            if tokens[i] == "packets" {
                i.checked_sub(1)
            } else {
                Some(i)
            }
        })
        .and_then(|i| parse_count(tokens[i]));

    let errors = match format {
        SummaryFormat::WithErrors => value_before(&tokens, |t| t == "errors," || t == "errors")
            .and_then(|i| parse_count(tokens[i].trim_start_matches('+'))),
        SummaryFormat::Plain => None,
    };

    let loss_percent = tokens
        .windows(2)
        .position(|pair| pair[0] == "packet" && pair[1].starts_with("loss"))
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| strip_unit(tokens[i], "%").parse::<f64>().ok());

    let total_time_ms = tokens
        .iter()
        .position(|t| *t == "time")
        .and_then(|i| tokens.get(i + 1))
        .and_then(|t| parse_millis(t));

    Some(PacketSummary {
        format,
        transmitted,
        received,
        errors,
        loss_percent,
        total_time_ms,
    })
}

/// Recognize and parse an rtt summary line such as
/// `rtt min/avg/max/mdev = 0.042/0.050/0.061/0.007 ms`.
///
/// Values are matched to their labels, so the BSD `stddev` spelling and the
/// busybox three-value form are accepted too.
pub fn parse_rtt_line(line: &str) -> Option<LatencyStats> {
    let line = line.trim();
    if !RTT_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) {
        return None;
    }

    let mut tokens = line.split_whitespace();
    tokens.next()?;
    let labels = tokens.next()?;
    if tokens.next()? != "=" {
        return None;
    }
    let values = tokens.next()?;

    let labels: Vec<&str> = labels.split('/').collect();
    let values: Vec<&str> = values.split('/').collect();
    if labels.len() != values.len() || !labels.contains(&"min") {
        return None;
    }

    let mut latency = LatencyStats::unknown();
    for (label, token) in labels.iter().zip(values) {
        let token = strip_unit(token, "ms");
        let value = token.parse::<f64>().ok();
        if value.is_some() {
            let places = token.split_once('.').map_or(0, |(_, fraction)| fraction.len());
            latency.decimals = Some(latency.decimals.map_or(places, |d| d.max(places)));
        }
        match *label {
            "min" => latency.min_ms = value,
            "avg" => latency.avg_ms = value,
            "max" => latency.max_ms = value,
            "mdev" | "stddev" => latency.mdev_ms = value,
            _ => {}
        }
    }

    Some(latency)
}

/// Index of the token immediately preceding the first token matching `label`
fn value_before(tokens: &[&str], label: impl Fn(&str) -> bool) -> Option<usize> {
    tokens.iter().position(|t| label(*t))?.checked_sub(1)
}

fn strip_unit<'a>(token: &'a str, unit: &str) -> &'a str {
    token.trim_end_matches(',').trim_end_matches(unit)
}

fn parse_count(token: &str) -> Option<u32> {
    token.trim_end_matches(',').parse().ok()
}

fn parse_millis(token: &str) -> Option<u64> {
    let value = strip_unit(token, "ms");
    value
        .parse::<u64>()
        .ok()
        .or_else(|| value.parse::<f64>().ok().filter(|v| *v >= 0.0).map(|v| v.round() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINUX_OK: &str = "\
PING example.net (192.0.2.10) 56(84) bytes of data.

--- example.net ping statistics ---
5 packets transmitted, 5 received, 0% packet loss, time 40ms
rtt min/avg/max/mdev = 10.1/12.3/15.0/1.2 ms
";

    const LINUX_ERRORS: &str = "\
PING 192.0.2.99 (192.0.2.99) 56(84) bytes of data.

--- 192.0.2.99 ping statistics ---
5 packets transmitted, 0 received, +5 errors, 100% packet loss, time 4004ms
";

    const BSD_OK: &str = "\
PING localhost (127.0.0.1): 56 data bytes

--- localhost ping statistics ---
3 packets transmitted, 3 packets received, 0.0% packet loss
round-trip min/avg/max/stddev = 0.045/0.061/0.079/0.013 ms
";

    #[test]
    fn test_canonical_report() {
        let (stats, latency) = parse(LINUX_OK);
        assert_eq!(stats, ProbeStats::new(5, 5, 0.0, 40).unwrap());
        assert_eq!(latency, LatencyStats::new(10.1, 12.3, 15.0, 1.2).with_decimals(1));
    }

    #[test]
    fn test_errors_format_detected() {
        let line = "5 packets transmitted, 0 received, +5 errors, 100% packet loss, time 4004ms";
        let summary = parse_packet_summary(line).unwrap();
        assert_eq!(summary.format, SummaryFormat::WithErrors);
        assert_eq!(summary.errors, Some(5));
        assert_eq!(summary.transmitted, Some(5));
        assert_eq!(summary.received, Some(0));
        assert_eq!(summary.loss_percent, Some(100.0));
        assert_eq!(summary.total_time_ms, Some(4004));

        let (stats, latency) = parse(LINUX_ERRORS);
        assert_eq!(stats.received, Some(0));
        assert!(latency.is_unknown());
    }

    #[test]
    fn test_errors_format_matches_plain_format_semantics() {
        let plain = parse_packet_summary("5 packets transmitted, 3 received, 40% packet loss, time 4005ms").unwrap();
        let with_errors =
            parse_packet_summary("5 packets transmitted, 3 received, +2 errors, 40% packet loss, time 4005ms").unwrap();

        assert_eq!(plain.format, SummaryFormat::Plain);
        assert_eq!(with_errors.format, SummaryFormat::WithErrors);
        assert_eq!(plain.into_stats(), with_errors.into_stats());
    }

    #[test]
    fn test_bsd_wording() {
        let (stats, latency) = parse(BSD_OK);
        assert_eq!(stats.transmitted, Some(3));
        assert_eq!(stats.received, Some(3));
        assert_eq!(stats.loss_percent, Some(0.0));
        assert_eq!(stats.total_time_ms, None);
        assert_eq!(latency, LatencyStats::new(0.045, 0.061, 0.079, 0.013).with_decimals(3));
    }

    #[test]
    fn test_busybox_three_value_rtt() {
        let latency = parse_rtt_line("round-trip min/avg/max = 0.101/0.152/0.210 ms").unwrap();
        assert_eq!(latency.min_ms, Some(0.101));
        assert_eq!(latency.max_ms, Some(0.210));
        assert_eq!(latency.mdev_ms, None);
    }

    #[test]
    fn test_rtt_keeps_printed_decimals() {
        let latency = parse_rtt_line("rtt min/avg/max/mdev = 10.812/11.000/12.000/0.500 ms").unwrap();
        assert_eq!(latency.avg_ms, Some(11.0));
        assert_eq!(latency.decimals, Some(3));
        assert_eq!(latency.summary(), "10.812/11.000/12.000/0.500");

        let whole = parse_rtt_line("round-trip min/avg/max = 1/2/3 ms").unwrap();
        assert_eq!(whole.decimals, Some(0));
        assert_eq!(whole.summary(), "1/2/3/?");
    }

    #[test]
    fn test_duplicates_clause_tolerated() {
        let line = "4 packets transmitted, 4 received, +2 duplicates, 0% packet loss, time 3004ms";
        let summary = parse_packet_summary(line).unwrap();
        assert_eq!(summary.format, SummaryFormat::Plain);
        assert_eq!(summary.received, Some(4));
        assert_eq!(summary.loss_percent, Some(0.0));
        assert_eq!(summary.total_time_ms, Some(3004));
    }

    #[test]
    fn test_fractional_loss() {
        let summary = parse_packet_summary("3 packets transmitted, 2 received, 33.3333% packet loss, time 2003ms").unwrap();
        assert_eq!(summary.loss_percent, Some(33.3333));
    }

    #[test]
    fn test_missing_summary_is_unknown() {
        let (stats, latency) = parse("ping: unknown host nowhere.invalid\n");
        assert!(stats.is_unknown());
        assert!(latency.is_unknown());
    }

    #[test]
    fn test_empty_input() {
        let (stats, latency) = parse("");
        assert!(stats.is_unknown());
        assert!(latency.is_unknown());
    }

    #[test]
    fn test_garbled_fields_become_unknown() {
        let summary = parse_packet_summary("x packets transmitted, y received, z% packet loss, time wms").unwrap();
        assert_eq!(summary.transmitted, None);
        assert_eq!(summary.received, None);
        assert_eq!(summary.loss_percent, None);
        assert_eq!(summary.total_time_ms, None);
    }

    #[test]
    fn test_more_received_than_transmitted_is_rejected() {
        let (stats, _) = parse("2 packets transmitted, 9 received, 0% packet loss, time 1ms\n");
        assert!(stats.is_unknown());
    }

    #[test]
    fn test_substring_is_not_a_match() {
        assert!(parse_packet_summary("5 xpackets transmitted, 5 received").is_none());
        assert!(parse_rtt_line("artt min/avg/max/mdev = 1/2/3/4 ms").is_none());
    }

    #[test]
    fn test_rtt_line_shape_mismatch() {
        assert!(parse_rtt_line("rtt min/avg/max/mdev = 1.0/2.0/3.0 ms").is_none());
        assert!(parse_rtt_line("rtt min/avg/max/mdev 1.0/2.0/3.0/4.0 ms").is_none());
        let partial = parse_rtt_line("rtt min/avg/max/mdev = 1.0/abc/3.0/0.5 ms").unwrap();
        assert_eq!(partial.avg_ms, None);
        assert_eq!(partial.max_ms, Some(3.0));
    }

    #[test]
    fn test_last_summary_wins() {
        let raw = "1 packets transmitted, 0 received, 100% packet loss, time 0ms\n\
                   2 packets transmitted, 2 received, 0% packet loss, time 1001ms\n";
        let (stats, _) = parse(raw);
        assert_eq!(stats.transmitted, Some(2));
        assert_eq!(stats.received, Some(2));
    }
}
