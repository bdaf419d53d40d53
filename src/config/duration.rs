//! Duration parsing utilities.

use anyhow::Context;
use std::time::Duration;

/// Parse a duration string like "250ms", "2s", "1m", "1h", "0.5" or "1".
/// Supports:
/// - Plain numbers (interpreted as seconds, fractions allowed): "0.5"
/// - Milliseconds suffix: "250ms"
/// - Seconds suffix: "2s", "1.5s"
/// - Minutes suffix: "1m"
/// - Hours suffix: "1h"
pub fn parse_duration(s: &str) -> anyhow::Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("Empty duration string");
    }

    // Check "ms" before the single-letter suffixes it ends with.
    if let Some(num_str) = s.strip_suffix("ms") {
        return scaled(num_str, 1, "milliseconds");
    }
    if let Some(num_str) = s.strip_suffix('h') {
        return scaled(num_str, 3_600_000, "hours");
    }
    if let Some(num_str) = s.strip_suffix('m') {
        return scaled(num_str, 60_000, "minutes");
    }
    if let Some(num_str) = s.strip_suffix('s') {
        return scaled(num_str, 1000, "seconds");
    }

    // No suffix - treat as seconds
    scaled(s, 1000, "duration")
}

fn scaled(num_str: &str, unit_millis: u64, unit: &str) -> anyhow::Result<Duration> {
    let num_str = num_str.trim();
    // Whole numbers stay exact; fractions go through f64.
    if let Ok(whole) = num_str.parse::<u64>() {
        let millis = whole
            .checked_mul(unit_millis)
            .with_context(|| format!("Duration too large: {num_str} {unit}"))?;
        return Ok(Duration::from_millis(millis));
    }
    let value: f64 = num_str
        .parse()
        .with_context(|| format!("Invalid {unit} value: {num_str}"))?;
    Duration::try_from_secs_f64(value * unit_millis as f64 / 1000.0)
        .with_context(|| format!("Invalid {unit} value: {num_str}"))
}

/// Render a duration the way [`parse_duration`] reads it back.
pub fn format_duration(d: Duration) -> String {
    if d.subsec_nanos() == 0 {
        format!("{}s", d.as_secs())
    } else if d.subsec_nanos() % 1_000_000 == 0 {
        format!("{}ms", d.as_millis())
    } else {
        format!("{}", d.as_secs_f64())
    }
}
