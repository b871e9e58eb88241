//! Reusable numeric helpers for the dashboard aggregates.

use chrono::Duration;

/// Round to 2 decimals — used for the per-responsável average card.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Mean of a set of durations, truncated to whole seconds.
/// Returns None for an empty set (no closed tickets in the window).
pub fn mean_duration(durations: &[Duration]) -> Option<Duration> {
    if durations.is_empty() {
        return None;
    }
    let total: i64 = durations.iter().map(|d| d.num_seconds()).sum();
    Some(Duration::seconds(total / durations.len() as i64))
}

/// Format a duration as the dashboard card expects: "D dias HH:MM:SS",
/// dropping the day part when under 24h. None renders as "00:00:00".
pub fn format_duration(d: Option<Duration>) -> String {
    let Some(d) = d else {
        return "00:00:00".to_string();
    };
    let secs = d.num_seconds().max(0);
    let days = secs / 86_400;
    let rem = secs % 86_400;
    let (h, m, s) = (rem / 3600, (rem % 3600) / 60, rem % 60);
    if days > 0 {
        format!("{days} dias {h:02}:{m:02}:{s:02}")
    } else {
        format!("{h:02}:{m:02}:{s:02}")
    }
}
