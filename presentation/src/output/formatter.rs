//! Pure text formatting helpers.

use arnica_domain::Sender;
use chrono::{DateTime, Local};

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 86_400_000;

/// Label shown in front of a message.
pub fn sender_label(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "You",
        Sender::Assistant => "Arnica",
    }
}

/// Render a unix-millisecond timestamp relative to `now_ms`.
///
/// Recent times collapse to coarse buckets ("5m ago"); anything older than
/// a week falls back to a short date.
pub fn relative_time(then_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(then_ms);
    if diff < MINUTE_MS {
        return "just now".to_string();
    }
    if diff < HOUR_MS {
        return format!("{}m ago", diff / MINUTE_MS);
    }
    if diff < DAY_MS {
        return format!("{}h ago", diff / HOUR_MS);
    }
    if diff < 7 * DAY_MS {
        return format!("{}d ago", diff / DAY_MS);
    }
    match DateTime::from_timestamp_millis(then_ms) {
        Some(when) => when.with_timezone(&Local).format("%b %-d").to_string(),
        None => "long ago".to_string(),
    }
}

/// Wall-clock rendering of a message timestamp ("14:05").
pub fn clock_time(timestamp_ms: i64) -> String {
    match DateTime::from_timestamp_millis(timestamp_ms) {
        Some(when) => when.with_timezone(&Local).format("%H:%M").to_string(),
        None => String::new(),
    }
}

/// One display line per source reference: `[1] label`.
pub fn source_lines(sources: &[String]) -> Vec<String> {
    sources
        .iter()
        .enumerate()
        .map(|(index, source)| format!("[{}] {}", index + 1, source))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_timestamps_are_just_now() {
        assert_eq!(relative_time(1_000, 30_000), "just now");
    }

    #[test]
    fn buckets_scale_with_age() {
        let now = 10 * DAY_MS;
        assert_eq!(relative_time(now - 5 * MINUTE_MS, now), "5m ago");
        assert_eq!(relative_time(now - 3 * HOUR_MS, now), "3h ago");
        assert_eq!(relative_time(now - 2 * DAY_MS, now), "2d ago");
    }

    #[test]
    fn future_timestamps_do_not_underflow() {
        assert_eq!(relative_time(5_000, 1_000), "just now");
    }

    #[test]
    fn source_lines_are_one_indexed() {
        let lines = source_lines(&["alpha".into(), "beta".into()]);
        assert_eq!(lines, vec!["[1] alpha".to_string(), "[2] beta".to_string()]);
    }

    #[test]
    fn sender_labels() {
        assert_eq!(sender_label(Sender::User), "You");
        assert_eq!(sender_label(Sender::Assistant), "Arnica");
    }
}
