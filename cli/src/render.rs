//! User-facing text
//!
//! Wording mirrors the browser popup this tool grew out of, including the
//! truncation widths and the coarse "time since" buckets.

use chrono::{DateTime, Utc};
use tab_roulette_core::protocol::{
    ClosedTabSummary, FailureReason, LastClosedTabSummary, ReopenedTabSummary,
};

/// Width used when a closed or reopened title is the main subject.
const TITLE_WIDTH: usize = 40;

/// Narrower width for the one-line undo status.
const STATUS_TITLE_WIDTH: usize = 30;

/// Shorten `text` to at most `max_chars` characters, ellipsis included.
///
/// Counts characters rather than bytes so multibyte titles never split
/// mid-character.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Coarse human-readable age: "just now", then seconds, minutes, hours.
pub fn time_since_text(closed_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(closed_at).num_seconds().max(0);

    if seconds < 10 {
        return "just now".to_string();
    }
    if seconds < 60 {
        return format!("{}s ago", seconds);
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }

    let hours = minutes / 60;
    format!("{}h ago", hours)
}

/// Lines announcing a successful close. The tab number is 1-based.
pub fn closed_tab_lines(tab: &ClosedTabSummary) -> Vec<String> {
    vec![
        "✅ Tab closed successfully!".to_string(),
        format!("Closed: \"{}\"", truncate_text(&tab.title, TITLE_WIDTH)),
        format!("Closed tab {} of {}", tab.index + 1, tab.total_tabs),
    ]
}

pub fn close_failure_line(reason: FailureReason) -> String {
    match reason {
        FailureReason::LastTab => "❌ Cannot close the last tab",
        FailureReason::Error => "❌ Error closing tab",
        _ => "❌ Unknown error occurred",
    }
    .to_string()
}

/// Lines announcing a successful reopen.
pub fn reopened_tab_lines(tab: &ReopenedTabSummary) -> Vec<String> {
    vec![
        "✅ Tab reopened successfully!".to_string(),
        format!("Reopened: \"{}\"", truncate_text(&tab.title, TITLE_WIDTH)),
    ]
}

pub fn reopen_failure_line(reason: FailureReason) -> String {
    match reason {
        FailureReason::NoTabToReopen => "❌ No tab to reopen",
        FailureReason::TabTooOld => "❌ Tab closed too long ago",
        FailureReason::Error => "❌ Error reopening tab",
        _ => "❌ Cannot reopen tab",
    }
    .to_string()
}

pub fn tab_count_line(count: usize) -> String {
    if count <= 1 {
        "Only one tab open - cannot close".to_string()
    } else {
        format!("{} tabs open", count)
    }
}

/// One-line summary of what an undo would restore.
pub fn undo_status_line(tab: &LastClosedTabSummary, now: DateTime<Utc>) -> String {
    format!(
        "\"{}\" closed {}",
        truncate_text(&tab.title, STATUS_TITLE_WIDTH),
        time_since_text(tab.closed_at, now)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
    }

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate_text("short", 40), "short");
        let exactly_forty = "a".repeat(40);
        assert_eq!(truncate_text(&exactly_forty, 40), exactly_forty);
    }

    #[test]
    fn test_truncate_ellipsis_fits_the_width() {
        let long = "a".repeat(80);
        let shortened = truncate_text(&long, 40);
        assert_eq!(shortened.chars().count(), 40);
        assert!(shortened.ends_with("..."));
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let cjk = "標".repeat(50);
        let shortened = truncate_text(&cjk, 40);
        assert_eq!(shortened.chars().count(), 40);
        assert!(shortened.starts_with('標'));
        assert!(shortened.ends_with("..."));
    }

    #[test]
    fn test_time_since_buckets() {
        let at = |seconds: i64| now() - Duration::seconds(seconds);

        assert_eq!(time_since_text(at(0), now()), "just now");
        assert_eq!(time_since_text(at(9), now()), "just now");
        assert_eq!(time_since_text(at(10), now()), "10s ago");
        assert_eq!(time_since_text(at(59), now()), "59s ago");
        assert_eq!(time_since_text(at(60), now()), "1m ago");
        assert_eq!(time_since_text(at(3_599), now()), "59m ago");
        assert_eq!(time_since_text(at(3_600), now()), "1h ago");
        assert_eq!(time_since_text(at(90_000), now()), "25h ago");
    }

    #[test]
    fn test_time_since_tolerates_clock_skew() {
        let future = now() + Duration::seconds(30);
        assert_eq!(time_since_text(future, now()), "just now");
    }

    #[test]
    fn test_closed_tab_lines_are_one_based() {
        let lines = closed_tab_lines(&ClosedTabSummary {
            title: "Docs".to_string(),
            url: "https://example.com/docs".to_string(),
            index: 0,
            total_tabs: 3,
        });
        assert_eq!(lines[0], "✅ Tab closed successfully!");
        assert_eq!(lines[1], "Closed: \"Docs\"");
        assert_eq!(lines[2], "Closed tab 1 of 3");
    }

    #[test]
    fn test_failure_lines() {
        assert_eq!(
            close_failure_line(FailureReason::LastTab),
            "❌ Cannot close the last tab"
        );
        assert_eq!(
            close_failure_line(FailureReason::Error),
            "❌ Error closing tab"
        );
        assert_eq!(
            reopen_failure_line(FailureReason::NoTabToReopen),
            "❌ No tab to reopen"
        );
        assert_eq!(
            reopen_failure_line(FailureReason::TabTooOld),
            "❌ Tab closed too long ago"
        );
    }

    #[test]
    fn test_tab_count_line() {
        assert_eq!(tab_count_line(0), "Only one tab open - cannot close");
        assert_eq!(tab_count_line(1), "Only one tab open - cannot close");
        assert_eq!(tab_count_line(5), "5 tabs open");
    }

    #[test]
    fn test_undo_status_line() {
        let line = undo_status_line(
            &LastClosedTabSummary {
                title: "A very long documentation page title that keeps going".to_string(),
                url: "https://example.com/docs".to_string(),
                closed_at: now() - Duration::seconds(120),
            },
            now(),
        );
        assert_eq!(line, "\"A very long documentation p...\" closed 2m ago");
    }
}
