//! Text layout for a bar line, built in four stages:
//! prefix (message + percent), bar fill, suffix (counts, rate, ETA).
//!
//! Widths are counted in chars. The suffix always has the same width
//! (31 columns with 6-column values) so the bar does not jitter.

use super::{format_duration, Bar};
use crate::humanize::human_bytes;

const LEFT_EDGE: char = '▕';
const RIGHT_EDGE: char = '▏';
const FILLED: char = '█';

/// Columns reserved around the fill: two edges and one trailing space.
const RESERVED: i64 = 3;

/// Right-hand block contents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Suffix {
    Running {
        current: i64,
        max: i64,
        rate: f64,
        eta: std::time::Duration,
    },
    Stopped {
        max: i64,
    },
}

pub(super) fn compose(bar: &Bar, width: usize) -> String {
    let percent = bar.percent();

    let mut pre = prefix(&bar.message, bar.message_width);
    pre.push_str(&percent_field(percent));

    let suf = suffix(if bar.is_stopped() {
        Suffix::Stopped { max: bar.max_value }
    } else {
        Suffix::Running {
            current: bar.current_value,
            max: bar.max_value,
            rate: bar.rate(),
            eta: bar.eta(),
        }
    });

    let mid = bar_fill(width, pre.chars().count(), suf.chars().count(), percent);

    let mut line = String::with_capacity(pre.len() + mid.len() + suf.len());
    line.push_str(&pre);
    line.push_str(&mid);
    line.push_str(&suf);
    line
}

/// Trimmed message padded or truncated to `width` columns plus a separator
/// space. Empty when there is no message.
pub(super) fn prefix(message: &str, width: Option<usize>) -> String {
    if message.is_empty() {
        return String::new();
    }
    let message = message.trim();
    let width = width.unwrap_or_else(|| message.chars().count());
    let mut out: String = message.chars().take(width).collect();
    let used = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(used)));
    out.push(' ');
    out
}

/// Percent as a 3-column integer followed by `%`.
pub(super) fn percent_field(percent: f64) -> String {
    format!("{:3.0}%", percent)
}

/// Counts, rate and ETA; blanked to the same width once stopped.
pub(super) fn suffix(state: Suffix) -> String {
    match state {
        Suffix::Running {
            current,
            max,
            rate,
            eta,
        } => format!(
            "{:>6}/{:>6}, {:>6}/s, {:>6}",
            human_bytes(current),
            human_bytes(max),
            human_bytes(rate as i64),
            format_duration(eta),
        ),
        // max, hidden "/current", hidden ", rate/s", hidden ", eta"
        Suffix::Stopped { max } => format!("{:>6}{:7}{:10}{:8}", human_bytes(max), "", "", ""),
    }
}

/// Edges with `percent` of the free columns filled. Too narrow a terminal
/// leaves just the edges.
pub(super) fn bar_fill(width: usize, pre_len: usize, suf_len: usize, percent: f64) -> String {
    let free = width as i64 - pre_len as i64 - suf_len as i64 - RESERVED;
    let filled = (free as f64 * percent / 100.0) as i64;

    let filled = filled.clamp(0, free.max(0)) as usize;
    let blank = (free.max(0) as usize).saturating_sub(filled);

    let mut out = String::with_capacity(2 + (filled + blank) * 3);
    out.push(LEFT_EDGE);
    out.extend(std::iter::repeat(FILLED).take(filled));
    out.extend(std::iter::repeat(' ').take(blank));
    out.push(RIGHT_EDGE);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn prefix_omitted_without_message() {
        assert_eq!(prefix("", None), "");
        assert_eq!(prefix("", Some(10)), "");
    }

    #[test]
    fn prefix_trims_and_uses_natural_width() {
        assert_eq!(prefix("  pulling  ", None), "pulling ");
    }

    #[test]
    fn prefix_pads_to_fixed_width() {
        assert_eq!(prefix("abc", Some(6)), "abc    ");
    }

    #[test]
    fn prefix_truncates_to_fixed_width() {
        assert_eq!(prefix("downloading", Some(4)), "down ");
        assert_eq!(prefix("ärger", Some(2)), "är ");
    }

    #[test]
    fn percent_is_three_columns() {
        assert_eq!(percent_field(0.0), "  0%");
        assert_eq!(percent_field(42.2), " 42%");
        assert_eq!(percent_field(100.0), "100%");
    }

    #[test]
    fn running_and_stopped_suffix_have_equal_width() {
        let running = suffix(Suffix::Running {
            current: 512,
            max: 1000,
            rate: 64.0,
            eta: Duration::from_secs(8),
        });
        let stopped = suffix(Suffix::Stopped { max: 1000 });
        assert_eq!(running, " 512 B/  1 KB,   64 B/s,     8s");
        assert_eq!(stopped, format!("  1 KB{}", " ".repeat(25)));
        assert_eq!(running.len(), 31);
        assert_eq!(stopped.len(), 31);
    }

    #[test]
    fn fill_splits_free_columns() {
        // 20 - 0 - 7 - 3 = 10 free columns
        let mid = bar_fill(20, 0, 7, 50.0);
        assert_eq!(mid, "▕█████     ▏");
    }

    #[test]
    fn fill_rounds_down() {
        let mid = bar_fill(13, 0, 0, 99.0);
        assert_eq!(mid, "▕█████████ ▏");
    }

    #[test]
    fn negative_free_space_keeps_edges_only() {
        assert_eq!(bar_fill(10, 20, 31, 50.0), "▕▏");
        assert_eq!(bar_fill(0, 0, 0, 100.0), "▕▏");
    }
}
