//! Compact byte counts for fixed-width columns ("0 B", "1.5 KB", "999 MB").
//!
//! Decimal units (1 KB = 1000 B). For non-negative input below 1000 TB the
//! result is at most 6 characters, which is what the bar's columns assume.

const KB: i64 = 1000;
const MB: i64 = KB * 1000;
const GB: i64 = MB * 1000;
const TB: i64 = GB * 1000;

/// Format a byte count with the largest unit it reaches.
pub fn human_bytes(b: i64) -> String {
    let (value, unit) = match b {
        b if b >= TB => (b as f64 / TB as f64, "TB"),
        b if b >= GB => (b as f64 / GB as f64, "GB"),
        b if b >= MB => (b as f64 / MB as f64, "MB"),
        b if b >= KB => (b as f64 / KB as f64, "KB"),
        _ => return format!("{} B", b),
    };

    if value >= 10.0 || value.fract() == 0.0 {
        format!("{} {}", value.trunc() as i64, unit)
    } else {
        // One decimal, truncated so "9.99" never renders as "10.0".
        let tenths = (value * 10.0).trunc() / 10.0;
        if tenths.fract() == 0.0 {
            format!("{} {}", tenths as i64, unit)
        } else {
            format!("{:.1} {}", tenths, unit)
        }
    }
}
