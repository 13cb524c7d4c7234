use std::time::Duration;

const MINUTE_MS: u128 = 60_000;
const HOUR_MS: u128 = 60 * MINUTE_MS;
/// 100 hours in minutes; anything that rounds to this or more is "99h+".
const CAP_MINUTES: u128 = 100 * 60;

/// Compact duration with at most two units: "99h+", "1h1m", "2m5s", "45s".
///
/// Hours-long durations are rounded to the minute, shorter ones to the second.
pub fn format_duration(d: Duration) -> String {
    let ms = d.as_millis();

    if ms >= HOUR_MS {
        let minutes = round_div(ms, MINUTE_MS);
        if minutes >= CAP_MINUTES {
            return "99h+".to_string();
        }
        return format!("{}h{}m", minutes / 60, minutes % 60);
    }

    let secs = round_div(ms, 1000);
    match secs {
        s if s >= 3600 => format!("{}h{}m", s / 3600, s % 3600 / 60),
        s if s >= 60 => format!("{}m{}s", s / 60, s % 60),
        s => format!("{}s", s),
    }
}

fn round_div(n: u128, d: u128) -> u128 {
    (n + d / 2) / d
}
