//! Progress updates and rate estimation.
//!
//! Samples are appended at most once per `sample_interval` and the oldest is
//! dropped past `capacity`, so the rate is the slope across roughly the last
//! ten seconds no matter how often `set` is called.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::Bar;

/// One retained progress observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub at: Instant,
    pub value: i64,
}

#[derive(Debug, Clone)]
pub(super) struct History {
    samples: VecDeque<Sample>,
    capacity: usize,
    spacing: Duration,
}

impl History {
    pub(super) fn new(capacity: usize, spacing: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
            spacing,
        }
    }

    /// Append unless the last sample is within `spacing`. Returns whether it was kept.
    fn record(&mut self, at: Instant, value: i64) -> bool {
        if let Some(last) = self.samples.back() {
            if at.saturating_duration_since(last.at) <= self.spacing {
                return false;
            }
        }
        self.samples.push_back(Sample { at, value });
        if self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
        true
    }

    pub(super) fn iter(&self) -> std::collections::vec_deque::Iter<'_, Sample> {
        self.samples.iter()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

impl Bar {
    /// Record the latest progress value (clamped to the maximum).
    pub fn set(&mut self, value: i64) {
        let value = value.min(self.max_value);
        self.current_value = value;

        let now = self.clock.now();
        if value == self.max_value && self.stopped.is_none() {
            self.stopped = Some(now);
            tracing::debug!(
                label = %self.message,
                max = self.max_value,
                elapsed_ms = now.saturating_duration_since(self.started).as_millis() as u64,
                "progress complete"
            );
        }

        if self.history.record(now, value) {
            tracing::trace!(value, samples = self.history.len(), "progress sample");
        }
    }

    /// Estimated units per second.
    ///
    /// Once stopped: average over the whole run (elapsed rounded to whole
    /// seconds, at least one). Otherwise: slope between the oldest and newest
    /// retained samples, or from the start for a single sample.
    pub fn rate(&self) -> f64 {
        if let Some(stopped) = self.stopped {
            let elapsed = round_secs(stopped.saturating_duration_since(self.started)).max(1);
            return (self.current_value as f64 - self.initial_value as f64) / elapsed as f64;
        }

        let (Some(first), Some(last)) = (self.history.samples.front(), self.history.samples.back())
        else {
            return 0.0;
        };

        if self.history.len() == 1 {
            per_second(
                first.value as f64 - self.initial_value as f64,
                first.at.saturating_duration_since(self.started),
            )
        } else {
            per_second(
                last.value as f64 - first.value as f64,
                last.at.saturating_duration_since(first.at),
            )
        }
    }
}

fn per_second(delta: f64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return 0.0;
    }
    delta / secs
}

fn round_secs(d: Duration) -> u64 {
    (d.as_millis() as u64).saturating_add(500) / 1000
}
