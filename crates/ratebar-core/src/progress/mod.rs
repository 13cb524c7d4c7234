//! Single-line progress bar for byte-counted transfers.
//!
//! A `Bar` records progress samples (`set`) into a small throttled history and
//! renders one line fitted to the terminal width:
//!
//! ```text
//! <message> <pct>%▕█████     ▏<cur>/<max>, <rate>/s, <eta>
//! ```
//!
//! Rendering never mutates the bar. When producer and display run on
//! different threads, wrap the bar in a [`SharedBar`].

mod duration;
mod layout;
mod sampler;
mod shared;

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};
use crate::config::BarConfig;
use crate::terminal::{self, CurrentTerminal, TerminalSize};

pub use duration::format_duration;
pub use sampler::Sample;
pub use shared::SharedBar;

use sampler::History;

/// Number of samples kept for rate estimation.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;
/// Minimum spacing between retained samples.
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Tunables for a bar; defaults match the standard 10 x 1s window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarOptions {
    pub history_capacity: usize,
    pub sample_interval: Duration,
    /// Fixed column width for the message; `None` uses the message's own width.
    pub message_width: Option<usize>,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            message_width: None,
        }
    }
}

impl From<&BarConfig> for BarOptions {
    fn from(cfg: &BarConfig) -> Self {
        Self {
            history_capacity: cfg.history_capacity,
            sample_interval: Duration::from_millis(cfg.sample_interval_ms),
            message_width: cfg.message_width,
        }
    }
}

/// Progress state for one transfer.
pub struct Bar {
    message: String,
    message_width: Option<usize>,

    max_value: i64,
    initial_value: i64,
    current_value: i64,

    started: Instant,
    stopped: Option<Instant>,

    history: History,
    clock: Arc<dyn Clock>,
}

impl Bar {
    /// New bar for `max_value` units, resuming from `initial_value`.
    pub fn new(message: impl Into<String>, max_value: i64, initial_value: i64) -> Self {
        Self::with_clock(message, max_value, initial_value, Arc::new(SystemClock))
    }

    pub fn with_clock(
        message: impl Into<String>,
        max_value: i64,
        initial_value: i64,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::with_options(
            message,
            max_value,
            initial_value,
            clock,
            BarOptions::default(),
        )
    }

    pub fn with_options(
        message: impl Into<String>,
        max_value: i64,
        initial_value: i64,
        clock: Arc<dyn Clock>,
        options: BarOptions,
    ) -> Self {
        let max_value = max_value.max(0);
        let started = clock.now();
        Self {
            message: message.into(),
            message_width: options.message_width,
            max_value,
            initial_value,
            current_value: initial_value.min(max_value),
            started,
            stopped: None,
            history: History::new(options.history_capacity, options.sample_interval),
            clock,
        }
    }

    /// Fix the message column width (truncating or padding the message).
    pub fn set_message_width(&mut self, width: Option<usize>) {
        self.message_width = width;
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn current(&self) -> i64 {
        self.current_value
    }

    pub fn max(&self) -> i64 {
        self.max_value
    }

    pub fn initial(&self) -> i64 {
        self.initial_value
    }

    pub fn started_at(&self) -> Instant {
        self.started
    }

    /// When the bar first reached its maximum, if it has.
    pub fn stopped_at(&self) -> Option<Instant> {
        self.stopped
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.is_some()
    }

    /// Retained samples, oldest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &Sample> + '_ {
        self.history.iter()
    }

    /// Percent complete in [0, 100]; 0 when the maximum is 0.
    pub fn percent(&self) -> f64 {
        if self.max_value > 0 {
            (self.current_value as f64 / self.max_value as f64 * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    /// Estimated time left at the current rate; zero when no rate is known.
    pub fn eta(&self) -> Duration {
        let rate = self.rate();
        if rate > 0.0 {
            let secs = (self.max_value as f64 - self.current_value as f64) / rate;
            Duration::from_secs(secs.max(0.0) as u64)
        } else {
            Duration::ZERO
        }
    }

    /// Render the line for a terminal `width` columns wide.
    pub fn render(&self, width: usize) -> String {
        layout::compose(self, width)
    }

    /// Render using the width reported by `term` (80 if unavailable).
    pub fn render_for(&self, term: &dyn TerminalSize) -> String {
        self.render(terminal::width_or_fallback(term))
    }
}

impl fmt::Display for Bar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_for(&CurrentTerminal))
    }
}

impl fmt::Debug for Bar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bar")
            .field("message", &self.message)
            .field("message_width", &self.message_width)
            .field("max_value", &self.max_value)
            .field("initial_value", &self.initial_value)
            .field("current_value", &self.current_value)
            .field("started", &self.started)
            .field("stopped", &self.stopped)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}
