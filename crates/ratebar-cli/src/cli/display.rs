//! Display refresh loop: redraws the bar on stderr at a fixed tick,
//! independent of how often the producer reports progress.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ratebar_core::config::RatebarConfig;
use ratebar_core::progress::SharedBar;
use ratebar_core::terminal::{CurrentTerminal, TerminalSize};
use tokio::task::JoinHandle;

/// Running display task. Call `finish` once the producer is done.
pub struct DisplayHandle {
    stop: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl DisplayHandle {
    /// Draw a final frame and end the line.
    pub async fn finish(self) {
        self.stop.store(true, Ordering::Relaxed);
        if self.task.await.is_err() {
            tracing::warn!("display task panicked");
        }
    }
}

/// Spawn the stderr display loop for `bar`.
pub fn spawn(bar: SharedBar, cfg: &RatebarConfig) -> DisplayHandle {
    let stop = Arc::new(AtomicBool::new(false));
    let interval = Duration::from_millis(cfg.refresh_interval_ms.max(1));
    let fallback_width = cfg.fallback_width;
    let task = tokio::spawn({
        let stop = Arc::clone(&stop);
        async move {
            render_loop(
                bar,
                interval,
                &CurrentTerminal,
                fallback_width,
                &stop,
                io::stderr(),
            )
            .await;
        }
    });
    DisplayHandle { stop, task }
}

/// Redraw every `interval` until the bar completes or `stop` is set, then
/// finish the line. Returns the writer.
pub(crate) async fn render_loop<W: Write>(
    bar: SharedBar,
    interval: Duration,
    term: &(dyn TerminalSize + Sync),
    fallback_width: usize,
    stop: &AtomicBool,
    mut out: W,
) -> W {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        let finishing = stop.load(Ordering::Relaxed);
        let line = bar.render_for(term, fallback_width);
        if let Err(e) = write!(out, "\r{}", line).and_then(|_| out.flush()) {
            tracing::debug!(error = %e, "progress redraw failed");
        }
        if finishing || bar.is_stopped() {
            break;
        }
    }
    if writeln!(out).is_err() {
        tracing::debug!("could not terminate progress line");
    }
    out
}
