//! `ratebar simulate` – synthetic transfer at a fixed rate.

use anyhow::Result;
use ratebar_core::clock::SystemClock;
use ratebar_core::config::RatebarConfig;
use ratebar_core::progress::{Bar, BarOptions, SharedBar};
use std::sync::Arc;
use std::time::Duration;

use crate::cli::display;

const STEP: Duration = Duration::from_millis(50);

pub async fn run_simulate(
    cfg: &RatebarConfig,
    total: u64,
    rate: u64,
    message: String,
) -> Result<()> {
    if rate == 0 {
        anyhow::bail!("rate must be greater than zero");
    }

    let bar = SharedBar::new(Bar::with_options(
        message,
        total as i64,
        0,
        Arc::new(SystemClock),
        BarOptions::from(&cfg.bar),
    ));
    let display = display::spawn(bar.clone(), cfg);

    let per_step = step_bytes(rate);
    let mut ticker = tokio::time::interval(STEP);
    let mut done = 0u64;
    loop {
        ticker.tick().await;
        done = done.saturating_add(per_step).min(total);
        bar.set(done as i64);
        if done >= total {
            break;
        }
    }

    display.finish().await;
    tracing::info!(total, rate, "simulation finished");
    Ok(())
}

/// Bytes per `STEP` for `rate` bytes per second, at least one.
fn step_bytes(rate: u64) -> u64 {
    (rate / (1000 / STEP.as_millis() as u64)).max(1)
}
