//! `ratebar copy <src> <dst>` – copy a file with a progress bar.

use anyhow::{Context, Result};
use ratebar_core::clock::SystemClock;
use ratebar_core::config::RatebarConfig;
use ratebar_core::progress::{Bar, BarOptions, SharedBar};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::Arc;

use crate::cli::display;

const CHUNK_SIZE: usize = 256 * 1024;

pub async fn run_copy(
    cfg: &RatebarConfig,
    src: &Path,
    dst: &Path,
    resume: bool,
    message: Option<String>,
) -> Result<()> {
    let total = fs::metadata(src)
        .with_context(|| format!("cannot stat source: {}", src.display()))?
        .len();
    let offset = if resume {
        resume_offset(dst, total)
    } else {
        0
    };
    if offset > 0 {
        tracing::info!(offset, total, dst = %dst.display(), "resuming partial copy");
    }

    let message = message.unwrap_or_else(|| {
        src.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| src.display().to_string())
    });
    let bar = SharedBar::new(Bar::with_options(
        message,
        total as i64,
        offset as i64,
        Arc::new(SystemClock),
        BarOptions::from(&cfg.bar),
    ));

    let display = display::spawn(bar.clone(), cfg);
    let copied = tokio::task::spawn_blocking({
        let src = src.to_path_buf();
        let dst = dst.to_path_buf();
        move || copy_from(&src, &dst, offset, &bar)
    })
    .await
    .context("copy task join");
    display.finish().await;

    let copied = copied??;
    tracing::info!(
        copied,
        total,
        src = %src.display(),
        dst = %dst.display(),
        "copy finished"
    );
    Ok(())
}

/// Length of an existing partial destination, capped at `total`.
fn resume_offset(dst: &Path, total: u64) -> u64 {
    match fs::metadata(dst) {
        Ok(m) => m.len().min(total),
        Err(_) => 0,
    }
}

/// Copy `src` into `dst` starting at `offset`, reporting the running byte
/// count to `bar`. Returns the bytes copied by this call.
pub(crate) fn copy_from(src: &Path, dst: &Path, offset: u64, bar: &SharedBar) -> Result<u64> {
    let mut input =
        File::open(src).with_context(|| format!("cannot open source: {}", src.display()))?;
    input.seek(SeekFrom::Start(offset))?;

    let mut output = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(offset == 0)
        .open(dst)
        .with_context(|| format!("cannot open destination: {}", dst.display()))?;
    output.set_len(offset)?;
    output.seek(SeekFrom::Start(offset))?;

    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut done = offset;
    bar.set(done as i64);
    loop {
        let n = input
            .read(&mut buf)
            .with_context(|| format!("read failed: {}", src.display()))?;
        if n == 0 {
            break;
        }
        output
            .write_all(&buf[..n])
            .with_context(|| format!("write failed: {}", dst.display()))?;
        done += n as u64;
        bar.set(done as i64);
    }
    output.flush()?;
    Ok(done - offset)
}
