//! CLI for the ratebar progress bar.

mod commands;
mod display;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ratebar_core::config;
use std::path::PathBuf;

use commands::{run_copy, run_simulate};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ratebar")]
#[command(about = "Byte-counted transfers with a live progress bar", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Copy a file, showing progress.
    Copy {
        /// File to read.
        src: PathBuf,
        /// Destination file.
        dst: PathBuf,
        /// Keep an existing partial destination and continue from its length.
        #[arg(long)]
        resume: bool,
        /// Label shown before the bar (defaults to the source file name).
        #[arg(long, short)]
        message: Option<String>,
    },

    /// Run a synthetic transfer at a fixed rate.
    Simulate {
        /// Total bytes to "transfer".
        #[arg(long, value_name = "BYTES")]
        total: u64,
        /// Transfer rate in bytes per second.
        #[arg(long, default_value = "1000000", value_name = "BYTES_PER_SEC")]
        rate: u64,
        /// Label shown before the bar.
        #[arg(long, short, default_value = "simulating")]
        message: String,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Copy {
                src,
                dst,
                resume,
                message,
            } => run_copy(&cfg, &src, &dst, resume, message).await?,
            CliCommand::Simulate {
                total,
                rate,
                message,
            } => run_simulate(&cfg, total, rate, message).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
