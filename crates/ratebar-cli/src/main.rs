use ratebar_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Log to a file when possible; stderr carries the progress line.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("ratebar error: {:#}", err);
        std::process::exit(1);
    }
}
