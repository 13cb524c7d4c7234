pub mod config;
pub mod logging;

pub mod clock;
pub mod humanize;
pub mod progress;
pub mod terminal;
