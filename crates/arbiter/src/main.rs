//! Arbiter: referees a single game over stdin/stdout.
//!
//! Usage: `arbiter [config.toml]`. Logs go to stderr so stdout carries only
//! protocol replies.

mod config;
mod driver;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::ArbiterConfig;
use driver::{Arbiter, Reply};
use move_broker::RandomSource;

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = ArbiterConfig::from_args(std::env::args())?;
    init_logging(&config.log_level);
    info!(
        variant = ?config.variant,
        max_attempts = config.broker.attempts(),
        "arbiter ready"
    );

    let mut arbiter = Arbiter::new(config, RandomSource::new());
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        match arbiter.handle(&line).await {
            Reply::Output(text) => {
                writeln!(stdout, "{text}")?;
                stdout.flush()?;
            }
            Reply::Silent => {}
            Reply::Quit => break,
        }
    }
    Ok(())
}
