use anyhow::Context;
use tracing_subscriber::EnvFilter;
use tt_tracking::{replay, LoggerConfig, ReplayInput};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let path = std::env::args()
        .nth(1)
        .context("usage: tt-records <study-and-trial.json>")?;

    let input = ReplayInput::from_path(&path)
        .with_context(|| format!("failed to read replay input from {path}"))?;
    let config = LoggerConfig::from_env()?;
    let report = replay(&input, config)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
