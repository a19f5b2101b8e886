//! Entry point for `kasl-timectl`, grounded on the teacher's `main.rs`
//! (env-gated `tracing-subscriber` init, then hand off to `Cli::menu()`).

use anyhow::Result;
use kasl_time_core::cli::Cli;
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    if env::var("KASL_CORE_DEBUG").is_ok() || env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "kasl_time_core=debug".into()))
            .init();
    }

    Cli::menu().await
}
