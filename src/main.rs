use std::process::ExitCode;

use storecheck::config::{CONFIG_FILE, Config};
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("storecheck=info")))
        .init();

    match run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            error!(error = %err, "storecheck aborted");
            ExitCode::from(2)
        }
    }
}

async fn run() -> storecheck::Result<bool> {
    let config = Config::load(CONFIG_FILE)?;
    let mut reporters = storecheck::reporters_for(&config)?;
    let report = storecheck::run(&config, &mut reporters).await?;
    Ok(report.success())
}
