//! relayd - command line entry point.
//!
//! `relayd <port> <password> [config.toml]`

use relayd::config::Config;
use relayd::network::Gateway;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid startup configuration");
            return ExitCode::FAILURE;
        }
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server error");
            ExitCode::FAILURE
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn run(config: Config) -> anyhow::Result<()> {
    info!(
        server = %config.server.name,
        address = %config.listen.address(),
        max_clients = config.limits.max_clients,
        "starting relayd"
    );

    let gateway = Gateway::bind(&config).await?;
    gateway
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
        })
        .await?;

    info!("relayd stopped");
    Ok(())
}
