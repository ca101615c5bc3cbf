//! Entry point for the comments API server

use comments_common::{try_init_tracing, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing() {
        eprintln!("tracing setup failed: {e}");
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Configuration is incomplete");
            std::process::exit(1);
        }
    };

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        port = config.server.port,
        "Starting comments server"
    );

    if let Err(e) = comments_api::run(config).await {
        error!(error = %e, "Server exited with error");
        std::process::exit(1);
    }
}
