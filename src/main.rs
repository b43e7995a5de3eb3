//! Article server binary
//!
//! Serves the article API on port 8080 of every interface until killed.
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::process::ExitCode;

use articles_rs::ServerConfig;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match articles_rs::run(ServerConfig::default()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
