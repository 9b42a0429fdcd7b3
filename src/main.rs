//! Diagnostic HTTP request catcher.
//!
//! Point any client or webhook sender at the root path and inspect exactly
//! what was received: each request is pretty-printed on the console, appended
//! to a per-run JSON-lines log file, and echoed back as the JSON response.
//!
//! ```text
//! Client Request ──▶ listener ──▶ normalize ──┬──▶ present (console)
//!                                             ├──▶ sink (logs/run-*.log)
//!                                             └──▶ respond (200 JSON echo)
//! ```

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use request_catcher::config::ServerConfig;
use request_catcher::http::HttpServer;
use request_catcher::sink::LogSink;
use request_catcher::state::ServerState;

/// HTTP request catcher.
#[derive(Parser)]
#[command(name = "request-catcher", version, about = "HTTP request catcher")]
struct Cli {
    /// Listening port
    #[arg(short, long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "request_catcher=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::for_port(cli.port);

    tracing::info!(
        bind_address = %config.bind_address,
        log_dir = %config.log_dir.display(),
        "Configuration loaded"
    );

    // A sink that cannot open degrades to console-only operation.
    let sink = match LogSink::open(&config.log_dir).await {
        Ok(sink) => sink,
        Err(error) => {
            tracing::warn!(%error, "Log sink unavailable, continuing console-only");
            LogSink::disabled()
        }
    };
    if let Some(path) = sink.path() {
        tracing::info!(path = %path.display(), "Logging captured requests");
    }

    // Bind failure is the one fatal startup error.
    let listener = TcpListener::bind(&config.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Starting server");

    let state = Arc::new(ServerState::new(sink));
    let server = HttpServer::new(state);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
