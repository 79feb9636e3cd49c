mod config;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use clap::Parser;

use config::Config;

/// OAuth Debug Server — serves a static home page and a debug endpoint
/// that echoes the deployment's OAuth site configuration alongside the
/// incoming request's query parameters and headers.
#[derive(Parser, Debug)]
#[command(name = "oauth-debug-server", version, about)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Port to listen on (overrides config file)
    #[arg(short, long)]
    port: Option<u16>,
}

/// Build the application router over shared site configuration.
fn app(config: Arc<Config>) -> Router {
    Router::new()
        .route("/", get(routes::home::home))
        .route("/debug/oauth/", get(routes::debug::debug_oauth))
        .with_state(config)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut cfg = match config::load_config(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    // CLI --port overrides config
    if let Some(port) = cli.port {
        cfg.server.port = port;
    }

    tracing::info!(
        domain = %cfg.site.domain,
        name = %cfg.site.name,
        "Site configuration loaded"
    );

    let bind_addr = format!("{}:{}", cfg.server.host, cfg.server.port);
    tracing::info!("Listening on {bind_addr}");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind to {bind_addr}: {e}");
            std::process::exit(1);
        });

    axum::serve(listener, app(Arc::new(cfg)))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Server error: {e}");
            std::process::exit(1);
        });
}
