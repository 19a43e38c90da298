//! Dockerization: a minimal HTTP liveness service.
//!
//! This is the application entry point. It initializes tracing, loads configuration
//! from a TOML file (or built-in defaults), builds the router with the configured
//! key provider, and starts the HTTP server.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dockerization::config::{
    AppConfig, ConfigError, LogFormat, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER,
};
use dockerization::http::start_server;
use dockerization::{create_router, AppState};

/// Dockerization: a minimal HTTP liveness service
#[derive(Parser, Debug)]
#[command(name = "dockerization", version, about)]
struct Args {
    /// Path to configuration file (built-in defaults are used if the default path is missing)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "dockerization=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Host to bind, overrides http.host
    #[arg(long, help_heading = "Binding")]
    host: Option<String>,

    /// Port to bind, overrides http.port
    #[arg(long, help_heading = "Binding")]
    port: Option<u16>,
}

impl Args {
    fn config_path(&self) -> &str {
        self.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH)
    }

    /// Load the configuration and report whether it came from a file.
    ///
    /// An explicit --config must exist; the default path is optional.
    fn load_config(&self) -> Result<(AppConfig, bool), ConfigError> {
        match &self.config {
            Some(path) => Ok((AppConfig::load(path)?, true)),
            None => AppConfig::load_or_default(DEFAULT_CONFIG_PATH),
        }
    }

    /// Apply --host/--port on top of the loaded configuration.
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.http.host = host.clone();
        }
        if let Some(port) = self.port {
            config.http.port = port;
        }
    }
}

/// Log filter with priority: CLI > env > default
fn resolve_log_filter(cli: Option<String>, env: Option<String>) -> String {
    cli.or(env)
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let (mut config, from_file) = args.load_config()?;
    args.apply_overrides(&mut config);

    let log_filter = resolve_log_filter(args.log_level.clone(), std::env::var("RUST_LOG").ok());

    let (text_layer, json_layer) = match config.logging.format {
        LogFormat::Text => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(text_layer)
        .with(json_layer)
        .init();

    if from_file {
        tracing::info!(path = %args.config_path(), "Loaded configuration");
    } else {
        tracing::info!(
            path = %args.config_path(),
            "Configuration file not found, using defaults"
        );
    }

    tracing::info!(
        host = %config.http.host,
        port = config.http.port,
        key = config.key.is_enabled(),
        key_source = config.key.source_name(),
        "Health endpoint configured"
    );

    let http_config = config.http.clone();
    let state = AppState::new(config);
    let app = create_router(state);

    start_server(app, &http_config).await?;

    Ok(())
}
