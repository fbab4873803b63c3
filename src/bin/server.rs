//! # Form Responses Server
//!
//! Serves the listing, schema and population endpoints over HTTP.

use anyhow::Context;
use clap::Parser;
use form_responses::client::FilloutClient;
use form_responses::config::{CliOverrides, ConfigManager};
use form_responses::database::DatabaseConnection;
use form_responses::logging::init_structured_logging;
use form_responses::web::{create_app, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "form-responses-server")]
#[command(about = "Filtered query API over Fillout form submissions")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Fillout API secret
    #[arg(long, env = "FILLOUT_SECRET", hide_env_values = true)]
    secret: Option<String>,

    /// MySQL host
    #[arg(long)]
    host: Option<String>,

    /// MySQL user
    #[arg(long)]
    user: Option<String>,

    /// MySQL password
    #[arg(long)]
    password: Option<String>,

    /// MySQL database name
    #[arg(long)]
    database: Option<String>,

    /// Configuration file (default: config/form-responses.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl From<Cli> for CliOverrides {
    fn from(cli: Cli) -> Self {
        CliOverrides {
            port: cli.port,
            secret: cli.secret,
            host: cli.host,
            user: cli.user,
            password: cli.password,
            database: cli.database,
            config: cli.config,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let overrides = CliOverrides::from(Cli::parse());

    let manager = ConfigManager::load(&overrides).context("Failed to load configuration")?;
    let config = manager.config();
    init_structured_logging(config.logging.format);

    let database = DatabaseConnection::new_lazy(&config.database);
    let form_source = FilloutClient::new(&config.fillout).context("Invalid Fillout configuration")?;
    let state = AppState::new(database.into_pool(), Arc::new(form_source));

    let address = config.listen_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!(
        address = %address,
        environment = %manager.environment(),
        form_id = %config.fillout.form_id,
        "Form responses server listening"
    );

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Form responses server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}
