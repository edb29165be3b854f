//! Start the Atelier server.

use clap::Args;

use atelier_core::config::AppConfig;
use atelier_core::error::AppError;
use atelier_database::migration::run_migrations;

use crate::output;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Skip database migrations on startup
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }

    println!("Starting Atelier server...");
    output::print_kv("Host", &config.server.host);
    output::print_kv("Port", &config.server.port.to_string());

    let db = super::connect(&config).await?;

    if !args.no_migrate {
        run_migrations(db.pool()).await?;
        output::print_success("Migrations applied.");
    }

    atelier_api::run_server(config, db).await
}
