//! CLI command definitions and dispatch.

pub mod admin;
pub mod gallery;
pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

use atelier_core::config::AppConfig;
use atelier_core::error::AppError;
use atelier_database::DatabasePool;

use crate::output::OutputFormat;

/// Atelier: password-protectable art gallery backend
#[derive(Debug, Parser)]
#[command(name = "atelier", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file (without extension)
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay, read from `config/{env}.toml`
    #[arg(short, long, env = "ATELIER_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the Atelier server
    Serve(serve::ServeArgs),
    /// Apply database migrations
    Migrate,
    /// Inspect the gallery hierarchy
    Gallery(gallery::GalleryArgs),
    /// Admin credential helpers
    Admin(admin::AdminArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, self.load_config()?).await,
            Commands::Migrate => migrate::execute(self.load_config()?).await,
            Commands::Gallery(args) => {
                gallery::execute(args, self.load_config()?, self.format).await
            }
            Commands::Admin(args) => admin::execute(args, self.format),
        }
    }

    fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load_from(&self.config, &self.env)
    }
}

/// Helper: connect to the configured database
pub async fn connect(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_gallery_path() {
        let cli = Cli::parse_from([
            "atelier",
            "--format",
            "json",
            "gallery",
            "path",
            "00000000-0000-0000-0000-000000000007",
        ]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Gallery(_)));
    }
}
