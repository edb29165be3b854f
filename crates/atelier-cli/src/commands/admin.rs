//! Admin credential helpers.

use clap::{Args, Subcommand};

use atelier_auth::PasswordHasher;
use atelier_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Hash an admin password for `auth.admin_password_hash`
    HashPassword {
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
}

/// Execute admin commands
pub fn execute(args: &AdminArgs, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        AdminCommand::HashPassword { password } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Admin password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            if password.trim().is_empty() {
                return Err(AppError::validation("Password must not be empty"));
            }

            let hash = PasswordHasher::new().hash_password(&password)?;
            output::print_value(&hash, format);
            if format == OutputFormat::Table {
                output::print_success("Set this as ATELIER__AUTH__ADMIN_PASSWORD_HASH.");
            }
        }
    }

    Ok(())
}
