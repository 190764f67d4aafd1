//! Admin account commands.

use clap::{Args, Subcommand};

use library_auth::{NewAccount, PasswordHasher, PasswordValidator, RegistrationService};
use library_core::config::AppConfig;
use library_core::error::AppError;
use library_entity::user::UserRole;

use super::prompt_error;
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
    /// Create a new admin account
    Create {
        /// Username
        #[arg(short, long)]
        username: Option<String>,
        /// Email
        #[arg(short, long)]
        email: Option<String>,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
}

/// Execute admin commands
pub async fn execute(
    args: &AdminArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        AdminCommand::Create {
            username,
            email,
            password,
        } => {
            let username = match username {
                Some(u) => u.clone(),
                None => dialoguer::Input::new()
                    .with_prompt("Admin username")
                    .interact_text()
                    .map_err(prompt_error)?,
            };

            let email = match email {
                Some(e) => e.clone(),
                None => dialoguer::Input::new()
                    .with_prompt("Admin email")
                    .interact_text()
                    .map_err(prompt_error)?,
            };

            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Admin password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(prompt_error)?,
            };

            let user_repo = super::user_repository(config).await?;
            let registration = RegistrationService::new(
                user_repo,
                PasswordValidator::new(&config.auth),
                std::sync::Arc::new(PasswordHasher::new()),
            );

            let user = registration
                .register(NewAccount {
                    username,
                    email,
                    password,
                    role: UserRole::Admin,
                })
                .await?;

            output::print_success(&format!(
                "Admin user '{}' created (id: {})",
                user.username, user.id
            ));
            output::print_item(&user, format);
        }
    }

    Ok(())
}
