//! User lookup and library membership commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use library_api::services::MembershipService;
use library_core::config::AppConfig;
use library_core::error::AppError;
use library_database::repositories::UserRepository;
use library_entity::user::User;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Show a user and their membership
    Show {
        /// Username
        username: String,
    },
    /// Activate (or create) a user's library membership
    Activate {
        /// Username
        username: String,
        /// Contact information, required for a first membership
        #[arg(short, long)]
        contact: Option<String>,
    },
    /// Block a user's library membership
    Block {
        /// Username
        username: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: i64,
    /// Username
    username: String,
    /// Email
    email: String,
    /// Role
    role: String,
    /// Membership status
    membership: String,
    /// Created at
    created_at: String,
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let user_repo = super::user_repository(config).await?;

    match &args.command {
        UserCommand::Show { username } => {
            let user = find_user(user_repo.as_ref(), username).await?;
            let membership = match user.library_member_id {
                Some(_) => user_repo
                    .find_member(user.id)
                    .await?
                    .map(|m| m.membership_status.to_string())
                    .unwrap_or_default(),
                None => "-".to_string(),
            };

            let row = UserRow {
                id: user.id,
                username: user.username,
                email: user.email,
                role: user.role.to_string(),
                membership,
                created_at: user.created_at.format("%Y-%m-%d %H:%M").to_string(),
            };
            output::print_list(&[row], format);
        }
        UserCommand::Activate { username, contact } => {
            let user = find_user(user_repo.as_ref(), username).await?;
            let status = MembershipService::new(user_repo)
                .activate(user.id, contact.as_deref())
                .await?;
            output::print_success(&format!("Membership of '{username}' is now {status}"));
        }
        UserCommand::Block { username } => {
            let user = find_user(user_repo.as_ref(), username).await?;
            let status = MembershipService::new(user_repo).block(user.id).await?;
            output::print_success(&format!("Membership of '{username}' is now {status}"));
        }
    }

    Ok(())
}

async fn find_user(repo: &dyn UserRepository, username: &str) -> Result<User, AppError> {
    repo.find_by_username(username)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))
}
