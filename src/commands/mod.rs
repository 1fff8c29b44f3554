// Command handlers
//
// Each handler takes the resolved `Settings` plus its own argument struct,
// performs its request(s) and prints the result to stdout.

mod auth;
mod birthdays;
mod health;

pub use auth::{
    plan_user_update, run_delete_user, run_generate_password, run_login, run_logout, run_me,
    run_modify_user, run_register, UserUpdate,
};
pub use birthdays::{
    merge_birthday, run_add_birthday, run_check_birthdays, run_delete_birthday,
    run_list_birthdays, run_modify_birthday,
};
pub use health::run_health;

use crate::api::ApiClient;
use crate::cli::{AuthCommands, BirthdayCommands, Cli, Commands};
use crate::config::Settings;
use crate::credentials;
use crate::error::ClientError;
use crate::models::Success;
use anyhow::{Context, Result};

/// Dispatch a parsed command line.
pub fn run(cli: &Cli) -> Result<()> {
    let settings = cli.connection.settings();
    log::debug!(
        "backend {} (credentials {})",
        settings.connection.base_url(),
        settings.creds_path().display()
    );

    match &cli.command {
        Commands::Auth { command } => match command {
            AuthCommands::Login(args) => run_login(&settings, args),
            AuthCommands::Register(args) => run_register(&settings, args),
            AuthCommands::Logout(args) => run_logout(&settings, args),
            AuthCommands::Me(args) => run_me(&settings, args),
            AuthCommands::ModifyUser(args) => run_modify_user(&settings, args),
            AuthCommands::DeleteUser(args) => run_delete_user(&settings, args),
            AuthCommands::GeneratePassword => run_generate_password(&settings),
        },

        Commands::Birthdays { command } => match command {
            BirthdayCommands::Add(args) => run_add_birthday(&settings, args),
            BirthdayCommands::List => run_list_birthdays(&settings),
            BirthdayCommands::Delete(args) => run_delete_birthday(&settings, args),
            BirthdayCommands::Modify(args) => run_modify_birthday(&settings, args),
            BirthdayCommands::Check => run_check_birthdays(&settings),
        },

        Commands::Health => run_health(&settings),
    }
}

/// Client carrying the saved token for the configured host, or the
/// fallback token when nothing is saved. Fails before any network call if
/// neither exists.
pub(crate) fn authenticated_client(settings: &Settings) -> Result<ApiClient> {
    let path = settings.creds_path();
    let creds = credentials::load(&path).context("Error loading credentials")?;

    let token = if creds.is_empty() {
        settings.fallback_token.clone().unwrap_or_default()
    } else {
        creds.token
    };
    if token.is_empty() {
        return Err(ClientError::MissingToken.into());
    }

    Ok(settings.client().with_token(token))
}

/// Turn a `{"success": false}` answer into an error.
pub(crate) fn ensure_success(res: Success, what: &str) -> Result<()> {
    if res.success {
        Ok(())
    } else {
        anyhow::bail!("the server did not confirm the {}", what)
    }
}
