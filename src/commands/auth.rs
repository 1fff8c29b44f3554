// Account commands: login, register, logout, me, modify-user, delete-user
// and generate-password.

use super::authenticated_client;
use crate::cli::{ConfirmArgs, LoginArgs, MeArgs, ModifyUserArgs, RegisterArgs};
use crate::config::Settings;
use crate::credentials::{self, Credentials};
use crate::error::CredentialsError;
use crate::models::{LoginRequest, ModifyUserRequest, RegisterRequest, UserData};
use crate::ui;
use anyhow::{Context, Result};

pub fn run_login(settings: &Settings, args: &LoginArgs) -> Result<()> {
    let path = settings.creds_path();
    let req = LoginRequest {
        email: args.email.clone(),
        password: args.password.clone(),
    };

    let client = settings.client();
    let success = ui::with_spinner("Logging in...", || {
        client.login(&req, args.duration.token_duration)
    })
    .context("Error logging in, wrong email or password")?;

    credentials::save(&path, &Credentials::new(success.token))
        .context("Error saving credentials")?;
    println!("Login successful! Token saved to {}", path.display());
    Ok(())
}

pub fn run_register(settings: &Settings, args: &RegisterArgs) -> Result<()> {
    let path = settings.creds_path();
    let req = RegisterRequest {
        email: args.email.clone(),
        password: args.password.clone(),
        reminder_time: args.reminder_time.clone(),
        timezone: args.timezone.clone(),
        telegram_bot_api_key: args.telegram_bot_api_key.clone(),
        telegram_user_id: args.telegram_user_id.clone(),
    };

    let client = settings.client();
    let success = ui::with_spinner("Registering...", || {
        client.register(&req, args.duration.token_duration)
    })
    .context("Error registering user")?;

    credentials::save(&path, &Credentials::new(success.token))
        .context("Error saving credentials")?;
    println!("Registration successful! Token saved to {}", path.display());
    Ok(())
}

pub fn run_logout(settings: &Settings, args: &ConfirmArgs) -> Result<()> {
    let path = settings.creds_path();

    if !args.yes {
        let prompt = format!(
            "Are you sure you want to log out? This will remove {}",
            path.display()
        );
        if !ui::confirm(&prompt)? {
            println!("Logout cancelled.");
            return Ok(());
        }
    }

    credentials::delete(&path).context("Error deleting credentials file")?;
    println!("Logged out successfully.");
    Ok(())
}

pub fn run_me(settings: &Settings, args: &MeArgs) -> Result<()> {
    let client = authenticated_client(settings)?;
    let user = ui::with_spinner("Fetching user data...", || client.get_user_data())
        .context("Error retrieving user data")?;

    if args.dotenv {
        print!("{}", ui::format_user_dotenv(&user));
    } else {
        print!("{}", ui::format_user_data(&user));
    }
    Ok(())
}

/// Which modify-user call to make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserUpdate {
    /// Email or password change; the server answers with a new token.
    Credentials(ModifyUserRequest),
    /// Profile fields only; the server answers with the updated profile.
    Profile(ModifyUserRequest),
}

/// Build the update from the requested changes, keeping the current value
/// of every profile field that was not given.
pub fn plan_user_update(current: &UserData, args: &ModifyUserArgs) -> UserUpdate {
    let keep = |new: &Option<String>, old: &str| Some(new.clone().unwrap_or_else(|| old.to_string()));

    let req = ModifyUserRequest {
        new_email: args.new_email.clone(),
        new_password: args.new_password.clone(),
        new_reminder_time: keep(&args.new_reminder_time, &current.reminder_time),
        new_timezone: keep(&args.new_timezone, &current.timezone),
        new_telegram_bot_api_key: keep(
            &args.new_telegram_bot_api_key,
            &current.telegram_bot_api_key,
        ),
        new_telegram_user_id: keep(&args.new_telegram_user_id, &current.telegram_user_id),
    };

    if req.changes_credentials() {
        UserUpdate::Credentials(req)
    } else {
        UserUpdate::Profile(req)
    }
}

pub fn run_modify_user(settings: &Settings, args: &ModifyUserArgs) -> Result<()> {
    let client = authenticated_client(settings)?;
    let current = ui::with_spinner("Fetching user data...", || client.get_user_data())
        .context("Error retrieving user data")?;

    match plan_user_update(&current, args) {
        UserUpdate::Credentials(req) => {
            let success = ui::with_spinner("Updating account...", || {
                client.modify_user_with_email(&req, args.duration.token_duration)
            })
            .context("Error modifying user details")?;

            let path = settings.creds_path();
            credentials::save(&path, &Credentials::new(success.token))
                .context("Error saving credentials")?;
            println!(
                "User details modified successfully! Token saved to {}",
                path.display()
            );
        }
        UserUpdate::Profile(req) => {
            let user = ui::with_spinner("Updating account...", || {
                client.modify_user_without_email(&req)
            })
            .context("Error modifying user details")?;

            println!("User data modified successfully!\n");
            print!("{}", ui::format_user_data(&user));
        }
    }
    Ok(())
}

pub fn run_delete_user(settings: &Settings, args: &ConfirmArgs) -> Result<()> {
    let client = authenticated_client(settings)?;

    if !args.yes {
        let prompt = "Are you sure you want to delete your account? This action cannot be undone";
        if !ui::confirm(prompt)? {
            println!("Account deletion aborted.");
            return Ok(());
        }
    }

    let res = ui::with_spinner("Deleting account...", || client.delete_user())
        .context("Error deleting user")?;
    super::ensure_success(res, "account deletion")?;

    // The token may have come from HBD_TOKEN, in which case nothing is saved.
    match credentials::delete(&settings.creds_path()) {
        Ok(()) | Err(CredentialsError::NotFound(_)) => {}
        Err(e) => return Err(e).context("Error deleting credentials file"),
    }

    println!("Account deleted successfully!");
    Ok(())
}

pub fn run_generate_password(settings: &Settings) -> Result<()> {
    let client = settings.client();
    let password = client
        .generate_password()
        .context("Error generating password")?;
    println!("{}", password.password);
    Ok(())
}
