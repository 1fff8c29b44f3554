// CLI argument definitions using clap derive
//
// Every value that the backend needs can also come from an `HBD_*`
// environment variable.

use crate::config::{Connection, Settings, DEFAULT_TOKEN_DURATION_HOURS};
use chrono::{NaiveDate, NaiveTime};
use clap::builder::{BoolishValueParser, NonEmptyStringValueParser};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for the HBD birthday reminder service
#[derive(Parser, Debug)]
#[command(name = "hbd")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to find the service and the saved token.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Host for the service [default: 0.0.0.0]
    #[arg(long, global = true, env = "HBD_HOST")]
    pub host: Option<String>,

    /// Port for the service [default: 8417 when no host is given]
    #[arg(long, global = true, env = "HBD_PORT")]
    pub port: Option<u16>,

    /// Use SSL (https) for the connection [default: on unless the host is 0.0.0.0, localhost or a loopback address]
    #[arg(
        long,
        global = true,
        env = "HBD_SSL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub ssl: Option<bool>,

    /// Directory holding the credentials files, one per host
    #[arg(long, global = true, env = "HBD_CREDS_PATH")]
    pub creds_path: Option<PathBuf>,

    /// Token to use when the credentials file has none
    #[arg(long, global = true, env = "HBD_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

impl ConnectionArgs {
    pub fn settings(&self) -> Settings {
        let connection = Connection::resolve(self.host.clone(), self.port, self.ssl);
        Settings::new(connection, self.creds_path.clone()).with_fallback_token(self.token.clone())
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authentication related commands (login, register, ...)
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },

    /// Birthday related commands (add, list, delete, modify, check)
    Birthdays {
        #[command(subcommand)]
        command: BirthdayCommands,
    },

    /// Check that the service is up
    Health,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Log in and save the token for this host
    Login(LoginArgs),

    /// Create a new account and save the token for this host
    Register(RegisterArgs),

    /// Remove the saved token for this host
    Logout(ConfirmArgs),

    /// Show the authenticated user's data
    Me(MeArgs),

    /// Change account details; unspecified fields keep their current value
    ModifyUser(ModifyUserArgs),

    /// Permanently delete the account and its birthdays
    DeleteUser(ConfirmArgs),

    /// Ask the server for a random password
    GeneratePassword,
}

#[derive(Subcommand, Debug)]
pub enum BirthdayCommands {
    /// Add a new birthday
    Add(AddBirthdayArgs),

    /// List all birthdays
    List,

    /// Delete a birthday by ID
    Delete(DeleteBirthdayArgs),

    /// Modify a birthday; a missing name or date keeps its current value
    Modify(ModifyBirthdayArgs),

    /// Force the reminder check for today
    Check,
}

#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    /// Email for login
    #[arg(long, env = "HBD_EMAIL", value_parser = NonEmptyStringValueParser::new())]
    pub email: String,

    /// Password for login
    #[arg(
        long,
        env = "HBD_PASSWORD",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub password: String,

    #[command(flatten)]
    pub duration: TokenDurationArgs,
}

#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    /// Email for registration
    #[arg(long, env = "HBD_EMAIL", value_parser = NonEmptyStringValueParser::new())]
    pub email: String,

    /// Password for registration
    #[arg(
        long,
        env = "HBD_PASSWORD",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub password: String,

    /// Reminder time (HH:MM)
    #[arg(long, env = "HBD_REMINDER_TIME", value_parser = parse_reminder_time)]
    pub reminder_time: String,

    /// Timezone for the reminder, e.g. America/New_York
    #[arg(long, env = "HBD_TIMEZONE", value_parser = NonEmptyStringValueParser::new())]
    pub timezone: String,

    /// Telegram bot API key
    #[arg(
        long,
        env = "HBD_TELEGRAM_BOT_API_KEY",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub telegram_bot_api_key: String,

    /// Telegram user ID
    #[arg(long, env = "HBD_TELEGRAM_USER_ID", value_parser = NonEmptyStringValueParser::new())]
    pub telegram_user_id: String,

    #[command(flatten)]
    pub duration: TokenDurationArgs,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct TokenDurationArgs {
    /// Lifetime in hours of the token issued by the server; 0 lets the server decide
    #[arg(long, env = "HBD_TOKEN_DURATION", default_value_t = DEFAULT_TOKEN_DURATION_HOURS)]
    pub token_duration: u32,
}

impl Default for TokenDurationArgs {
    fn default() -> Self {
        TokenDurationArgs {
            token_duration: DEFAULT_TOKEN_DURATION_HOURS,
        }
    }
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ConfirmArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct MeArgs {
    /// Print the output in dotenv format (KEY=VALUE)
    #[arg(long)]
    pub dotenv: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ModifyUserArgs {
    /// New email; changing it issues a new token
    #[arg(long, env = "HBD_NEW_EMAIL", value_parser = NonEmptyStringValueParser::new())]
    pub new_email: Option<String>,

    /// New password; changing it issues a new token
    #[arg(
        long,
        env = "HBD_NEW_PASSWORD",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub new_password: Option<String>,

    /// New reminder time (HH:MM)
    #[arg(long, env = "HBD_NEW_REMINDER_TIME", value_parser = parse_reminder_time)]
    pub new_reminder_time: Option<String>,

    /// New timezone for the reminder
    #[arg(long, env = "HBD_NEW_TIMEZONE", value_parser = NonEmptyStringValueParser::new())]
    pub new_timezone: Option<String>,

    /// New Telegram bot API key
    #[arg(
        long,
        env = "HBD_NEW_TELEGRAM_BOT_API_KEY",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub new_telegram_bot_api_key: Option<String>,

    /// New Telegram user ID
    #[arg(long, env = "HBD_NEW_TELEGRAM_USER_ID", value_parser = NonEmptyStringValueParser::new())]
    pub new_telegram_user_id: Option<String>,

    #[command(flatten)]
    pub duration: TokenDurationArgs,
}

#[derive(Args, Debug, Clone)]
pub struct AddBirthdayArgs {
    /// Name of the person
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub name: String,

    /// Date of the birthday (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub date: String,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct DeleteBirthdayArgs {
    /// ID of the birthday to delete
    #[arg(long)]
    pub id: i64,
}

#[derive(Args, Debug, Clone)]
pub struct ModifyBirthdayArgs {
    /// ID of the birthday to modify
    #[arg(long)]
    pub id: i64,

    /// New name
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub name: Option<String>,

    /// New date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<String>,
}

/// Accept `YYYY-MM-DD` dates only, returned unchanged.
pub fn parse_date(s: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|_| s.to_string())
        .map_err(|_| format!("'{}' is not a date in YYYY-MM-DD format", s))
}

/// Accept `HH:MM` times only, returned unchanged.
pub fn parse_reminder_time(s: &str) -> Result<String, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .map(|_| s.to_string())
        .map_err(|_| format!("'{}' is not a time in HH:MM format", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_date_checks_format() {
        assert_eq!(parse_date("2021-12-25").unwrap(), "2021-12-25");
        assert!(parse_date("25/12/2021").is_err());
        assert!(parse_date("2021-02-30").is_err());
    }

    #[test]
    fn parse_reminder_time_checks_format() {
        assert_eq!(parse_reminder_time("09:30").unwrap(), "09:30");
        assert!(parse_reminder_time("25:00").is_err());
        assert!(parse_reminder_time("9am").is_err());
    }

    #[test]
    fn parses_nested_birthday_command() {
        let cli = Cli::try_parse_from([
            "hbd",
            "birthdays",
            "modify",
            "--id",
            "4",
            "--date",
            "2000-01-01",
            "--host",
            "example.com",
        ])
        .unwrap();

        assert_eq!(cli.connection.host.as_deref(), Some("example.com"));
        match cli.command {
            Commands::Birthdays {
                command: BirthdayCommands::Modify(args),
            } => {
                assert_eq!(args.id, 4);
                assert_eq!(args.name, None);
                assert_eq!(args.date.as_deref(), Some("2000-01-01"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_bad_date_before_anything_else() {
        let res = Cli::try_parse_from([
            "hbd", "birthdays", "add", "--name", "Jo", "--date", "tomorrow",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn bare_ssl_flag_means_true() {
        let cli = Cli::try_parse_from(["hbd", "--ssl", "health"]).unwrap();
        assert_eq!(cli.connection.ssl, Some(true));

        let cli = Cli::try_parse_from(["hbd", "--ssl=false", "health"]).unwrap();
        assert_eq!(cli.connection.ssl, Some(false));
    }
}
