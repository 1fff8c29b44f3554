// UI layer: confirmation prompts, a spinner shown while a request is in
// flight, and the plain-text rendering of server responses.

use crate::models::{BirthdayFull, UserData};
use anyhow::Result;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Ask a yes/no question on the terminal. Defaults to "no".
pub fn confirm(prompt: &str) -> Result<bool> {
    let answer = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    Ok(answer)
}

/// Run `f` with a spinner on stderr. The spinner is hidden when stderr is
/// not a terminal.
pub fn with_spinner<T>(msg: &str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let out = f();
    spinner.finish_and_clear();
    out
}

/// Human readable profile.
pub fn format_user_data(user: &UserData) -> String {
    let email = if user.email.is_empty() {
        String::new()
    } else {
        format!("Email: {}\n", user.email)
    };

    format!(
        "User Data:\n\
         ID: {}\n\
         {}\
         Telegram Bot API Key: {}\n\
         Telegram User ID: {}\n\
         Reminder Time: {}\n\
         Timezone: {}\n\
         To view the birthdays use the 'birthdays' command\n",
        user.id,
        email,
        user.telegram_bot_api_key,
        user.telegram_user_id,
        user.reminder_time,
        user.timezone,
    )
}

/// Profile as `KEY=VALUE` lines, ready to paste into a `.env` file.
pub fn format_user_dotenv(user: &UserData) -> String {
    format!(
        "HBD_USER_ID={}\n\
         HBD_TELEGRAM_BOT_API_KEY={}\n\
         HBD_TELEGRAM_USER_ID={}\n\
         HBD_REMINDER_TIME={}\n\
         HBD_TIMEZONE={}\n",
        user.id,
        user.telegram_bot_api_key,
        user.telegram_user_id,
        user.reminder_time,
        user.timezone,
    )
}

pub fn format_birthdays(birthdays: &[BirthdayFull]) -> String {
    if birthdays.is_empty() {
        return "No birthdays yet.\n".to_string();
    }

    let mut out = String::from("Your Birthdays:\n");
    for b in birthdays {
        out.push_str(&format!("ID: {}, Name: {}, Date: {}\n", b.id, b.name, b.date));
    }
    out
}
