// Birthday commands: add, list, delete, modify and the forced reminder
// check.

use super::{authenticated_client, ensure_success};
use crate::cli::{AddBirthdayArgs, DeleteBirthdayArgs, ModifyBirthdayArgs};
use crate::config::Settings;
use crate::error::UsageError;
use crate::models::{BirthdayNameDateAdd, BirthdayNameDateModify, UserData};
use crate::ui;
use anyhow::{Context, Result};

pub fn run_add_birthday(settings: &Settings, args: &AddBirthdayArgs) -> Result<()> {
    let client = authenticated_client(settings)?;
    let req = BirthdayNameDateAdd {
        name: args.name.clone(),
        date: args.date.clone(),
    };

    let added = ui::with_spinner("Adding birthday...", || client.add_birthday(&req))
        .context("Error adding birthday")?;
    println!(
        "Birthday for {} on {} added successfully! (ID {})",
        added.name, added.date, added.id
    );
    Ok(())
}

pub fn run_list_birthdays(settings: &Settings) -> Result<()> {
    let client = authenticated_client(settings)?;
    let user = ui::with_spinner("Fetching birthdays...", || client.get_user_data())
        .context("Error retrieving user data")?;

    print!("{}", ui::format_birthdays(&user.birthdays));
    Ok(())
}

pub fn run_delete_birthday(settings: &Settings, args: &DeleteBirthdayArgs) -> Result<()> {
    let client = authenticated_client(settings)?;
    let req = BirthdayNameDateModify::id_only(args.id);

    let res = ui::with_spinner("Deleting birthday...", || client.delete_birthday(&req))
        .context("Error deleting birthday")?;
    ensure_success(res, "deletion")?;
    println!("Birthday with ID {} deleted successfully!", args.id);
    Ok(())
}

/// Fill a missing name or date from the stored birthday with the same ID.
pub fn merge_birthday(
    user: &UserData,
    args: &ModifyBirthdayArgs,
) -> std::result::Result<BirthdayNameDateModify, UsageError> {
    let existing = user.birthday(args.id).ok_or_else(|| {
        UsageError::new(format!(
            "no birthday with ID {}; give both --name and --date or pick an ID from 'birthdays list'",
            args.id
        ))
    })?;

    Ok(BirthdayNameDateModify {
        id: args.id,
        name: Some(args.name.clone().unwrap_or_else(|| existing.name.clone())),
        date: Some(args.date.clone().unwrap_or_else(|| existing.date.clone())),
    })
}

pub fn run_modify_birthday(settings: &Settings, args: &ModifyBirthdayArgs) -> Result<()> {
    let client = authenticated_client(settings)?;

    let req = match (&args.name, &args.date) {
        (Some(name), Some(date)) => BirthdayNameDateModify {
            id: args.id,
            name: Some(name.clone()),
            date: Some(date.clone()),
        },
        _ => {
            let user = ui::with_spinner("Fetching birthdays...", || client.get_user_data())
                .context("Error retrieving user data")?;
            merge_birthday(&user, args)?
        }
    };

    let res = ui::with_spinner("Modifying birthday...", || client.modify_birthday(&req))
        .context("Error modifying birthday")?;
    ensure_success(res, "modification")?;
    println!(
        "Birthday with ID {} modified successfully to {} on {}!",
        req.id,
        req.name.as_deref().unwrap_or_default(),
        req.date.as_deref().unwrap_or_default()
    );
    Ok(())
}

pub fn run_check_birthdays(settings: &Settings) -> Result<()> {
    let client = authenticated_client(settings)?;
    let res = ui::with_spinner("Checking birthdays...", || client.check_birthdays())
        .context("Error checking birthdays")?;
    ensure_success(res, "birthday check")?;
    println!("Check performed, if there's a birthday today, you should receive a message.");
    Ok(())
}
