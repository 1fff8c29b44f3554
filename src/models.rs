// Request and response shapes exchanged with the HBD backend.
//
// All of these are built per call and dropped afterwards; nothing here is
// cached. Field names on the wire are snake_case.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Data needed to create an account.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub reminder_time: String,
    pub timezone: String,
    pub telegram_bot_api_key: String,
    pub telegram_user_id: String,
}

/// Partial update of the account. Fields left as `None` are not sent.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifyUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_reminder_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_telegram_bot_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_telegram_user_id: Option<String>,
}

impl ModifyUserRequest {
    /// True when the update touches the login credentials, which makes the
    /// server invalidate the current token and issue a new one.
    pub fn changes_credentials(&self) -> bool {
        self.new_email.is_some() || self.new_password.is_some()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BirthdayNameDateAdd {
    pub name: String,
    pub date: String,
}

/// Identifies an existing birthday. `name` and `date` are only needed
/// when modifying.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BirthdayNameDateModify {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl BirthdayNameDateModify {
    pub fn id_only(id: i64) -> Self {
        BirthdayNameDateModify {
            id,
            name: None,
            date: None,
        }
    }
}

/// A stored birthday as returned by the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BirthdayFull {
    pub id: i64,
    pub name: String,
    pub date: String,
}

/// The authenticated user's profile and birthdays.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    pub id: i64,
    #[serde(default)]
    pub email: String,
    pub reminder_time: String,
    pub timezone: String,
    pub telegram_bot_api_key: String,
    pub telegram_user_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub birthdays: Vec<BirthdayFull>,
}

impl UserData {
    pub fn birthday(&self, id: i64) -> Option<&BirthdayFull> {
        self.birthdays.iter().find(|b| b.id == id)
    }
}

// The server encodes an empty list as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginSuccess {
    pub token: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Success {
    pub success: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Password {
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Ready {
    pub status: String,
}

/// Error envelope sent with every non-200 response.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiError {
    #[serde(default)]
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_data_accepts_null_birthdays() {
        let body = r#"{
            "id": 3,
            "reminder_time": "09:00",
            "timezone": "Europe/Madrid",
            "telegram_bot_api_key": "k",
            "telegram_user_id": "u",
            "birthdays": null
        }"#;
        let user: UserData = serde_json::from_str(body).unwrap();
        assert!(user.birthdays.is_empty());
        assert_eq!(user.email, "");
    }

    #[test]
    fn user_data_keeps_birthday_order() {
        let body = r#"{
            "id": 3,
            "email": "a@b.com",
            "reminder_time": "09:00",
            "timezone": "UTC",
            "telegram_bot_api_key": "k",
            "telegram_user_id": "u",
            "birthdays": [
                {"id": 9, "name": "Zoe", "date": "1990-01-02"},
                {"id": 2, "name": "Al", "date": "1985-07-30"}
            ]
        }"#;
        let user: UserData = serde_json::from_str(body).unwrap();
        let ids: Vec<i64> = user.birthdays.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![9, 2]);
        assert_eq!(user.birthday(2).map(|b| b.name.as_str()), Some("Al"));
        assert!(user.birthday(5).is_none());
    }

    #[test]
    fn modify_user_request_omits_unset_fields() {
        let req = ModifyUserRequest {
            new_timezone: Some("UTC".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({ "new_timezone": "UTC" }));
        assert!(!req.changes_credentials());
    }

    #[test]
    fn delete_payload_carries_only_id() {
        let json = serde_json::to_value(BirthdayNameDateModify::id_only(12)).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 12 }));
    }
}
