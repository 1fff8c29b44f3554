// Shared helpers for the integration tests: mockito servers stand in for
// the HBD backend.

#![allow(dead_code)]

use mockito::{Mock, ServerGuard};
use std::net::TcpListener;

pub const USER_JSON: &str = r#"{
    "id": 1,
    "email": "a@b.com",
    "reminder_time": "09:00",
    "timezone": "UTC",
    "telegram_bot_api_key": "bot-key",
    "telegram_user_id": "tg-id",
    "birthdays": [
        {"id": 7, "name": "John", "date": "2021-12-25"},
        {"id": 8, "name": "Mary", "date": "1999-05-01"}
    ]
}"#;

pub const SUCCESS_JSON: &str = r#"{"success":true}"#;

/// Port the mock server listens on.
pub fn port_of(server: &ServerGuard) -> u16 {
    let host = server.host_with_port();
    host.rsplit(':')
        .next()
        .and_then(|p| p.parse().ok())
        .expect("mock server address has a port")
}

/// A port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// A JSON answer for `method path`, expected exactly once.
pub fn json_mock(server: &mut ServerGuard, method: &str, path: &str, status: usize, body: &str) -> Mock {
    server
        .mock(method, path)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(1)
}
