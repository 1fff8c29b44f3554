// API client module: a small blocking HTTP client that talks to the HBD
// backend. Every public method maps to exactly one request against a fixed
// path and decodes either the typed response or the `{ "error": ... }`
// envelope.

use crate::error::ClientError;
use crate::models::{
    ApiError, BirthdayFull, BirthdayNameDateAdd, BirthdayNameDateModify, LoginRequest,
    LoginSuccess, ModifyUserRequest, Password, Ready, RegisterRequest, Success, UserData,
};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Header telling the server how many hours a newly issued token lives.
pub const TOKEN_DURATION_HEADER: &str = "x-jwt-token-duration";

pub type Result<T> = std::result::Result<T, ClientError>;

/// Whether an endpoint expects the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Bearer,
    Anonymous,
}

/// Blocking client holding the reqwest client, the base URL of the
/// backend and an optional bearer token for authenticated calls.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

/// Join a base URL and a fixed API path with exactly one slash between
/// them, however many trailing slashes the base carries.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            client: Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Attach a bearer token. An empty token leaves the client
    /// unauthenticated.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = if token.is_empty() { None } else { Some(token) };
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn headers(&self, auth: Auth, token_duration: Option<u32>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if auth == Auth::Bearer {
            let token = self.token.as_deref().ok_or(ClientError::MissingToken)?;
            let val = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ClientError::InvalidHeader("Authorization"))?;
            headers.insert(AUTHORIZATION, val);
        }

        if let Some(hours) = token_duration.filter(|h| *h != 0) {
            headers.insert(
                HeaderName::from_static(TOKEN_DURATION_HEADER),
                HeaderValue::from(hours),
            );
        }

        Ok(headers)
    }

    /// Shared request path: build, send, then decode a 200 body into `T` or
    /// any other status into `ClientError::Api`.
    fn call<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        auth: Auth,
        token_duration: Option<u32>,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = endpoint(&self.base_url, path);
        let headers = self.headers(auth, token_duration)?;

        let mut req = self.client.request(method.clone(), &url).headers(headers);
        if let Some(payload) = body {
            let bytes = serde_json::to_vec(payload).map_err(ClientError::Encode)?;
            req = req.body(bytes);
        }

        log::debug!("{} {}", method, url);
        let res = req.send().map_err(|source| ClientError::Transport {
            url: url.clone(),
            source,
        })?;

        let status = res.status();
        let text = res.text().map_err(|source| ClientError::Transport {
            url: url.clone(),
            source,
        })?;
        log::debug!("{} {} -> {}", method, url, status);

        if status != StatusCode::OK {
            let envelope: ApiError = serde_json::from_str(&text).unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: envelope.error,
            });
        }

        serde_json::from_str(&text).map_err(ClientError::Decode)
    }

    pub fn add_birthday(&self, birthday: &BirthdayNameDateAdd) -> Result<BirthdayFull> {
        self.call(Method::POST, "/api/add-birthday", Some(birthday), Auth::Bearer, None)
    }

    /// Ask the server to run its reminder check for the current user now.
    pub fn check_birthdays(&self) -> Result<Success> {
        self.call::<(), _>(Method::POST, "/api/check-birthdays", None, Auth::Bearer, None)
    }

    pub fn delete_birthday(&self, birthday: &BirthdayNameDateModify) -> Result<Success> {
        self.call(Method::DELETE, "/api/delete-birthday", Some(birthday), Auth::Bearer, None)
    }

    pub fn delete_user(&self) -> Result<Success> {
        self.call::<(), _>(Method::DELETE, "/api/delete-user", None, Auth::Bearer, None)
    }

    pub fn generate_password(&self) -> Result<Password> {
        self.call::<(), _>(Method::GET, "/api/generate-password", None, Auth::Anonymous, None)
    }

    pub fn check_health(&self) -> Result<Ready> {
        self.call::<(), _>(Method::GET, "/api/health", None, Auth::Anonymous, None)
    }

    /// Log in and return a fresh token. `token_duration` is in hours; zero
    /// lets the server pick.
    pub fn login(&self, user: &LoginRequest, token_duration: u32) -> Result<LoginSuccess> {
        self.call(
            Method::POST,
            "/api/login",
            Some(user),
            Auth::Anonymous,
            Some(token_duration),
        )
    }

    pub fn get_user_data(&self) -> Result<UserData> {
        self.call::<(), _>(Method::GET, "/api/me", None, Auth::Bearer, None)
    }

    pub fn modify_birthday(&self, birthday: &BirthdayNameDateModify) -> Result<Success> {
        self.call(Method::PUT, "/api/modify-birthday", Some(birthday), Auth::Bearer, None)
    }

    /// Update the account including email and/or password. The server
    /// invalidates the old token and returns a new one.
    pub fn modify_user_with_email(
        &self,
        user: &ModifyUserRequest,
        token_duration: u32,
    ) -> Result<LoginSuccess> {
        self.call(
            Method::PUT,
            "/api/modify-user",
            Some(user),
            Auth::Bearer,
            Some(token_duration),
        )
    }

    /// Update profile fields only; the current token stays valid and the
    /// server returns the updated profile.
    pub fn modify_user_without_email(&self, user: &ModifyUserRequest) -> Result<UserData> {
        self.call(Method::PUT, "/api/modify-user", Some(user), Auth::Bearer, None)
    }

    pub fn register(&self, user: &RegisterRequest, token_duration: u32) -> Result<LoginSuccess> {
        self.call(
            Method::POST,
            "/api/register",
            Some(user),
            Auth::Anonymous,
            Some(token_duration),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_strips_trailing_slashes() {
        assert_eq!(endpoint("http://h:1", "/api/me"), "http://h:1/api/me");
        assert_eq!(endpoint("http://h:1/", "/api/me"), "http://h:1/api/me");
        assert_eq!(endpoint("http://h:1///", "/api/me"), "http://h:1/api/me");
    }

    #[test]
    fn empty_token_is_no_token() {
        let client = ApiClient::new("http://localhost").with_token("");
        assert!(!client.has_token());
        assert!(client.with_token("abc").has_token());
    }

    #[test]
    fn bearer_call_without_token_fails_before_sending() {
        // Port 9 (discard) is never contacted: the token check comes first.
        let client = ApiClient::new("http://127.0.0.1:9");
        let err = client.get_user_data().unwrap_err();
        assert!(matches!(err, ClientError::MissingToken));
    }

    #[test]
    fn headers_include_duration_only_when_non_zero() {
        let client = ApiClient::new("http://localhost").with_token("t");
        let h = client.headers(Auth::Bearer, Some(0)).unwrap();
        assert!(h.get(TOKEN_DURATION_HEADER).is_none());
        assert_eq!(h.get(AUTHORIZATION).unwrap(), "Bearer t");

        let h = client.headers(Auth::Anonymous, Some(48)).unwrap();
        assert_eq!(h.get(TOKEN_DURATION_HEADER).unwrap(), "48");
        assert!(h.get(AUTHORIZATION).is_none());
        assert_eq!(h.get(CONTENT_TYPE).unwrap(), "application/json");
    }
}
