// Connection settings
//
// Everything a command needs to reach the backend and find its token,
// resolved once from flags and environment and then passed by reference
// into the handlers.

use crate::api::ApiClient;
use crate::credentials;
use std::path::PathBuf;

/// Host used when neither `--host` nor `HBD_HOST` is set.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Port used when neither host nor port is configured.
pub const DEFAULT_PORT: u16 = 8417;

/// Lifetime in hours requested for newly issued tokens (30 days).
pub const DEFAULT_TOKEN_DURATION_HOURS: u32 = 720;

/// Where the backend lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub host: String,
    pub port: Option<u16>,
    pub ssl: bool,
}

impl Connection {
    /// Resolve the connection from optional user input.
    ///
    /// With nothing set the local development server is assumed
    /// (`http://0.0.0.0:8417`). A configured host without a port talks to
    /// the scheme's default port, and SSL defaults to on for any host that
    /// is not local.
    pub fn resolve(host: Option<String>, port: Option<u16>, ssl: Option<bool>) -> Self {
        let host = host.filter(|h| !h.is_empty());
        let port = match (&host, port) {
            (None, None) => Some(DEFAULT_PORT),
            (_, port) => port,
        };
        let host = host.unwrap_or_else(|| DEFAULT_HOST.to_string());
        let ssl = ssl.unwrap_or(!is_local_host(&host));

        Connection { host, port, ssl }
    }

    pub fn base_url(&self) -> String {
        let scheme = if self.ssl { "https" } else { "http" };
        match self.port {
            Some(port) => format!("{}://{}:{}", scheme, self.host, port),
            None => format!("{}://{}", scheme, self.host),
        }
    }
}

/// The default bind address and loopback names, which are served over
/// plain http unless SSL is asked for.
pub fn is_local_host(host: &str) -> bool {
    matches!(
        host.trim_start_matches('[').trim_end_matches(']'),
        "0.0.0.0" | "localhost" | "127.0.0.1" | "::1"
    )
}

/// Resolved settings shared by every command.
#[derive(Debug, Clone)]
pub struct Settings {
    pub connection: Connection,
    /// Directory holding one credentials file per host.
    pub creds_dir: PathBuf,
    /// Token used when the credentials file has none.
    pub fallback_token: Option<String>,
}

impl Settings {
    pub fn new(connection: Connection, creds_dir: Option<PathBuf>) -> Self {
        let creds_dir = creds_dir
            .map(|p| credentials::expand_tilde(&p))
            .unwrap_or_else(credentials::default_dir);
        Settings {
            connection,
            creds_dir,
            fallback_token: None,
        }
    }

    pub fn with_fallback_token(mut self, token: Option<String>) -> Self {
        self.fallback_token = token.filter(|t| !t.is_empty());
        self
    }

    /// Credentials file for the configured host.
    pub fn creds_path(&self) -> PathBuf {
        credentials::path_for_host(&self.creds_dir, &self.connection.host)
    }

    /// Unauthenticated client for the configured backend.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.connection.base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_set_means_local_server() {
        let conn = Connection::resolve(None, None, None);
        assert_eq!(conn.base_url(), "http://0.0.0.0:8417");
    }

    #[test]
    fn remote_host_defaults_to_https_without_port() {
        let conn = Connection::resolve(Some("hbd.example.com".into()), None, None);
        assert_eq!(conn.base_url(), "https://hbd.example.com");
    }

    #[test]
    fn explicit_values_win() {
        let conn = Connection::resolve(Some("example.com".into()), Some(8080), Some(false));
        assert_eq!(conn.base_url(), "http://example.com:8080");

        let conn = Connection::resolve(None, Some(9000), Some(true));
        assert_eq!(conn.base_url(), "https://0.0.0.0:9000");
    }

    #[test]
    fn loopback_hosts_default_to_http() {
        for host in ["localhost", "127.0.0.1", "[::1]"] {
            let conn = Connection::resolve(Some(host.into()), Some(8417), None);
            assert!(!conn.ssl, "{} should not default to https", host);
        }
        let conn = Connection::resolve(Some("localhost".into()), None, None);
        assert_eq!(conn.base_url(), "http://localhost");

        let conn = Connection::resolve(Some("localhost".into()), None, Some(true));
        assert!(conn.ssl);
    }

    #[test]
    fn empty_host_counts_as_unset() {
        let conn = Connection::resolve(Some(String::new()), None, None);
        assert_eq!(conn.host, DEFAULT_HOST);
        assert_eq!(conn.port, Some(DEFAULT_PORT));
    }

    #[test]
    fn creds_path_is_keyed_by_host() {
        let conn = Connection::resolve(Some("hbd.example.com".into()), None, None);
        let settings = Settings::new(conn, Some(PathBuf::from("/tmp/hbd")));
        assert_eq!(settings.creds_path(), PathBuf::from("/tmp/hbd/hbd.example.com"));
    }

    #[test]
    fn empty_fallback_token_is_ignored() {
        let settings = Settings::new(Connection::resolve(None, None, None), None)
            .with_fallback_token(Some(String::new()));
        assert!(settings.fallback_token.is_none());
    }
}
