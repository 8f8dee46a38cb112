//! REST access to the local League client (LCU).
//!
//! The client writes a `lockfile` next to its install with the port and the
//! basic-auth password for the localhost HTTPS API. The API uses a
//! self-signed certificate, so verification is disabled for this one origin.

use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum LcuError {
    #[error("Failed to read lockfile: {0}")]
    LockfileRead(#[from] std::io::Error),

    #[error("Lockfile has an unexpected format: {0}")]
    LockfileFormat(String),

    #[error("Authorization header could not be built")]
    InvalidAuthHeader,

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),

    #[error("Resource not found")]
    NotFound,

    #[error("LCU returned status {0}")]
    Status(StatusCode),
}

/// Parsed contents of the client's `lockfile`:
/// `LeagueClient:<pid>:<port>:<password>:<protocol>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lockfile {
    pub pid: u32,
    pub port: u16,
    pub password: String,
    pub protocol: String,
}

impl Lockfile {
    pub fn parse(contents: &str) -> Result<Self, LcuError> {
        let fields: Vec<&str> = contents.trim().split(':').collect();
        if fields.len() < 5 {
            return Err(LcuError::LockfileFormat(format!(
                "expected 5 fields, got {}",
                fields.len()
            )));
        }

        let pid = fields[1]
            .parse()
            .map_err(|_| LcuError::LockfileFormat(format!("bad pid '{}'", fields[1])))?;
        let port = fields[2]
            .parse()
            .map_err(|_| LcuError::LockfileFormat(format!("bad port '{}'", fields[2])))?;

        Ok(Self {
            pid,
            port,
            password: fields[3].to_string(),
            protocol: fields[4].to_string(),
        })
    }

    pub fn path_for(league_dir: &Path) -> PathBuf {
        league_dir.join("lockfile")
    }

    pub fn read(league_dir: &Path) -> Result<Self, LcuError> {
        let contents = std::fs::read_to_string(Self::path_for(league_dir))?;
        Self::parse(&contents)
    }

    /// `Basic` authorization value for the fixed `riot` user.
    pub fn auth_header(&self) -> String {
        let token = base64::engine::general_purpose::STANDARD
            .encode(format!("riot:{}", self.password));
        format!("Basic {token}")
    }

    pub fn base_url(&self) -> String {
        format!("{}://127.0.0.1:{}", self.protocol, self.port)
    }

    pub fn websocket_url(&self) -> String {
        format!("wss://127.0.0.1:{}", self.port)
    }
}

pub struct LcuClient {
    http: reqwest::Client,
    base_url: String,
}

impl LcuClient {
    pub fn connect(lockfile: &Lockfile) -> Result<Self, LcuError> {
        let mut auth_value = HeaderValue::from_str(&lockfile.auth_header())
            .map_err(|_| LcuError::InvalidAuthHeader)?;
        auth_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth_value);

        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(LcuError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: lockfile.base_url(),
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, LcuError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(LcuError::NotFound),
            status if !status.is_success() => {
                tracing::debug!("LCU request {} failed with status {}", path, status);
                Err(LcuError::Status(status))
            }
            _ => Ok(response.json().await?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_lockfile() {
        let lf = Lockfile::parse("LeagueClient:12345:52361:sEcReT:https").unwrap();
        assert_eq!(lf.pid, 12345);
        assert_eq!(lf.port, 52361);
        assert_eq!(lf.password, "sEcReT");
        assert_eq!(lf.protocol, "https");
        assert_eq!(lf.base_url(), "https://127.0.0.1:52361");
        assert_eq!(lf.websocket_url(), "wss://127.0.0.1:52361");
    }

    #[test]
    fn lockfile_tolerates_trailing_whitespace() {
        let lf = Lockfile::parse("LeagueClient:1:2:pw:https\n").unwrap();
        assert_eq!(lf.port, 2);
    }

    #[test]
    fn rejects_short_lockfile() {
        assert!(matches!(
            Lockfile::parse("LeagueClient:12345"),
            Err(LcuError::LockfileFormat(_))
        ));
    }

    #[test]
    fn rejects_non_numeric_port() {
        assert!(matches!(
            Lockfile::parse("LeagueClient:1:notaport:pw:https"),
            Err(LcuError::LockfileFormat(_))
        ));
    }

    #[test]
    fn auth_header_is_basic_riot() {
        let lf = Lockfile::parse("LeagueClient:1:2:pw:https").unwrap();
        // base64("riot:pw")
        assert_eq!(lf.auth_header(), "Basic cmlvdDpwdw==");
    }
}
