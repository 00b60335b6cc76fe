use echo2mox_core::{read_csv, Table};
use serde::{Deserialize, Serialize};

use super::credentials::Credentials;
use crate::error::{Error, Result};

/// EchoMTG API root
pub const DEFAULT_BASE_URL: &str = "https://api.echomtg.com";

const EXPORT_PATH: &str = "/api/stores/export/";
const AUTH_PATH: &str = "/api/user/auth/";
const USER_AGENT: &str = "echo2mox/0.1";

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Async client for the two EchoMTG endpoints the export needs
#[derive(Debug, Clone)]
pub struct EchoClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for EchoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl EchoClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against another API root (mock servers, proxies)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Turn credentials into an API token, logging in when needed
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<String> {
        let (email, password) = match credentials {
            Credentials::Token(token) => return Ok(token.clone()),
            Credentials::Login { email, password } => (email, password),
        };

        log::info!("Logging in to EchoMTG as {}...", email);

        let response = self
            .http
            .post(format!("{}{}", self.base_url, AUTH_PATH))
            .header("User-Agent", USER_AGENT)
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Auth(format!("login rejected with status {}", status)));
        }

        let body: LoginResponse = serde_json::from_str(&response.text().await?)?;
        match body.token.filter(|t| !t.is_empty()) {
            Some(token) => Ok(token),
            None => Err(Error::Auth(
                body.message
                    .unwrap_or_else(|| "no token in login response".to_string()),
            )),
        }
    }

    /// Download the store export as raw CSV text
    pub async fn fetch_export(&self, token: &str) -> Result<String> {
        log::info!("Fetching inventory export from EchoMTG...");

        let response = self
            .http
            .get(format!("{}{}", self.base_url, EXPORT_PATH))
            .header("User-Agent", USER_AGENT)
            .query(&[("auth", token)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        log::info!("Fetched export ({} bytes)", body.len());
        Ok(body)
    }

    /// Authenticate, download and parse the export
    pub async fn fetch_table(&self, credentials: &Credentials) -> Result<Table> {
        let token = self.authenticate(credentials).await?;
        let csv = self.fetch_export(&token).await?;
        Ok(read_csv(csv.as_bytes())?)
    }
}
