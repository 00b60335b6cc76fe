use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Environment variable holding a ready-made API token
pub const TOKEN_ENV: &str = "ECHOMTG_TOKEN";
/// Environment variables for logging in with account credentials
pub const EMAIL_ENV: &str = "ECHOMTG_EMAIL";
pub const PASSWORD_ENV: &str = "ECHOMTG_PASSWORD";

/// How to authenticate against the EchoMTG API
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// An API token, used as-is
    Token(String),
    /// Account login exchanged for a token on every run
    Login { email: String, password: String },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Token(_) => f.write_str("Token(***)"),
            Credentials::Login { email, .. } => f
                .debug_struct("Login")
                .field("email", email)
                .field("password", &"***")
                .finish(),
        }
    }
}

impl Credentials {
    /// Read a token from a file, ignoring surrounding whitespace
    pub fn from_token_file(path: &Path) -> Result<Self> {
        let token = fs::read_to_string(path)?.trim().to_string();
        if token.is_empty() {
            return Err(Error::Auth(format!("token file {} is empty", path.display())));
        }
        log::debug!("Using EchoMTG token from {}", path.display());
        Ok(Credentials::Token(token))
    }

    /// Read credentials from `ECHOMTG_TOKEN`, else `ECHOMTG_EMAIL` and
    /// `ECHOMTG_PASSWORD`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Credentials::from_env`] with a custom variable source.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = get(TOKEN_ENV) {
            return Ok(Credentials::Token(token.trim().to_string()));
        }

        match (get(EMAIL_ENV), get(PASSWORD_ENV)) {
            (Some(email), Some(password)) => Ok(Credentials::Login { email, password }),
            (Some(_), None) => Err(Error::Config(format!(
                "{} is set but {} is missing",
                EMAIL_ENV, PASSWORD_ENV
            ))),
            _ => Err(Error::Config(format!(
                "no EchoMTG credentials: set {} or {} and {}, or pass a token file",
                TOKEN_ENV, EMAIL_ENV, PASSWORD_ENV
            ))),
        }
    }

    /// Token file when given, otherwise the environment
    pub fn resolve(token_file: Option<&Path>) -> Result<Self> {
        match token_file {
            Some(path) => Self::from_token_file(path),
            None => Self::from_env(),
        }
    }
}
