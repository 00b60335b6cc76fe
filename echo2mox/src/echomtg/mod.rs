//! EchoMTG API client for authenticating and downloading store exports

mod client;
mod credentials;

pub use client::{EchoClient, DEFAULT_BASE_URL};
pub use credentials::{Credentials, EMAIL_ENV, PASSWORD_ENV, TOKEN_ENV};

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
