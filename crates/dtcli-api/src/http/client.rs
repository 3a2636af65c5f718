//! HTTP client construction for tenant API calls

use reqwest::blocking::Client;
use std::time::Duration;

/// Default timeout for tenant requests (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("dtcli/", env!("CARGO_PKG_VERSION"));

/// Builds HTTP client with the dtcli user agent and the given timeout
///
/// # Errors
///
/// Returns error if the TLS backend cannot be initialised
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

/// Builds HTTP client with [`DEFAULT_TIMEOUT`]
pub fn build_default_client() -> Result<Client, reqwest::Error> {
    build_client(DEFAULT_TIMEOUT)
}
