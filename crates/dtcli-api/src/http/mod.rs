//! Shared HTTP utilities
//!
//! - HTTP client construction with user agent and timeouts
//! - Safe URL construction helpers

pub mod client;
pub mod url;

pub use self::client::{DEFAULT_TIMEOUT, USER_AGENT, build_client, build_default_client};
pub use self::url::{DEV_TENANT_DOMAIN, UrlError, add_path_segments, dev_tenant_url, endpoint_url};
