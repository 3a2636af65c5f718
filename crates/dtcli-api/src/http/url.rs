//! URL construction helpers for tenant endpoints

use thiserror::Error;
use url::Url;

/// Domain suffix of development tenants
pub const DEV_TENANT_DOMAIN: &str = "dev.dynatracelabs.com";

/// Builds the base URL of a development tenant
///
/// The result is a plain string (`https://{tenant}.dev.dynatracelabs.com`)
/// so it can be stored unmodified as the client's base URL.
pub fn dev_tenant_url(tenant: &str) -> String {
    format!("https://{tenant}.{DEV_TENANT_DOMAIN}")
}

/// Appends path segments to a base URL
///
/// Segments are percent-encoded and appended after whatever path the base
/// already carries, so tenants served under a path prefix
/// (`https://host/e/{environment}`) keep it. The base is not normalised: a
/// trailing slash on a non-root path is kept as an empty segment.
///
/// Empty, `.` and `..` segments are rejected: `url` would drop them and the
/// request would hit the parent resource instead.
///
/// # Errors
///
/// Returns error if a segment is not addressable, or if the base does not
/// parse or cannot be a base
pub fn endpoint_url(base: &str, segments: &[&str]) -> Result<Url, UrlError> {
    if let Some(segment) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
        return Err(UrlError::InvalidSegment {
            segment: segment.to_string(),
        });
    }

    let mut url = Url::parse(base)?;
    add_path_segments(&mut url, segments)?;
    Ok(url)
}

/// Helper to safely add path segments to URL
///
/// # Errors
///
/// Returns error if URL cannot be a base
pub fn add_path_segments(url: &mut Url, segments: &[&str]) -> Result<(), UrlError> {
    let url_for_error = url.clone();
    url.path_segments_mut()
        .map_err(|_| UrlError::CannotBeABase { url: url_for_error })?
        .extend(segments);
    Ok(())
}

/// URL construction errors
#[derive(Debug, Error)]
pub enum UrlError {
    /// URL cannot be used as a base
    #[error("URL cannot be a base: {url}")]
    CannotBeABase {
        /// The problematic URL
        url: Url,
    },

    /// Path segment that would not address its own resource
    #[error("invalid path segment '{segment}'")]
    InvalidSegment {
        /// The rejected segment
        segment: String,
    },

    /// Invalid URL parse error
    #[error("Invalid URL: {0}")]
    ParseError(#[from] url::ParseError),
}
