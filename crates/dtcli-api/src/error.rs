//! Error type for tenant API calls

use crate::http::UrlError;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// Errors returned by [`crate::DynatraceClient`] operations
#[derive(Debug, Error)]
pub enum ApiError {
    /// Server answered with a non-2xx status
    #[error("{method} {url} failed with {status}{}", describe_body(.body))]
    Status {
        /// Request method
        method: Method,
        /// Request URL
        url: Url,
        /// Response status
        status: StatusCode,
        /// Response body, when it decoded as JSON
        body: Option<Value>,
    },

    /// Request could not be sent or the response could not be read
    #[error("request to {url} failed: {source}")]
    Request {
        /// Request URL
        url: Url,
        /// Underlying reqwest error
        #[source]
        source: reqwest::Error,
    },

    /// Successful response body is not the expected JSON
    #[error("invalid JSON from {url}: {source}")]
    Decode {
        /// Request URL
        url: Url,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// Response envelope lacks a required field
    #[error("response from {url} has no '{field}' field")]
    MissingField {
        /// Request URL
        url: Url,
        /// Missing field name
        field: &'static str,
    },

    /// Requested schema version matches nothing the tenant offers
    #[error(
        "Target version {requested} does not exist. Available versions: [{}]",
        .available.join(", ")
    )]
    VersionNotFound {
        /// Version token given by the caller
        requested: String,
        /// Versions reported by the tenant, in server order
        available: Vec<String>,
    },

    /// Schema manifest names something that is not a plain file name
    #[error("refusing to write schema file with unsafe name '{name}'")]
    UnsafeFileName {
        /// Offending manifest entry
        name: String,
    },

    /// Token cannot be carried in an HTTP header
    #[error("API token contains characters not allowed in an HTTP header")]
    InvalidToken,

    /// HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// URL construction error
    #[error(transparent)]
    Url(#[from] UrlError),

    /// I/O error while writing downloads
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Request { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Whether the server answered 404
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

fn describe_body(body: &Option<Value>) -> String {
    match body {
        Some(value) => format!(": {value}"),
        None => String::new(),
    }
}
