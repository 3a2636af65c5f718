//! Request/response seam between the client and the network
//!
//! [`DynatraceClient`](crate::DynatraceClient) never talks to reqwest
//! directly: it hands an [`ApiRequest`] to a [`Transport`] and gets an
//! [`ApiResponse`] back. [`HttpTransport`] is the real implementation; tests
//! substitute their own.

use crate::error::ApiError;
use crate::http;
use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// A single outgoing request
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// JSON body, if any
    pub body: Option<Value>,
}

/// A fully read response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Decodes the body as JSON
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body is not valid JSON for `T`
    pub fn json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|source| ApiError::Decode {
            url: url.clone(),
            source,
        })
    }

    /// Decodes the body as JSON, or `None` if it is empty or not JSON
    pub fn json_lossy(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

/// Executes requests on behalf of the client
pub trait Transport {
    /// Sends `request` and reads the whole response
    ///
    /// Non-2xx statuses are not errors at this layer.
    fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking reqwest transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Transport with [`http::DEFAULT_TIMEOUT`]
    pub fn new() -> Result<Self, ApiError> {
        let client = http::build_default_client().map_err(ApiError::Client)?;
        Ok(Self { client })
    }

    /// Transport with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, ApiError> {
        let client = http::build_client(timeout).map_err(ApiError::Client)?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let ApiRequest {
            method,
            url,
            headers,
            body,
        } = request;

        tracing::debug!(%method, %url, "sending request");

        let mut builder = self
            .client
            .request(method, url.as_str())
            .headers(headers);
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let request_error = |source| ApiError::Request {
            url: url.clone(),
            source,
        };

        let response = builder.send().map_err(request_error)?;
        let status = response.status();
        let body = response.bytes().map_err(request_error)?.to_vec();

        tracing::debug!(%url, %status, bytes = body.len(), "received response");

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_transport_builds() {
        assert!(HttpTransport::new().is_ok());
        assert!(HttpTransport::with_timeout(Duration::from_secs(1)).is_ok());
    }

    #[test]
    fn test_json_lossy_tolerates_non_json() {
        let html = ApiResponse {
            status: StatusCode::BAD_GATEWAY,
            body: b"<html>bad gateway</html>".to_vec(),
        };
        assert_eq!(html.json_lossy(), None);

        let json = ApiResponse {
            status: StatusCode::OK,
            body: br#"{"a":1}"#.to_vec(),
        };
        assert_eq!(json.json_lossy(), Some(serde_json::json!({"a": 1})));
    }
}
