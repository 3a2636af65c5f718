//! Tenant API client
//!
//! One method per endpoint. Every call re-fetches from the tenant; nothing is
//! cached between calls.

use crate::error::ApiError;
use crate::http;
use crate::pages::Pages;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
use reqwest::Method;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;
use url::Url;

/// Client for the extension and configuration endpoints of one tenant
///
/// The base URL is stored exactly as given. Request paths are appended to it
/// as percent-encoded segments.
#[derive(Debug, Clone)]
pub struct DynatraceClient<T = HttpTransport> {
    base_url: String,
    headers: HeaderMap,
    transport: T,
}

impl DynatraceClient<HttpTransport> {
    /// Client for a development tenant (`https://{tenant}.dev.dynatracelabs.com`)
    pub fn from_dev_tenant(tenant: &str, token: &str) -> Result<Self, ApiError> {
        Self::new(http::dev_tenant_url(tenant), token, HttpTransport::new()?)
    }

    /// Client for an already complete tenant URL
    pub fn from_tenant_url(tenant_url: &str, token: &str) -> Result<Self, ApiError> {
        Self::new(tenant_url, token, HttpTransport::new()?)
    }

    /// Client for a tenant URL with a custom request timeout
    pub fn with_timeout(tenant_url: &str, token: &str, timeout: Duration) -> Result<Self, ApiError> {
        Self::new(tenant_url, token, HttpTransport::with_timeout(timeout)?)
    }
}

impl<T: Transport> DynatraceClient<T> {
    /// Builds a client over an arbitrary transport
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidToken`] if the token cannot be sent as a
    /// header value
    pub fn new(base_url: impl Into<String>, token: &str, transport: T) -> Result<Self, ApiError> {
        let mut value = HeaderValue::from_str(&format!("Api-Token {token}"))
            .map_err(|_| ApiError::InvalidToken)?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);

        Ok(Self {
            base_url: base_url.into(),
            headers,
            transport,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Value of the `Authorization` header sent with every request
    pub fn authorization(&self) -> Option<&str> {
        self.headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok())
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `GET /api/config/v1/anomalyDetection/metricEvents/{id}`
    pub fn acquire_extension_alert(&self, alert_id: &str) -> Result<Value, ApiError> {
        let url = self.endpoint(&[
            "api",
            "config",
            "v1",
            "anomalyDetection",
            "metricEvents",
            alert_id,
        ])?;
        self.get_json(url)
    }

    /// Lazily pages through `GET /api/v2/extensions/{fqdn}/monitoringConfigurations`
    pub fn monitoring_configurations(&self, fqdn: &str) -> Pages<'_, T> {
        Pages::new(
            self,
            owned(&["api", "v2", "extensions", fqdn, "monitoringConfigurations"]),
            "items",
        )
    }

    /// All monitoring configurations of an extension
    pub fn acquire_monitoring_configurations(&self, fqdn: &str) -> Result<Vec<Value>, ApiError> {
        self.monitoring_configurations(fqdn).collect()
    }

    /// `GET /api/v2/extensions/{fqdn}/environmentConfiguration`
    ///
    /// Returns `Ok(None)` when the tenant answers 404, i.e. the extension has
    /// no active version.
    pub fn acquire_environment_configuration(&self, fqdn: &str) -> Result<Option<Value>, ApiError> {
        let url = self.environment_configuration_url(fqdn)?;
        let response = self.send(Method::GET, &url, None)?;

        if response.status == StatusCode::NOT_FOUND {
            tracing::debug!(fqdn, "no environment configuration");
            return Ok(None);
        }

        ensure_success(Method::GET, &url, &response)?;
        response.json(&url).map(Some)
    }

    /// Lazily pages through `GET /api/v2/extensions`
    pub fn extensions(&self) -> Pages<'_, T> {
        Pages::new(self, owned(&["api", "v2", "extensions"]), "extensions")
    }

    /// All extensions installed in the tenant
    pub fn acquire_extensions(&self) -> Result<Vec<Value>, ApiError> {
        self.extensions().collect()
    }

    /// Lazily pages through `GET /api/v2/extensions/{fqdn}`
    pub fn extension_versions(&self, fqdn: &str) -> Pages<'_, T> {
        Pages::new(self, owned(&["api", "v2", "extensions", fqdn]), "extensions")
    }

    /// All uploaded versions of an extension
    pub fn acquire_extension_versions(&self, fqdn: &str) -> Result<Vec<Value>, ApiError> {
        self.extension_versions(fqdn).collect()
    }

    /// `DELETE /api/v2/extensions/{fqdn}/monitoringConfigurations/{id}`
    ///
    /// Every non-2xx status is an error; the decoded body (if any) is logged
    /// and carried in [`ApiError::Status`].
    pub fn delete_monitoring_configuration(
        &self,
        fqdn: &str,
        configuration_id: &str,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&[
            "api",
            "v2",
            "extensions",
            fqdn,
            "monitoringConfigurations",
            configuration_id,
        ])?;
        let response = self.send(Method::DELETE, &url, None)?;

        ensure_success(Method::DELETE, &url, &response).inspect_err(log_error_body)
    }

    /// `DELETE /api/v2/extensions/{fqdn}/environmentConfiguration`
    ///
    /// A 404 means there was nothing to delete and is not an error.
    pub fn delete_environment_configuration(&self, fqdn: &str) -> Result<(), ApiError> {
        let url = self.environment_configuration_url(fqdn)?;
        self.delete_tolerating_missing(url)
    }

    /// `DELETE /api/v2/extensions/{fqdn}/{version}`
    ///
    /// A 404 means the version is already gone and is not an error.
    pub fn delete_extension(&self, fqdn: &str, version: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "v2", "extensions", fqdn, version])?;
        self.delete_tolerating_missing(url)
    }

    /// `PUT /api/v2/extensions/{fqdn}/environmentConfiguration`
    ///
    /// Activates `version` of the extension in the tenant.
    pub fn point_environment_configuration_to(
        &self,
        fqdn: &str,
        version: &str,
    ) -> Result<(), ApiError> {
        let url = self.environment_configuration_url(fqdn)?;
        let response = self.send(Method::PUT, &url, Some(json!({ "version": version })))?;

        ensure_success(Method::PUT, &url, &response).inspect_err(log_error_body)
    }

    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        Ok(http::endpoint_url(&self.base_url, segments)?)
    }

    pub(crate) fn send(
        &self,
        method: Method,
        url: &Url,
        body: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        self.transport.execute(ApiRequest {
            method,
            url: url.clone(),
            headers: self.headers.clone(),
            body,
        })
    }

    /// GET, require 2xx, decode
    pub(crate) fn get_json<D: DeserializeOwned>(&self, url: Url) -> Result<D, ApiError> {
        let response = self.send(Method::GET, &url, None)?;
        ensure_success(Method::GET, &url, &response)?;
        response.json(&url)
    }

    fn environment_configuration_url(&self, fqdn: &str) -> Result<Url, ApiError> {
        self.endpoint(&["api", "v2", "extensions", fqdn, "environmentConfiguration"])
    }

    fn delete_tolerating_missing(&self, url: Url) -> Result<(), ApiError> {
        let response = self.send(Method::DELETE, &url, None)?;

        match ensure_success(Method::DELETE, &url, &response) {
            Ok(()) => Ok(()),
            Err(err) if err.is_not_found() => {
                tracing::warn!(%url, body = ?response.json_lossy(), "nothing to delete");
                Ok(())
            }
            Err(err) => {
                log_error_body(&err);
                Err(err)
            }
        }
    }
}

/// Turns a non-2xx response into [`ApiError::Status`]
///
/// The body is decoded only on this error path and only best-effort, so a
/// non-JSON error page never hides the status.
fn ensure_success(method: Method, url: &Url, response: &ApiResponse) -> Result<(), ApiError> {
    if response.status.is_success() {
        return Ok(());
    }

    Err(ApiError::Status {
        method,
        url: url.clone(),
        status: response.status,
        body: response.json_lossy(),
    })
}

fn log_error_body(err: &ApiError) {
    if let ApiError::Status {
        method,
        url,
        status,
        body,
    } = err
    {
        tracing::error!(%method, %url, %status, body = ?body, "request rejected");
    }
}

fn owned(segments: &[&str]) -> Vec<String> {
    segments.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::UrlError;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Transport that replays canned responses and records requests
    #[derive(Default)]
    struct FakeTransport {
        responses: RefCell<VecDeque<(u16, &'static str)>>,
        requests: RefCell<Vec<ApiRequest>>,
    }

    impl FakeTransport {
        fn replying(responses: &[(u16, &'static str)]) -> Self {
            Self {
                responses: RefCell::new(responses.iter().copied().collect()),
                requests: RefCell::default(),
            }
        }
    }

    impl Transport for FakeTransport {
        fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
            self.requests.borrow_mut().push(request);
            let (status, body) = self
                .responses
                .borrow_mut()
                .pop_front()
                .expect("unexpected request");
            Ok(ApiResponse {
                status: StatusCode::from_u16(status).unwrap(),
                body: body.as_bytes().to_vec(),
            })
        }
    }

    fn client(responses: &[(u16, &'static str)]) -> DynatraceClient<FakeTransport> {
        DynatraceClient::new(
            "https://abc.dev.dynatracelabs.com",
            "T",
            FakeTransport::replying(responses),
        )
        .unwrap()
    }

    fn request(client: &DynatraceClient<FakeTransport>, index: usize) -> ApiRequest {
        client.transport().requests.borrow()[index].clone()
    }

    #[test]
    fn test_dev_tenant_construction() {
        let client = DynatraceClient::from_dev_tenant("abc", "T").unwrap();
        assert_eq!(client.base_url(), "https://abc.dev.dynatracelabs.com");
        assert_eq!(client.authorization(), Some("Api-Token T"));
    }

    #[test]
    fn test_tenant_url_is_kept_verbatim() {
        let client = DynatraceClient::from_tenant_url("https://x.live.dynatrace.com/", "T").unwrap();
        assert_eq!(client.base_url(), "https://x.live.dynatrace.com/");
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let result = DynatraceClient::new("https://x", "bad\ntoken", FakeTransport::default());
        assert!(matches!(result, Err(ApiError::InvalidToken)));
    }

    #[test]
    fn test_every_request_is_authorized() {
        let client = client(&[(200, r#"{"id":"a"}"#)]);
        client.acquire_extension_alert("a").unwrap();

        let sent = request(&client, 0);
        assert_eq!(sent.method, Method::GET);
        assert_eq!(
            sent.url.as_str(),
            "https://abc.dev.dynatracelabs.com/api/config/v1/anomalyDetection/metricEvents/a"
        );
        assert_eq!(sent.headers.get(AUTHORIZATION).unwrap(), "Api-Token T");
    }

    #[test]
    fn test_monitoring_configurations_returns_items() {
        let client = client(&[(200, r#"{"items":[{"id":"1"}]}"#)]);
        let items = client
            .acquire_monitoring_configurations("com.example.ext")
            .unwrap();
        assert_eq!(items, vec![json!({"id": "1"})]);
    }

    #[test]
    fn test_environment_configuration_absent_on_404() {
        let client = client(&[(404, "")]);
        assert_eq!(
            client.acquire_environment_configuration("com.example.ext").unwrap(),
            None
        );
    }

    #[test]
    fn test_environment_configuration_errors_on_other_status() {
        let client = client(&[(403, r#"{"error":"forbidden"}"#)]);
        let err = client
            .acquire_environment_configuration("com.example.ext")
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    }

    #[test]
    fn test_delete_extension_tolerates_404() {
        let client = client(&[(404, r#"{"error":{"code":404}}"#)]);
        client.delete_extension("com.example.ext", "1.0.0").unwrap();
        assert_eq!(request(&client, 0).method, Method::DELETE);
    }

    #[test]
    fn test_delete_environment_configuration_non_json_error_keeps_status() {
        let client = client(&[(502, "<html>bad gateway</html>")]);
        let err = client
            .delete_environment_configuration("com.example.ext")
            .unwrap_err();
        match err {
            ApiError::Status { status, body, .. } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(body, None);
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[test]
    fn test_delete_monitoring_configuration_404_is_error() {
        let client = client(&[(404, r#"{"error":"gone"}"#)]);
        let err = client
            .delete_monitoring_configuration("com.example.ext", "cfg-1")
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_dot_segments_never_reach_the_wire() {
        let client = client(&[]);

        let err = client.delete_extension("com.example.ext", "..").unwrap_err();
        assert!(matches!(
            err,
            ApiError::Url(UrlError::InvalidSegment { ref segment }) if segment == ".."
        ));
        assert!(client
            .delete_monitoring_configuration("com.example.ext", ".")
            .is_err());
        assert!(client.delete_environment_configuration("").is_err());

        assert!(client.transport().requests.borrow().is_empty());
    }

    #[test]
    fn test_point_environment_configuration_sends_version() {
        let client = client(&[(200, r#"{"version":"1.2.3"}"#)]);
        client
            .point_environment_configuration_to("com.example.ext", "1.2.3")
            .unwrap();

        let sent = request(&client, 0);
        assert_eq!(sent.method, Method::PUT);
        assert_eq!(sent.body, Some(json!({"version": "1.2.3"})));
    }

    #[test]
    fn test_pages_follow_next_page_key() {
        let client = client(&[
            (200, r#"{"extensions":[{"extensionName":"a"}],"nextPageKey":"K1"}"#),
            (200, r#"{"extensions":[],"nextPageKey":"K2"}"#),
            (200, r#"{"extensions":[{"extensionName":"b"}]}"#),
        ]);
        let names: Vec<Value> = client
            .acquire_extensions()
            .unwrap()
            .into_iter()
            .map(|e| e["extensionName"].clone())
            .collect();
        assert_eq!(names, vec![json!("a"), json!("b")]);

        assert_eq!(request(&client, 0).url.query(), None);
        assert_eq!(request(&client, 1).url.query(), Some("nextPageKey=K1"));
        assert_eq!(request(&client, 2).url.query(), Some("nextPageKey=K2"));
    }

    #[test]
    fn test_pages_stop_after_error() {
        let client = client(&[(200, r#"{"totalCount":0}"#)]);
        let mut pages = client.extension_versions("com.example.ext");
        assert!(matches!(
            pages.next(),
            Some(Err(ApiError::MissingField { field: "extensions", .. }))
        ));
        assert!(pages.next().is_none());
    }
}
