//! Mock server infrastructure for testing
//!
//! A single mockito server shared by every test in a binary. Tests keep their
//! mocks apart by using distinct paths (e.g. a different extension fqdn each).

use lazy_static::lazy_static;
use mockito::{Mock, Server, ServerGuard};
use std::sync::Mutex;

lazy_static! {
    /// Global shared mockito server for all tests
    pub static ref SHARED_MOCK_SERVER: Mutex<ServerGuard> = Mutex::new(Server::new());
}

/// Get reference to shared mock server
///
/// Acquire the lock only while creating mocks, not for the whole test, so
/// other tests can keep using the server.
///
/// # Examples
///
/// ```no_run
/// use dtcli_testkit::get_shared_mock_server;
///
/// fn test_with_shared_server() {
///     let (url, _mock) = {
///         let mut server = get_shared_mock_server();
///         let mock = server
///             .mock("GET", "/api/v2/extensions/com.unique.ext")
///             .with_status(200)
///             .create();
///         (server.url(), mock)
///     }; // Lock released here
///     // ... point a client at `url` ...
/// }
/// ```
pub fn get_shared_mock_server() -> std::sync::MutexGuard<'static, ServerGuard> {
    SHARED_MOCK_SERVER
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Mocks a JSON response on the shared server
///
/// Returns the server URL and the mock; the mock is removed when dropped.
pub fn mock_json(method: &str, path: &str, status: usize, body: &str) -> (String, Mock) {
    let mut server = get_shared_mock_server();
    let mock = server
        .mock(method, path)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create();
    (server.url(), mock)
}
