//! Unit tests for http module

use dtcli_api::http::{
    DEFAULT_TIMEOUT, USER_AGENT, add_path_segments, build_client, build_default_client,
    dev_tenant_url, endpoint_url,
};
use std::time::Duration;
use url::Url;

#[test]
fn test_build_client() {
    let client = build_default_client().unwrap();
    assert!(std::mem::size_of_val(&client) > 0);
    assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(30));
}

#[test]
fn test_build_client_with_custom_timeout() {
    assert!(build_client(Duration::from_millis(250)).is_ok());
}

#[test]
fn test_user_agent_names_crate() {
    assert!(USER_AGENT.starts_with("dtcli/"));
}

#[test]
fn test_dev_tenant_url_is_not_normalised() {
    let base = dev_tenant_url("abc");
    assert_eq!(base, "https://abc.dev.dynatracelabs.com");
    assert!(!base.ends_with('/'));
}

#[test]
fn test_endpoint_url_on_root() {
    let url = endpoint_url("https://abc.dev.dynatracelabs.com", &["api", "v2", "extensions"])
        .unwrap();
    assert_eq!(url.as_str(), "https://abc.dev.dynatracelabs.com/api/v2/extensions");
}

#[test]
fn test_add_path_segments_prevents_injection() {
    let mut url = Url::parse("https://abc.dev.dynatracelabs.com").unwrap();
    // A hostile fqdn must stay a single segment
    add_path_segments(&mut url, &["api", "v2", "extensions", "../../config"]).unwrap();
    assert!(url.as_str().contains("%2F"), "slash should be encoded: {url}");
    assert!(url.as_str().starts_with("https://abc.dev.dynatracelabs.com/api/v2/extensions/"));
}
