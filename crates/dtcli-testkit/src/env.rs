//! Environment isolation utilities for testing
//!
//! Tests that read or write process environment variables must hold
//! [`ENV_LOCK`] so they do not interfere with each other when run in parallel.

use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Static mutex to serialize tests that modify environment variables
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Variables that select a tenant or point at a config file
pub const ISOLATED_VARS: &[&str] = &[
    "DT_TENANT",
    "DT_TENANT_URL",
    "DT_API_TOKEN",
    "DTCLI_CONFIG",
];

/// Run a test with an isolated dtcli environment
///
/// This helper:
/// 1. Creates an isolated HOME / XDG_CONFIG_HOME directory
/// 2. Clears the tenant, token and config variables listed in [`ISOLATED_VARS`]
/// 3. Serializes access through [`ENV_LOCK`]
/// 4. Restores everything afterwards
///
/// The closure receives the fake home directory.
///
/// # Examples
///
/// ```no_run
/// use dtcli_testkit::with_isolated_env;
///
/// fn test_no_tenant_configured() {
///     with_isolated_env(|home| {
///         // No DT_* variables are visible here and no config file exists
///         assert!(std::env::var("DT_API_TOKEN").is_err());
///         assert!(home.exists());
///     });
/// }
/// ```
pub fn with_isolated_env<F, R>(f: F) -> R
where
    F: FnOnce(&Path) -> R,
{
    let _guard = ENV_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let mut names: Vec<&str> = vec!["HOME", "XDG_CONFIG_HOME"];
    names.extend_from_slice(ISOLATED_VARS);
    let original: Vec<(&str, Option<String>)> = names
        .iter()
        .map(|name| (*name, std::env::var(name).ok()))
        .collect();

    let fake_home = TempDir::new().unwrap();
    let fake_config = fake_home.path().join(".config");
    std::fs::create_dir_all(&fake_config).unwrap();

    // SAFETY: We hold ENV_LOCK, ensuring no other test is modifying env vars concurrently.
    unsafe {
        std::env::set_var("HOME", fake_home.path());
        std::env::set_var("XDG_CONFIG_HOME", &fake_config);
        for name in ISOLATED_VARS {
            std::env::remove_var(name);
        }
    }

    let result = f(fake_home.path());

    drop(fake_home);

    // SAFETY: We still hold ENV_LOCK, ensuring exclusive access to env vars.
    unsafe {
        for (name, value) in original {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_isolated_env_clears_tenant_vars() {
        with_isolated_env(|home| {
            assert!(home.exists(), "Fake home should exist");
            for name in ISOLATED_VARS {
                assert!(std::env::var(name).is_err(), "{name} should be cleared");
            }
            assert_eq!(
                std::env::var("HOME").unwrap(),
                home.to_string_lossy(),
                "HOME should point to the fake home"
            );
        });
    }

    #[test]
    fn test_with_isolated_env_restores_original_env() {
        let original_home = std::env::var("HOME").ok();

        with_isolated_env(|_home| {
            // SAFETY: ENV_LOCK is held by with_isolated_env
            unsafe {
                std::env::set_var("DT_API_TOKEN", "leak");
            }
        });

        assert_eq!(std::env::var("HOME").ok(), original_home, "HOME should be restored");
        assert_ne!(
            std::env::var("DT_API_TOKEN").ok().as_deref(),
            Some("leak"),
            "Variables set inside should not leak"
        );
    }
}
