//! Tenant selection from command line, environment and config file

use super::model::Config;
use crate::error::{DtcliError, Result};
use std::fmt;
use std::time::Duration;

/// Values given on the command line or through `DT_*` variables
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub tenant: Option<String>,
    pub tenant_url: Option<String>,
    pub token: Option<String>,
}

/// Where requests go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantTarget {
    /// Development tenant by name
    Dev(String),
    /// Complete tenant URL, used verbatim
    Url(String),
}

/// Everything needed to build an API client
#[derive(Clone, PartialEq, Eq)]
pub struct Connection {
    pub target: TenantTarget,
    pub token: String,
    pub timeout: Duration,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("target", &self.target)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Merges overrides over the file values
    ///
    /// A tenant given as override replaces both tenant keys of the file, so a
    /// `--tenant` flag never conflicts with a `url` in the config file.
    pub fn resolve(&self, overrides: &Overrides) -> Result<Connection> {
        let from_overrides = pick_target(
            non_empty(&overrides.tenant),
            non_empty(&overrides.tenant_url),
        )?;
        let target = match from_overrides {
            Some(target) => target,
            None => pick_target(non_empty(&self.tenant.name), non_empty(&self.tenant.url))?
                .ok_or(DtcliError::TenantMissing)?,
        };

        let token = non_empty(&overrides.token)
            .or_else(|| non_empty(&self.tenant.token))
            .ok_or(DtcliError::TokenMissing)?
            .to_string();

        Ok(Connection {
            target,
            token,
            timeout: self.http.timeout(),
        })
    }
}

fn pick_target(name: Option<&str>, url: Option<&str>) -> Result<Option<TenantTarget>> {
    match (name, url) {
        (Some(name), Some(url)) => Err(DtcliError::TenantConflict {
            name: name.to_string(),
            url: url.to_string(),
        }),
        (Some(name), None) => Ok(Some(TenantTarget::Dev(name.to_string()))),
        (None, Some(url)) => Ok(Some(TenantTarget::Url(url.to_string()))),
        (None, None) => Ok(None),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
