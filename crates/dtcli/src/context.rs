//! Global context for CLI commands

use crate::cli::TenantArgs;
use anyhow::{Context as _, Result};
use dtcli_api::DynatraceClient;
use dtcli_api::http::dev_tenant_url;
use dtcli_core::config::{Config, Overrides, TenantTarget};

/// Global context containing the resolved tenant client
pub struct Context {
    pub client: DynatraceClient,
}

impl Context {
    /// Create a new context from flags, environment and config file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - No tenant or no token is configured, or two tenants are
    /// - The HTTP client cannot be built
    pub fn new(args: &TenantArgs) -> Result<Self> {
        let config = Config::load()?;

        let overrides = Overrides {
            tenant: args.tenant.clone(),
            tenant_url: args.tenant_url.clone(),
            token: args.token.clone(),
        };
        let connection = config.resolve(&overrides)?;

        let base_url = match &connection.target {
            TenantTarget::Dev(name) => dev_tenant_url(name),
            TenantTarget::Url(url) => url.clone(),
        };
        tracing::debug!(%base_url, timeout = ?connection.timeout, "using tenant");

        let client = DynatraceClient::with_timeout(&base_url, &connection.token, connection.timeout)
            .context("Failed to create API client")?;

        Ok(Self { client })
    }
}
