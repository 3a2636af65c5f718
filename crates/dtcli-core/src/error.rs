use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DtcliError {
    // Config errors
    #[error("CONFIG_PARSE_ERROR: failed to read {path}: {reason}")]
    ConfigParseError { path: PathBuf, reason: String },

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // Tenant selection errors
    #[error(
        "TENANT_MISSING: no tenant selected (use --tenant, --tenant-url, DT_TENANT, DT_TENANT_URL or [tenant] in the config file)"
    )]
    TenantMissing,

    #[error("TENANT_CONFLICT: both tenant name '{name}' and tenant URL '{url}' are set")]
    TenantConflict { name: String, url: String },

    #[error("TOKEN_MISSING: no API token (use --token, DT_API_TOKEN or [tenant] token)")]
    TokenMissing,
}

pub type Result<T> = std::result::Result<T, DtcliError>;
