//! CLI command structure using clap

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dtcli")]
#[command(version, about = "Manage Dynatrace extensions and their configurations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub tenant: TenantArgs,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Tenant selection, overriding the config file
#[derive(Args, Debug, Clone, Default)]
pub struct TenantArgs {
    /// Development tenant name (https://{name}.dev.dynatracelabs.com)
    #[arg(long, global = true, env = "DT_TENANT")]
    pub tenant: Option<String>,

    /// Complete tenant URL, used as given
    #[arg(long, global = true, env = "DT_TENANT_URL")]
    pub tenant_url: Option<String>,

    /// API token
    #[arg(long, global = true, env = "DT_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Metric event alerts
    #[command(subcommand)]
    Alert(AlertCommands),

    /// Uploaded extensions
    #[command(subcommand)]
    Extension(ExtensionCommands),

    /// Active extension version in the environment
    #[command(subcommand)]
    EnvConfig(EnvConfigCommands),

    /// Monitoring configurations of an extension
    #[command(subcommand)]
    Monitoring(MonitoringCommands),

    /// Extension schemas
    #[command(subcommand)]
    Schemas(SchemaCommands),
}

#[derive(Subcommand)]
pub enum AlertCommands {
    /// Show a metric event configuration
    Get {
        /// Metric event id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ExtensionCommands {
    /// List extensions installed in the tenant
    List {
        #[arg(long)]
        json: bool,
    },

    /// List uploaded versions of an extension
    Versions {
        /// Extension name (e.g., "com.dynatrace.extension.snmp-generic")
        fqdn: String,

        #[arg(long)]
        json: bool,
    },

    /// Delete one version of an extension
    Delete { fqdn: String, version: String },
}

#[derive(Subcommand)]
pub enum EnvConfigCommands {
    /// Show the active version (null if none)
    Get { fqdn: String },

    /// Activate a version
    Set { fqdn: String, version: String },

    /// Deactivate the extension
    Delete { fqdn: String },
}

#[derive(Subcommand)]
pub enum MonitoringCommands {
    /// List monitoring configurations
    List {
        fqdn: String,

        #[arg(long)]
        json: bool,
    },

    /// Delete a monitoring configuration
    Delete {
        fqdn: String,

        /// Monitoring configuration id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum SchemaCommands {
    /// List schema versions offered by the tenant
    Versions {
        #[arg(long)]
        json: bool,
    },

    /// Download every schema file of a version
    Download {
        /// "latest" or a version prefix (e.g., "1.250")
        #[arg(default_value = "latest")]
        version: String,

        /// Target directory
        #[arg(short, long, default_value = "schemas")]
        dir: PathBuf,
    },
}
