//! Environment configuration commands

use crate::cli::TenantArgs;
use crate::context::Context;
use crate::output::{print_json, print_text};
use anyhow::Result;
use colored::Colorize;

/// Execute `dtcli env-config get <fqdn>`
///
/// Prints `null` when the extension has no active version.
pub fn get(args: &TenantArgs, fqdn: &str) -> Result<()> {
    let ctx = Context::new(args)?;
    let config = ctx.client.acquire_environment_configuration(fqdn)?;
    print_json(&config)
}

/// Execute `dtcli env-config set <fqdn> <version>`
pub fn set(args: &TenantArgs, fqdn: &str, version: &str) -> Result<()> {
    let ctx = Context::new(args)?;
    ctx.client.point_environment_configuration_to(fqdn, version)?;

    print_text(&format!("{fqdn} now points to {version}").green().to_string())?;
    Ok(())
}

/// Execute `dtcli env-config delete <fqdn>`
pub fn delete(args: &TenantArgs, fqdn: &str) -> Result<()> {
    let ctx = Context::new(args)?;
    ctx.client.delete_environment_configuration(fqdn)?;

    print_text(&format!("Environment configuration of {fqdn} removed").green().to_string())?;
    Ok(())
}
