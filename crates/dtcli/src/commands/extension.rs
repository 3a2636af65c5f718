//! Extension commands (thin endpoint layer)

use crate::cli::TenantArgs;
use crate::context::Context;
use crate::output::{field, print_json, print_list, print_text};
use anyhow::Result;
use colored::Colorize;
use serde_json::Value;

/// Execute `dtcli extension list`
pub fn list(args: &TenantArgs, json: bool) -> Result<()> {
    let ctx = Context::new(args)?;
    let extensions = ctx.client.acquire_extensions()?;

    if json {
        print_json(&extensions)
    } else {
        print_extensions("Extensions:", &extensions)
    }
}

/// Execute `dtcli extension versions <fqdn>`
pub fn versions(args: &TenantArgs, fqdn: &str, json: bool) -> Result<()> {
    let ctx = Context::new(args)?;
    let versions = ctx.client.acquire_extension_versions(fqdn)?;

    if json {
        print_json(&versions)
    } else {
        print_extensions(&format!("Versions of {fqdn}:"), &versions)
    }
}

/// Execute `dtcli extension delete <fqdn> <version>`
pub fn delete(args: &TenantArgs, fqdn: &str, version: &str) -> Result<()> {
    let ctx = Context::new(args)?;
    ctx.client.delete_extension(fqdn, version)?;

    print_text(&format!("Deleted {fqdn} {version}").green().to_string())?;
    Ok(())
}

fn print_extensions(title: &str, extensions: &[Value]) -> Result<()> {
    print_list(title, extensions, |extension| {
        format!(
            "{} {}",
            field(extension, "extensionName", "?"),
            field(extension, "version", "?")
        )
    })?;
    Ok(())
}
