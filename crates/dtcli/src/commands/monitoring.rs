//! Monitoring configuration commands

use crate::cli::TenantArgs;
use crate::context::Context;
use crate::output::{field, print_json, print_list, print_text};
use anyhow::Result;
use colored::Colorize;

/// Execute `dtcli monitoring list <fqdn>`
pub fn list(args: &TenantArgs, fqdn: &str, json: bool) -> Result<()> {
    let ctx = Context::new(args)?;
    let configurations = ctx.client.acquire_monitoring_configurations(fqdn)?;

    if json {
        return print_json(&configurations);
    }

    print_list(
        &format!("Monitoring configurations of {fqdn}:"),
        &configurations,
        |configuration| {
            let id = configuration["objectId"]
                .as_str()
                .unwrap_or_else(|| field(configuration, "id", "?"));
            format!("{id} {}", field(configuration, "scope", "-"))
        },
    )?;

    Ok(())
}

/// Execute `dtcli monitoring delete <fqdn> <id>`
pub fn delete(args: &TenantArgs, fqdn: &str, id: &str) -> Result<()> {
    let ctx = Context::new(args)?;
    ctx.client.delete_monitoring_configuration(fqdn, id)?;

    print_text(&format!("Deleted monitoring configuration {id}").green().to_string())?;
    Ok(())
}
