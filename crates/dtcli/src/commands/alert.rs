//! Alert commands

use crate::cli::TenantArgs;
use crate::context::Context;
use crate::output::print_json;
use anyhow::Result;

/// Execute `dtcli alert get <id>`
pub fn get(args: &TenantArgs, id: &str) -> Result<()> {
    let ctx = Context::new(args)?;
    let alert = ctx.client.acquire_extension_alert(id)?;
    print_json(&alert)
}
