//! Schema commands

use crate::cli::TenantArgs;
use crate::context::Context;
use crate::output::{print_json, print_text};
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// Execute `dtcli schemas versions`
pub fn versions(args: &TenantArgs, json: bool) -> Result<()> {
    let ctx = Context::new(args)?;
    let versions = ctx.client.schema_versions()?;

    if json {
        return print_json(&versions);
    }

    print_text(&"Schema versions:".bold().to_string())?;
    for version in &versions {
        print_text(&format!("  {version}"))?;
    }
    Ok(())
}

/// Execute `dtcli schemas download [version] [--dir]`
///
/// An unknown version fails the command with the available versions in the
/// error message.
pub fn download(args: &TenantArgs, version: &str, dir: &Path) -> Result<()> {
    let ctx = Context::new(args)?;
    let report = ctx.client.download_schemas(version, dir)?;

    print_text(
        &format!(
            "Downloaded {} schema files for version {} into {}",
            report.files.len(),
            report.version,
            report.directory.display()
        )
        .green()
        .to_string(),
    )?;
    Ok(())
}
