mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use cli::{
    AlertCommands, Cli, Commands, EnvConfigCommands, ExtensionCommands, MonitoringCommands,
    SchemaCommands,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let tenant = &cli.tenant;
    let result = match cli.command {
        Commands::Alert(alert_cmd) => match alert_cmd {
            AlertCommands::Get { id } => commands::alert::get(tenant, &id),
        },
        Commands::Extension(extension_cmd) => match extension_cmd {
            ExtensionCommands::List { json } => commands::extension::list(tenant, json),
            ExtensionCommands::Versions { fqdn, json } => {
                commands::extension::versions(tenant, &fqdn, json)
            }
            ExtensionCommands::Delete { fqdn, version } => {
                commands::extension::delete(tenant, &fqdn, &version)
            }
        },
        Commands::EnvConfig(env_cmd) => match env_cmd {
            EnvConfigCommands::Get { fqdn } => commands::env_config::get(tenant, &fqdn),
            EnvConfigCommands::Set { fqdn, version } => {
                commands::env_config::set(tenant, &fqdn, &version)
            }
            EnvConfigCommands::Delete { fqdn } => commands::env_config::delete(tenant, &fqdn),
        },
        Commands::Monitoring(monitoring_cmd) => match monitoring_cmd {
            MonitoringCommands::List { fqdn, json } => {
                commands::monitoring::list(tenant, &fqdn, json)
            }
            MonitoringCommands::Delete { fqdn, id } => {
                commands::monitoring::delete(tenant, &fqdn, &id)
            }
        },
        Commands::Schemas(schema_cmd) => match schema_cmd {
            SchemaCommands::Versions { json } => commands::schemas::versions(tenant, json),
            SchemaCommands::Download { version, dir } => {
                commands::schemas::download(tenant, &version, &dir)
            }
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing on stderr so stdout stays machine-readable
///
/// `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn,dtcli=info,dtcli_api=info"),
        1 => EnvFilter::new("info,dtcli=debug,dtcli_api=debug"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
