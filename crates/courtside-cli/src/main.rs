//! Courtside CLI - League admin audit log viewer
//!
//! Usage:
//!   courtside logs --action PLAYER_BAN      List matching entries
//!   courtside show <id>                     Show one entry with its diff
//!   courtside export --format csv -o x.csv  Export the loaded page
//!   courtside types                         List filterable types

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so exported data on stdout stays clean
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    let config = commands::load_config(
        cli.config.as_deref(),
        cli.base_url.as_deref(),
        cli.session.as_deref(),
    )?;
    let api = commands::build_api(&config)?;

    match cli.command {
        Commands::Logs { filters, json } => {
            let filters = commands::filter_state(&filters, config.page_limit)?;
            commands::cmd_logs(api, filters, json).await
        }
        Commands::Show { id, filters } => {
            let filters = commands::filter_state(&filters, config.page_limit)?;
            commands::cmd_show(api, filters, &id).await
        }
        Commands::Export {
            filters,
            format,
            output,
        } => {
            let filters = commands::filter_state(&filters, config.page_limit)?;
            commands::cmd_export(api, filters, &format, output.as_deref()).await
        }
        Commands::Types => commands::cmd_types(api).await,
    }
}
