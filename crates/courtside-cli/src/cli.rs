//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Courtside - Browse the league admin audit log
#[derive(Parser)]
#[command(name = "courtside")]
#[command(about = "Admin audit log viewer for the league dashboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ~/.config/courtside/config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Admin API base URL (overrides config and COURTSIDE_API_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Session cookie sent with every request (overrides COURTSIDE_SESSION)
    ///
    /// Pass the raw Cookie header value, e.g. "connect.sid=s%3A...".
    #[arg(long, global = true)]
    pub session: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filters shared by every command that loads a page of the log
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Free-text search over descriptions and admins
    #[arg(short, long)]
    pub search: Option<String>,

    /// Action type, e.g. PLAYER_BAN (see `courtside types`)
    #[arg(short, long)]
    pub action: Option<String>,

    /// Target type, e.g. PLAYER (see `courtside types`)
    #[arg(short, long)]
    pub target: Option<String>,

    /// First day to include (YYYY-MM-DD, UTC)
    #[arg(long)]
    pub from: Option<String>,

    /// Last day to include (YYYY-MM-DD, UTC)
    #[arg(long)]
    pub to: Option<String>,

    /// Page number
    #[arg(short, long, default_value = "1")]
    pub page: u32,

    /// Entries per page (defaults to the configured page_limit)
    #[arg(short, long)]
    pub limit: Option<u32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List audit log entries
    Logs {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print the raw entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one entry with its before/after diff
    Show {
        /// Entry ID (must be on the page selected by the filters)
        id: String,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Export the selected page to CSV or JSON
    Export {
        #[command(flatten)]
        filters: FilterArgs,

        /// Output format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the action and target types available as filters
    Types,
}
