//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::sync::MAPPINGS_FILENAME;

/// Mailsync - push local HTML email templates to a transactional email provider.
#[derive(Debug, Parser)]
#[command(name = "mailsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress info events (errors are still emitted)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Push local templates to the provider, creating or updating each one
    Sync(SyncArgs),

    /// Print the provider's existing templates as JSON lines
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `sync` command.
#[derive(Debug, Clone, clap::Args)]
pub struct SyncArgs {
    /// Provider API key
    #[arg(long, env = "MAILSYNC_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Provider API base URL
    #[arg(
        long,
        env = "MAILSYNC_API_URL",
        default_value = "https://mandrillapp.com/api/1.0"
    )]
    pub api_url: String,

    /// Directory holding one body file per template
    #[arg(short, long)]
    pub templates_dir: PathBuf,

    /// Sender address used when the remote record and the mapping file
    /// supply none
    #[arg(long)]
    pub default_sender: String,

    /// Suffix appended to every template name (e.g. _staging)
    #[arg(long, default_value = "")]
    pub suffix: String,

    /// Labels attached to every deployed template (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub labels: Vec<String>,

    /// Filename of the override mapping file inside the templates directory
    #[arg(long, default_value = MAPPINGS_FILENAME)]
    pub mappings_file: String,

    /// Report what would be created or updated without calling the API
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ListArgs {
    /// Provider API key
    #[arg(long, env = "MAILSYNC_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Provider API base URL
    #[arg(
        long,
        env = "MAILSYNC_API_URL",
        default_value = "https://mandrillapp.com/api/1.0"
    )]
    pub api_url: String,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
