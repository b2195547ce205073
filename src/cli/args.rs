//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Link entries that live in other content spaces
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: xspace.toml)
    #[arg(short = 'C', long, global = true, default_value = "xspace.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Installation parameter file, overrides `[storage] parameters`
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub parameters: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List configured spaces
    #[command(visible_alias = "ls")]
    Spaces {
        /// Print JSON instead of a table
        #[arg(short, long)]
        json: bool,
    },

    /// Add a space after checking its credentials
    #[command(visible_alias = "a")]
    Add {
        #[command(flatten)]
        draft: DraftArgs,
    },

    /// Change the credentials or environment of a configured space
    #[command(visible_alias = "e")]
    Edit {
        /// Composite id, e.g. `abc123-master`
        id: String,

        #[command(flatten)]
        changes: EditArgs,
    },

    /// Remove a configured space
    #[command(visible_alias = "rm")]
    Remove {
        /// Composite id, e.g. `abc123-master`
        id: String,
    },

    /// Check that the installation is usable and every space is reachable
    #[command(visible_alias = "c")]
    Check,

    /// Hydrate a stored field value
    #[command(visible_alias = "r")]
    Resolve {
        /// File holding the field value. Omit or use `-` for stdin.
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Search a space interactively and print the new field value
    #[command(visible_alias = "p")]
    Pick {
        /// Composite id of the space to search
        id: String,

        /// Initial query
        #[arg(short, long)]
        query: Option<String>,

        /// Initial content type filter (`any` for all)
        #[arg(short = 't', long = "type")]
        content_type: Option<String>,
    },
}

/// Credentials of a new space.
#[derive(clap::Args, Debug, Clone)]
pub struct DraftArgs {
    #[arg(short, long)]
    pub space_id: String,

    /// Content delivery access token
    #[arg(short, long)]
    pub token: String,

    /// Environment (default: master)
    #[arg(short, long)]
    pub environment: Option<String>,
}

/// Fields to change on an existing space. Omitted fields keep their value.
#[derive(clap::Args, Debug, Clone)]
pub struct EditArgs {
    #[arg(short, long)]
    pub space_id: Option<String>,

    #[arg(short, long)]
    pub token: Option<String>,

    #[arg(short, long)]
    pub environment: Option<String>,
}
