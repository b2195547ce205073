//! xspace - link entries that live in other content spaces.

#![allow(dead_code)]

mod card;
mod cli;
mod client;
mod config;
mod engine;
mod error;
mod link;
mod logger;
mod provider;
mod resolve;
mod search;
mod space;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::AppConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = AppConfig::load(&cli)?;

    // Single-threaded: every remote call is a suspension point, nothing blocks.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(run(&cli, &config))
}

async fn run(cli: &Cli, config: &AppConfig) -> Result<()> {
    let engine = cli::common::open_engine(config)?;
    debug!(
        "config";
        "parameters at {}",
        cli::common::display_path(&config.parameters_path()).display()
    );

    match &cli.command {
        Commands::Spaces { json } => cli::spaces::list_spaces(&engine, *json),
        Commands::Add { draft } => cli::spaces::add_space(&engine, config, draft).await,
        Commands::Edit { id, changes } => {
            cli::spaces::edit_space(&engine, config, id, changes).await
        }
        Commands::Remove { id } => cli::spaces::remove_space(&engine, config, id),
        Commands::Check => cli::check::check_installation(&engine).await,
        Commands::Resolve { input, pretty } => {
            cli::resolve::resolve_field(&engine, input.as_deref(), *pretty).await
        }
        Commands::Pick {
            id,
            query,
            content_type,
        } => {
            cli::pick::pick_entry(&engine, id, query.as_deref(), content_type.as_deref()).await
        }
    }
}
