//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::engine::Engine;
use crate::provider::{Connector, HttpConnector};
use crate::space::{load_parameters, persist_parameters};

/// Engine wired to the parameter store named by `config`.
pub fn open_engine(config: &AppConfig) -> Result<Engine<HttpConnector>> {
    let path = config.parameters_path();
    let parameters = load_parameters(&path)
        .with_context(|| format!("failed to read parameters from {}", path.display()))?;
    Ok(Engine::new(
        config.engine_settings()?,
        parameters,
        config.connector()?,
    ))
}

/// Write the engine's registry back to the parameter store.
pub fn save_parameters<C: Connector>(engine: &Engine<C>, config: &AppConfig) -> Result<()> {
    let path = config.parameters_path();
    persist_parameters(&engine.parameters(), &path)
        .with_context(|| format!("failed to write parameters to {}", path.display()))
}

/// Read a file, or stdin when `path` is `None` or `-`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Display form of a path relative to cwd when possible.
pub fn display_path(path: &Path) -> PathBuf {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
}
