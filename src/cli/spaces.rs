//! `spaces`, `add`, `edit` and `remove`.

use anyhow::{Result, bail};

use super::args::{DraftArgs, EditArgs};
use super::common::save_parameters;
use crate::config::AppConfig;
use crate::engine::Engine;
use crate::link::ValidationOutcome;
use crate::log;
use crate::provider::Connector;
use crate::space::{SpaceConfiguration, SpaceDraft};

pub fn list_spaces<C: Connector>(engine: &Engine<C>, json: bool) -> Result<()> {
    let spaces = engine.list_configured_spaces();

    if json {
        println!("{}", serde_json::to_string_pretty(&spaces)?);
        return Ok(());
    }

    if !engine.is_active() {
        log!("spaces"; "no parameter store yet, add a space with `xspace add`");
        return Ok(());
    }
    if spaces.is_empty() {
        log!("spaces"; "no spaces configured");
        return Ok(());
    }

    let width = spaces.iter().map(|s| s.id.len()).max().unwrap_or(0);
    for space in &spaces {
        println!("{:width$}  {}", space.id, space.label());
    }
    Ok(())
}

pub async fn add_space<C: Connector>(
    engine: &Engine<C>,
    config: &AppConfig,
    args: &DraftArgs,
) -> Result<()> {
    let draft = SpaceDraft::new(
        &args.space_id,
        &args.token,
        args.environment.as_deref().unwrap_or_default(),
    );
    let outcome = engine.validate_and_save(&draft, None).await?;
    let added = accepted(outcome)?;

    save_parameters(engine, config)?;
    log!("spaces"; "added {} as `{}`", added.summary().label(), added.id);
    Ok(())
}

pub async fn edit_space<C: Connector>(
    engine: &Engine<C>,
    config: &AppConfig,
    id: &str,
    changes: &EditArgs,
) -> Result<()> {
    let Some(existing) = engine.snapshot().registry.get(id).cloned() else {
        bail!("no space configuration with id `{id}`");
    };

    let current = SpaceDraft::from_config(&existing);
    let draft = SpaceDraft::new(
        changes.space_id.as_deref().unwrap_or(&current.space_id),
        changes.token.as_deref().unwrap_or(&current.token),
        changes.environment.as_deref().unwrap_or(&current.environment),
    );
    let outcome = engine.validate_and_save(&draft, Some(id)).await?;
    let updated = accepted(outcome)?;

    save_parameters(engine, config)?;
    if updated.id == id {
        log!("spaces"; "updated `{}`", id);
    } else {
        log!("spaces"; "updated `{}`, now `{}`", id, updated.id);
    }
    Ok(())
}

pub fn remove_space<C: Connector>(engine: &Engine<C>, config: &AppConfig, id: &str) -> Result<()> {
    let removed = engine.remove_space(id)?;
    save_parameters(engine, config)?;
    log!("spaces"; "removed {}", removed.summary().label());

    if engine.list_configured_spaces().is_empty() {
        log!("warning"; "{}", crate::error::ConfigurationError::Empty);
    }
    Ok(())
}

/// Report field errors and turn a rejection into an error.
fn accepted(outcome: ValidationOutcome) -> Result<SpaceConfiguration> {
    match outcome {
        ValidationOutcome::Accepted { config } => Ok(config),
        ValidationOutcome::Invalid { errors } => {
            for error in &errors {
                log!("error"; "{}: {}", error.field, error.message);
            }
            bail!("space configuration rejected");
        }
        ValidationOutcome::Unreachable { message } => {
            bail!("could not reach the content provider: {message}");
        }
    }
}
