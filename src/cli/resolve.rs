//! `resolve`: hydrate a stored field value.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use super::common::read_input;
use crate::card::EntryCard;
use crate::engine::Engine;
use crate::provider::Connector;
use crate::resolve::{CrossSpaceLink, ResolveOutcome};
use crate::log;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Resolution {
    link: CrossSpaceLink,
    #[serde(skip_serializing_if = "Option::is_none")]
    card: Option<EntryCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    edit_url: Option<String>,
    outcome: ResolveOutcome,
}

pub async fn resolve_field<C: Connector>(
    engine: &Engine<C>,
    input: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let text = read_input(input)?;
    let value: Value = serde_json::from_str(&text).context("field value is not valid JSON")?;
    let link = CrossSpaceLink::from_field_value(&value)
        .context("field value is not a cross-space link")?;

    let outcome = engine.resolve_link(&link).await;
    if outcome.is_resolved() {
        log!("resolve"; "{} in {}: {}", link.id, link.config_id(), outcome.summary());
    } else {
        log!("warning"; "{}", outcome.summary());
    }

    let resolution = Resolution {
        card: outcome.data().map(|data| data.card()),
        edit_url: engine.edit_url(&link).map(String::from),
        link,
        outcome,
    };
    let json = if pretty {
        serde_json::to_string_pretty(&resolution)?
    } else {
        serde_json::to_string(&resolution)?
    };
    println!("{json}");
    Ok(())
}
