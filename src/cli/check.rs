//! `check`: the installation is usable and every space answers.

use anyhow::{Result, bail};

use crate::engine::Engine;
use crate::link::{ValidationOutcome, validate_config};
use crate::log;
use crate::logger::StatusLine;
use crate::provider::Connector;
use crate::space::SpaceDraft;

pub async fn check_installation<C: Connector>(engine: &Engine<C>) -> Result<()> {
    engine.check_installable()?;

    let snapshot = engine.snapshot();
    let spaces = snapshot.registry.all();
    let mut failed = 0;

    for space in spaces {
        let label = space.summary().label();
        let mut status = StatusLine::new();
        status.pending(&format!("checking {label}"));

        let draft = SpaceDraft::from_config(space);
        match validate_config(&draft, engine.clients().connector()).await {
            ValidationOutcome::Accepted { config } if config.name == space.name => {
                status.success(&label);
            }
            ValidationOutcome::Accepted { config } => {
                status.success(&format!("{label} (now named \"{}\")", config.name));
            }
            ValidationOutcome::Invalid { errors } => {
                failed += 1;
                let detail = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join("\n");
                status.error(&label, &detail);
            }
            ValidationOutcome::Unreachable { message } => {
                failed += 1;
                status.error(&label, &message);
            }
        }
        status.detach();
    }

    if failed > 0 {
        bail!("{failed} of {} spaces failed the credential check", spaces.len());
    }
    log!("check"; "{} spaces ready", spaces.len());
    Ok(())
}
