//! `pick`: line-driven entry picker.
//!
//! Plain lines set the query. Commands:
//!
//! | Line           | Effect                              |
//! |----------------|-------------------------------------|
//! | `:type <id>`   | filter by content type (`any` = all) |
//! | `:types`       | list filter options                 |
//! | `:select <n>`  | select the n-th result              |
//! | `:insert`      | finish with the selection           |
//! | `:cancel`      | finish without a link               |

use std::io::{self, BufRead};
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{mpsc, watch};

use crate::card::entry_card;
use crate::engine::Engine;
use crate::logger::StatusLine;
use crate::provider::{Connector, RemoteContentType};
use crate::search::{
    ContentTypeFilter, FilterOption, PickerInput, SearchPhase, SearchView, content_type_options,
    pick,
};
use crate::{debug, log};

/// One parsed stdin line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Input(PickerInput),
    SelectIndex(usize),
    Types,
    Invalid(String),
}

fn parse_line(line: &str) -> Line {
    let Some(command) = line.strip_prefix(':') else {
        return Line::Input(PickerInput::Query(line.to_string()));
    };
    let (name, arg) = command
        .split_once(char::is_whitespace)
        .map_or((command, ""), |(name, arg)| (name, arg.trim()));

    match name {
        "type" => Line::Input(PickerInput::ContentType(ContentTypeFilter::parse(arg))),
        "types" => Line::Types,
        "select" => match arg.parse::<usize>() {
            Ok(n) if n > 0 => Line::SelectIndex(n - 1),
            _ => Line::Invalid(format!("expected a result number, got `{arg}`")),
        },
        "insert" => Line::Input(PickerInput::Insert),
        "cancel" | "q" => Line::Input(PickerInput::Cancel),
        _ => Line::Invalid(format!("unknown command `:{name}`")),
    }
}

pub async fn pick_entry<C: Connector>(
    engine: &Engine<C>,
    id: &str,
    query: Option<&str>,
    content_type: Option<&str>,
) -> Result<()> {
    let session = engine.search(id)?;
    let types = session.content_types().await;
    let options = content_type_options(&types);
    log!("search"; "searching {}", session.space().summary().label());

    if let Some(filter) = content_type.map(ContentTypeFilter::parse) {
        session.set_content_type(filter).await;
    }
    if let Some(query) = query {
        session.set_query(query).await;
    }

    let (tx, rx) = mpsc::channel(16);
    spawn_input(tx, session.subscribe(), options);

    let mut status = StatusLine::new();
    let link = pick(session, rx, |view| render(&mut status, view, &types)).await;

    match link {
        Some(link) => {
            status.detach();
            println!("{}", serde_json::to_string_pretty(&link.to_field_value())?);
        }
        None => log!("search"; "cancelled"),
    }
    Ok(())
}

/// Read stdin on a blocking thread and forward commands in order.
///
/// `:select <n>` waits for pending searches so it refers to the results the
/// user is about to see.
fn spawn_input(
    tx: mpsc::Sender<PickerInput>,
    mut view: watch::Receiver<SearchView>,
    options: Vec<FilterOption>,
) {
    let (lines_tx, mut lines) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if lines_tx.send(line).is_err() {
                break;
            }
        }
    });

    tokio::spawn(async move {
        while let Some(line) = lines.recv().await {
            let input = match parse_line(line.trim_end()) {
                Line::Input(input) => input,
                Line::Types => {
                    for option in &options {
                        eprintln!("  {:<16} {}", option.filter.value(), option.label);
                    }
                    continue;
                }
                Line::SelectIndex(index) => {
                    let settled = view
                        .wait_for(|v| !matches!(v.phase, SearchPhase::Debouncing | SearchPhase::Querying))
                        .await;
                    let Ok(settled) = settled else { break };
                    match settled.entries.get(index) {
                        Some(entry) => PickerInput::Select(entry.id().to_string()),
                        None => {
                            log!("warning"; "no result #{}", index + 1);
                            continue;
                        }
                    }
                }
                Line::Invalid(message) => {
                    log!("warning"; "{}", message);
                    continue;
                }
            };
            if tx.send(input).await.is_err() {
                break;
            }
        }
        debug!("search"; "input closed");
    });
}

fn render(status: &mut StatusLine, view: &SearchView, types: &Arc<[RemoteContentType]>) {
    if let Some(empty) = view.empty_state() {
        status.hint(empty.message());
        return;
    }

    match &view.phase {
        SearchPhase::Debouncing | SearchPhase::Querying => {
            status.pending(&format!("searching for \"{}\"", view.query.trim()));
        }
        SearchPhase::Failed(message) => status.error("search failed", message),
        SearchPhase::Idle | SearchPhase::Empty | SearchPhase::Results => {
            status.success(&results(view, types));
        }
    }
}

fn results(view: &SearchView, types: &[RemoteContentType]) -> String {
    let selected = view.selected_id();
    let mut lines = vec![format!("{} entries for \"{}\"", view.entries.len(), view.query.trim())];

    for (i, entry) in view.entries.iter().enumerate() {
        let marker = if selected == Some(entry.id()) { '*' } else { ' ' };
        let line = match entry_card(entry, types, None) {
            Some(card) => format!("{marker}{:>3}. {} ({})", i + 1, card.title, card.content_type),
            None => format!("{marker}{:>3}. {}", i + 1, entry.id()),
        };
        lines.push(line);
    }
    lines.join("\n")
}
