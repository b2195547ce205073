//! Drives a search session from a stream of user commands until an entry
//! is inserted or the picker is cancelled.

use tokio::sync::mpsc;

use super::{ContentTypeFilter, SearchSession, SearchView};
use crate::debug;
use crate::provider::ContentApi;
use crate::resolve::CrossSpaceLink;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerInput {
    Query(String),
    ContentType(ContentTypeFilter),
    Select(String),
    Insert,
    Cancel,
}

/// Run the picker. Returns the link to store, or `None` if cancelled.
///
/// `on_view` sees every published view. Insert without a selection is
/// ignored.
pub async fn pick<A: ContentApi>(
    mut session: SearchSession<A>,
    mut input: mpsc::Receiver<PickerInput>,
    mut on_view: impl FnMut(&SearchView),
) -> Option<CrossSpaceLink> {
    on_view(&session.view());

    loop {
        tokio::select! {
            cmd = input.recv() => match cmd {
                None | Some(PickerInput::Cancel) => break,
                Some(PickerInput::Insert) => match session.insert().await {
                    Some(link) => {
                        session.close().await;
                        return Some(link);
                    }
                    None => debug!("search"; "insert ignored, nothing selected"),
                },
                Some(PickerInput::Query(query)) => session.set_query(query).await,
                Some(PickerInput::ContentType(filter)) => session.set_content_type(filter).await,
                Some(PickerInput::Select(id)) => session.select(id).await,
            },

            Some(view) = session.changed() => on_view(&view),
        }
    }

    session.close().await;
    None
}
