use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use super::controller::{SearchController, SearchMsg};
use super::{ContentTypeFilter, FilterOption, SearchView, content_type_options};
use crate::card::{EntryCard, entry_card};
use crate::client::{ContentTypeCache, RemoteHandle};
use crate::debug;
use crate::link::build_link;
use crate::provider::{ContentApi, RemoteContentType};
use crate::resolve::CrossSpaceLink;
use crate::space::SpaceConfiguration;

const CHANNEL_CAPACITY: usize = 32;

/// Live search against one configured space.
///
/// Dropping the session stops its actor and abandons in-flight requests.
pub struct SearchSession<A: ContentApi> {
    space: SpaceConfiguration,
    handle: Arc<RemoteHandle<A>>,
    tx: mpsc::Sender<SearchMsg>,
    view: watch::Receiver<SearchView>,
    task: Option<JoinHandle<()>>,
}

impl<A: ContentApi> SearchSession<A> {
    /// Spawn the search actor. Must be called within a tokio runtime.
    pub fn start(space: SpaceConfiguration, handle: Arc<RemoteHandle<A>>, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (view_tx, view) = watch::channel(SearchView::default());

        let controller = SearchController::new(Arc::clone(&handle), rx, view_tx, debounce);
        let task = tokio::spawn(controller.run());
        debug!("search"; "session for {} started", space.id);

        Self {
            space,
            handle,
            tx,
            view,
            task: Some(task),
        }
    }

    pub fn space(&self) -> &SpaceConfiguration {
        &self.space
    }

    pub async fn set_query(&self, query: impl Into<String>) {
        self.send(SearchMsg::Query(query.into())).await;
    }

    pub async fn set_content_type(&self, filter: ContentTypeFilter) {
        self.send(SearchMsg::ContentType(filter)).await;
    }

    pub async fn select(&self, entry_id: impl Into<String>) {
        self.send(SearchMsg::Select(entry_id.into())).await;
    }

    pub async fn clear_selection(&self) {
        self.send(SearchMsg::ClearSelection).await;
    }

    async fn send(&self, msg: SearchMsg) {
        if self.tx.send(msg).await.is_err() {
            debug!("search"; "session for {} already closed", self.space.id);
        }
    }

    /// Latest published view.
    pub fn view(&self) -> SearchView {
        self.view.borrow().clone()
    }

    /// Wait for the next view change. `None` once the actor has stopped.
    pub async fn changed(&mut self) -> Option<SearchView> {
        self.view.changed().await.ok()?;
        Some(self.view.borrow_and_update().clone())
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.view.clone()
    }

    /// Content types of the space, fetched once per handle. Empty if they
    /// cannot be loaded.
    pub async fn content_types(&self) -> Arc<[RemoteContentType]> {
        match self.handle.content_types().await {
            Ok(types) => types,
            Err(e) => {
                debug!("search"; "content types unavailable for {}: {}", self.space.id, e);
                Arc::from([])
            }
        }
    }

    /// Dropdown options. Only "Any" if content types cannot be loaded.
    pub async fn content_type_options(&self) -> Vec<FilterOption> {
        content_type_options(&self.content_types().await)
    }

    /// Cards for the view's entries. Entries of unknown content types are
    /// left out.
    pub async fn cards(&self, view: &SearchView) -> Vec<EntryCard> {
        let types = self.content_types().await;
        view.entries
            .iter()
            .filter_map(|entry| entry_card(entry, &types, None))
            .collect()
    }

    /// Link for the selection, if there is one.
    ///
    /// Sees every message sent before it, so a preceding `select` counts.
    pub async fn insert(&self) -> Option<CrossSpaceLink> {
        let (reply, selection) = oneshot::channel();
        self.send(SearchMsg::Selection(reply)).await;
        let entry = selection.await.ok()??;
        Some(build_link(&entry, &self.space))
    }

    /// Stop the actor and wait for it to exit.
    pub async fn close(mut self) {
        self.send(SearchMsg::Shutdown).await;
        if let Some(task) = self.task.take() {
            task.await.ok();
        }
    }
}

impl<A: ContentApi> Drop for SearchSession<A> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
