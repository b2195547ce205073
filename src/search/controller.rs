//! Search actor: debounces input and applies only the latest response.
//!
//! Every issued request carries a sequence number. A response is applied
//! only if its number is still the latest issued one; clearing the query
//! invalidates the number so in-flight responses land nowhere.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinSet;
use tokio::time::Instant;

use super::debouncer::Debouncer;
use super::{ContentTypeFilter, SearchPhase, SearchView};
use crate::client::RemoteHandle;
use crate::debug;
use crate::provider::{ContentApi, EntryQuery, ProviderResult, RemoteEntry};

/// Messages sent to the search actor.
#[derive(Debug)]
pub enum SearchMsg {
    Query(String),
    ContentType(ContentTypeFilter),
    Select(String),
    ClearSelection,
    /// Reply with the selection once every earlier message is applied
    Selection(oneshot::Sender<Option<RemoteEntry>>),
    Shutdown,
}

struct Completed {
    seq: u64,
    result: ProviderResult<Vec<RemoteEntry>>,
}

pub(super) struct SearchController<A> {
    handle: Arc<RemoteHandle<A>>,
    rx: mpsc::Receiver<SearchMsg>,
    view_tx: watch::Sender<SearchView>,
    view: SearchView,
    debouncer: Debouncer,
    /// Last sequence number handed out
    issued: u64,
    /// Sequence number whose response may still be applied
    latest: Option<u64>,
    inflight: JoinSet<Completed>,
}

impl<A: ContentApi> SearchController<A> {
    pub(super) fn new(
        handle: Arc<RemoteHandle<A>>,
        rx: mpsc::Receiver<SearchMsg>,
        view_tx: watch::Sender<SearchView>,
        debounce: Duration,
    ) -> Self {
        Self {
            handle,
            rx,
            view_tx,
            view: SearchView::default(),
            debouncer: Debouncer::new(debounce),
            issued: 0,
            latest: None,
            inflight: JoinSet::new(),
        }
    }

    pub(super) async fn run(mut self) {
        loop {
            let deadline = self.debouncer.deadline();

            tokio::select! {
                biased;

                msg = self.rx.recv() => match msg {
                    Some(SearchMsg::Shutdown) | None => break,
                    Some(msg) => self.handle_message(msg),
                },

                Some(joined) = self.inflight.join_next(), if !self.inflight.is_empty() => {
                    match joined {
                        Ok(done) => self.handle_completed(done),
                        Err(e) => debug!("search"; "request task ended abnormally: {}", e),
                    }
                }

                () = sleep_until(deadline) => self.handle_deadline(),
            }

            self.publish();
        }

        self.inflight.abort_all();
        debug!("search"; "session for {} closed", self.handle.credentials().space_id);
    }

    fn handle_message(&mut self, msg: SearchMsg) {
        match msg {
            SearchMsg::Query(query) => self.set_query(query),
            SearchMsg::ContentType(filter) => self.set_filter(filter),
            SearchMsg::Select(id) => {
                let found = self.view.entries.iter().find(|e| e.id() == id).cloned();
                if found.is_none() {
                    debug!("search"; "ignoring selection of {} (not in results)", id);
                }
                self.view.selected = found;
            }
            SearchMsg::ClearSelection => self.view.selected = None,
            SearchMsg::Selection(reply) => {
                reply.send(self.view.selected.clone()).ok();
            }
            SearchMsg::Shutdown => {}
        }
    }

    fn set_query(&mut self, query: String) {
        // requests carry the trimmed text
        if query.trim() == self.view.query.trim() {
            self.view.query = query;
            return;
        }
        self.view.query = query;
        self.view.selected = None;

        if self.view.query.trim().is_empty() {
            self.clear();
        } else {
            self.rearm();
        }
    }

    fn set_filter(&mut self, filter: ContentTypeFilter) {
        if filter == self.view.filter {
            return;
        }
        self.view.filter = filter;

        if !self.view.query.trim().is_empty() {
            self.rearm();
        }
    }

    /// Restart the debounce window. A reply to the previous input is stale
    /// from here on, even if it lands before the next request goes out.
    fn rearm(&mut self) {
        self.latest = None;
        self.view.loading = false;
        self.debouncer.arm();
        self.view.phase = SearchPhase::Debouncing;
    }

    /// Back to idle without issuing a request.
    fn clear(&mut self) {
        self.debouncer.cancel();
        self.latest = None;
        self.view.entries.clear();
        self.view.selected = None;
        self.view.loading = false;
        self.view.applied = None;
        self.view.phase = SearchPhase::Idle;
    }

    fn handle_deadline(&mut self) {
        if !self.debouncer.take_if_ready() {
            return;
        }
        if self.view.query.trim().is_empty() {
            self.view.phase = SearchPhase::Idle;
            return;
        }
        self.issue();
    }

    fn issue(&mut self) {
        self.issued += 1;
        let seq = self.issued;
        self.latest = Some(seq);

        let query = EntryQuery {
            text: self.view.query.trim().to_string(),
            content_type: self.view.filter.as_query().map(str::to_string),
        };
        debug!("search"; "request #{} for \"{}\"", seq, query.text);

        self.view.phase = SearchPhase::Querying;
        self.view.loading = true;

        let handle = Arc::clone(&self.handle);
        self.inflight.spawn(async move {
            let result = handle.api().get_entries(&query).await;
            Completed { seq, result }
        });
    }

    fn handle_completed(&mut self, Completed { seq, result }: Completed) {
        if self.latest != Some(seq) {
            debug!("search"; "discard stale response #{}", seq);
            return;
        }
        self.latest = None;
        self.view.loading = false;

        match result {
            Ok(entries) => {
                debug!("search"; "response #{}: {} entries", seq, entries.len());
                let kept = self
                    .view
                    .selected_id()
                    .is_some_and(|id| entries.iter().any(|e| e.id() == id));
                if !kept {
                    self.view.selected = None;
                }
                self.view.phase = if entries.is_empty() {
                    SearchPhase::Empty
                } else {
                    SearchPhase::Results
                };
                self.view.entries = entries;
                self.view.applied = Some(seq);
            }
            Err(e) => {
                debug!("search"; "response #{} failed: {}", seq, e);
                self.view.phase = SearchPhase::Failed(e.message);
            }
        }
    }

    fn publish(&self) {
        self.view_tx.send_if_modified(|current| {
            if *current == self.view {
                return false;
            }
            current.clone_from(&self.view);
            true
        });
    }
}

/// Resolve at `deadline`, or never.
fn sleep_until(deadline: Option<Instant>) -> impl Future<Output = ()> {
    async move {
        match deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    }
}
