use crate::cancellation::CancellationToken;
use crate::html_text::HtmlToText;
use crate::search::result::{SearchEvent, SearchResult};
use crate::search::worker::scan_documents;
use crate::store::DocumentStore;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread::JoinHandle;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Scanning,
    Cancelled,
    Completed,
}

impl std::fmt::Display for SearchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SearchState::Idle => "idle",
            SearchState::Scanning => "scanning",
            SearchState::Cancelled => "cancelled",
            SearchState::Completed => "completed",
        };
        write!(f, "{}", label)
    }
}

/// One query's scan: its stop flag, its worker and the results handed over
/// so far.
///
/// Every session owns a fresh channel, so events of a superseded scan can
/// never be mixed into the results of the next one.
pub struct SearchSession {
    query: String,
    token: CancellationToken,
    completed: bool,
    results: Vec<SearchResult>,
    events: Receiver<SearchEvent>,
    worker: Option<JoinHandle<()>>,
}

impl SearchSession {
    pub(crate) fn start(
        query: &str,
        store: Arc<dyn DocumentStore>,
        converter: Arc<dyn HtmlToText>,
    ) -> Result<Self> {
        let token = CancellationToken::new();
        let (tx, rx) = mpsc::channel();
        let worker_query = query.to_string();
        let worker_token = token.clone();
        let worker = std::thread::Builder::new()
            .name("ebup-search".to_string())
            .spawn(move || {
                scan_documents(
                    store.as_ref(),
                    converter.as_ref(),
                    &worker_query,
                    &worker_token,
                    |event| {
                        // The receiver is gone once the session is dropped.
                        let _ = tx.send(event);
                    },
                );
            })
            .context("Failed to spawn search worker")?;

        Ok(Self {
            query: query.to_string(),
            token,
            completed: false,
            results: Vec::new(),
            events: rx,
            worker: Some(worker),
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub(crate) fn events(&self) -> &Receiver<SearchEvent> {
        &self.events
    }

    pub(crate) fn append(&mut self, batch: Vec<SearchResult>) {
        self.results.extend(batch);
    }

    pub(crate) fn mark_completed(&mut self) {
        self.completed = true;
    }

    /// Request a stop and wait for the worker to reach its next checkpoint.
    pub(crate) fn halt(&mut self) {
        self.token.cancel();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!(query = %self.query, "Search worker panicked");
            } else {
                debug!(query = %self.query, "Search worker joined");
            }
        }
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.halt();
    }
}
