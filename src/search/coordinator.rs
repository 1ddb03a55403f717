//! Owner-thread side of the search: submits queries, receives batches and
//! forwards them to the view.

use crate::cancellation::CancellationToken;
use crate::html_text::{HtmlToText, TagStripper};
use crate::navigation::{HighlightStyle, NavigationRequest, Navigator};
use crate::search::result::{SearchEvent, SearchResult};
use crate::search::session::{SearchSession, SearchState};
use crate::store::DocumentStore;
use anyhow::Result;
use std::sync::Arc;
use std::sync::mpsc::TryRecvError;
use tracing::{debug, info, warn};

/// The view that lists results.
///
/// `on_batch` always receives the full list accumulated so far, in scan
/// order; a view can simply reload.
pub trait ResultSink {
    fn on_search_started(&mut self);

    fn on_batch(&mut self, results: &[SearchResult]);

    fn on_search_complete(&mut self);
}

pub struct SearchCoordinator {
    store: Arc<dyn DocumentStore>,
    converter: Arc<dyn HtmlToText>,
    highlight: HighlightStyle,
    session: Option<SearchSession>,
    state: SearchState,
}

impl SearchCoordinator {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            converter: Arc::new(TagStripper),
            highlight: HighlightStyle::default(),
            session: None,
            state: SearchState::Idle,
        }
    }

    pub fn with_converter(mut self, converter: Arc<dyn HtmlToText>) -> Self {
        self.converter = converter;
        self
    }

    pub fn with_highlight(mut self, highlight: HighlightStyle) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn query(&self) -> Option<&str> {
        self.session.as_ref().map(SearchSession::query)
    }

    pub fn results(&self) -> &[SearchResult] {
        self.session
            .as_ref()
            .map(SearchSession::results)
            .unwrap_or_default()
    }

    pub fn is_completed(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(SearchSession::is_completed)
    }

    /// Start a new search, superseding any running one.
    ///
    /// Returns `Ok(false)` and changes nothing when the query is blank.
    pub fn submit_query(&mut self, query: &str, sink: &mut dyn ResultSink) -> Result<bool> {
        if query.trim().is_empty() {
            debug!("Ignoring blank search query");
            return Ok(false);
        }
        if let Some(mut previous) = self.session.take() {
            info!(query = %previous.query(), "Superseding running search");
            previous.halt();
        }
        self.state = SearchState::Idle;

        let session = SearchSession::start(
            query,
            Arc::clone(&self.store),
            Arc::clone(&self.converter),
        )?;
        self.session = Some(session);
        self.state = SearchState::Scanning;
        info!(%query, "Search submitted");
        sink.on_search_started();
        Ok(true)
    }

    /// Ask the running scan to stop at its next checkpoint.
    pub fn cancel(&self) {
        if let Some(session) = &self.session {
            session.token().cancel();
        }
    }

    /// Stop flag of the running session, for cancelling from another thread.
    pub fn cancellation_token(&self) -> Option<CancellationToken> {
        self.session.as_ref().map(|session| session.token().clone())
    }

    /// Dispatch every event that is already waiting; never blocks.
    ///
    /// Returns the number of events handled.
    pub fn pump(&mut self, sink: &mut dyn ResultSink) -> usize {
        let mut handled = 0;
        while let Some(session) = self.session.as_ref() {
            if self.state != SearchState::Scanning {
                break;
            }
            let received = session.events().try_recv();
            let event = match received {
                Ok(event) => event,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.worker_vanished();
                    break;
                }
            };
            handled += 1;
            self.dispatch(event, sink);
        }
        handled
    }

    /// Block until the running scan completes or is cancelled.
    pub fn wait(&mut self, sink: &mut dyn ResultSink) -> SearchState {
        while let Some(session) = self.session.as_ref() {
            if self.state != SearchState::Scanning {
                break;
            }
            let received = session.events().recv();
            match received {
                Ok(event) => self.dispatch(event, sink),
                Err(_) => self.worker_vanished(),
            }
        }
        self.state
    }

    /// Open result `index`: stops the scan and hands the highlighted page to
    /// the navigator. Returns false when there is no such result.
    pub fn select(&mut self, index: usize, navigator: &mut dyn Navigator) -> bool {
        self.cancel();
        let Some(result) = self.results().get(index) else {
            warn!(index, available = self.results().len(), "No search result at index");
            return false;
        };
        let request = NavigationRequest::for_result(result, &self.highlight);
        info!(index, page = request.page_index, "Opening search result");
        navigator.jump_to(&request);
        true
    }

    /// Close the search view: stop the scan and drop its results.
    pub fn dismiss(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.halt();
        }
        self.state = SearchState::Idle;
        debug!("Search dismissed");
    }

    fn dispatch(&mut self, event: SearchEvent, sink: &mut dyn ResultSink) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match event {
            SearchEvent::Batch(batch) => {
                session.append(batch);
                sink.on_batch(session.results());
            }
            SearchEvent::Completed { total } => {
                session.mark_completed();
                self.state = SearchState::Completed;
                info!(total, "Search complete");
                sink.on_search_complete();
            }
            SearchEvent::Cancelled => {
                self.state = SearchState::Cancelled;
                info!(found = session.results().len(), "Search cancelled");
            }
        }
    }

    fn worker_vanished(&mut self) {
        warn!("Search worker exited without a final event");
        self.state = SearchState::Cancelled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::worker::tests::MemoryStore;
    use crate::store::DocumentRef;
    use std::sync::Mutex;
    use std::sync::mpsc;

    #[derive(Default)]
    struct RecordingSink {
        started: usize,
        batches: Vec<usize>,
        completed: usize,
        last: Vec<String>,
    }

    impl ResultSink for RecordingSink {
        fn on_search_started(&mut self) {
            self.started += 1;
        }

        fn on_batch(&mut self, results: &[SearchResult]) {
            self.batches.push(results.len());
            self.last = results
                .iter()
                .map(|r| r.plain_text_content.clone())
                .collect();
        }

        fn on_search_complete(&mut self) {
            self.completed += 1;
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        requests: Vec<NavigationRequest>,
    }

    impl Navigator for RecordingNavigator {
        fn jump_to(&mut self, request: &NavigationRequest) {
            self.requests.push(request.clone());
        }
    }

    fn coordinator(pages: &[&str]) -> SearchCoordinator {
        SearchCoordinator::new(Arc::new(MemoryStore::new(pages)))
    }

    fn many_sentences(count: usize) -> String {
        let body: String = (0..count).map(|idx| format!("Word {idx}. ")).collect();
        format!("<p>{body}</p>")
    }

    #[test]
    fn blank_query_is_a_no_op() {
        let mut search = coordinator(&["<p>text.</p>"]);
        let mut sink = RecordingSink::default();

        assert!(!search.submit_query("   \n", &mut sink).expect("submit"));

        assert_eq!(search.state(), SearchState::Idle);
        assert_eq!(sink.started, 0);
        assert!(search.query().is_none());
    }

    #[test]
    fn end_to_end_single_sentence() {
        let mut search = coordinator(&["<p>Hello world. This is a test sentence. Bye.</p>"]);
        let mut sink = RecordingSink::default();

        assert!(search.submit_query("test", &mut sink).expect("submit"));
        assert_eq!(sink.started, 1);
        let state = search.wait(&mut sink);

        assert_eq!(state, SearchState::Completed);
        assert!(search.is_completed());
        assert_eq!(sink.completed, 1);
        assert_eq!(sink.last, vec!["This is a test sentence.".to_string()]);
        assert_eq!(search.results().len(), 1);
    }

    #[test]
    fn missing_query_completes_with_no_results() {
        let mut search = coordinator(&["<p>Alpha.</p>", "<p>Beta.</p>"]);
        let mut sink = RecordingSink::default();

        search.submit_query("omega", &mut sink).expect("submit");
        search.wait(&mut sink);

        assert!(search.results().is_empty());
        assert_eq!(sink.completed, 1);
        assert_eq!(sink.batches, vec![0]);
    }

    #[test]
    fn batches_reload_the_full_list() {
        let mut search = coordinator(&[&many_sentences(20)]);
        let mut sink = RecordingSink::default();

        search.submit_query("word", &mut sink).expect("submit");
        search.wait(&mut sink);

        assert_eq!(sink.batches, vec![15, 20]);
        assert_eq!(sink.last.first().map(String::as_str), Some("Word 0."));
        assert_eq!(sink.completed, 1);
    }

    #[test]
    fn new_query_replaces_previous_results() {
        let mut search = coordinator(&["<p>One cat. One dog.</p>"]);
        let mut sink = RecordingSink::default();

        search.submit_query("cat", &mut sink).expect("submit");
        search.wait(&mut sink);
        assert_eq!(search.results().len(), 1);

        search.submit_query("dog", &mut sink).expect("submit");
        assert_eq!(search.state(), SearchState::Scanning);
        assert!(search.results().is_empty());
        search.wait(&mut sink);

        assert_eq!(search.query(), Some("dog"));
        assert_eq!(sink.last, vec!["One dog.".to_string()]);
        assert_eq!(sink.started, 2);
    }

    /// Holds the worker inside its first `load_text` until the gate opens.
    struct GatedStore {
        inner: MemoryStore,
        gate: Mutex<mpsc::Receiver<()>>,
    }

    impl DocumentStore for GatedStore {
        fn page_count(&self) -> usize {
            self.inner.page_count()
        }

        fn document_at(&self, page_index: usize) -> Option<DocumentRef> {
            self.inner.document_at(page_index)
        }

        fn load_text(&self, doc: &DocumentRef) -> Result<String> {
            let _ = self.gate.lock().expect("gate lock").recv();
            self.inner.load_text(doc)
        }
    }

    #[test]
    fn cancel_stops_the_scan_without_completion() {
        let (open_gate, gate) = mpsc::channel();
        let store = Arc::new(GatedStore {
            inner: MemoryStore::new(&[&many_sentences(50), &many_sentences(5)]),
            gate: Mutex::new(gate),
        });
        let mut search = SearchCoordinator::new(store.clone());
        let mut sink = RecordingSink::default();

        search.submit_query("word", &mut sink).expect("submit");
        search.cancel();
        drop(open_gate);
        let state = search.wait(&mut sink);

        assert_eq!(state, SearchState::Cancelled);
        assert_eq!(sink.completed, 0);
        assert!(sink.batches.is_empty());
        assert!(!search.is_completed());
        assert!(search.results().is_empty());
        assert_eq!(*store.inner.loaded.lock().expect("loaded lock"), vec![0]);
    }

    #[test]
    fn selecting_a_result_stops_the_scan_and_navigates() {
        let mut search = coordinator(&["<p>Find me here. Not this.</p>"]);
        let mut sink = RecordingSink::default();
        let mut navigator = RecordingNavigator::default();

        search.submit_query("find", &mut sink).expect("submit");
        search.wait(&mut sink);
        assert!(search.select(0, &mut navigator));

        assert!(search.session.as_ref().expect("session").token().is_cancelled());
        let request = &navigator.requests[0];
        assert_eq!(request.page_index, 0);
        assert_eq!(request.document_base_dir, std::path::PathBuf::from("/book/OEBPS"));
        assert!(request.highlighted_html.contains(
            "<search style=\"background-color:#ddd;\"><span id=\"search\">Find me here.</span></search>"
        ));
        assert!(!search.select(5, &mut navigator));
        assert_eq!(navigator.requests.len(), 1);
    }

    #[test]
    fn dismiss_clears_results() {
        let mut search = coordinator(&["<p>Keep me.</p>"]);
        let mut sink = RecordingSink::default();

        search.submit_query("keep", &mut sink).expect("submit");
        search.wait(&mut sink);
        search.dismiss();

        assert_eq!(search.state(), SearchState::Idle);
        assert!(search.results().is_empty());
    }

    #[test]
    fn pump_drains_without_blocking() {
        let mut search = coordinator(&["<p>Quick hit.</p>"]);
        let mut sink = RecordingSink::default();

        search.submit_query("quick", &mut sink).expect("submit");
        while search.state() == SearchState::Scanning {
            if search.pump(&mut sink) == 0 {
                std::thread::yield_now();
            }
        }

        assert_eq!(search.state(), SearchState::Completed);
        assert_eq!(sink.last, vec!["Quick hit.".to_string()]);
    }
}
