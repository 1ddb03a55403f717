//! The blocking scan that runs on the search worker thread.

use crate::cancellation::CancellationToken;
use crate::html_text::HtmlToText;
use crate::search::result::{ResultAccumulator, SearchEvent, SearchResult};
use crate::search::scanner::find_occurrences;
use crate::search::snippet::extract;
use crate::store::DocumentStore;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Cumulative growth that triggers a progressive batch.
pub const BATCH_THRESHOLD: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Completed,
    Cancelled,
}

/// Scan every document in page order, emitting events as results accrue.
///
/// Unreadable documents and matches without a usable snippet are skipped.
/// The token is polled before each document and before each match; once it
/// is set the scan emits `Cancelled` and returns without a final batch.
pub fn scan_documents(
    store: &dyn DocumentStore,
    converter: &dyn HtmlToText,
    query: &str,
    token: &CancellationToken,
    mut emit: impl FnMut(SearchEvent),
) -> ScanOutcome {
    let started = Instant::now();
    let page_count = store.page_count();
    let mut acc = ResultAccumulator::default();
    info!(%query, page_count, "Search scan started");

    for page_index in 0..page_count {
        if token.should_stop("document") {
            info!(page_index, found = acc.total(), "Search scan cancelled");
            emit(SearchEvent::Cancelled);
            return ScanOutcome::Cancelled;
        }
        let Some(doc) = store.document_at(page_index) else {
            warn!(page_index, "Store has no document for page");
            continue;
        };
        let html = match store.load_text(&doc) {
            Ok(html) => html,
            Err(err) => {
                warn!(page_index, href = %doc.href, "Skipping unreadable document: {err:#}");
                continue;
            }
        };

        let text: Vec<char> = html.chars().collect();
        let full_document_html: Arc<str> = Arc::from(html);
        let mut hits = 0usize;
        for occurrence in find_occurrences(&text, query) {
            if token.should_stop("match") {
                info!(page_index, found = acc.total(), "Search scan cancelled");
                emit(SearchEvent::Cancelled);
                return ScanOutcome::Cancelled;
            }
            hits += 1;
            let Some(snippet) = extract(&text, occurrence.offset, occurrence.len, converter)
            else {
                continue;
            };
            let result = SearchResult {
                match_range: snippet.match_range(),
                plain_text_content: snippet.plain_text,
                raw_snippet_html: snippet.raw_html,
                document_href: doc.href.clone(),
                document_path: doc.absolute_path.clone(),
                full_document_html: Arc::clone(&full_document_html),
                page_index,
            };
            if acc.push(result) && acc.batch_ready(BATCH_THRESHOLD) {
                let batch = acc.take_batch();
                debug!(size = batch.len(), total = acc.total(), "Delivering result batch");
                emit(SearchEvent::Batch(batch));
            }
        }
        debug!(page_index, href = %doc.href, hits, "Scanned document");
    }

    let total = acc.total();
    emit(SearchEvent::Batch(acc.take_batch()));
    emit(SearchEvent::Completed { total });
    info!(
        total,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Search scan completed"
    );
    ScanOutcome::Completed
}
