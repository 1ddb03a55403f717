//! Incremental, cancellable full-text search over a book's chapters.
//!
//! The coordinator runs one scan per query on a worker thread. The worker
//! finds folded occurrences in each chapter's raw HTML, cuts the surrounding
//! sentence out of the markup, deduplicates by plain text and hands results
//! back in batches over a channel.

mod coordinator;
mod result;
mod scanner;
mod session;
mod snippet;
mod worker;

pub use coordinator::{ResultSink, SearchCoordinator};
pub use result::{SearchEvent, SearchResult};
pub use scanner::{MatchOffset, Occurrences, find_occurrences};
pub use session::{SearchSession, SearchState};
pub use snippet::{SentenceSnippet, extract};
pub use worker::{BATCH_THRESHOLD, ScanOutcome, scan_documents};
