use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// One deduplicated hit, ready for display and for jumping to the page.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub plain_text_content: String,
    pub raw_snippet_html: String,
    pub document_href: String,
    pub document_path: PathBuf,
    /// Source of the whole chapter, shared by every hit in that chapter.
    #[serde(skip)]
    pub full_document_html: Arc<str>,
    pub match_range: (usize, usize),
    pub page_index: usize,
}

/// Messages from the scan worker to the thread owning the coordinator.
#[derive(Debug, Clone)]
pub enum SearchEvent {
    /// Results found since the previous batch, in scan order.
    Batch(Vec<SearchResult>),
    Completed { total: usize },
    Cancelled,
}

/// Worker-side result bookkeeping: dedup on the plain text and batch
/// cutting on cumulative growth.
#[derive(Debug, Default)]
pub(crate) struct ResultAccumulator {
    seen: HashSet<String>,
    pending: Vec<SearchResult>,
    total: usize,
    last_delivered: usize,
}

impl ResultAccumulator {
    /// Appends unless the same plain text was already found; first wins.
    pub(crate) fn push(&mut self, result: SearchResult) -> bool {
        if !self.seen.insert(result.plain_text_content.clone()) {
            return false;
        }
        self.pending.push(result);
        self.total += 1;
        true
    }

    pub(crate) fn batch_ready(&self, threshold: usize) -> bool {
        self.total - self.last_delivered >= threshold
    }

    pub(crate) fn take_batch(&mut self) -> Vec<SearchResult> {
        self.last_delivered = self.total;
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(text: &str, page_index: usize) -> SearchResult {
        SearchResult {
            plain_text_content: text.to_string(),
            raw_snippet_html: text.to_string(),
            document_href: format!("ch{page_index}.xhtml"),
            document_path: PathBuf::from(format!("/book/ch{page_index}.xhtml")),
            full_document_html: Arc::from(text),
            match_range: (0, text.chars().count()),
            page_index,
        }
    }

    #[test]
    fn duplicate_plain_text_keeps_first_occurrence() {
        let mut acc = ResultAccumulator::default();
        assert!(acc.push(result("Same words.", 0)));
        assert!(!acc.push(result("Same words.", 3)));
        assert!(acc.push(result("Other words.", 3)));

        let batch = acc.take_batch();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].page_index, 0);
        assert_eq!(acc.total(), 2);
    }

    #[test]
    fn batch_readiness_counts_growth_since_last_delivery() {
        let mut acc = ResultAccumulator::default();
        for idx in 0..4 {
            acc.push(result(&format!("Hit {idx}."), 0));
        }
        assert!(!acc.batch_ready(5));
        acc.push(result("Hit 4.", 0));
        assert!(acc.batch_ready(5));

        assert_eq!(acc.take_batch().len(), 5);
        assert!(!acc.batch_ready(5));
        assert!(acc.take_batch().is_empty());
    }
}
