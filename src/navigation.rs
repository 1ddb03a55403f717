//! Jump-to-result requests handed back to the reader.

use crate::search::SearchResult;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Marker wrapped around the selected snippet when the page is reloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightStyle {
    pub tag_id: String,
    pub color: String,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            tag_id: "search".to_string(),
            color: "#ddd".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub page_index: usize,
    /// Full chapter source with the snippet wrapped in the highlight marker.
    pub highlighted_html: String,
    /// Directory relative resources of the chapter resolve against.
    pub document_base_dir: PathBuf,
    /// Element id the reader scrolls to after loading the page.
    pub anchor_id: String,
}

impl NavigationRequest {
    pub fn for_result(result: &SearchResult, style: &HighlightStyle) -> Self {
        let highlighted_html = highlight_document(
            &result.full_document_html,
            &result.raw_snippet_html,
            style,
        );
        let document_base_dir = result
            .document_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        debug!(
            page = result.page_index,
            href = %result.document_href,
            "Built navigation request"
        );
        Self {
            page_index: result.page_index,
            highlighted_html,
            document_base_dir,
            anchor_id: style.tag_id.clone(),
        }
    }
}

/// Receives "open this result" requests from the search view.
pub trait Navigator {
    fn jump_to(&mut self, request: &NavigationRequest);
}

/// Wrap every occurrence of `snippet_html` in `full_html` with the marker.
pub fn highlight_document(full_html: &str, snippet_html: &str, style: &HighlightStyle) -> String {
    if snippet_html.is_empty() {
        return full_html.to_string();
    }
    let marker = format!(
        "<search style=\"background-color:{};\"><span id=\"{}\">{}</span></search>",
        style.color, style.tag_id, snippet_html
    );
    full_html.replace(snippet_html, &marker)
}
