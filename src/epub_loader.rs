//! EPUB archive loading.
//!
//! Opens a packed `.epub`, walks its spine once and keeps every chapter's
//! source in memory so a search never goes back to the zip.

use crate::store::{DocumentRef, DocumentStore};
use anyhow::{Context, Result, anyhow};
use epub::doc::EpubDoc;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct Chapter {
    doc: DocumentRef,
    html: String,
}

/// Spine documents of a packed EPUB, in reading order.
///
/// `absolute_path` of each document is the archive path joined with the
/// chapter's path inside the archive; it is not a file on disk.
#[derive(Debug, Clone)]
pub struct EpubArchiveStore {
    path: PathBuf,
    chapters: Vec<Chapter>,
}

impl EpubArchiveStore {
    pub fn open(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "Loading EPUB content");
        let mut doc = EpubDoc::new(path)
            .with_context(|| format!("Failed to open EPUB at {}", path.display()))?;

        let mut chapters = Vec::new();
        loop {
            if let Some((html, _mime)) = doc.get_current_str() {
                let page_index = chapters.len();
                let inner = doc
                    .get_current_path()
                    .or_else(|| doc.get_current_id().map(PathBuf::from))
                    .unwrap_or_else(|| PathBuf::from(format!("chapter-{page_index}")));
                let href = inner.to_string_lossy().replace('\\', "/");
                debug!(page = page_index, %href, chars = html.len(), "Parsed chapter");
                chapters.push(Chapter {
                    doc: DocumentRef {
                        href,
                        absolute_path: path.join(&inner),
                        page_index,
                    },
                    html,
                });
            }

            if !doc.go_next() {
                break;
            }
        }

        info!(chapters = chapters.len(), "Finished loading EPUB content");
        Ok(Self {
            path: path.to_path_buf(),
            chapters,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for EpubArchiveStore {
    fn page_count(&self) -> usize {
        self.chapters.len()
    }

    fn document_at(&self, page_index: usize) -> Option<DocumentRef> {
        self.chapters.get(page_index).map(|ch| ch.doc.clone())
    }

    fn load_text(&self, doc: &DocumentRef) -> Result<String> {
        self.chapters
            .get(doc.page_index)
            .filter(|ch| ch.doc.href == doc.href)
            .map(|ch| ch.html.clone())
            .ok_or_else(|| anyhow!("Chapter {} is not part of {}", doc.href, self.path.display()))
    }
}

/// True when `path` names a packed EPUB rather than an unpacked directory.
pub fn is_epub(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase()),
        Some(ext) if ext == "epub"
    )
}
