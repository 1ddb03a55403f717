//! Document lookup contract consumed by the search engine.
//!
//! A store is an ordered list of chapter documents ("pages" in reading
//! order). The engine only ever asks for the count, a reference per page and
//! the raw text behind a reference.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One spine document as seen by the search engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub href: String,
    pub absolute_path: PathBuf,
    pub page_index: usize,
}

impl DocumentRef {
    /// Directory relative links inside the document resolve against.
    pub fn base_dir(&self) -> PathBuf {
        self.absolute_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }
}

pub trait DocumentStore: Send + Sync {
    fn page_count(&self) -> usize;

    fn document_at(&self, page_index: usize) -> Option<DocumentRef>;

    fn load_text(&self, doc: &DocumentRef) -> Result<String>;
}

/// Store over an unpacked book directory, in lexical path order.
///
/// Used when no package document is available to give the reading order.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
    documents: Vec<DocumentRef>,
}

impl DirectoryStore {
    pub fn open(root: &Path) -> Result<Self> {
        let mut files = Vec::new();
        collect_html_files(root, &mut files)
            .with_context(|| format!("Failed to list documents under {}", root.display()))?;
        files.sort();

        let documents = files
            .into_iter()
            .enumerate()
            .map(|(page_index, absolute_path)| {
                let href = absolute_path
                    .strip_prefix(root)
                    .unwrap_or(&absolute_path)
                    .to_string_lossy()
                    .replace('\\', "/");
                DocumentRef {
                    href,
                    absolute_path,
                    page_index,
                }
            })
            .collect::<Vec<_>>();

        info!(
            root = %root.display(),
            documents = documents.len(),
            "Opened book directory"
        );
        Ok(Self {
            root: root.to_path_buf(),
            documents,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DocumentStore for DirectoryStore {
    fn page_count(&self) -> usize {
        self.documents.len()
    }

    fn document_at(&self, page_index: usize) -> Option<DocumentRef> {
        self.documents.get(page_index).cloned()
    }

    fn load_text(&self, doc: &DocumentRef) -> Result<String> {
        read_document(&doc.absolute_path)
    }
}

pub(crate) fn read_document(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read document {}", path.display()))?;
    debug!(path = %path.display(), chars = text.len(), "Loaded document");
    Ok(text)
}

fn collect_html_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_html_files(&path, out)?;
        } else if is_html(&path) {
            out.push(path);
        }
    }
    Ok(())
}

fn is_html(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase()),
        Some(ext) if ext == "html" || ext == "xhtml" || ext == "htm"
    )
}
