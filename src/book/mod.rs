//! In-memory model of an unpacked EPUB: package metadata, manifest, spine,
//! navigation and media overlays.
//!
//! The model is filled by whoever parses the package document; this crate
//! only consumes it. A `Book` is also a `DocumentStore`, reading its spine
//! documents from the unpacked files on disk.

mod metadata;
mod resources;
mod smil;
mod spine;
mod toc;

pub use metadata::{Author, EventDate, Identifier, Meta, Metadata};
pub use resources::{Resource, Resources};
pub use smil::{SmilFile, SmilPar, Smils};
pub use spine::{Spine, SpineItem};
pub use toc::{TocReference, flatten};

use crate::store::{DocumentRef, DocumentStore, read_document};
use anyhow::Result;
use std::path::{Path, PathBuf};

const DEFAULT_ACTIVE_CLASS: &str = "epub-media-overlay-active";
const DEFAULT_PLAYBACK_ACTIVE_CLASS: &str = "epub-media-overlay-playing";

#[derive(Debug, Clone, Default)]
pub struct Book {
    pub metadata: Metadata,
    pub spine: Spine,
    pub smils: Smils,
    pub resources: Resources,
    pub version: Option<f64>,
    pub unique_identifier: Option<String>,
    pub name: Option<String>,
    pub opf_resource: Option<Resource>,
    pub toc_resource: Option<Resource>,
    pub cover_image: Option<Resource>,
    /// Directory the package was unpacked into.
    pub base_dir: PathBuf,
    table_of_contents: Vec<TocReference>,
    flat_table_of_contents: Vec<TocReference>,
}

impl Book {
    pub fn new(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            ..Self::default()
        }
    }

    pub fn table_of_contents(&self) -> &[TocReference] {
        &self.table_of_contents
    }

    pub fn flat_table_of_contents(&self) -> &[TocReference] {
        &self.flat_table_of_contents
    }

    pub fn set_table_of_contents(&mut self, toc: Vec<TocReference>) {
        self.flat_table_of_contents = flatten(&toc);
        self.table_of_contents = toc;
    }

    pub fn has_audio(&self) -> bool {
        !self.smils.is_empty()
    }

    pub fn title(&self) -> Option<&str> {
        self.metadata.titles.first().map(String::as_str)
    }

    pub fn author_name(&self) -> Option<&str> {
        self.metadata
            .creators
            .first()
            .map(|author| author.name.as_str())
    }

    /// Total narration length (`media:duration`).
    pub fn duration(&self) -> Option<&str> {
        self.meta_value("media:duration", None)
    }

    /// Narration length of the overlay with `id`.
    pub fn duration_for(&self, id: &str) -> Option<&str> {
        self.meta_value("media:duration", Some(id))
    }

    /// CSS class applied to the element currently being narrated.
    pub fn active_class(&self) -> &str {
        self.meta_value("media:active-class", None)
            .unwrap_or(DEFAULT_ACTIVE_CLASS)
    }

    /// CSS class applied to the document while narration plays.
    pub fn playback_active_class(&self) -> &str {
        self.meta_value("media:playback-active-class", None)
            .unwrap_or(DEFAULT_PLAYBACK_ACTIVE_CLASS)
    }

    /// Overlay narrating `resource`, via its `media-overlay` manifest id.
    pub fn smil_file_for_resource(&self, resource: &Resource) -> Option<&SmilFile> {
        let overlay_id = resource.media_overlay.as_deref()?;
        let smil_resource = self.resources.find_by_id(overlay_id)?;
        self.smils.find_by_href(&smil_resource.href)
    }

    pub fn smil_file_for_href(&self, href: &str) -> Option<&SmilFile> {
        self.smil_file_for_resource(self.resources.find_by_href(href)?)
    }

    pub fn smil_file_for_id(&self, id: &str) -> Option<&SmilFile> {
        self.smil_file_for_resource(self.resources.find_by_id(id)?)
    }

    fn meta_value(&self, property: &str, refined_by: Option<&str>) -> Option<&str> {
        self.metadata
            .find_meta(property, refined_by)
            .and_then(|meta| meta.value.as_deref())
    }
}

impl DocumentStore for Book {
    fn page_count(&self) -> usize {
        self.spine.len()
    }

    fn document_at(&self, page_index: usize) -> Option<DocumentRef> {
        let resource = self.spine.resource_at(page_index, &self.resources)?;
        Some(DocumentRef {
            href: resource.href.clone(),
            absolute_path: resource.full_href.clone(),
            page_index,
        })
    }

    fn load_text(&self, doc: &DocumentRef) -> Result<String> {
        read_document(&doc.absolute_path)
    }
}
