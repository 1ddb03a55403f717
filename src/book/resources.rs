use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A manifest item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub id: String,
    /// Path relative to the package document.
    pub href: String,
    /// Location of the unpacked file on disk.
    pub full_href: PathBuf,
    pub media_type: String,
    /// Id of the SMIL resource narrating this one.
    pub media_overlay: Option<String>,
    pub properties: Option<String>,
}

impl Resource {
    pub fn new(id: &str, href: &str, media_type: &str, base_dir: &Path) -> Self {
        Self {
            id: id.to_string(),
            href: href.to_string(),
            full_href: base_dir.join(href),
            media_type: media_type.to_string(),
            media_overlay: None,
            properties: None,
        }
    }

    pub fn with_media_overlay(mut self, overlay_id: &str) -> Self {
        self.media_overlay = Some(overlay_id.to_string());
        self
    }

    pub fn with_properties(mut self, properties: &str) -> Self {
        self.properties = Some(properties.to_string());
        self
    }
}

/// Manifest items in declaration order, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct Resources {
    items: Vec<Resource>,
    by_id: HashMap<String, usize>,
}

impl Resources {
    pub fn add(&mut self, resource: Resource) {
        match self.by_id.get(&resource.id) {
            Some(&idx) => self.items[idx] = resource,
            None => {
                self.by_id.insert(resource.id.clone(), self.items.len());
                self.items.push(resource);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.items.iter()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Resource> {
        self.by_id.get(id).map(|&idx| &self.items[idx])
    }

    pub fn find_by_href(&self, href: &str) -> Option<&Resource> {
        let href = href.trim_start_matches('/');
        self.items.iter().find(|res| res.href == href)
    }

    pub fn find_by_media_type(&self, media_type: &str) -> Option<&Resource> {
        self.items.iter().find(|res| res.media_type == media_type)
    }

    pub fn find_by_extension(&self, extension: &str) -> Option<&Resource> {
        self.items.iter().find(|res| {
            Path::new(&res.href)
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        })
    }

    pub fn find_by_properties(&self, property: &str) -> Option<&Resource> {
        self.items.iter().find(|res| {
            res.properties
                .as_deref()
                .is_some_and(|props| props.split_whitespace().any(|p| p == property))
        })
    }
}
