use super::resources::{Resource, Resources};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpineItem {
    pub idref: String,
    pub linear: bool,
}

impl SpineItem {
    pub fn new(idref: &str) -> Self {
        Self {
            idref: idref.to_string(),
            linear: true,
        }
    }
}

/// Reading order of the book's content documents.
#[derive(Debug, Clone, Default)]
pub struct Spine {
    pub page_progression_direction: Option<String>,
    pub items: Vec<SpineItem>,
}

impl Spine {
    pub fn push(&mut self, item: SpineItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_rtl(&self) -> bool {
        self.page_progression_direction.as_deref() == Some("rtl")
    }

    pub fn resource_at<'a>(&self, index: usize, resources: &'a Resources) -> Option<&'a Resource> {
        let item = self.items.get(index)?;
        resources.find_by_id(&item.idref)
    }

    /// Resource following the spine item whose resource has `href`.
    pub fn next_chapter<'a>(&self, href: &str, resources: &'a Resources) -> Option<&'a Resource> {
        let current = resources.find_by_href(href)?;
        let position = self
            .items
            .iter()
            .position(|item| item.idref == current.id)?;
        self.resource_at(position + 1, resources)
    }
}
