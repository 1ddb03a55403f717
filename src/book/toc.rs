/// One entry of the navigation tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TocReference {
    pub title: String,
    pub resource_id: Option<String>,
    /// Anchor inside the resource, without the `#`.
    pub fragment_id: Option<String>,
    pub children: Vec<TocReference>,
}

impl TocReference {
    pub fn new(title: &str, resource_id: Option<&str>, fragment_id: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            resource_id: resource_id.map(str::to_string),
            fragment_id: fragment_id.map(str::to_string),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<TocReference>) -> Self {
        self.children = children;
        self
    }
}

/// Pre-order flattening, parents before their children.
pub fn flatten(toc: &[TocReference]) -> Vec<TocReference> {
    let mut flat = Vec::new();
    for entry in toc {
        let mut shallow = entry.clone();
        shallow.children.clear();
        flat.push(shallow);
        flat.extend(flatten(&entry.children));
    }
    flat
}
