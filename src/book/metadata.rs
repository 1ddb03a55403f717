use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub role: Option<String>,
    pub file_as: Option<String>,
}

impl Author {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub id: Option<String>,
    pub scheme: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDate {
    pub date: String,
    pub event: Option<String>,
}

/// A package `<meta>` entry, either EPUB 2 (`name`/`content`) or EPUB 3
/// (`property`/`refines` with a text value).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub name: Option<String>,
    pub content: Option<String>,
    pub id: Option<String>,
    pub property: Option<String>,
    pub value: Option<String>,
    pub refines: Option<String>,
}

impl Meta {
    pub fn property(property: &str, value: &str) -> Self {
        Self {
            property: Some(property.to_string()),
            value: Some(value.to_string()),
            ..Self::default()
        }
    }

    pub fn refining(mut self, id: &str) -> Self {
        self.refines = Some(id.to_string());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub titles: Vec<String>,
    pub creators: Vec<Author>,
    pub contributors: Vec<Author>,
    pub languages: Vec<String>,
    pub identifiers: Vec<Identifier>,
    pub subjects: Vec<String>,
    pub descriptions: Vec<String>,
    pub publishers: Vec<String>,
    pub dates: Vec<EventDate>,
    pub rights: Vec<String>,
    pub metas: Vec<Meta>,
}

impl Metadata {
    /// First meta with `property`, optionally restricted to the ones
    /// refining `refined_by`. Ids compare with or without a leading `#`.
    pub fn find_meta(&self, property: &str, refined_by: Option<&str>) -> Option<&Meta> {
        self.metas.iter().find(|meta| {
            if meta.property.as_deref() != Some(property) {
                return false;
            }
            match refined_by {
                Some(id) => meta
                    .refines
                    .as_deref()
                    .is_some_and(|refines| strip_hash(refines) == strip_hash(id)),
                None => true,
            }
        })
    }

    pub fn find_meta_by_name(&self, name: &str) -> Option<&Meta> {
        self.metas
            .iter()
            .find(|meta| meta.name.as_deref() == Some(name))
    }
}

fn strip_hash(id: &str) -> &str {
    id.strip_prefix('#').unwrap_or(id)
}
