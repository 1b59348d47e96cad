//! Domain entities. Pure data structures for the catalog.
//!
//! No storage or UI types here. Adapters map their own formats onto these.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::DomainError;

/// Named grouping label. The name is the primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Canonical form of a category name: trimmed, whitespace runs collapsed to a
/// single space. Case is preserved.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Immutable content identifier, assigned once at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    /// Fresh random id (UUID v4).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ContentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Image,
    Gif,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Gif => "gif",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(MediaType::Image),
            "gif" => Ok(MediaType::Gif),
            other => Err(DomainError::InvalidInput {
                field: "media_type",
                reason: format!("unknown media type '{}'", other),
            }),
        }
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentId,
    pub title: String,
    pub description: String,
    /// Opaque reference to the media asset (URL or path); never dereferenced by the store.
    #[serde(rename = "thumbnail")]
    pub thumbnail_ref: String,
    #[serde(rename = "type", default)]
    pub media_type: MediaType,
    #[serde(rename = "category")]
    pub category_name: String,
}

/// Caller-supplied fields for creating or fully replacing a content item.
///
/// Fields are raw form input; services validate and normalize them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentDraft {
    pub title: String,
    pub description: String,
    pub thumbnail_ref: String,
    pub category_name: String,
    /// `None` means "not chosen" and defaults to [`MediaType::Image`].
    pub media_type: Option<MediaType>,
}

impl ContentDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        thumbnail_ref: impl Into<String>,
        category_name: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            thumbnail_ref: thumbnail_ref.into(),
            category_name: category_name.into(),
            media_type: None,
        }
    }

    pub fn with_media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = Some(media_type);
        self
    }

    /// Prefill a draft from an existing item (edit form).
    pub fn from_item(item: &ContentItem) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            thumbnail_ref: item.thumbnail_ref.clone(),
            category_name: item.category_name.clone(),
            media_type: Some(item.media_type),
        }
    }
}

/// Point-in-time, internally consistent copy of the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub revision: u64,
    /// Categories in insertion order.
    pub categories: Vec<Category>,
    /// Items in insertion order.
    pub items: Vec<ContentItem>,
}

impl CatalogSnapshot {
    pub fn category_names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    /// True when every item references an existing category.
    pub fn is_consistent(&self) -> bool {
        self.items
            .iter()
            .all(|i| self.categories.iter().any(|c| c.name == i.category_name))
    }
}

/// One non-empty category section of the grouped view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub category: String,
    pub items: Vec<ContentItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  MAIS   VENDIDOS \t"), "MAIS VENDIDOS");
        assert_eq!(normalize_name("   "), "");
        assert_eq!(normalize_name("Mixed Case"), "Mixed Case");
    }

    #[test]
    fn test_media_type_parsing() {
        assert_eq!("image".parse::<MediaType>().unwrap(), MediaType::Image);
        assert_eq!(" GIF ".parse::<MediaType>().unwrap(), MediaType::Gif);
        assert!(matches!(
            "video".parse::<MediaType>(),
            Err(DomainError::InvalidInput {
                field: "media_type",
                ..
            })
        ));
        assert_eq!(MediaType::default(), MediaType::Image);
    }

    #[test]
    fn test_item_without_type_deserializes_as_image() {
        let json = r#"{"id":"7","title":"t","description":"d","thumbnail":"u","category":"A"}"#;
        let item: ContentItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.media_type, MediaType::Image);
        assert_eq!(item.id, ContentId::from("7"));
    }

    #[test]
    fn test_snapshot_consistency() {
        let mut snap = CatalogSnapshot {
            revision: 0,
            categories: vec![Category::new("A")],
            items: vec![],
        };
        assert!(snap.is_consistent());
        snap.items.push(ContentItem {
            id: ContentId::generate(),
            title: "t".into(),
            description: "d".into(),
            thumbnail_ref: "u".into(),
            media_type: MediaType::Gif,
            category_name: "B".into(),
        });
        assert!(!snap.is_consistent());
    }
}
