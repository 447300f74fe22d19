use super::common::Tag;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entity kind of a search hit, as reported in its `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchResultType {
    Page,
    Chapter,
    Book,
    Bookshelf,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(rename = "type")]
    pub result_type: SearchResultType,
    #[serde(default)]
    pub book_id: Option<u64>,
    #[serde(default)]
    pub chapter_id: Option<u64>,
    /// URL reported by BookStack itself. Serialized under another name so
    /// it does not collide with the enriched `url`.
    #[serde(default, rename(serialize = "reported_url", deserialize = "url"))]
    pub url: String,
    #[serde(default)]
    pub preview_html: SearchPreview,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

/// Highlighted HTML fragments of a search hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPreview {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content: String,
}
