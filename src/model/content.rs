//! Books, chapters, pages and shelves: the content hierarchy.

use super::common::{Actor, Tag};
use crate::types::{BookId, ChapterId, PageId, ShelfId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Actor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<Actor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<Actor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    /// Only present on single-book responses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contents: Vec<BookContentItem>,
}

/// Kind of an entry in a book's contents listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Chapter,
    Page,
}

/// Top-level entry of a book: a chapter (with its pages) or a loose page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookContentItem {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[serde(default)]
    pub priority: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<BookContentItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: ChapterId,
    pub book_id: BookId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_slug: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Actor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<Actor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    /// Only present on single-chapter responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<ChapterPage>>,
}

/// Page summary nested in a chapter response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterPage {
    pub id: PageId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub draft: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub book_id: BookId,
    /// BookStack reports 0 for pages that sit directly in a book.
    #[serde(default)]
    pub chapter_id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub template: bool,
    #[serde(default)]
    pub revision_count: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Actor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<Actor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl Page {
    pub fn chapter(&self) -> Option<ChapterId> {
        (self.chapter_id != 0).then(|| ChapterId::new(self.chapter_id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shelf {
    pub id: ShelfId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Actor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    /// Only present on single-shelf responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub books: Option<Vec<ShelfBook>>,
}

/// Book summary nested in a shelf response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelfBook {
    pub id: BookId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}
