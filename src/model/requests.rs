//! Request bodies for the mutating endpoints.
//!
//! Update requests leave every field optional; only fields that are set
//! are serialized, so BookStack keeps the current value for the rest.

use super::common::Tag;
use crate::error::AppError;
use crate::types::{BookId, ChapterId, PageId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_template_id: Option<PageId>,
}

impl BookRequest {
    pub fn validate_create(&self) -> Result<(), AppError> {
        require_name(&self.name, "book")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChapterRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_id: Option<BookId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl ChapterRequest {
    pub fn validate_create(&self) -> Result<(), AppError> {
        if self.book_id.is_none() {
            return Err(AppError::Validation(
                "a chapter needs a book_id".to_string(),
            ));
        }
        require_name(&self.name, "chapter")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_id: Option<BookId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_id: Option<ChapterId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl PageRequest {
    pub fn validate_create(&self) -> Result<(), AppError> {
        if self.book_id.is_none() && self.chapter_id.is_none() {
            return Err(AppError::Validation(
                "a page needs either a book_id or a chapter_id".to_string(),
            ));
        }
        if self.html.is_none() && self.markdown.is_none() {
            return Err(AppError::Validation(
                "a page needs either html or markdown content".to_string(),
            ));
        }
        require_name(&self.name, "page")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShelfRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,
    /// Replaces the shelf's book list, in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub books: Option<Vec<BookId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

impl ShelfRequest {
    pub fn validate_create(&self) -> Result<(), AppError> {
        require_name(&self.name, "shelf")
    }
}

/// External-link attachment, or metadata update of any attachment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachmentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_to: Option<PageId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl AttachmentRequest {
    pub fn validate_create(&self) -> Result<(), AppError> {
        if self.uploaded_to.is_none() {
            return Err(AppError::Validation(
                "an attachment needs the uploaded_to page id".to_string(),
            ));
        }
        if self.link.as_deref().map_or(true, |l| l.trim().is_empty()) {
            return Err(AppError::Validation(
                "a link attachment needs a link".to_string(),
            ));
        }
        require_name(&self.name, "attachment")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<PageId>,
    /// `local_id` of the comment being replied to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl CommentRequest {
    pub fn validate_create(&self) -> Result<(), AppError> {
        if self.page_id.is_none() {
            return Err(AppError::Validation(
                "a comment needs a page_id".to_string(),
            ));
        }
        if self.html.as_deref().map_or(true, |h| h.trim().is_empty()) {
            return Err(AppError::Validation(
                "a comment needs html content".to_string(),
            ));
        }
        Ok(())
    }
}

fn require_name(name: &Option<String>, entity: &str) -> Result<(), AppError> {
    match name.as_deref() {
        Some(n) if !n.trim().is_empty() => Ok(()),
        _ => Err(AppError::Validation(format!("a {} needs a name", entity))),
    }
}
