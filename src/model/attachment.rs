use super::common::Actor;
use crate::types::{AttachmentId, PageId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A file or external link attached to a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: AttachmentId,
    pub name: String,
    #[serde(default)]
    pub extension: String,
    /// Id of the page that owns this attachment.
    pub uploaded_to: PageId,
    #[serde(default)]
    pub external: bool,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Actor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<AttachmentLinks>,
    /// Link target for external attachments, base64 data for files.
    /// Only present on single-attachment responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentLinks {
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub markdown: String,
}
