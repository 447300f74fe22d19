use super::common::Actor;
use crate::types::CommentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A page comment. Replies reference their parent by `local_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    #[serde(default)]
    pub commentable_id: u64,
    #[serde(default)]
    pub commentable_type: String,
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub local_id: u64,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Actor>,
}
