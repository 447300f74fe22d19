//! Users, audit log and recycle bin records.

use super::common::UserSummary;
use crate::types::{RecycleBinItemId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_activity_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: u64,
    /// Activity type, e.g. `page_update`.
    #[serde(rename = "type")]
    pub activity: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub loggable_id: Option<u64>,
    #[serde(default)]
    pub loggable_type: Option<String>,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecycleBinItem {
    pub id: RecycleBinItemId,
    #[serde(default)]
    pub deleted_by: Option<UserId>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// e.g. `page`, `book`, `chapter`, `bookshelf`.
    #[serde(default)]
    pub deletable_type: String,
    #[serde(default)]
    pub deletable_id: u64,
    /// The deleted entity as BookStack returns it; its shape varies by type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletable: Option<serde_json::Value>,
}

impl RecycleBinItem {
    pub fn item_name(&self) -> Option<&str> {
        self.deletable
            .as_ref()
            .and_then(|d| d.get("name"))
            .and_then(|n| n.as_str())
    }
}
