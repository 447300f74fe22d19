use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// Envelope returned by every BookStack list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

impl<T> ListResponse<T> {
    /// Maps every item, keeping the reported total.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListResponse<U> {
        ListResponse {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// A name/value tag attached to books, chapters, pages and shelves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

/// Minimal user reference embedded in single-entity responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// `created_by` and friends are plain ids in list responses and
/// expanded user objects in single-entity responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Actor {
    Id(UserId),
    User(UserSummary),
}

impl Actor {
    pub fn id(&self) -> UserId {
        match self {
            Actor::Id(id) => *id,
            Actor::User(user) => user.id,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Actor::Id(id) => format!("user #{}", id),
            Actor::User(user) => user.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_accepts_id_or_object() {
        let plain: Actor = serde_json::from_str("3").unwrap();
        assert_eq!(plain.id().get(), 3);

        let expanded: Actor =
            serde_json::from_str(r#"{"id": 4, "name": "Admin", "slug": "admin"}"#).unwrap();
        assert_eq!(expanded.id().get(), 4);
        assert_eq!(expanded.display_name(), "Admin");
    }
}
