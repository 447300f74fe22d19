// src/api/pagination.rs
//! Query shaping for BookStack list endpoints.
//!
//! Lists take `offset`/`count` pagination, a `sort` field (prefix `-` for
//! descending) and any number of `filter[field:op]=value` pairs.

use crate::constants::{BOOKSTACK_MAX_PAGE_SIZE, DEFAULT_LIST_COUNT};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub sort: Option<String>,
    /// Filter keys as BookStack spells them, e.g. `name:like` or `book_id`.
    #[serde(default)]
    pub filter: IndexMap<String, String>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter.insert(key.into(), value.into());
        self
    }

    /// Effective page size: defaulted, then clamped to `1..=500`.
    pub fn effective_count(&self) -> u32 {
        self.count
            .unwrap_or(DEFAULT_LIST_COUNT)
            .clamp(1, BOOKSTACK_MAX_PAGE_SIZE)
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![("count".to_string(), self.effective_count().to_string())];
        if let Some(offset) = self.offset {
            query.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(sort) = self.sort.as_deref().filter(|s| !s.trim().is_empty()) {
            query.push(("sort".to_string(), sort.trim().to_string()));
        }
        for (key, value) in &self.filter {
            query.push((format!("filter[{}]", key), value.clone()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn count_is_clamped_to_api_maximum() {
        assert_eq!(ListParams::new().count(10_000).effective_count(), 500);
        assert_eq!(ListParams::new().count(0).effective_count(), 1);
        assert_eq!(ListParams::new().effective_count(), DEFAULT_LIST_COUNT);
    }

    #[test]
    fn filters_use_bracket_syntax_in_insertion_order() {
        let query = ListParams::new()
            .count(5)
            .offset(10)
            .sort("-updated_at")
            .filter("name:like", "%guide%")
            .filter("book_id", "3")
            .to_query();

        assert_eq!(
            query,
            vec![
                ("count".to_string(), "5".to_string()),
                ("offset".to_string(), "10".to_string()),
                ("sort".to_string(), "-updated_at".to_string()),
                ("filter[name:like]".to_string(), "%guide%".to_string()),
                ("filter[book_id]".to_string(), "3".to_string()),
            ]
        );
    }
}
