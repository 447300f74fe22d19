// src/operations/search.rs
//! Full-text search and recently changed content.

use super::BookStack;
use crate::api::pagination::ListParams;
use crate::constants::{
    DEFAULT_RECENT_DAYS, DEFAULT_RECENT_LIMIT, DEFAULT_SEARCH_COUNT, SEARCH_MAX_PAGE_SIZE,
};
use crate::enrich::{
    enrich_all, enrich_search_result, EnrichedBook, EnrichedChapter, EnrichedPage,
    EnrichedSearchResult,
};
use crate::error::AppError;
use crate::model::{ListResponse, SearchResult};
use crate::types::BookId;
use chrono::Duration as ChronoDuration;
use serde::{Deserialize, Serialize};

/// A search request. `query` accepts BookStack's search syntax, e.g.
/// `install {type:page} [tag=v2]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub query: String,
    /// 1-based result page.
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub count: Option<u32>,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    fn to_query(&self) -> Result<Vec<(String, String)>, AppError> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(AppError::Validation("a search needs a query".to_string()));
        }
        let count = self
            .count
            .unwrap_or(DEFAULT_SEARCH_COUNT)
            .clamp(1, SEARCH_MAX_PAGE_SIZE);
        Ok(vec![
            ("query".to_string(), query.to_string()),
            ("page".to_string(), self.page.unwrap_or(1).max(1).to_string()),
            ("count".to_string(), count.to_string()),
        ])
    }
}

/// Which kinds of content `get_recent_changes` reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    #[default]
    All,
    #[serde(alias = "page")]
    Pages,
    #[serde(alias = "book")]
    Books,
    #[serde(alias = "chapter")]
    Chapters,
}

impl ChangeKind {
    fn includes(self, other: ChangeKind) -> bool {
        self == ChangeKind::All || self == other
    }
}

/// Content updated within a window, newest first per kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentChanges {
    pub since: String,
    pub days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<EnrichedPage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub books: Option<Vec<EnrichedBook>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapters: Option<Vec<EnrichedChapter>>,
}

impl BookStack {
    /// Searches across books, chapters, pages and shelves.
    pub async fn search_content(
        &self,
        params: &SearchParams,
    ) -> Result<ListResponse<EnrichedSearchResult>, AppError> {
        let ListResponse { data, total }: ListResponse<SearchResult> =
            self.http.get_json("search", params.to_query()?).await?;
        let data = self.enrich_hits(data).await;
        Ok(ListResponse { data, total })
    }

    /// Searches pages only, optionally keeping hits from one book.
    pub async fn search_pages(
        &self,
        params: &SearchParams,
        book_id: Option<BookId>,
    ) -> Result<ListResponse<EnrichedSearchResult>, AppError> {
        if params.query.trim().is_empty() {
            return Err(AppError::Validation("a search needs a query".to_string()));
        }
        let scoped = SearchParams {
            query: format!("{} {{type:page}}", params.query.trim()),
            ..params.clone()
        };

        let ListResponse { data, total }: ListResponse<SearchResult> =
            self.http.get_json("search", scoped.to_query()?).await?;
        let (data, total) = match book_id {
            Some(book_id) => {
                let kept: Vec<SearchResult> = data
                    .into_iter()
                    .filter(|hit| hit.book_id == Some(book_id.get()))
                    .collect();
                let total = kept.len() as u64;
                (kept, total)
            }
            None => (data, total),
        };

        let data = self.enrich_hits(data).await;
        Ok(ListResponse { data, total })
    }

    async fn enrich_hits(&self, hits: Vec<SearchResult>) -> Vec<EnrichedSearchResult> {
        let ctx = self.context();
        let ctx = &ctx;
        enrich_all(hits, move |hit| enrich_search_result(ctx, hit)).await
    }

    /// Pages, books and chapters updated in the last `days` days.
    pub async fn get_recent_changes(
        &self,
        kind: ChangeKind,
        limit: Option<u32>,
        days: Option<u32>,
    ) -> Result<RecentChanges, AppError> {
        let days = days.unwrap_or(DEFAULT_RECENT_DAYS).max(1);
        let since = self
            .clock
            .now()
            .checked_sub_signed(ChronoDuration::days(i64::from(days)))
            .ok_or_else(|| {
                AppError::Validation(format!("days is out of range: {}", days))
            })?
            .format("%Y-%m-%d")
            .to_string();
        let params = ListParams::new()
            .count(limit.unwrap_or(DEFAULT_RECENT_LIMIT))
            .sort("-updated_at")
            .filter("updated_at:gt", since.clone());
        log::debug!("Listing {:?} changed since {}", kind, since);

        let mut changes = RecentChanges {
            since,
            days,
            pages: None,
            books: None,
            chapters: None,
        };
        if kind.includes(ChangeKind::Pages) {
            changes.pages = Some(self.get_pages(&params).await?.data);
        }
        if kind.includes(ChangeKind::Books) {
            changes.books = Some(self.get_books(&params).await?.data);
        }
        if kind.includes(ChangeKind::Chapters) {
            changes.chapters = Some(self.get_chapters(&params).await?.data);
        }
        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_count_is_clamped() {
        let params = SearchParams {
            count: Some(1000),
            ..SearchParams::new("install")
        };
        let query = params.to_query().unwrap();
        assert!(query.contains(&("count".to_string(), "100".to_string())));
        assert!(query.contains(&("page".to_string(), "1".to_string())));
    }

    #[test]
    fn blank_query_is_rejected() {
        assert!(SearchParams::new("   ").to_query().is_err());
    }

    #[test]
    fn change_kinds_accept_singular_names() {
        let kind: ChangeKind = serde_json::from_str("\"page\"").unwrap();
        assert_eq!(kind, ChangeKind::Pages);
        assert!(ChangeKind::All.includes(ChangeKind::Books));
        assert!(!ChangeKind::Pages.includes(ChangeKind::Books));
    }
}
