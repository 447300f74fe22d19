// src/mcp/tool_types.rs
//! Argument types for the BookStack tools.
//!
//! Read-tool arguments reject unknown fields so a misspelled option fails
//! loudly instead of being ignored. Write-tool arguments flatten a request
//! body and therefore accept whatever the body type accepts.

use crate::api::pagination::ListParams;
use crate::model::{AttachmentRequest, BookRequest, ChapterRequest, PageRequest, ShelfRequest};
use crate::operations::{ChangeKind, SearchParams};
use indexmap::IndexMap;
use serde::Deserialize;

/// Arguments for every tool that addresses one entity by id.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdArgs {
    pub id: u64,
}

/// Pagination, sorting and filtering for list tools.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListArgs {
    pub offset: Option<u32>,
    pub count: Option<u32>,
    pub sort: Option<String>,
    pub filter: Option<IndexMap<String, String>>,
}

impl ListArgs {
    pub fn into_params(self) -> ListParams {
        ListParams {
            offset: self.offset,
            count: self.count,
            sort: self.sort,
            filter: self.filter.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchArgs {
    pub query: String,
    pub page: Option<u32>,
    pub count: Option<u32>,
}

impl SearchArgs {
    pub fn into_params(self) -> SearchParams {
        SearchParams {
            query: self.query,
            page: self.page,
            count: self.count,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchPagesArgs {
    pub query: String,
    /// Keep only pages from this book.
    pub book_id: Option<u64>,
    pub page: Option<u32>,
    pub count: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportArgs {
    pub id: u64,
    pub format: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecentChangesArgs {
    #[serde(rename = "type", default)]
    pub kind: ChangeKind,
    pub limit: Option<u32>,
    pub days: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommentsArgs {
    pub page_id: Option<u64>,
    pub offset: Option<u32>,
    pub count: Option<u32>,
    pub sort: Option<String>,
}

impl CommentsArgs {
    pub fn list_params(&self) -> ListParams {
        ListParams {
            offset: self.offset,
            count: self.count,
            sort: self.sort.clone(),
            filter: IndexMap::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UploadAttachmentArgs {
    pub page_id: u64,
    pub file_path: String,
    pub name: Option<String>,
}

/// An id plus the fields to change.
#[derive(Debug, Deserialize)]
pub struct UpdateArgs<R> {
    pub id: u64,
    #[serde(flatten)]
    pub changes: R,
}

pub type UpdateBookArgs = UpdateArgs<BookRequest>;
pub type UpdateChapterArgs = UpdateArgs<ChapterRequest>;
pub type UpdatePageArgs = UpdateArgs<PageRequest>;
pub type UpdateShelfArgs = UpdateArgs<ShelfRequest>;
pub type UpdateAttachmentArgs = UpdateArgs<AttachmentRequest>;

/// Comment edits: new HTML and/or the archived flag.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateCommentArgs {
    pub id: u64,
    pub html: Option<String>,
    pub archived: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_args_become_params() {
        let args: ListArgs = serde_json::from_value(json!({
            "count": 5,
            "sort": "-updated_at",
            "filter": {"book_id": "3"}
        }))
        .unwrap();
        let params = args.into_params();
        assert_eq!(params.effective_count(), 5);
        assert_eq!(params.filter.get("book_id").map(String::as_str), Some("3"));
    }

    #[test]
    fn unknown_read_arguments_are_rejected() {
        let parsed: Result<IdArgs, _> = serde_json::from_value(json!({"id": 1, "idd": 2}));
        assert!(parsed.is_err());
    }

    #[test]
    fn update_args_flatten_the_request() {
        let args: UpdatePageArgs =
            serde_json::from_value(json!({"id": 9, "name": "Renamed"})).unwrap();
        assert_eq!(args.id, 9);
        assert_eq!(args.changes.name.as_deref(), Some("Renamed"));
        assert!(args.changes.html.is_none());
    }

    #[test]
    fn recent_changes_type_defaults_to_all() {
        let args: RecentChangesArgs = serde_json::from_value(json!({"days": 7})).unwrap();
        assert_eq!(args.kind, ChangeKind::All);
        assert_eq!(args.days, Some(7));
    }
}
