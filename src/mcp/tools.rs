// src/mcp/tools.rs
//! Tool registry and execution.
//!
//! Each tool decodes its arguments, runs one [`BookStack`] operation and
//! renders the result as a single text block: pretty JSON for records,
//! raw text for text exports. Operation failures become `isError` results
//! rather than protocol errors, so the assistant sees what went wrong.

use super::errors::user_message;
use super::schemas::{tool_definitions, ToolDefinition};
use super::tool_types::*;
use crate::api::ListParams;
use crate::enrich::{ExportFormat, ExportOutput};
use crate::error::AppError;
use crate::model::{
    AttachmentRequest, BookRequest, ChapterRequest, CommentRequest, PageRequest, ShelfRequest,
};
use crate::operations::BookStack;
use crate::types::{BookId, Id, PageId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Result of a tool call, in MCP's `tools/call` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", default)]
    pub is_error: bool,
}

impl ToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: true,
        }
    }

    /// Text of the first content block.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|c| match c {
            ToolContent::Text { text } => text.as_str(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

enum ToolOutput {
    Json(Value),
    Text(String),
}

/// The BookStack tools and the service they call.
pub struct ToolRegistry {
    definitions: Vec<ToolDefinition>,
    service: Arc<BookStack>,
}

impl ToolRegistry {
    pub fn new(service: Arc<BookStack>) -> Self {
        Self {
            definitions: tool_definitions(),
            service,
        }
    }

    pub fn list_tools(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    pub fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.definitions.iter().find(|t| t.name == name)
    }

    /// Runs a tool. `None` when no tool has that name.
    pub async fn execute(&self, name: &str, arguments: Value) -> Option<ToolResult> {
        self.get_tool(name)?;
        log::info!("Tool call: {}", name);

        let result = match self.call(name, arguments).await {
            Ok(ToolOutput::Text(text)) => ToolResult::text(text),
            Ok(ToolOutput::Json(value)) => match serde_json::to_string_pretty(&value) {
                Ok(text) => ToolResult::text(text),
                Err(e) => ToolResult::error(format!("{} failed: {}", name, e)),
            },
            Err(err) => {
                log::error!("{} failed: {:?}", name, err);
                ToolResult::error(user_message(name, &err))
            }
        };
        Some(result)
    }

    async fn call(&self, name: &str, args: Value) -> Result<ToolOutput, AppError> {
        let bookstack = self.service.as_ref();

        match name {
            // --- Read ---
            "get_capabilities" => json(bookstack.get_capabilities()),
            "search_content" => {
                let args: SearchArgs = parse(args)?;
                json(bookstack.search_content(&args.into_params()).await?)
            }
            "search_pages" => {
                let args: SearchPagesArgs = parse(args)?;
                let book_id = args.book_id.map(BookId::new);
                let params = SearchArgs {
                    query: args.query,
                    page: args.page,
                    count: args.count,
                }
                .into_params();
                json(bookstack.search_pages(&params, book_id).await?)
            }
            "get_books" => json(bookstack.get_books(&list_params(args)?).await?),
            "get_book" => json(bookstack.get_book(id(args)?).await?),
            "get_pages" => json(bookstack.get_pages(&list_params(args)?).await?),
            "get_page" => json(bookstack.get_page(id(args)?).await?),
            "get_chapters" => json(bookstack.get_chapters(&list_params(args)?).await?),
            "get_chapter" => json(bookstack.get_chapter(id(args)?).await?),
            "get_shelves" => json(bookstack.get_shelves(&list_params(args)?).await?),
            "get_shelf" => json(bookstack.get_shelf(id(args)?).await?),
            "get_attachments" => json(bookstack.get_attachments(&list_params(args)?).await?),
            "get_attachment" => json(bookstack.get_attachment(id(args)?).await?),
            "export_book" => {
                let (id, format) = export_args(args)?;
                export(bookstack.export_book(id.into(), format).await?)
            }
            "export_chapter" => {
                let (id, format) = export_args(args)?;
                export(bookstack.export_chapter(id.into(), format).await?)
            }
            "export_page" => {
                let (id, format) = export_args(args)?;
                export(bookstack.export_page(id.into(), format).await?)
            }
            "get_recent_changes" => {
                let args: RecentChangesArgs = parse_or_default(args)?;
                json(
                    bookstack
                        .get_recent_changes(args.kind, args.limit, args.days)
                        .await?,
                )
            }
            "get_comments" => {
                let args: CommentsArgs = parse_or_default(args)?;
                let params = args.list_params();
                let page_id = args.page_id.map(PageId::new);
                json(bookstack.get_comments(page_id, &params).await?)
            }
            "get_comment" => json(bookstack.get_comment(id(args)?).await?),
            "get_users" => json(bookstack.get_users(&list_params(args)?).await?),
            "get_user" => json(bookstack.get_user(id(args)?).await?),
            "get_audit_log" => json(bookstack.get_audit_log(&list_params(args)?).await?),
            "get_recycle_bin" => json(bookstack.get_recycle_bin(&list_params(args)?).await?),

            // --- Books ---
            "create_book" => {
                let request: BookRequest = parse(args)?;
                json(bookstack.create_book(&request).await?)
            }
            "update_book" => {
                let args: UpdateBookArgs = parse(args)?;
                json(bookstack.update_book(args.id.into(), &args.changes).await?)
            }
            "delete_book" => json(bookstack.delete_book(id(args)?).await?),

            // --- Pages ---
            "create_page" => {
                let request: PageRequest = parse(args)?;
                json(bookstack.create_page(&request).await?)
            }
            "update_page" => {
                let args: UpdatePageArgs = parse(args)?;
                json(bookstack.update_page(args.id.into(), &args.changes).await?)
            }
            "delete_page" => json(bookstack.delete_page(id(args)?).await?),

            // --- Chapters ---
            "create_chapter" => {
                let request: ChapterRequest = parse(args)?;
                json(bookstack.create_chapter(&request).await?)
            }
            "update_chapter" => {
                let args: UpdateChapterArgs = parse(args)?;
                json(bookstack.update_chapter(args.id.into(), &args.changes).await?)
            }
            "delete_chapter" => json(bookstack.delete_chapter(id(args)?).await?),

            // --- Shelves ---
            "create_shelf" => {
                let request: ShelfRequest = parse(args)?;
                json(bookstack.create_shelf(&request).await?)
            }
            "update_shelf" => {
                let args: UpdateShelfArgs = parse(args)?;
                json(bookstack.update_shelf(args.id.into(), &args.changes).await?)
            }
            "delete_shelf" => json(bookstack.delete_shelf(id(args)?).await?),

            // --- Attachments ---
            "create_attachment" => {
                let request: AttachmentRequest = parse(args)?;
                json(bookstack.create_attachment(&request).await?)
            }
            "upload_attachment" => {
                let args: UploadAttachmentArgs = parse(args)?;
                let uploaded = bookstack
                    .upload_attachment(
                        args.page_id.into(),
                        Path::new(&args.file_path),
                        args.name.as_deref(),
                    )
                    .await?;
                json(uploaded)
            }
            "update_attachment" => {
                let args: UpdateAttachmentArgs = parse(args)?;
                json(bookstack.update_attachment(args.id.into(), &args.changes).await?)
            }
            "delete_attachment" => json(bookstack.delete_attachment(id(args)?).await?),

            // --- Comments ---
            "create_comment" => {
                let request: CommentRequest = parse(args)?;
                json(bookstack.create_comment(&request).await?)
            }
            "update_comment" => {
                let args: UpdateCommentArgs = parse(args)?;
                let request = CommentRequest {
                    html: args.html,
                    archived: args.archived,
                    ..Default::default()
                };
                json(bookstack.update_comment(args.id.into(), &request).await?)
            }
            "delete_comment" => json(bookstack.delete_comment(id(args)?).await?),

            // --- Recycle bin ---
            "restore_recycle_bin_item" => {
                json(bookstack.restore_recycle_bin_item(id(args)?).await?)
            }
            "destroy_recycle_bin_item" => {
                json(bookstack.destroy_recycle_bin_item(id(args)?).await?)
            }

            other => Err(AppError::InternalError {
                message: format!("tool '{}' is listed but has no handler", other),
                source: None,
            }),
        }
    }
}

fn parse<T: DeserializeOwned>(args: Value) -> Result<T, AppError> {
    serde_json::from_value(args)
        .map_err(|e| AppError::Validation(format!("invalid arguments: {}", e)))
}

/// Like [`parse`], but a missing or null argument object means defaults.
fn parse_or_default<T: DeserializeOwned + Default>(args: Value) -> Result<T, AppError> {
    if args.is_null() {
        return Ok(T::default());
    }
    parse(args)
}

fn id<T>(args: Value) -> Result<Id<T>, AppError> {
    let args: IdArgs = parse(args)?;
    Ok(Id::new(args.id))
}

fn list_params(args: Value) -> Result<ListParams, AppError> {
    Ok(parse_or_default::<ListArgs>(args)?.into_params())
}

fn export_args(args: Value) -> Result<(u64, ExportFormat), AppError> {
    let args: ExportArgs = parse(args)?;
    let format = args.format.parse::<ExportFormat>()?;
    Ok((args.id, format))
}

fn json<T: Serialize>(value: T) -> Result<ToolOutput, AppError> {
    Ok(ToolOutput::Json(serde_json::to_value(value)?))
}

fn export(output: ExportOutput) -> Result<ToolOutput, AppError> {
    match output {
        ExportOutput::Text { content, .. } => Ok(ToolOutput::Text(content)),
        ExportOutput::Download(descriptor) => json(descriptor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tool_results_use_mcp_field_names() {
        let value = serde_json::to_value(ToolResult::error("nope")).unwrap();
        assert_eq!(
            value,
            json!({"content": [{"type": "text", "text": "nope"}], "isError": true})
        );
    }

    #[test]
    fn bad_arguments_are_validation_errors() {
        let err = parse::<IdArgs>(json!({"id": "seven"})).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn export_format_is_checked() {
        assert!(export_args(json!({"id": 1, "format": "docx"})).is_err());
        let (id, format) = export_args(json!({"id": 1, "format": "md"})).unwrap();
        assert_eq!((id, format), (1, ExportFormat::Markdown));
    }

    #[test]
    fn null_list_arguments_mean_defaults() {
        let params = list_params(Value::Null).unwrap();
        assert_eq!(params.offset, None);
        assert!(params.filter.is_empty());
    }
}
