// src/lib.rs
//! bookstack-mcp library: the BookStack REST API as Model Context Protocol tools.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `ServerConfig`, `CommandLineInput`
//! - **Domain model**: `Book`, `Page`, `Chapter`, `Shelf`, `Attachment`, etc.
//! - **Domain types**: `BaseUrl`, `ApiToken`, `BookId`, `PageId`, etc.
//! - **API client**: `BookStackHttpClient`, `HttpTransport`, `CachedSlugResolver`
//! - **Operations**: `BookStack`, one method per tool
//! - **MCP**: `McpServer`, `ToolRegistry`

pub mod api;
pub mod config;
pub mod constants;
pub mod enrich;
pub mod error;
pub mod error_recovery;
pub mod mcp;
pub mod model;
pub mod operations;
pub mod types;

// --- Error Handling ---
pub use crate::error::{ApiErrorKind, AppError, WRITE_DISABLED_MARKER};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, ServerConfig};

// --- Domain Model ---
pub use crate::model::{
    Attachment, AuditLogEntry, Book, Chapter, Comment, ListResponse, Page, RecycleBinItem,
    SearchResult, Shelf, Tag, User,
};

// --- Domain Types ---
pub use crate::types::{
    ApiToken, AttachmentId, BaseUrl, BookId, ChapterId, CommentId, PageId, RecycleBinItemId,
    ShelfId, UserId,
};

// --- API Client ---
pub use crate::api::{
    ApiCall, BookStackHttpClient, CachedSlugResolver, ClientSettings, HttpTransport, ListParams,
    ReqwestTransport, SlugResolver,
};

// --- Enrichment ---
pub use crate::enrich::{Clock, Enriched, ExportFormat, ExportOutput, FixedClock, SystemClock};

// --- Operations ---
pub use crate::operations::{BookStack, Capabilities, Deleted};

// --- MCP ---
pub use crate::mcp::{McpServer, ToolRegistry, ToolResult};
