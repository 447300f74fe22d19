// src/operations/mod.rs
//! One async operation per BookStack action.
//!
//! Every operation goes through the request executor, then enrichment.
//! Mutating operations check the write flag before anything else, so a
//! disabled server never touches the network for them.

mod admin;
mod attachments;
mod comments;
mod content;
mod exports;
mod search;

use crate::api::pagination::ListParams;
use crate::api::{BookStackHttpClient, CachedSlugResolver};
use crate::config::ServerConfig;
use crate::constants::BOOKSTACK_MAX_PAGE_SIZE;
use crate::enrich::{Clock, EnrichContext, ExportFormat, SystemClock};
use crate::error::AppError;
use crate::model::ListResponse;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

pub use admin::RecycleBinOutcome;
pub use search::{ChangeKind, RecentChanges, SearchParams};

/// Names of the read-only operations, in the order tools are listed.
pub const READ_OPERATIONS: &[&str] = &[
    "get_capabilities",
    "search_content",
    "search_pages",
    "get_books",
    "get_book",
    "get_pages",
    "get_page",
    "get_chapters",
    "get_chapter",
    "get_shelves",
    "get_shelf",
    "get_attachments",
    "get_attachment",
    "export_book",
    "export_chapter",
    "export_page",
    "get_recent_changes",
    "get_comments",
    "get_comment",
    "get_users",
    "get_user",
    "get_audit_log",
    "get_recycle_bin",
];

/// Names of the operations that require writes to be enabled.
pub const WRITE_OPERATIONS: &[&str] = &[
    "create_book",
    "update_book",
    "delete_book",
    "create_page",
    "update_page",
    "delete_page",
    "create_chapter",
    "update_chapter",
    "delete_chapter",
    "create_shelf",
    "update_shelf",
    "delete_shelf",
    "create_attachment",
    "upload_attachment",
    "update_attachment",
    "delete_attachment",
    "create_comment",
    "update_comment",
    "delete_comment",
    "restore_recycle_bin_item",
    "destroy_recycle_bin_item",
];

/// The BookStack service: executor, slug caches, write flag and clock.
pub struct BookStack {
    http: BookStackHttpClient,
    resolver: Arc<CachedSlugResolver>,
    write_enabled: bool,
    clock: Arc<dyn Clock>,
}

impl BookStack {
    pub fn new(http: BookStackHttpClient, write_enabled: bool) -> Self {
        let resolver = Arc::new(CachedSlugResolver::new(http.clone()));
        Self {
            http,
            resolver,
            write_enabled,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, AppError> {
        let http = BookStackHttpClient::from_config(config)?;
        Ok(Self::new(http, config.write_enabled))
    }

    /// Replaces the clock relative times are measured against.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn write_enabled(&self) -> bool {
        self.write_enabled
    }

    pub fn resolver(&self) -> &CachedSlugResolver {
        &self.resolver
    }

    fn ensure_writable(&self, operation: &str) -> Result<(), AppError> {
        if self.write_enabled {
            Ok(())
        } else {
            log::warn!("Rejected '{}': write operations are disabled", operation);
            Err(AppError::write_disabled(operation))
        }
    }

    fn context(&self) -> EnrichContext<'_> {
        EnrichContext::new(
            self.http.base_url(),
            self.resolver.as_ref(),
            self.clock.now(),
        )
    }

    async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &ListParams,
    ) -> Result<ListResponse<T>, AppError> {
        self.http.get_json(path, params.to_query()).await
    }

    /// What this server can do against the configured instance.
    pub fn get_capabilities(&self) -> Capabilities {
        let write_operations = if self.write_enabled {
            WRITE_OPERATIONS.to_vec()
        } else {
            Vec::new()
        };
        Capabilities {
            server: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            base_url: self.http.base_url().to_string(),
            write_enabled: self.write_enabled,
            read_operations: READ_OPERATIONS.to_vec(),
            write_operations,
            export_formats: ExportFormat::ALL.iter().map(ExportFormat::as_str).collect(),
            max_page_size: BOOKSTACK_MAX_PAGE_SIZE,
            cached_books: self.resolver.cached_books(),
            cached_pages: self.resolver.cached_pages(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Capabilities {
    pub server: &'static str,
    pub version: &'static str,
    pub base_url: String,
    pub write_enabled: bool,
    pub read_operations: Vec<&'static str>,
    pub write_operations: Vec<&'static str>,
    pub export_formats: Vec<&'static str>,
    pub max_page_size: u32,
    pub cached_books: usize,
    pub cached_pages: usize,
}

/// Confirmation of a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deleted {
    pub entity: &'static str,
    pub id: u64,
    pub deleted: bool,
    pub message: String,
}

impl Deleted {
    fn new(entity: &'static str, id: u64) -> Self {
        Self {
            entity,
            id,
            deleted: true,
            message: format!("{} {} deleted", entity, id),
        }
    }
}

fn reject_empty_update<T: Default + PartialEq>(request: &T, entity: &str) -> Result<(), AppError> {
    if *request == T::default() {
        return Err(AppError::Validation(format!(
            "an update to a {} needs at least one field",
            entity
        )));
    }
    Ok(())
}
