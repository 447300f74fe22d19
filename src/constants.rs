// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

use std::time::Duration;

// ---------------------------------------------------------------------------
// BookStack API boundaries
// ---------------------------------------------------------------------------

/// Largest `count` the BookStack list endpoints accept.
pub const BOOKSTACK_MAX_PAGE_SIZE: u32 = 500;

/// Items returned by list operations when the caller does not ask.
pub const DEFAULT_LIST_COUNT: u32 = 20;

/// Largest `count` the search endpoint accepts.
pub const SEARCH_MAX_PAGE_SIZE: u32 = 100;

/// Search hits returned when the caller does not ask.
pub const DEFAULT_SEARCH_COUNT: u32 = 20;

/// Timeout for ordinary API calls.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for multipart uploads, which carry whole files.
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(120);

// ---------------------------------------------------------------------------
// Rate limiting
// ---------------------------------------------------------------------------

/// Additional attempts after the first 429 response.
pub const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Wait used when a 429 response carries no usable `Retry-After` header.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(5);

/// Longest wait honored from a `Retry-After` header.
pub const MAX_RETRY_AFTER: Duration = Duration::from_secs(60);

// ---------------------------------------------------------------------------
// Enrichment
// ---------------------------------------------------------------------------

/// Characters kept from book, chapter and shelf descriptions.
pub const DESCRIPTION_PREVIEW_LENGTH: usize = 100;

/// Characters kept from search result snippets.
pub const SEARCH_PREVIEW_LENGTH: usize = 150;

/// Characters kept from page bodies.
pub const CONTENT_PREVIEW_LENGTH: usize = 200;

/// Characters kept from comment bodies.
pub const COMMENT_PREVIEW_LENGTH: usize = 100;

pub const ELLIPSIS: &str = "...";

pub const NO_DESCRIPTION: &str = "No description available";

pub const NO_CONTENT: &str = "No content available";

// ---------------------------------------------------------------------------
// Recent changes
// ---------------------------------------------------------------------------

pub const DEFAULT_RECENT_DAYS: u32 = 30;

pub const DEFAULT_RECENT_LIMIT: u32 = 20;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
