// src/api/mod.rs
//! BookStack API interaction.
//!
//! Layers, bottom up: [`transport`] moves bytes, [`client`] authenticates,
//! times out, retries and normalizes errors, [`cache`] remembers parent
//! slugs, and [`pagination`] shapes list queries.

pub mod cache;
pub mod client;
pub mod pagination;
pub mod transport;

use crate::types::{BookId, PageId};

pub use cache::{CachedSlugResolver, LookupCache, PageRef};
pub use client::{ApiCall, ApiPayload, BookStackHttpClient, ClientSettings};
pub use pagination::ListParams;
pub use transport::{HttpTransport, ReqwestTransport};

/// The ability to turn parent ids into URL segments.
///
/// Enrichment depends on this trait, never on HTTP details. Lookups never
/// fail: when a parent cannot be fetched the id stands in for the slug.
#[async_trait::async_trait]
pub trait SlugResolver: Send + Sync {
    /// Slug of the book, or the stringified id.
    async fn book_slug(&self, id: BookId) -> String;

    /// Slug and owning book of a page, or `None` when it cannot be fetched.
    async fn page_ref(&self, id: PageId) -> Option<PageRef>;
}
