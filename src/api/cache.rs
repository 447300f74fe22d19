// src/api/cache.rs
//! Identifier resolution caches.
//!
//! Navigable URLs are built from slugs, but child records usually carry
//! only their parent's numeric id. These caches remember the slug the first
//! time a parent is fetched so a page listing with fifty pages from one
//! book costs a single book lookup.
//!
//! Entries live for the process lifetime: no eviction, no TTL. Failed
//! lookups are never stored, so a later call can still succeed.

use super::client::BookStackHttpClient;
use super::SlugResolver;
use crate::error::AppError;
use crate::model::{Book, Page};
use crate::types::{BookId, PageId};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::OnceCell;

// ---------------------------------------------------------------------------
// Lookup table
// ---------------------------------------------------------------------------

/// Append-only map filled on first miss.
///
/// Each key owns a [`OnceCell`], so concurrent misses on one key share a
/// single fetch while other keys proceed independently. The map lock is
/// never held across an `.await`.
pub struct LookupCache<K, V> {
    entries: RwLock<HashMap<K, Arc<OnceCell<V>>>>,
}

impl<K, V> LookupCache<K, V>
where
    K: Eq + Hash + Copy,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn cell(&self, key: K) -> Arc<OnceCell<V>> {
        if let Some(cell) = self.entries.read().get(&key) {
            return Arc::clone(cell);
        }
        Arc::clone(self.entries.write().entry(key).or_default())
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.read().get(key)?.get().cloned()
    }

    /// Stores `value`, replacing any earlier one.
    pub fn insert(&self, key: K, value: V) {
        self.entries
            .write()
            .insert(key, Arc::new(OnceCell::new_with(Some(value))));
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .values()
            .filter(|cell| cell.initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the cached value, or runs `fetch`, stores and returns its
    /// result. Callers arriving while a fetch is in flight wait for it.
    /// Errors from `fetch` are returned and nothing is stored; the next
    /// waiter then runs its own fetch.
    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> Result<V, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, AppError>>,
    {
        let cell = self.cell(key);
        let value = cell.get_or_try_init(fetch).await?;
        Ok(value.clone())
    }
}

impl<K, V> Default for LookupCache<K, V>
where
    K: Eq + Hash + Copy,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Cached resolver
// ---------------------------------------------------------------------------

/// What the attachment URL builder needs to know about an owning page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRef {
    pub slug: String,
    pub book_id: BookId,
}

/// A [`SlugResolver`] that fetches parents through the API client and
/// remembers what it saw.
pub struct CachedSlugResolver {
    client: BookStackHttpClient,
    book_slugs: LookupCache<BookId, String>,
    pages: LookupCache<PageId, PageRef>,
}

impl CachedSlugResolver {
    pub fn new(client: BookStackHttpClient) -> Self {
        Self {
            client,
            book_slugs: LookupCache::new(),
            pages: LookupCache::new(),
        }
    }

    /// Records the slug of a book already in hand.
    pub fn prime_book(&self, book: &Book) {
        if !book.slug.trim().is_empty() {
            self.book_slugs.insert(book.id, book.slug.clone());
        }
    }

    /// Records the slug and owning book of a page already in hand.
    pub fn prime_page(&self, page: &Page) {
        if !page.slug.trim().is_empty() {
            self.pages.insert(
                page.id,
                PageRef {
                    slug: page.slug.clone(),
                    book_id: page.book_id,
                },
            );
        }
        if let Some(book_slug) = page.book_slug.as_deref() {
            if !book_slug.trim().is_empty() {
                self.book_slugs.insert(page.book_id, book_slug.to_string());
            }
        }
    }

    pub fn cached_books(&self) -> usize {
        self.book_slugs.len()
    }

    pub fn cached_pages(&self) -> usize {
        self.pages.len()
    }

    async fn fetch_book_slug(&self, id: BookId) -> Result<String, AppError> {
        let book: Book = self
            .client
            .get_json(&format!("books/{}", id), Vec::new())
            .await?;
        Ok(slug_or_id(&book.slug, id.get()))
    }

    async fn fetch_page_ref(&self, id: PageId) -> Result<PageRef, AppError> {
        let page: Page = self
            .client
            .get_json(&format!("pages/{}", id), Vec::new())
            .await?;
        Ok(PageRef {
            slug: slug_or_id(&page.slug, id.get()),
            book_id: page.book_id,
        })
    }
}

#[async_trait::async_trait]
impl SlugResolver for CachedSlugResolver {
    async fn book_slug(&self, id: BookId) -> String {
        match self
            .book_slugs
            .get_or_fetch(id, || self.fetch_book_slug(id))
            .await
        {
            Ok(slug) => slug,
            Err(e) => {
                log::debug!("Could not resolve slug for book {}: {}", id, e);
                id.as_segment()
            }
        }
    }

    async fn page_ref(&self, id: PageId) -> Option<PageRef> {
        match self.pages.get_or_fetch(id, || self.fetch_page_ref(id)).await {
            Ok(page) => Some(page),
            Err(e) => {
                log::debug!("Could not resolve page {}: {}", id, e);
                None
            }
        }
    }
}

/// The slug, or the stringified id when the slug is blank.
pub fn slug_or_id(slug: &str, id: u64) -> String {
    let slug = slug.trim();
    if slug.is_empty() {
        id.to_string()
    } else {
        slug.to_string()
    }
}
