// src/operations/content.rs
//! Books, pages, chapters and shelves.

use super::{reject_empty_update, BookStack, Deleted};
use crate::api::pagination::ListParams;
use crate::api::transport::Method;
use crate::enrich::{
    enrich_all, enrich_book, enrich_chapter, enrich_page, enrich_shelf, EnrichedBook,
    EnrichedChapter, EnrichedPage, EnrichedShelf,
};
use crate::error::AppError;
use crate::model::{
    Book, BookRequest, Chapter, ChapterRequest, ListResponse, Page, PageRequest, Shelf,
    ShelfRequest,
};
use crate::types::{BookId, ChapterId, PageId, ShelfId};

impl BookStack {
    // --- Books ---

    pub async fn get_books(
        &self,
        params: &ListParams,
    ) -> Result<ListResponse<EnrichedBook>, AppError> {
        let list: ListResponse<Book> = self.list("books", params).await?;
        for book in &list.data {
            self.resolver.prime_book(book);
        }
        let ctx = self.context();
        Ok(list.map(|book| enrich_book(&ctx, book)))
    }

    /// A single book, including its contents summary.
    pub async fn get_book(&self, id: BookId) -> Result<EnrichedBook, AppError> {
        let book: Book = self.http.get_json(&format!("books/{}", id), Vec::new()).await?;
        self.resolver.prime_book(&book);
        Ok(enrich_book(&self.context(), book))
    }

    pub async fn create_book(&self, request: &BookRequest) -> Result<EnrichedBook, AppError> {
        self.ensure_writable("create_book")?;
        request.validate_create()?;
        let book: Book = self.http.send_json(Method::Post, "books", request).await?;
        log::info!("Created book {} '{}'", book.id, book.name);
        self.resolver.prime_book(&book);
        Ok(enrich_book(&self.context(), book))
    }

    pub async fn update_book(
        &self,
        id: BookId,
        request: &BookRequest,
    ) -> Result<EnrichedBook, AppError> {
        self.ensure_writable("update_book")?;
        reject_empty_update(request, "book")?;
        let book: Book = self
            .http
            .send_json(Method::Put, &format!("books/{}", id), request)
            .await?;
        self.resolver.prime_book(&book);
        Ok(enrich_book(&self.context(), book))
    }

    pub async fn delete_book(&self, id: BookId) -> Result<Deleted, AppError> {
        self.ensure_writable("delete_book")?;
        self.http.delete(&format!("books/{}", id)).await?;
        log::info!("Deleted book {}", id);
        Ok(Deleted::new("book", id.get()))
    }

    // --- Pages ---

    pub async fn get_pages(
        &self,
        params: &ListParams,
    ) -> Result<ListResponse<EnrichedPage>, AppError> {
        let ListResponse { data, total } = self.list::<Page>("pages", params).await?;
        for page in &data {
            self.resolver.prime_page(page);
        }
        let ctx = self.context();
        let ctx = &ctx;
        let data = enrich_all(data, move |page| enrich_page(ctx, page)).await;
        Ok(ListResponse { data, total })
    }

    /// A single page with its full content.
    pub async fn get_page(&self, id: PageId) -> Result<EnrichedPage, AppError> {
        let page: Page = self.http.get_json(&format!("pages/{}", id), Vec::new()).await?;
        self.resolver.prime_page(&page);
        Ok(enrich_page(&self.context(), page).await)
    }

    pub async fn create_page(&self, request: &PageRequest) -> Result<EnrichedPage, AppError> {
        self.ensure_writable("create_page")?;
        request.validate_create()?;
        let page: Page = self.http.send_json(Method::Post, "pages", request).await?;
        log::info!("Created page {} '{}'", page.id, page.name);
        self.resolver.prime_page(&page);
        Ok(enrich_page(&self.context(), page).await)
    }

    /// Updates a page. Setting `book_id` or `chapter_id` moves it.
    pub async fn update_page(
        &self,
        id: PageId,
        request: &PageRequest,
    ) -> Result<EnrichedPage, AppError> {
        self.ensure_writable("update_page")?;
        reject_empty_update(request, "page")?;
        let page: Page = self
            .http
            .send_json(Method::Put, &format!("pages/{}", id), request)
            .await?;
        self.resolver.prime_page(&page);
        Ok(enrich_page(&self.context(), page).await)
    }

    pub async fn delete_page(&self, id: PageId) -> Result<Deleted, AppError> {
        self.ensure_writable("delete_page")?;
        self.http.delete(&format!("pages/{}", id)).await?;
        log::info!("Deleted page {}", id);
        Ok(Deleted::new("page", id.get()))
    }

    // --- Chapters ---

    pub async fn get_chapters(
        &self,
        params: &ListParams,
    ) -> Result<ListResponse<EnrichedChapter>, AppError> {
        let ListResponse { data, total } = self.list::<Chapter>("chapters", params).await?;
        let ctx = self.context();
        let ctx = &ctx;
        let data = enrich_all(data, move |chapter| enrich_chapter(ctx, chapter)).await;
        Ok(ListResponse { data, total })
    }

    /// A single chapter with its page listing.
    pub async fn get_chapter(&self, id: ChapterId) -> Result<EnrichedChapter, AppError> {
        let chapter: Chapter = self
            .http
            .get_json(&format!("chapters/{}", id), Vec::new())
            .await?;
        Ok(enrich_chapter(&self.context(), chapter).await)
    }

    pub async fn create_chapter(
        &self,
        request: &ChapterRequest,
    ) -> Result<EnrichedChapter, AppError> {
        self.ensure_writable("create_chapter")?;
        request.validate_create()?;
        let chapter: Chapter = self.http.send_json(Method::Post, "chapters", request).await?;
        log::info!("Created chapter {} '{}'", chapter.id, chapter.name);
        Ok(enrich_chapter(&self.context(), chapter).await)
    }

    pub async fn update_chapter(
        &self,
        id: ChapterId,
        request: &ChapterRequest,
    ) -> Result<EnrichedChapter, AppError> {
        self.ensure_writable("update_chapter")?;
        reject_empty_update(request, "chapter")?;
        let chapter: Chapter = self
            .http
            .send_json(Method::Put, &format!("chapters/{}", id), request)
            .await?;
        Ok(enrich_chapter(&self.context(), chapter).await)
    }

    pub async fn delete_chapter(&self, id: ChapterId) -> Result<Deleted, AppError> {
        self.ensure_writable("delete_chapter")?;
        self.http.delete(&format!("chapters/{}", id)).await?;
        log::info!("Deleted chapter {}", id);
        Ok(Deleted::new("chapter", id.get()))
    }

    // --- Shelves ---

    pub async fn get_shelves(
        &self,
        params: &ListParams,
    ) -> Result<ListResponse<EnrichedShelf>, AppError> {
        let list: ListResponse<Shelf> = self.list("shelves", params).await?;
        let ctx = self.context();
        Ok(list.map(|shelf| enrich_shelf(&ctx, shelf)))
    }

    /// A single shelf with its books.
    pub async fn get_shelf(&self, id: ShelfId) -> Result<EnrichedShelf, AppError> {
        let shelf: Shelf = self
            .http
            .get_json(&format!("shelves/{}", id), Vec::new())
            .await?;
        Ok(enrich_shelf(&self.context(), shelf))
    }

    pub async fn create_shelf(&self, request: &ShelfRequest) -> Result<EnrichedShelf, AppError> {
        self.ensure_writable("create_shelf")?;
        request.validate_create()?;
        let shelf: Shelf = self.http.send_json(Method::Post, "shelves", request).await?;
        log::info!("Created shelf {} '{}'", shelf.id, shelf.name);
        Ok(enrich_shelf(&self.context(), shelf))
    }

    pub async fn update_shelf(
        &self,
        id: ShelfId,
        request: &ShelfRequest,
    ) -> Result<EnrichedShelf, AppError> {
        self.ensure_writable("update_shelf")?;
        reject_empty_update(request, "shelf")?;
        let shelf: Shelf = self
            .http
            .send_json(Method::Put, &format!("shelves/{}", id), request)
            .await?;
        Ok(enrich_shelf(&self.context(), shelf))
    }

    pub async fn delete_shelf(&self, id: ShelfId) -> Result<Deleted, AppError> {
        self.ensure_writable("delete_shelf")?;
        self.http.delete(&format!("shelves/{}", id)).await?;
        log::info!("Deleted shelf {}", id);
        Ok(Deleted::new("shelf", id.get()))
    }
}
