// src/operations/exports.rs
//! Book, chapter and page exports.

use super::BookStack;
use crate::api::SlugResolver;
use crate::enrich::{urls, ExportDescriptor, ExportFormat, ExportOutput};
use crate::error::AppError;
use crate::model::{Book, Chapter, Page};
use crate::types::{BookId, ChapterId, PageId};

impl BookStack {
    pub async fn export_book(
        &self,
        id: BookId,
        format: ExportFormat,
    ) -> Result<ExportOutput, AppError> {
        if !format.is_binary() {
            return self.export_text(&format!("books/{}", id), "book", format).await;
        }
        let book: Book = self.http.get_json(&format!("books/{}", id), Vec::new()).await?;
        self.resolver.prime_book(&book);
        let segment = urls::segment(&book.slug, book.id.get());
        let url = urls::book_url(self.http.base_url(), &segment);
        Ok(ExportOutput::Download(ExportDescriptor::new(format, &url, &segment)))
    }

    pub async fn export_chapter(
        &self,
        id: ChapterId,
        format: ExportFormat,
    ) -> Result<ExportOutput, AppError> {
        if !format.is_binary() {
            return self
                .export_text(&format!("chapters/{}", id), "chapter", format)
                .await;
        }
        let chapter: Chapter = self
            .http
            .get_json(&format!("chapters/{}", id), Vec::new())
            .await?;
        let book = self.book_segment(chapter.book_id, chapter.book_slug.as_deref()).await;
        let segment = urls::segment(&chapter.slug, chapter.id.get());
        let url = urls::chapter_url(self.http.base_url(), &book, &segment);
        Ok(ExportOutput::Download(ExportDescriptor::new(format, &url, &segment)))
    }

    pub async fn export_page(
        &self,
        id: PageId,
        format: ExportFormat,
    ) -> Result<ExportOutput, AppError> {
        if !format.is_binary() {
            return self.export_text(&format!("pages/{}", id), "page", format).await;
        }
        let page: Page = self.http.get_json(&format!("pages/{}", id), Vec::new()).await?;
        self.resolver.prime_page(&page);
        let book = self.book_segment(page.book_id, page.book_slug.as_deref()).await;
        let segment = urls::segment(&page.slug, page.id.get());
        let url = urls::page_url(self.http.base_url(), &book, &segment);
        Ok(ExportOutput::Download(ExportDescriptor::new(format, &url, &segment)))
    }

    async fn export_text(
        &self,
        entity_path: &str,
        entity: &str,
        format: ExportFormat,
    ) -> Result<ExportOutput, AppError> {
        let content = self
            .http
            .get_text(&format!("{}/export/{}", entity_path, format))
            .await?;
        log::debug!("Exported {} as {} ({} bytes)", entity_path, format, content.len());
        ExportOutput::text(format, entity, content)
    }

    async fn book_segment(&self, id: BookId, known: Option<&str>) -> String {
        match known.map(str::trim).filter(|s| !s.is_empty()) {
            Some(slug) => slug.to_string(),
            None => self.resolver.book_slug(id).await,
        }
    }
}
