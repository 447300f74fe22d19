//! Derived fields for each BookStack entity kind.

use super::text::{preview, strip_html, word_count};
use super::time::describe;
use super::urls;
use super::{EnrichContext, Enriched};
use crate::constants::{
    COMMENT_PREVIEW_LENGTH, CONTENT_PREVIEW_LENGTH, DESCRIPTION_PREVIEW_LENGTH, NO_CONTENT,
    NO_DESCRIPTION, SEARCH_PREVIEW_LENGTH,
};
use crate::model::{
    Attachment, AuditLogEntry, Book, Chapter, Comment, ContentType, Page, RecycleBinItem,
    SearchResult, SearchResultType, Shelf, User,
};
use crate::types::BookId;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Books
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookDerived {
    pub url: String,
    pub direct_link: String,
    pub created: String,
    pub last_updated: String,
    pub description_preview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_summary: Option<ContentSummary>,
}

/// Counts over a single book's contents listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentSummary {
    pub chapter_count: usize,
    pub page_count: usize,
    pub total_items: usize,
}

pub type EnrichedBook = Enriched<Book, BookDerived>;

pub fn enrich_book(ctx: &EnrichContext<'_>, book: Book) -> EnrichedBook {
    let url = urls::book_url(ctx.base, &urls::segment(&book.slug, book.id.get()));
    let content_summary = (!book.contents.is_empty()).then(|| summarize_contents(&book));

    let derived = BookDerived {
        direct_link: urls::markdown_link(&book.name, &url),
        url,
        created: describe(book.created_at, ctx.now),
        last_updated: describe(book.updated_at, ctx.now),
        description_preview: preview(
            Some(&book.description),
            DESCRIPTION_PREVIEW_LENGTH,
            NO_DESCRIPTION,
        ),
        content_summary,
    };
    Enriched::new(book, derived)
}

fn summarize_contents(book: &Book) -> ContentSummary {
    let chapter_count = book
        .contents
        .iter()
        .filter(|item| item.content_type == ContentType::Chapter)
        .count();
    let page_count = book
        .contents
        .iter()
        .map(|item| match item.content_type {
            ContentType::Page => 1,
            ContentType::Chapter => item.pages.len(),
        })
        .sum::<usize>();
    ContentSummary {
        chapter_count,
        page_count,
        total_items: chapter_count + page_count,
    }
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageDerived {
    pub url: String,
    pub direct_link: String,
    pub created: String,
    pub last_updated: String,
    pub content_preview: String,
    pub word_count: usize,
    pub location: String,
}

pub type EnrichedPage = Enriched<Page, PageDerived>;

pub async fn enrich_page(ctx: &EnrichContext<'_>, page: Page) -> EnrichedPage {
    let book_segment = book_segment(ctx, page.book_id, page.book_slug.as_deref()).await;
    let url = urls::page_url(
        ctx.base,
        &book_segment,
        &urls::segment(&page.slug, page.id.get()),
    );
    let body = page_text(&page);

    let location = match page.chapter() {
        Some(chapter_id) => format!("in book '{}', chapter #{}", book_segment, chapter_id),
        None => format!("in book '{}'", book_segment),
    };

    let derived = PageDerived {
        direct_link: urls::markdown_link(&page.name, &url),
        url,
        created: describe(page.created_at, ctx.now),
        last_updated: describe(page.updated_at, ctx.now),
        content_preview: preview(body.as_deref(), CONTENT_PREVIEW_LENGTH, NO_CONTENT),
        word_count: word_count(body.as_deref()),
        location,
    };
    Enriched::new(page, derived)
}

/// Plain text of a page: `text`, else markdown, else HTML without tags.
pub fn page_text(page: &Page) -> Option<String> {
    let non_blank = |s: &Option<String>| {
        s.as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string)
    };

    non_blank(&page.text)
        .or_else(|| non_blank(&page.markdown))
        .or_else(|| non_blank(&page.html).map(|html| strip_html(&html)))
}

// ---------------------------------------------------------------------------
// Chapters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterDerived {
    pub url: String,
    pub direct_link: String,
    pub created: String,
    pub last_updated: String,
    pub description_preview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<usize>,
    pub location: String,
}

pub type EnrichedChapter = Enriched<Chapter, ChapterDerived>;

pub async fn enrich_chapter(ctx: &EnrichContext<'_>, chapter: Chapter) -> EnrichedChapter {
    let book_segment = book_segment(ctx, chapter.book_id, chapter.book_slug.as_deref()).await;
    let url = urls::chapter_url(
        ctx.base,
        &book_segment,
        &urls::segment(&chapter.slug, chapter.id.get()),
    );

    let derived = ChapterDerived {
        direct_link: urls::markdown_link(&chapter.name, &url),
        url,
        created: describe(chapter.created_at, ctx.now),
        last_updated: describe(chapter.updated_at, ctx.now),
        description_preview: preview(
            Some(&chapter.description),
            DESCRIPTION_PREVIEW_LENGTH,
            NO_DESCRIPTION,
        ),
        page_count: chapter.pages.as_ref().map(Vec::len),
        location: format!("in book '{}'", book_segment),
    };
    Enriched::new(chapter, derived)
}

// ---------------------------------------------------------------------------
// Shelves
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShelfDerived {
    pub url: String,
    pub direct_link: String,
    pub created: String,
    pub last_updated: String,
    pub description_preview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_count: Option<usize>,
}

pub type EnrichedShelf = Enriched<Shelf, ShelfDerived>;

pub fn enrich_shelf(ctx: &EnrichContext<'_>, shelf: Shelf) -> EnrichedShelf {
    let url = urls::shelf_url(ctx.base, &urls::segment(&shelf.slug, shelf.id.get()));

    let derived = ShelfDerived {
        direct_link: urls::markdown_link(&shelf.name, &url),
        url,
        created: describe(shelf.created_at, ctx.now),
        last_updated: describe(shelf.updated_at, ctx.now),
        description_preview: preview(
            Some(&shelf.description),
            DESCRIPTION_PREVIEW_LENGTH,
            NO_DESCRIPTION,
        ),
        book_count: shelf.books.as_ref().map(Vec::len),
    };
    Enriched::new(shelf, derived)
}

// ---------------------------------------------------------------------------
// Attachments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachmentDerived {
    pub url: String,
    pub direct_link: String,
    /// The page this attachment belongs to.
    pub page_url: String,
    pub created: String,
    pub last_updated: String,
    pub kind: &'static str,
}

pub type EnrichedAttachment = Enriched<Attachment, AttachmentDerived>;

pub async fn enrich_attachment(
    ctx: &EnrichContext<'_>,
    attachment: Attachment,
) -> EnrichedAttachment {
    let url = urls::attachment_url(ctx.base, attachment.id.get());

    // Owner page first, then that page's book.
    let page_url = match ctx.resolver.page_ref(attachment.uploaded_to).await {
        Some(page) => {
            let book_segment = ctx.resolver.book_slug(page.book_id).await;
            urls::page_url(ctx.base, &book_segment, &page.slug)
        }
        None => urls::page_permalink(ctx.base, attachment.uploaded_to.get()),
    };

    let derived = AttachmentDerived {
        direct_link: urls::markdown_link(&attachment.name, &url),
        url,
        page_url,
        created: describe(attachment.created_at, ctx.now),
        last_updated: describe(attachment.updated_at, ctx.now),
        kind: if attachment.external {
            "external link"
        } else {
            "uploaded file"
        },
    };
    Enriched::new(attachment, derived)
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentDerived {
    pub created: String,
    pub last_updated: String,
    pub content_preview: String,
    pub is_reply: bool,
}

pub type EnrichedComment = Enriched<Comment, CommentDerived>;

pub fn enrich_comment(ctx: &EnrichContext<'_>, comment: Comment) -> EnrichedComment {
    let text = strip_html(&comment.html);
    let derived = CommentDerived {
        created: describe(comment.created_at, ctx.now),
        last_updated: describe(comment.updated_at, ctx.now),
        content_preview: preview(Some(&text), COMMENT_PREVIEW_LENGTH, NO_CONTENT),
        is_reply: comment.parent_id.is_some_and(|p| p != 0),
    };
    Enriched::new(comment, derived)
}

// ---------------------------------------------------------------------------
// Search results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchDerived {
    pub url: String,
    pub direct_link: String,
    pub content_preview: String,
    pub location: String,
}

pub type EnrichedSearchResult = Enriched<SearchResult, SearchDerived>;

pub async fn enrich_search_result(
    ctx: &EnrichContext<'_>,
    hit: SearchResult,
) -> EnrichedSearchResult {
    let own_segment = urls::segment(&hit.slug, hit.id);

    let (url, location) = match (&hit.result_type, hit.book_id) {
        (SearchResultType::Page, Some(book_id)) => {
            let book = ctx.resolver.book_slug(BookId::new(book_id)).await;
            let location = match hit.chapter_id.filter(|c| *c != 0) {
                Some(chapter_id) => format!("in book '{}', chapter #{}", book, chapter_id),
                None => format!("in book '{}'", book),
            };
            (urls::page_url(ctx.base, &book, &own_segment), location)
        }
        (SearchResultType::Chapter, Some(book_id)) => {
            let book = ctx.resolver.book_slug(BookId::new(book_id)).await;
            (
                urls::chapter_url(ctx.base, &book, &own_segment),
                format!("in book '{}'", book),
            )
        }
        (SearchResultType::Book, _) => (
            urls::book_url(ctx.base, &own_segment),
            "book".to_string(),
        ),
        (SearchResultType::Bookshelf, _) => (
            urls::shelf_url(ctx.base, &own_segment),
            "shelf".to_string(),
        ),
        _ => (hit.url.clone(), "unknown location".to_string()),
    };

    let snippet = strip_html(&hit.preview_html.content);
    let derived = SearchDerived {
        direct_link: urls::markdown_link(&hit.name, &url),
        url,
        content_preview: preview(Some(&snippet), SEARCH_PREVIEW_LENGTH, NO_CONTENT),
        location,
    };
    Enriched::new(hit, derived)
}

// ---------------------------------------------------------------------------
// Users, audit log, recycle bin
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDerived {
    pub profile_url: String,
    pub created: String,
    pub last_active: String,
}

pub type EnrichedUser = Enriched<User, UserDerived>;

pub fn enrich_user(ctx: &EnrichContext<'_>, user: User) -> EnrichedUser {
    let derived = UserDerived {
        profile_url: urls::user_url(ctx.base, &urls::segment(&user.slug, user.id.get())),
        created: describe(user.created_at, ctx.now),
        last_active: describe(user.last_activity_at, ctx.now),
    };
    Enriched::new(user, derived)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditDerived {
    pub when: String,
    pub summary: String,
}

pub type EnrichedAuditEntry = Enriched<AuditLogEntry, AuditDerived>;

pub fn enrich_audit_entry(ctx: &EnrichContext<'_>, entry: AuditLogEntry) -> EnrichedAuditEntry {
    let actor = match (&entry.user, entry.user_id) {
        (Some(user), _) => user.name.clone(),
        (None, Some(id)) => format!("user #{}", id),
        (None, None) => "system".to_string(),
    };
    let summary = format!("{} {} {}", actor, entry.activity, entry.detail)
        .trim()
        .to_string();

    let derived = AuditDerived {
        when: describe(entry.created_at, ctx.now),
        summary,
    };
    Enriched::new(entry, derived)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecycleBinDerived {
    pub deleted: String,
    pub item_name: String,
    pub item_type: String,
}

pub type EnrichedRecycleBinItem = Enriched<RecycleBinItem, RecycleBinDerived>;

pub fn enrich_recycle_bin_item(
    ctx: &EnrichContext<'_>,
    item: RecycleBinItem,
) -> EnrichedRecycleBinItem {
    let derived = RecycleBinDerived {
        deleted: describe(item.created_at, ctx.now),
        item_name: item
            .item_name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} #{}", item.deletable_type, item.deletable_id)),
        item_type: item.deletable_type.clone(),
    };
    Enriched::new(item, derived)
}

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

/// Book URL segment: the slug on the record when present, else the
/// resolver's answer (which itself falls back to the id).
async fn book_segment(ctx: &EnrichContext<'_>, book_id: BookId, known: Option<&str>) -> String {
    match known.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => slug.to_string(),
        None => ctx.resolver.book_slug(book_id).await,
    }
}
