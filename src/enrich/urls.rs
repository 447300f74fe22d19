//! Web URLs for BookStack entities.
//!
//! Every builder takes segments that are already slug-or-id, so the
//! fallback decision lives in one place ([`slug_or_id`]).

use crate::api::cache::slug_or_id;
use crate::types::BaseUrl;

pub fn book_url(base: &BaseUrl, book_segment: &str) -> String {
    base.web(&format!("books/{}", book_segment))
}

pub fn page_url(base: &BaseUrl, book_segment: &str, page_segment: &str) -> String {
    base.web(&format!("books/{}/page/{}", book_segment, page_segment))
}

pub fn chapter_url(base: &BaseUrl, book_segment: &str, chapter_segment: &str) -> String {
    base.web(&format!("books/{}/chapter/{}", book_segment, chapter_segment))
}

pub fn shelf_url(base: &BaseUrl, shelf_segment: &str) -> String {
    base.web(&format!("shelves/{}", shelf_segment))
}

pub fn attachment_url(base: &BaseUrl, attachment_id: u64) -> String {
    base.web(&format!("attachments/{}", attachment_id))
}

/// Permalink BookStack redirects to the page wherever it lives.
pub fn page_permalink(base: &BaseUrl, page_id: u64) -> String {
    base.web(&format!("link/{}", page_id))
}

pub fn user_url(base: &BaseUrl, user_segment: &str) -> String {
    base.web(&format!("user/{}", user_segment))
}

pub fn search_url(base: &BaseUrl, query: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
    base.web(&format!("search?term={}", encoded))
}

/// Web download URL for an export of the entity at `entity_url`.
pub fn export_url(entity_url: &str, format: &str) -> String {
    format!("{}/export/{}", entity_url.trim_end_matches('/'), format)
}

/// `[name](url)`, with brackets in the name escaped.
pub fn markdown_link(name: &str, url: &str) -> String {
    let name = name.replace('[', "\\[").replace(']', "\\]");
    format!("[{}]({})", name, url)
}

/// Convenience for records whose own slug may be blank.
pub fn segment(slug: &str, id: u64) -> String {
    slug_or_id(slug, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BaseUrl {
        BaseUrl::parse("https://docs.example.com").unwrap()
    }

    #[test]
    fn page_urls_nest_under_books() {
        assert_eq!(
            page_url(&base(), "guide", "intro"),
            "https://docs.example.com/books/guide/page/intro"
        );
        assert_eq!(
            chapter_url(&base(), "guide", "basics"),
            "https://docs.example.com/books/guide/chapter/basics"
        );
    }

    #[test]
    fn blank_slug_becomes_id_segment() {
        assert_eq!(
            book_url(&base(), &segment("", 42)),
            "https://docs.example.com/books/42"
        );
        assert_eq!(
            shelf_url(&base(), &segment("team", 3)),
            "https://docs.example.com/shelves/team"
        );
    }

    #[test]
    fn search_terms_are_encoded() {
        assert_eq!(
            search_url(&base(), "install guide"),
            "https://docs.example.com/search?term=install+guide"
        );
    }

    #[test]
    fn export_urls_append_format() {
        assert_eq!(
            export_url("https://docs.example.com/books/guide", "pdf"),
            "https://docs.example.com/books/guide/export/pdf"
        );
    }

    #[test]
    fn markdown_links_escape_brackets() {
        assert_eq!(
            markdown_link("Notes [draft]", "https://x/y"),
            "[Notes \\[draft\\]](https://x/y)"
        );
    }
}
