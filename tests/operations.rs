// tests/operations.rs
//! BookStack operations end to end over a scripted transport.

mod common;

use bookstack_mcp::api::transport::{HttpResponse, Method, RequestBody};
use bookstack_mcp::model::{BookRequest, PageRequest};
use bookstack_mcp::operations::{ChangeKind, SearchParams};
use bookstack_mcp::{
    AppError, AttachmentId, BookId, ExportFormat, ExportOutput, ListParams, PageId,
    RecycleBinItemId, WRITE_DISABLED_MARKER,
};
use common::{bookstack, bookstack_over, ScriptedTransport, YieldingTransport};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn guide_book(transport: &ScriptedTransport) {
    transport.on_json(
        Method::Get,
        "books/3",
        json!({"id": 3, "name": "Guide", "slug": "guide"}),
    );
}

fn intro_page(transport: &ScriptedTransport) {
    transport.on_json(
        Method::Get,
        "pages/7",
        json!({
            "id": 7,
            "book_id": 3,
            "chapter_id": 0,
            "name": "Intro",
            "slug": "intro",
            "html": "<p>Hello <b>world</b></p>",
            "updated_at": "2024-06-15T09:00:00.000000Z"
        }),
    );
}

#[tokio::test]
async fn page_url_is_built_from_book_and_page_slugs() {
    let transport = ScriptedTransport::new();
    intro_page(&transport);
    guide_book(&transport);
    let service = bookstack(transport.clone(), false);

    let page = service.get_page(PageId::new(7)).await.unwrap();

    assert_eq!(page.derived.url, "https://docs.example.com/books/guide/page/intro");
    assert_eq!(
        page.derived.direct_link,
        "[Intro](https://docs.example.com/books/guide/page/intro)"
    );
    assert_eq!(page.derived.word_count, 2);
    assert_eq!(page.derived.last_updated, "3 hours ago");
}

#[tokio::test]
async fn book_slugs_are_fetched_once() {
    let transport = ScriptedTransport::new();
    intro_page(&transport);
    guide_book(&transport);
    let service = bookstack(transport.clone(), false);

    service.get_page(PageId::new(7)).await.unwrap();
    service.get_page(PageId::new(7)).await.unwrap();

    assert_eq!(transport.calls_to("pages/7"), 2);
    assert_eq!(transport.calls_to("books/3"), 1);
    assert_eq!(service.resolver().cached_books(), 1);
}

#[tokio::test]
async fn overlapping_lookups_fetch_each_book_once() {
    let transport = ScriptedTransport::new();
    transport.on_json(
        Method::Get,
        "search",
        json!({
            "data": [
                {"id": 7, "name": "Intro", "slug": "intro", "type": "page", "book_id": 3},
                {"id": 8, "name": "Setup", "slug": "setup", "type": "page", "book_id": 3},
                {"id": 9, "name": "Usage", "slug": "usage", "type": "page", "book_id": 3}
            ],
            "total": 3
        }),
    );
    guide_book(&transport);
    let service = bookstack_over(Arc::new(YieldingTransport(transport.clone())), false);

    let hits = service
        .search_content(&SearchParams::new("install"))
        .await
        .unwrap();

    assert_eq!(transport.calls_to("books/3"), 1);
    let urls: Vec<&str> = hits.data.iter().map(|h| h.derived.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://docs.example.com/books/guide/page/intro",
            "https://docs.example.com/books/guide/page/setup",
            "https://docs.example.com/books/guide/page/usage",
        ]
    );
}

#[tokio::test]
async fn listing_keeps_order_and_degrades_unresolvable_parents() {
    let transport = ScriptedTransport::new();
    transport.on_json(
        Method::Get,
        "pages",
        json!({
            "data": [
                {"id": 7, "book_id": 3, "name": "Intro", "slug": "intro"},
                {"id": 8, "book_id": 4, "name": "Setup", "slug": "setup"},
                {"id": 9, "book_id": 3, "name": "Usage", "slug": ""}
            ],
            "total": 42
        }),
    );
    guide_book(&transport);
    let service = bookstack(transport.clone(), false);

    let pages = service.get_pages(&ListParams::new()).await.unwrap();

    assert_eq!(pages.total, 42);
    let urls: Vec<&str> = pages.data.iter().map(|p| p.derived.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://docs.example.com/books/guide/page/intro",
            "https://docs.example.com/books/4/page/setup",
            "https://docs.example.com/books/guide/page/9",
        ]
    );
}

#[tokio::test]
async fn list_parameters_reach_the_query_string() {
    let transport = ScriptedTransport::new();
    transport.on_json(Method::Get, "books", json!({"data": [], "total": 0}));
    let service = bookstack(transport.clone(), false);

    let params = ListParams::new()
        .count(900)
        .offset(40)
        .sort("-updated_at")
        .filter("name:like", "%guide%");
    service.get_books(&params).await.unwrap();

    let request = &transport.requests()[0];
    assert_eq!(
        request.query,
        vec![
            ("count".to_string(), "500".to_string()),
            ("offset".to_string(), "40".to_string()),
            ("sort".to_string(), "-updated_at".to_string()),
            ("filter[name:like]".to_string(), "%guide%".to_string()),
        ]
    );
}

#[tokio::test]
async fn writes_are_refused_without_touching_the_network() {
    let transport = ScriptedTransport::new();
    let service = bookstack(transport.clone(), false);

    let request = BookRequest {
        name: Some("New".to_string()),
        ..Default::default()
    };
    let errors = vec![
        service.create_book(&request).await.unwrap_err(),
        service.delete_page(PageId::new(1)).await.unwrap_err(),
        service
            .restore_recycle_bin_item(RecycleBinItemId::new(2))
            .await
            .unwrap_err(),
    ];

    for err in errors {
        assert!(matches!(err, AppError::WriteDisabled { .. }));
        assert!(err.to_string().contains(WRITE_DISABLED_MARKER));
    }
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn writes_go_through_when_enabled() {
    let transport = ScriptedTransport::new();
    transport.on_json(
        Method::Post,
        "pages",
        json!({"id": 11, "book_id": 3, "name": "Draft", "slug": "draft"}),
    );
    transport.on(Method::Delete, "pages/11", HttpResponse::new(204, ""));
    guide_book(&transport);
    let service = bookstack(transport.clone(), true);

    let request = PageRequest {
        book_id: Some(BookId::new(3)),
        name: Some("Draft".to_string()),
        markdown: Some("# Draft".to_string()),
        ..Default::default()
    };
    let created = service.create_page(&request).await.unwrap();
    assert_eq!(created.derived.url, "https://docs.example.com/books/guide/page/draft");

    let posted = &transport.requests()[0];
    assert_eq!(
        posted.body,
        RequestBody::Json(json!({"book_id": 3, "name": "Draft", "markdown": "# Draft"}))
    );

    let deleted = service.delete_page(PageId::new(11)).await.unwrap();
    assert!(deleted.deleted);
    assert_eq!(deleted.id, 11);
}

#[tokio::test]
async fn invalid_writes_fail_before_sending() {
    let transport = ScriptedTransport::new();
    let service = bookstack(transport.clone(), true);

    let no_parent = PageRequest {
        name: Some("Orphan".to_string()),
        html: Some("<p>x</p>".to_string()),
        ..Default::default()
    };
    assert!(service.create_page(&no_parent).await.is_err());
    assert!(service
        .update_book(BookId::new(3), &BookRequest::default())
        .await
        .is_err());
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn text_exports_return_the_body() {
    let transport = ScriptedTransport::new();
    transport.on(
        Method::Get,
        "pages/7/export/markdown",
        HttpResponse::new(200, "# Intro\n\nHello world").with_header("content-type", "text/markdown"),
    );
    let service = bookstack(transport, false);

    let output = service
        .export_page(PageId::new(7), ExportFormat::Markdown)
        .await
        .unwrap();

    match output {
        ExportOutput::Text { format, content } => {
            assert_eq!(format, ExportFormat::Markdown);
            assert_eq!(content, "# Intro\n\nHello world");
        }
        other => panic!("expected text export, got {:?}", other),
    }
}

#[tokio::test]
async fn binary_exports_describe_the_download() {
    let transport = ScriptedTransport::new();
    intro_page(&transport);
    guide_book(&transport);
    let service = bookstack(transport.clone(), false);

    let output = service
        .export_page(PageId::new(7), ExportFormat::Pdf)
        .await
        .unwrap();

    match output {
        ExportOutput::Download(descriptor) => {
            assert_eq!(
                descriptor.download_url,
                "https://docs.example.com/books/guide/page/intro/export/pdf"
            );
            assert_eq!(descriptor.filename, "intro.pdf");
            assert_eq!(descriptor.content_type, "application/pdf");
        }
        other => panic!("expected a download descriptor, got {:?}", other),
    }
    assert_eq!(transport.calls_to("pages/7/export/pdf"), 0);
}

#[tokio::test]
async fn empty_text_export_is_an_error() {
    let transport = ScriptedTransport::new();
    transport.on(
        Method::Get,
        "books/3/export/plaintext",
        HttpResponse::new(200, "").with_header("content-type", "text/plain"),
    );
    let service = bookstack(transport, false);

    let err = service
        .export_book(BookId::new(3), ExportFormat::Plaintext)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EmptyExport { .. }));
}

#[tokio::test]
async fn whitespace_text_export_is_returned_unmodified() {
    let transport = ScriptedTransport::new();
    transport.on(
        Method::Get,
        "pages/7/export/plaintext",
        HttpResponse::new(200, "  \n").with_header("content-type", "text/plain"),
    );
    let service = bookstack(transport, false);

    let output = service
        .export_page(PageId::new(7), ExportFormat::Plaintext)
        .await
        .unwrap();
    assert_eq!(
        output,
        ExportOutput::Text {
            format: ExportFormat::Plaintext,
            content: "  \n".to_string()
        }
    );
}

#[tokio::test]
async fn page_search_is_scoped_to_pages_and_optionally_one_book() {
    let transport = ScriptedTransport::new();
    transport.on_json(
        Method::Get,
        "search",
        json!({
            "data": [
                {"id": 7, "name": "Intro", "slug": "intro", "type": "page", "book_id": 3,
                 "preview_html": {"name": "Intro", "content": "<strong>install</strong> steps"}},
                {"id": 8, "name": "Setup", "slug": "setup", "type": "page", "book_id": 4}
            ],
            "total": 2
        }),
    );
    guide_book(&transport);
    let service = bookstack(transport.clone(), false);

    let hits = service
        .search_pages(&SearchParams::new("install"), Some(BookId::new(3)))
        .await
        .unwrap();

    assert_eq!(hits.total, 1);
    assert_eq!(hits.data.len(), 1);
    assert_eq!(hits.data[0].derived.url, "https://docs.example.com/books/guide/page/intro");
    assert_eq!(hits.data[0].derived.content_preview, "install steps");

    let request = &transport.requests()[0];
    assert!(request
        .query
        .contains(&("query".to_string(), "install {type:page}".to_string())));
}

#[tokio::test]
async fn recent_changes_filter_by_update_time() {
    let transport = ScriptedTransport::new();
    transport.on_json(
        Method::Get,
        "pages",
        json!({"data": [{"id": 7, "book_id": 3, "name": "Intro", "slug": "intro", "book_slug": "guide"}], "total": 1}),
    );
    let service = bookstack(transport.clone(), false);

    let changes = service
        .get_recent_changes(ChangeKind::Pages, Some(5), Some(7))
        .await
        .unwrap();

    assert_eq!(changes.since, "2024-06-08");
    assert_eq!(changes.pages.as_ref().map(Vec::len), Some(1));
    assert!(changes.books.is_none());
    assert!(changes.chapters.is_none());

    let request = &transport.requests()[0];
    assert!(request
        .query
        .contains(&("filter[updated_at:gt]".to_string(), "2024-06-08".to_string())));
    assert!(request
        .query
        .contains(&("sort".to_string(), "-updated_at".to_string())));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn recent_changes_reject_a_window_beyond_the_calendar() {
    let transport = ScriptedTransport::new();
    let service = bookstack(transport.clone(), false);

    let err = service
        .get_recent_changes(ChangeKind::All, None, Some(u32::MAX))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn attachment_page_url_falls_back_to_permalink() {
    let transport = ScriptedTransport::new();
    transport.on_json(
        Method::Get,
        "attachments/5",
        json!({"id": 5, "name": "Diagram", "extension": "png", "uploaded_to": 70}),
    );
    let service = bookstack(transport, false);

    let attachment = service.get_attachment(AttachmentId::new(5)).await.unwrap();

    assert_eq!(attachment.derived.url, "https://docs.example.com/attachments/5");
    assert_eq!(attachment.derived.page_url, "https://docs.example.com/link/70");
    assert_eq!(attachment.derived.kind, "uploaded file");
}

#[tokio::test]
async fn uploads_send_a_multipart_form() {
    let path = std::env::temp_dir().join(format!("bookstack-mcp-upload-{}.txt", std::process::id()));
    tokio::fs::write(&path, b"hello").await.unwrap();

    let transport = ScriptedTransport::new();
    transport.on_json(
        Method::Post,
        "attachments",
        json!({"id": 12, "name": "Notes", "extension": "txt", "uploaded_to": 7}),
    );
    intro_page(&transport);
    guide_book(&transport);
    let service = bookstack(transport.clone(), true);

    let uploaded = service
        .upload_attachment(PageId::new(7), &path, Some("Notes"))
        .await;
    let _ = tokio::fs::remove_file(&path).await;
    let uploaded = uploaded.unwrap();

    assert_eq!(uploaded.derived.page_url, "https://docs.example.com/books/guide/page/intro");
    match &transport.requests()[0].body {
        RequestBody::Multipart(form) => {
            assert_eq!(
                form.fields,
                vec![
                    ("name".to_string(), "Notes".to_string()),
                    ("uploaded_to".to_string(), "7".to_string()),
                ]
            );
            let file = form.file.as_ref().unwrap();
            assert_eq!(file.field, "file");
            assert_eq!(file.bytes, b"hello".to_vec());
        }
        other => panic!("expected multipart body, got {:?}", other),
    }
}

#[tokio::test]
async fn capabilities_reflect_the_write_flag() {
    let transport = ScriptedTransport::new();
    let read_only = bookstack(transport.clone(), false).get_capabilities();
    let writable = bookstack(Arc::clone(&transport), true).get_capabilities();

    assert!(!read_only.write_enabled);
    assert!(read_only.write_operations.is_empty());
    assert!(writable.write_operations.contains(&"delete_page"));
    assert_eq!(read_only.base_url, "https://docs.example.com");
    assert_eq!(transport.calls(), 0);
}
