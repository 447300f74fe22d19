//! BookStack record types, mirroring the REST API's entities.
//!
//! Records are transient: built from one response, enriched, handed to the
//! caller and dropped. Fields BookStack omits on some endpoints (list vs.
//! single fetch) are optional or defaulted.

mod admin;
mod attachment;
mod comment;
mod common;
mod content;
mod requests;
mod search;

pub use admin::{AuditLogEntry, RecycleBinItem, User};
pub use attachment::{Attachment, AttachmentLinks};
pub use comment::Comment;
pub use common::{Actor, ListResponse, Tag, UserSummary};
pub use content::{
    Book, BookContentItem, Chapter, ChapterPage, ContentType, Page, Shelf, ShelfBook,
};
pub use requests::{
    AttachmentRequest, BookRequest, ChapterRequest, CommentRequest, PageRequest, ShelfRequest,
};
pub use search::{SearchPreview, SearchResult, SearchResultType};
