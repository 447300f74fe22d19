// src/operations/comments.rs
//! Page comments and replies.

use super::{reject_empty_update, BookStack, Deleted};
use crate::api::pagination::ListParams;
use crate::api::transport::Method;
use crate::enrich::{enrich_comment, EnrichedComment};
use crate::error::AppError;
use crate::model::{Comment, CommentRequest, ListResponse};
use crate::types::{CommentId, PageId};

impl BookStack {
    /// Lists comments, optionally only those on one page.
    pub async fn get_comments(
        &self,
        page_id: Option<PageId>,
        params: &ListParams,
    ) -> Result<ListResponse<EnrichedComment>, AppError> {
        let params = match page_id {
            Some(page_id) => params
                .clone()
                .filter("commentable_type", "page")
                .filter("commentable_id", page_id.to_string()),
            None => params.clone(),
        };
        let list: ListResponse<Comment> = self.list("comments", &params).await?;
        let ctx = self.context();
        Ok(list.map(|comment| enrich_comment(&ctx, comment)))
    }

    pub async fn get_comment(&self, id: CommentId) -> Result<EnrichedComment, AppError> {
        let comment: Comment = self
            .http
            .get_json(&format!("comments/{}", id), Vec::new())
            .await?;
        Ok(enrich_comment(&self.context(), comment))
    }

    /// Adds a comment to a page, or a reply when `reply_to` is set.
    pub async fn create_comment(
        &self,
        request: &CommentRequest,
    ) -> Result<EnrichedComment, AppError> {
        self.ensure_writable("create_comment")?;
        request.validate_create()?;
        let comment: Comment = self
            .http
            .send_json(Method::Post, "comments", request)
            .await?;
        log::info!("Created comment {}", comment.id);
        Ok(enrich_comment(&self.context(), comment))
    }

    /// Edits the text of a comment, or archives it.
    pub async fn update_comment(
        &self,
        id: CommentId,
        request: &CommentRequest,
    ) -> Result<EnrichedComment, AppError> {
        self.ensure_writable("update_comment")?;
        reject_empty_update(request, "comment")?;
        let comment: Comment = self
            .http
            .send_json(Method::Put, &format!("comments/{}", id), request)
            .await?;
        Ok(enrich_comment(&self.context(), comment))
    }

    pub async fn delete_comment(&self, id: CommentId) -> Result<Deleted, AppError> {
        self.ensure_writable("delete_comment")?;
        self.http.delete(&format!("comments/{}", id)).await?;
        log::info!("Deleted comment {}", id);
        Ok(Deleted::new("comment", id.get()))
    }
}
