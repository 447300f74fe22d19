// src/operations/attachments.rs
//! Page attachments: external links and uploaded files.

use super::{reject_empty_update, BookStack, Deleted};
use crate::api::pagination::ListParams;
use crate::api::transport::{FilePart, Method, MultipartForm};
use crate::enrich::{enrich_all, enrich_attachment, EnrichedAttachment};
use crate::error::AppError;
use crate::model::{Attachment, AttachmentRequest, ListResponse};
use crate::types::{AttachmentId, PageId};
use std::path::Path;

impl BookStack {
    pub async fn get_attachments(
        &self,
        params: &ListParams,
    ) -> Result<ListResponse<EnrichedAttachment>, AppError> {
        let ListResponse { data, total } =
            self.list::<Attachment>("attachments", params).await?;
        let ctx = self.context();
        let ctx = &ctx;
        let data = enrich_all(data, move |a| enrich_attachment(ctx, a)).await;
        Ok(ListResponse { data, total })
    }

    /// A single attachment. For links `content` holds the target URL.
    pub async fn get_attachment(&self, id: AttachmentId) -> Result<EnrichedAttachment, AppError> {
        let attachment: Attachment = self
            .http
            .get_json(&format!("attachments/{}", id), Vec::new())
            .await?;
        Ok(enrich_attachment(&self.context(), attachment).await)
    }

    /// Attaches an external link to a page.
    pub async fn create_attachment(
        &self,
        request: &AttachmentRequest,
    ) -> Result<EnrichedAttachment, AppError> {
        self.ensure_writable("create_attachment")?;
        request.validate_create()?;
        let attachment: Attachment = self
            .http
            .send_json(Method::Post, "attachments", request)
            .await?;
        log::info!("Created link attachment {} '{}'", attachment.id, attachment.name);
        Ok(enrich_attachment(&self.context(), attachment).await)
    }

    /// Uploads a local file as an attachment of `page_id`.
    ///
    /// `name` defaults to the file name.
    pub async fn upload_attachment(
        &self,
        page_id: PageId,
        file_path: &Path,
        name: Option<&str>,
    ) -> Result<EnrichedAttachment, AppError> {
        self.ensure_writable("upload_attachment")?;

        let filename = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::Validation(format!("'{}' is not a file path", file_path.display()))
            })?;
        let bytes = tokio::fs::read(file_path).await?;
        log::debug!("Read {} bytes from {}", bytes.len(), file_path.display());

        let display_name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(&filename)
            .to_string();
        let form = MultipartForm::new()
            .text("name", display_name)
            .text("uploaded_to", page_id.to_string())
            .file(FilePart {
                field: "file".to_string(),
                filename,
                bytes,
                mime: None,
            });

        let attachment: Attachment = self
            .http
            .upload("attachments", form, None)
            .await?
            .into_typed()?;
        log::info!("Uploaded attachment {} to page {}", attachment.id, page_id);
        Ok(enrich_attachment(&self.context(), attachment).await)
    }

    /// Renames, re-targets or moves an attachment.
    pub async fn update_attachment(
        &self,
        id: AttachmentId,
        request: &AttachmentRequest,
    ) -> Result<EnrichedAttachment, AppError> {
        self.ensure_writable("update_attachment")?;
        reject_empty_update(request, "attachment")?;
        let attachment: Attachment = self
            .http
            .send_json(Method::Put, &format!("attachments/{}", id), request)
            .await?;
        Ok(enrich_attachment(&self.context(), attachment).await)
    }

    pub async fn delete_attachment(&self, id: AttachmentId) -> Result<Deleted, AppError> {
        self.ensure_writable("delete_attachment")?;
        self.http.delete(&format!("attachments/{}", id)).await?;
        log::info!("Deleted attachment {}", id);
        Ok(Deleted::new("attachment", id.get()))
    }
}
