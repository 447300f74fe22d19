// src/operations/admin.rs
//! Users, audit log and recycle bin. Most of these need an admin token.

use super::BookStack;
use crate::api::pagination::ListParams;
use crate::api::transport::Method;
use crate::api::{ApiCall, ApiPayload};
use crate::enrich::{
    enrich_audit_entry, enrich_recycle_bin_item, enrich_user, EnrichedAuditEntry,
    EnrichedRecycleBinItem, EnrichedUser,
};
use crate::error::AppError;
use crate::model::{AuditLogEntry, ListResponse, RecycleBinItem, User};
use crate::types::{RecycleBinItemId, UserId};
use serde::Serialize;

/// Result of restoring or permanently deleting a recycle bin entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecycleBinOutcome {
    pub id: u64,
    pub action: &'static str,
    /// Entities affected, including children of a restored book or chapter.
    pub affected: u64,
}

impl BookStack {
    pub async fn get_users(
        &self,
        params: &ListParams,
    ) -> Result<ListResponse<EnrichedUser>, AppError> {
        let list: ListResponse<User> = self.list("users", params).await?;
        let ctx = self.context();
        Ok(list.map(|user| enrich_user(&ctx, user)))
    }

    pub async fn get_user(&self, id: UserId) -> Result<EnrichedUser, AppError> {
        let user: User = self.http.get_json(&format!("users/{}", id), Vec::new()).await?;
        Ok(enrich_user(&self.context(), user))
    }

    pub async fn get_audit_log(
        &self,
        params: &ListParams,
    ) -> Result<ListResponse<EnrichedAuditEntry>, AppError> {
        let list: ListResponse<AuditLogEntry> = self.list("audit-log", params).await?;
        let ctx = self.context();
        Ok(list.map(|entry| enrich_audit_entry(&ctx, entry)))
    }

    pub async fn get_recycle_bin(
        &self,
        params: &ListParams,
    ) -> Result<ListResponse<EnrichedRecycleBinItem>, AppError> {
        let list: ListResponse<RecycleBinItem> = self.list("recycle-bin", params).await?;
        let ctx = self.context();
        Ok(list.map(|item| enrich_recycle_bin_item(&ctx, item)))
    }

    pub async fn restore_recycle_bin_item(
        &self,
        id: RecycleBinItemId,
    ) -> Result<RecycleBinOutcome, AppError> {
        self.ensure_writable("restore_recycle_bin_item")?;
        let payload = self
            .http
            .execute(ApiCall::new(Method::Put, format!("recycle-bin/{}", id)))
            .await?;
        let affected = count_field(payload, "restore_count");
        log::info!("Restored recycle bin item {} ({} entities)", id, affected);
        Ok(RecycleBinOutcome {
            id: id.get(),
            action: "restored",
            affected,
        })
    }

    /// Permanently deletes a recycle bin entry. This cannot be undone.
    pub async fn destroy_recycle_bin_item(
        &self,
        id: RecycleBinItemId,
    ) -> Result<RecycleBinOutcome, AppError> {
        self.ensure_writable("destroy_recycle_bin_item")?;
        let payload = self
            .http
            .execute(ApiCall::delete(format!("recycle-bin/{}", id)))
            .await?;
        let affected = count_field(payload, "delete_count");
        log::warn!("Permanently deleted recycle bin item {} ({} entities)", id, affected);
        Ok(RecycleBinOutcome {
            id: id.get(),
            action: "destroyed",
            affected,
        })
    }
}

fn count_field(payload: ApiPayload, field: &str) -> u64 {
    match payload {
        ApiPayload::Json(body) => body.get(field).and_then(|v| v.as_u64()).unwrap_or(0),
        _ => 0,
    }
}
