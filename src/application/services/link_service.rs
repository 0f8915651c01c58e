//! Tracking link generation and retrieval service.

use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use super::id_allocator::{Allocation, IdAllocator};
use crate::domain::entities::{Link, LinkMetadata, LinkRequest};
use crate::domain::repositories::{LinkFilter, LinkRepository};
use crate::domain::tracking::{
    NormalizedFields, build_full_url, build_tracking_params, normalize_utm, sanitize,
};
use crate::error::AppError;

/// A stored link together with the allocation that named it.
#[derive(Debug, Clone)]
pub struct GeneratedLink {
    pub link: Link,
    pub allocation: Allocation,
}

/// Service orchestrating link generation.
///
/// Normalizes caller fields, allocates the identifier, derives tracking
/// parameters, assembles the URL and record, then persists it.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    allocator: IdAllocator,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<dyn LinkRepository>, allocator: IdAllocator) -> Self {
        Self {
            link_repository,
            allocator,
        }
    }

    pub fn allocator(&self) -> &IdAllocator {
        &self.allocator
    }

    /// Returns true if the link storage answers.
    pub async fn storage_healthy(&self) -> bool {
        self.link_repository.health_check().await
    }

    /// Generates and stores a tracking link on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if source, medium or campaign is empty
    /// after normalization.
    ///
    /// Returns [`AppError::Conflict`] if the identifier already exists, which
    /// can only happen for identifiers issued without the atomic counter.
    pub async fn generate(
        &self,
        request: LinkRequest,
        actor: &str,
    ) -> Result<GeneratedLink, AppError> {
        let fields = normalize_request_fields(&request);

        let missing = fields.missing_required();
        if !missing.is_empty() {
            return Err(AppError::bad_request(
                "Required UTM fields are empty after normalization",
                json!({ "fields": missing }),
            ));
        }

        let allocation = self.allocator.allocate().await;

        let tracking = build_tracking_params(request.link_type, &fields, &allocation.id);
        let custom_params = sanitize(&request.custom_params);
        let full_url = build_full_url(
            &request.base_url,
            request.path.as_deref().unwrap_or_default(),
            &tracking.params,
            &custom_params,
        );

        let link = Link::assemble(
            allocation.id.clone(),
            request.link_type,
            request.base_url,
            request.path,
            fields,
            tracking,
            full_url,
            custom_params,
            LinkMetadata {
                notes: request.notes,
                created_by: actor.to_string(),
                created_at: Utc::now(),
            },
        );

        let link = self.link_repository.create(link).await?;

        info!(
            id = %link.id,
            link_type = %link.link_type,
            guaranteed_unique = allocation.guaranteed_unique(),
            created_by = %link.created_by,
            "Generated tracking link"
        );

        Ok(GeneratedLink { link, allocation })
    }

    /// Retrieves a link by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has that identifier.
    pub async fn get(&self, id: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))
    }

    /// Lists links matching `filter`, newest first.
    pub async fn list(&self, filter: LinkFilter) -> Result<Vec<Link>, AppError> {
        self.link_repository.list(filter).await
    }

    /// Deletes a link on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has that identifier.
    pub async fn delete(&self, id: &str, actor: &str) -> Result<(), AppError> {
        if !self.link_repository.delete(id, actor).await? {
            return Err(AppError::not_found("Link not found", json!({ "id": id })));
        }
        info!(%id, %actor, "Deleted tracking link");
        Ok(())
    }
}

/// Normalizes every UTM field of `request`.
///
/// Email links carrying a `date` dynamic field get their content derived
/// from it: `2026-02-12` becomes `email_d2026_02_12`.
pub fn normalize_request_fields(request: &LinkRequest) -> NormalizedFields {
    let mut fields = NormalizedFields::from_raw(
        &request.utm_source,
        &request.utm_medium,
        &request.utm_campaign,
        request.utm_content.as_deref(),
        request.utm_term.as_deref(),
    );

    if fields.utm_medium.contains("email")
        && let Some(date) = request.dynamic_fields.get("date").and_then(|v| v.as_text())
    {
        fields.utm_content = normalize_utm(&format!("email_d{}", date.replace('-', "_")));
    }

    fields
}
