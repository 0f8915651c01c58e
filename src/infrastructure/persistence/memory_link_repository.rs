//! In-process link repository used when no database is configured.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{AuditAction, AuditEvent, Link};
use crate::domain::repositories::{LinkFilter, LinkRepository};
use crate::error::AppError;

#[derive(Default)]
struct Inner {
    links: HashMap<String, Link>,
    audits: Vec<AuditEvent>,
}

/// Links and their audit trail kept in memory.
///
/// Contents are lost on restart.
#[derive(Default)]
pub struct MemoryLinkRepository {
    inner: RwLock<Inner>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the audit trail in insertion order.
    pub async fn audits(&self) -> Vec<AuditEvent> {
        self.inner.read().await.audits.clone()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, link: Link) -> Result<Link, AppError> {
        let mut inner = self.inner.write().await;

        if inner.links.contains_key(&link.id) {
            return Err(AppError::conflict(
                "Link identifier already exists",
                json!({ "id": link.id }),
            ));
        }

        inner
            .audits
            .push(AuditEvent::new(&link.id, &link.created_by, AuditAction::Create));
        inner.links.insert(link.id.clone(), link.clone());

        Ok(link)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Link>, AppError> {
        Ok(self.inner.read().await.links.get(id).cloned())
    }

    async fn list(&self, filter: LinkFilter) -> Result<Vec<Link>, AppError> {
        let inner = self.inner.read().await;

        let mut links: Vec<Link> = inner
            .links
            .values()
            .filter(|link| filter.matches(link))
            .cloned()
            .collect();

        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        links.truncate(usize::try_from(filter.effective_limit()).unwrap_or(0));

        Ok(links)
    }

    async fn delete(&self, id: &str, actor: &str) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;

        if inner.links.remove(id).is_none() {
            return Ok(false);
        }

        inner
            .audits
            .push(AuditEvent::new(id, actor, AuditAction::Delete));

        Ok(true)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
