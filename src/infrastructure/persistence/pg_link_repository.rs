//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::entities::{AuditAction, AuditEvent, Link, LinkStatus, LinkType};
use crate::domain::repositories::{LinkFilter, LinkRepository};
use crate::error::AppError;

const SELECT_LINK: &str = r#"
    SELECT id, link_type, base_url, path, full_url,
           utm_source, utm_medium, utm_campaign, utm_content, utm_term,
           src, sck, xcode, custom_params, notes, created_by, created_at, status
    FROM links
"#;

#[derive(FromRow)]
struct LinkRow {
    id: String,
    link_type: String,
    base_url: String,
    path: String,
    full_url: String,
    utm_source: String,
    utm_medium: String,
    utm_campaign: String,
    utm_content: String,
    utm_term: String,
    src: Option<String>,
    sck: Option<String>,
    xcode: Option<String>,
    custom_params: Json<BTreeMap<String, String>>,
    notes: Option<String>,
    created_by: String,
    created_at: DateTime<Utc>,
    status: String,
}

impl TryFrom<LinkRow> for Link {
    type Error = AppError;

    fn try_from(row: LinkRow) -> Result<Self, Self::Error> {
        let link_type = row.link_type.parse::<LinkType>().map_err(|e| {
            AppError::internal("Corrupt link row", json!({ "id": row.id, "reason": e.to_string() }))
        })?;
        let status = row.status.parse::<LinkStatus>().map_err(|e| {
            AppError::internal("Corrupt link row", json!({ "id": row.id, "reason": e }))
        })?;

        Ok(Link {
            id: row.id,
            link_type,
            base_url: row.base_url,
            path: row.path,
            full_url: row.full_url,
            utm_source: row.utm_source,
            utm_medium: row.utm_medium,
            utm_campaign: row.utm_campaign,
            utm_content: row.utm_content,
            utm_term: row.utm_term,
            src: row.src,
            sck: row.sck,
            xcode: row.xcode,
            custom_params: row.custom_params.0,
            notes: row.notes,
            created_by: row.created_by,
            created_at: row.created_at,
            status,
        })
    }
}

/// PostgreSQL repository for generated links.
///
/// Every mutation writes its audit event in the same transaction.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn record_audit(
        tx: &mut Transaction<'_, Postgres>,
        event: &AuditEvent,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO link_audits (link_id, actor, action, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(&event.link_id)
        .bind(&event.actor)
        .bind(event.action.as_str())
        .bind(event.timestamp)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, link: Link) -> Result<Link, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO links (
                id, link_type, base_url, path, full_url,
                utm_source, utm_medium, utm_campaign, utm_content, utm_term,
                src, sck, xcode, custom_params, notes, created_by, created_at, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(&link.id)
        .bind(link.link_type.as_str())
        .bind(&link.base_url)
        .bind(&link.path)
        .bind(&link.full_url)
        .bind(&link.utm_source)
        .bind(&link.utm_medium)
        .bind(&link.utm_campaign)
        .bind(&link.utm_content)
        .bind(&link.utm_term)
        .bind(&link.src)
        .bind(&link.sck)
        .bind(&link.xcode)
        .bind(Json(&link.custom_params))
        .bind(&link.notes)
        .bind(&link.created_by)
        .bind(link.created_at)
        .bind(link.status.as_str())
        .execute(&mut *tx)
        .await?;

        let event = AuditEvent::new(&link.id, &link.created_by, AuditAction::Create);
        Self::record_audit(&mut tx, &event).await?;

        tx.commit().await?;

        Ok(link)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Link>, AppError> {
        let sql = format!("{SELECT_LINK} WHERE id = $1");
        let row: Option<LinkRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Link::try_from).transpose()
    }

    async fn list(&self, filter: LinkFilter) -> Result<Vec<Link>, AppError> {
        let limit = filter.effective_limit();
        let link_type = filter.link_type.map(|t| t.as_str());

        let sql = format!(
            r#"{SELECT_LINK}
            WHERE ($1::text IS NULL OR utm_campaign = $1)
              AND ($2::text IS NULL OR utm_source = $2)
              AND ($3::text IS NULL OR utm_medium = $3)
              AND ($4::text IS NULL OR link_type = $4)
            ORDER BY created_at DESC, id DESC
            LIMIT $5
            "#
        );

        let rows: Vec<LinkRow> = sqlx::query_as(&sql)
            .bind(filter.utm_campaign)
            .bind(filter.utm_source)
            .bind(filter.utm_medium)
            .bind(link_type)
            .bind(limit)
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(Link::try_from).collect()
    }

    async fn delete(&self, id: &str, actor: &str) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        if deleted {
            let event = AuditEvent::new(id, actor, AuditAction::Delete);
            Self::record_audit(&mut tx, &event).await?;
        }

        tx.commit().await?;

        Ok(deleted)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
