//! Repository trait for tracking link storage.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::entities::{Link, LinkType};
use crate::error::AppError;

/// Default number of links returned by [`LinkRepository::list`].
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Optional filters for listing links. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LinkFilter {
    pub utm_campaign: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub link_type: Option<LinkType>,
    pub limit: Option<i64>,
}

impl LinkFilter {
    /// Returns true if `link` satisfies every set filter.
    pub fn matches(&self, link: &Link) -> bool {
        fn eq(filter: &Option<String>, value: &str) -> bool {
            filter.as_deref().is_none_or(|f| f == value)
        }

        eq(&self.utm_campaign, &link.utm_campaign)
            && eq(&self.utm_source, &link.utm_source)
            && eq(&self.utm_medium, &link.utm_medium)
            && self.link_type.is_none_or(|t| t == link.link_type)
    }

    pub fn effective_limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIST_LIMIT)
    }
}

/// Repository interface for generated links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Stores a freshly generated link and records a `create` audit event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a link with the same identifier exists.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, link: Link) -> Result<Link, AppError>;

    /// Finds a link by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_id(&self, id: &str) -> Result<Option<Link>, AppError>;

    /// Lists links matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list(&self, filter: LinkFilter) -> Result<Vec<Link>, AppError>;

    /// Deletes a link and records a `delete` audit event by `actor`.
    ///
    /// Returns `Ok(false)` if no link had that identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, id: &str, actor: &str) -> Result<bool, AppError>;

    /// Returns true if the backing store answers.
    async fn health_check(&self) -> bool;
}
