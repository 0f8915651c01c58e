//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    /// Recorded as `created_by` when a request carries no `X-Actor` header.
    pub default_actor: Arc<str>,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService>, default_actor: impl Into<Arc<str>>) -> Self {
        Self {
            link_service,
            default_actor: default_actor.into(),
        }
    }
}
