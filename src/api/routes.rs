//! API route configuration.

use crate::api::handlers::{
    delete_link_handler, generate_link_handler, get_link_handler, list_links_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link endpoints, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST   /links/generate` - Generate and store a tracking link
/// - `GET    /links`          - List links (filterable)
/// - `GET    /links/{id}`     - Fetch one link
/// - `DELETE /links/{id}`     - Delete a link
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/links/generate", post(generate_link_handler))
        .route("/links", get(list_links_handler))
        .route(
            "/links/{id}",
            get(get_link_handler).delete(delete_link_handler),
        )
}
