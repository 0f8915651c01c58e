//! Handlers for link generation and management endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
};
use serde_json::{Value, json};
use validator::Validate;

use crate::api::dto::links::{GenerateLinkRequest, LinkListResponse, LinkResponse, ListLinksQuery};
use crate::domain::entities::{Link, LinkRequest};
use crate::domain::repositories::LinkFilter;
use crate::error::AppError;
use crate::state::AppState;

/// Header naming the user on whose behalf the request is made.
pub const ACTOR_HEADER: &str = "x-actor";

fn actor_from_headers<'a>(headers: &'a HeaderMap, default_actor: &'a str) -> &'a str {
    headers
        .get(ACTOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default_actor)
}

/// Generates and stores a tracking link.
///
/// # Endpoint
///
/// `POST /api/links/generate`
///
/// # Request Body
///
/// ```json
/// {
///   "link_type": "vendas",
///   "base_url": "https://metodovde.com.br",
///   "path": "concursos/carreirasjuridicas",
///   "utm_source": "WhatsApp",
///   "utm_medium": "API Disparos",
///   "utm_campaign": "VDE1F 90D Evento 0124",
///   "utm_content": "Grupos Antigos",
///   "utm_term": "aaa 12022026",
///   "custom_params": { "coupon": "ABC" }
/// }
/// ```
///
/// # Response
///
/// The stored link with `id_guaranteed_unique` and `allocation_path`.
///
/// # Errors
///
/// Returns 400 Bad Request on invalid input or an unknown `link_type`.
/// Returns 409 Conflict if a non-atomic identifier collides.
pub async fn generate_link_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<GenerateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let request = LinkRequest::try_from(payload)?;
    let actor = actor_from_headers(&headers, &state.default_actor);

    let generated = state.link_service.generate(request, actor).await?;

    Ok(Json(generated.into()))
}

/// Lists stored links, newest first.
///
/// # Endpoint
///
/// `GET /api/links?utm_campaign=&utm_source=&utm_medium=&link_type=&limit=`
pub async fn list_links_handler(
    State(state): State<AppState>,
    Query(query): Query<ListLinksQuery>,
) -> Result<Json<LinkListResponse>, AppError> {
    query.validate()?;

    let filter = LinkFilter::try_from(query)?;
    let items = state.link_service.list(filter).await?;

    Ok(Json(LinkListResponse {
        total: items.len(),
        items,
    }))
}

/// `GET /api/links/{id}`
pub async fn get_link_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Link>, AppError> {
    let link = state.link_service.get(&id).await?;
    Ok(Json(link))
}

/// Deletes a link and records who did it.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the link does not exist.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let actor = actor_from_headers(&headers, &state.default_actor);
    state.link_service.delete(&id, actor).await?;

    Ok(Json(json!({ "status": "deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_actor_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(actor_from_headers(&headers, "system_user"), "system_user");

        headers.insert(ACTOR_HEADER, HeaderValue::from_static("  "));
        assert_eq!(actor_from_headers(&headers, "system_user"), "system_user");

        headers.insert(ACTOR_HEADER, HeaderValue::from_static("ana"));
        assert_eq!(actor_from_headers(&headers, "system_user"), "ana");
    }
}
