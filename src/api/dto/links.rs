//! DTOs for link generation and management endpoints.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError};

use crate::application::services::{AllocationPath, GeneratedLink};
use crate::domain::entities::{DynamicValue, Link, LinkRequest, LinkType, UnknownLinkType};
use crate::domain::repositories::LinkFilter;
use crate::domain::tracking::is_reserved;
use crate::error::AppError;

/// Upper bound accepted for `limit` on list requests.
pub const MAX_LIST_LIMIT: i64 = 500;

/// Governed keys may only come from the tracking builder, never from the
/// caller's own query string.
fn reject_reserved_query(query: &str) -> Result<(), ValidationError> {
    let reserved: Vec<String> = url::form_urlencoded::parse(query.as_bytes())
        .map(|(key, _)| key.into_owned())
        .filter(|key| is_reserved(key.trim()))
        .collect();

    if reserved.is_empty() {
        return Ok(());
    }

    let mut error = ValidationError::new("reserved_query_param")
        .with_message("query string carries reserved tracking parameters".into());
    error.add_param("keys".into(), &reserved);
    Err(error)
}

fn validate_base_url(value: &str) -> Result<(), ValidationError> {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
            reject_reserved_query(parsed.query().unwrap_or_default())
        }
        _ => Err(ValidationError::new("http_scheme")
            .with_message("base_url must be an http or https URL".into())),
    }
}

fn validate_path(value: &str) -> Result<(), ValidationError> {
    match value.split_once('?') {
        Some((_, query)) => reject_reserved_query(query.split('#').next().unwrap_or_default()),
        None => Ok(()),
    }
}

/// Request body of `POST /api/links/generate`.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateLinkRequest {
    /// `captacao` or `vendas`. Missing or blank means `captacao`.
    pub link_type: Option<String>,

    #[validate(custom(function = "validate_base_url"))]
    pub base_url: String,

    #[validate(custom(function = "validate_path"))]
    pub path: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub utm_source: String,

    #[validate(length(min = 1, max = 200))]
    pub utm_medium: String,

    #[validate(length(min = 1, max = 200))]
    pub utm_campaign: String,

    #[validate(length(max = 200))]
    pub utm_content: Option<String>,

    #[validate(length(max = 200))]
    pub utm_term: Option<String>,

    #[serde(default)]
    pub custom_params: BTreeMap<String, String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,

    #[serde(default)]
    pub dynamic_fields: BTreeMap<String, DynamicValue>,
}

fn parse_link_type(value: Option<&str>) -> Result<Option<LinkType>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|e: UnknownLinkType| {
            AppError::bad_request(e.to_string(), json!({ "field": "link_type", "value": raw }))
        }),
    }
}

impl TryFrom<GenerateLinkRequest> for LinkRequest {
    type Error = AppError;

    fn try_from(req: GenerateLinkRequest) -> Result<Self, Self::Error> {
        let link_type = parse_link_type(req.link_type.as_deref())?.unwrap_or_default();

        Ok(LinkRequest {
            link_type,
            base_url: req.base_url,
            path: req.path,
            utm_source: req.utm_source,
            utm_medium: req.utm_medium,
            utm_campaign: req.utm_campaign,
            utm_content: req.utm_content,
            utm_term: req.utm_term,
            custom_params: req.custom_params,
            notes: req.notes,
            dynamic_fields: req.dynamic_fields,
        })
    }
}

/// A stored link plus how its identifier was issued.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    #[serde(flatten)]
    pub link: Link,
    pub id_guaranteed_unique: bool,
    pub allocation_path: AllocationPath,
}

impl From<GeneratedLink> for LinkResponse {
    fn from(generated: GeneratedLink) -> Self {
        Self {
            id_guaranteed_unique: generated.allocation.guaranteed_unique(),
            allocation_path: generated.allocation.path,
            link: generated.link,
        }
    }
}

/// Query string of `GET /api/links`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListLinksQuery {
    pub utm_campaign: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub link_type: Option<String>,

    #[validate(range(min = 1, max = MAX_LIST_LIMIT))]
    pub limit: Option<i64>,
}

impl TryFrom<ListLinksQuery> for LinkFilter {
    type Error = AppError;

    fn try_from(query: ListLinksQuery) -> Result<Self, Self::Error> {
        Ok(LinkFilter {
            link_type: parse_link_type(query.link_type.as_deref())?,
            utm_campaign: query.utm_campaign,
            utm_source: query.utm_source,
            utm_medium: query.utm_medium,
            limit: query.limit,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub total: usize,
    pub items: Vec<Link>,
}
