//! Tracking link entity and its value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::tracking::{NormalizedFields, TrackingParamSet};

/// Funnel a link belongs to. Decides which tracking fields are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    /// Acquisition link, attributed through `utm_id`.
    #[default]
    Captacao,
    /// Sales link, attributed through `xcode`, `src` and `sck`.
    Vendas,
}

impl LinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Captacao => "captacao",
            LinkType::Vendas => "vendas",
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown link type '{0}', expected 'captacao' or 'vendas'")]
pub struct UnknownLinkType(pub String);

impl FromStr for LinkType {
    type Err = UnknownLinkType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "captacao" => Ok(LinkType::Captacao),
            "vendas" => Ok(LinkType::Vendas),
            _ => Err(UnknownLinkType(s.to_string())),
        }
    }
}

/// Lifecycle state of a stored link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    #[default]
    Active,
    Archived,
}

impl LinkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkStatus::Active => "active",
            LinkStatus::Archived => "archived",
        }
    }
}

impl FromStr for LinkStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(LinkStatus::Active),
            "archived" => Ok(LinkStatus::Archived),
            other => Err(format!("unknown link status '{other}'")),
        }
    }
}

/// Caller-provided metadata attached to a generated link.
#[derive(Debug, Clone)]
pub struct LinkMetadata {
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// A generated tracking link.
///
/// Immutable once created; only the status may change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub link_type: LinkType,
    pub base_url: String,
    pub path: String,
    pub full_url: String,
    pub utm_source: String,
    pub utm_medium: String,
    pub utm_campaign: String,
    pub utm_content: String,
    pub utm_term: String,
    pub src: Option<String>,
    pub sck: Option<String>,
    pub xcode: Option<String>,
    pub custom_params: BTreeMap<String, String>,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub status: LinkStatus,
}

impl Link {
    /// Composes the record from the outputs of the generation pipeline.
    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        id: String,
        link_type: LinkType,
        base_url: String,
        path: Option<String>,
        fields: NormalizedFields,
        tracking: TrackingParamSet,
        full_url: String,
        custom_params: BTreeMap<String, String>,
        metadata: LinkMetadata,
    ) -> Self {
        Self {
            id,
            link_type,
            base_url,
            path: path.unwrap_or_default(),
            full_url,
            utm_source: fields.utm_source,
            utm_medium: fields.utm_medium,
            utm_campaign: fields.utm_campaign,
            utm_content: fields.utm_content,
            utm_term: fields.utm_term,
            src: tracking.src,
            sck: tracking.sck,
            xcode: tracking.xcode,
            custom_params,
            notes: metadata.notes,
            created_by: metadata.created_by,
            created_at: metadata.created_at,
            status: LinkStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == LinkStatus::Active
    }
}
