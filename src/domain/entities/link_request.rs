//! Validated input for link generation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::link::LinkType;

/// A channel-specific extra supplied alongside a link request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DynamicValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl DynamicValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DynamicValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Raw caller fields for a new tracking link, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkRequest {
    pub link_type: LinkType,
    pub base_url: String,
    pub path: Option<String>,
    pub utm_source: String,
    pub utm_medium: String,
    pub utm_campaign: String,
    pub utm_content: Option<String>,
    pub utm_term: Option<String>,
    pub custom_params: BTreeMap<String, String>,
    pub notes: Option<String>,
    pub dynamic_fields: BTreeMap<String, DynamicValue>,
}
