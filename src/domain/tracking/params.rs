//! Tracking parameter derivation per link type.

use serde::Serialize;

use super::normalizer::NormalizedFields;
use crate::domain::entities::LinkType;

/// Ordered query parameters.
///
/// Setting an existing key replaces its value in place, so the first
/// insertion decides the position and the last one decides the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Sets every pair of `other`, in order.
    pub fn extend<K, V, I>(&mut self, other: I)
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in other {
            self.set(k, v);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        params.extend(iter);
        params
    }
}

/// Output of the tracking builder.
///
/// For [`LinkType::Captacao`] `params` carries `utm_id` and the derived
/// fields are `None`. For [`LinkType::Vendas`] `utm_id` is absent and
/// `xcode`, `src` and `sck` are set both here and in `params`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingParamSet {
    pub params: QueryParams,
    pub src: Option<String>,
    pub sck: Option<String>,
    pub xcode: Option<String>,
}

/// Builds the tracking parameters for a link.
pub fn build_tracking_params(
    link_type: LinkType,
    fields: &NormalizedFields,
    link_id: &str,
) -> TrackingParamSet {
    let mut params: QueryParams = [
        ("utm_source", fields.utm_source.as_str()),
        ("utm_medium", fields.utm_medium.as_str()),
        ("utm_campaign", fields.utm_campaign.as_str()),
        ("utm_content", fields.utm_content.as_str()),
        ("utm_term", fields.utm_term.as_str()),
    ]
    .into_iter()
    .collect();

    match link_type {
        LinkType::Captacao => {
            params.set("utm_id", link_id);
            TrackingParamSet {
                params,
                src: None,
                sck: None,
                xcode: None,
            }
        }
        LinkType::Vendas => {
            let src = format!("{}_{}", fields.utm_source, fields.utm_content)
                .trim_matches('_')
                .to_string();
            let sck = fields.utm_medium.clone();

            params.set("xcode", link_id);
            params.set("src", src.as_str());
            params.set("sck", sck.as_str());

            TrackingParamSet {
                params,
                src: Some(src),
                sck: Some(sck),
                xcode: Some(link_id.to_string()),
            }
        }
    }
}
