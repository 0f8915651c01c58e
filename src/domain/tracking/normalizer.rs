//! Field-specific canonicalization of UTM values.
//!
//! Campaigns and terms end in a compact date marker. Callers type those
//! markers in several shapes, so the final underscore-delimited token is
//! rewritten to one canonical form. Tokens that do not look like a date pass
//! through untouched.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::slugger::{SlugCharset, slug, slug_with};

static TWO_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{2}$").unwrap());
static MMYY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9]{2})([0-9]{2})$").unwrap());
static DDMMYYYY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2})([0-9]{2})([0-9]{4})$").unwrap());

/// Normalizes source, medium and content values: `[a-z0-9_]` only.
pub fn normalize_utm(text: &str) -> String {
    slug_with(text, SlugCharset::UnderscoreOnly)
}

/// Normalizes a campaign, rewriting a trailing `mmyy` or `mm_yy` to `mm-yy`.
///
/// ```
/// use link_hub::domain::tracking::normalize_campaign;
///
/// assert_eq!(normalize_campaign("vde1f_90d_evento_0124"), "vde1f_90d_evento_01-24");
/// assert_eq!(normalize_campaign("vde1f_90d_evento_01_24"), "vde1f_90d_evento_01-24");
/// ```
pub fn normalize_campaign(text: &str) -> String {
    let slugged = slug(text);

    let Some((head, last)) = split_last_token(&slugged) else {
        return slugged;
    };

    if let Some(caps) = MMYY.captures(last) {
        return join_last_token(head, &format!("{}-{}", &caps[1], &caps[2]));
    }

    if TWO_DIGITS.is_match(last)
        && let Some(head) = head
        && let Some((rest, prev)) = split_last_token(head)
        && TWO_DIGITS.is_match(prev)
    {
        return join_last_token(rest, &format!("{prev}-{last}"));
    }

    slugged
}

/// Normalizes a term, rewriting a trailing `ddmmyyyy` to `dd-mm-yyyy`.
///
/// An already hyphenated `dd-mm-yyyy` token is left as is.
pub fn normalize_utm_term(text: &str) -> String {
    let slugged = slug(text);

    let Some((head, last)) = split_last_token(&slugged) else {
        return slugged;
    };

    match DDMMYYYY.captures(last) {
        Some(caps) => join_last_token(head, &format!("{}-{}-{}", &caps[1], &caps[2], &caps[3])),
        None => slugged,
    }
}

/// Splits off the final underscore-delimited token.
///
/// Returns `None` for an empty string. The head is `None` when the input is
/// a single token.
fn split_last_token(s: &str) -> Option<(Option<&str>, &str)> {
    if s.is_empty() {
        return None;
    }
    match s.rsplit_once('_') {
        Some((head, last)) => Some((Some(head), last)),
        None => Some((None, s)),
    }
}

fn join_last_token(head: Option<&str>, last: &str) -> String {
    match head {
        Some(head) => format!("{head}_{last}"),
        None => last.to_string(),
    }
}

/// The five UTM fields after canonicalization.
///
/// Every value matches `[a-z0-9_-]*` with no leading, trailing or repeated
/// separators. Content and term are empty when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedFields {
    pub utm_source: String,
    pub utm_medium: String,
    pub utm_campaign: String,
    pub utm_content: String,
    pub utm_term: String,
}

impl NormalizedFields {
    /// Applies each field's normalizer to raw caller input.
    pub fn from_raw(
        source: &str,
        medium: &str,
        campaign: &str,
        content: Option<&str>,
        term: Option<&str>,
    ) -> Self {
        Self {
            utm_source: normalize_utm(source),
            utm_medium: normalize_utm(medium),
            utm_campaign: normalize_campaign(campaign),
            utm_content: normalize_utm(content.unwrap_or_default()),
            utm_term: normalize_utm_term(term.unwrap_or_default()),
        }
    }

    /// Names the required fields that normalized to an empty string.
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("utm_source", &self.utm_source),
            ("utm_medium", &self.utm_medium),
            ("utm_campaign", &self.utm_campaign),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}
