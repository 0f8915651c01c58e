//! Destination URL assembly.

use std::collections::BTreeMap;
use url::form_urlencoded::byte_serialize;

use super::params::QueryParams;

/// Joins `base_url` and `path` and appends the merged query string.
///
/// Custom parameters are merged first and tracking parameters second, so a
/// tracking value wins on a key collision. Parameters with an empty value
/// are dropped. The query string starts with `&` when the joined URL
/// already carries a `?`.
///
/// ```
/// use link_hub::domain::tracking::{QueryParams, build_full_url};
/// use std::collections::BTreeMap;
///
/// let empty = QueryParams::new();
/// let none = BTreeMap::new();
/// assert_eq!(build_full_url("https://x.com/", "/p", &empty, &none), "https://x.com/p");
///
/// let tracking: QueryParams = [("a", "b")].into_iter().collect();
/// assert_eq!(build_full_url("https://x.com", "p", &tracking, &none), "https://x.com/p?a=b");
/// ```
pub fn build_full_url(
    base_url: &str,
    path: &str,
    tracking_params: &QueryParams,
    custom_params: &BTreeMap<String, String>,
) -> String {
    let full_path = join_path(base_url, path);

    let mut merged = QueryParams::new();
    merged.extend(custom_params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    merged.extend(tracking_params.iter());

    let query = merged
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        return full_path;
    }

    let separator = if full_path.contains('?') { '&' } else { '?' };
    format!("{full_path}{separator}{query}")
}

/// Joins with exactly one slash. An empty path leaves the base untouched.
fn join_path(base_url: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return base_url.to_string();
    }
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

fn encode(s: &str) -> String {
    byte_serialize(s.as_bytes()).collect()
}
