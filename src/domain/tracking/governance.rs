//! Governance of caller-supplied custom query parameters.
//!
//! Custom parameters are informational add-ons (coupon codes and the like).
//! They must never override a governed tracking field, so reserved keys are
//! stripped before the URL is assembled.

use std::collections::BTreeMap;

/// Query parameter names owned by the tracking builder.
pub const RESERVED_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_content",
    "utm_term",
    "utm_id",
    "src",
    "sck",
    "xcode",
];

/// Returns true if `key` is a reserved tracking parameter, ignoring case.
pub fn is_reserved(key: &str) -> bool {
    RESERVED_PARAMS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(key))
}

/// Removes every reserved key from `custom_params`.
pub fn sanitize(custom_params: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    custom_params
        .iter()
        .filter(|(key, _)| {
            let reserved = is_reserved(key.trim());
            if reserved {
                tracing::debug!(key = %key, "Dropping reserved custom parameter");
            }
            !reserved
        })
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_keeps_informational_params() {
        let input = params(&[("coupon", "ABC"), ("ref", "bio")]);
        assert_eq!(sanitize(&input), input);
    }

    #[test]
    fn test_strips_every_reserved_key() {
        let pairs: Vec<(&str, &str)> = RESERVED_PARAMS.iter().map(|k| (*k, "x")).collect();
        let mut input = params(&pairs);
        input.insert("coupon".into(), "ABC".into());

        let sanitized = sanitize(&input);
        assert_eq!(sanitized, params(&[("coupon", "ABC")]));
    }

    #[test]
    fn test_strips_case_insensitively() {
        let input = params(&[("UTM_ID", "attacker"), ("Xcode", "x"), ("SRC", "y")]);
        assert!(sanitize(&input).is_empty());
    }

    #[test]
    fn test_strips_padded_keys() {
        let input = params(&[(" utm_source ", "spoof")]);
        assert!(sanitize(&input).is_empty());
    }

    #[test]
    fn test_is_reserved() {
        assert!(is_reserved("utm_campaign"));
        assert!(is_reserved("Utm_Term"));
        assert!(!is_reserved("utm_custom"));
        assert!(!is_reserved("coupon"));
    }
}
