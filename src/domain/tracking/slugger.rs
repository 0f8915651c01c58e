//! Free text to canonical slug conversion.
//!
//! A slug only contains lowercase ASCII letters, digits and separators.
//! Accented characters degrade to their ASCII base letter, whitespace runs
//! become a single underscore and every other character is dropped.
//! Consecutive separators collapse to one and separators never lead or
//! trail the result.

/// Separators a slug may keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugCharset {
    /// `[a-z0-9_-]`
    UnderscoreAndHyphen,
    /// `[a-z0-9_]`
    UnderscoreOnly,
}

impl SlugCharset {
    fn allows(self, c: char) -> bool {
        match c {
            'a'..='z' | '0'..='9' | '_' => true,
            '-' => self == SlugCharset::UnderscoreAndHyphen,
            _ => false,
        }
    }
}

fn is_separator(c: char) -> bool {
    c == '_' || c == '-'
}

/// Slugs `text` keeping both `_` and `-`.
///
/// Total and idempotent: `slug(&slug(x)) == slug(x)`.
///
/// ```
/// use link_hub::domain::tracking::slug;
///
/// assert_eq!(slug("  Promoção  de Verão!! "), "promocao_de_verao");
/// assert_eq!(slug("lanc--01__24"), "lanc-01_24");
/// ```
pub fn slug(text: &str) -> String {
    slug_with(text, SlugCharset::UnderscoreAndHyphen)
}

/// Slugs `text` restricting the output to `charset`.
pub fn slug_with(text: &str, charset: SlugCharset) -> String {
    if text.is_empty() {
        return String::new();
    }

    let ascii = deunicode::deunicode(text).to_lowercase();

    let mut out = String::with_capacity(ascii.len());
    let mut in_whitespace = false;
    for c in ascii.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                push_collapsed(&mut out, '_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;

        if !charset.allows(c) {
            continue;
        }

        if is_separator(c) {
            push_collapsed(&mut out, c);
        } else {
            out.push(c);
        }
    }

    out.trim_matches(is_separator).to_string()
}

/// Pushes a separator unless the output already ends with one.
///
/// Mixed runs such as `_-_` keep their first separator.
fn push_collapsed(out: &mut String, sep: char) {
    if !out.ends_with(is_separator) {
        out.push(sep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(slug(""), "");
        assert_eq!(slug("   "), "");
        assert_eq!(slug("!!!"), "");
    }

    #[test]
    fn test_lowercases_and_strips_accents() {
        assert_eq!(slug("Ação Rápida"), "acao_rapida");
        assert_eq!(slug("ÉVÉNEMENT"), "evenement");
        assert_eq!(slug("Çedilha"), "cedilha");
    }

    #[test]
    fn test_whitespace_runs_become_single_underscore() {
        assert_eq!(slug("black \t friday\n2026"), "black_friday_2026");
    }

    #[test]
    fn test_drops_disallowed_characters() {
        assert_eq!(slug("promo@2026#vip"), "promo2026vip");
        assert_eq!(slug("a.b/c?d"), "abcd");
    }

    #[test]
    fn test_collapses_separator_runs() {
        assert_eq!(slug("a___b"), "a_b");
        assert_eq!(slug("a---b"), "a-b");
        assert_eq!(slug("a - b"), "a_b");
        assert_eq!(slug("a-_-b"), "a-b");
    }

    #[test]
    fn test_trims_separators() {
        assert_eq!(slug("__lead"), "lead");
        assert_eq!(slug("trail--"), "trail");
        assert_eq!(slug("-_both_-"), "both");
    }

    #[test]
    fn test_separator_left_after_dropping_characters_collapses() {
        assert_eq!(slug("a_!_b"), "a_b");
    }

    #[test]
    fn test_underscore_only_charset_drops_hyphens() {
        assert_eq!(slug_with("ex-alunos", SlugCharset::UnderscoreOnly), "exalunos");
        assert_eq!(
            slug_with("Lista - Atual", SlugCharset::UnderscoreOnly),
            "lista_atual"
        );
    }

    #[test]
    fn test_idempotent_on_samples() {
        let samples = [
            "Campanha Ãção 01-24",
            "  __--mixed--__  ",
            "WhatsApp API Disparos",
            "ümlaut ß straße",
            "a_-_b-_-c",
            "日本語 text",
        ];
        for sample in samples {
            let once = slug(sample);
            assert_eq!(slug(&once), once, "slug not idempotent for {sample:?}");

            let once = slug_with(sample, SlugCharset::UnderscoreOnly);
            assert_eq!(
                slug_with(&once, SlugCharset::UnderscoreOnly),
                once,
                "underscore slug not idempotent for {sample:?}"
            );
        }
    }
}
