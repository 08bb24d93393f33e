//! Keyword-major ("grouped") translations.
//!
//! Grouped input is organized by phrase rather than by locale:
//!
//! ```text
//! general:
//!   home:
//!     en: Home
//!     ar: الرئيسية
//! ```
//!
//! The deepest key above each string is always the locale code; everything
//! above it (plus an optional group key prefix) forms the dotted keyword.

use tracing::warn;

use crate::keywords::{Entry, Keywords, TranslationsList, SEPARATOR};

/// Grouped input shares the tree shape of [`Keywords`]; only the meaning of
/// the last level differs.
pub type GroupedTranslations = Keywords;

/// Transpose grouped input into the locale-major shape.
///
/// `group_key` may itself be dotted; an empty key is the same as none.
pub fn transpose(group_key: Option<&str>, grouped: &GroupedTranslations) -> TranslationsList {
    let mut path: Vec<String> = group_key
        .filter(|k| !k.is_empty())
        .map(|k| k.split(SEPARATOR).map(str::to_string).collect())
        .unwrap_or_default();

    let mut out = TranslationsList::new();
    walk(grouped, &mut path, &mut out);
    out
}

fn walk(node: &Keywords, path: &mut Vec<String>, out: &mut TranslationsList) {
    for (key, entry) in node {
        let pushed = push_segments(path, key);
        match entry {
            Entry::Group(group) => walk(group, path, out),
            Entry::Text(text) => match path.split_last() {
                Some((locale, keyword)) if !keyword.is_empty() => {
                    out.entry(locale.clone())
                        .or_default()
                        .set_path(keyword, text.as_str());
                }
                _ => {
                    warn!(
                        key = %path.join("."),
                        "grouped translation has no keyword above its locale code; skipped"
                    );
                }
            },
        }
        path.truncate(path.len() - pushed);
    }
}

fn push_segments(path: &mut Vec<String>, key: &str) -> usize {
    let before = path.len();
    path.extend(key.split(SEPARATOR).map(str::to_string));
    path.len() - before
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn kw(value: serde_json::Value) -> Keywords {
        serde_json::from_value(value).unwrap()
    }

    fn list(value: serde_json::Value) -> TranslationsList {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn transposes_single_level() {
        let grouped = kw(json!({ "home": { "en": "Home", "ar": "الرئيسية" } }));
        assert_eq!(
            transpose(None, &grouped),
            list(json!({ "en": { "home": "Home" }, "ar": { "home": "الرئيسية" } }))
        );
    }

    #[test]
    fn flattens_nested_groups() {
        let grouped = kw(json!({
            "general": {
                "home": { "en": "Home", "ar": "الرئيسية" },
                "nav": { "back": { "en": "Back" } }
            }
        }));
        let out = transpose(None, &grouped);

        assert_eq!(out["en"].lookup("general.home"), Some("Home"));
        assert_eq!(out["en"].lookup("general.nav.back"), Some("Back"));
        assert_eq!(out["ar"].lookup("general.home"), Some("الرئيسية"));
        assert_eq!(out["ar"].lookup("general.nav.back"), None);
    }

    #[test]
    fn group_key_prefixes_every_keyword() {
        let grouped = kw(json!({
            "home": { "en": "Home", "ar": "الرئيسية" },
            "about": { "en": "About", "ar": "عنا" }
        }));
        assert_eq!(
            transpose(Some("general"), &grouped),
            list(json!({
                "en": { "general": { "home": "Home", "about": "About" } },
                "ar": { "general": { "home": "الرئيسية", "about": "عنا" } }
            }))
        );
    }

    #[test]
    fn dotted_group_key_nests() {
        let grouped = kw(json!({ "home": { "en": "Home" } }));
        let out = transpose(Some("pages.public"), &grouped);
        assert_eq!(out["en"].lookup("pages.public.home"), Some("Home"));

        let out = transpose(Some(""), &grouped);
        assert_eq!(out["en"].lookup("home"), Some("Home"));
    }

    #[test]
    fn leaf_without_keyword_is_skipped() {
        let grouped = kw(json!({ "en": "Orphan", "home": { "en": "Home" } }));
        assert_eq!(
            transpose(None, &grouped),
            list(json!({ "en": { "home": "Home" } }))
        );
    }

    #[test]
    fn group_key_alone_is_a_keyword() {
        let grouped = kw(json!({ "en": "Home", "ar": "الرئيسية" }));
        assert_eq!(
            transpose(Some("home"), &grouped),
            list(json!({ "en": { "home": "Home" }, "ar": { "home": "الرئيسية" } }))
        );
    }
}
