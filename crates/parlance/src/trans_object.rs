use std::collections::BTreeMap;

use crate::converter::PlainConverter;
use crate::localizer::Localizer;
use crate::placeholder::Placeholders;
use crate::store::InlineTranslation;

/// Keyword to its inline translations.
pub type TransObjectEntries = BTreeMap<String, InlineTranslation>;

/// Live accessor over a set of inline translations.
///
/// Every read resolves against the localizer's locales at call time, so a
/// locale switch is visible on the next call. Keywords missing from the
/// object are looked up in the store under the fallback locale, and echoed
/// if absent there too.
pub struct TransObject<'l> {
    localizer: &'l Localizer,
    entries: TransObjectEntries,
}

impl<'l> TransObject<'l> {
    pub fn new(localizer: &'l Localizer, entries: TransObjectEntries) -> Self {
        Self { localizer, entries }
    }

    /// Translation of `keyword` in the current locale.
    pub fn get(&self, keyword: &str) -> String {
        match self.entries.get(keyword) {
            Some(inline) => self.localizer.trans(inline, None),
            None => {
                let fallback = self.localizer.fallback_locale();
                self.localizer.trans_from(&fallback, keyword, None)
            }
        }
    }

    /// Translate with placeholders using the active converter.
    pub fn with_placeholders(&self, keyword: &str, placeholders: &Placeholders) -> String {
        match self.entries.get(keyword) {
            Some(inline) => self.localizer.trans(inline, Some(placeholders)),
            None => {
                let fallback = self.localizer.fallback_locale();
                self.localizer.trans_from(&fallback, keyword, Some(placeholders))
            }
        }
    }

    /// Short form of [`Self::with_placeholders`].
    pub fn p(&self, keyword: &str, placeholders: &Placeholders) -> String {
        self.with_placeholders(keyword, placeholders)
    }

    /// Translate with placeholders using the plain converter.
    pub fn plain(&self, keyword: &str, placeholders: &Placeholders) -> String {
        match self.entries.get(keyword) {
            Some(inline) => self.localizer.plain_trans(inline, Some(placeholders)),
            None => {
                let fallback = self.localizer.fallback_locale();
                self.localizer.trans_with(&fallback, keyword, Some(placeholders), &PlainConverter)
            }
        }
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.entries.contains_key(keyword)
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::Keywords;
    use crate::pattern::PlaceholderPattern;
    use pretty_assertions::assert_eq;

    fn entries() -> TransObjectEntries {
        serde_json::from_value(serde_json::json!({
            "name": { "en": "name", "ar": "الاسم" },
            "email": { "en": "email", "ar": "البريد الإلكتروني" },
            "welcome": { "en": "Hello :name", "ar": "مرحبا :name" }
        }))
        .unwrap()
    }

    #[test]
    fn reads_follow_the_current_locale() {
        let l = Localizer::new();
        let t = l.trans_object(entries());

        assert_eq!(t.get("name"), "name");
        assert_eq!(t.get("email"), "email");
        l.set_locale("ar");
        assert_eq!(t.get("name"), "الاسم");
    }

    #[test]
    fn missing_keyword_uses_store_fallback_or_echoes() {
        let l = Localizer::new();
        l.extend("fr", Keywords::new().with("known", "Connu"));
        let t = l.trans_object(entries());

        assert_eq!(t.get("missingKeyword"), "missingKeyword");
        l.set_fallback_locale("fr");
        assert_eq!(t.get("known"), "Connu");
        assert!(!t.contains("known"));
    }

    #[test]
    fn placeholder_accessors() {
        let l = Localizer::new();
        let t = l.trans_object(entries());
        let p = Placeholders::new().with("name", "Ahmed");

        assert_eq!(t.p("welcome", &p), "Hello Ahmed");
        assert_eq!(t.plain("welcome", &p), "Hello Ahmed");

        l.set_converter(|text: &str, _: &Placeholders, _: &PlaceholderPattern| {
            text.to_uppercase()
        });
        assert_eq!(t.with_placeholders("welcome", &p), "HELLO :NAME");
        assert_eq!(t.plain("welcome", &p), "Hello Ahmed");
    }
}
