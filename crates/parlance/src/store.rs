//! The translation store.
//!
//! Owns the locale-major translations list together with the current and
//! fallback locale codes, and resolves keywords against them. The store is a
//! plain value; notification and locking live in [`crate::Localizer`].

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::grouped::{self, GroupedTranslations};
use crate::keywords::{Keywords, TranslationsList};

/// Locale used for both the current and the fallback slot until configured.
pub const DEFAULT_LOCALE: &str = "en";

/// A one-off locale-to-text map that bypasses the store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct InlineTranslation {
    texts: BTreeMap<String, String>,
}

impl InlineTranslation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(locale, text);
        self
    }

    pub fn insert(&mut self, locale: impl Into<String>, text: impl Into<String>) {
        self.texts.insert(locale.into(), text.into());
    }

    pub fn get(&self, locale: &str) -> Option<&str> {
        self.texts.get(locale).map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.texts.iter()
    }

    /// Non-empty text for `locale`.
    fn usable(&self, locale: &str) -> Option<&str> {
        self.get(locale).filter(|s| !s.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InlineTranslation {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = InlineTranslation::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for InlineTranslation {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// What to translate: a dotted path into the store, or an inline map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyword<'a> {
    Path(&'a str),
    Inline(&'a InlineTranslation),
}

impl<'a> Keyword<'a> {
    /// What a total miss degrades to: the path itself, or nothing for an
    /// inline map without any usable entry.
    pub fn echo(&self) -> &'a str {
        match self {
            Keyword::Path(path) => path,
            Keyword::Inline(_) => "",
        }
    }
}

impl<'a> From<&'a str> for Keyword<'a> {
    fn from(v: &'a str) -> Self {
        Self::Path(v)
    }
}

impl<'a> From<&'a String> for Keyword<'a> {
    fn from(v: &'a String) -> Self {
        Self::Path(v.as_str())
    }
}

impl<'a> From<&'a InlineTranslation> for Keyword<'a> {
    fn from(v: &'a InlineTranslation) -> Self {
        Self::Inline(v)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TranslationStore {
    translations: TranslationsList,
    locale: String,
    fallback: String,
}

impl Default for TranslationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslationStore {
    pub fn new() -> Self {
        Self::with_locales(DEFAULT_LOCALE, DEFAULT_LOCALE)
    }

    pub fn with_locales(locale: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            translations: TranslationsList::new(),
            locale: locale.into(),
            fallback: fallback.into(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// An empty fallback code means no fallback.
    pub fn fallback_locale(&self) -> &str {
        &self.fallback
    }

    /// Replace the current locale, returning the previous one.
    pub fn set_locale(&mut self, locale: impl Into<String>) -> String {
        let locale = locale.into();
        debug!("TranslationStore::set_locale: {} -> {}", self.locale, locale);
        std::mem::replace(&mut self.locale, locale)
    }

    /// Replace the fallback locale, returning the previous one.
    pub fn set_fallback_locale(&mut self, fallback: impl Into<String>) -> String {
        let fallback = fallback.into();
        debug!(
            "TranslationStore::set_fallback_locale: {} -> {}",
            self.fallback, fallback
        );
        std::mem::replace(&mut self.fallback, fallback)
    }

    /// Deep-merge `keywords` into the tree for `locale`.
    pub fn extend(&mut self, locale: impl Into<String>, keywords: Keywords) {
        self.translations
            .entry(locale.into())
            .or_default()
            .merge(keywords);
    }

    /// Swap the whole translations list.
    pub fn replace_all(&mut self, translations: TranslationsList) {
        self.translations = translations;
    }

    /// Transpose keyword-major input and merge it like [`Self::extend`].
    pub fn ingest_grouped(&mut self, group_key: Option<&str>, grouped: &GroupedTranslations) {
        for (locale, keywords) in grouped::transpose(group_key, grouped) {
            self.extend(locale, keywords);
        }
    }

    pub fn translations(&self) -> &TranslationsList {
        &self.translations
    }

    pub fn keywords_of(&self, locale: &str) -> Option<&Keywords> {
        self.translations.get(locale)
    }

    /// Look a dotted path up in `locale`, then in the fallback locale.
    pub fn lookup(&self, locale: &str, path: &str) -> Option<&str> {
        if let Some(text) = self.lookup_exact(locale, path) {
            return Some(text);
        }
        if self.fallback.is_empty() || self.fallback == locale {
            trace!(locale = %locale, keyword = %path, "keyword missing");
            return None;
        }
        let found = self.lookup_exact(&self.fallback, path);
        match found {
            Some(_) => trace!(
                locale = %locale,
                fallback = %self.fallback,
                keyword = %path,
                "keyword served from fallback locale"
            ),
            None => trace!(
                locale = %locale,
                fallback = %self.fallback,
                keyword = %path,
                "keyword missing"
            ),
        }
        found
    }

    /// Look a dotted path up in `locale` only.
    pub fn lookup_exact(&self, locale: &str, path: &str) -> Option<&str> {
        self.translations.get(locale)?.lookup(path)
    }

    /// Find the raw translation for `keyword` in `locale`.
    ///
    /// Inline maps never touch the store: the requested locale, then the
    /// fallback locale, then the first non-empty entry by locale code.
    /// Empty inline entries count as missing.
    pub fn find<'a>(&'a self, locale: &str, keyword: Keyword<'a>) -> Option<&'a str> {
        match keyword {
            Keyword::Path(path) => self.lookup(locale, path),
            Keyword::Inline(inline) => inline
                .usable(locale)
                .or_else(|| inline.usable(&self.fallback))
                .or_else(|| {
                    inline
                        .iter()
                        .map(|(_, text)| text.as_str())
                        .find(|text| !text.is_empty())
                }),
        }
    }

    /// Resolve `keyword` in `locale`, echoing the keyword on a total miss.
    pub fn resolve<'a>(&'a self, locale: &str, keyword: Keyword<'a>) -> &'a str {
        self.find(locale, keyword).unwrap_or_else(|| keyword.echo())
    }

    /// [`Self::resolve`] in the current locale.
    pub fn translate<'a>(&'a self, keyword: Keyword<'a>) -> &'a str {
        self.resolve(&self.locale, keyword)
    }
}
