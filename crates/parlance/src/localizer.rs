use std::sync::{
    Mutex, MutexGuard, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

use tracing::debug;

use crate::catalog::{self, CatalogFormat};
use crate::config::LocalizationConfig;
use crate::converter::{self, Converter, Segment};
use crate::engine::PlaceholderEngine;
use crate::error::{I18nError, PatternError};
use crate::events::{LocaleEvent, LocaleEvents, Subscription};
use crate::grouped::GroupedTranslations;
use crate::keywords::{Keywords, TranslationsList};
use crate::pattern::{PatternSetting, PlaceholderPattern};
use crate::placeholder::Placeholders;
use crate::store::{Keyword, TranslationStore};
use crate::trans_object::{TransObject, TransObjectEntries};

/// Global localizer, created on first use.
static LOCALIZER: OnceLock<Localizer> = OnceLock::new();

#[derive(Default)]
struct State {
    store: TranslationStore,
    engine: PlaceholderEngine,
}

/// Which converter a translation call runs.
enum ConverterChoice<'c> {
    Active,
    Plain,
    Given(&'c dyn Converter),
}

/// Translation context: store, placeholder engine and locale listeners.
///
/// Store and engine sit behind a single read-mostly lock. Listeners and
/// converters always run with that lock released.
pub struct Localizer {
    state: RwLock<State>,
    config: Mutex<LocalizationConfig>,
    events: LocaleEvents,
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Localizer {
    /// A fresh context: `en` for both locales, colon pattern, plain converter.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
            config: Mutex::new(LocalizationConfig::default()),
            events: LocaleEvents::new(),
        }
    }

    /// The process-wide localizer used by [`crate::trans`] and friends.
    pub fn global() -> &'static Localizer {
        LOCALIZER.get_or_init(Localizer::new)
    }

    /// Restore defaults and drop all listeners.
    pub fn reset(&self) {
        *self.write() = State::default();
        *self.config() = LocalizationConfig::default();
        self.events.clear();
        debug!("Localizer::reset");
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn config(&self) -> MutexGuard<'_, LocalizationConfig> {
        self.config.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ========== Locales ==========

    pub fn locale(&self) -> String {
        self.read().store.locale().to_string()
    }

    pub fn fallback_locale(&self) -> String {
        self.read().store.fallback_locale().to_string()
    }

    /// Replace the current locale and notify `localeCode` listeners, even
    /// when the code did not change.
    pub fn set_locale(&self, locale: impl Into<String>) {
        let locale = locale.into();
        let old = self.write().store.set_locale(locale.clone());
        self.events.trigger(LocaleEvent::LocaleCode, &locale, &old);
    }

    /// Replace the fallback locale and notify `fallback` listeners.
    ///
    /// An empty code disables the fallback.
    pub fn set_fallback_locale(&self, fallback: impl Into<String>) {
        let fallback = fallback.into();
        let old = self.write().store.set_fallback_locale(fallback.clone());
        self.events.trigger(LocaleEvent::Fallback, &fallback, &old);
    }

    pub fn on_locale_change(
        &self,
        event: LocaleEvent,
        callback: impl Fn(&str, &str) + Send + Sync + 'static,
    ) -> Subscription {
        self.events.on_change(event, callback)
    }

    pub fn events(&self) -> &LocaleEvents {
        &self.events
    }

    // ========== Translations ==========

    pub fn extend(&self, locale: impl Into<String>, keywords: Keywords) {
        self.write().store.extend(locale, keywords);
    }

    pub fn replace_all(&self, translations: TranslationsList) {
        self.write().store.replace_all(translations);
    }

    pub fn ingest_grouped(&self, group_key: Option<&str>, grouped: &GroupedTranslations) {
        self.write().store.ingest_grouped(group_key, grouped);
    }

    /// Parse a text catalog and merge it into `locale`.
    pub fn load_catalog(
        &self,
        locale: &str,
        format: CatalogFormat,
        src: &str,
    ) -> Result<(), I18nError> {
        let keywords = catalog::parse(format, src)?;
        debug!(locale = %locale, format = ?format, "Localizer::load_catalog");
        self.extend(locale, keywords);
        Ok(())
    }

    /// Snapshot of the whole translations list.
    pub fn translations(&self) -> TranslationsList {
        self.read().store.translations().clone()
    }

    pub fn keywords_of(&self, locale: &str) -> Option<Keywords> {
        self.read().store.keywords_of(locale).cloned()
    }

    // ========== Placeholders ==========

    pub fn pattern(&self) -> PlaceholderPattern {
        self.read().engine.pattern().clone()
    }

    pub fn set_pattern(&self, pattern: PlaceholderPattern) {
        self.write().engine.set_pattern(pattern);
    }

    /// Switch to a preset pattern (`colon`, `doubleCurly`).
    pub fn set_pattern_named(&self, name: &str) -> Result<(), PatternError> {
        self.write().engine.set_pattern_named(name)
    }

    pub fn set_converter(&self, converter: impl Converter + 'static) {
        self.write().engine.set_converter(converter);
    }

    // ========== Configuration ==========

    /// Apply a configuration.
    ///
    /// The pattern is validated before anything changes. Fields are then
    /// applied in order: translations, converter, fallback, current locale,
    /// pattern.
    pub fn configure(&self, config: LocalizationConfig) -> Result<(), I18nError> {
        let pattern = config
            .placeholder_pattern
            .as_ref()
            .map(PatternSetting::compile)
            .transpose()?;

        debug!(
            locale = ?config.default_locale_code,
            fallback = ?config.fallback,
            converter = ?config.converter,
            "Localizer::configure"
        );

        self.config().merge(&config);

        let LocalizationConfig {
            default_locale_code,
            fallback,
            translations,
            converter,
            ..
        } = config;

        if let Some(translations) = translations {
            self.replace_all(translations);
        }
        if let Some(converter) = converter {
            self.write().engine.set_shared_converter(converter.build());
        }
        if let Some(fallback) = fallback {
            self.set_fallback_locale(fallback);
        }
        if let Some(locale) = default_locale_code {
            self.set_locale(locale);
        }
        if let Some(pattern) = pattern {
            self.set_pattern(pattern);
        }
        Ok(())
    }

    /// Everything applied through [`Self::configure`] so far, merged.
    pub fn configuration(&self) -> LocalizationConfig {
        self.config().clone()
    }

    // ========== Translating ==========

    /// Raw translation of `keyword` in `locale`, no placeholder conversion.
    pub fn resolve<'k>(&self, locale: &str, keyword: impl Into<Keyword<'k>>) -> String {
        let keyword = keyword.into();
        self.read().store.resolve(locale, keyword).to_string()
    }

    /// Translate in the current locale with the active converter.
    ///
    /// `None` placeholders return the raw translation; a missing keyword is
    /// returned unchanged and never converted.
    pub fn trans<'k>(
        &self,
        keyword: impl Into<Keyword<'k>>,
        placeholders: Option<&Placeholders>,
    ) -> String {
        self.translate(None, keyword.into(), placeholders, ConverterChoice::Active)
    }

    /// Translate in `locale` with the active converter.
    pub fn trans_from<'k>(
        &self,
        locale: &str,
        keyword: impl Into<Keyword<'k>>,
        placeholders: Option<&Placeholders>,
    ) -> String {
        self.translate(
            Some(locale),
            keyword.into(),
            placeholders,
            ConverterChoice::Active,
        )
    }

    /// Translate in `locale` with an explicit converter.
    pub fn trans_with<'k>(
        &self,
        locale: &str,
        keyword: impl Into<Keyword<'k>>,
        placeholders: Option<&Placeholders>,
        converter: &dyn Converter,
    ) -> String {
        self.translate(
            Some(locale),
            keyword.into(),
            placeholders,
            ConverterChoice::Given(converter),
        )
    }

    /// Translate in the current locale with the plain converter.
    pub fn plain_trans<'k>(
        &self,
        keyword: impl Into<Keyword<'k>>,
        placeholders: Option<&Placeholders>,
    ) -> String {
        self.translate(None, keyword.into(), placeholders, ConverterChoice::Plain)
    }

    /// Translate in the current locale into segments.
    ///
    /// A missing keyword yields a single literal segment holding the keyword.
    pub fn trans_segments<'k>(
        &self,
        keyword: impl Into<Keyword<'k>>,
        placeholders: &Placeholders,
    ) -> Vec<Segment> {
        let keyword = keyword.into();
        let (text, pattern) = {
            let state = self.read();
            match state.store.find(state.store.locale(), keyword) {
                Some(text) => (text.to_string(), state.engine.pattern().clone()),
                None => {
                    let echo = keyword.echo();
                    return if echo.is_empty() {
                        Vec::new()
                    } else {
                        vec![Segment::Literal(echo.to_string())]
                    };
                }
            }
        };
        converter::convert_segmented(&text, placeholders, &pattern)
    }

    fn translate(
        &self,
        locale: Option<&str>,
        keyword: Keyword<'_>,
        placeholders: Option<&Placeholders>,
        choice: ConverterChoice<'_>,
    ) -> String {
        let (text, placeholders, pattern, active) = {
            let state = self.read();
            let locale = match locale {
                Some(locale) => locale,
                None => state.store.locale(),
            };
            let Some(text) = state.store.find(locale, keyword) else {
                return keyword.echo().to_string();
            };
            let Some(placeholders) = placeholders else {
                return text.to_string();
            };
            (
                text.to_string(),
                placeholders,
                state.engine.pattern().clone(),
                state.engine.converter(),
            )
        };

        match choice {
            ConverterChoice::Given(given) => given.convert(&text, placeholders, &pattern),
            ConverterChoice::Active => active.convert(&text, placeholders, &pattern),
            ConverterChoice::Plain => converter::convert(&text, placeholders, &pattern),
        }
    }

    /// An accessor over inline translations, see [`TransObject`].
    pub fn trans_object(&self, entries: TransObjectEntries) -> TransObject<'_> {
        TransObject::new(self, entries)
    }
}
