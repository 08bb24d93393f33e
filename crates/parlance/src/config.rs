//! Localization configuration.
//!
//! Every field is optional; applying a configuration only touches what it
//! sets. Text sources use camelCase names:
//!
//! ```yaml
//! defaultLocaleCode: ar
//! fallback: en
//! converter: plain          # or `segmented`
//! placeholderPattern: doubleCurly
//! translations:
//!   en:
//!     hello: Hello
//! ```

use serde::Deserialize;

use crate::converter::ConverterSetting;
use crate::error::I18nError;
use crate::keywords::TranslationsList;
use crate::pattern::PatternSetting;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct LocalizationConfig {
    /// Current locale code.
    pub default_locale_code: Option<String>,
    /// Fallback locale code.
    pub fallback: Option<String>,
    /// Replaces the whole translations list.
    pub translations: Option<TranslationsList>,
    pub converter: Option<ConverterSetting>,
    /// `colon`, `doubleCurly`, or a custom regex source.
    pub placeholder_pattern: Option<PatternSetting>,
}

impl LocalizationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale_code = Some(locale.into());
        self
    }

    pub fn with_fallback(mut self, locale: impl Into<String>) -> Self {
        self.fallback = Some(locale.into());
        self
    }

    pub fn with_translations(mut self, translations: TranslationsList) -> Self {
        self.translations = Some(translations);
        self
    }

    pub fn with_converter(mut self, converter: ConverterSetting) -> Self {
        self.converter = Some(converter);
        self
    }

    pub fn with_placeholder_pattern(mut self, pattern: impl Into<PatternSetting>) -> Self {
        self.placeholder_pattern = Some(pattern.into());
        self
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(src: &str) -> Result<Self, I18nError> {
        serde_yaml::from_str(src).map_err(|e| I18nError::Config(format!("yaml: {e}")))
    }

    pub fn from_json_str(src: &str) -> Result<Self, I18nError> {
        serde_json::from_str(src).map_err(|e| I18nError::Config(format!("json: {e}")))
    }

    /// Fold a later configuration into this one.
    ///
    /// Fields set in `other` win; translations are deep-merged per locale.
    pub fn merge(&mut self, other: &LocalizationConfig) {
        if let Some(locale) = &other.default_locale_code {
            self.default_locale_code = Some(locale.clone());
        }
        if let Some(fallback) = &other.fallback {
            self.fallback = Some(fallback.clone());
        }
        if let Some(incoming) = &other.translations {
            let merged = self.translations.get_or_insert_with(TranslationsList::new);
            for (locale, keywords) in incoming {
                merged
                    .entry(locale.clone())
                    .or_default()
                    .merge(keywords.clone());
            }
        }
        if let Some(converter) = &other.converter {
            self.converter = Some(converter.clone());
        }
        if let Some(pattern) = &other.placeholder_pattern {
            self.placeholder_pattern = Some(pattern.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::PatternPreset;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_json_uses_camel_case() {
        let cfg = LocalizationConfig::from_json_str(
            r#"{
                "defaultLocaleCode": "ar",
                "fallback": "en",
                "converter": "segmented",
                "placeholderPattern": "doubleCurly",
                "translations": { "en": { "hello": "Hello" } }
            }"#,
        )
        .unwrap();

        assert_eq!(cfg.default_locale_code.as_deref(), Some("ar"));
        assert_eq!(cfg.fallback.as_deref(), Some("en"));
        assert!(matches!(cfg.converter, Some(ConverterSetting::Segmented)));
        assert_eq!(
            cfg.placeholder_pattern,
            Some(PatternSetting::Preset(PatternPreset::DoubleCurly))
        );
        let translations = cfg.translations.unwrap();
        assert_eq!(translations["en"].lookup("hello"), Some("Hello"));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn from_yaml_with_custom_pattern() {
        let cfg = LocalizationConfig::from_yaml_str(
            r#"
defaultLocaleCode: en
placeholderPattern: '/([^/]+)/'
"#,
        )
        .unwrap();

        assert_eq!(
            cfg.placeholder_pattern,
            Some(PatternSetting::custom("/([^/]+)/"))
        );
        assert!(cfg.fallback.is_none());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = LocalizationConfig::from_json_str(r#"{ "locale": "en" }"#).unwrap_err();
        assert!(matches!(err, I18nError::Config(_)));
    }

    #[test]
    fn merge_overrides_set_fields_only() {
        let mut cfg = LocalizationConfig::new()
            .with_default_locale("en")
            .with_fallback("fr");
        cfg.merge(&LocalizationConfig::new().with_default_locale("ar"));

        assert_eq!(cfg.default_locale_code.as_deref(), Some("ar"));
        assert_eq!(cfg.fallback.as_deref(), Some("fr"));
    }

    #[test]
    fn merge_deep_merges_translations() {
        let first: TranslationsList =
            serde_json::from_str(r#"{ "en": { "a": "A", "g": { "x": "X" } } }"#).unwrap();
        let second: TranslationsList =
            serde_json::from_str(r#"{ "en": { "g": { "y": "Y" } }, "ar": { "a": "أ" } }"#)
                .unwrap();

        let mut cfg = LocalizationConfig::new().with_translations(first);
        cfg.merge(&LocalizationConfig::new().with_translations(second));

        let merged = cfg.translations.unwrap();
        assert_eq!(merged["en"].lookup("a"), Some("A"));
        assert_eq!(merged["en"].lookup("g.x"), Some("X"));
        assert_eq!(merged["en"].lookup("g.y"), Some("Y"));
        assert_eq!(merged["ar"].lookup("a"), Some("أ"));
    }
}
