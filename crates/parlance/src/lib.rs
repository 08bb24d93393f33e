//! Runtime string localization
//!
//! - Nested keyword catalogs per locale, looked up by dotted path
//! - A current locale and a fallback locale, switchable at runtime with
//!   change listeners
//! - Placeholder substitution through a validated pattern and a pluggable
//!   converter (`plain`, `segmented`, or any closure)
//!
//! Most applications use the process-wide [`Localizer::global`] through
//! [`trans`] and the [`t!`] macro; tests and embedded uses can own a
//! [`Localizer`] directly.

mod catalog;
mod config;
mod converter;
mod engine;
mod error;
mod events;
mod grouped;
mod keywords;
mod localizer;
mod pattern;
mod placeholder;
mod store;
mod trans_object;

pub use catalog::{parse as parse_catalog, parse_json, CatalogError, CatalogFormat};
#[cfg(feature = "yaml")]
pub use catalog::parse_yaml;
pub use config::LocalizationConfig;
pub use converter::{
    convert, convert_segmented, render, Converter, ConverterSetting, PlainConverter, Segment,
    SegmentedConverter,
};
pub use engine::PlaceholderEngine;
pub use error::{I18nError, PatternError};
pub use events::{LocaleEvent, LocaleEvents, Subscription};
pub use grouped::{transpose, GroupedTranslations};
pub use keywords::{Entry, Keywords, TranslationsList, SEPARATOR};
pub use localizer::Localizer;
pub use pattern::{
    PatternPreset, PatternSetting, PlaceholderPattern, COLON_SOURCE, DOUBLE_CURLY_SOURCE,
};
pub use placeholder::{PlaceholderValue, Placeholders};
pub use store::{InlineTranslation, Keyword, TranslationStore, DEFAULT_LOCALE};
pub use trans_object::{TransObject, TransObjectEntries};

/// Translate `keyword` in the current locale of the global [`Localizer`].
pub fn trans<'k>(keyword: impl Into<Keyword<'k>>, placeholders: Option<&Placeholders>) -> String {
    Localizer::global().trans(keyword, placeholders)
}

/// Translate `keyword` in `locale` using the global [`Localizer`].
pub fn trans_from<'k>(
    locale: &str,
    keyword: impl Into<Keyword<'k>>,
    placeholders: Option<&Placeholders>,
) -> String {
    Localizer::global().trans_from(locale, keyword, placeholders)
}

/// Like [`trans`], always with the plain converter.
pub fn plain_trans<'k>(
    keyword: impl Into<Keyword<'k>>,
    placeholders: Option<&Placeholders>,
) -> String {
    Localizer::global().plain_trans(keyword, placeholders)
}

/// Translate through the global [`Localizer`], building placeholders inline.
///
/// Examples:
/// - `t!("app.title")`
/// - `t!("greeting", { name: user_name, count: 3 })`
#[macro_export]
macro_rules! t {
    ($keyword:expr) => {
        $crate::trans($keyword, None)
    };
    ($keyword:expr, { $($name:ident : $value:expr),* $(,)? }) => {{
        let placeholders = $crate::Placeholders::new()
            $(.with(stringify!($name), $value))*;
        $crate::trans($keyword, Some(&placeholders))
    }};
}
