use thiserror::Error;

use crate::catalog::CatalogError;

/// A placeholder pattern that cannot be used for substitution.
///
/// These are programming errors: they surface when a pattern is registered,
/// never while translating.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid placeholder pattern `{source_text}`: {reason}")]
    InvalidRegex {
        source_text: String,
        reason: String,
    },

    #[error(
        "placeholder pattern `{source_text}` must have exactly one capture group for the placeholder name, found {found}"
    )]
    CaptureGroups { source_text: String, found: usize },

    #[error("unknown placeholder pattern preset `{0}` (expected `colon` or `doubleCurly`)")]
    UnknownPreset(String),
}

#[derive(Debug, Error)]
pub enum I18nError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("configuration error: {0}")]
    Config(String),
}
