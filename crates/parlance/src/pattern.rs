//! Placeholder patterns.
//!
//! A pattern is a regular expression with exactly one capture group, which
//! yields the placeholder name. Patterns are validated when constructed, so
//! a bad pattern fails at registration time rather than on every
//! translation call.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::Deserialize;

use crate::error::PatternError;

/// `:name`
pub const COLON_SOURCE: &str = r":([a-zA-Z0-9_-]+)";

/// `{{name}}`
pub const DOUBLE_CURLY_SOURCE: &str = r"\{\{([a-zA-Z0-9_-]+)\}\}";

/// Built-in patterns, addressable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternPreset {
    Colon,
    DoubleCurly,
}

impl PatternPreset {
    pub fn name(self) -> &'static str {
        match self {
            PatternPreset::Colon => "colon",
            PatternPreset::DoubleCurly => "doubleCurly",
        }
    }

    fn source(self) -> &'static str {
        match self {
            PatternPreset::Colon => COLON_SOURCE,
            PatternPreset::DoubleCurly => DOUBLE_CURLY_SOURCE,
        }
    }

    /// Look a preset up by its key. `double_curly` is accepted as well.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "colon" => Some(PatternPreset::Colon),
            "doubleCurly" | "double_curly" => Some(PatternPreset::DoubleCurly),
            _ => None,
        }
    }
}

/// A validated single-capture placeholder pattern.
#[derive(Clone)]
pub struct PlaceholderPattern {
    regex: Regex,
}

impl PlaceholderPattern {
    /// Compile and validate a custom pattern.
    pub fn new(source: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(source).map_err(|e| PatternError::InvalidRegex {
            source_text: source.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_regex(regex)
    }

    /// Validate an already compiled regex.
    pub fn from_regex(regex: Regex) -> Result<Self, PatternError> {
        // Group 0 is the whole match.
        let found = regex.captures_len() - 1;
        if found != 1 {
            return Err(PatternError::CaptureGroups {
                source_text: regex.as_str().to_string(),
                found,
            });
        }
        Ok(Self { regex })
    }

    pub fn colon() -> Self {
        Self::preset(PatternPreset::Colon)
    }

    pub fn double_curly() -> Self {
        Self::preset(PatternPreset::DoubleCurly)
    }

    pub fn preset(preset: PatternPreset) -> Self {
        let regex = Regex::new(preset.source()).unwrap_or_else(|e| {
            unreachable!("built-in pattern `{}` failed to compile: {e}", preset.name())
        });
        Self { regex }
    }

    /// Resolve a preset key (`colon`, `doubleCurly`).
    pub fn named(name: &str) -> Result<Self, PatternError> {
        PatternPreset::from_name(name)
            .map(Self::preset)
            .ok_or_else(|| PatternError::UnknownPreset(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Iterate `(whole match range, placeholder name)` over `text`.
    pub(crate) fn matches<'t>(
        &'t self,
        text: &'t str,
    ) -> impl Iterator<Item = (std::ops::Range<usize>, &'t str)> + 't {
        self.regex.captures_iter(text).filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some((whole.range(), name.as_str()))
        })
    }
}

impl Default for PlaceholderPattern {
    fn default() -> Self {
        Self::colon()
    }
}

impl fmt::Debug for PlaceholderPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PlaceholderPattern")
            .field(&self.regex.as_str())
            .finish()
    }
}

impl PartialEq for PlaceholderPattern {
    fn eq(&self, other: &Self) -> bool {
        self.regex.as_str() == other.regex.as_str()
    }
}

impl From<PatternPreset> for PlaceholderPattern {
    fn from(preset: PatternPreset) -> Self {
        Self::preset(preset)
    }
}

/// Preset key first, otherwise a custom regex source.
impl FromStr for PlaceholderPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match PatternPreset::from_name(s) {
            Some(preset) => Ok(Self::preset(preset)),
            None => Self::new(s),
        }
    }
}

/// How a configuration names its placeholder pattern.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PatternSetting {
    Preset(PatternPreset),
    Custom(String),
}

impl PatternSetting {
    pub fn custom(source: impl Into<String>) -> Self {
        Self::Custom(source.into())
    }

    pub fn compile(&self) -> Result<PlaceholderPattern, PatternError> {
        match self {
            PatternSetting::Preset(preset) => Ok(PlaceholderPattern::preset(*preset)),
            PatternSetting::Custom(source) => PlaceholderPattern::new(source),
        }
    }
}

impl From<PatternPreset> for PatternSetting {
    fn from(preset: PatternPreset) -> Self {
        Self::Preset(preset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn presets_capture_the_name() {
        let colon = PlaceholderPattern::colon();
        let names: Vec<_> = colon.matches("Create :item in :place_1").map(|(_, n)| n).collect();
        assert_eq!(names, vec!["item", "place_1"]);

        let curly = PlaceholderPattern::double_curly();
        let found: Vec<_> = curly.matches("Create {{item}} now").collect();
        assert_eq!(found, vec![(7..15, "item")]);
    }

    #[test]
    fn named_presets() {
        assert_eq!(PlaceholderPattern::named("colon").unwrap(), PlaceholderPattern::colon());
        assert_eq!(
            PlaceholderPattern::named("doubleCurly").unwrap(),
            PlaceholderPattern::double_curly()
        );
        assert!(matches!(
            PlaceholderPattern::named("angle"),
            Err(PatternError::UnknownPreset(name)) if name == "angle"
        ));
    }

    #[test]
    fn custom_pattern_needs_exactly_one_group() {
        assert!(PlaceholderPattern::new(r"/([^/]+)/").is_ok());
        assert!(PlaceholderPattern::new(r"%(?:[a-z]+)%(\d)").is_ok());

        let err = PlaceholderPattern::new(r":[a-z]+").unwrap_err();
        assert!(matches!(err, PatternError::CaptureGroups { found: 0, .. }));

        let err = PlaceholderPattern::new(r"(:)([a-z]+)").unwrap_err();
        assert!(matches!(err, PatternError::CaptureGroups { found: 2, .. }));
    }

    #[test]
    fn invalid_regex_is_reported() {
        let err = PlaceholderPattern::new(r"(unclosed").unwrap_err();
        assert!(matches!(err, PatternError::InvalidRegex { .. }));
    }

    #[test]
    fn from_str_prefers_presets() {
        let p: PlaceholderPattern = "doubleCurly".parse().unwrap();
        assert_eq!(p, PlaceholderPattern::double_curly());

        let p: PlaceholderPattern = r"<([a-z]+)>".parse().unwrap();
        assert_eq!(p.as_str(), r"<([a-z]+)>");
    }

    #[test]
    fn setting_deserializes_preset_or_custom() {
        let s: PatternSetting = serde_json::from_str(r#""doubleCurly""#).unwrap();
        assert_eq!(s, PatternSetting::Preset(PatternPreset::DoubleCurly));

        let s: PatternSetting = serde_json::from_str(r#""\\[([a-z]+)\\]""#).unwrap();
        assert_eq!(s, PatternSetting::custom(r"\[([a-z]+)\]"));
        assert_eq!(s.compile().unwrap().as_str(), r"\[([a-z]+)\]");
    }
}
