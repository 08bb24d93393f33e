//! Placeholder converters.
//!
//! A converter turns a resolved translation plus a placeholder map into the
//! final output. Two are built in:
//! - [`PlainConverter`]: string replacement, unknown tokens left verbatim.
//! - [`SegmentedConverter`]: splits the text into [`Segment`]s so callers can
//!   embed rich values per placeholder.

use std::fmt;
use std::fmt::Write as _;
use std::sync::Arc;

use serde::Deserialize;

use crate::pattern::PlaceholderPattern;
use crate::placeholder::{PlaceholderValue, Placeholders};

/// Converts a translation's placeholders into output text.
pub trait Converter: Send + Sync {
    fn convert(&self, text: &str, placeholders: &Placeholders, pattern: &PlaceholderPattern)
        -> String;
}

impl<F> Converter for F
where
    F: Fn(&str, &Placeholders, &PlaceholderPattern) -> String + Send + Sync,
{
    fn convert(
        &self,
        text: &str,
        placeholders: &Placeholders,
        pattern: &PlaceholderPattern,
    ) -> String {
        self(text, placeholders, pattern)
    }
}

/// Replace every known placeholder in `text` with its value.
///
/// Matches whose name is not in `placeholders` are copied through untouched.
pub fn convert(text: &str, placeholders: &Placeholders, pattern: &PlaceholderPattern) -> String {
    if placeholders.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;
    for (range, name) in pattern.matches(text) {
        out.push_str(&text[last..range.start]);
        match placeholders.get(name) {
            Some(value) => {
                let _ = write!(out, "{value}");
            }
            None => out.push_str(&text[range.clone()]),
        }
        last = range.end;
    }
    out.push_str(&text[last..]);
    out
}

/// One piece of a segmented translation.
#[derive(Clone, Debug, PartialEq)]
pub enum Segment {
    Literal(String),
    /// `value` is `None` when the caller supplied nothing for `name`.
    Placeholder {
        name: String,
        value: Option<PlaceholderValue>,
    },
}

impl Segment {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Segment::Placeholder { .. })
    }
}

/// Literals print as-is; placeholders print their value, or the bare name
/// when unresolved.
impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(s) => f.write_str(s),
            Segment::Placeholder {
                value: Some(value), ..
            } => write!(f, "{value}"),
            Segment::Placeholder { name, value: None } => f.write_str(name),
        }
    }
}

/// Split `text` on `pattern` into ordered literal and placeholder segments.
///
/// Empty literals between adjacent placeholders are not emitted. Every call
/// builds a fresh `Vec`.
pub fn convert_segmented(
    text: &str,
    placeholders: &Placeholders,
    pattern: &PlaceholderPattern,
) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;
    for (range, name) in pattern.matches(text) {
        if range.start > last {
            segments.push(Segment::Literal(text[last..range.start].to_string()));
        }
        segments.push(Segment::Placeholder {
            name: name.to_string(),
            value: placeholders.get(name).cloned(),
        });
        last = range.end;
    }
    if last < text.len() {
        segments.push(Segment::Literal(text[last..].to_string()));
    }
    segments
}

/// Concatenate segments back into a string.
pub fn render(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        let _ = write!(out, "{segment}");
    }
    out
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PlainConverter;

impl Converter for PlainConverter {
    fn convert(
        &self,
        text: &str,
        placeholders: &Placeholders,
        pattern: &PlaceholderPattern,
    ) -> String {
        convert(text, placeholders, pattern)
    }
}

/// String form of [`convert_segmented`]: unresolved placeholders collapse to
/// their bare name.
#[derive(Clone, Copy, Debug, Default)]
pub struct SegmentedConverter;

impl SegmentedConverter {
    pub fn segments(
        &self,
        text: &str,
        placeholders: &Placeholders,
        pattern: &PlaceholderPattern,
    ) -> Vec<Segment> {
        convert_segmented(text, placeholders, pattern)
    }
}

impl Converter for SegmentedConverter {
    fn convert(
        &self,
        text: &str,
        placeholders: &Placeholders,
        pattern: &PlaceholderPattern,
    ) -> String {
        render(&convert_segmented(text, placeholders, pattern))
    }
}

/// Which converter a configuration selects.
///
/// Text configuration can name `plain` or `segmented`; custom converters
/// are only set from code.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConverterSetting {
    Plain,
    Segmented,
    #[serde(skip)]
    Custom(Arc<dyn Converter>),
}

impl ConverterSetting {
    pub fn custom(converter: impl Converter + 'static) -> Self {
        Self::Custom(Arc::new(converter))
    }

    pub fn build(&self) -> Arc<dyn Converter> {
        match self {
            ConverterSetting::Plain => Arc::new(PlainConverter),
            ConverterSetting::Segmented => Arc::new(SegmentedConverter),
            ConverterSetting::Custom(converter) => Arc::clone(converter),
        }
    }
}

impl fmt::Debug for ConverterSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConverterSetting::Plain => f.write_str("Plain"),
            ConverterSetting::Segmented => f.write_str("Segmented"),
            ConverterSetting::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
