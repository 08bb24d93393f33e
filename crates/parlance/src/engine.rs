use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::converter::{self, Converter, PlainConverter, Segment};
use crate::error::PatternError;
use crate::pattern::PlaceholderPattern;
use crate::placeholder::Placeholders;

/// The active placeholder pattern and default converter.
#[derive(Clone)]
pub struct PlaceholderEngine {
    pattern: PlaceholderPattern,
    converter: Arc<dyn Converter>,
}

impl Default for PlaceholderEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaceholderEngine {
    /// Colon pattern, plain converter.
    pub fn new() -> Self {
        Self {
            pattern: PlaceholderPattern::colon(),
            converter: Arc::new(PlainConverter),
        }
    }

    pub fn pattern(&self) -> &PlaceholderPattern {
        &self.pattern
    }

    pub fn set_pattern(&mut self, pattern: PlaceholderPattern) {
        debug!(
            "PlaceholderEngine::set_pattern: {} -> {}",
            self.pattern.as_str(),
            pattern.as_str()
        );
        self.pattern = pattern;
    }

    /// Switch to a preset (`colon`, `doubleCurly`) by name.
    pub fn set_pattern_named(&mut self, name: &str) -> Result<(), PatternError> {
        let pattern = PlaceholderPattern::named(name)?;
        self.set_pattern(pattern);
        Ok(())
    }

    pub fn converter(&self) -> Arc<dyn Converter> {
        Arc::clone(&self.converter)
    }

    pub fn set_converter(&mut self, converter: impl Converter + 'static) {
        self.set_shared_converter(Arc::new(converter));
    }

    pub fn set_shared_converter(&mut self, converter: Arc<dyn Converter>) {
        debug!("PlaceholderEngine::set_converter");
        self.converter = converter;
    }

    /// Run the active converter.
    pub fn convert(&self, text: &str, placeholders: &Placeholders) -> String {
        self.converter.convert(text, placeholders, &self.pattern)
    }

    /// Run the plain converter regardless of the active one.
    pub fn convert_plain(&self, text: &str, placeholders: &Placeholders) -> String {
        converter::convert(text, placeholders, &self.pattern)
    }

    pub fn segments(&self, text: &str, placeholders: &Placeholders) -> Vec<Segment> {
        converter::convert_segmented(text, placeholders, &self.pattern)
    }
}

impl fmt::Debug for PlaceholderEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceholderEngine")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::SegmentedConverter;
    use pretty_assertions::assert_eq;

    #[test]
    fn pattern_swap_applies_to_later_calls() {
        let mut engine = PlaceholderEngine::new();
        let p = Placeholders::new().with("item", "Category");

        assert_eq!(engine.convert("New {{item}}", &p), "New {{item}}");
        engine.set_pattern_named("doubleCurly").unwrap();
        assert_eq!(engine.convert("New {{item}}", &p), "New Category");
        assert_eq!(engine.convert("New :item", &p), "New :item");
    }

    #[test]
    fn unknown_preset_keeps_current_pattern() {
        let mut engine = PlaceholderEngine::new();
        assert!(engine.set_pattern_named("squiggly").is_err());
        assert_eq!(engine.pattern(), &PlaceholderPattern::colon());
    }

    #[test]
    fn plain_ignores_active_converter() {
        let mut engine = PlaceholderEngine::new();
        engine.set_converter(SegmentedConverter);
        let p = Placeholders::new();

        assert_eq!(engine.convert("Hi :name", &p), "Hi name");
        assert_eq!(engine.convert_plain("Hi :name", &p), "Hi :name");
    }
}
