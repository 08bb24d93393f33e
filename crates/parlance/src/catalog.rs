//! Text catalogs for a single locale.
//!
//! A catalog is a YAML or JSON mapping whose leaves are strings and whose
//! inner nodes are nested mappings. Dotted keys are expanded, so these two
//! catalogs are equivalent:
//!
//! ```text
//! general.home: Home          general:
//!                               home: Home
//! ```

use thiserror::Error;

use crate::keywords::{Keywords, SEPARATOR};

const MAX_CATALOG_ENTRIES: usize = 10_000;
const MAX_KEY_BYTES: usize = 128;
const MAX_VALUE_BYTES: usize = 16 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogFormat {
    #[cfg(feature = "yaml")]
    Yaml,
    Json,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("yaml catalog error: {0}")]
    Yaml(String),

    #[error("json catalog error: {0}")]
    Json(String),

    #[error("catalog entry `{key}`: {msg}")]
    Entry { key: String, msg: String },

    #[error("too many entries (max {})", MAX_CATALOG_ENTRIES)]
    TooManyEntries,
}

fn is_valid_segment(segment: &str) -> bool {
    let mut it = segment.chars();
    match it.next() {
        Some(c) if c.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    it.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Collects validated leaves before they are written into a tree.
#[derive(Default)]
struct Collector {
    leaves: Vec<(Vec<String>, String)>,
}

impl Collector {
    fn key_segments(&self, parent: &[String], key: &str) -> Result<Vec<String>, CatalogError> {
        if key.len() > MAX_KEY_BYTES {
            return Err(CatalogError::Entry {
                key: key.to_string(),
                msg: format!("key is too long (max {MAX_KEY_BYTES} bytes)"),
            });
        }
        let mut path = parent.to_vec();
        for segment in key.split(SEPARATOR) {
            if !is_valid_segment(segment) {
                return Err(CatalogError::Entry {
                    key: key.to_string(),
                    msg: "invalid key (allowed: [A-Za-z0-9][A-Za-z0-9_-]* per dotted segment)"
                        .to_string(),
                });
            }
            path.push(segment.to_string());
        }
        Ok(path)
    }

    fn leaf(&mut self, path: Vec<String>, value: &str) -> Result<(), CatalogError> {
        if value.len() > MAX_VALUE_BYTES {
            return Err(CatalogError::Entry {
                key: path.join("."),
                msg: format!("value is too long (max {MAX_VALUE_BYTES} bytes)"),
            });
        }
        if self.leaves.len() >= MAX_CATALOG_ENTRIES {
            return Err(CatalogError::TooManyEntries);
        }
        self.leaves.push((path, value.to_string()));
        Ok(())
    }

    fn finish(self) -> Keywords {
        let mut keywords = Keywords::new();
        for (path, value) in self.leaves {
            keywords.set_path(&path, value);
        }
        keywords
    }
}

/// Parse a catalog in the given format.
pub fn parse(format: CatalogFormat, src: &str) -> Result<Keywords, CatalogError> {
    match format {
        #[cfg(feature = "yaml")]
        CatalogFormat::Yaml => parse_yaml(src),
        CatalogFormat::Json => parse_json(src),
    }
}

/// Parse a YAML mapping catalog. An empty document is an empty catalog.
#[cfg(feature = "yaml")]
pub fn parse_yaml(src: &str) -> Result<Keywords, CatalogError> {
    use serde_yaml::Value;

    fn walk(
        map: &serde_yaml::Mapping,
        parent: &[String],
        out: &mut Collector,
    ) -> Result<(), CatalogError> {
        for (k, v) in map {
            let Some(key) = k.as_str() else {
                return Err(CatalogError::Yaml("yaml keys must be strings".to_string()));
            };
            let path = out.key_segments(parent, key)?;
            match v {
                Value::String(s) => out.leaf(path, s)?,
                Value::Mapping(nested) => walk(nested, &path, out)?,
                _ => {
                    return Err(CatalogError::Entry {
                        key: path.join("."),
                        msg: "yaml value must be a string or a mapping".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    if src.trim().is_empty() {
        return Ok(Keywords::new());
    }
    let value: Value = serde_yaml::from_str(src)
        .map_err(|e| CatalogError::Yaml(format!("yaml parse error: {e}")))?;
    let mut out = Collector::default();
    match value {
        Value::Mapping(map) => walk(&map, &[], &mut out)?,
        Value::Null => {}
        _ => {
            return Err(CatalogError::Yaml("catalog root must be a mapping".to_string()));
        }
    }
    Ok(out.finish())
}

/// Parse a JSON object catalog.
pub fn parse_json(src: &str) -> Result<Keywords, CatalogError> {
    use serde_json::Value;

    fn walk(
        map: &serde_json::Map<String, Value>,
        parent: &[String],
        out: &mut Collector,
    ) -> Result<(), CatalogError> {
        for (key, v) in map {
            let path = out.key_segments(parent, key)?;
            match v {
                Value::String(s) => out.leaf(path, s)?,
                Value::Object(nested) => walk(nested, &path, out)?,
                _ => {
                    return Err(CatalogError::Entry {
                        key: path.join("."),
                        msg: "json value must be a string or an object".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    let value: Value = serde_json::from_str(src)
        .map_err(|e| CatalogError::Json(format!("json parse error: {e}")))?;
    let Value::Object(map) = value else {
        return Err(CatalogError::Json("catalog root must be an object".to_string()));
    };
    let mut out = Collector::default();
    walk(&map, &[], &mut out)?;
    Ok(out.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[cfg(feature = "yaml")]
    #[test]
    fn parse_yaml_nested_and_dotted() {
        let src = r#"
hello: "Hello World"
general.home: Home
general:
  about: About
user:
  welcome: "Welcome :name"
"#;

        let cat = parse_yaml(src).unwrap();
        assert_eq!(cat.lookup("hello"), Some("Hello World"));
        assert_eq!(cat.lookup("general.home"), Some("Home"));
        assert_eq!(cat.lookup("general.about"), Some("About"));
        assert_eq!(cat.lookup("user.welcome"), Some("Welcome :name"));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn yaml_requires_string_values() {
        let err = parse_yaml("title: 123\n").unwrap_err();
        assert!(matches!(err, CatalogError::Entry { key, .. } if key == "title"));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn empty_yaml_is_an_empty_catalog() {
        assert!(parse_yaml("").unwrap().is_empty());
        assert!(matches!(parse_yaml("- a\n- b\n"), Err(CatalogError::Yaml(_))));
    }

    #[test]
    fn parse_json_catalog() {
        let cat =
            parse_json(r#"{ "hello": "Hello", "nav": { "back": "Back", "blank": "" } }"#).unwrap();
        assert_eq!(cat.lookup("hello"), Some("Hello"));
        assert_eq!(cat.lookup("nav.back"), Some("Back"));
        assert_eq!(cat.lookup("nav.blank"), Some(""));
    }

    #[test]
    fn key_validation() {
        let err = parse_json(r#"{ "bad key": "nope" }"#).unwrap_err();
        assert!(matches!(err, CatalogError::Entry { .. }));

        let err = parse_json(r#"{ "a..b": "nope" }"#).unwrap_err();
        assert!(matches!(err, CatalogError::Entry { .. }));

        let long = "k".repeat(MAX_KEY_BYTES + 1);
        let err = parse_json(&format!(r#"{{ "{long}": "v" }}"#)).unwrap_err();
        assert!(matches!(err, CatalogError::Entry { .. }));
    }

    #[test]
    fn value_size_is_limited() {
        let big = "a".repeat(MAX_VALUE_BYTES + 1);
        let err = parse_json(&format!(r#"{{ "big": "{big}" }}"#)).unwrap_err();
        assert!(matches!(err, CatalogError::Entry { key, .. } if key == "big"));
    }

    #[test]
    fn json_root_must_be_object() {
        assert!(matches!(parse_json("[]"), Err(CatalogError::Json(_))));
        assert!(matches!(parse_json("{"), Err(CatalogError::Json(_))));
    }
}
