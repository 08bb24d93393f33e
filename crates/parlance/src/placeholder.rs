use std::collections::HashMap;
use std::fmt;

/// A value substituted for a placeholder.
#[derive(Clone, Debug, PartialEq)]
pub enum PlaceholderValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for PlaceholderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceholderValue::Str(s) => f.write_str(s),
            PlaceholderValue::Int(i) => write!(f, "{i}"),
            PlaceholderValue::Float(v) => write!(f, "{v}"),
            PlaceholderValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for PlaceholderValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for PlaceholderValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<&String> for PlaceholderValue {
    fn from(v: &String) -> Self {
        Self::Str(v.clone())
    }
}

impl From<i64> for PlaceholderValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for PlaceholderValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for PlaceholderValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

/// Counts past `i64::MAX` keep their exact digits as a string.
impl From<u64> for PlaceholderValue {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or_else(|_| Self::Str(v.to_string()), Self::Int)
    }
}

impl From<usize> for PlaceholderValue {
    fn from(v: usize) -> Self {
        i64::try_from(v).map_or_else(|_| Self::Str(v.to_string()), Self::Int)
    }
}

impl From<f64> for PlaceholderValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for PlaceholderValue {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<bool> for PlaceholderValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// Placeholder name to value, supplied per translation call.
///
/// Only an absent name counts as missing. `0`, `false` and `""` are
/// ordinary values and get substituted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Placeholders {
    values: HashMap<String, PlaceholderValue>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<PlaceholderValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<PlaceholderValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&PlaceholderValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<PlaceholderValue>> FromIterator<(K, V)> for Placeholders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Placeholders::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}

impl<K: Into<String>, V: Into<PlaceholderValue>, const N: usize> From<[(K, V); N]>
    for Placeholders
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
