//! Node attributes.
//!
//! Named attributes default to the empty string when absent. Positional
//! attributes (block style slots such as `[requirement]`) are kept apart,
//! keyed by their 1-based position.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::Deserialize;

/// Named and positional attributes of a node.
///
/// Both maps are ordered so that attribute dumps are deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, AttributeValue>")]
pub struct Attributes {
    named: BTreeMap<String, String>,
    positional: BTreeMap<usize, String>,
}

impl Attributes {
    /// Create an empty attribute set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a named attribute, or `""` if it is not set.
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.named.get(name).map_or("", String::as_str)
    }

    /// Get a named attribute if it is set.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&str> {
        self.named.get(name).map(String::as_str)
    }

    /// Whether a named attribute is set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.named.contains_key(name)
    }

    /// Get a positional attribute (1-based).
    #[must_use]
    pub fn positional(&self, position: usize) -> Option<&str> {
        self.positional.get(&position).map(String::as_str)
    }

    /// Set a named attribute, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.named.insert(name.into(), value.into());
    }

    /// Set a positional attribute, replacing any previous value.
    pub fn insert_positional(&mut self, position: usize, value: impl Into<String>) {
        self.positional.insert(position, value.into());
    }

    /// Whether no attributes are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.positional.is_empty()
    }

    /// Iterate over named attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.named.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render all attributes as `key="value"` pairs separated by spaces.
    ///
    /// Named attributes come first in key order, then positional ones.
    /// Values are not escaped.
    ///
    /// ```
    /// use plainxml_tree::Attributes;
    ///
    /// let mut attrs = Attributes::new();
    /// attrs.insert("id", "R1");
    /// attrs.insert_positional(1, "requirement");
    /// assert_eq!(attrs.dump(), r#"id="R1" 1="requirement""#);
    /// ```
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let named = self.named.iter().map(|(k, v)| (k.clone(), v));
        let positional = self.positional.iter().map(|(k, v)| (k.to_string(), v));
        for (key, value) in named.chain(positional) {
            if !out.is_empty() {
                out.push(' ');
            }
            write!(out, r#"{key}="{value}""#).unwrap();
        }
        out
    }
}

/// Raw attribute value as it appears in the JSON tree.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AttributeValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
    Null,
}

impl From<BTreeMap<String, AttributeValue>> for Attributes {
    fn from(raw: BTreeMap<String, AttributeValue>) -> Self {
        let mut attrs = Self::new();
        for (key, value) in raw {
            let value = match value {
                AttributeValue::Text(s) => s,
                AttributeValue::Integer(n) => n.to_string(),
                AttributeValue::Float(f) => f.to_string(),
                AttributeValue::Flag(b) => b.to_string(),
                AttributeValue::Null => continue,
            };
            match key.parse::<usize>() {
                Ok(position) => attrs.insert_positional(position, value),
                Err(_) => attrs.insert(key, value),
            }
        }
        attrs
    }
}
