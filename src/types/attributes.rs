use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Named(String),
    Flag(bool),
}

/// Attributes tagging a variant, e.g. `usage = java-runtime`.
///
/// Keys are kept sorted so iteration order never depends on insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantAttributes {
    inner: BTreeMap<String, AttributeValue>,
}

impl VariantAttributes {
    pub fn new() -> Self {
        VariantAttributes {
            inner: BTreeMap::new(),
        }
    }

    pub fn insert_named(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), AttributeValue::Named(value.into()));
    }

    pub fn insert_flag(&mut self, key: impl Into<String>, value: bool) {
        self.inner.insert(key.into(), AttributeValue::Flag(value));
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.inner.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.inner.iter()
    }
}
