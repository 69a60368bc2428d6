//! Property → comparator lookup store.

use crate::error::ApiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One comparator choice offered once a property is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonOption {
    pub label: String,
    pub value: String,
}

impl ComparisonOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Comparators and value validation for one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyEntry {
    /// Property value this entry is keyed by.
    pub value: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub comparisons: Vec<ComparisonOption>,
    /// Validation pattern for the value field; must match the whole input.
    #[serde(rename = "regExp", default = "match_anything")]
    pub reg_exp: String,
}

fn match_anything() -> String {
    ".*".to_string()
}

impl PropertyEntry {
    pub fn new(
        value: impl Into<String>,
        comparisons: Vec<ComparisonOption>,
        reg_exp: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            label: None,
            comparisons,
            reg_exp: reg_exp.into(),
        }
    }
}

/// Shared store every predicate row looks its property up in.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Entry for `property`, or `None` when the store has no match.
    async fn lookup(&self, property: &str) -> Result<Option<PropertyEntry>, ApiError>;
}

/// Store held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticPropertyStore {
    entries: Vec<PropertyEntry>,
}

impl StaticPropertyStore {
    pub fn new(entries: Vec<PropertyEntry>) -> Self {
        Self { entries }
    }

    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.value.as_str())
    }
}

#[async_trait]
impl PropertyStore for StaticPropertyStore {
    async fn lookup(&self, property: &str) -> Result<Option<PropertyEntry>, ApiError> {
        Ok(self
            .entries
            .iter()
            .find(|entry| entry.value == property)
            .cloned())
    }
}
