//! A single predicate row: property, comparator and value.

use super::store::{ComparisonOption, PropertyEntry};
use crate::error::EditorError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Row identity. Assigned once by the manager and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(u64);

impl RowId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row-{}", self.0)
    }
}

/// Serialized form of a row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PredicateValue {
    #[serde(default)]
    pub property: String,
    #[serde(default)]
    pub comparison: String,
    #[serde(default)]
    pub value: String,
}

impl PredicateValue {
    pub fn new(
        property: impl Into<String>,
        comparison: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            property: property.into(),
            comparison: comparison.into(),
            value: value.into(),
        }
    }
}

/// Row lifecycle. `Destroyed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Created,
    PropertySelected,
    ComparatorsLoaded,
    Destroyed,
}

#[derive(Debug, Clone)]
pub struct PredicateRow {
    id: RowId,
    property: String,
    comparison: String,
    value: String,
    comparisons: Vec<ComparisonOption>,
    value_pattern: Option<Regex>,
    state: RowState,
}

impl PredicateRow {
    pub(crate) fn new(id: RowId) -> Self {
        Self {
            id,
            property: String::new(),
            comparison: String::new(),
            value: String::new(),
            comparisons: Vec::new(),
            value_pattern: None,
            state: RowState::Created,
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn state(&self) -> RowState {
        self.state
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn comparison(&self) -> &str {
        &self.comparison
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Comparator choices currently offered.
    pub fn comparisons(&self) -> &[ComparisonOption] {
        &self.comparisons
    }

    pub fn value_pattern(&self) -> Option<&str> {
        self.value_pattern.as_ref().map(|re| re.as_str())
    }

    pub fn get_value(&self) -> PredicateValue {
        PredicateValue {
            property: self.property.clone(),
            comparison: self.comparison.clone(),
            value: self.value.clone(),
        }
    }

    /// Overwrite all three fields.
    pub fn set_value(&mut self, value: &PredicateValue) -> Result<(), EditorError> {
        self.select_property(&value.property)?;
        self.comparison = value.comparison.clone();
        self.value = value.value.clone();
        Ok(())
    }

    /// Record a property choice. Comparators stay as they are until replaced.
    pub fn select_property(&mut self, property: &str) -> Result<(), EditorError> {
        self.ensure_alive()?;
        self.property = property.to_string();
        if !property.is_empty() {
            self.state = RowState::PropertySelected;
        }
        Ok(())
    }

    pub fn set_comparison(&mut self, comparison: &str) -> Result<(), EditorError> {
        self.ensure_alive()?;
        self.comparison = comparison.to_string();
        Ok(())
    }

    pub fn set_field_value(&mut self, value: &str) -> Result<(), EditorError> {
        self.ensure_alive()?;
        self.value = value.to_string();
        Ok(())
    }

    /// Replace the comparator list and value pattern with `entry`'s.
    ///
    /// An invalid pattern leaves the row untouched.
    pub fn apply_comparisons(&mut self, entry: &PropertyEntry) -> Result<(), EditorError> {
        self.ensure_alive()?;
        let pattern = Regex::new(&format!("^(?:{})$", entry.reg_exp)).map_err(|e| {
            EditorError::InvalidPattern {
                property: entry.value.clone(),
                reason: e.to_string(),
            }
        })?;
        self.comparisons = entry.comparisons.clone();
        self.value_pattern = Some(pattern);
        self.state = RowState::ComparatorsLoaded;
        Ok(())
    }

    /// Whether the chosen comparator is one of the offered ones.
    pub fn comparison_is_offered(&self) -> bool {
        self.comparisons
            .iter()
            .any(|option| option.value == self.comparison)
    }

    /// Whether the value satisfies the property's pattern. No pattern accepts anything.
    pub fn value_is_valid(&self) -> bool {
        self.value_pattern
            .as_ref()
            .map(|re| re.is_match(&self.value))
            .unwrap_or(true)
    }

    pub(crate) fn destroy(&mut self) -> Result<(), EditorError> {
        self.ensure_alive()?;
        self.state = RowState::Destroyed;
        Ok(())
    }

    fn ensure_alive(&self) -> Result<(), EditorError> {
        if self.state == RowState::Destroyed {
            return Err(EditorError::RowDestroyed(self.id));
        }
        Ok(())
    }
}
