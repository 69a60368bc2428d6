//! Predicate row manager.
//!
//! Owns the ordered row set. Rows never hold callbacks into the manager; their
//! add/remove/property actions come back as [`RowEvent`]s tagged with the row's
//! own identity.

use super::row::{PredicateRow, PredicateValue, RowId};
use super::store::PropertyStore;
use crate::error::EditorError;
use std::sync::Arc;
use tracing::{debug, warn};

/// Actions a row can raise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEvent {
    /// The row's add button: append another row.
    Add,
    /// The row's remove button.
    Drop,
    /// The row's property field changed.
    PropertyChanged(String),
}

/// Outcome of a comparator lookup for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonLoad {
    Loaded { comparisons: usize },
    /// The store had no entry; the row's comparators were left as they were.
    NoMatch,
    /// The lookup failed; the row's comparators were left as they were.
    Failed,
}

pub struct PredicateRowManager {
    store: Arc<dyn PropertyStore>,
    rows: Vec<PredicateRow>,
    next_id: u64,
}

impl PredicateRowManager {
    /// Create the manager with its initial empty row.
    pub fn new(store: Arc<dyn PropertyStore>) -> Self {
        let mut manager = Self {
            store,
            rows: Vec::new(),
            next_id: 0,
        };
        manager.add_row();
        manager
    }

    pub fn rows(&self) -> &[PredicateRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ids(&self) -> Vec<RowId> {
        self.rows.iter().map(PredicateRow::id).collect()
    }

    pub fn row(&self, id: RowId) -> Option<&PredicateRow> {
        self.rows.iter().find(|row| row.id() == id)
    }

    pub fn row_mut(&mut self, id: RowId) -> Result<&mut PredicateRow, EditorError> {
        self.rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or(EditorError::RowNotFound(id))
    }

    /// Append an empty row at the end.
    pub fn add_row(&mut self) -> RowId {
        self.next_id += 1;
        let id = RowId::from_raw(self.next_id);
        self.rows.push(PredicateRow::new(id));
        debug!(row = %id, rows = self.rows.len(), "Predicate row added");
        id
    }

    /// Remove `id`, keeping the order of the rest. Never drops the last row.
    ///
    /// Returns whether a row was removed.
    pub fn drop_row(&mut self, id: RowId) -> bool {
        if self.rows.len() <= 1 {
            debug!(row = %id, "Refusing to drop the last predicate row");
            return false;
        }
        let Some(index) = self.rows.iter().position(|row| row.id() == id) else {
            debug!(row = %id, "Drop requested for unknown predicate row");
            return false;
        };
        let mut row = self.rows.remove(index);
        if let Err(e) = row.destroy() {
            debug!(row = %id, "Suppressed error destroying predicate row: {}", e);
        }
        true
    }

    /// Snapshot of every row in visual order.
    pub fn get_value(&self) -> Vec<PredicateValue> {
        self.rows.iter().map(PredicateRow::get_value).collect()
    }

    /// Replace every row with one row per entry; an empty list leaves one empty row.
    ///
    /// Cleanup of the old rows is best effort: failures are logged, never returned.
    pub fn set_value(&mut self, list: &[PredicateValue]) {
        for mut row in self.rows.drain(..) {
            if let Err(e) = row.destroy() {
                debug!(row = %row.id(), "Suppressed error destroying predicate row: {}", e);
            }
        }

        for entry in list {
            let id = self.add_row();
            if let Err(e) = self.row_mut(id).and_then(|row| row.set_value(entry)) {
                warn!(row = %id, "Failed to set predicate row value: {}", e);
            }
        }
        if self.rows.is_empty() {
            self.add_row();
        }
    }

    /// Look up `property` and replace the row's comparators and value pattern.
    pub async fn set_comparisons(
        &mut self,
        id: RowId,
        property: &str,
    ) -> Result<ComparisonLoad, EditorError> {
        self.row_mut(id)?.select_property(property)?;

        let entry = match self.store.lookup(property).await {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                debug!(row = %id, property, "No comparator entry for property");
                return Ok(ComparisonLoad::NoMatch);
            }
            Err(e) => {
                warn!(row = %id, property, "Comparator lookup failed: {}", e);
                return Ok(ComparisonLoad::Failed);
            }
        };

        let row = self.row_mut(id)?;
        row.apply_comparisons(&entry)?;
        Ok(ComparisonLoad::Loaded {
            comparisons: row.comparisons().len(),
        })
    }

    /// Resolve comparators for every row that has a property.
    pub async fn load_all_comparisons(&mut self) -> Vec<(RowId, Result<ComparisonLoad, EditorError>)> {
        let pending: Vec<(RowId, String)> = self
            .rows
            .iter()
            .filter(|row| !row.property().is_empty())
            .map(|row| (row.id(), row.property().to_string()))
            .collect();

        let mut results = Vec::with_capacity(pending.len());
        for (id, property) in pending {
            let result = self.set_comparisons(id, &property).await;
            results.push((id, result));
        }
        results
    }

    /// Dispatch an action raised by row `id`.
    pub async fn handle(&mut self, id: RowId, event: RowEvent) -> Result<(), EditorError> {
        match event {
            RowEvent::Add => {
                self.row_mut(id)?;
                self.add_row();
            }
            RowEvent::Drop => {
                self.drop_row(id);
            }
            RowEvent::PropertyChanged(property) => {
                self.set_comparisons(id, &property).await?;
            }
        }
        Ok(())
    }
}
