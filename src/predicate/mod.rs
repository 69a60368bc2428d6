//! Predicate editor: an ordered, growable list of (property, comparator, value)
//! rows whose comparator choices cascade from the chosen property.

pub mod manager;
pub mod row;
pub mod store;

pub use manager::{ComparisonLoad, PredicateRowManager, RowEvent};
pub use row::{PredicateRow, PredicateValue, RowId, RowState};
pub use store::{ComparisonOption, PropertyEntry, PropertyStore, StaticPropertyStore};
