//! Multi-valued selection control state.
//!
//! The control is a list of option groups. Options are identified by their encoded
//! value; reconciliation flips `selected`/`disabled` in place and never reorders.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Identifies one selection event on a control.
///
/// `begin` issues rebuild tokens and `next_selection` issues selection tokens;
/// async work started under an older token of its kind must not mutate the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub disabled: bool,
}

impl SelectionOption {
    /// Option whose label equals its value.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
            selected: false,
            disabled: false,
        }
    }

    pub fn labeled(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected: false,
            disabled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OptionGroup {
    /// Group header; `None` for ungrouped options.
    pub label: Option<String>,
    pub options: Vec<SelectionOption>,
}

impl OptionGroup {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            options: Vec::new(),
        }
    }

    pub fn with_options(label: impl Into<String>, options: Vec<SelectionOption>) -> Self {
        Self {
            label: Some(label.into()),
            options,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Selection control for one view (profile skills, agent skills).
#[derive(Debug, Clone, Default)]
pub struct SelectionControl {
    name: String,
    groups: Vec<OptionGroup>,
    generation: u64,
    /// Reconcile-only events; independent of rebuilds.
    selection: u64,
}

impl SelectionControl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: Vec::new(),
            generation: 0,
            selection: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start a rebuild: discard every group and issue a fresh token.
    pub fn begin(&mut self) -> Generation {
        self.groups.clear();
        self.generation += 1;
        Generation(self.generation)
    }

    /// Issue a token for an event that only reconciles the existing groups.
    ///
    /// Selection tokens never invalidate a rebuild in flight, and rebuilds never
    /// invalidate a selection.
    pub fn next_selection(&mut self) -> Generation {
        self.selection += 1;
        Generation(self.selection)
    }

    pub fn is_current_selection(&self, token: Generation) -> bool {
        self.selection == token.0
    }

    pub fn generation(&self) -> Generation {
        Generation(self.generation)
    }

    pub fn is_current(&self, token: Generation) -> bool {
        self.generation == token.0
    }

    pub fn append_group(&mut self, group: OptionGroup) {
        self.groups.push(group);
    }

    pub fn groups(&self) -> &[OptionGroup] {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut [OptionGroup] {
        &mut self.groups
    }

    pub fn group(&self, label: &str) -> Option<&OptionGroup> {
        self.groups
            .iter()
            .find(|group| group.label.as_deref() == Some(label))
    }

    pub fn options(&self) -> impl Iterator<Item = &SelectionOption> {
        self.groups.iter().flat_map(|group| group.options.iter())
    }

    pub fn option(&self, value: &str) -> Option<&SelectionOption> {
        self.options().find(|option| option.value == value)
    }

    pub fn selected_values(&self) -> Vec<String> {
        self.options()
            .filter(|option| option.selected)
            .map(|option| option.value.clone())
            .collect()
    }

    pub fn disabled_values(&self) -> Vec<String> {
        self.options()
            .filter(|option| option.disabled)
            .map(|option| option.value.clone())
            .collect()
    }

    /// Toggle an option the way a user click would. Disabled options ignore clicks.
    pub fn set_selected(&mut self, value: &str, selected: bool) -> bool {
        for option in self.groups.iter_mut().flat_map(|g| g.options.iter_mut()) {
            if option.value == value && !option.disabled {
                option.selected = selected;
                return true;
            }
        }
        false
    }
}

/// A control shared between a view and the async flows that populate it.
///
/// The lock is never held across an await point.
pub type SharedControl = Arc<Mutex<SelectionControl>>;

pub fn shared_control(name: impl Into<String>) -> SharedControl {
    Arc::new(Mutex::new(SelectionControl::new(name)))
}
