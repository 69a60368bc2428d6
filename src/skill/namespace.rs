//! Reserved skill namespaces.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Namespace whose bare label is reserved and never directly selectable.
///
/// `Brand` and `Queue` are also expandable: the catalog enumerates their items,
/// which become `{namespace,item}` options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Namespace {
    #[serde(rename = "_queue")]
    Queue,
    #[serde(rename = "_agent")]
    Agent,
    #[serde(rename = "_node")]
    Node,
    #[serde(rename = "_brand")]
    Brand,
}

impl Namespace {
    /// Every reserved namespace.
    pub const ALL: [Namespace; 4] = [
        Namespace::Queue,
        Namespace::Agent,
        Namespace::Node,
        Namespace::Brand,
    ];

    /// Namespaces populated through the catalog, in the order groups are appended.
    pub const EXPANDABLE: [Namespace; 2] = [Namespace::Brand, Namespace::Queue];

    /// Wire label, e.g. `_queue`.
    pub fn label(self) -> &'static str {
        match self {
            Namespace::Queue => "_queue",
            Namespace::Agent => "_agent",
            Namespace::Node => "_node",
            Namespace::Brand => "_brand",
        }
    }

    /// Look up a namespace by exact label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ns| ns.label() == label)
    }

    /// True when `value` is exactly a reserved label.
    pub fn is_reserved(value: &str) -> bool {
        Self::from_label(value).is_some()
    }

    pub fn is_expandable(self) -> bool {
        Self::EXPANDABLE.contains(&self)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Namespace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| {
            format!(
                "Unknown namespace: {}. Must be _queue, _agent, _node, or _brand",
                s
            )
        })
    }
}
