//! Skill catalog port and an in-memory adapter.

use super::namespace::Namespace;
use super::selection::{OptionGroup, SelectionOption};
use crate::error::ApiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Query against the catalog store. Only the `type` attribute is filterable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillQuery {
    #[serde(rename = "type")]
    pub kind: String,
}

impl SkillQuery {
    pub const GROUP: &'static str = "group";

    /// The grouped query used to populate generic skill groups.
    pub fn groups() -> Self {
        Self {
            kind: Self::GROUP.to_string(),
        }
    }
}

/// A group descriptor returned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub name: String,
    #[serde(rename = "type", default = "default_group_kind")]
    pub kind: String,
    /// Atoms in display order.
    #[serde(default)]
    pub skills: Vec<String>,
}

fn default_group_kind() -> String {
    SkillQuery::GROUP.to_string()
}

impl SkillGroup {
    pub fn new(name: impl Into<String>, skills: Vec<String>) -> Self {
        Self {
            name: name.into(),
            kind: default_group_kind(),
            skills,
        }
    }

    /// One plain option per atom, nothing selected.
    pub fn to_option_group(&self) -> OptionGroup {
        OptionGroup::with_options(
            self.name.clone(),
            self.skills.iter().map(SelectionOption::plain).collect(),
        )
    }
}

/// Read-only access to the skill taxonomy.
#[async_trait]
pub trait SkillCatalog: Send + Sync {
    /// Fetch group descriptors matching `query`.
    async fn fetch(&self, query: &SkillQuery) -> Result<Vec<SkillGroup>, ApiError>;

    /// Enumerate the items of a namespace in server order.
    async fn expand(&self, namespace: Namespace) -> Result<Vec<String>, ApiError>;
}

/// Catalog held in memory; used offline and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSkillCatalog {
    groups: Vec<SkillGroup>,
    expansions: HashMap<Namespace, Vec<String>>,
}

impl StaticSkillCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, group: SkillGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn with_expansion(mut self, namespace: Namespace, items: Vec<String>) -> Self {
        self.expansions.insert(namespace, items);
        self
    }
}

#[async_trait]
impl SkillCatalog for StaticSkillCatalog {
    async fn fetch(&self, query: &SkillQuery) -> Result<Vec<SkillGroup>, ApiError> {
        Ok(self
            .groups
            .iter()
            .filter(|group| group.kind == query.kind)
            .cloned()
            .collect())
    }

    async fn expand(&self, namespace: Namespace) -> Result<Vec<String>, ApiError> {
        Ok(self.expansions.get(&namespace).cloned().unwrap_or_default())
    }
}
