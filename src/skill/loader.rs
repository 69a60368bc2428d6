//! Cascading option loader: namespace expansion into option groups.
//!
//! Fetch failures are not retried and not surfaced: the group is appended empty
//! and a warning is logged.

use super::catalog::SkillCatalog;
use super::model::Skill;
use super::namespace::Namespace;
use super::selection::{Generation, OptionGroup, SelectionControl, SelectionOption, SharedControl};
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of loading one namespace into a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The group was appended with this many options.
    Applied { items: usize },
    /// The fetch failed; an empty group was appended.
    Degraded,
    /// The control moved on to another selection event; nothing was applied.
    Stale,
}

/// Materialize namespace items into a group, preserving server order.
pub fn namespace_group<F>(namespace: Namespace, items: &[String], is_selected: F) -> OptionGroup
where
    F: Fn(&str) -> bool,
{
    let options = items
        .iter()
        .map(|item| {
            let mut option =
                SelectionOption::labeled(Skill::expanded(namespace, item.as_str()).encode(), item);
            option.selected = is_selected(item);
            option
        })
        .collect();
    OptionGroup::with_options(namespace.label(), options)
}

#[derive(Clone)]
pub struct CascadingOptionLoader {
    catalog: Arc<dyn SkillCatalog>,
}

impl CascadingOptionLoader {
    pub fn new(catalog: Arc<dyn SkillCatalog>) -> Self {
        Self { catalog }
    }

    /// Fetch the items of `namespace`; `None` when the catalog request failed.
    pub async fn fetch_items(&self, namespace: Namespace) -> Option<Vec<String>> {
        match self.catalog.expand(namespace).await {
            Ok(items) => Some(items),
            Err(e) => {
                warn!(namespace = %namespace, "Failed to expand skill namespace: {}", e);
                None
            }
        }
    }

    /// Load `namespace` into `control` with nothing preselected.
    pub async fn load_into(
        &self,
        namespace: Namespace,
        control: &SharedControl,
        token: Generation,
    ) -> LoadOutcome {
        self.load_into_with(namespace, control, token, |_| false)
            .await
    }

    /// Load `namespace` into `control`, marking items for which `is_selected` holds.
    pub async fn load_into_with<F>(
        &self,
        namespace: Namespace,
        control: &SharedControl,
        token: Generation,
        is_selected: F,
    ) -> LoadOutcome
    where
        F: Fn(&str) -> bool + Send + Sync,
    {
        let items = self.fetch_items(namespace).await;
        apply_group(namespace, items.as_deref(), control, token, is_selected)
    }
}

/// Append the group for fetched `items` if `token` is still current.
fn apply_group<F>(
    namespace: Namespace,
    items: Option<&[String]>,
    control: &SharedControl,
    token: Generation,
    is_selected: F,
) -> LoadOutcome
where
    F: Fn(&str) -> bool,
{
    append_namespace(&mut control.lock(), namespace, items, token, is_selected)
}

/// Same as [`apply_group`] for a caller already holding the control lock.
pub(crate) fn append_namespace<F>(
    control: &mut SelectionControl,
    namespace: Namespace,
    items: Option<&[String]>,
    token: Generation,
    is_selected: F,
) -> LoadOutcome
where
    F: Fn(&str) -> bool,
{
    if !control.is_current(token) {
        debug!(
            namespace = %namespace,
            control = control.name(),
            "Discarding stale namespace expansion"
        );
        return LoadOutcome::Stale;
    }
    match items {
        Some(items) => {
            control.append_group(namespace_group(namespace, items, is_selected));
            LoadOutcome::Applied { items: items.len() }
        }
        None => {
            control.append_group(OptionGroup::new(namespace.label()));
            LoadOutcome::Degraded
        }
    }
}
