//! Skill synchronization for the profile and agent editors.
//!
//! Each selection event takes a token from the control. Responses that arrive
//! after the control moved on to another event are discarded.

use super::catalog::{SkillCatalog, SkillGroup, SkillQuery};
use super::loader::{append_namespace, CascadingOptionLoader, LoadOutcome};
use super::model::AssignmentSet;
use super::namespace::Namespace;
use super::reconcile::{ReconcileReport, SkillSelectionReconciler};
use super::selection::{Generation, SelectionControl, SharedControl};
use crate::directory::{AgentDirectory, AgentRecord};
use crate::error::ApiError;
use futures::future::join_all;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Every branch completed and was applied.
    Settled,
    /// A newer selection event took over the control; nothing was applied.
    Stale,
    /// The assignment request failed; generic groups are shown unselected.
    AssignmentsUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub generation: Generation,
    pub status: SyncStatus,
    /// Option counts over the whole control once the event settled.
    pub reconcile: ReconcileReport,
    pub namespaces: Vec<(Namespace, LoadOutcome)>,
}

impl SyncReport {
    fn new(generation: Generation, status: SyncStatus) -> Self {
        Self {
            generation,
            status,
            reconcile: ReconcileReport::default(),
            namespaces: Vec::new(),
        }
    }

    /// Count the control's final state; a stale namespace load makes the event stale.
    fn finish(&mut self, control: &SelectionControl) {
        self.reconcile = SkillSelectionReconciler::tally(control.groups());
        let any_stale = self
            .namespaces
            .iter()
            .any(|(_, outcome)| *outcome == LoadOutcome::Stale);
        if any_stale && self.status == SyncStatus::Settled {
            self.status = SyncStatus::Stale;
        }
    }

    pub fn is_settled(&self) -> bool {
        self.status == SyncStatus::Settled
    }
}

fn groups_or_empty(result: Result<Vec<SkillGroup>, ApiError>, control: &str) -> Vec<SkillGroup> {
    result.unwrap_or_else(|e| {
        warn!(control, "Failed to load skill groups: {}", e);
        Vec::new()
    })
}

async fn fetch_expansions(loader: &CascadingOptionLoader) -> Vec<Option<Vec<String>>> {
    join_all(
        Namespace::EXPANDABLE
            .iter()
            .map(|namespace| loader.fetch_items(*namespace)),
    )
    .await
}

fn log_unmatched(control: &SelectionControl, assignments: &AssignmentSet) {
    for entry in SkillSelectionReconciler::unmatched(control.groups(), assignments) {
        debug!(
            control = control.name(),
            atom = ?entry.atom,
            expanded = ?entry.expanded,
            "Assigned skill has no matching option"
        );
    }
}

/// Keeps the profile skill control in line with the selected profile.
pub struct ProfileSkillSync {
    catalog: Arc<dyn SkillCatalog>,
    directory: Arc<dyn AgentDirectory>,
    loader: CascadingOptionLoader,
    control: SharedControl,
}

impl ProfileSkillSync {
    pub fn new(
        catalog: Arc<dyn SkillCatalog>,
        directory: Arc<dyn AgentDirectory>,
        control: SharedControl,
    ) -> Self {
        Self {
            loader: CascadingOptionLoader::new(catalog.clone()),
            catalog,
            directory,
            control,
        }
    }

    pub fn control(&self) -> &SharedControl {
        &self.control
    }

    /// Rebuild the control for `profile`.
    ///
    /// Generic groups, the assignment set and the namespace expansions are fetched
    /// concurrently; the control is only touched once all of them completed, and
    /// then in a single locked pass.
    pub async fn select_profile(&self, profile: &str) -> SyncReport {
        let token = self.control.lock().begin();
        debug!(profile, generation = token.value(), "Profile selected");

        let query = SkillQuery::groups();
        let (groups, assigned, expansions) = tokio::join!(
            self.catalog.fetch(&query),
            self.directory.profile_skills(profile),
            fetch_expansions(&self.loader),
        );

        let mut control = self.control.lock();
        if !control.is_current(token) {
            debug!(profile, generation = token.value(), "Discarding stale profile skills");
            return SyncReport::new(token, SyncStatus::Stale);
        }

        for group in groups_or_empty(groups, control.name()) {
            control.append_group(group.to_option_group());
        }

        let assignments = match assigned {
            Ok(items) => AssignmentSet::from(items),
            Err(e) => {
                warn!(profile, "Failed to load profile skills: {}", e);
                SkillSelectionReconciler::reconcile(control.groups_mut(), &AssignmentSet::empty());
                let mut report = SyncReport::new(token, SyncStatus::AssignmentsUnavailable);
                report.finish(&control);
                return report;
            }
        };

        SkillSelectionReconciler::reconcile(control.groups_mut(), &assignments);
        let mut report = SyncReport::new(token, SyncStatus::Settled);
        for (namespace, items) in Namespace::EXPANDABLE.into_iter().zip(expansions) {
            let outcome = append_namespace(
                &mut control,
                namespace,
                items.as_deref(),
                token,
                |item| assignments.contains_expanded(namespace.label(), item),
            );
            report.namespaces.push((namespace, outcome));
        }
        report.finish(&control);
        log_unmatched(&control, &assignments);
        drop(control);

        info!(
            profile,
            selected = report.reconcile.selected,
            "Profile skills settled"
        );
        report
    }
}

/// Agent data and the skill sync outcome for one agent selection.
#[derive(Debug, Clone)]
pub struct AgentSelection {
    pub agent: AgentRecord,
    pub report: SyncReport,
}

/// Keeps the agent skill control in line with the selected agent.
///
/// `initialize` rebuilds the control under rebuild tokens; agent selections only
/// reconcile it under selection tokens, so neither discards the other. The last
/// selected agent's skills are kept and applied again when a rebuild lands.
pub struct AgentSkillSync {
    catalog: Arc<dyn SkillCatalog>,
    directory: Arc<dyn AgentDirectory>,
    loader: CascadingOptionLoader,
    control: SharedControl,
    assignments: Mutex<AssignmentSet>,
}

impl AgentSkillSync {
    pub fn new(
        catalog: Arc<dyn SkillCatalog>,
        directory: Arc<dyn AgentDirectory>,
        control: SharedControl,
    ) -> Self {
        Self {
            loader: CascadingOptionLoader::new(catalog.clone()),
            catalog,
            directory,
            control,
            assignments: Mutex::new(AssignmentSet::empty()),
        }
    }

    pub fn control(&self) -> &SharedControl {
        &self.control
    }

    /// Build the control from the generic groups and every expandable namespace.
    pub async fn initialize(&self) -> SyncReport {
        let token = self.control.lock().begin();
        let query = SkillQuery::groups();
        let (groups, expansions) =
            tokio::join!(self.catalog.fetch(&query), fetch_expansions(&self.loader));

        let mut control = self.control.lock();
        if !control.is_current(token) {
            debug!(generation = token.value(), "Discarding stale skill initialization");
            return SyncReport::new(token, SyncStatus::Stale);
        }
        for group in groups_or_empty(groups, control.name()) {
            control.append_group(group.to_option_group());
        }

        let mut report = SyncReport::new(token, SyncStatus::Settled);
        for (namespace, items) in Namespace::EXPANDABLE.into_iter().zip(expansions) {
            let outcome = append_namespace(&mut control, namespace, items.as_deref(), token, |_| false);
            report.namespaces.push((namespace, outcome));
        }
        let assignments = self.assignments.lock();
        SkillSelectionReconciler::reconcile(control.groups_mut(), &assignments);
        report.finish(&control);
        report
    }

    /// Fetch `login` and reconcile the whole control against its skills.
    pub async fn select_agent(&self, login: &str) -> Result<AgentSelection, ApiError> {
        let token = self.control.lock().next_selection();
        let agent = self.directory.agent(login).await?;

        let mut control = self.control.lock();
        if !control.is_current_selection(token) {
            debug!(login, generation = token.value(), "Discarding stale agent skills");
            return Ok(AgentSelection {
                agent,
                report: SyncReport::new(token, SyncStatus::Stale),
            });
        }

        let assignments = AssignmentSet::new(agent.skills.clone());
        SkillSelectionReconciler::reconcile(control.groups_mut(), &assignments);
        let mut report = SyncReport::new(token, SyncStatus::Settled);
        report.finish(&control);
        log_unmatched(&control, &assignments);
        *self.assignments.lock() = assignments;
        drop(control);

        Ok(AgentSelection { agent, report })
    }
}
