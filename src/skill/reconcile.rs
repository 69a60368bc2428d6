//! Skill selection reconciliation.
//!
//! Computes selected/disabled state for every option of a control from a
//! server-supplied assignment set. Option identity and ordering never change.

use super::model::{AssignedSkill, AssignmentSet, Skill};
use super::namespace::Namespace;
use super::selection::{OptionGroup, SelectionOption};
use std::collections::HashSet;

/// How reconciliation classified one option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionState {
    Reserved,
    Selected,
    Unselected,
}

/// Counts from one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileReport {
    pub selected: usize,
    pub disabled: usize,
    pub unselected: usize,
}

pub struct SkillSelectionReconciler;

impl SkillSelectionReconciler {
    /// Reconcile every option of `groups` against `assignments`.
    pub fn reconcile(groups: &mut [OptionGroup], assignments: &AssignmentSet) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        for option in groups.iter_mut().flat_map(|group| group.options.iter_mut()) {
            match Self::reconcile_option(option, assignments) {
                OptionState::Reserved => report.disabled += 1,
                OptionState::Selected => report.selected += 1,
                OptionState::Unselected => report.unselected += 1,
            }
        }
        report
    }

    /// Reconcile a single option.
    pub fn reconcile_option(
        option: &mut SelectionOption,
        assignments: &AssignmentSet,
    ) -> OptionState {
        if Namespace::is_reserved(&option.value) {
            option.disabled = true;
            option.selected = false;
            return OptionState::Reserved;
        }

        option.disabled = false;
        option.selected = assignments.contains(&Skill::decode(&option.value));
        if option.selected {
            OptionState::Selected
        } else {
            OptionState::Unselected
        }
    }

    /// Count the current state of every option in `groups`.
    pub fn tally(groups: &[OptionGroup]) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        for option in groups.iter().flat_map(|group| group.options.iter()) {
            if option.disabled {
                report.disabled += 1;
            } else if option.selected {
                report.selected += 1;
            } else {
                report.unselected += 1;
            }
        }
        report
    }

    /// Assignments that no option in `groups` can represent.
    ///
    /// These have no visible effect; callers only log them.
    pub fn unmatched<'a>(
        groups: &[OptionGroup],
        assignments: &'a AssignmentSet,
    ) -> Vec<&'a AssignedSkill> {
        let present: HashSet<Skill> = groups
            .iter()
            .flat_map(|group| group.options.iter())
            .filter(|option| !Namespace::is_reserved(&option.value))
            .map(|option| Skill::decode(&option.value))
            .collect();
        assignments
            .entries()
            .iter()
            .filter(|entry| match entry.skill() {
                Some(skill) => !present.contains(&skill),
                None => true,
            })
            .collect()
    }
}
