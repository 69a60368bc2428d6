//! Skills: catalog access, option loading, and selection reconciliation.
//!
//! Skills are plain atoms or namespaced `{namespace,item}` pairs. The profile and
//! agent editors show them in a multi-valued selection control whose state is
//! rebuilt from the server's assignment set on every selection event.

pub mod catalog;
pub mod loader;
pub mod model;
pub mod namespace;
pub mod reconcile;
pub mod selection;
pub mod sync;

pub use catalog::{SkillCatalog, SkillGroup, SkillQuery, StaticSkillCatalog};
pub use loader::{namespace_group, CascadingOptionLoader, LoadOutcome};
pub use model::{AssignedSkill, AssignmentSet, Skill};
pub use namespace::Namespace;
pub use reconcile::{OptionState, ReconcileReport, SkillSelectionReconciler};
pub use selection::{
    shared_control, Generation, OptionGroup, SelectionControl, SelectionOption, SharedControl,
};
pub use sync::{AgentSelection, AgentSkillSync, ProfileSkillSync, SyncReport, SyncStatus};
