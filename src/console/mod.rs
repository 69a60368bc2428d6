//! Agents console: tree selection, editors and destroy actions.

mod editor;

pub use editor::{AgentEditor, AgentUpdate, ProfileEditor, ProfileUpdate};

use crate::config::ConsoleConfig;
use crate::directory::{AgentDirectory, TreeItem};
use crate::error::ApiError;
use crate::skill::{
    shared_control, AgentSkillSync, ProfileSkillSync, SharedControl, SkillCatalog, SyncReport,
    SyncStatus,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Editor shown for the current tree selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveEditor {
    None,
    Profile(ProfileEditor),
    Agent(AgentEditor),
}

/// Result of the destroy action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyOutcome {
    /// Deleted on the server; the tree should be refreshed.
    Deleted,
    /// The server refused; carries its message.
    Rejected(String),
    NothingSelected,
}

pub struct AgentsConsole {
    directory: Arc<dyn AgentDirectory>,
    profile_sync: ProfileSkillSync,
    agent_sync: AgentSkillSync,
    locked_profile: String,
    selected: Option<TreeItem>,
    active: ActiveEditor,
}

impl AgentsConsole {
    pub fn new(
        directory: Arc<dyn AgentDirectory>,
        catalog: Arc<dyn SkillCatalog>,
        config: &ConsoleConfig,
    ) -> Self {
        Self {
            profile_sync: ProfileSkillSync::new(
                catalog.clone(),
                directory.clone(),
                shared_control("agentProfileSkills"),
            ),
            agent_sync: AgentSkillSync::new(catalog, directory.clone(), shared_control("agentSkills")),
            directory,
            locked_profile: config.locked_profile.clone(),
            selected: None,
            active: ActiveEditor::None,
        }
    }

    pub fn profile_skills(&self) -> &SharedControl {
        self.profile_sync.control()
    }

    pub fn agent_skills(&self) -> &SharedControl {
        self.agent_sync.control()
    }

    pub fn active(&self) -> &ActiveEditor {
        &self.active
    }

    pub fn selected(&self) -> Option<&TreeItem> {
        self.selected.as_ref()
    }

    /// Rebuild the agent skill control from the catalog.
    pub async fn init_skills(&self) -> SyncReport {
        self.agent_sync.initialize().await
    }

    /// Open the editor for a clicked tree node.
    ///
    /// A failed agent load closes the open editor and clears the selection, so
    /// destroy and update never act on a different entity than the one shown.
    pub async fn on_tree_click(&mut self, item: TreeItem) -> Result<SyncReport, ApiError> {
        if item.is_profile() {
            self.active = ActiveEditor::Profile(ProfileEditor::open(&item.name, &self.locked_profile));
            self.selected = Some(item.clone());
            return Ok(self.profile_sync.select_profile(&item.name).await);
        }

        let selection = match self.agent_sync.select_agent(&item.name).await {
            Ok(selection) => selection,
            Err(e) => {
                warn!(login = %item.name, "Failed to load agent: {}", e);
                self.selected = None;
                self.active = ActiveEditor::None;
                return Err(e);
            }
        };
        if selection.report.status != SyncStatus::Stale {
            self.active = ActiveEditor::Agent(AgentEditor::from_record(&selection.agent));
            self.selected = Some(item);
        }
        Ok(selection.report)
    }

    /// Delete the selected profile or agent.
    pub async fn destroy_selected(&mut self) -> Result<DestroyOutcome, ApiError> {
        let Some(item) = self.selected.clone() else {
            return Ok(DestroyOutcome::NothingSelected);
        };

        let result = if item.is_profile() {
            self.directory.delete_profile(&item.name).await
        } else {
            self.directory.delete_agent(&item.name).await
        };
        let status = result.map_err(|e| {
            warn!(name = %item.name, "Delete request failed: {}", e);
            e
        })?;

        if status.success {
            info!(kind = %item.kind, name = %item.name, "Deleted; tree refresh requested");
            self.selected = None;
            self.active = ActiveEditor::None;
            Ok(DestroyOutcome::Deleted)
        } else {
            let message = status.message.unwrap_or_default();
            warn!(name = %item.name, "Delete rejected: {}", message);
            Ok(DestroyOutcome::Rejected(message))
        }
    }

    /// Submission payload for the open profile editor.
    pub fn profile_update(&self) -> Option<ProfileUpdate> {
        match &self.active {
            ActiveEditor::Profile(editor) => Some(editor.to_update(&self.profile_sync.control().lock())),
            _ => None,
        }
    }

    /// Submission payload for the open agent editor.
    pub fn agent_update(&self) -> Option<AgentUpdate> {
        match &self.active {
            ActiveEditor::Agent(editor) => Some(editor.to_update(&self.agent_sync.control().lock())),
            _ => None,
        }
    }

    /// Mutable access to the open profile editor, e.g. to rename it.
    pub fn profile_editor_mut(&mut self) -> Option<&mut ProfileEditor> {
        match &mut self.active {
            ActiveEditor::Profile(editor) => Some(editor),
            _ => None,
        }
    }
}
