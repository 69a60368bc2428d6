//! Profile and agent editor state.

use crate::directory::AgentRecord;
use crate::skill::SelectionControl;
use serde::{Deserialize, Serialize};

/// Payload submitted when a profile edit is saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub old_name: String,
    pub name: String,
    pub skills: Vec<String>,
}

/// Payload submitted when an agent edit is saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentUpdate {
    pub old_login: String,
    pub login: String,
    pub securitylevel: u32,
    pub profile: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEditor {
    old_name: String,
    name: String,
    name_editable: bool,
}

impl ProfileEditor {
    /// Open `name` for editing. The profile named `locked_name` keeps its name.
    pub fn open(name: &str, locked_name: &str) -> Self {
        Self {
            old_name: name.to_string(),
            name: name.to_string(),
            name_editable: name != locked_name,
        }
    }

    pub fn old_name(&self) -> &str {
        &self.old_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_name_editable(&self) -> bool {
        self.name_editable
    }

    /// Rename the profile; ignored for the locked profile.
    pub fn set_name(&mut self, name: &str) -> bool {
        if !self.name_editable {
            return false;
        }
        self.name = name.to_string();
        true
    }

    pub fn to_update(&self, skills: &SelectionControl) -> ProfileUpdate {
        ProfileUpdate {
            old_name: self.old_name.clone(),
            name: self.name.clone(),
            skills: skills.selected_values(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentEditor {
    pub old_login: String,
    pub login: String,
    /// Display only.
    pub integrated: String,
    pub security_level: u32,
    pub profile: String,
}

impl AgentEditor {
    pub fn from_record(agent: &AgentRecord) -> Self {
        Self {
            old_login: agent.login.clone(),
            login: agent.login.clone(),
            integrated: agent.integrated_display(),
            security_level: agent.securitylevel,
            profile: agent.profile.clone(),
        }
    }

    pub fn to_update(&self, skills: &SelectionControl) -> AgentUpdate {
        AgentUpdate {
            old_login: self.old_login.clone(),
            login: self.login.clone(),
            securitylevel: self.security_level,
            profile: self.profile.clone(),
            skills: skills.selected_values(),
        }
    }
}
