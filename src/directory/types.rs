//! Wire shapes for agent and profile requests.

use crate::skill::AssignedSkill;
use serde::{Deserialize, Serialize};

/// Agent account as returned by `/agents/agents/{login}/get`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub login: String,
    /// Integration flag as the server renders it; display only.
    #[serde(default)]
    pub integrated: serde_json::Value,
    #[serde(default)]
    pub securitylevel: u32,
    #[serde(default)]
    pub profile: String,
    #[serde(default)]
    pub skills: Vec<AssignedSkill>,
}

impl AgentRecord {
    pub fn integrated_display(&self) -> String {
        match &self.integrated {
            serde_json::Value::Null => String::new(),
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    pub agent: AgentRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSkillsResponse {
    #[serde(default)]
    pub items: Vec<AssignedSkill>,
}

/// `{success, message?}` acknowledgement for mutating requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteStatus {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RemoteStatus {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// A node of the agents tree as handed over by the tree view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

impl TreeItem {
    pub const PROFILE: &'static str = "profile";

    pub fn profile(name: impl Into<String>) -> Self {
        Self {
            kind: Self::PROFILE.to_string(),
            name: name.into(),
        }
    }

    pub fn agent(login: impl Into<String>) -> Self {
        Self {
            kind: "agent".to_string(),
            name: login.into(),
        }
    }

    /// Anything that is not a profile node is treated as an agent.
    pub fn is_profile(&self) -> bool {
        self.kind == Self::PROFILE
    }
}
