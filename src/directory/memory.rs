//! In-memory agent directory.

use super::contract::AgentDirectory;
use super::types::{AgentRecord, RemoteStatus};
use crate::error::ApiError;
use crate::skill::AssignedSkill;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Directory backed by maps; used offline and in tests.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    profiles: RwLock<HashMap<String, Vec<AssignedSkill>>>,
    agents: RwLock<HashMap<String, AgentRecord>>,
    /// Names that refuse deletion, with the server message.
    protected: HashMap<String, String>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(self, name: impl Into<String>, skills: Vec<AssignedSkill>) -> Self {
        self.profiles.write().insert(name.into(), skills);
        self
    }

    pub fn with_agent(self, agent: AgentRecord) -> Self {
        self.agents.write().insert(agent.login.clone(), agent);
        self
    }

    pub fn with_protected(mut self, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.protected.insert(name.into(), message.into());
        self
    }

    pub fn has_profile(&self, name: &str) -> bool {
        self.profiles.read().contains_key(name)
    }

    pub fn has_agent(&self, login: &str) -> bool {
        self.agents.read().contains_key(login)
    }

    fn delete_from<T>(
        &self,
        map: &RwLock<HashMap<String, T>>,
        kind: &str,
        name: &str,
    ) -> RemoteStatus {
        if let Some(message) = self.protected.get(name) {
            return RemoteStatus::rejected(message.clone());
        }
        match map.write().remove(name) {
            Some(_) => RemoteStatus::ok(),
            None => RemoteStatus::rejected(format!("No such {}: {}", kind, name)),
        }
    }
}

#[async_trait]
impl AgentDirectory for InMemoryDirectory {
    async fn profile_skills(&self, profile: &str) -> Result<Vec<AssignedSkill>, ApiError> {
        self.profiles
            .read()
            .get(profile)
            .cloned()
            .ok_or_else(|| ApiError::Remote(format!("No such profile: {}", profile)))
    }

    async fn agent(&self, login: &str) -> Result<AgentRecord, ApiError> {
        self.agents
            .read()
            .get(login)
            .cloned()
            .ok_or_else(|| ApiError::Remote(format!("No such agent: {}", login)))
    }

    async fn delete_profile(&self, profile: &str) -> Result<RemoteStatus, ApiError> {
        Ok(self.delete_from(&self.profiles, "profile", profile))
    }

    async fn delete_agent(&self, login: &str) -> Result<RemoteStatus, ApiError> {
        Ok(self.delete_from(&self.agents, "agent", login))
    }
}
