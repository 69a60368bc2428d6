use async_trait::async_trait;
use parking_lot::Mutex;
use spice::directory::{AgentDirectory, AgentRecord, InMemoryDirectory, RemoteStatus};
use spice::skill::{AssignedSkill, Namespace, SkillGroup, StaticSkillCatalog};
use spice::ApiError;
use std::collections::HashMap;
use tokio::sync::oneshot;

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn catalog() -> StaticSkillCatalog {
    StaticSkillCatalog::new()
        .with_group(SkillGroup::new("languages", strings(&["english", "spanish"])))
        .with_group(SkillGroup::new("system", strings(&["_queue", "_brand"])))
        .with_expansion(Namespace::Brand, strings(&["acme"]))
        .with_expansion(Namespace::Queue, strings(&["support", "sales"]))
}

pub fn agent(login: &str, profile: &str, skills: Vec<AssignedSkill>) -> AgentRecord {
    AgentRecord {
        login: login.to_string(),
        integrated: serde_json::json!(true),
        securitylevel: 3,
        profile: profile.to_string(),
        skills,
    }
}

/// Directory whose profile lookups wait for a release signal when one is registered.
pub struct GatedDirectory {
    inner: InMemoryDirectory,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
}

impl GatedDirectory {
    pub fn new(inner: InMemoryDirectory) -> Self {
        Self {
            inner,
            gates: Mutex::new(HashMap::new()),
        }
    }

    /// Hold lookups of `profile` until the returned sender fires.
    pub fn gate(&self, profile: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().insert(profile.to_string(), rx);
        tx
    }
}

#[async_trait]
impl AgentDirectory for GatedDirectory {
    async fn profile_skills(&self, profile: &str) -> Result<Vec<AssignedSkill>, ApiError> {
        let gate = self.gates.lock().remove(profile);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.inner.profile_skills(profile).await
    }

    async fn agent(&self, login: &str) -> Result<AgentRecord, ApiError> {
        self.inner.agent(login).await
    }

    async fn delete_profile(&self, profile: &str) -> Result<RemoteStatus, ApiError> {
        self.inner.delete_profile(profile).await
    }

    async fn delete_agent(&self, login: &str) -> Result<RemoteStatus, ApiError> {
        self.inner.delete_agent(login).await
    }
}
