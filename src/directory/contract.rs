//! Agent directory port.

use super::types::{AgentRecord, RemoteStatus};
use crate::error::ApiError;
use crate::skill::AssignedSkill;
use async_trait::async_trait;

/// Remote agent/profile operations the console consumes.
///
/// Implementations translate a `success: false` answer on read requests into
/// `ApiError::Remote`; delete requests return the status as-is.
#[async_trait]
pub trait AgentDirectory: Send + Sync {
    /// `GET /agents/profiles/{name}/getskills`
    async fn profile_skills(&self, profile: &str) -> Result<Vec<AssignedSkill>, ApiError>;

    /// `GET /agents/agents/{login}/get`
    async fn agent(&self, login: &str) -> Result<AgentRecord, ApiError>;

    /// `GET /agents/profiles/{name}/delete`
    async fn delete_profile(&self, profile: &str) -> Result<RemoteStatus, ApiError>;

    /// `GET /agents/agents/{login}/delete`
    async fn delete_agent(&self, login: &str) -> Result<RemoteStatus, ApiError>;
}
