//! HTTP adapter for the admin server.
//!
//! One client implements the directory, catalog and property store contracts.
//! Read requests whose body carries `success: false` become `ApiError::Remote`.

use crate::config::ServerConfig;
use crate::directory::{AgentDirectory, AgentRecord, AgentResponse, ProfileSkillsResponse, RemoteStatus};
use crate::error::ApiError;
use crate::predicate::{PropertyEntry, PropertyStore};
use crate::skill::{AssignedSkill, Namespace, SkillCatalog, SkillGroup, SkillQuery};
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct Items<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

/// Reject bodies that report `success: false`. A missing flag counts as success.
fn check_envelope(body: serde_json::Value) -> Result<serde_json::Value, ApiError> {
    match body.get("success").and_then(serde_json::Value::as_bool) {
        Some(false) => {
            let message = body
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("request failed")
                .to_string();
            Err(ApiError::Remote(message))
        }
        _ => Ok(body),
    }
}

#[derive(Debug, Clone)]
pub struct HttpAdminClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpAdminClient {
    pub fn new(config: &ServerConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ApiError::ConfigError(format!("Invalid server URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::ConfigError(format!(
                "Server URL cannot be used as a base: {}",
                config.base_url
            )));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::ConfigError(format!("Server URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_body(&self, url: Url) -> Result<serde_json::Value, ApiError> {
        debug!(url = %url, "GET");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json::<serde_json::Value>().await?)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let body = check_envelope(self.get_body(url).await?)?;
        Ok(serde_json::from_value(body)?)
    }

    async fn get_status(&self, url: Url) -> Result<RemoteStatus, ApiError> {
        Ok(serde_json::from_value(self.get_body(url).await?)?)
    }
}

#[async_trait]
impl AgentDirectory for HttpAdminClient {
    async fn profile_skills(&self, profile: &str) -> Result<Vec<AssignedSkill>, ApiError> {
        let url = self.endpoint(&["agents", "profiles", profile, "getskills"])?;
        let response: ProfileSkillsResponse = self.get(url).await?;
        Ok(response.items)
    }

    async fn agent(&self, login: &str) -> Result<AgentRecord, ApiError> {
        let url = self.endpoint(&["agents", "agents", login, "get"])?;
        let response: AgentResponse = self.get(url).await?;
        Ok(response.agent)
    }

    async fn delete_profile(&self, profile: &str) -> Result<RemoteStatus, ApiError> {
        let url = self.endpoint(&["agents", "profiles", profile, "delete"])?;
        self.get_status(url).await
    }

    async fn delete_agent(&self, login: &str) -> Result<RemoteStatus, ApiError> {
        let url = self.endpoint(&["agents", "agents", login, "delete"])?;
        self.get_status(url).await
    }
}

#[async_trait]
impl SkillCatalog for HttpAdminClient {
    async fn fetch(&self, query: &SkillQuery) -> Result<Vec<SkillGroup>, ApiError> {
        let mut url = self.endpoint(&["skills", "groups"])?;
        url.query_pairs_mut().append_pair("type", &query.kind);
        let response: Items<SkillGroup> = self.get(url).await?;
        Ok(response.items)
    }

    async fn expand(&self, namespace: Namespace) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint(&["skills", "expand", namespace.label()])?;
        let response: Items<String> = self.get(url).await?;
        Ok(response.items)
    }
}

#[async_trait]
impl PropertyStore for HttpAdminClient {
    async fn lookup(&self, property: &str) -> Result<Option<PropertyEntry>, ApiError> {
        let mut url = self.endpoint(&["properties"])?;
        url.query_pairs_mut().append_pair("value", property);
        let response: Items<PropertyEntry> = self.get(url).await?;
        Ok(response.items.into_iter().next())
    }
}
