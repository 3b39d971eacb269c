//! Pull request resource handler.
//!
//! Opens a pull request between two refs and reflects the remote-assigned id
//! and URL. Pull requests are effectively immutable from this handler's
//! perspective: update collapses to read, and delete has no remote effect
//! (abandoning or closing a PR is a different workflow).

use crate::api::traits::PullRequestOperations;
use crate::error::{ApiError, ConfigError, Result};
use crate::models::NewPullRequest;
use crate::resources::ResourceLifecycle;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Boundary-validated configuration for a pull request resource.
#[derive(Debug, Clone, PartialEq)]
pub struct PullRequestConfig {
    /// Project the repository belongs to.
    pub project_id: Uuid,
    /// Repository the pull request targets.
    pub repo_name: String,
    /// Pull request title.
    pub title: String,
    /// Source ref, e.g. `refs/heads/feature`.
    pub source_ref_name: String,
    /// Target ref, e.g. `refs/heads/main`.
    pub target_ref_name: String,
    /// Optional pull request description.
    pub description: Option<String>,
}

impl PullRequestConfig {
    /// Validates the raw configuration values and builds the config.
    pub fn new(
        project_id: &str,
        repo_name: &str,
        title: &str,
        source_ref_name: &str,
        target_ref_name: &str,
    ) -> std::result::Result<Self, ConfigError> {
        let project_id = Uuid::parse_str(project_id).map_err(|e| ConfigError::InvalidValue {
            field: "project_id".to_string(),
            message: format!("'{}' is not a UUID: {}", project_id, e),
        })?;
        for (field, value) in [
            ("repo_name", repo_name),
            ("title", title),
            ("source_ref_name", source_ref_name),
            ("target_ref_name", target_ref_name),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }

        Ok(Self {
            project_id,
            repo_name: repo_name.to_string(),
            title: title.to_string(),
            source_ref_name: source_ref_name.to_string(),
            target_ref_name: target_ref_name.to_string(),
            description: None,
        })
    }

    /// Sets the pull request description.
    pub fn with_description(mut self, description: &str) -> Self {
        if !description.is_empty() {
            self.description = Some(description.to_string());
        }
        self
    }
}

/// Local state of a pull request resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PullRequestState {
    /// Resource identity: the remote pull request id.
    pub id: Option<String>,
    /// API URL of the pull request.
    pub url: Option<String>,
}

/// Handler wiring the pull request resource to the git API area.
pub struct PullRequestResource {
    pull_requests: Arc<dyn PullRequestOperations>,
}

impl PullRequestResource {
    /// Creates a handler on top of the given pull request operations.
    pub fn new(pull_requests: Arc<dyn PullRequestOperations>) -> Self {
        Self { pull_requests }
    }

    fn recorded_id(state: &PullRequestState) -> Result<i32> {
        let id = state.id.as_deref().ok_or_else(|| ApiError::NotFound {
            resource: "pull request (no recorded id)".to_string(),
        })?;
        id.parse().map_err(|_| {
            ConfigError::InvalidValue {
                field: "id".to_string(),
                message: format!("'{}' is not a pull request id", id),
            }
            .into()
        })
    }
}

#[async_trait]
impl ResourceLifecycle for PullRequestResource {
    type Config = PullRequestConfig;
    type State = PullRequestState;

    async fn create(&self, config: &Self::Config, state: &mut Self::State) -> Result<()> {
        let project = config.project_id.to_string();
        let pr = self
            .pull_requests
            .create_pull_request(
                &config.repo_name,
                &project,
                NewPullRequest {
                    title: config.title.clone(),
                    description: config.description.clone(),
                    source_ref_name: config.source_ref_name.clone(),
                    target_ref_name: config.target_ref_name.clone(),
                },
            )
            .await
            .map_err(|source| ApiError::RemoteRequest {
                resource: format!(
                    "pull request '{}' ({} -> {})",
                    config.title, config.source_ref_name, config.target_ref_name
                ),
                source,
            })?;
        tracing::info!(pull_request_id = pr.id, "opened pull request");

        state.id = Some(pr.id.to_string());
        self.read(config, state).await
    }

    async fn read(&self, config: &Self::Config, state: &mut Self::State) -> Result<()> {
        let pull_request_id = Self::recorded_id(state)?;
        let project = config.project_id.to_string();
        let pr = self
            .pull_requests
            .get_pull_request(&config.repo_name, &project, pull_request_id)
            .await
            .map_err(|source| ApiError::RemoteRequest {
                resource: format!("pull request {}", pull_request_id),
                source,
            })?;

        state.id = Some(pr.id.to_string());
        state.url = Some(pr.url);
        Ok(())
    }

    async fn update(&self, config: &Self::Config, state: &mut Self::State) -> Result<()> {
        self.read(config, state).await
    }

    async fn delete(&self, _config: &Self::Config, state: &mut Self::State) -> Result<()> {
        // No direct PR deletion exists in this flow; drop local tracking only.
        tracing::debug!(id = ?state.id, "dropping local pull request state");
        state.id = None;
        state.url = None;
        Ok(())
    }
}
