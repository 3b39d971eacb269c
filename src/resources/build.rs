//! Build resource handler.
//!
//! Queues a build run for a pipeline definition and reflects the
//! remote-assigned build id and URL. Builds are immutable once queued: update
//! collapses to read, and delete has no remote effect because Azure DevOps
//! keeps historical build records.

use crate::api::traits::BuildOperations;
use crate::error::{ApiError, ConfigError, Result};
use crate::resources::ResourceLifecycle;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Boundary-validated configuration for a build resource.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    /// Project the definition belongs to.
    pub project_id: Uuid,
    /// Pipeline definition to queue.
    pub definition_id: i32,
    /// Branch the build runs against, e.g. `refs/heads/main`.
    pub source_branch: String,
}

impl BuildConfig {
    /// Validates the raw configuration values and builds the config.
    pub fn new(
        project_id: &str,
        definition_id: i32,
        source_branch: &str,
    ) -> std::result::Result<Self, ConfigError> {
        let project_id = Uuid::parse_str(project_id).map_err(|e| ConfigError::InvalidValue {
            field: "project_id".to_string(),
            message: format!("'{}' is not a UUID: {}", project_id, e),
        })?;
        if definition_id < 1 {
            return Err(ConfigError::InvalidValue {
                field: "definition_id".to_string(),
                message: format!("must be at least 1, got {}", definition_id),
            });
        }
        if source_branch.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "source_branch".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(Self {
            project_id,
            definition_id,
            source_branch: source_branch.to_string(),
        })
    }
}

/// Local state of a build resource.
///
/// The id is the remote-assigned build id as a string; it is only ever set
/// from a successful remote response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildState {
    /// Resource identity: the remote build id.
    pub id: Option<String>,
    /// API URL of the build.
    pub url: Option<String>,
}

/// Handler wiring the build resource to the build API area.
pub struct BuildResource {
    builds: Arc<dyn BuildOperations>,
}

impl BuildResource {
    /// Creates a handler on top of the given build operations.
    pub fn new(builds: Arc<dyn BuildOperations>) -> Self {
        Self { builds }
    }

    fn recorded_id(state: &BuildState) -> Result<i32> {
        let id = state.id.as_deref().ok_or_else(|| ApiError::NotFound {
            resource: "build (no recorded id)".to_string(),
        })?;
        id.parse().map_err(|_| {
            ConfigError::InvalidValue {
                field: "id".to_string(),
                message: format!("'{}' is not a build id", id),
            }
            .into()
        })
    }
}

#[async_trait]
impl ResourceLifecycle for BuildResource {
    type Config = BuildConfig;
    type State = BuildState;

    async fn create(&self, config: &Self::Config, state: &mut Self::State) -> Result<()> {
        let project = config.project_id.to_string();
        let build = self
            .builds
            .queue_build(&project, config.definition_id, &config.source_branch)
            .await
            .map_err(|source| ApiError::RemoteRequest {
                resource: format!("build for definition {}", config.definition_id),
                source,
            })?;
        tracing::info!(build_id = build.id, "queued build");

        state.id = Some(build.id.to_string());
        self.read(config, state).await
    }

    async fn read(&self, config: &Self::Config, state: &mut Self::State) -> Result<()> {
        let build_id = Self::recorded_id(state)?;
        let project = config.project_id.to_string();
        let build = self
            .builds
            .get_build(&project, build_id)
            .await
            .map_err(|source| ApiError::RemoteRequest {
                resource: format!("build {}", build_id),
                source,
            })?;

        state.id = Some(build.id.to_string());
        state.url = Some(build.url);
        Ok(())
    }

    async fn update(&self, config: &Self::Config, state: &mut Self::State) -> Result<()> {
        self.read(config, state).await
    }

    async fn delete(&self, _config: &Self::Config, state: &mut Self::State) -> Result<()> {
        // No remote deletion exists for a historical build record.
        tracing::debug!(id = ?state.id, "dropping local build state");
        state.id = None;
        state.url = None;
        Ok(())
    }
}
