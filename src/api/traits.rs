//! Traits for Azure DevOps API operations.
//!
//! These traits abstract the Azure DevOps API operations to enable:
//! - Mocking for unit tests
//! - Alternative implementations
//! - Easier testing of async code
//!
//! Each trait covers one API area and speaks the crate's domain models;
//! conversion to and from the generated azure_devops_rust_api types happens
//! in the `Real*` implementations and in [`crate::api::mappers`].

use anyhow::Result;
use async_trait::async_trait;
use azure_devops_rust_api::git::models as git_models;

use crate::models::{
    GitRef, NewPullRequest, PullRequest, PushRequest, QueuedBuild, RefUpdate, RefUpdateResult,
};

/// Trait for git ref operations (list and batch update).
#[async_trait]
pub trait RefOperations: Send + Sync {
    /// Lists all refs in a repository.
    async fn list_refs(&self, repository: &str, project: &str) -> Result<Vec<GitRef>>;

    /// Submits a batch of ref updates; the server reports success per ref.
    async fn update_refs(
        &self,
        repository: &str,
        project: &str,
        updates: Vec<RefUpdate>,
    ) -> Result<Vec<RefUpdateResult>>;
}

/// Trait for push operations.
#[async_trait]
pub trait PushOperations: Send + Sync {
    /// Submits a single-ref, single-commit push.
    async fn create_push(&self, repository: &str, project: &str, push: PushRequest) -> Result<()>;
}

/// Trait for build operations.
#[async_trait]
pub trait BuildOperations: Send + Sync {
    /// Queues a build for a definition; the server assigns the build id.
    async fn queue_build(
        &self,
        project: &str,
        definition_id: i32,
        source_branch: &str,
    ) -> Result<QueuedBuild>;

    /// Fetches a build by id.
    async fn get_build(&self, project: &str, build_id: i32) -> Result<QueuedBuild>;
}

/// Trait for pull request operations.
#[async_trait]
pub trait PullRequestOperations: Send + Sync {
    /// Opens a pull request; the server assigns the id and URL.
    async fn create_pull_request(
        &self,
        repository: &str,
        project: &str,
        pull_request: NewPullRequest,
    ) -> Result<PullRequest>;

    /// Fetches a pull request by id.
    async fn get_pull_request(
        &self,
        repository: &str,
        project: &str,
        pull_request_id: i32,
    ) -> Result<PullRequest>;
}

/// Combined trait for everything the git branch handler needs.
pub trait GitBranchOperations: RefOperations + PushOperations + Send + Sync {}

impl<T> GitBranchOperations for T where T: RefOperations + PushOperations + Send + Sync {}

/// Real implementation wrapping azure_devops_rust_api::git::Client.
///
/// Holds the organization name so the handlers never have to thread it
/// through every call.
#[derive(Clone)]
pub struct RealGitOperations {
    organization: String,
    client: azure_devops_rust_api::git::Client,
}

impl RealGitOperations {
    /// Creates a new RealGitOperations wrapper.
    pub fn new(organization: String, client: azure_devops_rust_api::git::Client) -> Self {
        Self {
            organization,
            client,
        }
    }
}

#[async_trait]
impl RefOperations for RealGitOperations {
    async fn list_refs(&self, repository: &str, project: &str) -> Result<Vec<GitRef>> {
        let response = self
            .client
            .refs_client()
            .list(&self.organization, repository, project)
            .await?;
        Ok(response.value.into_iter().map(GitRef::from).collect())
    }

    async fn update_refs(
        &self,
        repository: &str,
        project: &str,
        updates: Vec<RefUpdate>,
    ) -> Result<Vec<RefUpdateResult>> {
        let body: Vec<git_models::GitRefUpdate> = updates
            .into_iter()
            .map(git_models::GitRefUpdate::from)
            .collect();
        let response = self
            .client
            .refs_client()
            .update_refs(&self.organization, body, repository, project)
            .await?;
        Ok(response
            .value
            .into_iter()
            .map(RefUpdateResult::from)
            .collect())
    }
}

#[async_trait]
impl PushOperations for RealGitOperations {
    async fn create_push(&self, repository: &str, project: &str, push: PushRequest) -> Result<()> {
        let body = git_models::GitPush::from(push);
        self.client
            .pushes_client()
            .create(&self.organization, body, repository, project)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PullRequestOperations for RealGitOperations {
    async fn create_pull_request(
        &self,
        repository: &str,
        project: &str,
        pull_request: NewPullRequest,
    ) -> Result<PullRequest> {
        let body = git_models::GitPullRequestCreateOptions::from(pull_request);
        let pr = self
            .client
            .pull_requests_client()
            .create(&self.organization, repository, project, body)
            .await?;
        Ok(PullRequest::from(pr))
    }

    async fn get_pull_request(
        &self,
        repository: &str,
        project: &str,
        pull_request_id: i32,
    ) -> Result<PullRequest> {
        let pr = self
            .client
            .pull_requests_client()
            .get_pull_request(&self.organization, repository, pull_request_id, project)
            .await?;
        Ok(PullRequest::from(pr))
    }
}

/// Real implementation wrapping azure_devops_rust_api::build::Client.
#[derive(Clone)]
pub struct RealBuildOperations {
    organization: String,
    client: azure_devops_rust_api::build::Client,
}

impl RealBuildOperations {
    /// Creates a new RealBuildOperations wrapper.
    pub fn new(organization: String, client: azure_devops_rust_api::build::Client) -> Self {
        Self {
            organization,
            client,
        }
    }
}

#[async_trait]
impl BuildOperations for RealBuildOperations {
    async fn queue_build(
        &self,
        project: &str,
        definition_id: i32,
        source_branch: &str,
    ) -> Result<QueuedBuild> {
        let body = super::mappers::queue_build_body(project, definition_id, source_branch);
        let build = self
            .client
            .builds_client()
            .queue(&self.organization, body, project)
            .await?;
        Ok(QueuedBuild::from(build))
    }

    async fn get_build(&self, project: &str, build_id: i32) -> Result<QueuedBuild> {
        let build = self
            .client
            .builds_client()
            .get(&self.organization, project, build_id)
            .await?;
        Ok(QueuedBuild::from(build))
    }
}
