//! Aggregated Azure DevOps API client.
//!
//! This module provides the shared, pre-authenticated set of sub-clients (one
//! per API area) that every resource handler receives.

use anyhow::Result;
use azure_devops_rust_api::{build, git};
use secrecy::SecretString;
use std::sync::Arc;

use super::credential::PatCredential;
use super::traits::{
    BuildOperations, GitBranchOperations, PullRequestOperations, RealBuildOperations,
    RealGitOperations,
};

/// Aggregated Azure DevOps client for the resource handlers.
///
/// Holds the organization name plus the `git` and `build` sub-clients from
/// the azure_devops_rust_api crate, and hands out the per-area trait objects
/// the handlers are built against.
///
/// # Example
///
/// ```rust,no_run
/// use ado_provider::AzureDevOpsClient;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AzureDevOpsClient::new("my-org".to_string(), "my-pat".to_string())?;
/// let builds = client.build_operations();
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AzureDevOpsClient {
    organization: String,
    git_client: git::Client,
    build_client: build::Client,
}

impl std::fmt::Debug for AzureDevOpsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureDevOpsClient")
            .field("organization", &self.organization)
            .finish_non_exhaustive()
    }
}

impl AzureDevOpsClient {
    /// Creates a new aggregated client from a plain PAT string.
    ///
    /// The PAT is wrapped in a SecretString internally and only exposed when
    /// needed for authentication.
    pub fn new(organization: String, pat: String) -> Result<Self> {
        Self::new_with_secret(organization, SecretString::from(pat))
    }

    /// Creates a new aggregated client with a SecretString PAT.
    ///
    /// This is the preferred constructor when the PAT is already wrapped in a
    /// SecretString.
    pub fn new_with_secret(organization: String, pat: SecretString) -> Result<Self> {
        let credential = Arc::new(PatCredential::new(pat));
        let ado_credential = azure_devops_rust_api::Credential::TokenCredential(credential);

        let git_client = git::ClientBuilder::new(ado_credential.clone()).build();
        let build_client = build::ClientBuilder::new(ado_credential).build();

        Ok(Self {
            organization,
            git_client,
            build_client,
        })
    }

    /// Returns the organization name.
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Ref and push operations for the git branch handler.
    pub fn git_branch_operations(&self) -> Arc<dyn GitBranchOperations> {
        Arc::new(RealGitOperations::new(
            self.organization.clone(),
            self.git_client.clone(),
        ))
    }

    /// Pull request operations for the pull request handler.
    pub fn pull_request_operations(&self) -> Arc<dyn PullRequestOperations> {
        Arc::new(RealGitOperations::new(
            self.organization.clone(),
            self.git_client.clone(),
        ))
    }

    /// Build operations for the build handler.
    pub fn build_operations(&self) -> Arc<dyn BuildOperations> {
        Arc::new(RealBuildOperations::new(
            self.organization.clone(),
            self.build_client.clone(),
        ))
    }
}
