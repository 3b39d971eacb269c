//! Resource handlers for Azure DevOps entities.
//!
//! Each handler maps a strongly-typed configuration struct to CRUD operations
//! against the remote service and reconciles remote state back into a local
//! state record. Handlers are independent of one another; they share only the
//! aggregated client that supplies pre-authenticated sub-clients per API area.

pub mod build;
pub mod git_branch;
pub mod pull_request;

use crate::error::Result;
use async_trait::async_trait;

/// The uniform CRUD shape every resource handler implements.
///
/// Local state is only mutated after a successful remote response; a failure
/// on any call aborts the operation and leaves the previous state untouched.
#[async_trait]
pub trait ResourceLifecycle {
    /// The handler's boundary-validated configuration.
    type Config: Send + Sync;
    /// The handler's local state record.
    type State: Send + Sync;

    /// Creates the remote entity and records its identity in local state.
    async fn create(&self, config: &Self::Config, state: &mut Self::State) -> Result<()>;

    /// Re-fetches remote state and reconciles it into local state.
    async fn read(&self, config: &Self::Config, state: &mut Self::State) -> Result<()>;

    /// Updates the remote entity; for these resources this collapses to read.
    async fn update(&self, config: &Self::Config, state: &mut Self::State) -> Result<()>;

    /// Deletes the remote entity (where a deletion operation exists) and
    /// clears local identity.
    async fn delete(&self, config: &Self::Config, state: &mut Self::State) -> Result<()>;
}
