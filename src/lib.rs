//! # ado-provider
//!
//! Resource handlers for managing Azure DevOps resources declaratively:
//! queued builds, git branches (with optional content scaffolding) and pull
//! requests. Each handler exposes a create/read/update/delete lifecycle over
//! a typed configuration and a local state record, backed by the Azure
//! DevOps REST API.
//!
//! ## Usage
//!
//! ```no_run
//! use ado_provider::api::AzureDevOpsClient;
//! use ado_provider::resources::build::{BuildConfig, BuildResource, BuildState};
//! use ado_provider::resources::ResourceLifecycle;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = AzureDevOpsClient::new("my-org".to_string(), "my-pat".to_string())?;
//! let handler = BuildResource::new(client.build_operations());
//!
//! let config = BuildConfig::new(
//!     "11111111-1111-1111-1111-111111111111",
//!     5,
//!     "refs/heads/main",
//! )?;
//! let mut state = BuildState::default();
//! handler.create(&config, &mut state).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod resources;
pub mod scaffold;

pub use api::{AzureDevOpsClient, PatCredential};
pub use config::ProviderConfig;
pub use error::{ApiError, ConfigError, ProviderError, Result, ScaffoldError};
pub use models::ObjectId;
pub use resources::ResourceLifecycle;
pub use resources::build::{BuildConfig, BuildResource, BuildState};
pub use resources::git_branch::{GitBranchConfig, GitBranchResource, GitBranchState};
pub use resources::pull_request::{PullRequestConfig, PullRequestResource, PullRequestState};

/// Crate version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
