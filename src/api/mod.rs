//! Azure DevOps API client module.
//!
//! This module provides the aggregated client and the per-area operation
//! traits the resource handlers are built against.
//!
//! ## Layout
//!
//! - [`client`]: the aggregated client (organization + authenticated sub-clients)
//! - [`credential`]: PAT-based `TokenCredential` adapter
//! - [`traits`]: operation traits per API area, real implementations and test mocks
//! - [`mappers`]: conversions between generated and domain models

mod client;
mod credential;
mod mappers;
pub mod traits;

pub use client::AzureDevOpsClient;
pub use credential::PatCredential;
