//! Unified error handling for the ado-provider library.
//!
//! This module provides a structured error hierarchy using `thiserror` so
//! callers can branch on error kind instead of parsing messages.
//!
//! ## Error Categories
//!
//! - [`ApiError`]: failed remote calls, with resource-identifying context
//! - [`ScaffoldError`]: local file-system failures during a scaffold walk
//! - [`ConfigError`]: configuration loading and boundary validation
//!
//! A branch lookup miss is deliberately NOT an error: it surfaces as
//! `Ok(None)` from the lookup and maps to "no such resource" local-state
//! semantics.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the ado-provider library.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// An error occurred while interacting with the Azure DevOps API.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// An error occurred while reading scaffold content from disk.
    #[error("Scaffold error: {0}")]
    Scaffold(#[from] ScaffoldError),

    /// An error occurred while loading or validating configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that can occur when interacting with the Azure DevOps API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A remote call failed. Carries the resource the operation was acting on
    /// (build id, PR id, branch name) and the underlying cause.
    #[error("request for {resource} failed: {source}")]
    RemoteRequest {
        /// Description of the resource the failed call was acting on.
        resource: String,
        /// Underlying transport/service error.
        source: anyhow::Error,
    },

    /// The server accepted an update-refs batch but reported a per-ref
    /// failure (e.g. concurrent modification, non-fast-forward).
    #[error("ref update for '{ref_name}' rejected: {message}")]
    RefUpdateRejected {
        /// The ref whose update was rejected.
        ref_name: String,
        /// Server-supplied rejection message, passed through intact.
        message: String,
    },

    /// A by-id fetch found nothing (builds and pull requests must exist once
    /// an identity has been recorded).
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the resource that was not found.
        resource: String,
    },
}

/// Errors that can occur while walking scaffold content on disk.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// The configured content path is not a directory.
    #[error("scaffold content path is not a directory: {path}")]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// A file or directory entry could not be read.
    #[error("failed to read scaffold file {path}: {source}")]
    Read {
        /// Path of the unreadable entry.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A file's path relative to the walked root could not be computed.
    #[error("scaffold file {path} is outside the content root")]
    OutsideRoot {
        /// The offending path.
        path: PathBuf,
    },
}

/// Errors that can occur during configuration loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required configuration field is missing.
    #[error("{field} is required (set it in the config file or via {env_var})")]
    MissingRequired {
        /// Name of the missing field.
        field: String,
        /// Environment variable name for this field.
        env_var: String,
    },

    /// Failed to read the configuration file.
    #[error("failed to read config file at {path}: {message}")]
    FileRead {
        /// Path to the config file.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Failed to parse the configuration file.
    #[error("failed to parse config file at {path}: {message}")]
    Parse {
        /// Path to the config file.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// An invalid value was provided for a configuration field.
    #[error("invalid value for {field}: {message}")]
    InvalidValue {
        /// Name of the field with the invalid value.
        field: String,
        /// Description of why the value is invalid.
        message: String,
    },
}

/// Type alias for Results using ProviderError.
pub type Result<T> = std::result::Result<T, ProviderError>;
