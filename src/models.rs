//! Domain models for Azure DevOps resources.
//!
//! These are purpose-built, simpler counterparts to the auto-generated types
//! from the azure_devops_rust_api crate. Conversions from the generated types
//! live in [`crate::api::mappers`].

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated 40-character hexadecimal git object id (commit SHA).
///
/// The all-zero id is a sentinel used by the Azure DevOps refs API: as an
/// `old_object_id` it means "the ref does not exist yet", as a `new_object_id`
/// it means "delete the ref".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// The all-zero sentinel ("ref absent" / "ref deleted").
    pub const ZERO_STR: &'static str = "0000000000000000000000000000000000000000";

    /// Returns the all-zero sentinel object id.
    pub fn zero() -> Self {
        ObjectId(Self::ZERO_STR.to_string())
    }

    /// Parses and validates a 40-hex object id.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        if s.len() == 40 && s.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(ObjectId(s.to_ascii_lowercase()))
        } else {
            Err(ConfigError::InvalidValue {
                field: "object_id".to_string(),
                message: format!("'{}' is not a 40-character hex SHA", s),
            })
        }
    }

    /// Whether this is the all-zero sentinel.
    pub fn is_zero(&self) -> bool {
        self.0 == Self::ZERO_STR
    }

    /// The object id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A remote git ref (branch) as returned by the list-refs operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitRef {
    /// Fully qualified ref name, e.g. `refs/heads/main`.
    pub name: String,
    /// Object id the ref currently points at.
    pub object_id: String,
    /// API URL of the ref.
    pub url: String,
}

/// An atomic request to move a ref from one object id to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefUpdate {
    /// Fully qualified ref name.
    pub name: String,
    /// Expected current object id (optimistic concurrency precondition).
    pub old_object_id: ObjectId,
    /// Object id the ref should point at afterwards.
    pub new_object_id: ObjectId,
}

/// Per-ref outcome of an update-refs batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefUpdateResult {
    /// Ref name the result applies to.
    pub name: String,
    /// Object id the ref points at after the update.
    pub new_object_id: String,
    /// Whether the server accepted this particular ref update.
    pub success: bool,
    /// Server-supplied rejection message (e.g. non-fast-forward).
    pub custom_message: Option<String>,
}

/// A single "add" change inside a scaffold commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitChange {
    /// Destination path of the item inside the repository.
    pub path: String,
    /// Base64-encoded file content.
    pub content_base64: String,
}

/// A single-ref, single-commit push request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushRequest {
    /// Ref the push updates.
    pub ref_name: String,
    /// Object id the ref points at before the push.
    pub old_object_id: String,
    /// Commit message.
    pub comment: String,
    /// Add changes making up the commit.
    pub changes: Vec<CommitChange>,
}

/// Fields needed to open a pull request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPullRequest {
    pub title: String,
    pub description: Option<String>,
    /// Source ref, e.g. `refs/heads/feature`.
    pub source_ref_name: String,
    /// Target ref, e.g. `refs/heads/main`.
    pub target_ref_name: String,
}

/// A queued or fetched build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedBuild {
    /// Remote-assigned build id.
    pub id: i32,
    /// API URL of the build.
    pub url: String,
}

/// An opened or fetched pull request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Remote-assigned pull request id.
    pub id: i32,
    /// API URL of the pull request.
    pub url: String,
}
