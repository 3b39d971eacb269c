//! Git branch resource handler.
//!
//! Creates (or deletes) a ref in a repository, optionally populating a new
//! branch with a directory of scaffold files in a single commit push. The
//! refs API has no true removal call: deletion is modeled as a ref update
//! moving the branch to the all-zero object id.
//!
//! Lookup is a linear, case-insensitive scan over the repository's refs,
//! which is fine because ref counts are small. A lookup miss is not an
//! error; it means "no such resource" and clears local state.

use crate::api::traits::GitBranchOperations;
use crate::error::{ApiError, ConfigError, Result};
use crate::models::{GitRef, ObjectId, PushRequest, RefUpdate, RefUpdateResult};
use crate::resources::ResourceLifecycle;
use crate::scaffold::{self, SCAFFOLD_COMMIT_MESSAGE};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// Boundary-validated configuration for a git branch resource.
#[derive(Debug, Clone, PartialEq)]
pub struct GitBranchConfig {
    /// Fully qualified ref name, e.g. `refs/heads/feature`.
    pub name: String,
    /// Repository the ref lives in.
    pub repo_name: String,
    /// Project the repository belongs to.
    pub project_id: Uuid,
    /// Base object id the ref moves from (all-zero when the ref is new).
    pub old_object_id: ObjectId,
    /// Object id the ref should point at.
    pub new_object_id: ObjectId,
    /// Local directory whose files scaffold the new branch, if any.
    pub content: Option<PathBuf>,
    /// Destination prefix for scaffolded files inside the repository.
    pub root_path: Option<String>,
}

impl GitBranchConfig {
    /// Validates the raw configuration values and builds the config.
    pub fn new(
        name: &str,
        repo_name: &str,
        project_id: &str,
        old_object_id: &str,
        new_object_id: &str,
    ) -> std::result::Result<Self, ConfigError> {
        if name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if repo_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "repo_name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        let project_id = Uuid::parse_str(project_id).map_err(|e| ConfigError::InvalidValue {
            field: "project_id".to_string(),
            message: format!("'{}' is not a UUID: {}", project_id, e),
        })?;

        Ok(Self {
            name: name.to_string(),
            repo_name: repo_name.to_string(),
            project_id,
            old_object_id: ObjectId::parse(old_object_id)?,
            new_object_id: ObjectId::parse(new_object_id)?,
            content: None,
            root_path: None,
        })
    }

    /// Sets the scaffold content directory. An empty path is treated as
    /// "no scaffold content".
    pub fn with_content(mut self, content: &str) -> Self {
        if !content.is_empty() {
            self.content = Some(PathBuf::from(content));
        }
        self
    }

    /// Sets the destination prefix for scaffolded files.
    pub fn with_root_path(mut self, root_path: &str) -> Self {
        if !root_path.is_empty() {
            self.root_path = Some(root_path.to_string());
        }
        self
    }
}

/// Local state of a git branch resource.
///
/// The identity is the ref's URL as reported by the remote on lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitBranchState {
    /// Resource identity: the ref URL.
    pub id: Option<String>,
    /// API URL of the ref.
    pub url: Option<String>,
    /// Object id the ref points at.
    pub object_id: Option<ObjectId>,
}

impl GitBranchState {
    fn clear(&mut self) {
        self.id = None;
        self.url = None;
        self.object_id = None;
    }
}

/// Handler wiring the git branch resource to the refs and pushes API areas.
pub struct GitBranchResource {
    ops: Arc<dyn GitBranchOperations>,
}

impl GitBranchResource {
    /// Creates a handler on top of the given ref/push operations.
    pub fn new(ops: Arc<dyn GitBranchOperations>) -> Self {
        Self { ops }
    }

    /// Submits a single-element ref-update batch and unwraps its result,
    /// surfacing a per-ref rejection with the server's message intact.
    async fn submit_ref_update(
        &self,
        config: &GitBranchConfig,
        update: RefUpdate,
    ) -> Result<RefUpdateResult> {
        let project = config.project_id.to_string();
        let ref_name = update.name.clone();
        let results = self
            .ops
            .update_refs(&config.repo_name, &project, vec![update])
            .await
            .map_err(|source| ApiError::RemoteRequest {
                resource: format!("branch '{}'", ref_name),
                source,
            })?;

        let result = results
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::RemoteRequest {
                resource: format!("branch '{}'", ref_name),
                source: anyhow::anyhow!("update refs returned no per-ref result"),
            })?;

        if !result.success {
            return Err(ApiError::RefUpdateRejected {
                ref_name,
                message: result.custom_message.clone().unwrap_or_default(),
            }
            .into());
        }
        Ok(result)
    }

    /// Looks up the branch by case-insensitive exact name. A miss is not an
    /// error; it returns `None`.
    async fn lookup(&self, config: &GitBranchConfig) -> Result<Option<GitRef>> {
        let project = config.project_id.to_string();
        let refs = self
            .ops
            .list_refs(&config.repo_name, &project)
            .await
            .map_err(|source| ApiError::RemoteRequest {
                resource: format!("branch '{}'", config.name),
                source,
            })?;

        // Full case folding, not just ASCII; ref names may carry any letters.
        let wanted = config.name.to_lowercase();
        Ok(refs.into_iter().find(|r| r.name.to_lowercase() == wanted))
    }

    /// Walks the scaffold directory and pushes its files as one commit on the
    /// freshly created branch.
    async fn scaffold_content(
        &self,
        config: &GitBranchConfig,
        content: &std::path::Path,
        created: &RefUpdateResult,
    ) -> Result<()> {
        let root_path = config.root_path.as_deref().unwrap_or("");
        let changes = scaffold::collect_changes(content, root_path)?;
        if changes.is_empty() {
            tracing::debug!(branch = %config.name, "scaffold directory holds no files, skipping push");
            return Ok(());
        }

        let ref_name = if created.name.is_empty() {
            config.name.clone()
        } else {
            created.name.clone()
        };
        let push = PushRequest {
            ref_name,
            old_object_id: created.new_object_id.clone(),
            comment: SCAFFOLD_COMMIT_MESSAGE.to_string(),
            changes,
        };

        let project = config.project_id.to_string();
        self.ops
            .create_push(&config.repo_name, &project, push)
            .await
            .map_err(|source| ApiError::RemoteRequest {
                resource: format!("branch '{}'", config.name),
                source,
            })?;
        Ok(())
    }

    fn remote_object_id(config: &GitBranchConfig, raw: &str) -> Result<ObjectId> {
        ObjectId::parse(raw).map_err(|_| {
            ApiError::RemoteRequest {
                resource: format!("branch '{}'", config.name),
                source: anyhow::anyhow!("server returned malformed object id '{}'", raw),
            }
            .into()
        })
    }
}

#[async_trait]
impl ResourceLifecycle for GitBranchResource {
    type Config = GitBranchConfig;
    type State = GitBranchState;

    async fn create(&self, config: &Self::Config, state: &mut Self::State) -> Result<()> {
        let created = self
            .submit_ref_update(
                config,
                RefUpdate {
                    name: config.name.clone(),
                    old_object_id: config.old_object_id.clone(),
                    new_object_id: config.new_object_id.clone(),
                },
            )
            .await?;
        tracing::info!(branch = %config.name, object_id = %created.new_object_id, "created branch");

        if let Some(content) = &config.content {
            self.scaffold_content(config, content, &created).await?;
        }

        self.read(config, state).await
    }

    async fn read(&self, config: &Self::Config, state: &mut Self::State) -> Result<()> {
        match self.lookup(config).await? {
            Some(branch) => {
                let object_id = Self::remote_object_id(config, &branch.object_id)?;
                state.id = Some(branch.url.clone());
                state.url = Some(branch.url);
                state.object_id = Some(object_id);
            }
            None => {
                // Already absent remotely; reflect that silently.
                state.clear();
            }
        }
        Ok(())
    }

    async fn update(&self, config: &Self::Config, state: &mut Self::State) -> Result<()> {
        self.read(config, state).await
    }

    async fn delete(&self, config: &Self::Config, state: &mut Self::State) -> Result<()> {
        let Some(branch) = self.lookup(config).await? else {
            tracing::debug!(branch = %config.name, "branch already absent, skipping ref update");
            state.clear();
            return Ok(());
        };

        let live = Self::remote_object_id(config, &branch.object_id)?;
        self.submit_ref_update(
            config,
            RefUpdate {
                name: branch.name,
                old_object_id: live,
                new_object_id: ObjectId::zero(),
            },
        )
        .await?;
        tracing::info!(branch = %config.name, "deleted branch");

        state.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::traits::mocks::MockGitBranchOperations;
    use crate::error::ProviderError;
    use std::fs;

    const PROJECT: &str = "22222222-2222-2222-2222-222222222222";
    const BASE_SHA: &str = "abcdef0123456789abcdef0123456789abcd1234";

    fn config(name: &str) -> GitBranchConfig {
        GitBranchConfig::new(name, "repo1", PROJECT, ObjectId::ZERO_STR, BASE_SHA).unwrap()
    }

    fn accepted(name: &str, new_object_id: &str) -> RefUpdateResult {
        RefUpdateResult {
            name: name.to_string(),
            new_object_id: new_object_id.to_string(),
            success: true,
            custom_message: None,
        }
    }

    fn remote_ref(name: &str, object_id: &str) -> GitRef {
        GitRef {
            name: name.to_string(),
            object_id: object_id.to_string(),
            url: format!("https://example/refs/{}", name),
        }
    }

    /// # Branch Config Validation
    ///
    /// Tests boundary validation of the branch configuration.
    ///
    /// ## Test Scenario
    /// - Constructs configs with empty names, a bad UUID and bad SHAs
    ///
    /// ## Expected Outcome
    /// - Each invalid value is rejected with a config error
    #[test]
    fn test_config_validation() {
        assert!(GitBranchConfig::new("refs/heads/f", "r", PROJECT, ObjectId::ZERO_STR, BASE_SHA).is_ok());
        assert!(GitBranchConfig::new("", "r", PROJECT, ObjectId::ZERO_STR, BASE_SHA).is_err());
        assert!(GitBranchConfig::new("refs/heads/f", "", PROJECT, ObjectId::ZERO_STR, BASE_SHA).is_err());
        assert!(GitBranchConfig::new("refs/heads/f", "r", "nope", ObjectId::ZERO_STR, BASE_SHA).is_err());
        assert!(GitBranchConfig::new("refs/heads/f", "r", PROJECT, "xyz", BASE_SHA).is_err());
        assert!(GitBranchConfig::new("refs/heads/f", "r", PROJECT, ObjectId::ZERO_STR, "xyz").is_err());
    }

    /// # Empty Content Path Is No Content
    ///
    /// Tests that an empty content string leaves scaffold disabled.
    ///
    /// ## Test Scenario
    /// - Applies with_content("") and with_root_path("")
    ///
    /// ## Expected Outcome
    /// - Both fields remain unset
    #[test]
    fn test_empty_content_is_none() {
        let cfg = config("refs/heads/f").with_content("").with_root_path("");
        assert!(cfg.content.is_none());
        assert!(cfg.root_path.is_none());
    }

    /// # Create Without Content
    ///
    /// Tests that creation with no content path never pushes.
    ///
    /// ## Test Scenario
    /// - The ref update succeeds; no content is configured
    ///
    /// ## Expected Outcome
    /// - State reflects the looked-up ref and zero pushes were made
    #[tokio::test]
    async fn test_create_without_content_skips_push() {
        let mocks = MockGitBranchOperations::new();
        let pushes = mocks.pushes.clone();
        mocks
            .set_update_refs_response(Ok(vec![accepted("refs/heads/feature", BASE_SHA)]))
            .await;
        mocks
            .set_list_refs_response(Ok(vec![remote_ref("refs/heads/feature", BASE_SHA)]))
            .await;

        let handler = GitBranchResource::new(Arc::new(mocks));
        let mut state = GitBranchState::default();
        handler
            .create(&config("refs/heads/feature"), &mut state)
            .await
            .unwrap();

        assert!(pushes.lock().await.is_empty());
        assert_eq!(
            state.id.as_deref(),
            Some("https://example/refs/refs/heads/feature")
        );
        assert_eq!(state.object_id, Some(ObjectId::parse(BASE_SHA).unwrap()));
    }

    /// # Create With Scaffold Content
    ///
    /// Tests the end-to-end scaffold flow.
    ///
    /// ## Test Scenario
    /// - A temp directory holds `a.txt` and `sub/b.txt`; root path is "src"
    /// - The ref update succeeds and the branch is looked up afterwards
    ///
    /// ## Expected Outcome
    /// - Exactly one push, carrying two add changes at `src/a.txt` and
    ///   `src/sub/b.txt`, anchored at the just-created object id
    #[tokio::test]
    async fn test_create_with_scaffold_content() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "alpha").unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/b.txt"), "beta").unwrap();

        let mocks = MockGitBranchOperations::new();
        let pushes = mocks.pushes.clone();
        mocks
            .set_update_refs_response(Ok(vec![accepted("refs/heads/feature", BASE_SHA)]))
            .await;
        mocks
            .set_list_refs_response(Ok(vec![remote_ref("refs/heads/feature", BASE_SHA)]))
            .await;

        let cfg = config("refs/heads/feature")
            .with_content(dir.path().to_str().unwrap())
            .with_root_path("src");
        let handler = GitBranchResource::new(Arc::new(mocks));
        let mut state = GitBranchState::default();
        handler.create(&cfg, &mut state).await.unwrap();

        let pushes = pushes.lock().await;
        assert_eq!(pushes.len(), 1);
        let push = &pushes[0];
        assert_eq!(push.ref_name, "refs/heads/feature");
        assert_eq!(push.old_object_id, BASE_SHA);
        assert_eq!(push.comment, SCAFFOLD_COMMIT_MESSAGE);
        let paths: Vec<&str> = push.changes.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, vec!["src/a.txt", "src/sub/b.txt"]);
    }

    /// # Rejected Ref Update
    ///
    /// Tests that a per-ref failure surfaces the server's message and leaves
    /// local identity unset.
    ///
    /// ## Test Scenario
    /// - The server reports success=false with a custom message
    ///
    /// ## Expected Outcome
    /// - RefUpdateRejected with the message intact; state untouched
    #[tokio::test]
    async fn test_rejected_ref_update() {
        let mocks = MockGitBranchOperations::new();
        mocks
            .set_update_refs_response(Ok(vec![RefUpdateResult {
                name: "refs/heads/feature".to_string(),
                new_object_id: ObjectId::ZERO_STR.to_string(),
                success: false,
                custom_message: Some("stale old object id".to_string()),
            }]))
            .await;

        let handler = GitBranchResource::new(Arc::new(mocks));
        let mut state = GitBranchState::default();
        let err = handler
            .create(&config("refs/heads/feature"), &mut state)
            .await
            .unwrap_err();

        match err {
            ProviderError::Api(ApiError::RefUpdateRejected { ref_name, message }) => {
                assert_eq!(ref_name, "refs/heads/feature");
                assert_eq!(message, "stale old object id");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(state.id.is_none());
    }

    /// # Case-Insensitive Lookup
    ///
    /// Tests that read matches ref names regardless of case.
    ///
    /// ## Test Scenario
    /// - The remote lists `refs/heads/Main`; the config asks for
    ///   `refs/heads/main`
    ///
    /// ## Expected Outcome
    /// - The ref is found and reflected into state
    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let mocks = MockGitBranchOperations::new();
        mocks
            .set_list_refs_response(Ok(vec![
                remote_ref("refs/heads/other", BASE_SHA),
                remote_ref("refs/heads/Main", BASE_SHA),
            ]))
            .await;

        let handler = GitBranchResource::new(Arc::new(mocks));
        let mut state = GitBranchState::default();
        handler
            .read(&config("refs/heads/main"), &mut state)
            .await
            .unwrap();

        assert_eq!(
            state.url.as_deref(),
            Some("https://example/refs/refs/heads/Main")
        );
    }

    /// # Non-ASCII Case Folding
    ///
    /// Tests that lookup folds case beyond the ASCII range.
    ///
    /// ## Test Scenario
    /// - The remote lists `refs/heads/Überbau`; the config asks for
    ///   `refs/heads/überbau`
    ///
    /// ## Expected Outcome
    /// - The ref is found and reflected into state
    #[tokio::test]
    async fn test_lookup_folds_non_ascii_case() {
        let mocks = MockGitBranchOperations::new();
        mocks
            .set_list_refs_response(Ok(vec![remote_ref("refs/heads/Überbau", BASE_SHA)]))
            .await;

        let handler = GitBranchResource::new(Arc::new(mocks));
        let mut state = GitBranchState::default();
        handler
            .read(&config("refs/heads/überbau"), &mut state)
            .await
            .unwrap();

        assert_eq!(
            state.url.as_deref(),
            Some("https://example/refs/refs/heads/Überbau")
        );
    }

    /// # Read Miss Clears State
    ///
    /// Tests that a lookup miss is treated as already-absent, not an error.
    ///
    /// ## Test Scenario
    /// - The remote lists no matching ref; state carries a stale identity
    ///
    /// ## Expected Outcome
    /// - Read succeeds and state is cleared
    #[tokio::test]
    async fn test_read_miss_clears_state() {
        let mocks = MockGitBranchOperations::new();
        mocks
            .set_list_refs_response(Ok(vec![remote_ref("refs/heads/other", BASE_SHA)]))
            .await;

        let handler = GitBranchResource::new(Arc::new(mocks));
        let mut state = GitBranchState {
            id: Some("stale".to_string()),
            url: Some("stale".to_string()),
            object_id: Some(ObjectId::parse(BASE_SHA).unwrap()),
        };
        handler
            .read(&config("refs/heads/feature"), &mut state)
            .await
            .unwrap();

        assert_eq!(state, GitBranchState::default());
    }

    /// # Delete Moves Ref to Zero
    ///
    /// Tests the delete flow against a live branch.
    ///
    /// ## Test Scenario
    /// - Lookup returns the live ref; the zeroing update is accepted
    ///
    /// ## Expected Outcome
    /// - The update uses the live object id as the precondition and the
    ///   all-zero id as the target; state is cleared
    #[tokio::test]
    async fn test_delete_moves_ref_to_zero() {
        let mocks = MockGitBranchOperations::new();
        let calls = mocks.update_refs_calls.clone();
        mocks
            .set_list_refs_response(Ok(vec![remote_ref("refs/heads/feature", BASE_SHA)]))
            .await;
        mocks
            .set_update_refs_response(Ok(vec![accepted(
                "refs/heads/feature",
                ObjectId::ZERO_STR,
            )]))
            .await;

        let handler = GitBranchResource::new(Arc::new(mocks));
        let mut state = GitBranchState {
            id: Some("https://example/refs/refs/heads/feature".to_string()),
            url: None,
            object_id: None,
        };
        handler
            .delete(&config("refs/heads/feature"), &mut state)
            .await
            .unwrap();

        let calls = calls.lock().await;
        assert_eq!(calls.len(), 1);
        let update = &calls[0][0];
        assert_eq!(update.old_object_id, ObjectId::parse(BASE_SHA).unwrap());
        assert!(update.new_object_id.is_zero());
        assert!(state.id.is_none());
    }

    /// # Delete Absent Branch
    ///
    /// Tests that deleting a branch lookup reports as absent performs no
    /// remote mutation.
    ///
    /// ## Test Scenario
    /// - Lookup returns no matching ref
    ///
    /// ## Expected Outcome
    /// - No update-refs call is made and state is cleared without error
    #[tokio::test]
    async fn test_delete_absent_branch_skips_remote() {
        let mocks = MockGitBranchOperations::new();
        let calls = mocks.update_refs_calls.clone();
        mocks.set_list_refs_response(Ok(vec![])).await;

        let handler = GitBranchResource::new(Arc::new(mocks));
        let mut state = GitBranchState {
            id: Some("stale".to_string()),
            url: None,
            object_id: None,
        };
        handler
            .delete(&config("refs/heads/feature"), &mut state)
            .await
            .unwrap();

        assert!(calls.lock().await.is_empty());
        assert!(state.id.is_none());
    }

    /// # Rejected Delete Leaves Branch Live
    ///
    /// Tests that a rejected zeroing update surfaces the error.
    ///
    /// ## Test Scenario
    /// - Lookup finds the ref; the zeroing update reports success=false
    ///
    /// ## Expected Outcome
    /// - RefUpdateRejected is surfaced and the identity survives
    #[tokio::test]
    async fn test_rejected_delete() {
        let mocks = MockGitBranchOperations::new();
        mocks
            .set_list_refs_response(Ok(vec![remote_ref("refs/heads/feature", BASE_SHA)]))
            .await;
        mocks
            .set_update_refs_response(Ok(vec![RefUpdateResult {
                name: "refs/heads/feature".to_string(),
                new_object_id: BASE_SHA.to_string(),
                success: false,
                custom_message: Some("ref was updated concurrently".to_string()),
            }]))
            .await;

        let handler = GitBranchResource::new(Arc::new(mocks));
        let mut state = GitBranchState {
            id: Some("https://example/refs/refs/heads/feature".to_string()),
            url: None,
            object_id: None,
        };
        let err = handler
            .delete(&config("refs/heads/feature"), &mut state)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ProviderError::Api(ApiError::RefUpdateRejected { .. })
        ));
        assert!(state.id.is_some());
    }
}
