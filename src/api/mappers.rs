//! Model mapping utilities for converting between azure_devops_rust_api types and our domain types.
//!
//! This module provides conversion implementations (`From` traits) to map the auto-generated
//! types from the azure_devops_rust_api crate to our simpler, purpose-built domain models,
//! and to assemble the generated request bodies from domain requests.

use crate::models::{
    GitRef, NewPullRequest, PullRequest, PushRequest, QueuedBuild, RefUpdate, RefUpdateResult,
};
use azure_devops_rust_api::build::models as build_models;
use azure_devops_rust_api::git::models as git_models;
use serde_json::json;

/// Convert azure_devops_rust_api GitRef to our GitRef model.
impl From<git_models::GitRef> for GitRef {
    fn from(r: git_models::GitRef) -> Self {
        GitRef {
            name: r.name,
            object_id: r.object_id,
            url: r.url.unwrap_or_default(),
        }
    }
}

/// Convert our RefUpdate into the generated request body element.
impl From<RefUpdate> for git_models::GitRefUpdate {
    fn from(update: RefUpdate) -> Self {
        git_models::GitRefUpdate {
            name: Some(update.name),
            old_object_id: Some(update.old_object_id.as_str().to_string()),
            new_object_id: Some(update.new_object_id.as_str().to_string()),
            ..Default::default()
        }
    }
}

/// Convert the generated per-ref result to our RefUpdateResult model.
impl From<git_models::GitRefUpdateResult> for RefUpdateResult {
    fn from(result: git_models::GitRefUpdateResult) -> Self {
        RefUpdateResult {
            name: result.name.unwrap_or_default(),
            new_object_id: result.new_object_id.unwrap_or_default(),
            success: result.success.unwrap_or(false),
            custom_message: result.custom_message,
        }
    }
}

/// Assemble the generated push body from our PushRequest.
///
/// Each scaffold file becomes one typed "add" change; the change's item is
/// untyped JSON on the wire, so it is built with `serde_json`.
impl From<PushRequest> for git_models::GitPush {
    fn from(push: PushRequest) -> Self {
        let changes: Vec<git_models::GitChange> = push
            .changes
            .into_iter()
            .map(|c| {
                let mut change = git_models::Change::new(git_models::change::ChangeType::Add);
                change.item = Some(json!({ "path": c.path }));
                change.new_content = Some(git_models::ItemContent::new(
                    c.content_base64,
                    git_models::item_content::ContentType::Base64Encoded,
                ));
                git_models::GitChange::new(change)
            })
            .collect();

        git_models::GitPush {
            ref_updates: vec![git_models::GitRefUpdate {
                name: Some(push.ref_name),
                old_object_id: Some(push.old_object_id),
                ..Default::default()
            }],
            commits: vec![git_models::GitCommitRef {
                comment: Some(push.comment),
                changes,
                ..Default::default()
            }],
            ..Default::default()
        }
    }
}

/// Assemble the generated create-PR body from our NewPullRequest.
impl From<NewPullRequest> for git_models::GitPullRequestCreateOptions {
    fn from(pr: NewPullRequest) -> Self {
        let mut options = git_models::GitPullRequestCreateOptions::new(
            pr.source_ref_name,
            pr.target_ref_name,
            pr.title,
        );
        options.description = pr.description;
        options
    }
}

/// Convert azure_devops_rust_api GitPullRequest to our PullRequest model.
impl From<git_models::GitPullRequest> for PullRequest {
    fn from(pr: git_models::GitPullRequest) -> Self {
        PullRequest {
            id: pr.pull_request_id,
            url: pr.url,
        }
    }
}

/// Convert azure_devops_rust_api Build to our QueuedBuild model.
impl From<build_models::Build> for QueuedBuild {
    fn from(build: build_models::Build) -> Self {
        QueuedBuild {
            id: build.id,
            url: build.url.unwrap_or_default(),
        }
    }
}

/// Assemble the queue-build body.
///
/// The generated `Build` struct carries mandatory reporting fields the queue
/// endpoint ignores (id, priority, reason, project metadata); they are filled
/// with neutral values and only the definition id and source branch matter.
pub(crate) fn queue_build_body(
    project: &str,
    definition_id: i32,
    source_branch: &str,
) -> build_models::Build {
    let project_ref = build_models::TeamProjectReference::new(
        project.to_string(),
        build_models::team_project_reference::Visibility::Private,
    );
    let definition = build_models::DefinitionReference::new(
        definition_id,
        project_ref.clone(),
        build_models::definition_reference::QueueStatus::Enabled,
        0,
        String::new(),
    );
    let mut body = build_models::Build::new(
        definition,
        0,
        build_models::build::Priority::Normal,
        project_ref,
        build_models::build::Reason::Manual,
    );
    body.source_branch = Some(source_branch.to_string());
    body
}
