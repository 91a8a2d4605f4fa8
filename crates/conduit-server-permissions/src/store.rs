// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Persistence collaborators queried during permission resolution.
//!
//! Every query is read-only. Implementations live in the database crate; the
//! checkers only see these traits.

use async_trait::async_trait;
use std::sync::Arc;

use crate::types::{Group, GroupId, ProjectGrant, WorkflowTemplate};

/// Opaque failure reported by a persistence collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	#[error("storage backend error: {0}")]
	Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

	#[error("storage operation cancelled")]
	Cancelled,
}

impl StoreError {
	pub fn backend(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
		StoreError::Backend(err.into())
	}
}

#[async_trait]
pub trait ProjectGrantStore: Send + Sync {
	/// Returns every project grant held by any of the given groups.
	async fn find_project_grants_by_group_ids(
		&self,
		group_ids: &[GroupId],
	) -> Result<Vec<ProjectGrant>, StoreError>;
}

#[async_trait]
pub trait GroupStore: Send + Sync {
	/// Loads a group and its membership roster by name.
	async fn load_group_by_name(&self, name: &str) -> Result<Option<Group>, StoreError>;
}

#[async_trait]
pub trait WorkflowTemplateStore: Send + Sync {
	async fn load_template_by_slug_and_group_id(
		&self,
		slug: &str,
		group_id: GroupId,
	) -> Result<Option<WorkflowTemplate>, StoreError>;
}

/// The collaborators the standard registry is built from.
#[derive(Clone)]
pub struct PermissionStores {
	pub project_grants: Arc<dyn ProjectGrantStore>,
	pub groups: Arc<dyn GroupStore>,
	pub templates: Arc<dyn WorkflowTemplateStore>,
}
