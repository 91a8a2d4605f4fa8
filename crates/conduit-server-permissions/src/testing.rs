// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory stores for unit tests. Each counts its calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::store::{
	GroupStore, PermissionStores, ProjectGrantStore, StoreError, WorkflowTemplateStore,
};
use crate::types::{Group, GroupId, ProjectGrant, WorkflowTemplate};

#[derive(Default)]
pub struct FakeProjectGrantStore {
	grants: Vec<ProjectGrant>,
	fail: bool,
	calls: AtomicUsize,
}

impl FakeProjectGrantStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn failing() -> Self {
		Self {
			fail: true,
			..Self::default()
		}
	}

	pub fn with_grant(mut self, grant: ProjectGrant) -> Self {
		self.grants.push(grant);
		self
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl ProjectGrantStore for FakeProjectGrantStore {
	async fn find_project_grants_by_group_ids(
		&self,
		group_ids: &[GroupId],
	) -> Result<Vec<ProjectGrant>, StoreError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if self.fail {
			return Err(StoreError::backend("project_group table unavailable"));
		}
		Ok(self
			.grants
			.iter()
			.filter(|g| group_ids.contains(&g.group_id))
			.cloned()
			.collect())
	}
}

#[derive(Default)]
pub struct FakeGroupStore {
	groups: HashMap<String, Group>,
	fail: bool,
	calls: AtomicUsize,
}

impl FakeGroupStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn failing() -> Self {
		Self {
			fail: true,
			..Self::default()
		}
	}

	pub fn with_group(mut self, group: Group) -> Self {
		self.groups.insert(group.name.clone(), group);
		self
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl GroupStore for FakeGroupStore {
	async fn load_group_by_name(&self, name: &str) -> Result<Option<Group>, StoreError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if self.fail {
			return Err(StoreError::backend("groups table unavailable"));
		}
		Ok(self.groups.get(name).cloned())
	}
}

#[derive(Default)]
pub struct FakeTemplateStore {
	templates: Vec<WorkflowTemplate>,
	fail: bool,
	calls: AtomicUsize,
}

impl FakeTemplateStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn failing() -> Self {
		Self {
			fail: true,
			..Self::default()
		}
	}

	pub fn with_template(mut self, group_id: GroupId, slug: &str) -> Self {
		let id = self.templates.len() as i64 + 1;
		self.templates.push(WorkflowTemplate {
			id,
			group_id,
			slug: slug.to_string(),
			name: slug.to_string(),
		});
		self
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl WorkflowTemplateStore for FakeTemplateStore {
	async fn load_template_by_slug_and_group_id(
		&self,
		slug: &str,
		group_id: GroupId,
	) -> Result<Option<WorkflowTemplate>, StoreError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if self.fail {
			return Err(StoreError::backend("workflow_templates table unavailable"));
		}
		Ok(self
			.templates
			.iter()
			.find(|t| t.slug == slug && t.group_id == group_id)
			.cloned())
	}
}

pub fn stores(
	grants: FakeProjectGrantStore,
	groups: FakeGroupStore,
	templates: FakeTemplateStore,
) -> PermissionStores {
	PermissionStores {
		project_grants: Arc::new(grants),
		groups: Arc::new(groups),
		templates: Arc::new(templates),
	}
}
