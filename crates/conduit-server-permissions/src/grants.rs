// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Group permission sets and the loader that builds them.
//!
//! A [`GroupPermissions`] is built fresh for every decision from the grants
//! held by the caller's groups and is never cached here.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::instrument;

use crate::store::{ProjectGrantStore, StoreError};
use crate::types::{GroupId, PermissionLevel, ProjectGrant};

/// Levels granted to one caller, keyed by resource.
///
/// Holds at most one level per project key; when several groups grant the
/// same project, the highest level wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPermissions {
	projects: HashMap<String, PermissionLevel>,
}

impl GroupPermissions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records a project grant, keeping the maximum for the key.
	pub fn grant_project(&mut self, project_key: impl Into<String>, level: PermissionLevel) {
		self
			.projects
			.entry(project_key.into())
			.and_modify(|current| *current = (*current).max(level))
			.or_insert(level);
	}

	/// Returns the granted level for a project, if any group grants it.
	pub fn project_permission(&self, project_key: &str) -> Option<PermissionLevel> {
		self.projects.get(project_key).copied()
	}

	pub fn project_count(&self) -> usize {
		self.projects.len()
	}

	pub fn is_empty(&self) -> bool {
		self.projects.is_empty()
	}
}

impl FromIterator<ProjectGrant> for GroupPermissions {
	fn from_iter<I: IntoIterator<Item = ProjectGrant>>(iter: I) -> Self {
		let mut perms = GroupPermissions::new();
		for grant in iter {
			perms.grant_project(grant.project_key, grant.level);
		}
		perms
	}
}

/// Folds every grant visible to a set of groups into a [`GroupPermissions`].
#[derive(Clone)]
pub struct GrantLoader {
	store: Arc<dyn ProjectGrantStore>,
}

impl GrantLoader {
	pub fn new(store: Arc<dyn ProjectGrantStore>) -> Self {
		Self { store }
	}

	/// Loads the permission set for the given groups.
	///
	/// # Errors
	/// Store failures are returned unchanged.
	#[instrument(level = "debug", skip(self), fields(group_count = group_ids.len()))]
	pub async fn load(&self, group_ids: &[GroupId]) -> Result<GroupPermissions, StoreError> {
		let grants = self
			.store
			.find_project_grants_by_group_ids(group_ids)
			.await
			.inspect_err(|e| tracing::warn!(error = %e, "failed to load project grants"))?;

		let perms: GroupPermissions = grants.into_iter().collect();
		tracing::debug!(projects = perms.project_count(), "loaded group permissions");
		Ok(perms)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::FakeProjectGrantStore;
	use proptest::prelude::*;

	fn grant(group: i64, key: &str, level: PermissionLevel) -> ProjectGrant {
		ProjectGrant {
			group_id: GroupId::new(group),
			project_key: key.to_string(),
			level,
		}
	}

	mod group_permissions {
		use super::*;

		#[test]
		fn empty_set_has_no_grants() {
			let perms = GroupPermissions::new();
			assert!(perms.is_empty());
			assert_eq!(perms.project_permission("demo"), None);
		}

		#[test]
		fn highest_grant_wins_regardless_of_order() {
			let perms: GroupPermissions = vec![
				grant(1, "demo", PermissionLevel::Write),
				grant(2, "demo", PermissionLevel::Read),
			]
			.into_iter()
			.collect();
			assert_eq!(perms.project_permission("demo"), Some(PermissionLevel::Write));

			let perms: GroupPermissions = vec![
				grant(2, "demo", PermissionLevel::Read),
				grant(1, "demo", PermissionLevel::Write),
			]
			.into_iter()
			.collect();
			assert_eq!(perms.project_permission("demo"), Some(PermissionLevel::Write));
			assert_eq!(perms.project_count(), 1);
		}

		#[test]
		fn keys_are_independent() {
			let perms: GroupPermissions = vec![
				grant(1, "demo", PermissionLevel::Read),
				grant(1, "infra", PermissionLevel::Admin),
			]
			.into_iter()
			.collect();
			assert_eq!(perms.project_permission("demo"), Some(PermissionLevel::Read));
			assert_eq!(perms.project_permission("infra"), Some(PermissionLevel::Admin));
		}

		fn arb_level() -> impl Strategy<Value = PermissionLevel> {
			proptest::sample::select(PermissionLevel::all().to_vec())
		}

		proptest! {
			#[test]
			fn folded_level_is_the_maximum(levels in proptest::collection::vec(arb_level(), 1..8)) {
				let perms: GroupPermissions = levels
					.iter()
					.enumerate()
					.map(|(i, level)| grant(i as i64, "demo", *level))
					.collect();
				let expected = levels.iter().copied().max();
				prop_assert_eq!(perms.project_permission("demo"), expected);
			}
		}
	}

	mod loader {
		use super::*;

		#[tokio::test]
		async fn loads_grants_for_given_groups() {
			let store = Arc::new(
				FakeProjectGrantStore::new()
					.with_grant(grant(7, "demo", PermissionLevel::Write))
					.with_grant(grant(8, "other", PermissionLevel::Admin)),
			);
			let loader = GrantLoader::new(store.clone());

			let perms = loader.load(&[GroupId::new(7)]).await.unwrap();

			assert_eq!(perms.project_permission("demo"), Some(PermissionLevel::Write));
			assert_eq!(perms.project_permission("other"), None);
			assert_eq!(store.calls(), 1);
		}

		#[tokio::test]
		async fn no_groups_yields_empty_set() {
			let store = Arc::new(
				FakeProjectGrantStore::new().with_grant(grant(7, "demo", PermissionLevel::Write)),
			);
			let loader = GrantLoader::new(store);

			let perms = loader.load(&[]).await.unwrap();
			assert!(perms.is_empty());
		}

		#[tokio::test]
		async fn store_failure_is_propagated() {
			let loader = GrantLoader::new(Arc::new(FakeProjectGrantStore::failing()));

			let err = loader.load(&[GroupId::new(7)]).await.unwrap_err();
			assert!(matches!(err, StoreError::Backend(_)));
		}
	}
}
