// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Route-variable to checker bindings.
//!
//! A registry is built once at startup and only read afterwards; share it
//! behind an `Arc` across request handlers.

use std::collections::HashMap;
use std::sync::Arc;

use crate::checkers::{CapabilityChecker, ClosedChecker, ProjectChecker, TemplateSlugChecker};
use crate::grants::GrantLoader;
use crate::store::PermissionStores;

#[derive(Clone, Default)]
pub struct PermissionRegistry {
	bindings: HashMap<&'static str, Arc<dyn CapabilityChecker>>,
}

impl PermissionRegistry {
	/// Creates a registry with no bindings; every request is allowed.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Creates the registry covering every [`ResourceKind`](crate::ResourceKind).
	pub fn standard(stores: PermissionStores) -> Self {
		let mut registry = Self::empty()
			.with_checker(ProjectChecker::new(GrantLoader::new(stores.project_grants)))
			.with_checker(TemplateSlugChecker::new(stores.groups, stores.templates));
		for kind in ClosedChecker::standard_kinds() {
			registry = registry.with_checker(ClosedChecker::new(*kind));
		}
		registry
	}

	/// Builder: bind a checker to its kind's route variable, replacing any
	/// previous binding.
	pub fn with_checker(mut self, checker: impl CapabilityChecker + 'static) -> Self {
		self
			.bindings
			.insert(checker.kind().route_var(), Arc::new(checker));
		self
	}

	/// Returns the checker bound to a route variable name.
	pub fn get(&self, route_var: &str) -> Option<&Arc<dyn CapabilityChecker>> {
		self.bindings.get(route_var)
	}

	/// Returns the bound route variable names, sorted.
	pub fn route_vars(&self) -> Vec<&'static str> {
		let mut names: Vec<_> = self.bindings.keys().copied().collect();
		names.sort_unstable();
		names
	}

	pub fn len(&self) -> usize {
		self.bindings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bindings.is_empty()
	}
}

impl std::fmt::Debug for PermissionRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PermissionRegistry")
			.field("route_vars", &self.route_vars())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{stores, FakeGroupStore, FakeProjectGrantStore, FakeTemplateStore};
	use crate::types::ResourceKind;

	#[test]
	fn standard_registry_binds_every_kind() {
		let registry = PermissionRegistry::standard(stores(
			FakeProjectGrantStore::new(),
			FakeGroupStore::new(),
			FakeTemplateStore::new(),
		));

		assert_eq!(registry.len(), ResourceKind::all().len());
		for kind in ResourceKind::all() {
			let checker = registry.get(kind.route_var()).unwrap();
			assert_eq!(checker.kind(), *kind);
		}
		assert!(registry.get("groupName").is_none());
	}

	#[test]
	fn later_binding_replaces_earlier() {
		let registry = PermissionRegistry::empty()
			.with_checker(ClosedChecker::new(ResourceKind::Group))
			.with_checker(ClosedChecker::new(ResourceKind::Group));
		assert_eq!(registry.route_vars(), vec!["permGroupName"]);
	}
}
