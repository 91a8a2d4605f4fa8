// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Workflow template access, addressed by `(groupName, templateSlug)`.
//!
//! Evaluation is a linear sequence of gates, each of which may end the
//! decision:
//!
//! 1. **Validate**: both `groupName` and the slug must be non-empty
//!    ([`AuthzError::MalformedRequest`], no store is touched)
//! 2. **Resolve group**: unknown groups are [`AuthzError::NotFound`]; store
//!    failures pass through
//! 3. **Role gate**: requirements above [`TEMPLATE_READ_THRESHOLD`] need a group
//!    admin, the rest need a member ([`AuthzError::Forbidden`])
//! 4. **Template lookup**: a missing template is [`AuthzError::NotFound`]
//!
//! Existence of the template is only revealed once the role gate has passed.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use super::CapabilityChecker;
use crate::error::AuthzError;
use crate::route::RouteVars;
use crate::store::{GroupStore, WorkflowTemplateStore};
use crate::types::{Caller, Group, PermissionLevel, ResourceKind, GROUP_NAME_VAR};

/// Highest requirement a plain group member may be granted on a template.
pub const TEMPLATE_READ_THRESHOLD: PermissionLevel = PermissionLevel::Read;

/// Group role a caller needs for a given template requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRequirement {
	Member,
	Admin,
}

impl RoleRequirement {
	pub fn for_level(required: PermissionLevel) -> Self {
		if required > TEMPLATE_READ_THRESHOLD {
			RoleRequirement::Admin
		} else {
			RoleRequirement::Member
		}
	}

	fn check(self, group: &Group, caller: &Caller) -> Result<(), AuthzError> {
		match self {
			RoleRequirement::Admin if !group.is_admin(caller) => Err(AuthzError::forbidden(
				format!("user is not an admin of group {}", group.name),
			)),
			RoleRequirement::Member if !group.is_member(caller) => Err(AuthzError::forbidden(
				format!("user is not a member of group {}", group.name),
			)),
			_ => Ok(()),
		}
	}
}

#[derive(Clone)]
pub struct TemplateSlugChecker {
	groups: Arc<dyn GroupStore>,
	templates: Arc<dyn WorkflowTemplateStore>,
}

impl TemplateSlugChecker {
	pub fn new(groups: Arc<dyn GroupStore>, templates: Arc<dyn WorkflowTemplateStore>) -> Self {
		Self { groups, templates }
	}
}

#[async_trait]
impl CapabilityChecker for TemplateSlugChecker {
	fn kind(&self) -> ResourceKind {
		ResourceKind::WorkflowTemplate
	}

	#[instrument(
		level = "debug",
		skip(self, route_vars, caller),
		fields(
			template_slug = %slug,
			group_name = route_vars.get(GROUP_NAME_VAR).unwrap_or_default(),
			required = %required,
			user_id = %caller.user_id
		)
	)]
	async fn check(
		&self,
		slug: &str,
		required: PermissionLevel,
		route_vars: &RouteVars,
		caller: &Caller,
	) -> Result<(), AuthzError> {
		let group_name = route_vars.get(GROUP_NAME_VAR).unwrap_or_default();
		if group_name.is_empty() || slug.is_empty() {
			tracing::info!("template check rejected: missing group or slug");
			return Err(AuthzError::malformed(
				"invalid given group or workflow template slug",
			));
		}

		let group = self
			.groups
			.load_group_by_name(group_name)
			.await?
			.ok_or_else(|| AuthzError::not_found(format!("group {group_name}")))?;

		let role = RoleRequirement::for_level(required);
		if let Err(err) = role.check(&group, caller) {
			tracing::info!(role = ?role, "template role gate denied");
			return Err(err);
		}

		let template = self
			.templates
			.load_template_by_slug_and_group_id(slug, group.id)
			.await?;
		if template.is_none() {
			tracing::debug!(group_id = %group.id, "workflow template not found");
			return Err(AuthzError::not_found(format!(
				"workflow template {group_name}/{slug}"
			)));
		}

		tracing::debug!(role = ?role, "template access granted");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{FakeGroupStore, FakeTemplateStore};
	use crate::types::{GroupId, GroupRole, UserId};

	struct Fixture {
		groups: Arc<FakeGroupStore>,
		templates: Arc<FakeTemplateStore>,
		member: UserId,
		admin: UserId,
	}

	impl Fixture {
		fn new() -> Self {
			let member = UserId::generate();
			let admin = UserId::generate();
			let group = Group::new(GroupId::new(3), "platform")
				.with_member(member, GroupRole::Member)
				.with_member(admin, GroupRole::Admin);
			Self {
				groups: Arc::new(FakeGroupStore::new().with_group(group)),
				templates: Arc::new(
					FakeTemplateStore::new().with_template(GroupId::new(3), "deploy-service"),
				),
				member,
				admin,
			}
		}

		fn checker(&self) -> TemplateSlugChecker {
			TemplateSlugChecker::new(self.groups.clone(), self.templates.clone())
		}

		fn caller(&self, user_id: UserId) -> Caller {
			Caller::new(user_id, [GroupId::new(3)])
		}
	}

	fn route(group_name: &str) -> RouteVars {
		RouteVars::new().with(GROUP_NAME_VAR, group_name)
	}

	mod validation {
		use super::*;

		#[tokio::test]
		async fn empty_group_name_is_malformed_before_any_lookup() {
			let fx = Fixture::new();
			let err = fx
				.checker()
				.check(
					"deploy-service",
					PermissionLevel::Read,
					&route(""),
					&fx.caller(fx.member),
				)
				.await
				.unwrap_err();
			assert!(err.is_malformed());
			assert_eq!(fx.groups.calls(), 0);
			assert_eq!(fx.templates.calls(), 0);
		}

		#[tokio::test]
		async fn missing_group_name_is_malformed() {
			let fx = Fixture::new();
			let err = fx
				.checker()
				.check(
					"deploy-service",
					PermissionLevel::Read,
					&RouteVars::new(),
					&fx.caller(fx.member),
				)
				.await
				.unwrap_err();
			assert!(err.is_malformed());
			assert_eq!(fx.groups.calls(), 0);
		}

		#[tokio::test]
		async fn empty_slug_is_malformed() {
			let fx = Fixture::new();
			let err = fx
				.checker()
				.check(
					"",
					PermissionLevel::Read,
					&route("platform"),
					&fx.caller(fx.admin),
				)
				.await
				.unwrap_err();
			assert!(err.is_malformed());
			assert_eq!(fx.groups.calls(), 0);
			assert_eq!(fx.templates.calls(), 0);
		}
	}

	mod group_resolution {
		use super::*;

		#[tokio::test]
		async fn unknown_group_is_not_found_rather_than_forbidden() {
			let fx = Fixture::new();
			let err = fx
				.checker()
				.check(
					"deploy-service",
					PermissionLevel::Read,
					&route("nope"),
					&fx.caller(fx.member),
				)
				.await
				.unwrap_err();
			assert!(err.is_not_found());
			assert_eq!(fx.templates.calls(), 0);
		}

		#[tokio::test]
		async fn group_store_failure_passes_through() {
			let checker = TemplateSlugChecker::new(
				Arc::new(FakeGroupStore::failing()),
				Arc::new(FakeTemplateStore::new()),
			);
			let err = checker
				.check(
					"deploy-service",
					PermissionLevel::Read,
					&route("platform"),
					&Caller::new(UserId::generate(), []),
				)
				.await
				.unwrap_err();
			assert!(err.is_storage());
		}
	}

	mod role_gate {
		use super::*;

		#[test]
		fn threshold_selects_role() {
			assert_eq!(
				RoleRequirement::for_level(PermissionLevel::None),
				RoleRequirement::Member
			);
			assert_eq!(
				RoleRequirement::for_level(PermissionLevel::Read),
				RoleRequirement::Member
			);
			assert_eq!(
				RoleRequirement::for_level(PermissionLevel::Execute),
				RoleRequirement::Admin
			);
			assert_eq!(
				RoleRequirement::for_level(PermissionLevel::Admin),
				RoleRequirement::Admin
			);
		}

		#[tokio::test]
		async fn member_may_read() {
			let fx = Fixture::new();
			let result = fx
				.checker()
				.check(
					"deploy-service",
					PermissionLevel::Read,
					&route("platform"),
					&fx.caller(fx.member),
				)
				.await;
			assert!(result.is_ok());
			assert_eq!(fx.templates.calls(), 1);
		}

		#[tokio::test]
		async fn member_may_not_write_and_template_is_not_queried() {
			let fx = Fixture::new();
			let err = fx
				.checker()
				.check(
					"deploy-service",
					PermissionLevel::Write,
					&route("platform"),
					&fx.caller(fx.member),
				)
				.await
				.unwrap_err();
			assert!(err.is_forbidden());
			assert_eq!(err.to_string(), "forbidden: user is not an admin of group platform");
			assert_eq!(fx.templates.calls(), 0);
		}

		#[tokio::test]
		async fn admin_may_write() {
			let fx = Fixture::new();
			let result = fx
				.checker()
				.check(
					"deploy-service",
					PermissionLevel::Write,
					&route("platform"),
					&fx.caller(fx.admin),
				)
				.await;
			assert!(result.is_ok());
		}

		#[tokio::test]
		async fn non_member_may_not_read() {
			let fx = Fixture::new();
			let err = fx
				.checker()
				.check(
					"deploy-service",
					PermissionLevel::Read,
					&route("platform"),
					&fx.caller(UserId::generate()),
				)
				.await
				.unwrap_err();
			assert!(err.is_forbidden());
			assert_eq!(err.to_string(), "forbidden: user is not a member of group platform");
			assert_eq!(fx.templates.calls(), 0);
		}

		#[tokio::test]
		async fn non_member_cannot_probe_template_existence() {
			let fx = Fixture::new();
			let err = fx
				.checker()
				.check(
					"does-not-exist",
					PermissionLevel::Read,
					&route("platform"),
					&fx.caller(UserId::generate()),
				)
				.await
				.unwrap_err();
			assert!(err.is_forbidden());
		}

		#[tokio::test]
		async fn system_admin_passes_without_roster_entry() {
			let fx = Fixture::new();
			let caller = Caller::new(UserId::generate(), []).with_system_admin(true);
			let result = fx
				.checker()
				.check(
					"deploy-service",
					PermissionLevel::Admin,
					&route("platform"),
					&caller,
				)
				.await;
			assert!(result.is_ok());
		}
	}

	mod template_lookup {
		use super::*;

		#[tokio::test]
		async fn absent_template_is_not_found() {
			let fx = Fixture::new();
			let err = fx
				.checker()
				.check(
					"rollback",
					PermissionLevel::Read,
					&route("platform"),
					&fx.caller(fx.member),
				)
				.await
				.unwrap_err();
			assert!(err.is_not_found());
			assert_eq!(err.to_string(), "not found: workflow template platform/rollback");
		}

		#[tokio::test]
		async fn template_of_another_group_is_not_found() {
			let member = UserId::generate();
			let checker = TemplateSlugChecker::new(
				Arc::new(FakeGroupStore::new().with_group(
					Group::new(GroupId::new(4), "other").with_member(member, GroupRole::Member),
				)),
				Arc::new(FakeTemplateStore::new().with_template(GroupId::new(3), "deploy-service")),
			);
			let err = checker
				.check(
					"deploy-service",
					PermissionLevel::Read,
					&route("other"),
					&Caller::new(member, []),
				)
				.await
				.unwrap_err();
			assert!(err.is_not_found());
		}

		#[tokio::test]
		async fn template_store_failure_passes_through() {
			let member = UserId::generate();
			let checker = TemplateSlugChecker::new(
				Arc::new(FakeGroupStore::new().with_group(
					Group::new(GroupId::new(3), "platform").with_member(member, GroupRole::Member),
				)),
				Arc::new(FakeTemplateStore::failing()),
			);
			let err = checker
				.check(
					"deploy-service",
					PermissionLevel::Read,
					&route("platform"),
					&Caller::new(member, []),
				)
				.await
				.unwrap_err();
			assert!(err.is_storage());
		}
	}
}
