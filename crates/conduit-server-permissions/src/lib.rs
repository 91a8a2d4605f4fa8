// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request-scoped permission resolution for Conduit.
//!
//! Given the caller's identity and group memberships, the permission level a
//! route requires, and the route variables naming the resources it touches,
//! [`Authorizer::authorize`] decides whether the request may proceed.
//!
//! - [`PermissionRegistry`] maps route variables (`permProjectKey`,
//!   `permTemplateSlug`, ...) to [`CapabilityChecker`]s
//! - [`GrantLoader`] folds the caller's group grants into [`GroupPermissions`]
//! - [`AuthzError`] separates forbidden, malformed, not-found and storage
//!   outcomes, each mapped to an HTTP status
//!
//! Persistence is reached only through the traits in [`store`].
//!
//! # Example
//!
//! ```ignore
//! let registry = Arc::new(PermissionRegistry::standard(stores));
//! let authorizer = Authorizer::new(registry);
//!
//! let route = RouteVars::new().with("permProjectKey", "demo");
//! let caller = Caller::new(user_id, [GroupId::new(7)]);
//! authorizer.authorize(&route, PermissionLevel::Read, &caller).await?;
//! ```

pub mod checkers;
pub mod error;
pub mod grants;
pub mod registry;
pub mod resolver;
pub mod route;
pub mod store;
pub mod types;

#[cfg(test)]
mod testing;

pub use checkers::{
	CapabilityChecker, ClosedChecker, ProjectChecker, RoleRequirement, TemplateSlugChecker,
	TEMPLATE_READ_THRESHOLD,
};
pub use error::AuthzError;
pub use grants::{GrantLoader, GroupPermissions};
pub use registry::PermissionRegistry;
pub use resolver::Authorizer;
pub use route::RouteVars;
pub use store::{GroupStore, PermissionStores, ProjectGrantStore, StoreError, WorkflowTemplateStore};
pub use types::{
	Caller, Group, GroupId, GroupMember, GroupRole, InvalidPermissionLevel, PermissionLevel,
	ProjectGrant, ResourceKind, UserId, WorkflowTemplate, GROUP_NAME_VAR,
};
