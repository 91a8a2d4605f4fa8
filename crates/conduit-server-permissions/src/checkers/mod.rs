// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Capability checkers, one per resource kind.
//!
//! Every checker shares the [`CapabilityChecker`] signature so the resolver
//! can dispatch on route variables without knowing the kinds:
//!
//! - [`ProjectChecker`]: graded grants loaded from the caller's groups
//! - [`ClosedChecker`]: kinds whose grant model is not expressed through
//!   permission levels; always denies
//! - [`TemplateSlugChecker`]: group role gate followed by template existence

mod closed;
mod project;
mod template;

pub use closed::ClosedChecker;
pub use project::ProjectChecker;
pub use template::{RoleRequirement, TemplateSlugChecker, TEMPLATE_READ_THRESHOLD};

use async_trait::async_trait;

use crate::error::AuthzError;
use crate::route::RouteVars;
use crate::types::{Caller, PermissionLevel, ResourceKind};

/// Allow/deny policy for one kind of resource.
#[async_trait]
pub trait CapabilityChecker: Send + Sync {
	/// The kind this checker answers for; also selects its route variable.
	fn kind(&self) -> ResourceKind;

	/// Decides whether `caller` holds `required` on the resource named by `value`.
	///
	/// `route_vars` carries the whole request so compound checks can read
	/// sibling variables.
	async fn check(
		&self,
		value: &str,
		required: PermissionLevel,
		route_vars: &RouteVars,
		caller: &Caller,
	) -> Result<(), AuthzError>;
}
