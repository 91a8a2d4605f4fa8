// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use tracing::instrument;

use super::CapabilityChecker;
use crate::error::AuthzError;
use crate::grants::GrantLoader;
use crate::route::RouteVars;
use crate::types::{Caller, PermissionLevel, ResourceKind};

/// Allows when the caller's groups grant the project at `required` or above.
#[derive(Clone)]
pub struct ProjectChecker {
	grants: GrantLoader,
}

impl ProjectChecker {
	pub fn new(grants: GrantLoader) -> Self {
		Self { grants }
	}
}

#[async_trait]
impl CapabilityChecker for ProjectChecker {
	fn kind(&self) -> ResourceKind {
		ResourceKind::Project
	}

	#[instrument(
		level = "debug",
		skip(self, _route_vars, caller),
		fields(project_key = %key, required = %required, user_id = %caller.user_id)
	)]
	async fn check(
		&self,
		key: &str,
		required: PermissionLevel,
		_route_vars: &RouteVars,
		caller: &Caller,
	) -> Result<(), AuthzError> {
		let perms = self.grants.load(&caller.group_ids).await?;

		match perms.project_permission(key) {
			Some(granted) if granted.satisfies(required) => {
				tracing::debug!(granted = %granted, "project permission granted");
				Ok(())
			}
			granted => {
				tracing::info!(granted = ?granted, "project permission denied");
				Err(AuthzError::forbidden(format!(
					"not authorized for project {key}"
				)))
			}
		}
	}
}
