// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request authorization entry point.
//!
//! Every route variable with a registered checker must pass; the first
//! failure ends evaluation and is returned unchanged. A request with no
//! recognized variable carries no policy and is allowed, so only mount the
//! resolver on routes that name a protected resource.

use std::sync::Arc;

use tracing::instrument;

use crate::error::AuthzError;
use crate::registry::PermissionRegistry;
use crate::route::RouteVars;
use crate::types::{Caller, PermissionLevel};

#[derive(Debug, Clone)]
pub struct Authorizer {
	registry: Arc<PermissionRegistry>,
}

impl Authorizer {
	pub fn new(registry: Arc<PermissionRegistry>) -> Self {
		Self { registry }
	}

	pub fn registry(&self) -> &PermissionRegistry {
		&self.registry
	}

	/// Decides whether `caller` may proceed with `required` on this route.
	#[instrument(
		skip(self, route_vars, caller),
		fields(user_id = %caller.user_id, required = %required, group_count = caller.group_ids.len())
	)]
	pub async fn authorize(
		&self,
		route_vars: &RouteVars,
		required: PermissionLevel,
		caller: &Caller,
	) -> Result<(), AuthzError> {
		let mut checked = 0usize;
		for (name, value) in route_vars.iter() {
			let Some(checker) = self.registry.get(name) else {
				continue;
			};
			checked += 1;
			if let Err(err) = checker.check(value, required, route_vars, caller).await {
				tracing::info!(
					route_var = name,
					value,
					error_code = err.error_code(),
					"authorization denied"
				);
				return Err(err);
			}
		}

		tracing::debug!(checked, "authorization granted");
		Ok(())
	}
}
