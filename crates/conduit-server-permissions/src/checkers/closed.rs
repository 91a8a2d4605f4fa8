// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use super::CapabilityChecker;
use crate::error::AuthzError;
use crate::route::RouteVars;
use crate::types::{Caller, PermissionLevel, ResourceKind};

/// Denies every request for its kind, whatever the caller holds.
///
/// Workflows, groups, worker models and actions are not authorized through
/// permission levels; routes carrying their variables are closed here.
#[derive(Debug, Clone, Copy)]
pub struct ClosedChecker {
	kind: ResourceKind,
}

impl ClosedChecker {
	pub fn new(kind: ResourceKind) -> Self {
		Self { kind }
	}

	/// The kinds the standard registry closes.
	pub fn standard_kinds() -> &'static [ResourceKind] {
		&[
			ResourceKind::Workflow,
			ResourceKind::Group,
			ResourceKind::WorkerModel,
			ResourceKind::Action,
			ResourceKind::BuiltinAction,
		]
	}

	fn reason(&self, value: &str) -> String {
		match self.kind {
			ResourceKind::Workflow => {
				format!("not authorized for workflow {value}, missing project key value")
			}
			ResourceKind::BuiltinAction => format!("not authorized for action {value}"),
			kind => format!("not authorized for {kind} {value}"),
		}
	}
}

#[async_trait]
impl CapabilityChecker for ClosedChecker {
	fn kind(&self) -> ResourceKind {
		self.kind
	}

	async fn check(
		&self,
		value: &str,
		required: PermissionLevel,
		_route_vars: &RouteVars,
		caller: &Caller,
	) -> Result<(), AuthzError> {
		tracing::info!(
			kind = %self.kind,
			value,
			required = %required,
			user_id = %caller.user_id,
			"closed resource kind denied"
		);
		Err(AuthzError::forbidden(self.reason(value)))
	}
}
