// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQLite persistence for permission resolution.
//!
//! Each repository implements one of the store traits from
//! `conduit-server-permissions`. All queries are read-only.

pub mod error;
pub mod group;
pub mod pool;
pub mod project_grant;
pub mod testing;
pub mod workflow_template;

pub use error::{DbError, Result};
pub use group::GroupRepository;
pub use pool::create_pool;
pub use project_grant::ProjectGrantRepository;
pub use workflow_template::WorkflowTemplateRepository;

use conduit_server_permissions::PermissionStores;
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;

/// Builds the store bundle for [`PermissionRegistry::standard`](conduit_server_permissions::PermissionRegistry::standard).
pub fn permission_stores(pool: SqlitePool) -> PermissionStores {
	PermissionStores {
		project_grants: Arc::new(ProjectGrantRepository::new(pool.clone())),
		groups: Arc::new(GroupRepository::new(pool.clone())),
		templates: Arc::new(WorkflowTemplateRepository::new(pool)),
	}
}
