// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project grant repository.
//!
//! Each `project_group` row grants one group a level on one project.

use async_trait::async_trait;
use conduit_server_permissions::{
	GroupId, PermissionLevel, ProjectGrant, ProjectGrantStore, StoreError,
};
use sqlx::{sqlite::SqlitePool, Row};

use crate::error::DbError;

/// Group ids bound per query.
pub const GROUP_ID_BATCH_SIZE: usize = 500;

#[derive(Clone)]
pub struct ProjectGrantRepository {
	pool: SqlitePool,
}

impl ProjectGrantRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Find every project grant held by any of the given groups.
	///
	/// Duplicate ids are ignored and the lookup is split into batches of
	/// [`GROUP_ID_BATCH_SIZE`], so any number of groups stays under SQLite's
	/// bound-variable limit. An empty `group_ids` returns no grants without
	/// querying.
	///
	/// # Errors
	/// Returns `DbError::Internal` if a stored role is not a known level.
	#[tracing::instrument(skip(self, group_ids), fields(group_count = group_ids.len()))]
	pub async fn find_project_grants_by_group_ids(
		&self,
		group_ids: &[GroupId],
	) -> Result<Vec<ProjectGrant>, DbError> {
		let mut ids: Vec<i64> = group_ids.iter().map(|id| id.get()).collect();
		ids.sort_unstable();
		ids.dedup();

		let mut grants = Vec::new();
		for batch in ids.chunks(GROUP_ID_BATCH_SIZE) {
			grants.extend(self.find_batch(batch).await?);
		}

		tracing::debug!(grant_count = grants.len(), "project grants loaded");
		Ok(grants)
	}

	async fn find_batch(&self, group_ids: &[i64]) -> Result<Vec<ProjectGrant>, DbError> {
		let placeholders = vec!["?"; group_ids.len()].join(", ");
		let sql = format!(
			"SELECT project_key, group_id, role FROM project_group WHERE group_id IN ({placeholders})"
		);

		let mut query = sqlx::query(&sql);
		for id in group_ids {
			query = query.bind(*id);
		}
		let rows = query.fetch_all(&self.pool).await?;

		rows
			.iter()
			.map(|row| -> Result<ProjectGrant, DbError> {
				let role: i64 = row.get("role");
				let level = PermissionLevel::try_from(role)
					.map_err(|e| DbError::Internal(format!("Invalid project role: {e}")))?;
				Ok(ProjectGrant {
					group_id: GroupId::new(row.get("group_id")),
					project_key: row.get("project_key"),
					level,
				})
			})
			.collect()
	}
}

#[async_trait]
impl ProjectGrantStore for ProjectGrantRepository {
	async fn find_project_grants_by_group_ids(
		&self,
		group_ids: &[GroupId],
	) -> Result<Vec<ProjectGrant>, StoreError> {
		Ok(self.find_project_grants_by_group_ids(group_ids).await?)
	}
}
