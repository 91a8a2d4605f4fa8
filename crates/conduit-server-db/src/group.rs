// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Group repository: groups and their membership rosters.

use async_trait::async_trait;
use conduit_server_permissions::{
	Group, GroupId, GroupMember, GroupRole, GroupStore, StoreError, UserId,
};
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

use crate::error::DbError;

#[derive(Clone)]
pub struct GroupRepository {
	pool: SqlitePool,
}

impl GroupRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Load a group with its full roster by name.
	///
	/// # Returns
	/// `None` if no group has this name.
	#[tracing::instrument(skip(self), fields(group_name = %name))]
	pub async fn load_group_by_name(&self, name: &str) -> Result<Option<Group>, DbError> {
		let Some(row) = sqlx::query("SELECT id, name FROM groups WHERE name = ?")
			.bind(name)
			.fetch_optional(&self.pool)
			.await?
		else {
			tracing::debug!("group not found");
			return Ok(None);
		};

		let id = GroupId::new(row.get("id"));
		let members = self.list_members(id).await?;

		Ok(Some(Group {
			id,
			name: row.get("name"),
			members,
		}))
	}

	/// List a group's roster.
	#[tracing::instrument(skip(self), fields(group_id = %group_id))]
	pub async fn list_members(&self, group_id: GroupId) -> Result<Vec<GroupMember>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT user_id, group_admin
			FROM group_members
			WHERE group_id = ?
			"#,
		)
		.bind(group_id.get())
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(row_to_member).collect()
	}
}

fn row_to_member(row: &sqlx::sqlite::SqliteRow) -> Result<GroupMember, DbError> {
	let user_id: String = row.get("user_id");
	let group_admin: i32 = row.get("group_admin");

	let user_id =
		Uuid::parse_str(&user_id).map_err(|e| DbError::Internal(format!("Invalid user ID: {e}")))?;

	Ok(GroupMember {
		user_id: UserId::new(user_id),
		role: if group_admin != 0 {
			GroupRole::Admin
		} else {
			GroupRole::Member
		},
	})
}

#[async_trait]
impl GroupStore for GroupRepository {
	async fn load_group_by_name(&self, name: &str) -> Result<Option<Group>, StoreError> {
		Ok(self.load_group_by_name(name).await?)
	}
}
