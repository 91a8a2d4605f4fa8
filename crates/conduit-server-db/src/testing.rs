// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use conduit_server_permissions::{GroupId, GroupRole, PermissionLevel, UserId};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// In-memory pool. A single connection keeps every query on the same database.
pub async fn create_test_pool() -> SqlitePool {
	let options = SqliteConnectOptions::from_str(":memory:").unwrap();
	SqlitePoolOptions::new()
		.max_connections(1)
		.connect_with(options)
		.await
		.unwrap()
}

pub async fn create_groups_tables(pool: &SqlitePool) {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS groups (
			id INTEGER PRIMARY KEY,
			name TEXT UNIQUE NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await
	.unwrap();

	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS group_members (
			group_id INTEGER NOT NULL REFERENCES groups(id) ON DELETE CASCADE,
			user_id TEXT NOT NULL,
			group_admin INTEGER NOT NULL DEFAULT 0,
			UNIQUE(group_id, user_id)
		)
		"#,
	)
	.execute(pool)
	.await
	.unwrap();
}

pub async fn create_project_group_table(pool: &SqlitePool) {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS project_group (
			project_key TEXT NOT NULL,
			group_id INTEGER NOT NULL,
			role INTEGER NOT NULL,
			UNIQUE(project_key, group_id)
		)
		"#,
	)
	.execute(pool)
	.await
	.unwrap();
}

pub async fn create_workflow_templates_table(pool: &SqlitePool) {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS workflow_templates (
			id INTEGER PRIMARY KEY AUTOINCREMENT,
			group_id INTEGER NOT NULL REFERENCES groups(id) ON DELETE CASCADE,
			slug TEXT NOT NULL,
			name TEXT NOT NULL,
			UNIQUE(group_id, slug)
		)
		"#,
	)
	.execute(pool)
	.await
	.unwrap();
}

/// Pool with every permission table created.
pub async fn create_permission_test_pool() -> SqlitePool {
	let pool = create_test_pool().await;
	create_groups_tables(&pool).await;
	create_project_group_table(&pool).await;
	create_workflow_templates_table(&pool).await;
	pool
}

pub async fn insert_group(pool: &SqlitePool, id: GroupId, name: &str) {
	sqlx::query("INSERT INTO groups (id, name) VALUES (?, ?)")
		.bind(id.get())
		.bind(name)
		.execute(pool)
		.await
		.unwrap();
}

pub async fn insert_group_member(pool: &SqlitePool, group_id: GroupId, user_id: UserId, role: GroupRole) {
	sqlx::query("INSERT INTO group_members (group_id, user_id, group_admin) VALUES (?, ?, ?)")
		.bind(group_id.get())
		.bind(user_id.to_string())
		.bind((role == GroupRole::Admin) as i32)
		.execute(pool)
		.await
		.unwrap();
}

pub async fn insert_project_grant(
	pool: &SqlitePool,
	group_id: GroupId,
	project_key: &str,
	level: PermissionLevel,
) {
	sqlx::query("INSERT INTO project_group (project_key, group_id, role) VALUES (?, ?, ?)")
		.bind(project_key)
		.bind(group_id.get())
		.bind(level.as_i64())
		.execute(pool)
		.await
		.unwrap();
}

pub async fn insert_workflow_template(pool: &SqlitePool, group_id: GroupId, slug: &str, name: &str) {
	sqlx::query("INSERT INTO workflow_templates (group_id, slug, name) VALUES (?, ?, ?)")
		.bind(group_id.get())
		.bind(slug)
		.bind(name)
		.execute(pool)
		.await
		.unwrap();
}
