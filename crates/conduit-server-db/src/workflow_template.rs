// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use conduit_server_permissions::{GroupId, StoreError, WorkflowTemplate, WorkflowTemplateStore};
use sqlx::{sqlite::SqlitePool, Row};

use crate::error::DbError;

/// Repository for workflow templates, unique per `(group_id, slug)`.
#[derive(Clone)]
pub struct WorkflowTemplateRepository {
	pool: SqlitePool,
}

impl WorkflowTemplateRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self), fields(slug = %slug, group_id = %group_id))]
	pub async fn load_by_slug_and_group_id(
		&self,
		slug: &str,
		group_id: GroupId,
	) -> Result<Option<WorkflowTemplate>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, group_id, slug, name
			FROM workflow_templates
			WHERE slug = ? AND group_id = ?
			"#,
		)
		.bind(slug)
		.bind(group_id.get())
		.fetch_optional(&self.pool)
		.await?;

		Ok(row.map(|r| WorkflowTemplate {
			id: r.get("id"),
			group_id: GroupId::new(r.get("group_id")),
			slug: r.get("slug"),
			name: r.get("name"),
		}))
	}
}

#[async_trait]
impl WorkflowTemplateStore for WorkflowTemplateRepository {
	async fn load_template_by_slug_and_group_id(
		&self,
		slug: &str,
		group_id: GroupId,
	) -> Result<Option<WorkflowTemplate>, StoreError> {
		Ok(self.load_by_slug_and_group_id(slug, group_id).await?)
	}
}
