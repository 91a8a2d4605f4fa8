// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions for permission resolution.
//!
//! - **Identifiers**: [`UserId`] (UUID) and [`GroupId`] (opaque integer)
//! - **Levels**: the ordered [`PermissionLevel`] scale shared by grants and requirements
//! - **Groups**: [`Group`] with its membership roster and [`GroupRole`]s
//! - **Callers**: the explicit request identity, [`Caller`]
//! - **Resources**: [`ResourceKind`] and the route variable each kind is bound to

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// =============================================================================
// Identifiers
// =============================================================================

/// Unique identifier for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
	/// Create a new ID from a UUID.
	pub fn new(id: Uuid) -> Self {
		Self(id)
	}

	/// Generate a new random ID.
	pub fn generate() -> Self {
		Self(Uuid::new_v4())
	}

	/// Get the inner UUID value.
	pub fn into_inner(self) -> Uuid {
		self.0
	}
}

impl fmt::Display for UserId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<Uuid> for UserId {
	fn from(id: Uuid) -> Self {
		Self(id)
	}
}

/// Identifier of a group a caller can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(i64);

impl GroupId {
	pub fn new(id: i64) -> Self {
		Self(id)
	}

	pub fn get(self) -> i64 {
		self.0
	}
}

impl fmt::Display for GroupId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<i64> for GroupId {
	fn from(id: i64) -> Self {
		Self(id)
	}
}

// =============================================================================
// Permission Levels
// =============================================================================

/// Graded access level, used both as a stored grant and as a route requirement.
///
/// Levels are totally ordered; a grant at level `L` satisfies every
/// requirement at or below `L`.
#[derive(
	Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PermissionLevel {
	/// No access.
	#[default]
	None,
	/// Read-only access.
	Read,
	/// Read and execute (run workflows, trigger jobs).
	Execute,
	/// Read, write and execute.
	Write,
	/// Full control over the resource.
	Admin,
}

impl PermissionLevel {
	/// Returns all levels in ascending order.
	pub fn all() -> &'static [PermissionLevel] {
		&[
			PermissionLevel::None,
			PermissionLevel::Read,
			PermissionLevel::Execute,
			PermissionLevel::Write,
			PermissionLevel::Admin,
		]
	}

	/// Integer stored in the grant tables.
	pub fn as_i64(self) -> i64 {
		match self {
			PermissionLevel::None => 0,
			PermissionLevel::Read => 4,
			PermissionLevel::Execute => 5,
			PermissionLevel::Write => 7,
			PermissionLevel::Admin => 8,
		}
	}

	/// Returns true if a grant at this level meets `required`.
	pub fn satisfies(self, required: PermissionLevel) -> bool {
		self >= required
	}
}

impl fmt::Display for PermissionLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PermissionLevel::None => write!(f, "none"),
			PermissionLevel::Read => write!(f, "read"),
			PermissionLevel::Execute => write!(f, "execute"),
			PermissionLevel::Write => write!(f, "write"),
			PermissionLevel::Admin => write!(f, "admin"),
		}
	}
}

/// Error returned when a stored or supplied level is not on the scale.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid permission level: {0}")]
pub struct InvalidPermissionLevel(pub String);

impl TryFrom<i64> for PermissionLevel {
	type Error = InvalidPermissionLevel;

	fn try_from(value: i64) -> Result<Self, Self::Error> {
		PermissionLevel::all()
			.iter()
			.copied()
			.find(|level| level.as_i64() == value)
			.ok_or_else(|| InvalidPermissionLevel(value.to_string()))
	}
}

impl FromStr for PermissionLevel {
	type Err = InvalidPermissionLevel;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"none" => Ok(PermissionLevel::None),
			"read" => Ok(PermissionLevel::Read),
			"execute" => Ok(PermissionLevel::Execute),
			"write" => Ok(PermissionLevel::Write),
			"admin" => Ok(PermissionLevel::Admin),
			_ => Err(InvalidPermissionLevel(s.to_string())),
		}
	}
}

// =============================================================================
// Groups
// =============================================================================

/// A caller's role within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupRole {
	/// Can manage the group and everything it owns.
	Admin,
	/// Standard group member.
	Member,
}

impl GroupRole {
	/// Returns true if this role has at least the permissions of the given role.
	pub fn has_permission_of(&self, other: &GroupRole) -> bool {
		matches!(
			(self, other),
			(GroupRole::Admin, _) | (GroupRole::Member, GroupRole::Member)
		)
	}
}

impl fmt::Display for GroupRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			GroupRole::Admin => write!(f, "admin"),
			GroupRole::Member => write!(f, "member"),
		}
	}
}

/// One entry of a group's membership roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
	pub user_id: UserId,
	pub role: GroupRole,
}

/// A group, loaded together with its membership roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
	pub id: GroupId,
	pub name: String,
	pub members: Vec<GroupMember>,
}

impl Group {
	/// Creates a group with an empty roster.
	pub fn new(id: GroupId, name: impl Into<String>) -> Self {
		Self {
			id,
			name: name.into(),
			members: Vec::new(),
		}
	}

	/// Builder: add a roster entry.
	pub fn with_member(mut self, user_id: UserId, role: GroupRole) -> Self {
		self.members.push(GroupMember { user_id, role });
		self
	}

	/// Returns the user's role in this group, or `None` for non-members.
	pub fn role_of(&self, user_id: UserId) -> Option<GroupRole> {
		self
			.members
			.iter()
			.find(|m| m.user_id == user_id)
			.map(|m| m.role)
	}

	/// Returns true if the caller is a member (or admin) of this group.
	///
	/// System administrators pass regardless of the roster.
	pub fn is_member(&self, caller: &Caller) -> bool {
		caller.is_system_admin || self.role_of(caller.user_id).is_some()
	}

	/// Returns true if the caller is an admin of this group.
	///
	/// System administrators pass regardless of the roster.
	pub fn is_admin(&self, caller: &Caller) -> bool {
		caller.is_system_admin
			|| self
				.role_of(caller.user_id)
				.is_some_and(|role| role.has_permission_of(&GroupRole::Admin))
	}
}

// =============================================================================
// Callers
// =============================================================================

/// The authenticated identity an authorization decision is made for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
	pub user_id: UserId,
	/// Groups the caller belongs to. Empty is a legal "no memberships" caller.
	pub group_ids: Vec<GroupId>,
	pub is_system_admin: bool,
}

impl Caller {
	pub fn new(user_id: UserId, group_ids: impl IntoIterator<Item = GroupId>) -> Self {
		Self {
			user_id,
			group_ids: group_ids.into_iter().collect(),
			is_system_admin: false,
		}
	}

	/// Builder: set the platform administrator flag.
	pub fn with_system_admin(mut self, is_system_admin: bool) -> Self {
		self.is_system_admin = is_system_admin;
		self
	}
}

// =============================================================================
// Persisted records
// =============================================================================

/// A workflow template, unique by `(group_id, slug)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowTemplate {
	pub id: i64,
	pub group_id: GroupId,
	pub slug: String,
	pub name: String,
}

/// A project-scoped grant held by one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectGrant {
	pub group_id: GroupId,
	pub project_key: String,
	pub level: PermissionLevel,
}

// =============================================================================
// Resource kinds
// =============================================================================

/// Route variable carrying the owning group of a workflow template.
pub const GROUP_NAME_VAR: &str = "groupName";

/// Kinds of resources that carry a permission-bearing route variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
	Project,
	Workflow,
	Group,
	WorkerModel,
	Action,
	BuiltinAction,
	WorkflowTemplate,
}

impl ResourceKind {
	/// Returns all resource kinds.
	pub fn all() -> &'static [ResourceKind] {
		&[
			ResourceKind::Project,
			ResourceKind::Workflow,
			ResourceKind::Group,
			ResourceKind::WorkerModel,
			ResourceKind::Action,
			ResourceKind::BuiltinAction,
			ResourceKind::WorkflowTemplate,
		]
	}

	/// Name of the route variable that identifies a resource of this kind.
	pub fn route_var(self) -> &'static str {
		match self {
			ResourceKind::Project => "permProjectKey",
			ResourceKind::Workflow => "permWorkflowName",
			ResourceKind::Group => "permGroupName",
			ResourceKind::WorkerModel => "permModelID",
			ResourceKind::Action => "permActionName",
			ResourceKind::BuiltinAction => "permActionBuiltinName",
			ResourceKind::WorkflowTemplate => "permTemplateSlug",
		}
	}
}

impl fmt::Display for ResourceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ResourceKind::Project => write!(f, "project"),
			ResourceKind::Workflow => write!(f, "workflow"),
			ResourceKind::Group => write!(f, "group"),
			ResourceKind::WorkerModel => write!(f, "worker model"),
			ResourceKind::Action => write!(f, "action"),
			ResourceKind::BuiltinAction => write!(f, "builtin action"),
			ResourceKind::WorkflowTemplate => write!(f, "workflow template"),
		}
	}
}
