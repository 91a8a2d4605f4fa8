// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Outcomes of a failed authorization decision.

use http::StatusCode;

use crate::store::StoreError;

/// Why a request may not proceed.
///
/// Denials and non-existence are kept apart: a [`AuthzError::Forbidden`] must
/// never be reported as [`AuthzError::NotFound`] or the other way round.
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
	#[error("forbidden: {0}")]
	Forbidden(String),

	#[error("malformed request: {0}")]
	MalformedRequest(String),

	#[error("not found: {0}")]
	NotFound(String),

	#[error(transparent)]
	Storage(#[from] StoreError),
}

impl AuthzError {
	pub fn forbidden(message: impl Into<String>) -> Self {
		AuthzError::Forbidden(message.into())
	}

	pub fn malformed(message: impl Into<String>) -> Self {
		AuthzError::MalformedRequest(message.into())
	}

	pub fn not_found(message: impl Into<String>) -> Self {
		AuthzError::NotFound(message.into())
	}

	/// HTTP status the enclosing layer answers with.
	pub fn status_code(&self) -> StatusCode {
		match self {
			AuthzError::Forbidden(_) => StatusCode::FORBIDDEN,
			AuthzError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
			AuthzError::NotFound(_) => StatusCode::NOT_FOUND,
			AuthzError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// Stable machine-readable code for error bodies.
	pub fn error_code(&self) -> &'static str {
		match self {
			AuthzError::Forbidden(_) => "forbidden",
			AuthzError::MalformedRequest(_) => "bad_request",
			AuthzError::NotFound(_) => "not_found",
			AuthzError::Storage(_) => "internal_error",
		}
	}

	pub fn is_forbidden(&self) -> bool {
		matches!(self, AuthzError::Forbidden(_))
	}

	pub fn is_malformed(&self) -> bool {
		matches!(self, AuthzError::MalformedRequest(_))
	}

	pub fn is_not_found(&self) -> bool {
		matches!(self, AuthzError::NotFound(_))
	}

	pub fn is_storage(&self) -> bool {
		matches!(self, AuthzError::Storage(_))
	}
}
