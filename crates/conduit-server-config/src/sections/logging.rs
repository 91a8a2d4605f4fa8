// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Logging configuration.

use serde::Deserialize;

use crate::error::ConfigError;

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Logging configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct LoggingConfig {
	/// Default filter when `RUST_LOG` is unset.
	pub level: String,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
		}
	}
}

/// Logging configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfigLayer {
	#[serde(default)]
	pub level: Option<String>,
}

impl LoggingConfigLayer {
	pub fn merge(&mut self, other: LoggingConfigLayer) {
		if other.level.is_some() {
			self.level = other.level;
		}
	}

	pub fn finalize(self) -> Result<LoggingConfig, ConfigError> {
		let Some(level) = self.level else {
			return Ok(LoggingConfig::default());
		};

		let level = level.to_ascii_lowercase();
		if !LEVELS.contains(&level.as_str()) {
			return Err(ConfigError::InvalidValue {
				key: "logging.level".to_string(),
				message: format!("expected one of {}, got {level:?}", LEVELS.join(", ")),
			});
		}
		Ok(LoggingConfig { level })
	}
}
