//! Harness configuration
//!
//! Usually built in code, but can be loaded from TOML:
//!
//! ```toml
//! max_resolution_depth = 32
//! fallback = false
//! primitive_defaults = true
//! ```

use crate::error::HarnessError;
use mockwire_di::DEFAULT_MAX_RESOLUTION_DEPTH;
use serde::Deserialize;
use std::path::Path;

/// Settings of one [`AutoMocker`](crate::AutoMocker).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
	/// Deepest nested resolution allowed before the container gives up
	pub max_resolution_depth: usize,

	/// Install the auto-mocking policy for types the walk did not register.
	/// When off, such abstractions fail to resolve.
	pub fallback: bool,

	/// Answer primitive and string terminals with their `Default` value when the
	/// engine has no double for them
	pub primitive_defaults: bool,
}

impl Default for HarnessConfig {
	fn default() -> Self {
		Self {
			max_resolution_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
			fallback: true,
			primitive_defaults: false,
		}
	}
}

impl HarnessConfig {
	pub fn with_max_resolution_depth(mut self, depth: usize) -> Self {
		self.max_resolution_depth = depth;
		self
	}

	pub fn with_fallback(mut self, enabled: bool) -> Self {
		self.fallback = enabled;
		self
	}

	pub fn with_primitive_defaults(mut self, enabled: bool) -> Self {
		self.primitive_defaults = enabled;
		self
	}

	/// Load configuration from a TOML file.
	///
	/// # Errors
	///
	/// Returns error if file cannot be read or parsed.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, HarnessError> {
		let content =
			std::fs::read_to_string(path.as_ref()).map_err(|e| HarnessError::IoError {
				path: path.as_ref().to_path_buf(),
				source: e,
			})?;

		Self::from_toml(&content)
	}

	/// Parse configuration from TOML string.
	pub fn from_toml(content: &str) -> Result<Self, HarnessError> {
		toml::from_str(content).map_err(|e| HarnessError::ParseError {
			message: e.to_string(),
		})
	}
}
