//! Harness errors

use std::path::PathBuf;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
	#[error("IO error reading {path}: {source}")]
	IoError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse harness configuration: {message}")]
	ParseError { message: String },
}
