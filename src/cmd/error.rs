use std::path::PathBuf;

use thiserror::Error;

/// Command-local result type.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
	/// Input file could not be read.
	#[error("cannot read {path}: {source}")]
	Io {
		/// Input path.
		path: PathBuf,
		/// Underlying IO error.
		#[source]
		source: std::io::Error,
	},
	/// Input is not a wire-JSON item.
	#[error("cannot parse {path} as an item: {source}")]
	Json {
		/// Input path.
		path: PathBuf,
		/// Underlying parser error.
		#[source]
		source: serde_json::Error,
	},
	/// Report could not be rendered.
	#[error("cannot render report: {0}")]
	Render(#[source] serde_json::Error),
	/// Strict mode found attributes with more than one populated variant.
	#[error("malformed attributes: {names}")]
	Malformed {
		/// Comma-separated attribute names.
		names: String,
	},
}
