//! Error types for configuration parsing.

use std::path::PathBuf;

use glossa_registry::RegistryError;
use thiserror::Error;

/// Errors that can occur when loading or applying configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or structure.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// An external annotation names a key type not linked into this build.
	#[error("unknown external annotation key type: {0}")]
	UnknownKeyType(String),

	/// An external annotation names a key type without a text key.
	#[error("key type {0} does not declare a text key")]
	NotExtended(String),

	/// Pushing the extensions into the global registry failed.
	#[error(transparent)]
	Registry(#[from] RegistryError),
}

/// Non-fatal problems found while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigWarning {
	/// An `externalAnnotation.<n>` property whose `<n>` is not a number.
	#[error("ignoring property {0}: index is not a number")]
	InvalidPropertyIndex(String),

	/// An `externalAnnotation.<n>` property with an empty value.
	#[error("ignoring property {0}: empty key type name")]
	EmptyExtension(String),

	/// The same key type was declared more than once.
	#[error("external annotation {0} declared more than once")]
	DuplicateExtension(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
