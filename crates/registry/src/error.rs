//! Error types for the annotation key registry.

use thiserror::Error;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Why a key type could not produce its value-type binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
	/// The definition carries no value type at all.
	#[error("no value type declared")]
	Undeclared,
	/// A custom [`BindingSource`](crate::BindingSource) rejected the key.
	#[error("{0}")]
	Rejected(String),
}

/// Registry failures.
///
/// Optional key types missing from the build are not errors. They become
/// placeholder bindings in
/// [`LegacyKeyTableBuilder::register_by_name`](crate::LegacyKeyTableBuilder::register_by_name).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
	/// A key type failed to yield its value type. This is a defect in the key's
	/// own definition and is never retried.
	#[error("malformed key type {key}: {cause}")]
	KeyTypeMalformed {
		/// Qualified name of the offending key type.
		key: &'static str,
		/// Underlying cause.
		#[source]
		cause: BindingError,
	},
	/// [`initialize`](crate::initialize) ran after the global table was already built.
	#[error("legacy key table already initialized")]
	AlreadyInitialized,
}
