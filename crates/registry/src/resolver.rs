//! Memoized key type to value type resolution.

use std::any::TypeId;

use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;

use crate::error::{BindingError, RegistryError, Result};
use crate::key::{KeyType, ValueType};

/// Derives the value type a key type is bound to.
pub trait BindingSource: Send + Sync {
	/// Returns the declared value type of `key_type`.
	fn value_type(&self, key_type: KeyType) -> std::result::Result<ValueType, BindingError>;
}

/// Reads the value type straight from the key's [`KeyTypeDef`](crate::KeyTypeDef).
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredBinding;

impl BindingSource for DeclaredBinding {
	fn value_type(&self, key_type: KeyType) -> std::result::Result<ValueType, BindingError> {
		key_type.def().value.ok_or(BindingError::Undeclared)
	}
}

/// Resolves and caches value types per key type.
///
/// The cache only grows. Concurrent first queries for the same key may both
/// derive the value type; the first one stored is what every caller sees.
pub struct ValueTypeResolver<S = DeclaredBinding> {
	source: S,
	cache: RwLock<HashMap<TypeId, ValueType>>,
}

impl ValueTypeResolver {
	/// Creates a resolver reading declared bindings.
	pub fn new() -> Self {
		Self::with_source(DeclaredBinding)
	}
}

impl Default for ValueTypeResolver {
	fn default() -> Self {
		Self::new()
	}
}

impl<S: BindingSource> ValueTypeResolver<S> {
	/// Creates a resolver over a custom derivation path.
	pub fn with_source(source: S) -> Self {
		Self {
			source,
			cache: RwLock::new(HashMap::default()),
		}
	}

	/// Returns the value type bound to `key_type`.
	///
	/// # Errors
	///
	/// [`RegistryError::KeyTypeMalformed`] if the key type cannot produce its
	/// binding. Failures are not cached.
	pub fn value_type_of(&self, key_type: KeyType) -> Result<ValueType> {
		let id = key_type.id();
		if let Some(&cached) = self.cache.read().get(&id) {
			return Ok(cached);
		}

		let derived = self
			.source
			.value_type(key_type)
			.map_err(|cause| RegistryError::KeyTypeMalformed {
				key: key_type.name(),
				cause,
			})?;

		let mut cache = self.cache.write();
		let stored = *cache.entry(id).or_insert(derived);
		tracing::trace!(key = key_type.name(), value = stored.name(), "cached value type");
		Ok(stored)
	}

	/// Returns the number of cached key types.
	pub fn cached_len(&self) -> usize {
		self.cache.read().len()
	}

	/// Returns the derivation path.
	pub fn source(&self) -> &S {
		&self.source
	}
}

impl<S> core::fmt::Debug for ValueTypeResolver<S> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("ValueTypeResolver")
			.field("cached", &self.cache.read().len())
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests;
