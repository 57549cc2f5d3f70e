//! Legacy key table: flat legacy names to key types.
//!
//! The table is assembled through [`LegacyKeyTableBuilder`] during a
//! single-threaded startup window and frozen by [`LegacyKeyTableBuilder::build`].
//! After that it is immutable and can be shared across threads freely.
//!
//! Duplicate legacy names are kept. Lookups by name return the first binding
//! registered under that name; later ones remain visible through
//! [`LegacyKeyTable::all_bindings`] but are unreachable by name.

use std::any::TypeId;

use rustc_hash::FxHashMap as HashMap;

use crate::catalog;
use crate::key::{AnnotationKey, ExtendedAnnotationKey, KeyType};

/// A `(legacy name, key type)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
	legacy_name: Box<str>,
	key_type: KeyType,
	requested: Option<Box<str>>,
}

impl Binding {
	/// Returns the legacy name.
	pub fn legacy_name(&self) -> &str {
		&self.legacy_name
	}

	/// Returns the bound key type, [`KeyType::UNRESOLVED`] for placeholders.
	pub fn key_type(&self) -> KeyType {
		self.key_type
	}

	/// Returns true if the key type could not be resolved at registration.
	pub fn is_placeholder(&self) -> bool {
		self.key_type.is_placeholder()
	}

	/// Returns the qualified name that was requested for a by-name registration.
	pub fn requested_name(&self) -> Option<&str> {
		self.requested.as_deref()
	}
}

/// Collects bindings in registration order.
#[derive(Debug, Default)]
pub struct LegacyKeyTableBuilder {
	bindings: Vec<Binding>,
}

impl LegacyKeyTableBuilder {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a builder preloaded with the built-in legacy names.
	pub fn with_builtins() -> Self {
		let mut builder = Self::new();
		crate::keys::register_builtins(&mut builder);
		builder
	}

	/// Returns the number of bindings registered so far.
	pub fn len(&self) -> usize {
		self.bindings.len()
	}

	/// Returns true if nothing has been registered.
	pub fn is_empty(&self) -> bool {
		self.bindings.is_empty()
	}

	/// Appends a binding. Duplicate names are accepted.
	pub fn register(&mut self, key_type: KeyType, legacy_name: &str) {
		self.bindings.push(Binding {
			legacy_name: Box::from(legacy_name),
			key_type,
			requested: None,
		});
	}

	/// Appends a binding for a typed key.
	pub fn register_key<K: AnnotationKey>(&mut self, legacy_name: &str) {
		self.register(K::key_type(), legacy_name);
	}

	/// Appends an extension key under its own text key.
	pub fn register_extended<K: ExtendedAnnotationKey>(&mut self) {
		self.register(K::key_type(), K::text_key());
	}

	/// Appends a binding for a key type resolved by qualified name.
	///
	/// Never fails: a name missing from this build is bound to
	/// [`KeyType::UNRESOLVED`] so the table stays structurally complete.
	pub fn register_by_name(&mut self, qualified_name: &str, legacy_name: &str) {
		let key_type = catalog::find(qualified_name).unwrap_or_else(|| {
			tracing::debug!(
				qualified_name,
				legacy_name,
				"key type not linked into this build; binding placeholder"
			);
			KeyType::UNRESOLVED
		});
		self.bindings.push(Binding {
			legacy_name: Box::from(legacy_name),
			key_type,
			requested: Some(Box::from(qualified_name)),
		});
	}

	/// Freezes the bindings into an indexed table.
	pub fn build(self) -> LegacyKeyTable {
		let bindings = self.bindings;
		let mut by_name: HashMap<Box<str>, usize> =
			HashMap::with_capacity_and_hasher(bindings.len(), Default::default());
		let mut by_key: HashMap<TypeId, Vec<usize>> = HashMap::default();

		for (idx, binding) in bindings.iter().enumerate() {
			match by_name.get(binding.legacy_name()) {
				None => {
					by_name.insert(binding.legacy_name.clone(), idx);
				}
				Some(&first) => {
					tracing::debug!(
						legacy_name = binding.legacy_name(),
						kept = %bindings[first].key_type,
						shadowed = %binding.key_type,
						"duplicate legacy name; first registration wins"
					);
				}
			}
			if !binding.is_placeholder() {
				by_key.entry(binding.key_type.id()).or_default().push(idx);
			}
		}

		LegacyKeyTable {
			bindings,
			by_name,
			by_key,
		}
	}
}

/// Immutable legacy key table.
#[derive(Debug)]
pub struct LegacyKeyTable {
	bindings: Vec<Binding>,
	by_name: HashMap<Box<str>, usize>,
	by_key: HashMap<TypeId, Vec<usize>>,
}

impl LegacyKeyTable {
	/// Returns a table containing only the built-in legacy names.
	pub fn builtin() -> Self {
		LegacyKeyTableBuilder::with_builtins().build()
	}

	/// Returns the first binding registered under `legacy_name`.
	pub fn lookup(&self, legacy_name: &str) -> Option<&Binding> {
		self.by_name.get(legacy_name).map(|&idx| &self.bindings[idx])
	}

	/// Returns the key type registered first under `legacy_name`.
	pub fn key_type(&self, legacy_name: &str) -> Option<KeyType> {
		self.lookup(legacy_name).map(Binding::key_type)
	}

	/// Returns every binding in registration order.
	pub fn all_bindings(&self) -> std::slice::Iter<'_, Binding> {
		self.bindings.iter()
	}

	/// Returns every legacy name bound to `key_type`, in registration order.
	///
	/// Placeholder bindings are not indexed by key type.
	pub fn legacy_names(&self, key_type: KeyType) -> impl Iterator<Item = &str> + '_ {
		self.by_key
			.get(&key_type.id())
			.into_iter()
			.flatten()
			.map(|&idx| self.bindings[idx].legacy_name())
	}

	/// Returns the first legacy name bound to `key_type`.
	pub fn legacy_name(&self, key_type: KeyType) -> Option<&str> {
		self.legacy_names(key_type).next()
	}

	/// Returns the bindings whose key type could not be resolved.
	pub fn unresolved(&self) -> impl Iterator<Item = &Binding> + '_ {
		self.bindings.iter().filter(|b| b.is_placeholder())
	}

	/// Returns the number of bindings, duplicates included.
	pub fn len(&self) -> usize {
		self.bindings.len()
	}

	/// Returns true if the table holds no bindings.
	pub fn is_empty(&self) -> bool {
		self.bindings.is_empty()
	}
}

impl<'a> IntoIterator for &'a LegacyKeyTable {
	type Item = &'a Binding;
	type IntoIter = std::slice::Iter<'a, Binding>;

	fn into_iter(self) -> Self::IntoIter {
		self.all_bindings()
	}
}

#[cfg(test)]
mod tests;
