//! Process-wide registry state and accessor surfaces.
//!
//! The global table is built exactly once. Call [`initialize`] or
//! [`initialize_with`] before any pipeline work starts; reading the table
//! first freezes it with the built-in names only.

use std::sync::{LazyLock, OnceLock};

use crate::error::{RegistryError, Result};
use crate::key::{KeyType, ValueType};
use crate::resolver::ValueTypeResolver;
use crate::table::{Binding, LegacyKeyTable, LegacyKeyTableBuilder};

static TABLE: OnceLock<LegacyKeyTable> = OnceLock::new();

static RESOLVER: LazyLock<ValueTypeResolver> = LazyLock::new(ValueTypeResolver::new);

/// Builds the global table from the built-in names.
pub fn initialize() -> Result<&'static LegacyKeyTable> {
	initialize_with(|_| {})
}

/// Builds the global table from the built-in names plus whatever `extend`
/// registers.
///
/// # Errors
///
/// [`RegistryError::AlreadyInitialized`] if the table was already built,
/// either explicitly or by an earlier read.
pub fn initialize_with<F>(extend: F) -> Result<&'static LegacyKeyTable>
where
	F: FnOnce(&mut LegacyKeyTableBuilder),
{
	if TABLE.get().is_some() {
		return Err(RegistryError::AlreadyInitialized);
	}

	let mut builder = LegacyKeyTableBuilder::with_builtins();
	extend(&mut builder);
	let built = builder.build();
	let (len, unresolved) = (built.len(), built.unresolved().count());

	TABLE.set(built).map_err(|_| RegistryError::AlreadyInitialized)?;
	tracing::debug!(bindings = len, unresolved, "legacy key table initialized");
	Ok(table())
}

/// Returns the global legacy key table.
pub fn table() -> &'static LegacyKeyTable {
	TABLE.get_or_init(|| {
		tracing::debug!("legacy key table read before initialize; using built-ins only");
		LegacyKeyTable::builtin()
	})
}

/// Returns the global value type resolver.
pub fn resolver() -> &'static ValueTypeResolver {
	&RESOLVER
}

/// Returns the first global binding registered under `legacy_name`.
pub fn lookup_by_legacy_name(legacy_name: &str) -> Option<&'static Binding> {
	table().lookup(legacy_name)
}

/// Returns every global binding in registration order.
pub fn all_bindings() -> std::slice::Iter<'static, Binding> {
	table().all_bindings()
}

/// Returns the value type bound to `key_type`, cached process-wide.
pub fn value_type_of(key_type: KeyType) -> Result<ValueType> {
	RESOLVER.value_type_of(key_type)
}
