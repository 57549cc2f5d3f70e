//! Link-time catalog of every key type compiled into the process.
//!
//! Key types submit themselves through `inventory` when declared with the
//! registry macros, so resolving a qualified name is a hash lookup and a key
//! type whose crate or feature is absent simply is not found.

use std::collections::hash_map::Entry;
use std::sync::LazyLock;

use rustc_hash::FxHashMap as HashMap;

use crate::key::{KeyType, KeyTypeDef};

/// Catalog submission for one key type definition.
pub struct KeyTypeReg(pub &'static KeyTypeDef);

inventory::collect!(KeyTypeReg);

static CATALOG: LazyLock<HashMap<&'static str, KeyType>> =
	LazyLock::new(|| index(inventory::iter::<KeyTypeReg>.into_iter().map(|reg| reg.0)));

/// Indexes definitions by qualified name. The first definition submitted
/// under a name is kept.
fn index(defs: impl IntoIterator<Item = &'static KeyTypeDef>) -> HashMap<&'static str, KeyType> {
	let mut map = HashMap::default();
	for def in defs {
		let key = KeyType::from_def(def);
		match map.entry(key.name()) {
			Entry::Vacant(slot) => {
				slot.insert(key);
			}
			Entry::Occupied(slot) => {
				tracing::warn!(
					name = key.name(),
					kept = %slot.get().source(),
					ignored = %key.source(),
					"duplicate key type name in catalog; keeping the first"
				);
			}
		}
	}
	map
}

/// Resolves a key type by its fully qualified name.
pub fn find(qualified_name: &str) -> Option<KeyType> {
	CATALOG.get(qualified_name).copied()
}

/// Returns every linked key type, ordered by qualified name.
pub fn all() -> Vec<KeyType> {
	let mut keys: Vec<KeyType> = CATALOG.values().copied().collect();
	keys.sort_by_key(|k| k.name());
	keys
}

/// Returns every linked key type exposing the extension capability.
pub fn extensions() -> impl Iterator<Item = KeyType> {
	all().into_iter().filter(|k| k.text_key().is_some())
}
