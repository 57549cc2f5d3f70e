//! Heterogeneous annotation map keyed by key types.
//!
//! Typed access goes through [`AnnotationKey`] markers. The legacy bridge
//! translates flat names through a [`LegacyKeyTable`] and uses the
//! [`ValueTypeResolver`] to parse and render values it only sees as text.

use std::any::{Any, TypeId};

use rustc_hash::FxHashMap as HashMap;
use thiserror::Error;

use crate::error::RegistryError;
use crate::key::{AnnotationKey, KeyType, ValueType};
use crate::resolver::{BindingSource, ValueTypeResolver};
use crate::table::LegacyKeyTable;

/// Erased annotation value.
pub type AnyValue = dyn Any + Send + Sync;

/// Errors from the legacy bridge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
	/// No binding exists for the legacy name.
	#[error("unknown legacy key: {0}")]
	UnknownLegacyName(String),
	/// The legacy name is bound to a placeholder key type.
	#[error("legacy key {0} is not available in this build")]
	Unavailable(String),
	/// The value type has no text form.
	#[error("no text form for value type {0}")]
	Unsupported(ValueType),
	/// The text does not parse as the bound value type.
	#[error("invalid {value_type} value for {name}: {text:?}")]
	Parse {
		/// Legacy name being set.
		name: String,
		/// Value type the text was parsed as.
		value_type: ValueType,
		/// Offending input.
		text: String,
	},
	/// The stored value has no text form that parses back to it.
	#[error("{value_type} value under {name} has no text form")]
	Unencodable {
		/// Legacy name being rendered.
		name: String,
		/// Value type of the stored value.
		value_type: ValueType,
	},
	/// Value type resolution failed.
	#[error(transparent)]
	Registry(#[from] RegistryError),
}

struct Slot {
	key_type: KeyType,
	value: Box<AnyValue>,
}

/// Map from key types to values of their bound value types.
#[derive(Default)]
pub struct AnnotationMap {
	slots: HashMap<TypeId, Slot>,
}

impl AnnotationMap {
	/// Creates an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the number of populated slots.
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	/// Returns true if no slot is populated.
	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	/// Stores `value` under `K`, returning the previous value.
	pub fn set<K: AnnotationKey>(&mut self, value: K::Value) -> Option<K::Value> {
		let slot = Slot {
			key_type: K::key_type(),
			value: Box::new(value),
		};
		self.slots
			.insert(TypeId::of::<K>(), slot)
			.and_then(|old| old.value.downcast::<K::Value>().ok())
			.map(|old| *old)
	}

	/// Returns the value stored under `K`.
	pub fn get<K: AnnotationKey>(&self) -> Option<&K::Value> {
		self.slots
			.get(&TypeId::of::<K>())
			.and_then(|slot| slot.value.downcast_ref::<K::Value>())
	}

	/// Removes and returns the value stored under `K`.
	pub fn remove<K: AnnotationKey>(&mut self) -> Option<K::Value> {
		self.slots
			.remove(&TypeId::of::<K>())
			.and_then(|slot| slot.value.downcast::<K::Value>().ok())
			.map(|value| *value)
	}

	/// Returns true if `key_type` has a value.
	pub fn contains(&self, key_type: KeyType) -> bool {
		self.slots.contains_key(&key_type.id())
	}

	/// Returns the populated key types in arbitrary order.
	pub fn key_types(&self) -> impl Iterator<Item = KeyType> + '_ {
		self.slots.values().map(|slot| slot.key_type)
	}

	/// Returns the erased value stored under `key_type`.
	pub fn get_erased(&self, key_type: KeyType) -> Option<&AnyValue> {
		self.slots.get(&key_type.id()).map(|slot| slot.value.as_ref())
	}

	/// Returns the erased value addressed by a legacy name.
	pub fn get_legacy(&self, table: &LegacyKeyTable, legacy_name: &str) -> Option<&AnyValue> {
		let binding = table.lookup(legacy_name)?;
		if binding.is_placeholder() {
			return None;
		}
		self.get_erased(binding.key_type())
	}

	/// Parses `text` as the value type bound to `legacy_name` and stores it.
	pub fn set_legacy_text<S: BindingSource>(
		&mut self,
		table: &LegacyKeyTable,
		resolver: &ValueTypeResolver<S>,
		legacy_name: &str,
		text: &str,
	) -> Result<(), MapError> {
		let key_type = bridge_key(table, legacy_name)?;
		let value_type = resolver.value_type_of(key_type)?;
		let value = parse_text(value_type, text).ok_or_else(|| {
			if text_codec(value_type).is_none() {
				MapError::Unsupported(value_type)
			} else {
				MapError::Parse {
					name: legacy_name.to_string(),
					value_type,
					text: text.to_string(),
				}
			}
		})?;
		self.slots.insert(key_type.id(), Slot { key_type, value });
		Ok(())
	}

	/// Renders the value addressed by `legacy_name` as text.
	///
	/// Returns `Ok(None)` when the slot is empty. The text parses back through
	/// [`set_legacy_text`](Self::set_legacy_text) to an equal value.
	pub fn render_legacy<S: BindingSource>(
		&self,
		table: &LegacyKeyTable,
		resolver: &ValueTypeResolver<S>,
		legacy_name: &str,
	) -> Result<Option<String>, MapError> {
		let key_type = bridge_key(table, legacy_name)?;
		let value_type = resolver.value_type_of(key_type)?;
		let Some(value) = self.get_erased(key_type) else {
			return Ok(None);
		};
		let codec = text_codec(value_type).ok_or(MapError::Unsupported(value_type))?;
		(codec.render)(value)
			.map(Some)
			.ok_or_else(|| MapError::Unencodable {
				name: legacy_name.to_string(),
				value_type,
			})
	}
}

impl core::fmt::Debug for AnnotationMap {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_set()
			.entries(self.slots.values().map(|slot| slot.key_type))
			.finish()
	}
}

fn bridge_key(table: &LegacyKeyTable, legacy_name: &str) -> Result<KeyType, MapError> {
	let binding = table
		.lookup(legacy_name)
		.ok_or_else(|| MapError::UnknownLegacyName(legacy_name.to_string()))?;
	if binding.is_placeholder() {
		return Err(MapError::Unavailable(legacy_name.to_string()));
	}
	Ok(binding.key_type())
}

struct TextCodec {
	parse: fn(&str) -> Option<Box<AnyValue>>,
	render: fn(&AnyValue) -> Option<String>,
}

macro_rules! scalar_codec {
	($ty:ty) => {
		TextCodec {
			parse: |text| text.trim().parse::<$ty>().ok().map(|v| Box::new(v) as Box<AnyValue>),
			render: |value| value.downcast_ref::<$ty>().map(ToString::to_string),
		}
	};
}

const STRING_CODEC: TextCodec = TextCodec {
	parse: |text| Some(Box::new(text.to_string()) as Box<AnyValue>),
	render: |value| value.downcast_ref::<String>().cloned(),
};

const LIST_CODEC: TextCodec = TextCodec {
	parse: |text| split_list(text).map(|items| Box::new(items) as Box<AnyValue>),
	render: |value| value.downcast_ref::<Vec<String>>().and_then(|items| join_list(items)),
};

/// Splits a comma-separated list. `\,` and `\\` escape a literal comma and
/// backslash; any other escape is rejected. Items are kept verbatim, empty
/// ones included, and an empty text is an empty list.
fn split_list(text: &str) -> Option<Vec<String>> {
	if text.is_empty() {
		return Some(Vec::new());
	}
	let mut items = Vec::new();
	let mut item = String::new();
	let mut chars = text.chars();
	while let Some(c) = chars.next() {
		match c {
			'\\' => match chars.next()? {
				escaped @ ('\\' | ',') => item.push(escaped),
				_ => return None,
			},
			',' => items.push(std::mem::take(&mut item)),
			c => item.push(c),
		}
	}
	items.push(item);
	Some(items)
}

/// Inverse of [`split_list`]. A list holding one empty item has no text form
/// distinct from the empty list.
fn join_list(items: &[String]) -> Option<String> {
	if let [only] = items
		&& only.is_empty()
	{
		return None;
	}
	let mut text = String::new();
	for (idx, item) in items.iter().enumerate() {
		if idx > 0 {
			text.push(',');
		}
		for c in item.chars() {
			if matches!(c, '\\' | ',') {
				text.push('\\');
			}
			text.push(c);
		}
	}
	Some(text)
}

fn text_codec(value_type: ValueType) -> Option<TextCodec> {
	let codec = if value_type.is::<String>() {
		STRING_CODEC
	} else if value_type.is::<Vec<String>>() {
		LIST_CODEC
	} else if value_type.is::<usize>() {
		scalar_codec!(usize)
	} else if value_type.is::<i32>() {
		scalar_codec!(i32)
	} else if value_type.is::<i64>() {
		scalar_codec!(i64)
	} else if value_type.is::<f64>() {
		scalar_codec!(f64)
	} else if value_type.is::<bool>() {
		scalar_codec!(bool)
	} else {
		return None;
	};
	Some(codec)
}

fn parse_text(value_type: ValueType, text: &str) -> Option<Box<AnyValue>> {
	text_codec(value_type).and_then(|codec| (codec.parse)(text))
}
