//! Key types and value-type descriptors.
//!
//! A key type is a zero-sized marker addressing one slot of an annotation map.
//! Each marker carries a static [`KeyTypeDef`] that names it, identifies it by
//! [`TypeId`] and declares the [`ValueType`] its slot holds. Code that only has
//! an erased [`KeyType`] handle can still read that binding without knowing
//! the marker type.

use std::any::{Any, TypeId};
use std::hash::{Hash, Hasher};

/// Inspectable descriptor of a Rust value type.
#[derive(Clone, Copy)]
pub struct ValueType {
	type_id: fn() -> TypeId,
	type_name: fn() -> &'static str,
}

impl ValueType {
	/// Returns the descriptor for `T`.
	pub const fn of<T: ?Sized + 'static>() -> Self {
		Self {
			type_id: TypeId::of::<T>,
			type_name: std::any::type_name::<T>,
		}
	}

	/// Returns the [`TypeId`] of the described type.
	pub fn id(&self) -> TypeId {
		(self.type_id)()
	}

	/// Returns the compiler-provided name of the described type.
	pub fn name(&self) -> &'static str {
		(self.type_name)()
	}

	/// Returns true if this descriptor describes `T`.
	pub fn is<T: ?Sized + 'static>(&self) -> bool {
		self.id() == TypeId::of::<T>()
	}
}

impl PartialEq for ValueType {
	fn eq(&self, other: &Self) -> bool {
		self.id() == other.id()
	}
}

impl Eq for ValueType {}

impl Hash for ValueType {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id().hash(state);
	}
}

impl core::fmt::Debug for ValueType {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_tuple("ValueType").field(&self.name()).finish()
	}
}

impl core::fmt::Display for ValueType {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(self.name())
	}
}

/// Where a key type was defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeySource {
	/// Shipped with this crate.
	Builtin,
	/// Defined in another crate.
	Crate(&'static str),
	/// Stand-in for a key type missing from this build.
	Placeholder,
}

impl core::fmt::Display for KeySource {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			Self::Builtin => write!(f, "builtin"),
			Self::Crate(name) => write!(f, "crate:{name}"),
			Self::Placeholder => write!(f, "placeholder"),
		}
	}
}

/// Static definition of a key type.
///
/// Normally produced by [`annotation_key!`](crate::annotation_key) or
/// [`extended_annotation_key!`](crate::extended_annotation_key).
#[derive(Debug)]
pub struct KeyTypeDef {
	/// Fully qualified name, e.g. `glossa_registry::keys::PartOfSpeech`.
	pub name: &'static str,
	/// Identity of the marker type.
	pub type_id: fn() -> TypeId,
	/// Declared value type. `None` marks a definition that never declared one.
	pub value: Option<ValueType>,
	/// Canonical legacy name, present only on extension key types.
	pub text_key: Option<&'static str>,
	/// Where the key type was defined.
	pub source: KeySource,
}

impl KeyTypeDef {
	/// Creates a definition for marker `K` bound to value type `V`.
	pub const fn new<K: 'static, V: ?Sized + 'static>(name: &'static str, source: KeySource) -> Self {
		Self {
			name,
			type_id: TypeId::of::<K>,
			value: Some(ValueType::of::<V>()),
			text_key: None,
			source,
		}
	}

	/// Creates a definition for marker `K` without a value-type binding.
	pub const fn undeclared<K: 'static>(name: &'static str, source: KeySource) -> Self {
		Self {
			name,
			type_id: TypeId::of::<K>,
			value: None,
			text_key: None,
			source,
		}
	}

	/// Attaches the extension capability.
	pub const fn with_text_key(mut self, text_key: &'static str) -> Self {
		self.text_key = Some(text_key);
		self
	}
}

struct Unresolved;

static UNRESOLVED_DEF: KeyTypeDef = KeyTypeDef::new::<Unresolved, dyn Any + Send + Sync>(
	"glossa_registry::Unresolved",
	KeySource::Placeholder,
);

/// Copyable handle to a key type definition.
///
/// Equality and hashing follow the marker's [`TypeId`], so two handles to the
/// same key type compare equal regardless of how they were obtained.
#[derive(Clone, Copy)]
pub struct KeyType(&'static KeyTypeDef);

impl KeyType {
	/// Placeholder bound in place of key types missing from this build.
	pub const UNRESOLVED: KeyType = KeyType(&UNRESOLVED_DEF);

	/// Wraps a static definition.
	pub const fn from_def(def: &'static KeyTypeDef) -> Self {
		Self(def)
	}

	/// Returns the handle for a typed key.
	pub const fn of<K: AnnotationKey + ?Sized>() -> Self {
		Self(K::DEF)
	}

	/// Returns the underlying definition.
	pub fn def(&self) -> &'static KeyTypeDef {
		self.0
	}

	/// Returns the identity of the key type.
	pub fn id(&self) -> TypeId {
		(self.0.type_id)()
	}

	/// Returns the fully qualified name.
	pub fn name(&self) -> &'static str {
		self.0.name
	}

	/// Returns the extension text key, if the key type exposes one.
	pub fn text_key(&self) -> Option<&'static str> {
		self.0.text_key
	}

	/// Returns where the key type was defined.
	pub fn source(&self) -> KeySource {
		self.0.source
	}

	/// Returns true for [`KeyType::UNRESOLVED`].
	pub fn is_placeholder(&self) -> bool {
		self.0.source == KeySource::Placeholder
	}

	/// Returns true if this handle refers to `K`.
	pub fn is<K: AnnotationKey>(&self) -> bool {
		self.id() == TypeId::of::<K>()
	}
}

impl PartialEq for KeyType {
	fn eq(&self, other: &Self) -> bool {
		self.id() == other.id()
	}
}

impl Eq for KeyType {}

impl Hash for KeyType {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id().hash(state);
	}
}

impl core::fmt::Debug for KeyType {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_tuple("KeyType").field(&self.name()).finish()
	}
}

impl core::fmt::Display for KeyType {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(self.name())
	}
}

/// A typed key into an annotation map.
pub trait AnnotationKey: 'static {
	/// Value stored under this key.
	type Value: Send + Sync + 'static;

	/// Static definition describing this key.
	const DEF: &'static KeyTypeDef;

	/// Returns the erased handle for this key.
	fn key_type() -> KeyType {
		KeyType::of::<Self>()
	}
}

/// A key type defined outside this crate that carries its own legacy name.
pub trait ExtendedAnnotationKey: AnnotationKey {
	/// Canonical legacy name of this key.
	const TEXT_KEY: &'static str;

	/// Returns [`Self::TEXT_KEY`].
	fn text_key() -> &'static str {
		Self::TEXT_KEY
	}
}
