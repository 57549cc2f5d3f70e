//! Annotation key registry.
//!
//! Annotations live in a heterogeneous map keyed by key types, each statically
//! bound to one value type. This crate supplies the facts other code needs to
//! bridge that map with the older flat, string-keyed scheme:
//!
//! - [`key`]: key types ([`KeyType`], [`AnnotationKey`]) and value-type
//!   descriptors ([`ValueType`])
//! - [`catalog`]: every key type linked into the process, by qualified name
//! - [`table`]: the legacy key table mapping legacy names to key types
//! - [`resolver`]: memoized key type to value type resolution
//! - [`keys`]: built-in key types and the built-in legacy names
//! - [`map`]: a minimal annotation map with a legacy-name bridge
//!
//! # Extensions
//!
//! Crates outside this one declare their own key types with
//! [`extended_annotation_key!`]. A host that reads extension names from
//! configuration resolves them through [`catalog::find`] and registers each
//! under its [`KeyType::text_key`] before the table is frozen:
//!
//! ```ignore
//! glossa_registry::initialize_with(|builder| {
//!     for name in &config.external {
//!         if let Some(key) = glossa_registry::catalog::find(name) {
//!             builder.register(key, key.text_key().unwrap_or(key.name()));
//!         }
//!     }
//! })?;
//! ```
//!
//! Once registered, extension keys are indistinguishable from built-ins.

pub mod catalog;
mod db;
pub mod error;
pub mod key;
pub mod keys;
mod macros;
pub mod map;
pub mod resolver;
pub mod table;

#[doc(hidden)]
pub use inventory;
#[doc(hidden)]
pub use paste;

pub use catalog::KeyTypeReg;
pub use db::{
	all_bindings, initialize, initialize_with, lookup_by_legacy_name, resolver, table,
	value_type_of,
};
pub use error::{BindingError, RegistryError, Result};
pub use key::{AnnotationKey, ExtendedAnnotationKey, KeySource, KeyType, KeyTypeDef, ValueType};
pub use map::{AnnotationMap, MapError};
pub use resolver::{BindingSource, DeclaredBinding, ValueTypeResolver};
pub use table::{Binding, LegacyKeyTable, LegacyKeyTableBuilder};
