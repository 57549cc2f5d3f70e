//! Configuration for glossa.
//!
//! The registry never reads configuration itself. This crate is the host side
//! of the extension bridge: it reads the list of external annotation key types
//! a deployment wants, resolves each through the key type catalog and pushes
//! `(key, text_key)` registrations into a table builder before the table is
//! frozen.
//!
//! Two input shapes are accepted. TOML:
//!
//! ```toml
//! [annotations]
//! external = [
//!     "bio_ner::keys::ChemicalMention",
//!     "bio_ner::keys::GeneMention",
//! ]
//! ```
//!
//! and flat property pairs as used by older deployments:
//!
//! ```text
//! externalAnnotation.1 = bio_ner::keys::ChemicalMention
//! externalAnnotation.2 = bio_ner::keys::GeneMention
//! ```
//!
//! Property entries are ordered by their numeric suffix. Malformed entries and
//! duplicates are collected in [`Config::warnings`] instead of failing.

pub mod error;

use std::path::Path;

pub use error::{ConfigError, ConfigWarning, Result};
use glossa_registry::{KeyType, LegacyKeyTable, LegacyKeyTableBuilder, catalog};
use serde::Deserialize;

/// Property prefix declaring an external annotation key type.
pub const EXTERNAL_ANNOTATION_PREFIX: &str = "externalAnnotation.";

/// Parsed configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Annotation settings.
	pub annotations: AnnotationsConfig,
	/// Non-fatal warnings encountered during parsing.
	#[serde(skip)]
	pub warnings: Vec<ConfigWarning>,
}

/// The `[annotations]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnotationsConfig {
	/// Qualified names of external annotation key types, in registration order.
	pub external: Vec<String>,
}

impl Config {
	/// Parse a TOML string into a [`Config`].
	pub fn parse(input: &str) -> Result<Self> {
		let mut config: Config = toml::from_str(input)?;
		let declared = std::mem::take(&mut config.annotations.external);
		config.push_external(declared);
		Ok(config)
	}

	/// Load configuration from a TOML file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::parse(&content)
	}

	/// Build a [`Config`] from `externalAnnotation.<n>` property pairs.
	///
	/// Properties without the prefix are ignored.
	pub fn from_properties<I, K, V>(properties: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let mut config = Config::default();
		let mut indexed: Vec<(u32, String)> = Vec::new();

		for (key, value) in properties {
			let (key, value) = (key.as_ref(), value.as_ref().trim());
			let Some(suffix) = key.strip_prefix(EXTERNAL_ANNOTATION_PREFIX) else {
				continue;
			};
			let Ok(index) = suffix.parse::<u32>() else {
				config.warnings.push(ConfigWarning::InvalidPropertyIndex(key.to_string()));
				continue;
			};
			if value.is_empty() {
				config.warnings.push(ConfigWarning::EmptyExtension(key.to_string()));
				continue;
			}
			indexed.push((index, value.to_string()));
		}

		indexed.sort_by_key(|(index, _)| *index);
		config.push_external(indexed.into_iter().map(|(_, name)| name));
		config
	}

	/// Merge another config into this one.
	///
	/// External annotations from `other` are appended after the ones already
	/// declared.
	pub fn merge(&mut self, other: Config) {
		self.warnings.extend(other.warnings);
		self.push_external(other.annotations.external);
	}

	fn push_external(&mut self, names: impl IntoIterator<Item = String>) {
		for name in names {
			if self.annotations.external.contains(&name) {
				self.warnings.push(ConfigWarning::DuplicateExtension(name));
			} else {
				self.annotations.external.push(name);
			}
		}
	}

	/// Resolves every declared external annotation in the key type catalog.
	///
	/// Fails on the first name that is not linked into this build or that has
	/// no text key.
	pub fn resolve_extensions(&self) -> Result<Vec<KeyType>> {
		self.annotations
			.external
			.iter()
			.map(|name| {
				let key = catalog::find(name).ok_or_else(|| ConfigError::UnknownKeyType(name.clone()))?;
				if key.text_key().is_none() {
					return Err(ConfigError::NotExtended(name.clone()));
				}
				Ok(key)
			})
			.collect()
	}

	/// Registers every declared external annotation under its text key.
	///
	/// Nothing is registered unless every name resolves.
	pub fn install_extensions(&self, builder: &mut LegacyKeyTableBuilder) -> Result<Vec<KeyType>> {
		let keys = self.resolve_extensions()?;
		register_extensions(builder, &keys);
		Ok(keys)
	}

	/// Builds the global legacy key table with the built-ins plus this
	/// configuration's external annotations.
	pub fn initialize_registry(&self) -> Result<&'static LegacyKeyTable> {
		let keys = self.resolve_extensions()?;
		let table = glossa_registry::initialize_with(|builder| register_extensions(builder, &keys))?;
		Ok(table)
	}
}

fn register_extensions(builder: &mut LegacyKeyTableBuilder, keys: &[KeyType]) {
	for key in keys {
		if let Some(text_key) = key.text_key() {
			tracing::debug!(key = key.name(), text_key, "registering external annotation");
			builder.register(*key, text_key);
		}
	}
}
