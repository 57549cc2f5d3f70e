use proptest::prelude::*;
use rstest::rstest;

use super::*;
use crate::keys::{
	self, CharacterOffsetBegin, CharacterOffsetEnd, Chunk, DocId, Lemma, NamedEntityTag,
	OriginalText, PartOfSpeech, SentenceIndex, Shape, Stem, Text, Value, Web,
};

crate::extended_annotation_key! {
	struct TestAnnotation: String = "testAnnotation";
	struct LateEnd: usize = "endPosition";
}

#[rstest]
#[case("value", KeyType::of::<Value>())]
#[case("tag", KeyType::of::<PartOfSpeech>())]
#[case("pos", KeyType::of::<PartOfSpeech>())]
#[case("word", KeyType::of::<Text>())]
#[case("lemma", KeyType::of::<Lemma>())]
#[case("ner", KeyType::of::<NamedEntityTag>())]
#[case("current", KeyType::of::<OriginalText>())]
#[case("BEGIN_POS", KeyType::of::<CharacterOffsetBegin>())]
#[case("END_POS", KeyType::of::<CharacterOffsetEnd>())]
#[case("endPosition", KeyType::of::<CharacterOffsetEnd>())]
#[case("docID", KeyType::of::<DocId>())]
#[case("sentIndex", KeyType::of::<SentenceIndex>())]
#[case("web", KeyType::of::<Web>())]
fn builtin_lookup(#[case] legacy_name: &str, #[case] expected: KeyType) {
	let table = LegacyKeyTable::builtin();
	let binding = table.lookup(legacy_name).expect("builtin legacy name");
	assert_eq!(binding.key_type(), expected);
	assert_eq!(binding.legacy_name(), legacy_name);
}

#[test]
fn builtin_table_shape() {
	let table = LegacyKeyTable::builtin();
	assert_eq!(table.len(), keys::BUILTIN_COUNT);

	let names: Vec<&str> = table.all_bindings().map(Binding::legacy_name).collect();
	assert_eq!(names.first(), Some(&"value"));
	assert_eq!(names.last(), Some(&"pos"));
	assert_eq!(names.iter().position(|&n| n == "hw"), Some(6));
	assert_eq!(names.iter().position(|&n| n == "ht"), Some(7));
}

#[test]
fn pos_and_tag_share_key_type() {
	let table = LegacyKeyTable::builtin();
	assert_eq!(table.key_type("pos"), table.key_type("tag"));
	assert_eq!(
		table.legacy_names(KeyType::of::<PartOfSpeech>()).collect::<Vec<_>>(),
		vec!["tag", "pos"]
	);
	assert_eq!(table.legacy_name(KeyType::of::<CharacterOffsetEnd>()), Some("END_POS"));
}

#[test]
fn unknown_name_is_absent() {
	let table = LegacyKeyTable::builtin();
	assert!(table.lookup("testAnnotation").is_none());
	assert!(table.lookup("").is_none());
	assert!(table.lookup("POS").is_none());
}

#[test]
fn all_bindings_is_restartable() {
	let table = LegacyKeyTable::builtin();
	let first: Vec<_> = table.all_bindings().cloned().collect();
	let second: Vec<_> = (&table).into_iter().cloned().collect();
	assert_eq!(first, second);
	assert_eq!(table.all_bindings().len(), table.len());
}

#[test]
fn missing_key_type_binds_placeholder() {
	let mut builder = LegacyKeyTableBuilder::new();
	builder.register_key::<Text>("word");
	builder.register_by_name("some_plugin::keys::Missing", "missing");
	builder.register_key::<Lemma>("lemma");
	let table = builder.build();

	assert_eq!(table.len(), 3);
	let binding = table.lookup("missing").expect("placeholder binding is kept");
	assert!(binding.is_placeholder());
	assert_eq!(binding.key_type(), KeyType::UNRESOLVED);
	assert_eq!(binding.requested_name(), Some("some_plugin::keys::Missing"));
	assert_eq!(table.unresolved().count(), 1);
	assert_eq!(table.legacy_name(KeyType::UNRESOLVED), None);
}

#[test]
fn register_by_name_resolves_linked_key_types() {
	let mut builder = LegacyKeyTableBuilder::new();
	builder.register_by_name("glossa_registry::keys::Stem", "stem");
	builder.register_by_name("glossa_registry::table::tests::TestAnnotation", "testAnnotation");
	let table = builder.build();

	assert_eq!(table.key_type("stem"), Some(KeyType::of::<Stem>()));
	assert_eq!(table.key_type("testAnnotation"), Some(KeyType::of::<TestAnnotation>()));
	assert_eq!(table.unresolved().count(), 0);
}

#[test]
#[cfg(not(feature = "trees"))]
fn tree_keys_degrade_without_feature() {
	let table = LegacyKeyTable::builtin();
	for name in ["hw", "ht"] {
		let binding = table.lookup(name).expect("tree legacy names stay registered");
		assert!(binding.is_placeholder());
	}
	assert_eq!(table.unresolved().count(), 2);
}

#[test]
#[cfg(feature = "trees")]
fn tree_keys_resolve_with_feature() {
	let table = LegacyKeyTable::builtin();
	assert_eq!(table.key_type("hw"), Some(KeyType::of::<keys::trees::HeadWord>()));
	assert_eq!(table.key_type("ht"), Some(KeyType::of::<keys::trees::HeadTag>()));
	assert_eq!(table.unresolved().count(), 0);
}

#[test]
fn extensions_follow_builtins() {
	let mut builder = LegacyKeyTableBuilder::with_builtins();
	builder.register_extended::<TestAnnotation>();
	builder.register_extended::<LateEnd>();
	let table = builder.build();

	assert_eq!(table.len(), keys::BUILTIN_COUNT + 2);
	assert_eq!(table.key_type("testAnnotation"), Some(TestAnnotation::key_type()));

	// The builtin endPosition wins; the extension entry stays listed but unreachable by name.
	assert_eq!(table.key_type("endPosition"), Some(KeyType::of::<CharacterOffsetEnd>()));
	let listed = table
		.all_bindings()
		.filter(|b| b.legacy_name() == "endPosition")
		.map(Binding::key_type)
		.collect::<Vec<_>>();
	assert_eq!(listed, vec![KeyType::of::<CharacterOffsetEnd>(), LateEnd::key_type()]);
	assert_eq!(table.legacy_name(LateEnd::key_type()), Some("endPosition"));
}

const POOL: [KeyType; 5] = [
	KeyType::of::<Text>(),
	KeyType::of::<Lemma>(),
	KeyType::of::<Stem>(),
	KeyType::of::<Shape>(),
	KeyType::of::<Chunk>(),
];

proptest! {
	#[test]
	fn lookup_returns_first_registration(entries in prop::collection::vec((0usize..6, 0usize..POOL.len()), 0..32)) {
		let mut builder = LegacyKeyTableBuilder::new();
		for &(name, key) in &entries {
			builder.register(POOL[key], &format!("k{name}"));
		}
		let table = builder.build();
		prop_assert_eq!(table.len(), entries.len());

		for name in 0..6 {
			let expected = entries.iter().find(|(n, _)| *n == name).map(|&(_, key)| POOL[key]);
			prop_assert_eq!(table.key_type(&format!("k{name}")), expected);
		}
	}
}
