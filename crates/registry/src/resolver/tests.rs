use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Barrier;

use super::*;
use crate::key::{AnnotationKey, KeySource, KeyTypeDef};
use crate::keys::{CharacterOffsetBegin, Idf, PartOfSpeech, Text};

/// Counts derivations while delegating to the declared binding.
#[derive(Default)]
struct Counting {
	calls: AtomicUsize,
}

impl BindingSource for Counting {
	fn value_type(&self, key_type: KeyType) -> std::result::Result<ValueType, BindingError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		DeclaredBinding.value_type(key_type)
	}
}

/// Refuses to bind [`Text`] and delegates everything else.
struct RejectText;

impl BindingSource for RejectText {
	fn value_type(&self, key_type: KeyType) -> std::result::Result<ValueType, BindingError> {
		if key_type.is::<Text>() {
			return Err(BindingError::Rejected("text slots are disabled".to_string()));
		}
		DeclaredBinding.value_type(key_type)
	}
}

struct Broken;

static BROKEN_DEF: KeyTypeDef = KeyTypeDef::undeclared::<Broken>("tests::Broken", KeySource::Crate("tests"));

#[test]
fn declared_value_types() {
	let resolver = ValueTypeResolver::new();
	assert_eq!(resolver.value_type_of(PartOfSpeech::key_type()), Ok(ValueType::of::<String>()));
	assert_eq!(resolver.value_type_of(CharacterOffsetBegin::key_type()), Ok(ValueType::of::<usize>()));
	assert_eq!(resolver.value_type_of(Idf::key_type()), Ok(ValueType::of::<f64>()));
}

#[test]
fn second_query_hits_cache() {
	let resolver = ValueTypeResolver::with_source(Counting::default());
	let key = PartOfSpeech::key_type();

	let first = resolver.value_type_of(key).expect("declared");
	let second = resolver.value_type_of(key).expect("declared");

	assert_eq!(first, second);
	assert_eq!(resolver.source().calls.load(Ordering::SeqCst), 1);
	assert_eq!(resolver.cached_len(), 1);
}

#[test]
fn cache_grows_once_per_distinct_key() {
	let resolver = ValueTypeResolver::with_source(Counting::default());
	for _ in 0..3 {
		resolver.value_type_of(PartOfSpeech::key_type()).expect("declared");
		resolver.value_type_of(Text::key_type()).expect("declared");
	}
	assert_eq!(resolver.cached_len(), 2);
	assert_eq!(resolver.source().calls.load(Ordering::SeqCst), 2);
}

#[test]
fn placeholder_resolves_to_opaque_value() {
	let resolver = ValueTypeResolver::new();
	let value = resolver.value_type_of(KeyType::UNRESOLVED).expect("placeholder declares a value type");
	assert!(value.is::<dyn std::any::Any + Send + Sync>());
}

#[test]
fn undeclared_binding_is_malformed() {
	let resolver = ValueTypeResolver::new();
	let err = resolver
		.value_type_of(KeyType::from_def(&BROKEN_DEF))
		.expect_err("no value type declared");

	assert_eq!(
		err,
		RegistryError::KeyTypeMalformed {
			key: "tests::Broken",
			cause: BindingError::Undeclared,
		}
	);
	assert_eq!(err.to_string(), "malformed key type tests::Broken: no value type declared");
	assert_eq!(resolver.cached_len(), 0);
}

#[test]
fn rejected_binding_is_malformed() {
	let resolver = ValueTypeResolver::with_source(RejectText);
	let err = resolver.value_type_of(Text::key_type()).expect_err("source rejects text");

	assert_eq!(
		err,
		RegistryError::KeyTypeMalformed {
			key: "glossa_registry::keys::Text",
			cause: BindingError::Rejected("text slots are disabled".to_string()),
		}
	);
	assert_eq!(
		err.to_string(),
		"malformed key type glossa_registry::keys::Text: text slots are disabled"
	);
	assert_eq!(resolver.value_type_of(PartOfSpeech::key_type()), Ok(ValueType::of::<String>()));
	assert_eq!(resolver.cached_len(), 1);
}

#[test]
fn malformed_errors_are_not_cached() {
	let resolver = ValueTypeResolver::with_source(Counting::default());
	let broken = KeyType::from_def(&BROKEN_DEF);
	assert!(resolver.value_type_of(broken).is_err());
	assert!(resolver.value_type_of(broken).is_err());
	assert_eq!(resolver.source().calls.load(Ordering::SeqCst), 2);
}

#[test]
fn concurrent_first_queries_settle() {
	const READERS: usize = 16;
	let resolver = ValueTypeResolver::with_source(Counting::default());
	let barrier = Barrier::new(READERS);
	let key = PartOfSpeech::key_type();

	let results: Vec<ValueType> = std::thread::scope(|scope| {
		let handles: Vec<_> = (0..READERS)
			.map(|_| {
				scope.spawn(|| {
					barrier.wait();
					resolver.value_type_of(key).expect("declared")
				})
			})
			.collect();
		handles.into_iter().map(|h| h.join().expect("reader panicked")).collect()
	});

	assert!(results.iter().all(|v| *v == ValueType::of::<String>()));
	assert_eq!(resolver.cached_len(), 1);
	let calls = resolver.source().calls.load(Ordering::SeqCst);
	assert!((1..=READERS).contains(&calls));
}
