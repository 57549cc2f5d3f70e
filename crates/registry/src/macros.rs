//! Declaration macros for key types.

/// Selects the text key of an extension declaration, if any.
#[doc(hidden)]
#[macro_export]
macro_rules! __key_text {
	() => {
		None
	};
	($text:literal) => {
		Some($text)
	};
}

/// Emits one key type: the marker struct, its static definition, the trait
/// impls and the catalog submission.
#[doc(hidden)]
#[macro_export]
macro_rules! __annotation_key {
	($source:expr; $(#[$attr:meta])* $vis:vis $name:ident: $value:ty $(=> $text:literal)?) => {
		$(#[$attr])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
		$vis struct $name;

		$crate::paste::paste! {
			#[doc(hidden)]
			#[allow(non_upper_case_globals)]
			static [<__KEY_DEF_ $name:upper>]: $crate::KeyTypeDef = $crate::KeyTypeDef {
				name: concat!(module_path!(), "::", stringify!($name)),
				type_id: ::std::any::TypeId::of::<$name>,
				value: Some($crate::ValueType::of::<$value>()),
				text_key: $crate::__key_text!($($text)?),
				source: $source,
			};

			impl $crate::AnnotationKey for $name {
				type Value = $value;
				const DEF: &'static $crate::KeyTypeDef = &[<__KEY_DEF_ $name:upper>];
			}

			$crate::inventory::submit! {
				$crate::KeyTypeReg(&[<__KEY_DEF_ $name:upper>])
			}
		}

		$(
			impl $crate::ExtendedAnnotationKey for $name {
				const TEXT_KEY: &'static str = $text;
			}
		)?
	};
}

/// Declares key types bound to value types.
///
/// Each declaration generates a zero-sized marker implementing
/// [`AnnotationKey`](crate::AnnotationKey) and links its definition into the
/// [`catalog`](crate::catalog) under `module_path!()::Name`.
///
/// # Example
///
/// ```ignore
/// annotation_key! {
///     /// Sentiment score of a sentence.
///     pub struct Sentiment: f64;
///     pub struct Topics: Vec<String>;
/// }
///
/// let key = Sentiment::key_type();
/// assert!(key.def().value.is_some_and(|v| v.is::<f64>()));
/// ```
#[macro_export]
macro_rules! annotation_key {
	($($(#[$attr:meta])* $vis:vis struct $name:ident: $value:ty;)*) => {
		$(
			$crate::__annotation_key!(
				$crate::KeySource::Crate(env!("CARGO_PKG_NAME"));
				$(#[$attr])* $vis $name: $value
			);
		)*
	};
}

/// Declares extension key types that carry their own legacy name.
///
/// On top of [`annotation_key!`](crate::annotation_key), this implements
/// [`ExtendedAnnotationKey`](crate::ExtendedAnnotationKey) so a host can push
/// `(key, text_key)` into a table builder without knowing the type up front.
///
/// ```ignore
/// extended_annotation_key! {
///     pub struct ChemicalMention: String = "chem";
/// }
/// ```
#[macro_export]
macro_rules! extended_annotation_key {
	($($(#[$attr:meta])* $vis:vis struct $name:ident: $value:ty = $text:literal;)*) => {
		$(
			$crate::__annotation_key!(
				$crate::KeySource::Crate(env!("CARGO_PKG_NAME"));
				$(#[$attr])* $vis $name: $value => $text
			);
		)*
	};
}
