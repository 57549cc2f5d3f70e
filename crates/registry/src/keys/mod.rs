//! Built-in key types and their legacy names.

use crate::key::KeyType;
use crate::table::LegacyKeyTableBuilder;

macro_rules! builtin_keys {
	($($(#[$attr:meta])* $name:ident: $value:ty;)*) => {
		$(
			$crate::__annotation_key!($crate::KeySource::Builtin; $(#[$attr])* pub $name: $value);
		)*
	};
}

#[cfg(feature = "trees")]
pub mod trees;

builtin_keys! {
	/// Label value of a token or tree node.
	Value: String;
	/// Part-of-speech tag.
	PartOfSpeech: String;
	/// Token text.
	Text: String;
	/// Lemma of the token.
	Lemma: String;
	/// Syntactic category.
	Category: String;
	/// Projected syntactic category.
	ProjectedCategory: String;
	/// 1-based token index within its sentence.
	Index: usize;
	Argument: String;
	Marking: String;
	SemanticHeadWord: String;
	SemanticHeadTag: String;
	VerbSense: String;
	CategoryFunctionalTag: String;
	/// Named entity tag.
	NamedEntityTag: String;
	/// Word shape feature.
	Shape: String;
	LeftTerm: String;
	Parent: String;
	/// Token span as `(begin, end)` token indices.
	Span: (usize, usize);
	/// Whitespace preceding the token.
	Before: String;
	/// Whitespace following the token.
	After: String;
	/// Token text before normalization.
	OriginalText: String;
	/// Classifier answer.
	Answer: String;
	/// Gold-standard answer.
	GoldAnswer: String;
	Features: Vec<String>;
	Interpretation: String;
	/// Semantic role label.
	Role: String;
	Gazetteer: Vec<String>;
	Stem: String;
	Polarity: String;
	ChineseChar: String;
	/// Segmentation present in the original text.
	ChineseOrigSeg: String;
	/// Segmentation produced by the segmenter.
	ChineseSeg: String;
	/// Character offset of the first character.
	CharacterOffsetBegin: usize;
	/// Character offset one past the last character.
	CharacterOffsetEnd: usize;
	DocId: String;
	SentenceIndex: usize;
	/// Inverse document frequency.
	Idf: f64;
	Chunk: String;
	/// Normalized form of a named entity (dates, numbers).
	NormalizedNamedEntityTag: String;
	MorphoNum: String;
	MorphoPers: String;
	MorphoGen: String;
	MorphoCase: String;
	WordnetSyn: String;
	Proto: String;
	DocTitle: String;
	DocType: String;
	DocDate: String;
	DocSourceType: String;
	Link: String;
	Speaker: String;
	Author: String;
	Section: String;
	SectionId: String;
	SectionDate: String;
	HeadWordString: String;
	Governor: String;
	Gaz: String;
	Abbr: String;
	Abstr: String;
	Freq: String;
	Web: String;
}

/// Qualified name of the optional head-word key.
pub const HEAD_WORD: &str = "glossa_registry::keys::trees::HeadWord";
/// Qualified name of the optional head-tag key.
pub const HEAD_TAG: &str = "glossa_registry::keys::trees::HeadTag";

enum Builtin {
	Key(KeyType, &'static str),
	ByName(&'static str, &'static str),
}

const fn key<K: crate::AnnotationKey>(legacy: &'static str) -> Builtin {
	Builtin::Key(KeyType::of::<K>(), legacy)
}

/// The built-in legacy table, in registration order.
///
/// `tag` and `pos` both address [`PartOfSpeech`]; `END_POS` and `endPosition`
/// both address [`CharacterOffsetEnd`].
const BUILTINS: &[Builtin] = &[
	key::<Value>("value"),
	key::<PartOfSpeech>("tag"),
	key::<Text>("word"),
	key::<Lemma>("lemma"),
	key::<Category>("cat"),
	key::<ProjectedCategory>("pcat"),
	Builtin::ByName(HEAD_WORD, "hw"),
	Builtin::ByName(HEAD_TAG, "ht"),
	key::<Index>("idx"),
	key::<Argument>("arg"),
	key::<Marking>("mark"),
	key::<SemanticHeadWord>("shw"),
	key::<SemanticHeadTag>("shp"),
	key::<VerbSense>("vs"),
	key::<CategoryFunctionalTag>("cft"),
	key::<NamedEntityTag>("ner"),
	key::<Shape>("shape"),
	key::<LeftTerm>("LEFT_TERM"),
	key::<Parent>("PARENT"),
	key::<Span>("SPAN"),
	key::<Before>("before"),
	key::<After>("after"),
	key::<OriginalText>("current"),
	key::<Answer>("answer"),
	key::<GoldAnswer>("goldAnswer"),
	key::<Features>("features"),
	key::<Interpretation>("interpretation"),
	key::<Role>("srl"),
	key::<Gazetteer>("gazetteer"),
	key::<Stem>("stem"),
	key::<Polarity>("polarity"),
	key::<ChineseChar>("char"),
	key::<ChineseOrigSeg>("orig_seg"),
	key::<ChineseSeg>("seg"),
	key::<CharacterOffsetBegin>("BEGIN_POS"),
	key::<CharacterOffsetEnd>("END_POS"),
	key::<DocId>("docID"),
	key::<SentenceIndex>("sentIndex"),
	key::<Idf>("idf"),
	key::<CharacterOffsetEnd>("endPosition"),
	key::<Chunk>("chunk"),
	key::<NormalizedNamedEntityTag>("normalized"),
	key::<MorphoNum>("num"),
	key::<MorphoPers>("pers"),
	key::<MorphoGen>("gen"),
	key::<MorphoCase>("case"),
	key::<WordnetSyn>("wordnetsyn"),
	key::<Proto>("proto"),
	key::<DocTitle>("doctitle"),
	key::<DocType>("doctype"),
	key::<DocDate>("docdate"),
	key::<DocSourceType>("docsourcetype"),
	key::<Link>("link"),
	key::<Speaker>("speaker"),
	key::<Author>("author"),
	key::<Section>("section"),
	key::<SectionId>("sectionID"),
	key::<SectionDate>("sectionDate"),
	key::<HeadWordString>("head"),
	key::<Governor>("governor"),
	key::<Gaz>("gaz"),
	key::<Abbr>("abbr"),
	key::<Abstr>("abstr"),
	key::<Freq>("freq"),
	key::<Web>("web"),
	key::<PartOfSpeech>("pos"),
];

/// Number of entries in the built-in table.
pub const BUILTIN_COUNT: usize = BUILTINS.len();

/// Registers the built-in legacy names with the provided builder.
pub fn register_builtins(builder: &mut LegacyKeyTableBuilder) {
	for entry in BUILTINS {
		match *entry {
			Builtin::Key(key, legacy) => builder.register(key, legacy),
			Builtin::ByName(qualified, legacy) => builder.register_by_name(qualified, legacy),
		}
	}
}
