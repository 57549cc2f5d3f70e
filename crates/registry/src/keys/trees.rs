//! Tree annotations, compiled in with the `trees` feature.

builtin_keys! {
	/// Head word of a constituent.
	HeadWord: String;
	/// Part-of-speech tag of the head word.
	HeadTag: String;
}
