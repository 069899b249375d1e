use std::path::Path;

use log::debug;
use rand::Rng;

use crate::error::{NamegenError, Result};
use crate::io::{list_files, read_words};

/// A named list of lower-case words.
///
/// # Invariants
/// - Words are trimmed, lower-cased and never empty
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lexicon {
	name: String,
	words: Vec<String>,
}

impl Lexicon {
	/// Builds a lexicon from in-memory words, normalized like a file.
	pub fn from_words<I, S>(name: &str, words: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let words = words
			.into_iter()
			.map(|w| w.as_ref().trim().to_lowercase())
			.filter(|w| !w.is_empty())
			.collect();
		Self { name: name.to_owned(), words }
	}

	/// Loads a line-delimited word list.
	///
	/// The lexicon is named after the file stem.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		let name = path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
		let lexicon = Self { name, words: read_words(path)? };
		debug!("loaded {} words from {}", lexicon.len(), path.display());
		Ok(lexicon)
	}

	/// Loads and concatenates every file matching a glob pattern, in path
	/// order.
	///
	/// A pattern matching no file gives an empty lexicon.
	pub fn load_glob(name: &str, pattern: &str) -> Result<Self> {
		let mut lexicon = Self { name: name.to_owned(), words: Vec::new() };
		for path in list_files(pattern)? {
			lexicon.words.extend(Self::load(&path)?.words);
		}
		Ok(lexicon)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn words(&self) -> &[String] {
		&self.words
	}

	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	/// Picks a word uniformly.
	///
	/// # Errors
	/// Returns `EmptyLexicon` if the lexicon has no word.
	pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&str> {
		if self.words.is_empty() {
			return Err(NamegenError::EmptyLexicon(self.name.clone()));
		}
		Ok(&self.words[rng.random_range(0..self.words.len())])
	}
}

/// Every word list used to compose names.
///
/// Files are looked up under a data directory:
///
/// ```text
/// data/
/// ├── animals.txt
/// ├── countries.txt
/// ├── prefixes.txt
/// ├── adjectives/*.txt
/// ├── adverbs/*.txt
/// ├── uncountable_nouns/*.txt
/// └── verbs/*.txt
/// ```
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
	pub animals: Lexicon,
	pub adjectives: Lexicon,
	pub adverbs: Lexicon,
	pub uncountable_nouns: Lexicon,
	pub verbs: Lexicon,
	pub prefixes: Lexicon,
	pub countries: Lexicon,
}

impl Vocabulary {
	/// Loads all lexicons from `data_dir`.
	///
	/// # Errors
	/// Returns an error if a single-file lexicon is missing or unreadable.
	pub fn load<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
		let data_dir = data_dir.as_ref();
		let folder = glob::Pattern::escape(&data_dir.to_string_lossy());
		let pattern = |sub: &str| format!("{folder}/{sub}/*.txt");

		Ok(Self {
			animals: Lexicon::load(data_dir.join("animals.txt"))?,
			adjectives: Lexicon::load_glob("adjectives", &pattern("adjectives"))?,
			adverbs: Lexicon::load_glob("adverbs", &pattern("adverbs"))?,
			uncountable_nouns: Lexicon::load_glob("uncountable_nouns", &pattern("uncountable_nouns"))?,
			verbs: Lexicon::load_glob("verbs", &pattern("verbs"))?,
			prefixes: Lexicon::load(data_dir.join("prefixes.txt"))?,
			countries: Lexicon::load(data_dir.join("countries.txt"))?,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn test_from_words_normalizes() {
		let lexicon = Lexicon::from_words("test", ["  Canada ", "", "CUBA", "   "]);
		assert_eq!(lexicon.words(), &["canada".to_owned(), "cuba".to_owned()]);
		assert_eq!(lexicon.name(), "test");
	}

	#[test]
	fn test_load_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("animals.txt");
		std::fs::write(&path, "Fox\nBadger\n\nOwl\n").unwrap();

		let lexicon = Lexicon::load(&path).unwrap();
		assert_eq!(lexicon.name(), "animals");
		assert_eq!(lexicon.len(), 3);
		assert_eq!(lexicon.words()[1], "badger");
	}

	#[test]
	fn test_load_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		assert!(matches!(Lexicon::load(dir.path().join("nope.txt")), Err(NamegenError::Io(_))));
	}

	#[test]
	fn test_load_glob_concatenates_in_order() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("b.txt"), "second").unwrap();
		std::fs::write(dir.path().join("a.txt"), "first").unwrap();

		let pattern = format!("{}/*.txt", dir.path().display());
		let lexicon = Lexicon::load_glob("verbs", &pattern).unwrap();
		assert_eq!(lexicon.words(), &["first".to_owned(), "second".to_owned()]);
		assert_eq!(lexicon.name(), "verbs");
	}

	#[test]
	fn test_choose() {
		let lexicon = Lexicon::from_words("one", ["only"]);
		let mut rng = StdRng::seed_from_u64(0);
		assert_eq!(lexicon.choose(&mut rng).unwrap(), "only");

		let empty = Lexicon::from_words("empty", Vec::<String>::new());
		assert!(matches!(empty.choose(&mut rng), Err(NamegenError::EmptyLexicon(name)) if name == "empty"));
	}
}
