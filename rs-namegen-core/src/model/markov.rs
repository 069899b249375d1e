use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::context::Context;
use super::sampler::weighted_choice;
use super::transition_table::{Row, TransitionTable};
use crate::config::GenerationLimits;
use crate::error::{NamegenError, Result};
use crate::io::cache_path;
use crate::naming::lexicon::Lexicon;

/// Corpora smaller than this are trained on the calling thread.
const PARALLEL_THRESHOLD: usize = 4096;

fn default_max_length() -> usize {
	GenerationLimits::default().max_length
}

/// Character-level Markov model trained from a word list.
///
/// States are windows of `state_size` characters. Generation starts from
/// the START row and walks the chain until END is drawn, adding one
/// character per step.
///
/// The model is built once and never mutated afterwards, so it can be
/// shared read-only between callers.
///
/// # Invariants
/// - `state_size >= 1`
/// - Every context reachable from START has a row
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Model {
	state_size: usize,
	table: TransitionTable,
	/// Runtime cap, never persisted with the model.
	#[serde(skip, default = "default_max_length")]
	max_length: usize,
}

impl Model {
	/// Trains a model from a corpus.
	///
	/// Recommended `state_size` is in `[2, 5]`: smaller values give generic
	/// chains, larger ones mostly reproduce the corpus.
	///
	/// # Notes
	/// - Empty words are skipped.
	/// - Words are used as given; callers lower-case them beforehand.
	///
	/// # Errors
	/// - `InvalidStateSize` if `state_size == 0`
	/// - `EmptyCorpus` if no non-empty word was supplied
	pub fn train<I, S>(corpus: I, state_size: usize) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		if state_size == 0 {
			return Err(NamegenError::InvalidStateSize(state_size));
		}

		let mut table = TransitionTable::new();
		let mut words = 0;
		for word in corpus {
			let word = word.as_ref();
			if word.is_empty() {
				continue;
			}
			table.add_word(word, state_size);
			words += 1;
		}

		Self::from_table(table, words, state_size)
	}

	/// Trains a model by splitting the corpus into chunks, building partial
	/// tables on worker threads and merging them.
	///
	/// Gives the same model as [`Model::train`].
	pub fn train_parallel(corpus: &[String], state_size: usize) -> Result<Self> {
		if state_size == 0 {
			return Err(NamegenError::InvalidStateSize(state_size));
		}

		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = corpus.len().div_ceil(chunks).max(1);

		let (tx, rx) = mpsc::channel();
		for chunk in corpus.chunks(chunk_size) {
			let tx = tx.clone();
			let chunk: Vec<String> = chunk.to_vec();

			thread::spawn(move || {
				let mut partial = TransitionTable::new();
				let mut words = 0;
				for word in chunk.iter().filter(|w| !w.is_empty()) {
					partial.add_word(word, state_size);
					words += 1;
				}
				// The receiver outlives every worker
				let _ = tx.send((partial, words));
			});
		}
		drop(tx);

		let mut table = TransitionTable::new();
		let mut words = 0;
		for (partial, count) in rx.iter() {
			table.merge(&partial);
			words += count;
		}

		Self::from_table(table, words, state_size)
	}

	fn from_table(table: TransitionTable, words: usize, state_size: usize) -> Result<Self> {
		if words == 0 {
			return Err(NamegenError::EmptyCorpus);
		}
		debug!("trained model: {} words, {} contexts, state size {}", words, table.len(), state_size);
		Ok(Self { state_size, table, max_length: default_max_length() })
	}

	/// Loads the model of a lexicon file, training it if needed.
	///
	/// - Reuses `<stem>.bin` beside the lexicon when it is newer than the
	///   lexicon and was trained at the same state size.
	/// - Otherwise reads and trains from the lexicon and, if `cache` is set,
	///   writes the `.bin` file with `postcard`.
	///
	/// # Errors
	/// Returns an error if the lexicon cannot be read or is empty.
	pub fn from_lexicon_file<P: AsRef<Path>>(filepath: P, state_size: usize, cache: bool) -> Result<Self> {
		let filepath = filepath.as_ref();
		if let Some(model) = cache.then(|| Self::load_cache(filepath, state_size)).flatten() {
			return Ok(model);
		}
		let lexicon = Lexicon::load(filepath)?;
		Self::train_and_cache(&lexicon, filepath, state_size, cache)
	}

	/// Same as [`Model::from_lexicon_file`] for a lexicon already in memory.
	///
	/// `source` is the file the lexicon was read from; it locates the cache
	/// and is never read.
	pub fn from_lexicon<P: AsRef<Path>>(lexicon: &Lexicon, source: P, state_size: usize, cache: bool) -> Result<Self> {
		let source = source.as_ref();
		if let Some(model) = cache.then(|| Self::load_cache(source, state_size)).flatten() {
			return Ok(model);
		}
		Self::train_and_cache(lexicon, source, state_size, cache)
	}

	/// Reads the cached model of `source`, if usable.
	fn load_cache(source: &Path, state_size: usize) -> Option<Self> {
		let binary_data_path = cache_path(source);
		if !is_fresh(&binary_data_path, source) {
			return None;
		}

		match std::fs::read(&binary_data_path).map(|bytes| postcard::from_bytes::<Model>(&bytes)) {
			Ok(Ok(model)) if model.state_size == state_size => {
				info!("loaded cached model {}", binary_data_path.display());
				Some(model)
			}
			Ok(Ok(model)) => {
				info!(
					"cached model {} has state size {}, retraining at {}",
					binary_data_path.display(),
					model.state_size,
					state_size
				);
				None
			}
			Ok(Err(e)) => {
				warn!("cannot decode {}: {e}, retraining", binary_data_path.display());
				None
			}
			Err(e) => {
				warn!("cannot read {}: {e}, retraining", binary_data_path.display());
				None
			}
		}
	}

	/// Trains from `lexicon` and writes the cache of `source` when asked.
	///
	/// A cache that cannot be written only costs a retrain next time.
	fn train_and_cache(lexicon: &Lexicon, source: &Path, state_size: usize, cache: bool) -> Result<Self> {
		let words = lexicon.words();
		let model = if words.len() >= PARALLEL_THRESHOLD {
			Self::train_parallel(words, state_size)?
		} else {
			Self::train(words, state_size)?
		};

		if cache {
			let binary_data_path = cache_path(source);
			let written = postcard::to_stdvec(&model)
				.map_err(NamegenError::from)
				.and_then(|bytes| Ok(std::fs::write(&binary_data_path, bytes)?));
			match written {
				Ok(()) => info!("cached model to {}", binary_data_path.display()),
				Err(e) => warn!("cannot write {}: {e}", binary_data_path.display()),
			}
		}

		Ok(model)
	}

	/// Sets the maximum number of characters one `generate()` run may
	/// produce.
	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = max_length;
		self
	}

	/// Returns the context length.
	pub fn state_size(&self) -> usize {
		self.state_size
	}

	/// Returns the output length cap.
	pub fn max_length(&self) -> usize {
		self.max_length
	}

	/// Returns the outgoing transitions of `context`.
	pub fn row(&self, context: &Context) -> Option<&Row> {
		self.table.row(context)
	}

	/// Returns how many times `from -> to` was observed in training.
	pub fn count(&self, from: &Context, to: &Context) -> u64 {
		self.table.count(from, to)
	}

	/// Number of source contexts, START included.
	pub fn context_count(&self) -> usize {
		self.table.len()
	}

	/// Draws the context following `context`.
	fn next<R: Rng + ?Sized>(&self, context: &Context, rng: &mut R) -> Result<&Context> {
		let row = self.table.row(context).ok_or(NamegenError::EmptyDistribution)?;
		weighted_choice(row, rng)
	}

	/// Generates one word.
	///
	/// # Behavior
	/// - Draws the first window from the START row.
	/// - Repeatedly draws the next window and appends its last character.
	/// - Stops when END is drawn.
	///
	/// # Errors
	/// - `EmptyDistribution` if a visited context has no transitions
	/// - `NonTerminatingGeneration` if the word grows past `max_length`
	pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
		let mut current = self.next(&Context::Start, rng)?;
		let mut word = current.as_str().unwrap_or_default().to_owned();
		let mut length = word.chars().count();
		if length > self.max_length {
			return Err(NamegenError::NonTerminatingGeneration { max_length: self.max_length });
		}

		loop {
			let next = self.next(current, rng)?;
			match next.last_char() {
				Some(c) => {
					word.push(c);
					length += 1;
					if length > self.max_length {
						return Err(NamegenError::NonTerminatingGeneration { max_length: self.max_length });
					}
				}
				None => break,
			}
			current = next;
		}

		Ok(word)
	}

	/// Probability that one `generate()` run yields exactly `word`.
	///
	/// A given output has a single path through the chain, so this is the
	/// product of the transition probabilities along that path. Returns 0.0
	/// when the path leaves the trained table.
	pub fn probability(&self, word: &str) -> f64 {
		let chars: Vec<char> = word.chars().collect();
		let len = chars.len();
		let head = self.state_size.min(len);

		let mut current = Context::window(&chars[..head]);
		let mut probability = self.step(&Context::Start, &current);

		for i in 0..len.saturating_sub(self.state_size) {
			let next = Context::window(&chars[i + 1..i + 1 + self.state_size]);
			probability *= self.step(&current, &next);
			current = next;
		}

		probability * self.step(&current, &Context::End)
	}

	fn step(&self, from: &Context, to: &Context) -> f64 {
		match self.table.row(from) {
			Some(row) => {
				let total: u64 = row.values().sum();
				self.table.count(from, to) as f64 / total as f64
			}
			None => 0.0,
		}
	}
}

/// Whether `cache` exists and is at least as recent as `source`.
fn is_fresh(cache: &Path, source: &Path) -> bool {
	let modified = |path: &Path| std::fs::metadata(path).and_then(|m| m.modified()).ok();
	match (modified(cache), modified(source)) {
		(Some(cache), Some(source)) => cache >= source,
		_ => false,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn ctx(s: &str) -> Context {
		Context::from(s)
	}

	#[test]
	fn test_invalid_state_size() {
		assert!(matches!(Model::train(["cuba"], 0), Err(NamegenError::InvalidStateSize(0))));
		let corpus = vec!["cuba".to_owned()];
		assert!(matches!(Model::train_parallel(&corpus, 0), Err(NamegenError::InvalidStateSize(0))));
	}

	#[test]
	fn test_empty_corpus() {
		let empty: [&str; 0] = [];
		assert!(matches!(Model::train(empty, 3), Err(NamegenError::EmptyCorpus)));
		assert!(matches!(Model::train(["", ""], 3), Err(NamegenError::EmptyCorpus)));
		assert!(matches!(Model::train_parallel(&[], 3), Err(NamegenError::EmptyCorpus)));
	}

	#[test]
	fn test_canada_cuba_china() {
		let model = Model::train(["canada", "cuba", "china"], 2).unwrap();

		let start = model.row(&Context::Start).unwrap();
		assert_eq!(start.len(), 3);
		assert_eq!(model.count(&Context::Start, &ctx("ca")), 1);
		assert_eq!(model.count(&Context::Start, &ctx("cu")), 1);
		assert_eq!(model.count(&Context::Start, &ctx("ch")), 1);

		// "china" ends in "na"; "canada" ends in "da" and only passes through "na"
		assert_eq!(model.count(&ctx("na"), &Context::End), 1);
		assert_eq!(model.count(&ctx("na"), &ctx("ad")), 1);
		assert_eq!(model.count(&ctx("da"), &Context::End), 1);
		assert_eq!(model.count(&ctx("ba"), &Context::End), 1);
	}

	#[test]
	fn test_single_word_is_reproduced() {
		let model = Model::train(["kenya"], 3).unwrap();
		let mut rng = StdRng::seed_from_u64(3);
		for _ in 0..20 {
			assert_eq!(model.generate(&mut rng).unwrap(), "kenya");
		}
	}

	#[test]
	fn test_short_word_is_reproduced() {
		let model = Model::train(["uk"], 3).unwrap();
		let mut rng = StdRng::seed_from_u64(3);
		assert_eq!(model.generate(&mut rng).unwrap(), "uk");
	}

	#[test]
	fn test_generation_is_reproducible_with_seed() {
		let model = Model::train(["canada", "cuba", "china", "chad", "cameroon", "colombia"], 2).unwrap();
		let mut first = StdRng::seed_from_u64(11);
		let mut second = StdRng::seed_from_u64(11);
		for _ in 0..20 {
			assert_eq!(model.generate(&mut first).unwrap(), model.generate(&mut second).unwrap());
		}
	}

	#[test]
	fn test_max_length_guard() {
		// "a" loops on itself three times out of four
		let model = Model::train(["aaaa"], 1).unwrap().with_max_length(2);
		let mut rng = StdRng::seed_from_u64(5);
		let mut guarded = false;
		for _ in 0..200 {
			match model.generate(&mut rng) {
				Ok(word) => assert!(word.chars().count() <= 2),
				Err(NamegenError::NonTerminatingGeneration { max_length }) => {
					assert_eq!(max_length, 2);
					guarded = true;
				}
				Err(e) => panic!("unexpected error {e}"),
			}
		}
		assert!(guarded);
	}

	#[test]
	fn test_max_length_covers_first_window() {
		let model = Model::train(["abcde"], 5).unwrap().with_max_length(3);
		let mut rng = StdRng::seed_from_u64(6);
		assert!(matches!(
			model.generate(&mut rng),
			Err(NamegenError::NonTerminatingGeneration { max_length: 3 })
		));

		let model = model.with_max_length(5);
		assert_eq!(model.generate(&mut rng).unwrap(), "abcde");
	}

	#[test]
	fn test_parallel_training_matches_sequential() {
		let corpus: Vec<String> = ["canada", "cuba", "china", "chad", "chile", "", "peru"]
			.iter()
			.map(|s| s.to_string())
			.collect();
		let sequential = Model::train(&corpus, 2).unwrap();
		let parallel = Model::train_parallel(&corpus, 2).unwrap();
		assert_eq!(sequential.table, parallel.table);
	}

	#[test]
	fn test_probability() {
		let model = Model::train(["cuba", "cuba", "chad", "chile"], 2).unwrap();
		assert!((model.probability("cuba") - 0.5).abs() < 1e-9);
		assert_eq!(model.probability("peru"), 0.0);
		assert_eq!(model.probability(""), 0.0);

		// "ch" is followed by "ha" or "hi" equally often
		assert!((model.probability("chad") - 0.25).abs() < 1e-9);
	}

	#[test]
	fn test_serialization_keeps_table() {
		let model = Model::train(["canada", "cuba"], 2).unwrap().with_max_length(5);
		let bytes = postcard::to_stdvec(&model).unwrap();
		let decoded: Model = postcard::from_bytes(&bytes).unwrap();
		assert_eq!(decoded.table, model.table);
		assert_eq!(decoded.state_size(), 2);
		assert_eq!(decoded.max_length(), default_max_length());
	}
}
