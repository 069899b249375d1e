use std::collections::HashSet;

use log::debug;
use rand::Rng;

use super::text::title_case;
use crate::error::{NamegenError, Result};
use crate::model::markov::Model;

/// Values that generated names must not match.
///
/// Entries are stored lower-cased and lookups are lower-cased too, so
/// `"Canada"`, `"canada"` and `"CANADA"` are the same entry.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
	values: HashSet<String>,
}

impl ExclusionSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a value. Returns `false` if it was already present.
	pub fn insert(&mut self, value: &str) -> bool {
		self.values.insert(value.to_lowercase())
	}

	pub fn contains(&self, value: &str) -> bool {
		self.values.contains(&value.to_lowercase())
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

impl<S: AsRef<str>> FromIterator<S> for ExclusionSet {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		let mut set = Self::new();
		for value in iter {
			set.insert(value.as_ref());
		}
		set
	}
}

/// Generates a title-cased word that is not part of `exclusion`.
///
/// Rejection sampling: candidates are drawn from `model` until one falls
/// outside the exclusion set, at most `max_attempts` times.
///
/// # Errors
/// - `UniquenessExhausted` once `max_attempts` candidates were rejected
/// - any error raised by `Model::generate`
pub fn generate_unique<R: Rng + ?Sized>(
	model: &Model,
	exclusion: &ExclusionSet,
	max_attempts: usize,
	rng: &mut R,
) -> Result<String> {
	for attempt in 1..=max_attempts {
		let candidate = title_case(&model.generate(rng)?);
		if !exclusion.contains(&candidate) {
			return Ok(candidate);
		}
		debug!("attempt {attempt}: rejected existing value '{candidate}'");
	}
	Err(NamegenError::UniquenessExhausted { attempts: max_attempts })
}

const I_SUFFIXES: &[&str] = &["", "c", "sh", "an"];
const E_SUFFIXES: &[&str] = &["se", "an"];
const OTHER_SUFFIXES: &[&str] = &["ian", "ean", "ese", "an", "ish", "ic", "i"];

fn pick<R: Rng + ?Sized>(options: &[&'static str], rng: &mut R) -> &'static str {
	options[rng.random_range(0..options.len())]
}

/// Turns a place name into its nationality adjective.
///
/// | last letter | rule                                          |
/// |-------------|-----------------------------------------------|
/// | `a`         | append `n`                                    |
/// | `i`         | append one of `""`, `c`, `sh`, `an`           |
/// | `e`         | append one of `se`, `an`                      |
/// | `y`         | replace `y` with `ian`                        |
/// | `u`         | append `vian`                                 |
/// | other       | append one of `ian`, `ean`, `ese`, `an`, `ish`, `ic`, `i` |
///
/// The last letter is compared case-insensitively; suffixes are lower-case.
/// An empty word takes the last rule.
pub fn derive_nationality<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
	let last = word.chars().last().and_then(|c| c.to_lowercase().next());
	let mut out = word.to_owned();
	match last {
		Some('a') => out.push('n'),
		Some('i') => out.push_str(pick(I_SUFFIXES, rng)),
		Some('e') => out.push_str(pick(E_SUFFIXES, rng)),
		Some('y') => {
			out.pop();
			out.push_str("ian");
		}
		Some('u') => out.push_str("vian"),
		_ => out.push_str(pick(OTHER_SUFFIXES, rng)),
	}
	out
}
