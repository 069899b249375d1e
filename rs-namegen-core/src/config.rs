use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Caps protecting the two unbounded loops of the generator.
///
/// # Invariants
/// - `max_length` bounds the number of characters of one `generate()` run
/// - `max_attempts` bounds the number of candidates drawn by `generate_unique`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationLimits {
	pub max_length: usize,
	pub max_attempts: usize,
}

impl Default for GenerationLimits {
	fn default() -> Self {
		Self { max_length: 64, max_attempts: 1000 }
	}
}

/// Top-level configuration shared by the CLI and the server.
///
/// Every field has a default, so a partial TOML file is valid:
///
/// ```toml
/// data_dir = "data"
/// state_size = 3
/// seed = 42
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamegenConfig {
	/// Directory holding the lexicon files.
	pub data_dir: PathBuf,

	/// Context length of the nation model.
	pub state_size: usize,

	/// Maximum characters a single generation run may produce.
	pub max_length: usize,

	/// Maximum candidates drawn when avoiding existing names.
	pub max_attempts: usize,

	/// Number of nationalities pre-computed for unit names.
	pub nationality_count: usize,

	/// Probability of prepending a prefix to the first word of a name.
	pub prefix_probability: f64,

	/// Whether trained models are cached next to their lexicon.
	pub cache_models: bool,

	/// Optional RNG seed for reproducible output.
	pub seed: Option<u64>,
}

impl Default for NamegenConfig {
	fn default() -> Self {
		let limits = GenerationLimits::default();
		Self {
			data_dir: PathBuf::from("data"),
			state_size: 3,
			max_length: limits.max_length,
			max_attempts: limits.max_attempts,
			nationality_count: 16,
			prefix_probability: 0.02,
			cache_models: true,
			seed: None,
		}
	}
}

impl NamegenConfig {
	/// Loads a configuration from a TOML file.
	///
	/// # Errors
	/// Returns an error if the file cannot be read or is not valid TOML.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let contents = std::fs::read_to_string(path)?;
		Self::from_toml(&contents)
	}

	/// Parses a configuration from TOML text.
	pub fn from_toml(contents: &str) -> Result<Self> {
		Ok(toml::from_str(contents)?)
	}

	/// Returns the generation caps carried by this configuration.
	pub fn limits(&self) -> GenerationLimits {
		GenerationLimits { max_length: self.max_length, max_attempts: self.max_attempts }
	}

	/// Builds the RNG described by this configuration.
	///
	/// Seeded when `seed` is set, drawn from OS entropy otherwise.
	pub fn rng(&self) -> StdRng {
		match self.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		}
	}
}
