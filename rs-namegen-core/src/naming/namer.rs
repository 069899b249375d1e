use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use rand::Rng;

use super::derivation::{ExclusionSet, derive_nationality, generate_unique};
use super::lexicon::{Lexicon, Vocabulary};
use super::text::title_case;
use crate::config::{GenerationLimits, NamegenConfig};
use crate::error::{NamegenError, Result};
use crate::model::markov::Model;

/// Category of name to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
	Unit,
	Action,
	Event,
	Property,
	Condition,
	Nation,
}

impl NameKind {
	pub const ALL: [NameKind; 6] = [
		NameKind::Unit,
		NameKind::Action,
		NameKind::Event,
		NameKind::Property,
		NameKind::Condition,
		NameKind::Nation,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			NameKind::Unit => "unit",
			NameKind::Action => "action",
			NameKind::Event => "event",
			NameKind::Property => "property",
			NameKind::Condition => "condition",
			NameKind::Nation => "nation",
		}
	}

	/// Title-cased label, e.g. `"Unit"`.
	pub fn label(&self) -> String {
		title_case(self.as_str())
	}

	/// Picks a kind uniformly.
	pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
		Self::ALL[rng.random_range(0..Self::ALL.len())]
	}
}

impl fmt::Display for NameKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for NameKind {
	type Err = NamegenError;

	fn from_str(s: &str) -> Result<Self> {
		let s = s.trim().to_lowercase();
		Self::ALL
			.into_iter()
			.find(|kind| kind.as_str() == s)
			.ok_or(NamegenError::UnknownKind(s))
	}
}

/// High-level name generator.
///
/// # Responsibilities
/// - Own the vocabulary and the nation model trained on country names
/// - Invent nations that are not real countries
/// - Derive nationalities from invented nations
/// - Compose multi-word names for every `NameKind`
#[derive(Debug)]
pub struct Namer {
	vocabulary: Vocabulary,
	nation_model: Model,
	countries: ExclusionSet,
	nationalities: Lexicon,
	limits: GenerationLimits,
	prefix_probability: f64,
}

impl Namer {
	/// Creates a namer from an already loaded vocabulary and nation model.
	///
	/// Draws `config.nationality_count` nationalities up front; unit names
	/// pick from this pool.
	///
	/// # Errors
	/// Returns an error if a nationality cannot be generated.
	pub fn new<R: Rng + ?Sized>(
		vocabulary: Vocabulary,
		nation_model: Model,
		config: &NamegenConfig,
		rng: &mut R,
	) -> Result<Self> {
		let limits = config.limits();
		let countries: ExclusionSet = vocabulary.countries.words().iter().collect();

		let mut namer = Self {
			vocabulary,
			nation_model: nation_model.with_max_length(limits.max_length),
			countries,
			nationalities: Lexicon::default(),
			limits,
			prefix_probability: config.prefix_probability,
		};

		let mut nationalities = Vec::with_capacity(config.nationality_count);
		for _ in 0..config.nationality_count {
			nationalities.push(namer.nationality(rng)?);
		}
		debug!("nationality pool: {}", nationalities.join(", "));
		namer.nationalities = Lexicon::from_words("nationalities", nationalities);

		Ok(namer)
	}

	/// Loads the vocabulary from `config.data_dir` and the nation model
	/// trained on its countries list.
	///
	/// # Errors
	/// Returns an error if a lexicon is missing, the countries list is
	/// empty, or the model cache cannot be written.
	pub fn from_config<R: Rng + ?Sized>(config: &NamegenConfig, rng: &mut R) -> Result<Self> {
		let vocabulary = Vocabulary::load(&config.data_dir)?;
		let nation_model = Model::from_lexicon(
			&vocabulary.countries,
			config.data_dir.join("countries.txt"),
			config.state_size,
			config.cache_models,
		)?;
		info!(
			"namer ready: {} countries, {} contexts",
			vocabulary.countries.len(),
			nation_model.context_count()
		);
		Self::new(vocabulary, nation_model, config, rng)
	}

	pub fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}

	pub fn nation_model(&self) -> &Model {
		&self.nation_model
	}

	/// The nationality pool used by unit names, lower-cased.
	pub fn nationalities(&self) -> &[String] {
		self.nationalities.words()
	}

	/// Invents a title-cased nation that is not a real country.
	pub fn nation<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
		generate_unique(&self.nation_model, &self.countries, self.limits.max_attempts, rng)
	}

	/// Invents a nation and returns its nationality adjective.
	pub fn nationality<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
		let nation = self.nation(rng)?;
		Ok(derive_nationality(&nation, rng))
	}

	/// Composes a name of the given kind.
	///
	/// - `Unit`: adjective or nationality, then animal
	/// - `Action`, `Event`: adverb, then verb
	/// - `Property`, `Condition`: adjective, then uncountable noun
	/// - `Nation`: an invented nation
	///
	/// The first word sometimes gets a prefix (`prefix_probability`).
	/// The result is title-cased.
	pub fn name<R: Rng + ?Sized>(&self, kind: NameKind, rng: &mut R) -> Result<String> {
		let vocab = &self.vocabulary;
		let lexicons: [&Lexicon; 2] = match kind {
			NameKind::Unit => {
				let first = if rng.random_bool(0.5) { &vocab.adjectives } else { &self.nationalities };
				[first, &vocab.animals]
			}
			NameKind::Action | NameKind::Event => [&vocab.adverbs, &vocab.verbs],
			NameKind::Property | NameKind::Condition => [&vocab.adjectives, &vocab.uncountable_nouns],
			NameKind::Nation => return self.nation(rng),
		};

		let mut words = Vec::with_capacity(lexicons.len());
		for lexicon in lexicons {
			words.push(lexicon.choose(rng)?.to_owned());
		}

		if rng.random::<f64>() < self.prefix_probability {
			let prefix = vocab.prefixes.choose(rng)?;
			words[0].insert_str(0, prefix);
		}

		Ok(title_case(&words.join(" ")))
	}
}
