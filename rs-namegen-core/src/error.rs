use thiserror::Error;

/// Errors raised by the name generation core.
///
/// None of these are recovered from internally: the caller decides whether
/// to retry or fall back to another strategy.
#[derive(Debug, Error)]
pub enum NamegenError {
	/// The sampler was given no outcome with a positive weight.
	#[error("cannot sample from an empty distribution")]
	EmptyDistribution,

	/// A single generation run exceeded the output length cap.
	#[error("generation did not terminate within {max_length} characters")]
	NonTerminatingGeneration { max_length: usize },

	/// Every candidate drawn was part of the exclusion set.
	#[error("no unique value found after {attempts} attempts")]
	UniquenessExhausted { attempts: usize },

	/// Contexts must hold at least one character.
	#[error("state size must be >= 1, got {0}")]
	InvalidStateSize(usize),

	/// Training received no usable word.
	#[error("training corpus contains no words")]
	EmptyCorpus,

	/// A vocabulary needed for composition has no entry.
	#[error("lexicon '{0}' is empty")]
	EmptyLexicon(String),

	/// A name kind string did not match any known kind.
	#[error("unknown name kind '{0}'")]
	UnknownKind(String),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("invalid lexicon pattern: {0}")]
	Glob(#[from] glob::PatternError),

	#[error("model serialization error: {0}")]
	Serialization(#[from] postcard::Error),

	#[error("configuration error: {0}")]
	Config(#[from] toml::de::Error),
}

/// Result type for name generation operations.
pub type Result<T> = std::result::Result<T, NamegenError>;
