//! Procedural name generation library.
//!
//! This crate provides a small name generation system including:
//! - Weighted random sampling over counted outcomes
//! - A character-level Markov model trained from a word list
//! - Nation/nationality derivation with duplicate avoidance
//! - Lexicon loading and multi-word name composition
//!
//! Randomness is always injected by the caller, so a seeded RNG gives
//! reproducible output.

/// Error type shared by every module of the crate.
pub mod error;

/// Generator configuration (TOML-backed).
pub mod config;

/// Character-level Markov model and the weighted sampler it relies on.
pub mod model;

/// Name derivation, lexicons and multi-word composition.
pub mod naming;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use config::{GenerationLimits, NamegenConfig};
pub use error::{NamegenError, Result};
pub use model::context::Context;
pub use model::markov::Model;
pub use model::sampler::weighted_choice;
pub use naming::derivation::{ExclusionSet, derive_nationality, generate_unique};
pub use naming::lexicon::{Lexicon, Vocabulary};
pub use naming::namer::{NameKind, Namer};
pub use naming::text::title_case;
