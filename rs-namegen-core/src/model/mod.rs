//! Character-level Markov model.
//!
//! - Chain states (`Context`)
//! - Weighted random sampling (`weighted_choice`)
//! - Transition counting and merging (`TransitionTable`)
//! - Training and generation (`Model`)

/// States of the Markov chain: START, END, or a fixed-size window.
pub mod context;

/// Roulette-wheel selection over counted outcomes.
pub mod sampler;

/// Frequency table between contexts.
///
/// Built once during training, read-only afterwards.
pub mod transition_table;

/// Trained model exposing `generate()`.
pub mod markov;
