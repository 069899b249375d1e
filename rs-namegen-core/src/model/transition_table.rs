use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::context::Context;

/// Outgoing transitions of a single context, indexed by the next context.
pub type Row = BTreeMap<Context, u64>;

/// Frequency table of a character-level Markov chain.
///
/// Each row maps a context to the contexts observed right after it, with
/// the number of times the transition was observed.
///
/// ## Responsibilities:
/// - Accumulate transition occurrences while training
/// - Expose rows for weighted sampling
/// - Merge with another table built at the same state size (parallel training)
///
/// ## Invariants
/// - Every stored count is strictly positive
/// - `Context::Start` only ever appears as a source
/// - `Context::End` only ever appears as a target
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct TransitionTable {
	rows: BTreeMap<Context, Row>,
}

impl TransitionTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one occurrence of the transition `from -> to`.
	pub fn add_transition(&mut self, from: Context, to: Context) {
		*self.rows.entry(from).or_default().entry(to).or_insert(0) += 1;
	}

	/// Adds the transitions of one word, using windows of `state_size`
	/// characters.
	///
	/// - START to the first `state_size` characters
	/// - the last `state_size` characters to END
	/// - every window to the window shifted one character right
	///
	/// Words shorter than `state_size` are one window on their own.
	pub fn add_word(&mut self, word: &str, state_size: usize) {
		let chars: Vec<char> = word.chars().collect();
		let len = chars.len();
		let head = state_size.min(len);

		self.add_transition(Context::Start, Context::window(&chars[..head]));
		self.add_transition(Context::window(&chars[len - head..]), Context::End);

		for i in 0..len.saturating_sub(state_size) {
			let prev = Context::window(&chars[i..i + state_size]);
			let next = Context::window(&chars[i + 1..i + 1 + state_size]);
			self.add_transition(prev, next);
		}
	}

	/// Returns the outgoing transitions of `context`, if it was ever seen
	/// as a source.
	pub fn row(&self, context: &Context) -> Option<&Row> {
		self.rows.get(context)
	}

	/// Returns how many times `from -> to` was observed (0 if never).
	pub fn count(&self, from: &Context, to: &Context) -> u64 {
		self.row(from).and_then(|row| row.get(to)).copied().unwrap_or(0)
	}

	/// Number of source contexts, START included.
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Merges another table into this one.
	///
	/// Occurrence counts of matching transitions are summed, so training on
	/// chunks and merging gives the same table as training in one pass.
	pub fn merge(&mut self, other: &Self) {
		for (from, row) in &other.rows {
			let existing = self.rows.entry(from.clone()).or_default();
			for (to, count) in row {
				*existing.entry(to.clone()).or_insert(0) += *count;
			}
		}
	}
}
