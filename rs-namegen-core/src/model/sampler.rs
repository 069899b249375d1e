use std::collections::BTreeMap;

use rand::Rng;

use crate::error::{NamegenError, Result};

/// Randomly selects a key from a map, where each value is the key's weight.
///
/// The probability of selecting a key is proportional to its weight.
///
/// This function performs:
/// - an O(n) pass to compute the total weight
/// - a uniform draw `r` in `[0, total)`
/// - a cumulative scan returning the first key whose running sum exceeds `r`
///
/// Keys are visited in map order, so a seeded RNG reproduces the same picks.
/// Zero-weight keys are never returned.
///
/// # Errors
/// Returns `EmptyDistribution` if the map is empty or all weights are zero.
pub fn weighted_choice<'a, K, R>(choices: &'a BTreeMap<K, u64>, rng: &mut R) -> Result<&'a K>
where
	K: Ord,
	R: Rng + ?Sized,
{
	let total: u64 = choices.values().sum();
	if total == 0 {
		return Err(NamegenError::EmptyDistribution);
	}

	let r = rng.random_range(0..total);

	let mut sum = 0;
	for (key, weight) in choices {
		sum += *weight;
		if r < sum {
			return Ok(key);
		}
	}

	// Unreachable while r < total
	Err(NamegenError::EmptyDistribution)
}
