use std::collections::HashSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_namegen_core::{ExclusionSet, Model, NamegenError, derive_nationality, generate_unique};

fn corpus() -> impl Strategy<Value = Vec<String>> {
	prop::collection::vec("[a-z]{1,8}", 1..10)
}

proptest! {
	#[test]
	fn generated_words_only_use_corpus_characters(words in corpus(), state_size in 1usize..5, seed: u64) {
		let model = Model::train(&words, state_size).unwrap().with_max_length(10_000);
		let alphabet: HashSet<char> = words.iter().flat_map(|w| w.chars()).collect();
		let mut rng = StdRng::seed_from_u64(seed);

		for _ in 0..10 {
			match model.generate(&mut rng) {
				Ok(word) => {
					prop_assert!(!word.is_empty());
					prop_assert!(word.chars().all(|c| alphabet.contains(&c)), "{}", word);
				}
				Err(NamegenError::NonTerminatingGeneration { .. }) => {}
				Err(e) => prop_assert!(false, "unexpected error {}", e),
			}
		}
	}

	#[test]
	fn every_training_word_is_reachable(words in corpus(), state_size in 1usize..5) {
		let model = Model::train(&words, state_size).unwrap();
		for word in &words {
			prop_assert!(model.probability(word) > 0.0, "{} unreachable", word);
		}
	}

	#[test]
	fn nationality_keeps_the_stem(word in "[a-zA-Z]{1,12}", seed: u64) {
		let mut rng = StdRng::seed_from_u64(seed);
		let out = derive_nationality(&word, &mut rng);
		let stem: String = word.chars().take(word.chars().count() - 1).collect();

		prop_assert!(!out.is_empty());
		prop_assert!(out.starts_with(&stem));
		if word.to_lowercase().ends_with('y') {
			prop_assert_eq!(out, format!("{stem}ian"));
		} else {
			prop_assert!(out.starts_with(&word));
		}
	}

	#[test]
	fn unique_values_are_never_excluded(words in corpus(), seed: u64) {
		let model = Model::train(&words, 2).unwrap().with_max_length(10_000);
		let exclusion: ExclusionSet = words.iter().take(words.len() / 2).collect();
		let mut rng = StdRng::seed_from_u64(seed);

		match generate_unique(&model, &exclusion, 50, &mut rng) {
			Ok(value) => prop_assert!(!exclusion.contains(&value)),
			Err(NamegenError::UniquenessExhausted { .. }) | Err(NamegenError::NonTerminatingGeneration { .. }) => {}
			Err(e) => prop_assert!(false, "unexpected error {}", e),
		}
	}
}
