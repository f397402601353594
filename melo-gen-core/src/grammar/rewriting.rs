use log::warn;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::catalogue;
use super::rules::Grammar;
use super::transform::{TransformMap, default_transforms};
use crate::error::GenError;

/// Grammar expansion plus mapping of the result onto a pitch sequence.
///
/// # Responsibilities
/// - Expand the axiom of its grammar a given number of times
/// - Keep the last derivation and split a melody into one window per
///   derivation symbol, transforming each window by that symbol
///
/// # Invariants
/// - `derivation` is the result of the last `generate` call (empty before)
/// - `apply_to_music` output is exactly as long as its input
#[derive(Clone, Debug)]
pub struct RewritingSystem {
	grammar: Grammar,
	derivation: String,
	/// Only consumed by stochastic transforms.
	rng: StdRng,
}

impl RewritingSystem {
	pub fn new(grammar: Grammar) -> Self {
		Self {
			grammar,
			derivation: String::new(),
			rng: StdRng::from_os_rng(),
		}
	}

	/// Builds a system from an axiom and a textual rule list
	/// (see [`parse_rules`](super::rules::parse_rules)).
	pub fn from_text(axiom: &str, rules: &str) -> Self {
		Self::new(Grammar::from_text(axiom, rules))
	}

	/// Builds a system from the predefined catalogue, unknown names falling
	/// back to the default grammar.
	pub fn predefined(name: &str) -> Self {
		Self::new(catalogue::predefined(name))
	}

	/// Replaces the random generator by a deterministic one.
	pub fn with_seed(mut self, seed: u64) -> Self {
		self.rng = StdRng::seed_from_u64(seed);
		self
	}

	pub fn grammar(&self) -> &Grammar {
		&self.grammar
	}

	/// Result of the last [`generate`](Self::generate) call.
	pub fn derivation(&self) -> &str {
		&self.derivation
	}

	/// Expands the axiom `iterations` times, stores and returns the result.
	///
	/// Any previous derivation is overwritten.
	pub fn generate(&mut self, iterations: usize) -> &str {
		self.derivation = self.grammar.expand(iterations);
		&self.derivation
	}

	/// Maps the current derivation onto `sequence`.
	///
	/// The sequence is cut into windows of `ceil(len / derivation_len)`
	/// pitches, window `i` belonging to derivation symbol `i`. Windows of
	/// symbols found in `transforms` (or in [`default_transforms`] when
	/// `None`) are transformed pitch by pitch, other windows are copied.
	/// Trailing derivation symbols may get no window at all.
	///
	/// # Errors
	/// Returns `EmptyDerivation` if no derivation is available.
	pub fn try_apply_to_music(&mut self, sequence: &[i32], transforms: Option<&TransformMap>) -> Result<Vec<i32>, GenError> {
		let derivation_len = self.derivation.chars().count();
		if derivation_len == 0 {
			return Err(GenError::EmptyDerivation);
		}

		let defaults;
		let transforms = match transforms {
			Some(transforms) => transforms,
			None => {
				defaults = default_transforms();
				&defaults
			}
		};

		let segment_size = sequence.len().div_ceil(derivation_len);
		let mut result = Vec::with_capacity(sequence.len());

		for (i, symbol) in self.derivation.chars().enumerate() {
			let start = i * segment_size;
			if start >= sequence.len() {
				break;
			}
			let end = (start + segment_size).min(sequence.len());
			let window = &sequence[start..end];

			match transforms.get(&symbol) {
				Some(transform) => {
					result.extend(window.iter().map(|&pitch| transform.apply(pitch, &mut self.rng)));
				}
				None => result.extend_from_slice(window),
			}
		}

		Ok(result)
	}

	/// Maps the current derivation onto `sequence`, returning the input
	/// unchanged when no derivation is available.
	///
	/// See [`try_apply_to_music`](Self::try_apply_to_music).
	pub fn apply_to_music(&mut self, sequence: &[i32], transforms: Option<&TransformMap>) -> Vec<i32> {
		match self.try_apply_to_music(sequence, transforms) {
			Ok(result) => result,
			Err(e) => {
				warn!("music mapping skipped: {e}");
				sequence.to_vec()
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::grammar::transform::Transform;

	#[test]
	fn generate_overwrites_previous_derivation() {
		let mut system = RewritingSystem::from_text("A", "A->AB, B->A");
		assert_eq!(system.generate(3), "ABAAB");
		assert_eq!(system.generate(2), "ABA");
		assert_eq!(system.derivation(), "ABA");
	}

	#[test]
	fn apply_without_derivation_returns_input() {
		let mut system = RewritingSystem::from_text("A", "A->AB");
		let melody = vec![60, 62, 64];
		assert!(matches!(system.try_apply_to_music(&melody, None), Err(GenError::EmptyDerivation)));
		assert_eq!(system.apply_to_music(&melody, None), melody);
	}

	#[test]
	fn empty_derivation_after_erasing_rules() {
		let mut system = RewritingSystem::from_text("A", "A->");
		system.generate(1);
		assert_eq!(system.apply_to_music(&[1, 2], None), vec![1, 2]);
	}

	#[test]
	fn windows_follow_derivation_symbols() {
		let mut system = RewritingSystem::from_text("A", "A->AB, B->A");
		system.generate(2); // "ABA"
		let transforms = TransformMap::from([('B', Transform::Transpose(12))]);

		// ceil(7 / 3) = 3: windows [0, 3), [3, 6), [6, 7)
		let melody = vec![60, 61, 62, 63, 64, 65, 66];
		assert_eq!(
			system.apply_to_music(&melody, Some(&transforms)),
			vec![60, 61, 62, 75, 76, 77, 66]
		);
	}

	#[test]
	fn long_derivation_leaves_trailing_symbols_unused() {
		let mut system = RewritingSystem::from_text("ABBBB", "");
		system.generate(0);
		let transforms = TransformMap::from([('B', Transform::Transpose(1))]);

		// ceil(3 / 5) = 1: only "ABB" is consumed.
		assert_eq!(system.apply_to_music(&[10, 20, 30], Some(&transforms)), vec![10, 21, 31]);
	}

	#[test]
	fn default_transforms_are_used_when_none_given() {
		let mut system = RewritingSystem::from_text("AB", "");
		system.generate(0);
		assert_eq!(system.apply_to_music(&[60, 60], None), vec![60, 67]);
	}

	#[test]
	fn empty_sequence_stays_empty() {
		let mut system = RewritingSystem::predefined("koch");
		system.generate(1);
		assert!(system.apply_to_music(&[], None).is_empty());
	}

	#[test]
	fn seeded_jitter_is_reproducible() {
		let melody: Vec<i32> = (40..80).collect();
		let transforms = TransformMap::from([('A', Transform::RandomJitter(2))]);
		let run = |seed| {
			let mut system = RewritingSystem::from_text("A", "A->AA").with_seed(seed);
			system.generate(3);
			system.apply_to_music(&melody, Some(&transforms))
		};
		assert_eq!(run(5), run(5));
	}
}
