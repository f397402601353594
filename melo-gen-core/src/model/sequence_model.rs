use std::collections::{BTreeMap, BTreeSet};
use std::sync::mpsc;
use std::thread;

use log::{debug, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::Symbol;
use super::matrix::{ProbabilityMatrix, ProbabilityRows};
use super::state::State;
use crate::error::GenError;
use crate::note::Theme;

/// Largest weight a single probability can turn into.
const MAX_WEIGHT: f64 = u32::MAX as f64;

/// Fresh OS-seeded generator, used when no explicit seed is given.
fn entropy_rng() -> StdRng {
	StdRng::from_os_rng()
}

/// Order-k statistical sequence model.
///
/// The model maps every context (the `order` symbols preceding a position)
/// to the successors observed after it, and samples new sequences by a
/// random walk over these statistics.
///
/// # Responsibilities
/// - Accumulate transitions and starting contexts from training sequences
/// - Generate sequences, recovering from unknown contexts through the
///   starting-state pool
/// - Expose and overwrite first-order statistics as a probability matrix
/// - Merge with another model of the same order (ex. parallel training)
///
/// # Invariants
/// - `order >= 1`
/// - every key of `states` has exactly `order` symbols
/// - every stored `State` has at least one successor
/// - `starting_states` holds distinct contexts of exactly `order` symbols
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SequenceModel<S: Symbol = i32> {
	/// Context length.
	order: usize,

	/// Context -> successor statistics.
	states: BTreeMap<Vec<S>, State<S>>,

	/// Contexts observed at the start of training sequences, in insertion order.
	starting_states: Vec<Vec<S>>,

	#[serde(skip, default = "entropy_rng")]
	rng: StdRng,
}

impl<S: Symbol> SequenceModel<S> {
	/// Creates an empty model of the given order.
	///
	/// # Errors
	/// Returns an error if `order == 0`.
	pub fn new(order: usize) -> Result<Self, GenError> {
		if order == 0 {
			return Err(GenError::InvalidOrder);
		}
		Ok(Self {
			order,
			states: BTreeMap::new(),
			starting_states: Vec::new(),
			rng: entropy_rng(),
		})
	}

	/// Replaces the random generator by a deterministic one.
	pub fn with_seed(mut self, seed: u64) -> Self {
		self.reseed(seed);
		self
	}

	/// Reseeds the random generator in place.
	pub fn reseed(&mut self, seed: u64) {
		self.rng = StdRng::seed_from_u64(seed);
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of distinct contexts with at least one successor.
	pub fn context_count(&self) -> usize {
		self.states.len()
	}

	/// Returns `true` if no transition has been learned yet.
	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Contexts that can seed a generation, in the order they were first seen.
	pub fn starting_states(&self) -> &[Vec<S>] {
		&self.starting_states
	}

	/// Returns the `(successor, count)` pairs recorded for `context`.
	///
	/// Empty if the context is unknown.
	pub fn successors(&self, context: &[S]) -> Vec<(S, usize)> {
		match self.states.get(context) {
			Some(state) => state.iter().map(|(next, count)| (next.clone(), count)).collect(),
			None => Vec::new(),
		}
	}

	/// Learns from one sequence.
	///
	/// The first `order` symbols are recorded as a starting state, then every
	/// `order + 1` window adds one transition. Repeated calls accumulate.
	///
	/// # Errors
	/// Returns an error (and leaves the model untouched) if the sequence is
	/// not longer than the order.
	pub fn try_train(&mut self, sequence: &[S]) -> Result<&mut Self, GenError> {
		if sequence.len() <= self.order {
			return Err(GenError::SequenceTooShort { len: sequence.len(), order: self.order });
		}

		let start = sequence[..self.order].to_vec();
		if !self.starting_states.contains(&start) {
			self.starting_states.push(start);
		}

		for window in sequence.windows(self.order + 1) {
			let (context, next) = window.split_at(self.order);
			self.states
				.entry(context.to_vec())
				.or_insert_with(State::new)
				.add_transition(next[0].clone());
		}

		Ok(self)
	}

	/// Learns from one sequence, ignoring (and logging) sequences too short
	/// for the model order.
	///
	/// Returns the model to allow chaining.
	pub fn train(&mut self, sequence: &[S]) -> &mut Self {
		if let Err(e) = self.try_train(sequence) {
			warn!("training skipped: {e}");
		}
		self
	}

	/// Learns from every sequence of a corpus, in order.
	pub fn train_all<T: AsRef<[S]>>(&mut self, sequences: &[T]) -> &mut Self {
		for sequence in sequences {
			self.train(sequence.as_ref());
		}
		self
	}

	/// Generates a sequence of `length` symbols.
	///
	/// The walk is seeded with `start` if it has exactly `order` symbols,
	/// otherwise with a random starting state. At each step the last `order`
	/// symbols select the successor statistics; an unknown context recovers
	/// by jumping to the first symbol of a random starting state. If that pool
	/// is empty the walk stops early and the partial result is returned.
	///
	/// The seed is part of the output. Asking for fewer symbols than the
	/// order returns a truncated seed.
	///
	/// # Errors
	/// - `EmptyModel` if nothing was learned
	/// - `NoStartState` if no valid seed can be found
	pub fn try_generate(&mut self, length: usize, start: Option<&[S]>) -> Result<Vec<S>, GenError> {
		if self.states.is_empty() {
			return Err(GenError::EmptyModel);
		}

		let mut sequence = match start {
			Some(context) if context.len() == self.order => context.to_vec(),
			_ => self.random_starting_state().ok_or(GenError::NoStartState)?,
		};
		sequence.truncate(length);

		while sequence.len() < length {
			let context = &sequence[sequence.len() - self.order..];
			let next = match self.states.get(context) {
				Some(state) => state.predict(&mut self.rng),
				None => None,
			};

			match next {
				Some(symbol) => sequence.push(symbol),
				None => match self.random_starting_state() {
					Some(restart) => {
						debug!("unknown context {context:?}, restarting from {restart:?}");
						sequence.push(restart[0].clone());
					}
					None => {
						debug!("unknown context {context:?} and no starting state, stopping early");
						break;
					}
				},
			}
		}

		Ok(sequence)
	}

	/// Generates a sequence, answering any failure with an empty sequence.
	///
	/// See [`try_generate`](Self::try_generate).
	pub fn generate(&mut self, length: usize, start: Option<&[S]>) -> Vec<S> {
		match self.try_generate(length, start) {
			Ok(sequence) => sequence,
			Err(e) => {
				warn!("generation failed: {e}");
				Vec::new()
			}
		}
	}

	/// Generates a sequence, then overwrites evenly spaced windows with themes.
	///
	/// Theme `i` is copied at position `i * (length / themes.len())`. Themes
	/// without notes, or whose window starts past the end of the generated
	/// sequence, are skipped. A theme longer than the remaining sequence is
	/// truncated.
	pub fn generate_with_themes(&mut self, length: usize, themes: &[Theme<S>]) -> Vec<S> {
		let mut sequence = self.generate(length, None);
		if themes.is_empty() {
			return sequence;
		}

		let spacing = length / themes.len();
		for (i, theme) in themes.iter().enumerate() {
			let start = i * spacing;
			if start >= sequence.len() || theme.notes.is_empty() {
				debug!("theme '{}' skipped", theme.name);
				continue;
			}
			let count = theme.notes.len().min(sequence.len() - start);
			sequence[start..start + count].clone_from_slice(&theme.notes[..count]);
		}
		sequence
	}

	/// Builds the dense transition matrix of a first-order model.
	///
	/// States are every symbol seen either as a context or as a successor,
	/// sorted ascending.
	///
	/// # Errors
	/// Returns `UnsupportedOrder` if `order != 1`.
	pub fn try_probability_matrix(&self) -> Result<ProbabilityMatrix<S>, GenError> {
		if self.order != 1 {
			return Err(GenError::UnsupportedOrder(self.order));
		}

		let mut symbols = BTreeSet::new();
		for (context, state) in &self.states {
			symbols.insert(context[0].clone());
			for (next, _) in state.iter() {
				symbols.insert(next.clone());
			}
		}
		let states: Vec<S> = symbols.into_iter().collect();

		let mut counts = vec![vec![0usize; states.len()]; states.len()];
		for (context, state) in &self.states {
			// Both lookups succeed: every symbol was collected above
			let Ok(from) = states.binary_search(&context[0]) else { continue };
			for (next, count) in state.iter() {
				if let Ok(to) = states.binary_search(next) {
					counts[from][to] += count;
				}
			}
		}

		Ok(ProbabilityMatrix::from_counts(states, counts))
	}

	/// Returns the transition matrix, or `None` for models of order != 1.
	pub fn probability_matrix(&self) -> Option<ProbabilityMatrix<S>> {
		match self.try_probability_matrix() {
			Ok(matrix) => Some(matrix),
			Err(e) => {
				warn!("probability matrix unavailable: {e}");
				None
			}
		}
	}

	/// Replaces the whole transition table of a first-order model.
	///
	/// Each positive probability `p` becomes an integer weight
	/// `round(p * 100)`. Rows need not sum to 1. A probability below 0.005
	/// rounds to a zero weight, which makes the transition unreachable;
	/// from-states left without any weight are dropped from the table.
	/// Non-finite probabilities are skipped and weights are capped at
	/// `u32::MAX`. Starting states are kept.
	///
	/// # Errors
	/// Returns `UnsupportedOrder` (and leaves the model untouched) if
	/// `order != 1`.
	pub fn try_update_probabilities(&mut self, probabilities: &ProbabilityRows<S>) -> Result<(), GenError> {
		if self.order != 1 {
			return Err(GenError::UnsupportedOrder(self.order));
		}

		let mut states = BTreeMap::new();
		for (from, row) in probabilities {
			let mut state = State::new();
			for (to, &probability) in row {
				if !probability.is_finite() {
					warn!("probability {probability} for {from:?} -> {to:?} ignored");
					continue;
				}
				if probability > 0.0 {
					let weight = (probability * 100.0).round().min(MAX_WEIGHT);
					state.add_transitions(to.clone(), weight as usize);
				}
			}
			if state.is_empty() {
				debug!("state {from:?} has no reachable successor after update");
				continue;
			}
			states.insert(vec![from.clone()], state);
		}

		self.states = states;
		Ok(())
	}

	/// Replaces the transition table, doing nothing for models of order != 1.
	///
	/// See [`try_update_probabilities`](Self::try_update_probabilities).
	pub fn update_probabilities(&mut self, probabilities: &ProbabilityRows<S>) {
		if let Err(e) = self.try_update_probabilities(probabilities) {
			warn!("probability update ignored: {e}");
		}
	}

	/// Merges another model into this one.
	///
	/// Successor counts of equal contexts are summed; starting states are
	/// appended if not already present.
	///
	/// # Errors
	/// Returns an error if the orders differ.
	pub fn merge(&mut self, other: &Self) -> Result<(), GenError> {
		if self.order != other.order {
			return Err(GenError::OrderMismatch(self.order, other.order));
		}
		self.absorb(other);
		Ok(())
	}

	fn absorb(&mut self, other: &Self) {
		for (context, state) in &other.states {
			if let Some(existing) = self.states.get_mut(context) {
				existing.merge(state);
			} else {
				self.states.insert(context.clone(), state.clone());
			}
		}

		for start in &other.starting_states {
			if !self.starting_states.contains(start) {
				self.starting_states.push(start.clone());
			}
		}
	}

	fn random_starting_state(&mut self) -> Option<Vec<S>> {
		self.starting_states.choose(&mut self.rng).cloned()
	}
}

impl<S: Symbol + Send + 'static> SequenceModel<S> {
	/// Trains on a whole corpus using one worker thread per chunk.
	///
	/// The corpus is split into `cpus * 8` chunks, each chunk trains a
	/// partial model on its own thread, and partial models are merged back
	/// in chunk order so the result matches sequential training.
	pub fn train_parallel(&mut self, sequences: &[Vec<S>]) -> &mut Self {
		if sequences.is_empty() {
			return self;
		}

		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = sequences.len().div_ceil(chunks);

		let (tx, rx) = mpsc::channel();
		for (index, chunk) in sequences.chunks(chunk_size).enumerate() {
			let tx = tx.clone();
			let chunk: Vec<Vec<S>> = chunk.to_vec();
			let order = self.order;

			thread::spawn(move || {
				let mut partial_model = Self {
					order,
					states: BTreeMap::new(),
					starting_states: Vec::new(),
					rng: StdRng::seed_from_u64(0),
				};
				partial_model.train_all(&chunk);
				if tx.send((index, partial_model)).is_err() {
					warn!("partial model {index} dropped: receiver closed");
				}
			});
		}
		drop(tx);

		let mut partial_models: Vec<(usize, Self)> = rx.iter().collect();
		partial_models.sort_by_key(|(index, _)| *index);
		for (_, partial_model) in &partial_models {
			self.absorb(partial_model);
		}
		self
	}
}

impl<S: Symbol + Serialize> SequenceModel<S> {
	/// Encodes the learned tables into a compact binary snapshot.
	///
	/// The random generator state is not part of the snapshot.
	pub fn to_bytes(&self) -> Result<Vec<u8>, GenError> {
		Ok(postcard::to_stdvec(self)?)
	}
}

impl<S: Symbol + DeserializeOwned> SequenceModel<S> {
	/// Restores a model from a snapshot made by [`to_bytes`](Self::to_bytes).
	///
	/// The restored model gets a fresh OS-seeded random generator.
	///
	/// # Errors
	/// - `Snapshot` if the bytes do not decode
	/// - `CorruptSnapshot` if the decoded tables break the model invariants
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, GenError> {
		let mut model: Self = postcard::from_bytes(bytes)?;
		model.check_tables()?;
		for state in model.states.values_mut() {
			state.reindex();
		}
		Ok(model)
	}

	fn check_tables(&self) -> Result<(), GenError> {
		if self.order == 0 {
			return Err(GenError::CorruptSnapshot("order 0"));
		}
		if self.states.keys().any(|context| context.len() != self.order) {
			return Err(GenError::CorruptSnapshot("context length differs from order"));
		}
		if !self.states.values().all(State::is_consistent) {
			return Err(GenError::CorruptSnapshot("malformed successor table"));
		}
		if self.starting_states.iter().any(|start| start.len() != self.order) {
			return Err(GenError::CorruptSnapshot("starting state length differs from order"));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn trained(order: usize, sequence: &[i32], seed: u64) -> SequenceModel {
		let mut model = SequenceModel::new(order).unwrap().with_seed(seed);
		model.train(sequence);
		model
	}

	#[test]
	fn order_zero_is_rejected() {
		assert!(matches!(SequenceModel::<i32>::new(0), Err(GenError::InvalidOrder)));
	}

	#[test]
	fn train_records_windows_and_start() {
		let model = trained(1, &[60, 62, 64, 62, 60], 0);
		assert_eq!(model.starting_states(), &[vec![60]]);
		assert_eq!(model.successors(&[62]), vec![(60, 1), (64, 1)]);
		assert_eq!(model.successors(&[60]), vec![(62, 1)]);
		assert_eq!(model.successors(&[64]), vec![(62, 1)]);
		assert_eq!(model.context_count(), 3);
	}

	#[test]
	fn short_sequence_is_a_no_op() {
		let mut model: SequenceModel = SequenceModel::new(2).unwrap();
		model.train(&[1, 2]);
		assert!(model.is_empty());
		assert!(model.starting_states().is_empty());
		assert!(matches!(
			model.try_train(&[1]),
			Err(GenError::SequenceTooShort { len: 1, order: 2 })
		));
	}

	#[test]
	fn training_accumulates() {
		let mut model: SequenceModel = SequenceModel::new(1).unwrap();
		model.train(&[1, 2]).train(&[1, 2]).train(&[1, 3]);
		assert_eq!(model.successors(&[1]), vec![(2, 2), (3, 1)]);
		assert_eq!(model.starting_states(), &[vec![1]]);
	}

	#[test]
	fn generate_on_empty_model_is_empty() {
		let mut model: SequenceModel = SequenceModel::new(1).unwrap();
		assert!(matches!(model.try_generate(4, None), Err(GenError::EmptyModel)));
		assert!(model.generate(4, None).is_empty());
	}

	#[test]
	fn generate_has_exact_length() {
		let mut model = trained(2, &[1, 2, 3, 1, 2, 4, 1, 2, 3], 7);
		for length in 0..20 {
			assert_eq!(model.generate(length, None).len(), length);
		}
	}

	#[test]
	fn custom_start_of_wrong_length_falls_back_to_pool() {
		let mut model = trained(2, &[5, 6, 7], 1);
		let sequence = model.generate(3, Some(&[9]));
		assert_eq!(&sequence[..2], &[5, 6]);
	}

	#[test]
	fn custom_start_is_kept() {
		let mut model = trained(1, &[60, 62, 64, 62, 60], 2);
		let sequence = model.generate(6, Some(&[64]));
		assert_eq!(sequence[0], 64);
		assert_eq!(sequence[1], 62);
	}

	#[test]
	fn unknown_context_recovers_through_starting_states() {
		// 3 is only ever a successor, so reaching it forces a restart on 1.
		let mut model = trained(1, &[1, 3], 4);
		assert_eq!(model.generate(5, None), vec![1, 3, 1, 3, 1]);
	}

	#[test]
	fn walk_stops_early_without_starting_states() {
		let mut model: SequenceModel = SequenceModel::new(1).unwrap().with_seed(1);
		let mut rows = ProbabilityRows::new();
		rows.insert(1, BTreeMap::from([(2, 1.0)]));
		model.update_probabilities(&rows);

		assert!(matches!(model.try_generate(5, None), Err(GenError::NoStartState)));
		assert_eq!(model.generate(5, Some(&[1])), vec![1, 2]);
	}

	#[test]
	fn seeded_models_are_reproducible() {
		let corpus = [60, 62, 64, 65, 67, 65, 64, 62, 60, 64, 67, 72];
		let a = trained(1, &corpus, 42).generate(32, None);
		let b = trained(1, &corpus, 42).generate(32, None);
		assert_eq!(a, b);
	}

	#[test]
	fn themes_overwrite_evenly_spaced_windows() {
		let mut model = trained(1, &[0, 0], 0);
		let themes = vec![
			Theme::new("a", vec![1, 2]),
			Theme::new("empty", vec![]),
			Theme::new("b", vec![3, 4, 5, 6]),
		];
		// spacing = 9 / 3 = 3, windows at 0, 3 (skipped) and 6 (truncated)
		assert_eq!(model.generate_with_themes(9, &themes), vec![1, 2, 0, 0, 0, 0, 3, 4, 5]);
	}

	#[test]
	fn themes_without_list_return_base() {
		let mut model = trained(1, &[0, 0], 0);
		assert_eq!(model.generate_with_themes(3, &[]), vec![0, 0, 0]);
	}

	#[test]
	fn matrix_requires_first_order() {
		let model = trained(2, &[1, 2, 3], 0);
		assert!(model.probability_matrix().is_none());
		assert!(matches!(model.try_probability_matrix(), Err(GenError::UnsupportedOrder(2))));
	}

	#[test]
	fn matrix_counts_and_normalizes() {
		let model = trained(1, &[60, 62, 64, 62, 60], 0);
		let matrix = model.probability_matrix().unwrap();
		assert_eq!(matrix.states, vec![60, 62, 64]);
		assert_eq!(matrix.matrix[0], vec![0.0, 1.0, 0.0]);
		assert_eq!(matrix.matrix[1], vec![0.5, 0.0, 0.5]);
		assert_eq!(matrix.matrix[2], vec![0.0, 1.0, 0.0]);
	}

	#[test]
	fn matrix_keeps_sink_rows_at_zero() {
		let model = trained(1, &[1, 2], 0);
		let matrix = model.probability_matrix().unwrap();
		assert_eq!(matrix.matrix[1], vec![0.0, 0.0]);
	}

	#[test]
	fn update_rounds_probabilities_into_weights() {
		let mut model = trained(1, &[1, 2], 0);
		let mut rows = ProbabilityRows::new();
		rows.insert(1, BTreeMap::from([(2, 0.25), (3, 0.75), (4, 0.0)]));
		// Below 0.005 rounds to zero copies: unreachable.
		rows.insert(5, BTreeMap::from([(6, 0.004), (7, 0.5)]));
		rows.insert(8, BTreeMap::from([(9, 0.001)]));
		model.update_probabilities(&rows);

		assert_eq!(model.successors(&[1]), vec![(2, 25), (3, 75)]);
		assert_eq!(model.successors(&[5]), vec![(7, 50)]);
		assert!(model.successors(&[8]).is_empty());
		assert_eq!(model.context_count(), 2);
		assert_eq!(model.starting_states(), &[vec![1]]);
	}

	#[test]
	fn update_is_ignored_for_higher_orders() {
		let mut model = trained(2, &[1, 2, 3], 0);
		let mut rows = ProbabilityRows::new();
		rows.insert(1, BTreeMap::from([(2, 1.0)]));
		model.update_probabilities(&rows);
		assert_eq!(model.successors(&[1, 2]), vec![(3, 1)]);
	}

	#[test]
	fn matrix_rows_feed_back_into_update() {
		let mut model = trained(1, &[60, 62, 64, 62, 60], 0);
		let rows = model.probability_matrix().unwrap().to_rows();
		model.update_probabilities(&rows);
		assert_eq!(model.successors(&[62]), vec![(60, 50), (64, 50)]);
		assert_eq!(model.successors(&[60]), vec![(62, 100)]);
	}

	#[test]
	fn update_caps_huge_and_skips_non_finite_probabilities() {
		let mut model = trained(1, &[1, 2], 3);
		let mut rows = ProbabilityRows::new();
		rows.insert(1, BTreeMap::from([(2, 1e17), (3, 1e17)]));
		rows.insert(4, BTreeMap::from([(5, f64::INFINITY), (6, f64::NAN), (7, 0.5)]));
		model.update_probabilities(&rows);

		let cap = u32::MAX as usize;
		assert_eq!(model.successors(&[1]), vec![(2, cap), (3, cap)]);
		assert_eq!(model.successors(&[4]), vec![(7, 50)]);
		let sequence = model.generate(8, Some(&[1]));
		assert_eq!(sequence.len(), 8);
		assert!(matches!(sequence[1], 2 | 3));
	}

	#[test]
	fn merge_requires_same_order() {
		let mut a = trained(1, &[1, 2], 0);
		let b = trained(2, &[1, 2, 3], 0);
		assert!(matches!(a.merge(&b), Err(GenError::OrderMismatch(1, 2))));
	}

	#[test]
	fn merge_sums_and_unions() {
		let mut a = trained(1, &[1, 2], 0);
		let b = trained(1, &[3, 1, 2], 0);
		a.merge(&b).unwrap();
		assert_eq!(a.successors(&[1]), vec![(2, 2)]);
		assert_eq!(a.starting_states(), &[vec![1], vec![3]]);
	}

	#[test]
	fn parallel_training_matches_sequential() {
		let corpus: Vec<Vec<i32>> = (0..40).map(|i| vec![i % 5, (i + 1) % 7, i % 3, 2]).collect();

		let mut sequential: SequenceModel = SequenceModel::new(1).unwrap();
		sequential.train_all(&corpus);
		let mut parallel: SequenceModel = SequenceModel::new(1).unwrap();
		parallel.train_parallel(&corpus);

		assert_eq!(parallel.starting_states(), sequential.starting_states());
		assert_eq!(parallel.context_count(), sequential.context_count());
		for start in 0..5 {
			assert_eq!(parallel.successors(&[start]), sequential.successors(&[start]));
		}
	}

	#[test]
	fn snapshot_restores_tables() {
		let model = trained(2, &[1, 2, 3, 1, 2, 4], 0);
		let bytes = model.to_bytes().unwrap();
		let mut restored: SequenceModel = SequenceModel::from_bytes(&bytes).unwrap();

		assert_eq!(restored.order(), 2);
		assert_eq!(restored.successors(&[1, 2]), vec![(3, 1), (4, 1)]);
		assert_eq!(restored.generate(6, None).len(), 6);
	}

	#[test]
	fn snapshot_with_broken_order_is_rejected() {
		let model = trained(1, &[1, 2, 3], 0);
		let mut bytes = model.to_bytes().unwrap();
		// The order is the leading varint.
		assert_eq!(bytes[0], 1);

		bytes[0] = 3;
		assert!(matches!(SequenceModel::<i32>::from_bytes(&bytes), Err(GenError::CorruptSnapshot(_))));
		bytes[0] = 0;
		assert!(matches!(SequenceModel::<i32>::from_bytes(&bytes), Err(GenError::CorruptSnapshot(_))));
	}

	#[test]
	fn corrupted_snapshot_is_an_error() {
		assert!(matches!(SequenceModel::<i32>::from_bytes(&[0xff]), Err(GenError::Snapshot(_))));
	}
}
