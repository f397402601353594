use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Nested `from -> (to -> probability)` map accepted by
/// [`SequenceModel::update_probabilities`](super::sequence_model::SequenceModel::update_probabilities).
pub type ProbabilityRows<S> = BTreeMap<S, BTreeMap<S, f64>>;

/// Dense first-order transition matrix.
///
/// `matrix[i][j]` is the probability of moving from `states[i]` to
/// `states[j]`.
///
/// # Invariants
/// - `states` is sorted ascending and free of duplicates
/// - `matrix` is square, with one row and one column per state
/// - each row sums to 1.0, or to 0.0 if the state has no outgoing transition
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProbabilityMatrix<S> {
	pub states: Vec<S>,
	pub matrix: Vec<Vec<f64>>,
}

impl<S: Clone + Ord> ProbabilityMatrix<S> {
	/// Builds a matrix from raw transition counts.
	///
	/// Rows are normalized by their sum; rows summing to zero stay all-zero.
	pub(crate) fn from_counts(states: Vec<S>, counts: Vec<Vec<usize>>) -> Self {
		let matrix = counts
			.into_iter()
			.map(|row| {
				let sum: usize = row.iter().sum();
				if sum == 0 {
					vec![0.0; row.len()]
				} else {
					row.into_iter().map(|count| count as f64 / sum as f64).collect()
				}
			})
			.collect();
		Self { states, matrix }
	}

	/// Returns the index of `state` in the sorted state list.
	pub fn index_of(&self, state: &S) -> Option<usize> {
		self.states.binary_search(state).ok()
	}

	/// Probability of the transition `from -> to`, `0.0` for unknown states.
	pub fn probability(&self, from: &S, to: &S) -> f64 {
		match (self.index_of(from), self.index_of(to)) {
			(Some(i), Some(j)) => self.matrix[i][j],
			_ => 0.0,
		}
	}

	/// Converts the dense matrix back into nested rows.
	///
	/// Every cell is kept, including zeros, so an edited matrix can be fed
	/// back into `update_probabilities` unchanged.
	pub fn to_rows(&self) -> ProbabilityRows<S> {
		self.states
			.iter()
			.zip(&self.matrix)
			.map(|(from, row)| {
				let targets = self.states.iter().cloned().zip(row.iter().copied()).collect();
				(from.clone(), targets)
			})
			.collect()
	}
}
