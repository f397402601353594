use rand::Rng;

use serde::{Deserialize, Serialize};

/// Successor statistics for a single context of a sequence model.
///
/// A `State` stores every symbol observed right after one context, together
/// with how many times it was observed. Conceptually this is the multiset of
/// successors: a symbol seen three times weighs three times as much as a
/// symbol seen once.
///
/// ## Responsibilities:
/// - Accumulate successor occurrences during training
/// - Predict the next symbol using weighted random sampling
/// - Merge with the statistics of the same context from another model
///
/// ## Invariants
/// - `successors` is sorted and free of duplicates
/// - `counts[i]` is the (strictly positive) weight of `successors[i]`
/// - `cumulative[i]` is the sum of `counts[..=i]`, rebuilt after each mutation
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct State<S> {
	successors: Vec<S>,
	counts: Vec<usize>,
	/// Prefix sums of `counts`, used for binary-search sampling.
	#[serde(skip)]
	cumulative: Vec<usize>,
}

impl<S: Clone + Ord> State<S> {
	/// Creates a new state without successors.
	pub fn new() -> Self {
		Self {
			successors: Vec::new(),
			counts: Vec::new(),
			cumulative: Vec::new(),
		}
	}

	/// Records one more occurrence of `next`.
	pub fn add_transition(&mut self, next: S) {
		self.add_transitions(next, 1);
	}

	/// Records `occurrence` occurrences of `next` at once.
	///
	/// A zero occurrence is ignored so the weights stay strictly positive.
	/// Weights saturate at `usize::MAX` instead of overflowing.
	pub fn add_transitions(&mut self, next: S, occurrence: usize) {
		if occurrence == 0 {
			return;
		}
		match self.successors.binary_search(&next) {
			Ok(index) => self.counts[index] = self.counts[index].saturating_add(occurrence),
			Err(index) => {
				self.successors.insert(index, next);
				self.counts.insert(index, occurrence);
			}
		}
		self.reindex();
	}

	/// Rebuilds the cumulative weight table.
	///
	/// Must be called after deserialization, the table is not persisted.
	pub fn reindex(&mut self) {
		self.cumulative.clear();
		let mut total: usize = 0;
		for &count in &self.counts {
			total = total.saturating_add(count);
			self.cumulative.push(total);
		}
	}

	/// Checks the invariants of a state restored from a snapshot.
	pub fn is_consistent(&self) -> bool {
		!self.successors.is_empty()
			&& self.successors.len() == self.counts.len()
			&& self.successors.windows(2).all(|pair| pair[0] < pair[1])
			&& self.counts.iter().all(|&count| count > 0)
	}

	/// Returns `true` if no successor was recorded.
	pub fn is_empty(&self) -> bool {
		self.successors.is_empty()
	}

	/// Total number of recorded occurrences.
	pub fn total(&self) -> usize {
		self.cumulative.last().copied().unwrap_or(0)
	}

	/// Iterates over `(successor, count)` pairs in ascending successor order.
	pub fn iter(&self) -> impl Iterator<Item=(&S, usize)> {
		self.successors.iter().zip(self.counts.iter().copied())
	}

	/// Predicts the next symbol using weighted random sampling.
	///
	/// The probability of a successor is proportional to its count. The
	/// bucket is located with a binary search over the cumulative table.
	///
	/// Returns `None` if the state has no successors.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<S> {
		let total = self.total();
		if total == 0 {
			return None;
		}

		let r = rng.random_range(0..total);
		let index = self.cumulative.partition_point(|&bound| bound <= r);
		self.successors.get(index).cloned()
	}

	/// Merges the successors of `other` into this state, summing counts.
	pub fn merge(&mut self, other: &Self) {
		for (next, occurrence) in other.iter() {
			self.add_transitions(next.clone(), occurrence);
		}
	}
}
