//! Statistical sequence generation.
//!
//! This module provides an order-k sequence model including:
//! - Context-to-successor statistics learned from training sequences (`SequenceModel`)
//! - Weighted successor sampling (`State`)
//! - First-order probability matrix export and overwrite (`ProbabilityMatrix`)

use std::fmt::Debug;

/// Order-k model: training, generation, themes, merging and snapshots.
pub mod sequence_model;

/// Dense first-order transition matrix.
pub mod matrix;

/// Successor statistics of a single context.
///
/// Not exposed publicly.
mod state;

/// Anything the statistical model can learn and generate.
///
/// Symbols are compared by value (element-wise for contexts) and need a
/// total order so that tables iterate deterministically.
pub trait Symbol: Clone + Ord + Debug {}

impl<T: Clone + Ord + Debug> Symbol for T {}
