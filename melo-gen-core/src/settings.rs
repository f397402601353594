use serde::{Deserialize, Serialize};

use crate::automaton::cellular::{Automaton, DEFAULT_NEIGHBORHOOD};
use crate::error::GenError;
use crate::grammar::catalogue::DEFAULT_GRAMMAR;
use crate::grammar::rewriting::RewritingSystem;
use crate::grammar::transform::{MAX_PITCH, MIN_PITCH};
use crate::model::sequence_model::SequenceModel;

/// Parameters shared by a generation session.
///
/// `Settings` holds both the **component configuration** (model order,
/// grammar name, automaton rule and width) and the **output ranges** used
/// when deriving pitches and durations.
///
/// # Responsibilities
/// - Keep plain parameters as public fields
/// - Validate ranges through setters so `min <= max` always holds
/// - Build each generator from the current parameters
///
/// # Invariants
/// - `MIN_PITCH <= min_pitch <= max_pitch <= MAX_PITCH`
/// - `0.0 < min_duration <= max_duration`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
	/// Context length of the sequence model.
	pub order: usize,

	/// Seed shared by every built component; `None` seeds from the OS.
	pub seed: Option<u64>,

	/// Catalogue name of the grammar.
	pub grammar: String,

	/// Number of grammar rewriting iterations.
	pub iterations: usize,

	/// Elementary automaton rule number.
	pub rule: u8,

	/// Automaton row width.
	pub width: usize,

	/// Half-width of the automaton density window.
	pub neighborhood: usize,

	/// Maximum transposition (in semitones) applied from automaton density.
	pub transposition_range: i32,

	min_pitch: i32,
	max_pitch: i32,

	min_duration: f64,
	max_duration: f64,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			order: 1,
			seed: None,
			grammar: DEFAULT_GRAMMAR.to_owned(),
			iterations: 4,
			rule: 30,
			width: 16,
			neighborhood: DEFAULT_NEIGHBORHOOD,
			transposition_range: 5,
			min_pitch: 48,
			max_pitch: 84,
			min_duration: 0.25,
			max_duration: 1.0,
		}
	}
}

impl Settings {
	pub fn pitch_range(&self) -> (i32, i32) {
		(self.min_pitch, self.max_pitch)
	}

	pub fn duration_range(&self) -> (f64, f64) {
		(self.min_duration, self.max_duration)
	}

	/// Sets the pitch range used for derived pitches.
	///
	/// # Errors
	/// Returns an error if `min > max` or either bound is outside the
	/// valid pitch range.
	pub fn set_pitch_range(&mut self, min: i32, max: i32) -> Result<(), GenError> {
		check_pitch_range(min, max)?;
		self.min_pitch = min;
		self.max_pitch = max;
		Ok(())
	}

	/// Sets the note duration range (in seconds).
	///
	/// # Errors
	/// Returns an error if `min > max` or `min` is not strictly positive.
	pub fn set_duration_range(&mut self, min: f64, max: f64) -> Result<(), GenError> {
		check_duration_range(min, max)?;
		self.min_duration = min;
		self.max_duration = max;
		Ok(())
	}

	/// Re-checks the invariants, for values obtained by deserialization.
	pub fn validate(&self) -> Result<(), GenError> {
		check_pitch_range(self.min_pitch, self.max_pitch)?;
		check_duration_range(self.min_duration, self.max_duration)?;
		if self.order == 0 {
			return Err(GenError::InvalidOrder);
		}
		if self.width == 0 {
			return Err(GenError::ZeroWidth);
		}
		Ok(())
	}

	/// Builds an empty sequence model of the configured order.
	pub fn sequence_model(&self) -> Result<SequenceModel, GenError> {
		let model = SequenceModel::new(self.order)?;
		Ok(match self.seed {
			Some(seed) => model.with_seed(seed),
			None => model,
		})
	}

	/// Builds the configured catalogue grammar.
	pub fn rewriting_system(&self) -> RewritingSystem {
		let system = RewritingSystem::predefined(&self.grammar);
		match self.seed {
			Some(seed) => system.with_seed(seed),
			None => system,
		}
	}

	/// Builds an automaton with the configured rule, width and neighborhood.
	pub fn automaton(&self) -> Result<Automaton, GenError> {
		Ok(Automaton::new(self.rule, self.width)?.with_neighborhood(self.neighborhood))
	}
}

fn check_pitch_range(min: i32, max: i32) -> Result<(), GenError> {
	if min > max || min < MIN_PITCH || max > MAX_PITCH {
		return Err(GenError::InvalidRange { min: f64::from(min), max: f64::from(max) });
	}
	Ok(())
}

// Also rejects NaN bounds.
pub(crate) fn check_duration_range(min: f64, max: f64) -> Result<(), GenError> {
	if !(min > 0.0 && min <= max) {
		return Err(GenError::InvalidRange { min, max });
	}
	Ok(())
}
