use log::warn;

use super::rule::RuleTable;
use crate::error::GenError;
use crate::grammar::transform::clamp_pitch;
use crate::settings::check_duration_range;

/// Default half-width of the density window used by `apply_to_pitches`.
pub const DEFAULT_NEIGHBORHOOD: usize = 2;

/// Elementary 1-D cellular automaton with a periodic boundary.
///
/// # Responsibilities
/// - Evolve a fixed-width binary row under an 8-bit rule, keeping every
///   generation in an append-only history
/// - Derive rhythms, durations and pitch material from that history
///
/// # Invariants
/// - `width >= 1` and every row of `history` has exactly `width` cells
/// - `history` is never empty; index 0 is the initial row
#[derive(Clone, Debug)]
pub struct Automaton {
	rule: u8,
	width: usize,
	table: RuleTable,
	/// Half-width of the density window used by `apply_to_pitches`.
	neighborhood: usize,
	history: Vec<Vec<bool>>,
}

impl Automaton {
	/// Creates an automaton whose initial row has a single active cell at
	/// index `width / 2`.
	///
	/// # Errors
	/// Returns an error if `width == 0`.
	pub fn new(rule: u8, width: usize) -> Result<Self, GenError> {
		Self::with_initial(rule, width, &[])
	}

	/// Creates an automaton starting from `initial`.
	///
	/// An initial row whose length differs from `width` is ignored and the
	/// single-cell seed of [`new`](Self::new) is used instead.
	///
	/// # Errors
	/// Returns an error if `width == 0`.
	pub fn with_initial(rule: u8, width: usize, initial: &[bool]) -> Result<Self, GenError> {
		if width == 0 {
			return Err(GenError::ZeroWidth);
		}

		let first = if initial.len() == width {
			initial.to_vec()
		} else {
			let mut row = vec![false; width];
			row[width / 2] = true;
			row
		};

		Ok(Self {
			rule,
			width,
			table: RuleTable::new(rule),
			neighborhood: DEFAULT_NEIGHBORHOOD,
			history: vec![first],
		})
	}

	/// Sets the half-width of the density window used by `apply_to_pitches`.
	pub fn with_neighborhood(mut self, neighborhood: usize) -> Self {
		self.neighborhood = neighborhood;
		self
	}

	pub fn rule(&self) -> u8 {
		self.rule
	}

	pub fn width(&self) -> usize {
		self.width
	}

	pub fn neighborhood(&self) -> usize {
		self.neighborhood
	}

	pub fn rule_table(&self) -> &RuleTable {
		&self.table
	}

	/// Every generation so far, oldest first.
	pub fn history(&self) -> &[Vec<bool>] {
		&self.history
	}

	/// The most recent generation.
	pub fn current(&self) -> &[bool] {
		// history is never empty
		&self.history[self.history.len() - 1]
	}

	/// Computes the next generation and appends it to the history.
	///
	/// Every cell is computed from the previous row only; the left neighbor
	/// of cell 0 is the last cell and the right neighbor of the last cell is
	/// cell 0.
	pub fn evolve(&mut self) -> &[bool] {
		let current = self.current();
		let width = self.width;
		let next: Vec<bool> = (0..width)
			.map(|i| {
				let left = current[(i + width - 1) % width];
				let right = current[(i + 1) % width];
				self.table.next(left, current[i], right)
			})
			.collect();

		self.history.push(next);
		self.current()
	}

	/// Evolves `steps` times and returns the new rows, oldest first.
	pub fn evolve_multiple(&mut self, steps: usize) -> Vec<Vec<bool>> {
		(0..steps).map(|_| self.evolve().to_vec()).collect()
	}

	/// Looks up a history row, `None` meaning the latest one.
	///
	/// # Errors
	/// Returns `InvalidIndex` if `row` is past the end of the history.
	pub fn try_row(&self, row: Option<usize>) -> Result<&[bool], GenError> {
		match row {
			None => Ok(self.current()),
			Some(index) => self
				.history
				.get(index)
				.map(Vec::as_slice)
				.ok_or(GenError::InvalidIndex { index, len: self.history.len() }),
		}
	}

	/// Returns a history row as a rhythm mask, or an empty mask for an
	/// invalid index.
	pub fn to_rhythm(&self, row: Option<usize>) -> Vec<bool> {
		match self.try_row(row) {
			Ok(cells) => cells.to_vec(),
			Err(e) => {
				warn!("rhythm unavailable: {e}");
				Vec::new()
			}
		}
	}

	/// Encodes a history row as a flat list of note and rest durations.
	///
	/// Each active cell starts a note lasting until the next active cell.
	/// Its run-length, counted in cells, is mapped linearly from
	/// `[1, width / 2]` onto `[min_duration, max_duration]` (and clamped to
	/// it). Inactive cells before the first onset add `min_duration` each to
	/// a rest, emitted as a negative value before the next note or at the
	/// end of the row.
	///
	/// # Errors
	/// - `InvalidIndex` if `row` is past the end of the history
	/// - `InvalidRange` unless `0 < min_duration <= max_duration`
	pub fn try_to_durations(&self, row: Option<usize>, min_duration: f64, max_duration: f64) -> Result<Vec<f64>, GenError> {
		check_duration_range(min_duration, max_duration)?;
		let cells = self.try_row(row)?;
		let max_run = self.width / 2;

		let map_run = |run: usize| -> f64 {
			if max_run <= 1 {
				return min_duration;
			}
			let t = (run - 1) as f64 / (max_run - 1) as f64;
			(min_duration + t * (max_duration - min_duration)).clamp(min_duration, max_duration)
		};

		let mut durations = Vec::new();
		let mut rest = 0.0;
		let mut i = 0;
		while i < cells.len() {
			if cells[i] {
				if rest > 0.0 {
					durations.push(-rest);
					rest = 0.0;
				}
				let mut run = 1;
				while i + run < cells.len() && !cells[i + run] {
					run += 1;
				}
				durations.push(map_run(run));
				i += run;
			} else {
				rest += min_duration;
				i += 1;
			}
		}
		if rest > 0.0 {
			durations.push(-rest);
		}

		Ok(durations)
	}

	/// Duration encoding of a history row, empty for an invalid index or
	/// duration range.
	///
	/// See [`try_to_durations`](Self::try_to_durations).
	pub fn to_durations(&self, row: Option<usize>, min_duration: f64, max_duration: f64) -> Vec<f64> {
		match self.try_to_durations(row, min_duration, max_duration) {
			Ok(durations) => durations,
			Err(e) => {
				warn!("durations unavailable: {e}");
				Vec::new()
			}
		}
	}

	/// Keeps the `(note, duration)` pairs falling on active cells.
	///
	/// The row is repeated end to end to cover every note. Notes and
	/// durations are paired position by position.
	///
	/// # Errors
	/// - `InvalidIndex` if `row` is past the end of the history
	/// - `LengthMismatch` if there is not exactly one duration per note
	pub fn try_apply_to_sequence<N: Clone, D: Clone>(
		&self,
		notes: &[N],
		durations: &[D],
		row: Option<usize>,
	) -> Result<Vec<(N, D)>, GenError> {
		if notes.len() != durations.len() {
			return Err(GenError::LengthMismatch { notes: notes.len(), durations: durations.len() });
		}
		let cells = self.try_row(row)?;
		Ok(notes
			.iter()
			.zip(durations)
			.enumerate()
			.filter(|(i, _)| cells[i % cells.len()])
			.map(|(_, (note, duration))| (note.clone(), duration.clone()))
			.collect())
	}

	/// Gates a melody by a history row, leaving it ungated for an invalid
	/// index. Mismatched lengths are paired up to the shorter of the two.
	///
	/// See [`try_apply_to_sequence`](Self::try_apply_to_sequence).
	pub fn apply_to_sequence<N: Clone, D: Clone>(&self, notes: &[N], durations: &[D], row: Option<usize>) -> Vec<(N, D)> {
		match self.try_apply_to_sequence(notes, durations, row) {
			Ok(pairs) => pairs,
			Err(e) => {
				warn!("rhythm gate skipped: {e}");
				notes.iter().cloned().zip(durations.iter().cloned()).collect()
			}
		}
	}

	/// Transposes each pitch by the local density of a history row.
	///
	/// The row is tiled to the length of `pitches`. For position `i`, the
	/// active cells in `[i - neighborhood, i + neighborhood]` (wrapping
	/// around the tiled row) are counted, the count is mapped linearly from
	/// `[0, 2 * neighborhood + 1]` onto `[-range, range]`, rounded, and added
	/// to the pitch. Results are clamped to the valid pitch range.
	///
	/// # Errors
	/// Returns `InvalidIndex` if `row` is past the end of the history.
	pub fn try_apply_to_pitches(&self, pitches: &[i32], row: Option<usize>, range: i32) -> Result<Vec<i32>, GenError> {
		let cells = self.try_row(row)?;
		let len = pitches.len();
		let tiled: Vec<bool> = (0..len).map(|i| cells[i % cells.len()]).collect();

		let radius = self.neighborhood as isize;
		let window = (2 * self.neighborhood + 1) as f64;
		let range = f64::from(range);

		Ok(pitches
			.iter()
			.enumerate()
			.map(|(i, &pitch)| {
				let active = (-radius..=radius)
					.filter(|offset| tiled[(i as isize + offset).rem_euclid(len as isize) as usize])
					.count();
				let shift = (-range + active as f64 / window * 2.0 * range).round() as i32;
				clamp_pitch(pitch.saturating_add(shift))
			})
			.collect())
	}

	/// Density transposition, leaving the pitches unchanged for an invalid
	/// index.
	///
	/// See [`try_apply_to_pitches`](Self::try_apply_to_pitches).
	pub fn apply_to_pitches(&self, pitches: &[i32], row: Option<usize>, range: i32) -> Vec<i32> {
		match self.try_apply_to_pitches(pitches, row, range) {
			Ok(result) => result,
			Err(e) => {
				warn!("pitch transposition skipped: {e}");
				pitches.to_vec()
			}
		}
	}

	/// Derives `length` pitches from the density of successive generations.
	///
	/// Evolves until the history holds at least `length` rows. Pitch `i`
	/// maps the active-cell ratio of row `i` onto `[min_pitch, max_pitch]`,
	/// rounded down.
	pub fn generate_pitches(&mut self, length: usize, min_pitch: i32, max_pitch: i32) -> Vec<i32> {
		while self.history.len() < length {
			self.evolve();
		}

		let span = f64::from(max_pitch) - f64::from(min_pitch);
		(0..length)
			.map(|i| {
				let density = density(&self.history[i % self.history.len()]);
				(f64::from(min_pitch) + density * span).floor() as i32
			})
			.collect()
	}
}

/// Ratio of active cells in a row, `0.0` for an empty row.
pub fn density(cells: &[bool]) -> f64 {
	if cells.is_empty() {
		return 0.0;
	}
	cells.iter().filter(|&&cell| cell).count() as f64 / cells.len() as f64
}

/// Parses a row written as `0`/`1` characters, ignoring anything else.
pub fn parse_row(text: &str) -> Vec<bool> {
	text.chars()
		.filter_map(|c| match c {
			'0' => Some(false),
			'1' => Some(true),
			_ => None,
		})
		.collect()
}
