use serde::{Deserialize, Serialize};

/// A note record as exchanged with the analysis and playback side.
///
/// The generators only ever look at the `pitch` projection of a melody;
/// timing and velocity are carried along so results can be re-paired with
/// them afterwards.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Note {
	/// MIDI-style pitch code.
	pub pitch: i32,
	/// Onset, in seconds.
	pub start_time: f64,
	/// Release, in seconds.
	pub end_time: f64,
	pub velocity: Option<u8>,
}

impl Note {
	pub fn new(pitch: i32, start_time: f64, end_time: f64) -> Self {
		Self { pitch, start_time, end_time, velocity: None }
	}

	/// Length of the note in seconds (never negative).
	pub fn duration(&self) -> f64 {
		(self.end_time - self.start_time).max(0.0)
	}
}

/// A short, named melodic fragment supplied from outside.
///
/// Used to overwrite windows of generated output, see
/// [`SequenceModel::generate_with_themes`](crate::model::sequence_model::SequenceModel::generate_with_themes).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Theme<S = i32> {
	pub name: String,
	pub notes: Vec<S>,
}

impl<S> Theme<S> {
	pub fn new(name: &str, notes: Vec<S>) -> Self {
		Self { name: name.to_owned(), notes }
	}
}

/// Projects a melody onto its symbol stream.
pub fn pitches(notes: &[Note]) -> Vec<i32> {
	notes.iter().map(|note| note.pitch).collect()
}

/// Replaces the pitches of `notes` position by position.
///
/// Timing and velocity are kept. The result is as long as the shorter of
/// the two inputs.
pub fn with_pitches(notes: &[Note], pitches: &[i32]) -> Vec<Note> {
	notes
		.iter()
		.zip(pitches)
		.map(|(note, &pitch)| Note { pitch, ..note.clone() })
		.collect()
}

/// Lays pitches end to end using the given durations (in seconds).
///
/// Negative durations are rests: they advance the clock without emitting a
/// note, matching the encoding produced by
/// [`Automaton::to_durations`](crate::automaton::cellular::Automaton::to_durations).
/// Pitches are consumed only by non-rest durations; iteration stops when
/// either input runs out.
pub fn from_pitches(pitches: &[i32], durations: &[f64]) -> Vec<Note> {
	let mut notes = Vec::new();
	let mut clock = 0.0;
	let mut pitch_iter = pitches.iter();

	for &duration in durations {
		if duration < 0.0 {
			clock += -duration;
			continue;
		}
		let Some(&pitch) = pitch_iter.next() else {
			break;
		};
		notes.push(Note::new(pitch, clock, clock + duration));
		clock += duration;
	}
	notes
}
