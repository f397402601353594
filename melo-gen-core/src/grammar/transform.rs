use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Lowest valid pitch code.
pub const MIN_PITCH: i32 = 0;
/// Highest valid pitch code.
pub const MAX_PITCH: i32 = 127;

/// Symbol -> transform lookup used when mapping a derivation onto music.
pub type TransformMap = BTreeMap<char, Transform>;

/// A pitch transformation attached to a grammar symbol.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Transform {
	Identity,
	/// Shift by a number of semitones.
	Transpose(i32),
	/// Mirror around a fixed pitch.
	Invert { axis: i32 },
	/// Shift by a number of octaves.
	OctaveShift(i32),
	/// Move to the nearest pitch whose pitch class (0..12) is in the set.
	ChordSnap(Vec<i32>),
	/// Random detuning of up to the given number of semitones, either way.
	RandomJitter(i32),
}

impl Transform {
	/// Applies the transform to one pitch.
	///
	/// Every variant except `Identity` clamps its result to the valid pitch
	/// range. Only `RandomJitter` draws from `rng`.
	pub fn apply<R: Rng + ?Sized>(&self, pitch: i32, rng: &mut R) -> i32 {
		match self {
			Transform::Identity => pitch,
			Transform::Transpose(semitones) => clamp_pitch(pitch.saturating_add(*semitones)),
			Transform::Invert { axis } => clamp_pitch(axis.saturating_mul(2).saturating_sub(pitch)),
			Transform::OctaveShift(octaves) => clamp_pitch(pitch.saturating_add(octaves.saturating_mul(12))),
			Transform::ChordSnap(classes) => clamp_pitch(snap_to_classes(pitch, classes)),
			Transform::RandomJitter(range) => {
				let range = range.saturating_abs();
				clamp_pitch(pitch.saturating_add(rng.random_range(-range..=range)))
			}
		}
	}
}

/// Clamps a pitch into `[MIN_PITCH, MAX_PITCH]`.
pub fn clamp_pitch(pitch: i32) -> i32 {
	pitch.clamp(MIN_PITCH, MAX_PITCH)
}

/// Nearest pitch belonging to one of the pitch classes, ties going down.
fn snap_to_classes(pitch: i32, classes: &[i32]) -> i32 {
	if classes.is_empty() {
		return pitch;
	}
	let in_set = |p: i32| classes.iter().any(|class| class.rem_euclid(12) == p.rem_euclid(12));
	for distance in 0..12 {
		let below = pitch.saturating_sub(distance);
		if in_set(below) {
			return below;
		}
		let above = pitch.saturating_add(distance);
		if in_set(above) {
			return above;
		}
	}
	pitch
}

/// Transform vocabulary used when the caller does not supply one.
///
/// | symbol | transform |
/// |---|---|
/// | `A` | identity |
/// | `B` | up a fifth |
/// | `C` | down a fourth |
/// | `F` | up a tone |
/// | `G` | down a tone |
/// | `+` / `-` | up / down a minor third |
/// | `I` | inversion around middle C |
/// | `O` / `o` | octave up / down |
/// | `H` | snap to the C major triad |
/// | `J` | detune by up to one semitone |
pub fn default_transforms() -> TransformMap {
	BTreeMap::from([
		('A', Transform::Identity),
		('B', Transform::Transpose(7)),
		('C', Transform::Transpose(-5)),
		('F', Transform::Transpose(2)),
		('G', Transform::Transpose(-2)),
		('+', Transform::Transpose(3)),
		('-', Transform::Transpose(-3)),
		('I', Transform::Invert { axis: 60 }),
		('O', Transform::OctaveShift(1)),
		('o', Transform::OctaveShift(-1)),
		('H', Transform::ChordSnap(vec![0, 4, 7])),
		('J', Transform::RandomJitter(1)),
	])
}
