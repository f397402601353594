use std::collections::BTreeSet;

use melo_gen_core::automaton::cellular::{Automaton, parse_row};
use melo_gen_core::grammar::rewriting::RewritingSystem;
use melo_gen_core::grammar::transform::{Transform, TransformMap};
use melo_gen_core::model::sequence_model::SequenceModel;
use melo_gen_core::note::{self, Note, Theme};
use melo_gen_core::settings::Settings;

#[test]
fn first_order_walk_uses_observed_transitions() {
	let melody = [60, 62, 64, 62, 60];
	let observed: BTreeSet<(i32, i32)> = melody.windows(2).map(|w| (w[0], w[1])).collect();

	for seed in 0..50 {
		let mut model: SequenceModel = SequenceModel::new(1).unwrap().with_seed(seed);
		model.train(&melody);

		let sequence = model.generate(5, Some(&[60]));
		assert_eq!(sequence.len(), 5);
		assert_eq!(sequence[0], 60);
		for pair in sequence.windows(2) {
			// 60 -> 62 is both an observed move and the restart jump.
			assert!(observed.contains(&(pair[0], pair[1])), "unexpected move {pair:?}");
			assert!([60, 62, 64].contains(&pair[1]));
		}
	}
}

#[test]
fn fibonacci_grammar_two_iterations() {
	let mut system = RewritingSystem::from_text("A", "A->AB, B->A");
	assert_eq!(system.generate(2), "ABA");
}

#[test]
fn rule_90_draws_sierpinski_triangle() {
	let mut narrow = Automaton::new(90, 8).unwrap();
	narrow.evolve_multiple(3);
	let expected = ["00001000", "00010100", "00100010", "01010101"];
	for (row, pattern) in narrow.history().iter().zip(expected) {
		assert_eq!(row, &parse_row(pattern));
	}

	let mut wide = Automaton::new(90, 16).unwrap();
	wide.evolve_multiple(5);
	let expected = [
		"0000000010000000",
		"0000000101000000",
		"0000001000100000",
		"0000010101010000",
		"0000100000001000",
		"0001010000010100",
	];
	for (row, pattern) in wide.history().iter().zip(expected) {
		assert_eq!(row, &parse_row(pattern));
	}
}

#[test]
fn rule_30_first_generation() {
	let mut automaton = Automaton::new(30, 8).unwrap();
	let row0 = automaton.current().to_vec();
	let row1 = automaton.evolve().to_vec();
	assert_eq!(row0, parse_row("00001000"));
	assert_eq!(row1, parse_row("00011100"));
}

#[test]
fn themes_are_spliced_into_generated_melody() {
	let mut model: SequenceModel = SequenceModel::new(1).unwrap().with_seed(3);
	model.train(&[60, 62, 64, 65, 67, 65, 64, 62, 60]);

	let themes = vec![Theme::new("call", vec![72, 71]), Theme::new("answer", vec![48, 50, 52])];
	let sequence = model.generate_with_themes(10, &themes);
	assert_eq!(sequence.len(), 10);
	assert_eq!(&sequence[0..2], &[72, 71]);
	assert_eq!(&sequence[5..8], &[48, 50, 52]);
}

#[test]
fn generators_chain_over_note_records() {
	let melody: Vec<Note> = [60, 62, 64, 65, 67, 69, 71, 72]
		.iter()
		.enumerate()
		.map(|(i, &pitch)| Note::new(pitch, i as f64 * 0.5, (i + 1) as f64 * 0.5))
		.collect();

	let mut settings = Settings::default();
	settings.seed = Some(21);

	let mut model = settings.sequence_model().unwrap();
	model.train(&note::pitches(&melody));
	let generated = model.generate(melody.len(), None);

	let mut system = RewritingSystem::from_text("A", "A->AO, O->A");
	system.generate(3);
	let transforms = TransformMap::from([('O', Transform::OctaveShift(1))]);
	let transformed = system.apply_to_music(&generated, Some(&transforms));
	assert_eq!(transformed.len(), melody.len());

	let automaton = settings.automaton().unwrap();
	let shifted = automaton.apply_to_pitches(&transformed, None, settings.transposition_range);
	assert_eq!(shifted.len(), melody.len());

	let result = note::with_pitches(&melody, &shifted);
	assert_eq!(result.len(), melody.len());
	for (before, after) in melody.iter().zip(&result) {
		assert_eq!(before.start_time, after.start_time);
		assert!((0..=127).contains(&after.pitch));
	}
}

#[test]
fn automaton_rhythm_drives_note_timing() {
	let mut automaton = Automaton::new(30, 16).unwrap();
	automaton.evolve_multiple(6);

	let (min, max) = Settings::default().duration_range();
	let durations = automaton.to_durations(None, min, max);
	assert!(!durations.is_empty());

	let (low, high) = Settings::default().pitch_range();
	let pitches = automaton.generate_pitches(12, low, high);
	assert!(pitches.iter().all(|p| (low..=high).contains(p)));

	let notes = note::from_pitches(&pitches, &durations);
	let onsets = durations.iter().filter(|d| **d >= 0.0).count();
	assert_eq!(notes.len(), onsets.min(pitches.len()));
	for pair in notes.windows(2) {
		assert!(pair[0].end_time <= pair[1].start_time + 1e-9);
	}
}
