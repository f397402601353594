use melo_gen_core::grammar::transform::{Transform, TransformMap};
use melo_gen_core::model::sequence_model::SequenceModel;
use melo_gen_core::note::{self, Note, Theme};
use melo_gen_core::settings::Settings;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG=debug to follow fallbacks and skipped steps
    env_logger::init();

    // A short melody, as it would come out of the analysis side
    let melody: Vec<Note> = [60, 62, 64, 65, 67, 65, 64, 62, 60, 64, 67, 72, 67, 64, 60]
        .iter()
        .enumerate()
        .map(|(i, &pitch)| Note::new(pitch, i as f64 * 0.5, (i + 1) as f64 * 0.5))
        .collect();
    let pitches = note::pitches(&melody);

    // Shared settings: fixed seed for reproducible runs
    let mut settings = Settings::default();
    settings.seed = Some(2024);
    settings.order = 2;
    settings.grammar = "sierpinski".to_owned();
    settings.iterations = 3;
    settings.rule = 90;
    settings.set_pitch_range(55, 79)?;
    settings.set_duration_range(0.25, 1.0)?;

    // Statistical model
    let mut model = settings.sequence_model()?;
    model.train(&pitches);
    let generated = model.generate(16, None);
    println!("Markov ({} contexts): {:?}", model.context_count(), generated);

    let themes = vec![Theme::new("motif", vec![72, 71, 69]), Theme::new("cadence", vec![67, 65, 64, 60])];
    println!("With themes: {:?}", model.generate_with_themes(16, &themes));

    // Probability matrices only exist for first-order models
    let mut first_order: SequenceModel = SequenceModel::new(1)?.with_seed(7);
    first_order.train(&pitches);
    if let Some(matrix) = first_order.probability_matrix() {
        for (state, row) in matrix.states.iter().zip(&matrix.matrix) {
            println!("  {state:>3} -> {row:.2?}");
        }

        // Make every move toward the tonic twice as likely and feed it back
        let mut rows = matrix.to_rows();
        for targets in rows.values_mut() {
            if let Some(p) = targets.get_mut(&60) {
                *p *= 2.0;
            }
        }
        first_order.update_probabilities(&rows);
        println!("Reweighted: {:?}", first_order.generate(16, Some(&[60])));
    }

    // Grammar
    let mut system = settings.rewriting_system();
    println!("Derivation: {}", system.generate(settings.iterations));
    let transforms = TransformMap::from([
        ('A', Transform::Identity),
        ('B', Transform::Invert { axis: 64 }),
        ('+', Transform::Transpose(2)),
        ('-', Transform::ChordSnap(vec![0, 4, 7])),
    ]);
    let rewritten = system.apply_to_music(&generated, Some(&transforms));
    println!("Rewritten: {:?}", rewritten);

    // Cellular automaton
    let mut automaton = settings.automaton()?;
    for row in automaton.evolve_multiple(7) {
        let line: String = row.iter().map(|&cell| if cell { '#' } else { '.' }).collect();
        println!("  {line}");
    }

    let (min_duration, max_duration) = settings.duration_range();
    let durations = automaton.to_durations(Some(4), min_duration, max_duration);
    println!("Durations: {:?}", durations);

    let (min_pitch, max_pitch) = settings.pitch_range();
    let cell_pitches = automaton.generate_pitches(12, min_pitch, max_pitch);
    println!("Automaton pitches: {:?}", cell_pitches);

    let shifted = automaton.apply_to_pitches(&rewritten, None, settings.transposition_range);
    // One steady pulse per note, thinned out by the rhythm of row 3
    let pulse = vec![min_duration; shifted.len()];
    let gated = automaton.apply_to_sequence(&shifted, &pulse, Some(3));
    println!("Gated: {:?}", gated);

    // Back to note records for playback or export
    let result = note::from_pitches(&shifted, &durations);
    for n in &result {
        println!("  pitch {:>3}  {:.2}s -> {:.2}s", n.pitch, n.start_time, n.end_time);
    }

    Ok(())
}
