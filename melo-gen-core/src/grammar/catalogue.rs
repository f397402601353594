use log::warn;

use super::rules::Grammar;

/// Name used when a requested grammar is unknown.
pub const DEFAULT_GRAMMAR: &str = "fibonacci";

/// Names of every predefined grammar, default first.
pub fn catalogue_names() -> &'static [&'static str] {
	&["fibonacci", "algae", "cantor", "koch", "sierpinski", "dragon"]
}

/// Looks up a predefined grammar by name (case-insensitive).
pub fn try_predefined(name: &str) -> Option<Grammar> {
	let grammar = match name.to_ascii_lowercase().as_str() {
		"fibonacci" => Grammar::from_text("A", "A->AB, B->A"),
		"algae" => Grammar::from_text("A", "A->AB, B->AA"),
		// Middle thirds become silence-like B runs.
		"cantor" => Grammar::from_text("A", "A->ABA, B->BBB"),
		"koch" => Grammar::from_text("F", "F->F+F-F-F+F"),
		"sierpinski" => Grammar::from_text("A", "A->B-A-B, B->A+B+A"),
		"dragon" => Grammar::from_text("FX", "X->X+YF+, Y->-FX-Y"),
		_ => return None,
	};
	Some(grammar)
}

/// Looks up a predefined grammar, falling back to [`DEFAULT_GRAMMAR`] with
/// a warning when the name is unknown.
pub fn predefined(name: &str) -> Grammar {
	match try_predefined(name) {
		Some(grammar) => grammar,
		None => {
			warn!("unknown grammar '{name}', using '{DEFAULT_GRAMMAR}'");
			fibonacci()
		}
	}
}

fn fibonacci() -> Grammar {
	Grammar::from_text("A", "A->AB, B->A")
}
