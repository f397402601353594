use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

/// Arrow notations accepted between a symbol and its replacement.
const ARROWS: [&str; 2] = ["->", "→"];

/// Separators between rule entries.
const SEPARATORS: [char; 2] = [',', ';'];

/// A string-rewriting grammar: an axiom and one replacement per symbol.
///
/// Symbols without a rule rewrite to themselves, so an incomplete rule set
/// never blocks an expansion.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Grammar {
	pub axiom: String,
	pub rules: BTreeMap<char, String>,
}

impl Grammar {
	pub fn new(axiom: &str, rules: BTreeMap<char, String>) -> Self {
		Self { axiom: axiom.to_owned(), rules }
	}

	/// Builds a grammar from an axiom and a textual rule list.
	///
	/// See [`parse_rules`] for the accepted syntax.
	pub fn from_text(axiom: &str, rules: &str) -> Self {
		Self::new(axiom, parse_rules(rules))
	}

	/// Applies the rules `iterations` times to the axiom.
	///
	/// Every symbol of the current string is replaced in parallel, symbols
	/// without a rule are copied unchanged. Deterministic.
	pub fn expand(&self, iterations: usize) -> String {
		let mut current = self.axiom.clone();
		for _ in 0..iterations {
			let mut next = String::with_capacity(current.len() * 2);
			for symbol in current.chars() {
				match self.rules.get(&symbol) {
					Some(replacement) => next.push_str(replacement),
					None => next.push(symbol),
				}
			}
			current = next;
		}
		current
	}
}

/// Parses a compact rule list such as `"A->AB, B->A"` or `"F→F+F; +→+"`.
///
/// - entries are separated by `,` or `;`
/// - each entry is `symbol -> replacement`, with `->` or `→` as the arrow
/// - surrounding whitespace is ignored, an empty replacement erases the symbol
/// - the left-hand side must be exactly one character
///
/// Malformed entries are dropped with a warning; a later entry for the same
/// symbol replaces an earlier one.
pub fn parse_rules(text: &str) -> BTreeMap<char, String> {
	let mut rules = BTreeMap::new();

	for entry in text.split(SEPARATORS) {
		let entry = entry.trim();
		if entry.is_empty() {
			continue;
		}

		let Some((lhs, rhs)) = split_arrow(entry) else {
			warn!("rule '{entry}' dropped: missing arrow");
			continue;
		};

		let mut symbols = lhs.trim().chars();
		match (symbols.next(), symbols.next()) {
			(Some(symbol), None) => {
				rules.insert(symbol, rhs.trim().to_owned());
			}
			_ => warn!("rule '{entry}' dropped: left-hand side must be a single symbol"),
		}
	}

	rules
}

/// Splits an entry at its first arrow, whichever notation comes first.
fn split_arrow(entry: &str) -> Option<(&str, &str)> {
	ARROWS
		.iter()
		.filter_map(|arrow| entry.find(arrow).map(|at| (at, arrow.len())))
		.min_by_key(|(at, _)| *at)
		.map(|(at, len)| (&entry[..at], &entry[at + len..]))
}
