use serde::{Deserialize, Serialize};

/// Lookup from a 3-cell neighborhood to the next state of the center cell.
///
/// Entry `p` holds bit `p` of the rule number, `p` being the neighborhood
/// read as a 3-bit number `left center right`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleTable([bool; 8]);

impl RuleTable {
	pub fn new(rule: u8) -> Self {
		let mut table = [false; 8];
		for (pattern, entry) in table.iter_mut().enumerate() {
			*entry = (rule >> pattern) & 1 == 1;
		}
		Self(table)
	}

	/// Next state of a cell given its neighborhood.
	pub fn next(&self, left: bool, center: bool, right: bool) -> bool {
		let pattern = (usize::from(left) << 2) | (usize::from(center) << 1) | usize::from(right);
		self.0[pattern]
	}

	/// The 8 entries, indexed by neighborhood pattern.
	pub fn entries(&self) -> &[bool; 8] {
		&self.0
	}
}
