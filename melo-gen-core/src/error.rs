use thiserror::Error;

/// Conditions reported by the generators.
///
/// Most of these are soft failures: the plain (non `try_`) entry points log
/// them at warn level and answer with a safe default instead of returning
/// them. Only construction and configuration errors are surfaced directly.
#[derive(Debug, Error)]
pub enum GenError {
	/// A sequence model needs a context of at least one symbol.
	#[error("order must be >= 1")]
	InvalidOrder,

	/// The training sequence does not contain a single full transition.
	#[error("sequence of length {len} is too short for order {order}")]
	SequenceTooShort { len: usize, order: usize },

	/// Generation was requested before any transition was learned.
	#[error("model has no transitions")]
	EmptyModel,

	/// No usable seed: no valid start context given and the pool is empty.
	#[error("no starting state available")]
	NoStartState,

	/// Matrix operations are only defined for first-order models.
	#[error("operation requires order 1, model has order {0}")]
	UnsupportedOrder(usize),

	/// History row lookup out of range.
	#[error("row index {index} out of range for history of {len} rows")]
	InvalidIndex { index: usize, len: usize },

	/// `apply_to_music` was called before any derivation was produced.
	#[error("no derivation available, call generate first")]
	EmptyDerivation,

	/// An automaton row must contain at least one cell.
	#[error("automaton width must be >= 1")]
	ZeroWidth,

	/// A `[min, max]` range with `min > max` or out of the valid domain.
	#[error("invalid range [{min}, {max}]")]
	InvalidRange { min: f64, max: f64 },

	/// A rhythm gate needs exactly one duration per note.
	#[error("{notes} notes but {durations} durations")]
	LengthMismatch { notes: usize, durations: usize },

	/// Merging two models that do not share the same order.
	#[error("order mismatch: {0} vs {1}")]
	OrderMismatch(usize, usize),

	/// A decoded snapshot does not describe a valid model.
	#[error("corrupt snapshot: {0}")]
	CorruptSnapshot(&'static str),

	/// Model snapshot could not be encoded or decoded.
	#[error("snapshot error: {0}")]
	Snapshot(#[from] postcard::Error),
}
