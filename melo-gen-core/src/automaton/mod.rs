//! Elementary cellular automaton and its musical encodings.

/// Rule number to neighborhood lookup.
pub mod rule;

/// Evolution history plus rhythm, duration and pitch derivations.
pub mod cellular;
