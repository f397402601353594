//! Grammar-based sequence transformation.
//!
//! - Rule parsing and deterministic axiom expansion (`Grammar`)
//! - Per-symbol pitch transforms (`Transform`)
//! - A catalogue of named grammars
//! - Mapping a derivation onto a melody (`RewritingSystem`)

/// Grammar value type, rule parsing and expansion.
pub mod rules;

/// Closed set of pitch transforms and the default symbol vocabulary.
pub mod transform;

/// Predefined grammars selectable by name.
pub mod catalogue;

/// Expansion state and segment-wise mapping onto music.
pub mod rewriting;
