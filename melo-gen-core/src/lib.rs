//! Symbolic melody generation library.
//!
//! This crate provides three independent generators that consume a flat
//! pitch sequence and produce a new one:
//! - An order-k statistical sequence model with theme injection
//! - A string-rewriting grammar mapped onto melody segments
//! - An elementary cellular automaton deriving rhythms, durations and pitches
//!
//! Generators share no state. Failures caused by the shape of the data are
//! logged and answered with a safe default; every such operation also has a
//! `try_` variant returning the underlying [`error::GenError`].

/// Statistical sequence model.
pub mod model;

/// Grammar rewriting and pitch transforms.
pub mod grammar;

/// Cellular automaton generator.
pub mod automaton;

/// Note records exchanged with analysis and playback code.
pub mod note;

/// Generator settings and component builders.
pub mod settings;

/// Error type shared by every generator.
pub mod error;
