//! A library for enumerating and classifying critical Connect Four positions.
//!
//! This crate provides the building blocks for precomputing a database of
//! positions where exactly one legal move wins, every other move draws or
//! loses, and that winning move is neither an immediate four-in-a-row nor a
//! forced block of the opponent's immediate threat. The database is meant to
//! complement a runtime playing agent (out of scope here) that already
//! handles those obvious cases on its own.

mod board;
mod engine;
mod config;
mod error;

pub use engine::{
    Solver,
    TranspositionTable,
    MoveEntry,
    MoveSorter,
    CriticalEntry,
    Enumerator,
    classifier,
    serializer,
};
pub use board::{Position, PositionParsingError};
pub use config::Config;
pub use error::GeneratorError;
