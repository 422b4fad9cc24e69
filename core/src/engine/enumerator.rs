//! Depth-first enumeration of reachable positions, feeding each eligible one
//! to the classifier and collecting the resulting critical entries.

use indicatif::{ProgressBar, ProgressStyle};

use crate::engine::classifier;
use crate::error::GeneratorError;
use crate::{Config, Position, Solver};

/// A single entry destined for the serialized hash file: a position's key and
/// the column of its unique non-obvious winning move.
#[derive(Debug, Copy, Clone)]
pub struct CriticalEntry {
    pub key: u64,
    pub winning_column: u8,
}

/// Drives the depth-first traversal and owns the resulting critical entries.
pub struct Enumerator {
    solver: Solver,
    visited: usize,
    entries: Vec<CriticalEntry>,
    progress: ProgressBar,
}

impl Enumerator {
    /// The number of visited nodes between progress bar updates.
    const PROGRESS_STEP: usize = 1 << 16;

    /// Creates a new enumerator with an empty entry buffer and a transposition
    /// table sized per `config.tt_bits`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::TableTooLarge`] if `config.tt_bits` requests an
    /// unreasonably large table (see [`Solver::with_tt_size`]).
    pub fn new(config: &Config) -> Result<Enumerator, GeneratorError> {
        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap(),
        );

        Ok(Enumerator {
            solver: Solver::with_tt_size(config.tt_bits)?,
            visited: 0,
            entries: Vec::new(),
            progress,
        })
    }

    /// Runs the traversal to completion and returns the collected entries.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::BufferExhausted`] if the critical-entry buffer
    /// cannot grow to hold another entry.
    pub fn run(mut self, config: &Config) -> Result<Vec<CriticalEntry>, GeneratorError> {
        self.visit(&Position::new(), config)?;
        self.progress.finish_with_message(format!(
            "visited {} positions, found {} critical entries",
            self.visited,
            self.entries.len()
        ));
        Ok(self.entries)
    }

    fn visit(&mut self, position: &Position, config: &Config) -> Result<(), GeneratorError> {
        self.visited += 1;
        if self.visited % Self::PROGRESS_STEP == 0 {
            self.progress.tick();
            self.progress.set_message(format!(
                "visited {} positions, found {} critical entries",
                self.visited,
                self.entries.len()
            ));
        }

        if let Some(column) = classifier::analyze(&mut self.solver, config, position) {
            self.entries.try_reserve(1).map_err(|_| GeneratorError::BufferExhausted {
                capacity: self.entries.capacity(),
            })?;
            self.entries.push(CriticalEntry {
                key: position.get_key(),
                winning_column: column as u8,
            });
        }

        let ply = position.get_moves() as u8;
        if ply >= config.max_ply || position.can_win_next() {
            return Ok(());
        }

        for column in 0..Position::WIDTH {
            if position.is_playable(column) {
                let mut child = *position;
                child.play(column);
                self.visit(&child, config)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_window_above_the_traversal_depth_produces_no_entries() {
        // max_ply bounds the traversal itself, so a window starting above it
        // can never be reached regardless of min_ply.
        let config = Config { min_ply: 4, max_ply: 3, ..Config::default() };
        let entries = Enumerator::new(&config).unwrap().run(&config).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn a_shallow_window_terminates_and_yields_a_bounded_buffer() {
        let config = Config { min_ply: 2, max_ply: 4, ..Config::default() };
        let entries = Enumerator::new(&config).unwrap().run(&config).unwrap();
        // The full shallow tree has far fewer than a million reachable nodes,
        // so this is primarily a smoke test that the traversal terminates.
        assert!(entries.len() < 1_000_000);
    }

    #[test]
    fn an_unreasonable_tt_size_is_rejected_before_traversal_starts() {
        let config = Config { tt_bits: Solver::MAX_TT_BITS + 1, ..Config::default() };
        assert!(matches!(Enumerator::new(&config), Err(GeneratorError::TableTooLarge { .. })));
    }
}
