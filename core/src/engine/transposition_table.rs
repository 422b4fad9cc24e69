//! A transposition table implementation for storing and retrieving weak-solver scores.

use crate::Position;

/// A single entry in the transposition table: a partial key and a packed score.
///
/// A `value` of `0` denotes an empty slot, since a real stored score is always biased
/// away from zero (see [`TranspositionTable::put`]).
#[derive(Debug, Default, Copy, Clone)]
struct TTEntry {
    /// The low 32 bits of the position's key, used to verify the entry on lookup.
    key: u32,
    /// The position's score, biased by `-Position::MIN_SCORE + 1` so that `0` is free
    /// to mean "empty".
    value: u8,
}

/// A fixed-size, always-replace transposition table mapping position keys to weak
/// scores (win / draw / loss, not exact distances).
///
/// Unlike a strong solver's transposition table, entries here carry no search depth or
/// bound flag: the weak solver's null-window search treats every stored value as usable
/// within the window that produced it, so a plain always-replace cache is sufficient.
#[derive(Debug)]
pub struct TranspositionTable {
    entries: Vec<TTEntry>,
    size: usize,
}

impl TranspositionTable {
    /// The default number of entries in the table: 2^23, as specified.
    pub const DEFAULT_SIZE: usize = 1 << 23;

    /// Creates a new empty transposition table with the default size.
    pub fn new() -> TranspositionTable {
        Self::with_size(Self::DEFAULT_SIZE)
    }

    /// Creates a new empty transposition table with a given number of slots.
    ///
    /// `size` must be a power of two.
    pub fn with_size(size: usize) -> TranspositionTable {
        debug_assert!(size.is_power_of_two());
        TranspositionTable {
            entries: vec![TTEntry::default(); size],
            size,
        }
    }

    /// Returns the number of slots in the table.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Calculates the table index for a given position's key.
    #[inline(always)]
    fn index(&self, key: u64) -> usize {
        (key as usize) & (self.size - 1)
    }

    /// Clears the table by zero-filling every slot.
    pub fn reset(&mut self) {
        self.entries.fill(TTEntry::default());
    }

    /// Stores a position's score, overwriting any existing entry at the calculated index.
    pub fn put(&mut self, key: u64, value: i8) {
        let pos = self.index(key);
        self.entries[pos] = TTEntry {
            key: key as u32,
            value: (value - Position::MIN_SCORE + 1) as u8,
        };
    }

    /// Retrieves a position's score if it exists in the table.
    pub fn get(&self, key: u64) -> Option<i8> {
        let pos = self.index(key);
        let entry = &self.entries[pos];

        if entry.value != 0 && entry.key == key as u32 {
            Some(entry.value as i8 + Position::MIN_SCORE - 1)
        } else {
            None
        }
    }
}

/// Default constructor for the `TranspositionTable` struct.
impl Default for TranspositionTable {
    fn default() -> TranspositionTable {
        TranspositionTable::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_misses_every_key() {
        let tt = TranspositionTable::with_size(1 << 10);
        assert_eq!(tt.get(12345), None);
    }

    #[test]
    fn put_then_get_round_trips() {
        let mut tt = TranspositionTable::with_size(1 << 10);
        tt.put(42, 7);
        assert_eq!(tt.get(42), Some(7));
    }

    #[test]
    fn round_trips_extreme_scores() {
        let mut tt = TranspositionTable::with_size(1 << 10);
        tt.put(1, Position::MIN_SCORE);
        tt.put(2, 0);
        tt.put(3, Position::MAX_SCORE);
        assert_eq!(tt.get(1), Some(Position::MIN_SCORE));
        assert_eq!(tt.get(2), Some(0));
        assert_eq!(tt.get(3), Some(Position::MAX_SCORE));
    }

    #[test]
    fn collision_overwrites_always() {
        let mut tt = TranspositionTable::with_size(1 << 10);
        let key_a = 1u64;
        let key_b = key_a + (1 << 10); // same low bits, different key32
        tt.put(key_a, 3);
        tt.put(key_b, -3);
        assert_eq!(tt.get(key_b), Some(-3));
        assert_eq!(tt.get(key_a), None);
    }

    #[test]
    fn size_reports_the_configured_slot_count() {
        let tt = TranspositionTable::with_size(1 << 12);
        assert_eq!(tt.size(), 1 << 12);
    }

    #[test]
    fn reset_clears_all_entries() {
        let mut tt = TranspositionTable::with_size(1 << 10);
        tt.put(99, 5);
        tt.reset();
        assert_eq!(tt.get(99), None);
    }
}
