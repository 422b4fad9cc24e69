//! Configuration surface for the critical-positions generator.

use std::path::PathBuf;

/// Runtime configuration for the enumerator and serializer.
///
/// Constructed via [`Config::default`] and overridable by the CLI's flag parser.
#[derive(Debug, Clone)]
pub struct Config {
    /// The minimum ply (inclusive) at which the classifier is invoked.
    pub min_ply: u8,

    /// The maximum ply (inclusive) at which the classifier is invoked, and the ply
    /// at which the enumerator stops descending regardless.
    pub max_ply: u8,

    /// The path the serialized hash file is written to.
    pub output_path: PathBuf,

    /// The number of bits in the transposition table's size, i.e. the table holds
    /// `2^tt_bits` entries.
    pub tt_bits: u32,
}

impl Config {
    /// Returns the configured transposition table size, in entries.
    pub fn tt_size(&self) -> usize {
        1usize << self.tt_bits
    }
}

/// Default constructor for the `Config` struct.
impl Default for Config {
    fn default() -> Config {
        Config {
            min_ply: 15,
            max_ply: 28,
            output_path: PathBuf::from("critical.db"),
            tt_bits: 23,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_window() {
        let config = Config::default();
        assert_eq!(config.min_ply, 15);
        assert_eq!(config.max_ply, 28);
        assert_eq!(config.output_path, PathBuf::from("critical.db"));
        assert_eq!(config.tt_bits, 23);
    }

    #[test]
    fn tt_size_is_a_power_of_two() {
        let config = Config::default();
        assert_eq!(config.tt_size(), 1 << 23);
        assert!(config.tt_size().is_power_of_two());
    }
}
