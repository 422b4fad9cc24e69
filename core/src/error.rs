//! Crate-level error type for the generator's fallible ambient operations.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

/// An enum for errors that can occur while enumerating and serializing
/// critical positions.
#[derive(Debug)]
pub enum GeneratorError {
    /// The requested transposition table size is not representable, or would
    /// overflow when allocated.
    TableTooLarge { requested_bits: u32 },

    /// The critical-entry buffer could not grow to hold another entry.
    BufferExhausted { capacity: usize },

    /// No prime greater than or equal to the requested bound could be found
    /// within the search range.
    NoPrimeFound { lower_bound: u64 },

    /// Writing or renaming the output file failed.
    Io(io::Error),
}

impl Display for GeneratorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorError::TableTooLarge { requested_bits } => {
                write!(f, "transposition table size 2^{requested_bits} is too large to allocate")
            }
            GeneratorError::BufferExhausted { capacity } => {
                write!(f, "critical entry buffer could not grow past {capacity} entries")
            }
            GeneratorError::NoPrimeFound { lower_bound } => {
                write!(f, "no prime found at or above {lower_bound}")
            }
            GeneratorError::Io(err) => write!(f, "I/O error writing output file: {err}"),
        }
    }
}

impl Error for GeneratorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GeneratorError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for GeneratorError {
    fn from(err: io::Error) -> GeneratorError {
        GeneratorError::Io(err)
    }
}
