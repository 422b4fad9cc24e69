//! Builds and writes the open-addressed hash file consumed by the playing agent.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::engine::enumerator::CriticalEntry;
use crate::error::GeneratorError;
use crate::{Config, Position};

/// A single slot in the on-disk hash table.
#[derive(Debug, Copy, Clone, Default)]
struct Slot {
    partial_key: u32,
    value: u8,
}

/// Builds a hash table from critical entries and writes it to `path` in the
/// fixed little-endian layout consumed by the playing agent.
///
/// The table is written to a temporary sibling path first and renamed into
/// place only once every byte has been flushed successfully, so a crash or
/// I/O failure mid-write never leaves `path` itself holding a header that
/// claims a `table_size` the rest of the file doesn't back up. If the write
/// fails, the temporary file is removed rather than left behind.
pub fn write(entries: &[CriticalEntry], config: &Config, path: &Path) -> Result<(), GeneratorError> {
    let table_size = next_prime((entries.len() as u64) * 2)
        .ok_or(GeneratorError::NoPrimeFound { lower_bound: entries.len() as u64 * 2 })?;

    let mut table = vec![Slot::default(); table_size as usize];
    for entry in entries {
        insert(&mut table, entry);
    }

    let tmp_path = temp_sibling_path(path);
    match write_table(&tmp_path, config, table_size, &table) {
        Ok(()) => {
            std::fs::rename(&tmp_path, path)?;
            Ok(())
        }
        Err(err) => {
            let _ = std::fs::remove_file(&tmp_path);
            Err(err)
        }
    }
}

/// Returns a sibling path of `path` to stage the write in, e.g. `critical.db`
/// becomes `critical.db.tmp`.
fn temp_sibling_path(path: &Path) -> PathBuf {
    let mut file_name = path.file_name().map_or_else(Default::default, |n| n.to_os_string());
    file_name.push(".tmp");
    path.with_file_name(file_name)
}

/// Writes the header and hash table to `path`, flushing before returning.
fn write_table(path: &Path, config: &Config, table_size: u64, table: &[Slot]) -> Result<(), GeneratorError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writer.write_all(&[
        Position::WIDTH as u8,
        Position::HEIGHT as u8,
        config.min_ply,
        config.max_ply,
        4u8, // key_bytes
        1u8, // value_bytes
        0u8, // reserved
        0u8, // reserved
    ])?;
    writer.write_all(&(table_size as u32).to_le_bytes())?;

    for slot in table {
        writer.write_all(&slot.partial_key.to_le_bytes())?;
    }
    for slot in table {
        writer.write_all(&[slot.value])?;
    }

    writer.flush()?;
    Ok(())
}

/// Inserts an entry into the table via linear probing, never overwriting an
/// occupied slot (the enumerator visits each position exactly once, so
/// duplicate keys cannot arise).
fn insert(table: &mut [Slot], entry: &CriticalEntry) {
    let size = table.len() as u64;
    let mut idx = (entry.key % size) as usize;

    while table[idx].partial_key != 0 {
        idx = (idx + 1) % table.len();
    }

    table[idx] = Slot {
        partial_key: (entry.key >> 16) as u32,
        value: entry.winning_column,
    };
}

/// Returns the smallest prime greater than or equal to `lower_bound`, or
/// `None` if none is found within a reasonable search range.
fn next_prime(lower_bound: u64) -> Option<u64> {
    let mut candidate = lower_bound.max(2);
    loop {
        if is_prime(candidate) {
            return Some(candidate);
        }
        candidate = candidate.checked_add(1)?;
    }
}

fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }

    let mut divisor = 3;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn next_prime_finds_the_nearest_prime_at_or_above() {
        assert_eq!(next_prime(0), Some(2));
        assert_eq!(next_prime(10), Some(11));
        assert_eq!(next_prime(11), Some(11));
        assert_eq!(next_prime(8), Some(11));
    }

    #[test]
    fn insert_resolves_collisions_by_linear_probing() {
        let mut table = vec![Slot::default(); 3];
        // Two keys that both map to index 0 modulo 3.
        insert(&mut table, &CriticalEntry { key: 3, winning_column: 1 });
        insert(&mut table, &CriticalEntry { key: 6, winning_column: 2 });

        assert_eq!(table[0].value, 1);
        assert_eq!(table[1].value, 2);
    }

    #[test]
    fn written_file_round_trips_every_entry() {
        let entries = vec![
            CriticalEntry { key: 12345, winning_column: 2 },
            CriticalEntry { key: 67890, winning_column: 5 },
        ];
        let config = Config::default();

        let mut path = env::temp_dir();
        path.push("critical_positions_gen_serializer_test.db");
        write(&entries, &config, &path).unwrap();

        assert!(!temp_sibling_path(&path).exists());

        let bytes = fs::read(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(bytes[0], Position::WIDTH as u8);
        assert_eq!(bytes[1], Position::HEIGHT as u8);
        assert_eq!(bytes[2], config.min_ply);
        assert_eq!(bytes[3], config.max_ply);

        let table_size = u32::from_le_bytes(bytes[8..12].try_into().unwrap()) as usize;
        assert!(table_size >= entries.len() * 2);

        let keys_start = 12;
        let values_start = keys_start + table_size * 4;

        for entry in &entries {
            let expected_partial_key = (entry.key >> 16) as u32;
            let mut idx = (entry.key % table_size as u64) as usize;
            loop {
                let key_offset = keys_start + idx * 4;
                let found = u32::from_le_bytes(bytes[key_offset..key_offset + 4].try_into().unwrap());
                if found == expected_partial_key {
                    assert_eq!(bytes[values_start + idx], entry.winning_column);
                    break;
                }
                idx = (idx + 1) % table_size;
            }
        }
    }

    #[test]
    fn write_failure_leaves_no_temp_file_and_no_output_file() {
        let entries = vec![CriticalEntry { key: 1, winning_column: 0 }];
        let config = Config::default();

        // A path inside a nonexistent directory can never be created.
        let mut path = env::temp_dir();
        path.push("critical_positions_gen_serializer_test_missing_dir");
        path.push("critical.db");

        assert!(write(&entries, &config, &path).is_err());
        assert!(!path.exists());
        assert!(!temp_sibling_path(&path).exists());
    }

    #[test]
    fn temp_sibling_path_appends_a_tmp_suffix() {
        let path = Path::new("/tmp/critical.db");
        assert_eq!(temp_sibling_path(path), Path::new("/tmp/critical.db.tmp"));
    }
}
