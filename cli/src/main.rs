//! Entrypoint for generating the critical-positions database.
//!
//! Run with no arguments to reproduce the default ply window and write
//! `critical.db` in the current directory. Optional flags override the
//! configuration for testing against smaller ply windows without recompiling:
//! `--min-ply <n>`, `--max-ply <n>`, `--output <path>`.

use std::env;
use std::error::Error;
use std::path::PathBuf;

use critical_positions_gen::{serializer, Config, Enumerator};

fn main() -> Result<(), Box<dyn Error>> {
    let config = parse_config(env::args().skip(1))?;

    println!(
        "Enumerating positions for plies {}..={} ...",
        config.min_ply, config.max_ply
    );
    let entries = Enumerator::new(&config)?.run(&config)?;
    println!("Found {} critical positions.", entries.len());

    println!("Writing database to {:?}...", config.output_path);
    serializer::write(&entries, &config, &config.output_path)?;
    println!("Done.");

    Ok(())
}

/// Parses command-line flag overrides on top of the default configuration.
fn parse_config(args: impl Iterator<Item = String>) -> Result<Config, Box<dyn Error>> {
    let mut config = Config::default();
    let mut args = args.peekable();

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--min-ply" => {
                let value = args.next().ok_or("--min-ply requires a value")?;
                config.min_ply = value.parse()?;
            }
            "--max-ply" => {
                let value = args.next().ok_or("--max-ply requires a value")?;
                config.max_ply = value.parse()?;
            }
            "--output" => {
                let value = args.next().ok_or("--output requires a value")?;
                config.output_path = PathBuf::from(value);
            }
            other => return Err(format!("unrecognised argument: {other}").into()),
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_keeps_the_defaults() {
        let config = parse_config(std::iter::empty()).unwrap();
        let defaults = Config::default();
        assert_eq!(config.min_ply, defaults.min_ply);
        assert_eq!(config.max_ply, defaults.max_ply);
        assert_eq!(config.output_path, defaults.output_path);
    }

    #[test]
    fn flags_override_individual_fields() {
        let args = vec!["--min-ply".to_string(), "5".to_string(), "--max-ply".to_string(), "10".to_string()];
        let config = parse_config(args.into_iter()).unwrap();
        assert_eq!(config.min_ply, 5);
        assert_eq!(config.max_ply, 10);
    }

    #[test]
    fn unrecognised_flag_is_an_error() {
        let args = vec!["--bogus".to_string()];
        assert!(parse_config(args.into_iter()).is_err());
    }
}
