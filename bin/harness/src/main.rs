//! Test-vector harness for cross-implementation validation of ΔE2000.
//!
//! `generate` writes a file of random Lab pairs with their computed
//! difference; `verify` recomputes the difference for every row of a peer
//! implementation's file and flags rows that disagree.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::Rng;

use labdiff::{ciede_2000, Component};

/// Absolute tolerance when checking a stored ΔE2000 value.
const TOLERANCE: Component = 1.0e-10;

/// Stop verifying after this many mismatching rows.
const MAX_MISMATCHES: usize = 10;

#[derive(Parser)]
#[command(name = "labdiff-harness")]
#[command(about = "Generate and verify CIEDE2000 cross-implementation test vectors")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write random Lab pairs with their ΔE2000 to a vector file.
    Generate {
        /// Number of rows to generate.
        #[arg(value_parser = clap::value_parser!(u64).range(1..=10_000_000))]
        count: u64,

        /// Destination file.
        #[arg(short, long, default_value = "values-rs.txt")]
        output: PathBuf,
    },
    /// Check the vector file of a peer implementation.
    Verify {
        /// Tag of the peer implementation, e.g. "js" or "py". The file
        /// checked is `<root>/<tag>/values-<tag>.txt`.
        ext: String,

        /// Directory holding the per-language sibling directories.
        #[arg(long, default_value = "..")]
        root: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate { count, output } => generate(count, &output),
        Command::Verify { ext, root } => verify(&ext, &root),
    }
}

/// Format one vector-file row: the six Lab components and the difference,
/// comma separated with 17 decimal digits each.
fn format_row(row: &[Component; 6], delta_e: Component) -> String {
    format!(
        "{:.17},{:.17},{:.17},{:.17},{:.17},{:.17},{:.17}",
        row[0], row[1], row[2], row[3], row[4], row[5], delta_e
    )
}

/// Split a vector-file line into six Lab components and the stored
/// difference. `None` means the line does not have exactly 7 fields.
fn parse_row(line: &str) -> Result<Option<[Component; 7]>> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 7 {
        return Ok(None);
    }

    let mut row = [0.0; 7];
    for (slot, field) in row.iter_mut().zip(&fields) {
        *slot = field
            .trim()
            .parse()
            .with_context(|| format!("bad number {:?}", field))?;
    }
    Ok(Some(row))
}

fn generate(count: u64, output: &Path) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("could not create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    let mut rng = rand::thread_rng();

    println!("writing {} rows to {}", count, output.display());
    for i in 0..count {
        let mut row: [Component; 6] = [
            rng.gen_range(0.0..=100.0),
            rng.gen_range(-128.0..=128.0),
            rng.gen_range(-128.0..=128.0),
            rng.gen_range(0.0..=100.0),
            rng.gen_range(-128.0..=128.0),
            rng.gen_range(-128.0..=128.0),
        ];
        // Exact whole-number components half of the time, so peers are
        // also exercised on inputs their platform represents exactly.
        for v in &mut row {
            if rng.gen_bool(0.5) {
                *v = v.trunc();
            }
        }

        let delta_e = ciede_2000(row[0], row[1], row[2], row[3], row[4], row[5]);
        writeln!(writer, "{}", format_row(&row, delta_e))
            .with_context(|| format!("could not write to {}", output.display()))?;

        if (i + 1) % 1000 == 0 {
            print!(".");
            std::io::stdout().flush()?;
        }
    }
    println!();

    Ok(())
}

fn verify(ext: &str, root: &Path) -> Result<()> {
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphabetic()) {
        bail!("tag must be alphabetic, e.g. \"js\" or \"py\"");
    }
    let ext = ext.to_lowercase();

    let path = root.join(&ext).join(format!("values-{}.txt", ext));
    println!("verifying {}", path.display());

    let file =
        File::open(&path).with_context(|| format!("could not open {}", path.display()))?;
    let (checked, mismatches) = check_rows(BufReader::new(file))?;
    println!();

    println!("{} rows checked, {} mismatches", checked, mismatches);
    if mismatches != 0 {
        bail!("{} rows disagree beyond {:e}", mismatches, TOLERANCE);
    }

    Ok(())
}

/// Recompute every row of a vector file and count the rows examined and
/// the rows whose stored difference disagrees beyond [`TOLERANCE`]. Stops
/// after [`MAX_MISMATCHES`] mismatching rows.
fn check_rows<R: BufRead>(reader: R) -> Result<(u64, usize)> {
    let mut checked = 0u64;
    let mut mismatches = 0usize;
    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("could not read line {}", i + 1))?;
        let row = match parse_row(&line).with_context(|| format!("line {}", i + 1))? {
            Some(row) => row,
            None => {
                eprintln!("line {}: expected 7 fields, skipping", i + 1);
                continue;
            }
        };

        checked += 1;
        let computed = ciede_2000(row[0], row[1], row[2], row[3], row[4], row[5]);
        if !computed.is_finite() || (computed - row[6]).abs() > TOLERANCE {
            eprintln!(
                "line {}: stored {} but computed {}",
                i + 1,
                row[6],
                computed
            );
            mismatches += 1;
            if mismatches >= MAX_MISMATCHES {
                break;
            }
        }

        if checked % 1000 == 0 {
            print!(".");
            std::io::stdout().flush()?;
        }
    }

    Ok((checked, mismatches))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_round_trip_through_the_file_format() {
        let row = [61.25, -117.375, 0.5, 100.0, 127.0, -0.0078125];
        let delta_e = ciede_2000(row[0], row[1], row[2], row[3], row[4], row[5]);

        let parsed = parse_row(&format_row(&row, delta_e))
            .unwrap()
            .expect("7 fields");
        assert_eq!(&parsed[..6], &row);
        // The stored difference only has to be good to the verification
        // tolerance, not bit-exact.
        assert!((parsed[6] - delta_e).abs() <= TOLERANCE);
    }

    #[test]
    fn short_and_malformed_rows_are_detected() {
        assert!(parse_row("1.0,2.0,3.0").unwrap().is_none());
        assert!(parse_row("").unwrap().is_none());
        assert!(parse_row("1,2,3,4,5,6,oops").is_err());
    }

    #[test]
    fn generate_then_verify_reports_no_mismatches() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("rs");
        std::fs::create_dir(&dir).unwrap();

        generate(250, &dir.join("values-rs.txt")).unwrap();
        verify("rs", root.path()).unwrap();
    }

    #[test]
    fn verify_rejects_a_corrupted_file() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("xx");
        std::fs::create_dir(&dir).unwrap();

        let row = [50.0, 10.0, -10.0, 60.0, -20.0, 30.0];
        let delta_e = ciede_2000(row[0], row[1], row[2], row[3], row[4], row[5]);
        std::fs::write(
            dir.join("values-xx.txt"),
            format!("{}\n", format_row(&row, delta_e + 1.0)),
        )
        .unwrap();

        assert!(verify("xx", root.path()).is_err());
    }

    #[test]
    fn checked_count_includes_the_last_mismatching_row() {
        let good = [50.0, 10.0, -10.0, 60.0, -20.0, 30.0];
        let delta_e = ciede_2000(good[0], good[1], good[2], good[3], good[4], good[5]);

        // Three good rows, then more bad rows than the mismatch cap.
        let mut data = String::new();
        for _ in 0..3 {
            data.push_str(&format_row(&good, delta_e));
            data.push('\n');
        }
        for _ in 0..MAX_MISMATCHES + 2 {
            data.push_str(&format_row(&good, delta_e + 1.0));
            data.push('\n');
        }

        let (checked, mismatches) = check_rows(data.as_bytes()).unwrap();
        assert_eq!(mismatches, MAX_MISMATCHES);
        // Every examined row counts, including the one that hit the cap.
        assert_eq!(checked, 3 + MAX_MISMATCHES as u64);
    }

    #[test]
    fn verify_rejects_a_non_alphabetic_tag() {
        assert!(verify("rs2", Path::new(".")).is_err());
    }
}
