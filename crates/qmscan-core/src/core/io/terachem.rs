use super::traits::LogFile;
use crate::core::models::scan::ScanStep;
use crate::core::models::section::SectionRecord;
use crate::engine::classify::{Category, ColumnMarker, FirstTokenMarker, PrefixMarker};
use crate::engine::error::EngineError;
use crate::engine::sequencer::PositionIndex;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::debug;

/// One geometry-optimizer iteration finished.
pub const ITERATION_MARKER: PrefixMarker = PrefixMarker::new("FINAL ENERGY: ", Category::DataRow);
/// One constrained scan step converged.
pub const STEP_MARKER: PrefixMarker =
    PrefixMarker::new("-=#=- Optimized Energy: ", Category::Terminator);

/// Header of every spin population table in `scr/mullpop`.
pub const SPIN_SECTION_MARKER: ColumnMarker = ColumnMarker::start(29, 42, "Spin-Averaged");
/// First atom row of every table in `scr/charge_mull.xls`.
pub const CHARGE_SECTION_MARKER: FirstTokenMarker = FirstTokenMarker::start("1");

#[derive(Debug, Error)]
pub enum TeraChemError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("No converged scan steps ('{}' lines) were found", STEP_MARKER.prefix.trim_end())]
    NoScanSteps,
}

/// The main log of a TeraChem scan job (`qmscript.out`).
pub struct TeraChemLog;

impl LogFile for TeraChemLog {
    type Output = Vec<ScanStep>;
    type Error = TeraChemError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let mut steps = Vec::new();
        let mut iterations = 0usize;
        let mut cumulative = 0usize;

        for line in reader.lines() {
            let line = line?;
            if ITERATION_MARKER.matches(&line) {
                iterations += 1;
            }
            if STEP_MARKER.matches(&line) {
                cumulative += iterations;
                let energy_hartree = line[STEP_MARKER.prefix.len()..]
                    .split_whitespace()
                    .next()
                    .and_then(|token| token.parse().ok());
                steps.push(ScanStep {
                    step: steps.len() + 1,
                    iterations,
                    cumulative,
                    energy_hartree,
                });
                iterations = 0;
            }
        }

        if iterations > 0 {
            debug!(
                "{} optimizer iteration(s) after the last converged step were not assigned",
                iterations
            );
        }
        if steps.is_empty() {
            return Err(TeraChemError::NoScanSteps);
        }
        Ok(steps)
    }
}

/// Builds the position index that maps population tables onto scan steps.
pub fn position_index(steps: &[ScanStep]) -> Result<PositionIndex, EngineError> {
    let counts: Vec<usize> = steps.iter().map(|s| s.iterations).collect();
    PositionIndex::from_counts(&counts)
}

/// Writes each section followed by an `End scan N` trailer line.
pub fn write_section_dump(records: &[SectionRecord], writer: &mut impl Write) -> io::Result<()> {
    for record in records {
        writer.write_all(record.content.as_bytes())?;
        writeln!(writer, "End scan {}", record.logical_index)?;
    }
    Ok(())
}
