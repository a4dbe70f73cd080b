use super::traits::LogFile;
use crate::core::models::surface::SurfacePoint;
use std::io::{self, BufRead};
use thiserror::Error;

/// Line that precedes the relaxed surface table in an ORCA scan output.
pub const SURFACE_MARKER: &str = "The Calculated Surface using the 'Actual Energy'";

#[derive(Debug, Error)]
pub enum OrcaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("The surface table (\"{}\") was not found", SURFACE_MARKER)]
    SurfaceNotFound,
    #[error("The surface table is empty")]
    EmptySurface,
}

/// The relaxed surface of an ORCA scan job (`orca.out`).
///
/// Rows are read after [`SURFACE_MARKER`] until the first blank line or the first
/// row whose leading two tokens are not both numbers.
pub struct OrcaScanOutput;

impl LogFile for OrcaScanOutput {
    type Output = Vec<SurfacePoint>;
    type Error = OrcaError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let mut points = Vec::new();
        let mut in_surface = false;

        for line in reader.lines() {
            let line = line?;
            if !in_surface {
                in_surface = line.contains(SURFACE_MARKER);
                continue;
            }
            match parse_surface_row(&line) {
                Some(point) => points.push(point),
                None => break,
            }
        }

        if !in_surface {
            return Err(OrcaError::SurfaceNotFound);
        }
        if points.is_empty() {
            return Err(OrcaError::EmptySurface);
        }
        Ok(points)
    }
}

fn parse_surface_row(line: &str) -> Option<SurfacePoint> {
    let mut tokens = line.split_whitespace();
    let coordinate = tokens.next()?.parse().ok()?;
    let energy_hartree = tokens.next()?.parse().ok()?;
    Some(SurfacePoint {
        coordinate,
        energy_hartree,
    })
}
