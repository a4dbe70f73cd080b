use super::traits::LogFile;
use crate::core::models::frame::{AtomCoordinate, Frame};
use crate::engine::extractor::{self, FieldError};
use std::fmt;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Token index of the first Cartesian coordinate on an atom row (`El x y z`).
pub const COORDINATE_TOKEN: usize = 1;

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("Invalid atom count on line {line}: '{value}'")]
    InvalidAtomCount { line: usize, value: String },
    #[error("Frame {frame} is truncated: expected {expected} atom rows, found {found}")]
    TruncatedFrame {
        frame: usize,
        expected: usize,
        found: usize,
    },
    #[error("Frame {frame} has no comment line")]
    MissingComment { frame: usize },
    #[error("Could not identify the program that wrote this trajectory from: '{0}'")]
    UnsupportedSoftware(String),
    #[error("Trajectory contains no frames")]
    Empty,
}

/// Program that produced a trajectory, identified from its first comment line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Software {
    OrcaMep,
    OrcaIrc,
    Orca,
    TeraChem,
}

impl Software {
    /// Identifies the writer of a trajectory. Unknown tags fail instead of guessing
    /// at an energy column.
    pub fn identify(comment: &str) -> Result<Self, XyzError> {
        if comment.contains("ORCA-job qmscript_MEP") {
            Ok(Software::OrcaMep)
        } else if comment.contains("ORCA-job qmscript_IRC_Full") {
            Ok(Software::OrcaIrc)
        } else if comment.contains("ORCA-job qmscript") {
            Ok(Software::Orca)
        } else if comment.contains("Converged     Job") {
            Ok(Software::TeraChem)
        } else {
            Err(XyzError::UnsupportedSoftware(comment.trim().to_string()))
        }
    }

    /// Whitespace token of the comment line that holds the energy in Hartree.
    pub fn energy_token(self) -> usize {
        match self {
            Software::OrcaMep | Software::OrcaIrc => 5,
            Software::Orca => 4,
            Software::TeraChem => 3,
        }
    }

    pub fn parse_energy(self, frame: &Frame) -> Result<f64, FieldError> {
        energy_from_comment(&frame.comment, self.energy_token(), frame.comment_line)
    }
}

impl fmt::Display for Software {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Software::OrcaMep => "ORCA-MEP",
            Software::OrcaIrc => "ORCA-IRC",
            Software::Orca => "ORCA",
            Software::TeraChem => "TeraChem",
        };
        f.write_str(name)
    }
}

/// Parses the energy stored at whitespace token `token` of a comment line.
pub fn energy_from_comment(comment: &str, token: usize, line: usize) -> Result<f64, FieldError> {
    let tokens = extractor::tokens_in_range(comment, token..token + 1, line)?;
    extractor::parse_number(tokens[0], line)
}

enum ReadState {
    ExpectCount,
    ExpectComment { expected: usize },
    Atoms { expected: usize },
}

/// A multi-frame xyz trajectory.
pub struct XyzTrajectory;

impl LogFile for XyzTrajectory {
    type Output = Vec<Frame>;
    type Error = XyzError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let mut frames = Vec::new();
        let mut state = ReadState::ExpectCount;
        let mut comment = String::new();
        let mut comment_line = 0;
        let mut atoms: Vec<AtomCoordinate> = Vec::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            state = match state {
                ReadState::ExpectCount => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        ReadState::ExpectCount
                    } else {
                        let expected: usize =
                            trimmed.parse().map_err(|_| XyzError::InvalidAtomCount {
                                line: line_num,
                                value: trimmed.to_string(),
                            })?;
                        ReadState::ExpectComment { expected }
                    }
                }
                ReadState::ExpectComment { expected } => {
                    comment = line.trim_end().to_string();
                    comment_line = line_num;
                    atoms = Vec::with_capacity(expected);
                    if expected == 0 {
                        push_frame(&mut frames, &mut comment, comment_line, &mut atoms);
                        ReadState::ExpectCount
                    } else {
                        ReadState::Atoms { expected }
                    }
                }
                ReadState::Atoms { expected } => {
                    let element = line.split_whitespace().next().unwrap_or_default();
                    let position =
                        extractor::extract_point(&line, COORDINATE_TOKEN, line_num)?;
                    atoms.push(AtomCoordinate {
                        serial: atoms.len() + 1,
                        element: element.to_string(),
                        position,
                    });
                    if atoms.len() == expected {
                        push_frame(&mut frames, &mut comment, comment_line, &mut atoms);
                        ReadState::ExpectCount
                    } else {
                        ReadState::Atoms { expected }
                    }
                }
            };
        }

        match state {
            ReadState::ExpectCount => {}
            ReadState::ExpectComment { .. } => {
                return Err(XyzError::MissingComment {
                    frame: frames.len(),
                });
            }
            ReadState::Atoms { expected } => {
                return Err(XyzError::TruncatedFrame {
                    frame: frames.len(),
                    expected,
                    found: atoms.len(),
                });
            }
        }

        if frames.is_empty() {
            return Err(XyzError::Empty);
        }
        Ok(frames)
    }
}

fn push_frame(
    frames: &mut Vec<Frame>,
    comment: &mut String,
    comment_line: usize,
    atoms: &mut Vec<AtomCoordinate>,
) {
    frames.push(Frame {
        index: frames.len(),
        comment: std::mem::take(comment),
        comment_line,
        atoms: std::mem::take(atoms),
    });
}

/// Writes frames back out in xyz format.
pub fn write_frames<'a>(
    frames: impl IntoIterator<Item = &'a Frame>,
    writer: &mut impl Write,
) -> io::Result<()> {
    for frame in frames {
        writeln!(writer, "{}", frame.atom_count())?;
        writeln!(writer, "{}", frame.comment)?;
        for atom in &frame.atoms {
            writeln!(
                writer,
                "{:<2} {:>14.8} {:>14.8} {:>14.8}",
                atom.element, atom.position.x, atom.position.y, atom.position.z
            )?;
        }
    }
    Ok(())
}
