use super::traits::LogFile;
use crate::core::models::decomposition::{
    DECOMPOSITION_FIELD_COUNT, DecompositionRow, EnergyTerm,
};
use crate::engine::accumulator::SectionAccumulator;
use crate::engine::classify::Category;
use crate::engine::extractor::{FieldError, parse_number};
use phf::{Map, phf_map};
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, trace};

// MMPBSA.py writes these headers one character per CSV cell.
pub const DELTA_SECTION_MARKER: &str = "D,E,L,T,A,S,:";
pub const TOTAL_DECOMPOSITION_KEYWORD: &str = "T,o,t,a,l";
pub const SIDECHAIN_KEYWORD: &str = "S,i,d,e,c,h,a,i,n";
pub const BACKBONE_KEYWORD: &str = "B,a,c,k,b,o,n,e";

/// MCPB.py residue names mapped to their conventional counterparts.
#[rustfmt::skip]
pub static RESIDUE_ALIASES: Map<&'static str, &'static str> = phf_map! {
    "AG2" => "ARG", "AN1" => "ASN", "AP1" => "ASP", "TR1" => "TYR",
    "HIE" => "HIS", "HD1" => "HIS", "HD2" => "HIS",
    "CL1" => "CL",
};

pub fn canonical_residue_name(name: &str) -> &str {
    RESIDUE_ALIASES.get(name).copied().unwrap_or(name)
}

#[derive(Debug, Error)]
pub enum GbsaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("No DELTAS section ('{}') was found", DELTA_SECTION_MARKER)]
    SectionNotFound,
}

/// Classifies one line of a pairwise decomposition output.
pub fn classify_delta_line(line: &str) -> Category {
    if line.starts_with(DELTA_SECTION_MARKER) {
        Category::SectionStart
    } else if line.contains(SIDECHAIN_KEYWORD) || line.contains(BACKBONE_KEYWORD) {
        Category::Terminator
    } else if line.trim().is_empty()
        || line.contains(TOTAL_DECOMPOSITION_KEYWORD)
        || line.contains("Std")
        || line.contains("Resid")
    {
        Category::Ignored
    } else {
        Category::DataRow
    }
}

/// The total-energy DELTAS table of an MMGBSA pairwise decomposition.
pub struct DeltaDecomposition;

impl LogFile for DeltaDecomposition {
    type Output = Vec<DecompositionRow>;
    type Error = GbsaError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let mut accumulator = SectionAccumulator::new();
        let mut rows = Vec::new();
        let mut found = false;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            match classify_delta_line(&line) {
                Category::SectionStart if !found => {
                    found = true;
                    accumulator.open(1, 1);
                }
                Category::Terminator if accumulator.is_open() => break,
                Category::Terminator => {
                    trace!(line = line_num, "Decomposition header before DELTAS section");
                }
                Category::DataRow if accumulator.is_open() => {
                    rows.push(parse_delta_row(&line, line_num)?);
                    accumulator.append(&line);
                }
                _ => {}
            }
        }

        if !found {
            return Err(GbsaError::SectionNotFound);
        }
        if let Some(section) = accumulator.seal() {
            debug!("DELTAS section holds {} data rows", section.line_count());
        }
        Ok(rows)
    }
}

/// Parses one DELTAS data row. Runs of whitespace act as extra field separators.
pub fn parse_delta_row(line: &str, line_num: usize) -> Result<DecompositionRow, FieldError> {
    let fields: Vec<&str> = line
        .split_whitespace()
        .flat_map(|chunk| chunk.split(','))
        .filter(|field| !field.is_empty())
        .collect();
    if fields.len() < DECOMPOSITION_FIELD_COUNT {
        return Err(FieldError::MalformedRow {
            line: line_num,
            expected: DECOMPOSITION_FIELD_COUNT,
            found: fields.len(),
        });
    }

    let values = fields[4..DECOMPOSITION_FIELD_COUNT]
        .iter()
        .map(|field| parse_number::<f64>(field, line_num))
        .collect::<Result<Vec<_>, _>>()?;
    let term = |i: usize| EnergyTerm {
        avg: values[3 * i],
        sd: values[3 * i + 1],
        sdm: values[3 * i + 2],
    };

    Ok(DecompositionRow {
        resname_1: fields[0].to_string(),
        resid_1: parse_number(fields[1], line_num)?,
        resname_2: fields[2].to_string(),
        resid_2: parse_number(fields[3], line_num)?,
        internal: term(0),
        vdw: term(1),
        electrostatic: term(2),
        polar: term(3),
        non_polar: term(4),
        total: term(5),
    })
}
