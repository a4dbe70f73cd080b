//! # Workflows Module
//!
//! Top-level entry points, one per analysis tool. Each workflow takes its config
//! struct from [`crate::engine::config`] and a [`ProgressReporter`], reads its
//! inputs through the format readers in [`crate::core::io`], and returns a result
//! struct. Writing output files is left to the caller.
//!
//! - [`scan`] - Organizes TeraChem spin and charge populations per scan step.
//! - [`energy`] - Relative energy profiles of xyz trajectories.
//! - [`orca_scan`] - ORCA relaxed surface scan energies.
//! - [`neb`] - Reaction-coordinate distances and initial NEB path selection.
//! - [`gbsa`] - MMGBSA pairwise decomposition and ligand top hits.
//!
//! [`ProgressReporter`]: crate::engine::progress::ProgressReporter

pub mod energy;
pub mod gbsa;
pub mod neb;
pub mod orca_scan;
pub mod scan;

use crate::engine::error::EngineError;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub(crate) fn open_input(path: &Path) -> Result<BufReader<File>, EngineError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| EngineError::FileAccess {
            path: path.to_path_buf(),
            source,
        })
}
