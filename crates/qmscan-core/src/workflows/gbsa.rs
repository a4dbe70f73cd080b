use super::open_input;
use crate::core::io::gbsa::{DeltaDecomposition, canonical_residue_name};
use crate::core::io::traits::LogFile;
use crate::core::models::decomposition::DecompositionRow;
use crate::engine::config::GbsaConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Decomposition of one input file.
#[derive(Debug, Clone)]
pub struct GbsaDecomposition {
    pub path: PathBuf,
    /// Every cross-residue pair, with canonical residue names.
    pub rows: Vec<DecompositionRow>,
    /// Strongest ligand interactions, most negative total first.
    pub top_hits: Vec<DecompositionRow>,
}

#[derive(Debug, Clone)]
pub struct GbsaResult {
    pub decompositions: Vec<GbsaDecomposition>,
}

/// Lists the files in `dir` whose names end with `suffix`, sorted by name.
pub fn discover_inputs(dir: &Path, suffix: &str) -> io::Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(suffix));
        if matches && path.is_file() {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

#[instrument(skip_all, name = "gbsa_workflow")]
pub fn run(config: &GbsaConfig, reporter: &ProgressReporter) -> Result<GbsaResult, EngineError> {
    info!(
        "Decomposing {} MMGBSA output(s) around ligand {}.",
        config.inputs.len(),
        config.ligand_resid
    );

    reporter.report(Progress::TaskStart {
        total_steps: config.inputs.len() as u64,
    });
    let mut decompositions = Vec::with_capacity(config.inputs.len());
    for path in &config.inputs {
        decompositions.push(decompose(path, config)?);
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);

    Ok(GbsaResult { decompositions })
}

fn decompose(path: &Path, config: &GbsaConfig) -> Result<GbsaDecomposition, EngineError> {
    let mut reader = open_input(path)?;
    let rows = DeltaDecomposition::read_from(&mut reader).map_err(|source| EngineError::Gbsa {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = rows.len();

    let mut rows = filter_self_pairs(rows);
    canonicalize_residue_names(&mut rows);
    debug!(
        "'{}': {} pair(s), {} after removing self pairs.",
        path.display(),
        parsed,
        rows.len()
    );

    let hits = top_hits(&rows, config.ligand_resid, config.top_hits);
    if let Some(best) = hits.first() {
        info!(
            "'{}': strongest partner of ligand {} is {} ({:.2} kcal/mol).",
            path.display(),
            config.ligand_resid,
            best.residue_label(),
            best.total.avg
        );
    }
    Ok(GbsaDecomposition {
        path: path.to_path_buf(),
        rows,
        top_hits: hits,
    })
}

pub fn filter_self_pairs(rows: Vec<DecompositionRow>) -> Vec<DecompositionRow> {
    rows.into_iter().filter(|row| !row.is_self_pair()).collect()
}

pub fn canonicalize_residue_names(rows: &mut [DecompositionRow]) {
    for row in rows {
        for name in [&mut row.resname_1, &mut row.resname_2] {
            *name = canonical_residue_name(name).to_string();
        }
    }
}

/// Rows of `ligand` with the `n` most negative totals. Rows tied with the last
/// selected total are all kept, so the result may be longer than `n`.
pub fn top_hits(rows: &[DecompositionRow], ligand: i64, n: usize) -> Vec<DecompositionRow> {
    let mut candidates: Vec<DecompositionRow> = rows
        .iter()
        .filter(|row| row.resid_1 == ligand)
        .cloned()
        .collect();
    candidates.sort_by(|a, b| a.total.avg.total_cmp(&b.total.avg));

    let Some(cutoff) = n.checked_sub(1).and_then(|i| candidates.get(i)).map(|r| r.total.avg) else {
        return if n == 0 { Vec::new() } else { candidates };
    };
    candidates.retain(|row| row.total.avg <= cutoff);
    candidates
}
