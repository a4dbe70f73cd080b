use super::write_output;
use crate::cli::GbsaArgs;
use crate::config::builder::build_gbsa_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use qmscan::core::io::tables;
use qmscan::engine::error::EngineError;
use qmscan::workflows;
use qmscan::workflows::gbsa::GbsaDecomposition;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn run(args: GbsaArgs, show_progress: bool) -> Result<()> {
    let app = build_gbsa_config(&args)?;
    let progress = CliProgressHandler::new(show_progress);

    let result = workflows::gbsa::run(&app.core_config, &progress.reporter())?;
    let prefixed = result.decompositions.len() > 1;

    for decomposition in &result.decompositions {
        let deltas = output_path(&app.output_dir, decomposition, "deltas.csv", prefixed);
        let hits = output_path(&app.output_dir, decomposition, "top_hits.csv", prefixed);

        write_output(&deltas, |w| {
            tables::write_decomposition(&decomposition.rows, w).map_err(EngineError::from)?;
            Ok(())
        })?;
        write_output(&hits, |w| {
            tables::write_decomposition(&decomposition.top_hits, w).map_err(EngineError::from)?;
            Ok(())
        })?;
        info!("Wrote {:?} and {:?}", deltas, hits);

        let labels: Vec<String> = decomposition
            .top_hits
            .iter()
            .map(|row| format!("{} ({:.2})", row.residue_label(), row.total.avg))
            .collect();
        println!(
            "✓ {}: {}",
            decomposition.path.display(),
            if labels.is_empty() {
                "no ligand interactions".to_string()
            } else {
                labels.join(", ")
            }
        );
    }
    Ok(())
}

fn output_path(dir: &Path, decomposition: &GbsaDecomposition, name: &str, prefixed: bool) -> PathBuf {
    let stem = decomposition
        .path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned());
    match stem {
        Some(stem) if prefixed => dir.join(format!("{}_{}", stem, name)),
        _ => dir.join(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decomposition(path: &str) -> GbsaDecomposition {
        GbsaDecomposition {
            path: PathBuf::from(path),
            rows: Vec::new(),
            top_hits: Vec::new(),
        }
    }

    #[test]
    fn several_inputs_are_prefixed_by_stem() {
        let out = output_path(Path::new("out"), &decomposition("data/rep1_24.dat"), "deltas.csv", true);
        assert_eq!(out, PathBuf::from("out/rep1_24_deltas.csv"));
    }

    #[test]
    fn single_input_uses_plain_names() {
        let out = output_path(Path::new("."), &decomposition("rep1_24.dat"), "top_hits.csv", false);
        assert_eq!(out, PathBuf::from("./top_hits.csv"));
    }
}
