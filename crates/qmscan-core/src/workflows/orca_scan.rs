use super::open_input;
use crate::core::io::orca::OrcaScanOutput;
use crate::core::io::traits::LogFile;
use crate::core::models::surface::SurfacePoint;
use crate::core::utils::units::relative_kcal_mol;
use crate::engine::config::OrcaScanConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct OrcaScanResult {
    pub points: Vec<SurfacePoint>,
    /// kcal/mol relative to the first surface point.
    pub relative_kcal_mol: Vec<f64>,
}

#[instrument(skip_all, name = "orca_scan_workflow")]
pub fn run(
    config: &OrcaScanConfig,
    reporter: &ProgressReporter,
) -> Result<OrcaScanResult, EngineError> {
    let points = reporter.phase("Reading surface", || {
        let mut reader = open_input(&config.input)?;
        OrcaScanOutput::read_from(&mut reader).map_err(|source| EngineError::Orca {
            path: config.input.clone(),
            source,
        })
    })?;

    if let (Some(start), Some(end)) = (points.first(), points.last()) {
        info!(
            "Surface of {} point(s) from {:.3} to {:.3}.",
            points.len(),
            start.coordinate,
            end.coordinate
        );
    }

    let energies: Vec<f64> = points.iter().map(|p| p.energy_hartree).collect();
    Ok(OrcaScanResult {
        relative_kcal_mol: relative_kcal_mol(&energies),
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::orca::{OrcaError, SURFACE_MARKER};
    use crate::core::utils::units::HARTREE_TO_KCAL_MOL;
    use std::fs;

    #[test]
    fn surface_energies_are_relative_to_first_point() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orca.out");
        let text = format!(
            "ORCA scan\n{}\n   1.50000000 -100.00000000\n   1.60000000  -99.99000000\n\nTOTAL RUN TIME\n",
            SURFACE_MARKER
        );
        fs::write(&path, text).unwrap();

        let result = run(&OrcaScanConfig::new(&path), &ProgressReporter::new()).unwrap();
        assert_eq!(result.points.len(), 2);
        assert_eq!(result.relative_kcal_mol[0], 0.0);
        assert!((result.relative_kcal_mol[1] - 0.01 * HARTREE_TO_KCAL_MOL).abs() < 1e-6);
    }

    #[test]
    fn output_without_surface_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orca.out");
        fs::write(&path, "ORCA single point\n").unwrap();

        let err = run(&OrcaScanConfig::new(&path), &ProgressReporter::new()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Orca { source: OrcaError::SurfaceNotFound, .. }
        ));
    }
}
