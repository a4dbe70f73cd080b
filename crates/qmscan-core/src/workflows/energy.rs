use super::open_input;
use crate::core::io::traits::LogFile;
use crate::core::io::xyz::{Software, XyzError, XyzTrajectory};
use crate::core::models::frame::Frame;
use crate::core::utils::units::{HARTREE_TO_KCAL_MOL, relative_kcal_mol};
use crate::engine::config::EnergyProfileConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Energies of one trajectory, absolute and relative.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyProfile {
    pub path: PathBuf,
    pub label: String,
    pub software: Software,
    pub energies_hartree: Vec<f64>,
    /// kcal/mol relative to the first frame, shifted when profiles are aligned
    /// to the lowest starting energy.
    pub relative_kcal_mol: Vec<f64>,
}

impl EnergyProfile {
    /// Frame index and value of the highest relative energy.
    pub fn maximum(&self) -> Option<(usize, f64)> {
        self.relative_kcal_mol
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (i, e)| match best {
                Some((_, b)) if b >= e => best,
                _ => Some((i, e)),
            })
    }
}

#[derive(Debug, Clone)]
pub struct EnergyProfileResult {
    pub profiles: Vec<EnergyProfile>,
}

impl EnergyProfileResult {
    pub fn labels(&self) -> Vec<String> {
        self.profiles.iter().map(|p| p.label.clone()).collect()
    }

    pub fn series(&self) -> Vec<Vec<f64>> {
        self.profiles
            .iter()
            .map(|p| p.relative_kcal_mol.clone())
            .collect()
    }
}

#[instrument(skip_all, name = "energy_workflow")]
pub fn run(
    config: &EnergyProfileConfig,
    reporter: &ProgressReporter,
) -> Result<EnergyProfileResult, EngineError> {
    info!(
        "Reading energies from {} trajectory file(s).",
        config.trajectories.len()
    );

    reporter.report(Progress::TaskStart {
        total_steps: config.trajectories.len() as u64,
    });
    let mut profiles = Vec::with_capacity(config.trajectories.len());
    for path in &config.trajectories {
        profiles.push(read_profile(path)?);
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);

    if config.relative_to_lowest && profiles.len() > 1 {
        align_to_lowest_start(&mut profiles);
    }

    for profile in &profiles {
        if let Some((frame, max)) = profile.maximum() {
            info!(
                "{} ({}): maximum of {:.2} kcal/mol at frame {}.",
                profile.label, profile.software, max, frame
            );
        }
    }
    Ok(EnergyProfileResult { profiles })
}

fn read_profile(path: &Path) -> Result<EnergyProfile, EngineError> {
    let wrap = |source: XyzError| EngineError::Xyz {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = open_input(path)?;
    let frames = XyzTrajectory::read_from(&mut reader).map_err(wrap)?;
    let first = frames.first().ok_or_else(|| wrap(XyzError::Empty))?;
    let software = Software::identify(&first.comment).map_err(wrap)?;
    debug!(
        "'{}' was written by {} ({} frames).",
        path.display(),
        software,
        frames.len()
    );

    let energies_hartree = frame_energies(&frames, software).map_err(wrap)?;
    let relative = relative_kcal_mol(&energies_hartree);
    Ok(EnergyProfile {
        path: path.to_path_buf(),
        label: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        software,
        energies_hartree,
        relative_kcal_mol: relative,
    })
}

fn frame_energies(frames: &[Frame], software: Software) -> Result<Vec<f64>, XyzError> {
    frames
        .iter()
        .map(|frame| software.parse_energy(frame).map_err(XyzError::from))
        .collect()
}

/// Shifts every profile by the gap between its first energy and the lowest first
/// energy of all profiles, so they share one reference.
fn align_to_lowest_start(profiles: &mut [EnergyProfile]) {
    let lowest = profiles
        .iter()
        .filter_map(|p| p.energies_hartree.first().copied())
        .fold(f64::INFINITY, f64::min);

    for profile in profiles.iter_mut() {
        let Some(&first) = profile.energies_hartree.first() else {
            continue;
        };
        let shift = (first - lowest) * HARTREE_TO_KCAL_MOL;
        for energy in &mut profile.relative_kcal_mol {
            *energy += shift;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EnergyProfileConfigBuilder;
    use std::fs;

    fn terachem_traj(energies: &[f64]) -> String {
        energies
            .iter()
            .enumerate()
            .map(|(i, e)| format!("1\nConverged     Job {} {} a.u.\nH 0.0 0.0 {}.0\n", i + 1, e, i))
            .collect()
    }

    fn orca_traj(energies: &[f64]) -> String {
        energies
            .iter()
            .map(|e| format!("1\nCoordinates from ORCA-job qmscript {}\nH 0.0 0.0 0.0\n", e))
            .collect()
    }

    #[test]
    fn profile_is_relative_to_first_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.xyz");
        fs::write(&path, terachem_traj(&[-10.0, -9.99, -10.01])).unwrap();

        let config = EnergyProfileConfigBuilder::new().trajectory(path).build().unwrap();
        let result = run(&config, &ProgressReporter::new()).unwrap();
        let profile = &result.profiles[0];

        assert_eq!(profile.software, Software::TeraChem);
        assert_eq!(profile.label, "scan.xyz");
        assert_eq!(profile.relative_kcal_mol.len(), 3);
        assert_eq!(profile.relative_kcal_mol[0], 0.0);
        let (frame, max) = profile.maximum().unwrap();
        assert_eq!(frame, 1);
        assert!((max - 0.01 * HARTREE_TO_KCAL_MOL).abs() < 1e-6);
    }

    #[test]
    fn profiles_can_share_the_lowest_start() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.xyz");
        let b = dir.path().join("b.xyz");
        fs::write(&a, terachem_traj(&[-10.0, -9.9])).unwrap();
        fs::write(&b, orca_traj(&[-10.1, -10.0])).unwrap();

        let config = EnergyProfileConfigBuilder::new()
            .trajectories([a, b])
            .relative_to_lowest(true)
            .build()
            .unwrap();
        let result = run(&config, &ProgressReporter::new()).unwrap();

        assert_eq!(result.profiles[1].software, Software::Orca);
        assert_eq!(result.profiles[1].relative_kcal_mol[0], 0.0);
        let shifted = result.profiles[0].relative_kcal_mol[0];
        assert!((shifted - 0.1 * HARTREE_TO_KCAL_MOL).abs() < 1e-6);
        let later = result.profiles[0].relative_kcal_mol[1];
        assert!((later - 0.2 * HARTREE_TO_KCAL_MOL).abs() < 1e-6);
        assert_eq!(result.labels(), vec!["a.xyz", "b.xyz"]);
    }

    #[test]
    fn unknown_program_aborts_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g16.xyz");
        fs::write(&path, "1\nGaussian frame\nH 0 0 0\n").unwrap();

        let config = EnergyProfileConfigBuilder::new().trajectory(path).build().unwrap();
        let err = run(&config, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Xyz { source: XyzError::UnsupportedSoftware(_), .. }
        ));
    }

    #[test]
    fn missing_trajectory_is_a_file_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = EnergyProfileConfigBuilder::new()
            .trajectory(dir.path().join("absent.xyz"))
            .build()
            .unwrap();
        let err = run(&config, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, EngineError::FileAccess { .. }));
    }
}
