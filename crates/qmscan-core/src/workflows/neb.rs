use super::open_input;
use crate::core::io::traits::LogFile;
use crate::core::io::xyz::{XyzError, XyzTrajectory, energy_from_comment};
use crate::core::models::frame::{Frame, FrameMeasurement};
use crate::core::utils::geometry::evenly_spaced_indices;
use crate::core::utils::units::HARTREE_TO_KCAL_MOL;
use crate::engine::config::{NebConfig, ReactionCoordinate};
use crate::engine::error::EngineError;
use crate::engine::extractor::PairTracker;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{debug, info, instrument};

/// TeraChem `optim.xyz` comments start with the frame energy.
pub const OPTIM_ENERGY_TOKEN: usize = 0;

#[derive(Debug, Clone)]
pub struct NebPathResult {
    pub coordinate_labels: Vec<String>,
    pub measurements: Vec<FrameMeasurement>,
    pub frames: Vec<Frame>,
    /// Frame indices chosen as the initial path, in trajectory order.
    pub selected: Vec<usize>,
}

impl NebPathResult {
    pub fn selected_frames(&self) -> impl Iterator<Item = &Frame> {
        self.selected.iter().filter_map(|&i| self.frames.get(i))
    }
}

#[instrument(skip_all, name = "neb_workflow")]
pub fn run(config: &NebConfig, reporter: &ProgressReporter) -> Result<NebPathResult, EngineError> {
    let wrap = |source: XyzError| EngineError::Xyz {
        path: config.input.clone(),
        source,
    };

    let frames = reporter.phase("Reading optimization trajectory", || {
        let mut reader = open_input(&config.input)?;
        XyzTrajectory::read_from(&mut reader).map_err(wrap)
    })?;
    info!(
        "Read {} frame(s) from '{}'.",
        frames.len(),
        config.input.display()
    );
    check_coordinates(&config.coordinates, &frames)?;

    reporter.report(Progress::TaskStart {
        total_steps: frames.len() as u64,
    });
    let mut measurements = Vec::with_capacity(frames.len());
    for frame in &frames {
        let energy_hartree =
            energy_from_comment(&frame.comment, OPTIM_ENERGY_TOKEN, frame.comment_line)
                .map_err(|e| wrap(e.into()))?;
        measurements.push(FrameMeasurement {
            frame: frame.index,
            energy_hartree,
            relative_energy_kcal_mol: 0.0,
            distances: config
                .coordinates
                .iter()
                .map(|coordinate| measure(frame, coordinate))
                .collect(),
        });
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);

    if let Some(reference) = measurements.first().map(|m| m.energy_hartree) {
        for m in &mut measurements {
            m.relative_energy_kcal_mol = (m.energy_hartree - reference) * HARTREE_TO_KCAL_MOL;
        }
    }

    let selected = evenly_spaced_indices(frames.len(), config.image_count);
    if selected.len() < config.image_count {
        info!(
            "Only {} distinct image(s) available for a {}-image path.",
            selected.len(),
            config.image_count
        );
    }
    debug!("Selected frames: {:?}", selected);

    Ok(NebPathResult {
        coordinate_labels: config.coordinates.iter().map(|c| c.label.clone()).collect(),
        measurements,
        frames,
        selected,
    })
}

fn check_coordinates(coordinates: &[ReactionCoordinate], frames: &[Frame]) -> Result<(), EngineError> {
    let atom_count = frames.iter().map(Frame::atom_count).min().unwrap_or(0);
    for coordinate in coordinates {
        if let Some(&serial) = coordinate.atoms.iter().find(|&&s| s == 0 || s > atom_count) {
            return Err(EngineError::MissingData(format!(
                "reaction coordinate '{}' refers to atom {}, but frames hold {} atom(s)",
                coordinate.label, serial, atom_count
            )));
        }
    }
    Ok(())
}

/// Distance of the last atom pair of `coordinate`, pairing member atoms in the
/// order they appear in the frame.
fn measure(frame: &Frame, coordinate: &ReactionCoordinate) -> Option<f64> {
    let mut tracker = PairTracker::new();
    for atom in frame.atoms.iter().filter(|a| coordinate.contains(a.serial)) {
        tracker.push(atom.position);
    }
    tracker.last_distance()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::NebConfigBuilder;
    use std::fs;
    use std::path::Path;

    fn optim_xyz(frames: usize) -> String {
        (0..frames)
            .map(|i| {
                format!(
                    "3\n-100.{:03} frame {}\nC 0.0 0.0 0.0\nO 0.0 0.0 {}.0\nH 3.0 4.0 0.0\n",
                    i, i, i + 1
                )
            })
            .collect()
    }

    fn config(path: &Path, images: usize) -> NebConfig {
        NebConfigBuilder::new()
            .input(path.to_path_buf())
            .coordinate(ReactionCoordinate::new("1-2", vec![1, 2]))
            .coordinate(ReactionCoordinate::new("1-3", vec![1, 3]))
            .image_count(images)
            .build()
            .unwrap()
    }

    #[test]
    fn measures_every_frame_and_selects_endpoints() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("optim.xyz");
        fs::write(&path, optim_xyz(5)).unwrap();

        let result = run(&config(&path, 3), &ProgressReporter::new()).unwrap();

        assert_eq!(result.measurements.len(), 5);
        assert_eq!(result.coordinate_labels, vec!["1-2", "1-3"]);
        let second = &result.measurements[1];
        assert_eq!(second.energy_hartree, -100.001);
        assert_eq!(second.distances, vec![Some(2.0), Some(5.0)]);
        assert_eq!(result.measurements[0].relative_energy_kcal_mol, 0.0);
        assert!(result.measurements[4].relative_energy_kcal_mol < 0.0);
        assert_eq!(result.selected, vec![0, 2, 4]);
        assert_eq!(result.selected_frames().count(), 3);
    }

    #[test]
    fn short_trajectory_yields_fewer_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("optim.xyz");
        fs::write(&path, optim_xyz(2)).unwrap();

        let result = run(&config(&path, 20), &ProgressReporter::new()).unwrap();
        assert_eq!(result.selected, vec![0, 1]);
    }

    #[test]
    fn coordinate_beyond_atom_count_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("optim.xyz");
        fs::write(&path, optim_xyz(2)).unwrap();

        let config = NebConfigBuilder::new()
            .input(path)
            .coordinate(ReactionCoordinate::new("123-128", vec![123, 128]))
            .image_count(2)
            .build()
            .unwrap();
        let err = run(&config, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, EngineError::MissingData(_)));
    }

    #[test]
    fn pairing_follows_appearance_order() {
        let frames = XyzTrajectory::read_from(&mut std::io::Cursor::new(optim_xyz(1))).unwrap();
        let all = ReactionCoordinate::new("all", vec![1, 2, 3]);
        // Atoms 1 and 2 pair up; atom 3 stays pending.
        assert_eq!(measure(&frames[0], &all), Some(1.0));
    }
}
