//! CSV writers for workflow results.
//!
//! Each writer emits a header row followed by one row per record, in input order.

use crate::core::models::decomposition::{DecompositionCsvRow, DecompositionRow};
use crate::core::models::frame::FrameMeasurement;
use crate::core::models::scan::ScanStep;
use crate::core::models::surface::SurfacePoint;
use crate::core::utils::units::HARTREE_TO_KCAL_MOL;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ScanSummaryRow {
    step: usize,
    iterations: usize,
    cumulative: usize,
    energy_hartree: Option<f64>,
    relative_energy_kcal_mol: Option<f64>,
}

/// Writes `step,iterations,cumulative,energy_hartree,relative_energy_kcal_mol`.
///
/// Relative energies are taken against the first step that reported an energy.
pub fn write_scan_summary<W: Write>(steps: &[ScanStep], writer: W) -> Result<(), csv::Error> {
    let reference = steps.iter().find_map(|s| s.energy_hartree);
    let mut wtr = csv::Writer::from_writer(writer);
    for step in steps {
        wtr.serialize(ScanSummaryRow {
            step: step.step,
            iterations: step.iterations,
            cumulative: step.cumulative,
            energy_hartree: step.energy_hartree,
            relative_energy_kcal_mol: step
                .energy_hartree
                .zip(reference)
                .map(|(e, r)| (e - r) * HARTREE_TO_KCAL_MOL),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes one `frame` column followed by one column per series. Shorter series
/// leave their trailing cells empty.
pub fn write_energy_profiles<W: Write>(
    labels: &[String],
    series: &[Vec<f64>],
    writer: W,
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut header = vec!["frame".to_string()];
    header.extend(labels.iter().cloned());
    wtr.write_record(&header)?;

    let rows = series.iter().map(Vec::len).max().unwrap_or(0);
    for frame in 0..rows {
        let mut record = vec![frame.to_string()];
        record.extend(
            series
                .iter()
                .map(|s| s.get(frame).map(f64::to_string).unwrap_or_default()),
        );
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct SurfaceRow {
    coordinate: f64,
    relative_energy_kcal_mol: f64,
}

/// Writes `coordinate,relative_energy_kcal_mol`, pairing each surface point with
/// its entry in `relative_kcal_mol`. Rows stop at the shorter of the two.
pub fn write_surface<W: Write>(
    points: &[SurfacePoint],
    relative_kcal_mol: &[f64],
    writer: W,
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (point, &relative) in points.iter().zip(relative_kcal_mol) {
        wtr.serialize(SurfaceRow {
            coordinate: point.coordinate,
            relative_energy_kcal_mol: relative,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `frame,energy_hartree,relative_energy_kcal_mol` plus one distance column
/// per reaction coordinate label.
pub fn write_frame_measurements<W: Write>(
    coordinate_labels: &[String],
    measurements: &[FrameMeasurement],
    writer: W,
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut header: Vec<String> = ["frame", "energy_hartree", "relative_energy_kcal_mol"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    header.extend(coordinate_labels.iter().cloned());
    wtr.write_record(&header)?;

    for m in measurements {
        let mut record = vec![
            m.frame.to_string(),
            m.energy_hartree.to_string(),
            m.relative_energy_kcal_mol.to_string(),
        ];
        record.extend(
            m.distances
                .iter()
                .map(|d| d.map(|v| v.to_string()).unwrap_or_default()),
        );
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_decomposition<'a, W: Write>(
    rows: impl IntoIterator<Item = &'a DecompositionRow>,
    writer: W,
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(DecompositionCsvRow::from(row))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::decomposition::EnergyTerm;

    fn lines(buf: Vec<u8>) -> Vec<String> {
        String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn scan_summary_leaves_missing_energies_empty() {
        let steps = vec![
            ScanStep { step: 1, iterations: 3, cumulative: 3, energy_hartree: Some(-1.0) },
            ScanStep { step: 2, iterations: 2, cumulative: 5, energy_hartree: None },
            ScanStep { step: 3, iterations: 1, cumulative: 6, energy_hartree: Some(-0.5) },
        ];
        let mut buf = Vec::new();
        write_scan_summary(&steps, &mut buf).unwrap();
        let out = lines(buf);

        assert_eq!(
            out[0],
            "step,iterations,cumulative,energy_hartree,relative_energy_kcal_mol"
        );
        assert_eq!(out[1], "1,3,3,-1.0,0.0");
        assert_eq!(out[2], "2,2,5,,");
        assert!(out[3].starts_with("3,1,6,-0.5,313.75"));
    }

    #[test]
    fn energy_profiles_pad_short_series() {
        let labels = vec!["a.xyz".to_string(), "b.xyz".to_string()];
        let series = vec![vec![0.0, 1.5, 2.0], vec![0.0, -1.0]];
        let mut buf = Vec::new();
        write_energy_profiles(&labels, &series, &mut buf).unwrap();
        let out = lines(buf);

        assert_eq!(out, vec!["frame,a.xyz,b.xyz", "0,0,0", "1,1.5,-1", "2,2,"]);
    }

    #[test]
    fn surface_rows_use_the_given_relative_series() {
        let points = vec![
            SurfacePoint { coordinate: 1.5, energy_hartree: -10.0 },
            SurfacePoint { coordinate: 1.6, energy_hartree: -9.0 },
        ];
        let mut buf = Vec::new();
        write_surface(&points, &[0.0, 12.5], &mut buf).unwrap();
        let out = lines(buf);

        assert_eq!(out, vec!["coordinate,relative_energy_kcal_mol", "1.5,0.0", "1.6,12.5"]);
    }

    #[test]
    fn frame_measurements_have_one_column_per_coordinate() {
        let labels = vec!["123-128".to_string(), "128-138".to_string()];
        let measurements = vec![FrameMeasurement {
            frame: 0,
            energy_hartree: -5.0,
            relative_energy_kcal_mol: 0.0,
            distances: vec![Some(2.5), None],
        }];
        let mut buf = Vec::new();
        write_frame_measurements(&labels, &measurements, &mut buf).unwrap();
        let out = lines(buf);

        assert_eq!(
            out[0],
            "frame,energy_hartree,relative_energy_kcal_mol,123-128,128-138"
        );
        assert_eq!(out[1], "0,-5,0,2.5,");
    }

    #[test]
    fn decomposition_header_lists_every_term() {
        let term = |avg| EnergyTerm { avg, sd: 0.1, sdm: 0.01 };
        let row = DecompositionRow {
            resname_1: "LY1".into(),
            resid_1: 247,
            resname_2: "HIS".into(),
            resid_2: 12,
            internal: term(0.0),
            vdw: term(-1.0),
            electrostatic: term(-2.0),
            polar: term(0.5),
            non_polar: term(-0.1),
            total: term(-2.6),
        };
        let mut buf = Vec::new();
        write_decomposition([&row], &mut buf).unwrap();
        let out = lines(buf);

        let header: Vec<&str> = out[0].split(',').collect();
        assert_eq!(header.len(), 23);
        assert_eq!(&header[..5], &["Resname 1", "Resid 1", "Resname 2", "Resid 2", "Residue"]);
        assert_eq!(header[20], "Total");
        assert!(out[1].starts_with("LY1,247,HIS,12,HIS12,0.0,"));
    }
}
