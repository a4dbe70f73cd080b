use super::open_input;
use crate::core::io::terachem::{
    self, CHARGE_SECTION_MARKER, SPIN_SECTION_MARKER, TeraChemLog,
};
use crate::core::io::traits::LogFile;
use crate::core::models::scan::ScanStep;
use crate::core::models::section::SectionRecord;
use crate::engine::classify::LineClassifier;
use crate::engine::config::ScanOrganizerConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::scanner::{ScanOutcome, scan_sections};
use crate::engine::sequencer::PositionIndex;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone)]
pub struct ScanOrganizerResult {
    pub steps: Vec<ScanStep>,
    /// Final spin population table of every scan step.
    pub spin: ScanOutcome,
    /// Final Mulliken charge table of every scan step.
    pub charge: ScanOutcome,
}

#[instrument(skip_all, name = "scan_workflow")]
pub fn run(
    config: &ScanOrganizerConfig,
    reporter: &ProgressReporter,
) -> Result<ScanOrganizerResult, EngineError> {
    info!(
        "Organizing scan populations from '{}'.",
        config.output_log.display()
    );

    let steps = reporter.phase("Reading scan log", || read_steps(&config.output_log))?;
    let index = terachem::position_index(&steps)?;
    info!(
        "Found {} scan step(s) over {} optimizer iteration(s).",
        steps.len(),
        index.as_slice().last().copied().unwrap_or(0)
    );

    let spin = reporter.phase("Organizing spin populations", || {
        organize(&config.mullpop, SPIN_SECTION_MARKER, index.clone(), &steps)
    })?;
    let charge = reporter.phase("Organizing charges", || {
        organize(&config.charges, CHARGE_SECTION_MARKER, index, &steps)
    })?;

    reporter.report(Progress::Message(format!(
        "{} spin and {} charge section(s) kept",
        spin.records.len(),
        charge.records.len()
    )));
    Ok(ScanOrganizerResult {
        steps,
        spin,
        charge,
    })
}

fn read_steps(path: &Path) -> Result<Vec<ScanStep>, EngineError> {
    let mut reader = open_input(path)?;
    TeraChemLog::read_from(&mut reader).map_err(|source| EngineError::TeraChem {
        path: path.to_path_buf(),
        source,
    })
}

fn organize<C: LineClassifier>(
    path: &Path,
    classifier: C,
    index: PositionIndex,
    steps: &[ScanStep],
) -> Result<ScanOutcome, EngineError> {
    debug!("Scanning '{}'", path.display());
    let mut reader = open_input(path)?;
    let mut outcome = scan_sections(&mut reader, classifier, index)?;
    attach_energies(&mut outcome.records, steps);

    if outcome.records.len() < steps.len() {
        warn!(
            "'{}' holds sections for only {} of {} scan step(s).",
            path.display(),
            outcome.records.len(),
            steps.len()
        );
    }
    Ok(outcome)
}

fn attach_energies(records: &mut [SectionRecord], steps: &[ScanStep]) {
    for record in records {
        record.energy = record
            .logical_index
            .checked_sub(1)
            .and_then(|i| steps.get(i))
            .and_then(|step| step.energy_hartree);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::ScanOrganizerConfigBuilder;
    use std::fs;
    use tempfile::TempDir;

    const LOG: &str = "\
FINAL ENERGY: -10.1
FINAL ENERGY: -10.2
-=#=- Optimized Energy:   -10.2000000000 a.u.
FINAL ENERGY: -10.3
-=#=- Optimized Energy:   -10.3000000000 a.u.
FINAL ENERGY: -10.1
FINAL ENERGY: -10.15
-=#=- Optimized Energy:   -10.1500000000 a.u.
";

    fn spin_table(tag: usize) -> String {
        format!(
            "{:29}Spin-Averaged Mulliken populations\n   1   Fe   {}.0\n",
            "   Atom   Charge", tag
        )
    }

    fn charge_table(tag: usize) -> String {
        format!("1\tFe\t{}.0\n2\tO\t-0.5\n", tag)
    }

    fn setup(raw_sections: usize) -> (TempDir, ScanOrganizerConfig) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("qmscript.out"), LOG).unwrap();
        let spin: String = (1..=raw_sections).map(spin_table).collect();
        let charge: String = (1..=raw_sections).map(charge_table).collect();
        fs::write(dir.path().join("mullpop"), spin).unwrap();
        fs::write(dir.path().join("charge_mull.xls"), charge).unwrap();

        let config = ScanOrganizerConfigBuilder::new()
            .output_log(dir.path().join("qmscript.out"))
            .mullpop(dir.path().join("mullpop"))
            .charges(dir.path().join("charge_mull.xls"))
            .build()
            .unwrap();
        (dir, config)
    }

    #[test]
    fn keeps_final_table_of_each_step_with_energy() {
        let (_dir, config) = setup(5);
        let result = run(&config, &ProgressReporter::new()).unwrap();

        assert_eq!(result.steps.len(), 3);
        let spin_raws: Vec<_> = result.spin.records.iter().map(|r| r.raw_section).collect();
        assert_eq!(spin_raws, vec![2, 3, 5]);
        assert!(result.spin.records[1].content.contains("Fe   3.0"));
        assert_eq!(result.spin.records[2].energy, Some(-10.15));

        let charge_raws: Vec<_> = result.charge.records.iter().map(|r| r.raw_section).collect();
        assert_eq!(charge_raws, vec![2, 3, 5]);
        assert_eq!(result.charge.records[0].content, "1\tFe\t2.0\n2\tO\t-0.5\n");
    }

    #[test]
    fn truncated_population_file_gives_short_output() {
        let (_dir, config) = setup(3);
        let result = run(&config, &ProgressReporter::new()).unwrap();
        assert_eq!(result.spin.records.len(), 2);
        assert_eq!(result.charge.records.len(), 2);
    }

    #[test]
    fn missing_population_file_aborts() {
        let (dir, config) = setup(5);
        fs::remove_file(dir.path().join("mullpop")).unwrap();
        let err = run(&config, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, EngineError::FileAccess { path, .. } if path.ends_with("mullpop")));
    }
}
