use super::write_output;
use crate::cli::ScanArgs;
use crate::config::builder::build_scan_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use qmscan::core::io::{tables, terachem};
use qmscan::engine::error::EngineError;
use qmscan::workflows;
use tracing::info;

pub fn run(args: ScanArgs, show_progress: bool) -> Result<()> {
    let app = build_scan_config(&args)?;
    let progress = CliProgressHandler::new(show_progress);

    let result = workflows::scan::run(&app.core_config, &progress.reporter())?;

    for (records, path) in [
        (&result.spin.records, &app.spin_output),
        (&result.charge.records, &app.charge_output),
    ] {
        write_output(path, |w| {
            terachem::write_section_dump(records, w).map_err(EngineError::from)?;
            Ok(())
        })?;
        info!("Wrote {} section(s) to {:?}", records.len(), path);
    }
    write_output(&app.summary_output, |w| {
        tables::write_scan_summary(&result.steps, w).map_err(EngineError::from)?;
        Ok(())
    })?;

    println!(
        "✓ Organized {} scan step(s): {} spin and {} charge section(s) kept.",
        result.steps.len(),
        result.spin.records.len(),
        result.charge.records.len()
    );
    let skipped = result.spin.exhausted_sections() + result.charge.exhausted_sections();
    if skipped > 0 {
        println!("  {} section(s) beyond the last scan step were ignored.", skipped);
    }
    Ok(())
}
