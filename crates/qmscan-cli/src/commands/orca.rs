use super::write_output;
use crate::cli::OrcaScanArgs;
use crate::config::builder::build_orca_scan_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use qmscan::core::io::tables;
use qmscan::engine::error::EngineError;
use qmscan::workflows;

pub fn run(args: OrcaScanArgs, show_progress: bool) -> Result<()> {
    let app = build_orca_scan_config(&args)?;
    let progress = CliProgressHandler::new(show_progress);

    let result = workflows::orca_scan::run(&app.core_config, &progress.reporter())?;

    write_output(&app.output, |w| {
        tables::write_surface(&result.points, &result.relative_kcal_mol, w)
            .map_err(EngineError::from)?;
        Ok(())
    })?;
    println!(
        "✓ {} surface point(s) written to: {}",
        result.points.len(),
        app.output.display()
    );
    Ok(())
}
