use super::write_output;
use crate::cli::NebArgs;
use crate::config::builder::build_neb_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use qmscan::core::io::{tables, xyz};
use qmscan::engine::error::EngineError;
use qmscan::workflows;

pub fn run(args: NebArgs, show_progress: bool) -> Result<()> {
    let app = build_neb_config(&args)?;
    let progress = CliProgressHandler::new(show_progress);

    let result = workflows::neb::run(&app.core_config, &progress.reporter())?;

    write_output(&app.output, |w| {
        tables::write_frame_measurements(&result.coordinate_labels, &result.measurements, w)
            .map_err(EngineError::from)?;
        Ok(())
    })?;
    write_output(&app.path_output, |w| {
        xyz::write_frames(result.selected_frames(), w)?;
        Ok(())
    })?;

    println!(
        "✓ Measured {} frame(s); {} image(s) written to: {}",
        result.measurements.len(),
        result.selected.len(),
        app.path_output.display()
    );
    Ok(())
}
