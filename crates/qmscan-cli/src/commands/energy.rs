use super::write_output;
use crate::cli::EnergyArgs;
use crate::config::builder::build_energy_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use qmscan::core::io::tables;
use qmscan::engine::error::EngineError;
use qmscan::workflows;

pub fn run(args: EnergyArgs, show_progress: bool) -> Result<()> {
    let app = build_energy_config(&args)?;
    let progress = CliProgressHandler::new(show_progress);

    let result = workflows::energy::run(&app.core_config, &progress.reporter())?;

    write_output(&app.output, |w| {
        tables::write_energy_profiles(&result.labels(), &result.series(), w)
            .map_err(EngineError::from)?;
        Ok(())
    })?;

    for profile in &result.profiles {
        if let Some((frame, max)) = profile.maximum() {
            println!(
                "  {} ({}): max {:.2} kcal/mol at frame {}",
                profile.label, profile.software, max, frame
            );
        }
    }
    println!("✓ Energy profiles written to: {}", app.output.display());
    Ok(())
}
