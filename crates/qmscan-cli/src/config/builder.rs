use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{EnergyAppConfig, GbsaAppConfig, NebAppConfig, OrcaScanAppConfig, ScanAppConfig};
use crate::cli::{EnergyArgs, GbsaArgs, NebArgs, OrcaScanArgs, ScanArgs};
use crate::error::{CliError, Result};
use crate::utils::parser;
use qmscan::engine::config as core_config;
use qmscan::workflows::gbsa::discover_inputs;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn build_scan_config(args: &ScanArgs) -> Result<ScanAppConfig> {
    let defaults = DefaultsConfig::default();
    let file = FileConfig::load(args.config.as_deref(), &args.set_values)?
        .scan
        .unwrap_or_default();

    let dir = args.dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let resolve = |value: Option<PathBuf>, default: &str| {
        dir.join(value.unwrap_or_else(|| PathBuf::from(default)))
    };

    let core_config = core_config::ScanOrganizerConfigBuilder::new()
        .output_log(resolve(file.output_log, defaults.output_log))
        .mullpop(resolve(file.mullpop, defaults.mullpop))
        .charges(resolve(file.charges, defaults.charges))
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(ScanAppConfig {
        core_config,
        spin_output: resolve(file.spin_output, defaults.spin_output),
        charge_output: resolve(file.charge_output, defaults.charge_output),
        summary_output: resolve(file.summary_output, defaults.summary_output),
    })
}

pub fn build_energy_config(args: &EnergyArgs) -> Result<EnergyAppConfig> {
    let defaults = DefaultsConfig::default();
    let file = FileConfig::load(args.config.as_deref(), &args.set_values)?
        .energy
        .unwrap_or_default();

    let relative_to_lowest = args.relative_to_lowest
        || file
            .relative_to_lowest
            .unwrap_or(defaults.relative_to_lowest);

    let core_config = core_config::EnergyProfileConfigBuilder::new()
        .trajectories(args.trajectories.iter().cloned())
        .relative_to_lowest(relative_to_lowest)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(EnergyAppConfig {
        core_config,
        output: args
            .output
            .clone()
            .or(file.output)
            .unwrap_or_else(|| PathBuf::from(defaults.energy_output)),
    })
}

pub fn build_orca_scan_config(args: &OrcaScanArgs) -> Result<OrcaScanAppConfig> {
    let defaults = DefaultsConfig::default();
    let file = FileConfig::load(args.config.as_deref(), &args.set_values)?
        .orca_scan
        .unwrap_or_default();

    let input = args
        .input
        .clone()
        .or(file.input)
        .unwrap_or_else(|| PathBuf::from(defaults.orca_input));

    Ok(OrcaScanAppConfig {
        core_config: core_config::OrcaScanConfig::new(input),
        output: args
            .output
            .clone()
            .or(file.output)
            .unwrap_or_else(|| PathBuf::from(defaults.orca_output)),
    })
}

pub fn build_neb_config(args: &NebArgs) -> Result<NebAppConfig> {
    let defaults = DefaultsConfig::default();
    let file = FileConfig::load(args.config.as_deref(), &args.set_values)?
        .neb
        .unwrap_or_default();

    let coordinate_specs: Vec<String> = if !args.coordinates.is_empty() {
        args.coordinates.clone()
    } else if let Some(coordinates) = file.coordinates {
        coordinates
    } else {
        defaults.neb_coordinates.iter().map(|s| s.to_string()).collect()
    };

    let mut builder = core_config::NebConfigBuilder::new()
        .input(
            args.input
                .clone()
                .or(file.input)
                .unwrap_or_else(|| PathBuf::from(defaults.neb_input)),
        )
        .image_count(args.images.or(file.images).unwrap_or(defaults.neb_images));
    for (i, spec) in coordinate_specs.iter().enumerate() {
        let atoms = parser::parse_atom_list(spec).map_err(|e| CliError::Argument(e.to_string()))?;
        builder = builder.coordinate(core_config::ReactionCoordinate::new(
            format!("coord{}", i + 1),
            atoms,
        ));
    }
    let core_config = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(NebAppConfig {
        core_config,
        output: args
            .output
            .clone()
            .or(file.output)
            .unwrap_or_else(|| PathBuf::from(defaults.neb_output)),
        path_output: args
            .path_output
            .clone()
            .or(file.path_output)
            .unwrap_or_else(|| PathBuf::from(defaults.neb_path_output)),
    })
}

pub fn build_gbsa_config(args: &GbsaArgs) -> Result<GbsaAppConfig> {
    build_gbsa_config_in(args, Path::new("."))
}

/// Like [`build_gbsa_config`], discovering inputs in `search_dir` when none are
/// given on the command line.
pub fn build_gbsa_config_in(args: &GbsaArgs, search_dir: &Path) -> Result<GbsaAppConfig> {
    let defaults = DefaultsConfig::default();
    let file = FileConfig::load(args.config.as_deref(), &args.set_values)?
        .gbsa
        .unwrap_or_default();

    let inputs = if args.inputs.is_empty() {
        let suffix = file
            .pattern_suffix
            .as_deref()
            .unwrap_or(defaults.gbsa_pattern_suffix);
        let found = discover_inputs(search_dir, suffix)?;
        if found.is_empty() {
            return Err(CliError::Config(format!(
                "No input given and no '*{}' file found in '{}'.",
                suffix,
                search_dir.display()
            )));
        }
        info!("Discovered {} decomposition file(s).", found.len());
        found
    } else {
        args.inputs.clone()
    };

    let core_config = core_config::GbsaConfigBuilder::new()
        .inputs(inputs)
        .ligand_resid(
            args.ligand
                .or(file.ligand_resid)
                .unwrap_or(defaults.gbsa_ligand_resid),
        )
        .top_hits(args.top.or(file.top_hits).unwrap_or(defaults.gbsa_top_hits))
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(GbsaAppConfig {
        core_config,
        output_dir: args
            .output_dir
            .clone()
            .or(file.output_dir)
            .unwrap_or_else(|| PathBuf::from(defaults.gbsa_output_dir)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use once_cell::sync::Lazy;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    static TEST_DIR: Lazy<TempDir> = Lazy::new(|| tempdir().expect("Failed to create temp dir"));

    fn write_config_file(name: &str, content: &str) -> String {
        let file_path = TEST_DIR.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path.to_string_lossy().into_owned()
    }

    fn parse(args: &[&str]) -> Commands {
        let mut argv = vec!["qmscan"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv).command
    }

    #[test]
    fn scan_paths_default_inside_job_directory() {
        let Commands::Scan(args) = parse(&["scan", "-d", "job"]) else {
            panic!("expected scan command");
        };
        let app = build_scan_config(&args).unwrap();

        assert_eq!(app.core_config.output_log, PathBuf::from("job/qmscript.out"));
        assert_eq!(app.core_config.mullpop, PathBuf::from("job/scr/mullpop"));
        assert_eq!(app.core_config.charges, PathBuf::from("job/scr/charge_mull.xls"));
        assert_eq!(app.spin_output, PathBuf::from("job/scr/scan_spin"));
    }

    #[test]
    fn explicit_flags_beat_set_values_and_file() {
        let config = write_config_file("neb.toml", "[neb]\nimages = 8\noutput = \"file.csv\"\n");
        let Commands::Neb(args) = parse(&[
            "neb", "-c", config.as_str(), "-S", "neb.images=10", "-n", "12", "--coord", "1,2",
        ]) else {
            panic!("expected neb command");
        };
        let app = build_neb_config(&args).unwrap();

        assert_eq!(app.core_config.image_count, 12);
        assert_eq!(app.output, PathBuf::from("file.csv"));
        assert_eq!(app.core_config.coordinates.len(), 1);
        assert_eq!(app.core_config.coordinates[0].atoms, vec![1, 2]);
        assert_eq!(app.core_config.coordinates[0].label, "coord1");
    }

    #[test]
    fn set_values_beat_file_values() {
        let config = write_config_file("neb_set.toml", "[neb]\nimages = 8\n");
        let Commands::Neb(args) = parse(&["neb", "-c", config.as_str(), "-S", "neb.images=10"]) else {
            panic!("expected neb command");
        };
        let app = build_neb_config(&args).unwrap();
        assert_eq!(app.core_config.image_count, 10);
    }

    #[test]
    fn neb_defaults_follow_reaction_coordinates() {
        let Commands::Neb(args) = parse(&["neb"]) else {
            panic!("expected neb command");
        };
        let app = build_neb_config(&args).unwrap();

        let atoms: Vec<_> = app.core_config.coordinates.iter().map(|c| c.atoms.clone()).collect();
        assert_eq!(atoms, vec![vec![123, 128], vec![128, 138]]);
        assert_eq!(app.core_config.image_count, 20);
        assert_eq!(app.path_output, PathBuf::from("neb_path.xyz"));
    }

    #[test]
    fn single_atom_coordinate_is_rejected() {
        let Commands::Neb(args) = parse(&["neb", "--coord", "5"]) else {
            panic!("expected neb command");
        };
        assert!(matches!(build_neb_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn energy_flag_or_file_enables_alignment() {
        let config = write_config_file("energy.toml", "[energy]\nrelative-to-lowest = true\n");
        let Commands::Energy(args) = parse(&["energy", "a.xyz", "-c", config.as_str()]) else {
            panic!("expected energy command");
        };
        let app = build_energy_config(&args).unwrap();
        assert!(app.core_config.relative_to_lowest);
        assert_eq!(app.output, PathBuf::from("energies.csv"));
    }

    #[test]
    fn gbsa_discovers_inputs_and_applies_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b_24.dat"), "").unwrap();
        fs::write(dir.path().join("a_24.dat"), "").unwrap();
        fs::write(dir.path().join("a_12.dat"), "").unwrap();

        let Commands::Gbsa(args) = parse(&["gbsa", "--top", "3"]) else {
            panic!("expected gbsa command");
        };
        let app = build_gbsa_config_in(&args, dir.path()).unwrap();

        assert_eq!(app.core_config.inputs.len(), 2);
        assert!(app.core_config.inputs[0].ends_with("a_24.dat"));
        assert_eq!(app.core_config.ligand_resid, 247);
        assert_eq!(app.core_config.top_hits, 3);
    }

    #[test]
    fn gbsa_without_inputs_is_a_config_error() {
        let dir = tempdir().unwrap();
        let Commands::Gbsa(args) = parse(&["gbsa"]) else {
            panic!("expected gbsa command");
        };
        assert!(matches!(
            build_gbsa_config_in(&args, dir.path()),
            Err(CliError::Config(_))
        ));
    }
}
