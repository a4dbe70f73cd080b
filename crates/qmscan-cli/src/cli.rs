use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "David Kastner",
    version,
    about = "QMScan - Organize and analyze the output of QM/MM scans, trajectories and MMGBSA decompositions.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output and progress bars
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Keep the final spin and charge tables of every step of a TeraChem scan.
    Scan(ScanArgs),
    /// Relative energy profiles of one or more xyz trajectories.
    Energy(EnergyArgs),
    /// Relative energies of an ORCA relaxed surface scan.
    OrcaScan(OrcaScanArgs),
    /// Reaction-coordinate distances along optim.xyz and an initial NEB path.
    Neb(NebArgs),
    /// Pairwise MMGBSA decomposition and the strongest ligand interactions.
    Gbsa(GbsaArgs),
}

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug, Default)]
pub struct ScanArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory of the TeraChem job. Relative paths are resolved against it.
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S scan.mullpop=scr/mullpop
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `energy` subcommand.
#[derive(Args, Debug, Default)]
pub struct EnergyArgs {
    /// Trajectory files (.xyz) written by TeraChem or ORCA.
    #[arg(required = true, value_name = "TRAJ")]
    pub trajectories: Vec<PathBuf>,

    /// Path for the output CSV file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Reference every profile to the lowest starting energy among them.
    #[arg(long)]
    pub relative_to_lowest: bool,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `orca-scan` subcommand.
#[derive(Args, Debug, Default)]
pub struct OrcaScanArgs {
    /// Path to the ORCA output file.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Path for the output CSV file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `neb` subcommand.
#[derive(Args, Debug, Default)]
pub struct NebArgs {
    /// Path to the TeraChem optimization trajectory.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Atoms of one reaction coordinate, e.g. '123,128' or '10-12,15'.
    /// Repeat for every coordinate.
    #[arg(long = "coord", value_name = "ATOMS")]
    pub coordinates: Vec<String>,

    /// Number of images in the initial NEB path.
    #[arg(short = 'n', long, value_name = "INT")]
    pub images: Option<usize>,

    /// Path for the per-frame CSV file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path for the xyz file holding the selected images.
    #[arg(long, value_name = "PATH")]
    pub path_output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `gbsa` subcommand.
#[derive(Args, Debug, Default)]
pub struct GbsaArgs {
    /// Decomposition files. When omitted, files in the current directory ending
    /// with the configured suffix are used.
    #[arg(short, long = "input", value_name = "PATH")]
    pub inputs: Vec<PathBuf>,

    /// Residue number of the ligand.
    #[arg(long, value_name = "RESID")]
    pub ligand: Option<i64>,

    /// Number of strongest interactions to keep (ties at the cut are kept).
    #[arg(long, value_name = "INT")]
    pub top: Option<usize>,

    /// Directory for the output CSV files.
    #[arg(short, long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::parse_from(["qmscan", "energy", "a.xyz", "b.xyz", "-vv", "--relative-to-lowest"]);
        assert_eq!(cli.verbose, 2);
        let Commands::Energy(args) = cli.command else {
            panic!("expected energy command");
        };
        assert_eq!(args.trajectories.len(), 2);
        assert!(args.relative_to_lowest);
    }

    #[test]
    fn neb_accepts_repeated_coordinates() {
        let cli = Cli::parse_from([
            "qmscan", "neb", "--coord", "123,128", "--coord", "128-130", "-n", "12",
        ]);
        let Commands::Neb(args) = cli.command else {
            panic!("expected neb command");
        };
        assert_eq!(args.coordinates, vec!["123,128", "128-130"]);
        assert_eq!(args.images, Some(12));
    }

    #[test]
    fn energy_requires_a_trajectory() {
        assert!(Cli::try_parse_from(["qmscan", "energy"]).is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["qmscan", "-q", "-v", "orca-scan"]).is_err());
    }
}
